//! Core library exports for the showroom content service.
//!
//! The `data` feature exposes the domain model and its SQLite persistence.
//! The default `server` feature adds the HTTP API, form handling and the
//! media pipeline used by the `showroom-cms` binary.

pub mod db;
pub mod domain;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod media;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
