//! Editorial form input.
//!
//! Handlers read the request body into a [`RawForm`] (multipart or
//! urlencoded), which the per-entity forms turn into validated payloads.
//! Nested collections are submitted with indexed keys such as
//! `images[0].caption` or `records[2].url`.

use std::collections::BTreeMap;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::media::{ImageSource, UploadedFile};

pub mod landing_page;
pub mod menu_lists;
pub mod products;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_JSON: &str = "Enter valid JSON.";
pub const INVALID_NUMBER: &str = "Enter a whole number.";

/// Errors raised while reading the request body itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormReadError {
    #[error("malformed form data: {0}")]
    Malformed(String),
    #[error("request body exceeds {0} bytes")]
    TooLarge(usize),
    #[error("field `{0}` is not valid UTF-8")]
    InvalidUtf8(String),
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
}

/// Field-keyed validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Merge validator output, prefixing every field with `prefix`.
    pub fn extend_validation(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors() {
            let key = format!("{prefix}{field}");
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                self.add(key.clone(), message);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = FormErrors::default();
        errors.extend_validation("", &value);
        errors
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self.0.keys().map(String::as_str).collect::<Vec<_>>();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Text fields and files of one submitted form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawForm {
    fields: Vec<(String, String)>,
    files: Vec<(String, UploadedFile)>,
}

/// Fields submitted under one index of a nested collection, keyed by sub-field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawGroup {
    pub index: usize,
    fields: BTreeMap<String, String>,
    files: BTreeMap<String, UploadedFile>,
}

impl RawForm {
    /// Drain a multipart stream. Parts with a file name become files, the rest text.
    pub async fn from_multipart(mut payload: Multipart, limit: usize) -> Result<Self, FormReadError> {
        let mut form = RawForm::default();
        let mut total = 0usize;

        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|e| FormReadError::Malformed(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);
            let content_type = field.content_type().map(|mime| mime.to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field
                .try_next()
                .await
                .map_err(|e| FormReadError::Malformed(e.to_string()))?
            {
                total += chunk.len();
                if total > limit {
                    return Err(FormReadError::TooLarge(limit));
                }
                bytes.extend_from_slice(&chunk);
            }

            match file_name {
                // An untouched file input.
                Some(file_name) if file_name.is_empty() => {}
                Some(file_name) => form.files.push((
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                )),
                None => {
                    let value = String::from_utf8(bytes)
                        .map_err(|_| FormReadError::InvalidUtf8(name.clone()))?;
                    form.fields.push((name, value));
                }
            }
        }

        Ok(form)
    }

    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            fields: pairs,
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.push((name.into(), file));
        self
    }

    /// First text value submitted for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.text(key).is_some() || self.files.iter().any(|(name, _)| name == key)
    }

    /// Remove and return the first file uploaded under `key`.
    pub fn take_file(&mut self, key: &str) -> Option<UploadedFile> {
        let position = self.files.iter().position(|(name, _)| name == key)?;
        Some(self.files.remove(position).1)
    }

    /// Image given either as an upload or as the name of a stored file.
    pub fn take_image(&mut self, key: &str) -> Option<ImageSource> {
        self.take_file(key).map(ImageSource::Upload).or_else(|| {
            self.text(key)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| ImageSource::Existing(name.to_string()))
        })
    }

    /// Group `prefix[i].field` keys by index, in ascending index order.
    ///
    /// Returns `None` when neither an indexed key nor a bare `prefix` field was
    /// submitted, meaning the collection was not part of the request. Keys
    /// with a malformed index are ignored and missing indices are skipped.
    pub fn take_groups(&mut self, prefix: &str) -> Option<Vec<RawGroup>> {
        let mut groups: BTreeMap<usize, RawGroup> = BTreeMap::new();
        let mut present = self.contains(prefix);

        for (key, value) in &self.fields {
            if let Some((index, sub)) = parse_indexed_key(prefix, key) {
                present = true;
                let group = groups.entry(index).or_default();
                group.fields.entry(sub.to_string()).or_insert_with(|| value.clone());
            }
        }

        let files = std::mem::take(&mut self.files);
        for (key, file) in files {
            let parsed = parse_indexed_key(prefix, &key).map(|(index, sub)| (index, sub.to_string()));
            match parsed {
                Some((index, sub)) => {
                    present = true;
                    groups.entry(index).or_default().files.entry(sub).or_insert(file);
                }
                None => self.files.push((key, file)),
            }
        }

        present.then(|| {
            groups
                .into_iter()
                .map(|(index, mut group)| {
                    group.index = index;
                    group
                })
                .collect()
        })
    }
}

impl RawGroup {
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn take_image(&mut self, key: &str) -> Option<ImageSource> {
        self.files.remove(key).map(ImageSource::Upload).or_else(|| {
            self.text(key)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| ImageSource::Existing(name.to_string()))
        })
    }

    /// Error key of `field` inside this group, e.g. `images[3].caption`.
    pub fn key(&self, prefix: &str, field: &str) -> String {
        format!("{prefix}[{}].{field}", self.index)
    }
}

/// Split `images[3].caption` into `(3, "caption")` when it belongs to `prefix`.
fn parse_indexed_key<'a>(prefix: &str, key: &'a str) -> Option<(usize, &'a str)> {
    let rest = key.strip_prefix(prefix)?.strip_prefix('[')?;
    let (index, rest) = rest.split_once(']')?;
    let sub = rest.strip_prefix('.')?;
    if sub.is_empty() {
        return None;
    }
    Some((index.trim().parse().ok()?, sub))
}

/// Keep a constructed value, or record why it was rejected.
///
/// Nothing is added when `key` already carries a message from the validator,
/// so a blank name is reported once.
pub fn checked<T>(
    errors: &mut FormErrors,
    key: &str,
    value: Result<T, TypeConstraintError>,
) -> Option<T> {
    match value {
        Ok(value) => Some(value),
        Err(e) => {
            if errors.get(key).is_none() {
                let message = match e {
                    TypeConstraintError::EmptyString(_) => REQUIRED.to_string(),
                    TypeConstraintError::TooLong(_, max) => {
                        format!("Ensure this value has at most {max} characters.")
                    }
                    other => other.to_string(),
                };
                errors.add(key, message);
            }
            None
        }
    }
}

/// Interpret the `meta` field.
///
/// `None` when the field is absent, `Some(None)` when it is blank or JSON
/// `null`, otherwise the parsed document.
pub fn parse_meta(raw: Option<&str>, errors: &mut FormErrors) -> Option<Option<Value>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return Some(None);
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Null) => Some(None),
        Ok(value) => Some(Some(value)),
        Err(_) => {
            errors.add("meta", INVALID_JSON);
            None
        }
    }
}

/// Parse an optional `order` sub-field, reporting malformed numbers under `key`.
pub fn parse_order(raw: Option<&str>, key: String, errors: &mut FormErrors) -> Option<i32> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match raw.parse::<i32>() {
        Ok(order) => Some(order),
        Err(_) => {
            errors.add(key, INVALID_NUMBER);
            None
        }
    }
}
