//! Single-type lookups that do not fall back from menu lists to products.

use actix_web::{HttpRequest, HttpResponse, Responder, get, put, web};

use crate::auth::EditorToken;
use crate::dto::Body;
use crate::forms::menu_lists::{MenuListForm, MenuListPayload};
use crate::forms::products::{ProductForm, ProductPayload};
use crate::media::MediaPipeline;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, read_form};
use crate::services::ServiceError;
use crate::services::landing_pages::show_landing_page_image as show_landing_page_image_service;
use crate::services::menu_lists::{
    show_menu_list as show_menu_list_service, show_menu_list_item as show_menu_list_item_service,
    update_menu_list as update_menu_list_service,
};
use crate::services::products::{
    show_product as show_product_service, show_product_image as show_product_image_service,
    update_product as update_product_service,
};

#[get("/products/{slug}")]
pub async fn show_product(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_product_service(&slug, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(Body::new(product)),
        Err(err) => error_response(err),
    }
}

#[put("/products/{slug}")]
pub async fn update_product(
    _editor: EditorToken,
    slug: web::Path<String>,
    req: HttpRequest,
    body: web::Payload,
    repo: web::Data<DieselRepository>,
    media: web::Data<MediaPipeline>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let form = match read_form(&req, body, server_config.upload_limit_bytes).await {
        Ok(form) => form,
        Err(e) => return error_response(e.into()),
    };
    let payload: ProductPayload = match ProductForm::from_raw(form).try_into() {
        Ok(payload) => payload,
        Err(errors) => return error_response(ServiceError::Form(errors)),
    };

    match update_product_service(&slug, payload, repo.get_ref(), media.get_ref()).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[get("/menu-lists/{slug}")]
pub async fn show_menu_list(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_menu_list_service(&slug, repo.get_ref()) {
        Ok(menu_list) => HttpResponse::Ok().json(Body::new(menu_list)),
        Err(err) => error_response(err),
    }
}

#[put("/menu-lists/{slug}")]
pub async fn update_menu_list(
    _editor: EditorToken,
    slug: web::Path<String>,
    req: HttpRequest,
    body: web::Payload,
    repo: web::Data<DieselRepository>,
    media: web::Data<MediaPipeline>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let form = match read_form(&req, body, server_config.upload_limit_bytes).await {
        Ok(form) => form,
        Err(e) => return error_response(e.into()),
    };
    let payload: MenuListPayload = match MenuListForm::from_raw(form).try_into() {
        Ok(payload) => payload,
        Err(errors) => return error_response(ServiceError::Form(errors)),
    };

    match update_menu_list_service(&slug, payload, repo.get_ref(), media.get_ref()).await {
        Ok(menu_list) => HttpResponse::Ok().json(menu_list),
        Err(err) => error_response(err),
    }
}

#[get("/product-images/{id}")]
pub async fn show_product_image(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_product_image_service(id.into_inner(), repo.get_ref()) {
        Ok(image) => HttpResponse::Ok().json(Body::new(image)),
        Err(err) => error_response(err),
    }
}

#[get("/menu-list-items/{id}")]
pub async fn show_menu_list_item(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_menu_list_item_service(id.into_inner(), repo.get_ref()) {
        Ok(item) => HttpResponse::Ok().json(Body::new(item)),
        Err(err) => error_response(err),
    }
}

#[get("/landing-page-images/{id}")]
pub async fn show_landing_page_image(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_landing_page_image_service(id.into_inner(), repo.get_ref()) {
        Ok(image) => HttpResponse::Ok().json(Body::new(image)),
        Err(err) => error_response(err),
    }
}
