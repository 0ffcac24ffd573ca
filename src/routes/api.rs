use actix_web::{HttpRequest, HttpResponse, Responder, get, post, put, web};
use serde_json::{Value, json};

use crate::auth::EditorToken;
use crate::dto::Body;
use crate::forms::landing_page::{LandingPageImageForm, LandingPageImagePayload};
use crate::forms::menu_lists::{MenuListForm, MenuListPayload};
use crate::forms::products::{ProductForm, ProductPayload};
use crate::media::MediaPipeline;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, read_form};
use crate::services::ServiceError;
use crate::services::landing_pages::{
    create_landing_page_image as create_landing_page_image_service,
    random_landing_page_image as random_landing_page_image_service,
};
use crate::services::lookup::{
    NOT_FOUND_MESSAGE, show_entry as show_entry_service, update_entry as update_entry_service,
};
use crate::services::menu_lists::create_menu_list as create_menu_list_service;
use crate::services::navigation::{
    save_drop_down_menu as save_drop_down_menu_service,
    show_drop_down_menu as show_drop_down_menu_service,
};
use crate::services::products::create_product as create_product_service;

#[post("/create-product")]
pub async fn create_product(
    _editor: EditorToken,
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

    match create_product_service(payload, repo.get_ref(), media.get_ref()).await {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err),
    }
}

#[post("/create-menulist")]
pub async fn create_menu_list(
    _editor: EditorToken,
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

    match create_menu_list_service(payload, repo.get_ref(), media.get_ref()).await {
        Ok(menu_list) => HttpResponse::Created().json(menu_list),
        Err(err) => error_response(err),
    }
}

#[get("/drop-down-menu")]
pub async fn show_drop_down_menu(repo: web::Data<DieselRepository>) -> impl Responder {
    match show_drop_down_menu_service(repo.get_ref()) {
        Ok(data) => HttpResponse::Ok().json(Body::new(data)),
        Err(err) => error_response(err),
    }
}

#[put("/drop-down-menu")]
pub async fn save_drop_down_menu(
    _editor: EditorToken,
    repo: web::Data<DieselRepository>,
    web::Json(data): web::Json<Value>,
) -> impl Responder {
    match save_drop_down_menu_service(data, repo.get_ref()) {
        Ok(data) => HttpResponse::Ok().json(Body::new(data)),
        Err(err) => error_response(err),
    }
}

#[get("/landing-page-images")]
pub async fn random_landing_page_image(repo: web::Data<DieselRepository>) -> impl Responder {
    match random_landing_page_image_service(repo.get_ref()) {
        Ok(image) => HttpResponse::Ok().json(Body::new(image)),
        Err(err) => error_response(err),
    }
}

#[post("/landing-page-images")]
pub async fn create_landing_page_image(
    _editor: EditorToken,
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
    let payload: LandingPageImagePayload = match LandingPageImageForm::from_raw(form).try_into() {
        Ok(payload) => payload,
        Err(errors) => return error_response(ServiceError::Form(errors)),
    };

    match create_landing_page_image_service(payload, repo.get_ref(), media.get_ref()).await {
        Ok(image) => HttpResponse::Created().json(image),
        Err(err) => error_response(err),
    }
}

#[get("/{slug}")]
pub async fn show_entry(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match show_entry_service(&slug, repo.get_ref()) {
        Ok(entry) => HttpResponse::Ok().json(Body::new(entry)),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": NOT_FOUND_MESSAGE }))
        }
        Err(err) => error_response(err),
    }
}

#[put("/{slug}")]
pub async fn update_entry(
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

    match update_entry_service(&slug, form, repo.get_ref(), media.get_ref()).await {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(json!({ "error": NOT_FOUND_MESSAGE }))
        }
        Err(err) => error_response(err),
    }
}
