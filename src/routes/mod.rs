use actix_multipart::Multipart;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::forms::{FormReadError, RawForm};
use crate::services::ServiceError;

pub mod api;
pub mod v2;

/// Register both API versions. `/api/v2` goes first so that its paths are not
/// captured by the `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v2")
            .service(v2::show_product)
            .service(v2::update_product)
            .service(v2::show_menu_list)
            .service(v2::update_menu_list)
            .service(v2::show_product_image)
            .service(v2::show_menu_list_item)
            .service(v2::show_landing_page_image),
    )
    .service(
        web::scope("/api")
            .service(api::create_product)
            .service(api::create_menu_list)
            .service(api::show_drop_down_menu)
            .service(api::save_drop_down_menu)
            .service(api::random_landing_page_image)
            .service(api::create_landing_page_image)
            .service(api::show_entry)
            .service(api::update_entry),
    );
}

/// Read a multipart or urlencoded body into a [`RawForm`].
pub async fn read_form(
    req: &HttpRequest,
    payload: web::Payload,
    limit: usize,
) -> Result<RawForm, FormReadError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let mut payload = payload.into_inner();

    if content_type.starts_with("multipart/form-data") {
        RawForm::from_multipart(Multipart::new(req.headers(), payload), limit).await
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let web::Form(pairs) = web::Form::<Vec<(String, String)>>::from_request(req, &mut payload)
            .await
            .map_err(|e| FormReadError::Malformed(e.to_string()))?;
        Ok(RawForm::from_pairs(pairs))
    } else {
        Err(FormReadError::UnsupportedContentType(content_type))
    }
}

/// Map a service failure onto the JSON error responses of the API.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(json!({
            "error": "Authentication credentials were not provided."
        })),
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({ "error": "Not found." })),
        ServiceError::Form(errors) => HttpResponse::BadRequest().json(errors),
        ServiceError::BadRequest(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::PayloadTooLarge => HttpResponse::PayloadTooLarge().json(json!({
            "error": "Upload is too large."
        })),
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}
