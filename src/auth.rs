//! Editorial API token check.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::models::config::ServerConfig;

/// Proof that the request carried one of the configured API tokens.
///
/// Accepts `Authorization: Token <key>` and `Authorization: Bearer <key>`.
/// With no tokens configured every write is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorToken;

/// Extract the key from an `Authorization` header value.
pub fn parse_authorization(value: &str) -> Option<&str> {
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    (scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer")).then_some(key)
}

fn unauthorized(message: &str) -> Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::Unauthorized().json(json!({ "error": message })),
    )
    .into()
}

impl FromRequest for EditorToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server configuration is not registered; refusing editorial request");
            return ready(Err(actix_web::error::ErrorInternalServerError(
                "configuration missing",
            )));
        };

        let key = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(parse_authorization);

        let result = match key {
            None => Err(unauthorized("Authentication credentials were not provided.")),
            Some(key) if config.api_tokens.iter().any(|token| token == key) => Ok(EditorToken),
            Some(_) => Err(unauthorized("Invalid token.")),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".into(),
            port: 0,
            database_url: ":memory:".into(),
            media_root: "media".into(),
            media_url: "/media".into(),
            serve_media: false,
            upload_limit_bytes: 1024,
            thumbnail_max_width: 600,
            thumbnail_max_height: 600,
            thumbnail_quality: 85,
            cloudfront_distribution_id: None,
            api_tokens: vec!["secret".into()],
        }
    }

    #[test]
    fn parses_both_schemes() {
        assert_eq!(parse_authorization("Token abc"), Some("abc"));
        assert_eq!(parse_authorization("bearer  abc "), Some("abc"));
        assert_eq!(parse_authorization("Basic abc"), None);
        assert_eq!(parse_authorization("Token "), None);
        assert_eq!(parse_authorization("abc"), None);
    }

    #[actix_web::test]
    async fn accepts_configured_token() {
        let req = TestRequest::default()
            .app_data(web::Data::new(config()))
            .insert_header((AUTHORIZATION, "Token secret"))
            .to_http_request();

        assert!(EditorToken::extract(&req).await.is_ok());
    }

    #[actix_web::test]
    async fn rejects_missing_or_unknown_token() {
        let missing = TestRequest::default()
            .app_data(web::Data::new(config()))
            .to_http_request();
        let unknown = TestRequest::default()
            .app_data(web::Data::new(config()))
            .insert_header((AUTHORIZATION, "Bearer guess"))
            .to_http_request();

        assert!(EditorToken::extract(&missing).await.is_err());
        assert!(EditorToken::extract(&unknown).await.is_err());
    }
}
