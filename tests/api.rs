use std::io::Cursor;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, test, web};
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::{Value, json};
use showroom_cms::models::config::ServerConfig;
use showroom_cms::repository::DieselRepository;
use showroom_cms::routes;

mod common;

const TOKEN: &str = "Token editor-secret";
const BOUNDARY: &str = "showroom-test-boundary";

struct Context {
    db: common::TestDb,
    media: common::TestMedia,
    upload_limit: usize,
}

impl Context {
    fn new() -> Self {
        Self {
            db: common::TestDb::new(),
            media: common::TestMedia::new(),
            upload_limit: 5 * 1024 * 1024,
        }
    }

    fn with_upload_limit(upload_limit: usize) -> Self {
        Self {
            upload_limit,
            ..Self::new()
        }
    }

    fn config(&self) -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".into(),
            port: 0,
            database_url: String::new(),
            media_root: self.media.path().to_string_lossy().into_owned(),
            media_url: "/media".into(),
            serve_media: false,
            upload_limit_bytes: self.upload_limit,
            thumbnail_max_width: 600,
            thumbnail_max_height: 600,
            thumbnail_quality: 85,
            cloudfront_distribution_id: None,
            api_tokens: vec!["editor-secret".into()],
        }
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($ctx.config()))
                .app_data(web::Data::new(DieselRepository::new($ctx.db.pool())))
                .app_data(web::Data::new($ctx.media.pipeline()))
                .configure(routes::configure),
        )
        .await
    };
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

/// Hand-built `multipart/form-data` body.
fn multipart(fields: &[(&str, &str)], files: &[(&str, &str, Vec<u8>)]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

fn multipart_request(
    method: test::TestRequest,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, Vec<u8>)],
) -> test::TestRequest {
    let (content_type, body) = multipart(fields, files);
    method
        .uri(uri)
        .insert_header((CONTENT_TYPE, content_type))
        .insert_header((AUTHORIZATION, TOKEN))
        .set_payload(body)
}

#[actix_web::test]
async fn create_product_then_read_it_by_slug() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post(),
        "/api/create-product",
        &[
            ("name", "Captain's Chair"),
            ("blurb", "Solid oak."),
            ("meta", r#"{"dimensions": "80x60"}"#),
            ("images[0].order", "2"),
            ("images[0].caption", "Back"),
            ("images[1].order", "1"),
            ("images[1].caption", "Front"),
        ],
        &[
            ("images[0].image", "Back.PNG", png(1200, 900)),
            ("images[1].image", "front.png", png(300, 200)),
        ],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["images"][0]["image"], "front.png");
    assert_eq!(created["images"][0]["order"], 1);
    assert_eq!(created["images"][1]["thumbnail"], "thumbnails/back.png.jpg");
    assert!(ctx.media.path().join("thumbnails/back.png.jpg").is_file());

    let req = test::TestRequest::get().uri("/api/captains-chair").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["body"]["name"], "Captain's Chair");
    assert_eq!(body["body"]["meta"], json!({"dimensions": "80x60"}));
    assert_eq!(body["body"]["images"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn unknown_slug_returns_not_found_message() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/nothing-here").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "No matching MenuList or Product found"}));
}

#[actix_web::test]
async fn writes_require_a_token() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/create-product")
        .set_form([("name", "Chair"), ("blurb", "Oak")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn validation_errors_are_keyed_by_field() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post(),
        "/api/create-product",
        &[("blurb", "Oak"), ("images[3].caption", "No file")],
        &[],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["name"].is_array());
    assert!(body["images[3].image"].is_array());
}

#[actix_web::test]
async fn urlencoded_update_keeps_gallery() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post(),
        "/api/create-product",
        &[("name", "Bench"), ("blurb", "Long.")],
        &[("images[0].image", "bench.png", png(64, 64))],
    )
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::put()
        .uri("/api/bench")
        .insert_header((AUTHORIZATION, TOKEN))
        .set_form([("name", "Bench"), ("blurb", "Seats four.")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["blurb"], "Seats four.");
    assert_eq!(updated["images"][0]["image"], "bench.png");
}

#[actix_web::test]
async fn menu_list_lookup_and_v2_scoping() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post(),
        "/api/create-menulist",
        &[
            ("name", "sev-drulo series"),
            ("records[0].name", "Sofa"),
            ("records[0].url", "/sev-drulo-sofa"),
        ],
        &[("records[0].image", "sofa.png", png(64, 64))],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert!(created["records"][0]["id"].is_i64());

    let req = test::TestRequest::get().uri("/api/sev-drulo-series").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["body"]["records"][0]["name"], "Sofa");
    assert_eq!(body["body"]["records"][0]["image"], "sofa.png");

    let req = test::TestRequest::get()
        .uri("/api/v2/menu-lists/sev-drulo-series")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v2/products/sev-drulo-series")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let item_id = created["records"][0]["id"].as_i64().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/v2/menu-list-items/{item_id}"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["body"]["url"], "/sev-drulo-sofa");
}

#[actix_web::test]
async fn drop_down_menu_round_trip() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/drop-down-menu").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({"body": null}));

    let tree = json!([{"label": "Seating", "children": [{"label": "Sofas", "url": "/sofas"}]}]);
    let req = test::TestRequest::put()
        .uri("/api/drop-down-menu")
        .insert_header((AUTHORIZATION, TOKEN))
        .set_json(&tree)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/drop-down-menu").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({ "body": tree }));
}

#[actix_web::test]
async fn landing_page_images_round_trip() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/landing-page-images").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({"body": null}));

    let req = multipart_request(
        test::TestRequest::post(),
        "/api/landing-page-images",
        &[],
        &[("image", "Hero.png", png(1600, 900))],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::get().uri("/api/landing-page-images").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(
        body,
        json!({"body": {"image": "hero.png", "thumbnail": "thumbnails/hero.png.jpg"}})
    );

    let id = created["id"].as_i64().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/v2/landing-page-images/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn oversized_upload_is_rejected_without_writing() {
    let ctx = Context::with_upload_limit(1024);
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post(),
        "/api/create-product",
        &[("name", "Bench"), ("blurb", "Long.")],
        &[("images[0].image", "bench.png", vec![7u8; 4096])],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!ctx.media.path().join("bench.png").exists());
}

#[actix_web::test]
async fn corrupt_upload_keeps_the_stored_image() {
    let ctx = Context::new();
    let app = init_app!(ctx);

    let req = multipart_request(
        test::TestRequest::post(),
        "/api/landing-page-images",
        &[],
        &[("image", "hero.png", png(64, 64))],
    )
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    let stored = std::fs::read(ctx.media.path().join("hero.png")).expect("stored hero");

    let mut corrupt = b"\x89PNG\r\n\x1a\n".to_vec();
    corrupt.extend_from_slice(b"truncated");
    let req = multipart_request(
        test::TestRequest::post(),
        "/api/landing-page-images",
        &[],
        &[("image", "hero.png", corrupt)],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["image"].is_array());
    assert_eq!(
        std::fs::read(ctx.media.path().join("hero.png")).expect("stored hero"),
        stored
    );
}
