use std::env;
use std::sync::Arc;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;

use showroom_cms::db::establish_connection_pool;
use showroom_cms::media::{
    CdnInvalidator, CloudFrontInvalidator, LocalMediaStorage, MediaPipeline, NoopInvalidator,
    Thumbnailer,
};
use showroom_cms::models::config::ServerConfig;
use showroom_cms::repository::DieselRepository;
use showroom_cms::routes;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    ServerConfig::load(&app_env, ServerConfig::environment())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => match conn.run_pending_migrations(MIGRATIONS) {
            Ok(applied) => log::info!("Applied {} pending migration(s)", applied.len()),
            Err(e) => {
                log::error!("Failed to run migrations: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            log::error!("Failed to get database connection: {e}");
            std::process::exit(1);
        }
    }

    let cdn: Arc<dyn CdnInvalidator> = match &server_config.cloudfront_distribution_id {
        Some(distribution_id) => {
            log::info!("Invalidating CloudFront distribution {distribution_id} on media writes");
            Arc::new(
                CloudFrontInvalidator::from_env(distribution_id.clone(), &server_config.media_url)
                    .await,
            )
        }
        None => Arc::new(NoopInvalidator),
    };
    let media = MediaPipeline::new(
        Arc::new(LocalMediaStorage::new(&server_config.media_root)),
        Thumbnailer::new(
            server_config.thumbnail_max_width,
            server_config.thumbnail_max_height,
            server_config.thumbnail_quality,
        ),
        cdn,
    );

    if server_config.api_tokens.is_empty() {
        log::warn!("No API tokens configured; all write endpoints will answer 401");
    }

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    let server_config = web::Data::new(server_config);
    let repo = web::Data::new(repo);
    let media = web::Data::new(media);

    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Logger::default())
            .app_data(server_config.clone())
            .app_data(repo.clone())
            .app_data(media.clone())
            .app_data(web::JsonConfig::default().limit(server_config.upload_limit_bytes))
            .app_data(web::FormConfig::default().limit(server_config.upload_limit_bytes))
            .configure(routes::configure);

        if server_config.serve_media {
            app = app.service(Files::new(&server_config.media_url, &server_config.media_root));
        }
        app
    })
    .bind(bind_address)?
    .run()
    .await
}
