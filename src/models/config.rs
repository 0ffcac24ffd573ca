use serde::Deserialize;

/// Configuration options of the content service.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml` and
/// `APP__*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Directory that holds uploaded images and generated thumbnails.
    pub media_root: String,
    /// URL prefix under which `media_root` is served when `serve_media` is set.
    pub media_url: String,
    #[serde(default)]
    pub serve_media: bool,
    /// Upper bound for the total size of a multipart request.
    pub upload_limit_bytes: usize,
    pub thumbnail_max_width: u32,
    pub thumbnail_max_height: u32,
    /// JPEG quality (1-100) used for thumbnails.
    pub thumbnail_quality: u8,
    /// CloudFront distribution to invalidate after media writes.
    #[serde(default)]
    pub cloudfront_distribution_id: Option<String>,
    /// Tokens accepted in the `Authorization` header of editorial requests.
    #[serde(default)]
    pub api_tokens: Vec<String>,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// `APP__*` variables; `APP__API_TOKENS` takes a comma-separated list.
    pub fn environment() -> ::config::Environment {
        ::config::Environment::with_prefix("APP")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("api_tokens")
            .try_parsing(true)
    }

    /// Layer `config/default.yaml`, `config/{app_env}.yaml` (optional) and `env`.
    pub fn load(app_env: &str, env: ::config::Environment) -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::with_name("config/default"))
            .add_source(::config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    fn load_with(vars: &[(&str, &str)]) -> ServerConfig {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<::config::Map<_, _>>();
        ServerConfig::load("missing-env", ServerConfig::environment().source(Some(vars))).unwrap()
    }

    #[test]
    fn defaults_come_from_yaml() {
        let config = load_with(&[]);
        assert_eq!(config.port, 8080);
        assert!(config.api_tokens.is_empty());
        assert_eq!(config.cloudfront_distribution_id, None);
    }

    #[test]
    fn api_tokens_are_read_from_a_list_variable() {
        let config = load_with(&[("APP__API_TOKENS", "alpha,beta"), ("APP__PORT", "9000")]);
        assert_eq!(config.api_tokens, vec!["alpha".to_string(), "beta".to_string()]);
        assert_eq!(config.port, 9000);
    }
}
