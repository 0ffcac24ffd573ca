//! CDN cache invalidation.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudfront::Client;
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use chrono::Utc;

use crate::media::MediaError;

/// Invalidates cached copies of media files after they were rewritten.
#[async_trait]
pub trait CdnInvalidator: Send + Sync {
    /// `names` are storage names such as `chair.jpg` or `thumbnails/chair.jpg`.
    async fn invalidate(&self, names: &[String]) -> Result<(), MediaError>;
}

/// Used when no CDN sits in front of the media root.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

#[async_trait]
impl CdnInvalidator for NoopInvalidator {
    async fn invalidate(&self, _names: &[String]) -> Result<(), MediaError> {
        Ok(())
    }
}

/// Issues CloudFront invalidations for a single distribution.
pub struct CloudFrontInvalidator {
    client: Client,
    distribution_id: String,
    path_prefix: String,
}

impl CloudFrontInvalidator {
    pub fn new(client: Client, distribution_id: String, media_url: &str) -> Self {
        Self {
            client,
            distribution_id,
            path_prefix: cdn_path_prefix(media_url),
        }
    }

    /// Build a client from the default AWS credential and region chain.
    pub async fn from_env(distribution_id: String, media_url: &str) -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), distribution_id, media_url)
    }
}

#[async_trait]
impl CdnInvalidator for CloudFrontInvalidator {
    async fn invalidate(&self, names: &[String]) -> Result<(), MediaError> {
        if names.is_empty() {
            return Ok(());
        }

        let items = names
            .iter()
            .map(|name| format!("{}/{}", self.path_prefix, name))
            .collect::<Vec<_>>();

        let paths = Paths::builder()
            .quantity(items.len() as i32)
            .set_items(Some(items))
            .build()
            .map_err(|e| MediaError::Cdn(e.to_string()))?;

        let batch = InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(format!(
                "showroom-cms-{}",
                Utc::now().format("%Y%m%d%H%M%S%f")
            ))
            .build()
            .map_err(|e| MediaError::Cdn(e.to_string()))?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(&self.distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| MediaError::Cdn(DisplayErrorContext(&e).to_string()))?;

        if let Some(invalidation) = output.invalidation() {
            log::info!(
                "Requested CloudFront invalidation {} for {} path(s)",
                invalidation.id(),
                names.len()
            );
        }
        Ok(())
    }
}

/// Path component of the public media URL, without a trailing slash.
///
/// `https://cdn.example.com/media/` and `/media` both yield `/media`.
pub fn cdn_path_prefix(media_url: &str) -> String {
    let path = match media_url.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
        None => media_url,
    };
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_from_relative_url() {
        assert_eq!(cdn_path_prefix("/media/"), "/media");
        assert_eq!(cdn_path_prefix("media"), "/media");
    }

    #[test]
    fn prefix_from_absolute_url() {
        assert_eq!(cdn_path_prefix("https://cdn.example.com/media/"), "/media");
        assert_eq!(cdn_path_prefix("https://cdn.example.com"), "");
    }

    #[actix_web::test]
    async fn noop_accepts_everything() {
        assert!(NoopInvalidator.invalidate(&["a.jpg".into()]).await.is_ok());
    }
}
