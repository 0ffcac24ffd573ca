//! JPEG thumbnail generation.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::media::MediaError;

/// Directory (inside the media root) that holds generated thumbnails.
pub const THUMBNAIL_DIR: &str = "thumbnails";

/// Renders bounded JPEG thumbnails.
#[derive(Debug, Clone, Copy)]
pub struct Thumbnailer {
    max_width: u32,
    max_height: u32,
    quality: u8,
}

impl Default for Thumbnailer {
    fn default() -> Self {
        Self::new(600, 600, 85)
    }
}

impl Thumbnailer {
    pub fn new(max_width: u32, max_height: u32, quality: u8) -> Self {
        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
            quality: quality.clamp(1, 100),
        }
    }

    /// Decode `bytes` and render them with [`Thumbnailer::render_image`].
    pub fn render(&self, bytes: &[u8]) -> Result<Vec<u8>, MediaError> {
        self.render_image(&image::load_from_memory(bytes)?)
    }

    /// Shrink the image to fit the bounding box and encode it as JPEG.
    ///
    /// Aspect ratio is preserved and images already inside the box are not
    /// upscaled.
    pub fn render_image(&self, img: &DynamicImage) -> Result<Vec<u8>, MediaError> {
        let (width, height) = img.dimensions();

        let resized;
        let img = if width > self.max_width || height > self.max_height {
            resized = img.resize(self.max_width, self.max_height, FilterType::Lanczos3);
            &resized
        } else {
            img
        };

        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

        let mut out = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, self.quality))?;
        Ok(out)
    }
}

/// Storage name of the thumbnail generated for `image`.
///
/// The full source name is kept so that `chair.png` and `chair.jpg` get
/// distinct thumbnails.
pub fn thumbnail_name(image: &str) -> String {
    let base = image.rsplit('/').next().unwrap_or(image);
    format!("{THUMBNAIL_DIR}/{base}.jpg")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 120, 40, 128]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn shrinks_to_fit_the_box() {
        let thumb = Thumbnailer::default().render(&png(1200, 800)).unwrap();
        let decoded = image::load_from_memory(&thumb).unwrap();
        assert_eq!(decoded.dimensions(), (600, 400));
    }

    #[test]
    fn never_upscales() {
        let thumb = Thumbnailer::default().render(&png(120, 80)).unwrap();
        let decoded = image::load_from_memory(&thumb).unwrap();
        assert_eq!(decoded.dimensions(), (120, 80));
    }

    #[test]
    fn output_is_jpeg() {
        let thumb = Thumbnailer::new(50, 50, 70).render(&png(100, 100)).unwrap();
        assert_eq!(
            image::guess_format(&thumb).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn rejects_non_images() {
        assert!(matches!(
            Thumbnailer::default().render(b"definitely not an image"),
            Err(MediaError::Decode(_))
        ));
    }

    #[test]
    fn thumbnail_names_keep_the_source_extension() {
        assert_eq!(thumbnail_name("chair.png"), "thumbnails/chair.png.jpg");
        assert_eq!(thumbnail_name("sofa.v2.webp"), "thumbnails/sofa.v2.webp.jpg");
        assert_eq!(thumbnail_name("noext"), "thumbnails/noext.jpg");
    }

    #[test]
    fn same_stem_different_format_gets_distinct_thumbnails() {
        assert_ne!(thumbnail_name("chair.png"), thumbnail_name("chair.jpg"));
    }
}
