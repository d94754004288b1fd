// ============================================================================
// IMAGE I/O — decode input frames, encode results
// ============================================================================

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, ImageFormat, RgbaImage};

/// Output formats supported by the batch tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
    Bmp,
    Tga,
    Tiff,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Webp => "webp",
            SaveFormat::Bmp => "bmp",
            SaveFormat::Tga => "tga",
            SaveFormat::Tiff => "tiff",
        }
    }

    /// Parse a format name or file extension, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "webp" => Some(SaveFormat::Webp),
            "bmp" => Some(SaveFormat::Bmp),
            "tga" => Some(SaveFormat::Tga),
            "tif" | "tiff" => Some(SaveFormat::Tiff),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_name)
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Jpeg => ImageFormat::Jpeg,
            SaveFormat::Webp => ImageFormat::WebP,
            SaveFormat::Bmp => ImageFormat::Bmp,
            SaveFormat::Tga => ImageFormat::Tga,
            SaveFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

#[derive(Debug)]
pub enum ImageIoError {
    Io(std::io::Error),
    Decode(String),
    Encode(String),
}

impl fmt::Display for ImageIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageIoError::Io(e) => write!(f, "I/O error: {}", e),
            ImageIoError::Decode(e) => write!(f, "decode error: {}", e),
            ImageIoError::Encode(e) => write!(f, "encode error: {}", e),
        }
    }
}

impl std::error::Error for ImageIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageIoError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImageIoError {
    fn from(e: std::io::Error) -> Self {
        ImageIoError::Io(e)
    }
}

/// Load any format the `image` crate can decode, as RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage, ImageIoError> {
    let img = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) => ImageIoError::Io(io),
        other => ImageIoError::Decode(other.to_string()),
    })?;
    Ok(img.into_rgba8())
}

/// Encode `img` to `path`. `quality` (1–100) only affects JPEG.
pub fn save_image(
    img: &RgbaImage,
    path: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<(), ImageIoError> {
    match format {
        SaveFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).into_rgb8();
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
            encoder
                .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ColorType::Rgb8)
                .map_err(|e| ImageIoError::Encode(e.to_string()))
        }
        _ => img
            .save_with_format(path, format.image_format())
            .map_err(|e| match e {
                ImageError::IoError(io) => ImageIoError::Io(io),
                other => ImageIoError::Encode(other.to_string()),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::PathBuf;

    fn temp_path(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shiftinvert-io-{}.{}", uuid::Uuid::new_v4(), ext))
    }

    #[test]
    fn format_names_and_extensions() {
        assert_eq!(SaveFormat::from_name("JPEG"), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_name("tif"), Some(SaveFormat::Tiff));
        assert_eq!(SaveFormat::from_name("gif"), None);
        assert_eq!(SaveFormat::from_path(Path::new("a/b.WebP")), Some(SaveFormat::Webp));
        assert_eq!(SaveFormat::from_path(Path::new("noext")), None);
        assert_eq!(SaveFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn png_save_and_load_is_lossless() {
        let img = RgbaImage::from_fn(6, 4, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 90, 100 + x as u8]));
        let path = temp_path("png");
        save_image(&img, &path, SaveFormat::Png, 90).unwrap();
        let loaded = load_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, img);
    }

    #[test]
    fn jpeg_save_drops_alpha_but_keeps_size() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 128]));
        let path = temp_path("jpg");
        save_image(&img, &path, SaveFormat::Jpeg, 80).unwrap();
        let loaded = load_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.dimensions(), (8, 8));
        assert_eq!(loaded.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_image(&temp_path("png")).unwrap_err();
        assert!(matches!(err, ImageIoError::Io(_)));
    }
}
