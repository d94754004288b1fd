// ============================================================================
// SETTINGS — persisted defaults for the filter and the batch tool
// ============================================================================
//
// Stored as a plain `key=value` file. Missing or corrupt files yield the
// defaults; unknown keys and unparsable values are ignored.
// ============================================================================

use std::path::{Path, PathBuf};

use crate::filter::{ColorInversionFilter, DEFAULT_WHITE_BIAS};
use crate::io::SaveFormat;
use crate::log_warn;

#[derive(Clone, Debug, PartialEq)]
pub struct InvertSettings {
    /// Contrast bias of the inversion (must be > -1).
    pub white_bias: f32,
    /// Use the wgpu compute backend when an adapter is available.
    pub gpu_acceleration: bool,
    /// Preferred GPU adapter class ("discrete", "integrated", ...).
    pub preferred_gpu: String,
    /// Output format when neither `--format` nor the output extension decides.
    pub default_format: SaveFormat,
    pub jpeg_quality: u8,
}

impl Default for InvertSettings {
    fn default() -> Self {
        Self {
            white_bias: DEFAULT_WHITE_BIAS,
            gpu_acceleration: false,
            preferred_gpu: "discrete".to_string(),
            default_format: SaveFormat::Png,
            jpeg_quality: 90,
        }
    }
}

impl InvertSettings {
    /// `<config dir>/ShiftInvert/settings.cfg`.
    pub fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        let config_dir = std::env::var("APPDATA").map(PathBuf::from).ok()?;
        #[cfg(not(target_os = "windows"))]
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok()?;
        Some(Self::settings_path_in(&config_dir))
    }

    fn settings_path_in(config_dir: &Path) -> PathBuf {
        config_dir.join("ShiftInvert").join("settings.cfg")
    }

    /// Load from the default location.
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Save to the default location. Returns the path written.
    pub fn save(&self) -> std::io::Result<PathBuf> {
        let path = Self::settings_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory")
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_config_string())
    }

    pub fn to_config_string(&self) -> String {
        format!(
            "white_bias={}\n\
             gpu_acceleration={}\n\
             preferred_gpu={}\n\
             default_format={}\n\
             jpeg_quality={}\n",
            self.white_bias,
            self.gpu_acceleration,
            self.preferred_gpu,
            self.default_format.extension(),
            self.jpeg_quality,
        )
    }

    pub fn parse(content: &str) -> Self {
        let mut s = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            let key = key.trim();
            let val = val.trim();
            match key {
                "white_bias" => match val.parse::<f32>() {
                    Ok(v) if ColorInversionFilter::new(v).is_ok() => s.white_bias = v,
                    _ => log_warn!("settings: ignoring invalid white_bias '{}'", val),
                },
                "gpu_acceleration" => {
                    s.gpu_acceleration = val == "true";
                }
                "preferred_gpu" => {
                    s.preferred_gpu = val.to_string();
                }
                "default_format" => {
                    if let Some(f) = SaveFormat::from_name(val) {
                        s.default_format = f;
                    }
                }
                "jpeg_quality" => {
                    s.jpeg_quality = val.parse::<u8>().unwrap_or(90).clamp(1, 100);
                }
                _ => {}
            }
        }
        s
    }

    /// The filter described by these settings.
    pub fn filter(&self) -> ColorInversionFilter {
        ColorInversionFilter::new(self.white_bias).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_config_string() {
        let s = InvertSettings {
            white_bias: 0.15,
            gpu_acceleration: true,
            preferred_gpu: "integrated".to_string(),
            default_format: SaveFormat::Webp,
            jpeg_quality: 72,
        };
        assert_eq!(InvertSettings::parse(&s.to_config_string()), s);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let s = InvertSettings::parse("white_bias=-3\nno equals here\njpeg_quality=abc\nunknown=1\n");
        assert_eq!(s, InvertSettings::default());
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(InvertSettings::parse("jpeg_quality=0").jpeg_quality, 1);
        assert_eq!(InvertSettings::parse("jpeg_quality=250").jpeg_quality, 100);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join(format!("shiftinvert-missing-{}.cfg", uuid::Uuid::new_v4()));
        assert_eq!(InvertSettings::load_from(&path), InvertSettings::default());
    }

    #[test]
    fn config_file_lives_under_app_folder() {
        let path = InvertSettings::settings_path_in(Path::new("/cfg"));
        assert_eq!(path, Path::new("/cfg").join("ShiftInvert").join("settings.cfg"));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("shiftinvert-settings-{}", uuid::Uuid::new_v4()));
        let path = dir.join("settings.cfg");
        let s = InvertSettings { white_bias: 0.02, ..Default::default() };
        s.save_to(&path).unwrap();
        let loaded = InvertSettings::load_from(&path);
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(loaded, s);
        assert_eq!(loaded.filter().white_bias(), 0.02);
    }
}
