use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "assets/hookframe.json";

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Window and GUI settings. Every field is optional in the JSON file;
/// missing ones keep the built-in value.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub font_path: String,
    pub font_size: f32,
    pub theme: Theme,
    /// Linear RGBA the framebuffer is cleared to every frame.
    pub clear_color: [f32; 4],
    pub vsync: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "ImGui winit wgpu template".to_string(),
            width: 1280,
            height: 720,
            font_path: "./assets/fonts/Roboto-Medium.ttf".to_string(),
            font_size: 16.0,
            theme: Theme::Light,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vsync: true,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<PlatformConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: PlatformConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)
        .map_err(|e| format!("Config validation failed ({}): {e}", path.display()))?;
    Ok(config)
}

/// Loads `path` if it exists. A missing file means defaults; a broken one is
/// reported and also falls back to defaults.
pub fn resolve_config(path: &Path) -> PlatformConfig {
    if !path.exists() {
        log::debug!("No config at '{}', using defaults", path.display());
        return PlatformConfig::default();
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded config '{}'", path.display());
            config
        }
        Err(err) => {
            log::error!("{err}; using defaults");
            PlatformConfig::default()
        }
    }
}

fn validate_config(config: &PlatformConfig) -> Result<(), String> {
    if config.width == 0 || config.height == 0 {
        return Err(format!(
            "window size must be non-zero, got {}x{}",
            config.width, config.height
        ));
    }
    if !(config.font_size.is_finite() && config.font_size > 0.0) {
        return Err(format!("font_size must be > 0, got {}", config.font_size));
    }
    if config
        .clear_color
        .iter()
        .any(|c| !(0.0..=1.0).contains(c))
    {
        return Err(format!(
            "clear_color components must be within 0..=1, got {:?}",
            config.clear_color
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "hf_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_temp(name_hint: &str, contents: &str) -> std::path::PathBuf {
        let path = temp_file_path(name_hint);
        fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn defaults_match_template_constants() {
        let config = PlatformConfig::default();
        assert_eq!(config.title, "ImGui winit wgpu template");
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.font_path, "./assets/fonts/Roboto-Medium.ttf");
        assert!((config.font_size - 16.0).abs() < f32::EPSILON);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(config.vsync);
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let path = write_temp("partial", r#"{ "title": "Tool", "theme": "dark" }"#);
        let config = load_config_from_path(&path).expect("config should load");
        let _ = fs::remove_file(&path);

        assert_eq!(config.title, "Tool");
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.width, 1280);
        assert!(config.vsync);
    }

    #[test]
    fn zero_size_is_rejected() {
        let path = write_temp("zero", r#"{ "width": 0 }"#);
        let err = load_config_from_path(&path).expect_err("zero width must fail");
        let _ = fs::remove_file(&path);
        assert!(err.contains("non-zero"), "unexpected error: {err}");
    }

    #[test]
    fn out_of_range_clear_color_is_rejected() {
        let path = write_temp("color", r#"{ "clear_color": [0.0, 2.0, 0.0, 1.0] }"#);
        let err = load_config_from_path(&path).expect_err("color must fail");
        let _ = fs::remove_file(&path);
        assert!(err.contains("clear_color"), "unexpected error: {err}");
    }

    #[test]
    fn malformed_json_reports_path() {
        let path = write_temp("broken", "{ not json");
        let err = load_config_from_path(&path).expect_err("parse must fail");
        let _ = fs::remove_file(&path);
        assert!(err.contains("Failed to parse config JSON"));
        assert!(err.contains(&path.display().to_string()));
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let missing = temp_file_path("missing");
        assert_eq!(resolve_config(&missing), PlatformConfig::default());

        let broken = write_temp("resolve_broken", r#"{ "font_size": -1 }"#);
        let config = resolve_config(&broken);
        let _ = fs::remove_file(&broken);
        assert_eq!(config, PlatformConfig::default());
    }
}
