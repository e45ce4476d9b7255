//! Font and theme setup for the GUI context.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use egui::{FontData, FontDefinitions, FontFamily, TextStyle};
use hf_platform::Theme;

const CUSTOM_FONT_NAME: &str = "hookframe-primary";

/// Loads a TTF/OTF file and makes it the first choice for both font families,
/// then scales every text style around `size` (the body text size).
pub fn install_font(ctx: &egui::Context, path: &Path, size: f32) -> Result<(), String> {
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to read font {}: {e}", path.display()))?;
    ctx.set_fonts(font_definitions_with(CUSTOM_FONT_NAME, bytes));
    apply_text_size(ctx, size);
    log::info!("Font loaded: {} ({size}px)", path.display());
    Ok(())
}

pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let theme = match theme {
        Theme::Light => egui::Theme::Light,
        Theme::Dark => egui::Theme::Dark,
    };
    ctx.set_theme(theme);
}

pub fn apply_text_size(ctx: &egui::Context, size: f32) {
    ctx.all_styles_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = text_size_for(text_style, size);
        }
    });
}

fn font_definitions_with(name: &str, bytes: Vec<u8>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, name.to_owned());
    }
    fonts
}

/// Keeps egui's default proportions between styles (body 12.5, heading 18...).
fn text_size_for(text_style: &TextStyle, body_size: f32) -> f32 {
    match text_style {
        TextStyle::Small => body_size * 0.72,
        TextStyle::Monospace => body_size * 0.96,
        TextStyle::Heading => body_size * 1.44,
        TextStyle::Body | TextStyle::Button | TextStyle::Name(_) => body_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_font_takes_priority_in_both_families() {
        let fonts = font_definitions_with("test-font", vec![0u8; 4]);
        assert!(fonts.font_data.contains_key("test-font"));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            let names = &fonts.families[&family];
            assert_eq!(names.first().map(String::as_str), Some("test-font"));
            // egui's built-in fonts stay as fallbacks.
            assert!(names.len() > 1);
        }
    }

    #[test]
    fn text_sizes_scale_around_body() {
        assert!((text_size_for(&TextStyle::Body, 16.0) - 16.0).abs() < f32::EPSILON);
        assert!((text_size_for(&TextStyle::Button, 16.0) - 16.0).abs() < f32::EPSILON);
        assert!(text_size_for(&TextStyle::Heading, 16.0) > 16.0);
        assert!(text_size_for(&TextStyle::Small, 16.0) < 16.0);
    }

    #[test]
    fn apply_text_size_updates_context_style() {
        let ctx = egui::Context::default();
        apply_text_size(&ctx, 20.0);
        let body = ctx.style().text_styles[&TextStyle::Body].size;
        assert!((body - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let ctx = egui::Context::default();
        let path = std::env::temp_dir().join("hf_gui_no_such_font.ttf");
        let err = install_font(&ctx, &path, 16.0).expect_err("missing font must fail");
        assert!(err.contains("Failed to read font"));
    }

    #[test]
    fn theme_switches_visuals() {
        let ctx = egui::Context::default();
        apply_theme(&ctx, Theme::Dark);
        assert!(ctx.style().visuals.dark_mode);
        apply_theme(&ctx, Theme::Light);
        assert!(!ctx.style().visuals.dark_mode);
    }
}
