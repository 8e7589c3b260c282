use crate::models::Theme;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub text_color: &'static str,
    pub grid_color: &'static str,
    pub background_color: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
}

const DARK: Palette = Palette {
    text_color: "#888888",
    grid_color: "#2a2a2a",
    background_color: "#1a1a1a",
    primary_color: "#4a9eff",
    secondary_color: "#66b3ff",
};

const LIGHT: Palette = Palette {
    text_color: "#64748b",
    grid_color: "#e2e8f0",
    background_color: "#f8fafc",
    primary_color: "#3b82f6",
    secondary_color: "#2563eb",
};

pub fn palette_for(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => DARK,
        Theme::Light => LIGHT,
    }
}
