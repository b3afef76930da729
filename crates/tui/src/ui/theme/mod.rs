//! Theme styling module for the TUI UI layer.
//!
//! This module defines the color palettes (Dracula, Nord), semantic theme
//! roles, and helper builders for Ratatui widgets and styles. Prefer these
//! helpers over hard-coding colors to keep the panes consistent.

use tracing::debug;

pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Identifier of the theme used when nothing else is requested.
pub const DEFAULT_THEME_ID: &str = "dracula";

/// Resolve a theme by identifier, falling back to Dracula for unknown names.
pub fn load(preferred_theme: Option<&str>) -> Box<dyn Theme> {
    let requested = preferred_theme.map(|name| name.trim().to_ascii_lowercase());
    match requested.as_deref() {
        Some("nord") => Box::new(NordTheme::new()),
        Some("dracula") | None => Box::new(DraculaTheme::new()),
        Some(other) => {
            debug!(theme = other, "unknown theme requested; using {DEFAULT_THEME_ID}");
            Box::new(DraculaTheme::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names_case_insensitively() {
        assert_eq!(load(Some(" Nord ")).roles().background, nord::N0);
        assert_eq!(load(Some("dracula")).roles().background, dracula::BG);
    }

    #[test]
    fn unknown_or_missing_names_fall_back_to_dracula() {
        assert_eq!(load(None).roles().background, dracula::BG);
        assert_eq!(load(Some("solarized")).roles().background, dracula::BG);
    }
}
