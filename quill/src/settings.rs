//! Editor preferences.
//!
//! Theme, font family, font size, and line height persist to a JSON file
//! under the config dir. Mode toggles (focus, typewriter, sound, zen) are
//! session-only and reset on launch.

use quillcore::storage::{config_dir, load_json, save_json};
use quillcore::theme::ThemeKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const FONT_SIZE_RANGE: (f32, f32) = (12.0, 24.0);
pub const LINE_HEIGHT_RANGE: (f32, f32) = (1.2, 2.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl FontChoice {
    pub fn next(self) -> Self {
        match self {
            FontChoice::Sans => FontChoice::Serif,
            FontChoice::Serif => FontChoice::Mono,
            FontChoice::Mono => FontChoice::Sans,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontChoice::Sans => "sans",
            FontChoice::Serif => "serif",
            FontChoice::Mono => "mono",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemeKind,
    pub font: FontChoice,
    pub font_size: f32,
    pub line_height: f32,

    #[serde(skip)]
    pub focus_mode: bool,
    #[serde(skip)]
    pub typewriter: bool,
    #[serde(skip)]
    pub sound: bool,
    #[serde(skip)]
    pub zen: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: ThemeKind::Dark,
            font: FontChoice::Sans,
            font_size: 16.0,
            line_height: 1.6,
            focus_mode: false,
            typewriter: false,
            sound: false,
            zen: false,
        }
    }
}

impl Preferences {
    pub fn path() -> PathBuf {
        config_dir().join("prefs.json")
    }

    /// Load from disk, falling back to defaults. Values are clamped so a
    /// hand-edited file can't produce an unusable editor.
    pub fn load() -> Self {
        let mut prefs: Preferences = load_json(&Self::path()).unwrap_or_default();
        prefs.clamp();
        prefs
    }

    pub fn save(&self) {
        if let Err(err) = save_json(&Self::path(), self) {
            log::warn!("failed to save preferences: {err}");
        }
    }

    pub fn clamp(&mut self) {
        self.font_size = self.font_size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
        self.line_height = self
            .line_height
            .clamp(LINE_HEIGHT_RANGE.0, LINE_HEIGHT_RANGE.1);
    }

    pub fn bump_font_size(&mut self, delta: f32) {
        self.font_size += delta;
        self.clamp();
    }

    pub fn bump_line_height(&mut self, delta: f32) {
        self.line_height += delta;
        self.clamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_clamps() {
        let mut p = Preferences::default();
        p.font_size = 9.0;
        p.clamp();
        assert_eq!(p.font_size, 12.0);
        p.font_size = 40.0;
        p.clamp();
        assert_eq!(p.font_size, 24.0);
    }

    #[test]
    fn test_line_height_clamps() {
        let mut p = Preferences::default();
        p.line_height = 0.5;
        p.clamp();
        assert_eq!(p.line_height, 1.2);
        p.line_height = 3.0;
        p.clamp();
        assert_eq!(p.line_height, 2.0);
    }

    #[test]
    fn test_bump_stops_at_bounds() {
        let mut p = Preferences::default();
        for _ in 0..20 {
            p.bump_font_size(2.0);
        }
        assert_eq!(p.font_size, 24.0);
        for _ in 0..20 {
            p.bump_line_height(-0.1);
        }
        assert_eq!(p.line_height, 1.2);
        // Increases past the max hold at the max, no wraparound.
        for _ in 0..20 {
            p.bump_line_height(0.1);
        }
        assert_eq!(p.line_height, 2.0);
    }

    #[test]
    fn test_session_toggles_not_persisted() {
        let mut p = Preferences::default();
        p.zen = true;
        p.focus_mode = true;
        let json = serde_json::to_string(&p).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert!(!back.zen);
        assert!(!back.focus_mode);
        assert_eq!(back.theme, p.theme);
    }

    #[test]
    fn test_font_cycle() {
        assert_eq!(FontChoice::Sans.next(), FontChoice::Serif);
        assert_eq!(FontChoice::Serif.next(), FontChoice::Mono);
        assert_eq!(FontChoice::Mono.next(), FontChoice::Sans);
    }
}
