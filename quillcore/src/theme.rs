//! Quill theme engine.
//!
//! Three palettes — dark, dim, paper — applied as egui visuals. The editor
//! body font size is owned by the app's preferences; the theme only sets
//! chrome sizes. Serif and bold faces are loaded from system font paths
//! when available so formatting can render with real glyphs.

use egui::{
    Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, Style, TextStyle,
    Visuals,
};
use serde::{Deserialize, Serialize};

/// Which palette is active. Cycles dark → dim → paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Dim,
    Paper,
}

impl ThemeKind {
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Dim,
            ThemeKind::Dim => ThemeKind::Paper,
            ThemeKind::Paper => ThemeKind::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Dim => "dim",
            ThemeKind::Paper => "paper",
        }
    }
}

/// Resolved colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color32,
    pub surface: Color32,
    pub surface_light: Color32,
    pub border: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub accent: Color32,
    /// Score tier colors: >7, >4, otherwise.
    pub favorable: Color32,
    pub caution: Color32,
    pub concern: Color32,
}

impl Palette {
    pub fn of(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self {
                bg: Color32::from_rgb(17, 17, 19),
                surface: Color32::from_rgb(28, 28, 30),
                surface_light: Color32::from_rgb(38, 38, 40),
                border: Color32::from_rgb(58, 58, 62),
                text: Color32::from_rgb(228, 228, 231),
                text_dim: Color32::from_rgb(160, 160, 165),
                accent: Color32::from_rgb(99, 102, 241),
                favorable: Color32::from_rgb(52, 168, 83),
                caution: Color32::from_rgb(221, 173, 29),
                concern: Color32::from_rgb(220, 68, 68),
            },
            ThemeKind::Dim => Self {
                bg: Color32::from_rgb(32, 36, 44),
                surface: Color32::from_rgb(42, 47, 56),
                surface_light: Color32::from_rgb(52, 58, 68),
                border: Color32::from_rgb(70, 77, 89),
                text: Color32::from_rgb(214, 219, 228),
                text_dim: Color32::from_rgb(150, 158, 170),
                accent: Color32::from_rgb(122, 139, 255),
                favorable: Color32::from_rgb(80, 180, 110),
                caution: Color32::from_rgb(222, 184, 70),
                concern: Color32::from_rgb(226, 98, 98),
            },
            ThemeKind::Paper => Self {
                bg: Color32::from_rgb(246, 243, 236),
                surface: Color32::from_rgb(255, 253, 248),
                surface_light: Color32::from_rgb(238, 233, 222),
                border: Color32::from_rgb(206, 199, 184),
                text: Color32::from_rgb(40, 38, 34),
                text_dim: Color32::from_rgb(120, 114, 102),
                accent: Color32::from_rgb(79, 70, 229),
                favorable: Color32::from_rgb(32, 128, 60),
                caution: Color32::from_rgb(176, 128, 16),
                concern: Color32::from_rgb(186, 38, 38),
            },
        }
    }

    /// Tier color for a 0–10 score: >7 favorable, >4 caution, else concern.
    pub fn score_color(&self, score: i64) -> Color32 {
        if score > 7 {
            self.favorable
        } else if score > 4 {
            self.caution
        } else {
            self.concern
        }
    }

    /// Apply this palette to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = if self.bg.r() > 128 {
            Visuals::light()
        } else {
            Visuals::dark()
        };

        visuals.window_fill = self.surface;
        visuals.panel_fill = self.bg;
        visuals.faint_bg_color = self.surface;
        visuals.extreme_bg_color = self.surface_light;
        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_rounding = Rounding::same(6.0);
        visuals.menu_rounding = Rounding::same(4.0);

        visuals.override_text_color = Some(self.text);
        visuals.hyperlink_color = self.accent;
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.35);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        let set = |ws: &mut egui::style::WidgetVisuals, fill: Color32, border: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.bg_stroke = Stroke::new(1.0, border);
            ws.rounding = Rounding::same(4.0);
        };
        set(&mut visuals.widgets.noninteractive, self.surface, self.border);
        set(&mut visuals.widgets.inactive, self.surface_light, self.border);
        set(&mut visuals.widgets.hovered, self.surface_light, self.accent);
        set(&mut visuals.widgets.active, self.surface_light, self.accent);
        set(&mut visuals.widgets.open, self.surface_light, self.border);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        style.spacing.window_margin = egui::Margin::same(8.0);

        ctx.set_style(style);
    }

    /// Frame for a card-like surface (parameters panel, dashboard cards).
    pub fn card_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .stroke(Stroke::new(1.0, self.border))
            .rounding(Rounding::same(8.0))
            .inner_margin(egui::Margin::same(12.0))
    }

    /// Frame for the floating selection toolbar.
    pub fn popup_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface_light)
            .stroke(Stroke::new(1.0, self.border))
            .rounding(Rounding::same(6.0))
            .inner_margin(egui::Margin::symmetric(6.0, 4.0))
    }
}

/// Named font family used when a serif face could be loaded from disk.
pub const SERIF_FAMILY: &str = "quill-serif";

/// Which optional faces were found at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontCatalog {
    pub has_serif: bool,
}

impl FontCatalog {
    /// Family for the "serif" preference, falling back to proportional.
    pub fn serif_family(&self) -> FontFamily {
        if self.has_serif {
            FontFamily::Name(SERIF_FAMILY.into())
        } else {
            FontFamily::Proportional
        }
    }
}

/// Search standard font paths for a serif face (searched relative to the
/// exe and system font dirs, same order every run).
fn load_serif_font() -> Option<Vec<u8>> {
    let candidates = [
        "DejaVuSerif.ttf",
        "LiberationSerif-Regular.ttf",
        "NotoSerif-Regular.ttf",
    ];
    let mut search_dirs = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            search_dirs.push(dir.join("fonts"));
        }
    }
    search_dirs.push(std::path::PathBuf::from("/usr/share/fonts/truetype/dejavu"));
    search_dirs.push(std::path::PathBuf::from("/usr/share/fonts/truetype/liberation"));
    search_dirs.push(std::path::PathBuf::from("/usr/share/fonts/TTF"));
    search_dirs.push(std::path::PathBuf::from("/usr/share/fonts"));

    for dir in search_dirs {
        for name in candidates {
            if let Ok(data) = std::fs::read(dir.join(name)) {
                return Some(data);
            }
        }
    }
    None
}

/// Register optional fonts with the context. egui's bundled faces remain
/// the default; a serif face is added as its own family when found.
pub fn install_fonts(ctx: &egui::Context) -> FontCatalog {
    let mut fonts = FontDefinitions::default();
    let mut catalog = FontCatalog::default();

    if let Some(data) = load_serif_font() {
        fonts
            .font_data
            .insert("QuillSerif".to_owned(), FontData::from_owned(data));
        fonts
            .families
            .insert(FontFamily::Name(SERIF_FAMILY.into()), vec!["QuillSerif".to_owned()]);
        catalog.has_serif = true;
    } else {
        log::warn!("no serif font found on disk; serif preference falls back to sans");
    }

    ctx.set_fonts(fonts);
    catalog
}

/// Consume Tab and Cmd+/- key events so the editor owns them.
/// Tab is replaced with `tab_spaces` spaces in text input.
///
/// egui processes Tab in begin_frame() to set focus_direction, which makes
/// focus cycle between widgets before update() can intervene. So we strip
/// the event and re-request focus on whatever was focused before Tab.
pub fn consume_special_keys_with_tab(ctx: &egui::Context, tab_spaces: usize) {
    let tab_pressed = ctx.input(|i| {
        i.events.iter().any(|e| {
            matches!(
                e,
                egui::Event::Key { key: egui::Key::Tab, pressed: true, .. }
            )
        })
    });

    let focused_before = if tab_pressed {
        ctx.memory(|mem| mem.focused())
    } else {
        None
    };

    ctx.input_mut(|i| {
        let spaces: String = " ".repeat(tab_spaces);
        let mut new_events = Vec::new();
        for event in i.events.iter() {
            match event {
                egui::Event::Key { key: egui::Key::Tab, .. } => {}
                egui::Event::Text(text) if text.contains('\t') => {
                    if tab_spaces > 0 {
                        new_events.push(egui::Event::Text(text.replace('\t', &spaces)));
                    }
                }
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command
                        && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) => {}
                _ => new_events.push(event.clone()),
            }
        }
        i.events = new_events;
    });

    if tab_pressed {
        if let Some(id) = focused_before {
            ctx.memory_mut(|mem| mem.request_focus(id));
        } else if let Some(id) = ctx.memory(|mem| mem.focused()) {
            ctx.memory_mut(|mem| mem.surrender_focus(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle() {
        assert_eq!(ThemeKind::Dark.next(), ThemeKind::Dim);
        assert_eq!(ThemeKind::Dim.next(), ThemeKind::Paper);
        assert_eq!(ThemeKind::Paper.next(), ThemeKind::Dark);
    }

    #[test]
    fn test_score_tiers() {
        let p = Palette::of(ThemeKind::Dark);
        assert_eq!(p.score_color(8), p.favorable);
        assert_eq!(p.score_color(7), p.caution);
        assert_eq!(p.score_color(5), p.caution);
        assert_eq!(p.score_color(4), p.concern);
        assert_eq!(p.score_color(0), p.concern);
    }
}
