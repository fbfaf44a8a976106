//! Custom widgets for the Quill chrome.

use crate::theme::Palette;
use egui::{Response, Sense, Ui, Widget};

/// Small square toggle button used in the editor toolbar (mode switches,
/// theme/font cyclers). Shows `glyph` centered; accent-tinted when active.
pub struct IconToggle<'a> {
    glyph: &'a str,
    active: bool,
    palette: &'a Palette,
}

impl<'a> IconToggle<'a> {
    pub fn new(glyph: &'a str, palette: &'a Palette) -> Self {
        Self { glyph, active: false, palette }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Widget for IconToggle<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = egui::vec2(24.0, 22.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let p = self.palette;

            let (fill, stroke, fg) = if self.active {
                (p.accent.gamma_multiply(0.25), p.accent, p.accent)
            } else if response.hovered() {
                (p.surface_light, p.border, p.text)
            } else {
                (p.surface, p.border, p.text_dim)
            };

            painter.rect_filled(rect, 4.0, fill);
            painter.rect_stroke(rect, 4.0, egui::Stroke::new(1.0, stroke));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.glyph,
                egui::FontId::proportional(12.0),
                fg,
            );
        }

        response
    }
}

/// Button in the floating selection toolbar. Like [`IconToggle`] but with
/// no idle border so the row reads as one unit.
pub fn format_button(ui: &mut Ui, glyph: &str, palette: &Palette) -> Response {
    let size = egui::vec2(26.0, 24.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        if response.hovered() {
            painter.rect_filled(rect, 4.0, palette.surface);
        }
        let fg = if response.hovered() { palette.text } else { palette.text_dim };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            glyph,
            egui::FontId::proportional(13.0),
            fg,
        );
    }

    response
}

/// Thin vertical separator for toolbars.
pub fn toolbar_separator(ui: &mut Ui, palette: &Palette) {
    let height = 18.0;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(7.0, height), Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            egui::Stroke::new(1.0, palette.border),
        );
    }
}

/// Status bar: surface fill, 1px top border, dim text.
pub fn status_bar(ui: &mut Ui, palette: &Palette, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::none()
        .fill(palette.surface)
        .stroke(egui::Stroke::new(1.0, palette.border))
        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
        .show(ui, |ui| {
            ui.horizontal(add_contents);
        });
}

/// Horizontal 0–10 score bar with the palette tier color.
pub fn score_bar(ui: &mut Ui, palette: &Palette, label: &str, score: i64) {
    let score = score.clamp(0, 10);
    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(label).color(palette.text_dim).size(12.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{}/10", score))
                        .color(palette.text)
                        .strong(),
                );
            });
        });

        let width = ui.available_width();
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 8.0), Sense::hover());
        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 4.0, palette.surface_light);
            if score > 0 {
                let filled = egui::Rect::from_min_size(
                    rect.min,
                    egui::vec2(rect.width() * (score as f32 / 10.0), rect.height()),
                );
                painter.rect_filled(filled, 4.0, palette.score_color(score));
            }
        }
    });
}
