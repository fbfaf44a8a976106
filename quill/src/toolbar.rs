//! Floating formatting toolbar, shown above the current selection.

use crate::document::{BlockKind, Document, InlineAttr};
use quillcore::theme::Palette;
use quillcore::widgets::{format_button, toolbar_separator};

/// One formatting action picked from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAction {
    Inline(InlineAttr),
    Block(BlockKind),
}

/// Paint the toolbar anchored above `anchor` and return the picked action.
pub fn selection_toolbar(
    ctx: &egui::Context,
    palette: &Palette,
    anchor: egui::Pos2,
) -> Option<FormatAction> {
    let mut action = None;
    let pos = egui::pos2(anchor.x, (anchor.y - 36.0).max(4.0));

    egui::Area::new(egui::Id::new("selection-toolbar"))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            palette.popup_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    if format_button(ui, "B", palette).on_hover_text("Bold").clicked() {
                        action = Some(FormatAction::Inline(InlineAttr::Bold));
                    }
                    if format_button(ui, "I", palette).on_hover_text("Italic").clicked() {
                        action = Some(FormatAction::Inline(InlineAttr::Italic));
                    }
                    if format_button(ui, "U", palette).on_hover_text("Underline").clicked() {
                        action = Some(FormatAction::Inline(InlineAttr::Underline));
                    }
                    toolbar_separator(ui, palette);
                    if format_button(ui, "H", palette).on_hover_text("Heading").clicked() {
                        action = Some(FormatAction::Block(BlockKind::Heading));
                    }
                    if format_button(ui, "\u{201C}", palette).on_hover_text("Quote").clicked() {
                        action = Some(FormatAction::Block(BlockKind::Quote));
                    }
                    if format_button(ui, "\u{2022}", palette).on_hover_text("Bullet list").clicked()
                    {
                        action = Some(FormatAction::Block(BlockKind::Bullet));
                    }
                });
            });
        });

    action
}

/// Apply a toolbar action to the document over the char selection.
pub fn apply_action(doc: &mut Document, selection: (usize, usize), action: FormatAction) {
    let (start, end) = selection;
    match action {
        FormatAction::Inline(attr) => doc.toggle_inline(start, end, attr),
        FormatAction::Block(kind) => {
            let (first, last) = doc.lines_of_selection(start, end);
            doc.toggle_block(first, last, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_inline_action() {
        let mut doc = Document::from_text("hello world");
        apply_action(&mut doc, (0, 5), FormatAction::Inline(InlineAttr::Bold));
        assert!(doc.styles[0].bold && doc.styles[4].bold);
        assert!(!doc.styles[5].bold);
    }

    #[test]
    fn test_apply_block_action_covers_selected_lines() {
        let mut doc = Document::from_text("one\ntwo\nthree");
        apply_action(&mut doc, (1, 6), FormatAction::Block(BlockKind::Quote));
        assert_eq!(doc.blocks[0], BlockKind::Quote);
        assert_eq!(doc.blocks[1], BlockKind::Quote);
        assert_eq!(doc.blocks[2], BlockKind::Paragraph);
    }
}
