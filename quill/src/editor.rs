//! The essay editing surface.
//!
//! Built on TextEdit::multiline with a custom layouter that renders the
//! document's per-char and per-line formatting. egui has no synthetic bold
//! weight, so bold renders at full-strength color; italics use the shear
//! flag and underline a real stroke.

use crate::document::{BlockKind, CharStyle, Document};
use crate::settings::{FontChoice, Preferences};
use egui::text::{CCursor, CCursorRange, LayoutJob, TextFormat};
use egui::{Align, Color32, FontId, Stroke, TextEdit, Ui};
use quillcore::text::line_of_char;
use quillcore::theme::{FontCatalog, Palette};

pub const EDITOR_ID: &str = "essay-editor";

/// Per-frame editor state the app carries between frames.
#[derive(Default)]
pub struct EditorState {
    /// Caret char position from the previous frame.
    pub caret: usize,
    /// An auto-pair was inserted this frame; step the caret back inside.
    pub pending_retreat: bool,
}

pub struct EditorOutput {
    pub changed: bool,
    /// Caret after this frame's edits, before any pair retreat. Style
    /// syncing must splice relative to this position.
    pub caret: Option<usize>,
    /// Sorted char selection, when non-empty.
    pub selection: Option<(usize, usize)>,
    /// Screen position of the selection start, for the floating toolbar.
    pub selection_anchor: Option<egui::Pos2>,
}

/// Closing character for an auto-paired opener.
pub fn closing_pair(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Rewrite single-char opener text events into open+close pairs. Only
/// applies while the editor owns focus. Returns true when a pair was
/// inserted, so the caller can retreat the caret between the two.
pub fn rewrite_pair_events(ctx: &egui::Context, editor_id: egui::Id) -> bool {
    if ctx.memory(|mem| mem.focused()) != Some(editor_id) {
        return false;
    }
    let mut rewrote = false;
    ctx.input_mut(|i| {
        for event in &mut i.events {
            if let egui::Event::Text(text) = event {
                let mut chars = text.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    if let Some(close) = closing_pair(c) {
                        *event = egui::Event::Text(format!("{c}{close}"));
                        rewrote = true;
                    }
                }
            }
        }
    });
    rewrote
}

/// Everything the pure layout pass needs.
pub struct LayoutSpec<'a> {
    pub styles: &'a [CharStyle],
    pub blocks: &'a [BlockKind],
    pub base: FontId,
    /// Multiplier on the font size.
    pub line_height: f32,
    pub text_color: Color32,
    pub dim_color: Color32,
    pub strong_color: Color32,
    /// In focus mode, only this line renders at full strength.
    pub focus_line: Option<usize>,
}

/// Build the galley job for the document text. Consecutive chars with the
/// same resolved format coalesce into one section.
pub fn layout_job(text: &str, spec: &LayoutSpec) -> LayoutJob {
    let mut job = LayoutJob::default();
    let mut line = 0usize;
    let mut run = String::new();
    let mut run_format: Option<TextFormat> = None;

    for (i, c) in text.chars().enumerate() {
        let style = spec.styles.get(i).copied().unwrap_or_default();
        let block = spec.blocks.get(line).copied().unwrap_or_default();

        let font = if block == BlockKind::Heading {
            FontId::new(spec.base.size * 1.4, spec.base.family.clone())
        } else {
            spec.base.clone()
        };

        let mut color = match (style.bold, block) {
            (_, BlockKind::Quote) => spec.dim_color,
            (true, _) => spec.strong_color,
            _ => spec.text_color,
        };
        if let Some(focus) = spec.focus_line {
            if line != focus {
                color = color.gamma_multiply(0.35);
            }
        }

        let format = TextFormat {
            line_height: Some(font.size * spec.line_height),
            font_id: font,
            color,
            italics: style.italic || block == BlockKind::Quote,
            underline: if style.underline {
                Stroke::new(1.0, color)
            } else {
                Stroke::NONE
            },
            ..Default::default()
        };

        match &run_format {
            Some(f) if *f == format => run.push(c),
            _ => {
                if let Some(f) = run_format.take() {
                    job.append(&run, 0.0, f);
                    run.clear();
                }
                run.push(c);
                run_format = Some(format);
            }
        }

        if c == '\n' {
            line += 1;
        }
    }
    if let Some(f) = run_format {
        job.append(&run, 0.0, f);
    }
    job
}

/// Show the editor and return caret/selection info for the frame.
pub fn show(
    ui: &mut Ui,
    doc: &mut Document,
    prefs: &Preferences,
    fonts: &FontCatalog,
    palette: &Palette,
    state: &mut EditorState,
) -> EditorOutput {
    let family = match prefs.font {
        FontChoice::Sans => egui::FontFamily::Proportional,
        FontChoice::Serif => fonts.serif_family(),
        FontChoice::Mono => egui::FontFamily::Monospace,
    };
    let base = FontId::new(prefs.font_size, family);

    let strong_color = if palette.bg.r() > 128 {
        Color32::BLACK
    } else {
        Color32::WHITE
    };
    let focus_line = if prefs.focus_mode {
        Some(line_of_char(&doc.text, state.caret))
    } else {
        None
    };

    // Split borrows: TextEdit mutates the text while the layouter reads
    // the parallel formatting vectors.
    let Document {
        ref mut text,
        ref styles,
        ref blocks,
    } = *doc;

    let spec = LayoutSpec {
        styles,
        blocks,
        base: base.clone(),
        line_height: prefs.line_height,
        text_color: palette.text,
        dim_color: palette.text_dim,
        strong_color,
        focus_line,
    };

    let mut layouter = |ui: &Ui, s: &str, wrap_width: f32| {
        let mut job = layout_job(s, &spec);
        job.wrap.max_width = wrap_width;
        ui.fonts(|f| f.layout_job(job))
    };

    let output = TextEdit::multiline(text)
        .id(egui::Id::new(EDITOR_ID))
        .font(base)
        .hint_text("Paste or drag your essay here...")
        .frame(false)
        .desired_width(f32::INFINITY)
        .desired_rows(24)
        .layouter(&mut layouter)
        .show(ui);

    let changed = output.response.changed();

    let mut caret = None;
    let mut selection = None;
    let mut selection_anchor = None;
    let mut retreated = false;

    if let Some(range) = output.cursor_range {
        let [min, max] = range.sorted_cursors();
        let (lo, hi) = (min.ccursor.index, max.ccursor.index);
        caret = Some(hi);

        if lo != hi {
            selection = Some((lo, hi));
            let rect = output
                .galley
                .pos_from_cursor(&min)
                .translate(output.galley_pos.to_vec2());
            selection_anchor = Some(rect.left_top());
        }

        // Auto-pair just fired: step back between the opener and closer.
        // Output keeps the pre-retreat caret so the document syncs styles
        // at the real insertion point; only the stored cursor moves.
        if state.pending_retreat && hi > 0 {
            let mut st = output.state;
            st.cursor
                .set_char_range(Some(CCursorRange::one(CCursor::new(hi - 1))));
            st.store(ui.ctx(), output.response.id);
            retreated = true;
        }

        // Typewriter scrolling keeps the caret line vertically centered,
        // on any caret move (typing or click).
        if prefs.typewriter && caret != Some(state.caret) {
            let rect = output
                .galley
                .pos_from_cursor(&max)
                .translate(output.galley_pos.to_vec2());
            ui.scroll_to_rect(rect.expand(4.0), Some(Align::Center));
        }
    }
    state.pending_retreat = false;
    if let Some(c) = caret {
        state.caret = if retreated { c - 1 } else { c };
    }

    EditorOutput {
        changed,
        caret,
        selection,
        selection_anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_for<'a>(doc: &'a Document, focus_line: Option<usize>) -> LayoutSpec<'a> {
        LayoutSpec {
            styles: &doc.styles,
            blocks: &doc.blocks,
            base: FontId::proportional(16.0),
            line_height: 1.5,
            text_color: Color32::GRAY,
            dim_color: Color32::DARK_GRAY,
            strong_color: Color32::WHITE,
            focus_line,
        }
    }

    #[test]
    fn test_closing_pairs() {
        assert_eq!(closing_pair('('), Some(')'));
        assert_eq!(closing_pair('['), Some(']'));
        assert_eq!(closing_pair('{'), Some('}'));
        assert_eq!(closing_pair('"'), Some('"'));
        assert_eq!(closing_pair('a'), None);
        assert_eq!(closing_pair(')'), None);
    }

    #[test]
    fn test_layout_uniform_text_is_one_section() {
        let doc = Document::from_text("plain text");
        let job = layout_job(&doc.text, &spec_for(&doc, None));
        assert_eq!(job.sections.len(), 1);
        assert_eq!(job.sections[0].format.color, Color32::GRAY);
    }

    #[test]
    fn test_layout_heading_line_is_larger() {
        let mut doc = Document::from_text("Title\nbody");
        doc.toggle_block(0, 0, BlockKind::Heading);
        let job = layout_job(&doc.text, &spec_for(&doc, None));
        assert!(job.sections.len() >= 2);
        let first = &job.sections[0].format;
        let last = &job.sections.last().unwrap().format;
        assert!(first.font_id.size > last.font_id.size);
    }

    #[test]
    fn test_layout_bold_run_splits_sections() {
        let mut doc = Document::from_text("abcdef");
        doc.toggle_inline(2, 4, crate::document::InlineAttr::Bold);
        let job = layout_job(&doc.text, &spec_for(&doc, None));
        assert_eq!(job.sections.len(), 3);
        assert_eq!(job.sections[1].format.color, Color32::WHITE);
    }

    #[test]
    fn test_layout_focus_dims_other_lines() {
        let doc = Document::from_text("one\ntwo");
        let job = layout_job(&doc.text, &spec_for(&doc, Some(1)));
        assert_eq!(job.sections.len(), 2);
        let dimmed = job.sections[0].format.color;
        let focused = job.sections[1].format.color;
        assert_ne!(dimmed, focused);
        assert_eq!(focused, Color32::GRAY);
    }

    #[test]
    fn test_layout_quote_is_italic_and_dim() {
        let mut doc = Document::from_text("quoted");
        doc.toggle_block(0, 0, BlockKind::Quote);
        let job = layout_job(&doc.text, &spec_for(&doc, None));
        assert!(job.sections[0].format.italics);
        assert_eq!(job.sections[0].format.color, Color32::DARK_GRAY);
    }

    #[test]
    fn test_layout_line_height_scales_with_font() {
        let doc = Document::from_text("x");
        let job = layout_job(&doc.text, &spec_for(&doc, None));
        assert_eq!(job.sections[0].format.line_height, Some(24.0));
    }
}
