//! The essay document: plain text plus parallel formatting.
//!
//! Inline styles are kept per character and block kinds per line, both in
//! lockstep with the text. egui's TextEdit edits the string directly, so
//! after every frame where the text changed, [`Document::sync_after_edit`]
//! repairs the parallel vectors around the caret.

use quillcore::text::{line_char_range, line_of_char, sentence_count, word_count};
use serde::{Deserialize, Serialize};

pub const BULLET_PREFIX: &str = "\u{2022} ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineAttr {
    Bold,
    Italic,
    Underline,
}

impl CharStyle {
    fn has(&self, attr: InlineAttr) -> bool {
        match attr {
            InlineAttr::Bold => self.bold,
            InlineAttr::Italic => self.italic,
            InlineAttr::Underline => self.underline,
        }
    }

    fn set(&mut self, attr: InlineAttr, on: bool) {
        match attr {
            InlineAttr::Bold => self.bold = on,
            InlineAttr::Italic => self.italic = on,
            InlineAttr::Underline => self.underline = on,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading,
    Quote,
    Bullet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub styles: Vec<CharStyle>,
    pub blocks: Vec<BlockKind>,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from plain text. Every line starts as a paragraph;
    /// this is also the import path for dropped .txt files.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![CharStyle::default(); text.chars().count()];
        let blocks = vec![BlockKind::Paragraph; text.split('\n').count()];
        Document { text, styles, blocks }
    }

    pub fn char_len(&self) -> usize {
        self.styles.len()
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    pub fn sentence_count(&self) -> usize {
        sentence_count(&self.text)
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Repair the style and block vectors after TextEdit mutated the text.
    /// `caret` is the char position after the edit; insertions inherit the
    /// style of the character before them.
    pub fn sync_after_edit(&mut self, caret: usize) {
        let len = self.text.chars().count();

        if len > self.styles.len() {
            let inserted = len - self.styles.len();
            let at = caret
                .saturating_sub(inserted)
                .min(self.styles.len());
            let inherited = if at > 0 {
                self.styles[at - 1]
            } else {
                CharStyle::default()
            };
            for _ in 0..inserted {
                self.styles.insert(at, inherited);
            }
        } else if len < self.styles.len() {
            let removed = self.styles.len() - len;
            let at = caret.min(len);
            for _ in 0..removed {
                if at < self.styles.len() {
                    self.styles.remove(at);
                } else {
                    self.styles.pop();
                }
            }
        }

        let lines = self.text.split('\n').count();
        if lines > self.blocks.len() {
            let at = line_of_char(&self.text, caret).min(self.blocks.len());
            let inherited = self.blocks.get(at).copied().unwrap_or_default();
            for _ in 0..(lines - self.blocks.len()) {
                self.blocks.insert(at, inherited);
            }
        } else {
            self.blocks.truncate(lines);
        }
    }

    /// Style of the char under/before `char_idx`, for toolbar highlighting.
    pub fn style_at(&self, char_idx: usize) -> CharStyle {
        if self.styles.is_empty() {
            return CharStyle::default();
        }
        let i = char_idx.min(self.styles.len()).saturating_sub(1);
        self.styles[i]
    }

    /// Toggle an inline attribute over a char range: turned off when every
    /// character in the range already has it, turned on otherwise.
    pub fn toggle_inline(&mut self, start: usize, end: usize, attr: InlineAttr) {
        let start = start.min(self.styles.len());
        let end = end.min(self.styles.len());
        if start >= end {
            return;
        }
        let all_set = self.styles[start..end].iter().all(|s| s.has(attr));
        for style in &mut self.styles[start..end] {
            style.set(attr, !all_set);
        }
    }

    /// Lines touched by a char selection, as an inclusive index pair.
    pub fn lines_of_selection(&self, start: usize, end: usize) -> (usize, usize) {
        let first = line_of_char(&self.text, start);
        // A selection ending exactly at a line start shouldn't drag that
        // line in.
        let last = line_of_char(&self.text, end.max(start + 1) - 1);
        (first, last.max(first))
    }

    /// Toggle a block kind over lines `first..=last`: back to paragraphs
    /// when every line is already `kind`, otherwise all become `kind`.
    /// Bullet lines carry a literal "• " prefix in the text.
    pub fn toggle_block(&mut self, first: usize, last: usize, kind: BlockKind) {
        let last = last.min(self.blocks.len().saturating_sub(1));
        if first > last {
            return;
        }
        let all_match = self.blocks[first..=last].iter().all(|b| *b == kind);
        let target = if all_match { BlockKind::Paragraph } else { kind };

        // Walk backwards so prefix edits don't shift later line offsets.
        for line in (first..=last).rev() {
            let old = self.blocks[line];
            self.blocks[line] = target;
            match (old == BlockKind::Bullet, target == BlockKind::Bullet) {
                (false, true) => self.insert_bullet_prefix(line),
                (true, false) => self.strip_bullet_prefix(line),
                _ => {}
            }
        }
    }

    fn insert_bullet_prefix(&mut self, line: usize) {
        let (start, _) = line_char_range(&self.text, line);
        if self.line_has_bullet_prefix(line) {
            return;
        }
        let byte = quillcore::text::char_to_byte(&self.text, start);
        self.text.insert_str(byte, BULLET_PREFIX);
        for _ in 0..BULLET_PREFIX.chars().count() {
            self.styles.insert(start, CharStyle::default());
        }
    }

    fn strip_bullet_prefix(&mut self, line: usize) {
        if !self.line_has_bullet_prefix(line) {
            return;
        }
        let (start, _) = line_char_range(&self.text, line);
        let from = quillcore::text::char_to_byte(&self.text, start);
        let to = quillcore::text::char_to_byte(&self.text, start + BULLET_PREFIX.chars().count());
        self.text.replace_range(from..to, "");
        for _ in 0..BULLET_PREFIX.chars().count() {
            self.styles.remove(start);
        }
    }

    fn line_has_bullet_prefix(&self, line: usize) -> bool {
        let (start, end) = line_char_range(&self.text, line);
        if end - start < BULLET_PREFIX.chars().count() {
            return false;
        }
        let from = quillcore::text::char_to_byte(&self.text, start);
        self.text[from..].starts_with(BULLET_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_parallels() {
        let doc = Document::from_text("line1\nline2");
        assert_eq!(doc.styles.len(), 11);
        assert_eq!(doc.blocks.len(), 2);
        assert!(doc.blocks.iter().all(|b| *b == BlockKind::Paragraph));
    }

    #[test]
    fn test_sync_insert_inherits_style() {
        let mut doc = Document::from_text("ab");
        doc.toggle_inline(0, 2, InlineAttr::Bold);

        // Type "X" between a and b; caret ends at 2.
        doc.text.insert(1, 'X');
        doc.sync_after_edit(2);

        assert_eq!(doc.styles.len(), 3);
        assert!(doc.styles[1].bold, "inserted char inherits bold");
    }

    #[test]
    fn test_sync_pair_insert_after_styled_text() {
        let mut doc = Document::from_text("a");
        doc.toggle_inline(0, 1, InlineAttr::Bold);

        // Auto-close inserts "()" after 'a'; the edit caret sits past
        // both new chars even though the visible cursor steps back
        // between them.
        doc.text.insert_str(1, "()");
        doc.sync_after_edit(3);

        assert_eq!(doc.styles.len(), 3);
        assert!(doc.styles[0].bold, "'a' must keep its bold style");
        assert!(doc.styles[1].bold, "insertions inherit the preceding style");
    }

    #[test]
    fn test_sync_delete_shrinks_styles() {
        let mut doc = Document::from_text("abc");
        doc.text.remove(1);
        doc.sync_after_edit(1);
        assert_eq!(doc.styles.len(), 2);
    }

    #[test]
    fn test_sync_newline_grows_blocks() {
        let mut doc = Document::from_text("abc");
        doc.text.insert(1, '\n');
        doc.sync_after_edit(2);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.styles.len(), 4);
    }

    #[test]
    fn test_toggle_inline_set_then_unset() {
        let mut doc = Document::from_text("hello");
        doc.toggle_inline(0, 3, InlineAttr::Italic);
        assert!(doc.styles[0].italic && doc.styles[2].italic);
        assert!(!doc.styles[3].italic);

        // Mixed range: toggling sets everything.
        doc.toggle_inline(0, 5, InlineAttr::Italic);
        assert!(doc.styles.iter().all(|s| s.italic));

        // Uniform range: toggling clears.
        doc.toggle_inline(0, 5, InlineAttr::Italic);
        assert!(doc.styles.iter().all(|s| !s.italic));
    }

    #[test]
    fn test_toggle_bullet_adds_and_strips_prefix() {
        let mut doc = Document::from_text("one\ntwo");
        doc.toggle_block(0, 1, BlockKind::Bullet);
        assert_eq!(doc.text, "\u{2022} one\n\u{2022} two");
        assert_eq!(doc.styles.len(), doc.text.chars().count());
        assert_eq!(doc.blocks, vec![BlockKind::Bullet, BlockKind::Bullet]);

        doc.toggle_block(0, 1, BlockKind::Bullet);
        assert_eq!(doc.text, "one\ntwo");
        assert_eq!(doc.styles.len(), 7);
        assert_eq!(doc.blocks, vec![BlockKind::Paragraph, BlockKind::Paragraph]);
    }

    #[test]
    fn test_toggle_heading_single_line() {
        let mut doc = Document::from_text("Title\nbody");
        doc.toggle_block(0, 0, BlockKind::Heading);
        assert_eq!(doc.blocks, vec![BlockKind::Heading, BlockKind::Paragraph]);
        // Text untouched for non-bullet blocks.
        assert_eq!(doc.text, "Title\nbody");

        doc.toggle_block(0, 0, BlockKind::Heading);
        assert_eq!(doc.blocks[0], BlockKind::Paragraph);
    }

    #[test]
    fn test_bullet_to_quote_strips_prefix() {
        let mut doc = Document::from_text("item");
        doc.toggle_block(0, 0, BlockKind::Bullet);
        assert_eq!(doc.text, "\u{2022} item");
        doc.toggle_block(0, 0, BlockKind::Quote);
        assert_eq!(doc.text, "item");
        assert_eq!(doc.blocks[0], BlockKind::Quote);
    }

    #[test]
    fn test_lines_of_selection() {
        let doc = Document::from_text("ab\ncd\nef");
        assert_eq!(doc.lines_of_selection(0, 2), (0, 0));
        assert_eq!(doc.lines_of_selection(1, 4), (0, 1));
        // Selection ending at a line start leaves that line out.
        assert_eq!(doc.lines_of_selection(0, 3), (0, 0));
        assert_eq!(doc.lines_of_selection(7, 7), (2, 2));
    }

    #[test]
    fn test_empty_document_has_one_paragraph_line() {
        let doc = Document::new();
        assert_eq!(doc.blocks, vec![BlockKind::Paragraph]);
        assert!(doc.styles.is_empty());
        assert_eq!(doc.line_count(), doc.blocks.len());
    }

    #[test]
    fn test_counts() {
        let doc = Document::from_text("One two three.");
        assert_eq!(doc.word_count(), 3);
        assert_eq!(doc.sentence_count(), 1);
        let empty = Document::new();
        assert_eq!(empty.word_count(), 0);
        assert_eq!(empty.sentence_count(), 0);
    }
}
