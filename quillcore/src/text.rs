//! Text utilities: counts and char/line index conversion.

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentence count: runs of content delimited by one or more of `.`/`!`/`?`.
/// Text with words but no terminator counts as one sentence.
pub fn sentence_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_sentence = false;
    for c in text.chars() {
        match c {
            '.' | '!' | '?' => {
                if in_sentence {
                    count += 1;
                    in_sentence = false;
                }
            }
            c if !c.is_whitespace() => in_sentence = true,
            _ => {}
        }
    }
    if count == 0 && word_count(text) > 0 {
        1
    } else {
        count
    }
}

/// Byte offset of character index `char_idx` (clamped to the end).
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Zero-based line index containing character `char_idx`.
pub fn line_of_char(text: &str, char_idx: usize) -> usize {
    text.chars().take(char_idx).filter(|&c| c == '\n').count()
}

/// Character range `[start, end)` of line `line_idx`, excluding the
/// trailing newline. Clamped to the last line.
pub fn line_char_range(text: &str, line_idx: usize) -> (usize, usize) {
    let mut line = 0;
    let mut start = 0;
    let mut idx = 0;
    for c in text.chars() {
        if line == line_idx && c == '\n' {
            return (start, idx);
        }
        idx += 1;
        if c == '\n' {
            line += 1;
            start = idx;
        }
    }
    if line_idx > line {
        (idx, idx)
    } else {
        (start, idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("One two three."), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("a\nb\tc d"), 4);
    }

    #[test]
    fn test_sentence_count() {
        assert_eq!(sentence_count("One two three."), 1);
        assert_eq!(sentence_count(""), 0);
        assert_eq!(sentence_count("First. Second! Third?"), 3);
        // Ellipsis collapses into one terminator run.
        assert_eq!(sentence_count("Wait... what?"), 2);
        // Words but no terminator: still one sentence.
        assert_eq!(sentence_count("no terminator here"), 1);
        assert_eq!(sentence_count("..."), 0);
    }

    #[test]
    fn test_char_to_byte() {
        assert_eq!(char_to_byte("abc", 0), 0);
        assert_eq!(char_to_byte("abc", 2), 2);
        assert_eq!(char_to_byte("abc", 10), 3);
        // 'é' is 2 bytes
        assert_eq!(char_to_byte("café!", 4), 5);
    }

    #[test]
    fn test_line_of_char() {
        let text = "ab\ncd\nef";
        assert_eq!(line_of_char(text, 0), 0);
        assert_eq!(line_of_char(text, 2), 0); // before the newline
        assert_eq!(line_of_char(text, 3), 1);
        assert_eq!(line_of_char(text, 7), 2);
    }

    #[test]
    fn test_line_char_range() {
        let text = "ab\ncd\nef";
        assert_eq!(line_char_range(text, 0), (0, 2));
        assert_eq!(line_char_range(text, 1), (3, 5));
        assert_eq!(line_char_range(text, 2), (6, 8));
        assert_eq!(line_char_range(text, 9), (8, 8));
    }
}
