//! Text utilities shared by the diagnostic printer and the generators.

use lazy_static::lazy_static;
use regex::Regex;

/// Characters treated as white space by the wrapper.
const WHITESPACE: &str = "\t\n\x0b\x0c\r ";

/// Expands tabs into spaces using tab stops of `tab_width` columns.
pub fn expand_tabs(input: &str, tab_width: usize) -> String {
    let mut result = String::with_capacity(input.len());
    let mut column = 0;

    for c in input.chars() {
        if c == '\t' {
            let spaces = tab_width - (column % tab_width);
            for _ in 0..spaces {
                result.push(' ');
            }
            column += spaces;
        } else {
            result.push(c);
            column += 1;
        }
    }

    result
}

/// Masks all non-whitespace with spaces, expanding tabs along the way.
///
/// The result is a run of spaces as wide as `input` would render with the
/// given tab width, used to indent marker lines under quoted source.
pub fn mask_with_whitespace_expanded(input: &str, tab_width: usize) -> String {
    let mut spaces = 0;

    for c in input.chars() {
        if c == '\t' {
            spaces += tab_width - (spaces % tab_width);
        } else {
            spaces += 1;
        }
    }

    " ".repeat(spaces)
}

lazy_static! {
    static ref CHUNK_SEPARATOR: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENATED_WORD: Regex = Regex::new(r"^(\w+-)\w").unwrap();
}

/// Splits `text` on a pattern, keeping the separators as chunks.
fn split_keeping_separators(pattern: &Regex, text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut last_end = 0;

    for m in pattern.find_iter(text) {
        if last_end != m.start() {
            result.push(text[last_end..m.start()].to_string());
        }
        if m.start() != m.end() {
            result.push(m.as_str().to_string());
        }
        last_end = m.end();
    }

    if last_end < text.len() {
        result.push(text[last_end..].to_string());
    }

    result
}

/// Configuration and control structure for wrapping and filling text.
#[derive(Debug, Clone)]
pub struct TextWrapper {
    /// Maximum line width.
    pub width: usize,

    /// Whether to expand tabs into spaces before processing. A tab becomes
    /// 1 to 8 spaces depending on its position in the line. If disabled, a
    /// tab is treated as one character and may produce unexpected results.
    pub expand_tabs: bool,

    /// Whether to replace every whitespace character with a space.
    pub normalize_whitespace: bool,

    /// Whether to break words that will overflow a line on their own.
    pub break_overflowing_words: bool,

    /// Whether to allow breaking after in-word hyphens.
    pub break_on_hyphens: bool,

    /// Whether to trim whitespace from resulting lines.
    pub trim_whitespace: bool,
}

impl Default for TextWrapper {
    fn default() -> Self {
        Self::simple(79)
    }
}

impl TextWrapper {
    /// Creates a wrapper with all options enabled for the given width.
    pub fn simple(width: usize) -> Self {
        Self {
            width,
            expand_tabs: true,
            normalize_whitespace: true,
            break_overflowing_words: true,
            break_on_hyphens: true,
            trim_whitespace: true,
        }
    }

    /// Wraps `input` into lines of at most `width` characters.
    pub fn wrap(&self, input: &str) -> Vec<String> {
        let mut input = input.to_string();

        if self.expand_tabs {
            input = expand_tabs(&input, 8);
        }
        if self.normalize_whitespace {
            input = input
                .chars()
                .map(|c| if WHITESPACE.contains(c) { ' ' } else { c })
                .collect();
        }

        // Split the text into chunks we can deal with, optionally breaking
        // hyphenated words into separate chunks after each hyphen.
        let mut chunks = if self.break_on_hyphens {
            let mut out = Vec::new();

            for chunk in split_keeping_separators(&CHUNK_SEPARATOR, &input) {
                if !HYPHENATED_WORD.is_match(&chunk) {
                    out.push(chunk);
                    continue;
                }

                let mut rest = chunk;
                while let Some(hyphen) = rest.find('-') {
                    if hyphen == rest.len() - 1 {
                        break;
                    }
                    out.push(rest[..=hyphen].to_string());
                    rest = rest[hyphen + 1..].to_string();
                }

                if !rest.is_empty() {
                    out.push(rest);
                }
            }

            out
        } else {
            split_keeping_separators(&CHUNK_SEPARATOR, &input)
        };

        let mut lines = Vec::new();
        let mut i = 0;

        while i < chunks.len() {
            let mut line_chunks: Vec<String> = Vec::new();
            let mut line_length = 0;

            // Drop initial whitespace chunks if necessary.
            if self.trim_whitespace {
                while i < chunks.len() && chunks[i].trim().is_empty() {
                    i += 1;
                }
            }

            // Fit as many residual chunks on the line as possible.
            while i < chunks.len() {
                let length = chunks[i].chars().count();
                if line_length + length > self.width {
                    break;
                }

                line_chunks.push(chunks[i].clone());
                line_length += length;
                i += 1;
            }

            // If the line is full and the next chunk is too big to fit on
            // any line, handle the overflow.
            if i < chunks.len() && chunks[i].chars().count() > self.width {
                if self.break_overflowing_words {
                    let residual = self.width - line_length;
                    if residual > 0 {
                        let taken: String = chunks[i].chars().take(residual).collect();
                        let rest: String = chunks[i].chars().skip(residual).collect();
                        line_chunks.push(taken);
                        chunks[i] = rest;
                    }
                } else if line_length == 0 {
                    // Take the whole chunk if this is a fresh line.
                    line_chunks.push(chunks[i].clone());
                    i += 1;
                }
            }

            // Remove trailing whitespace chunks if necessary.
            if self.trim_whitespace {
                while let Some(last) = line_chunks.last() {
                    if !last.trim().is_empty() {
                        break;
                    }
                    line_chunks.pop();
                }
            }

            if !line_chunks.is_empty() {
                lines.push(line_chunks.concat());
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tabs_uses_tab_stops() {
        assert_eq!(expand_tabs("\tx", 4), "    x");
        assert_eq!(expand_tabs("ab\tx", 4), "ab  x");
        assert_eq!(expand_tabs("abcd\tx", 4), "abcd    x");
        assert_eq!(expand_tabs("a\tb\tc", 4), "a   b   c");
    }

    #[test]
    fn mask_replaces_content_with_spaces() {
        assert_eq!(mask_with_whitespace_expanded("abc", 4), "   ");
        assert_eq!(mask_with_whitespace_expanded("\tab", 4), "      ");
        assert_eq!(mask_with_whitespace_expanded("a\tb", 4), "     ");
    }

    #[test]
    fn wrap_narrow() {
        let text = "Hello there, how are you this fine day?  I'm glad to hear it!";
        let lines = TextWrapper::simple(12).wrap(text);

        insta::assert_snapshot!(lines.join("\n"), @r"
        Hello there,
        how are you
        this fine
        day?  I'm
        glad to hear
        it!
        ");
    }

    #[test]
    fn wrap_wide() {
        let text = "Hello there, how are you this fine day?  I'm glad to hear it!";
        let lines = TextWrapper::simple(42).wrap(text);

        insta::assert_snapshot!(lines.join("\n"), @r"
        Hello there, how are you this fine day?
        I'm glad to hear it!
        ");
    }

    #[test]
    fn wrap_breaks_overflowing_words() {
        let lines = TextWrapper::simple(4).wrap("abcdefghij");
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_breaks_on_hyphens() {
        let lines = TextWrapper::simple(6).wrap("well-known");
        assert_eq!(lines, vec!["well-", "known"]);
    }

    #[test]
    fn wrap_keeps_overflowing_words_whole_when_breaking_is_disabled() {
        let mut wrapper = TextWrapper::simple(4);
        wrapper.break_overflowing_words = false;

        let lines = wrapper.wrap("abcdefghij ok");
        assert_eq!(lines, vec!["abcdefghij", "ok"]);
    }

    #[test]
    fn wrap_of_empty_input_produces_no_lines() {
        let lines = TextWrapper::simple(10).wrap("");
        assert!(lines.is_empty());
    }
}
