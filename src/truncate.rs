use unicode_segmentation::UnicodeSegmentation;

const ELLIPSIS: char = '…';

/// Text shortening used for teasers
pub trait Truncator {
    /// Shorten `text` to at most `max_chars` characters
    fn truncate(&self, text: &str, max_chars: usize) -> String;
}

/// Cuts at the last word boundary that fits and appends an ellipsis.
///
/// The ellipsis counts towards `max_chars`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundaryTruncator;

impl WordBoundaryTruncator {
    pub fn new() -> Self {
        Self
    }
}

impl Truncator for WordBoundaryTruncator {
    fn truncate(&self, text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        if max_chars == 0 {
            return String::new();
        }

        let budget = max_chars - 1;

        // Byte offset of the longest prefix ending on a word boundary
        let mut cut = 0;
        let mut used = 0;
        for (offset, word) in text.split_word_bound_indices() {
            let len = word.chars().count();
            if used + len > budget {
                break;
            }
            used += len;
            cut = offset + word.len();
        }

        let mut truncated = text[..cut].trim_end().to_string();
        if truncated.is_empty() {
            truncated = text.chars().take(budget).collect();
        }
        truncated.push(ELLIPSIS);
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let truncator = WordBoundaryTruncator::new();
        assert_eq!(truncator.truncate("Hello world", 320), "Hello world");
        assert_eq!(truncator.truncate("", 320), "");
    }

    #[test]
    fn test_cuts_on_word_boundary() {
        let truncator = WordBoundaryTruncator::new();
        let truncated = truncator.truncate("The quick brown fox jumps", 14);
        assert_eq!(truncated, "The quick…");
        assert!(truncated.chars().count() <= 14);
    }

    #[test]
    fn test_single_long_word_is_hard_cut() {
        let truncator = WordBoundaryTruncator::new();
        let truncated = truncator.truncate("Donaudampfschifffahrt", 8);
        assert_eq!(truncated, "Donauda…");
        assert_eq!(truncated.chars().count(), 8);
    }

    #[test]
    fn test_never_exceeds_limit() {
        let truncator = WordBoundaryTruncator::new();
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(20);
        for max in [1, 5, 37, 100, 320] {
            let truncated = truncator.truncate(&text, max);
            assert!(truncated.chars().count() <= max, "max {}: {}", max, truncated);
            assert!(truncated.ends_with(ELLIPSIS));
        }
    }

    #[test]
    fn test_multibyte_text() {
        let truncator = WordBoundaryTruncator::new();
        let truncated = truncator.truncate("Größenänderung übermäßig groß", 20);
        assert!(truncated.chars().count() <= 20);
        assert!(truncated.starts_with("Größenänderung"));
    }
}
