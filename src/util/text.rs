use unicode_segmentation::UnicodeSegmentation;

use crate::model::LengthLimitType;

/// Marker appended to a summary that dropped content.
pub const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `limit` words or characters, appending `...` if truncated.
///
/// Words are split on whitespace and rejoined with single spaces; characters are
/// counted as extended grapheme clusters so combined glyphs stay intact.
pub fn limit_text(text: &str, limit: usize, kind: LengthLimitType) -> String {
    match kind {
        LengthLimitType::Word => {
            let words: Vec<&str> = text.split_whitespace().collect();
            let mut shortened = words
                .iter()
                .take(limit)
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            if words.len() > limit {
                shortened.push_str(ELLIPSIS);
            }
            shortened
        }
        LengthLimitType::Char => {
            let mut shortened = String::new();
            let mut count = 0;
            for grapheme in text.graphemes(true) {
                if count == limit {
                    shortened.push_str(ELLIPSIS);
                    return shortened;
                }
                shortened.push_str(grapheme);
                count += 1;
            }
            shortened
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_limit_under() {
        assert_eq!(limit_text("tax cuts help", 5, LengthLimitType::Word), "tax cuts help");
    }

    #[test]
    fn test_word_limit_over() {
        assert_eq!(
            limit_text("the plan\ncuts   emissions by half", 3, LengthLimitType::Word),
            "the plan cuts..."
        );
    }

    #[test]
    fn test_char_limit_keeps_graphemes() {
        assert_eq!(limit_text("e\u{301}cole", 2, LengthLimitType::Char), "e\u{301}c...");
        assert_eq!(limit_text("abc", 3, LengthLimitType::Char), "abc");
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(limit_text("anything", 0, LengthLimitType::Word), "...");
        assert_eq!(limit_text("", 0, LengthLimitType::Char), "");
    }
}
