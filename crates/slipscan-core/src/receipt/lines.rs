//! Positional heuristics: the first line names the merchant, the rest are notes.

/// Characters that end a line in recognized text.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Whitespace, plus the information separators U+001C..U+001F.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Trim whitespace and separator control characters from both ends.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(is_blank)
}

/// Split text into trimmed, non-blank lines in original order.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split(is_line_break)
        .map(trim_text)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Source and notes derived from line layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAndNotes {
    /// First non-blank line.
    pub source: Option<String>,
    /// Remaining lines joined with `\n`, or the whole trimmed text.
    pub notes: String,
}

/// Derive source and notes from text.
///
/// With fewer than two lines the notes are the whole trimmed text, so a
/// single-line document reports that line as both source and notes.
pub fn source_and_notes(text: &str) -> SourceAndNotes {
    let lines = split_lines(text);

    let notes = match lines.as_slice() {
        [_, rest @ ..] if !rest.is_empty() => rest.join("\n"),
        _ => trim_text(text).to_string(),
    };

    SourceAndNotes {
        source: lines.first().map(|line| line.to_string()),
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_lines_drops_blanks() {
        let text = "  Acme Cafe \n\n\t\nLunch  \r\n $12.50";
        assert_eq!(split_lines(text), vec!["Acme Cafe", "Lunch", "$12.50"]);
    }

    #[test]
    fn test_split_lines_handles_carriage_returns() {
        assert_eq!(split_lines("a\rb\u{2028}c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_multi_line() {
        let result = source_and_notes("Acme Cafe\nLunch with team\n$12.50");

        assert_eq!(result.source.as_deref(), Some("Acme Cafe"));
        assert_eq!(result.notes, "Lunch with team\n$12.50");
    }

    #[test]
    fn test_single_line_notes_is_full_text() {
        let result = source_and_notes("\n   Acme Cafe   \n\n");

        assert_eq!(result.source.as_deref(), Some("Acme Cafe"));
        assert_eq!(result.notes, "Acme Cafe");
    }

    #[test]
    fn test_single_line_keeps_inner_text_verbatim() {
        // The fallback is the trimmed text, not a reconstruction of the line.
        let result = source_and_notes("  Acme   Cafe\n");
        assert_eq!(result.notes, "Acme   Cafe");
    }

    #[test]
    fn test_empty_and_blank() {
        for text in ["", "   ", "\n\n\t\n"] {
            let result = source_and_notes(text);
            assert_eq!(result.source, None);
            assert_eq!(result.notes, "");
        }
    }

    #[test]
    fn test_separator_controls_are_trimmed() {
        let result = source_and_notes("\u{1f}Acme\u{1f}");
        assert_eq!(result.source.as_deref(), Some("Acme"));
        assert_eq!(result.notes, "Acme");

        let result = source_and_notes("\u{1c}Acme");
        assert_eq!(result.source.as_deref(), Some("Acme"));
        assert_eq!(result.notes, "Acme");

        assert_eq!(trim_text("\u{1e} a\u{1d}b \u{1f}\n"), "a\u{1d}b");
    }

    #[test]
    fn test_notes_skip_blank_lines() {
        let result = source_and_notes("Store\n\n  item one \n\n item two");
        assert_eq!(result.notes, "item one\nitem two");
    }
}
