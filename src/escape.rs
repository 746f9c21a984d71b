//! Quote handling for values extracted from XLIFF.
//!
//! Values are escaped exactly once, at extraction time. Escaping is not idempotent:
//! `escape(escape(x))` doubles the backslashes.

use std::borrow::Cow;

/// How extracted text is prepared for its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// `'` becomes `\'`, for values embedded in single-quoted source literals.
    #[default]
    SingleQuote,
    /// Text is kept as-is. Package metadata normalizes quotes itself when it is written.
    Verbatim,
}

impl From<bool> for EscapeMode {
    fn from(should_escape: bool) -> Self {
        if should_escape {
            EscapeMode::SingleQuote
        } else {
            EscapeMode::Verbatim
        }
    }
}

pub fn escape(text: &str, mode: EscapeMode) -> Cow<'_, str> {
    match mode {
        EscapeMode::SingleQuote if text.contains('\'') => Cow::Owned(text.replace('\'', "\\'")),
        _ => Cow::Borrowed(text),
    }
}

/// Boolean form of [`escape`].
///
/// ```rust
/// use xliffnls::escape::escape_quotes;
/// assert_eq!(escape_quotes("a'b", true), "a\\'b");
/// assert_eq!(escape_quotes("a'b", false), "a'b");
/// ```
pub fn escape_quotes(text: &str, should_escape: bool) -> String {
    escape(text, EscapeMode::from(should_escape)).into_owned()
}

/// Replaces every `"` with `'`. Nothing else is escaped.
pub fn normalize_double_quotes(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "'"))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quotes_are_escaped() {
        assert_eq!(escape("a'b", EscapeMode::SingleQuote), "a\\'b");
        assert_eq!(escape("'a''b'", EscapeMode::SingleQuote), "\\'a\\'\\'b\\'");
    }

    #[test]
    fn test_verbatim_keeps_text() {
        assert_eq!(escape("a'b", EscapeMode::Verbatim), "a'b");
        assert!(matches!(escape("a'b", EscapeMode::Verbatim), Cow::Borrowed(_)));
    }

    #[test]
    fn test_other_characters_untouched() {
        let text = r#"He said "hi" \ {0} <b>"#;
        assert_eq!(escape(text, EscapeMode::SingleQuote), text);
    }

    #[test]
    fn test_escaping_twice_doubles_backslashes() {
        let once = escape("it's", EscapeMode::SingleQuote).into_owned();
        let twice = escape(&once, EscapeMode::SingleQuote);
        assert_eq!(twice, "it\\\\'s");
        assert_ne!(twice, once);
    }

    #[test]
    fn test_boolean_form() {
        assert_eq!(escape_quotes("a'b", true), "a\\'b");
        assert_eq!(escape_quotes("a'b", false), "a'b");
    }

    #[test]
    fn test_normalize_double_quotes() {
        assert_eq!(normalize_double_quotes(r#"He said "hi""#), "He said 'hi'");
        assert_eq!(normalize_double_quotes("plain"), "plain");
        assert_eq!(normalize_double_quotes(r"back\slash"), r"back\slash");
    }
}
