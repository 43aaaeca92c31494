use std::borrow::Cow;

use digest_logging::digest_warn;

/// Largest body, in characters, sent to the model in one call.
pub const MAX_CONTENT_LENGTH: usize = 150_000;

/// Truncates `text` to its first `max_length` characters.
///
/// Text at or under the limit is returned borrowed and unchanged. Truncation
/// logs a warning and never fails.
pub fn enforce_limit(text: &str, max_length: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_length) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            digest_warn!(
                "Content is too long and is being truncated: chars={} limit={}",
                text.chars().count(),
                max_length
            );
            Cow::Owned(text[..cut].to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        let text = "short";
        assert!(matches!(enforce_limit(text, 10), Cow::Borrowed("short")));
        assert!(matches!(enforce_limit(text, 5), Cow::Borrowed("short")));
    }

    #[test]
    fn cuts_on_character_boundary() {
        let text = "héllo wörld";
        let out = enforce_limit(text, 4);
        assert_eq!(out, "héll");
        assert_eq!(out.chars().count(), 4);
    }

    #[test]
    fn zero_limit_yields_empty() {
        assert_eq!(enforce_limit("abc", 0), "");
    }
}
