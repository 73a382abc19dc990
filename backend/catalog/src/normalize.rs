//! Free-form text canonicalization for keyword comparison.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator characters commonly found in filenames, folded to spaces.
static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-+.]").unwrap());

/// Anything that is not a lowercase ASCII letter, digit, or whitespace.
static NON_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());

/// Canonicalize arbitrary text into a lowercase, single-spaced token string.
///
/// `"iPhone+11_Pro.jpg"` becomes `"iphone 11 pro jpg"`. Total over any
/// input, including the empty string, and idempotent. Characters outside
/// `a-z`/`0-9` that survive lowercasing (punctuation, accented letters,
/// symbols) are dropped.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = SEPARATOR_RE.replace_all(&lowered, " ");
    let cleaned = NON_TOKEN_RE.replace_all(&spaced, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_separators_and_case() {
        assert_eq!(normalize("iPhone+11_Pro.jpg"), "iphone 11 pro jpg");
    }

    #[test]
    fn collapses_whitespace_and_strips_punctuation() {
        assert_eq!(normalize("  Multiple   Spaces!! "), "multiple spaces");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("___---..."), "");
    }

    #[test]
    fn drops_non_ascii_letters() {
        // Lowercasing keeps the accents; the token filter removes them.
        assert_eq!(normalize("Café-Crème 2"), "caf crme 2");
    }

    #[test]
    fn idempotent() {
        for input in ["iPhone+11_Pro.jpg", "  Multiple   Spaces!! ", "uneventful", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn output_alphabet_is_restricted() {
        let out = normalize("Weird`~!@#$%^&*()=[]{}|;:'\",<>/? input\t42\n");
        assert!(
            out.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ')
        );
        assert!(!out.starts_with(' ') && !out.ends_with(' '));
        assert!(!out.contains("  "));
    }
}
