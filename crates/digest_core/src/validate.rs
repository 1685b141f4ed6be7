use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email pattern is a valid regex");
}

/// Syntactic e-mail check; no domain or MX lookup.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// True when the value has at least one non-whitespace character.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn within_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("first.last+tag@news.example.co.uk"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("reader"));
        assert!(!is_valid_email("reader@example"));
        assert!(!is_valid_email("reader @example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_urls() {
        assert!(is_valid_url("https://example.com/article"));
        assert!(!is_valid_url("example.com/article"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_presence_and_length() {
        assert!(is_present(" x "));
        assert!(!is_present(" \t\n"));
        assert!(within_max_length("héllo", 5));
        assert!(!within_max_length("héllo!", 5));
    }
}
