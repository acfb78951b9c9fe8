pub mod constants;
pub mod date;
pub mod item;

pub use item::ScheduleItem;

use crate::core::config::BASE_URL;

/// Resolves a listing URL against the site base. Absolute http/https URLs
/// pass through unchanged, so normalizing twice is a no-op.
pub(crate) fn normalize_url(url: &str) -> String {
    if url.starts_with("http:") || url.starts_with("https:") {
        url.to_string()
    } else {
        format!("{}{}", BASE_URL, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_joined_to_base() {
        assert_eq!(
            normalize_url("program/12345"),
            "https://dimora.jp/program/12345"
        );
    }

    #[test]
    fn test_absolute_url_unchanged() {
        assert_eq!(
            normalize_url("https://dimora.jp/program/12345"),
            "https://dimora.jp/program/12345"
        );
        assert_eq!(
            normalize_url("http://example.com/x"),
            "http://example.com/x"
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_url("program/12345");
        assert_eq!(normalize_url(&once), once);
    }
}
