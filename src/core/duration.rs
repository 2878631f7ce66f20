use regex::Regex;
use std::sync::OnceLock;

/// Returned by [`extract_nights`] when no nights token is present
pub const NO_DURATION: &str = "N/A";

fn nights_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\s*Nights").expect("nights pattern is valid"))
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("number pattern is valid"))
}

/// Extract the canonical "N Nights" token from a free-form duration
///
/// "5 Nights 6 Days" and "5 Nights and 6 Days" both give "5 Nights".
#[inline]
pub fn extract_nights(input: &str) -> String {
    nights_pattern()
        .captures(input)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|nights| format!("{} Nights", nights))
        .unwrap_or_else(|| NO_DURATION.to_string())
}

/// First integer in the duration string, used for ordering by length of stay
#[inline]
pub fn leading_number(input: &str) -> Option<u32> {
    number_pattern()
        .find(input)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_nights_formats() {
        assert_eq!(extract_nights("5 Nights 6 Days"), "5 Nights");
        assert_eq!(extract_nights("5 Nights and 6 Days"), "5 Nights");
        assert_eq!(extract_nights("4Nights/5Days"), "4 Nights");
        assert_eq!(extract_nights("Duration: 07 Nights 08 Days"), "7 Nights");
    }

    #[test]
    fn test_extract_nights_absent() {
        assert_eq!(extract_nights(""), NO_DURATION);
        assert_eq!(extract_nights("6 Days"), NO_DURATION);
        assert_eq!(extract_nights("5 nights"), NO_DURATION);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("3 Nights 4 Days"), Some(3));
        assert_eq!(leading_number("Approx. 10 Nights"), Some(10));
        assert_eq!(leading_number("flexible"), None);
    }
}
