//! Glob Matching Module
//!
//! Translates Redis-style glob patterns into anchored regular expressions
//! for the in-memory scan implementation.

use regex::Regex;

// == Glob To Regex ==
/// Compiles a glob pattern into an anchored [`Regex`].
///
/// `*` matches any run of characters (including none) and `?` matches
/// exactly one character. Everything else matches literally, so regex
/// metacharacters in the pattern are escaped. A pattern that still fails
/// to compile falls back to a regex no key matches.
pub fn glob_to_regex(pattern: &str) -> Regex {
    let mut regex_pattern = String::with_capacity(pattern.len() * 2);
    regex_pattern.push('^');

    for ch in pattern.chars() {
        match ch {
            '*' => regex_pattern.push_str(".*"),
            '?' => regex_pattern.push('.'),
            c if "\\.+()[]{}|^$".contains(c) => {
                regex_pattern.push('\\');
                regex_pattern.push(c);
            }
            c => regex_pattern.push(c),
        }
    }

    regex_pattern.push('$');

    Regex::new(&regex_pattern).unwrap_or_else(|_| Regex::new("^$").unwrap())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern_is_anchored() {
        let re = glob_to_regex("user");
        assert!(re.is_match("user"));
        assert!(!re.is_match("user:1"));
        assert!(!re.is_match("a_user"));
    }

    #[test]
    fn test_star_matches_any_run() {
        let re = glob_to_regex("user:*");
        assert!(re.is_match("user:"));
        assert!(re.is_match("user:1"));
        assert!(re.is_match("user:1:profile"));
        assert!(!re.is_match("session:1"));
    }

    #[test]
    fn test_question_mark_matches_single_char() {
        let re = glob_to_regex("user:?");
        assert!(re.is_match("user:1"));
        assert!(re.is_match("user:a"));
        assert!(!re.is_match("user:"));
        assert!(!re.is_match("user:12"));
    }

    #[test]
    fn test_metacharacters_match_literally() {
        let re = glob_to_regex("price.usd+eur");
        assert!(re.is_match("price.usd+eur"));
        assert!(!re.is_match("priceXusd+eur"));

        let re = glob_to_regex("set[0]");
        assert!(re.is_match("set[0]"));
        assert!(!re.is_match("set0"));
    }

    #[test]
    fn test_star_alone_matches_everything() {
        let re = glob_to_regex("*");
        assert!(re.is_match(""));
        assert!(re.is_match("anything:at:all"));
    }
}
