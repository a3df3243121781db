//! File name sanitization
//!
//! Uses the Windows file name grammar, the strictest of the platforms a
//! host export folder may live on: `< > : " / \ | ? *`, NUL and the ASCII
//! control characters are replaced with `_`.

use super::rule::DEFAULT_FALLBACK_LABEL;

const INVALID_FILE_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replacement for every illegal character
const REPLACEMENT: char = '_';

/// Whether `c` may appear in a file name
pub fn is_valid_file_name_char(c: char) -> bool {
    !(c.is_ascii_control() || INVALID_FILE_NAME_CHARS.contains(&c))
}

/// Makes `name` safe to use as a file name
///
/// Returns `"Unnamed"` for an empty input. Idempotent.
pub fn sanitize(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_FALLBACK_LABEL.to_string();
    }

    name.chars()
        .map(|c| {
            if is_valid_file_name_char(c) {
                c
            } else {
                REPLACEMENT
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use test_case::test_case;

    #[test_case("A101-Floor Plan" => "A101-Floor Plan" ; "already clean")]
    #[test_case("A101/A102" => "A101_A102" ; "forward slash")]
    #[test_case(r"C:\sheets" => "C__sheets" ; "drive and backslash")]
    #[test_case("What?*" => "What__" ; "wildcards")]
    #[test_case("<tag>|\"q\"" => "_tag___q_" ; "brackets pipe quotes")]
    #[test_case("line\nbreak\ttab" => "line_break_tab" ; "control characters")]
    #[test_case("Étage 1 – Plan" => "Étage 1 – Plan" ; "non ascii kept")]
    #[test_case("" => "Unnamed" ; "empty")]
    fn test_sanitize(input: &str) -> String {
        sanitize(input)
    }

    #[test]
    fn test_sanitize_idempotent_random() {
        for _ in 0..200 {
            let input: String = Faker.fake();
            let once = sanitize(&input);
            assert_eq!(sanitize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_sanitized_output_contains_only_valid_chars() {
        let out = sanitize("a\u{0}b<c>d:e\"f/g\\h|i?j*k");
        assert!(out.chars().all(is_valid_file_name_char));
    }

    #[test]
    fn test_whitespace_is_kept() {
        assert_eq!(sanitize("   "), "   ");
    }
}
