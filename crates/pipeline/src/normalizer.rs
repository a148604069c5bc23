//! Canonicalization of free-text identifiers.
//!
//! Producer names arrive from label OCR or from a user typing them, with
//! accents, punctuation and mixed case. The recommendation service matches
//! on a flattened key, which this module produces.

use deunicode::deunicode;

/// Turn free text into a stable matching key.
///
/// ## Algorithm
/// 1. Transliterate to ASCII (diacritics stripped)
/// 2. Replace every character that is not an ASCII letter, digit or
///    whitespace with a single space
/// 3. Lower-case
/// 4. Trim leading/trailing whitespace; internal runs are left alone
///
/// Never fails, and `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let replaced: String = deunicode(text)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    replaced.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_key_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || (c.is_ascii() && c.is_whitespace())
    }

    #[test]
    fn test_strips_diacritics_and_lowercases() {
        assert_eq!(normalize("Château Pétrus"), "chateau petrus");
        assert_eq!(normalize("Clos du Pic"), "clos du pic");
        assert_eq!(normalize("Weingut Müller-Thurgau"), "weingut muller thurgau");
    }

    #[test]
    fn test_punctuation_becomes_single_spaces() {
        assert_eq!(normalize("Domaine d'Aupilhac"), "domaine d aupilhac");
        // Internal whitespace is not collapsed
        assert_eq!(normalize("A & B"), "a   b");
    }

    #[test]
    fn test_trims_outer_whitespace() {
        assert_eq!(normalize("  Clos  du Pic!! "), "clos  du pic");
        assert_eq!(normalize("'''"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_output_character_class() {
        let inputs = [
            "Château Lafite-Rothschild 1er Cru",
            "Bodegas Señorío de Sarría",
            "葡萄酒 Winery №5",
            "Ca' del Bosco — Franciacorta",
            "\tTabbed\nNewline\r",
            "ÆØÅ æøå ß",
        ];
        for input in inputs {
            let key = normalize(input);
            assert!(key.chars().all(is_key_char), "unexpected char in {:?}", key);
            assert_eq!(key, key.trim(), "outer whitespace left in {:?}", key);
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "Clos du Pic",
            "  Domaine de l'Écu  ",
            "Bodegas Señorío de Sarría",
            "葡萄酒 Winery №5",
            "a\u{00A0}b",
            "---",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    /// Every `step`-th scalar value below U+3000, skipping surrogates
    fn sampled_chars(step: usize) -> impl Iterator<Item = char> {
        (0u32..0x3000).step_by(step).filter_map(char::from_u32)
    }

    fn assert_key_properties(input: &str) {
        let key = normalize(input);
        assert!(key.chars().all(is_key_char), "unexpected char in {:?} from {:?}", key, input);
        assert_eq!(key, key.trim(), "outer whitespace left in {:?}", key);
        assert_eq!(normalize(&key), key, "not idempotent for {:?}", input);
    }

    #[test]
    fn test_properties_hold_for_single_chars() {
        for c in sampled_chars(1) {
            assert_key_properties(&c.to_string());
        }
    }

    #[test]
    fn test_properties_hold_for_mixed_scripts() {
        let chars: Vec<char> = sampled_chars(7).collect();
        for window in chars.windows(5) {
            let word: String = window.iter().collect();
            assert_key_properties(&word);
            assert_key_properties(&format!(" Château {} 2018 ", word));
        }

        let scripts = ["Domaine", "Ελληνικά", "Кахетия", "ワイン", "مزرعة", "'", "\u{3000}"];
        for a in scripts {
            for b in scripts {
                assert_key_properties(&format!("{}{}", a, b));
                assert_key_properties(&format!("{} - {}", a, b));
            }
        }
    }
}
