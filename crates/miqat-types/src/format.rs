//! Display formatting configuration.

use serde::{Deserialize, Serialize};

/// Numeral system used when rendering display times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Numerals {
    /// 0123456789
    #[default]
    Latin,
    /// ٠١٢٣٤٥٦٧٨٩
    ArabicIndic,
    /// ۰۱۲۳۴۵۶۷۸۹
    Persian,
}

impl Numerals {
    fn zero(self) -> char {
        match self {
            Numerals::Latin => '0',
            Numerals::ArabicIndic => '\u{0660}',
            Numerals::Persian => '\u{06F0}',
        }
    }

    /// Maps an ASCII digit to this numeral system; other characters pass through.
    pub fn map_char(self, c: char) -> char {
        match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => {
                char::from_u32(self.zero() as u32 + d).unwrap_or(c)
            }
            _ => c,
        }
    }
}

/// Formatting configuration for display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatConfig {
    pub numerals: Numerals,
}

impl FormatConfig {
    pub fn new(numerals: Numerals) -> Self { Self { numerals } }

    /// Picks numerals the way browsers do for a BCP-47 language tag.
    ///
    /// A bare `ar` is treated as `ar-EG`. The Maghreb locales write Latin digits.
    pub fn from_language_tag(tag: &str) -> Self {
        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts
            .find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|p| p.to_ascii_uppercase());

        let numerals = match (language.as_str(), region.as_deref()) {
            ("ar", Some("MA" | "DZ" | "TN" | "LY" | "EH")) => Numerals::Latin,
            ("ar", _) => Numerals::ArabicIndic,
            ("fa", _) => Numerals::Persian,
            _ => Numerals::Latin,
        };
        Self { numerals }
    }

    /// Rewrites every ASCII digit in `s` with the configured numerals.
    pub fn localize_digits(&self, s: &str) -> String {
        if self.numerals == Numerals::Latin {
            return s.to_string();
        }
        s.chars().map(|c| self.numerals.map_char(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags() {
        assert_eq!(FormatConfig::from_language_tag("ar").numerals, Numerals::ArabicIndic);
        assert_eq!(FormatConfig::from_language_tag("ar-EG").numerals, Numerals::ArabicIndic);
        assert_eq!(FormatConfig::from_language_tag("ar-MA").numerals, Numerals::Latin);
        assert_eq!(FormatConfig::from_language_tag("fa-IR").numerals, Numerals::Persian);
        assert_eq!(FormatConfig::from_language_tag("en-US").numerals, Numerals::Latin);
        assert_eq!(FormatConfig::from_language_tag("").numerals, Numerals::Latin);
    }

    #[test]
    fn test_localize_digits() {
        let arabic = FormatConfig::new(Numerals::ArabicIndic);
        assert_eq!(arabic.localize_digits("4:05am"), "٤:٠٥am");

        let persian = FormatConfig::new(Numerals::Persian);
        assert_eq!(persian.localize_digits("12:30pm"), "۱۲:۳۰pm");

        assert_eq!(FormatConfig::default().localize_digits("9:41am"), "9:41am");
    }
}
