use crate::error::OcrError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Character class retained in recognized text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Digits `0-9`
    Numeric,
    /// ASCII letters, both cases
    Alpha,
    /// ASCII letters and digits
    #[default]
    Alnum,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Numeric, Mode::Alpha, Mode::Alnum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alpha => "alpha",
            Self::Alnum => "alnum",
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alpha => c.is_ascii_alphabetic(),
            Self::Alnum => c.is_ascii_alphanumeric(),
        }
    }

    /// Keep only characters of this class, in their original order.
    /// Case is preserved.
    pub fn filter(&self, text: &str) -> String {
        text.chars().filter(|&c| self.accepts(c)).collect()
    }
}

impl FromStr for Mode {
    type Err = OcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                OcrError::InvalidArgument(format!(
                    "Invalid mode: {}. Use one of: numeric, alpha, alnum",
                    s
                ))
            })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_keeps_digits() {
        assert_eq!(Mode::Numeric.filter("12-34"), "1234");
        assert_eq!(Mode::Numeric.filter("a1b2"), "12");
    }

    #[test]
    fn test_alpha_keeps_both_cases() {
        assert_eq!(Mode::Alpha.filter("aB3 c!D"), "aBcD");
    }

    #[test]
    fn test_alnum_preserves_order_and_repeats() {
        assert_eq!(Mode::Alnum.filter(" x-Y 9 9z "), "xY99z");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(Mode::Alnum.filter("Ab٣é7"), "Ab7");
        assert_eq!(Mode::Numeric.filter("٣4"), "4");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let raw = "Q-7 x_8;Z?";
        for mode in Mode::ALL {
            let once = mode.filter(raw);
            assert_eq!(mode.filter(&once), once);
        }
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("numeric".parse::<Mode>().unwrap(), Mode::Numeric);
        assert_eq!("alpha".parse::<Mode>().unwrap(), Mode::Alpha);
        assert_eq!("alnum".parse::<Mode>().unwrap(), Mode::Alnum);
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let err = "ALNUM".parse::<Mode>().unwrap_err();
        assert!(matches!(err, OcrError::InvalidArgument(_)));
        assert!("hex".parse::<Mode>().is_err());
    }
}
