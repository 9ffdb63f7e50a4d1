//! [`Phone`] definitions.

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;

/// Vietnamese mobile phone number of a [`Listing`] contact.
///
/// [`Listing`]: super::Listing
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::is_valid(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    ///
    /// A valid number starts with the `84` country code or the `0` trunk
    /// prefix, followed by an operator digit (`3`, `5`, `7`, `8` or `9`) and
    /// 8 more digits.
    #[must_use]
    pub fn is_valid(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(?:84|0)[35789][0-9]{8}$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use super::Phone;

    #[test]
    fn accepts_vietnamese_mobiles() {
        for number in [
            "0912345678",
            "84912345678",
            "0332698091",
            "0587654321",
            "0701234567",
            "0812345678",
        ] {
            assert!(Phone::is_valid(number), "`{number}` should be valid");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for number in [
            "12345",
            "",
            "0112345678",
            "0612345678",
            "091234567",
            "09123456789",
            "8412345678",
            "+84912345678",
            "091 234 5678",
            "abc0912345678",
        ] {
            assert!(!Phone::is_valid(number), "`{number}` should be invalid");
        }
    }

    #[test]
    fn parses_from_str() {
        let phone: Phone = "0912345678".parse().unwrap();

        assert_eq!(AsRef::<str>::as_ref(&phone), "0912345678");
        assert!("0012345678".parse::<Phone>().is_err());
    }
}
