//! Client-side field validators run before a request is submitted.
//!
//! All string predicates trim surrounding whitespace first and must match
//! the whole input. Plate letters are the Cyrillic subset that also exists
//! in Latin script (А В Е К М Н О Р С Т У Х).

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Document;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const PASSPORT_SERIAL_LEN: usize = 4;
pub const PASSPORT_NUMBER_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").expect("valid email regex")
});

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("valid date regex"));

static PLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[АВЕКМНОРСТУХ][0-9]{3}[АВЕКМНОРСТУХ]{2}[0-9]{2,3}$").expect("valid plate regex")
});

static PLATE_MASK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[АВЕКМНОРСТУХ*]([0-9]|\*){3}[АВЕКМНОРСТУХ*]{2}([0-9]{2,3}|\*)$")
        .expect("valid plate mask regex")
});

static PLATE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([АВЕКМНОРСТУХ]?|[АВЕКМНОРСТУХ][0-9]{0,3}|[АВЕКМНОРСТУХ][0-9]{3}[АВЕКМНОРСТУХ]{0,2}|[АВЕКМНОРСТУХ][0-9]{3}[АВЕКМНОРСТУХ]{2}[0-9]{0,3})$",
    )
    .expect("valid plate prefix regex")
});

static PLATE_MASK_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([АВЕКМНОРСТУХ*]?|[АВЕКМНОРСТУХ*][0-9*]{0,3}|[АВЕКМНОРСТУХ*][0-9*]{3}[АВЕКМНОРСТУХ*]{0,2}|[АВЕКМНОРСТУХ*][0-9*]{3}[АВЕКМНОРСТУХ*]{2}([0-9]{0,3}|\*?))$",
    )
    .expect("valid plate mask prefix regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// `DD.MM.YYYY` shape only; calendar validity is not checked.
pub fn is_valid_date(date: &str) -> bool {
    DATE_RE.is_match(date.trim())
}

pub fn is_valid_password(password: &str) -> bool {
    password.trim().chars().count() >= MIN_PASSWORD_LEN
}

/// Strict plate: letter, 3 digits, 2 letters, 2 or 3 region digits.
pub fn is_valid_plate(plate: &str) -> bool {
    PLATE_RE.is_match(plate.trim())
}

/// Search mask: same shape as a plate, any letter or digit may be `*`,
/// and the whole region may be a single `*`.
pub fn is_valid_plate_mask(mask: &str) -> bool {
    PLATE_MASK_RE.is_match(mask.trim())
}

/// Length-only check: 4-character serial and 6-character number.
pub fn is_valid_passport(passport: &Document) -> bool {
    passport.serial.chars().count() == PASSPORT_SERIAL_LEN
        && passport.number.chars().count() == PASSPORT_NUMBER_LEN
}

/// Whether `input` could still grow into a valid plate (or mask).
///
/// Used to filter keystrokes in plate inputs: the empty string and any
/// prefix of a valid value pass, letter case is ignored.
pub fn is_plate_prefix(input: &str, mask: bool) -> bool {
    if mask {
        PLATE_MASK_PREFIX_RE.is_match(input)
    } else {
        PLATE_PREFIX_RE.is_match(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email() {
        assert!(is_valid_email("ivan@example.ru"));
        assert!(is_valid_email("  first.last+tag@mail.example.com \n"));
        assert!(!is_valid_email("ivan@example"));
        assert!(!is_valid_email("ivan.example.ru"));
        assert!(!is_valid_email("@example.ru"));
        assert!(!is_valid_email("ivan@example.r"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn date_checks_shape_not_calendar() {
        assert!(is_valid_date("01.12.2024"));
        assert!(is_valid_date("31.02.9999"));
        assert!(is_valid_date(" 07.03.2025 "));
        assert!(!is_valid_date("1.12.2024"));
        assert!(!is_valid_date("01-12-2024"));
        assert!(!is_valid_date("01.12.24"));
    }

    #[test]
    fn password_length() {
        assert!(!is_valid_password("short"));
        assert!(is_valid_password("longenough"));
        assert!(is_valid_password("12345678"));
        assert!(!is_valid_password("  1234567  "));
        assert!(is_valid_password("пароль12"));
    }

    #[test]
    fn strict_plate() {
        assert!(is_valid_plate("А123ВС77"));
        assert!(is_valid_plate("Х999ХХ799"));
        assert!(is_valid_plate(" М001ОР50 "));
        // Latin look-alikes are not Cyrillic.
        assert!(!is_valid_plate("A123BC77"));
        // Б is not allowed on plates.
        assert!(!is_valid_plate("Б123ВС77"));
        assert!(!is_valid_plate("А12ВС77"));
        assert!(!is_valid_plate("А123ВС7"));
        assert!(!is_valid_plate("А123ВС7777"));
        assert!(!is_valid_plate("А123В77"));
        assert!(!is_valid_plate("*123ВС77"));
    }

    #[test]
    fn plate_mask() {
        assert!(is_valid_plate_mask("А123ВС77"));
        assert!(is_valid_plate_mask("*123ВС77"));
        assert!(is_valid_plate_mask("А*2*ВС77"));
        assert!(is_valid_plate_mask("А123**777"));
        assert!(is_valid_plate_mask("А123ВС*"));
        assert!(is_valid_plate_mask("*******"));
        assert!(!is_valid_plate_mask("А123ВС**"));
        assert!(!is_valid_plate_mask("Б123ВС77"));
        assert!(!is_valid_plate_mask("А1234ВС77"));
        assert!(!is_valid_plate_mask(""));
    }

    #[test]
    fn passport_lengths() {
        assert!(is_valid_passport(&Document::new("1234", "123456")));
        assert!(!is_valid_passport(&Document::new("123", "123456")));
        assert!(!is_valid_passport(&Document::new("123", "12345")));
        assert!(!is_valid_passport(&Document::new("1234", "1234567")));
        // Only the length is checked.
        assert!(is_valid_passport(&Document::new("12ab", "abcdef")));
    }

    #[test]
    fn plate_prefix_filtering() {
        for ok in ["", "А", "а1", "А12", "А123В", "А123ВС", "А123ВС7", "А123ВС777"] {
            assert!(is_plate_prefix(ok, false), "{ok}");
        }
        for bad in ["1", "АА", "А1234", "А123ВС7777", "*"] {
            assert!(!is_plate_prefix(bad, false), "{bad}");
        }
        for ok in ["*", "**", "А*2", "А123**", "А123ВС*", "А123ВС77"] {
            assert!(is_plate_prefix(ok, true), "{ok}");
        }
        assert!(!is_plate_prefix("А123ВС**", true));
    }
}
