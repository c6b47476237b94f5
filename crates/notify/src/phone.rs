//! Mobile number normalization
//!
//! Providers only accept international format, while timesheet records hold
//! whatever the employee typed in. Everything is normalized to +<cc><digits>
//! before the first provider is contacted.

use buildflow_core::{Error, Result};

/// Country dialling settings used during normalization
#[derive(Debug, Clone)]
pub struct DiallingConfig {
    /// Country code digits without the leading plus (e.g. "61")
    pub country_code: String,
    /// National trunk prefix that the country code replaces (e.g. "0")
    pub trunk_prefix: String,
}

impl Default for DiallingConfig {
    fn default() -> Self {
        // Australian numbering plan
        Self {
            country_code: "61".to_string(),
            trunk_prefix: "0".to_string(),
        }
    }
}

/// Normalize a raw mobile number to international format
///
/// Strips whitespace and common punctuation, replaces a leading trunk prefix
/// with the country code, and prepends "+" (and the country code where
/// missing). Rejects anything that does not reduce to 8-15 digits.
pub fn normalize_phone(raw: &str, dialling: &DiallingConfig) -> Result<String> {
    let trimmed = raw.trim();
    let (has_plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !matches!(c, ' ' | '-' | '(' | ')' | '.') {
            return Err(Error::ValidationError(format!(
                "Invalid character '{}' in phone number: {}",
                c, raw
            )));
        }
    }

    if digits.is_empty() {
        return Err(Error::ValidationError(format!(
            "Phone number contains no digits: {}",
            raw
        )));
    }

    let normalized = if has_plus {
        format!("+{}", digits)
    } else if let Some(national) = digits.strip_prefix(&dialling.trunk_prefix) {
        format!("+{}{}", dialling.country_code, national)
    } else if digits.starts_with(&dialling.country_code) {
        format!("+{}", digits)
    } else {
        format!("+{}{}", dialling.country_code, digits)
    };

    // E.164 allows at most 15 digits; anything under 8 is not a real mobile
    let digit_count = normalized.len() - 1;
    if !(8..=15).contains(&digit_count) {
        return Err(Error::ValidationError(format!(
            "Phone number has {} digits after normalization: {}",
            digit_count, raw
        )));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn au() -> DiallingConfig {
        DiallingConfig::default()
    }

    #[test]
    fn test_trunk_prefix_replaced_with_country_code() {
        assert_eq!(
            normalize_phone("0412 345 678", &au()).unwrap(),
            "+61412345678"
        );
    }

    #[test]
    fn test_existing_plus_kept() {
        assert_eq!(
            normalize_phone("+61 412-345-678", &au()).unwrap(),
            "+61412345678"
        );
    }

    #[test]
    fn test_bare_country_code_gets_plus() {
        assert_eq!(normalize_phone("61412345678", &au()).unwrap(), "+61412345678");
    }

    #[test]
    fn test_national_digits_get_country_code() {
        assert_eq!(normalize_phone("412345678", &au()).unwrap(), "+61412345678");
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(
            normalize_phone("(04) 1234-5678", &au()).unwrap(),
            "+61412345678"
        );
    }

    #[test]
    fn test_letters_rejected() {
        assert!(normalize_phone("0412 CALL ME", &au()).is_err());
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(normalize_phone("0412", &au()).is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(normalize_phone("  ", &au()).is_err());
    }
}
