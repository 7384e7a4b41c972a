//! Secondary acceptance checks for structurally matched candidates

use crate::detector::Kind;
use std::sync::Arc;

/// Decides whether a rule's candidate is a true positive
pub trait MatchValidator: Send + Sync {
    fn accepts(&self, candidate: &str) -> bool;
}

/// Card number check: 13-19 digits passing the Luhn checksum
#[derive(Debug, Clone, Copy, Default)]
pub struct LuhnValidator;

impl LuhnValidator {
    pub const MIN_DIGITS: usize = 13;
    pub const MAX_DIGITS: usize = 19;
}

impl MatchValidator for LuhnValidator {
    fn accepts(&self, candidate: &str) -> bool {
        let digits = only_digits(candidate);

        (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) && luhn_valid(&digits)
    }
}

/// Validator for a kind, if it has one
///
/// Kinds without an entry accept every structural match.
pub fn validator_for(kind: &Kind) -> Option<Arc<dyn MatchValidator>> {
    match kind {
        Kind::CreditCard => Some(Arc::new(LuhnValidator)),
        _ => None,
    }
}

/// ASCII digits of `text`, separators dropped
pub(crate) fn only_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Luhn checksum over a string of ASCII digits
pub(crate) fn luhn_valid(digits: &str) -> bool {
    let checksum: u32 = digits
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    checksum % 10 == 0
}
