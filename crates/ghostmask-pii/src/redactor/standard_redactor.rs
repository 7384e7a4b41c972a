//! Standard replacement strategy: mask, hash and tag

use crate::detector::Kind;
use crate::redactor::{RedactionMode, Replacement};
use crate::validator::only_digits;
use sha2::{Digest, Sha256};

/// Number of trailing digits left visible by card and phone masks
const VISIBLE_DIGITS: usize = 4;

/// Number of digest bytes rendered in hash markers
const DIGEST_BYTES: usize = 8;

const MASK_CHAR: char = '*';

/// Standard implementation of the replacement strategy
#[derive(Debug, Clone, Default)]
pub struct StandardReplacement {
    mode: RedactionMode,
    salt: String,
}

impl StandardReplacement {
    /// Create a replacement strategy; `salt` only matters in hash mode
    pub fn new(mode: RedactionMode, salt: impl Into<String>) -> Self {
        Self {
            mode,
            salt: salt.into(),
        }
    }

    fn hash(&self, kind: &Kind, matched: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(matched.as_bytes());
        let digest = hasher.finalize();

        format!("<{}:{}>", kind.tag(), hex::encode(&digest[..DIGEST_BYTES]))
    }

    fn mask(&self, kind: &Kind, matched: &str) -> String {
        let masked = match kind {
            Kind::Email => mask_email(matched),
            Kind::CreditCard => mask_card(matched),
            Kind::Phone => Some(mask_keep_last_digits(matched, VISIBLE_DIGITS, MASK_CHAR)),
            _ => None,
        };

        masked.unwrap_or_else(|| tag(kind))
    }
}

impl Replacement for StandardReplacement {
    fn replace(&self, kind: &Kind, matched: &str) -> String {
        match self.mode {
            RedactionMode::Hash => self.hash(kind, matched),
            RedactionMode::Tag => tag(kind),
            RedactionMode::Mask => self.mask(kind, matched),
        }
    }

    fn mode(&self) -> RedactionMode {
        self.mode
    }
}

fn tag(kind: &Kind) -> String {
    format!("<{}>", kind.tag())
}

/// Keep the first local-part character and the domain.
/// `None` when the local part has fewer than two characters.
fn mask_email(matched: &str) -> Option<String> {
    let at = matched.find('@')?;
    let (local, domain) = matched.split_at(at);

    let mut chars = local.chars();
    let first = chars.next()?;
    let hidden = chars.count();
    if hidden == 0 {
        return None;
    }

    let mut masked = String::with_capacity(matched.len());
    masked.push(first);
    masked.extend(std::iter::repeat_n(MASK_CHAR, hidden));
    masked.push_str(domain);
    Some(masked)
}

/// Sized by digit count, separators dropped. `None` below four digits.
fn mask_card(matched: &str) -> Option<String> {
    let digits = only_digits(matched);
    if digits.len() < VISIBLE_DIGITS {
        return None;
    }

    let hidden = digits.len() - VISIBLE_DIGITS;
    Some(format!("{}{}", "*".repeat(hidden), &digits[hidden..]))
}

/// Replace every digit except the last `keep` with `mask`, leaving
/// length and non-digit characters untouched.
fn mask_keep_last_digits(text: &str, keep: usize, mask: char) -> String {
    let mut seen = 0;
    let mut chars: Vec<char> = text.chars().collect();

    for c in chars.iter_mut().rev() {
        if c.is_ascii_digit() {
            if seen < keep {
                seen += 1;
            } else {
                *c = mask;
            }
        }
    }

    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask() -> StandardReplacement {
        StandardReplacement::new(RedactionMode::Mask, "")
    }

    #[test]
    fn test_mask_email() {
        let replacement = mask();
        assert_eq!(replacement.replace(&Kind::Email, "ab@example.com"), "a*@example.com");
        assert_eq!(
            replacement.replace(&Kind::Email, "john.doe@example.com"),
            "j*******@example.com"
        );
    }

    #[test]
    fn test_mask_email_short_local_part_falls_back_to_tag() {
        let replacement = mask();
        assert_eq!(replacement.replace(&Kind::Email, "a@example.com"), "<EMAIL>");
        assert_eq!(replacement.replace(&Kind::Email, "@example.com"), "<EMAIL>");
        assert_eq!(replacement.replace(&Kind::Email, "no-at-sign"), "<EMAIL>");
    }

    #[test]
    fn test_mask_card_uses_digit_count() {
        let replacement = mask();
        assert_eq!(
            replacement.replace(&Kind::CreditCard, "4539 1488 0343 6467"),
            "************6467"
        );
        assert_eq!(
            replacement.replace(&Kind::CreditCard, "4539-1488-0343-6467"),
            "************6467"
        );
    }

    #[test]
    fn test_mask_card_too_few_digits() {
        assert_eq!(mask().replace(&Kind::CreditCard, "1-2-3"), "<CC>");
        assert_eq!(mask().replace(&Kind::CreditCard, "1234"), "1234");
    }

    #[test]
    fn test_mask_phone_keeps_shape() {
        let replacement = mask();
        assert_eq!(replacement.replace(&Kind::Phone, "555-123-4567"), "***-***-4567");
        assert_eq!(
            replacement.replace(&Kind::Phone, "+1 (555) 123-4567"),
            "+* (***) ***-4567"
        );
        assert_eq!(replacement.replace(&Kind::Phone, "123"), "123");
    }

    #[test]
    fn test_mask_generic_kinds_fall_back_to_tag() {
        let replacement = mask();
        assert_eq!(replacement.replace(&Kind::Ipv4, "10.0.0.1"), "<IPV4>");
        assert_eq!(replacement.replace(&Kind::Cpf, "123.456.789-09"), "<CPF>");
        assert_eq!(
            replacement.replace(&Kind::Custom("api_key".to_string()), "sk-123"),
            "<API_KEY>"
        );
    }

    #[test]
    fn test_tag_mode() {
        let replacement = StandardReplacement::new(RedactionMode::Tag, "ignored");
        assert_eq!(replacement.replace(&Kind::Email, "ab@example.com"), "<EMAIL>");
        assert_eq!(replacement.replace(&Kind::CreditCard, "4539148803436467"), "<CC>");
        assert_eq!(replacement.mode(), RedactionMode::Tag);
    }

    #[test]
    fn test_hash_mode_format() {
        let replacement = StandardReplacement::new(RedactionMode::Hash, "pepper");
        let out = replacement.replace(&Kind::Email, "ab@example.com");

        assert!(out.starts_with("<EMAIL:"));
        assert!(out.ends_with('>'));
        let hex = &out["<EMAIL:".len()..out.len() - 1];
        assert_eq!(hex.len(), 16);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_hash_known_digest() {
        // sha256("abc") = ba7816bf8f01cfea...
        let replacement = StandardReplacement::new(RedactionMode::Hash, "");
        assert_eq!(
            replacement.replace(&Kind::Custom("x".to_string()), "abc"),
            "<X:ba7816bf8f01cfea>"
        );

        // The salt is prepended to the matched text.
        let salted = StandardReplacement::new(RedactionMode::Hash, "a");
        assert_eq!(
            salted.replace(&Kind::Custom("x".to_string()), "bc"),
            "<X:ba7816bf8f01cfea>"
        );
    }

    #[test]
    fn test_hash_is_deterministic_and_salted() {
        let first = StandardReplacement::new(RedactionMode::Hash, "salt-1");
        let again = StandardReplacement::new(RedactionMode::Hash, "salt-1");
        let other = StandardReplacement::new(RedactionMode::Hash, "salt-2");

        let value = "john@example.com";
        assert_eq!(
            first.replace(&Kind::Email, value),
            again.replace(&Kind::Email, value)
        );
        assert_ne!(
            first.replace(&Kind::Email, value),
            other.replace(&Kind::Email, value)
        );
    }
}
