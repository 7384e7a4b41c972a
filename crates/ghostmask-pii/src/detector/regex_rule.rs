//! Regex-backed matching rules: the built-in registry and runtime-compiled customs

use crate::detector::{Kind, MatchingRule};
use crate::error::ConfigurationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

// Digit classes are spelled `[0-9]` and word boundaries `(?-u:\b)` so that
// non-ASCII letters and digits neither match nor block a match.

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?-u:\b)[A-Z0-9._%+\-]+@[A-Z0-9.\-]+\.[A-Z]{2,}(?-u:\b)").expect("valid email regex")
});

// Deliberately loose: any 7+ digit grouping with optional country and area parts.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)(?:\+?[0-9]{1,3}[\t\n\f\r \-.]?)?(?:\(?[0-9]{2,4}\)?[\t\n\f\r \-.]?)?[0-9]{3,5}[\t\n\f\r \-.]?[0-9]{4}(?-u:\b)",
    )
    .expect("valid phone regex")
});

static CREDIT_CARD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)(?:[0-9][ -]*?){13,19}(?-u:\b)").expect("valid card regex"));

static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)(?:(?:25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])(?-u:\b)",
    )
    .expect("valid ipv4 regex")
});

static IPV6_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)(?:[A-F0-9]{1,4}:){7}[A-F0-9]{1,4}(?-u:\b)").expect("valid ipv6 regex")
});

static IBAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}(?-u:\b)").expect("valid iban regex")
});

static CPF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}(?-u:\b)").expect("valid cpf regex")
});

static CNPJ_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2}(?-u:\b)").expect("valid cnpj regex")
});

static RG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{1,2}\.[0-9]{3}\.[0-9]{3}-[0-9](?-u:\b)").expect("valid rg regex")
});

static CEP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9]{5}-?[0-9]{3}(?-u:\b)").expect("valid cep regex"));

fn spans(regex: &Regex, text: &str) -> Vec<Range<usize>> {
    regex.find_iter(text).map(|m| m.range()).collect()
}

/// Rule from the fixed built-in registry
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    regex: &'static Regex,
}

impl BuiltinRule {
    /// Look up the registry entry for a kind; `None` for custom kinds
    pub fn for_kind(kind: &Kind) -> Option<Self> {
        let regex: &'static Regex = match kind {
            Kind::Email => &*EMAIL_REGEX,
            Kind::CreditCard => &*CREDIT_CARD_REGEX,
            Kind::Phone => &*PHONE_REGEX,
            Kind::Cpf => &*CPF_REGEX,
            Kind::Cnpj => &*CNPJ_REGEX,
            Kind::Rg => &*RG_REGEX,
            Kind::Cep => &*CEP_REGEX,
            Kind::Ipv4 => &*IPV4_REGEX,
            Kind::Ipv6 => &*IPV6_REGEX,
            Kind::Iban => &*IBAN_REGEX,
            Kind::Custom(_) => return None,
        };

        Some(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl MatchingRule for BuiltinRule {
    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        spans(self.regex, text)
    }
}

/// Rule compiled at configuration time from a user-supplied source
#[derive(Debug, Clone)]
pub struct CustomRule {
    regex: Regex,
}

impl CustomRule {
    /// Compile `source` for the custom kind `name`
    pub fn compile(name: &str, source: &str) -> Result<Self, ConfigurationError> {
        let regex = Regex::new(source).map_err(|source| ConfigurationError::InvalidCustomPattern {
            kind: name.to_string(),
            source,
        })?;

        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl MatchingRule for CustomRule {
    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        spans(&self.regex, text)
    }
}
