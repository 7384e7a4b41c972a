//! Detector kinds and matching rules

mod regex_rule;

pub use regex_rule::{BuiltinRule, CustomRule};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Category of sensitive data targeted by a single matching rule
///
/// Built-in kinds form a closed set. Anything else is carried as
/// [`Kind::Custom`] with the user-chosen name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    /// Email address
    Email,

    /// Card number (13-19 digits, Luhn checked)
    CreditCard,

    /// Phone-number-shaped digit groups
    Phone,

    /// Brazilian individual taxpayer number
    Cpf,

    /// Brazilian company registration number
    Cnpj,

    /// Brazilian general registration (identity card) number
    Rg,

    /// Brazilian postal code
    Cep,

    /// IPv4 address
    Ipv4,

    /// IPv6 address (full eight-hextet form)
    Ipv6,

    /// International bank account number
    Iban,

    /// User-defined kind
    Custom(String),
}

impl Kind {
    /// Every built-in kind, in canonical application order.
    ///
    /// Registry declaration order and planning order are the same sequence.
    pub const CANONICAL_ORDER: [Kind; 10] = [
        Kind::Email,
        Kind::CreditCard,
        Kind::Phone,
        Kind::Cpf,
        Kind::Cnpj,
        Kind::Rg,
        Kind::Cep,
        Kind::Ipv4,
        Kind::Ipv6,
        Kind::Iban,
    ];

    /// Kinds enabled when no explicit kind list is configured
    pub const DEFAULTS: [Kind; 6] = [
        Kind::Email,
        Kind::CreditCard,
        Kind::Phone,
        Kind::Ipv4,
        Kind::Ipv6,
        Kind::Iban,
    ];

    /// Resolve a kind from its name. Unknown names become custom kinds.
    pub fn from_name(name: &str) -> Kind {
        match name {
            "email" => Kind::Email,
            "cc" => Kind::CreditCard,
            "phone" => Kind::Phone,
            "cpf" => Kind::Cpf,
            "cnpj" => Kind::Cnpj,
            "rg" => Kind::Rg,
            "cep" => Kind::Cep,
            "ipv4" => Kind::Ipv4,
            "ipv6" => Kind::Ipv6,
            "iban" => Kind::Iban,
            other => Kind::Custom(other.to_string()),
        }
    }

    /// Name used as lookup key and count key
    pub fn name(&self) -> &str {
        match self {
            Kind::Email => "email",
            Kind::CreditCard => "cc",
            Kind::Phone => "phone",
            Kind::Cpf => "cpf",
            Kind::Cnpj => "cnpj",
            Kind::Rg => "rg",
            Kind::Cep => "cep",
            Kind::Ipv4 => "ipv4",
            Kind::Ipv6 => "ipv6",
            Kind::Iban => "iban",
            Kind::Custom(name) => name,
        }
    }

    /// Upper-cased name used inside substitution markers
    pub fn tag(&self) -> String {
        self.name().to_uppercase()
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Kind::Custom(_))
    }

    /// Built-in kinds enabled by a locale pack; `None` for unknown packs.
    pub fn locale_pack(pack: &str) -> Option<&'static [Kind]> {
        static BRAZIL: [Kind; 4] = [Kind::Cpf, Kind::Cnpj, Kind::Cep, Kind::Rg];

        match pack {
            "br" => Some(&BRAZIL),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind::from_name(&name)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Custom(name) => name,
            builtin => builtin.name().to_string(),
        }
    }
}

/// A compiled pattern that enumerates candidate matches of one kind
///
/// Rules are stateless and built once; the engine reuses them for every input.
pub trait MatchingRule: Send + Sync {
    /// Byte ranges of all non-overlapping candidates, left to right
    fn find_spans(&self, text: &str) -> Vec<Range<usize>>;
}

/// User-supplied detector definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    /// Kind name reported in counts and tags
    pub name: String,

    /// Regex source, compiled when the engine is built
    pub regex: String,
}

impl CustomPattern {
    pub fn new(name: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regex: regex.into(),
        }
    }
}

#[cfg(test)]
mod tests;
