//! Tests for detector kinds

use super::*;

#[test]
fn test_kind_names_round_trip() {
    for kind in Kind::CANONICAL_ORDER {
        assert_eq!(Kind::from_name(kind.name()), kind);
        assert!(kind.is_builtin());
    }
}

#[test]
fn test_unknown_name_is_custom() {
    let kind = Kind::from_name("api_key");
    assert_eq!(kind, Kind::Custom("api_key".to_string()));
    assert!(!kind.is_builtin());
    assert_eq!(kind.name(), "api_key");
}

#[test]
fn test_kind_names_are_case_sensitive() {
    assert_eq!(Kind::from_name("EMAIL"), Kind::Custom("EMAIL".to_string()));
}

#[test]
fn test_kind_tag_is_upper_cased() {
    assert_eq!(Kind::CreditCard.tag(), "CC");
    assert_eq!(Kind::Ipv6.tag(), "IPV6");
    assert_eq!(Kind::Custom("api_key".to_string()).tag(), "API_KEY");
}

#[test]
fn test_default_kinds() {
    let names: Vec<&str> = Kind::DEFAULTS.iter().map(Kind::name).collect();
    assert_eq!(names, vec!["email", "cc", "phone", "ipv4", "ipv6", "iban"]);
}

#[test]
fn test_canonical_order() {
    let names: Vec<&str> = Kind::CANONICAL_ORDER.iter().map(Kind::name).collect();
    assert_eq!(
        names,
        vec!["email", "cc", "phone", "cpf", "cnpj", "rg", "cep", "ipv4", "ipv6", "iban"]
    );
}

#[test]
fn test_locale_packs() {
    let brazil = Kind::locale_pack("br").unwrap();
    assert_eq!(brazil, &[Kind::Cpf, Kind::Cnpj, Kind::Cep, Kind::Rg]);
    assert!(Kind::locale_pack("xx").is_none());
    assert!(Kind::locale_pack("").is_none());
}

#[test]
fn test_kind_serialization() {
    let json = serde_json::to_string(&Kind::CreditCard).unwrap();
    assert_eq!(json, "\"cc\"");

    let custom: Kind = serde_json::from_str("\"api_key\"").unwrap();
    assert_eq!(custom, Kind::Custom("api_key".to_string()));

    let builtin: Kind = serde_json::from_str("\"iban\"").unwrap();
    assert_eq!(builtin, Kind::Iban);
}

#[test]
fn test_custom_pattern_serialization() {
    let pattern = CustomPattern::new("ticket", r"TCK-\d{6}");

    let json = serde_json::to_string(&pattern).unwrap();
    let deserialized: CustomPattern = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized, pattern);
    assert_eq!(deserialized.name, "ticket");
}
