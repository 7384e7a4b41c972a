//! Tests for policy resolution and planning

use super::*;

fn names(kinds: &[Kind]) -> Vec<&str> {
    kinds.iter().map(Kind::name).collect()
}

#[test]
fn test_blank_types_select_defaults() {
    let policy = ResolvedPolicy::resolve(&RedactionConfig::default()).unwrap();

    assert_eq!(
        names(&policy.plan()),
        vec!["email", "cc", "phone", "ipv4", "ipv6", "iban"]
    );

    let whitespace = RedactionConfig::default().with_types("   ");
    let policy = ResolvedPolicy::resolve(&whitespace).unwrap();
    assert_eq!(policy.plan().len(), 6);
}

#[test]
fn test_explicit_types_replace_defaults() {
    let config = RedactionConfig::default().with_types(" ipv4 , email ,,");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    // Canonical order, not declaration order.
    assert_eq!(names(&policy.plan()), vec!["email", "ipv4"]);
}

#[test]
fn test_locale_pack_is_unioned_with_explicit_types() {
    let config = RedactionConfig::default()
        .with_types("email")
        .with_locales("br");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    let expected: BTreeSet<String> = ["email", "cpf", "cnpj", "cep", "rg"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(policy.enabled_kinds(), expected);
    assert_eq!(
        names(&policy.plan()),
        vec!["email", "cpf", "cnpj", "rg", "cep"]
    );
}

#[test]
fn test_locale_pack_adds_to_defaults() {
    let config = RedactionConfig::default().with_locales("br");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(
        names(&policy.plan()),
        vec!["email", "cc", "phone", "cpf", "cnpj", "rg", "cep", "ipv4", "ipv6", "iban"]
    );
}

#[test]
fn test_unknown_locale_and_kind_names_are_ignored() {
    let config = RedactionConfig::default()
        .with_types("email,passport")
        .with_locales("xx, ,zz");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(names(&policy.plan()), vec!["email"]);
    assert!(policy.rule(&Kind::from_name("passport")).is_none());
}

#[test]
fn test_regional_kind_can_be_enabled_explicitly() {
    let config = RedactionConfig::default().with_types("cep");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(names(&policy.plan()), vec!["cep"]);
}

#[test]
fn test_customs_follow_builtins_in_declaration_order() {
    let config = RedactionConfig::default()
        .with_types("email")
        .with_custom_pattern("zeta", "Z[0-9]+")
        .with_custom_pattern("alpha", "A[0-9]+");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(names(&policy.plan()), vec!["email", "zeta", "alpha"]);
}

#[test]
fn test_customs_cannot_be_disabled_by_types() {
    let config = RedactionConfig::default()
        .with_types("email")
        .with_custom_pattern("ticket", "TCK-[0-9]+");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert!(policy.enabled_kinds().contains("ticket"));
}

#[test]
fn test_custom_with_builtin_name_appears_once() {
    let config = RedactionConfig::default()
        .with_types("email,phone")
        .with_custom_pattern("email", "[a-z]+@corp")
        .with_custom_pattern("ticket", "TCK-[0-9]+");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(names(&policy.plan()), vec!["email", "phone", "ticket"]);
}

#[test]
fn test_custom_with_builtin_name_enables_builtin_position() {
    let config = RedactionConfig::default()
        .with_types("email")
        .with_custom_pattern("ticket", "TCK-[0-9]+")
        .with_custom_pattern("iban", "IBAN[0-9]+");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(names(&policy.plan()), vec!["email", "iban", "ticket"]);
}

#[test]
fn test_duplicate_custom_names_keep_first_position() {
    let config = RedactionConfig::default()
        .with_types("email")
        .with_custom_pattern("one", "1")
        .with_custom_pattern("two", "2")
        .with_custom_pattern("one", "11");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(names(&policy.plan()), vec!["email", "one", "two"]);
}

#[test]
fn test_blank_custom_entries_are_dropped() {
    let config = RedactionConfig::default()
        .with_types("email")
        .with_custom_pattern("  ", "x")
        .with_custom_pattern("empty", "   ")
        .with_custom_pattern("  padded  ", "  P[0-9]  ");
    let policy = ResolvedPolicy::resolve(&config).unwrap();

    assert_eq!(names(&policy.plan()), vec!["email", "padded"]);
}

#[test]
fn test_invalid_custom_regex_is_fatal() {
    let config = RedactionConfig::default()
        .with_custom_pattern("fine", "ok")
        .with_custom_pattern("broken", "([a-z");

    let err = ResolvedPolicy::resolve(&config).err().unwrap();
    assert_eq!(err.kind(), "broken");
    assert!(err.to_string().starts_with("invalid custom regex for \"broken\""));
}

#[test]
fn test_redaction_config_deserialize_defaults() {
    let config: RedactionConfig = serde_json::from_str(r#"{"mode": "tag"}"#).unwrap();

    assert_eq!(config.mode, RedactionMode::Tag);
    assert!(config.salt.is_empty());
    assert!(config.types.is_empty());
    assert!(config.custom_patterns.is_empty());
}
