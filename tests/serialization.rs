// tests/serialization.rs
use symbios_dol::{PatternTokenizer, Rules, SystemConfig, TokenKind};

#[test]
fn test_rules_serialize_in_registration_order() {
    let rules = Rules::new().with("X", "F[+X]").with("F", "FF").with("X", "F[-X]");
    let json = serde_json::to_string(&rules).unwrap();
    assert_eq!(
        json,
        r#"[{"from":"X","to":"F[-X]"},{"from":"F","to":"FF"}]"#
    );

    let back: Rules = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rules);
    assert_eq!(back.position("F"), Some(1));
}

#[test]
fn test_rules_load_from_host_config() {
    let json = r#"[{"from":"A","to":"AB"},{"from":"B","to":"A"},{"from":"A","to":"B"}]"#;
    let rules: Rules = serde_json::from_str(json).unwrap();
    // Later duplicates overwrite silently.
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.get("A"), Some("B"));
}

#[test]
fn test_tokens_serialize_for_turtle_consumers() {
    let tokens = PatternTokenizer::standard().scan("F%2").unwrap();
    let json = serde_json::to_value(&tokens).unwrap();
    assert_eq!(json[1]["kind"], "Color");
    assert_eq!(json[1]["text"], "%2");
    assert_eq!(json[1]["offset"], 1);
    assert_eq!(tokens[0].kind, TokenKind::MoveDraw);
}

#[test]
fn test_config_defaults_round_trip() {
    let config = SystemConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: SystemConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert!(back.step_delay.is_zero());
}
