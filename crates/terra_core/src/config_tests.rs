use super::*;

#[test]
fn test_default_rules() {
    let rules = RulesConfig::default();
    assert_eq!(rules.seating(GameMode::TwoNorthSouth).terrain_quota, 10);
    assert_eq!(rules.seating(GameMode::Alliance2v2).terrain_quota, 6);
    assert_eq!(rules.seating(GameMode::TwoEastWest).army.total(), 16);
    assert_eq!(rules.seating(GameMode::FourPlayer).army.total(), 15);
    assert_eq!(rules.two_player.tiles.total(), 12);
    assert!(!rules.mercenary);
}

#[test]
fn test_partial_toml_overrides_defaults() {
    let rules = RulesConfig::from_toml_str(
        r#"
        mercenary = true

        [two_player]
        terrain_quota = 8

        [two_player.tiles]
        desert = 0
        "#,
    )
    .unwrap();

    assert!(rules.mercenary);
    assert_eq!(rules.two_player.terrain_quota, 8);
    assert_eq!(rules.two_player.tiles.desert, 0);
    // unspecified tile counts fall back to zero inside an overridden table
    assert_eq!(rules.two_player.tiles.forest, 0);
    // untouched sections keep the built-in ruleset
    assert_eq!(rules.two_player.army, PieceCounts::standard(8));
    assert_eq!(rules.four_player, SeatingRules::four_player());
}

#[test]
fn test_rules_roundtrip_through_toml() {
    let rules = RulesConfig::default();
    let text = toml::to_string(&rules).unwrap();
    assert_eq!(RulesConfig::from_toml_str(&text).unwrap(), rules);
}

#[test]
fn test_invalid_rules_rejected() {
    let err = RulesConfig::from_toml_str("[four_player.army]\nking = 2\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = RulesConfig::from_toml_str("mercenary = \"yes\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_missing_file() {
    let err = RulesConfig::load("/nonexistent/rules.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
