use connect4_search::{AnytimeDriver, Player, SearchConfig, SearchError};
use std::time::Duration;

#[test]
fn test_config_builder_methods() {
    let config = SearchConfig::default()
        .with_time_budget(Duration::from_millis(250))
        .with_perspective(Player::Two)
        .with_exploration_constant(0.5)
        .with_depth(6)
        .with_seed(99);

    assert_eq!(config.time_budget, Duration::from_millis(250));
    assert_eq!(config.perspective, Player::Two);
    assert_eq!(config.exploration_constant, 0.5);
    assert_eq!(config.depth, 6);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_config_default_values() {
    let config = SearchConfig::default();

    // sqrt(2) gives the classic sqrt(2 ln N / n) exploration term
    assert!((config.exploration_constant - 1.414).abs() < 0.001);
    assert_eq!(config.time_budget, Duration::from_secs(1));
    assert_eq!(config.perspective, Player::One);
    assert_eq!(config.depth, 4);
    assert_eq!(config.seed, None);
}

#[test]
fn test_invalid_values_are_rejected() {
    let zero_budget = SearchConfig::default().with_time_budget(Duration::ZERO);
    assert!(matches!(
        zero_budget.validate(),
        Err(SearchError::InvalidConfiguration(_))
    ));

    let negative = SearchConfig::default().with_exploration_constant(-1.0);
    assert!(matches!(
        negative.validate(),
        Err(SearchError::InvalidConfiguration(_))
    ));

    let nan = SearchConfig::default().with_exploration_constant(f64::NAN);
    assert!(AnytimeDriver::new(&nan).is_err());
}

#[test]
fn test_depth_zero_is_accepted() {
    let config = SearchConfig::default().with_depth(0);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        SearchError::IllegalAction("column 9".to_string()).to_string(),
        "Illegal action: column 9"
    );
    assert_eq!(
        SearchError::EmptyRecommendation.to_string(),
        "No root action has statistics to recommend from"
    );
}
