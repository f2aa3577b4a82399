use valve_stream::{BufferConfig, StreamError};

#[test]
fn test_default_config() {
    let config = BufferConfig::default();
    assert_eq!(config.initial_capacity, 64);
    assert_eq!(config.max_capacity, Some(1024 * 1024));
    assert!(config.validate().is_ok());
    assert_eq!(BufferConfig::new(), config);
}

#[test]
fn test_builder() {
    let config = BufferConfig::new().initial_capacity(8).max_capacity(32);
    assert_eq!(config.initial_capacity, 8);
    assert_eq!(config.max_capacity, Some(32));

    // the initial capacity is lowered to fit under a small maximum
    let clamped = BufferConfig::new().max_capacity(10);
    assert_eq!(clamped.initial_capacity, 10);
    assert!(clamped.validate().is_ok());

    let unbounded = BufferConfig::unbounded();
    assert_eq!(unbounded.max_capacity, None);
    assert!(unbounded.initial_capacity(1_000_000).validate().is_ok());
}

#[test]
fn test_validate_rejects_initial_above_max() {
    let config = BufferConfig { initial_capacity: 20, max_capacity: Some(10) };
    match config.validate() {
        Err(StreamError::InvalidConfig(message)) => {
            assert!(message.contains("20"));
            assert!(message.contains("10"));
        }
        other => panic!("Expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn test_from_json() {
    let config = BufferConfig::from_json(r#"{"initial_capacity": 4, "max_capacity": 16}"#).unwrap();
    assert_eq!(config, BufferConfig { initial_capacity: 4, max_capacity: Some(16) });

    let partial = BufferConfig::from_json(r#"{"max_capacity": null}"#).unwrap();
    assert_eq!(partial.initial_capacity, 64);
    assert_eq!(partial.max_capacity, None);

    let defaults = BufferConfig::from_json("{}").unwrap();
    assert_eq!(defaults, BufferConfig::default());
}

#[test]
fn test_from_json_errors() {
    let parse = BufferConfig::from_json("not json");
    assert!(matches!(parse, Err(StreamError::Config(_))));

    let invalid = BufferConfig::from_json(r#"{"initial_capacity": 100, "max_capacity": 5}"#);
    assert!(matches!(invalid, Err(StreamError::InvalidConfig(_))));
}

#[test]
fn test_serialize_round_trip() {
    let config = BufferConfig::new().max_capacity(256);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(BufferConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_error_display() {
    let err = StreamError::CapacityExceeded { limit: 3 };
    assert_eq!(err.to_string(), "Buffer capacity exceeded: more than 3 elements");
}
