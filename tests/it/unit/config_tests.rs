//! Input configuration loaded through the public surface.

use sketchboard::InputConfig;

#[test]
fn test_empty_settings_yield_defaults() {
    let config: InputConfig = serde_json::from_str("{}").expect("empty object is valid");
    assert_eq!(config.drag_threshold_px, 4.0);
    assert_eq!(config.double_click_ms, 450);
    assert_eq!(config.double_click_tolerate_px, 8.0);
}

#[test]
fn test_overrides_survive_round_trip() {
    let config = InputConfig {
        drag_threshold_px: 6.0,
        ..Default::default()
    };
    let json = serde_json::to_string(&config).expect("serializable");
    let back: InputConfig = serde_json::from_str(&json).expect("round trip");
    assert_eq!(back.drag_threshold_px, 6.0);
    assert_eq!(back.double_click_ms, 450);
}
