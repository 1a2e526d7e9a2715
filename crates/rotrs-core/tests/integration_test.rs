// Rotrs Integration Tests
//
// Config -> processor chains -> events, without touching real devices.
//
// Run with: cargo test -p rotrs-core --test integration_test

use rotrs_core::input::event::{EV_KEY, EV_REL, REL_WHEEL};
use rotrs_core::{
    lookup_sin_cos, Config, Disposition, InputEvent, InputProcessor, ProcessorChain,
    RotationConfig, SensorRotation,
};

fn quarter_turn_config() -> Config {
    Config::from_toml(
        r#"
[[sensor]]
name = "quarter"
rotation_angle = 90
"#,
    )
    .unwrap()
}

#[test]
fn test_quarter_turn_sequence_from_config() {
    let config = quarter_turn_config();
    let mut chain = config.build_chain("Mouse", "/dev/input/event4");
    assert_eq!(chain.len(), 1);

    // X=100 against stored Y=0: x' = (100*0 - 0*1000)/1000
    let mut x = InputEvent::rel_x(100);
    assert_eq!(chain.process(&mut x), Disposition::Handled);
    assert_eq!(x.value, 0);

    // Y=50 against stored raw X=100: y' = (100*1000 + 50*0)/1000
    let mut y = InputEvent::rel_y(50);
    assert_eq!(chain.process(&mut y), Disposition::Handled);
    assert_eq!(y.value, 100);

    // Next X pairs with raw Y=50: x' = (7*0 - 50*1000)/1000
    let mut x = InputEvent::rel_x(7);
    chain.process(&mut x);
    assert_eq!(x.value, -50);
}

#[test]
fn test_processor_initializes_from_config_angle() {
    for angle in [-725, -90, 0, 33, 90, 181, 359, 1085] {
        let proc = SensorRotation::new("p", RotationConfig::new(angle));
        assert_eq!(proc.state().coefficients(), lookup_sin_cos(angle));
        assert_eq!((proc.state().x(), proc.state().y()), (0, 0));
    }
}

#[test]
fn test_unrecognized_events_continue_unchanged() {
    let mut proc = SensorRotation::new("p", RotationConfig::new(135));
    let originals = [
        InputEvent::new(EV_REL, REL_WHEEL, 3),
        InputEvent::new(EV_KEY, 0x110, 1),
        InputEvent::new(0x03, 0x00, 1024),
        InputEvent::syn_report(),
        InputEvent::new(EV_REL, 0x7f, i32::MIN),
    ];
    for original in originals {
        let mut event = original;
        assert_eq!(proc.handle_event(&mut event), Disposition::Continue);
        assert_eq!(event, original);
    }
}

#[test]
fn test_chain_order_follows_config_order() {
    let config = Config::from_toml(
        r#"
[[sensor]]
name = "mount"
rotation_angle = 30
devices = ["Trackball"]

[[sensor]]
name = "global"
rotation_angle = 0

[[sensor]]
name = "elsewhere"
rotation_angle = 90
devices = ["Touchpad"]
"#,
    )
    .unwrap();

    let chain = config.build_chain("Trackball", "/dev/input/event3");
    assert_eq!(chain.names(), vec!["mount", "global"]);

    let chain = config.build_chain("Mouse", "/dev/input/event8");
    assert_eq!(chain.names(), vec!["global"]);
}

#[test]
fn test_unmatched_device_gets_empty_chain() {
    let config = Config::single(45, vec!["Trackball".to_string()]);
    let mut chain: ProcessorChain = config.build_chain("Mouse", "/dev/input/event8");
    assert!(chain.is_empty());

    let mut x = InputEvent::rel_x(12);
    assert_eq!(chain.process(&mut x), Disposition::Continue);
    assert_eq!(x.value, 12);
}

#[test]
fn test_rotating_back_is_close_but_not_exact() {
    let mut forward = SensorRotation::new("fwd", RotationConfig::new(45));
    let mut back = SensorRotation::new("back", RotationConfig::new(-45));

    // Prime both stages with a full report so each axis has a partner value
    let mut x = InputEvent::rel_x(100);
    let mut y = InputEvent::rel_y(0);
    forward.handle_event(&mut x);
    forward.handle_event(&mut y);
    back.handle_event(&mut x);
    back.handle_event(&mut y);

    let mut x = InputEvent::rel_x(100);
    let mut y = InputEvent::rel_y(0);
    forward.handle_event(&mut x);
    forward.handle_event(&mut y);
    assert_eq!((x.value, y.value), (70, 70));

    back.handle_event(&mut x);
    back.handle_event(&mut y);
    assert!((x.value - 100).abs() <= 2, "x came back as {}", x.value);
    assert!(y.value.abs() <= 2, "y came back as {}", y.value);
    assert_ne!((x.value, y.value), (100, 0));
}
