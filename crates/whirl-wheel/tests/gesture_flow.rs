//! End-to-end flows from pointer batches through gesture detection,
//! inertia, and snapping.

use whirl_testing::WheelRobot;
use whirl_wheel::WheelConfig;

fn ten_items() -> Vec<&'static str> {
    vec![
        "item-0", "item-1", "item-2", "item-3", "item-4", "item-5", "item-6", "item-7", "item-8",
        "item-9",
    ]
}

#[test]
fn resisted_overscroll_drag_recovers_after_release() {
    let mut robot = WheelRobot::new(
        WheelConfig::default(),
        &["alpha", "bravo", "charlie", "delta", "echo"],
        600.0,
    );
    let engine = robot.engine();

    // Dragging down from the first item leaves the valid range, so every
    // step lands at a quarter of its raw distance.
    robot.press(100.0, 100.0);
    robot.move_by(0.0, 110.0);
    robot.move_by(0.0, 110.0);
    robot.move_by(0.0, 110.0);
    assert_eq!(engine.offset_px(), 82.5);
    assert!(engine.angle_deg() < -9.0);

    // The release velocity points further out; the bounds check wins.
    robot.release();
    let ticks = robot.run_until_idle(50);

    assert_eq!(ticks, 6);
    robot.recording().assert_settled_once_on(0);
    assert_eq!(robot.recording().last_settle(), Some((0, "alpha".to_string())));
    assert!(robot.recording().min_angle_deg() < -9.0);
    assert!(engine.angle_deg().abs() < 1e-3);
    assert_eq!(engine.velocity(), 0.0);
}

#[test]
fn fling_into_the_far_bound_overshoots_and_recovers() {
    let mut robot = WheelRobot::new(
        WheelConfig::default(),
        &["alpha", "bravo", "charlie", "delta", "echo"],
        600.0,
    );
    let engine = robot.engine();

    robot.swipe(100.0, 400.0, 0.0, -60.0, 2);
    robot.run_until_idle(100);

    // Five items span 60 degrees; the fling carries past it and the
    // recovery pulls back onto the last item.
    assert!(robot.recording().max_angle_deg() > 60.2);
    robot.recording().assert_settled_once_on(4);
    assert_eq!(robot.recording().last_settle(), Some((4, "echo".to_string())));
    assert!((engine.angle_deg() - 60.0).abs() < 1e-3);
}

#[test]
fn data_swap_mid_fling_cancels_cleanly() {
    let mut robot = WheelRobot::new(WheelConfig::default(), &ten_items(), 600.0);
    let engine = robot.engine();

    robot.swipe(100.0, 400.0, 0.0, -120.0, 4);
    robot.tick(3);
    assert!(engine.is_animating());

    engine.set_data(vec!["x".into(), "y".into(), "z".into()]);
    assert!(robot.idle());
    assert_eq!(engine.offset_px(), 0.0);
    assert_eq!(engine.velocity(), 0.0);
    assert_eq!(robot.recording().settles(), vec![(0, "x".to_string())]);

    // Nothing left to run.
    robot.tick(5);
    assert_eq!(engine.angle_deg(), 0.0);
    assert_eq!(robot.recording().settle_count(), 1);
}

#[test]
fn set_item_during_animation_parks_immediately() {
    let mut robot = WheelRobot::new(WheelConfig::default(), &ten_items(), 600.0);
    let engine = robot.engine();

    robot.swipe(100.0, 400.0, 0.0, -120.0, 4);
    robot.tick(2);
    assert!(engine.is_animating());

    engine.set_item(7).unwrap();
    assert!(robot.idle());
    assert_eq!(engine.velocity(), 0.0);
    assert_eq!(engine.current_index(), 7);
    assert!((engine.angle_deg() - 105.0).abs() < 1e-3);
    assert_eq!(robot.recording().last_settle(), Some((7, "item-7".to_string())));
}

#[test]
fn deferred_selection_applies_once_layout_arrives() {
    let robot = WheelRobot::uncalibrated(WheelConfig::default(), &ten_items());
    let engine = robot.engine();
    robot.recording().clear();

    engine.set_item(4).unwrap();
    assert_eq!(engine.current_index(), 4);
    assert_eq!(engine.offset_px(), 0.0);

    engine.calibrate(600.0).unwrap();
    assert_eq!(engine.current_index(), 4);
    assert!((engine.angle_deg() - 60.0).abs() < 1e-3);
    assert_eq!(
        robot.recording().settles(),
        vec![(4, "item-4".to_string()), (4, "item-4".to_string())]
    );
}
