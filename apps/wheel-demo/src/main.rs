//! Scripted tour of the picker wheel, driven exactly like a host app
//! would drive it: pointer batches in, the runtime's paced pump between
//! gestures, observer notifications out.

use std::rc::Rc;

use whirl_input::{PointerBatch, TouchPoint};
use whirl_runtime_std::StdRuntime;
use whirl_wheel::{WheelConfig, WheelController, WheelEngine, WheelObserver};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

struct LoggingObserver;

impl WheelObserver for LoggingObserver {
    fn on_offset_changed(&self, offset_px: f32, angle_deg: f32) {
        log::debug!("offset {offset_px:.1} px ({angle_deg:.2} deg)");
    }

    fn on_settled(&self, index: usize, label: &str) {
        log::info!("settled on item {index}: {label:?}");
    }
}

/// Synthesizes the pointer stream of a single vertical finger.
struct Finger {
    point: TouchPoint,
    time_ms: i64,
}

impl Finger {
    fn press(controller: &mut WheelController, x: f32, y: f32, time_ms: i64) -> Self {
        let point = TouchPoint { id: 0, x, y };
        controller.handle_batch(&PointerBatch::down(point, time_ms));
        Self { point, time_ms }
    }

    fn move_by(&mut self, controller: &mut WheelController, dy: f32) {
        self.point.y += dy;
        self.time_ms += 16;
        controller.handle_batch(&PointerBatch::moved(&[self.point], self.time_ms));
    }

    fn release(self, controller: &mut WheelController) -> i64 {
        let time_ms = self.time_ms + 16;
        controller.handle_batch(&PointerBatch::up(self.point, time_ms));
        time_ms
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Whirl Picker Wheel Demo ===");
    println!("A month picker driven by synthesized touch input.");
    println!("Set RUST_LOG=debug to watch every offset change.");
    println!();

    let std_runtime = StdRuntime::new();
    let engine = WheelEngine::new(std_runtime.runtime_handle(), WheelConfig::default())
        .expect("default wheel config is valid");
    engine.set_observer(Some(Rc::new(LoggingObserver) as Rc<dyn WheelObserver>));
    engine.set_data(MONTHS.iter().map(|month| month.to_string()).collect());
    engine
        .calibrate(600.0)
        .expect("600 px viewport is valid");
    log::info!(
        "calibrated: radius {:.1} px, pitch {} deg, range 0..{} deg",
        engine.wheel_radius_px().unwrap_or(0.0),
        engine.pitch_deg(),
        engine.max_offset_deg()
    );

    let mut controller = WheelController::new(engine.clone());
    controller.set_pinch_listener(|delta| log::info!("pinch delta {delta:+.1} px"));

    println!("-- slow drag, then rest before lifting: snaps without inertia");
    let mut finger = Finger::press(&mut controller, 160.0, 500.0, 0);
    for _ in 0..4 {
        finger.move_by(&mut controller, -20.0);
    }
    finger.time_ms += 60;
    let mut time_ms = finger.release(&mut controller);
    std_runtime.pump_until_idle();
    print_window(&engine);

    println!("-- flick: inertia, decay, snap");
    let mut finger = Finger::press(&mut controller, 160.0, 500.0, time_ms + 100);
    for _ in 0..5 {
        finger.move_by(&mut controller, -28.0);
    }
    time_ms = finger.release(&mut controller);
    std_runtime.pump_until_idle();
    print_window(&engine);

    println!("-- hard downward flick from the top: resistance and recovery");
    engine.set_item(0).expect("first item is reachable");
    let mut finger = Finger::press(&mut controller, 160.0, 200.0, time_ms + 100);
    for _ in 0..5 {
        finger.move_by(&mut controller, 90.0);
    }
    time_ms = finger.release(&mut controller);
    std_runtime.pump_until_idle();
    print_window(&engine);

    println!("-- two-finger spread reaches the pinch hook");
    let primary = TouchPoint { id: 0, x: 120.0, y: 400.0 };
    let mut secondary = TouchPoint { id: 1, x: 220.0, y: 400.0 };
    time_ms += 100;
    controller.handle_batch(&PointerBatch::down(primary, time_ms));
    controller.handle_batch(&PointerBatch::pointer_down(&[primary, secondary], 1, time_ms + 16));
    secondary.x += 30.0;
    controller.handle_batch(&PointerBatch::moved(&[primary, secondary], time_ms + 32));
    controller.handle_batch(&PointerBatch::pointer_up(&[primary, secondary], 1, time_ms + 48));
    controller.handle_batch(&PointerBatch::up(primary, time_ms + 64));
    std_runtime.pump_until_idle();

    println!("-- direct selection");
    engine.set_item(11).expect("December is reachable");
    print_window(&engine);

    println!("done, resting on {:?}", MONTHS[engine.current_index().min(11)]);
}

/// Prints the items around the centered one, the way a renderer would lay
/// them out along the wheel arc.
fn print_window(engine: &WheelEngine) {
    for slot in -2..=2 {
        let label = engine.window_label(slot);
        if slot == 0 {
            println!("  > {label} <");
        } else {
            println!("    {label}");
        }
    }
    println!();
}
