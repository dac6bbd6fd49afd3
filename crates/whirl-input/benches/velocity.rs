use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use whirl_input::{
    GestureEnd, GestureListener, PointerBatch, TouchPoint, TwoFingerGestureDetector,
    VelocityTracker1D,
};

const SAMPLE_COUNTS: &[usize] = &[4, 20];
const DRAG_BATCHES: usize = 120;

fn bench_velocity_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity_query");
    for &count in SAMPLE_COUNTS {
        group.bench_with_input(BenchmarkId::new("samples", count), &count, |b, &count| {
            let mut tracker = VelocityTracker1D::new();
            for step in 0..count as i64 {
                tracker.add_sample(step * 8, step as f32 * 12.0);
            }
            b.iter(|| black_box(tracker.velocity()));
        });
    }
    group.finish();
}

#[derive(Default)]
struct Sink {
    travelled: f32,
    released: f32,
}

impl GestureListener for Sink {
    fn on_moved(&mut self, _dx: f32, dy: f32, _delta_ms: i64) {
        self.travelled += dy;
    }

    fn on_up(&mut self, end: &GestureEnd) {
        self.released = end.y_velocity;
    }
}

fn drag_stream() -> Vec<PointerBatch> {
    let mut batches = Vec::with_capacity(DRAG_BATCHES + 2);
    batches.push(PointerBatch::down(TouchPoint::new(1, 240.0, 400.0), 0));
    for step in 1..=DRAG_BATCHES as i64 {
        batches.push(PointerBatch::moved(
            &[TouchPoint::new(1, 240.0, 400.0 + step as f32 * 18.0)],
            step * 16,
        ));
    }
    batches.push(PointerBatch::up(
        TouchPoint::new(1, 240.0, 400.0 + DRAG_BATCHES as f32 * 18.0),
        (DRAG_BATCHES as i64 + 1) * 16,
    ));
    batches
}

fn bench_drag_stream(c: &mut Criterion) {
    let batches = drag_stream();
    c.bench_function("detector_drag_stream", |b| {
        b.iter(|| {
            let mut detector = TwoFingerGestureDetector::new(Sink::default());
            for batch in &batches {
                detector.on_touch_event(black_box(batch));
            }
            black_box(detector.into_listener().released)
        });
    });
}

criterion_group!(velocity, bench_velocity_query, bench_drag_stream);
criterion_main!(velocity);
