//! Pointer velocity estimation for fling handoff.
//!
//! Velocity is computed with the impulse strategy: each pair of consecutive
//! samples transfers kinetic energy to a unit mass, and the reported velocity
//! is the speed of that mass after the whole window has been replayed. This
//! weights recent motion over stale motion and stays stable under the jitter
//! of real touch streams, where a two-sample instantaneous velocity does not.

/// Ring buffer capacity for tracked samples.
const HISTORY_SIZE: usize = 20;

/// Samples older than this relative to the newest are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer rested;
/// samples from before the rest no longer describe the current motion.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// One-dimensional velocity tracker over absolute positions.
///
/// Feed it `(time of sample, position)` pairs during a gesture and query the
/// velocity on release. Units out are `position units per second`, signed
/// with the direction of travel.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Records a position sample at the given monotonic time.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Computes the velocity in position units per second.
    ///
    /// Returns 0.0 when fewer than two usable samples exist, or when the
    /// newest samples are separated by a pointer rest.
    pub fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current_index = self.index;
        let mut previous_time_ms = newest.time_ms;

        while let Some(sample) = self.samples[current_index] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (previous_time_ms - sample.time_ms) as f32;
            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }
            previous_time_ms = sample.time_ms;

            positions[sample_count] = sample.position;
            times[sample_count] = -age;

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }
        }

        if sample_count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions, &times, sample_count) * 1000.0
    }

    /// Computes the velocity clamped into `[-max_velocity, max_velocity]`.
    pub fn velocity_capped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }

        let velocity = self.velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }

        velocity.clamp(-max_velocity, max_velocity)
    }

    /// Discards all recorded samples.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse-strategy velocity over `(position, relative time)` pairs, newest
/// first. Times are non-positive milliseconds relative to the newest sample.
fn impulse_velocity(
    positions: &[f32; HISTORY_SIZE],
    times: &[f32; HISTORY_SIZE],
    sample_count: usize,
) -> f32 {
    if sample_count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let oldest = sample_count - 1;
    let mut next_time = times[oldest];

    for i in (1..=oldest).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let segment_velocity = (positions[i] - positions[i - 1]) / (current_time - next_time);
        let accumulated = velocity_from_energy(work);
        work += (segment_velocity - accumulated) * segment_velocity.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    velocity_from_energy(work)
}

/// Inverts `E = v^2 / 2` for a unit mass, preserving the sign of the energy.
#[inline]
fn velocity_from_energy(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
