//! Time-driven animation primitives for the lock screen.

use std::time::Duration;

fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

/// Fixed-duration timer advanced by frame deltas.
#[derive(Debug, Clone)]
pub struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        normalized_progress(self.elapsed, self.duration)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

const SPRING_STIFFNESS: f32 = 100.0;
const SPRING_DAMPING: f32 = 10.0;
const SPRING_MASS: f32 = 1.0;
const SPRING_REST_THRESHOLD: f32 = 0.001;
const SPRING_STEP: Duration = Duration::from_millis(1);

/// Damped spring pulling a value back to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f32,
    velocity: f32,
}

impl Spring {
    #[must_use]
    pub fn new(position: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    #[must_use]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.position.abs() < SPRING_REST_THRESHOLD && self.velocity.abs() < SPRING_REST_THRESHOLD
    }

    /// Integrate in fixed 1ms steps; snaps to zero once at rest.
    pub fn advance(&mut self, delta: Duration) {
        let mut remaining = delta;
        let dt = SPRING_STEP.as_secs_f32();
        while remaining >= SPRING_STEP && !self.is_at_rest() {
            let force = -SPRING_STIFFNESS * self.position - SPRING_DAMPING * self.velocity;
            self.velocity += force / SPRING_MASS * dt;
            self.position += self.velocity * dt;
            remaining -= SPRING_STEP;
        }
        if self.is_at_rest() {
            self.position = 0.0;
            self.velocity = 0.0;
        }
    }
}
