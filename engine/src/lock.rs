//! Swipe-to-unlock gesture on the lock screen.
//!
//! Offsets are vertical display units; negative is upward.

use std::time::Duration;

use crate::animation::{EffectTimer, Spring, ease_in_out};

/// Upward travel past which a release unlocks.
pub const UNLOCK_THRESHOLD: f32 = 100.0;
pub const UNLOCK_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
enum LockPhase {
    Idle,
    Dragging { origin: f32, offset: f32 },
    Unlocking { from: f32, timer: EffectTimer },
    Settling { spring: Spring },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No drag was in progress.
    Ignored,
    /// Unlock animation started.
    Unlocking,
    /// Unlock completed immediately (reduced motion).
    Unlocked,
    /// Not far enough; springing back.
    SettlingBack,
}

#[derive(Debug, Clone)]
pub struct LockScreenController {
    phase: LockPhase,
    display_height: f32,
    reduced_motion: bool,
}

impl LockScreenController {
    #[must_use]
    pub fn new(display_height: f32, reduced_motion: bool) -> Self {
        Self {
            phase: LockPhase::Idle,
            display_height,
            reduced_motion,
        }
    }

    /// Current translation of the lock screen content.
    #[must_use]
    pub fn offset(&self) -> f32 {
        match &self.phase {
            LockPhase::Idle => 0.0,
            LockPhase::Dragging { offset, .. } => *offset,
            LockPhase::Unlocking { from, timer } => {
                let t = ease_in_out(timer.progress());
                from + (-self.display_height - from) * t
            }
            LockPhase::Settling { spring } => spring.position(),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, LockPhase::Dragging { .. })
    }

    #[must_use]
    pub fn is_unlocking(&self) -> bool {
        matches!(self.phase, LockPhase::Unlocking { .. })
    }

    /// Start tracking a gesture at vertical position `y`. Replaces any gesture
    /// or spring in progress; ignored while the unlock animation runs.
    pub fn begin_drag(&mut self, y: f32) {
        if self.is_unlocking() {
            return;
        }
        self.phase = LockPhase::Dragging {
            origin: y,
            offset: 0.0,
        };
    }

    /// Follow the pointer 1:1.
    pub fn drag_to(&mut self, y: f32) {
        if let LockPhase::Dragging { origin, offset } = &mut self.phase {
            *offset = y - *origin;
        }
    }

    pub fn release(&mut self) -> ReleaseOutcome {
        let LockPhase::Dragging { offset, .. } = self.phase else {
            return ReleaseOutcome::Ignored;
        };
        if offset < -UNLOCK_THRESHOLD {
            return self.start_unlock(offset);
        }
        tracing::debug!(offset, "Unlock gesture too short");
        if self.reduced_motion {
            self.phase = LockPhase::Idle;
        } else {
            self.phase = LockPhase::Settling {
                spring: Spring::new(offset),
            };
        }
        ReleaseOutcome::SettlingBack
    }

    /// The "swipe up to unlock" button: unlock without a gesture.
    pub fn tap_unlock(&mut self) -> ReleaseOutcome {
        if self.is_unlocking() {
            return ReleaseOutcome::Ignored;
        }
        let from = self.offset();
        self.start_unlock(from)
    }

    fn start_unlock(&mut self, from: f32) -> ReleaseOutcome {
        if self.reduced_motion {
            self.phase = LockPhase::Idle;
            return ReleaseOutcome::Unlocked;
        }
        self.phase = LockPhase::Unlocking {
            from,
            timer: EffectTimer::new(UNLOCK_DURATION),
        };
        ReleaseOutcome::Unlocking
    }

    /// Advance animations. Returns true when the unlock animation completes;
    /// the offset is back at zero by then.
    pub fn advance(&mut self, delta: Duration) -> bool {
        match &mut self.phase {
            LockPhase::Unlocking { timer, .. } => {
                timer.advance(delta);
                if timer.is_finished() {
                    self.phase = LockPhase::Idle;
                    return true;
                }
            }
            LockPhase::Settling { spring } => {
                spring.advance(delta);
                if spring.is_at_rest() {
                    self.phase = LockPhase::Idle;
                }
            }
            LockPhase::Idle | LockPhase::Dragging { .. } => {}
        }
        false
    }

    /// Drop any gesture or animation, e.g. when the phone is locked again.
    pub fn reset(&mut self) {
        self.phase = LockPhase::Idle;
    }
}
