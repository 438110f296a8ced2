//! Cat Catcher: tap the target before the round timer runs out.
//!
//! The engine itself is passive. The owner schedules a repeating task every
//! [`TICK_PERIOD`] and forwards each fire as [`TapGameEngine::tick`] tagged with
//! the generation returned by [`TapGameEngine::start`]. Ticks from an older
//! generation are ignored, so a late tick can never touch a newer round.

use std::collections::VecDeque;
use std::time::Duration;

use katphone_types::{DisplaySize, Point, TARGET_SIZE};

pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// Ticks per full round: the timer drains 0.05 per tick.
const STEPS_PER_ROUND: u32 = 20;

/// Source of uniform samples in `[0, 1)` for target placement.
pub trait SpawnSource {
    fn sample(&mut self) -> f32;
}

/// Thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl SpawnSource for ThreadRandom {
    fn sample(&mut self) -> f32 {
        rand::random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling. Used for deterministic rounds.
#[derive(Debug, Clone)]
pub struct SampleSequence {
    samples: VecDeque<f32>,
}

impl SampleSequence {
    #[must_use]
    pub fn new(samples: impl IntoIterator<Item = f32>) -> Self {
        let mut samples: VecDeque<f32> = samples.into_iter().collect();
        if samples.is_empty() {
            samples.push_back(0.5);
        }
        Self { samples }
    }
}

impl SpawnSource for SampleSequence {
    fn sample(&mut self) -> f32 {
        let next = self.samples.pop_front().unwrap_or(0.5);
        self.samples.push_back(next);
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

/// One in-progress game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRound {
    generation: Generation,
    target: Point,
    remaining_steps: u32,
    score: u32,
    misses: u32,
}

impl GameRound {
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Top-left corner of the target.
    #[must_use]
    pub fn target(&self) -> Point {
        self.target
    }

    /// Remaining round time as a fraction in `[0, 1]`.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining_steps as f32 / STEPS_PER_ROUND as f32
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Targets that timed out this session.
    #[must_use]
    pub fn misses(&self) -> u32 {
        self.misses
    }

    #[must_use]
    pub fn target_contains(&self, p: Point) -> bool {
        p.x >= self.target.x
            && p.x <= self.target.x + TARGET_SIZE
            && p.y >= self.target.y
            && p.y <= self.target.y + TARGET_SIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No round, or the tick belongs to an earlier round.
    Stale,
    Countdown,
    /// Timer ran out; target moved, no point scored.
    Respawned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Inactive,
    Hit { score: u32 },
    Miss,
}

pub struct TapGameEngine {
    display: DisplaySize,
    spawner: Box<dyn SpawnSource>,
    round: Option<GameRound>,
    next_generation: u64,
}

impl TapGameEngine {
    #[must_use]
    pub fn new(display: DisplaySize, spawner: Box<dyn SpawnSource>) -> Self {
        Self {
            display,
            spawner,
            round: None,
            next_generation: 0,
        }
    }

    #[must_use]
    pub fn round(&self) -> Option<&GameRound> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.round.is_some()
    }

    /// Begin a fresh round: score 0, full timer, target centered.
    pub fn start(&mut self) -> Generation {
        let generation = Generation(self.next_generation);
        self.next_generation += 1;
        self.round = Some(GameRound {
            generation,
            target: self.display.center_target(),
            remaining_steps: STEPS_PER_ROUND,
            score: 0,
            misses: 0,
        });
        tracing::debug!(generation = generation.0, "Game round started");
        generation
    }

    /// Discard the current round.
    pub fn stop(&mut self) -> Option<GameRound> {
        let round = self.round.take();
        if let Some(round) = &round {
            tracing::debug!(
                generation = round.generation.0,
                score = round.score,
                misses = round.misses,
                "Game round ended"
            );
        }
        round
    }

    pub fn tick(&mut self, generation: Generation) -> TickOutcome {
        let Some(round) = self.round.as_mut() else {
            return TickOutcome::Stale;
        };
        if round.generation != generation {
            return TickOutcome::Stale;
        }
        round.remaining_steps = round.remaining_steps.saturating_sub(1);
        if round.remaining_steps > 0 {
            return TickOutcome::Countdown;
        }
        round.misses += 1;
        round.remaining_steps = STEPS_PER_ROUND;
        let target = spawn_point(self.display, self.spawner.as_mut());
        round.target = target;
        TickOutcome::Respawned
    }

    /// Register a hit on the current target regardless of position.
    pub fn hit(&mut self) -> TapOutcome {
        let Some(round) = self.round.as_mut() else {
            return TapOutcome::Inactive;
        };
        round.score += 1;
        round.remaining_steps = STEPS_PER_ROUND;
        round.target = spawn_point(self.display, self.spawner.as_mut());
        TapOutcome::Hit { score: round.score }
    }

    /// Tap at a display position; scores only when it lands on the target.
    pub fn tap(&mut self, at: Point) -> TapOutcome {
        let on_target = match &self.round {
            None => return TapOutcome::Inactive,
            Some(round) => round.target_contains(at),
        };
        if on_target {
            self.hit()
        } else {
            TapOutcome::Miss
        }
    }
}

impl std::fmt::Debug for TapGameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapGameEngine")
            .field("display", &self.display)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

fn spawn_point(display: DisplaySize, spawner: &mut dyn SpawnSource) -> Point {
    let u = spawner.sample();
    let v = spawner.sample();
    display.play_bounds().lerp(u, v)
}
