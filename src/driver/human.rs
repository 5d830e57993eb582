//! Human-behavior plans for browser drivers
//!
//! A plan is a short script of pointer moves, scroll oscillations and
//! pauses. It is generated up front so the random generator never lives
//! across an await point.

use rand::Rng;
use std::time::Duration;

/// Viewport area the pointer wanders over
const VIEWPORT_WIDTH: f64 = 1280.0;
const VIEWPORT_HEIGHT: f64 = 800.0;

/// One step of simulated reading behavior
#[derive(Debug, Clone, PartialEq)]
pub enum HumanStep {
    /// Move the pointer to viewport coordinates
    MoveMouse { x: f64, y: f64 },

    /// Scroll vertically by this many pixels (negative scrolls up)
    Scroll(i32),

    /// Do nothing for a while
    Pause(Duration),
}

/// Generates a plan using the thread-local generator
pub fn plan() -> Vec<HumanStep> {
    plan_with(&mut rand::thread_rng())
}

/// Generates a plan from the given generator
pub fn plan_with<R: Rng>(rng: &mut R) -> Vec<HumanStep> {
    let mut steps = Vec::new();

    for _ in 0..rng.gen_range(3..=6) {
        steps.push(HumanStep::MoveMouse {
            x: rng.gen_range(0.0..VIEWPORT_WIDTH),
            y: rng.gen_range(0.0..VIEWPORT_HEIGHT),
        });
        steps.push(HumanStep::Pause(Duration::from_millis(rng.gen_range(50..=250))));
    }

    // Read down the page, glancing back up now and then
    for _ in 0..rng.gen_range(2..=4) {
        steps.push(HumanStep::Scroll(rng.gen_range(200..=600)));
        steps.push(HumanStep::Pause(Duration::from_millis(rng.gen_range(300..=1200))));
        steps.push(HumanStep::Scroll(-rng.gen_range(100..=300)));
        steps.push(HumanStep::Pause(Duration::from_millis(rng.gen_range(200..=600))));
    }

    steps.push(HumanStep::Pause(Duration::from_millis(rng.gen_range(500..=1500))));
    steps
}
