//! Gesture recognition for the feed container.
//!
//! Touch drags are judged by travel distance only, never velocity. Wheel input
//! is debounced with a fixed cool-down that starts at the accepted event and is
//! not extended by the events it swallows.

use std::time::{Duration, Instant};

use super::messages::Direction;

/// Result of a finished touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Advance(Direction),
    /// Moved, but not far enough.
    SnapBack,
    /// Touch ended without movement.
    Tap,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start_y: Option<f32>,
    last_y: Option<f32>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_y: None,
            last_y: None,
        }
    }

    pub fn touch_start(&mut self, y: f32) {
        self.start_y = Some(y);
        self.last_y = None;
    }

    pub fn touch_move(&mut self, y: f32) {
        if self.start_y.is_some() {
            self.last_y = Some(y);
        }
    }

    /// Finish the gesture. Finger travelling up (toward smaller `y`) pulls the
    /// next entry in.
    pub fn touch_end(&mut self) -> SwipeOutcome {
        let start = self.start_y.take();
        let last = self.last_y.take();
        let (Some(start), Some(last)) = (start, last) else {
            return SwipeOutcome::Tap;
        };

        let travel = start - last;
        if travel.abs() > self.threshold {
            if travel > 0.0 {
                SwipeOutcome::Advance(Direction::Next)
            } else {
                SwipeOutcome::Advance(Direction::Previous)
            }
        } else if travel == 0.0 {
            SwipeOutcome::Tap
        } else {
            SwipeOutcome::SnapBack
        }
    }

    /// Drop a gesture in flight.
    pub fn cancel(&mut self) {
        self.start_y = None;
        self.last_y = None;
    }
}

#[derive(Debug, Clone)]
pub struct WheelDebouncer {
    delta_threshold: f32,
    cooldown: Duration,
    locked_until: Option<Instant>,
}

impl WheelDebouncer {
    pub fn new(delta_threshold: f32, cooldown: Duration) -> Self {
        Self {
            delta_threshold,
            cooldown,
            locked_until: None,
        }
    }

    /// Returns the navigation to perform, if any. Sub-threshold deltas never
    /// trigger and never start a cool-down.
    pub fn on_wheel(&mut self, delta_y: f32, at: Instant) -> Option<Direction> {
        if self.is_cooling_down(at) {
            return None;
        }
        if delta_y.abs() <= self.delta_threshold {
            return None;
        }

        self.locked_until = Some(at + self.cooldown);
        Some(if delta_y > 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        })
    }

    pub fn is_cooling_down(&self, at: Instant) -> bool {
        self.locked_until.is_some_and(|until| at < until)
    }
}
