//! Slide carousel navigation.
//!
//! The carousel is `Resting` or `Transitioning`. A navigation starts a
//! transition of [`TRANSITION_MS`]. Input arriving before the transition has
//! run its course is dropped, so at most one index change is ever in flight.
//! Every navigation call checks its `now` against the deadline;
//! [`Carousel::advance_clock`] lets a renderer observe the end without input.

use serde::Serialize;

use crate::timer::PendingTimer;
use crate::types::Millis;

/// Duration of one slide transition.
pub const TRANSITION_MS: Millis = 500;

/// Minimum horizontal travel, in pixels, for a touch sequence to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Snapshot handed to the slide dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CarouselState {
    pub current_index: usize,
    pub is_animating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: usize, to: usize },
    Ignored(IgnoreReason),
}

impl Navigation {
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Zero or one slide: nothing to move to.
    SingleSlide,
    /// A transition is still running.
    Transitioning,
    OutOfRange,
    AlreadyCurrent,
    UnknownId,
    /// The touch sequence was shorter than the swipe threshold.
    NotAGesture,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchBuffer {
    start_x: f32,
    last_x: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    count: usize,
    current: usize,
    transition: PendingTimer,
    touch: Option<TouchBuffer>,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: 0,
            transition: PendingTimer::idle(),
            touch: None,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_armed()
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_index: self.current,
            is_animating: self.is_animating(),
        }
    }

    /// Replace the slide list (e.g. a new eligible set) and return to the first slide.
    pub fn reset(&mut self, count: usize) {
        *self = Self::new(count);
    }

    /// Next slide, wrapping from the last to the first.
    pub fn advance(&mut self, now: Millis) -> Navigation {
        self.step(now, |current, count| (current + 1) % count)
    }

    /// Previous slide, wrapping from the first to the last.
    pub fn retreat(&mut self, now: Millis) -> Navigation {
        self.step(now, |current, count| (current + count - 1) % count)
    }

    fn step(&mut self, now: Millis, next: impl Fn(usize, usize) -> usize) -> Navigation {
        self.transition.fire_if_due(now);
        if self.count <= 1 {
            return Navigation::Ignored(IgnoreReason::SingleSlide);
        }
        if self.is_animating() {
            return Navigation::Ignored(IgnoreReason::Transitioning);
        }
        let to = next(self.current, self.count);
        self.move_to(to, now)
    }

    /// Direct selection (dot indicator or authoring-tool sync).
    pub fn jump_to(&mut self, index: usize, now: Millis) -> Navigation {
        self.transition.fire_if_due(now);
        if self.is_animating() {
            return Navigation::Ignored(IgnoreReason::Transitioning);
        }
        if index >= self.count {
            return Navigation::Ignored(IgnoreReason::OutOfRange);
        }
        if index == self.current {
            return Navigation::Ignored(IgnoreReason::AlreadyCurrent);
        }
        self.move_to(index, now)
    }

    /// Jump to the slide whose id is `id`, given the slide ids in carousel order.
    pub fn select_by_id<S: AsRef<str>>(&mut self, ids: &[S], id: &str, now: Millis) -> Navigation {
        match ids.iter().position(|candidate| candidate.as_ref() == id) {
            Some(index) => self.jump_to(index, now),
            None => Navigation::Ignored(IgnoreReason::UnknownId),
        }
    }

    fn move_to(&mut self, to: usize, now: Millis) -> Navigation {
        let from = self.current;
        self.current = to;
        self.transition.arm(now, TRANSITION_MS);
        tracing::trace!(from, to, "Carousel transition started");
        Navigation::Moved { from, to }
    }

    /// Begin a touch sequence; any previous buffer is discarded.
    pub fn touch_start(&mut self, x: f32) {
        self.touch = Some(TouchBuffer {
            start_x: x,
            last_x: None,
        });
    }

    pub fn touch_move(&mut self, x: f32) {
        if let Some(touch) = self.touch.as_mut() {
            touch.last_x = Some(x);
        }
    }

    /// End the touch sequence. A leftward swipe advances, a rightward one retreats.
    pub fn touch_end(&mut self, now: Millis) -> Navigation {
        let Some(TouchBuffer {
            start_x,
            last_x: Some(end_x),
        }) = self.touch.take()
        else {
            return Navigation::Ignored(IgnoreReason::NotAGesture);
        };

        let distance = start_x - end_x;
        if distance.abs() < SWIPE_THRESHOLD_PX {
            return Navigation::Ignored(IgnoreReason::NotAGesture);
        }
        if distance > 0.0 {
            self.advance(now)
        } else {
            self.retreat(now)
        }
    }

    /// Report the current time; ends a finished transition.
    pub fn advance_clock(&mut self, now: Millis) -> CarouselState {
        self.transition.fire_if_due(now);
        self.state()
    }

    /// Cancel the running transition and drop any touch in progress.
    pub fn unmount(&mut self) {
        self.transition.cancel();
        self.touch = None;
    }
}
