//! Drag-driven animation along one axis.
//!
//! Each axis owns an [`AxisDriver`]: the raw drag distance accumulated since
//! the last commit, plus at most one active tween run by its own progress
//! controller. The axis position is `tween contribution + drag distance`.
//!
//! States: idle (no tween, drag distance holds the live offset) and
//! animating (a stay / dismiss / slide-in tween is running and the drag
//! distance was folded into its start value). A run that completes while it
//! is still the newest one clears the tween and returns the driver to idle.

use std::cell::Cell;
use std::time::Duration;

use headsup_core::{AnimationController, AnimationOutcome, Easing, Tween};

pub struct AxisDriver {
    progress: AnimationController,
    drag_distance: Cell<f32>,
    current: Cell<Option<Tween<f32>>>,
    epoch: Cell<u64>,
}

impl AxisDriver {
    pub fn new(duration: Duration, frame: Duration) -> Self {
        Self {
            progress: AnimationController::with_frame(duration, frame),
            drag_distance: Cell::new(0.0),
            current: Cell::new(None),
            epoch: Cell::new(0),
        }
    }

    pub fn drag_distance(&self) -> f32 {
        self.drag_distance.get()
    }

    pub(crate) fn set_drag_distance(&self, distance: f32) {
        self.drag_distance.set(distance);
    }

    pub fn current_animation(&self) -> Option<Tween<f32>> {
        self.current.get()
    }

    pub fn offset(&self) -> f32 {
        let animated = self
            .current
            .get()
            .map_or(0.0, |tween| tween.transform(self.progress.value()));
        animated + self.drag_distance.get()
    }

    pub fn add_listener(&self, f: impl Fn() + 'static) {
        self.progress.add_listener(f);
    }

    /// Back to rest: no tween, no drag. Any live run resolves as superseded.
    pub fn reset(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        self.current.set(None);
        self.drag_distance.set(0.0);
        self.progress.set_value(0.0);
    }

    /// Animates from the current offset to `end`.
    pub async fn animate_to(&self, end: f32, easing: Easing) -> AnimationOutcome {
        self.animate(self.offset(), end, easing).await
    }

    pub async fn animate(&self, begin: f32, end: f32, easing: Easing) -> AnimationOutcome {
        let epoch = self.epoch.get().wrapping_add(1);
        self.epoch.set(epoch);
        self.current.set(Some(Tween::new(begin, end, easing)));
        self.drag_distance.set(0.0);

        let outcome = self.progress.forward(Some(0.0)).await;
        if self.epoch.get() == epoch {
            self.current.set(None);
            self.progress.set_value(0.0);
        }
        outcome
    }
}

/// Shared `stay` / `dismiss` contract of the vertical and horizontal axes.
#[allow(async_fn_in_trait)]
pub trait InteractAxis {
    /// What the axis needs to pick its off-screen target.
    type DismissArg;

    const DISMISS_EASING: Easing;

    fn driver(&self) -> &AxisDriver;

    fn dismiss_target(&self, arg: Self::DismissArg) -> f32;

    fn drag_distance(&self) -> f32 {
        self.driver().drag_distance()
    }

    fn current_animation(&self) -> Option<Tween<f32>> {
        self.driver().current_animation()
    }

    fn offset(&self) -> f32 {
        self.driver().offset()
    }

    fn reset(&self) {
        self.driver().reset();
    }

    /// Snaps back to rest.
    async fn stay(&self) -> AnimationOutcome {
        self.driver().animate_to(0.0, Easing::EaseOut).await
    }

    /// Carries the banner off-screen.
    async fn dismiss(&self, arg: Self::DismissArg) -> AnimationOutcome {
        let target = self.dismiss_target(arg);
        self.driver().animate_to(target, Self::DISMISS_EASING).await
    }
}
