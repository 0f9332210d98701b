use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use smallvec::SmallVec;
use tokio::time::Instant;

/// Frame interval used by controllers built with [`AnimationController::new`].
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

/// Easing curves. Every curve maps 0 to 0 and 1 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseOutCubic,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Interpolation between `begin` and `end`, remapped through `easing`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T: Interpolate + Copy> {
    pub begin: T,
    pub end: T,
    pub easing: Easing,
}

impl<T: Interpolate + Copy> Tween<T> {
    pub fn new(begin: T, end: T, easing: Easing) -> Self {
        Self { begin, end, easing }
    }

    pub fn transform(&self, t: f32) -> T {
        self.begin.interpolate(&self.end, self.easing.interpolate(t))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationStatus {
    /// Stopped at 0.
    #[default]
    Dismissed,
    /// Last driven towards 1.
    Forward,
    /// Last driven towards 0.
    Reverse,
    /// Stopped at 1.
    Completed,
}

/// How an awaited run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The run reached its target.
    Completed,
    /// A newer run (or `set_value`/`stop`) took over the controller first.
    Superseded,
}

impl AnimationOutcome {
    pub fn is_completed(self) -> bool {
        self == AnimationOutcome::Completed
    }
}

/// Drives a 0..1 progress value over time on the current `LocalSet`.
///
/// Runs are `async` and tick every frame interval. Only one run is live at a
/// time: starting a new one (or calling [`set_value`](Self::set_value) /
/// [`stop`](Self::stop)) bumps the generation, and the older run resolves
/// with [`AnimationOutcome::Superseded`] on its next tick without touching
/// the value again.
pub struct AnimationController {
    value: Cell<f32>,
    status: Cell<AnimationStatus>,
    running: Cell<bool>,
    generation: Cell<u64>,
    duration: Duration,
    frame: Duration,
    listeners: RefCell<SmallVec<[Rc<dyn Fn()>; 2]>>,
}

impl AnimationController {
    pub fn new(duration: Duration) -> Self {
        Self::with_frame(duration, DEFAULT_FRAME)
    }

    pub fn with_frame(duration: Duration, frame: Duration) -> Self {
        Self {
            value: Cell::new(0.0),
            status: Cell::new(AnimationStatus::Dismissed),
            running: Cell::new(false),
            generation: Cell::new(0),
            duration,
            frame,
            listeners: RefCell::new(SmallVec::new()),
        }
    }

    pub fn value(&self) -> f32 {
        self.value.get()
    }

    pub fn status(&self) -> AnimationStatus {
        self.status.get()
    }

    pub fn is_dismissed(&self) -> bool {
        self.status.get() == AnimationStatus::Dismissed
    }

    pub fn is_completed(&self) -> bool {
        self.status.get() == AnimationStatus::Completed
    }

    pub fn is_animating(&self) -> bool {
        self.running.get()
    }

    /// Called after every value or status change.
    pub fn add_listener(&self, f: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Rc::new(f));
    }

    /// Halts any live run where it is.
    pub fn stop(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.running.set(false);
    }

    /// Jumps to `value` (clamped to 0..1), stopping any live run.
    pub fn set_value(&self, value: f32) {
        self.stop();
        let value = value.clamp(0.0, 1.0);
        self.value.set(value);
        let status = if value <= 0.0 {
            AnimationStatus::Dismissed
        } else if value >= 1.0 {
            AnimationStatus::Completed
        } else {
            match self.status.get() {
                AnimationStatus::Reverse | AnimationStatus::Dismissed => AnimationStatus::Reverse,
                _ => AnimationStatus::Forward,
            }
        };
        self.status.set(status);
        self.notify();
    }

    /// Runs towards 1, optionally jumping to `from` first.
    pub async fn forward(&self, from: Option<f32>) -> AnimationOutcome {
        self.run(true, from).await
    }

    /// Runs towards 0, optionally jumping to `from` first.
    pub async fn reverse(&self, from: Option<f32>) -> AnimationOutcome {
        self.run(false, from).await
    }

    async fn run(&self, forward: bool, from: Option<f32>) -> AnimationOutcome {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        if let Some(from) = from {
            self.value.set(from.clamp(0.0, 1.0));
        }
        let (target, settled) = if forward {
            (1.0, AnimationStatus::Completed)
        } else {
            (0.0, AnimationStatus::Dismissed)
        };
        self.status.set(if forward {
            AnimationStatus::Forward
        } else {
            AnimationStatus::Reverse
        });

        let start = self.value.get();
        let distance = (target - start).abs();
        if distance == 0.0 || self.duration.is_zero() {
            self.settle(target, settled);
            return AnimationOutcome::Completed;
        }

        // Partial runs take a proportional share of the full duration.
        let total = self.duration.mul_f32(distance).as_secs_f32();
        let started = Instant::now();
        self.running.set(true);
        self.notify();

        loop {
            tokio::time::sleep(self.frame).await;
            if self.generation.get() != generation {
                return AnimationOutcome::Superseded;
            }
            let t = (started.elapsed().as_secs_f32() / total).min(1.0);
            if t >= 1.0 {
                self.settle(target, settled);
                return AnimationOutcome::Completed;
            }
            self.value.set(start + (target - start) * t);
            self.notify();
        }
    }

    fn settle(&self, target: f32, status: AnimationStatus) {
        self.value.set(target);
        self.running.set(false);
        self.status.set(status);
        self.notify();
    }

    fn notify(&self) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }
}

impl fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationController")
            .field("value", &self.value.get())
            .field("status", &self.status.get())
            .field("running", &self.running.get())
            .field("generation", &self.generation.get())
            .field("duration", &self.duration)
            .finish()
    }
}
