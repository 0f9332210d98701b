use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use headsup_core::{DEFAULT_FRAME, Easing};

/// Per-controller tuning. Thresholds are in normalized units: velocities are
/// divided by the screen extent along the drag axis, positions by the
/// banner height (vertical) or the screen width (horizontal).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NotificationConfig {
    /// Full entrance (and exit) run.
    pub entrance_duration: Duration,
    /// Stay / dismiss / slide-in runs of the drag axes.
    pub axis_duration: Duration,
    pub frame_interval: Duration,
    /// A release faster than this dismisses without looking at the distance.
    pub dismiss_velocity: f32,
    /// Minimum visible fraction for a vertical release to snap back.
    pub vertical_stay_fraction: f32,
    /// Sideways distance, in screen widths, past which a release dismisses.
    pub horizontal_dismiss_fraction: f32,
    /// Where the slide-in entrance starts, in screen widths.
    pub horizontal_entrance_widths: f32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            entrance_duration: Duration::from_millis(300),
            axis_duration: Duration::from_millis(250),
            frame_interval: DEFAULT_FRAME,
            dismiss_velocity: 1.0,
            vertical_stay_fraction: 0.5,
            horizontal_dismiss_fraction: 0.2,
            horizontal_entrance_widths: 2.0,
        }
    }
}

/// Per-call parameters for [`show`](crate::show).
#[derive(Clone)]
pub struct ShowOptions {
    /// Time on screen before auto-dismiss. `Duration::ZERO` keeps the banner
    /// up until it is dismissed explicitly.
    pub duration: Duration,
    pub curve: Easing,
    pub dismiss_curve: Easing,
    /// Fixed banner width; defaults to the screen width.
    pub width: Option<f32>,
    pub on_tap: Option<Rc<dyn Fn()>>,
    /// Also slide in from the side while the banner drops down.
    pub slide_in: bool,
    /// Runs after the overlay is inserted and before the entrance starts.
    pub on_created: Option<Rc<dyn Fn()>>,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            curve: Easing::EaseOutCubic,
            dismiss_curve: Easing::EaseIn,
            width: None,
            on_tap: None,
            slide_in: false,
            on_created: None,
        }
    }
}

impl ShowOptions {
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn curve(mut self, curve: Easing) -> Self {
        self.curve = curve;
        self
    }

    pub fn dismiss_curve(mut self, curve: Easing) -> Self {
        self.dismiss_curve = curve;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn on_tap(mut self, f: impl Fn() + 'static) -> Self {
        self.on_tap = Some(Rc::new(f));
        self
    }

    pub fn slide_in(mut self, slide_in: bool) -> Self {
        self.slide_in = slide_in;
        self
    }

    pub fn on_created(mut self, f: impl Fn() + 'static) -> Self {
        self.on_created = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for ShowOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowOptions")
            .field("duration", &self.duration)
            .field("curve", &self.curve)
            .field("dismiss_curve", &self.dismiss_curve)
            .field("width", &self.width)
            .field("on_tap", &self.on_tap.as_ref().map(|_| "<callback>"))
            .field("slide_in", &self.slide_in)
            .field("on_created", &self.on_created.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
