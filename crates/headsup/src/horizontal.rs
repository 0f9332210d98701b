use std::cell::Cell;
use std::time::Duration;

use headsup_core::{AnimationOutcome, Easing};

use crate::interact::{AxisDriver, InteractAxis};

/// Sideways drag and the optional slide-in entrance. Off-screen targets are
/// measured in screen widths, so the width must be known before either runs.
pub struct HorizontalInteraction {
    driver: AxisDriver,
    screen_width: Cell<f32>,
    entrance_widths: f32,
}

impl HorizontalInteraction {
    pub fn new(duration: Duration, frame: Duration, entrance_widths: f32) -> Self {
        Self {
            driver: AxisDriver::new(duration, frame),
            screen_width: Cell::new(0.0),
            entrance_widths,
        }
    }

    pub fn screen_width(&self) -> f32 {
        self.screen_width.get()
    }

    pub fn set_screen_width(&self, width: f32) {
        self.screen_width.set(width);
    }

    /// Only rightward movement counts. Returns whether the offset changed.
    pub fn drag_by(&self, delta: f32) -> bool {
        if delta <= 0.0 {
            return false;
        }
        self.driver.set_drag_distance(self.driver.drag_distance() + delta);
        true
    }

    /// Slides in from off-screen to rest.
    pub async fn show(&self) -> AnimationOutcome {
        let start = self.entrance_widths * self.screen_width.get();
        self.driver.animate(start, 0.0, Easing::EaseOut).await
    }
}

impl InteractAxis for HorizontalInteraction {
    /// Signed hint for which side to leave through; non-negative is right.
    type DismissArg = f32;

    const DISMISS_EASING: Easing = Easing::EaseOut;

    fn driver(&self) -> &AxisDriver {
        &self.driver
    }

    fn dismiss_target(&self, direction: f32) -> f32 {
        // f32::signum maps +0.0 to 1.0, so "no preference" leaves to the right.
        direction.signum() * self.screen_width.get()
    }
}
