use std::time::Duration;

use headsup_core::Easing;

use crate::interact::{AxisDriver, InteractAxis};

/// Up/down drag. Offsets are negative (towards the top edge) and never
/// exceed the banner height.
pub struct VerticalInteraction {
    driver: AxisDriver,
}

impl VerticalInteraction {
    pub fn new(duration: Duration, frame: Duration) -> Self {
        Self {
            driver: AxisDriver::new(duration, frame),
        }
    }

    /// Accumulates `delta`, clamped to `[-height, 0]`.
    pub fn drag_by(&self, delta: f32, height: f32) {
        let height = height.max(0.0);
        let distance = (self.driver.drag_distance() + delta).clamp(-height, 0.0);
        self.driver.set_drag_distance(distance);
    }
}

impl InteractAxis for VerticalInteraction {
    /// Live vertical position of the banner's bottom edge.
    type DismissArg = f32;

    const DISMISS_EASING: Easing = Easing::EaseOutCubic;

    fn driver(&self) -> &AxisDriver {
        &self.driver
    }

    fn dismiss_target(&self, current_position: f32) -> f32 {
        // Moves the bottom edge up to the top of the screen.
        self.driver.offset() - current_position
    }
}
