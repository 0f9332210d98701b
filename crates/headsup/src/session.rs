use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use headsup_core::{AnimationController, AnimationStatus, Easing, OverlayKey, Size};
use tokio::sync::Notify;

use crate::timer::DismissTimer;

#[derive(Clone, Copy, Debug, PartialEq)]
enum SizeState {
    Pending,
    Ready(Size),
    Abandoned,
}

/// Single-fulfillment signal for the banner's first measured size.
///
/// One instance belongs to one overlay lifetime. Dismissal replaces it with a
/// fresh one and abandons the old, so a late measurement of a retired banner
/// can never satisfy the next banner's wait.
pub struct SizeReady {
    state: Cell<SizeState>,
    notify: Notify,
}

impl SizeReady {
    pub fn new() -> Self {
        Self {
            state: Cell::new(SizeState::Pending),
            notify: Notify::new(),
        }
    }

    /// Fulfils the signal. Only the first call on a pending signal counts.
    pub fn complete(&self, size: Size) -> bool {
        if self.state.get() != SizeState::Pending {
            return false;
        }
        self.state.set(SizeState::Ready(size));
        self.notify.notify_waiters();
        true
    }

    /// Releases waiters with `None`. No effect once fulfilled.
    pub fn abandon(&self) {
        if self.state.get() == SizeState::Pending {
            self.state.set(SizeState::Abandoned);
            self.notify.notify_waiters();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.get() == SizeState::Pending
    }

    pub fn size(&self) -> Option<Size> {
        match self.state.get() {
            SizeState::Ready(size) => Some(size),
            _ => None,
        }
    }

    pub async fn wait(&self) -> Option<Size> {
        loop {
            // Registered before the check so a completion in between still wakes us.
            let notified = self.notify.notified();
            match self.state.get() {
                SizeState::Ready(size) => return Some(size),
                SizeState::Abandoned => return None,
                SizeState::Pending => notified.await,
            }
        }
    }
}

impl Default for SizeReady {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SizeReady {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SizeReady").field(&self.state.get()).finish()
    }
}

/// Entrance/exit projection: the bottom edge travels from 0 to `extent`,
/// eased by `curve` on the way in and `dismiss_curve` on the way out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EntranceTween {
    pub extent: f32,
    pub curve: Easing,
    pub dismiss_curve: Easing,
}

impl EntranceTween {
    pub fn value(&self, progress: &AnimationController) -> f32 {
        let curve = match progress.status() {
            AnimationStatus::Reverse | AnimationStatus::Dismissed => self.dismiss_curve,
            AnimationStatus::Forward | AnimationStatus::Completed => self.curve,
        };
        self.extent * curve.interpolate(progress.value())
    }
}

/// Mutable state of the live (or most recent) notification.
pub(crate) struct NotificationSession {
    pub on_tap: Option<Rc<dyn Fn()>>,
    pub timer: Option<DismissTimer>,
    pub overlay_key: Option<OverlayKey>,
    pub notification_size: Size,
    pub size_ready: Rc<SizeReady>,
    pub screen_size: Size,
    pub entrance: EntranceTween,
    pub width: Option<f32>,
    pub slide_in: bool,
}

impl NotificationSession {
    pub fn new() -> Self {
        Self {
            on_tap: None,
            timer: None,
            overlay_key: None,
            notification_size: Size::ZERO,
            size_ready: Rc::new(SizeReady::new()),
            screen_size: Size::ZERO,
            entrance: EntranceTween {
                extent: 0.0,
                curve: Easing::EaseOutCubic,
                dismiss_curve: Easing::EaseIn,
            },
            width: None,
            slide_in: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn completes_once() {
        let ready = SizeReady::new();
        assert!(ready.is_pending());
        assert!(ready.complete(Size::new(300.0, 72.0)));
        assert!(!ready.complete(Size::new(1.0, 1.0)));
        assert_eq!(ready.size(), Some(Size::new(300.0, 72.0)));

        ready.abandon();
        assert_eq!(ready.size(), Some(Size::new(300.0, 72.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn waiters_wake_on_completion() {
        let ready = SizeReady::new();
        let report = async {
            tokio::time::sleep(Duration::from_millis(16)).await;
            ready.complete(Size::new(10.0, 20.0));
        };
        let (size, ()) = tokio::join!(ready.wait(), report);
        assert_eq!(size, Some(Size::new(10.0, 20.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_signal_releases_waiters() {
        let ready = SizeReady::new();
        let retire = async {
            tokio::time::sleep(Duration::from_millis(16)).await;
            ready.abandon();
        };
        let (size, ()) = tokio::join!(ready.wait(), retire);
        assert_eq!(size, None);
        assert!(!ready.complete(Size::new(10.0, 20.0)));
    }

    #[test]
    fn entrance_uses_direction_curve() {
        let progress = AnimationController::new(Duration::from_millis(300));
        let tween = EntranceTween {
            extent: 100.0,
            curve: Easing::EaseOutCubic,
            dismiss_curve: Easing::Linear,
        };

        progress.set_value(1.0);
        assert_eq!(tween.value(&progress), 100.0);

        // Stopped on the way in: entrance curve.
        progress.set_value(0.5);
        assert!((tween.value(&progress) - 87.5).abs() < 1e-4);

        // Stopped on the way out: exit curve.
        progress.set_value(0.0);
        progress.set_value(0.5);
        assert!((tween.value(&progress) - 50.0).abs() < 1e-4);
    }
}
