//! # Notification controller
//!
//! Owns the single live banner: its overlay entry, entrance/exit progress,
//! both drag axes, the auto-dismiss timer and the size signal.
//!
//! Lifecycle: [`create`](NotificationController::create) retires whatever is
//! on screen and inserts a new overlay entry; [`show`](NotificationController::show)
//! waits for the first measurement, runs the entrance and arms the timer;
//! [`dismiss`](NotificationController::dismiss) runs the exit and removes the
//! entry. Gestures arrive through [`BannerHandlers`] on each built frame.
//!
//! Everything here is `!Send` and spawns onto the current tokio `LocalSet`
//! (timer, tap dismissal, drag-end follow-ups), so it must be driven from
//! inside one.
//!
//! ## Position model
//!
//! The vertical position is the banner's bottom edge: `0` is fully hidden
//! above the screen, `height` is at rest. It is the sum of the entrance
//! projection, the vertical axis tween and the raw vertical drag. The
//! horizontal position is the horizontal tween plus drag, `0` at rest. Both
//! are computed on every read and never stored.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use headsup_core::{
    AnimationController, AnimationOutcome, AnimationStatus, Easing, OverlayLayer, Rect, Size,
    Viewport,
};
use tokio::sync::Mutex;

use crate::config::{NotificationConfig, ShowOptions};
use crate::gestures::DragEndDetails;
use crate::horizontal::HorizontalInteraction;
use crate::interact::InteractAxis;
use crate::session::{NotificationSession, SizeReady};
use crate::timer::DismissTimer;
use crate::vertical::VerticalInteraction;

/// What the overlay entry hands the host each time it is built.
pub struct BannerFrame<C: Clone + 'static> {
    pub content: C,
    /// Where to draw the banner. `h` is 0 until the first measurement.
    pub bounds: Rect,
    /// Top padding to apply inside the banner (status bar / notch).
    pub inset_top: f32,
    pub handlers: BannerHandlers<C>,
}

impl<C: Clone + fmt::Debug + 'static> fmt::Debug for BannerFrame<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BannerFrame")
            .field("content", &self.content)
            .field("bounds", &self.bounds)
            .field("inset_top", &self.inset_top)
            .finish_non_exhaustive()
    }
}

/// Gesture and measurement entry points for one built banner.
///
/// Handlers are tied to the overlay lifetime they were built for; once that
/// banner is retired they do nothing, even if the host still holds them.
pub struct BannerHandlers<C: Clone + 'static> {
    controller: Weak<NotificationController<C>>,
    token: Rc<SizeReady>,
    inset_top: f32,
}

impl<C: Clone + 'static> Clone for BannerHandlers<C> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            token: self.token.clone(),
            inset_top: self.inset_top,
        }
    }
}

impl<C: Clone + 'static> BannerHandlers<C> {
    fn live(&self) -> Option<Rc<NotificationController<C>>> {
        let controller = self.controller.upgrade()?;
        controller.is_current(&self.token).then_some(controller)
    }

    /// Measured size of the banner content. The top inset is added before
    /// the size is recorded. Returns false if a size was already recorded
    /// for this banner or it has been retired.
    pub fn report_size(&self, size: Size) -> bool {
        self.token
            .complete(Size::new(size.width, size.height + self.inset_top))
    }

    pub fn tap(&self) {
        if let Some(controller) = self.live() {
            controller.handle_tap();
        }
    }

    pub fn tap_down(&self) {
        if let Some(controller) = self.live() {
            controller.handle_tap_down();
        }
    }

    pub fn vertical_drag_update(&self, delta: f32) {
        if let Some(controller) = self.live() {
            controller.handle_vertical_drag_update(delta);
        }
    }

    pub fn vertical_drag_end(&self, details: DragEndDetails) {
        if let Some(controller) = self.live() {
            tokio::task::spawn_local(async move {
                controller.handle_vertical_drag_end(details).await;
            });
        }
    }

    pub fn horizontal_drag_update(&self, delta: f32) {
        if let Some(controller) = self.live() {
            controller.handle_horizontal_drag_update(delta);
        }
    }

    pub fn horizontal_drag_end(&self, details: DragEndDetails) {
        if let Some(controller) = self.live() {
            tokio::task::spawn_local(async move {
                controller.handle_horizontal_drag_end(details).await;
            });
        }
    }
}

pub struct NotificationController<C: Clone + 'static> {
    overlay: OverlayLayer<BannerFrame<C>>,
    config: NotificationConfig,
    entrance: AnimationController,
    vertical: VerticalInteraction,
    horizontal: HorizontalInteraction,
    session: RefCell<NotificationSession>,
    /// Serializes `create` and programmatic dismissal so overlapping calls
    /// neither both insert nor keep superseding each other's exit.
    lifecycle: Mutex<()>,
    next_timer: Cell<u64>,
    this: Weak<Self>,
}

impl<C: Clone + 'static> NotificationController<C> {
    pub fn new(overlay: OverlayLayer<BannerFrame<C>>, config: NotificationConfig) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let entrance =
                AnimationController::with_frame(config.entrance_duration, config.frame_interval);
            let vertical = VerticalInteraction::new(config.axis_duration, config.frame_interval);
            let horizontal = HorizontalInteraction::new(
                config.axis_duration,
                config.frame_interval,
                config.horizontal_entrance_widths,
            );

            let rebuild = |this: &Weak<Self>| {
                let this = this.clone();
                move || {
                    if let Some(controller) = this.upgrade() {
                        controller.mark_needs_build();
                    }
                }
            };
            entrance.add_listener(rebuild(this));
            vertical.driver().add_listener(rebuild(this));
            horizontal.driver().add_listener(rebuild(this));

            Self {
                overlay,
                config,
                entrance,
                vertical,
                horizontal,
                session: RefCell::new(NotificationSession::new()),
                lifecycle: Mutex::new(()),
                next_timer: Cell::new(0),
                this: this.clone(),
            }
        })
    }

    pub fn overlay(&self) -> &OverlayLayer<BannerFrame<C>> {
        &self.overlay
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    pub fn vertical(&self) -> &VerticalInteraction {
        &self.vertical
    }

    pub fn horizontal(&self) -> &HorizontalInteraction {
        &self.horizontal
    }

    pub fn entrance_status(&self) -> AnimationStatus {
        self.entrance.status()
    }

    /// True while an overlay entry is inserted.
    pub fn is_showing(&self) -> bool {
        self.session.borrow().overlay_key.is_some()
    }

    pub fn notification_size(&self) -> Size {
        self.session.borrow().notification_size
    }

    pub fn current_vertical_position(&self) -> f32 {
        let entrance = self.session.borrow().entrance.value(&self.entrance);
        entrance + self.vertical.offset()
    }

    pub fn current_horizontal_position(&self) -> f32 {
        self.horizontal.offset()
    }

    pub(crate) fn has_timer(&self) -> bool {
        self.session.borrow().timer.is_some()
    }

    pub(crate) fn size_ready(&self) -> Rc<SizeReady> {
        self.session.borrow().size_ready.clone()
    }

    fn is_current(&self, token: &Rc<SizeReady>) -> bool {
        Rc::ptr_eq(&self.session.borrow().size_ready, token)
    }

    fn mark_needs_build(&self) {
        if let Some(key) = self.session.borrow().overlay_key {
            self.overlay.mark_needs_build(key);
        }
    }

    /// Retires any banner on screen, then inserts a new overlay entry for
    /// `content`. The entry stays hidden until [`show`](Self::show) runs.
    pub async fn create(&self, content: C, options: &ShowOptions) {
        let _lifecycle = self.lifecycle.lock().await;

        self.retire_showing().await;

        self.vertical.reset();
        self.horizontal.reset();

        let token = {
            let mut s = self.session.borrow_mut();
            s.on_tap = options.on_tap.clone();
            s.width = options.width;
            s.slide_in = options.slide_in;
            s.size_ready.clone()
        };

        let this = self.this.clone();
        let key = self.overlay.insert(move |viewport| {
            let controller = this.upgrade()?;
            Some(controller.build_frame(&content, &token, viewport))
        });
        self.session.borrow_mut().overlay_key = Some(key);
        log::debug!("notification: created overlay {key:?}");
    }

    fn build_frame(&self, content: &C, token: &Rc<SizeReady>, viewport: &Viewport) -> BannerFrame<C> {
        self.capture_screen(viewport);

        let (screen, size, width) = {
            let s = self.session.borrow();
            (s.screen_size, s.notification_size, s.width)
        };
        let width = width.unwrap_or(screen.width);
        let x = (screen.width - width) / 2.0 + self.current_horizontal_position();
        let y = self.current_vertical_position() - size.height;

        BannerFrame {
            content: content.clone(),
            bounds: Rect {
                x,
                y,
                w: width,
                h: size.height,
            },
            inset_top: viewport.safe_area_top,
            handlers: BannerHandlers {
                controller: self.this.clone(),
                token: token.clone(),
                inset_top: viewport.safe_area_top,
            },
        }
    }

    fn capture_screen(&self, viewport: &Viewport) {
        let mut s = self.session.borrow_mut();
        if s.screen_size.is_zero() {
            s.screen_size = viewport.screen;
            self.horizontal.set_screen_width(viewport.screen.width);
            log::debug!("notification: screen size {:?}", viewport.screen);
        }
    }

    /// Waits for the first measurement, runs the entrance and, for a nonzero
    /// `duration`, arms the auto-dismiss timer.
    ///
    /// Resolves as superseded if the banner is retired before the entrance
    /// finishes; no timer is armed in that case.
    pub async fn show(&self, duration: Duration, curve: Easing, dismiss_curve: Easing) -> AnimationOutcome {
        let token = self.size_ready();
        let Some(size) = token.wait().await else {
            return AnimationOutcome::Superseded;
        };
        if !self.is_current(&token) {
            return AnimationOutcome::Superseded;
        }

        let slide_in = {
            let mut s = self.session.borrow_mut();
            if s.notification_size != size {
                s.notification_size = size;
                s.entrance.extent = size.height;
            }
            s.entrance.curve = curve;
            s.entrance.dismiss_curve = dismiss_curve;
            s.slide_in
        };
        log::debug!("notification: showing at {size:?}");

        let outcome = if slide_in {
            let (outcome, _) = tokio::join!(self.entrance.forward(Some(0.0)), self.horizontal.show());
            outcome
        } else {
            self.entrance.forward(Some(0.0)).await
        };
        if !outcome.is_completed() {
            return outcome;
        }

        if !duration.is_zero() {
            self.arm_timer(duration);
        }
        outcome
    }

    fn arm_timer(&self, after: Duration) {
        let id = self.next_timer.get().wrapping_add(1);
        self.next_timer.set(id);

        let this = self.this.clone();
        let timer = DismissTimer::spawn(id, after, async move {
            if let Some(controller) = this.upgrade() {
                controller.timer_fired(id).await;
            }
        });
        let previous = self.session.borrow_mut().timer.replace(timer);
        if let Some(previous) = previous {
            previous.cancel();
        }
        log::debug!("notification: auto-dismiss in {after:?}");
    }

    async fn timer_fired(&self, id: u64) {
        let fired = {
            let mut s = self.session.borrow_mut();
            if s.timer.as_ref().is_some_and(|timer| timer.id() == id) {
                s.timer.take()
            } else {
                None
            }
        };
        // Dropped, not cancelled: this future is running inside that task.
        if fired.is_none() {
            return;
        }
        log::debug!("notification: auto-dismiss timer fired");
        self.dismiss(true, 1.0).await;
    }

    fn cancel_timer(&self) {
        let timer = self.session.borrow_mut().timer.take();
        if let Some(timer) = timer {
            timer.cancel();
            log::debug!("notification: auto-dismiss cancelled");
        }
    }

    /// Cancels the timer, runs the exit (from `from`, or instantly when
    /// `should_animate` is false) and removes the overlay entry.
    ///
    /// A no-op when nothing is showing. Resolves as superseded, leaving the
    /// entry in place, if another run takes over the exit.
    pub async fn dismiss(&self, should_animate: bool, from: f32) -> AnimationOutcome {
        self.cancel_timer();
        if !self.is_showing() {
            return AnimationOutcome::Completed;
        }

        if should_animate {
            let outcome = self.entrance.reverse(Some(from)).await;
            if !outcome.is_completed() {
                return outcome;
            }
        } else {
            self.entrance.set_value(0.0);
        }

        self.retire_overlay();
        AnimationOutcome::Completed
    }

    /// [`dismiss`](Self::dismiss) starting from wherever the entrance is now.
    /// Resolves only once no banner is on screen.
    pub async fn dismiss_programmatically(&self) {
        let _lifecycle = self.lifecycle.lock().await;
        self.retire_showing().await;
    }

    /// Callers hold `lifecycle`. A drag or the timer may take over the exit
    /// and supersede a run, so keep going until the slot is actually free.
    async fn retire_showing(&self) {
        while self.is_showing() {
            let (should_animate, from) = match self.entrance.status() {
                AnimationStatus::Dismissed => (false, 0.0),
                AnimationStatus::Completed => (true, 1.0),
                AnimationStatus::Forward | AnimationStatus::Reverse => {
                    (true, self.entrance.value())
                }
            };
            self.dismiss(should_animate, from).await;
        }
    }

    fn retire_overlay(&self) {
        let (key, retired) = {
            let mut s = self.session.borrow_mut();
            let fresh = Rc::new(SizeReady::new());
            (s.overlay_key.take(), std::mem::replace(&mut s.size_ready, fresh))
        };
        retired.abandon();
        if let Some(key) = key {
            self.overlay.remove(key);
            log::debug!("notification: dismissed overlay {key:?}");
        }
    }

    /// Dismisses (without waiting) and then runs the tap callback, if any.
    pub fn handle_tap(&self) {
        let Some(on_tap) = self.session.borrow().on_tap.clone() else {
            return;
        };
        self.cancel_timer();
        let this = self.this.clone();
        tokio::task::spawn_local(async move {
            if let Some(controller) = this.upgrade() {
                controller.dismiss_programmatically().await;
            }
        });
        on_tap();
    }

    /// A touch that stays down keeps the banner up.
    pub fn handle_tap_down(&self) {
        self.cancel_timer();
    }

    pub fn handle_vertical_drag_update(&self, delta: f32) {
        let height = {
            let s = self.session.borrow();
            if s.overlay_key.is_none() {
                return;
            }
            s.notification_size.height
        };
        self.vertical.drag_by(delta, height);
        log::trace!("notification: vertical drag {}", self.vertical.drag_distance());
        self.mark_needs_build();
    }

    /// Flick up, or release with less than the stay fraction visible:
    /// dismiss. Otherwise snap back to rest.
    pub async fn handle_vertical_drag_end(&self, details: DragEndDetails) -> AnimationOutcome {
        let (height, screen_height) = {
            let s = self.session.borrow();
            if s.overlay_key.is_none() {
                return AnimationOutcome::Completed;
            }
            (s.notification_size.height, s.screen_size.height)
        };

        let position = self.current_vertical_position();
        let visible = if height > 0.0 { position.abs() / height } else { 0.0 };
        let velocity = if screen_height > 0.0 {
            details.velocity.y / screen_height
        } else {
            0.0
        };
        log::trace!("notification: vertical release visible={visible:.2} velocity={velocity:.2}");

        if velocity <= -self.config.dismiss_velocity {
            return self.dismiss_vertically(position).await;
        }
        if visible >= self.config.vertical_stay_fraction && self.vertical.drag_distance() != 0.0 {
            return self.vertical.stay().await;
        }
        self.dismiss_vertically(position).await
    }

    async fn dismiss_vertically(&self, position: f32) -> AnimationOutcome {
        self.cancel_timer();
        // The target is fixed from `position`, so the entrance must not keep
        // moving underneath the axis tween.
        if self.entrance.is_animating() {
            self.entrance.stop();
        }
        let outcome = self.vertical.dismiss(position).await;
        if !outcome.is_completed() {
            return outcome;
        }
        self.dismiss(false, 0.0).await
    }

    pub fn handle_horizontal_drag_update(&self, delta: f32) {
        if !self.is_showing() {
            return;
        }
        if self.horizontal.drag_by(delta) {
            log::trace!("notification: horizontal drag {}", self.horizontal.drag_distance());
            self.mark_needs_build();
        }
    }

    /// Fast fling or a drag past the dismiss fraction: dismiss to that side.
    /// Otherwise snap back to rest.
    pub async fn handle_horizontal_drag_end(&self, details: DragEndDetails) -> AnimationOutcome {
        if !self.is_showing() {
            return AnimationOutcome::Completed;
        }
        let width = self.horizontal.screen_width();
        if width <= 0.0 {
            return self.horizontal.stay().await;
        }

        let drag = self.horizontal.drag_distance();
        let velocity = details.velocity.x / width;
        let position = drag / width;
        log::trace!("notification: horizontal release position={position:.2} velocity={velocity:.2}");

        if velocity.abs() >= self.config.dismiss_velocity
            || position.abs() >= self.config.horizontal_dismiss_fraction
        {
            let direction = if drag != 0.0 { drag } else { details.velocity.x };
            self.cancel_timer();
            let outcome = self.horizontal.dismiss(direction).await;
            if !outcome.is_completed() {
                return outcome;
            }
            return self.dismiss(false, 0.0).await;
        }
        self.horizontal.stay().await
    }
}
