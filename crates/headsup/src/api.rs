//! Application entry points.
//!
//! The controller is found through a typed local, so any code running inside
//! [`provide_notifications`] can raise or clear a banner without threading a
//! handle through every call:
//!
//! ```rust,no_run
//! use headsup::*;
//! use headsup_core::{OverlayLayer, Size, Viewport};
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), NotificationError> {
//! let layer = OverlayLayer::new(Viewport {
//!     screen: Size::new(390.0, 844.0),
//!     safe_area_top: 47.0,
//! });
//! let controller = NotificationController::<String>::new(layer, NotificationConfig::default());
//!
//! provide_notifications(controller, || {
//!     show(
//!         "Upload complete".to_string(),
//!         ShowOptions::default().duration(Duration::from_secs(4)),
//!     )
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! The lookup happens when `show` / `dismiss` is called, not when the
//! returned future is first polled, so the future may be awaited outside the
//! providing closure.

use std::future::Future;
use std::rc::Rc;

use headsup_core::{local, with_local};

use crate::config::ShowOptions;
use crate::controller::NotificationController;
use crate::error::NotificationError;

#[derive(Clone)]
struct Provided<C: Clone + 'static>(Rc<NotificationController<C>>);

/// Makes `controller` reachable from [`show`] / [`dismiss`] inside `f`.
pub fn provide_notifications<C: Clone + 'static, R>(
    controller: Rc<NotificationController<C>>,
    f: impl FnOnce() -> R,
) -> R {
    with_local(Provided(controller), f)
}

pub fn notification_controller<C: Clone + 'static>() -> Option<Rc<NotificationController<C>>> {
    local::<Provided<C>>().map(|p| p.0)
}

/// Replaces any banner on screen with `content` and resolves once its
/// entrance has finished (and the auto-dismiss timer, if any, is armed).
///
/// Fails with [`NotificationError::MissingController`] when no controller
/// for `C` was provided.
pub fn show<C: Clone + 'static>(
    content: C,
    options: ShowOptions,
) -> impl Future<Output = Result<(), NotificationError>> {
    let controller = notification_controller::<C>();
    async move {
        let Some(controller) = controller else {
            log::warn!("show() called outside provide_notifications");
            return Err(NotificationError::MissingController);
        };

        controller.create(content, &options).await;
        if let Some(on_created) = &options.on_created {
            on_created();
        }
        controller
            .show(options.duration, options.curve, options.dismiss_curve)
            .await;
        Ok(())
    }
}

/// Dismisses the banner on screen, if any, and resolves once it is gone.
/// Without a provided controller this does nothing.
pub fn dismiss<C: Clone + 'static>() -> impl Future<Output = ()> {
    let controller = notification_controller::<C>();
    async move {
        if let Some(controller) = controller {
            controller.dismiss_programmatically().await;
        }
    }
}
