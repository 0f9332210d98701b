//! # Headsup
//!
//! A transient overlay banner: it drops in from the top of the screen, can be
//! flicked or dragged away (up, or sideways to the right), and otherwise
//! expires on its own after a timeout.
//!
//! - [`NotificationController`] owns the one live banner and its state
//!   machine. A new `show` retires the previous banner before inserting its
//!   own, so at most one overlay entry exists at any time.
//! - [`VerticalInteraction`] / [`HorizontalInteraction`] track drag offsets
//!   and run the snap-back and dismiss tweens for each axis
//!   ([`InteractAxis`]).
//! - [`show`] / [`dismiss`] find the controller provided with
//!   [`provide_notifications`] and drive the lifecycle.
//!
//! The host keeps an [`OverlayLayer`](headsup_core::OverlayLayer) of
//! [`BannerFrame`]s, paints whatever [`build_all`](headsup_core::OverlayLayer::build_all)
//! returns, reports the measured banner size through
//! [`BannerHandlers::report_size`], and forwards taps and drags to the other
//! handlers.
//!
//! Everything runs on a single-threaded tokio runtime inside a `LocalSet`.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod gestures;
pub mod horizontal;
pub mod interact;
pub mod session;
mod timer;
pub mod vertical;

pub use api::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use gestures::*;
pub use horizontal::*;
pub use interact::*;
pub use session::SizeReady;
pub use vertical::*;
