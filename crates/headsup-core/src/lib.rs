//! # Host primitives
//!
//! `headsup-core` holds the pieces a transient overlay notification needs
//! from its host, kept free of any particular renderer:
//!
//! - `geometry`: `Vec2`, `Size`, `Rect`.
//! - `animation`: easing curves, tweens, and an async
//!   `AnimationController` that ticks on the current tokio `LocalSet`.
//! - `overlay`: an `OverlayLayer` of builder entries drawn above the app.
//! - `locals`: typed values provided to everything called inside a closure.
//!
//! ## Animations
//!
//! `AnimationController` drives a 0..1 progress value. `forward` and
//! `reverse` are `async` and resolve once the value settles:
//!
//! ```rust
//! use headsup_core::*;
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let progress = AnimationController::new(Duration::from_millis(300));
//! let slide = Tween::new(-72.0f32, 0.0, Easing::EaseOutCubic);
//!
//! progress.forward(Some(0.0)).await;
//! assert_eq!(slide.transform(progress.value()), 0.0);
//! # }
//! ```
//!
//! Starting a new run supersedes the old one: the older future resolves with
//! `AnimationOutcome::Superseded` and leaves the value to its successor. All
//! state is `Rc`/`Cell` based and expects a single-threaded runtime.
//!
//! ## Overlay
//!
//! ```rust
//! use headsup_core::*;
//!
//! let layer: OverlayLayer<&'static str> = OverlayLayer::new(Viewport {
//!     screen: Size::new(390.0, 844.0),
//!     safe_area_top: 47.0,
//! });
//! let key = layer.insert(|_viewport| Some("banner"));
//! assert_eq!(layer.build_all(), vec!["banner"]);
//! layer.remove(key);
//! assert!(layer.is_empty());
//! ```

pub mod animation;
pub mod geometry;
pub mod locals;
pub mod overlay;
mod tests;

pub use animation::*;
pub use geometry::*;
pub use locals::*;
pub use overlay::*;
