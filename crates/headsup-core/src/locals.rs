//! # Locals
//!
//! Thread‑local "composition locals": values provided for the duration of a
//! closure and visible to anything called inside it. Frames nest, and the
//! innermost frame that holds a value of the requested type wins.
//!
//! ```rust
//! use headsup_core::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Accent(&'static str);
//!
//! assert_eq!(local::<Accent>(), None);
//! with_local(Accent("green"), || {
//!     assert_eq!(local::<Accent>(), Some(Accent("green")));
//!     with_local(Accent("blue"), || {
//!         assert_eq!(local::<Accent>(), Some(Accent("blue")));
//!     });
//! });
//! ```
//!
//! Values are looked up by type, so wrap shared handles in a newtype when two
//! providers would otherwise collide.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// Provides `value` to everything called inside `f`.
pub fn with_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    // Pops the frame on unwind too.
    struct FrameGuard;
    impl Drop for FrameGuard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }

    let mut frame: HashMap<TypeId, Box<dyn Any>> = HashMap::new();
    frame.insert(TypeId::of::<T>(), Box::new(value));
    LOCALS_STACK.with(|st| st.borrow_mut().push(frame));
    let _guard = FrameGuard;
    f()
}

/// Innermost provided value of type `T`, if any.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}
