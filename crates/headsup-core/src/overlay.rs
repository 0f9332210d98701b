//! Overlay layer: transient entries drawn above the host's normal content.
//!
//! An entry is a builder closure. The host calls [`OverlayLayer::build_all`]
//! when it paints (or whenever [`OverlayLayer::needs_build`] reports dirty
//! entries) and renders whatever the builders return, in insertion order.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::Size;

new_key_type! {
    /// Handle to an inserted overlay entry.
    pub struct OverlayKey;
}

/// Screen metrics handed to every builder.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub screen: Size,
    /// Height of the status bar / notch area at the top of the screen.
    pub safe_area_top: f32,
}

pub type OverlayBuilder<T> = Rc<dyn Fn(&Viewport) -> Option<T>>;

struct OverlayEntry<T> {
    builder: OverlayBuilder<T>,
    dirty: bool,
}

struct LayerState<T> {
    entries: SlotMap<OverlayKey, OverlayEntry<T>>,
    order: Vec<OverlayKey>,
    viewport: Viewport,
}

/// Cloneable handle to a shared overlay layer.
pub struct OverlayLayer<T> {
    inner: Rc<RefCell<LayerState<T>>>,
}

impl<T> Clone for OverlayLayer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> OverlayLayer<T> {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LayerState {
                entries: SlotMap::with_key(),
                order: Vec::new(),
                viewport,
            })),
        }
    }

    pub fn insert(&self, builder: impl Fn(&Viewport) -> Option<T> + 'static) -> OverlayKey {
        let mut s = self.inner.borrow_mut();
        let key = s.entries.insert(OverlayEntry {
            builder: Rc::new(builder),
            dirty: true,
        });
        s.order.push(key);
        log::debug!("overlay: inserted {:?} ({} live)", key, s.order.len());
        key
    }

    /// Removes an entry. Returns false if it was already gone.
    pub fn remove(&self, key: OverlayKey) -> bool {
        let mut s = self.inner.borrow_mut();
        if s.entries.remove(key).is_none() {
            return false;
        }
        s.order.retain(|k| *k != key);
        log::debug!("overlay: removed {:?} ({} live)", key, s.order.len());
        true
    }

    pub fn contains(&self, key: OverlayKey) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Schedules a rebuild of `key` on the next host pass.
    pub fn mark_needs_build(&self, key: OverlayKey) {
        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(key) {
            entry.dirty = true;
        }
    }

    pub fn needs_build(&self) -> bool {
        self.inner.borrow().entries.values().any(|e| e.dirty)
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        let mut s = self.inner.borrow_mut();
        s.viewport = viewport;
        for entry in s.entries.values_mut() {
            entry.dirty = true;
        }
    }

    /// Builds a single entry and clears its dirty flag.
    pub fn build(&self, key: OverlayKey) -> Option<T> {
        let (builder, viewport) = {
            let mut s = self.inner.borrow_mut();
            let viewport = s.viewport;
            let entry = s.entries.get_mut(key)?;
            entry.dirty = false;
            (entry.builder.clone(), viewport)
        };
        // Builders may call back into the layer, so no borrow is held here.
        builder(&viewport)
    }

    /// Builds every live entry, bottom to top.
    pub fn build_all(&self) -> Vec<T> {
        let keys = self.inner.borrow().order.clone();
        keys.into_iter().filter_map(|key| self.build(key)).collect()
    }
}
