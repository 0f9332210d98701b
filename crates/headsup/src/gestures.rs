use headsup_core::Vec2;

/// End of a drag, as reported by the host's gesture recognizer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragEndDetails {
    /// Pointer velocity at release, in logical pixels per second.
    pub velocity: Vec2,
}

impl DragEndDetails {
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}
