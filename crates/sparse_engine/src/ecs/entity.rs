//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// Opaque handle with no state of its own. Ids are handed out sequentially by
/// [`World`](super::World) and never recycled while a scene is loaded, so the
/// raw id doubles as the sparse-array index in every component store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create an entity handle from a raw id
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub const fn id(self) -> u32 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}
