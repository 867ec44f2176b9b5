use crate::Vec2;
use serde::{Deserialize, Serialize};

/// Shape of a box: one person or a couple sharing a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    Single,
    Couple,
}

/// Trait for providing box sizes during layout computation
pub trait BoxSizes {
    /// Get the size of a box of the given kind
    fn size(&self, kind: BoxKind) -> Vec2;
}

// Blanket implementation for closures
impl<F> BoxSizes for F
where
    F: Fn(BoxKind) -> Vec2,
{
    fn size(&self, kind: BoxKind) -> Vec2 {
        self(kind)
    }
}

/// Fixed box dimensions for a presentation context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxMetrics {
    pub single: Vec2,
    pub couple: Vec2,
}

impl BoxMetrics {
    pub fn desktop() -> Self {
        Self {
            single: Vec2::new(150.0, 70.0),
            couple: Vec2::new(310.0, 70.0),
        }
    }

    pub fn mobile() -> Self {
        Self {
            single: Vec2::new(110.0, 56.0),
            couple: Vec2::new(226.0, 56.0),
        }
    }
}

impl Default for BoxMetrics {
    fn default() -> Self {
        Self::desktop()
    }
}

impl BoxSizes for BoxMetrics {
    fn size(&self, kind: BoxKind) -> Vec2 {
        match kind {
            BoxKind::Single => self.single,
            BoxKind::Couple => self.couple,
        }
    }
}
