//! Generational tree layout for resolved families
//!
//! This crate turns the output of [`kinship::resolve`] into positioned boxes:
//! couples share a box, every generation sits on its own row and parents are
//! centered over their children. Connectors link parent boxes to child boxes,
//! landing on the matching side of a couple.
//!
//! # Layout Engines
//!
//! - [`FamilyTreeLayout`]: bottom-up centered layout with sibling bias
//!
//! # Example
//!
//! ```
//! use family_layout::{BoxMetrics, FamilyTreeLayout, LayoutEngine};
//! use kinship::{resolve, FamilyGraph, Gender, Person};
//!
//! let graph = FamilyGraph::new([
//!     Person::new("a", "Antonio", Gender::Male).with_partners(["b"]).with_children(["c"]),
//!     Person::new("b", "Beatriz", Gender::Female).with_children(["c"]),
//!     Person::new("c", "Carla", Gender::Female),
//! ]);
//! let nodes = resolve(&graph, &"c".into());
//!
//! let layout = FamilyTreeLayout::desktop().layout(&nodes, &graph, &BoxMetrics::desktop());
//!
//! let parents = layout.find(&"a".into()).unwrap();
//! let child = layout.find(&"c".into()).unwrap();
//! assert_eq!(parents.key, "a+b");
//! assert_eq!(parents.center_x(), child.center_x());
//! assert_eq!(layout.edges.len(), 1);
//! ```

mod engine;
mod geometry;
mod sizes;

pub mod tree;

// Re-export core types and traits
pub use engine::LayoutEngine;
pub use geometry::{Point, Vec2};
pub use sizes::{BoxKind, BoxMetrics, BoxSizes};

// Re-export the family tree layout types
pub use tree::{Anchor, Bias, BoxId, Connector, FamilyTreeLayout, PositionedBox, TreeLayout};
