//! Family graph model and relationship inference
//!
//! Given a pool of people linked by parent, child, partner and sibling edges,
//! [`resolve`] labels everyone relative to a focus person and assigns them a
//! generation: 0 for the focus, negative for ancestors, positive for
//! descendants.
//!
//! # Example
//!
//! ```
//! use kinship::{resolve, FamilyGraph, Gender, Person, Relation};
//!
//! let graph = FamilyGraph::new([
//!     Person::new("a", "Antonio", Gender::Male).with_children(["c"]),
//!     Person::new("b", "Beatriz", Gender::Female).with_children(["c"]),
//!     Person::new("c", "Carla", Gender::Female),
//! ]);
//!
//! let nodes = resolve(&graph, &"c".into());
//! assert_eq!(nodes.len(), 3);
//! assert_eq!(nodes[0].generation, -1);
//! assert_eq!(nodes[0].label(), "Padre");
//! assert_eq!(nodes[2].relation, Relation::Focus);
//! ```

mod graph;
mod person;
mod relation;
mod resolver;

pub mod document;

pub use graph::{FamilyGraph, Slot};
pub use person::{Gender, Person, PersonId};
pub use relation::{Kin, Relation, RenderNode};
pub use resolver::{resolve, resolve_people, MAX_ANCESTOR_DEPTH, MAX_DESCENDANT_DEPTH};

pub use document::{DocumentError, FamilyDocument};
