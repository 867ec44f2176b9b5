use crate::{BoxSizes, TreeLayout};
use kinship::{FamilyGraph, RenderNode};

/// A layout engine that positions resolved people as boxes
///
/// Implementations receive the resolver output, which fixes the generation
/// of every person, and the family graph used to look up parents, children
/// and siblings. Layouts never fail: incomplete or inconsistent data yields
/// a best-effort result.
pub trait LayoutEngine {
    /// Compute box positions and parent to child connectors
    fn layout<S>(&self, nodes: &[RenderNode], graph: &FamilyGraph, sizes: &S) -> TreeLayout
    where
        S: BoxSizes;
}
