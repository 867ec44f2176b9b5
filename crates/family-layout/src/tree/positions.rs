use super::boxes::FamilyBox;
use super::edges::BoxGraph;
use super::ordering::order_boxes;
use super::{Bias, BoxId};
use petgraph::Direction::{Incoming, Outgoing};
use std::collections::HashSet;
use tracing::{debug, trace};

/// A laid out subtree, with box offsets relative to its left edge
#[derive(Debug)]
struct Block {
    width: f32,
    /// Horizontal center of the subtree root
    center: f32,
    nodes: Vec<(BoxId, f32)>,
}

/// Places boxes horizontally, parents centered over their children
///
/// A child box is nested under the first parent box that reaches it, so only
/// that parent is centered over it. Any other parent box of the same child,
/// typically the second set of grandparents, is laid out as its own family
/// beside the first and keeps only its connector to the child.
pub(crate) struct Placer<'a> {
    boxes: &'a [FamilyBox],
    graph: &'a BoxGraph,
    bias: &'a [Bias],
    focus_line: &'a HashSet<BoxId>,
    sibling_gap: f32,
    placed: Vec<bool>,
}

impl<'a> Placer<'a> {
    pub fn new(
        boxes: &'a [FamilyBox],
        graph: &'a BoxGraph,
        bias: &'a [Bias],
        focus_line: &'a HashSet<BoxId>,
        sibling_gap: f32,
    ) -> Self {
        Self {
            boxes,
            graph,
            bias,
            focus_line,
            sibling_gap,
            placed: vec![false; boxes.len()],
        }
    }

    fn ordered(&self, mut ids: Vec<BoxId>) -> Vec<BoxId> {
        order_boxes(&mut ids, self.boxes, self.bias, self.focus_line);
        ids
    }

    /// Left edge of every box, indexed by box id
    ///
    /// Root families are laid out side by side, followed by any box no root
    /// reaches. The result is centered on x = 0.
    pub fn place_all(&mut self, family_gap: f32) -> Vec<f32> {
        let boxes = self.boxes;
        let roots = self.ordered(
            boxes
                .iter()
                .map(|b| b.id)
                .filter(|&id| self.graph.neighbors_directed(id, Incoming).next().is_none())
                .collect(),
        );
        debug!("Placing {} root families", roots.len());

        let mut xs = vec![0.0; boxes.len()];
        let mut cursor = 0.0;

        let leftovers = boxes.iter().map(|b| b.id);
        for (index, id) in roots.iter().copied().chain(leftovers).enumerate() {
            if self.placed[id.0] {
                continue;
            }
            if index >= roots.len() {
                debug!("Box {} is not reachable from a root, placing it apart", boxes[id.0].key);
            }

            let block = self.subtree(id);
            for (node, x) in block.nodes {
                xs[node.0] = cursor + x;
            }
            cursor += block.width + family_gap;
        }

        let left = xs.iter().copied().fold(f32::INFINITY, f32::min);
        let right = xs
            .iter()
            .zip(boxes)
            .map(|(x, b)| x + b.size.x)
            .fold(f32::NEG_INFINITY, f32::max);
        if left.is_finite() && right.is_finite() {
            let shift = -(left + right) / 2.0;
            xs.iter_mut().for_each(|x| *x += shift);
        }

        xs
    }

    /// Lay out a box and the children it claims
    ///
    /// A child belongs to the first parent box that reaches it and must sit
    /// on a later generation than that parent.
    fn subtree(&mut self, id: BoxId) -> Block {
        self.placed[id.0] = true;
        let boxes = self.boxes;
        let family_box = &boxes[id.0];
        let width = family_box.size.x;

        let children = self.ordered(
            self.graph
                .neighbors_directed(id, Outgoing)
                .filter(|child| {
                    !self.placed[child.0] && boxes[child.0].generation > family_box.generation
                })
                .collect(),
        );

        let mut nodes = Vec::new();
        let mut centers = Vec::new();
        let mut cursor = 0.0;

        for child in children {
            // Claimed by a sibling subtree laid out just before
            if self.placed[child.0] {
                continue;
            }
            let block = self.subtree(child);
            centers.push(cursor + block.center);
            nodes.extend(block.nodes.into_iter().map(|(node, x)| (node, cursor + x)));
            cursor += block.width + self.sibling_gap;
        }

        let (Some(&first), Some(&last)) = (centers.first(), centers.last()) else {
            return Block {
                width,
                center: width / 2.0,
                nodes: vec![(id, 0.0)],
            };
        };

        let children_width = cursor - self.sibling_gap;
        let children_center = (first + last) / 2.0;
        let half = width / 2.0;
        trace!(
            "Box {} over {} children, {children_width} wide",
            family_box.key,
            centers.len()
        );

        if half > children_center {
            // Box sticks out on the left, push the children right
            let shift = half - children_center;
            nodes.iter_mut().for_each(|(_, x)| *x += shift);
            nodes.push((id, 0.0));
            Block {
                width: width.max(children_width + shift),
                center: half,
                nodes,
            }
        } else {
            let x = children_center - half;
            nodes.push((id, x));
            Block {
                width: children_width.max(x + width),
                center: children_center,
                nodes,
            }
        }
    }
}
