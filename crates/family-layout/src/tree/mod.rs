mod bias;
mod boxes;
mod edges;
mod ordering;
mod positions;

use crate::{BoxKind, BoxSizes, LayoutEngine, Point, Vec2};
use derive_more::Display;
use kinship::{FamilyGraph, PersonId, RenderNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use bias::Bias;

use bias::sibling_bias;
use boxes::form_boxes;
use edges::{box_graph, connectors};
use ordering::focus_line;
use positions::Placer;

/// Index of a box in [`TreeLayout::boxes`]
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BoxId(pub usize);

/// Where a connector lands on its child box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Center,
    /// Left member of a couple
    Left,
    /// Right member of a couple
    Right,
}

/// A box with its final position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedBox {
    pub id: BoxId,
    /// Person id for singles, `left+right` for couples
    pub key: String,
    pub kind: BoxKind,
    /// One person, or a couple ordered left to right
    pub members: Vec<RenderNode>,
    pub generation: i32,
    /// Top left corner
    pub position: Point,
    pub size: Vec2,
    pub bias: Bias,
}

impl PositionedBox {
    pub fn center_x(&self) -> f32 {
        self.position.x + self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn contains(&self, person: &PersonId) -> bool {
        self.members.iter().any(|member| member.id() == person)
    }

    /// Point where an incoming connector should end
    pub fn anchor_point(&self, anchor: Anchor) -> Point {
        let fraction = match anchor {
            Anchor::Center => 0.5,
            Anchor::Left => 0.25,
            Anchor::Right => 0.75,
        };
        Point::new(self.position.x + self.size.x * fraction, self.position.y)
    }

    /// Point where outgoing connectors start
    pub fn bottom_center(&self) -> Point {
        self.anchor_point(Anchor::Center)
            .offset(Vec2::new(0.0, self.size.y))
    }
}

/// Deduplicated parent box to child box edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from: BoxId,
    pub to: BoxId,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeLayout {
    pub boxes: Vec<PositionedBox>,
    pub edges: Vec<Connector>,
}

impl TreeLayout {
    /// Box holding the given person
    pub fn find(&self, person: &PersonId) -> Option<&PositionedBox> {
        self.boxes.iter().find(|b| b.contains(person))
    }

    pub fn get(&self, id: BoxId) -> Option<&PositionedBox> {
        self.boxes.get(id.0)
    }
}

/// Configuration for the centered family tree layout
#[derive(Debug, Clone)]
pub struct FamilyTreeLayout {
    /// Horizontal gap between sibling subtrees
    pub sibling_gap: f32,

    /// Horizontal gap between unrelated families laid out side by side
    pub family_gap: f32,

    /// Vertical distance between two generations
    pub level_height: f32,
}

impl Default for FamilyTreeLayout {
    fn default() -> Self {
        Self::desktop()
    }
}

impl FamilyTreeLayout {
    pub fn desktop() -> Self {
        Self {
            sibling_gap: 30.0,
            family_gap: 80.0,
            level_height: 140.0,
        }
    }

    pub fn mobile() -> Self {
        Self {
            sibling_gap: 16.0,
            family_gap: 40.0,
            level_height: 110.0,
        }
    }
}

impl LayoutEngine for FamilyTreeLayout {
    fn layout<S>(&self, nodes: &[RenderNode], graph: &FamilyGraph, sizes: &S) -> TreeLayout
    where
        S: BoxSizes,
    {
        let family_boxes = form_boxes(nodes, graph, sizes);
        if family_boxes.is_empty() {
            return TreeLayout::default();
        }

        let box_graph = box_graph(&family_boxes);
        let bias = sibling_bias(&family_boxes, graph);
        let focus_line = focus_line(&box_graph, &family_boxes);

        debug!(
            "Layout of {} boxes and {} connectors",
            family_boxes.len(),
            box_graph.edge_count()
        );

        let mut placer = Placer::new(&family_boxes, &box_graph, &bias, &focus_line, self.sibling_gap);
        let offsets = placer.place_all(self.family_gap);

        let boxes = family_boxes
            .iter()
            .zip(offsets)
            .map(|(family_box, x)| PositionedBox {
                id: family_box.id,
                key: family_box.key.clone(),
                kind: family_box.kind(),
                members: family_box.members.iter().map(|&i| nodes[i].clone()).collect(),
                generation: family_box.generation,
                position: Point::new(x, family_box.generation as f32 * self.level_height),
                size: family_box.size,
                bias: bias[family_box.id.0],
            })
            .collect();

        TreeLayout {
            boxes,
            edges: connectors(&box_graph),
        }
    }
}
