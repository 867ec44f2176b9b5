use super::boxes::FamilyBox;
use super::{Anchor, BoxId, Connector};
use kinship::Slot;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use tracing::trace;

/// Parent box to child box edges, weighted by the anchor on the child box
pub(crate) type BoxGraph = DiGraphMap<BoxId, Anchor>;

/// Connect every box to the boxes holding its members' parents
///
/// Both members of a couple usually point to the same child, so only the
/// first edge of each parent box and child box pair is kept. Parents that
/// are not rendered are skipped.
pub(crate) fn box_graph(boxes: &[FamilyBox]) -> BoxGraph {
    let box_of: HashMap<Slot, BoxId> = boxes
        .iter()
        .flat_map(|b| b.slots.iter().map(move |&slot| (slot, b.id)))
        .collect();

    let mut graph = DiGraphMap::new();
    for family_box in boxes {
        graph.add_node(family_box.id);
    }

    for child_box in boxes {
        for (&member, parents) in child_box.slots.iter().zip(&child_box.parents) {
            for parent in parents {
                let Some(&parent_box) = box_of.get(parent) else {
                    continue;
                };
                if parent_box == child_box.id || graph.contains_edge(parent_box, child_box.id) {
                    continue;
                }
                let anchor = child_box.anchor_of(member);
                trace!("Connector {parent_box} -> {} ({anchor:?})", child_box.id);
                graph.add_edge(parent_box, child_box.id, anchor);
            }
        }
    }

    graph
}

pub(crate) fn connectors(graph: &BoxGraph) -> Vec<Connector> {
    graph
        .all_edges()
        .map(|(from, to, &anchor)| Connector { from, to, anchor })
        .collect()
}
