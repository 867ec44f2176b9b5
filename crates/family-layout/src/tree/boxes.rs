use super::{Anchor, BoxId};
use crate::{BoxKind, BoxSizes, Vec2};
use kinship::{FamilyGraph, Gender, RenderNode, Relation, Slot};
use std::collections::{BTreeMap, HashSet};
use tracing::{trace, warn};

/// A single person or a couple, before positioning
#[derive(Debug, Clone)]
pub(crate) struct FamilyBox {
    pub id: BoxId,
    pub key: String,
    /// Indices into the render nodes, left to right
    pub members: Vec<usize>,
    /// Graph slots of the members, left to right
    pub slots: Vec<Slot>,
    /// Recorded parents of each member
    pub parents: Vec<Vec<Slot>>,
    pub generation: i32,
    pub size: Vec2,
    pub focus: bool,
}

impl FamilyBox {
    fn new<S>(
        id: BoxId,
        members: &[(usize, Slot)],
        generation: i32,
        nodes: &[RenderNode],
        graph: &FamilyGraph,
        sizes: &S,
    ) -> Self
    where
        S: BoxSizes,
    {
        let kind = if members.len() > 1 {
            BoxKind::Couple
        } else {
            BoxKind::Single
        };
        let key = members
            .iter()
            .map(|&(index, _)| nodes[index].id().as_str())
            .collect::<Vec<_>>()
            .join("+");

        Self {
            id,
            key,
            members: members.iter().map(|&(index, _)| index).collect(),
            slots: members.iter().map(|&(_, slot)| slot).collect(),
            parents: members
                .iter()
                .map(|&(_, slot)| graph.parents(slot).to_vec())
                .collect(),
            generation,
            size: sizes.size(kind),
            focus: members
                .iter()
                .any(|&(index, _)| nodes[index].relation == Relation::Focus),
        }
    }

    pub fn kind(&self) -> BoxKind {
        if self.slots.len() > 1 {
            BoxKind::Couple
        } else {
            BoxKind::Single
        }
    }

    pub fn is_couple(&self) -> bool {
        self.kind() == BoxKind::Couple
    }

    /// Side of the box a connector to this member should target
    pub fn anchor_of(&self, slot: Slot) -> Anchor {
        match self.slots.iter().position(|&s| s == slot) {
            Some(0) if self.is_couple() => Anchor::Left,
            Some(_) if self.is_couple() => Anchor::Right,
            _ => Anchor::Center,
        }
    }
}

/// Whether `a` goes to the left of `b` inside a couple box
///
/// Men go left and women right, otherwise the smaller id goes left.
pub(crate) fn goes_left(a: &RenderNode, b: &RenderNode) -> bool {
    match (a.gender(), b.gender()) {
        (Gender::Male, Gender::Female) => true,
        (Gender::Female, Gender::Male) => false,
        _ => a.id() <= b.id(),
    }
}

/// Group the render nodes of every generation into single and couple boxes
///
/// A person is paired with a declared partner of the same generation when
/// one is still free, or else with a co-parent: someone of the same
/// generation sharing a child with them whose own declared partners are
/// all taken or not rendered.
pub(crate) fn form_boxes<S>(nodes: &[RenderNode], graph: &FamilyGraph, sizes: &S) -> Vec<FamilyBox>
where
    S: BoxSizes,
{
    let mut generations: BTreeMap<i32, Vec<(usize, Slot)>> = BTreeMap::new();
    let mut seen = HashSet::new();

    for (index, node) in nodes.iter().enumerate() {
        let Some(slot) = graph.slot(node.id()) else {
            warn!("{} is not part of the family graph, skipping", node.id());
            continue;
        };
        if !seen.insert(slot) {
            warn!("{} appears twice in the render nodes, skipping", node.id());
            continue;
        }
        generations.entry(node.generation).or_default().push((index, slot));
    }

    let mut boxes = Vec::new();

    for (generation, members) in generations {
        let present: HashSet<Slot> = members.iter().map(|&(_, slot)| slot).collect();
        let mut processed: HashSet<Slot> = HashSet::new();

        for &(index, slot) in &members {
            if !processed.insert(slot) {
                continue;
            }

            let free = |other: Slot| present.contains(&other) && !processed.contains(&other);
            let declared = graph.partners(slot).iter().copied().find(|&p| free(p));
            let mate = declared.or_else(|| {
                members.iter().map(|&(_, other)| other).find(|&other| {
                    free(other)
                        && graph.share_child(slot, other)
                        && !graph.partners(other).iter().any(|&p| free(p))
                })
            });

            let id = BoxId(boxes.len());
            let family_box = match mate {
                Some(mate) => {
                    let mate_index = members
                        .iter()
                        .find(|&&(_, other)| other == mate)
                        .map_or(index, |&(mate_index, _)| mate_index);
                    let pair = if goes_left(&nodes[index], &nodes[mate_index]) {
                        [(index, slot), (mate_index, mate)]
                    } else {
                        [(mate_index, mate), (index, slot)]
                    };
                    processed.insert(mate);
                    FamilyBox::new(id, &pair, generation, nodes, graph, sizes)
                }
                None => FamilyBox::new(id, &[(index, slot)], generation, nodes, graph, sizes),
            };

            trace!("Box {} = {} (gen {generation})", family_box.id, family_box.key);
            boxes.push(family_box);
        }
    }

    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxMetrics;
    use kinship::{resolve, Person};
    use test_log::test;

    fn boxes_for(people: Vec<Person>, focus: &str) -> Vec<String> {
        let graph = FamilyGraph::new(people);
        let nodes = resolve(&graph, &focus.into());
        form_boxes(&nodes, &graph, &BoxMetrics::desktop())
            .into_iter()
            .map(|b| b.key)
            .collect()
    }

    #[test]
    fn couples_from_declared_partners() {
        let keys = boxes_for(
            vec![
                Person::new("b", "Beatriz", Gender::Female).with_partners(["a"]),
                Person::new("a", "Antonio", Gender::Male).with_children(["c"]),
                Person::new("c", "Carla", Gender::Female).with_parents(["b"]),
            ],
            "c",
        );
        assert_eq!(keys, ["a+b", "c"]);
    }

    #[test]
    fn unmarried_co_parents_share_a_box() {
        let keys = boxes_for(
            vec![
                Person::new("m", "Marta", Gender::Female),
                Person::new("n", "Nico", Gender::Male),
                Person::new("k", "Kike", Gender::Male).with_parents(["m", "n"]),
            ],
            "k",
        );
        assert_eq!(keys, ["n+m", "k"]);
    }

    #[test]
    fn declared_partner_wins_over_co_parent() {
        // x had a child with y, but x is married to z
        let keys = boxes_for(
            vec![
                Person::new("me", "Marta", Gender::Female).with_siblings(["x", "y", "z"]),
                Person::new("x", "Xavi", Gender::Male)
                    .with_partners(["z"])
                    .with_children(["kid"]),
                Person::new("y", "Yolanda", Gender::Female).with_children(["kid"]),
                Person::new("z", "Zoe", Gender::Female),
                Person::new("kid", "Kai", Gender::Male),
            ],
            "me",
        );
        assert!(keys.contains(&"x+z".to_string()), "{keys:?}");
        assert!(keys.contains(&"y".to_string()), "{keys:?}");
    }

    #[test]
    fn couple_order_is_canonical() {
        let first = boxes_for(
            vec![
                Person::new("w1", "Ana", Gender::Female).with_partners(["w2"]),
                Person::new("w2", "Bea", Gender::Female),
            ],
            "w1",
        );
        let second = boxes_for(
            vec![
                Person::new("w2", "Bea", Gender::Female).with_partners(["w1"]),
                Person::new("w1", "Ana", Gender::Female),
            ],
            "w2",
        );
        assert_eq!(first, ["w1+w2"]);
        assert_eq!(first, second);
    }

    #[test]
    fn extra_partner_stays_single() {
        let keys = boxes_for(
            vec![
                Person::new("a", "Antonio", Gender::Male).with_partners(["b", "c"]),
                Person::new("b", "Beatriz", Gender::Female),
                Person::new("c", "Clara", Gender::Female),
            ],
            "a",
        );
        assert_eq!(keys, ["a+b", "c"]);
    }

    #[test]
    fn couple_anchors() {
        let graph = FamilyGraph::new([
            Person::new("a", "Antonio", Gender::Male).with_partners(["b"]),
            Person::new("b", "Beatriz", Gender::Female),
        ]);
        let nodes = resolve(&graph, &"b".into());
        let boxes = form_boxes(&nodes, &graph, &BoxMetrics::desktop());

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].kind(), BoxKind::Couple);
        assert_eq!(boxes[0].anchor_of(graph.slot(&"a".into()).unwrap()), Anchor::Left);
        assert_eq!(boxes[0].anchor_of(graph.slot(&"b".into()).unwrap()), Anchor::Right);
        assert!(boxes[0].focus);
    }
}
