use crate::graph::Slot;
use crate::{FamilyGraph, Person, PersonId, Relation, RenderNode};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Ancestors further up than this are left to the final sweep
pub const MAX_ANCESTOR_DEPTH: u8 = 6;
/// Descendants further down than this are left to the final sweep
pub const MAX_DESCENDANT_DEPTH: u8 = 6;

/// Resolve a pool of people relative to the focus
///
/// Convenience over [`resolve`] for callers holding plain records.
pub fn resolve_people(people: &[Person], focus: &PersonId) -> Vec<RenderNode> {
    let graph = FamilyGraph::new(people.iter().cloned());
    resolve(&graph, focus)
}

/// Label every person of the graph relative to the focus
///
/// Rules are applied in a fixed order and the first one reaching a person
/// wins. People not reached by any rule are added as generic relatives on the
/// focus generation, so the output always covers the whole graph. An unknown
/// focus yields an empty result. The output is sorted by generation, people of
/// the same generation keep their discovery order.
pub fn resolve(graph: &FamilyGraph, focus: &PersonId) -> Vec<RenderNode> {
    let Some(focus) = graph.slot(focus) else {
        debug!("Focus {focus} is not part of the graph");
        return Vec::new();
    };

    let mut resolver = Resolver::new(graph);
    resolver.tag(focus, 0, Relation::Focus);
    resolver.partners_and_in_laws(focus);
    resolver.ancestors(focus);
    resolver.step_parents(focus);
    resolver.siblings_and_nephews(focus);
    resolver.descendants(focus);
    resolver.uncles();
    resolver.cousins();
    resolver.kin_partners();
    resolver.sweep();

    resolver.into_nodes()
}

struct Resolver<'g> {
    graph: &'g FamilyGraph,
    tags: Vec<Option<(i32, Relation)>>,
    order: Vec<Slot>,
}

impl<'g> Resolver<'g> {
    fn new(graph: &'g FamilyGraph) -> Self {
        Self {
            graph,
            tags: vec![None; graph.len()],
            order: Vec::with_capacity(graph.len()),
        }
    }

    /// Returns false if the person already has a relation
    fn tag(&mut self, slot: Slot, generation: i32, relation: Relation) -> bool {
        if self.tags[slot].is_some() {
            return false;
        }
        trace!(
            "{} -> {relation:?} (gen {generation})",
            self.graph.person(slot).id
        );
        self.tags[slot] = Some((generation, relation));
        self.order.push(slot);
        true
    }

    /// Tagged people matching the predicate, in tagging order
    fn tagged<F>(&self, predicate: F) -> Vec<(Slot, i32, Relation)>
    where
        F: Fn(&Relation) -> bool,
    {
        self.order
            .iter()
            .filter_map(|&slot| {
                let (generation, relation) = self.tags[slot]?;
                predicate(&relation).then_some((slot, generation, relation))
            })
            .collect()
    }

    fn partners_and_in_laws(&mut self, focus: Slot) {
        let graph = self.graph;
        let partners = graph.partners(focus);

        for &partner in partners {
            self.tag(partner, 0, Relation::Partner);
        }
        for &partner in partners {
            for &parent in graph.parents(partner) {
                self.tag(parent, -1, Relation::ParentInLaw);
            }
        }
        for &partner in partners {
            for sibling in graph.siblings_of(partner) {
                self.tag(sibling, 0, Relation::SiblingInLaw);
            }
        }
    }

    /// Breadth-first walk up from the focus's parents
    fn ancestors(&mut self, focus: Slot) {
        let graph = self.graph;
        let mut queue = VecDeque::new();

        for &parent in graph.parents(focus) {
            if self.tag(parent, -1, Relation::Ancestor { depth: 1 }) {
                queue.push_back((parent, 1u8));
            }
        }

        while let Some((slot, depth)) = queue.pop_front() {
            let next = depth + 1;
            if next > MAX_ANCESTOR_DEPTH {
                continue;
            }
            for &parent in graph.parents(slot) {
                if self.tag(parent, -i32::from(next), Relation::Ancestor { depth: next }) {
                    queue.push_back((parent, next));
                }
            }
        }

        debug!("{} ancestors", self.tagged(Relation::is_ancestor).len());
    }

    fn step_parents(&mut self, focus: Slot) {
        let graph = self.graph;
        for &parent in graph.parents(focus) {
            for &partner in graph.partners(parent) {
                self.tag(partner, -1, Relation::StepParent);
            }
        }
    }

    fn siblings_and_nephews(&mut self, focus: Slot) {
        let graph = self.graph;
        let siblings = graph.siblings_of(focus);

        for &sibling in &siblings {
            self.tag(sibling, 0, Relation::Sibling);
        }
        for &sibling in &siblings {
            for &partner in graph.partners(sibling) {
                self.tag(partner, 0, Relation::SiblingInLaw);
            }
        }
        for &sibling in &siblings {
            for &child in graph.children(sibling) {
                self.tag(child, 1, Relation::Nephew);
            }
        }

        debug!("{} siblings", siblings.len());
    }

    /// Breadth-first walk down from the children of the focus and partners
    fn descendants(&mut self, focus: Slot) {
        let graph = self.graph;
        let mut seeds: Vec<Slot> = graph.children(focus).to_vec();
        for &partner in graph.partners(focus) {
            for &child in graph.children(partner) {
                if !seeds.contains(&child) {
                    seeds.push(child);
                }
            }
        }

        let mut queue = VecDeque::new();
        for child in seeds {
            if self.tag(child, 1, Relation::Descendant { depth: 1 }) {
                queue.push_back((child, 1u8));
            }
        }

        while let Some((slot, depth)) = queue.pop_front() {
            let generation = i32::from(depth);
            for &partner in graph.partners(slot) {
                self.tag(partner, generation, Relation::DescendantPartner { depth });
            }

            let next = depth + 1;
            if next > MAX_DESCENDANT_DEPTH {
                continue;
            }
            for &child in graph.children(slot) {
                if self.tag(child, i32::from(next), Relation::Descendant { depth: next }) {
                    queue.push_back((child, next));
                }
            }
        }
    }

    /// Siblings of every ancestor, at the ancestor's generation
    fn uncles(&mut self) {
        let graph = self.graph;
        for (slot, generation, relation) in self.tagged(Relation::is_ancestor) {
            let Relation::Ancestor { depth } = relation else {
                continue;
            };
            for sibling in graph.siblings_of(slot) {
                self.tag(sibling, generation, Relation::Uncle { depth });
            }
        }
    }

    /// First cousins through direct uncles, second cousins through great uncles
    fn cousins(&mut self) {
        let graph = self.graph;
        let uncles = self.tagged(|relation| matches!(relation, Relation::Uncle { depth: 1 | 2 }));

        for (slot, generation, relation) in uncles {
            match relation {
                Relation::Uncle { depth: 1 } => {
                    for &child in graph.children(slot) {
                        self.tag(child, generation + 1, Relation::Cousin { degree: 1 });
                    }
                }
                Relation::Uncle { depth: 2 } => {
                    let mut second_uncles = Vec::new();
                    for &child in graph.children(slot) {
                        if self.tag(child, generation + 1, Relation::SecondUncle) {
                            second_uncles.push(child);
                        }
                    }
                    for second_uncle in second_uncles {
                        for &child in graph.children(second_uncle) {
                            self.tag(child, generation + 2, Relation::Cousin { degree: 2 });
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn kin_partners(&mut self) {
        let graph = self.graph;
        for (slot, generation, relation) in self.tagged(|relation| relation.as_kin().is_some()) {
            let Some(kin) = relation.as_kin() else {
                continue;
            };
            let kin_gender = graph.person(slot).gender;
            for &partner in graph.partners(slot) {
                self.tag(partner, generation, Relation::PartnerOfKin { kin, kin_gender });
            }
        }
    }

    fn sweep(&mut self) {
        let mut swept = 0;
        for slot in 0..self.graph.len() {
            if self.tag(slot, 0, Relation::Relative) {
                swept += 1;
            }
        }
        if swept > 0 {
            debug!("{swept} people not reached from the focus");
        }
    }

    fn into_nodes(self) -> Vec<RenderNode> {
        let graph = self.graph;
        let tags = self.tags;
        let mut nodes: Vec<RenderNode> = self
            .order
            .into_iter()
            .filter_map(|slot| {
                let (generation, relation) = tags[slot]?;
                Some(RenderNode {
                    person: graph.person(slot).clone(),
                    generation,
                    relation,
                })
            })
            .collect();

        nodes.sort_by_key(|node| node.generation);
        nodes
    }
}
