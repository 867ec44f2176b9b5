use crate::{Person, PersonId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Dense index of a person inside a [`FamilyGraph`]
pub type Slot = usize;

/// Read-only adjacency index over a pool of people
///
/// Built once per invocation. Ids are interned to dense slots following the
/// pool order, edges pointing to unknown people or to the person itself are
/// dropped, and every relationship is closed symmetrically: a parent edge
/// implies the matching child edge, partner and sibling edges go both ways.
/// Parent ids without a record are remembered only to link siblings.
/// The caller's records are left untouched.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    people: Vec<Person>,
    slots: HashMap<PersonId, Slot>,
    parents: Vec<Vec<Slot>>,
    children: Vec<Vec<Slot>>,
    partners: Vec<Vec<Slot>>,
    siblings: Vec<Vec<Slot>>,
    /// Parent ids without a record, with everyone listing them
    unrecorded_parents: HashMap<PersonId, Vec<Slot>>,
}

fn push_unique(list: &mut Vec<Slot>, slot: Slot) {
    if !list.contains(&slot) {
        list.push(slot);
    }
}

impl FamilyGraph {
    pub fn new<I>(people: I) -> Self
    where
        I: IntoIterator<Item = Person>,
    {
        let mut graph = Self::default();

        for person in people {
            if graph.slots.contains_key(&person.id) {
                warn!("Duplicate person {}, keeping the first record", person.id);
                continue;
            }
            graph.slots.insert(person.id.clone(), graph.people.len());
            graph.people.push(person);
        }

        let len = graph.people.len();
        graph.parents = vec![Vec::new(); len];
        graph.children = vec![Vec::new(); len];
        graph.partners = vec![Vec::new(); len];
        graph.siblings = vec![Vec::new(); len];

        for slot in 0..len {
            let person = &graph.people[slot];
            let parents = graph.resolve_all(slot, &person.parents);
            let children = graph.resolve_all(slot, &person.children);
            let partners = graph.resolve_all(slot, &person.partners);
            let siblings = graph.resolve_all(slot, &person.siblings);
            let unrecorded: Vec<PersonId> = person
                .parents
                .iter()
                .filter(|id| !graph.slots.contains_key(*id))
                .cloned()
                .collect();

            for id in unrecorded {
                push_unique(graph.unrecorded_parents.entry(id).or_default(), slot);
            }

            for parent in parents {
                graph.link_parent(parent, slot);
            }
            for child in children {
                graph.link_parent(slot, child);
            }
            for partner in partners {
                push_unique(&mut graph.partners[slot], partner);
                push_unique(&mut graph.partners[partner], slot);
            }
            for sibling in siblings {
                push_unique(&mut graph.siblings[slot], sibling);
                push_unique(&mut graph.siblings[sibling], slot);
            }
        }

        debug!("Indexed {len} people");

        graph
    }

    fn resolve_all(&self, owner: Slot, ids: &[PersonId]) -> Vec<Slot> {
        ids.iter()
            .filter_map(|id| match self.slots.get(id) {
                Some(&slot) if slot != owner => Some(slot),
                Some(_) => {
                    warn!("{} references itself, ignoring", self.people[owner].id);
                    None
                }
                None => {
                    debug!("{} references unknown person {id}", self.people[owner].id);
                    None
                }
            })
            .collect()
    }

    fn link_parent(&mut self, parent: Slot, child: Slot) {
        push_unique(&mut self.children[parent], child);
        push_unique(&mut self.parents[child], parent);
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn slot(&self, id: &PersonId) -> Option<Slot> {
        self.slots.get(id).copied()
    }

    pub fn person(&self, slot: Slot) -> &Person {
        &self.people[slot]
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.slot(id).map(|slot| &self.people[slot])
    }

    /// People in pool order
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn parents(&self, slot: Slot) -> &[Slot] {
        &self.parents[slot]
    }

    pub fn children(&self, slot: Slot) -> &[Slot] {
        &self.children[slot]
    }

    pub fn partners(&self, slot: Slot) -> &[Slot] {
        &self.partners[slot]
    }

    /// Explicit sibling edges, closed in both directions
    pub fn sibling_links(&self, slot: Slot) -> &[Slot] {
        &self.siblings[slot]
    }

    pub fn are_partners(&self, a: Slot, b: Slot) -> bool {
        self.partners[a].contains(&b)
    }

    pub fn is_parent_of(&self, parent: Slot, child: Slot) -> bool {
        self.children[parent].contains(&child)
    }

    pub fn share_child(&self, a: Slot, b: Slot) -> bool {
        self.children[a].iter().any(|child| self.children[b].contains(child))
    }

    /// Siblings of a person, tolerant of incomplete parent data
    ///
    /// Union, in this order, of: the children of any recorded parent, the
    /// explicit sibling edges, the reverse explicit edges and anyone sharing
    /// at least one parent id. The closed sibling list holds both explicit
    /// directions. Parent ids with a record are matched through that parent's
    /// children, parent ids without one through the people listing the same
    /// id.
    pub fn siblings_of(&self, slot: Slot) -> Vec<Slot> {
        let mut siblings = Vec::new();

        for &parent in &self.parents[slot] {
            for &child in &self.children[parent] {
                if child != slot {
                    push_unique(&mut siblings, child);
                }
            }
        }

        for &sibling in &self.siblings[slot] {
            push_unique(&mut siblings, sibling);
        }

        for id in &self.people[slot].parents {
            let Some(sharing) = self.unrecorded_parents.get(id) else {
                continue;
            };
            for &other in sharing {
                if other != slot {
                    push_unique(&mut siblings, other);
                }
            }
        }

        siblings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;
    use test_log::test;

    fn slot(graph: &FamilyGraph, id: &str) -> Slot {
        graph.slot(&id.into()).unwrap()
    }

    #[test]
    fn closes_one_sided_edges() {
        let graph = FamilyGraph::new([
            Person::new("dad", "Luis", Gender::Male).with_children(["kid"]),
            Person::new("mum", "Eva", Gender::Female).with_partners(["dad"]),
            Person::new("kid", "Leo", Gender::Male).with_parents(["mum"]),
        ]);

        let (dad, mum, kid) = (slot(&graph, "dad"), slot(&graph, "mum"), slot(&graph, "kid"));
        assert_eq!(graph.parents(kid), &[dad, mum]);
        assert_eq!(graph.children(mum), &[kid]);
        assert!(graph.are_partners(dad, mum));
        assert!(graph.are_partners(mum, dad));
        assert!(graph.share_child(dad, mum));
    }

    #[test]
    fn drops_unknown_and_self_references() {
        let graph = FamilyGraph::new([
            Person::new("a", "Ana", Gender::Female).with_parents(["a", "ghost"]),
            Person::new("a", "Duplicate", Gender::Male),
        ]);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.person(0).name, "Ana");
        assert!(graph.parents(0).is_empty());
    }

    #[test]
    fn siblings_from_partial_parents() {
        // Only one shared parent, and each child records a different set
        let graph = FamilyGraph::new([
            Person::new("p", "Pablo", Gender::Male),
            Person::new("q", "Quima", Gender::Female),
            Person::new("a", "Ana", Gender::Female).with_parents(["p", "q"]),
            Person::new("b", "Bea", Gender::Female).with_parents(["p"]),
            Person::new("c", "Cris", Gender::Male).with_siblings(["a"]),
        ]);

        let (a, b, c) = (slot(&graph, "a"), slot(&graph, "b"), slot(&graph, "c"));
        assert_eq!(graph.siblings_of(a), vec![b, c]);
        assert_eq!(graph.siblings_of(b), vec![a]);
        assert_eq!(graph.siblings_of(c), vec![a]);
    }

    #[test]
    fn sibling_resolution_is_symmetric() {
        let graph = FamilyGraph::new([
            Person::new("p", "Pablo", Gender::Male).with_children(["a", "b"]),
            Person::new("a", "Ana", Gender::Female),
            Person::new("b", "Bea", Gender::Female).with_siblings(["d"]),
            Person::new("d", "Dani", Gender::Male),
            Person::new("e", "Elena", Gender::Female).with_parents(["p"]),
        ]);

        assert_symmetric(&graph);
    }

    #[test]
    fn siblings_through_unrecorded_parent() {
        // Nobody has a record for "ghost"
        let graph = FamilyGraph::new([
            Person::new("a", "Ana", Gender::Female).with_parents(["ghost"]),
            Person::new("b", "Bea", Gender::Female).with_parents(["ghost", "p"]),
            Person::new("p", "Pablo", Gender::Male),
            Person::new("c", "Cris", Gender::Male).with_parents(["p"]),
            Person::new("z", "Zoe", Gender::Female).with_parents(["other"]),
        ]);

        let (a, b, c, z) = (
            slot(&graph, "a"),
            slot(&graph, "b"),
            slot(&graph, "c"),
            slot(&graph, "z"),
        );
        assert_eq!(graph.siblings_of(a), vec![b]);
        assert_eq!(graph.siblings_of(b), vec![c, a]);
        assert!(graph.siblings_of(z).is_empty());
        assert!(graph.parents(a).is_empty());
        assert_symmetric(&graph);
    }

    fn assert_symmetric(graph: &FamilyGraph) {
        for x in 0..graph.len() {
            for y in graph.siblings_of(x) {
                assert!(
                    graph.siblings_of(y).contains(&x),
                    "{} lists {} but not the other way round",
                    graph.person(x).id,
                    graph.person(y).id
                );
            }
        }
    }
}
