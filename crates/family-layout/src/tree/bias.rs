use super::boxes::FamilyBox;
use kinship::{FamilyGraph, Slot};
use serde::{Deserialize, Serialize};

/// Side a box is attracted to when ordering siblings
///
/// Relatives of the left member of a couple gather on the left, relatives of
/// the right member on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum Bias {
    Left = -1000,
    #[default]
    Neutral = 0,
    Right = 1000,
}

impl Bias {
    pub fn weight(self) -> i32 {
        self as i32
    }
}

/// Compute the bias of every box, indexed by box id
///
/// A box is drawn towards a side of a couple when one of its members is a
/// sibling of that side's member (couple on the same generation) or a parent
/// of it (couple on the next generation).
pub(crate) fn sibling_bias(boxes: &[FamilyBox], graph: &FamilyGraph) -> Vec<Bias> {
    let couples: Vec<&FamilyBox> = boxes.iter().filter(|b| b.is_couple()).collect();

    boxes
        .iter()
        .map(|family_box| {
            let siblings: Vec<Slot> = family_box
                .slots
                .iter()
                .flat_map(|&member| graph.siblings_of(member))
                .collect();

            let related = |couple: &FamilyBox, target: Slot| {
                if couple.generation == family_box.generation {
                    siblings.contains(&target)
                } else if couple.generation == family_box.generation + 1 {
                    family_box
                        .slots
                        .iter()
                        .any(|&member| graph.is_parent_of(member, target))
                } else {
                    false
                }
            };

            let (mut left, mut right) = (false, false);
            for couple in couples.iter().filter(|c| c.id != family_box.id) {
                left |= related(couple, couple.slots[0]);
                right |= related(couple, couple.slots[1]);
            }

            match (left, right) {
                (true, false) => Bias::Left,
                (false, true) => Bias::Right,
                _ => Bias::Neutral,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::boxes::form_boxes;
    use super::*;
    use crate::BoxMetrics;
    use kinship::{resolve, Gender, Person};
    use std::collections::HashMap;
    use test_log::test;

    fn bias_by_key(people: Vec<Person>, focus: &str) -> HashMap<String, Bias> {
        let graph = FamilyGraph::new(people);
        let nodes = resolve(&graph, &focus.into());
        let boxes = form_boxes(&nodes, &graph, &BoxMetrics::desktop());
        let bias = sibling_bias(&boxes, &graph);
        boxes.into_iter().map(|b| (b.key, bias[b.id.0])).collect()
    }

    #[test]
    fn parents_follow_their_child_side() {
        let bias = bias_by_key(
            vec![
                Person::new("w", "Wendy", Gender::Female)
                    .with_partners(["h"])
                    .with_parents(["wd", "wm"]),
                Person::new("h", "Hugo", Gender::Male).with_parents(["hd", "hm"]),
                Person::new("wd", "Walter", Gender::Male).with_partners(["wm"]),
                Person::new("wm", "Wanda", Gender::Female),
                Person::new("hd", "Héctor", Gender::Male).with_partners(["hm"]),
                Person::new("hm", "Helena", Gender::Female),
            ],
            "w",
        );

        assert_eq!(bias["hd+hm"], Bias::Left);
        assert_eq!(bias["wd+wm"], Bias::Right);
        assert_eq!(bias["h+w"], Bias::Neutral);
    }

    #[test]
    fn siblings_follow_their_sibling_side() {
        let bias = bias_by_key(
            vec![
                Person::new("w", "Wendy", Gender::Female)
                    .with_partners(["h"])
                    .with_siblings(["ws"]),
                Person::new("h", "Hugo", Gender::Male).with_siblings(["hs"]),
                Person::new("ws", "Wilma", Gender::Female),
                Person::new("hs", "Hilda", Gender::Female),
            ],
            "w",
        );

        assert_eq!(bias["hs"], Bias::Left);
        assert_eq!(bias["ws"], Bias::Right);
    }

    #[test]
    fn related_to_both_sides_is_neutral() {
        // x is a sibling of both spouses
        let bias = bias_by_key(
            vec![
                Person::new("w", "Wendy", Gender::Female)
                    .with_partners(["h"])
                    .with_siblings(["x"]),
                Person::new("h", "Hugo", Gender::Male).with_siblings(["x"]),
                Person::new("x", "Xavi", Gender::Male),
            ],
            "w",
        );

        assert_eq!(bias["x"], Bias::Neutral);
        assert_eq!(Bias::Left.weight(), -1000);
        assert_eq!(Bias::Right.weight(), 1000);
    }
}
