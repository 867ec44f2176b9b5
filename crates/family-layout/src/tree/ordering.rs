use super::boxes::FamilyBox;
use super::edges::BoxGraph;
use super::{Bias, BoxId};
use petgraph::visit::{Bfs, Reversed};
use std::cmp::Ordering;
use std::collections::HashSet;

/// The focus box and every box above it
pub(crate) fn focus_line(graph: &BoxGraph, boxes: &[FamilyBox]) -> HashSet<BoxId> {
    let mut line = HashSet::new();
    let Some(focus) = boxes.iter().find(|b| b.focus) else {
        return line;
    };

    let reversed = Reversed(graph);
    let mut bfs = Bfs::new(reversed, focus.id);
    while let Some(id) = bfs.next(reversed) {
        line.insert(id);
    }
    line
}

fn group(id: BoxId, bias: &[Bias], focus_line: &HashSet<BoxId>) -> u8 {
    match bias[id.0] {
        Bias::Left => 0,
        Bias::Neutral if focus_line.contains(&id) => 1,
        Bias::Neutral => 2,
        Bias::Right => 3,
    }
}

/// Sort sibling boxes from left to right
///
/// Left-biased boxes come first, then the focus line, then the other neutral
/// boxes, then right-biased boxes. Biased boxes are sorted by key, neutral
/// ones keep their discovery order.
pub(crate) fn order_boxes(
    ids: &mut [BoxId],
    boxes: &[FamilyBox],
    bias: &[Bias],
    focus_line: &HashSet<BoxId>,
) {
    ids.sort_by(|&a, &b| {
        let (group_a, group_b) = (group(a, bias, focus_line), group(b, bias, focus_line));
        group_a.cmp(&group_b).then_with(|| match group_a {
            0 | 3 => boxes[a.0].key.cmp(&boxes[b.0].key),
            _ => Ordering::Equal,
        })
    });
}
