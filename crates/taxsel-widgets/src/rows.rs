//! Visible rows for virtualized rendering.

use taxsel_core::{NodeState, TaxonomyItem, TaxonomyPath};

/// One visible row of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub label: String,
    pub path: TaxonomyPath,
    pub depth: usize,
    /// Whether the row has children in the forest being shown.
    pub has_children: bool,
    /// Whether the node is a leaf in the full tree (drives leaf-only policy).
    pub is_leaf: bool,
    pub expanded: bool,
    pub state: NodeState,
}

/// Walk `forest` in pre-order, descending only into expanded nodes.
///
/// Explicit stack; visible depth is bounded only by memory.
pub(crate) fn collect_rows<E, A>(
    forest: &[TaxonomyItem],
    is_expanded: E,
    mut annotate: A,
) -> Vec<NodeRow>
where
    E: Fn(&TaxonomyItem) -> bool,
    A: FnMut(&TaxonomyItem) -> (bool, NodeState),
{
    let mut rows = Vec::new();
    let mut stack: Vec<&TaxonomyItem> = forest.iter().rev().collect();
    while let Some(item) = stack.pop() {
        let has_children = !item.children().is_empty();
        let expanded = has_children && is_expanded(item);
        let (is_leaf, state) = annotate(item);
        rows.push(NodeRow {
            label: item.label().to_owned(),
            path: item.path().clone(),
            depth: item.depth(),
            has_children,
            is_leaf,
            expanded,
            state,
        });
        if expanded {
            stack.extend(item.children().iter().rev());
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxsel_core::{TaxonomyNode, build_forest};

    fn sample() -> Vec<TaxonomyItem> {
        build_forest([
            TaxonomyNode::new("A")
                .child(TaxonomyNode::new("A1"))
                .child(TaxonomyNode::new("A2").child(TaxonomyNode::new("A2a"))),
            TaxonomyNode::new("B"),
        ])
    }

    fn labels(rows: &[NodeRow]) -> Vec<&str> {
        rows.iter().map(|row| row.label.as_str()).collect()
    }

    #[test]
    fn fully_expanded_is_pre_order() {
        let rows = collect_rows(&sample(), |_| true, |item| (item.is_leaf(), NodeState::default()));
        assert_eq!(labels(&rows), ["A", "A1", "A2", "A2a", "B"]);
        assert_eq!(rows[3].depth, 2);
        assert!(rows[2].expanded);
        assert!(!rows[4].expanded);
    }

    #[test]
    fn collapsed_nodes_hide_descendants() {
        let rows = collect_rows(
            &sample(),
            |item| item.label() == "A",
            |item| (item.is_leaf(), NodeState::default()),
        );
        assert_eq!(labels(&rows), ["A", "A1", "A2", "B"]);
        assert!(rows[2].has_children);
        assert!(!rows[2].expanded);
    }

    #[test]
    fn annotate_sees_every_visible_row_once() {
        let mut seen = Vec::new();
        let _ = collect_rows(&sample(), |_| false, |item| {
            seen.push(item.label().to_owned());
            (true, NodeState::default())
        });
        assert_eq!(seen, ["A", "B"]);
    }
}
