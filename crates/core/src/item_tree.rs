//! Folding of item rows into the Part -> Serial -> Bridge tree.
//!
//! Rows must arrive sorted by `(part_id, serial_number, bridge_name)`; the
//! builder does not check or restore that order. Parts and serials appear in
//! first-seen order and every row becomes exactly one bridge leaf, so two
//! rows sharing a composite key yield two sibling leaves.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]. Two order-preserving
//! maps dedupe the upper levels: one keyed by part id, one keyed by
//! `(part id, serial number)`.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::DbId;

/// Key prefix for part nodes.
pub const PART_KEY_PREFIX: &str = "part-";
/// Key prefix for serial nodes.
pub const SERIAL_KEY_PREFIX: &str = "sn-";
/// Key prefix for bridge leaves.
pub const BRIDGE_KEY_PREFIX: &str = "bridge-";

/// Anything that can be placed in the item tree.
pub trait HierarchyRow {
    fn item_id(&self) -> DbId;
    fn part_id(&self) -> &str;
    fn serial_number(&self) -> &str;
    fn bridge_name(&self) -> &str;
}

/// Index of a node in an [`ItemTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One arena node. Only parts and serials have children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemTreeNode {
    Part {
        key: String,
        label: String,
        children: Vec<NodeId>,
    },
    Serial {
        key: String,
        label: String,
        children: Vec<NodeId>,
    },
    Bridge {
        key: String,
        label: String,
        item_id: DbId,
    },
}

impl ItemTreeNode {
    pub fn key(&self) -> &str {
        match self {
            ItemTreeNode::Part { key, .. }
            | ItemTreeNode::Serial { key, .. }
            | ItemTreeNode::Bridge { key, .. } => key,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            ItemTreeNode::Part { children, .. } | ItemTreeNode::Serial { children, .. } => {
                children
            }
            ItemTreeNode::Bridge { .. } => &[],
        }
    }

    fn push_child(&mut self, child: NodeId) {
        match self {
            ItemTreeNode::Part { children, .. } | ItemTreeNode::Serial { children, .. } => {
                children.push(child)
            }
            ItemTreeNode::Bridge { .. } => unreachable!("bridge nodes are leaves"),
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Single-pass builder for [`ItemTree`].
#[derive(Debug, Default)]
pub struct ItemHierarchyBuilder {
    nodes: Vec<ItemTreeNode>,
    parts: IndexMap<String, NodeId>,
    serials: IndexMap<(String, String), NodeId>,
}

impl ItemHierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one row. Always appends a new bridge leaf.
    pub fn push<R: HierarchyRow + ?Sized>(&mut self, row: &R) {
        let part_id = row.part_id();
        let serial = row.serial_number();

        let part = match self.parts.get(part_id) {
            Some(&id) => id,
            None => {
                let id = self.alloc(ItemTreeNode::Part {
                    key: format!("{PART_KEY_PREFIX}{part_id}"),
                    label: format!("Part {part_id}"),
                    children: Vec::new(),
                });
                self.parts.insert(part_id.to_string(), id);
                id
            }
        };

        let serial_key = (part_id.to_string(), serial.to_string());
        let serial_node = match self.serials.get(&serial_key) {
            Some(&id) => id,
            None => {
                // The part id is length-prefixed so no (part, serial) split of
                // the same text can produce the same key.
                let id = self.alloc(ItemTreeNode::Serial {
                    key: format!("{SERIAL_KEY_PREFIX}{}:{part_id}:{serial}", part_id.len()),
                    label: serial.to_string(),
                    children: Vec::new(),
                });
                self.nodes[part.0].push_child(id);
                self.serials.insert(serial_key, id);
                id
            }
        };

        let item_id = row.item_id();
        let bridge = self.alloc(ItemTreeNode::Bridge {
            key: format!("{BRIDGE_KEY_PREFIX}{item_id}"),
            label: row.bridge_name().to_string(),
            item_id,
        });
        self.nodes[serial_node.0].push_child(bridge);
    }

    pub fn finish(self) -> ItemTree {
        ItemTree {
            roots: self.parts.into_values().collect(),
            nodes: self.nodes,
        }
    }

    fn alloc(&mut self, node: ItemTreeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

/// Fold pre-sorted rows into a tree.
pub fn build_item_tree<'a, R, I>(rows: I) -> ItemTree
where
    R: HierarchyRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut builder = ItemHierarchyBuilder::new();
    for row in rows {
        builder.push(row);
    }
    builder.finish()
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// The folded hierarchy. Roots are part nodes in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemTree {
    nodes: Vec<ItemTreeNode>,
    roots: Vec<NodeId>,
}

impl ItemTree {
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &ItemTreeNode {
        &self.nodes[id.0]
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn part_count(&self) -> usize {
        self.roots.len()
    }

    pub fn serial_count(&self) -> usize {
        self.count(|n| matches!(n, ItemTreeNode::Serial { .. }))
    }

    pub fn bridge_count(&self) -> usize {
        self.count(|n| matches!(n, ItemTreeNode::Bridge { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemTreeNode) -> bool) -> usize {
        self.nodes.iter().filter(|n| pred(n)).count()
    }

    /// Materialize the arena as nested, typed nodes.
    pub fn to_nested(&self) -> Vec<PartNode> {
        self.roots.iter().map(|&id| self.part_node(id)).collect()
    }

    fn part_node(&self, id: NodeId) -> PartNode {
        let ItemTreeNode::Part {
            key,
            label,
            children,
        } = self.node(id)
        else {
            unreachable!("roots are part nodes");
        };
        PartNode {
            key: key.clone(),
            label: label.clone(),
            children: children.iter().map(|&c| self.serial_node(c)).collect(),
        }
    }

    fn serial_node(&self, id: NodeId) -> SerialNode {
        let ItemTreeNode::Serial {
            key,
            label,
            children,
        } = self.node(id)
        else {
            unreachable!("part children are serial nodes");
        };
        SerialNode {
            key: key.clone(),
            label: label.clone(),
            children: children.iter().map(|&c| self.bridge_node(c)).collect(),
        }
    }

    fn bridge_node(&self, id: NodeId) -> BridgeNode {
        let ItemTreeNode::Bridge {
            key,
            label,
            item_id,
        } = self.node(id)
        else {
            unreachable!("serial children are bridge nodes");
        };
        BridgeNode {
            key: key.clone(),
            label: label.clone(),
            item_id: *item_id,
        }
    }
}

impl Serialize for ItemTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_nested().serialize(serializer)
    }
}

/// Top level of the nested tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "PART")]
pub struct PartNode {
    pub key: String,
    pub label: String,
    pub children: Vec<SerialNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "SERIAL")]
pub struct SerialNode {
    pub key: String,
    pub label: String,
    pub children: Vec<BridgeNode>,
}

/// Leaf pointing back at the originating item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "BRIDGE", rename_all = "camelCase")]
pub struct BridgeNode {
    pub key: String,
    pub label: String,
    pub item_id: DbId,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Row {
        id: DbId,
        part: &'static str,
        serial: &'static str,
        bridge: &'static str,
    }

    impl HierarchyRow for Row {
        fn item_id(&self) -> DbId {
            self.id
        }
        fn part_id(&self) -> &str {
            self.part
        }
        fn serial_number(&self) -> &str {
            self.serial
        }
        fn bridge_name(&self) -> &str {
            self.bridge
        }
    }

    fn row(id: DbId, part: &'static str, serial: &'static str, bridge: &'static str) -> Row {
        Row {
            id,
            part,
            serial,
            bridge,
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row(1, "P1", "S1", "B1"),
            row(2, "P1", "S1", "B2"),
            row(3, "P1", "S2", "B1"),
            row(4, "P2", "", "B1"),
            row(5, "P2", "S1", "B1"),
            row(6, "P2", "S1", "B1"),
        ]
    }

    #[test]
    fn empty_input_yields_empty_tree() {
        let tree = build_item_tree(Vec::<Row>::new().iter());
        assert!(tree.is_empty());
        assert_eq!(tree.bridge_count(), 0);
        assert!(tree.to_nested().is_empty());
    }

    #[test]
    fn counts_match_distinct_keys() {
        let rows = sample();
        let tree = build_item_tree(&rows);

        let parts: HashSet<_> = rows.iter().map(|r| r.part).collect();
        let serials: HashSet<_> = rows.iter().map(|r| (r.part, r.serial)).collect();

        assert_eq!(tree.part_count(), parts.len());
        assert_eq!(tree.serial_count(), serials.len());
        assert_eq!(tree.bridge_count(), rows.len());
    }

    #[test]
    fn preserves_first_seen_order() {
        let tree = build_item_tree(&sample()).to_nested();

        let part_keys: Vec<_> = tree.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(part_keys, ["part-P1", "part-P2"]);

        let p1_serials: Vec<_> = tree[0].children.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(p1_serials, ["S1", "S2"]);

        let s1_items: Vec<_> = tree[0].children[0]
            .children
            .iter()
            .map(|b| b.item_id)
            .collect();
        assert_eq!(s1_items, [1, 2]);
    }

    #[test]
    fn duplicate_rows_become_sibling_leaves() {
        let tree = build_item_tree(&sample()).to_nested();
        let p2_s1 = &tree[1].children[1];
        assert_eq!(p2_s1.label, "S1");
        assert_eq!(p2_s1.children.len(), 2);
        assert_eq!(p2_s1.children[0].label, p2_s1.children[1].label);
        assert_ne!(p2_s1.children[0].item_id, p2_s1.children[1].item_id);
    }

    #[test]
    fn empty_serial_is_its_own_node() {
        let tree = build_item_tree(&sample()).to_nested();
        let p2 = &tree[1];
        assert_eq!(p2.children.len(), 2);
        assert_eq!(p2.children[0].label, "");
        assert_eq!(p2.children[0].children[0].item_id, 4);
    }

    #[test]
    fn same_serial_under_different_parts_is_separate() {
        let rows = vec![row(1, "P1", "S1", "B"), row(2, "P2", "S1", "B")];
        let tree = build_item_tree(&rows);
        assert_eq!(tree.serial_count(), 2);

        let nested = tree.to_nested();
        assert_ne!(nested[0].children[0].key, nested[1].children[0].key);
    }

    #[test]
    fn serial_keys_stay_distinct_when_ids_share_text() {
        let rows = vec![
            row(1, "A", "B__C", "B"),
            row(2, "A__B", "C", "B"),
            row(3, "A:1", "x", "B"),
            row(4, "A", "1:x", "B"),
        ];
        let nested = build_item_tree(&rows).to_nested();
        let keys: HashSet<_> = nested
            .iter()
            .flat_map(|p| p.children.iter().map(|s| s.key.clone()))
            .collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(nested[0].children[0].key, "sn-1:A:B__C");
        assert_eq!(nested[1].children[0].key, "sn-4:A__B:C");
    }

    #[test]
    fn unsorted_input_is_not_reordered() {
        let rows = vec![row(1, "P2", "S1", "B"), row(2, "P1", "S1", "B"), row(3, "P2", "S1", "B")];
        let nested = build_item_tree(&rows).to_nested();
        assert_eq!(nested[0].key, "part-P2");
        assert_eq!(nested[0].children[0].children.len(), 2);
    }

    #[test]
    fn building_twice_is_identical() {
        let rows = sample();
        assert_eq!(build_item_tree(&rows), build_item_tree(&rows));
    }

    #[test]
    fn arena_links_three_levels() {
        let tree = build_item_tree(&sample());
        for &part in tree.roots() {
            assert!(matches!(tree.node(part), ItemTreeNode::Part { .. }));
            for &serial in tree.node(part).children() {
                assert!(matches!(tree.node(serial), ItemTreeNode::Serial { .. }));
                for &bridge in tree.node(serial).children() {
                    let node = tree.node(bridge);
                    assert!(matches!(node, ItemTreeNode::Bridge { .. }));
                    assert!(node.children().is_empty());
                    assert!(node.key().starts_with(BRIDGE_KEY_PREFIX));
                }
            }
        }
    }

    #[test]
    fn serializes_with_type_tags() {
        let rows = vec![row(9, "P1", "S1", "Left")];
        let value = serde_json::to_value(build_item_tree(&rows)).unwrap();
        assert_eq!(value[0]["type"], "PART");
        assert_eq!(value[0]["label"], "Part P1");
        assert_eq!(value[0]["children"][0]["type"], "SERIAL");
        let leaf = &value[0]["children"][0]["children"][0];
        assert_eq!(leaf["type"], "BRIDGE");
        assert_eq!(leaf["key"], "bridge-9");
        assert_eq!(leaf["label"], "Left");
        assert_eq!(leaf["itemId"], 9);
        assert!(leaf.get("children").is_none());
    }
}
