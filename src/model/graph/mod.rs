/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the mind-map canvas.
//!
//! Core structures:
//! - `MindGraph`: id-indexed node arena plus the parallel connection list
//! - `Node`: positioned, colored, labeled vertex with parent/child links
//! - `Connection`: directed parent→child edge record
//! - `NodePatch`: partial field update applied through `update_node`
//!
//! Boundary: parent/child links and the connection list are maintained
//! together by the mutators here; nodes are handed out by shared reference
//! only, so identity and topology cannot be rewritten from outside. Every
//! mutation is total: operating on an id that no longer exists is a defined
//! no-op.

use euclid::default::Point2D;
use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::persistence::{MindMapSnapshot, SnapshotConnection, SnapshotError, SnapshotNode};

/// Stable node identity (survives unrelated deletions).
pub type NodeId = Uuid;

/// Fixed pastel palette; new nodes draw uniformly from it and the seed root
/// takes the first entry.
pub const NODE_PALETTE: [&str; 8] = [
    "#ffd6e7", "#a2f0f7", "#d2a2f7", "#f5f0e8", "#7dd3fc", "#a7f3d0", "#fed7aa", "#e0e7ff",
];

/// Label of the seed root present after construction and after a reset.
pub const DEFAULT_ROOT_TEXT: &str = "Main Topic";

/// Size category for a node; maps to fixed layout metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Fixed layout dimensions for a size category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMetrics {
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
}

impl NodeSize {
    /// Layout metrics for this category. Renderers and the geometry helpers
    /// derive node rectangles and centers from these.
    pub fn metrics(self) -> NodeMetrics {
        match self {
            NodeSize::Small => NodeMetrics {
                width: 120.0,
                height: 60.0,
                font_size: 12.0,
            },
            NodeSize::Medium => NodeMetrics {
                width: 160.0,
                height: 80.0,
                font_size: 14.0,
            },
            NodeSize::Large => NodeMetrics {
                width: 200.0,
                height: 100.0,
                font_size: 16.0,
            },
        }
    }

    pub fn as_persisted_str(self) -> &'static str {
        match self {
            NodeSize::Small => "small",
            NodeSize::Medium => "medium",
            NodeSize::Large => "large",
        }
    }

    pub fn from_persisted_str(value: &str) -> Option<Self> {
        match value {
            "small" => Some(NodeSize::Small),
            "medium" => Some(NodeSize::Medium),
            "large" => Some(NodeSize::Large),
            _ => None,
        }
    }
}

/// A vertex in the mind map.
#[derive(Debug, Clone)]
pub struct Node {
    /// Stable node identity.
    pub id: NodeId,

    /// User-editable label.
    pub text: String,

    /// Origin (top-left of the node rectangle) in canvas space. Unbounded;
    /// nodes may sit outside the visible canvas.
    pub position: Point2D<f32>,

    /// Fill color, one of `NODE_PALETTE`.
    pub color: String,

    /// Size category; layout metrics come from `NodeSize::metrics`.
    pub size: NodeSize,

    /// Parent link; `None` for root-level nodes.
    pub parent: Option<NodeId>,

    /// Ordered child links (creation order).
    pub children: Vec<NodeId>,
}

/// Directed parent→child edge record, kept in lockstep with the
/// parent/child fields on `Node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
}

/// Partial node update. Unset fields are left untouched; identity and
/// topology (id, parent, children) are not expressible here.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub position: Option<Point2D<f32>>,
    pub text: Option<String>,
    pub color: Option<String>,
    pub size: Option<NodeSize>,
}

impl NodePatch {
    pub fn position(position: Point2D<f32>) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn size(size: NodeSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }
}

/// Main mind-map container: node arena with insertion order and the
/// parallel connection list.
#[derive(Debug, Clone)]
pub struct MindGraph {
    /// Id-indexed node storage.
    nodes: HashMap<NodeId, Node>,

    /// Insertion order of live node ids; keeps iteration and snapshots
    /// stable across runs.
    order: Vec<NodeId>,

    /// Parent→child edges, parallel to the `parent`/`children` node fields.
    connections: Vec<Connection>,
}

impl MindGraph {
    /// Create a graph holding only the seed root.
    pub fn new() -> Self {
        let mut graph = Self::empty();
        graph.insert_seed_root();
        graph
    }

    fn empty() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            connections: Vec::new(),
        }
    }

    fn insert_seed_root(&mut self) {
        let id = Uuid::new_v4();
        self.nodes.insert(
            id,
            Node {
                id,
                text: DEFAULT_ROOT_TEXT.to_string(),
                // Center of the default 800×600 canvas.
                position: Point2D::new(400.0, 300.0),
                color: NODE_PALETTE[0].to_string(),
                size: NodeSize::Large,
                parent: None,
                children: Vec::new(),
            },
        );
        self.order.push(id);
    }

    /// Add a node with a fresh id. Returns `None` without mutating anything
    /// when `parent` names a node that does not exist.
    pub fn add_node(
        &mut self,
        text: String,
        position: Point2D<f32>,
        color: String,
        size: NodeSize,
        parent: Option<NodeId>,
    ) -> Option<NodeId> {
        if let Some(parent_id) = parent
            && !self.nodes.contains_key(&parent_id)
        {
            log::warn!("add_node under missing parent {parent_id}; ignoring");
            return None;
        }

        let id = Uuid::new_v4();
        self.nodes.insert(
            id,
            Node {
                id,
                text,
                position,
                color,
                size,
                parent,
                children: Vec::new(),
            },
        );
        self.order.push(id);

        if let Some(parent_id) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                parent_node.children.push(id);
            }
            self.connections.push(Connection {
                from: parent_id,
                to: id,
            });
        }

        log::debug!("added node {id}");
        Some(id)
    }

    /// Remove a node and its entire subtree. The descendant set is collected
    /// first (iterative worklist), then nodes, ordering, and connections are
    /// removed in one batch so no partially-detached state is observable.
    /// Returns how many nodes were removed; 0 when `id` does not exist.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        if !self.nodes.contains_key(&id) {
            return 0;
        }

        let removed = self.collect_subtree(id);

        // Detach the subtree root from its former parent before the batch
        // removal; the parent survives, the subtree does not.
        let parent = self.nodes.get(&id).and_then(|node| node.parent);
        if let Some(parent_id) = parent
            && let Some(parent_node) = self.nodes.get_mut(&parent_id)
        {
            parent_node.children.retain(|child| *child != id);
        }

        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        self.order.retain(|node_id| !removed.contains(node_id));
        self.connections.retain(|connection| {
            !removed.contains(&connection.from) && !removed.contains(&connection.to)
        });

        log::debug!("removed subtree at {id}: {} nodes", removed.len());
        removed.len()
    }

    /// Merge a partial update into a node. No-op when `id` does not exist;
    /// never touches id, parent, or children.
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(text) = patch.text {
            node.text = text;
        }
        if let Some(color) = patch.color {
            node.color = color;
        }
        if let Some(size) = patch.size {
            node.size = size;
        }
    }

    /// Drop everything and restore the seed root.
    pub fn reset(&mut self) {
        *self = Self::new();
        log::debug!("graph reset to seed state");
    }

    /// Get a node by id.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterate nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Parent→child edges, in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Count of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count of parent→child connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// A subtree root plus all transitive descendants, via an explicit
    /// worklist rather than recursion.
    fn collect_subtree(&self, id: NodeId) -> HashSet<NodeId> {
        let mut collected = HashSet::new();
        let mut worklist = vec![id];
        while let Some(current) = worklist.pop() {
            if !collected.insert(current) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                worklist.extend(node.children.iter().copied());
            }
        }
        collected
    }

    /// Serialize to a deep, read-only snapshot.
    pub fn to_snapshot(&self, title: &str) -> MindMapSnapshot {
        let nodes = self
            .nodes()
            .map(|node| SnapshotNode {
                node_id: node.id.to_string(),
                text: node.text.clone(),
                position_x: node.position.x,
                position_y: node.position.y,
                color: node.color.clone(),
                size: node.size.as_persisted_str().to_string(),
                parent_id: node.parent.map(|parent| parent.to_string()),
                child_ids: node.children.iter().map(|child| child.to_string()).collect(),
            })
            .collect();

        let connections = self
            .connections
            .iter()
            .map(|connection| SnapshotConnection {
                from_id: connection.from.to_string(),
                to_id: connection.to.to_string(),
            })
            .collect();

        let timestamp_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        MindMapSnapshot {
            title: title.to_string(),
            nodes,
            connections,
            timestamp_secs,
        }
    }

    /// Rebuild a graph from a snapshot. Unlike the crash-tolerant restore
    /// paths a browser session needs, import is user-facing: malformed ids,
    /// unknown size tags, duplicate nodes, dangling references, parent
    /// chains that never reach a root, and connection entries out of step
    /// with the parent/child fields are errors, not entries to skip. A
    /// snapshot produced by [`MindGraph::to_snapshot`] always passes.
    pub fn from_snapshot(snapshot: &MindMapSnapshot) -> Result<Self, SnapshotError> {
        let mut graph = Self::empty();

        for pnode in &snapshot.nodes {
            let id = parse_node_id(&pnode.node_id)?;
            let size = NodeSize::from_persisted_str(&pnode.size).ok_or_else(|| {
                SnapshotError::Parse(format!("unknown node size '{}'", pnode.size))
            })?;
            let parent = match &pnode.parent_id {
                Some(parent_id) => Some(parse_node_id(parent_id)?),
                None => None,
            };
            let children = pnode
                .child_ids
                .iter()
                .map(|child_id| parse_node_id(child_id))
                .collect::<Result<Vec<_>, _>>()?;

            if graph.nodes.contains_key(&id) {
                return Err(SnapshotError::Structure(format!("duplicate node id {id}")));
            }
            graph.nodes.insert(
                id,
                Node {
                    id,
                    text: pnode.text.clone(),
                    position: Point2D::new(pnode.position_x, pnode.position_y),
                    color: pnode.color.clone(),
                    size,
                    parent,
                    children,
                },
            );
            graph.order.push(id);
        }

        for node_id in &graph.order {
            let Some(node) = graph.nodes.get(node_id) else {
                continue;
            };
            if let Some(parent_id) = node.parent {
                let Some(parent_node) = graph.nodes.get(&parent_id) else {
                    return Err(SnapshotError::Structure(format!(
                        "node {node_id} references missing parent {parent_id}"
                    )));
                };
                if !parent_node.children.contains(node_id) {
                    return Err(SnapshotError::Structure(format!(
                        "parent {parent_id} does not list child {node_id}"
                    )));
                }
            }
            let mut seen_children = HashSet::new();
            for child_id in &node.children {
                if !seen_children.insert(*child_id) {
                    return Err(SnapshotError::Structure(format!(
                        "node {node_id} lists child {child_id} more than once"
                    )));
                }
                let Some(child) = graph.nodes.get(child_id) else {
                    return Err(SnapshotError::Structure(format!(
                        "node {node_id} references missing child {child_id}"
                    )));
                };
                if child.parent != Some(*node_id) {
                    return Err(SnapshotError::Structure(format!(
                        "child {child_id} does not point back to {node_id}"
                    )));
                }
            }
        }

        // A parent chain longer than the node count has looped.
        for node in graph.nodes.values() {
            let mut steps = 0;
            let mut current = node.parent;
            while let Some(parent_id) = current {
                steps += 1;
                if steps > graph.nodes.len() {
                    let node_id = node.id;
                    return Err(SnapshotError::Structure(format!(
                        "parent chain from {node_id} never reaches a root"
                    )));
                }
                current = graph.nodes.get(&parent_id).and_then(|parent| parent.parent);
            }
        }

        let mut expected_edges: HashSet<(NodeId, NodeId)> = graph
            .nodes
            .values()
            .filter_map(|node| node.parent.map(|parent| (parent, node.id)))
            .collect();
        for pconnection in &snapshot.connections {
            let from = parse_node_id(&pconnection.from_id)?;
            let to = parse_node_id(&pconnection.to_id)?;
            if !expected_edges.remove(&(from, to)) {
                return Err(SnapshotError::Structure(format!(
                    "connection {from} -> {to} does not match a parent link"
                )));
            }
            graph.connections.push(Connection { from, to });
        }
        if let Some((from, to)) = expected_edges.iter().next() {
            return Err(SnapshotError::Structure(format!(
                "parent link {from} -> {to} has no connection entry"
            )));
        }

        Ok(graph)
    }
}

impl Default for MindGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_node_id(value: &str) -> Result<NodeId, SnapshotError> {
    Uuid::parse_str(value)
        .map_err(|e| SnapshotError::Parse(format!("invalid node id '{value}': {e}")))
}
