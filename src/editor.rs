/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editor shell tying the model to user commands.
//!
//! [`MindMapEditor`] owns the graph plus everything a canvas widget needs
//! around it: the current selection, drag and edit sessions, map-level
//! settings, and the queue of user-facing notices. Discrete commands arrive
//! as [`MapIntent`] values; high-frequency pointer traffic uses the
//! dedicated `pointer_*` methods so a renderer does not build an intent per
//! mouse event.

use euclid::default::Point2D;

use crate::input::{DragController, EditSession};
use crate::model::graph::{MindGraph, NODE_PALETTE, NodeId, NodePatch, NodeSize};
use crate::persistence::{MindMapSnapshot, SnapshotError, export_filename};

/// Text given to every newly added node.
pub const NEW_NODE_TEXT: &str = "New Node";

/// Title a fresh map starts with.
pub const DEFAULT_TITLE: &str = "My Mind Map";

/// Offset from a parent's origin to a newly added child's origin.
const CHILD_OFFSET_X: f32 = 200.0;
const CHILD_OFFSET_Y: f32 = 150.0;

/// Margin kept between a randomly placed root-level node and the canvas edge.
const SPAWN_MARGIN: f32 = 100.0;

/// Canvas dimensions used to place new root-level nodes.
///
/// Purely a placement input; dragging is never clamped against these bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A fire-and-forget message for the embedder's notification surface.
///
/// The editor queues these; it never consumes them itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Discrete editor commands.
///
/// The `SetNode*` variants are silent low-level writes; the session-based
/// edit flow ([`MindMapEditor::commit_edit`]) is what queues a notice when
/// the user finishes typing.
#[derive(Debug, Clone)]
pub enum MapIntent {
    AddNode { parent: Option<NodeId> },
    RemoveNode { id: NodeId },
    SelectNode { id: NodeId },
    ClearSelection,
    SetNodeText { id: NodeId, text: String },
    SetNodeColor { id: NodeId, color: String },
    SetNodeSize { id: NodeId, size: NodeSize },
    SetNodePosition { id: NodeId, position: Point2D<f32> },
    SetTitle { title: String },
    SetConnectionsVisible { visible: bool },
    ClearMap,
}

/// Interactive mind-map editor state.
pub struct MindMapEditor {
    graph: MindGraph,
    selected: Option<NodeId>,
    drag: DragController,
    edit: EditSession,
    notices: Vec<Notice>,
    /// Map title; feeds exported snapshots and their filenames.
    pub title: String,
    /// Whether the renderer should draw connection curves.
    pub show_connections: bool,
    /// Dimensions used when placing new root-level nodes.
    pub canvas: CanvasBounds,
}

impl MindMapEditor {
    /// Fresh editor around a seed map: one root node, nothing selected.
    pub fn new() -> Self {
        Self {
            graph: MindGraph::new(),
            selected: None,
            drag: DragController::default(),
            edit: EditSession::default(),
            notices: Vec::new(),
            title: DEFAULT_TITLE.to_string(),
            show_connections: true,
            canvas: CanvasBounds::default(),
        }
    }

    /// Apply a batch of intents deterministically in insertion order.
    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = MapIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: MapIntent) {
        match intent {
            MapIntent::AddNode { parent } => {
                self.add_node(parent);
            },
            MapIntent::RemoveNode { id } => self.remove_node(id),
            MapIntent::SelectNode { id } => self.select_node(id),
            MapIntent::ClearSelection => self.selected = None,
            MapIntent::SetNodeText { id, text } => {
                self.graph.update_node(id, NodePatch::text(text));
            },
            MapIntent::SetNodeColor { id, color } => {
                self.graph.update_node(id, NodePatch::color(color));
            },
            MapIntent::SetNodeSize { id, size } => {
                self.graph.update_node(id, NodePatch::size(size));
            },
            MapIntent::SetNodePosition { id, position } => {
                self.graph.update_node(id, NodePatch::position(position));
            },
            MapIntent::SetTitle { title } => self.title = title,
            MapIntent::SetConnectionsVisible { visible } => self.show_connections = visible,
            MapIntent::ClearMap => self.clear_map(),
        }
    }

    /// Add a node and queue a success notice.
    ///
    /// With a parent the node lands down-right of it at a fixed offset,
    /// medium-sized. Without one it lands at a uniformly random spot inside
    /// the canvas margins, large-sized. Text starts as [`NEW_NODE_TEXT`] and
    /// the color is drawn at random from [`NODE_PALETTE`]. The new node is
    /// not auto-selected.
    ///
    /// Adding under a missing parent is a logged no-op returning `None`.
    pub fn add_node(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let color = NODE_PALETTE[rng.gen_range(0..NODE_PALETTE.len())].to_string();

        let (position, size) = match parent {
            Some(parent_id) => {
                // Placement needs the parent's origin, so resolve it here.
                let Some(parent_node) = self.graph.get_node(parent_id) else {
                    log::warn!("Ignoring add under missing parent {parent_id}");
                    return None;
                };
                (
                    Point2D::new(
                        parent_node.position.x + CHILD_OFFSET_X,
                        parent_node.position.y + CHILD_OFFSET_Y,
                    ),
                    NodeSize::Medium,
                )
            },
            None => {
                // Canvases narrower than twice the margin leave no valid
                // band to sample, so fall back to the centerline.
                let mut spawn = |extent: f32| {
                    let max = extent - SPAWN_MARGIN;
                    if max <= SPAWN_MARGIN {
                        extent / 2.0
                    } else {
                        rng.gen_range(SPAWN_MARGIN..max)
                    }
                };
                (
                    Point2D::new(spawn(self.canvas.width), spawn(self.canvas.height)),
                    NodeSize::Large,
                )
            },
        };

        let id = self
            .graph
            .add_node(NEW_NODE_TEXT.to_string(), position, color, size, parent)?;
        self.notify(NoticeKind::Success, "Node added successfully!");
        Some(id)
    }

    /// Delete a node together with its whole subtree.
    ///
    /// Selection, drag, and edit state referencing a removed node are
    /// dropped. A success notice is queued only when something was removed.
    pub fn remove_node(&mut self, id: NodeId) {
        let removed = self.graph.remove_subtree(id);
        if removed == 0 {
            return;
        }
        self.prune_stale_sessions();
        self.notify(NoticeKind::Success, "Node deleted successfully!");
    }

    pub fn select_node(&mut self, id: NodeId) {
        // Ignore stale ids.
        if !self.graph.contains_node(id) {
            return;
        }
        self.selected = Some(id);
    }

    /// Reset the map to its seed state: one root node, the default title,
    /// nothing selected.
    ///
    /// Connection visibility survives a clear.
    pub fn clear_map(&mut self) {
        self.graph.reset();
        self.selected = None;
        self.drag.end();
        self.edit.cancel();
        self.title = DEFAULT_TITLE.to_string();
        self.notify(NoticeKind::Success, "Mind map cleared!");
    }

    /// Pointer pressed on a node: select it and start dragging.
    ///
    /// Coordinates are canvas-local; callers translate from screen space
    /// before reaching the editor.
    pub fn pointer_down(&mut self, id: NodeId, pointer: Point2D<f32>) {
        // Ignore stale ids.
        let Some(node) = self.graph.get_node(id) else {
            return;
        };
        self.selected = Some(id);
        self.drag.begin(id, pointer, node.position);
    }

    /// Pointer moved: advance any active drag. Position writes are silent.
    pub fn pointer_moved(&mut self, pointer: Point2D<f32>) {
        let Some((id, position)) = self.drag.target_position(pointer) else {
            return;
        };
        self.graph.update_node(id, NodePatch::position(position));
    }

    /// Pointer released: end any active drag.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Pointer left the canvas; a drag cannot continue without move events.
    pub fn pointer_left(&mut self) {
        self.drag.end();
    }

    /// Open an inline edit on `id`, seeding the draft from its current text.
    ///
    /// An edit already open on another node is committed first, matching the
    /// blur-then-focus order a text widget produces.
    pub fn begin_edit(&mut self, id: NodeId) {
        self.commit_edit();
        // Ignore stale ids.
        let Some(node) = self.graph.get_node(id) else {
            return;
        };
        let text = node.text.clone();
        self.edit.begin(id, text);
    }

    /// Replace the staged draft text. No-op when no edit is open.
    pub fn set_edit_draft(&mut self, text: impl Into<String>) {
        self.edit.set_draft(text);
    }

    /// Commit any open edit: write the draft to the node and queue a notice.
    pub fn commit_edit(&mut self) {
        let Some((id, draft)) = self.edit.commit() else {
            return;
        };
        self.graph.update_node(id, NodePatch::text(draft));
        self.notify(NoticeKind::Success, "Node updated!");
    }

    /// Discard any open edit without touching the node.
    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Snapshot the current map for export and queue a success notice.
    pub fn export_snapshot(&mut self) -> MindMapSnapshot {
        let snapshot = self.graph.to_snapshot(&self.title);
        self.notify(NoticeKind::Success, "Mind map exported successfully!");
        snapshot
    }

    /// Download filename for the current title.
    pub fn export_filename(&self) -> String {
        export_filename(&self.title)
    }

    /// Replace the whole map from a previously exported snapshot.
    ///
    /// Selection and sessions reset and the snapshot's title replaces the
    /// current one. On error the editor is left untouched.
    pub fn load_snapshot(&mut self, snapshot: &MindMapSnapshot) -> Result<(), SnapshotError> {
        self.graph = MindGraph::from_snapshot(snapshot)?;
        self.title = snapshot.title.clone();
        self.selected = None;
        self.drag.end();
        self.edit.cancel();
        Ok(())
    }

    /// Consume queued notices for the embedder's notification surface.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn graph(&self) -> &MindGraph {
        &self.graph
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
        });
    }

    /// Drop selection and session state whose node no longer exists.
    fn prune_stale_sessions(&mut self) {
        if let Some(selected) = self.selected
            && !self.graph.contains_node(selected)
        {
            self.selected = None;
        }
        if let Some(session) = self.drag.session()
            && !self.graph.contains_node(session.node_id)
        {
            self.drag.end();
        }
        if let Some(editing) = self.edit.editing_node()
            && !self.graph.contains_node(editing)
        {
            self.edit.cancel();
        }
    }
}

impl Default for MindMapEditor {
    fn default() -> Self {
        Self::new()
    }
}
