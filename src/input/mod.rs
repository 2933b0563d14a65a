/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pointer-drag and inline text-edit session tracking for the canvas.
//!
//! Both types are plain state machines: they never touch the graph
//! themselves. The embedder translates raw widget events into canvas-local
//! coordinates, asks these types what changed, and applies the result
//! through [`crate::editor::MindMapEditor`].

use euclid::default::{Point2D, Vector2D};

use crate::model::graph::NodeId;

/// A drag in progress: which node, and where the pointer grabbed it.
///
/// `pointer_offset` is the vector from the node's origin to the pointer at
/// drag start. Subtracting it from later pointer positions keeps the grab
/// point under the cursor instead of snapping the node origin there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Node being repositioned.
    pub node_id: NodeId,
    /// Pointer position minus node origin, captured at drag start.
    pub pointer_offset: Vector2D<f32>,
}

/// Tracks at most one active drag session.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragSession>,
}

impl DragController {
    /// Start dragging `node_id`, grabbed at `pointer` while the node sits at
    /// `node_position`.
    ///
    /// At most one session exists at a time. A begin while one is open
    /// replaces it, so a session left over from a lost pointer-up can never
    /// capture the next press.
    pub fn begin(&mut self, node_id: NodeId, pointer: Point2D<f32>, node_position: Point2D<f32>) {
        if let Some(stale) = &self.active {
            log::debug!("Replacing active drag of node {} with {node_id}", stale.node_id);
        }
        self.active = Some(DragSession {
            node_id,
            pointer_offset: pointer - node_position,
        });
    }

    /// Where the dragged node should move for the current `pointer` position,
    /// or `None` when no drag is active.
    ///
    /// No clamping against canvas bounds; nodes may be dragged off-screen.
    pub fn target_position(&self, pointer: Point2D<f32>) -> Option<(NodeId, Point2D<f32>)> {
        let session = self.active.as_ref()?;
        Some((session.node_id, pointer - session.pointer_offset))
    }

    /// Clear the active session unconditionally. Safe to call when idle,
    /// which is what pointer-up and pointer-leave handlers want.
    pub fn end(&mut self) {
        self.active = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }
}

/// Inline text editing of exactly one node at a time.
///
/// The draft lives here until it is committed or discarded; the node's text
/// is untouched while the session is open. Committing hands `(node, draft)`
/// back to the caller, which owns the actual write.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { node_id: NodeId, draft: String },
}

impl EditSession {
    /// Open an editing session on `node_id`, seeding the draft from the
    /// node's current text.
    ///
    /// Replaces any session already open; committing or discarding the prior
    /// draft first is the caller's job, since only the caller can write a
    /// draft back to the graph.
    pub fn begin(&mut self, node_id: NodeId, current_text: impl Into<String>) {
        *self = EditSession::Editing {
            node_id,
            draft: current_text.into(),
        };
    }

    /// Replace the staged draft text. No-op while idle.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        let EditSession::Editing { draft: current, .. } = self else {
            return;
        };
        *current = draft.into();
    }

    /// Close the session, returning the staged `(node, draft)` for the caller
    /// to apply. `None` when no session was open.
    pub fn commit(&mut self) -> Option<(NodeId, String)> {
        match std::mem::take(self) {
            EditSession::Idle => None,
            EditSession::Editing { node_id, draft } => Some((node_id, draft)),
        }
    }

    /// Close the session and throw the draft away.
    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    /// Node currently being edited, if any.
    pub fn editing_node(&self) -> Option<NodeId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { node_id, .. } => Some(*node_id),
        }
    }

    /// Staged draft text, if a session is open.
    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { draft, .. } => Some(draft.as_str()),
        }
    }
}
