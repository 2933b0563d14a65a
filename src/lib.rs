/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Framework-agnostic mind-map canvas model.
//!
//! The crate splits along the same seams a canvas widget does: [`model`]
//! owns the node forest and connection list, [`input`] tracks drag and
//! inline-edit sessions, [`editor`] applies user commands and queues
//! notices, [`persistence`] round-trips snapshots as JSON, and [`render`]
//! derives the geometry a renderer needs for node boxes and curved edges.
//!
//! Everything is synchronous and single-writer: one [`MindMapEditor`] per
//! map, driven by the embedder's event loop.

pub mod editor;
pub mod input;
pub mod model;
pub mod persistence;
pub mod render;

pub use editor::{
    CanvasBounds, DEFAULT_TITLE, MapIntent, MindMapEditor, NEW_NODE_TEXT, Notice, NoticeKind,
};
pub use input::{DragController, DragSession, EditSession};
pub use model::graph::{
    Connection, DEFAULT_ROOT_TEXT, MindGraph, NODE_PALETTE, Node, NodeId, NodeMetrics, NodePatch,
    NodeSize,
};
pub use persistence::{
    MindMapSnapshot, SnapshotConnection, SnapshotError, SnapshotNode, export_filename,
    snapshot_from_json, snapshot_to_json,
};
pub use render::{EDGE_CURVATURE, edge_control_point, node_center};

/// Crate version string, from Cargo metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
