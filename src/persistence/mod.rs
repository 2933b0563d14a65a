/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable snapshot types and the JSON export boundary.
//!
//! The snapshot is a deep copy of the graph flattened to plain strings and
//! floats; the embedding shell turns the JSON string into a download using
//! the filename from `export_filename`. No file-system access happens here.

use serde::{Deserialize, Serialize};

/// Persisted node.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SnapshotNode {
    /// Stable node identity.
    pub node_id: String,
    pub text: String,
    pub position_x: f32,
    pub position_y: f32,
    pub color: String,
    /// Size category tag: `small`, `medium`, or `large`.
    pub size: String,
    pub parent_id: Option<String>,
    /// Ordered child ids (creation order).
    pub child_ids: Vec<String>,
}

/// Persisted parent→child edge.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SnapshotConnection {
    pub from_id: String,
    pub to_id: String,
}

/// Full mind-map snapshot for export.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MindMapSnapshot {
    pub title: String,
    pub nodes: Vec<SnapshotNode>,
    pub connections: Vec<SnapshotConnection>,
    /// Generation time, unix seconds.
    pub timestamp_secs: u64,
}

/// Errors from the snapshot boundary.
#[derive(Debug)]
pub enum SnapshotError {
    Json(String),
    Parse(String),
    Structure(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Json(e) => write!(f, "JSON error: {e}"),
            SnapshotError::Parse(e) => write!(f, "Parse error: {e}"),
            SnapshotError::Structure(e) => write!(f, "Structure error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Encode a snapshot as pretty-printed JSON (2-space indent).
pub fn snapshot_to_json(snapshot: &MindMapSnapshot) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| SnapshotError::Json(format!("Failed to encode snapshot: {e}")))
}

/// Decode a snapshot from its JSON form.
pub fn snapshot_from_json(json: &str) -> Result<MindMapSnapshot, SnapshotError> {
    serde_json::from_str(json)
        .map_err(|e| SnapshotError::Json(format!("Failed to decode snapshot: {e}")))
}

/// Download filename for a map title: every non-alphanumeric character
/// becomes `_`, with a `.json` suffix.
pub fn export_filename(title: &str) -> String {
    let mut name: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    name.push_str(".json");
    name
}
