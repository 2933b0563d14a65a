/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Render-support geometry derived from the model.
//!
//! Pure functions only; nothing here reads or mutates graph state. A
//! renderer feeds in node origins and sizes and gets back the points it
//! needs to lay out boxes and curved connection paths.

use euclid::default::Point2D;

use crate::model::graph::NodeSize;

/// Perpendicular offset applied to an edge midpoint, as a fraction of the
/// distance between the two centers.
pub const EDGE_CURVATURE: f32 = 0.2;

/// Center of a node's box given its origin and size class.
pub fn node_center(position: Point2D<f32>, size: NodeSize) -> Point2D<f32> {
    let metrics = size.metrics();
    Point2D::new(
        position.x + metrics.width / 2.0,
        position.y + metrics.height / 2.0,
    )
}

/// Control point for a quadratic curve between two node centers.
///
/// The midpoint is pushed perpendicular to the center-to-center line by
/// [`EDGE_CURVATURE`] times the distance, so an edge always bows the same
/// way relative to its direction of traversal. Coincident centers yield the
/// shared center unchanged.
pub fn edge_control_point(from_center: Point2D<f32>, to_center: Point2D<f32>) -> Point2D<f32> {
    let mid_x = (from_center.x + to_center.x) / 2.0;
    let mid_y = (from_center.y + to_center.y) / 2.0;
    Point2D::new(
        mid_x + (from_center.y - to_center.y) * EDGE_CURVATURE,
        mid_y + (to_center.x - from_center.x) * EDGE_CURVATURE,
    )
}
