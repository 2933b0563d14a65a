use euclid::default::Point2D;
use mindmap_canvas::{
    MapIntent, MindMapEditor, NodeId, NodeSize, VERSION, edge_control_point, node_center,
    snapshot_from_json, snapshot_to_json,
};

fn root_id(editor: &MindMapEditor) -> NodeId {
    editor.graph().nodes().next().unwrap().id
}

#[test]
fn scenarios_smoke_runs() {
    assert!(!VERSION.is_empty());
}

#[test]
fn add_and_delete_reshape_forest_scenario() {
    let mut editor = MindMapEditor::new();
    let root = root_id(&editor);
    assert_eq!(editor.graph().node_count(), 1);
    assert_eq!(editor.graph().connection_count(), 0);

    let floater = editor.add_node(None).unwrap();
    assert_eq!(editor.graph().node_count(), 2);
    assert_eq!(editor.graph().connection_count(), 0);

    let child = editor.add_node(Some(root)).unwrap();
    assert_eq!(editor.graph().node_count(), 3);
    assert_eq!(editor.graph().connection_count(), 1);

    let grandchild = editor.add_node(Some(child)).unwrap();
    assert_eq!(editor.graph().node_count(), 4);
    assert_eq!(editor.graph().connection_count(), 2);

    editor.apply_intents([MapIntent::RemoveNode { id: child }]);
    assert_eq!(editor.graph().node_count(), 2);
    assert_eq!(editor.graph().connection_count(), 0);
    assert!(editor.graph().contains_node(root));
    assert!(editor.graph().contains_node(floater));
    assert!(!editor.graph().contains_node(grandchild));
}

#[test]
fn export_counts_and_filename_scenario() {
    let mut editor = MindMapEditor::new();
    editor.title = "My Map".to_string();
    let root = root_id(&editor);
    let _ = editor.add_node(None);
    let child = editor.add_node(Some(root)).unwrap();
    let _ = editor.add_node(Some(child));

    let snapshot = editor.export_snapshot();
    let root_level = snapshot
        .nodes
        .iter()
        .filter(|node| node.parent_id.is_none())
        .count();
    assert_eq!(snapshot.nodes.len(), snapshot.connections.len() + root_level);
    assert_eq!(editor.export_filename(), "My_Map.json");
}

#[test]
fn drag_preserves_grab_offset_scenario() {
    let mut editor = MindMapEditor::new();
    let root = root_id(&editor);

    // Root sits at (400, 300); grab it 25 px right and 10 px down of origin.
    editor.pointer_down(root, Point2D::new(425.0, 310.0));
    editor.pointer_moved(Point2D::new(125.0, 80.0));
    assert_eq!(
        editor.graph().get_node(root).unwrap().position,
        Point2D::new(100.0, 70.0)
    );

    // No clamping: nodes may leave the canvas entirely.
    editor.pointer_moved(Point2D::new(-50.0, -50.0));
    assert_eq!(
        editor.graph().get_node(root).unwrap().position,
        Point2D::new(-75.0, -60.0)
    );

    editor.pointer_up();
    assert!(!editor.drag().is_dragging());
}

#[test]
fn edit_commit_and_cancel_scenario() {
    let mut editor = MindMapEditor::new();
    let root = root_id(&editor);

    editor.begin_edit(root);
    editor.set_edit_draft("Cell Biology");
    editor.commit_edit();
    assert_eq!(editor.graph().get_node(root).unwrap().text, "Cell Biology");

    editor.begin_edit(root);
    editor.set_edit_draft("discarded");
    editor.cancel_edit();
    assert_eq!(editor.graph().get_node(root).unwrap().text, "Cell Biology");
}

#[test]
fn snapshot_roundtrip_through_json_scenario() {
    let mut editor = MindMapEditor::new();
    editor.title = "Round Trip".to_string();
    let root = root_id(&editor);
    let child = editor.add_node(Some(root)).unwrap();
    editor.apply_intents([
        MapIntent::SetNodeText {
            id: child,
            text: "Mitochondria".to_string(),
        },
        MapIntent::SetNodeSize {
            id: child,
            size: NodeSize::Small,
        },
    ]);

    let json = snapshot_to_json(&editor.export_snapshot()).unwrap();
    let snapshot = snapshot_from_json(&json).unwrap();

    let mut restored = MindMapEditor::new();
    restored.load_snapshot(&snapshot).unwrap();

    assert_eq!(restored.title, "Round Trip");
    assert_eq!(restored.graph().node_count(), 2);
    assert_eq!(restored.graph().connection_count(), 1);
    let restored_child = restored.graph().get_node(child).unwrap();
    assert_eq!(restored_child.text, "Mitochondria");
    assert_eq!(restored_child.size, NodeSize::Small);
    assert_eq!(restored_child.parent, Some(root));
}

#[test]
fn connection_curve_geometry_scenario() {
    let mut editor = MindMapEditor::new();
    let root = root_id(&editor);
    let child = editor.add_node(Some(root)).unwrap();

    let root_node = editor.graph().get_node(root).unwrap();
    let child_node = editor.graph().get_node(child).unwrap();
    let from = node_center(root_node.position, root_node.size);
    let to = node_center(child_node.position, child_node.size);

    // Large box at (400, 300); medium box at (600, 450).
    assert_eq!(from, Point2D::new(500.0, 350.0));
    assert_eq!(to, Point2D::new(680.0, 490.0));
    assert_eq!(edge_control_point(from, to), Point2D::new(562.0, 456.0));
}

#[test]
fn notices_accumulate_in_action_order_scenario() {
    let mut editor = MindMapEditor::new();
    let root = root_id(&editor);
    let child = editor.add_node(Some(root)).unwrap();
    editor.remove_node(child);
    let _ = editor.export_snapshot();

    let notices = editor.take_notices();
    let messages: Vec<&str> = notices
        .iter()
        .map(|notice| notice.message.as_str())
        .collect();
    assert_eq!(messages, [
        "Node added successfully!",
        "Node deleted successfully!",
        "Mind map exported successfully!",
    ]);
    assert!(editor.take_notices().is_empty());
}
