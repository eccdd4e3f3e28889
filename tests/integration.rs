//! End-to-end scenario: load the palette, build a small pipeline, edit it,
//! and open an embedded session.
mod common;
use canvasflow::prelude::*;
use canvasflow::sync::DetailSynchronizer;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_full_editor_session() {
    let backend = MockBackend::with_library(vec![
        sample_library_node("smooth.py"),
        sample_library_node("detect.py"),
    ]);

    // Load the palette from the backend.
    let files = FileManager::new(&backend);
    let mut library = SchemaLibrary::new();
    files.refresh_library(&mut library).unwrap();
    assert_eq!(library.len(), 2);

    // Bind the canvas to a project and place two nodes.
    let mut store = CanvasStore::new();
    store.load_project("p1", vec![], vec![]);

    let smooth_raw = DragPayload::from(library.get("smooth.py").unwrap())
        .to_json()
        .unwrap();
    let detect_raw = DragPayload::from(library.get("detect.py").unwrap())
        .to_json()
        .unwrap();
    let smooth = store
        .drop_payload(&smooth_raw, Position::new(100.0, 100.0))
        .unwrap();
    let detect = store
        .drop_payload(&detect_raw, Position::new(400.0, 100.0))
        .unwrap();

    // Wire smooth.result -> detect.signal.
    store
        .connect(
            HandleId::new(smooth.clone(), "result", Direction::Output, "ndarray"),
            HandleId::new(detect.clone(), "signal", Direction::Input, "ndarray"),
        )
        .unwrap();
    assert_eq!(store.edges().len(), 1);

    // Edit the placed node's threshold through the synchronizer.
    let mut sync = DetailSynchronizer::new(&backend);
    let node = NodeRef::resolve(&store, &detect, None).unwrap();
    sync.select(Some(node.clone()));
    sync.begin_edit("default_value", "10");
    sync.update_parameter(
        &mut store,
        &mut library,
        &node,
        "threshold",
        ParameterField::DefaultValue,
        "10",
    )
    .unwrap();
    assert_eq!(
        store.node(&detect).unwrap().data.schema.parameters["threshold"].default_value,
        serde_json::json!(10)
    );

    // The palette's shared default is unaffected by the per-instance edit.
    assert_eq!(
        library.get("detect.py").unwrap().schema.parameters["threshold"].default_value,
        serde_json::json!(5)
    );

    // Name the instance and run the workflow.
    sync.update_instance_name(&mut store, "p1", &detect, "peak-detect")
        .unwrap();
    let outcome = sync.run_workflow("p1").unwrap();
    assert_eq!(outcome.status, "ok");

    // Open the node's notebook session in a tab; reopening reuses it.
    let mut tabs = TabRegistry::new();
    let url = session_url("https", "lab.example.com", "alice", "analysis", "detect.py").unwrap();
    let tab = tabs.open("p1", "detect.py", url.as_str());
    assert_eq!(tabs.open("p1", "detect.py", url.as_str()), tab);
    assert_eq!(tabs.tabs().len(), 2);

    // Closing the session tab lands back on the workflow editor.
    tabs.close(&tab);
    assert_eq!(tabs.active().id, WORKFLOW_TAB_ID);

    // Switching projects discards the graph wholesale.
    store.load_project("p2", vec![], vec![]);
    assert_eq!(store.node_count(), 0);
    assert!(store.edges().is_empty());
}
