//! Tests for the tab/session registry.
use canvasflow::prelude::*;
use pretty_assertions::assert_eq;

fn session_count(tabs: &TabRegistry, project_id: &str, name: &str) -> usize {
    tabs.tabs()
        .iter()
        .filter(|t| {
            matches!(&t.kind, TabKind::Session { project_id: p, name: n, .. }
                if p == project_id && n == name)
        })
        .count()
}

#[test]
fn test_workflow_tab_exists_and_is_active_by_default() {
    let tabs = TabRegistry::new();
    assert_eq!(tabs.tabs().len(), 1);
    assert_eq!(tabs.active().id, WORKFLOW_TAB_ID);
    assert_eq!(tabs.active().kind, TabKind::Workflow);
}

#[test]
fn test_open_creates_and_activates_session_tab() {
    let mut tabs = TabRegistry::new();
    let id = tabs.open("p1", "smooth.py", "https://lab/smooth");

    assert_eq!(tabs.tabs().len(), 2);
    assert_eq!(tabs.active().id, id);
    assert!(!tabs.get(WORKFLOW_TAB_ID).unwrap().is_active);
}

#[test]
fn test_open_same_session_twice_activates_existing_tab() {
    let mut tabs = TabRegistry::new();
    let first = tabs.open("p1", "smooth.py", "https://lab/smooth");
    tabs.open("p1", "other.py", "https://lab/other");
    let second = tabs.open("p1", "smooth.py", "https://lab/smooth");

    assert_eq!(first, second);
    assert_eq!(session_count(&tabs, "p1", "smooth.py"), 1);
    assert_eq!(tabs.active().id, first);
}

#[test]
fn test_same_name_in_different_projects_gets_separate_tabs() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open("p1", "smooth.py", "https://lab/p1");
    let b = tabs.open("p2", "smooth.py", "https://lab/p2");

    assert_ne!(a, b);
    assert_eq!(tabs.tabs().len(), 3);
}

#[test]
fn test_exactly_one_tab_active_after_any_open_sequence() {
    let mut tabs = TabRegistry::new();
    tabs.open("p1", "a.py", "https://lab/a");
    tabs.open("p1", "b.py", "https://lab/b");
    tabs.open("p1", "a.py", "https://lab/a");

    let active = tabs.tabs().iter().filter(|t| t.is_active).count();
    assert_eq!(active, 1);
}

#[test]
fn test_workflow_tab_cannot_be_closed() {
    let mut tabs = TabRegistry::new();
    tabs.open("p1", "a.py", "https://lab/a");
    tabs.close(WORKFLOW_TAB_ID);

    assert!(tabs.get(WORKFLOW_TAB_ID).is_some());
    assert_eq!(tabs.tabs().len(), 2);
}

#[test]
fn test_closing_active_tab_falls_back_to_workflow() {
    let mut tabs = TabRegistry::new();
    let id = tabs.open("p1", "a.py", "https://lab/a");
    assert_eq!(tabs.active().id, id);

    tabs.close(&id);
    assert_eq!(tabs.active().id, WORKFLOW_TAB_ID);
    assert_eq!(tabs.tabs().len(), 1);
}

#[test]
fn test_closing_inactive_tab_keeps_current_activation() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open("p1", "a.py", "https://lab/a");
    let b = tabs.open("p1", "b.py", "https://lab/b");

    tabs.close(&a);
    assert_eq!(tabs.active().id, b);
}

#[test]
fn test_close_unknown_id_is_a_noop() {
    let mut tabs = TabRegistry::new();
    tabs.open("p1", "a.py", "https://lab/a");
    tabs.close("no-such-tab");
    assert_eq!(tabs.tabs().len(), 2);
}

#[test]
fn test_switch_activates_exactly_one_tab() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open("p1", "a.py", "https://lab/a");
    tabs.open("p1", "b.py", "https://lab/b");

    tabs.switch(&a).unwrap();
    assert_eq!(tabs.active().id, a);
    assert_eq!(tabs.tabs().iter().filter(|t| t.is_active).count(), 1);
}

#[test]
fn test_switch_to_unknown_tab_errors_and_keeps_activation() {
    let mut tabs = TabRegistry::new();
    let a = tabs.open("p1", "a.py", "https://lab/a");

    let result = tabs.switch("no-such-tab");
    assert_eq!(result, Err(SessionError::UnknownTab("no-such-tab".into())));
    assert_eq!(tabs.active().id, a);
}

#[test]
fn test_session_url_shape() {
    let url = session_url("https", "lab.example.com", "alice", "filters", "smooth.py").unwrap();
    assert_eq!(
        url.as_str(),
        "https://lab.example.com:8000/user/alice/lab/workspaces/auto/tree/codes/nodes/filters/smooth.py"
    );
}

#[test]
fn test_session_url_percent_encodes_segments() {
    let url = session_url("https", "lab.example.com", "alice", "my filters", "a b.py").unwrap();
    assert!(url.as_str().contains("my%20filters"));
    assert!(url.as_str().contains("a%20b.py"));
}
