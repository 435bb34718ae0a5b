use super::*;

fn two_level() -> (SceneGraph, NodeId, NodeId) {
    let mut g = SceneGraph::new();
    let root = g
        .add(None, SceneNode::new(Rect::new(10.0, 20.0, 210.0, 220.0)))
        .unwrap();
    let child = g
        .add(Some(root), SceneNode::new(Rect::new(5.0, 5.0, 25.0, 45.0)))
        .unwrap();
    (g, root, child)
}

#[test]
fn frames_accumulate_parent_origins() {
    let (g, root, child) = two_level();
    assert_eq!(g.frame(root), Rect::new(10.0, 20.0, 210.0, 220.0));
    assert_eq!(g.frame(child), Rect::new(15.0, 25.0, 35.0, 65.0));
    assert_eq!(g.parent(child), Some(root));
    assert_eq!(g.children(root), vec![child]);
}

#[test]
fn unknown_parent_is_rejected() {
    let mut g = SceneGraph::new();
    assert!(g.add(Some(NodeId(7)), SceneNode::new(Rect::ZERO)).is_err());
}

#[test]
fn detach_and_reattach_restore_index() {
    let (mut g, root, child) = two_level();
    let second = g.add(Some(root), SceneNode::new(Rect::ZERO)).unwrap();
    assert_eq!(g.detach(child), Some(0));
    assert_eq!(g.children(root), vec![second]);
    assert_eq!(g.parent(child), None);
    assert_eq!(g.frame(child), Rect::new(15.0, 25.0, 35.0, 65.0));
    g.reattach(child, root, 0);
    assert_eq!(g.children(root), vec![child, second]);
    assert_eq!(g.frame(child), Rect::new(15.0, 25.0, 35.0, 65.0));
    assert_eq!(g.node(child).unwrap().position, Point::new(15.0, 25.0));
}

#[test]
fn capture_failures_and_release_are_tracked() {
    let (mut g, root, child) = two_level();
    g.fail_captures_for(child);
    assert!(g.capture(child, CaptureMode::Render).is_err());
    let h = g.capture(root, CaptureMode::PixelExact).unwrap();
    assert_eq!(g.live_captures(), 1);
    assert_eq!(g.captures()[0].mode, CaptureMode::PixelExact);
    g.release(h);
    assert_eq!(g.live_captures(), 0);
}

#[test]
fn subtree_is_pre_order() {
    let (mut g, root, child) = two_level();
    let grandchild = g.add(Some(child), SceneNode::new(Rect::ZERO)).unwrap();
    let second = g.add(Some(root), SceneNode::new(Rect::ZERO)).unwrap();
    assert_eq!(g.subtree(root), vec![root, child, grandchild, second]);
}
