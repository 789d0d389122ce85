//! Retained layout tree the sheet controller operates on
//!
//! The scene is an arena of [`Node`]s addressed by generation-checked
//! [`NodeId`] handles. The root node plays the role of the coordinating
//! parent: it owns the app bar, the main content, the scrim and the sheet.
//!
//! ## Layout
//!
//! `layout_with()` runs one layout pass over the root's children, giving a
//! behavior hook the first chance to place each child (this is how the sheet
//! controller positions the sheet). Children the hook declines get the
//! default placement from `layout_child()`.

mod layout;
mod node;

pub use node::{Height, Node, NodeId, NodeKind};

use crate::geometry::Rect;

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    layout_requested: bool,
}

impl Scene {
    /// Create a scene whose root covers a `width` x `height` window
    pub fn new(width: f32, height: f32) -> Self {
        let mut root = Node::new(NodeKind::Container);
        root.rect = Rect::new(0.0, 0.0, width, height);
        root.height = node::Height::Exact(height);
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            layout_requested: true,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Whether the handle still refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn index_of_child(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Append a node as the last (topmost) child of `parent`
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, node)
    }

    /// Insert a node at `index` among the children of `parent`
    ///
    /// Returns `None` when `parent` is stale.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, mut node: Node) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        node.parent = Some(parent);
        node.children.clear();

        let id = match self.free.pop() {
            Some(slot_index) => {
                let slot = &mut self.slots[slot_index as usize];
                slot.node = Some(node);
                NodeId {
                    index: slot_index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };

        if let Some(parent_node) = self.get_mut(parent) {
            let index = index.min(parent_node.children.len());
            parent_node.children.insert(index, id);
        }
        self.layout_requested = true;
        Some(id)
    }

    /// Remove a node and its whole subtree
    ///
    /// Every handle to a removed node becomes stale. Removing the root is a
    /// no-op.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        if let Some(parent) = self.parent_of(id) {
            if let Some(parent_node) = self.get_mut(parent) {
                parent_node.children.retain(|c| *c != id);
            }
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
        }
        self.layout_requested = true;
    }

    pub fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    pub fn is_layout_requested(&self) -> bool {
        self.layout_requested
    }

    /// Resize the root (window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        let root = self.root;
        if let Some(node) = self.get_mut(root) {
            node.rect = Rect::new(0.0, 0.0, width, height);
            node.height = node::Height::Exact(height);
        }
        self.layout_requested = true;
    }

    /// Rect of a node in window coordinates
    pub fn absolute_rect(&self, id: NodeId) -> Option<Rect> {
        let mut rect = self.get(id)?.rect;
        let mut parent = self.parent_of(id);
        while let Some(p) = parent {
            let node = self.get(p)?;
            rect = rect.translated(node.rect.x, node.rect.y);
            parent = node.parent;
        }
        Some(rect)
    }

    /// Hit test a single node (window coordinates)
    pub fn is_point_in_node(&self, id: NodeId, x: f32, y: f32) -> bool {
        self.absolute_rect(id).is_some_and(|r| r.contains(x, y))
    }

    /// Topmost visible direct child of `parent` under the point
    pub fn find_top_child_under(&self, parent: NodeId, x: f32, y: f32) -> Option<NodeId> {
        self.children(parent).iter().rev().copied().find(|child| {
            self.get(*child).is_some_and(|n| n.visible) && self.is_point_in_node(*child, x, y)
        })
    }

    /// Move a node vertically without changing its size
    pub fn offset_top_and_bottom(&mut self, id: NodeId, dy: f32) {
        if let Some(node) = self.get_mut(id) {
            node.rect.y += dy;
        }
    }

    /// First visible descendant (or `id` itself) with nested scrolling enabled
    ///
    /// Depth-first; invisible subtrees are skipped.
    pub fn find_scrolling_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        if !node.visible {
            return None;
        }
        if node.nested_scrolling {
            return Some(id);
        }
        node.children
            .iter()
            .find_map(|child| self.find_scrolling_child(*child))
    }

    /// First app bar in the subtree rooted at `id`
    pub fn find_app_bar(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        if node.is_app_bar() {
            return Some(id);
        }
        node.children.iter().find_map(|child| self.find_app_bar(*child))
    }

    /// Scroll a scroll view by `dy` (positive scrolls towards the end)
    ///
    /// Returns the amount actually scrolled.
    pub fn scroll_by(&mut self, id: NodeId, dy: f32) -> f32 {
        let Some(node) = self.get_mut(id) else {
            return 0.0;
        };
        let max = node.max_scroll();
        match &mut node.kind {
            NodeKind::ScrollView { scroll_y, .. } => {
                let before = *scroll_y;
                *scroll_y = (before + dy).clamp(0.0, max);
                *scroll_y - before
            }
            _ => 0.0,
        }
    }

    /// Iterate live nodes in depth-first paint order starting at `id`
    pub fn walk(&self, id: NodeId, f: &mut impl FnMut(NodeId, &Node)) {
        let Some(node) = self.get(id) else {
            return;
        };
        f(id, node);
        for child in &node.children {
            self.walk(*child, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_handle_goes_stale_even_after_slot_reuse() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let a = scene.add_child(root, Node::leaf(10.0)).unwrap();
        scene.remove(a);
        assert!(!scene.contains(a));

        let b = scene.add_child(root, Node::leaf(10.0)).unwrap();
        assert_eq!(a.index, b.index);
        assert!(!scene.contains(a));
        assert!(scene.contains(b));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let parent = scene.add_child(root, Node::new(NodeKind::Container)).unwrap();
        let child = scene.add_child(parent, Node::leaf(10.0)).unwrap();
        scene.remove(parent);
        assert!(!scene.contains(child));
        assert!(scene.children(root).is_empty());
    }

    #[test]
    fn test_find_scrolling_child_skips_invisible_subtrees() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let hidden = scene.add_child(root, Node::new(NodeKind::Container)).unwrap();
        scene.add_child(hidden, Node::scroll_view(500.0)).unwrap();
        scene.get_mut(hidden).unwrap().visible = false;
        let shown = scene.add_child(root, Node::scroll_view(500.0)).unwrap();

        assert_eq!(scene.find_scrolling_child(root), Some(shown));
    }

    #[test]
    fn test_find_top_child_prefers_last_child() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let below = scene.add_child(root, Node::leaf(100.0)).unwrap();
        let above = scene.add_child(root, Node::leaf(100.0)).unwrap();
        scene.get_mut(below).unwrap().rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        scene.get_mut(above).unwrap().rect = Rect::new(0.0, 50.0, 100.0, 50.0);

        assert_eq!(scene.find_top_child_under(root, 10.0, 60.0), Some(above));
        assert_eq!(scene.find_top_child_under(root, 10.0, 10.0), Some(below));
    }

    #[test]
    fn test_absolute_rect_accumulates_parent_offsets() {
        let mut scene = Scene::new(100.0, 100.0);
        let root = scene.root();
        let outer = scene.add_child(root, Node::new(NodeKind::Container)).unwrap();
        let inner = scene.add_child(outer, Node::leaf(10.0)).unwrap();
        scene.get_mut(outer).unwrap().rect = Rect::new(0.0, 40.0, 100.0, 60.0);
        scene.get_mut(inner).unwrap().rect = Rect::new(0.0, 5.0, 100.0, 10.0);

        assert_eq!(scene.absolute_rect(inner).unwrap().y, 45.0);
    }
}
