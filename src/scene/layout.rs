//! Measurement and layout passes

use super::{Height, NodeId, NodeKind, Scene};

impl Scene {
    /// Height a node wants when measured with unbounded height
    pub fn measure(&self, id: NodeId, width: f32) -> f32 {
        let Some(node) = self.get(id) else {
            return 0.0;
        };
        if !node.visible {
            return 0.0;
        }
        let vertical_padding = node.padding.top + node.padding.bottom;
        let content = match &node.kind {
            NodeKind::Scrim => return 0.0,
            NodeKind::ScrollView { content_height, .. } => *content_height,
            NodeKind::Leaf | NodeKind::AppBar => node.intrinsic_height,
            NodeKind::Container | NodeKind::Content | NodeKind::Sheet => {
                let inner_width = width - node.padding.left - node.padding.right;
                let stacked: f32 = node
                    .children
                    .iter()
                    .map(|child| self.measure(*child, inner_width))
                    .sum();
                stacked.max(node.intrinsic_height)
            }
        };
        let measured = content + vertical_padding;
        match node.max_height {
            Some(max) => measured.min(max),
            None => measured,
        }
    }

    /// Run a layout pass over the root's children
    ///
    /// `behavior` is offered each child first and returns `true` when it
    /// placed the child itself.
    pub fn layout_with(&mut self, mut behavior: impl FnMut(&mut Scene, NodeId) -> bool) {
        let root = self.root();
        let children: Vec<NodeId> = self.children(root).to_vec();
        for child in children {
            if !self.contains(child) {
                continue;
            }
            if !behavior(self, child) {
                self.layout_child(child);
            }
        }
        self.layout_requested = false;
    }

    /// Layout without any behavior hook
    pub fn layout(&mut self) {
        self.layout_with(|_, _| false);
    }

    /// Default placement of a direct child of its parent
    ///
    /// App bars sit at the top, content fills the space below the app bars
    /// minus its bottom margin, scrims cover the parent, and everything else is
    /// placed at the top with its resolved height.
    pub fn layout_child(&mut self, id: NodeId) {
        let Some(parent) = self.parent_of(id) else {
            return;
        };
        let Some(parent_rect) = self.get(parent).map(|n| n.rect) else {
            return;
        };
        let Some(kind) = self.get(id).map(|n| n.kind.clone()) else {
            return;
        };

        let (y, height) = match kind {
            NodeKind::AppBar => (0.0, self.measure(id, parent_rect.width)),
            NodeKind::Content => {
                let top = self
                    .children(parent)
                    .iter()
                    .filter(|c| self.get(**c).is_some_and(|n| n.is_app_bar() && n.visible))
                    .map(|c| self.measure(*c, parent_rect.width))
                    .sum::<f32>();
                let margin = self.get(id).map(|n| n.bottom_margin).unwrap_or(0.0);
                (top, (parent_rect.height - top - margin).max(0.0))
            }
            NodeKind::Scrim => (0.0, parent_rect.height),
            _ => (0.0, self.resolve_height(id, parent_rect.width, parent_rect.height)),
        };

        if let Some(node) = self.get_mut(id) {
            node.rect.x = 0.0;
            node.rect.y = y;
            node.rect.width = parent_rect.width;
            node.rect.height = height;
        }
        self.layout_children(id);
    }

    /// Stack the children of `id` vertically inside its padding
    ///
    /// `MatchParent` children share whatever space the others leave.
    pub fn layout_children(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let padding = node.padding;
        let inner_width = (node.rect.width - padding.left - padding.right).max(0.0);
        let inner_height = (node.rect.height - padding.top - padding.bottom).max(0.0);
        let children = node.children.clone();

        let mut fixed = 0.0;
        let mut fillers = 0usize;
        for child in &children {
            match self.get(*child) {
                Some(c) if !c.visible => {}
                Some(c) if c.height == Height::MatchParent => fillers += 1,
                Some(_) => fixed += self.resolve_height(*child, inner_width, inner_height),
                None => {}
            }
        }
        let fill = if fillers > 0 {
            ((inner_height - fixed) / fillers as f32).max(0.0)
        } else {
            0.0
        };

        let mut y = padding.top;
        for child in children {
            let visible = self.get(child).is_some_and(|c| c.visible);
            if !visible {
                continue;
            }
            let height = match self.get(child).map(|c| c.height) {
                Some(Height::MatchParent) => fill,
                _ => self.resolve_height(child, inner_width, inner_height),
            };
            if let Some(c) = self.get_mut(child) {
                c.rect.x = padding.left;
                c.rect.y = y;
                c.rect.width = inner_width;
                c.rect.height = height;
                let max_scroll = c.max_scroll_for(height);
                if let NodeKind::ScrollView { scroll_y, .. } = &mut c.kind {
                    *scroll_y = scroll_y.min(max_scroll);
                }
            }
            y += height;
            self.layout_children(child);
        }
    }

    /// Set the requested height and apply it to the current rect right away
    ///
    /// Children are re-stacked immediately; a full layout pass is requested
    /// so that positions are reconciled on the next frame.
    pub fn set_requested_height(&mut self, id: NodeId, height: f32) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.height = Height::Exact(height);
        node.rect.height = height;
        self.layout_children(id);
        self.layout_requested = true;
    }

    fn resolve_height(&self, id: NodeId, width: f32, available: f32) -> f32 {
        match self.get(id).map(|n| n.height) {
            Some(Height::Exact(h)) => h,
            Some(Height::MatchParent) => available,
            Some(Height::WrapContent) => self.measure(id, width),
            None => 0.0,
        }
    }
}

impl super::Node {
    fn max_scroll_for(&self, height: f32) -> f32 {
        match self.kind {
            NodeKind::ScrollView { content_height, .. } => {
                (content_height - (height - self.padding.top - self.padding.bottom)).max(0.0)
            }
            _ => 0.0,
        }
    }
}
