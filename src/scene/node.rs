//! Node types stored in the scene arena

use crate::geometry::{Edges, Rect};

/// Handle to a node in a [`Scene`](super::Scene)
///
/// Handles never keep a node alive. Once the node is removed its slot
/// generation changes and the handle resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// What a node represents; drives measurement and default layout
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Plain vertical stack of children
    Container,
    /// Top app bar; the sheet may be configured to expand below it
    AppBar,
    /// Main screen content behind the sheet
    Content,
    /// The draggable sheet itself
    Sheet,
    /// Scrollable list. `content_height` is the full scrollable extent.
    ScrollView { content_height: f32, scroll_y: f32 },
    /// Dimming overlay owned by the sheet controller
    Scrim,
    /// Fixed-size leaf
    Leaf,
}

/// Requested height, resolved during layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Height {
    /// Measured content height
    #[default]
    WrapContent,
    /// Fill the remaining space of the parent
    MatchParent,
    Exact(f32),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Position and size relative to the parent node
    pub rect: Rect,
    pub visible: bool,
    /// Participates in nested scrolling with an enclosing sheet
    pub nested_scrolling: bool,
    pub clickable: bool,
    pub padding: Edges,
    pub bottom_margin: f32,
    pub height: Height,
    /// Height of a leaf, before padding
    pub intrinsic_height: f32,
    /// Cap applied when measuring (scroll views)
    pub max_height: Option<f32>,
    /// Application-assigned identifier
    pub view_id: Option<u32>,
    pub alpha: f32,
    /// ARGB fill colour
    pub color: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            rect: Rect::default(),
            visible: true,
            nested_scrolling: false,
            clickable: false,
            padding: Edges::ZERO,
            bottom_margin: 0.0,
            height: Height::WrapContent,
            intrinsic_height: 0.0,
            max_height: None,
            view_id: None,
            alpha: 1.0,
            color: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn leaf(height: f32) -> Self {
        Self {
            intrinsic_height: height,
            ..Self::new(NodeKind::Leaf)
        }
    }

    pub fn app_bar(height: f32) -> Self {
        Self {
            intrinsic_height: height,
            ..Self::new(NodeKind::AppBar)
        }
    }

    pub fn sheet() -> Self {
        Self::new(NodeKind::Sheet)
    }

    /// Nested-scrolling list with the given scrollable extent
    pub fn scroll_view(content_height: f32) -> Self {
        Self {
            nested_scrolling: true,
            height: Height::MatchParent,
            ..Self::new(NodeKind::ScrollView {
                content_height,
                scroll_y: 0.0,
            })
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_height(mut self, height: Height) -> Self {
        self.height = height;
        self
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn with_view_id(mut self, id: u32) -> Self {
        self.view_id = Some(id);
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_app_bar(&self) -> bool {
        matches!(self.kind, NodeKind::AppBar)
    }

    /// Current scroll offset for scroll views, 0 otherwise
    pub fn scroll_y(&self) -> f32 {
        match self.kind {
            NodeKind::ScrollView { scroll_y, .. } => scroll_y,
            _ => 0.0,
        }
    }

    /// Whether content can still scroll towards its start
    pub fn can_scroll_up(&self) -> bool {
        self.scroll_y() > 0.0
    }

    /// Largest valid scroll offset given the current rect
    pub fn max_scroll(&self) -> f32 {
        match self.kind {
            NodeKind::ScrollView { content_height, .. } => {
                let viewport = self.rect.height - self.padding.top - self.padding.bottom;
                (content_height - viewport).max(0.0)
            }
            _ => 0.0,
        }
    }
}
