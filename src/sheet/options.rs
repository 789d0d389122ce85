//! Sheet configuration options

use serde::{Deserialize, Serialize};

/// Options controlling how the sheet behaves
///
/// Loaded from the `sheet:` section of `config.yaml`; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetOptions {
    /// Whether touch drags may move the sheet
    pub draggable: bool,
    /// Extra distance between the expanded sheet and the top edge
    pub top_offset: f32,
    /// Expand only down to the bottom of the app bar
    pub draw_below_app_bar: bool,
    /// Dim the content behind the sheet while it is open
    pub use_scrim: bool,
    /// Shrink the main content so it ends where the collapsed sheet begins
    pub offset_content_view_bottom: bool,
    /// Only handle gestures when the sheet node carries this view id
    pub content_view_id: Option<u32>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            draggable: true,
            top_offset: 0.0,
            draw_below_app_bar: false,
            use_scrim: false,
            offset_content_view_bottom: false,
            content_view_id: None,
        }
    }
}
