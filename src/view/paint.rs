//! Scene painter
//!
//! Walks the scene in paint order and fills each visible node with its
//! color. Lists draw alternating rows shifted by their scroll position and
//! the scrim blends over everything painted before it.

use slide_sheet::geometry::Rect;
use slide_sheet::model::AppModel;
use slide_sheet::scene::{NodeId, NodeKind, Scene};

use super::frame::{with_alpha_scaled, Frame};

/// Drag handle pill size (logical pixels)
const HANDLE_WIDTH: f32 = 36.0;
const HANDLE_THICKNESS: f32 = 4.0;

pub fn paint_model(frame: &mut Frame, model: &AppModel) {
    frame.clear(model.palette.background.to_argb_u32());
    let painter = Painter {
        model,
        scale: model.scale_factor,
        item_height: model.config.scene.item_height * model.scale_factor,
    };
    painter.paint_node(frame, &model.scene, model.scene.root());
}

struct Painter<'m> {
    model: &'m AppModel,
    scale: f32,
    item_height: f32,
}

impl Painter<'_> {
    fn paint_node(&self, frame: &mut Frame, scene: &Scene, id: NodeId) {
        let Some(node) = scene.get(id) else { return };
        if !node.visible {
            return;
        }
        let Some(rect) = scene.absolute_rect(id) else {
            return;
        };

        match node.kind {
            NodeKind::Scrim => {
                frame.fill_rect_blended(rect, with_alpha_scaled(node.color, node.alpha));
            }
            NodeKind::ScrollView { scroll_y, .. } => {
                self.paint_list(frame, rect, scroll_y);
            }
            _ if id == self.model.nodes.handle => {
                frame.fill_rect(rect, node.color);
                self.paint_handle_pill(frame, rect);
            }
            _ => frame.fill_rect(rect, node.color),
        }

        for child in node.children() {
            self.paint_node(frame, scene, *child);
        }
    }

    fn paint_list(&self, frame: &mut Frame, rect: Rect, scroll_y: f32) {
        if self.item_height <= 0.0 {
            return;
        }
        let palette = &self.model.palette;
        frame.set_clip(rect);

        let first = (scroll_y / self.item_height).floor().max(0.0) as usize;
        let mut y = rect.y + first as f32 * self.item_height - scroll_y;
        let mut row = first;
        while y < rect.bottom() {
            let color = if row % 2 == 0 {
                palette.list_item
            } else {
                palette.list_item_alt
            };
            frame.fill_rect(
                Rect::new(rect.x, y, rect.width, self.item_height),
                color.to_argb_u32(),
            );
            y += self.item_height;
            row += 1;
        }

        frame.clear_clip();
    }

    fn paint_handle_pill(&self, frame: &mut Frame, rect: Rect) {
        let width = HANDLE_WIDTH * self.scale;
        let thickness = HANDLE_THICKNESS * self.scale;
        let pill = Rect::new(
            rect.x + (rect.width - width) / 2.0,
            rect.y + (rect.height - thickness) / 2.0,
            width,
            thickness,
        );
        frame.fill_rect(pill, self.model.palette.title.to_argb_u32());
    }
}
