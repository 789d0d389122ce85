//! Sheet message handlers (keyboard shortcuts)

use crate::commands::Cmd;
use crate::messages::SheetMsg;
use crate::model::AppModel;

pub fn update_sheet(model: &mut AppModel, msg: SheetMsg) -> Option<Cmd> {
    match msg {
        SheetMsg::SetState(state) => {
            if !state.is_terminal() {
                tracing::warn!(?state, "ignoring request for a transient sheet state");
                return None;
            }
            model.layout_if_needed();
            model.sheet.set_state(&mut model.scene, state);
            Some(Cmd::Animate)
        }

        SheetMsg::ToggleKeyboard => {
            let visible = !model.keyboard_visible;
            model.set_keyboard_visible(visible);
            Some(Cmd::Redraw)
        }
    }
}
