//! Choosing a resting state when the pointer lets go

use super::state::SheetState;

/// Position threshold, as a fraction of the collapsed offset
pub const RELEASE_MIDPOINT: f32 = 0.5;

/// Resolve the state a released sheet should settle into
///
/// `top` is the sheet's current top offset and `collapsed_offset` its top
/// when collapsed; `fraction = top / collapsed_offset` is 0 fully open and 1
/// fully collapsed. Velocities are in px/s, negative `yvel` moves up.
///
/// - moving up: Expanded when `fraction <= 0.5`, Collapsed otherwise
/// - no vertical velocity, or mostly horizontal: Expanded above the midpoint
/// - moving down: Collapsed when `fraction >= 0.5`, Expanded otherwise
pub fn resolve_release_target(top: f32, collapsed_offset: f32, xvel: f32, yvel: f32) -> SheetState {
    if collapsed_offset <= 0.0 {
        return SheetState::Collapsed;
    }
    let fraction = top / collapsed_offset;

    if yvel < 0.0 {
        if fraction <= RELEASE_MIDPOINT {
            SheetState::Expanded
        } else {
            SheetState::Collapsed
        }
    } else if yvel == 0.0 || xvel.abs() > yvel.abs() {
        if fraction < RELEASE_MIDPOINT {
            SheetState::Expanded
        } else {
            SheetState::Collapsed
        }
    } else if fraction >= RELEASE_MIDPOINT {
        SheetState::Collapsed
    } else {
        SheetState::Expanded
    }
}
