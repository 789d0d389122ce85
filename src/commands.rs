//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the window
    Redraw,
    /// Keep the frame loop running; the sheet or a list fling is animating
    Animate,
    /// Serialize the current state to a JSON file
    DumpState,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    Quit,
}

impl Cmd {
    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Animate => true,
            Cmd::DumpState => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            Cmd::Quit => false,
        }
    }

    /// Whether another animation frame should be scheduled
    pub fn wants_frame(&self) -> bool {
        match self {
            Cmd::Animate => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.wants_frame()),
            _ => false,
        }
    }

    /// Combine two optional commands into one
    pub fn merge(a: Option<Cmd>, b: Option<Cmd>) -> Option<Cmd> {
        match (a, b) {
            (None, None) => None,
            (Some(cmd), None) | (None, Some(cmd)) => Some(cmd),
            (Some(a), Some(b)) => Some(Cmd::Batch(vec![a, b])),
        }
    }
}
