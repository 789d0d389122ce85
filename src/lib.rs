//! slide-sheet - an expanding bottom sheet controller
//!
//! The [`sheet`] module holds the controller itself: it positions a sheet
//! node inside a [`scene`], tracks drags and nested scrolling, and settles
//! the sheet into its collapsed or expanded resting position. The remaining
//! modules wrap it in an Elm-style demo application.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod geometry;
pub mod messages;
pub mod model;
pub mod scene;
pub mod sheet;
pub mod theme;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::SheetConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use sheet::{ExpandingSheet, SheetState};
