//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window management and the frame loop
//! - `input` - Keyboard and mouse event to message mapping

pub mod app;
pub mod input;

pub use app::App;
