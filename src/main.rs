//! slide-sheet demo: a window with an app bar, content and an expanding
//! bottom sheet driven by the mouse

mod debug_dump;
mod runtime;
mod view;

use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use slide_sheet::cli::CliArgs;

use runtime::App;

fn main() -> Result<()> {
    slide_sheet::tracing::init();

    let args = CliArgs::parse();
    let base = args.load_config();
    let startup = args.into_config(base).map_err(anyhow::Error::msg)?;
    tracing::info!(
        initial = ?startup.initial_state,
        scrim = startup.config.sheet.use_scrim,
        "starting"
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(startup)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
