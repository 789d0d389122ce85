use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::Window;

use slide_sheet::cli::StartupConfig;
use slide_sheet::commands::Cmd;
use slide_sheet::messages::{AppMsg, Msg};
use slide_sheet::model::AppModel;
use slide_sheet::sheet::TouchAction;
use slide_sheet::update::update;

use super::input::{key_to_msg, pointer_msg, wheel_msg};
use crate::debug_dump::StateDump;
use crate::view::Renderer;

/// Target interval between animation frames
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Longest step fed to the animation after a stall
const MAX_FRAME_STEP: Duration = Duration::from_millis(50);

pub struct App {
    model: AppModel,
    startup: StartupConfig,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    /// Origin for pointer event timestamps
    started: Instant,
    last_frame: Instant,
    mouse_position: Option<(f64, f64)>,
    left_mouse_down: bool,
    animating: bool,
    should_exit: bool,
}

impl App {
    pub fn new(startup: StartupConfig) -> Result<Self> {
        let window = startup.config.window;
        let model = build_model(&startup, window.width, window.height, 1.0)?;
        Ok(Self {
            model,
            startup,
            renderer: None,
            window: None,
            context: None,
            started: Instant::now(),
            last_frame: Instant::now(),
            mouse_position: None,
            left_mouse_down: false,
            animating: false,
            should_exit: false,
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = self.startup.config.window;
        let window_attributes = Window::default_attributes()
            .with_title("slide-sheet")
            .with_inner_size(LogicalSize::new(size.width, size.height));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create context: {}", e))?;

        self.rebuild_model(&window)?;
        self.renderer = Some(Renderer::new(Rc::clone(&window), &context)?);
        window.set_title(&self.model.status_line());
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    /// Recreate the model for the window's physical size and scale factor
    ///
    /// The sheet's resting state carries over; pixel offsets are recomputed.
    fn rebuild_model(&mut self, window: &Window) -> Result<()> {
        let size = window.inner_size();
        let scale = window.scale_factor() as f32;
        let keyboard = self.model.keyboard_visible;
        let state = self.model.sheet.state();
        if state.is_terminal() {
            self.startup.initial_state = state;
        }

        self.model = build_model(&self.startup, size.width, size.height, scale)?;
        if keyboard {
            self.model.set_keyboard_visible(true);
        }
        tracing::info!(
            width = size.width,
            height = size.height,
            scale,
            "model built for window"
        );
        self.request_animation();
        Ok(())
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => update(
                &mut self.model,
                Msg::App(AppMsg::Resize(size.width, size.height)),
            ),
            WindowEvent::KeyboardInput { event, .. } => {
                let msg = key_to_msg(event)?;
                update(&mut self.model, msg)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                if !self.left_mouse_down {
                    return None;
                }
                let msg = pointer_msg(TouchAction::Move, position.x, position.y, self.now());
                update(&mut self.model, msg)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_position?;
                let action = match state {
                    ElementState::Pressed => {
                        self.left_mouse_down = true;
                        TouchAction::Down
                    }
                    ElementState::Released => {
                        if !self.left_mouse_down {
                            return None;
                        }
                        self.left_mouse_down = false;
                        TouchAction::Up
                    }
                };
                let now = self.now();
                update(&mut self.model, pointer_msg(action, x, y, now))
            }
            WindowEvent::CursorLeft { .. } => {
                let position = self.mouse_position.take();
                if !self.left_mouse_down {
                    return None;
                }
                self.left_mouse_down = false;
                let (x, y) = position.unwrap_or_default();
                let now = self.now();
                update(&mut self.model, pointer_msg(TouchAction::Cancel, x, y, now))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = self.mouse_position?;
                let msg = wheel_msg(delta, x, y, self.model.scale_factor)?;
                update(&mut self.model, msg)
            }
            _ => None,
        }
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.model)?;
        }
        if let Some(window) = &self.window {
            window.set_title(&self.model.status_line());
        }
        Ok(())
    }

    fn request_animation(&mut self) {
        if !self.animating {
            self.animating = true;
            self.last_frame = Instant::now();
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::Animate => self.request_animation(),
            Cmd::DumpState => {
                let dump = StateDump::from_model(&self.model);
                match dump.save_to_file() {
                    Ok(path) => tracing::info!(%path, "state dumped"),
                    Err(e) => tracing::warn!("State dump failed: {}", e),
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::Quit => self.should_exit = true,
        }
    }

    /// Advance the animation by the time since the last frame
    fn step_animation(&mut self) -> bool {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).min(MAX_FRAME_STEP);
        self.last_frame = now;

        let cmd = update(&mut self.model, Msg::App(AppMsg::Frame(dt)));
        self.animating = cmd.as_ref().is_some_and(Cmd::wants_frame);
        let redraw = cmd.as_ref().is_some_and(Cmd::needs_redraw);
        if let Some(cmd) = cmd {
            self.process_cmd(cmd);
        }
        redraw
    }
}

fn build_model(startup: &StartupConfig, width: u32, height: u32, scale: f32) -> Result<AppModel> {
    let mut model = AppModel::new(startup.config.clone(), width, height, scale)
        .map_err(anyhow::Error::msg)?;
    model.sheet.set_state(&mut model.scene, startup.initial_state);
    model.layout();
    Ok(model)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            tracing::error!("Failed to create window: {:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render failed: {:#}", e);
                }
                return;
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                // The new physical size arrives with the following resize
                if let Err(e) = self.rebuild_model(&window) {
                    tracing::error!("Failed to rebuild model: {:#}", e);
                }
                window.request_redraw();
                return;
            }
            _ => {}
        }

        if let Some(cmd) = self.handle_event(&event) {
            let needs_redraw = cmd.needs_redraw();
            self.process_cmd(cmd);
            if needs_redraw {
                window.request_redraw();
            }
        }

        if self.should_exit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.animating {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        if self.last_frame.elapsed() >= FRAME_INTERVAL && self.step_animation() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        if self.should_exit {
            event_loop.exit();
        } else if self.animating {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.last_frame + FRAME_INTERVAL));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}
