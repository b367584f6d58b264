use std::sync::Arc;

use input::Input;
use render_state::RenderState;
use time::Time;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::EventLoop,
    keyboard::KeyCode,
    window::{Window, WindowAttributes},
};

use crate::{overlay::OverlayController, renderer::overlay_pass::OverlayPass};

pub mod input;
pub mod render_state;
pub mod time;

pub struct EngineState {
    pub input: Input,
    pub time: Time,

    pub overlay: OverlayController,
    pub overlay_pass: OverlayPass,
}

impl EngineState {
    pub fn new(render_state: &RenderState) -> Self {
        let input = Input::new();
        let time = Time::new(time::TICK_STEP);

        let overlay = OverlayController::new();
        let overlay_pass = OverlayPass::new(render_state, &overlay);

        Self {
            input,
            time,
            overlay,
            overlay_pass,
        }
    }
}

pub enum AppState {
    Uninit,
    Init {
        window: Arc<Window>,
        render_state: RenderState,
        engine_state: EngineState,
    },
}

pub struct App {
    state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::Uninit,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if matches!(&self.state, AppState::Uninit) {
            let window_attributes = WindowAttributes::default()
                .with_title("physgraph host")
                .with_maximized(true);

            let window = event_loop
                .create_window(window_attributes)
                .expect("Couldn't create window");

            let window = Arc::new(window);

            let render_state = pollster::block_on(RenderState::new(window.clone()));
            let engine_state = EngineState::new(&render_state);

            self.state = AppState::Init {
                window,
                render_state,
                engine_state,
            };

            log::info!("App state initialized");
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let AppState::Init {
            window,
            render_state,
            engine_state,
        } = &mut self.state
        else {
            return;
        };

        if window.id() != window_id {
            return;
        }

        let EngineState {
            input,
            time,
            overlay,
            overlay_pass,
        } = engine_state;

        // egui gets first look so the overlay window stays draggable.
        let consumed = overlay_pass.handle_window_event(window, &event);

        match event {
            WindowEvent::KeyboardInput { event, .. } if !consumed => {
                input::handle_keyboard_input_event(input, event);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                input.set_modifiers(modifiers.state());
            }

            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                render_state.resize(size);
            }
            WindowEvent::RedrawRequested => {
                // We want another frame after this one
                render_state.window.request_redraw();

                let (mut encoder, surface_texture) = match render_state.begin_frame() {
                    Ok(r) => r,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                        return;
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("Surface timeout");
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory, exiting");
                        event_loop.exit();
                        return;
                    }
                };

                // Drain every whole simulation tick owed since last frame,
                // then count this render frame against the next tick.
                time.update();
                while time.consume_tick() {
                    overlay.on_tick(time.fixed_step());
                }
                overlay.on_frame();

                if input.modifiers().alt_key() && input.keys.just_pressed(KeyCode::Equal) {
                    overlay.toggle();

                    log::info!(
                        "Overlay {}",
                        if overlay.visible() { "shown" } else { "hidden" }
                    );
                }

                if overlay.render_pass() {
                    overlay_pass.upload_charts(render_state, overlay);
                }

                overlay_pass.draw(render_state, &mut encoder, &surface_texture, overlay);

                render_state.finish_frame(encoder, surface_texture);

                input.update();
            }
            _ => {}
        }
    }
}

pub fn run() {
    let event_loop = EventLoop::new().expect("Couldn't create window event loop");
    let mut app = App::new();

    event_loop.run_app(&mut app).unwrap();
}
