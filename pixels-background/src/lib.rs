#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod render;

pub use error::BackgroundError;
pub use render::{draw_world, frame_size};

use life_grid::World;
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const BACKGROUND_COLOR: Color = Color::WHITE;

#[derive(Clone, Debug)]
pub struct BackgroundSettings {
    pub title: String,
    pub cell_pixel_width: u32,
    /// Time between generations.
    pub tick: Duration,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            title: "Life background".to_string(),
            cell_pixel_width: 8,
            tick: Duration::from_millis(700),
        }
    }
}

/// Shows `world` in a window and advances it one generation per tick until
/// the window is closed. Any failure ends the loop and is returned.
pub fn animate<W>(settings: &BackgroundSettings, world: W) -> Result<(), BackgroundError>
where
    W: World,
{
    assert!(settings.cell_pixel_width > 0);
    assert!(!settings.tick.is_zero(), "tick must be longer than zero");
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(settings.clone(), world);
    event_loop.run_app(&mut handler)?;
    match handler.error {
        Some(err) => Err(err),
        None => {
            info!("Background closed");
            Ok(())
        }
    }
}

struct App<W: World> {
    world: W,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    cell_pixel_width: u32,
    tick: Duration,
    next_update: Instant,
}

impl<W: World> App<W> {
    fn new(
        event_loop: &ActiveEventLoop,
        settings: &BackgroundSettings,
        world: W,
    ) -> Result<Self, BackgroundError> {
        let (frame_width, frame_height) = frame_size(&world, settings.cell_pixel_width);
        let window = Arc::new(Self::build_window(
            event_loop,
            &settings.title,
            PhysicalSize::new(frame_width, frame_height),
        )?);
        let pixels = Self::build_pixels(&window, frame_width, frame_height)?;
        info!(
            "Opened {}x{} background for {}x{} cells",
            frame_width,
            frame_height,
            world.width(),
            world.height()
        );
        Ok(Self {
            world,
            window,
            pixels,
            cell_pixel_width: settings.cell_pixel_width,
            tick: settings.tick,
            next_update: first_deadline(Instant::now(), settings.tick),
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        title: &str,
        size: PhysicalSize<u32>,
    ) -> Result<Window, BackgroundError> {
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(size)
            .with_resizable(false)
            .with_visible(false);
        Ok(event_loop.create_window(window_attributes)?)
    }

    fn build_pixels(
        window: &Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, BackgroundError> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        Ok(PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()?)
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) {
        self.world.update();
        self.window.request_redraw();

        self.next_update = next_deadline(self.next_update, self.tick, Instant::now());
    }

    fn on_redraw(&mut self) -> Result<(), BackgroundError> {
        draw_world(&self.world, self.cell_pixel_width, self.pixels.frame_mut());
        Ok(self.pixels.render()?)
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), BackgroundError> {
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        Ok(self.pixels.resize_surface(size.width, size.height)?)
    }
}

/// Generation 0 stays on screen for one full tick.
fn first_deadline(start: Instant, tick: Duration) -> Instant {
    start + tick
}

/// The first deadline after `now` on the `next + k * tick` schedule. Ticks
/// missed while busy are dropped, not replayed.
fn next_deadline(next: Instant, tick: Duration, now: Instant) -> Instant {
    assert!(!tick.is_zero());
    let mut next = next;
    while next <= now {
        next += tick;
    }
    next
}

struct AppEventHandler<W: World> {
    settings: BackgroundSettings,
    world: Option<W>,
    app: Option<App<W>>,
    error: Option<BackgroundError>,
}

impl<W: World> AppEventHandler<W> {
    fn new(settings: BackgroundSettings, world: W) -> Self {
        Self {
            settings,
            world: Some(world),
            app: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: BackgroundError) {
        error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(world) = self.world.take() else {
            return;
        };
        match App::new(event_loop, &self.settings, world) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX = code {
                    event_loop.exit();
                }
                Ok(())
            }
            WindowEvent::Resized(size) => app.on_resize(size),
            WindowEvent::RedrawRequested => app.on_redraw(),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.error.is_some() {
            return;
        }
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}
