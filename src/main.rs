mod present;
mod screenshot;

use clap::Parser;
use log::{debug, error, info, warn};
use simd_mandelbrot::{screen, Config, InstructionSet, Palette, Session, ViewBounds, ZoomDirection};
use thiserror::Error;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{
        ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode,
        WindowEvent,
    },
    event_loop::EventLoop,
    window::WindowBuilder,
};

use crate::present::{PresentError, Presenter};

/// Interactive Mandelbrot explorer.
///
/// Scroll to zoom at the cursor, drag with the left button to pan,
/// `s` saves a screenshot, `r` resets the view, `q` or Escape quits.
#[derive(Debug, Parser)]
#[command(name = "simd-mandelbrot")]
struct Args {
    /// Kernel backend: reference (R), vector4 (S) or vector16 (A).
    #[arg(short, long, default_value_t = InstructionSet::Reference)]
    instruction_set: InstructionSet,

    /// Window width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Iteration cutoff; points that reach it are treated as inside the set.
    #[arg(short, long, default_value_t = 50)]
    max_iter: u32,

    /// Colour palette: polynomial or banded.
    #[arg(short, long, default_value_t = Palette::Polynomial)]
    palette: Palette,

    /// Render worker threads (defaults to the number of logical CPUs).
    #[arg(short, long)]
    threads: Option<usize>,
}

impl Args {
    fn config(&self) -> Result<Config, simd_mandelbrot::Error> {
        Ok(Config {
            size: screen::Size::new(self.width, self.height)?,
            max_iter: self.max_iter,
            bounds: ViewBounds::DEFAULT,
            instruction_set: self.instruction_set,
            palette: self.palette,
            threads: self.threads.unwrap_or_else(num_cpus::get),
        })
    }
}

#[derive(Debug, Error)]
enum ViewerError {
    #[error(transparent)]
    Config(#[from] simd_mandelbrot::Error),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Present(#[from] PresentError),
}

fn main() {
    env_logger::init();

    if let Err(error) = run(Args::parse()) {
        error!("{}", error);
        std::process::exit(1);
    }
}

/// Pointer state carried between events.
#[derive(Default)]
struct Pointer {
    position: PhysicalPosition<f64>,
    dragging: bool,
}

fn run(args: Args) -> Result<(), ViewerError> {
    let config = args.config()?;
    let mut session = Session::new(&config)?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("mandelbrot")
        .with_inner_size(PhysicalSize::new(config.size.width(), config.size.height()))
        .build(&event_loop)?;

    // The window manager may not honour the requested size.
    let inner = window.inner_size();
    if let Err(error) = session.resize(inner.width, inner.height) {
        debug!("keeping configured size: {}", error);
    }

    let mut presenter = Presenter::new(&window, session.size())?;
    session.render();
    presenter.upload(session.pixels());

    let mut pointer = Pointer::default();
    let mut screenshots = 0;

    info!(
        "rendering {}x{} with {} (max_iter {})",
        session.size().width(),
        session.size().height(),
        config.instruction_set,
        config.max_iter
    );

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_wait();

        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                let changed = match event {
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                        false
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(key),
                                ..
                            },
                        ..
                    } => match key {
                        VirtualKeyCode::Q | VirtualKeyCode::Escape => {
                            control_flow.set_exit();
                            false
                        }
                        VirtualKeyCode::S => {
                            let file_name = screenshot::file_name(screenshots);
                            match screenshot::save(&file_name, session.size(), session.pixels()) {
                                Ok(()) => {
                                    info!("saved {}", file_name);
                                    screenshots += 1;
                                }
                                Err(error) => error!("failed to save {}: {}", file_name, error),
                            }
                            false
                        }
                        VirtualKeyCode::R => {
                            session.reset();
                            true
                        }
                        _ => false,
                    },
                    WindowEvent::MouseInput {
                        state,
                        button: MouseButton::Left,
                        ..
                    } => {
                        pointer.dragging = state == ElementState::Pressed;
                        false
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let previous = pointer.position;
                        pointer.position = position;
                        if pointer.dragging {
                            session.pan(previous.x - position.x, previous.y - position.y);
                            true
                        } else {
                            false
                        }
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y as f64,
                            MouseScrollDelta::PixelDelta(position) => position.y,
                        };
                        let direction = if scroll > 0.0 {
                            Some(ZoomDirection::In)
                        } else if scroll < 0.0 {
                            Some(ZoomDirection::Out)
                        } else {
                            None
                        };
                        match direction {
                            Some(direction) => {
                                session.zoom_at(pointer.position.x, pointer.position.y, direction);
                                true
                            }
                            None => false,
                        }
                    }
                    WindowEvent::Resized(size) => match session.resize(size.width, size.height) {
                        Ok(()) => {
                            presenter.resize(session.size());
                            true
                        }
                        // Minimised windows report a zero size.
                        Err(error) => {
                            debug!("ignoring resize: {}", error);
                            false
                        }
                    },
                    _ => false,
                };

                if changed {
                    session.render();
                    presenter.upload(session.pixels());
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                if let Err(error) = presenter.present() {
                    warn!("{}", error);
                }
            }
            _ => {}
        }
    });
}
