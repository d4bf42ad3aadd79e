/*!
Escape-time Mandelbrot renderer for the CPU.

A [`session::Session`] maps a pixel grid onto a rectangle of the complex plane,
computes the escape-time count of every pixel with one of three interchangeable
kernels (scalar `f32`, 4-lane `f32`, 16-wide `f64`) across a pool of worker
threads, and colours the counts into a pixel buffer. Pan and zoom move the
rectangle; every change recomputes the whole frame.
*/

pub mod colour;
pub mod config;
pub mod coords;
pub mod cpu;
pub mod error;
pub mod kernel;
pub mod pixel;
pub mod render;
pub mod screen;
pub mod session;
pub mod view;

pub use colour::Palette;
pub use config::Config;
pub use error::Error;
pub use kernel::{InstructionSet, Kernel};
pub use pixel::Pixel;
pub use session::Session;
pub use view::{ViewBounds, ZoomDirection};
