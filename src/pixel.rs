use bytemuck::{Pod, Zeroable};

/// A single output pixel, stored as `(opacity, red, green, blue)` bytes.
///
/// The layout is [`bytemuck`]-compatible so a whole frame can be handed to the
/// presentation layer as raw bytes.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub opacity: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            opacity: u8::MAX,
            red,
            green,
            blue,
        }
    }
}
