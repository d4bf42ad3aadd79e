use crate::error::Error;

/// Pixel grid dimensions, both positive.
///
/// Only built through [`Size::new`], so every frame has at least one row of at
/// least one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Size::new(0, 600),
            Err(Error::InvalidSize {
                width: 0,
                height: 600
            })
        ));
        assert!(Size::new(800, 0).is_err());
        assert!(Size::new(0, 0).is_err());
    }

    #[test]
    fn accessors_return_constructed_dimensions() {
        let size = Size::new(640, 480).unwrap();
        assert_eq!((size.width(), size.height()), (640, 480));
        assert_eq!(size.pixel_count(), 307_200);
    }

    #[test]
    fn default_is_a_valid_grid() {
        let size = Size::default();
        assert_eq!(Size::new(size.width(), size.height()).unwrap(), size);
    }
}
