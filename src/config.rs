use crate::{colour::Palette, error::Error, kernel::InstructionSet, screen, view::ViewBounds};

/// Session start-up settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub size: screen::Size,
    pub max_iter: u32,
    pub bounds: ViewBounds,
    pub instruction_set: InstructionSet,
    pub palette: Palette,
    /// Worker threads for the render pool.
    pub threads: usize,
}

impl Config {
    /// Grid dimensions are already positive by construction of [`screen::Size`].
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_iter == 0 {
            return Err(Error::InvalidMaxIter);
        }
        if !self.bounds.is_valid() {
            return Err(Error::InvalidBounds(self.bounds));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: screen::Size::default(),
            max_iter: 50,
            bounds: ViewBounds::DEFAULT,
            instruction_set: InstructionSet::default(),
            palette: Palette::default(),
            threads: num_cpus::get(),
        }
    }
}
