/*!
Escape-time kernels and backend selection.

Every backend computes the same recurrence, `z ← z² + c` from `z = 0`, and
counts the iterations taken while `|z|² <= 4`, up to `max_iter`. A count of
`max_iter` means the point is assumed to be inside the set.

* [`scalar`]: one point per call, `f32` (plus an `f64` instantiation used for
  row remainders of the double-precision backend).
* `sse`: four `f32` points per call in one 128-bit register.
* `avx`: sixteen `f64` points per call, as four 256-bit registers of four.

A [`Kernel`] is chosen once per frame and exposes one row-filling function, so
the per-pixel loop never branches on the backend. Rows whose width is not a
multiple of the vector group width finish with the scalar kernel at the vector
kernel's float width; any positive width is valid for every backend.
*/

use std::{fmt, str::FromStr};

use crate::{cpu, error::Error, render::Frame};

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse;

#[cfg(target_arch = "x86_64")]
pub mod avx;

/// Requested kernel backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstructionSet {
    #[default]
    Reference,
    Vector4,
    Vector16,
}

impl FromStr for InstructionSet {
    type Err = Error;

    /// Accepts the long names and the one-letter `R`, `S` and `A` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" | "r" => return Ok(InstructionSet::Reference),
            "S" | "s" => return Ok(InstructionSet::Vector4),
            "A" | "a" => return Ok(InstructionSet::Vector16),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "reference" | "ref" | "scalar" => Ok(InstructionSet::Reference),
            "vector4" | "sse" => Ok(InstructionSet::Vector4),
            "vector16" | "avx" => Ok(InstructionSet::Vector16),
            _ => Err(Error::UnknownInstructionSet(s.to_string())),
        }
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionSet::Reference => write!(f, "reference"),
            InstructionSet::Vector4 => write!(f, "vector4"),
            InstructionSet::Vector16 => write!(f, "vector16"),
        }
    }
}

/// Fills `counts` with the escape-time counts of row `y` of `frame`.
/// `counts.len()` is the frame width.
type RowFn = fn(frame: &Frame, y: u32, counts: &mut [u32]);

/// A selected escape-time backend.
#[derive(Clone, Copy)]
pub struct Kernel {
    instruction_set: InstructionSet,
    lanes: usize,
    fill_row: RowFn,
}

impl Kernel {
    /// Pick the backend for `preference` on the running processor.
    pub fn detect(preference: InstructionSet) -> Self {
        Self::select(preference, cpu::supports_wide_vector())
    }

    /**
    Selection policy, first match wins:

    1. `Vector16` and `wide_vector_supported` → 16-wide kernel.
    2. `Vector4` → 4-lane kernel.
    3. Otherwise → scalar kernel.

    Off x86_64 only the scalar kernel exists.

    `wide_vector_supported` must not claim support the processor lacks; the
    16-wide kernel executes AVX instructions unconditionally.
    */
    #[cfg_attr(not(target_arch = "x86_64"), allow(unused_variables))]
    pub(crate) fn select(preference: InstructionSet, wide_vector_supported: bool) -> Self {
        match preference {
            #[cfg(target_arch = "x86_64")]
            InstructionSet::Vector16 if wide_vector_supported => Kernel {
                instruction_set: InstructionSet::Vector16,
                lanes: avx::LANES,
                fill_row: avx::fill_row,
            },
            #[cfg(target_arch = "x86_64")]
            InstructionSet::Vector4 => Kernel {
                instruction_set: InstructionSet::Vector4,
                lanes: sse::LANES,
                fill_row: sse::fill_row,
            },
            _ => Kernel::reference(),
        }
    }

    pub fn reference() -> Self {
        Kernel {
            instruction_set: InstructionSet::Reference,
            lanes: 1,
            fill_row: scalar::fill_row,
        }
    }

    /// The backend actually in use, after capability fallback.
    pub fn instruction_set(&self) -> InstructionSet {
        self.instruction_set
    }

    /// Pixels consumed per kernel call.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    #[inline]
    pub fn fill_row(&self, frame: &Frame, y: u32, counts: &mut [u32]) {
        (self.fill_row)(frame, y, counts)
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("instruction_set", &self.instruction_set)
            .field("lanes", &self.lanes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_set_names_parse() {
        assert_eq!("A".parse::<InstructionSet>().unwrap(), InstructionSet::Vector16);
        assert_eq!("S".parse::<InstructionSet>().unwrap(), InstructionSet::Vector4);
        assert_eq!("R".parse::<InstructionSet>().unwrap(), InstructionSet::Reference);
        assert_eq!(
            "Vector16".parse::<InstructionSet>().unwrap(),
            InstructionSet::Vector16
        );
        for set in [
            InstructionSet::Reference,
            InstructionSet::Vector4,
            InstructionSet::Vector16,
        ] {
            assert_eq!(set.to_string().parse::<InstructionSet>().unwrap(), set);
        }
        assert!("neon".parse::<InstructionSet>().is_err());
    }

    #[test]
    fn vector16_without_capability_falls_back_to_reference() {
        let kernel = Kernel::select(InstructionSet::Vector16, false);
        assert_eq!(kernel.instruction_set(), InstructionSet::Reference);
        assert_eq!(kernel.lanes(), 1);
    }

    #[test]
    fn reference_is_always_available() {
        for supported in [false, cpu::supports_wide_vector()] {
            let kernel = Kernel::select(InstructionSet::Reference, supported);
            assert_eq!(kernel.instruction_set(), InstructionSet::Reference);
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn vector4_needs_no_capability() {
        let kernel = Kernel::select(InstructionSet::Vector4, false);
        assert_eq!(kernel.instruction_set(), InstructionSet::Vector4);
        assert_eq!(kernel.lanes(), 4);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn vector16_with_capability_is_selected() {
        if !cpu::supports_wide_vector() {
            return;
        }
        let kernel = Kernel::detect(InstructionSet::Vector16);
        assert_eq!(kernel.instruction_set(), InstructionSet::Vector16);
        assert_eq!(kernel.lanes(), 16);
    }
}
