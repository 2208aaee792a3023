//! The symbol abstraction shared by every stage of the pipeline.

use std::fmt::Debug;
use std::hash::Hash;

/// One unit of an alphabet.
///
/// Symbols must be totally ordered (for deterministic table iteration) and
/// hashable. The `u32` wire form is what archives store on disk.
pub trait Symbol: Copy + Ord + Hash + Debug {
    /// Stable numeric representation used by the archive format.
    fn to_wire(self) -> u32;

    /// Inverse of [`Symbol::to_wire`]; `None` if the value is not a valid symbol.
    fn from_wire(value: u32) -> Option<Self>;

    /// Rendering used in error messages and reports.
    fn describe(self) -> String {
        format!("{:?}", self)
    }
}

impl Symbol for char {
    fn to_wire(self) -> u32 {
        self as u32
    }

    fn from_wire(value: u32) -> Option<Self> {
        char::from_u32(value)
    }
}

impl Symbol for u8 {
    fn to_wire(self) -> u32 {
        self as u32
    }

    fn from_wire(value: u32) -> Option<Self> {
        u8::try_from(value).ok()
    }

    fn describe(self) -> String {
        format!("{:#04x}", self)
    }
}
