use super::decode::Width;

/// Default nesting budget for [`Decoder::skip`](crate::decode::Decoder::skip).
pub const RECURSION_MAX: u8 = 10;

/// Widest length argument that fits the platform's `usize`.
pub const SIZE_WIDTH: Width = match usize::BITS {
    16 => Width::U16,
    32 => Width::U32,
    _ => Width::U64,
};

/// Decoder settings, fixed when a [`Decoder`](crate::decode::Decoder) is
/// created and inherited by every container entered from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting depth `skip` will descend before giving up with
    /// [`Error::Recursion`](crate::decode::Error::Recursion).
    pub max_recursion: u8,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            max_recursion: RECURSION_MAX,
        }
    }

    pub const fn with_max_recursion(mut self, max_recursion: u8) -> Self {
        self.max_recursion = max_recursion;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
