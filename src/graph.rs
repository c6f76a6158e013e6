//! Plain values that travel alongside graphs through the dispatcher.
//!
//! Neither of these has anything to do with placement; the dispatcher
//! forwards them to the selected backend untouched.

use core::convert::TryFrom;

/// An arc label (input or output symbol).
pub type Label = i32;

/// The empty symbol. Default label for epsilon removal.
pub const EPSILON: Label = -1;

/// Which label side survives a structural copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Projection {
    /// Keep both input and output labels (default).
    #[default]
    None = 0,
    /// Keep input labels on both sides.
    Input = 1,
    /// Keep output labels on both sides.
    Output = 2,
}

impl TryFrom<u8> for Projection {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Input),
            2 => Ok(Self::Output),
            _ => Err(()),
        }
    }
}
