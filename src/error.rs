//! Errors raised by the dispatch layer itself.
//!
//! [`DeviceMismatch`] is the only failure generated while dispatching. The
//! other errors here come from parsing configuration values.

use thiserror::Error;

use crate::device::Device;
use crate::op::Op;

/// Graphs passed to one operation do not share a device.
///
/// Raised before any backend code runs. Backends lift it into their own error
/// type through `From<DeviceMismatch>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("[{op}] Graphs must be on the same device (expected {expected}, found {found} at position {position})")]
pub struct DeviceMismatch {
    op: Op,
    expected: Device,
    found: Device,
    position: usize,
}

impl DeviceMismatch {
    pub(crate) const fn new(op: Op, expected: Device, found: Device, position: usize) -> Self {
        Self {
            op,
            expected,
            found,
            position,
        }
    }

    /// The operation that was rejected.
    #[must_use]
    pub const fn op(&self) -> Op {
        self.op
    }

    /// Placement of the first graph, which every other graph must match.
    #[must_use]
    pub const fn expected(&self) -> Device {
        self.expected
    }

    /// Placement of the first graph that did not match.
    #[must_use]
    pub const fn found(&self) -> Device {
        self.found
    }

    /// Index of the offending graph within the call's inputs.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// A device string that is neither `cpu`, `cuda` nor `cuda:N`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device: {input:?}")]
pub struct ParseDeviceError {
    input: String,
}

impl ParseDeviceError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }
}

/// A string that names no operation in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation: {0:?}")]
pub struct UnknownOp(pub String);
