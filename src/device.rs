//! Device placement of graph handles.
//!
//! A graph lives either in host memory or on one CUDA device. The dispatch
//! layer only ever needs two facts about a graph: whether it is on CUDA, and
//! if so which device ordinal. The [`Placed`] trait exposes exactly that, and
//! [`Device`] folds both facts into one comparable value.
//!
//! # Parsing
//!
//! Devices parse from the strings they display as, which makes them usable
//! directly in configuration:
//!
//! - `cpu`
//! - `cuda` (ordinal 0)
//! - `cuda:N`

use core::fmt;
use core::str::FromStr;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::ParseDeviceError;

/// Where a graph's data lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    /// Host memory (default).
    #[default]
    Cpu,
    /// A CUDA device, identified by its ordinal.
    Cuda(usize),
}

impl Device {
    /// Returns `true` for CUDA-resident placements.
    #[must_use]
    pub const fn is_cuda(self) -> bool {
        matches!(self, Self::Cuda(_))
    }

    /// The CUDA ordinal, or `None` for host memory.
    #[must_use]
    pub const fn ordinal(self) -> Option<usize> {
        match self {
            Self::Cpu => None,
            Self::Cuda(id) => Some(id),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            Self::Cuda(id) => write!(f, "cuda:{id}"),
        }
    }
}

impl FromStr for Device {
    type Err = ParseDeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("cpu") {
            return Ok(Self::Cpu);
        }
        if s.eq_ignore_ascii_case("cuda") {
            return Ok(Self::Cuda(0));
        }
        match s.split_once(':') {
            Some((kind, id)) if kind.eq_ignore_ascii_case("cuda") => id
                .parse()
                .map(Self::Cuda)
                .map_err(|_| ParseDeviceError::new(s)),
            _ => Err(ParseDeviceError::new(s)),
        }
    }
}

/// Device metadata of a graph handle.
///
/// This is the only capability the dispatch layer needs from a graph. The
/// handle is inspected, never mutated.
pub trait Placed {
    /// Whether the graph's data lives on a CUDA device.
    fn is_cuda(&self) -> bool;

    /// The CUDA device ordinal. Only meaningful when [`Placed::is_cuda`]
    /// returns `true`.
    fn device_id(&self) -> usize;

    /// Both facts folded into one [`Device`].
    fn device(&self) -> Device {
        if self.is_cuda() {
            Device::Cuda(self.device_id())
        } else {
            Device::Cpu
        }
    }
}

impl<T: Placed + ?Sized> Placed for &T {
    fn is_cuda(&self) -> bool {
        (**self).is_cuda()
    }

    fn device_id(&self) -> usize {
        (**self).device_id()
    }
}

impl<T: Placed + ?Sized> Placed for Box<T> {
    fn is_cuda(&self) -> bool {
        (**self).is_cuda()
    }

    fn device_id(&self) -> usize {
        (**self).device_id()
    }
}

impl<T: Placed + ?Sized> Placed for Rc<T> {
    fn is_cuda(&self) -> bool {
        (**self).is_cuda()
    }

    fn device_id(&self) -> usize {
        (**self).device_id()
    }
}

impl<T: Placed + ?Sized> Placed for Arc<T> {
    fn is_cuda(&self) -> bool {
        (**self).is_cuda()
    }

    fn device_id(&self) -> usize {
        (**self).device_id()
    }
}

impl Placed for Device {
    fn is_cuda(&self) -> bool {
        Device::is_cuda(*self)
    }

    fn device_id(&self) -> usize {
        self.ordinal().unwrap_or_default()
    }
}
