//! # `gtn_dispatch`
//!
//! Device-uniform operation dispatch for weighted automata ("graphs").
//!
//! Every graph operation exists twice: once for host-resident graphs and once
//! for graphs living on a CUDA device. This crate is the single place that
//! decides which of the two runs, and refuses calls whose inputs live on
//! different devices before either backend is touched.
//!
//! ## Modules
//!
//! - [`device`] — Device placement of graph handles (`Device`, `Placed`)
//! - [`graph`] — Plain graph-level values: projection modes and labels
//! - [`op`] — The operation catalog and arity classes
//! - [`check`] — Device consistency checks
//! - [`backend`] — The capability trait both backends implement
//! - [`dispatch`] — The `Dispatcher` that validates, selects and forwards
//!
//! ## Example
//!
//! ```rust,ignore
//! use gtn_dispatch::{Dispatcher, Projection};
//!
//! let ops = Dispatcher::new(Box::new(cpu_backend), Box::new(cuda_backend));
//! let sum = ops.add(&g1, &g2)?; // fails fast if g1 and g2 are on different devices
//! let inputs = ops.project_input(&sum)?;
//! let joined = ops.union(&[&g1, &g2, &inputs])?;
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![deny(unsafe_code)]
#![forbid(unused_must_use)]
#![forbid(missing_docs)]

pub mod backend;
pub mod check;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod graph;
pub mod op;

pub use backend::GraphBackend;
pub use check::{check_devices, check_pair, shared_device};
pub use device::{Device, Placed};
pub use dispatch::Dispatcher;
pub use error::{DeviceMismatch, ParseDeviceError, UnknownOp};
pub use graph::{EPSILON, Label, Projection};
pub use op::{Arity, Op};
