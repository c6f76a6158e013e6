//! Operation Dispatch Layer
//!
//! The [`Dispatcher`] owns one CPU and one CUDA [`GraphBackend`] and routes
//! every graph operation to the one matching the device of its inputs.
//!
//! Each call goes through one of three shapes:
//!
//! 1. **Unary** — dispatch on the single input's device, no check needed
//! 2. **Binary** — check both inputs share a device, then dispatch on it
//! 3. **Variadic** — empty input runs on the CPU backend unchecked; otherwise
//!    check the whole sequence, then dispatch on the first graph's device
//!
//! A failed check returns [`DeviceMismatch`] (converted into the backend's
//! error type) before either backend is called. Whatever the selected backend
//! returns, success or failure, is handed back untouched.
//!
//! # Design Highlights
//! - **Stateless**: no globals; a `Dispatcher` can be shared across threads
//! - **Explicit device**: backends receive the resolved [`Device`] as an argument
//! - **One policy point**: every operation goes through the same three helpers

use core::fmt;

use tracing::{debug, trace};

use crate::backend::GraphBackend;
use crate::check::{check_devices, check_pair};
use crate::device::{Device, Placed};
use crate::error::DeviceMismatch;
use crate::graph::{EPSILON, Label, Projection};
use crate::op::Op;

/// A backend behind a trait object, as stored by the [`Dispatcher`].
pub type DynBackend<G, E> = dyn GraphBackend<Graph = G, Error = E>;

/// Routes graph operations to the CPU or CUDA backend.
pub struct Dispatcher<G: Placed, E: From<DeviceMismatch>> {
    cpu: Box<DynBackend<G, E>>,
    cuda: Box<DynBackend<G, E>>,
}

impl<G, E> Dispatcher<G, E>
where
    G: Placed,
    E: From<DeviceMismatch>,
{
    /// Creates a dispatcher over a host backend and a CUDA backend.
    #[must_use]
    pub fn new(cpu: Box<DynBackend<G, E>>, cuda: Box<DynBackend<G, E>>) -> Self {
        Self { cpu, cuda }
    }

    /// The host backend.
    #[must_use]
    pub fn cpu_backend(&self) -> &DynBackend<G, E> {
        self.cpu.as_ref()
    }

    /// The CUDA backend.
    #[must_use]
    pub fn cuda_backend(&self) -> &DynBackend<G, E> {
        self.cuda.as_ref()
    }

    /// The backend that runs operations on `device`.
    #[must_use]
    pub fn backend_for(&self, device: Device) -> &DynBackend<G, E> {
        match device {
            Device::Cpu => self.cpu_backend(),
            Device::Cuda(_) => self.cuda_backend(),
        }
    }

    fn forward<F>(&self, op: Op, device: Device, call: F) -> Result<G, E>
    where
        F: FnOnce(&DynBackend<G, E>, Device) -> Result<G, E>,
    {
        let backend = self.backend_for(device);
        trace!(op = %op, device = %device, backend = backend.name(), "dispatching graph operation");
        call(backend, device)
    }

    fn unary<F>(&self, op: Op, g: &G, call: F) -> Result<G, E>
    where
        F: FnOnce(&DynBackend<G, E>, Device) -> Result<G, E>,
    {
        self.forward(op, g.device(), call)
    }

    fn binary<F>(&self, op: Op, g1: &G, g2: &G, call: F) -> Result<G, E>
    where
        F: FnOnce(&DynBackend<G, E>, Device) -> Result<G, E>,
    {
        check_pair(op, g1, g2).map_err(reject::<E>)?;
        self.forward(op, g1.device(), call)
    }

    fn variadic<F>(&self, op: Op, graphs: &[&G], call: F) -> Result<G, E>
    where
        F: FnOnce(&DynBackend<G, E>, Device) -> Result<G, E>,
    {
        let Some(first) = graphs.first() else {
            // no device to infer from an empty list
            trace!(op = %op, "empty input, dispatching to cpu");
            return call(self.cpu_backend(), Device::Cpu);
        };
        check_devices(op, graphs.iter().copied()).map_err(reject::<E>)?;
        self.forward(op, first.device(), call)
    }

    /// Negates every arc weight of `g`.
    pub fn negate(&self, g: &G) -> Result<G, E> {
        self.unary(Op::Negate, g, |b, d| b.negate(d, g))
    }

    /// Adds two scalar graphs. Both must be on the same device.
    pub fn add(&self, g1: &G, g2: &G) -> Result<G, E> {
        self.binary(Op::Add, g1, g2, |b, d| b.add(d, g1, g2))
    }

    /// Subtracts `g2` from `g1`. Both must be on the same device.
    pub fn subtract(&self, g1: &G, g2: &G) -> Result<G, E> {
        self.binary(Op::Subtract, g1, g2, |b, d| b.subtract(d, g1, g2))
    }

    /// Structural copy of `g`, keeping the label side chosen by `projection`.
    pub fn clone(&self, g: &G, projection: Projection) -> Result<G, E> {
        self.unary(Op::Clone, g, |b, d| GraphBackend::clone(b, d, g, projection))
    }

    /// Copy of `g` with output labels replaced by input labels.
    pub fn project_input(&self, g: &G) -> Result<G, E> {
        self.clone(g, Projection::Input)
    }

    /// Copy of `g` with input labels replaced by output labels.
    pub fn project_output(&self, g: &G) -> Result<G, E> {
        self.clone(g, Projection::Output)
    }

    /// Concatenates two graphs. Same as `concat(&[g1, g2])`.
    pub fn concat_pair(&self, g1: &G, g2: &G) -> Result<G, E> {
        self.concat(&[g1, g2])
    }

    /// Concatenates `graphs` in order.
    ///
    /// An empty list always runs on the CPU backend.
    pub fn concat(&self, graphs: &[&G]) -> Result<G, E> {
        self.variadic(Op::Concat, graphs, |b, d| b.concat(d, graphs))
    }

    /// Kleene closure of `g`.
    pub fn closure(&self, g: &G) -> Result<G, E> {
        self.unary(Op::Closure, g, |b, d| b.closure(d, g))
    }

    /// Union of `graphs`.
    ///
    /// An empty list always runs on the CPU backend.
    pub fn union(&self, graphs: &[&G]) -> Result<G, E> {
        self.variadic(Op::Union, graphs, |b, d| b.union(d, graphs))
    }

    /// Intersects two acceptors. Both must be on the same device.
    pub fn intersect(&self, g1: &G, g2: &G) -> Result<G, E> {
        self.binary(Op::Intersect, g1, g2, |b, d| b.intersect(d, g1, g2))
    }

    /// Composes two transducers. Both must be on the same device.
    pub fn compose(&self, g1: &G, g2: &G) -> Result<G, E> {
        self.binary(Op::Compose, g1, g2, |b, d| b.compose(d, g1, g2))
    }

    /// Removes epsilon arcs from `g`.
    pub fn remove_epsilon(&self, g: &G) -> Result<G, E> {
        self.remove(g, EPSILON)
    }

    /// Removes arcs labelled `label:label`.
    pub fn remove(&self, g: &G, label: Label) -> Result<G, E> {
        self.remove_labels(g, label, label)
    }

    /// Removes arcs labelled `ilabel:olabel`.
    pub fn remove_labels(&self, g: &G, ilabel: Label, olabel: Label) -> Result<G, E> {
        self.unary(Op::Remove, g, |b, d| b.remove(d, g, ilabel, olabel))
    }

    /// Forward score of `g`.
    pub fn forward_score(&self, g: &G) -> Result<G, E> {
        self.unary(Op::ForwardScore, g, |b, d| b.forward_score(d, g))
    }

    /// Viterbi (best-path) score of `g`.
    pub fn viterbi_score(&self, g: &G) -> Result<G, E> {
        self.unary(Op::ViterbiScore, g, |b, d| b.viterbi_score(d, g))
    }

    /// Viterbi (best) path of `g`.
    pub fn viterbi_path(&self, g: &G) -> Result<G, E> {
        self.unary(Op::ViterbiPath, g, |b, d| b.viterbi_path(d, g))
    }
}

fn reject<E: From<DeviceMismatch>>(err: DeviceMismatch) -> E {
    debug!(
        op = %err.op(),
        expected = %err.expected(),
        found = %err.found(),
        position = err.position(),
        "rejected mixed-device call"
    );
    E::from(err)
}

impl<G: Placed, E: From<DeviceMismatch>> fmt::Debug for Dispatcher<G, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("cpu", &self.cpu.name())
            .field("cuda", &self.cuda.name())
            .finish()
    }
}
