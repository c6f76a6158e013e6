//! The capability shared by the CPU and CUDA backends.
//!
//! Both backends implement [`GraphBackend`] over the same graph and error
//! types; the [`Dispatcher`](crate::Dispatcher) picks one per call from the
//! device of the inputs. Every method receives that device explicitly, so a
//! CUDA backend never has to consult an ambient "current device". A CPU
//! backend always receives [`Device::Cpu`] and may ignore it.
//!
//! Backends see only validated input: by the time a method runs, every graph
//! argument is on `device`. Variadic methods may also be called with an empty
//! slice, always on the CPU backend.
//!
//! ## Adding an operation
//!
//! 1. Add it to [`Op`](crate::Op) with its arity
//! 2. Add a method here and implement it in both backends
//! 3. Add the public entry point to `Dispatcher`, routed through the helper
//!    for its arity

use crate::device::{Device, Placed};
use crate::error::DeviceMismatch;
use crate::graph::{Label, Projection};

/// One backend's implementation of every dispatched graph operation.
pub trait GraphBackend: Send + Sync {
    /// The graph handle type this backend consumes and produces.
    type Graph: Placed;
    /// Backend failures. Must be able to carry a [`DeviceMismatch`] so the
    /// dispatcher can return it without wrapping anything else.
    type Error: From<DeviceMismatch>;

    /// Short name for logs.
    fn name(&self) -> &str;

    /// Negates every arc weight.
    fn negate(&self, device: Device, g: &Self::Graph) -> Result<Self::Graph, Self::Error>;

    /// Adds the weights of two scalar graphs.
    fn add(
        &self,
        device: Device,
        g1: &Self::Graph,
        g2: &Self::Graph,
    ) -> Result<Self::Graph, Self::Error>;

    /// Subtracts the weights of two scalar graphs.
    fn subtract(
        &self,
        device: Device,
        g1: &Self::Graph,
        g2: &Self::Graph,
    ) -> Result<Self::Graph, Self::Error>;

    /// Copies `g`, keeping the label side selected by `projection`.
    fn clone(
        &self,
        device: Device,
        g: &Self::Graph,
        projection: Projection,
    ) -> Result<Self::Graph, Self::Error>;

    /// Concatenates `graphs` in order.
    fn concat(&self, device: Device, graphs: &[&Self::Graph]) -> Result<Self::Graph, Self::Error>;

    /// Kleene closure of `g`.
    fn closure(&self, device: Device, g: &Self::Graph) -> Result<Self::Graph, Self::Error>;

    /// Union of `graphs`.
    fn union(&self, device: Device, graphs: &[&Self::Graph]) -> Result<Self::Graph, Self::Error>;

    /// Intersects two acceptors.
    fn intersect(
        &self,
        device: Device,
        g1: &Self::Graph,
        g2: &Self::Graph,
    ) -> Result<Self::Graph, Self::Error>;

    /// Composes two transducers.
    fn compose(
        &self,
        device: Device,
        g1: &Self::Graph,
        g2: &Self::Graph,
    ) -> Result<Self::Graph, Self::Error>;

    /// Removes arcs labelled `ilabel:olabel`.
    fn remove(
        &self,
        device: Device,
        g: &Self::Graph,
        ilabel: Label,
        olabel: Label,
    ) -> Result<Self::Graph, Self::Error>;

    /// Forward score of `g`.
    fn forward_score(&self, device: Device, g: &Self::Graph) -> Result<Self::Graph, Self::Error>;

    /// Best-path score of `g`.
    fn viterbi_score(&self, device: Device, g: &Self::Graph) -> Result<Self::Graph, Self::Error>;

    /// Best path of `g`.
    fn viterbi_path(&self, device: Device, g: &Self::Graph) -> Result<Self::Graph, Self::Error>;
}
