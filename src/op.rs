//! The operation catalog.
//!
//! Each graph operation the dispatcher knows about is an [`Op`], tagged with
//! the [`Arity`] that decides how its inputs are checked and forwarded.
//! Catalog names are the ones reported in error messages (note the trailing
//! underscore on `union_`).

use core::fmt;
use core::str::FromStr;

use crate::error::UnknownOp;

/// How an operation takes its graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// One graph; trivially consistent with itself, never checked.
    Unary,
    /// Two graphs that must share a device.
    Binary,
    /// Any number of graphs that must share a device. Empty input runs on CPU.
    Variadic,
}

/// A dispatched graph operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Negate every arc weight.
    Negate,
    /// Add the scalar weights of two single-arc graphs.
    Add,
    /// Subtract the scalar weights of two single-arc graphs.
    Subtract,
    /// Structural copy, optionally projected onto one label side.
    Clone,
    /// Concatenation of a sequence of graphs.
    Concat,
    /// Kleene closure.
    Closure,
    /// Union of a sequence of graphs.
    Union,
    /// Intersection of two acceptors.
    Intersect,
    /// Composition of two transducers.
    Compose,
    /// Removal of arcs carrying a given label pair.
    Remove,
    /// Forward (log-sum) score.
    ForwardScore,
    /// Best-path (Viterbi) score.
    ViterbiScore,
    /// Best path (Viterbi) itself.
    ViterbiPath,
}

impl Op {
    /// Every operation in the catalog.
    pub const ALL: [Self; 13] = [
        Self::Negate,
        Self::Add,
        Self::Subtract,
        Self::Clone,
        Self::Concat,
        Self::Closure,
        Self::Union,
        Self::Intersect,
        Self::Compose,
        Self::Remove,
        Self::ForwardScore,
        Self::ViterbiScore,
        Self::ViterbiPath,
    ];

    /// Catalog name, as reported in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Negate => "negate",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Clone => "clone",
            Self::Concat => "concat",
            Self::Closure => "closure",
            Self::Union => "union_",
            Self::Intersect => "intersect",
            Self::Compose => "compose",
            Self::Remove => "remove",
            Self::ForwardScore => "forwardScore",
            Self::ViterbiScore => "viterbiScore",
            Self::ViterbiPath => "viterbiPath",
        }
    }

    /// The dispatch shape of this operation.
    ///
    /// `Clone` and `Remove` carry extra non-graph arguments but are still
    /// unary in shape.
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Negate
            | Self::Clone
            | Self::Closure
            | Self::Remove
            | Self::ForwardScore
            | Self::ViterbiScore
            | Self::ViterbiPath => Arity::Unary,
            Self::Add | Self::Subtract | Self::Intersect | Self::Compose => Arity::Binary,
            Self::Concat | Self::Union => Arity::Variadic,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Op {
    type Err = UnknownOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOp(s.to_owned()))
    }
}
