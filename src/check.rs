//! Device consistency checks.
//!
//! Every multi-graph operation must run entirely on one device: either all
//! inputs are host-resident, or all are on the same CUDA ordinal. These
//! checks are the only authority on that and run before any backend does.

use crate::device::{Device, Placed};
use crate::error::DeviceMismatch;
use crate::op::Op;

/// Checks that every graph shares the placement of the first one.
///
/// Fails on the first graph whose residency differs, or whose CUDA ordinal
/// differs when both are CUDA-resident. An empty sequence is vacuously
/// consistent.
pub fn check_devices<'a, G, I>(op: Op, graphs: I) -> Result<(), DeviceMismatch>
where
    G: Placed + ?Sized + 'a,
    I: IntoIterator<Item = &'a G>,
{
    let mut graphs = graphs.into_iter();
    let Some(first) = graphs.next() else {
        return Ok(());
    };
    let expected = first.device();
    for (position, g) in graphs.enumerate() {
        let found = g.device();
        if found != expected {
            return Err(DeviceMismatch::new(op, expected, found, position + 1));
        }
    }
    Ok(())
}

/// Two-graph form of [`check_devices`].
pub fn check_pair<G: Placed + ?Sized>(op: Op, g1: &G, g2: &G) -> Result<(), DeviceMismatch> {
    check_devices(op, [g1, g2])
}

/// The device shared by `graphs`, or `None` when there are none.
///
/// Useful for allocating further inputs next to an existing set of graphs.
pub fn shared_device<G: Placed + ?Sized>(
    op: Op,
    graphs: &[&G],
) -> Result<Option<Device>, DeviceMismatch> {
    check_devices(op, graphs.iter().copied())?;
    Ok(graphs.first().map(|g| g.device()))
}
