//! Recording backend pair used by the integration tests.
//!
//! Both backends append every call to one shared log and return a graph whose
//! name spells out which backend produced it, from what, and with which extra
//! arguments, so tests can compare results as well as call counts.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gtn_dispatch::{DeviceMismatch, Device, Dispatcher, GraphBackend, Label, Op, Placed, Projection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestGraph {
    pub device: Device,
    pub name: String,
}

impl TestGraph {
    pub fn cpu(name: &str) -> Self {
        Self {
            device: Device::Cpu,
            name: name.to_owned(),
        }
    }

    pub fn cuda(id: usize, name: &str) -> Self {
        Self {
            device: Device::Cuda(id),
            name: name.to_owned(),
        }
    }

    pub fn on(device: Device, name: &str) -> Self {
        Self {
            device,
            name: name.to_owned(),
        }
    }
}

impl Placed for TestGraph {
    fn is_cuda(&self) -> bool {
        self.device.is_cuda()
    }

    fn device_id(&self) -> usize {
        self.device.ordinal().unwrap_or(0)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TestError {
    #[error(transparent)]
    Device(#[from] DeviceMismatch),
    #[error("{backend} backend failed in {op}")]
    Backend { backend: &'static str, op: Op },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub backend: &'static str,
    pub op: Op,
    pub device: Device,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().expect("call log poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().expect("call log poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.0.lock().expect("call log poisoned").clear();
    }

    pub fn single(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one backend call, got {calls:?}");
        calls.into_iter().next().expect("one call")
    }

    fn push(&self, call: Call) {
        self.0.lock().expect("call log poisoned").push(call);
    }
}

pub struct RecordingBackend {
    name: &'static str,
    log: CallLog,
    fail_on: Option<Op>,
}

impl RecordingBackend {
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self {
            name,
            log,
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, op: Op) -> Self {
        self.fail_on = Some(op);
        self
    }

    fn record(
        &self,
        op: Op,
        device: Device,
        inputs: &[&TestGraph],
        extra: &str,
    ) -> Result<TestGraph, TestError> {
        let inputs: Vec<String> = inputs.iter().map(|g| g.name.clone()).collect();
        self.log.push(Call {
            backend: self.name,
            op,
            device,
            inputs: inputs.clone(),
        });
        if self.fail_on == Some(op) {
            return Err(TestError::Backend {
                backend: self.name,
                op,
            });
        }
        Ok(TestGraph::on(
            device,
            &format!("{}:{op}{extra}({})", self.name, inputs.join(",")),
        ))
    }
}

impl GraphBackend for RecordingBackend {
    type Graph = TestGraph;
    type Error = TestError;

    fn name(&self) -> &str {
        self.name
    }

    fn negate(&self, device: Device, g: &TestGraph) -> Result<TestGraph, TestError> {
        self.record(Op::Negate, device, &[g], "")
    }

    fn add(&self, device: Device, g1: &TestGraph, g2: &TestGraph) -> Result<TestGraph, TestError> {
        self.record(Op::Add, device, &[g1, g2], "")
    }

    fn subtract(
        &self,
        device: Device,
        g1: &TestGraph,
        g2: &TestGraph,
    ) -> Result<TestGraph, TestError> {
        self.record(Op::Subtract, device, &[g1, g2], "")
    }

    fn clone(
        &self,
        device: Device,
        g: &TestGraph,
        projection: Projection,
    ) -> Result<TestGraph, TestError> {
        self.record(Op::Clone, device, &[g], &format!("[{projection:?}]"))
    }

    fn concat(&self, device: Device, graphs: &[&TestGraph]) -> Result<TestGraph, TestError> {
        self.record(Op::Concat, device, graphs, "")
    }

    fn closure(&self, device: Device, g: &TestGraph) -> Result<TestGraph, TestError> {
        self.record(Op::Closure, device, &[g], "")
    }

    fn union(&self, device: Device, graphs: &[&TestGraph]) -> Result<TestGraph, TestError> {
        self.record(Op::Union, device, graphs, "")
    }

    fn intersect(
        &self,
        device: Device,
        g1: &TestGraph,
        g2: &TestGraph,
    ) -> Result<TestGraph, TestError> {
        self.record(Op::Intersect, device, &[g1, g2], "")
    }

    fn compose(
        &self,
        device: Device,
        g1: &TestGraph,
        g2: &TestGraph,
    ) -> Result<TestGraph, TestError> {
        self.record(Op::Compose, device, &[g1, g2], "")
    }

    fn remove(
        &self,
        device: Device,
        g: &TestGraph,
        ilabel: Label,
        olabel: Label,
    ) -> Result<TestGraph, TestError> {
        self.record(Op::Remove, device, &[g], &format!("[{ilabel}:{olabel}]"))
    }

    fn forward_score(&self, device: Device, g: &TestGraph) -> Result<TestGraph, TestError> {
        self.record(Op::ForwardScore, device, &[g], "")
    }

    fn viterbi_score(&self, device: Device, g: &TestGraph) -> Result<TestGraph, TestError> {
        self.record(Op::ViterbiScore, device, &[g], "")
    }

    fn viterbi_path(&self, device: Device, g: &TestGraph) -> Result<TestGraph, TestError> {
        self.record(Op::ViterbiPath, device, &[g], "")
    }
}

pub type TestDispatcher = Dispatcher<TestGraph, TestError>;

/// A dispatcher over a `cpu` and a `cuda` recording backend sharing one log.
pub fn dispatcher() -> (TestDispatcher, CallLog) {
    let log = CallLog::default();
    let ops = Dispatcher::new(
        Box::new(RecordingBackend::new("cpu", log.clone())),
        Box::new(RecordingBackend::new("cuda", log.clone())),
    );
    (ops, log)
}

/// Like [`dispatcher`], but both backends fail on `op`.
pub fn failing_dispatcher(op: Op) -> (TestDispatcher, CallLog) {
    let log = CallLog::default();
    let ops = Dispatcher::new(
        Box::new(RecordingBackend::new("cpu", log.clone()).failing_on(op)),
        Box::new(RecordingBackend::new("cuda", log.clone()).failing_on(op)),
    );
    (ops, log)
}

/// Runs a binary-shaped operation by catalog entry.
pub fn run_binary(
    ops: &TestDispatcher,
    op: Op,
    g1: &TestGraph,
    g2: &TestGraph,
) -> Result<TestGraph, TestError> {
    match op {
        Op::Add => ops.add(g1, g2),
        Op::Subtract => ops.subtract(g1, g2),
        Op::Intersect => ops.intersect(g1, g2),
        Op::Compose => ops.compose(g1, g2),
        other => panic!("{other} is not binary"),
    }
}

/// Runs a single-graph operation by catalog entry, with default extras.
pub fn run_unary(ops: &TestDispatcher, op: Op, g: &TestGraph) -> Result<TestGraph, TestError> {
    match op {
        Op::Negate => ops.negate(g),
        Op::Clone => ops.clone(g, Projection::None),
        Op::Closure => ops.closure(g),
        Op::Remove => ops.remove_epsilon(g),
        Op::ForwardScore => ops.forward_score(g),
        Op::ViterbiScore => ops.viterbi_score(g),
        Op::ViterbiPath => ops.viterbi_path(g),
        other => panic!("{other} is not unary"),
    }
}
