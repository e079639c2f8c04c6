//! Workflow glue between the command line and the gate.

pub mod orchestration;

pub use orchestration::{run_gate_workflow, GateCommand, Outcome};
