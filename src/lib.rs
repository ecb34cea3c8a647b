//! Circuit core for a logic-gate node editor: the gate model, the wire
//! graph, evaluation, and circuit files. The canvas, palette, and menu
//! chrome belong to the application embedding this crate.

pub mod circuit;
pub mod error;
pub mod export;
pub mod gate;
pub mod import;
pub mod project;
pub(crate) mod utils;

pub use circuit::connections::{connect, disconnect};
pub use circuit::eval::evaluate;
pub use circuit::{Circuit, GateKey};
pub use error::{CircuitError, ImportError};
pub use gate::GateKind;
pub use project::{CircuitKey, Project, ProjectCircuit};
