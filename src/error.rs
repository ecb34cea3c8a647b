use crate::circuit::GateKey;

#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("no gate for id {0:?}")]
    UnknownGate(GateKey),
    #[error("input slot {1} of gate {0:?} already has an incoming wire")]
    SlotOccupied(GateKey, usize),
    #[error("connection would create a cycle")]
    CycleDetected,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("reading circuit file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing circuit file: {0}")]
    Json(#[from] json::Error),
    #[error("malformed circuit file: {0}")]
    Malformed(String),
    #[error("circuit file describes an invalid circuit: {0}")]
    Circuit(#[from] CircuitError),
}
