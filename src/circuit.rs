use std::collections::HashSet;

use slotmap::SlotMap;

use crate::error::CircuitError;
use crate::gate::GateKind;

pub mod connections;
pub mod eval;

slotmap::new_key_type! {
    pub struct GateKey;
}

pub(crate) type GateMap = SlotMap<GateKey, Gate>;

/// One circuit: a gate arena plus the wires recorded on the gates
/// themselves. Wires always stay in sync from both ends, so every mutation
/// goes through the methods here or through [`connections`].
#[derive(Debug, Default)]
pub struct Circuit {
    pub(crate) gates: GateMap,
}

#[derive(Debug)]
pub(crate) struct Gate {
    pub(crate) kind: GateKind,
    // inputs[slot] is the gate wired into that slot; fan-in is 1 per slot.
    // trailing unoccupied slots are trimmed, so a non-empty vector always
    // ends in a wire
    pub(crate) inputs: Vec<Option<GateKey>>,
    // the receiving end of every wire leaving this gate: (gate, slot)
    pub(crate) dependants: HashSet<(GateKey, usize)>,
    // latched by set_input, read during evaluation only while no wire is
    // connected (boundary input pins)
    pub(crate) external: Option<bool>,
    pub(crate) output: Option<bool>,
}

impl Circuit {
    pub fn new() -> Circuit {
        Circuit { gates: GateMap::with_key() }
    }

    pub fn add_gate(&mut self, kind: GateKind) -> GateKey {
        self.gates.insert(Gate { kind, inputs: Vec::new(), dependants: HashSet::new(), external: None, output: None })
    }

    pub fn remove_gate(&mut self, gate: GateKey) -> Result<(), CircuitError> {
        if !self.gates.contains_key(gate) {
            return Err(CircuitError::UnknownGate(gate));
        }

        let incoming: Vec<(GateKey, usize)> = self.gates[gate].inputs.iter().enumerate().filter_map(|(slot, producer)| producer.map(|p| (p, slot))).collect();
        for (producer, slot) in incoming {
            self.gates[producer].dependants.remove(&(gate, slot));
        }

        let outgoing: Vec<(GateKey, usize)> = self.gates[gate].dependants.iter().copied().collect();
        for (receiver, slot) in outgoing {
            self.gates[receiver].inputs[slot] = None;
            self.trim_slots(receiver);
        }

        self.gates.remove(gate);
        log::trace!("removed gate {gate:?}");
        Ok(())
    }

    /// Latches an external value onto a gate, to be used as its input while
    /// the gate has no incoming wires. This is how boundary input pins get
    /// their values before evaluation.
    pub fn set_input(&mut self, gate: GateKey, value: bool) -> Result<(), CircuitError> {
        match self.gates.get_mut(gate) {
            Some(g) => {
                g.external = Some(value);
                Ok(())
            }
            None => Err(CircuitError::UnknownGate(gate)),
        }
    }

    pub fn contains(&self, gate: GateKey) -> bool {
        self.gates.contains_key(gate)
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn gate_keys(&self) -> impl Iterator<Item = GateKey> + '_ {
        self.gates.keys()
    }

    pub fn kind(&self, gate: GateKey) -> Option<GateKind> {
        self.gates.get(gate).map(|g| g.kind)
    }

    /// The value the gate got in the most recent evaluation, if any.
    pub fn output(&self, gate: GateKey) -> Option<bool> {
        self.gates.get(gate).and_then(|g| g.output)
    }

    pub fn input_value(&self, gate: GateKey) -> Option<bool> {
        self.gates.get(gate).and_then(|g| g.external)
    }

    /// The gate wired into `slot` of `gate`, if that slot is occupied.
    pub fn producer(&self, gate: GateKey, slot: usize) -> Option<GateKey> {
        self.gates.get(gate).and_then(|g| g.inputs.get(slot).copied().flatten())
    }

    pub fn num_slots(&self, gate: GateKey) -> usize {
        self.gates.get(gate).map_or(0, |g| g.inputs.len())
    }

    /// Every wire in the circuit as (producer, receiver, slot).
    pub fn wires(&self) -> impl Iterator<Item = (GateKey, GateKey, usize)> + '_ {
        self.gates.iter().flat_map(|(receiver, gate)| {
            gate.inputs.iter().enumerate().filter_map(move |(slot, producer)| producer.map(|p| (p, receiver, slot)))
        })
    }

    pub fn num_wires(&self) -> usize {
        self.wires().count()
    }

    pub(crate) fn trim_slots(&mut self, gate: GateKey) {
        let inputs = &mut self.gates[gate].inputs;
        while let Some(None) = inputs.last() {
            inputs.pop();
        }
    }
}
