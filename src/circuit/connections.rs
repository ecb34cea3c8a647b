use std::collections::HashSet;

use crate::circuit::{Circuit, GateKey};
use crate::error::CircuitError;

/// Wires `producer`'s output into input slot `slot` of `receiver`.
///
/// Fails with `SlotOccupied` if the slot already has an incoming wire and
/// with `CycleDetected` if the wire would close a cycle; a failed connect
/// leaves the circuit untouched.
pub fn connect(circuit: &mut Circuit, producer: GateKey, receiver: GateKey, slot: usize) -> Result<(), CircuitError> {
    if !circuit.gates.contains_key(producer) {
        return Err(CircuitError::UnknownGate(producer));
    }
    if !circuit.gates.contains_key(receiver) {
        return Err(CircuitError::UnknownGate(receiver));
    }
    if let Some(Some(_)) = circuit.gates[receiver].inputs.get(slot) {
        return Err(CircuitError::SlotOccupied(receiver, slot));
    }
    if would_cycle(circuit, producer, receiver) {
        return Err(CircuitError::CycleDetected);
    }

    let inputs = &mut circuit.gates[receiver].inputs;
    if inputs.len() <= slot {
        inputs.resize(slot + 1, None);
    }
    inputs[slot] = Some(producer);
    circuit.gates[producer].dependants.insert((receiver, slot));
    log::trace!("connected {producer:?} -> {receiver:?} slot {slot}");
    Ok(())
}

/// Removes the wire from `producer` into slot `slot` of `receiver`. Does
/// nothing if that exact wire does not exist.
pub fn disconnect(circuit: &mut Circuit, producer: GateKey, receiver: GateKey, slot: usize) -> Result<(), CircuitError> {
    if !circuit.gates.contains_key(producer) {
        return Err(CircuitError::UnknownGate(producer));
    }
    if !circuit.gates.contains_key(receiver) {
        return Err(CircuitError::UnknownGate(receiver));
    }
    if circuit.gates[receiver].inputs.get(slot).copied().flatten() != Some(producer) {
        return Ok(());
    }

    circuit.gates[receiver].inputs[slot] = None;
    circuit.gates[producer].dependants.remove(&(receiver, slot));
    circuit.trim_slots(receiver);
    log::trace!("disconnected {producer:?} -> {receiver:?} slot {slot}");
    Ok(())
}

// walks the dependant edges out of `receiver`; finding `producer` means the
// new wire would close a cycle. a wire from a gate to itself always does.
fn would_cycle(circuit: &Circuit, producer: GateKey, receiver: GateKey) -> bool {
    if producer == receiver {
        return true;
    }

    let mut stack = vec![receiver];
    let mut seen = HashSet::new();
    while let Some(gate) = stack.pop() {
        if !seen.insert(gate) {
            continue;
        }
        for &(dependant, _) in &circuit.gates[gate].dependants {
            if dependant == producer {
                return true;
            }
            stack.push(dependant);
        }
    }
    false
}
