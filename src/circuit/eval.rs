use std::collections::VecDeque;

use slotmap::SecondaryMap;

use crate::circuit::{Circuit, GateKey};
use crate::error::CircuitError;

// TODO: only re-evaluate gates downstream of inputs that changed since the
// last pass instead of sweeping the whole circuit every time

/// Evaluates every gate once, in topological order over the wires.
///
/// Each gate's input sequence is the value of its occupied slots in slot
/// order; a gate with no incoming wires reads its latched external value
/// instead. A gate whose own arity is off, or that consumes an undefined
/// value, gets `None` and the pass carries on. The result of every gate is
/// stored on the gate and returned in the mapping.
///
/// Repeated calls with unchanged wiring and inputs return the same mapping.
pub fn evaluate(circuit: &mut Circuit) -> Result<SecondaryMap<GateKey, Option<bool>>, CircuitError> {
    let order = topological_order(circuit)?;

    let mut results: SecondaryMap<GateKey, Option<bool>> = SecondaryMap::new();
    for gate in order {
        let value = match gather_inputs(circuit, &results, gate) {
            Some(inputs) => circuit.gates[gate].kind.evaluate(&inputs),
            None => None,
        };
        circuit.gates[gate].output = value;
        results.insert(gate, value);
    }

    log::debug!("evaluated {} gates over {} wires", circuit.num_gates(), circuit.num_wires());
    Ok(results)
}

// `None` when some wired-in value is itself undefined, in which case this
// gate is undefined too
fn gather_inputs(circuit: &Circuit, results: &SecondaryMap<GateKey, Option<bool>>, gate: GateKey) -> Option<Vec<bool>> {
    let gate = &circuit.gates[gate];
    if gate.inputs.is_empty() {
        return Some(gate.external.into_iter().collect());
    }

    let mut values = Vec::with_capacity(gate.inputs.len());
    for producer in gate.inputs.iter().filter_map(|slot| *slot) {
        values.push(results[producer]?);
    }
    Some(values)
}

// Kahn's algorithm. `connect` already refuses wires that would close a
// cycle, so running out of ready gates early should not happen; it is still
// reported as an error instead of silently skipping gates.
fn topological_order(circuit: &Circuit) -> Result<Vec<GateKey>, CircuitError> {
    let mut indegree: SecondaryMap<GateKey, usize> = SecondaryMap::new();
    for (key, gate) in &circuit.gates {
        indegree.insert(key, gate.inputs.iter().flatten().count());
    }

    let mut ready: VecDeque<GateKey> = circuit.gates.keys().filter(|&key| indegree[key] == 0).collect();
    let mut order = Vec::with_capacity(circuit.num_gates());
    while let Some(gate) = ready.pop_front() {
        order.push(gate);
        for &(dependant, _) in &circuit.gates[gate].dependants {
            indegree[dependant] -= 1;
            if indegree[dependant] == 0 {
                ready.push_back(dependant);
            }
        }
    }

    if order.len() != circuit.num_gates() {
        return Err(CircuitError::CycleDetected);
    }
    Ok(order)
}

#[cfg(test)]
mod test {
    use super::evaluate;
    use crate::circuit::{connections::connect, Circuit};
    use crate::gate::GateKind;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn and_gate_with_two_input_pins() {
        init_logging();
        let mut circuit = Circuit::new();
        let a = circuit.add_gate(GateKind::Input);
        let b = circuit.add_gate(GateKind::Input);
        let and = circuit.add_gate(GateKind::And);
        connect(&mut circuit, a, and, 0).unwrap();
        connect(&mut circuit, b, and, 1).unwrap();

        circuit.set_input(a, true).unwrap();
        circuit.set_input(b, true).unwrap();
        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[and], Some(true));

        circuit.set_input(b, false).unwrap();
        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[and], Some(false));
    }

    #[test]
    fn input_not_output_chain() {
        let mut circuit = Circuit::new();
        let input = circuit.add_gate(GateKind::Input);
        let not = circuit.add_gate(GateKind::Not);
        let output = circuit.add_gate(GateKind::Output);
        connect(&mut circuit, input, not, 0).unwrap();
        connect(&mut circuit, not, output, 0).unwrap();

        circuit.set_input(input, true).unwrap();
        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[input], Some(true));
        assert_eq!(results[not], Some(false));
        assert_eq!(results[output], Some(false));
    }

    #[test]
    fn three_wires_into_one_or() {
        let mut circuit = Circuit::new();
        let pins: Vec<_> = (0..3).map(|_| circuit.add_gate(GateKind::Input)).collect();
        let or = circuit.add_gate(GateKind::Or);
        for (slot, &pin) in pins.iter().enumerate() {
            connect(&mut circuit, pin, or, slot).unwrap();
        }

        for (&pin, value) in pins.iter().zip([false, false, true]) {
            circuit.set_input(pin, value).unwrap();
        }
        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[or], Some(true));

        circuit.set_input(pins[2], false).unwrap();
        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[or], Some(false));
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let mut circuit = Circuit::new();
        let a = circuit.add_gate(GateKind::Input);
        let b = circuit.add_gate(GateKind::Input);
        let xor = circuit.add_gate(GateKind::Xor);
        let not = circuit.add_gate(GateKind::Not);
        connect(&mut circuit, a, xor, 0).unwrap();
        connect(&mut circuit, b, xor, 1).unwrap();
        connect(&mut circuit, xor, not, 0).unwrap();
        circuit.set_input(a, true).unwrap();
        circuit.set_input(b, false).unwrap();

        let first = evaluate(&mut circuit).unwrap();
        for _ in 0..10 {
            let again = evaluate(&mut circuit).unwrap();
            for key in circuit.gate_keys().collect::<Vec<_>>() {
                assert_eq!(first[key], again[key]);
            }
        }
    }

    #[test]
    fn undefined_spreads_downstream() {
        let mut circuit = Circuit::new();
        let a = circuit.add_gate(GateKind::Input);
        let b = circuit.add_gate(GateKind::Input);
        let not = circuit.add_gate(GateKind::Not);
        let and = circuit.add_gate(GateKind::And);
        let or = circuit.add_gate(GateKind::Or);
        // a NOT with two wires is undefined; the AND fed by it becomes
        // undefined too, while the unrelated OR still evaluates
        connect(&mut circuit, a, not, 0).unwrap();
        connect(&mut circuit, b, not, 1).unwrap();
        connect(&mut circuit, not, and, 0).unwrap();
        connect(&mut circuit, a, or, 0).unwrap();
        circuit.set_input(a, true).unwrap();
        circuit.set_input(b, true).unwrap();

        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[not], None);
        assert_eq!(results[and], None);
        assert_eq!(results[or], Some(true));
    }

    #[test]
    fn wires_take_precedence_over_latched_values() {
        let mut circuit = Circuit::new();
        let a = circuit.add_gate(GateKind::Input);
        let b = circuit.add_gate(GateKind::Input);
        connect(&mut circuit, a, b, 0).unwrap();
        circuit.set_input(a, true).unwrap();
        circuit.set_input(b, false).unwrap();

        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[b], Some(true));
    }

    #[test]
    fn unwired_gates_use_empty_input_conventions() {
        let mut circuit = Circuit::new();
        let and = circuit.add_gate(GateKind::And);
        let or = circuit.add_gate(GateKind::Or);
        let not = circuit.add_gate(GateKind::Not);
        let pin = circuit.add_gate(GateKind::Input);

        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[and], Some(true));
        assert_eq!(results[or], Some(false));
        assert_eq!(results[not], None);
        assert_eq!(results[pin], None);
    }

    #[test]
    fn results_are_stored_on_the_gates() {
        let mut circuit = Circuit::new();
        let pin = circuit.add_gate(GateKind::Input);
        let not = circuit.add_gate(GateKind::Not);
        connect(&mut circuit, pin, not, 0).unwrap();
        circuit.set_input(pin, false).unwrap();
        assert_eq!(circuit.output(not), None);

        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(circuit.output(not), Some(true));
        assert_eq!(circuit.output(pin), results[pin]);
    }

    #[test]
    fn slot_order_defines_input_order() {
        let mut circuit = Circuit::new();
        let a = circuit.add_gate(GateKind::Input);
        let output = circuit.add_gate(GateKind::Output);
        // only a gap-filled high slot is wired; the passthrough still sees
        // exactly one input
        connect(&mut circuit, a, output, 4).unwrap();
        circuit.set_input(a, true).unwrap();

        let results = evaluate(&mut circuit).unwrap();
        assert_eq!(results[output], Some(true));
    }

    #[test]
    fn evaluation_of_an_empty_circuit() {
        let mut circuit = Circuit::new();
        let results = evaluate(&mut circuit).unwrap();
        assert!(results.is_empty());
    }
}
