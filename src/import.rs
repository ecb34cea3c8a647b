use std::collections::HashMap;
use std::path::Path;

use json::JsonValue;

use crate::circuit::{connections, Circuit, GateKey};
use crate::error::ImportError;
use crate::gate::GateKind;

// TODO: reduce the repetition in pulling typed fields out of objects

pub fn load(path: impl AsRef<Path>) -> Result<Circuit, ImportError> {
    let document = std::fs::read_to_string(path)?;
    parse(&document)
}

/// Parses a circuit document and rebuilds the circuit through the normal
/// mutation operations, so a document with an occupied slot, a cycle, or a
/// dangling gate id is rejected instead of producing a broken circuit.
pub fn parse(document: &str) -> Result<Circuit, ImportError> {
    let document = json::parse(document)?;
    let JsonValue::Object(mut document) = document else {
        return Err(malformed("toplevel must be object"));
    };

    let JsonValue::Array(gates) = document.remove("gates").ok_or_else(|| malformed("toplevel object must contain key \"gates\""))? else {
        return Err(malformed("gates must be array"));
    };
    let JsonValue::Array(connections) = document.remove("connections").ok_or_else(|| malformed("toplevel object must contain key \"connections\""))? else {
        return Err(malformed("connections must be array"));
    };
    let input_values = match document.remove("input_values") {
        Some(JsonValue::Object(input_values)) => Some(input_values),
        Some(_) => return Err(malformed("input_values must be object")),
        None => None,
    };

    let mut circuit = Circuit::new();
    let mut gate_mapping: HashMap<usize, GateKey> = HashMap::new();

    for gate in gates {
        let JsonValue::Object(mut gate) = gate else {
            return Err(malformed("gate must be object"));
        };
        let id = gate.remove("id").ok_or_else(|| malformed("gate must have field \"id\""))?.as_usize().ok_or_else(|| malformed("gate id must be number"))?;
        let kind = gate.remove("kind").ok_or_else(|| malformed("gate must have field \"kind\""))?.take_string().ok_or_else(|| malformed("gate kind must be string"))?;
        let kind = GateKind::from_name(&kind).ok_or_else(|| malformed(format!("invalid gate kind \"{kind}\"")))?;

        let key = circuit.add_gate(kind);
        if gate_mapping.insert(id, key).is_some() {
            return Err(malformed(format!("duplicate gate id {id}")));
        }
    }

    for connection in connections {
        let JsonValue::Object(mut connection) = connection else {
            return Err(malformed("connection must be object"));
        };
        let from = connection.remove("from").ok_or_else(|| malformed("connection must have field \"from\""))?.as_usize().ok_or_else(|| malformed("connection from must be number"))?;
        let to = connection.remove("to").ok_or_else(|| malformed("connection must have field \"to\""))?.as_usize().ok_or_else(|| malformed("connection to must be number"))?;
        let slot = connection.remove("slot").ok_or_else(|| malformed("connection must have field \"slot\""))?.as_usize().ok_or_else(|| malformed("connection slot must be number"))?;

        let from = *gate_mapping.get(&from).ok_or_else(|| malformed(format!("connection references unknown gate id {from}")))?;
        let to = *gate_mapping.get(&to).ok_or_else(|| malformed(format!("connection references unknown gate id {to}")))?;
        connections::connect(&mut circuit, from, to, slot)?;
    }

    if let Some(input_values) = input_values {
        for (id, value) in input_values.iter() {
            let id: usize = id.parse().map_err(|_| malformed(format!("input value key \"{id}\" must be a gate id")))?;
            let gate = *gate_mapping.get(&id).ok_or_else(|| malformed(format!("input value references unknown gate id {id}")))?;
            let value = value.as_bool().ok_or_else(|| malformed("input value must be bool"))?;
            circuit.set_input(gate, value)?;
        }
    }

    log::info!("loaded circuit with {} gates and {} wires", circuit.num_gates(), circuit.num_wires());
    Ok(circuit)
}

fn malformed(message: impl Into<String>) -> ImportError {
    ImportError::Malformed(message.into())
}
