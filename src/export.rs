use std::collections::HashMap;
use std::path::Path;

use json::JsonValue;

use crate::circuit::{Circuit, GateKey};

pub fn save(circuit: &Circuit, path: impl AsRef<Path>) -> std::io::Result<()> {
    std::fs::write(path, to_json(circuit).pretty(4))
}

/// Serializes a circuit into the document format `import::parse` reads.
/// Gate ids in the file are dense indices in arena order.
pub fn to_json(circuit: &Circuit) -> JsonValue {
    let ids: HashMap<GateKey, usize> = circuit.gate_keys().enumerate().map(|(id, key)| (key, id)).collect();

    let mut gates = Vec::new();
    let mut input_values = json::object::Object::new();
    for (id, key) in circuit.gate_keys().enumerate() {
        let mut gate = json::object::Object::new();
        gate.insert("id", id.into());
        gate.insert("kind", circuit.kind(key).expect("gate_keys yields live gates").name().into());
        gates.push(JsonValue::Object(gate));

        if let Some(value) = circuit.input_value(key) {
            input_values.insert(&id.to_string(), value.into());
        }
    }

    let mut connections = Vec::new();
    for (producer, receiver, slot) in circuit.wires() {
        let mut connection = json::object::Object::new();
        connection.insert("from", ids[&producer].into());
        connection.insert("to", ids[&receiver].into());
        connection.insert("slot", slot.into());
        connections.push(JsonValue::Object(connection));
    }

    let mut document = json::object::Object::new();
    document.insert("gates", JsonValue::Array(gates));
    document.insert("connections", JsonValue::Array(connections));
    document.insert("input_values", JsonValue::Object(input_values));
    JsonValue::Object(document)
}
