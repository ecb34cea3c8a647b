use std::path::Path;

use slotmap::SlotMap;

use crate::circuit::Circuit;
use crate::error::ImportError;
use crate::{export, import};

slotmap::new_key_type! {
    pub struct CircuitKey;
}

/// One editor session: the set of circuits the user has open, each with the
/// name shown on its tab.
#[derive(Debug, Default)]
pub struct Project {
    circuits: SlotMap<CircuitKey, ProjectCircuit>,
    next_number: usize,
}

#[derive(Debug)]
pub struct ProjectCircuit {
    pub name: String,
    pub circuit: Circuit,
}

impl Project {
    pub fn new() -> Project {
        Project { circuits: SlotMap::with_key(), next_number: 1 }
    }

    /// Adds an empty circuit named "New Circuit 1", "New Circuit 2", and so
    /// on. Numbers count up for the lifetime of the project and are not
    /// reused after a circuit is removed.
    pub fn new_circuit(&mut self) -> CircuitKey {
        let name = format!("New Circuit {}", self.next_number);
        self.next_number += 1;
        self.circuits.insert(ProjectCircuit { name, circuit: Circuit::new() })
    }

    pub fn add_circuit(&mut self, name: impl Into<String>, circuit: Circuit) -> CircuitKey {
        self.circuits.insert(ProjectCircuit { name: name.into(), circuit })
    }

    pub fn remove_circuit(&mut self, circuit: CircuitKey) -> Option<ProjectCircuit> {
        self.circuits.remove(circuit)
    }

    pub fn rename(&mut self, circuit: CircuitKey, name: impl Into<String>) -> bool {
        match self.circuits.get_mut(circuit) {
            Some(entry) => {
                entry.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, circuit: CircuitKey) -> Option<&ProjectCircuit> {
        self.circuits.get(circuit)
    }

    pub fn get_mut(&mut self, circuit: CircuitKey) -> Option<&mut ProjectCircuit> {
        self.circuits.get_mut(circuit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CircuitKey, &ProjectCircuit)> {
        self.circuits.iter()
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    /// Loads a circuit file and opens it as a new named circuit, like the
    /// editor's File > Open.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<CircuitKey, ImportError> {
        let path = path.as_ref();
        let circuit = import::load(path)?;
        let name = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => {
                let name = format!("New Circuit {}", self.next_number);
                self.next_number += 1;
                name
            }
        };
        Ok(self.circuits.insert(ProjectCircuit { name, circuit }))
    }

    /// File > Save for one circuit.
    pub fn save(&self, circuit: CircuitKey, path: impl AsRef<Path>) -> std::io::Result<()> {
        let Some(entry) = self.circuits.get(circuit) else {
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such circuit in this project"));
        };
        export::save(&entry.circuit, path)
    }
}
