use std::fmt;

use crate::utils;

/// The gate types offered by the editor palette.
///
/// `Input` and `Output` are the circuit boundary pins; the rest compute a
/// boolean function over however many wires are connected to them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GateKind {
    Input,
    Output,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl GateKind {
    /// Palette order.
    pub const ALL: [GateKind; 9] =
        [GateKind::Input, GateKind::Output, GateKind::And, GateKind::Or, GateKind::Not, GateKind::Nand, GateKind::Nor, GateKind::Xor, GateKind::Xnor];

    pub fn name(self) -> &'static str {
        match self {
            GateKind::Input => "input",
            GateKind::Output => "output",
            GateKind::And => "and",
            GateKind::Or => "or",
            GateKind::Not => "not",
            GateKind::Nand => "nand",
            GateKind::Nor => "nor",
            GateKind::Xor => "xor",
            GateKind::Xnor => "xnor",
        }
    }

    pub fn from_name(name: &str) -> Option<GateKind> {
        match name {
            "input" => Some(GateKind::Input),
            "output" => Some(GateKind::Output),
            "and" => Some(GateKind::And),
            "or" => Some(GateKind::Or),
            "not" => Some(GateKind::Not),
            "nand" => Some(GateKind::Nand),
            "nor" => Some(GateKind::Nor),
            "xor" => Some(GateKind::Xor),
            "xnor" => Some(GateKind::Xnor),
            _ => None,
        }
    }

    /// Computes this gate's value over `inputs`.
    ///
    /// `None` means the result is undefined rather than an error: a NOT gate
    /// wired with anything other than one input, or an unwired boundary pin,
    /// evaluates to `None` and the rest of the circuit carries on.
    pub fn evaluate(self, inputs: &[bool]) -> Option<bool> {
        match self {
            GateKind::And => Some(inputs.iter().all(|&i| i)),
            GateKind::Or => Some(inputs.iter().any(|&i| i)),
            GateKind::Nand => Some(!inputs.iter().all(|&i| i)),
            GateKind::Nor => Some(!inputs.iter().any(|&i| i)),
            GateKind::Xor => Some(inputs.iter().filter(|&&i| i).count() == 1),
            GateKind::Xnor => Some(inputs.iter().filter(|&&i| i).count() != 1),
            GateKind::Not => match inputs {
                [i] => Some(!i),
                _ => None,
            },
            GateKind::Input | GateKind::Output => inputs.first().copied(),
        }
    }

    /// Every input combination of the given arity paired with this gate's
    /// result for it.
    pub fn truth_table(self, arity: usize) -> Vec<(Vec<bool>, Option<bool>)> {
        utils::enumerate_inputs(arity)
            .into_iter()
            .map(|inputs| {
                let result = self.evaluate(&inputs);
                (inputs, result)
            })
            .collect()
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
