//! Object Member: haalt één lid uit een object.
//!
//! De keuzeparameter volgt de ledensleutels van het binnenkomende object.
//! Vervalt de gekozen naam door een wijziging stroomopwaarts, dan schuift de
//! keuze terug naar de eerste beschikbare naam.

use crate::object::GeomObject;

use super::{ComponentError, ComponentResult, SlotValue, SolveOutput, SolveState};

/// Naam van de uitvoerpin.
pub const PIN_OUTPUT: &str = "O";

pub(super) fn solve(inputs: &[SlotValue], state: &mut SolveState) -> ComponentResult {
    let [input] = inputs else {
        return Err(ComponentError::new(format!(
            "Object Member expects one input pin, got {}",
            inputs.len()
        )));
    };

    let empty = GeomObject::new();
    let obj = match input {
        SlotValue::Empty => &empty,
        SlotValue::Object(boxed) => boxed.as_ref(),
        other => {
            return Err(ComponentError::BadInput {
                pin: "O",
                expected: "an object",
                got: other.kind_name(),
            });
        }
    };

    let mut output = SolveOutput {
        display_expired: state.select.refresh(obj).is_some(),
        ..SolveOutput::default()
    };

    let Some(key) = state.select.selection() else {
        return Ok(output);
    };
    if let Some(member) = obj.member(key) {
        output.outputs.insert(
            PIN_OUTPUT.to_owned(),
            SlotValue::Items(member.payloads().to_vec()),
        );
    }
    Ok(output)
}
