//! Objectify: bundelt gelabelde invoerslots tot één object.
//!
//! Elk slot levert één lid op; het label wordt de sleutel en de
//! weergaveopties van het slot worden de vlaggen van het lid. Lege slots
//! worden met een waarschuwing overgeslagen.

use crate::object::member::{Member, PayloadKind, all_same_kind};
use crate::object::{DEFAULT_NAME, GeomObject};

use super::{
    ComponentError, ComponentResult, RuntimeMessage, SlotValue, SolveOutput, SolveState,
};

/// Naam van de uitvoerpin.
pub const PIN_OUTPUT: &str = "O";

/// Foutmelding wanneer een slot gemengde ladingsoorten draagt.
pub const MSG_MIXED_KINDS: &str = "All data in an object member should be of the same type!";

/// Foutmelding wanneer geen enkel slot gegevens leverde.
pub const MSG_NO_GEOMETRY: &str = "There is no Geometry";

pub(super) fn solve(inputs: &[SlotValue], state: &mut SolveState) -> ComponentResult {
    if state.slots.len() != inputs.len() {
        return Err(ComponentError::new(format!(
            "{} slots registered for {} input pins",
            state.slots.len(),
            inputs.len()
        )));
    }

    let mut output = SolveOutput::default();
    let name = if state.nickname.is_empty() {
        DEFAULT_NAME
    } else {
        state.nickname.as_str()
    };
    let mut obj = GeomObject::with_name(name);

    for (slot, value) in state.slots.iter_mut().zip(inputs) {
        let payloads = match value {
            SlotValue::Items(payloads) if !payloads.is_empty() => payloads,
            SlotValue::Empty | SlotValue::Items(_) => {
                output.messages.push(RuntimeMessage::warning(format!(
                    "No data received in {}",
                    slot.label()
                )));
                continue;
            }
            other => {
                return Err(ComponentError::BadInput {
                    pin: "member slot",
                    expected: "a list of member values",
                    got: other.kind_name(),
                });
            }
        };

        if !all_same_kind(payloads) {
            output.messages.push(RuntimeMessage::error(MSG_MIXED_KINDS));
            return Ok(output);
        }
        slot.set_has_geometry(payloads[0].kind() == PayloadKind::Geometry);

        let member = match Member::from_payloads(payloads.clone()) {
            Ok(member) => member,
            Err(err) => {
                output.messages.push(RuntimeMessage::error(err.to_string()));
                return Ok(output);
            }
        };
        let options = slot.options();
        obj.insert_member(slot.label(), member, options.visible, options.bakable);
    }

    if obj.is_empty() {
        output.messages.push(RuntimeMessage::error(MSG_NO_GEOMETRY));
    }
    output
        .outputs
        .insert(PIN_OUTPUT.to_owned(), SlotValue::Object(Box::new(obj)));
    Ok(output)
}
