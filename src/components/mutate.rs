//! Mutate Object: vervangt één lid van een object door nieuwe waarden.
//!
//! De component werkt altijd op een kopie; het binnenkomende object blijft
//! onaangeroerd. De keuzeparameter bepaalt welk lid vervangen wordt en het
//! vervangingsslot levert de nieuwe waarden plus de weergaveopties.

use crate::object::member::{Member, PayloadKind, all_same_kind};

use super::{
    ComponentError, ComponentResult, RuntimeMessage, SlotValue, SolveOutput, SolveState,
};

/// Naam van de uitvoerpin.
pub const PIN_OUTPUT: &str = "O";

/// Waarschuwing wanneer de objectpin leeg blijft.
pub const MSG_NO_OBJECT: &str = "No Object received";

/// Waarschuwing wanneer het binnenkomende object geen leden draagt.
pub const MSG_EMPTY_OBJECT: &str = "The Object is empty";

/// Opmerking wanneer het vervangingsslot leeg blijft.
pub const MSG_NO_REPLACEMENT: &str = "The member was not replaced: No replacement received";

/// Foutmelding wanneer de gekozen naam niet (meer) bestaat.
pub const MSG_UNKNOWN_MEMBER: &str = "The object does not have a member with this name !";

pub(super) fn solve(inputs: &[SlotValue], state: &mut SolveState) -> ComponentResult {
    let [object_input, replacement_input] = inputs else {
        return Err(ComponentError::new(format!(
            "Mutate Object expects two input pins, got {}",
            inputs.len()
        )));
    };

    let mut output = SolveOutput::default();

    let obj = match object_input {
        SlotValue::Empty => {
            output.messages.push(RuntimeMessage::warning(MSG_NO_OBJECT));
            return Ok(output);
        }
        SlotValue::Object(boxed) => boxed.as_ref(),
        other => {
            return Err(ComponentError::BadInput {
                pin: "O",
                expected: "an object",
                got: other.kind_name(),
            });
        }
    };

    // Werkkopie via de diepe kopie; het aangeleverde object blijft
    // onaangeroerd.
    let mut copy = obj.fresh(true);
    if copy.is_empty() {
        output
            .messages
            .push(RuntimeMessage::warning(MSG_EMPTY_OBJECT));
        return Ok(output);
    }

    // De gevraagde naam wordt vastgelegd voordat de optielijst meeschuift:
    // een vervallen keuze levert een fout op en wordt niet stilzwijgend
    // naar de eerste beschikbare naam omgebogen.
    let requested = state.select.selection().map(str::to_owned);
    if state.select.refresh(&copy).is_some() {
        output.display_expired = true;
    }

    let payloads = match replacement_input {
        SlotValue::Items(payloads) if !payloads.is_empty() => payloads,
        SlotValue::Empty | SlotValue::Items(_) => {
            output
                .messages
                .push(RuntimeMessage::remark(MSG_NO_REPLACEMENT));
            output
                .outputs
                .insert(PIN_OUTPUT.to_owned(), SlotValue::Object(Box::new(copy)));
            return Ok(output);
        }
        other => {
            return Err(ComponentError::BadInput {
                pin: "R",
                expected: "a list of member values",
                got: other.kind_name(),
            });
        }
    };

    if !all_same_kind(payloads) {
        output.messages.push(RuntimeMessage::error(
            super::objectify::MSG_MIXED_KINDS,
        ));
        return Ok(output);
    }

    let options = {
        let slot = state
            .slots
            .first_mut()
            .ok_or_else(|| ComponentError::new("Mutate Object is missing its replacement slot"))?;
        slot.set_has_geometry(payloads[0].kind() == PayloadKind::Geometry);
        slot.options()
    };

    let Some(target) = requested.or_else(|| state.select.selection().map(str::to_owned)) else {
        return Ok(output);
    };
    if !copy.has_member(&target) {
        output
            .messages
            .push(RuntimeMessage::error(MSG_UNKNOWN_MEMBER));
        return Ok(output);
    }

    let member = match Member::from_payloads(payloads.clone()) {
        Ok(member) => member,
        Err(err) => {
            output.messages.push(RuntimeMessage::error(err.to_string()));
            return Ok(output);
        }
    };
    if let Err(err) = copy.replace_member(&target, member, options.visible, options.bakable) {
        output.messages.push(RuntimeMessage::error(err.to_string()));
        return Ok(output);
    }

    output
        .outputs
        .insert(PIN_OUTPUT.to_owned(), SlotValue::Object(Box::new(copy)));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::member_slot::OPTION_VISIBLE;
    use crate::components::{ComponentKind, MessageLevel};
    use crate::geom::{GeometryValue, Point3};
    use crate::object::member::Payload;
    use crate::object::GeomObject;

    fn huis() -> GeomObject {
        let mut obj = GeomObject::with_name("Huis");
        obj.insert_member(
            "dak",
            Member::single(Payload::Geometry(GeometryValue::Point(Point3::ORIGIN))),
            true,
            true,
        );
        obj.insert_member("hoogte", Member::single(Payload::Number(3.0)), true, true);
        obj
    }

    fn inputs(obj: GeomObject, replacement: SlotValue) -> [SlotValue; 2] {
        [SlotValue::Object(Box::new(obj)), replacement]
    }

    fn uitvoer_object(output: &SolveOutput) -> &GeomObject {
        match output.outputs.get(PIN_OUTPUT) {
            Some(SlotValue::Object(obj)) => obj,
            other => panic!("verwachtte een object op pin O, kreeg {other:?}"),
        }
    }

    #[test]
    fn the_selected_member_is_replaced_on_a_copy() {
        let mut state = SolveState::for_kind(ComponentKind::MutateObject);
        let origineel = huis();

        ComponentKind::MutateObject
            .solve(&inputs(origineel.clone(), SlotValue::Empty), &mut state)
            .unwrap();
        state.select.select("hoogte").unwrap();

        let vervanging = SlotValue::Items(vec![Payload::Number(7.5)]);
        let output = ComponentKind::MutateObject
            .solve(&inputs(origineel.clone(), vervanging), &mut state)
            .unwrap();

        let mutatie = uitvoer_object(&output);
        assert_eq!(
            mutatie.member("hoogte").unwrap().payloads(),
            [Payload::Number(7.5)]
        );
        assert_eq!(mutatie.keys().collect::<Vec<_>>(), ["dak", "hoogte"]);
        assert_eq!(
            origineel.member("hoogte").unwrap().payloads(),
            [Payload::Number(3.0)]
        );
    }

    #[test]
    fn replacement_flags_come_from_the_slot_options() {
        let mut state = SolveState::for_kind(ComponentKind::MutateObject);
        ComponentKind::MutateObject
            .solve(&inputs(huis(), SlotValue::Empty), &mut state)
            .unwrap();
        state.slots[0].set_has_geometry(true);
        state.slots[0].toggle(OPTION_VISIBLE);

        let vervanging = SlotValue::Items(vec![Payload::Geometry(GeometryValue::Point(
            Point3::new(0.0, 0.0, 9.0),
        ))]);
        let output = ComponentKind::MutateObject
            .solve(&inputs(huis(), vervanging), &mut state)
            .unwrap();

        let mutatie = uitvoer_object(&output);
        assert_eq!(mutatie.is_visible("dak"), Some(false));
        assert_eq!(mutatie.is_bakable("dak"), Some(true));
    }

    #[test]
    fn a_missing_object_only_warns() {
        let mut state = SolveState::for_kind(ComponentKind::MutateObject);
        let output = ComponentKind::MutateObject
            .solve(&[SlotValue::Empty, SlotValue::Empty], &mut state)
            .unwrap();

        assert!(output.outputs.is_empty());
        assert_eq!(output.messages.len(), 1);
        assert_eq!(output.messages[0].level, MessageLevel::Warning);
        assert_eq!(output.messages[0].text, MSG_NO_OBJECT);
    }

    #[test]
    fn an_empty_object_only_warns() {
        let mut state = SolveState::for_kind(ComponentKind::MutateObject);
        let output = ComponentKind::MutateObject
            .solve(&inputs(GeomObject::new(), SlotValue::Empty), &mut state)
            .unwrap();

        assert!(output.outputs.is_empty());
        assert_eq!(output.messages[0].text, MSG_EMPTY_OBJECT);
    }

    #[test]
    fn a_missing_replacement_passes_the_copy_through() {
        let mut state = SolveState::for_kind(ComponentKind::MutateObject);
        let output = ComponentKind::MutateObject
            .solve(&inputs(huis(), SlotValue::Empty), &mut state)
            .unwrap();

        assert_eq!(output.messages[0].level, MessageLevel::Remark);
        assert_eq!(output.messages[0].text, MSG_NO_REPLACEMENT);
        assert_eq!(uitvoer_object(&output).describe(), huis().describe());
    }

    #[test]
    fn mixed_replacement_kinds_abort_without_an_output() {
        let mut state = SolveState::for_kind(ComponentKind::MutateObject);
        let vervanging = SlotValue::Items(vec![
            Payload::Number(1.0),
            Payload::Text("twee".to_owned()),
        ]);
        let output = ComponentKind::MutateObject
            .solve(&inputs(huis(), vervanging), &mut state)
            .unwrap();

        assert!(output.outputs.is_empty());
        assert_eq!(output.messages[0].level, MessageLevel::Error);
    }

    #[test]
    fn a_stale_selection_is_an_error_not_a_retarget() {
        let mut state = SolveState::for_kind(ComponentKind::MutateObject);
        ComponentKind::MutateObject
            .solve(&inputs(huis(), SlotValue::Empty), &mut state)
            .unwrap();
        state.select.select("hoogte").unwrap();

        let mut kleiner = huis();
        kleiner.remove_member("hoogte");
        let vervanging = SlotValue::Items(vec![Payload::Number(7.5)]);
        let output = ComponentKind::MutateObject
            .solve(&inputs(kleiner, vervanging), &mut state)
            .unwrap();

        assert!(output.outputs.is_empty());
        assert_eq!(output.messages[0].level, MessageLevel::Error);
        assert_eq!(output.messages[0].text, MSG_UNKNOWN_MEMBER);
        // De optielijst is wel meegeschoven voor de volgende beurt.
        assert_eq!(state.select.selection(), Some("dak"));
    }
}
