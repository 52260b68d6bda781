//! Platte serialisatie van objecten naar sleutel→tekst velden.
//!
//! Het vlakke formaat bestaat uit precies zeven velden: de naam als kale
//! tekst, vier emmervelden met een JSON-recordlijst per soort, en twee
//! vlagvelden. Emmervelden bewaren leden als expliciete lijsten zodat de
//! volgorde binnen een emmer behouden blijft; de vlagvelden beschrijven de
//! volledige vlagkaarten, ook voor sleutels zonder bijbehorend lid.

pub mod chunk;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{GeometryValue, Vec3};
use crate::object::member::{Member, Payload, PayloadKind};
use crate::object::GeomObject;

use chunk::ArchiveChunk;

/// Result type voor archiefbewerkingen.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

pub const FIELD_NAME: &str = "name";
pub const FIELD_GEOMETRY: &str = "data";
pub const FIELD_NUMBER: &str = "number";
pub const FIELD_TEXT: &str = "text";
pub const FIELD_VECTOR: &str = "vector";
pub const FIELD_VISIBILITY: &str = "Visibility";
pub const FIELD_BAKABILITY: &str = "Bakability";

/// De zeven velden van de platte afbeelding, in schrijfvolgorde.
pub const FIELDS: [&str; 7] = [
    FIELD_NAME,
    FIELD_GEOMETRY,
    FIELD_NUMBER,
    FIELD_TEXT,
    FIELD_VECTOR,
    FIELD_VISIBILITY,
    FIELD_BAKABILITY,
];

/// Naam van het chunk waarin een object wordt weggeschreven.
pub const OBJECT_CHUNK: &str = "GeomObject";

/// Beschrijft fouten tijdens het lezen of schrijven van het archief.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Een van de zeven vaste velden ontbreekt.
    #[error("veld `{0}` ontbreekt in de platte afbeelding")]
    MissingField(&'static str),
    /// De JSON-blob van een veld kon niet gelezen of geschreven worden.
    #[error("veld `{field}` bevat een misvormde blob: {source}")]
    MalformedField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// Een lid in een emmerveld draagt een lege reeks.
    #[error("lid `{key}` in veld `{field}` heeft een lege reeks")]
    EmptyRecord { field: &'static str, key: String },
    /// Het XML-chunk kon niet gede-serialiseerd worden.
    #[error("misvormd archiefdeel: {0}")]
    Chunk(#[from] quick_xml::DeError),
}

/// Eén lid binnen een emmerveld: sleutel plus reeks in opslagvolgorde.
#[derive(Debug, Serialize, Deserialize)]
struct MemberRecord<T> {
    key: String,
    values: Vec<T>,
}

/// Eén vlag in een vlagveld.
#[derive(Debug, Serialize, Deserialize)]
struct FlagRecord {
    key: String,
    state: bool,
}

/// Projecteert een object op de zeven platte velden. De naam gaat als kale
/// tekst mee; alle overige velden zijn JSON-blobs.
///
/// # Errors
/// `MalformedField` wanneer een blob niet geschreven kan worden.
pub fn to_flat_fields(obj: &GeomObject) -> ArchiveResult<BTreeMap<String, String>> {
    let mut geometry: Vec<MemberRecord<GeometryValue>> = Vec::new();
    let mut numbers: Vec<MemberRecord<f64>> = Vec::new();
    let mut texts: Vec<MemberRecord<String>> = Vec::new();
    let mut vectors: Vec<MemberRecord<Vec3>> = Vec::new();

    for (key, member) in obj.iter() {
        let key = key.to_owned();
        match member.kind() {
            PayloadKind::Geometry => {
                let values = member
                    .payloads()
                    .iter()
                    .filter_map(|payload| match payload {
                        Payload::Geometry(value) => Some(value.clone()),
                        _ => None,
                    })
                    .collect();
                geometry.push(MemberRecord { key, values });
            }
            PayloadKind::Number => {
                let values = member
                    .payloads()
                    .iter()
                    .filter_map(|payload| match payload {
                        Payload::Number(value) => Some(*value),
                        _ => None,
                    })
                    .collect();
                numbers.push(MemberRecord { key, values });
            }
            PayloadKind::Text => {
                let values = member
                    .payloads()
                    .iter()
                    .filter_map(|payload| match payload {
                        Payload::Text(value) => Some(value.clone()),
                        _ => None,
                    })
                    .collect();
                texts.push(MemberRecord { key, values });
            }
            PayloadKind::Vector => {
                let values = member
                    .payloads()
                    .iter()
                    .filter_map(|payload| match payload {
                        Payload::Vector(value) => Some(*value),
                        _ => None,
                    })
                    .collect();
                vectors.push(MemberRecord { key, values });
            }
        }
    }

    let visibility: Vec<FlagRecord> = obj
        .visibility_flags()
        .map(|(key, state)| FlagRecord {
            key: key.to_owned(),
            state,
        })
        .collect();
    let bakability: Vec<FlagRecord> = obj
        .bakability_flags()
        .map(|(key, state)| FlagRecord {
            key: key.to_owned(),
            state,
        })
        .collect();

    let mut fields = BTreeMap::new();
    fields.insert(FIELD_NAME.to_owned(), obj.name.clone());
    fields.insert(FIELD_GEOMETRY.to_owned(), encode_blob(FIELD_GEOMETRY, &geometry)?);
    fields.insert(FIELD_NUMBER.to_owned(), encode_blob(FIELD_NUMBER, &numbers)?);
    fields.insert(FIELD_TEXT.to_owned(), encode_blob(FIELD_TEXT, &texts)?);
    fields.insert(FIELD_VECTOR.to_owned(), encode_blob(FIELD_VECTOR, &vectors)?);
    fields.insert(
        FIELD_VISIBILITY.to_owned(),
        encode_blob(FIELD_VISIBILITY, &visibility)?,
    );
    fields.insert(
        FIELD_BAKABILITY.to_owned(),
        encode_blob(FIELD_BAKABILITY, &bakability)?,
    );

    log::debug!(
        "platte afbeelding geschreven: object `{}` met {} leden",
        obj.name,
        obj.count()
    );
    Ok(fields)
}

/// Herstelt een object uit de zeven platte velden. Leden worden per emmer
/// herbouwd (geometrie, getallen, tekst, vectoren); vlaggen hechten alleen
/// aan sleutels die in de vlagvelden voorkomen.
///
/// # Errors
/// `MissingField` wanneer een vast veld ontbreekt, `MalformedField` wanneer
/// een blob niet te lezen is, `EmptyRecord` bij een lid zonder reeks. Er
/// wordt nooit een half hersteld object opgeleverd.
pub fn from_flat_fields(fields: &BTreeMap<String, String>) -> ArchiveResult<GeomObject> {
    let name = fields
        .get(FIELD_NAME)
        .ok_or(ArchiveError::MissingField(FIELD_NAME))?;
    let mut obj = GeomObject::with_name(name.clone());

    for record in decode_blob::<MemberRecord<GeometryValue>>(fields, FIELD_GEOMETRY)? {
        let payloads = record.values.into_iter().map(Payload::Geometry).collect();
        push_member(&mut obj, FIELD_GEOMETRY, record.key, payloads)?;
    }
    for record in decode_blob::<MemberRecord<f64>>(fields, FIELD_NUMBER)? {
        let payloads = record.values.into_iter().map(Payload::Number).collect();
        push_member(&mut obj, FIELD_NUMBER, record.key, payloads)?;
    }
    for record in decode_blob::<MemberRecord<String>>(fields, FIELD_TEXT)? {
        let payloads = record.values.into_iter().map(Payload::Text).collect();
        push_member(&mut obj, FIELD_TEXT, record.key, payloads)?;
    }
    for record in decode_blob::<MemberRecord<Vec3>>(fields, FIELD_VECTOR)? {
        let payloads = record.values.into_iter().map(Payload::Vector).collect();
        push_member(&mut obj, FIELD_VECTOR, record.key, payloads)?;
    }

    for flag in decode_blob::<FlagRecord>(fields, FIELD_VISIBILITY)? {
        obj.set_visible_flag(&flag.key, flag.state);
    }
    for flag in decode_blob::<FlagRecord>(fields, FIELD_BAKABILITY)? {
        obj.set_bakable_flag(&flag.key, flag.state);
    }

    log::debug!("object `{}` hersteld met {} leden", obj.name, obj.count());
    Ok(obj)
}

/// Schrijft een object als archiefchunk met de zeven velden als items.
///
/// # Errors
/// Zie [`to_flat_fields`].
pub fn to_chunk(obj: &GeomObject) -> ArchiveResult<ArchiveChunk> {
    let fields = to_flat_fields(obj)?;
    let mut chunk = ArchiveChunk::new(OBJECT_CHUNK);
    for field in FIELDS {
        if let Some(value) = fields.get(field) {
            chunk.set_string(field, value);
        }
    }
    Ok(chunk)
}

/// Leest een object terug uit een archiefchunk.
///
/// # Errors
/// Zie [`from_flat_fields`].
pub fn from_chunk(chunk: &ArchiveChunk) -> ArchiveResult<GeomObject> {
    let mut fields = BTreeMap::new();
    for (name, value) in chunk.entries() {
        fields.insert(name.to_owned(), value.to_owned());
    }
    from_flat_fields(&fields)
}

fn encode_blob<T: Serialize>(field: &'static str, records: &[T]) -> ArchiveResult<String> {
    serde_json::to_string(records).map_err(|source| ArchiveError::MalformedField { field, source })
}

fn decode_blob<T: DeserializeOwned>(
    fields: &BTreeMap<String, String>,
    field: &'static str,
) -> ArchiveResult<Vec<T>> {
    let blob = fields.get(field).ok_or(ArchiveError::MissingField(field))?;
    serde_json::from_str(blob).map_err(|source| ArchiveError::MalformedField { field, source })
}

fn push_member(
    obj: &mut GeomObject,
    field: &'static str,
    key: String,
    payloads: Vec<Payload>,
) -> ArchiveResult<()> {
    let member = Member::from_payloads(payloads).map_err(|_| ArchiveError::EmptyRecord {
        field,
        key: key.clone(),
    })?;
    obj.insert_member_raw(&key, member);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point3;

    fn sample_object() -> GeomObject {
        let mut obj = GeomObject::with_name("Doos");
        obj.insert_member(
            "hoekpunten",
            Member::from_payloads(vec![
                Payload::Geometry(GeometryValue::Point(Point3::ORIGIN)),
                Payload::Geometry(GeometryValue::Point(Point3::new(1.0, 1.0, 1.0))),
            ])
            .unwrap(),
            true,
            false,
        );
        obj.insert_member("hoogte", Member::single(Payload::Number(3.5)), true, true);
        obj.insert_member(
            "label",
            Member::single(Payload::Text("gevel".to_owned())),
            false,
            true,
        );
        obj.insert_member(
            "richting",
            Member::single(Payload::Vector(Vec3::new(0.0, 0.0, 1.0))),
            true,
            true,
        );
        obj
    }

    #[test]
    fn flat_fields_carry_exactly_seven_keys() {
        let fields = to_flat_fields(&sample_object()).unwrap();
        let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected: Vec<&str> = FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn name_field_is_raw_text() {
        let fields = to_flat_fields(&sample_object()).unwrap();
        assert_eq!(fields.get(FIELD_NAME).map(String::as_str), Some("Doos"));
    }

    #[test]
    fn round_trip_preserves_content() {
        let obj = sample_object();
        let fields = to_flat_fields(&obj).unwrap();
        let restored = from_flat_fields(&fields).unwrap();
        assert_eq!(restored, obj);
        assert_eq!(restored.to_string(), obj.to_string());
    }

    #[test]
    fn round_trip_regroups_mixed_kinds_by_bucket() {
        let mut obj = GeomObject::new();
        obj.insert_member(
            "a",
            Member::single(Payload::Geometry(GeometryValue::Point(Point3::ORIGIN))),
            true,
            true,
        );
        obj.insert_member("b", Member::single(Payload::Number(1.0)), true, true);
        obj.insert_member(
            "c",
            Member::single(Payload::Geometry(GeometryValue::Point(Point3::ORIGIN))),
            true,
            true,
        );

        let restored = from_flat_fields(&to_flat_fields(&obj).unwrap()).unwrap();
        // Geometrie-emmer eerst, dan getallen: b schuift achter c.
        let keys: Vec<&str> = restored.keys().collect();
        assert_eq!(keys, ["a", "c", "b"]);
        assert_eq!(restored.member("b"), obj.member("b"));
    }

    #[test]
    fn dangling_flags_survive_round_trip() {
        let copy = sample_object().fresh(false);
        let restored = from_flat_fields(&to_flat_fields(&copy).unwrap()).unwrap();
        assert!(!restored.has_member("hoekpunten"));
        assert_eq!(restored.is_visible("hoekpunten"), Some(true));
        assert_eq!(restored.is_bakable("hoekpunten"), Some(false));
    }

    #[test]
    fn missing_field_is_an_error() {
        let mut fields = to_flat_fields(&sample_object()).unwrap();
        fields.remove(FIELD_VECTOR);
        let err = from_flat_fields(&fields).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingField(FIELD_VECTOR)));
    }

    #[test]
    fn malformed_blob_is_an_error() {
        let mut fields = to_flat_fields(&sample_object()).unwrap();
        fields.insert(FIELD_NUMBER.to_owned(), "geen json".to_owned());
        let err = from_flat_fields(&fields).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::MalformedField {
                field: FIELD_NUMBER,
                ..
            }
        ));
    }

    #[test]
    fn empty_record_is_an_error() {
        let mut fields = to_flat_fields(&sample_object()).unwrap();
        fields.insert(
            FIELD_NUMBER.to_owned(),
            r#"[{"key":"hoogte","values":[]}]"#.to_owned(),
        );
        let err = from_flat_fields(&fields).unwrap_err();
        assert!(matches!(err, ArchiveError::EmptyRecord { .. }));
    }

    #[test]
    fn chunk_round_trip_preserves_content() {
        let obj = sample_object();
        let chunk = to_chunk(&obj).unwrap();
        assert_eq!(chunk.name(), OBJECT_CHUNK);
        let restored = from_chunk(&chunk).unwrap();
        assert_eq!(restored, obj);
    }
}
