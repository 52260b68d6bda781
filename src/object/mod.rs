//! Kern datastructuren voor het heterogene objectmodel.
//!
//! Een [`GeomObject`] bundelt benoemde leden van verschillende ladingsoorten
//! (geometrie, getallen, tekst, vectoren) met per lid twee weergavevlaggen.
//! Leden zijn homogene reeksen; de invoegvolgorde blijft bewaard en bepaalt
//! weergave, iteratie en de gefilterde geometrieweergaven.

use std::collections::BTreeMap;
use std::fmt;

pub mod filter;
pub mod goo;
pub mod member;
pub mod ops;

use member::{Member, PayloadKind};

/// Standaardnaam voor een object zonder opgegeven naam.
pub const DEFAULT_NAME: &str = "None";

/// Container voor benoemde, homogene ledenreeksen plus weergavevlaggen.
#[derive(Debug, Clone, PartialEq)]
pub struct GeomObject {
    /// Weergavenaam van het object.
    pub name: String,
    members: BTreeMap<String, Member>,
    member_order: Vec<String>,
    visibility: BTreeMap<String, bool>,
    bakability: BTreeMap<String, bool>,
}

impl GeomObject {
    /// Leeg object met de standaardnaam.
    #[must_use]
    pub fn new() -> Self {
        Self::with_name(DEFAULT_NAME)
    }

    /// Leeg object met een opgegeven naam.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
            member_order: Vec::new(),
            visibility: BTreeMap::new(),
            bakability: BTreeMap::new(),
        }
    }

    /// Voeg een lid toe of vervang het bestaande lid onder dezelfde sleutel.
    /// Een vervanging behoudt de oorspronkelijke plaats in de volgorde.
    pub fn insert_member(&mut self, key: &str, member: Member, visible: bool, bakable: bool) {
        self.register_member_order(key);
        self.members.insert(key.to_string(), member);
        self.visibility.insert(key.to_string(), visible);
        self.bakability.insert(key.to_string(), bakable);
    }

    /// Vervang de reeks van een bestaand lid en werk de vlaggen bij.
    ///
    /// # Errors
    /// `MemberNotFound` wanneer de sleutel geen lid aanwijst; het object
    /// blijft dan ongewijzigd.
    pub fn replace_member(
        &mut self,
        key: &str,
        member: Member,
        visible: bool,
        bakable: bool,
    ) -> Result<(), ObjectError> {
        if !self.members.contains_key(key) {
            return Err(ObjectError::MemberNotFound {
                key: key.to_string(),
            });
        }
        self.members.insert(key.to_string(), member);
        self.visibility.insert(key.to_string(), visible);
        self.bakability.insert(key.to_string(), bakable);
        Ok(())
    }

    /// Verwijder een lid met bijbehorende vlaggen; stil bij een onbekende
    /// sleutel.
    pub fn remove_member(&mut self, key: &str) {
        self.members.remove(key);
        self.member_order.retain(|k| k != key);
        self.visibility.remove(key);
        self.bakability.remove(key);
    }

    #[must_use]
    pub fn has_member(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    #[must_use]
    pub fn member(&self, key: &str) -> Option<&Member> {
        self.members.get(key)
    }

    /// Soort van het lid, bepaald door de eerste lading van de reeks.
    #[must_use]
    pub fn member_kind(&self, key: &str) -> Option<PayloadKind> {
        self.members.get(key).map(Member::kind)
    }

    /// Aantal verschillende ledensleutels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sleutels in invoegvolgorde.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.member_order.iter().map(String::as_str)
    }

    /// Leden in invoegvolgorde.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.member_order.iter().filter_map(|key| {
            self.members
                .get(key)
                .map(|member| (key.as_str(), member))
        })
    }

    /// Zichtbaarheidsvlag van een lid; `None` wanneer er geen vlag is
    /// vastgelegd (het lid doet dan niet mee in gefilterde weergaven).
    #[must_use]
    pub fn is_visible(&self, key: &str) -> Option<bool> {
        self.visibility.get(key).copied()
    }

    /// Bakvlag van een lid; `None` wanneer er geen vlag is vastgelegd.
    #[must_use]
    pub fn is_bakable(&self, key: &str) -> Option<bool> {
        self.bakability.get(key).copied()
    }

    /// Weergavetekst zoals het paneel die toont, zie de `Display`-impl.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Invoegroute zonder vlaggen, voor herstel uit het archief waar de
    /// vlagblokken los van de leden staan.
    pub(crate) fn insert_member_raw(&mut self, key: &str, member: Member) {
        self.register_member_order(key);
        self.members.insert(key.to_string(), member);
    }

    pub(crate) fn set_visible_flag(&mut self, key: &str, state: bool) {
        self.visibility.insert(key.to_string(), state);
    }

    pub(crate) fn set_bakable_flag(&mut self, key: &str, state: bool) {
        self.bakability.insert(key.to_string(), state);
    }

    /// Alle zichtbaarheidsvlaggen, inclusief achtergebleven sleutels zonder
    /// bijbehorend lid.
    pub(crate) fn visibility_flags(&self) -> impl Iterator<Item = (&str, bool)> {
        self.visibility.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub(crate) fn bakability_flags(&self) -> impl Iterator<Item = (&str, bool)> {
        self.bakability.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn register_member_order(&mut self, key: &str) {
        if !self.member_order.iter().any(|k| k == key) {
            self.member_order.push(key.to_string());
        }
    }
}

impl Default for GeomObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GeomObject {
    /// Weergavetekst in het vaste formaat
    /// `<naam> object with <aantal> members:{k1, k2}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} object with {} members:{{", self.name, self.count())?;
        for (i, key) in self.keys().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key)?;
        }
        f.write_str("}")
    }
}

/// Fouten uit het objectmodel zelf; serialisatiefouten hebben een eigen
/// taxonomie in de archieflaag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// Een ledenreeks mengt ladingsoorten.
    HeterogeneousMember {
        first: PayloadKind,
        conflicting: PayloadKind,
    },
    /// Een ledenreeks zonder lading.
    EmptyMember,
    /// Verwijzing naar een niet-bestaand lid.
    MemberNotFound { key: String },
    /// Structurele bewerking op lading zonder het vereiste vermogen.
    UnsupportedPayload {
        operation: &'static str,
        kind: PayloadKind,
    },
    /// Toegang tot een lading van het verkeerde soort.
    TypeMismatch {
        expected: PayloadKind,
        found: PayloadKind,
    },
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeterogeneousMember { first, conflicting } => write!(
                f,
                "ledenreeks mengt ladingsoorten `{first}` en `{conflicting}`"
            ),
            Self::EmptyMember => f.write_str("ledenreeks zonder lading is niet toegestaan"),
            Self::MemberNotFound { key } => {
                write!(f, "object heeft geen lid met naam `{key}`")
            }
            Self::UnsupportedPayload { operation, kind } => write!(
                f,
                "bewerking `{operation}` wordt niet gedragen door lading van soort `{kind}`"
            ),
            Self::TypeMismatch { expected, found } => write!(
                f,
                "verwachtte lading van soort `{expected}` maar kreeg `{found}`"
            ),
        }
    }
}

impl std::error::Error for ObjectError {}

#[cfg(test)]
mod tests {
    use super::member::Payload;
    use super::*;

    fn number_member(values: &[f64]) -> Member {
        Member::from_payloads(values.iter().map(|&n| Payload::Number(n)).collect()).unwrap()
    }

    #[test]
    fn describe_follows_fixed_format() {
        let mut obj = GeomObject::with_name("Box");
        obj.insert_member("corners", number_member(&[1.0, 2.0, 3.0, 4.0]), true, false);
        assert_eq!(obj.to_string(), "Box object with 1 members:{corners}");
    }

    #[test]
    fn describe_lists_keys_in_insertion_order() {
        let mut obj = GeomObject::with_name("Huis");
        obj.insert_member("dak", number_member(&[1.0]), true, true);
        obj.insert_member("muur", number_member(&[2.0]), true, true);
        obj.insert_member("vloer", number_member(&[3.0]), true, true);
        assert_eq!(
            obj.to_string(),
            "Huis object with 3 members:{dak, muur, vloer}"
        );
    }

    #[test]
    fn unnamed_object_uses_sentinel() {
        let obj = GeomObject::new();
        assert_eq!(obj.to_string(), "None object with 0 members:{}");
    }

    #[test]
    fn replacement_keeps_order_slot() {
        let mut obj = GeomObject::new();
        obj.insert_member("a", number_member(&[1.0]), true, true);
        obj.insert_member("b", number_member(&[2.0]), true, true);
        obj.insert_member("a", number_member(&[9.0]), false, true);
        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(obj.count(), 2);
        assert_eq!(obj.is_visible("a"), Some(false));
    }

    #[test]
    fn removal_is_silent_for_unknown_keys() {
        let mut obj = GeomObject::new();
        obj.insert_member("a", number_member(&[1.0]), true, true);
        obj.remove_member("bestaat-niet");
        assert_eq!(obj.count(), 1);
        obj.remove_member("a");
        assert_eq!(obj.count(), 0);
        assert!(obj.is_visible("a").is_none());
    }

    #[test]
    fn replace_requires_existing_member() {
        let mut obj = GeomObject::new();
        let err = obj
            .replace_member("niets", number_member(&[1.0]), true, true)
            .unwrap_err();
        assert!(matches!(err, ObjectError::MemberNotFound { key } if key == "niets"));
        assert!(obj.is_empty());
    }

    #[test]
    fn member_kind_reports_payload_kind() {
        let mut obj = GeomObject::new();
        obj.insert_member("n", number_member(&[1.0]), true, true);
        assert_eq!(obj.member_kind("n"), Some(PayloadKind::Number));
        assert_eq!(obj.member_kind("x"), None);
    }
}
