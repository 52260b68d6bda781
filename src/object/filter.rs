//! Gefilterde geometrieweergaven van een object.
//!
//! Een weergave is een geneste groep: per geometrielid één subgroep, in
//! invoegvolgorde. Leden zonder vastgelegde vlaggen doen niet mee; dat is
//! geen fout maar een gevolg van het archiefformaat, waar vlagblokken los
//! van de leden staan.

use crate::geom::GeometryValue;

use super::GeomObject;
use super::member::{Payload, PayloadKind};

/// Filterstand voor een geometrieweergave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFilter {
    /// Ieder geometrielid met vlaggen doet mee.
    All,
    /// Alleen leden met een ware zichtbaarheidsvlag.
    Visible,
    /// Alleen leden met een ware bakvlag.
    Bakable,
    /// Alleen leden waarvoor beide vlaggen waar zijn.
    VisibleAndBakable,
}

impl GeometryFilter {
    /// Herken een filtertoken; `None` voor onbekende tokens.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "visible" => Some(Self::Visible),
            "bakable" => Some(Self::Bakable),
            "both" => Some(Self::VisibleAndBakable),
            _ => None,
        }
    }

    /// Het token waaronder de stand in archieven en menu's voorkomt.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Visible => "visible",
            Self::Bakable => "bakable",
            Self::VisibleAndBakable => "both",
        }
    }

    const fn admits(self, visible: bool, bakable: bool) -> bool {
        match self {
            Self::All => true,
            Self::Visible => visible,
            Self::Bakable => bakable,
            Self::VisibleAndBakable => visible && bakable,
        }
    }
}

impl GeomObject {
    /// Bouw de gefilterde geometrieweergave: een groep met per toegelaten
    /// geometrielid één subgroep. Niet-geometrische leden dragen nooit bij.
    #[must_use]
    pub fn geometry_group(&self, filter: GeometryFilter) -> GeometryValue {
        let mut groups = Vec::new();
        for (key, member) in self.iter() {
            if member.kind() != PayloadKind::Geometry {
                continue;
            }
            let (Some(visible), Some(bakable)) = (self.is_visible(key), self.is_bakable(key))
            else {
                continue;
            };
            if !filter.admits(visible, bakable) {
                continue;
            }
            let sub: Vec<GeometryValue> = member
                .payloads()
                .iter()
                .filter_map(|payload| match payload {
                    Payload::Geometry(value) => Some(value.clone()),
                    _ => None,
                })
                .collect();
            groups.push(GeometryValue::Group(sub));
        }
        GeometryValue::Group(groups)
    }

    /// Tokenvariant van [`GeomObject::geometry_group`]; een onbekend token
    /// levert een lege groep op in plaats van een fout.
    #[must_use]
    pub fn geometry_group_for_token(&self, token: &str) -> GeometryValue {
        match GeometryFilter::from_token(token) {
            Some(filter) => self.geometry_group(filter),
            None => {
                log::warn!("onbekend filtertoken `{token}`, lege weergave teruggegeven");
                GeometryValue::empty_group()
            }
        }
    }
}
