//! Het slotcontract van de gelabelde invoerparameters.
//!
//! Een slot koppelt een label (de ledensleutel) aan een weergaveoptierecord
//! en een geometriemarkering. De opties zijn alleen schakelbaar zolang het
//! slot geometrie draagt; ze overleven een bewaarbeurt als JSON-blob onder
//! het item `Options`.

use serde::{Deserialize, Serialize};

use crate::archive::chunk::ArchiveChunk;
use crate::archive::{ArchiveError, ArchiveResult};

use super::Invalidation;

/// Naam van het archiefitem waarin de opties landen.
pub const OPTIONS_ITEM: &str = "Options";

/// Naam van de zichtbaarheidsoptie zoals de host die toont.
pub const OPTION_VISIBLE: &str = "Visible";
/// Naam van de bakoptie zoals de host die toont.
pub const OPTION_BAKABLE: &str = "Bakable";

/// Weergaveopties van één lid; beide vlaggen staan standaard aan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayOptions {
    pub visible: bool,
    pub bakable: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            visible: true,
            bakable: true,
        }
    }
}

/// Eén invoerslot van de Objectify- en Mutate-componenten.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSlot {
    label: String,
    options: DisplayOptions,
    has_geometry: bool,
}

impl MemberSlot {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            options: DisplayOptions::default(),
            has_geometry: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[must_use]
    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    /// `true` zodra het slot bij de laatste oplosbeurt geometrie droeg.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.has_geometry
    }

    pub(crate) fn set_has_geometry(&mut self, has_geometry: bool) {
        self.has_geometry = has_geometry;
    }

    /// Wisselt een weergaveoptie. Opties zijn alleen schakelbaar op een
    /// geometrieslot; onbekende namen doen niets.
    pub fn toggle(&mut self, option: &str) -> Option<Invalidation> {
        if !self.has_geometry {
            return None;
        }
        match option {
            OPTION_VISIBLE => self.options.visible = !self.options.visible,
            OPTION_BAKABLE => self.options.bakable = !self.options.bakable,
            _ => return None,
        }
        Some(Invalidation::FULL)
    }

    /// Schrijft de opties als JSON-blob in het chunk van de parameter.
    ///
    /// # Errors
    /// `MalformedField` wanneer de blob niet geschreven kan worden.
    pub fn write_options(&self, chunk: &mut ArchiveChunk) -> ArchiveResult<()> {
        let blob = serde_json::to_string(&self.options).map_err(|source| {
            ArchiveError::MalformedField {
                field: OPTIONS_ITEM,
                source,
            }
        })?;
        chunk.set_string(OPTIONS_ITEM, blob);
        Ok(())
    }

    /// Leest de opties terug; een chunk zonder `Options`-item levert de
    /// standaardinstellingen op.
    ///
    /// # Errors
    /// `MalformedField` bij een onleesbare blob.
    pub fn read_options(&mut self, chunk: &ArchiveChunk) -> ArchiveResult<()> {
        let Some(blob) = chunk.get_string(OPTIONS_ITEM) else {
            self.options = DisplayOptions::default();
            return Ok(());
        };
        self.options = serde_json::from_str(blob).map_err(|source| {
            ArchiveError::MalformedField {
                field: OPTIONS_ITEM,
                source,
            }
        })?;
        Ok(())
    }
}
