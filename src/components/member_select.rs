//! Het selectiecontract van de ledenkeuzeparameter.
//!
//! De parameter toont de ledensleutels van het binnenkomende object als
//! optielijst en onthoudt daaruit één keuze. Na een wijziging stroomopwaarts
//! wordt de lijst herbouwd; een keuze die daarbij vervalt schuift terug naar
//! de eerste beschikbare naam.

use crate::object::GeomObject;

use super::{ComponentError, Invalidation};

/// Optielijst plus selectie van een ledenkeuzeparameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberSelect {
    options: Vec<String>,
    selection: Option<String>,
}

impl MemberSelect {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// De sleutels waaruit gekozen kan worden, in ledenvolgorde.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Herbouwt de optielijst uit de ledensleutels van `obj`. Een lege of
    /// vervallen selectie valt terug op de eerste naam; zonder leden vervalt
    /// de selectie helemaal.
    pub fn refresh(&mut self, obj: &GeomObject) -> Option<Invalidation> {
        let options: Vec<String> = obj.keys().map(str::to_owned).collect();
        let selection = self
            .selection
            .as_ref()
            .filter(|current| options.iter().any(|key| key == *current))
            .cloned()
            .or_else(|| options.first().cloned());

        if options == self.options && selection == self.selection {
            return None;
        }
        self.options = options;
        self.selection = selection;
        Some(Invalidation::DISPLAY)
    }

    /// Kiest expliciet een naam uit de optielijst.
    ///
    /// # Errors
    /// Een naam buiten de lijst wordt geweigerd.
    pub fn select(&mut self, name: &str) -> Result<Invalidation, ComponentError> {
        if !self.options.iter().any(|key| key == name) {
            return Err(ComponentError::new(format!(
                "`{name}` is not one of the member names"
            )));
        }
        self.selection = Some(name.to_owned());
        Ok(Invalidation::FULL)
    }
}
