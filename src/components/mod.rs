//! Component registry en oplos-logica.
//!
//! De drie componenten delen één toestandsrecord ([`SolveState`]) en één
//! uitkomstrecord ([`SolveOutput`]). De host levert pinwaarden aan als
//! [`SlotValue`] en krijgt uitvoerwaarden, runtimemeldingen en een
//! weergavesignaal terug.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::object::GeomObject;
use crate::object::member::Payload;

pub mod member_select;
pub mod member_slot;
pub mod mutate;
pub mod object_member;
pub mod objectify;

use member_select::MemberSelect;
use member_slot::MemberSlot;

/// Waarde op een in- of uitvoerpin.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    /// Geen gegevens aangeleverd.
    Empty,
    /// Een reeks losse ladingen.
    Items(Vec<Payload>),
    /// Een volledig object.
    Object(Box<GeomObject>),
}

impl SlotValue {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Korte soortnaam voor foutberichten.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty => "nothing",
            Self::Items(_) => "a list of member values",
            Self::Object(_) => "an object",
        }
    }
}

/// Niveau van een runtimemelding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Remark,
    Warning,
    Error,
}

/// Melding die een component tijdens het oplossen aan de gebruiker richt.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl RuntimeMessage {
    #[must_use]
    pub fn remark(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Remark,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
        }
    }
}

/// Kennisgeving dat de host weergave en/of oplossing moet verversen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub display: bool,
    pub solution: bool,
}

impl Invalidation {
    /// Alleen de weergave verversen.
    pub const DISPLAY: Self = Self {
        display: true,
        solution: false,
    };
    /// Weergave en oplossing beide verversen.
    pub const FULL: Self = Self {
        display: true,
        solution: true,
    };
}

/// Fouttype voor component-evaluaties.
#[derive(Debug, Clone)]
pub enum ComponentError {
    /// Een generieke fout met een bericht.
    Message(String),
    /// Een pin droeg niet de verwachte vorm.
    BadInput {
        pin: &'static str,
        expected: &'static str,
        got: &'static str,
    },
}

impl ComponentError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(s) => f.write_str(s),
            Self::BadInput { pin, expected, got } => {
                write!(f, "input pin `{pin}` expected {expected}, got {got}")
            }
        }
    }
}

impl std::error::Error for ComponentError {}

/// Resultaat van een component-executie.
pub type ComponentResult = Result<SolveOutput, ComponentError>;

/// Per-instantie toestand die tussen oplosbeurten bewaard blijft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveState {
    /// Roepnaam van de instantie; Objectify vernoemt het object ernaar.
    pub nickname: String,
    /// Gelabelde invoerslots, één per gegevenspin die een lid levert.
    pub slots: Vec<MemberSlot>,
    /// Ledenkeuze van de Object Member- en Mutate-componenten.
    pub select: MemberSelect,
}

impl SolveState {
    /// Begintoestand zoals de host een vers geplaatste component opzet.
    #[must_use]
    pub fn for_kind(kind: ComponentKind) -> Self {
        let slots = match kind {
            ComponentKind::Objectify => vec![MemberSlot::new("Label_1")],
            ComponentKind::ObjectMember => Vec::new(),
            ComponentKind::MutateObject => vec![MemberSlot::new("R")],
        };
        Self {
            nickname: kind.nickname().to_owned(),
            slots,
            select: MemberSelect::new(),
        }
    }
}

/// Uitkomst van één oplosbeurt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveOutput {
    /// Uitvoerwaarden per pinnaam.
    pub outputs: BTreeMap<String, SlotValue>,
    /// Meldingen voor de gebruiker, in de volgorde waarin ze ontstonden.
    pub messages: Vec<RuntimeMessage>,
    /// `true` wanneer de weergave van de component moet verversen.
    pub display_expired: bool,
}

/// Beschikbare componenten binnen de registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Objectify,
    ObjectMember,
    MutateObject,
}

impl ComponentKind {
    /// Voert één oplosbeurt uit.
    ///
    /// # Errors
    /// Een pin die niet de verwachte vorm draagt is een contractbreuk en
    /// levert een [`ComponentError`] op; gebruikersfouten landen als
    /// melding in de uitkomst.
    pub fn solve(&self, inputs: &[SlotValue], state: &mut SolveState) -> ComponentResult {
        log::debug!("{} lost op met {} invoerpinnen", self.name(), inputs.len());
        match self {
            Self::Objectify => objectify::solve(inputs, state),
            Self::ObjectMember => object_member::solve(inputs, state),
            Self::MutateObject => mutate::solve(inputs, state),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Objectify => "Objectify",
            Self::ObjectMember => "Object Member",
            Self::MutateObject => "Mutate Object",
        }
    }

    #[must_use]
    pub fn nickname(&self) -> &'static str {
        match self {
            Self::Objectify => "Object",
            Self::ObjectMember => "M",
            Self::MutateObject => "Mutate",
        }
    }
}

/// Metadata voor registraties in de componentregistry.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub guids: &'static [&'static str],
    pub names: &'static [&'static str],
    pub kind: ComponentKind,
}

/// Registraties van alle componenten van de plugin.
pub const REGISTRATIONS: &[Registration] = &[
    Registration {
        guids: &["{1b99b61b-34e7-4912-955e-54fd914b4200}"],
        names: &["Objectify", "Object"],
        kind: ComponentKind::Objectify,
    },
    Registration {
        guids: &["{0f8fad5b-d9cb-469f-a165-70867728950e}"],
        names: &["Object Member", "M"],
        kind: ComponentKind::ObjectMember,
    },
    Registration {
        guids: &["{c3430f1a-0d01-47ae-b5be-84a9408ad73a}"],
        names: &["Mutate Object", "Mutate"],
        kind: ComponentKind::MutateObject,
    },
];

/// Registry die componenten opzoekt op GUID of naam.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    by_guid: HashMap<String, ComponentKind>,
    by_name: HashMap<String, ComponentKind>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        for registration in REGISTRATIONS {
            for guid in registration.guids {
                registry.register_guid(guid, registration.kind);
            }
            registry.register_names(registration.names, registration.kind);
        }

        registry
    }
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_guid: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn register_guid(&mut self, guid: impl AsRef<str>, kind: ComponentKind) {
        let key = normalize_guid(guid.as_ref());
        self.by_guid.insert(key, kind);
    }

    pub fn register_names(&mut self, names: &[&str], kind: ComponentKind) {
        for name in names {
            let key = normalize_name(name);
            self.by_name.insert(key, kind);
        }
    }

    #[must_use]
    pub fn resolve(
        &self,
        guid: Option<&str>,
        name: Option<&str>,
        nickname: Option<&str>,
    ) -> Option<ComponentKind> {
        if let Some(guid) = guid {
            if let Some(component) = self.by_guid.get(&normalize_guid(guid)) {
                return Some(*component);
            }
        }

        if let Some(name) = name {
            if let Some(component) = self.by_name.get(&normalize_name(name)) {
                return Some(*component);
            }
        }

        if let Some(nickname) = nickname {
            if let Some(component) = self.by_name.get(&normalize_name(nickname)) {
                return Some(*component);
            }
        }

        None
    }
}

fn normalize_guid(guid: &str) -> String {
    guid.trim_matches(|c| c == '{' || c == '}').to_lowercase()
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
