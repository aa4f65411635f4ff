// src/lib.rs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod bodygraph;
pub mod definition;

pub use bodygraph::{
    center_of_gate, channel_between, gate_name, gates_of, ChannelDef, Circuit, CircuitGroup,
    CHANNELS,
};
pub use definition::{
    areas_of_definition, classify_definition, defined_centers, open_centers, parse_channels,
    Channel,
};

// ---------------------------
// ## Enumerations
// ---------------------------

/// The nine energy centers of the bodygraph, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Center {
    Head = 0,
    Ajna,
    Throat,
    G,
    Heart,
    Spleen,
    Solar,
    Sacral,
    Root,
}

impl Center {
    pub const COUNT: usize = 9;

    pub fn all() -> impl Iterator<Item = Center> {
        [
            Center::Head,
            Center::Ajna,
            Center::Throat,
            Center::G,
            Center::Heart,
            Center::Spleen,
            Center::Solar,
            Center::Sacral,
            Center::Root,
        ]
        .iter()
        .copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Center> {
        match index {
            0 => Some(Center::Head),
            1 => Some(Center::Ajna),
            2 => Some(Center::Throat),
            3 => Some(Center::G),
            4 => Some(Center::Heart),
            5 => Some(Center::Spleen),
            6 => Some(Center::Solar),
            7 => Some(Center::Sacral),
            8 => Some(Center::Root),
            _ => None,
        }
    }

    /// The short id the calculation service keys centers by.
    pub fn id(self) -> &'static str {
        match self {
            Center::Head => "head",
            Center::Ajna => "ajna",
            Center::Throat => "throat",
            Center::G => "g",
            Center::Heart => "heart",
            Center::Spleen => "spleen",
            Center::Solar => "solar",
            Center::Sacral => "sacral",
            Center::Root => "root",
        }
    }

    pub fn from_id(id: &str) -> Option<Center> {
        Center::all().find(|center| center.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Center::Head => "Head",
            Center::Ajna => "Ajna",
            Center::Throat => "Throat",
            Center::G => "G Center",
            Center::Heart => "Heart/Ego",
            Center::Spleen => "Spleen",
            Center::Solar => "Solar Plexus",
            Center::Sacral => "Sacral",
            Center::Root => "Root",
        }
    }

    pub fn theme(self) -> &'static str {
        match self {
            Center::Head => "Inspiration & Pressure to Think",
            Center::Ajna => "Conceptualization & Analysis",
            Center::Throat => "Communication & Manifestation",
            Center::G => "Identity & Direction",
            Center::Heart => "Willpower & Material World",
            Center::Spleen => "Survival & Intuition",
            Center::Solar => "Emotions & Desires",
            Center::Sacral => "Life Force & Sexuality",
            Center::Root => "Adrenaline & Drive",
        }
    }

    pub fn not_self_theme(self) -> &'static str {
        match self {
            Center::Head => "Mental Pressure",
            Center::Ajna => "Mental Anxiety",
            Center::Throat => "Attention Seeking",
            Center::G => "Searching for Love/Direction",
            Center::Heart => "Proving Worth",
            Center::Spleen => "Fear & Unhealthy Attachments",
            Center::Solar => "Emotional Overwhelm",
            Center::Sacral => "Not Knowing When Enough is Enough",
            Center::Root => "Stress & Hurrying",
        }
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How many disjoint areas of definition a chart carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Definition {
    None,
    Single,
    Split,
    #[serde(rename = "Triple Split")]
    TripleSplit,
    #[serde(rename = "Quadruple Split")]
    QuadrupleSplit,
}

impl Definition {
    /// Maps an area count to its label. Each area spans at least two of the
    /// nine centers, so a count above four cannot arise from the channel
    /// table; debug builds assert on it.
    pub fn from_area_count(areas: usize) -> Definition {
        debug_assert!(areas <= 4, "bodygraph split into {} areas", areas);
        match areas {
            0 => Definition::None,
            1 => Definition::Single,
            2 => Definition::Split,
            3 => Definition::TripleSplit,
            _ => Definition::QuadrupleSplit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Definition::None => "None",
            Definition::Single => "Single",
            Definition::Split => "Split",
            Definition::TripleSplit => "Triple Split",
            Definition::QuadrupleSplit => "Quadruple Split",
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The five aura types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HumanDesignType {
    Generator,
    #[serde(rename = "Manifesting Generator")]
    ManifestingGenerator,
    Projector,
    Manifestor,
    Reflector,
}

impl HumanDesignType {
    pub fn label(self) -> &'static str {
        match self {
            HumanDesignType::Generator => "Generator",
            HumanDesignType::ManifestingGenerator => "Manifesting Generator",
            HumanDesignType::Projector => "Projector",
            HumanDesignType::Manifestor => "Manifestor",
            HumanDesignType::Reflector => "Reflector",
        }
    }

    pub fn strategy(self) -> &'static str {
        match self {
            HumanDesignType::Generator => "To Respond",
            HumanDesignType::ManifestingGenerator => "To Respond, then Inform",
            HumanDesignType::Projector => "Wait for the Invitation",
            HumanDesignType::Manifestor => "To Inform",
            HumanDesignType::Reflector => "Wait a Lunar Cycle",
        }
    }

    pub fn not_self_theme(self) -> &'static str {
        match self {
            HumanDesignType::Generator => "Frustration",
            HumanDesignType::ManifestingGenerator => "Frustration and Anger",
            HumanDesignType::Projector => "Bitterness",
            HumanDesignType::Manifestor => "Anger",
            HumanDesignType::Reflector => "Disappointment",
        }
    }

    pub fn signature(self) -> &'static str {
        match self {
            HumanDesignType::Generator => "Satisfaction",
            HumanDesignType::ManifestingGenerator => "Satisfaction",
            HumanDesignType::Projector => "Success",
            HumanDesignType::Manifestor => "Peace",
            HumanDesignType::Reflector => "Surprise",
        }
    }

    pub fn aura(self) -> &'static str {
        match self {
            HumanDesignType::Generator => "Open and enveloping",
            HumanDesignType::ManifestingGenerator => "Open and enveloping",
            HumanDesignType::Projector => "Focused and absorbing",
            HumanDesignType::Manifestor => "Closed and repelling",
            HumanDesignType::Reflector => "Resistant and sampling",
        }
    }

    pub fn population(self) -> &'static str {
        match self {
            HumanDesignType::Generator => "37%",
            HumanDesignType::ManifestingGenerator => "33%",
            HumanDesignType::Projector => "20%",
            HumanDesignType::Manifestor => "9%",
            HumanDesignType::Reflector => "1%",
        }
    }
}

impl fmt::Display for HumanDesignType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The thirteen chart bodies, in the order charts list them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Earth,
    #[serde(alias = "NorthNode")]
    Rahu,
    #[serde(alias = "SouthNode")]
    Ketu,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub fn iter() -> impl Iterator<Item = Planet> {
        [
            Planet::Sun,
            Planet::Earth,
            Planet::Rahu,
            Planet::Ketu,
            Planet::Moon,
            Planet::Mercury,
            Planet::Venus,
            Planet::Mars,
            Planet::Jupiter,
            Planet::Saturn,
            Planet::Uranus,
            Planet::Neptune,
            Planet::Pluto,
        ]
        .iter()
        .copied()
    }

    pub fn glyph(self) -> char {
        match self {
            Planet::Sun => '\u{2609}',
            Planet::Earth => '\u{2A01}',
            Planet::Rahu => '\u{260A}',
            Planet::Ketu => '\u{260B}',
            Planet::Moon => '\u{263D}',
            Planet::Mercury => '\u{263F}',
            Planet::Venus => '\u{2640}',
            Planet::Mars => '\u{2642}',
            Planet::Jupiter => '\u{2643}',
            Planet::Saturn => '\u{2644}',
            Planet::Uranus => '\u{2645}',
            Planet::Neptune => '\u{2646}',
            Planet::Pluto => '\u{2647}',
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Which computation activated a gate: the birth-time one, the one 88 days
/// prior, or both.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationType {
    Personality,
    Design,
    Both,
}

// ---------------------------
// ## Structures
// ---------------------------

/// A planet's placement in a gate and line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetActivation {
    pub planet: Planet,
    pub gate: u8,
    pub line: u8,
    pub color: u8,
    pub tone: u8,
    pub base: u8,
}

/// One full set of activations, as the calculation service returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Activations {
    pub sun: PlanetActivation,
    pub earth: PlanetActivation,
    pub rahu: PlanetActivation,
    pub ketu: PlanetActivation,
    pub moon: PlanetActivation,
    pub mercury: PlanetActivation,
    pub venus: PlanetActivation,
    pub mars: PlanetActivation,
    pub jupiter: PlanetActivation,
    pub saturn: PlanetActivation,
    pub uranus: PlanetActivation,
    pub neptune: PlanetActivation,
    pub pluto: PlanetActivation,
}

impl Activations {
    pub fn iter(&self) -> impl Iterator<Item = &PlanetActivation> {
        [
            &self.sun,
            &self.earth,
            &self.rahu,
            &self.ketu,
            &self.moon,
            &self.mercury,
            &self.venus,
            &self.mars,
            &self.jupiter,
            &self.saturn,
            &self.uranus,
            &self.neptune,
            &self.pluto,
        ]
        .into_iter()
    }
}

/// A gate with the side(s) of the chart that activated it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateActivation {
    pub gate: u8,
    pub line: u8,
    pub planet: Planet,
    pub activation: ActivationType,
}

/// Merges the personality and design activations into one gate list, one
/// entry per gate, sorted by gate number. A gate present on both sides is
/// marked `Both`.
pub fn active_gates(personality: &Activations, design: &Activations) -> Vec<GateActivation> {
    let mut gates: Vec<GateActivation> = Vec::new();
    for activation in personality.iter() {
        merge_gate(&mut gates, activation, ActivationType::Personality);
    }
    for activation in design.iter() {
        merge_gate(&mut gates, activation, ActivationType::Design);
    }
    gates.sort_by_key(|gate| gate.gate);
    gates
}

fn merge_gate(gates: &mut Vec<GateActivation>, activation: &PlanetActivation, side: ActivationType) {
    if let Some(existing) = gates.iter_mut().find(|gate| gate.gate == activation.gate) {
        if existing.activation != side {
            existing.activation = ActivationType::Both;
        }
        return;
    }
    gates.push(GateActivation {
        gate: activation.gate,
        line: activation.line,
        planet: activation.planet,
        activation: side,
    });
}

#[derive(Debug, Clone, PartialEq)]
pub struct BirthInfo {
    pub name: Option<String>,
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub birth_location: String,
}

/// A fully assembled chart. The definition label and the center lists are
/// derived locally from the active channels, never taken from the service.
#[derive(Debug, Clone)]
pub struct Chart {
    pub birth: BirthInfo,
    pub hd_type: HumanDesignType,
    pub strategy: String,
    pub authority: String,
    pub profile: String,
    pub incarnation_cross: String,
    pub definition: Definition,
    pub channels: Vec<Channel>,
    pub defined_centers: Vec<Center>,
    pub open_centers: Vec<Center>,
    pub active_gates: Vec<GateActivation>,
    pub personality: Activations,
    pub design: Activations,
}
