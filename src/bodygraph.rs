// src/bodygraph.rs
//
// Static bodygraph data: the nine centers with their gates, the 36 channels
// and the circuitry they belong to, and the 64 gate names. This is a closed
// ruleset; nothing here is configurable at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Center;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircuitGroup {
    Individual,
    Collective,
    Tribal,
}

impl fmt::Display for CircuitGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let group_str = match self {
            CircuitGroup::Individual => "Individual",
            CircuitGroup::Collective => "Collective",
            CircuitGroup::Tribal => "Tribal",
        };
        write!(f, "{}", group_str)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Circuit {
    Knowing,
    Logic,
    Sensing,
    Integration,
    Centering,
    Ego,
    Defense,
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let circuit_str = match self {
            Circuit::Knowing => "Knowing",
            Circuit::Logic => "Logic",
            Circuit::Sensing => "Sensing",
            Circuit::Integration => "Integration",
            Circuit::Centering => "Centering",
            Circuit::Ego => "Ego",
            Circuit::Defense => "Defense",
        };
        write!(f, "{}", circuit_str)
    }
}

/// One entry of the channel table. `gates` is canonical: lower gate first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChannelDef {
    pub gates: (u8, u8),
    pub centers: (Center, Center),
    pub name: &'static str,
    pub group: CircuitGroup,
    pub circuit: Circuit,
}

pub const CHANNELS: [ChannelDef; 36] = [
    ChannelDef { gates: (1, 8), centers: (Center::G, Center::Throat), name: "Inspiration", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (2, 14), centers: (Center::G, Center::Sacral), name: "The Beat", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (3, 60), centers: (Center::Sacral, Center::Root), name: "Mutation", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (4, 63), centers: (Center::Head, Center::Ajna), name: "Logic", group: CircuitGroup::Collective, circuit: Circuit::Logic },
    ChannelDef { gates: (5, 15), centers: (Center::G, Center::Sacral), name: "Rhythm", group: CircuitGroup::Collective, circuit: Circuit::Logic },
    ChannelDef { gates: (6, 59), centers: (Center::Solar, Center::Sacral), name: "Intimacy", group: CircuitGroup::Tribal, circuit: Circuit::Defense },
    ChannelDef { gates: (7, 31), centers: (Center::G, Center::Throat), name: "The Alpha", group: CircuitGroup::Collective, circuit: Circuit::Logic },
    ChannelDef { gates: (9, 52), centers: (Center::Sacral, Center::Root), name: "Concentration", group: CircuitGroup::Collective, circuit: Circuit::Logic },
    ChannelDef { gates: (10, 20), centers: (Center::G, Center::Throat), name: "Awakening", group: CircuitGroup::Individual, circuit: Circuit::Integration },
    ChannelDef { gates: (10, 34), centers: (Center::G, Center::Sacral), name: "Exploration", group: CircuitGroup::Individual, circuit: Circuit::Integration },
    ChannelDef { gates: (10, 57), centers: (Center::G, Center::Spleen), name: "Perfected Form", group: CircuitGroup::Individual, circuit: Circuit::Integration },
    ChannelDef { gates: (11, 56), centers: (Center::Ajna, Center::Throat), name: "Curiosity", group: CircuitGroup::Collective, circuit: Circuit::Sensing },
    ChannelDef { gates: (12, 22), centers: (Center::Throat, Center::Solar), name: "Openness", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (13, 33), centers: (Center::G, Center::Throat), name: "The Prodigal", group: CircuitGroup::Collective, circuit: Circuit::Sensing },
    ChannelDef { gates: (16, 48), centers: (Center::Throat, Center::Spleen), name: "The Wavelength", group: CircuitGroup::Collective, circuit: Circuit::Logic },
    ChannelDef { gates: (17, 62), centers: (Center::Ajna, Center::Throat), name: "Acceptance", group: CircuitGroup::Collective, circuit: Circuit::Logic },
    ChannelDef { gates: (18, 58), centers: (Center::Spleen, Center::Root), name: "Judgment", group: CircuitGroup::Collective, circuit: Circuit::Logic },
    ChannelDef { gates: (19, 49), centers: (Center::Solar, Center::Root), name: "Synthesis", group: CircuitGroup::Tribal, circuit: Circuit::Defense },
    ChannelDef { gates: (20, 34), centers: (Center::Throat, Center::Sacral), name: "Charisma", group: CircuitGroup::Individual, circuit: Circuit::Integration },
    ChannelDef { gates: (20, 57), centers: (Center::Throat, Center::Spleen), name: "The Brainwave", group: CircuitGroup::Individual, circuit: Circuit::Integration },
    ChannelDef { gates: (21, 45), centers: (Center::Heart, Center::Throat), name: "Money", group: CircuitGroup::Tribal, circuit: Circuit::Ego },
    ChannelDef { gates: (23, 43), centers: (Center::Ajna, Center::Throat), name: "Structuring", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (24, 61), centers: (Center::Head, Center::Ajna), name: "Awareness", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (25, 51), centers: (Center::G, Center::Heart), name: "Initiation", group: CircuitGroup::Individual, circuit: Circuit::Centering },
    ChannelDef { gates: (26, 44), centers: (Center::Heart, Center::Spleen), name: "Surrender", group: CircuitGroup::Tribal, circuit: Circuit::Ego },
    ChannelDef { gates: (27, 50), centers: (Center::Spleen, Center::Sacral), name: "Preservation", group: CircuitGroup::Tribal, circuit: Circuit::Defense },
    ChannelDef { gates: (28, 38), centers: (Center::Spleen, Center::Root), name: "Struggle", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (29, 46), centers: (Center::G, Center::Sacral), name: "Discovery", group: CircuitGroup::Collective, circuit: Circuit::Sensing },
    ChannelDef { gates: (30, 41), centers: (Center::Solar, Center::Root), name: "Recognition", group: CircuitGroup::Collective, circuit: Circuit::Sensing },
    ChannelDef { gates: (32, 54), centers: (Center::Spleen, Center::Root), name: "Transformation", group: CircuitGroup::Tribal, circuit: Circuit::Ego },
    ChannelDef { gates: (34, 57), centers: (Center::Sacral, Center::Spleen), name: "Power", group: CircuitGroup::Individual, circuit: Circuit::Integration },
    ChannelDef { gates: (35, 36), centers: (Center::Throat, Center::Solar), name: "Transitoriness", group: CircuitGroup::Collective, circuit: Circuit::Sensing },
    ChannelDef { gates: (37, 40), centers: (Center::Heart, Center::Solar), name: "Community", group: CircuitGroup::Tribal, circuit: Circuit::Ego },
    ChannelDef { gates: (39, 55), centers: (Center::Solar, Center::Root), name: "Emoting", group: CircuitGroup::Individual, circuit: Circuit::Knowing },
    ChannelDef { gates: (42, 53), centers: (Center::Sacral, Center::Root), name: "Maturation", group: CircuitGroup::Collective, circuit: Circuit::Sensing },
    ChannelDef { gates: (47, 64), centers: (Center::Head, Center::Ajna), name: "Abstraction", group: CircuitGroup::Collective, circuit: Circuit::Sensing },
];

/// Looks up the channel formed by two gates, in either order.
pub fn channel_between(a: u8, b: u8) -> Option<&'static ChannelDef> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    CHANNELS.iter().find(|channel| channel.gates == (low, high))
}

/// The gates hosted by a center, in bodygraph display order.
pub fn gates_of(center: Center) -> &'static [u8] {
    match center {
        Center::Head => &[64, 61, 63],
        Center::Ajna => &[47, 24, 4, 17, 11, 43],
        Center::Throat => &[62, 23, 56, 16, 20, 31, 8, 33, 35, 12, 45],
        Center::G => &[1, 7, 13, 10, 25, 15, 46, 2],
        Center::Heart => &[21, 51, 26, 40],
        Center::Spleen => &[48, 57, 44, 50, 32, 28, 18],
        Center::Solar => &[36, 22, 37, 6, 49, 55, 30],
        Center::Sacral => &[5, 14, 29, 59, 27, 34, 42, 3, 9],
        Center::Root => &[53, 60, 52, 19, 54, 38, 58, 39, 41],
    }
}

pub fn center_of_gate(gate: u8) -> Option<Center> {
    Center::all().find(|center| gates_of(*center).contains(&gate))
}

/// The I-Ching hexagram name of a gate.
pub fn gate_name(gate: u8) -> Option<&'static str> {
    let name = match gate {
        1 => "The Creative",
        2 => "The Receptive",
        3 => "Ordering",
        4 => "Youthful Folly",
        5 => "Waiting",
        6 => "Conflict",
        7 => "The Army",
        8 => "Contribution",
        9 => "Focus",
        10 => "Treading",
        11 => "Peace",
        12 => "Caution",
        13 => "The Listener",
        14 => "Power Skills",
        15 => "Extremes",
        16 => "Skills",
        17 => "Following",
        18 => "Correction",
        19 => "Wanting",
        20 => "The Now",
        21 => "Hunter/Huntress",
        22 => "Openness",
        23 => "Assimilation",
        24 => "Returning",
        25 => "Innocence",
        26 => "The Egoist",
        27 => "Nourishment",
        28 => "The Game Player",
        29 => "Saying Yes",
        30 => "Recognition of Feelings",
        31 => "Leading",
        32 => "Continuity",
        33 => "Privacy",
        34 => "Power",
        35 => "Change",
        36 => "Crisis",
        37 => "Friendship",
        38 => "The Fighter",
        39 => "The Provocateur",
        40 => "Aloneness",
        41 => "Contraction",
        42 => "Growth",
        43 => "Insight",
        44 => "Alertness",
        45 => "The Gatherer",
        46 => "Determination of Self",
        47 => "Realization",
        48 => "Depth",
        49 => "Rejection",
        50 => "Values",
        51 => "Shock",
        52 => "Stillness",
        53 => "Beginnings",
        54 => "Ambition",
        55 => "Spirit",
        56 => "Stimulation",
        57 => "Intuition",
        58 => "Aliveness",
        59 => "Sexuality",
        60 => "Acceptance",
        61 => "Mystery",
        62 => "Detail",
        63 => "Doubt",
        64 => "Confusion",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_channel_table_is_canonical() {
        let mut seen = HashSet::new();
        for channel in &CHANNELS {
            let (low, high) = channel.gates;
            assert!(low < high, "channel {}-{} is not canonically ordered", low, high);
            assert!((1..=64).contains(&low) && (1..=64).contains(&high));
            assert!(seen.insert(channel.gates), "duplicate channel {}-{}", low, high);
        }
        assert_eq!(CHANNELS.len(), 36);
    }

    #[test]
    fn test_channel_centers_match_gate_hosting() {
        for channel in &CHANNELS {
            let (low, high) = channel.gates;
            let hosts = (center_of_gate(low).unwrap(), center_of_gate(high).unwrap());
            let (a, b) = channel.centers;
            assert!(
                hosts == (a, b) || hosts == (b, a),
                "channel {}-{} claims {:?} but its gates live in {:?}",
                low,
                high,
                channel.centers,
                hosts
            );
        }
    }

    #[test]
    fn test_every_gate_has_exactly_one_center() {
        let mut seen = HashSet::new();
        for center in Center::all() {
            for gate in gates_of(center) {
                assert!(seen.insert(*gate), "gate {} hosted by two centers", gate);
            }
        }
        assert_eq!(seen.len(), 64);
        for gate in 1..=64u8 {
            assert!(center_of_gate(gate).is_some());
        }
        assert_eq!(center_of_gate(0), None);
        assert_eq!(center_of_gate(65), None);
    }

    #[test]
    fn test_channel_lookup_is_order_insensitive() {
        let forward = channel_between(64, 47).unwrap();
        let reverse = channel_between(47, 64).unwrap();
        assert_eq!(forward.gates, (47, 64));
        assert_eq!(forward, reverse);
        assert_eq!(forward.centers, (Center::Head, Center::Ajna));
        assert!(channel_between(2, 2).is_none());
        assert!(channel_between(1, 64).is_none());
    }

    #[test]
    fn test_gate_names_cover_all_gates() {
        for gate in 1..=64u8 {
            assert!(gate_name(gate).is_some(), "gate {} has no name", gate);
        }
        assert_eq!(gate_name(0), None);
        assert_eq!(gate_name(65), None);
        assert_eq!(gate_name(1), Some("The Creative"));
        assert_eq!(gate_name(64), Some("Confusion"));
    }
}
