// src/definition.rs
//
// Groups the activated channels of a chart into disjoint areas of definition
// and labels the chart accordingly (None / Single / Split / Triple Split /
// Quadruple Split). An area is a set of centers that reach one another
// through activated channels; two centers in different areas never connect.

use std::fmt;

use crate::bodygraph;
use crate::{Center, Definition};

/// An activated channel, held as a canonical unordered gate pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    low: u8,
    high: u8,
}

impl Channel {
    pub fn new(a: u8, b: u8) -> Channel {
        if a <= b {
            Channel { low: a, high: b }
        } else {
            Channel { low: b, high: a }
        }
    }

    /// Parses a `"<gate>-<gate>"` identifier. Returns `None` for anything
    /// that is not two gate numbers in 1..=64, so malformed input never
    /// reaches the classifier.
    pub fn parse(s: &str) -> Option<Channel> {
        let (a, b) = s.split_once('-')?;
        let a: u8 = a.trim().parse().ok()?;
        let b: u8 = b.trim().parse().ok()?;
        if !(1..=64).contains(&a) || !(1..=64).contains(&b) {
            return None;
        }
        Some(Channel::new(a, b))
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    /// The two centers this channel connects, if the gate pair is one of
    /// the 36 recognized channels.
    pub fn centers(&self) -> Option<(Center, Center)> {
        bodygraph::channel_between(self.low, self.high).map(|def| def.centers)
    }

    /// The full table entry for this channel, if recognized.
    pub fn info(&self) -> Option<&'static bodygraph::ChannelDef> {
        bodygraph::channel_between(self.low, self.high)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Parses a list of channel identifiers, skipping malformed entries.
pub fn parse_channels<'a, I>(ids: I) -> Vec<Channel>
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter().filter_map(Channel::parse).collect()
}

// Disjoint-set forest over the nine centers. Roots are kept at the lowest
// center index so grouping stays in bodygraph order.
struct CenterForest {
    parent: [usize; Center::COUNT],
}

impl CenterForest {
    fn new() -> CenterForest {
        let mut parent = [0; Center::COUNT];
        for (i, slot) in parent.iter_mut().enumerate() {
            *slot = i;
        }
        CenterForest { parent }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            let (low, high) = if root_a < root_b { (root_a, root_b) } else { (root_b, root_a) };
            self.parent[high] = low;
        }
    }
}

/// The disjoint areas of definition formed by the given channels.
///
/// Unrecognized gate pairs contribute nothing. Areas are ordered by their
/// first center in bodygraph order, and so are the centers inside each area.
pub fn areas_of_definition<I>(channels: I) -> Vec<Vec<Center>>
where
    I: IntoIterator<Item = Channel>,
{
    let mut forest = CenterForest::new();
    let mut connected = [false; Center::COUNT];

    for channel in channels {
        if let Some((a, b)) = channel.centers() {
            connected[a.index()] = true;
            connected[b.index()] = true;
            forest.union(a.index(), b.index());
        }
    }

    let mut area_of_root: [Option<usize>; Center::COUNT] = [None; Center::COUNT];
    let mut areas: Vec<Vec<Center>> = Vec::new();
    for center in Center::all() {
        if !connected[center.index()] {
            continue;
        }
        let root = forest.find(center.index());
        match area_of_root[root] {
            Some(area) => areas[area].push(center),
            None => {
                area_of_root[root] = Some(areas.len());
                areas.push(vec![center]);
            }
        }
    }
    areas
}

/// Labels a chart by the number of disjoint areas its channels form.
pub fn classify_definition<I>(channels: I) -> Definition
where
    I: IntoIterator<Item = Channel>,
{
    Definition::from_area_count(areas_of_definition(channels).len())
}

/// Centers connected by at least one recognized channel, in bodygraph order.
pub fn defined_centers<I>(channels: I) -> Vec<Center>
where
    I: IntoIterator<Item = Channel>,
{
    let connected = connected_centers(channels);
    Center::all().filter(|center| connected[center.index()]).collect()
}

/// Centers not touched by any recognized channel, in bodygraph order.
pub fn open_centers<I>(channels: I) -> Vec<Center>
where
    I: IntoIterator<Item = Channel>,
{
    let connected = connected_centers(channels);
    Center::all().filter(|center| !connected[center.index()]).collect()
}

fn connected_centers<I>(channels: I) -> [bool; Center::COUNT]
where
    I: IntoIterator<Item = Channel>,
{
    let mut connected = [false; Center::COUNT];
    for channel in channels {
        if let Some((a, b)) = channel.centers() {
            connected[a.index()] = true;
            connected[b.index()] = true;
        }
    }
    connected
}
