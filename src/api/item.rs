/// What a robot holds in its cargo slot.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Item {
    #[default]
    None,
    Radar,
    Trap,
    Ore,
}

impl Item {
    /// Decodes the wire representation (-1 none, 2 radar, 3 trap, 4 ore)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::None),
            2 => Some(Self::Radar),
            3 => Some(Self::Trap),
            4 => Some(Self::Ore),
            _ => None,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Item::None => "NONE",
            Item::Radar => "RADAR",
            Item::Trap => "TRAP",
            Item::Ore => "ORE",
        };
        write!(f, "{text}")
    }
}
