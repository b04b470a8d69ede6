use super::position::Position;

/// The item a DIG command is meant to bury or bring back.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum DigIntent {
    /// Bury the radar currently carried
    Radar,
    /// Bury the trap currently carried
    Trap,
    /// Extract one unit of ore
    Ore,
}

/// One robot order for the current turn.
///
/// Each variant only carries the fields relevant to it, so a MOVE can never
/// hold a dig intent and a REQUEST never holds a target.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Command {
    #[default]
    Wait,
    Move(Position),
    Dig(Position, DigIntent),
    RequestRadar,
    RequestTrap,
}

impl Command {
    pub fn target(&self) -> Option<Position> {
        match self {
            Command::Move(target) | Command::Dig(target, _) => Some(*target),
            _ => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Wait => write!(f, "WAIT"),
            Command::Move(p) => write!(f, "MOVE {} {}", p.x, p.y),
            Command::Dig(p, _) => write!(f, "DIG {} {}", p.x, p.y),
            Command::RequestRadar => write!(f, "REQUEST RADAR"),
            Command::RequestTrap => write!(f, "REQUEST TRAP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_text() {
        let p = Position { x: 3, y: 12 };

        assert_eq!("WAIT", Command::Wait.to_string());
        assert_eq!("MOVE 3 12", Command::Move(p).to_string());
        assert_eq!("DIG 3 12", Command::Dig(p, DigIntent::Ore).to_string());
        assert_eq!("DIG 3 12", Command::Dig(p, DigIntent::Radar).to_string());
        assert_eq!("REQUEST RADAR", Command::RequestRadar.to_string());
        assert_eq!("REQUEST TRAP", Command::RequestTrap.to_string());
    }

    #[test]
    fn test_default_is_wait() {
        assert_eq!(Command::Wait, Command::default());
        assert_eq!(None, Command::default().target());
    }
}
