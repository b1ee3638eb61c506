/// table position, ordered from earliest to latest to act postflop.
/// blinds sort first: they act last preflop but out of position after.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Position {
    SmallBlind = 0,
    BigBlind = 1,
    UnderTheGun = 2,
    UtgPlusOne = 3,
    UtgPlusTwo = 4,
    Middle = 5,
    MiddlePlusOne = 6,
    Late = 7,
    Cutoff = 8,
    Button = 9,
}

impl Position {
    /// seat's clockwise offset from the dealer, given table size.
    /// heads-up the dealer posts the small blind and the other seat
    /// the big blind.
    pub fn from_offset(offset: usize, n_players: usize) -> Self {
        assert!(n_players >= 2 && offset < n_players, "bad seat offset");
        if n_players == 2 {
            return match offset {
                0 => Self::Button,
                _ => Self::BigBlind,
            };
        }
        match offset {
            0 => Self::Button,
            1 => Self::SmallBlind,
            2 => Self::BigBlind,
            _ => {
                let remaining = n_players - 3;
                let index = offset - 3;
                let from_end = remaining - 1 - index;
                match (from_end, index) {
                    (0, _) if remaining >= 2 => Self::Cutoff,
                    (1, _) if remaining >= 3 => Self::Late,
                    (_, 0) => Self::UnderTheGun,
                    (_, 1) => Self::UtgPlusOne,
                    (_, 2) => Self::UtgPlusTwo,
                    (_, 3) => Self::Middle,
                    _ => Self::MiddlePlusOne,
                }
            }
        }
    }

    pub fn is_early(&self) -> bool {
        matches!(self, Self::UnderTheGun | Self::UtgPlusOne | Self::UtgPlusTwo)
    }
    pub fn is_late(&self) -> bool {
        matches!(self, Self::Late | Self::Cutoff | Self::Button)
    }
    pub fn is_blind(&self) -> bool {
        matches!(self, Self::SmallBlind | Self::BigBlind)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::SmallBlind => write!(f, "SB"),
            Self::BigBlind => write!(f, "BB"),
            Self::UnderTheGun => write!(f, "UTG"),
            Self::UtgPlusOne => write!(f, "UTG+1"),
            Self::UtgPlusTwo => write!(f, "UTG+2"),
            Self::Middle => write!(f, "MP"),
            Self::MiddlePlusOne => write!(f, "MP+1"),
            Self::Late => write!(f, "LP"),
            Self::Cutoff => write!(f, "CO"),
            Self::Button => write!(f, "BTN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_dealer_is_button() {
        assert_eq!(Position::from_offset(0, 2), Position::Button);
        assert_eq!(Position::from_offset(1, 2), Position::BigBlind);
    }

    #[test]
    fn four_handed_has_a_lone_utg() {
        let positions: Vec<Position> = (0..4).map(|o| Position::from_offset(o, 4)).collect();
        assert_eq!(
            positions,
            vec![
                Position::Button,
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
            ]
        );
    }

    #[test]
    fn full_ring_ends_late_cutoff() {
        let positions: Vec<Position> = (0..9).map(|o| Position::from_offset(o, 9)).collect();
        assert_eq!(
            positions,
            vec![
                Position::Button,
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
                Position::UtgPlusOne,
                Position::UtgPlusTwo,
                Position::Middle,
                Position::Late,
                Position::Cutoff,
            ]
        );
    }

    #[test]
    fn position_order_reflects_lateness() {
        assert!(Position::Button > Position::Cutoff);
        assert!(Position::Cutoff > Position::UnderTheGun);
        assert!(Position::UnderTheGun.is_early());
        assert!(Position::Button.is_late());
    }
}
