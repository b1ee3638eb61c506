use crate::Chips;
use crate::PlayerId;

/// one seat's stake in the settlement
#[derive(Debug, Clone)]
pub struct ShowdownEntry {
    /// clockwise seat index, used for remainder assignment
    pub seat: usize,
    pub player: PlayerId,
    /// chips committed this hand
    pub contribution: Chips,
    pub folded: bool,
    pub ranking: u32,
}

/// settles a finished hand into per-seat rewards using side-pot
/// levels. works bottom-up over the distinct contribution amounts:
/// each layer is funded by everyone who reached it and is won by the
/// best-ranking unfolded hand among those who reached it. integer
/// split remainders go to the eligible winner closest clockwise from
/// the dealer. the sum of rewards always equals the sum of
/// contributions.
#[derive(Debug)]
pub struct Showdown {
    entries: Vec<ShowdownEntry>,
    dealer_seat: usize,
    n_seats: usize,
}

impl Showdown {
    pub fn new(entries: Vec<ShowdownEntry>, dealer_seat: usize, n_seats: usize) -> Self {
        Self {
            entries,
            dealer_seat,
            n_seats,
        }
    }

    /// rewards per entry, same order as the input
    pub fn settle(self) -> Vec<(PlayerId, Chips)> {
        let mut rewards: Vec<Chips> = vec![0; self.entries.len()];
        let mut residual: Chips = 0;

        let mut levels: Vec<Chips> = self
            .entries
            .iter()
            .map(|e| e.contribution)
            .filter(|c| *c > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut floor: Chips = 0;
        for level in levels {
            let layer: Chips = self
                .entries
                .iter()
                .map(|e| (e.contribution.min(level) - floor).max(0))
                .sum();
            let eligible: Vec<usize> = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| !e.folded && e.contribution >= level)
                .map(|(i, _)| i)
                .collect();
            match self.best_of(&eligible) {
                Some(best) => {
                    let winners: Vec<usize> = eligible
                        .into_iter()
                        .filter(|i| self.entries[*i].ranking == best)
                        .collect();
                    let share = layer / winners.len() as Chips;
                    let remainder = layer - share * winners.len() as Chips;
                    for index in &winners {
                        rewards[*index] += share;
                    }
                    if remainder > 0 {
                        rewards[self.closest_clockwise(&winners)] += remainder;
                    }
                }
                None => residual += layer,
            }
            floor = level;
        }

        // money nobody was eligible for splits across all rewarded seats
        if residual > 0 {
            let winners: Vec<usize> = rewards
                .iter()
                .enumerate()
                .filter(|(_, r)| **r > 0)
                .map(|(i, _)| i)
                .collect();
            if winners.is_empty() {
                // degenerate: hand everything back pro rata
                for (index, entry) in self.entries.iter().enumerate() {
                    rewards[index] += entry.contribution;
                }
            } else {
                let share = residual / winners.len() as Chips;
                let remainder = residual - share * winners.len() as Chips;
                for index in &winners {
                    rewards[*index] += share;
                }
                rewards[self.closest_clockwise(&winners)] += remainder;
            }
        }

        self.entries
            .iter()
            .zip(rewards)
            .map(|(e, r)| (e.player, r))
            .collect()
    }

    fn best_of(&self, eligible: &[usize]) -> Option<u32> {
        eligible.iter().map(|i| self.entries[*i].ranking).max()
    }

    /// entry index whose seat comes first going clockwise from the
    /// seat after the dealer
    fn closest_clockwise(&self, candidates: &[usize]) -> usize {
        *candidates
            .iter()
            .min_by_key(|i| {
                (self.entries[**i].seat + self.n_seats - self.dealer_seat - 1) % self.n_seats
            })
            .expect("candidates not empty")
    }
}

/// reveal order at showdown: the river's last aggressor first (or
/// the first live seat left of the dealer when it checked through),
/// then clockwise around the table.
pub fn reveal_order(
    live_seats: &[(usize, PlayerId)],
    n_seats: usize,
    dealer_seat: usize,
    last_aggressor: Option<PlayerId>,
) -> Vec<PlayerId> {
    if live_seats.is_empty() {
        return Vec::new();
    }
    let start_seat = last_aggressor
        .and_then(|id| live_seats.iter().find(|(_, p)| *p == id))
        .map(|(s, _)| *s);
    let mut order: Vec<(usize, PlayerId)> = live_seats.to_vec();
    let origin = match start_seat {
        Some(seat) => seat,
        None => {
            // first live player clockwise from the dealer
            order
                .iter()
                .map(|(s, _)| *s)
                .min_by_key(|s| (*s + n_seats - dealer_seat - 1) % n_seats)
                .expect("live seats not empty")
        }
    };
    order.sort_by_key(|(s, _)| (*s + n_seats - origin) % n_seats);
    order.into_iter().map(|(_, p)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(seat: usize, contribution: Chips, folded: bool, ranking: u32) -> ShowdownEntry {
        ShowdownEntry {
            seat,
            player: seat,
            contribution,
            folded,
            ranking,
        }
    }

    fn total(rewards: &[(PlayerId, Chips)]) -> Chips {
        rewards.iter().map(|(_, r)| r).sum()
    }

    #[test]
    fn single_winner_scoops() {
        let rewards = Showdown::new(
            vec![
                entry(0, 100, false, 5),
                entry(1, 100, false, 9),
                entry(2, 100, true, 0),
            ],
            0,
            3,
        )
        .settle();
        assert_eq!(rewards, vec![(0, 0), (1, 300), (2, 0)]);
    }

    #[test]
    fn ties_split_evenly() {
        let rewards = Showdown::new(
            vec![entry(0, 100, false, 7), entry(1, 100, false, 7)],
            0,
            2,
        )
        .settle();
        assert_eq!(rewards, vec![(0, 100), (1, 100)]);
    }

    #[test]
    fn odd_chip_goes_left_of_dealer() {
        let rewards = Showdown::new(
            vec![
                entry(0, 101, false, 7),
                entry(1, 101, false, 7),
                entry(2, 101, false, 1),
            ],
            2,
            3,
        )
        .settle();
        // 303 split two ways: 151 each, odd chip to seat 0 (left of dealer 2)
        assert_eq!(rewards, vec![(0, 152), (1, 151), (2, 0)]);
        assert_eq!(total(&rewards), 303);
    }

    #[test]
    fn spec_side_pot_scenario() {
        // stacks (100, 200, 500); contributions (100, 200, 200);
        // the short stack holds the best hand
        let rewards = Showdown::new(
            vec![
                entry(0, 100, false, 9),
                entry(1, 200, false, 5),
                entry(2, 200, false, 7),
            ],
            0,
            3,
        )
        .settle();
        // main pot 300 to seat 0; side pot 200 to the best of seats 1, 2
        assert_eq!(rewards, vec![(0, 300), (1, 0), (2, 200)]);
        assert_eq!(total(&rewards), 500);
    }

    #[test]
    fn middle_stack_wins_both_levels_it_reached() {
        let rewards = Showdown::new(
            vec![
                entry(0, 100, false, 5),
                entry(1, 200, false, 9),
                entry(2, 200, false, 7),
            ],
            0,
            3,
        )
        .settle();
        assert_eq!(rewards, vec![(0, 0), (1, 500), (2, 0)]);
    }

    #[test]
    fn folded_money_funds_the_pot_but_never_wins() {
        let rewards = Showdown::new(
            vec![
                entry(0, 300, true, 99),
                entry(1, 300, false, 5),
                entry(2, 300, false, 7),
            ],
            0,
            3,
        )
        .settle();
        assert_eq!(rewards, vec![(0, 0), (1, 0), (2, 900)]);
    }

    #[test]
    fn three_way_all_in_ladder() {
        // contributions 50 < 150 < 400, best hand worst stack order
        let rewards = Showdown::new(
            vec![
                entry(0, 50, false, 9),
                entry(1, 150, false, 7),
                entry(2, 400, false, 5),
            ],
            0,
            3,
        )
        .settle();
        // level 50: 150 to seat 0; level 150: 200 to seat 1; rest back to seat 2
        assert_eq!(rewards, vec![(0, 150), (1, 200), (2, 250)]);
        assert_eq!(total(&rewards), 600);
    }

    #[test]
    fn reveal_starts_at_the_aggressor() {
        let live = vec![(0, 0), (2, 2), (4, 4)];
        assert_eq!(reveal_order(&live, 6, 0, Some(2)), vec![2, 4, 0]);
    }

    #[test]
    fn checked_through_river_reveals_left_of_dealer() {
        let live = vec![(0, 0), (2, 2), (4, 4)];
        assert_eq!(reveal_order(&live, 6, 3, None), vec![4, 0, 2]);
    }
}
