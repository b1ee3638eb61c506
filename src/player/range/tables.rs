use std::sync::LazyLock;

/// the 169 starting-hand classes ordered by heads-up all-in equity
/// against a random holding, best first. ring-game tables are derived
/// from this ordering by promoting hands that play well multiway
/// (pairs, suited and connected cards) and demoting big offsuit cards.
#[rustfmt::skip]
const VS_RANDOM: [&str; 169] = [
    "AA", "KK", "QQ", "JJ", "TT", "99", "88", "AKs", "77", "AQs",
    "AJs", "AKo", "ATs", "AQo", "AJo", "KQs", "66", "A9s", "ATo", "KJs",
    "A8s", "KTs", "KQo", "A7s", "A9o", "KJo", "55", "QJs", "K9s", "A5s",
    "A6s", "A8o", "KTo", "QTs", "A4s", "A7o", "K8s", "A3s", "QJo", "K9o",
    "A5o", "A6o", "Q9s", "K7s", "JTs", "A2s", "QTo", "44", "A4o", "K6s",
    "K8o", "Q8s", "A3o", "K5s", "J9s", "Q9o", "JTo", "K7o", "A2o", "K4s",
    "Q7s", "K6o", "K3s", "T9s", "J8s", "33", "Q6s", "Q8o", "K5o", "J9o",
    "K2s", "Q5s", "T8s", "K4o", "J7s", "Q4s", "Q7o", "T9o", "J8o", "K3o",
    "Q6o", "Q3s", "98s", "T7s", "J6s", "K2o", "22", "Q2s", "Q5o", "J5s",
    "T8o", "J7o", "Q4o", "97s", "J4s", "T6s", "J3s", "Q3o", "98o", "87s",
    "T7o", "J6o", "96s", "J2s", "Q2o", "T5s", "J5o", "T4s", "97o", "86s",
    "J4o", "T6o", "95s", "T3s", "76s", "J3o", "87o", "T2s", "85s", "96o",
    "J2o", "T5o", "94s", "75s", "T4o", "93s", "86o", "65s", "84s", "95o",
    "T3o", "92s", "76o", "74s", "T2o", "54s", "85o", "64s", "83s", "94o",
    "75o", "82s", "73s", "93o", "65o", "53s", "63s", "84o", "92o", "43s",
    "74o", "72s", "54o", "64o", "52s", "62s", "83o", "42s", "82o", "73o",
    "53o", "63o", "32s", "43o", "72o", "52o", "62o", "42o", "32o",
];

fn combos_in(class: &str) -> usize {
    match class.as_bytes() {
        [a, b] if a == b => 6,
        [.., b's'] => 4,
        _ => 12,
    }
}

/// how much a class moves up the ring ordering relative to heads-up
fn promotion(class: &str) -> f64 {
    let bytes = class.as_bytes();
    let rank = |c: u8| "23456789TJQKA".find(c as char).unwrap() as i32;
    let (hi, lo) = (rank(bytes[0]), rank(bytes[1]));
    if hi == lo {
        return 15.0;
    }
    let gap = hi - lo;
    let suited = bytes[2] == b's';
    match (suited, gap) {
        (true, 1) => 8.0,
        (true, 2) => 5.0,
        (true, _) => 3.0,
        // big offsuit cards shrink in multiway pots
        (false, _) if lo >= rank(b'T') => -6.0,
        _ => 0.0,
    }
}

fn ordering(multiway: f64) -> Vec<&'static str> {
    let mut classes: Vec<(f64, &str)> = VS_RANDOM
        .iter()
        .enumerate()
        .map(|(i, class)| (i as f64 - multiway * promotion(class), *class))
        .collect();
    classes.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    classes.into_iter().map(|(_, class)| class).collect()
}

static ORDER_2_PLAYERS: LazyLock<Vec<&'static str>> = LazyLock::new(|| ordering(0.0));
static ORDER_3_PLAYERS: LazyLock<Vec<&'static str>> = LazyLock::new(|| ordering(0.35));
static ORDER_4_PLAYERS: LazyLock<Vec<&'static str>> = LazyLock::new(|| ordering(0.6));
static ORDER_MORE_4_PLAYERS: LazyLock<Vec<&'static str>> = LazyLock::new(|| ordering(1.0));

fn order_for(n_players: usize) -> &'static [&'static str] {
    match n_players {
        0..=2 => &ORDER_2_PLAYERS,
        3 => &ORDER_3_PLAYERS,
        4 => &ORDER_4_PLAYERS,
        _ => &ORDER_MORE_4_PLAYERS,
    }
}

/// where a concrete holding sits in the table's ordering, as the
/// cumulative top-percent needed to include it. lower is stronger.
pub fn hand_percentile(n_players: usize, hole: crate::cards::hole::Hole) -> f64 {
    let class = class_of(hole);
    let order = order_for(n_players);
    let mut combos = 0usize;
    for entry in order {
        combos += combos_in(entry);
        if *entry == class {
            break;
        }
    }
    combos as f64 * 100.0 / 1326.0
}

fn class_of(hole: crate::cards::hole::Hole) -> String {
    let (a, b) = (hole.first(), hole.second());
    let (hi, lo) = if a.rank() >= b.rank() { (a, b) } else { (b, a) };
    if hi.rank() == lo.rank() {
        format!("{}{}", hi.rank(), lo.rank())
    } else if hi.suit() == lo.suit() {
        format!("{}{}s", hi.rank(), lo.rank())
    } else {
        format!("{}{}o", hi.rank(), lo.rank())
    }
}

/// entry k is the textual top-k% opening range
fn build(multiway: f64) -> Vec<String> {
    let order = ordering(multiway);
    let mut table = Vec::with_capacity(101);
    table.push(String::new());
    for percent in 1..=100usize {
        let mut text = Vec::new();
        let mut combos = 0usize;
        for class in order.iter() {
            if combos * 100 >= percent * 1326 {
                break;
            }
            text.push(*class);
            combos += combos_in(class);
        }
        table.push(text.join(","));
    }
    table
}

static TOP_RANGE_2_PLAYERS: LazyLock<Vec<String>> = LazyLock::new(|| build(0.0));
static TOP_RANGE_3_PLAYERS: LazyLock<Vec<String>> = LazyLock::new(|| build(0.35));
static TOP_RANGE_4_PLAYERS: LazyLock<Vec<String>> = LazyLock::new(|| build(0.6));
static TOP_RANGE_MORE_4_PLAYERS: LazyLock<Vec<String>> = LazyLock::new(|| build(1.0));

/// top-percent lookup, clamped to [1, 100]
pub fn top_range(n_players: usize, percent: f64) -> &'static str {
    let percent = percent.ceil().clamp(1.0, 100.0) as usize;
    let table = match n_players {
        0..=2 => &TOP_RANGE_2_PLAYERS,
        3 => &TOP_RANGE_3_PLAYERS,
        4 => &TOP_RANGE_4_PLAYERS,
        _ => &TOP_RANGE_MORE_4_PLAYERS,
    };
    &table[percent]
}

/// fallback opening percentiles when a player has too few observed
/// hands for their statistics to mean anything
pub fn standard_raising_range(n_players: usize) -> f64 {
    match n_players {
        0..=2 => 39.0,
        3 => 36.0,
        4 => 33.0,
        5 => 30.0,
        6 => 27.0,
        7 => 24.0,
        8 => 21.0,
        9 => 18.0,
        _ => 15.0,
    }
}

pub fn standard_calling_range(n_players: usize) -> f64 {
    standard_raising_range(n_players) + 5.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::range::grammar::parse_combos;

    #[test]
    fn ordering_covers_every_class_once() {
        assert_eq!(VS_RANDOM.len(), 169);
        let total: usize = VS_RANDOM.iter().map(|c| combos_in(c)).sum();
        assert_eq!(total, 1326);
        let mut seen = std::collections::BTreeSet::new();
        for class in VS_RANDOM {
            assert!(seen.insert(class), "duplicate class {}", class);
        }
    }

    #[test]
    fn every_table_entry_parses() {
        for n in [2, 3, 4, 9] {
            for percent in [1.0, 25.0, 50.0, 100.0] {
                let text = top_range(n, percent);
                assert!(parse_combos(text).is_ok(), "unparseable entry: {}", text);
            }
        }
    }

    #[test]
    fn tables_grow_with_percent() {
        for n in [2, 5] {
            let mut previous = 0;
            for percent in 1..=100 {
                let combos = parse_combos(top_range(n, percent as f64)).unwrap().len();
                assert!(combos >= previous);
                previous = combos;
            }
            assert_eq!(previous, 1326);
        }
    }

    #[test]
    fn percent_one_is_premium() {
        let text = top_range(9, 1.0);
        assert!(text.contains("AA"));
        assert!(!text.contains("72o"));
    }

    #[test]
    fn ring_tables_promote_multiway_hands() {
        let hu = ordering(0.0);
        let ring = ordering(1.0);
        let index = |order: &[&str], class: &str| {
            order.iter().position(|c| *c == class).unwrap()
        };
        assert!(index(&ring, "76s") < index(&hu, "76s"));
        assert!(index(&ring, "ATo") > index(&hu, "ATo"));
    }

    #[test]
    fn clamps_out_of_range_percentiles() {
        assert_eq!(top_range(2, -5.0), top_range(2, 1.0));
        assert_eq!(top_range(2, 250.0), top_range(2, 100.0));
    }

    #[test]
    fn standard_ranges_tighten_with_table_size() {
        assert_eq!(standard_raising_range(2), 39.0);
        assert_eq!(standard_raising_range(10), 15.0);
        assert_eq!(standard_calling_range(6), 32.0);
    }

    #[test]
    fn percentiles_track_hand_quality() {
        use crate::cards::hole::Hole;
        let aces = hand_percentile(6, Hole::try_from("AsAh").unwrap());
        let suited = hand_percentile(6, Hole::try_from("Th9h").unwrap());
        let trash = hand_percentile(6, Hole::try_from("7d2c").unwrap());
        assert!(aces < 1.0);
        assert!(aces < suited);
        assert!(suited < trash);
        assert!(trash > 90.0);
    }
}
