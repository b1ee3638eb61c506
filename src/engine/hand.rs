use crate::Chips;
use crate::MAX_INVALID_ACTIONS;
use crate::PlayerId;
use crate::cards::board::Board;
use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::cards::hand::Hand as CardSet;
use crate::cards::street::Street;
use crate::engine::action::ActionType;
use crate::engine::action::PlayerAction;
use crate::engine::error::EngineError;
use crate::engine::history::HandHistory;
use crate::engine::processor;
use crate::engine::showdown;
use crate::engine::showdown::Showdown;
use crate::engine::showdown::ShowdownEntry;
use crate::engine::state::GameState;
use crate::player::context::CurrentHandContext;
use crate::player::context::HeroContext;
use crate::player::context::OpponentContext;
use crate::player::context::OpponentsContext;
use crate::player::context::TableContext;
use crate::player::player::Player;
use crate::player::position::Position;
use crate::player::range::estimator::PostflopObservation;
use crate::player::range::estimator::PreflopObservation;
use crate::player::stats::PlayerStatistics;
use crate::player::stats::StreetStatistics;
use crate::player::stats::TableBucket;
use crate::player::strength;
use crate::ports::Services;
use crate::ports::audit::HandAuditRecord;
use crate::ports::stats_store::StatsKey;
use crate::strategy::tools;

/// what one call to `step` produced
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// a human must act; deliver their action to the next `step`
    AwaitingInput {
        player: PlayerId,
        legal: Vec<ActionType>,
    },
    /// a player acted and the round continues
    Acted(PlayerAction),
    /// a betting round closed and the given state opened
    StreetEnded(GameState),
    HandEnded,
}

#[derive(Debug, Clone)]
pub struct HandOutcome {
    pub winners: Vec<PlayerId>,
    pub pot: Chips,
}

/// a single hand from shuffle to settlement, modeled as an explicit
/// state machine: the driver calls `step` until `HandEnded`, feeding
/// human actions in as they arrive. bots are polled inside `step`.
/// the hand owns the deck and the betting flags; players outlive it.
pub struct Hand<'a> {
    services: &'a Services,
    players: &'a mut [Player],
    hand_id: u64,
    dealer: usize,
    sb: Chips,
    sb_seat: usize,
    bb_seat: usize,
    participants: Vec<usize>,
    state: GameState,
    board: Board,
    reserve: Vec<Card>,
    pot: Chips,
    history: HandHistory,
    highest_set: Chips,
    min_raise: Chips,
    actor: Option<usize>,
    need_action: Vec<bool>,
    acted: Vec<bool>,
    raise_open: Vec<bool>,
    invalid_count: u8,
    street_aggressor: [Option<PlayerId>; 4],
    seen_street: Vec<[bool; 4]>,
    chips_total: Chips,
    outcome: Option<HandOutcome>,
}

impl<'a> Hand<'a> {
    pub fn new(
        services: &'a Services,
        players: &'a mut [Player],
        dealer: usize,
        sb: Chips,
        hand_id: u64,
    ) -> Result<Self, EngineError> {
        let n = players.len();
        assert!(
            players.iter().enumerate().all(|(i, p)| p.id == i),
            "player ids must match seat order"
        );
        let participants: Vec<usize> = (0..n)
            .map(|offset| (dealer + offset) % n)
            .filter(|seat| players[*seat].has_chips())
            .collect();
        if participants.len() < 2 {
            return Err(EngineError::InvalidStateTransition(
                "a hand needs at least two funded players".to_string(),
            ));
        }
        if !players[dealer].has_chips() {
            return Err(EngineError::InvalidStateTransition(
                "the dealer seat is not funded".to_string(),
            ));
        }
        let chips_total = players.iter().map(|p| p.cash).sum();

        let mut hand = Self {
            services,
            players,
            hand_id,
            dealer,
            sb,
            sb_seat: dealer,
            bb_seat: dealer,
            participants,
            state: GameState::None,
            board: Board::empty(),
            reserve: Vec::new(),
            pot: 0,
            history: HandHistory::default(),
            highest_set: 0,
            min_raise: 2 * sb,
            actor: None,
            need_action: vec![false; n],
            acted: vec![false; n],
            raise_open: vec![true; n],
            invalid_count: 0,
            street_aggressor: [None; 4],
            seen_street: vec![[false; 4]; n],
            chips_total,
            outcome: None,
        };
        hand.deal()?;
        hand.post_blinds();
        hand.open_preflop();
        Ok(hand)
    }

    pub fn state(&self) -> GameState {
        self.state
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn history(&self) -> &HandHistory {
        &self.history
    }
    pub fn outcome(&self) -> Option<&HandOutcome> {
        self.outcome.as_ref()
    }

    /// sit everyone down, shuffle through the port, set aside the
    /// five board cards, then deal holes clockwise from the dealer
    fn deal(&mut self) -> Result<(), EngineError> {
        let mut deck = Deck::shuffled(&mut *self.services.randomizer.borrow_mut());
        self.reserve = deck.draw_n(5);

        // folded-out seats stay out of the hand entirely
        for seat in 0..self.players.len() {
            if !self.participants.contains(&seat) {
                self.players[seat].fold();
            }
        }

        let n_active = self.participants.len();
        // heads-up the dealer posts the small blind
        if n_active == 2 {
            self.sb_seat = self.participants[0];
            self.bb_seat = self.participants[1];
        } else {
            self.sb_seat = self.participants[1];
            self.bb_seat = self.participants[2];
        }

        for (offset, seat) in self.participants.clone().into_iter().enumerate() {
            let position = Position::from_offset(offset, n_active);
            let hole = crate::cards::hole::Hole::from((deck.draw(), deck.draw()));
            let can_bluff = self.services.randomizer.borrow_mut().rand_int(1, 2) == 1;
            self.players[seat].reset_for_hand(position, hole, can_bluff);
            self.seen_street[seat][Street::Preflop as usize] = true;
            self.need_action[seat] = true;
            self.services.events.on_hole_cards_dealt(seat, hole);
        }
        Ok(())
    }

    fn post_blinds(&mut self) {
        self.state = GameState::Preflop;
        self.services
            .events
            .on_betting_round_started(GameState::Preflop);
        for (seat, kind, owed) in [
            (self.sb_seat, ActionType::PostSmallBlind, self.sb),
            (self.bb_seat, ActionType::PostBigBlind, 2 * self.sb),
        ] {
            let amount = owed.min(self.players[seat].cash);
            self.players[seat].bet(amount);
            let action = PlayerAction::new(seat, kind, amount);
            self.history.push(Street::Preflop, action);
            // a blind that consumed the stack counts as a shove for
            // the statistics, though the history keeps the posting
            let recorded = if self.players[seat].is_acting() {
                action
            } else {
                self.need_action[seat] = false;
                PlayerAction::new(seat, ActionType::Allin, amount)
            };
            self.players[seat].record(Street::Preflop, recorded);
            self.services.events.on_player_acted(&action);
            self.services
                .events
                .on_player_chips_updated(seat, self.players[seat].cash);
        }
        self.highest_set = 2 * self.sb;
        self.min_raise = 2 * self.sb;
    }

    fn open_preflop(&mut self) {
        if self.count_acting() <= 1 {
            // blinds already have someone all-in; nothing to decide
            for flag in self.need_action.iter_mut() {
                *flag = false;
            }
        }
        self.actor =
            processor::first_to_act(self.players, GameState::Preflop, self.dealer, self.bb_seat);
    }

    /// drive the hand forward. bots decide inside; a human actor
    /// surfaces as `AwaitingInput` and their action is delivered via
    /// the `input` argument of the next call.
    pub fn step(&mut self, input: Option<PlayerAction>) -> Result<Step, EngineError> {
        if self.state.is_terminal() {
            return Ok(Step::HandEnded);
        }
        if let Some(done) = self.settle_if_closed()? {
            return Ok(done);
        }
        let actor = self.actor.ok_or_else(|| {
            self.services.events.on_engine_error("no acting player found");
            EngineError::InvalidStateTransition("no acting player found".to_string())
        })?;

        let action = match input {
            Some(submitted) => match self.check(actor, submitted) {
                Ok(action) => action,
                Err(reason) => return self.reject(actor, submitted, reason),
            },
            None if self.players[actor].is_human() => {
                let legal = self.legal_for(actor);
                self.services.events.on_awaiting_human_input(actor, &legal);
                return Ok(Step::AwaitingInput {
                    player: actor,
                    legal,
                });
            }
            None => self.prompt_bot(actor)?,
        };

        self.invalid_count = 0;
        self.apply(actor, action)?;
        if let Some(done) = self.settle_if_closed()? {
            return Ok(done);
        }
        Ok(Step::Acted(action))
    }

    fn legal_for(&self, actor: usize) -> Vec<ActionType> {
        processor::legal_actions(
            &self.players[actor],
            self.state,
            self.highest_set,
            self.min_raise,
            self.raise_open[actor],
        )
    }

    fn check(&self, actor: usize, action: PlayerAction) -> Result<PlayerAction, String> {
        processor::validate(
            &action,
            &self.players[actor],
            self.state,
            self.highest_set,
            self.min_raise,
            self.raise_open[actor],
        )
        .map(|_| action)
    }

    /// an externally submitted action failed validation: emit the
    /// event, and fold the player once they exhaust their retries
    fn reject(
        &mut self,
        actor: usize,
        attempted: PlayerAction,
        reason: String,
    ) -> Result<Step, EngineError> {
        self.services
            .events
            .on_invalid_player_action(actor, &attempted, &reason);
        self.invalid_count += 1;
        if self.invalid_count >= MAX_INVALID_ACTIONS {
            self.invalid_count = 0;
            self.services.events.on_engine_error(&format!(
                "player {} folded by the engine after {} invalid submissions",
                actor, MAX_INVALID_ACTIONS
            ));
            self.apply(actor, PlayerAction::fold(actor))?;
            if let Some(done) = self.settle_if_closed()? {
                return Ok(done);
            }
            return Ok(Step::Acted(PlayerAction::fold(actor)));
        }
        let legal = self.legal_for(actor);
        if self.players[actor].is_human() {
            self.services.events.on_awaiting_human_input(actor, &legal);
        }
        Ok(Step::AwaitingInput {
            player: actor,
            legal,
        })
    }

    /// ask the bot, retrying on invalid submissions up to the limit
    fn prompt_bot(&mut self, actor: usize) -> Result<PlayerAction, EngineError> {
        let ctx = self.build_context(actor);
        for _ in 0..MAX_INVALID_ACTIONS {
            let strategy = self.players[actor].strategy.clone();
            let action = {
                let mut randomizer = self.services.randomizer.borrow_mut();
                strategy.borrow_mut().decide(&ctx, &mut *randomizer)
            };
            match self.check(actor, action) {
                Ok(action) => return Ok(action),
                Err(reason) => {
                    self.services
                        .events
                        .on_invalid_player_action(actor, &action, &reason);
                }
            }
        }
        self.services.events.on_engine_error(&format!(
            "player {} folded by the engine after {} invalid submissions",
            actor, MAX_INVALID_ACTIONS
        ));
        Ok(PlayerAction::fold(actor))
    }

    fn apply(&mut self, actor: usize, action: PlayerAction) -> Result<(), EngineError> {
        let street = self.street();
        // estimator inputs snapshot the table as the actor saw it
        let faced_odds = self.pot_odds_for(actor);
        let raises_before = self.history.raises_on(street);
        let to_call = self.highest_set - self.players[actor].set;

        match action.action {
            ActionType::Fold => {
                self.players[actor].fold();
                self.need_action[actor] = false;
            }
            ActionType::Check => {
                self.need_action[actor] = false;
                self.acted[actor] = true;
            }
            ActionType::Call => {
                self.players[actor].bet(to_call);
                self.need_action[actor] = false;
                self.acted[actor] = true;
            }
            ActionType::Bet | ActionType::Raise => {
                self.players[actor].bet(to_call + action.amount);
                self.raise_to(actor, action.amount);
            }
            ActionType::Allin => {
                let stack = self.players[actor].cash;
                self.players[actor].bet(stack);
                let set = self.players[actor].set;
                if set > self.highest_set {
                    let increment = set - self.highest_set;
                    if increment >= self.min_raise {
                        self.raise_to(actor, increment);
                    } else {
                        self.short_raise_to(actor, set);
                    }
                } else {
                    self.need_action[actor] = false;
                }
                self.acted[actor] = true;
            }
            _ => {
                return Err(EngineError::InvalidAction {
                    player: actor,
                    reason: format!("{} cannot be applied", action.action),
                });
            }
        }

        self.history.push(street, action);
        self.players[actor].record(street, action);
        self.observe(actor, action.action, faced_odds, raises_before);

        self.services.events.on_player_acted(&action);
        self.services
            .events
            .on_player_chips_updated(actor, self.players[actor].cash);
        self.verify_conservation()?;
        self.actor = processor::next_acting_after(self.players, actor);
        Ok(())
    }

    /// a full bet or raise: new price, betting reopened for everyone
    fn raise_to(&mut self, actor: usize, increment: Chips) {
        self.highest_set = self.players[actor].set;
        self.min_raise = increment.max(2 * self.sb);
        self.street_aggressor[self.street() as usize] = Some(self.players[actor].id);
        for seat in 0..self.players.len() {
            if seat != actor && self.players[seat].is_acting() {
                self.need_action[seat] = true;
                self.raise_open[seat] = true;
            }
        }
        self.need_action[actor] = false;
        self.acted[actor] = true;
    }

    /// an all-in for less than a full raise: players behind must
    /// match the new price but the betting is not reopened for
    /// anyone who has already acted
    fn short_raise_to(&mut self, actor: usize, new_highest: Chips) {
        self.highest_set = new_highest;
        self.street_aggressor[self.street() as usize] = Some(self.players[actor].id);
        for seat in 0..self.players.len() {
            if seat != actor && self.players[seat].is_acting() {
                if self.players[seat].set < new_highest {
                    self.need_action[seat] = true;
                    if self.acted[seat] {
                        self.raise_open[seat] = false;
                    }
                }
            }
        }
        self.need_action[actor] = false;
    }

    /// feed the actor's own estimator, which is what the rest of the
    /// table believes about them
    fn observe(&mut self, actor: usize, action: ActionType, faced_odds: f64, raises_before: usize) {
        if action.is_blind() {
            return;
        }
        let n_players = self.participants.len();
        let position = self.players[actor].position;
        let stats = self.players[actor].stats;
        let very_loose = self.players[actor].in_very_loose_mode();
        match self.state {
            GameState::Preflop => {
                let raiser = self.street_aggressor[0]
                    .filter(|id| *id != actor)
                    .map(|id| (self.players[id].stats, self.players[id].in_very_loose_mode()));
                let obs = PreflopObservation {
                    action,
                    n_players,
                    position,
                    pot_odds: faced_odds,
                    raises_before,
                    stats: &stats,
                    raiser_stats: raiser.as_ref().map(|(s, _)| s),
                    raiser_very_loose: raiser.map(|(_, l)| l).unwrap_or(false),
                    very_loose,
                };
                self.players[actor]
                    .range
                    .observe_preflop(&obs, &CardSet::empty());
            }
            _ => {
                let street = self.street();
                let check_raise = action.is_aggressive()
                    && self.players[actor]
                        .actions
                        .on(street)
                        .iter()
                        .any(|a| a.action == ActionType::Check);
                let board = std::mem::take(&mut self.board);
                let obs = PostflopObservation {
                    action,
                    street,
                    board: &board,
                    n_players,
                    check_raise,
                    bets_this_street: raises_before,
                    pot_odds: faced_odds,
                    stats: &stats,
                    very_loose,
                };
                self.players[actor]
                    .range
                    .observe_postflop(&obs, self.services.evaluator.as_ref());
                self.board = board;
            }
        }
    }

    /// chip conservation is the last-ditch invariant: stacks plus
    /// pot plus live sets never move within a hand
    fn verify_conservation(&mut self) -> Result<(), EngineError> {
        let current: Chips = self.players.iter().map(|p| p.cash + p.set).sum::<Chips>() + self.pot;
        if current != self.chips_total {
            let message = format!(
                "chip conservation violated: {} != {}",
                current, self.chips_total
            );
            self.services.events.on_engine_error(&message);
            self.abort();
            return Err(EngineError::InvalidStateTransition(message));
        }
        Ok(())
    }

    /// refund everyone their contribution and end the hand
    fn abort(&mut self) {
        for seat in self.participants.clone() {
            self.players[seat].cash = self.players[seat].start_cash;
            self.players[seat].set = 0;
        }
        self.pot = 0;
        self.state = GameState::PostRiver;
        self.outcome = Some(HandOutcome {
            winners: Vec::new(),
            pot: 0,
        });
    }

    /// when the betting round (or the whole hand) is over, move the
    /// hand forward and report what happened
    fn settle_if_closed(&mut self) -> Result<Option<Step>, EngineError> {
        if self.count_live() == 1 {
            self.collect_sets();
            self.complete(false)?;
            return Ok(Some(Step::HandEnded));
        }
        if self.need_action.iter().any(|f| *f) {
            return Ok(None);
        }
        // round closed
        self.collect_sets();
        if self.state == GameState::River {
            self.complete(true)?;
            return Ok(Some(Step::HandEnded));
        }
        if self.count_acting() <= 1 {
            // all-in fast-forward: run out the board with no betting
            while self.board.cards().len() < 5 {
                self.reveal_next_street();
            }
            self.complete(true)?;
            return Ok(Some(Step::HandEnded));
        }
        self.advance_street();
        Ok(Some(Step::StreetEnded(self.state)))
    }

    fn collect_sets(&mut self) {
        for player in self.players.iter_mut() {
            self.pot += player.collect_set();
        }
        self.highest_set = 0;
        self.services.events.on_pot_updated(self.pot);
    }

    fn reveal_next_street(&mut self) {
        let next = self.board.street().next();
        let showing = self.board.cards().len();
        let cards: Vec<Card> = self.reserve[showing..next.n_observed()].to_vec();
        self.board.reveal(&cards);
        self.services.events.on_board_cards_dealt(&self.board);
    }

    fn advance_street(&mut self) {
        self.state = self.state.next();
        self.reveal_next_street();
        self.min_raise = 2 * self.sb;
        let street = self.street() as usize;
        for seat in 0..self.players.len() {
            self.acted[seat] = false;
            self.raise_open[seat] = true;
            if self.players[seat].is_acting() {
                self.need_action[seat] = true;
            }
            if self.players[seat].is_live() {
                self.seen_street[seat][street] = true;
            }
        }
        self.services.events.on_betting_round_started(self.state);
        self.actor = processor::first_to_act(self.players, self.state, self.dealer, self.bb_seat);
    }

    /// showdown (or uncontested win): rank, reveal, distribute,
    /// commit statistics, audit, and announce
    fn complete(&mut self, contested: bool) -> Result<(), EngineError> {
        let n = self.players.len();
        if contested {
            // mark the runout as seen for everyone still in
            let street = self.board.street() as usize;
            for seat in 0..n {
                if self.players[seat].is_live() {
                    for index in 1..=street {
                        self.seen_street[seat][index] = true;
                    }
                }
            }
            let community = CardSet::from(&self.board);
            for seat in 0..n {
                if self.players[seat].is_live() {
                    let hole = self.players[seat].hole.expect("live players hold cards");
                    let ranking = self
                        .services
                        .evaluator
                        .rank(CardSet::add(CardSet::from(hole), community));
                    self.players[seat].ranking = Some(ranking);
                }
            }
            let live: Vec<(usize, PlayerId)> = (0..n)
                .filter(|seat| self.players[*seat].is_live())
                .map(|seat| (seat, self.players[seat].id))
                .collect();
            let aggressor = Street::all()
                .into_iter()
                .rev()
                .find_map(|s| self.history.aggressor_on(s));
            let order = showdown::reveal_order(&live, n, self.dealer, aggressor);
            self.services.events.on_showdown_reveal_order(&order);
        }

        let entries: Vec<ShowdownEntry> = self
            .participants
            .iter()
            .map(|&seat| ShowdownEntry {
                seat,
                player: self.players[seat].id,
                contribution: self.players[seat].contribution(),
                folded: !self.players[seat].is_live(),
                ranking: self.players[seat].ranking.unwrap_or(0),
            })
            .collect();
        let rewards = Showdown::new(entries, self.dealer, n).settle();
        let mut winners = Vec::new();
        for (player, reward) in rewards {
            if reward > 0 {
                self.players[player].win(reward);
                winners.push(player);
                self.services
                    .events
                    .on_player_chips_updated(player, self.players[player].cash);
            }
        }
        let pot = self.pot;
        self.pot = 0;
        self.verify_settlement()?;

        self.commit_statistics(contested, &winners);
        self.audit(&winners, pot);
        self.state = GameState::PostRiver;
        self.outcome = Some(HandOutcome {
            winners: winners.clone(),
            pot,
        });
        self.services.events.on_hand_completed(&winners, pot);
        Ok(())
    }

    fn verify_settlement(&mut self) -> Result<(), EngineError> {
        let current: Chips = self.players.iter().map(|p| p.cash).sum();
        if current != self.chips_total {
            let message = format!(
                "settlement lost chips: {} != {}",
                current, self.chips_total
            );
            self.services.events.on_engine_error(&message);
            self.abort();
            return Err(EngineError::InvalidStateTransition(message));
        }
        Ok(())
    }

    /// one atomic statistics commit per hand
    fn commit_statistics(&mut self, contested: bool, winners: &[PlayerId]) {
        let bucket = TableBucket::from(self.participants.len());
        let mut entries = Vec::new();
        for seat in self.participants.clone() {
            let delta = self.statistics_delta(seat, contested, winners);
            let key = StatsKey::new(self.players[seat].strategy_label(), bucket);
            self.players[seat].stats.merge(&delta);
            self.players[seat].note_hand_vpip(delta.vpip_hands > 0);
            entries.push((key, delta));
        }
        if let Err(error) = self.services.stats.borrow_mut().update(&entries) {
            // the hand result stands even when persistence fails
            log::error!("statistics update failed: {}", error);
        }
    }

    fn statistics_delta(
        &self,
        seat: usize,
        contested: bool,
        winners: &[PlayerId],
    ) -> PlayerStatistics {
        let player = &self.players[seat];
        let mut delta = PlayerStatistics {
            hands: 1,
            ..Default::default()
        };
        delta.preflop.hands = 1;
        for (index, street_stats) in [
            (Street::Flop, &mut delta.flop),
            (Street::Turn, &mut delta.turn),
            (Street::River, &mut delta.river),
        ]
        .into_iter()
        .map(|(s, d)| (s as usize, d))
        {
            if self.seen_street[seat][index] {
                street_stats.hands = 1;
            }
        }

        let preflop_aggressor = self.street_aggressor[0] == Some(player.id);
        for street in Street::all() {
            let mut raises_so_far = 0usize;
            let target = match street {
                Street::Preflop => &mut delta.preflop,
                Street::Flop => &mut delta.flop,
                Street::Turn => &mut delta.turn,
                Street::River => &mut delta.river,
            };
            for action in self.history.on(street) {
                let mine = action.player == player.id;
                if mine && !action.action.is_blind() {
                    tally(
                        target,
                        street,
                        action.action,
                        raises_so_far,
                        preflop_aggressor,
                    );
                    if street == Street::Preflop {
                        if action.action.is_voluntary() {
                            delta.vpip_hands = 1;
                        }
                        if matches!(action.action, ActionType::Raise | ActionType::Allin) {
                            delta.pfr_hands = 1;
                        }
                    }
                }
                if action_counts_as_aggression(street, action.action) {
                    raises_so_far += 1;
                }
            }
        }
        if preflop_aggressor && self.seen_street[seat][Street::Flop as usize] {
            delta.flop.continuation_bet_opportunities = 1;
        }
        if self.seen_street[seat][Street::Flop as usize] && player.is_live() {
            delta.saw_flop = 1;
            if winners.contains(&player.id) {
                delta.won_when_saw_flop = 1;
            }
        }
        if contested && player.is_live() {
            delta.went_to_showdown = 1;
            if winners.contains(&player.id) {
                delta.won_at_showdown = 1;
            }
        }
        delta
    }

    fn audit(&self, winners: &[PlayerId], pot: Chips) {
        let Some(audit) = &self.services.audit else {
            return;
        };
        let record = HandAuditRecord {
            hand_id: self.hand_id,
            seats: self
                .participants
                .iter()
                .map(|seat| {
                    let p = &self.players[*seat];
                    (p.id, p.name.clone(), p.start_cash)
                })
                .collect(),
            preflop: self.history.on(Street::Preflop).to_vec(),
            flop: self.history.on(Street::Flop).to_vec(),
            turn: self.history.on(Street::Turn).to_vec(),
            river: self.history.on(Street::River).to_vec(),
            winners: winners.to_vec(),
            pot,
        };
        if let Err(error) = audit.borrow_mut().append(&record) {
            log::error!("hand audit append failed: {}", error);
        }
    }

    //

    fn street(&self) -> Street {
        self.state.street().unwrap_or(Street::Preflop)
    }
    fn count_live(&self) -> usize {
        self.players.iter().filter(|p| p.is_live()).count()
    }
    fn count_acting(&self) -> usize {
        self.players.iter().filter(|p| p.is_acting()).count()
    }
    fn sets_sum(&self) -> Chips {
        self.players.iter().map(|p| p.set).sum()
    }
    fn pot_odds_for(&self, seat: usize) -> f64 {
        let to_call = self.highest_set - self.players[seat].set;
        tools::pot_odds(to_call.max(0), self.pot + self.sets_sum())
    }

    /// snapshot the table for one decision
    fn build_context(&self, actor: usize) -> CurrentHandContext {
        let player = &self.players[actor];
        let hole = player.hole.expect("acting players hold cards");
        let street = self.street();
        let bb = 2 * self.sb;
        let legal = self.legal_for(actor);

        // what does each live opponent's range say about us?
        let community = CardSet::from(&self.board);
        let hero_ranking = self
            .services
            .evaluator
            .rank(CardSet::add(CardSet::from(hole), community));
        let materialized: Vec<(PlayerId, &crate::player::range::combo::ComboSet)> = self
            .players
            .iter()
            .filter(|p| p.id != player.id && p.is_live())
            .filter_map(|p| p.range.combos().map(|r| (p.id, r)))
            .collect();
        let strengths = if self.state != GameState::Preflop && !materialized.is_empty() {
            strength::evaluate_opponents(
                hole,
                hero_ranking,
                &self.board,
                &materialized,
                self.services.evaluator.as_ref(),
            )
        } else {
            Default::default()
        };

        let n_live = self.count_live();
        let equity = {
            let mut randomizer = self.services.randomizer.borrow_mut();
            self.services.evaluator.simulate_equity(
                hole,
                &self.board,
                n_live.saturating_sub(1).max(1),
                strengths.max_strength,
                &mut *randomizer,
            )
        };
        let flags = self.services.evaluator.analyze_postflop(hole, &self.board);

        let opponents = OpponentsContext {
            live: self
                .players
                .iter()
                .filter(|p| p.id != player.id && p.is_live())
                .map(|p| OpponentContext {
                    id: p.id,
                    position: p.position,
                    cash: p.cash,
                    set: p.set,
                    stats: p.stats,
                    range: p.range.text(),
                    last_action: p.last_action(),
                    strength: strengths.strengths.get(&p.id).copied(),
                })
                .collect(),
            preflop_last_raiser: self.street_aggressor[0],
            flop_last_raiser: self.street_aggressor[1],
            turn_last_raiser: self.street_aggressor[2],
            river_last_raiser: self.street_aggressor[3],
            last_contributor: self.history.last_contributor(),
            max_strength: strengths.max_strength,
            strongest: strengths.strongest,
        };

        CurrentHandContext {
            hero: HeroContext {
                id: player.id,
                position: player.position,
                cash: player.cash,
                hole,
                set: player.set,
                total_bet: player.total_bet,
                ranking: if self.state == GameState::Preflop {
                    None
                } else {
                    Some(hero_ranking)
                },
                actions: player.action_types(),
                is_aggressor: std::array::from_fn(|i| {
                    self.street_aggressor[i] == Some(player.id)
                }),
                can_bluff: player.can_bluff,
                very_loose: player.in_very_loose_mode(),
                m_ratio: player.m_ratio(bb),
            },
            table: TableContext {
                n_seats: self.participants.len(),
                n_acting: self.count_acting(),
                n_live,
                state: self.state,
                pot: self.pot,
                sets_sum: self.sets_sum(),
                highest_set: self.highest_set,
                min_raise: self.min_raise,
                small_blind: self.sb,
                raises_this_street: self.history.raises_on(street),
                calls_this_street: self.history.calls_on(street),
                pot_odds: self.pot_odds_for(actor),
                is_preflop_big_bet: self.state == GameState::Preflop
                    && self.highest_set >= 5 * bb,
            },
            opponents,
            board: self.board.cards().to_vec(),
            equity,
            flags,
            legal,
        }
    }
}

fn action_counts_as_aggression(street: Street, action: ActionType) -> bool {
    match street {
        Street::Preflop => matches!(action, ActionType::Raise | ActionType::Allin),
        _ => matches!(
            action,
            ActionType::Bet | ActionType::Raise | ActionType::Allin
        ),
    }
}

fn tally(
    target: &mut StreetStatistics,
    street: Street,
    action: ActionType,
    raises_so_far: usize,
    preflop_aggressor: bool,
) {
    match action {
        ActionType::Fold => target.folds += 1,
        ActionType::Check => target.checks += 1,
        ActionType::Call => {
            target.calls += 1;
            if street == Street::Preflop {
                if raises_so_far == 0 {
                    target.limps += 1;
                }
                if raises_so_far == 2 {
                    target.call_three_bets += 1;
                }
            }
        }
        ActionType::Bet => {
            target.bets += 1;
            if street == Street::Flop && preflop_aggressor {
                target.continuation_bets += 1;
            }
        }
        ActionType::Raise | ActionType::Allin => {
            target.raises += 1;
            if street == Street::Preflop {
                if raises_so_far == 1 {
                    target.three_bets += 1;
                }
                if raises_so_far >= 2 {
                    target.four_bets += 1;
                }
            }
        }
        _ => {}
    }
    if street == Street::Preflop && raises_so_far == 2 {
        target.call_three_bet_opportunities += 1;
    }
}
