//! Simultaneous trick-taking game model
//!
//! Three players each hold the cards 1, 2 and 3. Every round all of them
//! play one card at the same time; the highest card takes the trick and
//! scores the sum of all cards played. Equal highest cards go to whichever
//! of the tied players comes first in turn order starting at the dealer,
//! and the dealer rotates after each trick. When the hands are empty the
//! players with the most points share the win.
//!
//! Because every player decides in every state, each joint action names a
//! card for all three seats and the root alone has 27 of them.

use engine_core::{Game, Heuristic, JointAction, LegalMoves, Outcome, Valuation};

/// Number of seats at the table
pub const PLAYERS: u8 = 3;

/// Cards each player starts with
pub const FULL_HAND: [u8; 3] = [1, 2, 3];

/// Seat number, 1-based.
pub type Seat = u8;

/// Hands, scores and the current dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Remaining cards per seat, ascending
    hands: [Vec<u8>; PLAYERS as usize],
    /// Points per seat
    points: [u32; PLAYERS as usize],
    /// Seat that wins ties this round
    dealer: Seat,
}

impl State {
    pub fn new() -> Self {
        Self {
            hands: std::array::from_fn(|_| FULL_HAND.to_vec()),
            points: [0; PLAYERS as usize],
            dealer: 1,
        }
    }

    pub fn hand(&self, seat: Seat) -> &[u8] {
        &self.hands[index(seat)]
    }

    pub fn points(&self, seat: Seat) -> u32 {
        self.points[index(seat)]
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn is_done(&self) -> bool {
        self.hands.iter().all(Vec::is_empty)
    }

    /// Seats ordered for tie-breaking: the dealer first, then clockwise.
    fn turn_order(&self) -> impl Iterator<Item = Seat> {
        let dealer = self.dealer;
        (0..PLAYERS).map(move |offset| (dealer - 1 + offset) % PLAYERS + 1)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn index(seat: Seat) -> usize {
    (seat - 1) as usize
}

/// The trick-taking game.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tricks;

impl Tricks {
    pub fn new() -> Self {
        Self
    }

    fn seats() -> impl Iterator<Item = Seat> {
        1..=PLAYERS
    }
}

impl Game for Tricks {
    type State = State;
    type Actor = Seat;
    type Move = u8;
    type Hash = u32;

    fn actors(&self) -> Vec<Seat> {
        Self::seats().collect()
    }

    fn initial_state(&self) -> State {
        State::new()
    }

    fn legal_moves(&self, state: &State) -> LegalMoves<Seat, u8> {
        if state.is_done() {
            return LegalMoves::new();
        }
        Self::seats()
            .map(|seat| (seat, state.hand(seat).to_vec()))
            .collect()
    }

    /// Play one trick. A seat that passes or names a card it does not hold
    /// contributes nothing.
    fn apply(&self, state: &State, action: &JointAction<Seat, u8>) -> State {
        let mut next = state.clone();

        let played: Vec<(Seat, u8)> = Self::seats()
            .filter_map(|seat| {
                let card = *action.get(seat)?;
                let hand = &mut next.hands[index(seat)];
                let slot = hand.iter().position(|&held| held == card)?;
                hand.remove(slot);
                Some((seat, card))
            })
            .collect();

        let trick: u32 = played.iter().map(|&(_, card)| card as u32).sum();
        let high = played.iter().map(|&(_, card)| card).max();

        if let Some(high) = high {
            let taker = state
                .turn_order()
                .find(|seat| played.contains(&(*seat, high)));
            if let Some(taker) = taker {
                next.points[index(taker)] += trick;
            }
        }

        next.dealer = state.dealer % PLAYERS + 1;
        next
    }

    fn outcome(&self, state: &State) -> Option<Outcome<Seat>> {
        if !state.is_done() {
            return None;
        }

        let best = state.points.iter().copied().max().unwrap_or(0);
        let mut winners: Vec<Seat> = Self::seats()
            .filter(|&seat| state.points(seat) == best)
            .collect();

        Some(match winners.len() {
            1 => Outcome::Winner(winners.remove(0)),
            _ => Outcome::Winners(winners),
        })
    }

    /// Hands as a 3-bit mask per seat, followed by 5 bits of points per seat.
    ///
    /// The dealer is left out: it follows from how many cards are gone.
    fn hash_state(&self, state: &State) -> u32 {
        let hands = state.hands.iter().fold(0u32, |key, hand| {
            let mask = hand.iter().fold(0u32, |mask, &card| mask | 1 << (card - 1));
            key << 3 | mask
        });
        state
            .points
            .iter()
            .fold(hands, |key, &points| key << 5 | points)
    }

    fn heuristic(&self, name: &str) -> Option<Heuristic<Self>> {
        match name {
            "points" => Some(points_in_reach),
            _ => None,
        }
    }

    fn heuristic_names(&self) -> &'static [&'static str] {
        &["points"]
    }
}

/// Points taken so far plus the cards still in hand.
fn points_in_reach(_game: &Tricks, state: &State) -> Valuation<Seat> {
    Tricks::seats()
        .map(|seat| {
            let held: u32 = state.hand(seat).iter().map(|&card| card as u32).sum();
            (seat, (state.points(seat) + held) as f64)
        })
        .collect()
}
