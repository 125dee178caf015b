//! How soon could an opponent end the game?
//!
//! The game ends once a player is down to two trains. For every opponent
//! close to that point the estimator picks the longest open routes that would
//! use up their trains, spends their exposed cards against those routes, and
//! takes the draws for the rest from the hypergeometric quantile at the
//! requested confidence. Each claim is a turn and each pair of draws is one.

use std::cmp::Reverse;

use log::*;
use statrs::distribution::{DiscreteCDF, Hypergeometric};
use ttr_engine::{CardCounts, Colour, Opponent, Route, RouteColour};

use crate::{accessibility::unseen_pool, view::GameView};

/// Reported when nobody is close to running out.
pub const NO_THREAT_TURNS: u32 = 50;

const LAST_TRAINS: u32 = 2;

pub struct EndgameEstimator<'a> {
    view: GameView<'a>,
    threshold: u32,
}

impl<'a> EndgameEstimator<'a> {
    pub fn new(view: GameView<'a>, threshold: u32) -> Self {
        EndgameEstimator { view, threshold }
    }

    /// Opponents whose trains, less the cards they hold, fall below the threshold.
    pub fn threats(&self) -> impl Iterator<Item = &'a Opponent> + '_ {
        self.view
            .opponents
            .iter()
            .filter(move |o| (o.trains as i64 - o.hand_size as i64) < self.threshold as i64)
    }

    pub fn turns_until_game_likely_ends(&self, confidence: f64) -> u32 {
        self.threats()
            .filter_map(|o| {
                let turns = self.turns_for(o, confidence);
                trace!("Opponent {:?} could finish in {:?} turns", o.id, turns);
                turns
            })
            .min()
            .unwrap_or(NO_THREAT_TURNS)
            .min(NO_THREAT_TURNS)
    }

    /// Turns `opponent` needs to get down to their last trains, or `None` if
    /// the open routes cannot take that many trains.
    pub fn turns_for(&self, opponent: &Opponent, confidence: f64) -> Option<u32> {
        let claims = self.claim_sequence(opponent.trains)?;
        let mut need = CardCounts::new();
        let mut grey = 0;
        for route in claims.iter() {
            match route.colour {
                RouteColour::Colour(c) => need.add(c, route.length),
                RouteColour::Grey => grey += route.length,
            }
        }
        let missing = need.total() + grey - usable_cards(&opponent.exposed, &need, grey);

        // Their exposed cards go back into the pool they draw from, so
        // learning one of them leaves the pool unchanged.
        let mut pool = unseen_pool(&self.view);
        pool.merge(&opponent.exposed);
        let useful = Colour::ALL
            .iter()
            .filter(|&&c| c == Colour::Rainbow || grey > 0 || need.get(c) > 0)
            .map(|&c| pool.get(c))
            .sum();
        let draws = min_draws(pool.total(), useful, missing, confidence)?;

        // Hidden cards count as draws already made.
        let extra = draws.saturating_sub(opponent.hidden_cards());
        Some(claims.len() as u32 + (extra + 1) / 2)
    }

    /// Open routes taken longest first until at most the last trains remain.
    fn claim_sequence(&self, trains: u32) -> Option<Vec<&'a Route>> {
        let board = self.view.board;
        let mut candidates: Vec<&'a Route> = board
            .available_routes()
            .filter(|r| r.length <= trains)
            .collect();
        candidates.sort_by_key(|r| (Reverse(r.length), r.colour.is_grey(), r.id));

        let mut left = trains;
        let mut claims = Vec::new();
        for route in candidates {
            if left <= LAST_TRAINS {
                break;
            }
            if route.length <= left {
                left -= route.length;
                claims.push(route);
            }
        }
        if left <= LAST_TRAINS {
            Some(claims)
        } else {
            None
        }
    }
}

/// How many of `known` go towards the coloured `need` and `grey` lengths.
/// Spare ordinary cards cover grey before locomotives fill what is left.
fn usable_cards(known: &CardCounts, need: &CardCounts, grey: u32) -> u32 {
    let mut matched = 0;
    let mut short = 0;
    let mut spare = 0;
    for &c in Colour::ORDINARY.iter() {
        let (have, want) = (known.get(c), need.get(c));
        matched += have.min(want);
        short += want.saturating_sub(have);
        spare += have.saturating_sub(want);
    }
    let on_grey = spare.min(grey);
    let locomotives = known.get(Colour::Rainbow).min(short + grey - on_grey);
    matched + on_grey + locomotives
}

/// Fewest draws from a pool of `population` cards holding `successes` useful
/// ones so that at least `needed` useful cards arrive with probability
/// `confidence`. `None` when the pool cannot hold that many.
pub fn min_draws(population: u32, successes: u32, needed: u32, confidence: f64) -> Option<u32> {
    if needed == 0 || population == 0 {
        return Some(0);
    }
    if successes < needed || successes > population {
        return None;
    }
    (needed..=population).find(|&draws| {
        Hypergeometric::new(population as u64, successes as u64, draws as u64)
            .map(|dist| 1.0 - dist.cdf((needed - 1) as u64) >= confidence)
            .unwrap_or(false)
    })
}
