use std::cmp::Reverse;

use log::*;
use ttr_engine::{Colour, Market, RouteColour, RouteId};

use super::{DrawChoice, Strategy, TurnAction};
use crate::view::GameView;

/// A fully resolved turn, ready for the game loop to validate and apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Zero to two picks; fewer than two when the deck runs out.
    Draw(Vec<DrawChoice>),
    /// `colour` is the card colour paid with, `Rainbow` when only locomotives are spent.
    Claim {
        route: RouteId,
        locomotives: u32,
        colour: Colour,
    },
    /// The caller deals an offer and asks `select_ticket_offer`.
    DrawTickets,
}

pub fn decide<S: Strategy + ?Sized>(strategy: &mut S, view: &GameView<'_>) -> Decision {
    let decision = match strategy.choose_turn_action(view) {
        TurnAction::ClaimRoute => match claim(strategy, view) {
            Some(decision) => decision,
            None => {
                debug!("Nothing to claim, drawing instead");
                draw(strategy, view)
            }
        },
        TurnAction::DrawTrains => draw(strategy, view),
        TurnAction::DrawTickets => Decision::DrawTickets,
    };
    debug!("Player {:?} decides {:?}", view.me(), decision);
    decision
}

fn draw<S: Strategy + ?Sized>(strategy: &mut S, view: &GameView<'_>) -> Decision {
    let picks = strategy.choose_draw_train_action(view);
    Decision::Draw(normalise_draws(&picks, view.market))
}

fn claim<S: Strategy + ?Sized>(strategy: &mut S, view: &GameView<'_>) -> Option<Decision> {
    let affordable = view.affordable_routes();
    if affordable.is_empty() {
        return None;
    }
    let chosen = strategy.choose_route_to_claim(view, &affordable)?;
    if !affordable.iter().any(|a| a.route == chosen.route) {
        warn!("Strategy chose unaffordable route {:?}", chosen.route);
        return None;
    }

    let route = view.board.route(chosen.route);
    let hand = &view.player.hand;
    let colour = match route.colour {
        RouteColour::Colour(c) => c,
        RouteColour::Grey => {
            let cost = route.length.saturating_sub(chosen.locomotives);
            let options: Vec<Colour> = Colour::ORDINARY
                .iter()
                .copied()
                .filter(|&c| hand.get(c) > 0 && hand.get(c) >= cost)
                .collect();
            let most_common = options
                .iter()
                .copied()
                .min_by_key(|&c| Reverse(hand.get(c)))
                .unwrap_or(Colour::Rainbow);
            match strategy.choose_color_to_spend(view, route, &options) {
                Some(c) if options.contains(&c) => c,
                _ => most_common,
            }
        }
    };

    let locomotives = if colour.is_locomotive() {
        route.length
    } else {
        route.length.saturating_sub(hand.get(colour))
    };
    Some(Decision::Claim {
        route: route.id,
        locomotives,
        colour,
    })
}

/// Applies the drawing rules to a strategy's picks: a face-up locomotive
/// taken first is the whole draw, one taken second becomes a deck draw, and
/// deck draws stop once the deck is empty.
pub fn normalise_draws(picks: &[DrawChoice], market: &Market) -> Vec<DrawChoice> {
    let picks = if picks.is_empty() {
        &[DrawChoice::Blind, DrawChoice::Blind][..]
    } else {
        picks
    };
    let face_up = market.face_up();
    let mut deck = market.deck_len();
    let mut draws = Vec::with_capacity(2);

    for &pick in picks.iter().take(2) {
        let pick = match pick {
            DrawChoice::FaceUp(slot) if slot >= face_up.len() => DrawChoice::Blind,
            DrawChoice::FaceUp(slot) if face_up[slot].is_locomotive() => {
                if draws.is_empty() {
                    draws.push(pick);
                    break;
                }
                DrawChoice::Blind
            }
            pick => pick,
        };
        match pick {
            DrawChoice::Blind if deck == 0 => break,
            DrawChoice::Blind => deck -= 1,
            DrawChoice::FaceUp(_) => deck = deck.saturating_sub(1),
        }
        draws.push(pick);
    }
    draws
}
