mod planner_bot;
mod random_bot;
mod turn;

use ttr_engine::{Colour, Route, Ticket};

use crate::view::{Affordable, GameView};

pub use planner_bot::PlannerBot;
pub use random_bot::RandomBot;
pub use turn::{decide, normalise_draws, Decision};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnAction {
    DrawTrains,
    ClaimRoute,
    DrawTickets,
}

impl TurnAction {
    pub fn code(self) -> u8 {
        match self {
            TurnAction::DrawTrains => 1,
            TurnAction::ClaimRoute => 2,
            TurnAction::DrawTickets => 3,
        }
    }
}

/// One card pick: a face-up market slot, or the top of the deck.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawChoice {
    FaceUp(usize),
    Blind,
}

impl DrawChoice {
    /// Market index, or -1 for the deck.
    pub fn code(self) -> i32 {
        match self {
            DrawChoice::FaceUp(slot) => slot as i32,
            DrawChoice::Blind => -1,
        }
    }
}

/// The decisions a player makes over a turn. Implementations only recommend;
/// legality is checked by whoever applies the result.
pub trait Strategy {
    fn choose_turn_action(&mut self, view: &GameView<'_>) -> TurnAction;

    /// Up to two picks, in order.
    fn choose_draw_train_action(&mut self, view: &GameView<'_>) -> Vec<DrawChoice>;

    fn choose_route_to_claim(
        &mut self,
        view: &GameView<'_>,
        affordable: &[Affordable],
    ) -> Option<Affordable>;

    /// Colour to pay a grey route with. `None` leaves it to the caller.
    fn choose_color_to_spend(
        &mut self,
        view: &GameView<'_>,
        route: &Route,
        options: &[Colour],
    ) -> Option<Colour>;

    fn select_ticket_offer(&mut self, view: &GameView<'_>, offer: &[Ticket]) -> Vec<Ticket>;
}

/// Fewest tickets that may be kept from an offer.
pub fn min_keep(view: &GameView<'_>, offer: &[Ticket]) -> usize {
    let min = if view.player.tickets.is_empty() { 2 } else { 1 };
    min.min(offer.len())
}
