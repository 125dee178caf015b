use crate::{rand::Rand, Ticket};

mod board;
mod europe;

pub use board::{Board, BoardError, CityId, DistanceTable, Route, RouteId};
pub use europe::Europe;

pub trait Map {
    fn new(rand: &mut Rand) -> Self
    where
        Self: Sized;

    /// A fresh, unclaimed copy of the board.
    fn board(&self) -> Board;

    fn initial_tickets(&mut self, players: u32) -> Vec<Vec<Ticket>>;

    fn draw_ticket(&mut self) -> Option<Ticket>;

    /// Returned tickets go to the bottom of the pile.
    fn return_tickets(&mut self, tickets: Vec<Ticket>);
}
