mod map;
mod market;
mod player;
mod rand;
mod trains;

use log::*;
use thiserror::Error;

pub use map::{Board, BoardError, CityId, DistanceTable, Europe, Map, Route, RouteId};
pub use market::{FaceUp, Market, MARKET_SIZE};
pub use player::{Opponent, Player, PlayerId, STARTING_TRAINS};
pub use rand::Rand;
pub use trains::{CardCounts, Colour, RouteColour, Train, TrainDeck};

/// Deals a game's opening position and exposes the snapshots a decision maker reads.
pub struct Engine {
    rand: Rand,
    map: Box<dyn Map>,
    board: Board,
    trains: TrainDeck,
    face_up: FaceUp,
    players: Vec<Player>,
    offers: Vec<Vec<Ticket>>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: u32,
    pub city0: CityId,
    pub city1: CityId,
    pub value: u32,
    pub completed: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("No player {0:?}")]
    UnknownPlayer(PlayerId),
    #[error("Ticket {0} was not offered")]
    NotOffered(u32),
    #[error("Kept {kept} tickets, at least {min} required")]
    TooFewTickets { kept: usize, min: usize },
}

impl Engine {
    pub fn new<M: Map + 'static>(seed: u32, num_players: u32) -> Self {
        let mut rand = Rand::new(seed);
        let mut map = Box::new(M::new(&mut rand));
        let board = map.board();
        let mut trains = TrainDeck::new();
        let face_up = FaceUp::new(&mut rand, &mut trains);
        let players = (0..num_players)
            .map(|id| {
                let mut p = Player::new(PlayerId(id));
                for card in trains.deal(&mut rand, 4) {
                    p.take_blind(card.colour());
                }
                p
            })
            .collect();
        let offers = map.initial_tickets(num_players);
        debug!(
            "Dealt {} players, face up {:?}",
            num_players,
            face_up.colours()
        );
        Engine {
            rand,
            map,
            board,
            trains,
            face_up,
            players,
            offers,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.players
            .get(id.0 as usize)
            .ok_or(EngineError::UnknownPlayer(id))
    }

    pub fn market(&self) -> Market {
        Market::new(&self.face_up, &self.trains)
    }

    pub fn opponents_of(&self, id: PlayerId) -> Vec<Opponent> {
        self.players
            .iter()
            .filter(|p| p.id != id)
            .map(Player::public_view)
            .collect()
    }

    /// Tickets waiting for `id` to choose from.
    pub fn pending_offer(&self, id: PlayerId) -> &[Ticket] {
        self.offers
            .get(id.0 as usize)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Deals a fresh offer of up to three tickets to `id`.
    pub fn offer_tickets(&mut self, id: PlayerId) -> Result<&[Ticket], EngineError> {
        self.player(id)?;
        let offer: Vec<_> = (0..3).filter_map(|_| self.map.draw_ticket()).collect();
        let slot = id.0 as usize;
        self.offers[slot] = offer;
        Ok(&self.offers[slot])
    }

    /// Keeps `kept` out of the pending offer and returns the rest to the map.
    pub fn keep_tickets(&mut self, id: PlayerId, kept: &[Ticket]) -> Result<(), EngineError> {
        let slot = id.0 as usize;
        let player = self
            .players
            .get(slot)
            .ok_or(EngineError::UnknownPlayer(id))?;
        let min = if player.tickets.is_empty() { 2 } else { 1 };
        let offer = &self.offers[slot];
        let min = min.min(offer.len());
        if kept.len() < min {
            return Err(EngineError::TooFewTickets {
                kept: kept.len(),
                min,
            });
        }
        if let Some(t) = kept.iter().find(|t| !offer.iter().any(|o| o.id == t.id)) {
            return Err(EngineError::NotOffered(t.id));
        }

        let offer = std::mem::take(&mut self.offers[slot]);
        let (keep, back): (Vec<_>, Vec<_>) = offer
            .into_iter()
            .partition(|o| kept.iter().any(|t| t.id == o.id));
        debug!("Player {:?} keeps {:?}", id, keep);
        self.players[slot].tickets.extend(keep);
        self.map.return_tickets(back);
        Ok(())
    }

    /// Draws a card for `id`, from a face-up slot or blind from the deck.
    pub fn draw_card(
        &mut self,
        id: PlayerId,
        slot: Option<usize>,
    ) -> Result<Option<Colour>, EngineError> {
        self.player(id)?;
        let card = match slot {
            Some(slot) => self.face_up.draw(&mut self.rand, &mut self.trains, slot),
            None => self.trains.deal_one(&mut self.rand),
        };
        let player = &mut self.players[id.0 as usize];
        Ok(card.map(|card| {
            match slot {
                Some(_) => player.take_face_up(card.colour()),
                None => player.take_blind(card.colour()),
            }
            card.colour()
        }))
    }
}
