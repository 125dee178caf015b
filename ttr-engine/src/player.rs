use super::{Board, CardCounts, Colour, Ticket};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u32);

pub const STARTING_TRAINS: u32 = 45; // TODO: This may be map dependent

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub hand: CardCounts,
    /// The part of `hand` other players saw being taken from the market.
    pub exposed: CardCounts,
    pub tickets: Vec<Ticket>,
    pub trains: u32,
}

/// What everyone else at the table knows about a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    pub id: PlayerId,
    pub exposed: CardCounts,
    pub hand_size: u32,
    pub trains: u32,
    pub tickets: u32,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Player {
            id,
            hand: CardCounts::new(),
            exposed: CardCounts::new(),
            tickets: Vec::new(),
            trains: STARTING_TRAINS,
        }
    }

    pub fn take_face_up(&mut self, colour: Colour) {
        self.hand.add(colour, 1);
        self.exposed.add(colour, 1);
    }

    pub fn take_blind(&mut self, colour: Colour) {
        self.hand.add(colour, 1);
    }

    /// Spends cards from hand, returning how many were actually held.
    pub fn spend(&mut self, colour: Colour, count: u32) -> u32 {
        let spent = self.hand.remove(colour, count);
        self.exposed.remove(colour, spent);
        spent
    }

    pub fn incomplete_tickets(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.tickets.iter().filter(|t| !t.completed)
    }

    /// Marks tickets whose cities are now joined by this player's routes.
    pub fn refresh_tickets(&mut self, board: &Board) {
        let id = self.id;
        for ticket in self.tickets.iter_mut().filter(|t| !t.completed) {
            ticket.completed = board.is_connected(id, ticket.city0, ticket.city1);
        }
    }

    pub fn public_view(&self) -> Opponent {
        Opponent {
            id: self.id,
            exposed: self.exposed,
            hand_size: self.hand.total(),
            trains: self.trains,
            tickets: self.tickets.len() as u32,
        }
    }
}

impl Opponent {
    pub fn hidden_cards(&self) -> u32 {
        self.hand_size.saturating_sub(self.exposed.total())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RouteColour;

    #[test]
    fn test_exposure_tracking() {
        let mut player = Player::new(PlayerId(1));
        player.take_face_up(Colour::Red);
        player.take_blind(Colour::Red);
        player.take_blind(Colour::Blue);

        let view = player.public_view();
        assert_eq!(view.hand_size, 3);
        assert_eq!(view.exposed.get(Colour::Red), 1);
        assert_eq!(view.hidden_cards(), 2);

        assert_eq!(player.spend(Colour::Red, 2), 2);
        assert_eq!(player.exposed.get(Colour::Red), 0);
        assert_eq!(player.spend(Colour::Green, 1), 0);
    }

    #[test]
    fn test_refresh_tickets() {
        let mut board = Board::new();
        let ab = board.add_route("A", "B", 2, RouteColour::Grey).unwrap();
        let bc = board.add_route("B", "C", 2, RouteColour::Grey).unwrap();
        let mut player = Player::new(PlayerId(0));
        player.tickets.push(Ticket {
            id: 0,
            city0: board.city("A").unwrap(),
            city1: board.city("C").unwrap(),
            value: 4,
            completed: false,
        });

        board.claim(ab, player.id).unwrap();
        player.refresh_tickets(&board);
        assert_eq!(player.incomplete_tickets().count(), 1);

        board.claim(bc, player.id).unwrap();
        player.refresh_tickets(&board);
        assert_eq!(player.incomplete_tickets().count(), 0);
    }
}
