use super::{rand::Rand, CardCounts, Colour, Train, TrainDeck};

pub const MARKET_SIZE: usize = 5;

/// The face-up row of train cards.
#[derive(Debug, Clone)]
pub struct FaceUp(Vec<Train>);

impl FaceUp {
    pub fn new(rand: &mut Rand, deck: &mut TrainDeck) -> Self {
        let mut cards = FaceUp(deck.deal(rand, MARKET_SIZE));
        cards.check_for_rainbow(rand, deck);

        cards
    }

    fn check_for_rainbow(&mut self, rand: &mut Rand, deck: &mut TrainDeck) {
        while self.num_rainbow() >= 3 && deck.len() >= MARKET_SIZE {
            deck.discard(self.0.drain(..));
            self.0 = deck.deal(rand, MARKET_SIZE);
        }
    }

    fn num_rainbow(&self) -> usize {
        self.0
            .iter()
            .filter(|x| x.colour() == Colour::Rainbow)
            .count()
    }

    pub fn colours(&self) -> Vec<Colour> {
        self.0.iter().map(|t| t.colour()).collect()
    }

    /// Takes the card in `slot` and refills it from the deck when possible.
    pub fn draw(&mut self, rand: &mut Rand, deck: &mut TrainDeck, slot: usize) -> Option<Train> {
        if slot >= self.0.len() {
            return None;
        }
        let result = match deck.deal_one(rand) {
            Some(card) => std::mem::replace(&mut self.0[slot], card),
            None => self.0.remove(slot),
        };
        self.check_for_rainbow(rand, deck);
        Some(result)
    }
}

/// Read-only snapshot of the card supply as seen by the player about to act.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Market {
    pub face_up: Vec<Colour>,
    pub hidden: CardCounts,
    pub discard: CardCounts,
}

impl Market {
    pub fn new(face_up: &FaceUp, deck: &TrainDeck) -> Self {
        Market {
            face_up: face_up.colours(),
            hidden: deck.hidden_counts(),
            discard: deck.discard_counts(),
        }
    }

    pub fn face_up(&self) -> &[Colour] {
        &self.face_up
    }

    pub fn hidden_counts(&self) -> CardCounts {
        self.hidden
    }

    pub fn discard_counts(&self) -> CardCounts {
        self.discard
    }

    pub fn visible_counts(&self) -> CardCounts {
        self.face_up.iter().collect()
    }

    /// Cards left to draw blind, counting a discard pile that would be reshuffled in.
    pub fn deck_len(&self) -> u32 {
        self.hidden.total() + self.discard.total()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_face_up_limits_rainbows() {
        for seed in 1..50 {
            let mut rand = Rand::new(seed);
            let mut deck = TrainDeck::new();
            let face_up = FaceUp::new(&mut rand, &mut deck);
            assert_eq!(face_up.colours().len(), MARKET_SIZE);
            assert!(face_up.num_rainbow() < 3);

            let market = Market::new(&face_up, &deck);
            assert_eq!(market.deck_len() as usize + MARKET_SIZE, 110);
        }
    }

    #[test]
    fn test_draw_refills_slot() {
        let mut rand = Rand::new(4242);
        let mut deck = TrainDeck::new();
        let mut face_up = FaceUp::new(&mut rand, &mut deck);
        let before = deck.len();
        assert!(face_up.draw(&mut rand, &mut deck, 2).is_some());
        assert_eq!(face_up.colours().len(), MARKET_SIZE);
        assert!(deck.len() < before);
        assert!(face_up.draw(&mut rand, &mut deck, 7).is_none());
    }
}
