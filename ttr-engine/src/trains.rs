use std::{fmt, ops::Index};

use super::rand::Rand;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    Pink,
    White,
    Blue,
    Yellow,
    Orange,
    Black,
    Red,
    Green,
    Rainbow,
}

impl Colour {
    pub const ALL: [Colour; 9] = [
        Colour::Pink,
        Colour::White,
        Colour::Blue,
        Colour::Yellow,
        Colour::Orange,
        Colour::Black,
        Colour::Red,
        Colour::Green,
        Colour::Rainbow,
    ];

    /// The eight colours that can appear on a route.
    pub const ORDINARY: [Colour; 8] = [
        Colour::Pink,
        Colour::White,
        Colour::Blue,
        Colour::Yellow,
        Colour::Orange,
        Colour::Black,
        Colour::Red,
        Colour::Green,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of cards of this colour in the full deck.
    pub fn supply(self) -> u32 {
        match self {
            Colour::Rainbow => 14,
            _ => 12,
        }
    }

    pub fn is_locomotive(self) -> bool {
        self == Colour::Rainbow
    }
}

/// Colour painted on a route. Grey routes accept a set of any one colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RouteColour {
    Grey,
    Colour(Colour),
}

impl RouteColour {
    pub fn is_grey(self) -> bool {
        self == RouteColour::Grey
    }
}

impl fmt::Display for RouteColour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteColour::Grey => write!(f, "Grey"),
            RouteColour::Colour(c) => write!(f, "{:?}", c),
        }
    }
}

/// Multiset of train cards keyed by colour.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CardCounts([u32; 9]);

impl CardCounts {
    pub fn new() -> Self {
        CardCounts::default()
    }

    pub fn get(&self, colour: Colour) -> u32 {
        self.0[colour.index()]
    }

    pub fn set(&mut self, colour: Colour, count: u32) {
        self.0[colour.index()] = count;
    }

    pub fn add(&mut self, colour: Colour, count: u32) {
        self.0[colour.index()] += count;
    }

    /// Removes up to `count` cards, returning how many were actually removed.
    pub fn remove(&mut self, colour: Colour, count: u32) -> u32 {
        let slot = &mut self.0[colour.index()];
        let removed = count.min(*slot);
        *slot -= removed;
        removed
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Colour, u32)> + '_ {
        Colour::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Colours present in the multiset, most plentiful first. Ties keep colour order.
    pub fn most_common(&self) -> Vec<(Colour, u32)> {
        let mut entries: Vec<_> = self.iter().filter(|&(_, n)| n > 0).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Largest count among the ordinary colours.
    pub fn max_ordinary(&self) -> (Colour, u32) {
        Colour::ORDINARY
            .iter()
            .map(|&c| (c, self.get(c)))
            .fold((Colour::Pink, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
    }

    pub fn merge(&mut self, other: &CardCounts) {
        for (c, n) in other.iter() {
            self.add(c, n);
        }
    }
}

impl Index<Colour> for CardCounts {
    type Output = u32;

    fn index(&self, colour: Colour) -> &u32 {
        &self.0[colour.index()]
    }
}

impl fmt::Debug for CardCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().filter(|&(_, n)| n > 0))
            .finish()
    }
}

impl<'a> std::iter::FromIterator<&'a Colour> for CardCounts {
    fn from_iter<I: IntoIterator<Item = &'a Colour>>(iter: I) -> Self {
        let mut counts = CardCounts::new();
        for &c in iter {
            counts.add(c, 1);
        }
        counts
    }
}

impl std::iter::FromIterator<(Colour, u32)> for CardCounts {
    fn from_iter<I: IntoIterator<Item = (Colour, u32)>>(iter: I) -> Self {
        let mut counts = CardCounts::new();
        for (c, n) in iter {
            counts.add(c, n);
        }
        counts
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Train(u8);

impl fmt::Debug for Train {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}({})", self.colour(), self.0)
    }
}

pub struct TrainDeck {
    deck: Vec<Train>,
    discard: Vec<Train>,
}

impl Train {
    pub fn id(self) -> u8 {
        self.0
    }

    pub fn colour(self) -> Colour {
        use Colour::*;

        match self.0 {
            0..=11 => Pink,
            12..=23 => White,
            24..=35 => Blue,
            36..=47 => Yellow,
            48..=59 => Orange,
            60..=71 => Black,
            72..=83 => Red,
            84..=95 => Green,
            96..=109 => Rainbow,
            _ => unreachable!(),
        }
    }
}

impl TrainDeck {
    pub fn new() -> Self {
        let deck = (0..110).map(Train).collect();
        let discard = Vec::new();

        TrainDeck { deck, discard }
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Deals one card, reshuffling the discard pile back in when the deck runs dry.
    pub fn deal_one(&mut self, rand: &mut Rand) -> Option<Train> {
        if self.deck.is_empty() {
            self.deck.append(&mut self.discard);
        }
        if self.deck.is_empty() {
            return None;
        }
        let idx = rand.uniform(0, self.deck.len() as u32) as usize;
        Some(self.deck.remove(idx))
    }

    /// Deals up to `num` cards; fewer come back once both piles are exhausted.
    pub fn deal(&mut self, rand: &mut Rand, num: usize) -> Vec<Train> {
        (0..num).map_while(|_| self.deal_one(rand)).collect()
    }

    pub fn discard<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Train>,
    {
        self.discard.extend(cards)
    }

    pub fn hidden_counts(&self) -> CardCounts {
        self.deck.iter().map(|t| (t.colour(), 1)).collect()
    }

    pub fn discard_counts(&self) -> CardCounts {
        self.discard.iter().map(|t| (t.colour(), 1)).collect()
    }
}

impl Default for TrainDeck {
    fn default() -> Self {
        TrainDeck::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deal() {
        let mut rand = Rand::new(18446744073515119986u64 as u32);
        let mut deck = TrainDeck::new();

        rand.discard(44);

        let deal: Vec<_> = deck.deal(&mut rand, 13).iter().map(|t| t.id()).collect();
        assert_eq!(vec![88, 90, 107, 7, 19, 3, 8, 9, 39, 51, 41, 34, 40], deal);
    }

    #[test]
    fn test_deal_reshuffles_discard() {
        let mut rand = Rand::new(7);
        let mut deck = TrainDeck::new();

        let all = deck.deal(&mut rand, 110);
        assert_eq!(all.len(), 110);
        assert!(deck.deal_one(&mut rand).is_none());

        deck.discard(all.into_iter().take(3));
        assert_eq!(deck.deal(&mut rand, 5).len(), 3);
    }

    #[test]
    fn test_supply_matches_deck() {
        let deck = TrainDeck::new();
        let counts = deck.hidden_counts();
        for c in Colour::ALL.iter() {
            assert_eq!(counts.get(*c), c.supply());
        }
    }

    #[test]
    fn test_most_common() {
        use Colour::*;

        let counts: CardCounts = [Red, Blue, Red, Green, Blue, Red].iter().collect();
        assert_eq!(counts.most_common(), vec![(Red, 3), (Blue, 2), (Green, 1)]);
        assert_eq!(counts.max_ordinary(), (Red, 3));
    }

    #[test]
    fn test_remove_saturates() {
        let mut counts = CardCounts::new();
        counts.add(Colour::Black, 2);
        assert_eq!(counts.remove(Colour::Black, 5), 2);
        assert_eq!(counts.get(Colour::Black), 0);
    }
}
