use ttr_engine::{CardCounts, Colour, RouteColour};

/// Cards still to be collected for a planned set of routes.
///
/// Coloured routes add to a fixed colour. Grey routes stay as bare lengths in
/// `grey` until a colour is chosen for them, see [`Wishlist::assigned`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    colours: CardCounts,
    grey: Vec<u32>,
}

/// Coarsened wishlist used as part of the planner's memo key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    colours: [u32; 8],
    grey: Vec<u32>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist::default()
    }

    pub fn colours(&self) -> &CardCounts {
        &self.colours
    }

    pub fn grey(&self) -> &[u32] {
        &self.grey
    }

    pub fn need(&self, colour: Colour) -> u32 {
        self.colours.get(colour)
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty() && self.grey.is_empty()
    }

    pub fn total_cards(&self) -> u32 {
        self.colours.total() + self.grey.iter().sum::<u32>()
    }

    pub fn add(&mut self, colour: RouteColour, length: u32) {
        match colour {
            RouteColour::Grey => self.grey.push(length),
            RouteColour::Colour(c) => self.colours.add(c, length),
        }
    }

    /// A copy with one more route's cost added; `self` is left untouched.
    pub fn with(&self, colour: RouteColour, length: u32) -> Wishlist {
        let mut next = self.clone();
        next.add(colour, length);
        next
    }

    /// Per-colour totals once each grey length, longest first, goes to the
    /// ordinary colour with the least need so far.
    pub fn assigned(&self) -> CardCounts {
        let mut totals = self.colours;
        let mut grey = self.grey.clone();
        grey.sort_by(|a, b| b.cmp(a));
        for length in grey {
            let least = Colour::ORDINARY
                .iter()
                .copied()
                .min_by_key(|&c| totals.get(c))
                .unwrap_or(Colour::Pink);
            totals.add(least, length);
        }
        totals
    }

    /// No colour may need more cards than exist in the deck.
    pub fn is_feasible(&self) -> bool {
        let totals = self.assigned();
        Colour::ALL.iter().all(|&c| totals.get(c) <= c.supply())
    }

    /// Cards still missing after the hand is spent against the assigned totals.
    /// Locomotives in hand cover the largest shortfalls first.
    pub fn missing(&self, hand: &CardCounts) -> CardCounts {
        let mut missing: CardCounts = self
            .assigned()
            .iter()
            .filter(|&(c, _)| !c.is_locomotive())
            .map(|(c, n)| (c, n.saturating_sub(hand.get(c))))
            .collect();
        for _ in 0..hand.get(Colour::Rainbow) {
            let (colour, short) = missing.max_ordinary();
            if short == 0 {
                break;
            }
            missing.remove(colour, 1);
        }
        missing
    }

    /// Rounds every count down to an even number.
    pub fn signature(&self) -> Signature {
        let mut colours = [0; 8];
        for (slot, &c) in colours.iter_mut().zip(Colour::ORDINARY.iter()) {
            *slot = self.colours.get(c) / 2 * 2;
        }
        let mut grey: Vec<_> = self.grey.iter().map(|&len| len / 2 * 2).collect();
        grey.sort_unstable();
        Signature { colours, grey }
    }
}
