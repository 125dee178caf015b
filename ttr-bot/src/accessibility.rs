use ttr_engine::{CardCounts, Colour, RouteColour};

use crate::view::GameView;

/// Per-colour estimate of how many cards the player holds or could still pick up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessibility(CardCounts);

impl Accessibility {
    pub fn estimate(view: &GameView) -> Self {
        let hand = &view.player.hand;
        let visible = view.market.visible_counts();
        let exposed = exposed_by_opponents(view);

        let counts = Colour::ALL
            .iter()
            .map(|&c| {
                let known = hand.get(c) as i64 + exposed.get(c) as i64;
                let estimate =
                    hand.get(c) as i64 + (c.supply() as i64 - known) - visible.get(c) as i64;
                (c, estimate.max(0) as u32)
            })
            .collect();
        Accessibility(counts)
    }

    pub fn from_counts(counts: CardCounts) -> Self {
        Accessibility(counts)
    }

    pub fn get(&self, colour: Colour) -> u32 {
        self.0.get(colour)
    }

    pub fn counts(&self) -> &CardCounts {
        &self.0
    }

    /// The least accessible colour count, locomotives included.
    pub fn scarcest(&self) -> u32 {
        Colour::ALL.iter().map(|&c| self.get(c)).min().unwrap_or(0)
    }

    /// Scales a route's length into a traversal cost. Grey routes count as the scarcest colour.
    pub fn multiplier(&self, colour: RouteColour) -> f64 {
        let count = match colour {
            RouteColour::Grey => self.scarcest(),
            RouteColour::Colour(c) => self.get(c),
        };
        count as f64 / 12.0
    }
}

fn exposed_by_opponents(view: &GameView) -> CardCounts {
    let mut exposed = CardCounts::new();
    for o in view.opponents {
        exposed.merge(&o.exposed);
    }
    exposed
}

/// Cards the player cannot see: the draw pile plus opponents' hidden cards.
pub fn unseen_pool(view: &GameView) -> CardCounts {
    let mut seen = view.player.hand;
    seen.merge(&exposed_by_opponents(view));
    seen.merge(&view.market.visible_counts());
    seen.merge(&view.market.discard_counts());

    Colour::ALL
        .iter()
        .map(|&c| (c, c.supply().saturating_sub(seen.get(c))))
        .collect()
}
