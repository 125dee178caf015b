use std::{collections::BTreeSet, iter};

use ttr_engine::{
    Board, CityId, Colour, Market, Opponent, Player, PlayerId, RouteColour, RouteId, Ticket,
};

/// Everything the acting player can see when making a decision.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub board: &'a Board,
    pub player: &'a Player,
    pub opponents: &'a [Opponent],
    pub market: &'a Market,
}

/// A route the player can pay for now, and the fewest locomotives it takes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Affordable {
    pub route: RouteId,
    pub locomotives: u32,
}

impl<'a> GameView<'a> {
    pub fn me(&self) -> PlayerId {
        self.player.id
    }

    pub fn incomplete_tickets(&self) -> Vec<Ticket> {
        self.player.incomplete_tickets().copied().collect()
    }

    /// Unclaimed routes no longer than the trains left that the hand can pay for.
    pub fn affordable_routes(&self) -> Vec<Affordable> {
        let hand = &self.player.hand;
        let locos = hand.get(Colour::Rainbow);
        self.board
            .available_routes()
            .filter(|r| r.length <= self.player.trains)
            .filter_map(|r| {
                let have = match r.colour {
                    RouteColour::Colour(c) => hand.get(c),
                    RouteColour::Grey => hand.max_ordinary().1,
                };
                let needed = r.length.saturating_sub(have);
                if needed <= locos {
                    Some(Affordable {
                        route: r.id,
                        locomotives: needed,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

/// The cities a set of tickets needs joined.
pub fn goal_cities<'t, I>(tickets: I) -> BTreeSet<CityId>
where
    I: IntoIterator<Item = &'t Ticket>,
{
    tickets
        .into_iter()
        .flat_map(|t| iter::once(t.city0).chain(iter::once(t.city1)))
        .collect()
}
