use log::*;
use ttr_engine::{Colour, Rand, Route, Ticket};

use super::{min_keep, DrawChoice, Strategy, TurnAction};
use crate::view::{Affordable, GameView};

/// Baseline opponent: legal but aimless.
pub struct RandomBot {
    rand: Rand,
}

impl RandomBot {
    pub fn new(seed: u32) -> Self {
        RandomBot {
            rand: Rand::new(seed),
        }
    }
}

impl Strategy for RandomBot {
    fn choose_turn_action(&mut self, view: &GameView<'_>) -> TurnAction {
        if view.player.incomplete_tickets().next().is_none() {
            TurnAction::DrawTickets
        } else if !view.affordable_routes().is_empty() {
            TurnAction::ClaimRoute
        } else {
            TurnAction::DrawTrains
        }
    }

    fn choose_draw_train_action(&mut self, view: &GameView<'_>) -> Vec<DrawChoice> {
        let slots = view.market.face_up().len();
        (0..2)
            .map(|_| match self.rand.index(slots + 1) {
                0 => DrawChoice::Blind,
                i => DrawChoice::FaceUp(i - 1),
            })
            .collect()
    }

    fn choose_route_to_claim(
        &mut self,
        _view: &GameView<'_>,
        affordable: &[Affordable],
    ) -> Option<Affordable> {
        self.rand.choose(affordable).copied()
    }

    fn choose_color_to_spend(
        &mut self,
        _view: &GameView<'_>,
        _route: &Route,
        _options: &[Colour],
    ) -> Option<Colour> {
        None
    }

    fn select_ticket_offer(&mut self, view: &GameView<'_>, offer: &[Ticket]) -> Vec<Ticket> {
        let keep = min_keep(view, offer);
        let mut kept = self.rand.shuffle(offer.to_vec());
        kept.truncate(keep);
        debug!("Randomly keeping {:?}", kept);
        kept
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ttr_engine::{Board, Market, Opponent, Player, PlayerId, RouteColour};

    #[test]
    fn test_random_choices_stay_legal() {
        let mut board = Board::new();
        board
            .add_route("A", "B", 2, RouteColour::Colour(Colour::Red))
            .unwrap();
        let mut player = Player::new(PlayerId(0));
        player.hand.add(Colour::Red, 2);
        let opponents: Vec<Opponent> = Vec::new();
        let market = Market {
            face_up: vec![Colour::Red; 5],
            ..Market::default()
        };
        let view = GameView {
            board: &board,
            player: &player,
            opponents: &opponents,
            market: &market,
        };
        let mut bot = RandomBot::new(42);

        assert_eq!(bot.choose_turn_action(&view), TurnAction::DrawTickets);
        for _ in 0..20 {
            let picks = bot.choose_draw_train_action(&view);
            assert_eq!(picks.len(), 2);
            assert!(picks.iter().all(|p| p.code() >= -1 && p.code() < 5));
        }

        let affordable = view.affordable_routes();
        assert_eq!(bot.choose_route_to_claim(&view, &affordable), Some(affordable[0]));
        assert_eq!(bot.choose_route_to_claim(&view, &[]), None);

        let a = board.city("A").unwrap();
        let b = board.city("B").unwrap();
        let offer: Vec<Ticket> = (0..3)
            .map(|id| Ticket {
                id,
                city0: a,
                city1: b,
                value: 2,
                completed: false,
            })
            .collect();
        let kept = bot.select_ticket_offer(&view, &offer);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|t| offer.contains(t)));
    }
}
