use std::cmp::Reverse;

use log::*;
use ttr_engine::{Board, CardCounts, Colour, DistanceTable, Rand, Route, Ticket};

use super::{min_keep, DrawChoice, Strategy, TurnAction};
use crate::{
    accessibility::{unseen_pool, Accessibility},
    config::PolicyConfig,
    endgame::EndgameEstimator,
    planner::{Plan, Planner},
    simulate::CollectionSimulator,
    view::{Affordable, GameView},
    wishlist::Wishlist,
};

/// Plays towards a planned connection of its open tickets.
pub struct PlannerBot {
    config: PolicyConfig,
    rand: Rand,
    simulator: CollectionSimulator,
    distances: Option<DistanceTable>,
}

struct TicketOption {
    tickets: Vec<Ticket>,
    plan: Option<Plan>,
    cost: Option<u32>,
}

impl PlannerBot {
    pub fn new(config: PolicyConfig) -> Self {
        PlannerBot {
            rand: Rand::new(config.seed),
            simulator: CollectionSimulator::new(config.simulation_trials),
            distances: None,
            config,
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Distances only depend on the map's layout, so they are computed once per map.
    fn distances(&mut self, board: &Board) -> &DistanceTable {
        let stale = self
            .distances
            .as_ref()
            .map_or(true, |d| d.len() != board.num_cities());
        if stale {
            self.distances = None;
        }
        self.distances
            .get_or_insert_with(|| DistanceTable::compute(board))
    }

    fn plan_for<'t, I>(&mut self, view: &GameView<'_>, tickets: I) -> Option<Plan>
    where
        I: IntoIterator<Item = &'t Ticket>,
    {
        let accessibility = Accessibility::estimate(view);
        let max_expansions = self.config.max_expansions;
        let distances = self.distances(view.board);
        Planner::new(view.board, distances, &accessibility, view.me())
            .with_max_expansions(max_expansions)
            .plan_tickets(tickets)
    }

    fn current_plan(&mut self, view: &GameView<'_>) -> Option<Plan> {
        let tickets = view.incomplete_tickets();
        self.plan_for(view, &tickets)
    }

    fn turns_until_end(&self, view: &GameView<'_>) -> u32 {
        EndgameEstimator::new(*view, self.config.endgame_threshold())
            .turns_until_game_likely_ends(self.config.confidence())
    }

    fn near_end(&self, view: &GameView<'_>) -> bool {
        self.turns_until_end(view) < self.config.endgame_threshold()
    }

    /// Claims plus draw turns to complete `plan`; `None` if the cards cannot be found.
    fn turn_cost(&mut self, view: &GameView<'_>, plan: &Plan, pool: &CardCounts) -> Option<u32> {
        let missing = plan.wishlist.missing(&view.player.hand);
        let risk = self.config.risk_appetite;
        self.simulator
            .estimate(&missing, pool, &mut self.rand)
            .map(|estimate| plan.routes.len() as u32 + estimate.turns(risk))
    }
}

/// Whether paying for a claim in `colour` still leaves what the wishlist
/// reserves. A claim spends as many cards of its colour as it can and
/// locomotives for the rest.
fn leaves_reserved(hand: &CardCounts, wishlist: &Wishlist, colour: Colour, length: u32) -> bool {
    let have = hand.get(colour);
    let need = wishlist.need(colour);
    need == 0 || have - have.min(length) >= need
}

/// Some colour pays for the grey route without eating into cards the wishlist reserves.
fn grey_payable(hand: &CardCounts, wishlist: &Wishlist, length: u32, locomotives: u32) -> bool {
    let cost = length.saturating_sub(locomotives);
    Colour::ORDINARY.iter().any(|&c| {
        let have = hand.get(c);
        have > 0 && have >= cost && leaves_reserved(hand, wishlist, c, length)
    })
}

impl Strategy for PlannerBot {
    fn choose_turn_action(&mut self, view: &GameView<'_>) -> TurnAction {
        let mut affordable = view.affordable_routes();
        affordable.sort_by_key(|a| {
            let route = view.board.route(a.route);
            (a.locomotives, Reverse(route.length), route.colour.is_grey())
        });

        if !affordable.is_empty() {
            if let Some(plan) = self.current_plan(view) {
                let near_end = self.near_end(view);
                let claim = affordable
                    .iter()
                    .filter(|a| plan.contains(a.route))
                    .find(|a| {
                        let route = view.board.route(a.route);
                        let payable = !route.colour.is_grey()
                            || grey_payable(
                                &view.player.hand,
                                &plan.wishlist,
                                route.length,
                                a.locomotives,
                            );
                        payable && (a.locomotives == 0 || near_end)
                    });
                if let Some(a) = claim {
                    debug!("Claiming towards plan, {:?} qualifies", a);
                    return TurnAction::ClaimRoute;
                }
            }
        }

        let action = if view.player.incomplete_tickets().next().is_some() || self.near_end(view) {
            TurnAction::DrawTrains
        } else {
            TurnAction::DrawTickets
        };
        debug!("Turn action {:?}", action);
        action
    }

    fn choose_draw_train_action(&mut self, view: &GameView<'_>) -> Vec<DrawChoice> {
        let wishlist = self
            .current_plan(view)
            .map(|plan| plan.wishlist)
            .unwrap_or_default();
        let hand = &view.player.hand;
        let face_up = view.market.face_up();
        let mut picks: Vec<usize> = Vec::new();

        for (colour, need) in wishlist.colours().most_common() {
            let mut short = need.saturating_sub(hand.get(colour));
            for slot in (0..face_up.len()).filter(|&i| face_up[i] == colour) {
                if picks.len() == 2 || short == 0 {
                    break;
                }
                picks.push(slot);
                short -= 1;
            }
        }

        for (colour, _) in hand.most_common() {
            if picks.len() == 2 {
                break;
            }
            if colour.is_locomotive() || wishlist.need(colour) > 0 {
                continue;
            }
            let slot = (0..face_up.len()).find(|&i| face_up[i] == colour && !picks.contains(&i));
            picks.extend(slot);
        }

        if picks.is_empty() {
            if let Some(slot) = face_up.iter().position(|c| c.is_locomotive()) {
                debug!("Nothing useful showing, taking the locomotive in slot {}", slot);
                return vec![DrawChoice::FaceUp(slot)];
            }
        }

        let mut choices: Vec<DrawChoice> = picks.into_iter().map(DrawChoice::FaceUp).collect();
        choices.resize(2, DrawChoice::Blind);
        debug!("Drawing {:?}", choices);
        choices
    }

    fn choose_route_to_claim(
        &mut self,
        view: &GameView<'_>,
        affordable: &[Affordable],
    ) -> Option<Affordable> {
        let mut sorted = affordable.to_vec();
        sorted.sort_by_key(|a| {
            let route = view.board.route(a.route);
            (a.locomotives, route.colour.is_grey(), Reverse(route.length))
        });

        let plan = self.current_plan(view);
        let pick = plan
            .as_ref()
            .and_then(|plan| sorted.iter().find(|a| plan.contains(a.route)))
            .or_else(|| sorted.first())
            .copied();
        debug!("Claim choice {:?}", pick);
        pick
    }

    fn choose_color_to_spend(
        &mut self,
        view: &GameView<'_>,
        route: &Route,
        options: &[Colour],
    ) -> Option<Colour> {
        let wishlist = self
            .current_plan(view)
            .map(|plan| plan.wishlist)
            .unwrap_or_default();
        let hand = &view.player.hand;
        let colour = options
            .iter()
            .copied()
            .filter(|&c| leaves_reserved(hand, &wishlist, c, route.length))
            .min_by_key(|&c| hand.get(c));
        debug!("Paying for {:?} with {:?}", route.id, colour);
        colour
    }

    fn select_ticket_offer(&mut self, view: &GameView<'_>, offer: &[Ticket]) -> Vec<Ticket> {
        if offer.is_empty() {
            return Vec::new();
        }
        let min = min_keep(view, offer);

        let options: Vec<TicketOption> = (1u32..1 << offer.len())
            .filter(|mask| mask.count_ones() as usize >= min)
            .map(|mask| {
                let tickets: Vec<Ticket> = offer
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, t)| *t)
                    .collect();
                let plan = self.plan_for(view, &tickets);
                let cost = plan.as_ref().map(|p| p.length(view.board));
                TicketOption {
                    tickets,
                    plan,
                    cost,
                }
            })
            .collect();

        let turns_until_end = self.turns_until_end(view);
        let pool = unseen_pool(view);
        let mut ranked = Vec::new();
        for (idx, option) in options.iter().enumerate() {
            let (plan, cost) = match (&option.plan, option.cost) {
                (Some(plan), Some(cost)) if cost <= view.player.trains => (plan, cost),
                _ => continue,
            };
            let value: u32 = option.tickets.iter().map(|t| t.value).sum();
            let value = value as f64 / cost.max(1) as f64;
            let turns_left = match self.turn_cost(view, plan, &pool) {
                Some(turns) => turns_until_end as i64 - turns as i64,
                None => i64::MIN,
            };
            trace!(
                "Tickets {:?}: cost {} value {:.3} turns left {}",
                option.tickets.iter().map(|t| t.id).collect::<Vec<_>>(),
                cost,
                value,
                turns_left
            );
            ranked.push((idx, value / turns_until_end.max(1) as f64, turns_left));
        }
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.2.cmp(&a.2)));

        if let Some(&(idx, _, turns_left)) = ranked.first() {
            if turns_left > 0 {
                debug!("Keeping {:?}", options[idx].tickets);
                return options[idx].tickets.clone();
            }
        }

        let fallback = options
            .iter()
            .filter(|o| o.tickets.len() == min)
            .min_by_key(|o| o.cost.unwrap_or(u32::MAX))
            .map(|o| o.tickets.clone())
            .unwrap_or_default();
        debug!("No option finishes in time, keeping {:?}", fallback);
        fallback
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ttr_engine::{CityId, Market, Opponent, Player, PlayerId, RouteColour};

    fn board() -> Board {
        let mut board = Board::new();
        let routes = [
            ("A", "B", 3, RouteColour::Colour(Colour::Red)),
            ("B", "C", 2, RouteColour::Colour(Colour::Red)),
            ("C", "D", 3, RouteColour::Colour(Colour::Green)),
            ("D", "E", 2, RouteColour::Grey),
            ("E", "F", 6, RouteColour::Colour(Colour::Blue)),
            ("F", "G", 6, RouteColour::Colour(Colour::Blue)),
            ("G", "H", 4, RouteColour::Colour(Colour::Black)),
        ];
        for &(a, b, len, colour) in routes.iter() {
            board.add_route(a, b, len, colour).unwrap();
        }
        board
    }

    fn ticket(board: &Board, id: u32, a: &str, b: &str, value: u32) -> Ticket {
        let city = |n: &str| -> CityId { board.city(n).unwrap() };
        Ticket {
            id,
            city0: city(a),
            city1: city(b),
            value,
            completed: false,
        }
    }

    fn player(hand: &[(Colour, u32)], tickets: Vec<Ticket>) -> Player {
        let mut player = Player::new(PlayerId(0));
        player.hand = hand.iter().copied().collect();
        player.tickets = tickets;
        player
    }

    fn market(colours: &[Colour]) -> Market {
        Market {
            face_up: colours.to_vec(),
            ..Market::default()
        }
    }

    fn bot() -> PlannerBot {
        PlannerBot::new(PolicyConfig::new(0.5).unwrap().with_trials(50))
    }

    fn view<'a>(
        board: &'a Board,
        player: &'a Player,
        opponents: &'a [Opponent],
        market: &'a Market,
    ) -> GameView<'a> {
        GameView {
            board,
            player,
            opponents,
            market,
        }
    }

    #[test]
    fn test_turn_action() {
        use Colour::*;

        let board = board();
        let opponents = Vec::new();
        let market = market(&[Blue, Red, Green, Red, Rainbow]);
        let mut bot = bot();

        let holding = player(&[(Red, 3)], vec![ticket(&board, 0, "A", "C", 5)]);
        let v = view(&board, &holding, &opponents, &market);
        assert_eq!(bot.choose_turn_action(&v), TurnAction::ClaimRoute);

        let empty = player(&[], vec![ticket(&board, 0, "A", "C", 5)]);
        let v = view(&board, &empty, &opponents, &market);
        assert_eq!(bot.choose_turn_action(&v), TurnAction::DrawTrains);

        let no_tickets = player(&[(Red, 3)], Vec::new());
        let v = view(&board, &no_tickets, &opponents, &market);
        assert_eq!(bot.choose_turn_action(&v), TurnAction::DrawTickets);
    }

    #[test]
    fn test_draw_prefers_wishlist() {
        use Colour::*;

        let board = board();
        let opponents = Vec::new();
        let mut bot = bot();
        let tickets = vec![ticket(&board, 0, "A", "C", 5)];

        let empty = player(&[], tickets.clone());
        let m = market(&[Blue, Red, Green, Red, Rainbow]);
        let v = view(&board, &empty, &opponents, &m);
        assert_eq!(
            bot.choose_draw_train_action(&v),
            vec![DrawChoice::FaceUp(1), DrawChoice::FaceUp(3)]
        );

        // Reds are covered, so fall back to the hand's other colours.
        let stocked = player(&[(Red, 5), (Green, 2)], tickets.clone());
        let v = view(&board, &stocked, &opponents, &m);
        assert_eq!(
            bot.choose_draw_train_action(&v),
            vec![DrawChoice::FaceUp(2), DrawChoice::Blind]
        );

        let m = market(&[Blue, Rainbow, Green, Blue, White]);
        let v = view(&board, &empty, &opponents, &m);
        assert_eq!(bot.choose_draw_train_action(&v), vec![DrawChoice::FaceUp(1)]);

        let m = market(&[Blue, Yellow, Green, Blue, White]);
        let v = view(&board, &empty, &opponents, &m);
        assert_eq!(
            bot.choose_draw_train_action(&v),
            vec![DrawChoice::Blind, DrawChoice::Blind]
        );
    }

    #[test]
    fn test_route_to_claim_follows_plan() {
        use Colour::*;

        let board = board();
        let opponents = Vec::new();
        let m = market(&[]);
        let mut bot = bot();
        let holding = player(
            &[(Red, 3), (Black, 4)],
            vec![ticket(&board, 0, "A", "C", 5)],
        );
        let v = view(&board, &holding, &opponents, &m);

        let affordable = v.affordable_routes();
        let black = board.routes()[6].id;
        assert!(affordable.iter().any(|a| a.route == black));
        let pick = bot.choose_route_to_claim(&v, &affordable).unwrap();
        assert_eq!(pick.route, board.routes()[0].id);

        let off_plan: Vec<_> = affordable.into_iter().filter(|a| a.route == black).collect();
        let pick = bot.choose_route_to_claim(&v, &off_plan).unwrap();
        assert_eq!(pick.route, black);
        assert_eq!(bot.choose_route_to_claim(&v, &[]), None);
    }

    #[test]
    fn test_colour_to_spend_keeps_reserved() {
        use Colour::*;

        let board = board();
        let opponents = Vec::new();
        let m = market(&[]);
        let mut bot = bot();
        let holding = player(
            &[(Blue, 2), (Green, 3)],
            vec![ticket(&board, 0, "C", "E", 6)],
        );
        let v = view(&board, &holding, &opponents, &m);
        let grey = &board.routes()[3];

        assert_eq!(bot.choose_color_to_spend(&v, grey, &[Blue, Green]), Some(Blue));
        assert_eq!(bot.choose_color_to_spend(&v, grey, &[Green]), None);
    }

    #[test]
    fn test_grey_payment_matches_spend() {
        use Colour::*;

        let hand: CardCounts = [(Blue, 3), (Rainbow, 2)].iter().copied().collect();
        let wishlist = Wishlist::new().with(RouteColour::Colour(Blue), 1);
        // Paying four with blue spends all three blues, whatever locomotives are on offer.
        assert!(!grey_payable(&hand, &wishlist, 4, 2));
        assert!(grey_payable(&hand, &Wishlist::new(), 4, 2));

        let hand: CardCounts = [(Blue, 3), (Green, 5)].iter().copied().collect();
        assert!(grey_payable(&hand, &wishlist, 4, 0));
        assert!(!leaves_reserved(&hand, &wishlist, Blue, 4));
        assert!(leaves_reserved(&hand, &wishlist, Blue, 2));
        assert!(leaves_reserved(&hand, &wishlist, Green, 4));
    }

    #[test]
    fn test_keeps_only_affordable_ticket() {
        let board = board();
        let opponents = Vec::new();
        let m = market(&[]);
        let mut bot = bot();

        let mut holding = player(&[], vec![ticket(&board, 9, "G", "H", 4)]);
        holding.trains = 5;
        let offer = vec![
            ticket(&board, 1, "A", "B", 4),
            ticket(&board, 2, "E", "G", 20),
            ticket(&board, 3, "A", "D", 8),
        ];
        let v = view(&board, &holding, &opponents, &m);
        assert_eq!(bot.select_ticket_offer(&v, &offer), vec![offer[0]]);
    }

    #[test]
    fn test_first_offer_keeps_two() {
        let board = board();
        let opponents = Vec::new();
        let m = market(&[]);
        let mut bot = bot();

        let holding = player(&[], Vec::new());
        let offer = vec![
            ticket(&board, 1, "A", "B", 4),
            ticket(&board, 2, "B", "C", 3),
            ticket(&board, 3, "E", "H", 20),
        ];
        let v = view(&board, &holding, &opponents, &m);
        let kept = bot.select_ticket_offer(&v, &offer);
        assert!(kept.len() >= 2);
        assert!(kept.iter().all(|t| offer.contains(t)));
    }
}
