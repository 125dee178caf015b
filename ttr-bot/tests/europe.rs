use ttr_bot::{
    decide, Accessibility, Decision, GameView, Plan, PlannerBot, Planner, PolicyConfig, Strategy,
    Wishlist,
};
use ttr_engine::{Board, CityId, Colour, DistanceTable, Engine, Europe, Player, PlayerId};

const ME: PlayerId = PlayerId(0);
const THEM: PlayerId = PlayerId(1);

fn full_supply() -> Accessibility {
    Accessibility::from_counts(Colour::ALL.iter().map(|&c| (c, c.supply())).collect())
}

fn city(board: &Board, name: &str) -> CityId {
    board.city(name).unwrap()
}

fn plan(board: &Board, from: &str, to: &[&str]) -> Option<Plan> {
    let distances = DistanceTable::compute(board);
    let acc = full_supply();
    let goals: Vec<_> = to.iter().map(|n| city(board, n)).collect();
    Planner::new(board, &distances, &acc, ME)
        .with_max_expansions(50_000)
        .find_path(city(board, from), goals)
}

fn europe() -> Board {
    Engine::new::<Europe>(5, 2).board().clone()
}

#[test]
fn returned_wishlist_replays_within_supply() {
    let mut board = europe();
    // Hand every fourth route to the opponent.
    let taken: Vec<_> = board.routes().iter().step_by(4).map(|r| r.id).collect();
    for id in taken {
        board.claim(id, THEM).unwrap();
    }

    for &(from, to) in [
        ("Lisboa", &["Moskva"][..]),
        ("Edinburgh", &["Athina"][..]),
        ("Brest", &["Wien", "Roma"][..]),
    ]
    .iter()
    {
        let plan = match plan(&board, from, to) {
            Some(plan) => plan,
            None => continue,
        };
        let mut replay = Wishlist::new();
        for &id in plan.routes.iter() {
            let route = board.route(id);
            assert_eq!(route.owner, None, "{} to {:?} used {:?}", from, to, route);
            replay.add(route.colour, route.length);
        }
        assert_eq!(replay, plan.wishlist);
        assert!(replay.is_feasible());
        let totals = replay.assigned();
        for c in Colour::ALL.iter() {
            assert!(totals.get(*c) <= c.supply());
        }
    }
}

#[test]
fn owned_connection_needs_nothing() {
    let mut board = europe();
    let first = plan(&board, "Paris", &["Berlin"]).unwrap();
    assert!(!first.routes.is_empty());
    for &id in first.routes.iter() {
        board.claim(id, ME).unwrap();
    }

    let again = plan(&board, "Paris", &["Berlin"]).unwrap();
    assert!(again.routes.is_empty());
    assert!(again.wishlist.is_empty());
}

#[test]
fn planning_is_repeatable() {
    let board = europe();
    let a = plan(&board, "Madrid", &["Zurich", "Kobenhavn"]);
    let b = plan(&board, "Madrid", &["Zurich", "Kobenhavn"]);
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[test]
fn cut_off_city_is_infeasible() {
    let mut board = europe();
    let edinburgh = city(&board, "Edinburgh");
    let exits: Vec<_> = board.adjacency(edinburgh).map(|r| r.id).collect();
    for id in exits {
        board.claim(id, THEM).unwrap();
    }
    assert_eq!(plan(&board, "Paris", &["Edinburgh"]), None);
}

#[test]
fn opening_advice_is_playable() {
    let mut engine = Engine::new::<Europe>(1234, 3);
    let config = PolicyConfig::new(0.3).unwrap().with_trials(40);
    let mut bot = PlannerBot::new(config);

    let view_of = |engine: &Engine, player: &Player| {
        (engine.opponents_of(player.id), engine.market())
    };

    let kept = {
        let player = engine.player(ME).unwrap();
        let (opponents, market) = view_of(&engine, player);
        let view = GameView {
            board: engine.board(),
            player,
            opponents: &opponents,
            market: &market,
        };
        bot.select_ticket_offer(&view, engine.pending_offer(ME))
    };
    assert!(kept.len() >= 2);
    engine.keep_tickets(ME, &kept).unwrap();

    let player = engine.player(ME).unwrap();
    let (opponents, market) = view_of(&engine, player);
    let view = GameView {
        board: engine.board(),
        player,
        opponents: &opponents,
        market: &market,
    };
    match decide(&mut bot, &view) {
        Decision::Draw(picks) => assert!(!picks.is_empty() && picks.len() <= 2),
        Decision::Claim { route, .. } => {
            assert!(view.affordable_routes().iter().any(|a| a.route == route))
        }
        Decision::DrawTickets => panic!("holding incomplete tickets"),
    }
}
