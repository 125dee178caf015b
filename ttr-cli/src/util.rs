use thiserror::Error;

use ttr_bot::{DrawChoice, GameView, Plan, Wishlist};
use ttr_engine::{Board, Engine, Market, PlayerId, Route};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No way to connect {0} with the routes still open")]
    NoPlan(String),
}

/// Runs `f` against what player `id` can see in `engine`.
pub fn with_view<T, F>(engine: &Engine, id: PlayerId, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&GameView<'_>) -> T,
{
    let player = engine.player(id)?;
    let opponents = engine.opponents_of(id);
    let market = engine.market();
    let view = GameView {
        board: engine.board(),
        player,
        opponents: &opponents,
        market: &market,
    };
    Ok(f(&view))
}

pub fn describe_route(board: &Board, route: &Route) -> String {
    format!(
        "{} - {} ({} {})",
        board.city_name(route.city0),
        board.city_name(route.city1),
        route.length,
        route.colour
    )
}

pub fn describe_draw(market: &Market, choice: DrawChoice) -> String {
    match choice {
        DrawChoice::FaceUp(slot) => match market.face_up().get(slot) {
            Some(colour) => format!("face up card {} ({:?})", slot, colour),
            None => format!("face up card {}", slot),
        },
        DrawChoice::Blind => "top of the deck".to_string(),
    }
}

pub fn describe_wishlist(wishlist: &Wishlist) -> String {
    if wishlist.is_empty() {
        return "nothing".to_string();
    }
    format!(
        "{:?} plus grey {:?} ({} cards)",
        wishlist.colours(),
        wishlist.grey(),
        wishlist.total_cards()
    )
}

pub fn print_plan(board: &Board, plan: &Plan) {
    println!(
        "{} routes, {} trains, cost {:.2}",
        plan.routes.len(),
        plan.length(board),
        plan.cost
    );
    for &id in plan.routes.iter() {
        println!("  {}", describe_route(board, board.route(id)));
    }
    println!("Cards needed: {}", describe_wishlist(&plan.wishlist));
}
