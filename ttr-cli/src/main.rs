use anyhow::Context;
use log::*;
use structopt::StructOpt;

use ttr_bot::{decide, Accessibility, Decision, PlannerBot, PolicyConfig, Planner, Strategy};
use ttr_engine::{DistanceTable, Engine, Europe, PlayerId};

mod util;

use util::CliError;

#[derive(Debug, StructOpt)]
#[structopt(name = "ttr", about = "Ticket to ride route planner and move advisor")]
struct Opt {
    /// Log decisions, repeat for search details
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Plan the cheapest connection between cities on the Europe map
    Plan {
        /// City to start from
        #[structopt(long)]
        from: String,

        /// Cities to reach
        #[structopt(long, required = true)]
        to: Vec<String>,

        /// Seed for the dealt market and hand
        #[structopt(long, default_value = "1")]
        seed: u32,
    },
    /// Deal an opening position and print the first player's move
    Advise {
        #[structopt(long, default_value = "1")]
        seed: u32,

        #[structopt(long, default_value = "3")]
        players: u32,

        /// Risk appetite between 0 and 1
        #[structopt(long, default_value = "0.5")]
        risk: f64,

        /// Monte Carlo trials per ticket option
        #[structopt(long, default_value = "200")]
        trials: u32,
    },
}

fn plan(from: &str, to: &[String], seed: u32) -> anyhow::Result<()> {
    let engine = Engine::new::<Europe>(seed, 2);
    let board = engine.board();
    let start = board.resolve(from)?;
    let goals = to
        .iter()
        .map(|name| board.resolve(name))
        .collect::<Result<Vec<_>, _>>()?;

    let distances = DistanceTable::compute(board);
    let me = PlayerId(0);
    let plan = util::with_view(&engine, me, |view| {
        let accessibility = Accessibility::estimate(view);
        debug!("Accessibility {:?}", accessibility.counts());
        Planner::new(board, &distances, &accessibility, me).find_path(start, goals.iter().copied())
    })?;

    let plan = plan.ok_or_else(|| CliError::NoPlan(format!("{} to {}", from, to.join(", "))))?;
    util::print_plan(board, &plan);

    let mut after = board.clone();
    for &id in plan.routes.iter() {
        after
            .claim(id, me)
            .with_context(|| format!("Planned route {:?} is not open", id))?;
    }
    let claimed = after.routes_claimed_by(me).count();
    let joined = goals.iter().all(|&g| after.is_connected(me, start, g));
    println!(
        "After claiming: {} routes, longest trail {}, connected {}",
        claimed,
        after.longest_path(me),
        joined
    );
    Ok(())
}

fn advise(seed: u32, players: u32, risk: f64, trials: u32) -> anyhow::Result<()> {
    let config = PolicyConfig::new(risk)
        .context("Invalid --risk")?
        .with_seed(seed)
        .with_trials(trials);
    let mut engine = Engine::new::<Europe>(seed, players.max(1));
    let mut bots: Vec<PlannerBot> = (0..players.max(1))
        .map(|i| PlannerBot::new(config.clone().with_seed(seed.wrapping_add(i))))
        .collect();

    for (i, bot) in bots.iter_mut().enumerate() {
        let id = PlayerId(i as u32);
        let kept = util::with_view(&engine, id, |view| {
            bot.select_ticket_offer(view, engine.pending_offer(id))
        })?;
        engine
            .keep_tickets(id, &kept)
            .with_context(|| format!("Player {} could not keep {:?}", i, kept))?;
        info!("Player {} keeps {} tickets", i, kept.len());
    }

    let me = PlayerId(0);
    let board = engine.board();
    let player = engine.player(me)?;
    println!("Hand: {:?}", player.hand);
    println!("Face up: {:?}", engine.market().face_up());
    for ticket in player.tickets.iter() {
        println!(
            "Ticket: {} - {} ({})",
            board.city_name(ticket.city0),
            board.city_name(ticket.city1),
            ticket.value
        );
    }

    let decision = util::with_view(&engine, me, |view| decide(&mut bots[0], view))?;
    let market = engine.market();
    match decision {
        Decision::Draw(picks) => {
            let picks: Vec<_> = picks
                .into_iter()
                .map(|p| util::describe_draw(&market, p))
                .collect();
            println!("Draw: {}", picks.join(", then "));
        }
        Decision::Claim {
            route,
            locomotives,
            colour,
        } => println!(
            "Claim: {} with {:?} and {} locomotives",
            util::describe_route(board, board.route(route)),
            colour,
            locomotives
        ),
        Decision::DrawTickets => println!("Draw destination tickets"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Opt::from_args();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder().filter(Some("ttr"), level).init();

    match args.cmd {
        Command::Plan { from, to, seed } => plan(&from, &to, seed),
        Command::Advise {
            seed,
            players,
            risk,
            trials,
        } => advise(seed, players, risk, trials),
    }
}
