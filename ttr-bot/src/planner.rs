//! Multi-goal best-first route search.
//!
//! The planner looks for a simple path from a start city through every goal
//! city, paying for unclaimed routes in accessibility-weighted cards. Routes the
//! player already owns are free and routes anyone else owns are impassable.
//! Every successor carries its own copy of the wishlist, and any successor whose
//! wishlist could not be paid for out of the full deck is dropped.
//!
//! The heuristic sums raw shortest distances to the remaining goals. Traversal
//! costs are discounted by accessibility, so the heuristic can overestimate.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, BinaryHeap, HashMap},
};

use log::*;
use ttr_engine::{Board, CityId, DistanceTable, PlayerId, RouteId, Ticket};

use crate::{
    accessibility::Accessibility,
    view::goal_cities,
    wishlist::{Signature, Wishlist},
};

pub const DEFAULT_MAX_EXPANSIONS: usize = 250_000;

/// A connection plan: the routes still to claim, in path order, and the cards they need.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub routes: Vec<RouteId>,
    pub wishlist: Wishlist,
    pub cost: f64,
}

impl Plan {
    pub fn contains(&self, route: RouteId) -> bool {
        self.routes.contains(&route)
    }

    /// Trains needed to claim every route in the plan.
    pub fn length(&self, board: &Board) -> u32 {
        self.routes.iter().map(|&id| board.route(id).length).sum()
    }
}

pub struct Planner<'a> {
    board: &'a Board,
    distances: &'a DistanceTable,
    accessibility: &'a Accessibility,
    player: PlayerId,
    max_expansions: usize,
}

#[derive(Debug, Clone)]
struct State {
    city: CityId,
    remaining: BTreeSet<CityId>,
    cost: f64,
    path: Vec<RouteId>,
    visited: BTreeSet<CityId>,
    wishlist: Wishlist,
}

struct Entry {
    priority: f64,
    seq: u64,
    state: State,
}

// Min-heap on priority, then on insertion order.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

#[derive(Debug, Default)]
struct Stats {
    expanded: usize,
    pruned: usize,
    dominated: usize,
}

impl<'a> Planner<'a> {
    pub fn new(
        board: &'a Board,
        distances: &'a DistanceTable,
        accessibility: &'a Accessibility,
        player: PlayerId,
    ) -> Self {
        Planner {
            board,
            distances,
            accessibility,
            player,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    /// Caps how many states one search may expand before giving up.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Plans a connection for every city on `tickets`, starting from the lowest city id.
    pub fn plan_tickets<'t, I>(&self, tickets: I) -> Option<Plan>
    where
        I: IntoIterator<Item = &'t Ticket>,
    {
        let mut goals = goal_cities(tickets);
        let start = *goals.iter().next()?;
        goals.remove(&start);
        self.find_path(start, goals)
    }

    /// Cheapest simple path from `start` visiting every goal, or `None` if
    /// ownership and card supply leave no way through.
    pub fn find_path<I>(&self, start: CityId, goals: I) -> Option<Plan>
    where
        I: IntoIterator<Item = CityId>,
    {
        let mut remaining: BTreeSet<CityId> = goals.into_iter().collect();
        remaining.remove(&start);

        let mut heap = BinaryHeap::new();
        let mut best: HashMap<(CityId, BTreeSet<CityId>, Signature), f64> = HashMap::new();
        let mut seq = 0u64;
        let mut stats = Stats::default();

        let priority = self.heuristic(start, &remaining)?;
        let mut visited = BTreeSet::new();
        visited.insert(start);
        heap.push(Entry {
            priority: priority as f64,
            seq,
            state: State {
                city: start,
                remaining,
                cost: 0.0,
                path: Vec::new(),
                visited,
                wishlist: Wishlist::new(),
            },
        });

        while let Some(Entry { state, .. }) = heap.pop() {
            let key = (
                state.city,
                state.remaining.clone(),
                state.wishlist.signature(),
            );
            if best.get(&key).map_or(false, |&seen| seen <= state.cost) {
                stats.dominated += 1;
                continue;
            }
            best.insert(key, state.cost);

            if state.remaining.is_empty() {
                debug!("Plan found: {:?}", stats);
                return Some(self.finish(state));
            }

            stats.expanded += 1;
            if stats.expanded > self.max_expansions {
                warn!("Search gave up after {} expansions", self.max_expansions);
                return None;
            }

            for route in self.board.adjacency(state.city) {
                if route.blocked_for(self.player) {
                    continue;
                }
                let next = route.other(state.city);
                if state.visited.contains(&next) {
                    continue;
                }

                let owned = route.owned_by(self.player);
                let (route_cost, wishlist) = if owned {
                    (0.0, state.wishlist.clone())
                } else {
                    let cost = route.length as f64 * self.accessibility.multiplier(route.colour);
                    (cost, state.wishlist.with(route.colour, route.length))
                };
                if !wishlist.is_feasible() {
                    stats.pruned += 1;
                    continue;
                }

                let mut remaining = state.remaining.clone();
                remaining.remove(&next);
                let h = match self.heuristic(next, &remaining) {
                    Some(h) => h,
                    None => {
                        stats.pruned += 1;
                        continue;
                    }
                };

                let cost = state.cost + route_cost;
                let mut path = state.path.clone();
                path.push(route.id);
                let mut visited = state.visited.clone();
                visited.insert(next);

                seq += 1;
                heap.push(Entry {
                    priority: cost + h as f64,
                    seq,
                    state: State {
                        city: next,
                        remaining,
                        cost,
                        path,
                        visited,
                        wishlist,
                    },
                });
            }
        }

        debug!("No plan: {:?}", stats);
        None
    }

    /// Sum of raw distances to each remaining goal; `None` if one is unreachable.
    fn heuristic(&self, city: CityId, remaining: &BTreeSet<CityId>) -> Option<u32> {
        remaining
            .iter()
            .map(|&goal| self.distances.get(city, goal))
            .sum()
    }

    fn finish(&self, state: State) -> Plan {
        let routes = state
            .path
            .into_iter()
            .filter(|&id| !self.board.route(id).owned_by(self.player))
            .collect();
        Plan {
            routes,
            wishlist: state.wishlist,
            cost: state.cost,
        }
    }
}
