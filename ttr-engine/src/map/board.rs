use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, VecDeque},
};

use thiserror::Error;

use crate::{player::PlayerId, trains::RouteColour};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityId(u32);

impl CityId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(u32);

impl RouteId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One undirected track. Parallel tracks between the same cities are separate routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    pub city0: CityId,
    pub city1: CityId,
    pub length: u32,
    pub colour: RouteColour,
    pub owner: Option<PlayerId>,
}

impl Route {
    /// The endpoint opposite `city`. Callers only pass one of the route's endpoints.
    pub fn other(&self, city: CityId) -> CityId {
        if city == self.city0 {
            self.city1
        } else {
            self.city0
        }
    }

    pub fn owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Owned by someone other than `player`, so unusable to them.
    pub fn blocked_for(&self, player: PlayerId) -> bool {
        matches!(self.owner, Some(owner) if owner != player)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Unknown city {0:?}")]
    UnknownCity(String),
    #[error("Route from {0:?} back to itself")]
    SelfLoop(String),
    #[error("Route between {0:?} and {1:?} has zero length")]
    ZeroLength(String, String),
    #[error("Unknown route {0:?}")]
    UnknownRoute(RouteId),
    #[error("Route {0:?} already claimed by {1:?}")]
    AlreadyClaimed(RouteId, PlayerId),
}

/// Undirected multigraph of cities and routes with per-route ownership.
#[derive(Debug, Clone, Default)]
pub struct Board {
    names: Vec<String>,
    index: HashMap<String, CityId>,
    routes: Vec<Route>,
    adjacency: Vec<Vec<RouteId>>,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    /// Returns the id for `name`, adding the city if it is new.
    pub fn add_city(&mut self, name: &str) -> CityId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = CityId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    pub fn add_route(
        &mut self,
        city0: &str,
        city1: &str,
        length: u32,
        colour: RouteColour,
    ) -> Result<RouteId, BoardError> {
        if city0 == city1 {
            return Err(BoardError::SelfLoop(city0.to_string()));
        }
        if length == 0 {
            return Err(BoardError::ZeroLength(city0.to_string(), city1.to_string()));
        }
        let c0 = self.add_city(city0);
        let c1 = self.add_city(city1);
        let id = RouteId(self.routes.len() as u32);
        self.routes.push(Route {
            id,
            city0: c0,
            city1: c1,
            length,
            colour,
            owner: None,
        });
        self.adjacency[c0.index()].push(id);
        self.adjacency[c1.index()].push(id);
        Ok(id)
    }

    pub fn city(&self, name: &str) -> Option<CityId> {
        self.index.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> Result<CityId, BoardError> {
        self.city(name)
            .ok_or_else(|| BoardError::UnknownCity(name.to_string()))
    }

    pub fn city_name(&self, city: CityId) -> &str {
        &self.names[city.index()]
    }

    pub fn cities(&self) -> impl Iterator<Item = CityId> {
        (0..self.names.len() as u32).map(CityId)
    }

    pub fn num_cities(&self) -> usize {
        self.names.len()
    }

    pub fn route(&self, id: RouteId) -> &Route {
        &self.routes[id.index()]
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn adjacency(&self, city: CityId) -> impl Iterator<Item = &Route> + '_ {
        self.adjacency[city.index()]
            .iter()
            .map(move |&id| &self.routes[id.index()])
    }

    pub fn routes_between(&self, a: CityId, b: CityId) -> impl Iterator<Item = &Route> + '_ {
        self.adjacency(a).filter(move |r| r.other(a) == b)
    }

    pub fn available_routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().filter(|r| r.owner.is_none())
    }

    pub fn routes_claimed_by(&self, player: PlayerId) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().filter(move |r| r.owned_by(player))
    }

    /// Routes cannot be stolen once claimed.
    pub fn claim(&mut self, route: RouteId, player: PlayerId) -> Result<(), BoardError> {
        let route = self
            .routes
            .get_mut(route.index())
            .ok_or(BoardError::UnknownRoute(route))?;
        match route.owner {
            Some(owner) => Err(BoardError::AlreadyClaimed(route.id, owner)),
            None => {
                route.owner = Some(player);
                Ok(())
            }
        }
    }

    pub fn unclaim(&mut self, route: RouteId) -> Result<(), BoardError> {
        let route = self
            .routes
            .get_mut(route.index())
            .ok_or(BoardError::UnknownRoute(route))?;
        route.owner = None;
        Ok(())
    }

    /// Whether `player`'s own routes join `a` and `b`.
    pub fn is_connected(&self, player: PlayerId, a: CityId, b: CityId) -> bool {
        let mut seen = vec![false; self.num_cities()];
        let mut queue = VecDeque::new();
        seen[a.index()] = true;
        queue.push_back(a);
        while let Some(city) = queue.pop_front() {
            if city == b {
                return true;
            }
            for route in self.adjacency(city).filter(|r| r.owned_by(player)) {
                let next = route.other(city);
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Length of the longest trail through `player`'s routes, never reusing a route.
    pub fn longest_path(&self, player: PlayerId) -> u32 {
        let owned: Vec<Vec<RouteId>> = self
            .adjacency
            .iter()
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| self.route(*id).owned_by(player))
                    .collect()
            })
            .collect();
        let mut used = vec![false; self.routes.len()];
        let mut best = 0;

        for start in self.cities().filter(|c| !owned[c.index()].is_empty()) {
            // (city, next adjacency slot to try, route taken to get here)
            let mut stack: Vec<(CityId, usize, Option<RouteId>)> = vec![(start, 0, None)];
            let mut length = 0;
            while let Some(frame) = stack.last_mut() {
                let (city, cursor, via) = *frame;
                match owned[city.index()].get(cursor) {
                    Some(&id) => {
                        frame.1 += 1;
                        if used[id.index()] {
                            continue;
                        }
                        used[id.index()] = true;
                        let route = self.route(id);
                        length += route.length;
                        best = best.max(length);
                        stack.push((route.other(city), 0, Some(id)));
                    }
                    None => {
                        if let Some(id) = via {
                            used[id.index()] = false;
                            length -= self.route(id).length;
                        }
                        stack.pop();
                    }
                }
            }
        }
        best
    }
}

/// All-pairs shortest distances by raw route length, ignoring ownership.
#[derive(Debug, Clone)]
pub struct DistanceTable(Vec<Vec<Option<u32>>>);

impl DistanceTable {
    pub fn compute(board: &Board) -> Self {
        DistanceTable(board.cities().map(|c| dijkstra(board, c)).collect())
    }

    /// Number of cities the table was built for.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, from: CityId, to: CityId) -> Option<u32> {
        self.0
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
            .flatten()
    }
}

fn dijkstra(board: &Board, source: CityId) -> Vec<Option<u32>> {
    let mut dist = vec![None; board.num_cities()];
    let mut heap = BinaryHeap::new();
    dist[source.index()] = Some(0);
    heap.push(Reverse((0, source)));

    while let Some(Reverse((d, city))) = heap.pop() {
        if dist[city.index()].map_or(false, |best| d > best) {
            continue;
        }
        for route in board.adjacency(city) {
            let next = route.other(city);
            let nd = d + route.length;
            if dist[next.index()].map_or(true, |best| nd < best) {
                dist[next.index()] = Some(nd);
                heap.push(Reverse((nd, next)));
            }
        }
    }
    dist
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::trains::Colour;

    fn board(routes: &[(&str, &str, u32)]) -> Board {
        let mut board = Board::new();
        for (a, b, len) in routes {
            board
                .add_route(a, b, *len, RouteColour::Colour(Colour::Red))
                .unwrap();
        }
        board
    }

    #[test]
    fn test_rejects_bad_routes() {
        let mut board = Board::new();
        assert_eq!(
            board.add_route("A", "A", 2, RouteColour::Grey),
            Err(BoardError::SelfLoop("A".into()))
        );
        assert!(matches!(
            board.add_route("A", "B", 0, RouteColour::Grey),
            Err(BoardError::ZeroLength(..))
        ));
    }

    #[test]
    fn test_resolve() {
        let board = board(&[("A", "B", 2)]);
        assert_eq!(board.resolve("B"), Ok(board.city("B").unwrap()));
        assert_eq!(
            board.resolve("Z"),
            Err(BoardError::UnknownCity("Z".into()))
        );
    }

    #[test]
    fn test_parallel_routes() {
        let board = board(&[("A", "B", 2), ("A", "B", 2), ("B", "C", 1)]);
        let a = board.city("A").unwrap();
        let b = board.city("B").unwrap();
        assert_eq!(board.routes_between(a, b).count(), 2);
        assert_eq!(board.routes_between(b, a).count(), 2);
        assert_eq!(board.adjacency(b).count(), 3);
    }

    #[test]
    fn test_claim_cannot_steal() {
        let mut board = board(&[("A", "B", 2)]);
        let id = board.routes()[0].id;
        board.claim(id, PlayerId(0)).unwrap();
        assert_eq!(
            board.claim(id, PlayerId(1)),
            Err(BoardError::AlreadyClaimed(id, PlayerId(0)))
        );
        assert_eq!(board.available_routes().count(), 0);
        board.unclaim(id).unwrap();
        assert_eq!(board.available_routes().count(), 1);
    }

    #[test]
    fn test_distances() {
        let board = board(&[("A", "B", 3), ("B", "C", 2), ("A", "C", 7), ("D", "E", 1)]);
        let table = DistanceTable::compute(&board);
        let id = |n| board.city(n).unwrap();
        assert_eq!(table.get(id("A"), id("C")), Some(5));
        assert_eq!(table.get(id("C"), id("A")), Some(5));
        assert_eq!(table.get(id("A"), id("A")), Some(0));
        assert_eq!(table.get(id("A"), id("E")), None);
    }

    #[test]
    fn test_connectivity_and_longest_path() {
        let mut board = board(&[("A", "B", 3), ("B", "C", 2), ("C", "A", 4), ("C", "D", 1)]);
        let me = PlayerId(0);
        let ids: Vec<_> = board.routes().iter().map(|r| r.id).collect();
        for id in ids {
            board.claim(id, me).unwrap();
        }
        let id = |n| board.city(n).unwrap();
        assert!(board.is_connected(me, id("A"), id("D")));
        assert!(!board.is_connected(PlayerId(1), id("A"), id("D")));
        // D-C-B-A-C uses every route once.
        assert_eq!(board.longest_path(me), 10);
        assert_eq!(board.longest_path(PlayerId(1)), 0);
    }
}
