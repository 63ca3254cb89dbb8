// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route network queries: edge lookup, blocking, and shortest paths.
//!
//! Routes are undirected. A blocked route stays part of the network but is
//! never relaxed during a path search.
//!
//! Path searches are deterministic. The frontier is ordered by
//! `(distance, city id)`, so among equally distant cities the lowest id is
//! settled first, and when two predecessors give a city the same distance the
//! lower city id wins.

use crate::error::DomainError;
use crate::types::{City, CityId, Route};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Finds the first route joining `a` and `b`, in either orientation.
#[must_use]
pub fn find_edge(routes: &[Route], a: CityId, b: CityId) -> Option<&Route> {
    routes.iter().find(|route| route.connects(a, b))
}

/// Sets the `blocked` flag on the route(s) joining `a` and `b`.
///
/// When duplicate routes join the same pair, all of them are updated so the
/// pair is either usable or not.
///
/// # Returns
///
/// The first matching route after the update.
///
/// # Errors
///
/// Returns `DomainError::RouteNotFound` if no route joins the two cities.
pub fn set_blocked(
    routes: &mut [Route],
    a: CityId,
    b: CityId,
    blocked: bool,
) -> Result<Route, DomainError> {
    let mut first: Option<Route> = None;
    for route in routes.iter_mut().filter(|route| route.connects(a, b)) {
        route.blocked = blocked;
        if first.is_none() {
            first = Some(route.clone());
        }
    }
    first.ok_or(DomainError::RouteNotFound { a, b })
}

/// Returns every route that is currently blocked.
#[must_use]
pub fn blocked_routes(routes: &[Route]) -> Vec<&Route> {
    routes.iter().filter(|route| route.blocked).collect()
}

/// A path through the network and its total length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// Sum of the route distances along the path.
    pub total_distance: u64,
    /// Cities visited, source first and destination last.
    pub path: Vec<CityId>,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: CityId,
    distance: u32,
    blocked: bool,
}

/// Normalised key for the undirected pair `a`-`b`.
fn edge_key(a: CityId, b: CityId) -> (CityId, CityId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Adjacency view of the city and route collections.
///
/// A graph is built per query from the collaborator's records and holds no
/// state between queries.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    cities: BTreeSet<CityId>,
    adjacency: BTreeMap<CityId, Vec<Edge>>,
}

impl RouteGraph {
    /// Builds the adjacency lists for `cities` and `routes`.
    #[must_use]
    pub fn new(cities: &[City], routes: &[Route]) -> Self {
        let mut adjacency: BTreeMap<CityId, Vec<Edge>> = BTreeMap::new();
        for route in routes {
            adjacency.entry(route.source_id).or_default().push(Edge {
                to: route.dest_id,
                distance: route.distance,
                blocked: route.blocked,
            });
            adjacency.entry(route.dest_id).or_default().push(Edge {
                to: route.source_id,
                distance: route.distance,
                blocked: route.blocked,
            });
        }
        Self {
            cities: cities.iter().map(|city| city.id).collect(),
            adjacency,
        }
    }

    /// Checks whether the city is part of the network.
    #[must_use]
    pub fn contains(&self, city_id: CityId) -> bool {
        self.cities.contains(&city_id)
    }

    /// Returns the length of the shortest unblocked direct route between two
    /// cities, if one exists.
    #[must_use]
    pub fn direct_distance(&self, a: CityId, b: CityId) -> Option<u32> {
        self.adjacency
            .get(&a)?
            .iter()
            .filter(|edge| edge.to == b && !edge.blocked)
            .map(|edge| edge.distance)
            .min()
    }

    /// Computes the shortest unblocked path from `source` to `dest`.
    ///
    /// A query from a city to itself yields a zero-length path containing
    /// only that city.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either city does not exist
    /// - No unblocked path joins the two cities
    pub fn shortest_path(&self, source: CityId, dest: CityId) -> Result<PathResult, DomainError> {
        self.check_endpoints(source, dest)?;
        self.search(source, dest, &BTreeSet::new())
            .ok_or(DomainError::NoPath { source, dest })
    }

    /// Computes up to `count` distinct paths from `source` to `dest`, shortest first.
    ///
    /// The first path is the shortest path. Each further path is the cheapest
    /// path, not already found, that avoids one route of an already found
    /// path. Ties are broken by the lexicographically smallest city sequence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CityNotFound` if either city does not exist. An
    /// unreachable destination yields an empty list.
    pub fn alternative_routes(
        &self,
        source: CityId,
        dest: CityId,
        count: usize,
    ) -> Result<Vec<PathResult>, DomainError> {
        self.check_endpoints(source, dest)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let Some(first) = self.search(source, dest, &BTreeSet::new()) else {
            return Ok(Vec::new());
        };

        let mut found: Vec<PathResult> = vec![first];
        while found.len() < count {
            let mut best: Option<PathResult> = None;
            for known in &found {
                for hop in known.path.windows(2) {
                    let excluded: BTreeSet<(CityId, CityId)> =
                        BTreeSet::from([edge_key(hop[0], hop[1])]);
                    let Some(candidate) = self.search(source, dest, &excluded) else {
                        continue;
                    };
                    if found.iter().any(|path| path.path == candidate.path) {
                        continue;
                    }
                    let better: bool = best.as_ref().is_none_or(|current| {
                        (candidate.total_distance, &candidate.path)
                            < (current.total_distance, &current.path)
                    });
                    if better {
                        best = Some(candidate);
                    }
                }
            }
            match best {
                Some(next) => found.push(next),
                None => break,
            }
        }
        Ok(found)
    }

    fn check_endpoints(&self, source: CityId, dest: CityId) -> Result<(), DomainError> {
        if !self.contains(source) {
            return Err(DomainError::CityNotFound(source));
        }
        if !self.contains(dest) {
            return Err(DomainError::CityNotFound(dest));
        }
        Ok(())
    }

    /// Dijkstra over unblocked edges not listed in `excluded`.
    fn search(
        &self,
        source: CityId,
        dest: CityId,
        excluded: &BTreeSet<(CityId, CityId)>,
    ) -> Option<PathResult> {
        let mut distances: BTreeMap<CityId, u64> = BTreeMap::new();
        let mut predecessors: BTreeMap<CityId, CityId> = BTreeMap::new();
        let mut settled: BTreeSet<CityId> = BTreeSet::new();
        let mut frontier: BinaryHeap<Reverse<(u64, CityId)>> = BinaryHeap::new();

        distances.insert(source, 0);
        frontier.push(Reverse((0, source)));

        while let Some(Reverse((distance, city))) = frontier.pop() {
            if !settled.insert(city) {
                continue;
            }
            if city == dest {
                break;
            }
            for edge in self.adjacency.get(&city).into_iter().flatten() {
                if edge.blocked
                    || settled.contains(&edge.to)
                    || excluded.contains(&edge_key(city, edge.to))
                {
                    continue;
                }
                let candidate: u64 = distance + u64::from(edge.distance);
                match distances.get(&edge.to) {
                    Some(&known) if candidate > known => {}
                    Some(&known) if candidate == known => {
                        if predecessors.get(&edge.to).is_some_and(|prev| city < *prev) {
                            predecessors.insert(edge.to, city);
                        }
                    }
                    _ => {
                        distances.insert(edge.to, candidate);
                        predecessors.insert(edge.to, city);
                        frontier.push(Reverse((candidate, edge.to)));
                    }
                }
            }
        }

        if !settled.contains(&dest) {
            return None;
        }
        let total_distance: u64 = *distances.get(&dest)?;

        let mut path: Vec<CityId> = vec![dest];
        let mut current: CityId = dest;
        while current != source {
            current = *predecessors.get(&current)?;
            path.push(current);
            if path.len() > settled.len() {
                return None;
            }
        }
        path.reverse();

        Some(PathResult {
            total_distance,
            path,
        })
    }
}
