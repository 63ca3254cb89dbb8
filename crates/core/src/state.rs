// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courier_audit::{AuditEvent, StateSnapshot};
use courier_domain::{
    City, CityId, DomainError, FIRST_RIDER_ID, FIRST_TRACKING_ID, Parcel, Rider, RiderId, Route,
    RouteGraph, TrackingId,
};
use serde::{Deserialize, Serialize};

use crate::record_validation::validate_records;

/// Identifier counters for parcels and riders.
///
/// Counters only move forward, and only when a create command succeeds, so an
/// id is never handed out twice even after the record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounters {
    /// The tracking id the next parcel receives.
    pub next_tracking_id: u32,
    /// The id the next rider receives.
    pub next_rider_id: u32,
}

impl IdCounters {
    /// Creates counters seeded at the first tracking and rider ids.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_tracking_id: FIRST_TRACKING_ID,
            next_rider_id: FIRST_RIDER_ID,
        }
    }

    pub(crate) fn issue_tracking_id(&mut self) -> Result<TrackingId, DomainError> {
        let id: TrackingId = TrackingId::new(self.next_tracking_id);
        self.next_tracking_id = following_id(self.next_tracking_id, "parcel")?;
        Ok(id)
    }

    pub(crate) fn issue_rider_id(&mut self) -> Result<RiderId, DomainError> {
        let id: RiderId = RiderId::new(self.next_rider_id);
        self.next_rider_id = following_id(self.next_rider_id, "rider")?;
        Ok(id)
    }
}

fn following_id(id: u32, record: &'static str) -> Result<u32, DomainError> {
    id.checked_add(1).ok_or(DomainError::IdsExhausted(record))
}

impl Default for IdCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete dispatch state: the route network, parcels, riders and the id
/// counters.
///
/// The state is only changed through [`crate::apply`]. Collections keep
/// insertion order, which is the order queue selection relies on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DispatchState {
    pub(crate) cities: Vec<City>,
    pub(crate) routes: Vec<Route>,
    pub(crate) parcels: Vec<Parcel>,
    pub(crate) riders: Vec<Rider>,
    pub(crate) counters: IdCounters,
}

impl DispatchState {
    /// Creates an empty state with fresh counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cities: Vec::new(),
            routes: Vec::new(),
            parcels: Vec::new(),
            riders: Vec::new(),
            counters: IdCounters::new(),
        }
    }

    /// Builds a state from records supplied by a collaborator.
    ///
    /// Counters are raised past the highest existing parcel and rider ids so
    /// that new records never collide with loaded ones.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Two records of the same kind share an id
    /// - A route, parcel or rider refers to a city that is not in `cities`
    /// - A record breaks its own invariants (same city at both ends, rider
    ///   load not matching its assigned parcels)
    /// - A loaded id leaves no room for the next one
    pub fn from_records(
        cities: Vec<City>,
        routes: Vec<Route>,
        parcels: Vec<Parcel>,
        riders: Vec<Rider>,
        counters: IdCounters,
    ) -> Result<Self, DomainError> {
        validate_records(&cities, &routes, &parcels, &riders)?;

        let mut next_tracking_id: u32 = counters.next_tracking_id;
        for parcel in &parcels {
            let following: u32 = following_id(parcel.tracking_id.value(), "parcel")?;
            next_tracking_id = next_tracking_id.max(following);
        }
        let mut next_rider_id: u32 = counters.next_rider_id;
        for rider in &riders {
            let following: u32 = following_id(rider.rider_id.value(), "rider")?;
            next_rider_id = next_rider_id.max(following);
        }

        Ok(Self {
            cities,
            routes,
            parcels,
            riders,
            counters: IdCounters {
                next_tracking_id,
                next_rider_id,
            },
        })
    }

    /// All cities, in creation order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// All routes, in creation order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// All parcels, in creation order.
    #[must_use]
    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    /// All riders, in creation order.
    #[must_use]
    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    /// The current id counters.
    #[must_use]
    pub const fn counters(&self) -> IdCounters {
        self.counters
    }

    /// Looks up a city.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CityNotFound` if the city does not exist.
    pub fn city(&self, city_id: CityId) -> Result<&City, DomainError> {
        self.cities
            .iter()
            .find(|city| city.id == city_id)
            .ok_or(DomainError::CityNotFound(city_id))
    }

    /// Looks up a parcel.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ParcelNotFound` if the parcel does not exist.
    pub fn parcel(&self, tracking_id: TrackingId) -> Result<&Parcel, DomainError> {
        self.parcels
            .iter()
            .find(|parcel| parcel.tracking_id == tracking_id)
            .ok_or(DomainError::ParcelNotFound(tracking_id))
    }

    /// Looks up a rider.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RiderNotFound` if the rider does not exist.
    pub fn rider(&self, rider_id: RiderId) -> Result<&Rider, DomainError> {
        self.riders
            .iter()
            .find(|rider| rider.rider_id == rider_id)
            .ok_or(DomainError::RiderNotFound(rider_id))
    }

    pub(crate) fn parcel_index(&self, tracking_id: TrackingId) -> Result<usize, DomainError> {
        self.parcels
            .iter()
            .position(|parcel| parcel.tracking_id == tracking_id)
            .ok_or(DomainError::ParcelNotFound(tracking_id))
    }

    pub(crate) fn rider_index(&self, rider_id: RiderId) -> Result<usize, DomainError> {
        self.riders
            .iter()
            .position(|rider| rider.rider_id == rider_id)
            .ok_or(DomainError::RiderNotFound(rider_id))
    }

    /// Builds a graph view of the current network.
    #[must_use]
    pub fn route_graph(&self) -> RouteGraph {
        RouteGraph::new(&self.cities, &self.routes)
    }

    /// The id the next city receives: one past the highest existing id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IdsExhausted` if the highest id is `u32::MAX`.
    pub fn next_city_id(&self) -> Result<CityId, DomainError> {
        let highest: u32 = self
            .cities
            .iter()
            .map(|city| city.id.value())
            .max()
            .unwrap_or(0);
        following_id(highest, "city").map(CityId::new)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "cities_count={},routes_count={},parcels_count={},riders_count={}",
            self.cities.len(),
            self.routes.len(),
            self.parcels.len(),
            self.riders.len()
        ))
    }
}

/// What a successful command produced, for the caller to hand back.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A city was created.
    City(City),
    /// A route was created or changed.
    Route(Route),
    /// A parcel was created or changed.
    Parcel(Parcel),
    /// A parcel was deleted.
    ParcelDeleted(TrackingId),
    /// A rider was created or changed.
    Rider(Rider),
    /// A rider was deleted.
    RiderDeleted(RiderId),
    /// A parcel was assigned to a rider.
    Assignment {
        /// The parcel after assignment.
        parcel: Parcel,
        /// The rider after assignment.
        rider: Rider,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: DispatchState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// The record(s) the command produced.
    pub outcome: Outcome,
}
