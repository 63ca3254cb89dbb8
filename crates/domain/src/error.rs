// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{CityId, ParcelStatus, RiderId, TrackingId};

/// Errors that can occur during domain validation and rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A name field is empty or invalid.
    InvalidName(String),
    /// Parcel weight is not a positive number.
    InvalidWeight(f64),
    /// Rider capacity is not a positive number.
    InvalidCapacity(f64),
    /// Route distance must be positive.
    InvalidDistance(u32),
    /// Priority value is outside 1..=3.
    InvalidPriority(u8),
    /// Status string does not name a parcel status.
    InvalidStatus(String),
    /// Weight category string is not recognised.
    InvalidWeightCategory(String),
    /// Location event string is not recognised.
    InvalidLocationEvent(String),
    /// A route or parcel has the same city at both ends.
    SameEndpoints(CityId),
    /// City does not exist.
    CityNotFound(CityId),
    /// Parcel does not exist.
    ParcelNotFound(TrackingId),
    /// Rider does not exist.
    RiderNotFound(RiderId),
    /// No route joins the two cities.
    RouteNotFound {
        /// One end.
        a: CityId,
        /// The other end.
        b: CityId,
    },
    /// No unblocked path joins the two cities.
    NoPath {
        /// Start city.
        source: CityId,
        /// Target city.
        dest: CityId,
    },
    /// The status change is not permitted from the current status.
    InvalidTransition {
        /// The parcel.
        tracking_id: TrackingId,
        /// Current status.
        from: ParcelStatus,
        /// Requested status.
        to: ParcelStatus,
    },
    /// The parcel has reached a terminal status and can no longer be worked on.
    ParcelClosed {
        /// The parcel.
        tracking_id: TrackingId,
        /// Its terminal status.
        status: ParcelStatus,
    },
    /// Assigning the parcel would overload the rider.
    CapacityExceeded {
        /// The rider.
        rider_id: RiderId,
        /// Rider capacity.
        capacity: f64,
        /// Rider load before the assignment.
        current_load: f64,
        /// Weight of the parcel being assigned.
        weight: f64,
    },
    /// The parcel already has an active rider assignment.
    AlreadyAssigned {
        /// The parcel.
        tracking_id: TrackingId,
        /// The rider currently holding it.
        rider_id: RiderId,
    },
    /// No rider can carry the parcel.
    NoRiderAvailable(TrackingId),
    /// The rider still carries parcels and cannot be removed.
    RiderHasAssignments {
        /// The rider.
        rider_id: RiderId,
        /// Number of parcels still assigned.
        count: usize,
    },
    /// Two records of the same kind share an id.
    DuplicateId {
        /// The kind of record (`city`, `parcel`, `rider`).
        record: &'static str,
        /// The repeated id.
        id: u32,
    },
    /// The id counter for a kind of record cannot advance any further.
    IdsExhausted(&'static str),
    /// A rider's load does not match the parcels assigned to it.
    LoadMismatch {
        /// The rider.
        rider_id: RiderId,
        /// Load recorded on the rider.
        current_load: f64,
        /// Total weight of the assigned parcels.
        assigned_weight: f64,
    },
    /// New capacity would be below the load the rider already carries.
    CapacityBelowLoad {
        /// The rider.
        rider_id: RiderId,
        /// Requested capacity.
        capacity: f64,
        /// Current load.
        current_load: f64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidWeight(weight) => {
                write!(f, "Invalid weight: {weight}. Must be greater than 0")
            }
            Self::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {capacity}. Must be greater than 0")
            }
            Self::InvalidDistance(distance) => {
                write!(f, "Invalid distance: {distance}. Must be greater than 0")
            }
            Self::InvalidPriority(value) => {
                write!(f, "Invalid priority: {value}. Must be 1, 2 or 3")
            }
            Self::InvalidStatus(status) => write!(f, "Invalid parcel status: '{status}'"),
            Self::InvalidWeightCategory(category) => {
                write!(f, "Invalid weight category: '{category}'")
            }
            Self::InvalidLocationEvent(event) => write!(f, "Invalid location event: '{event}'"),
            Self::SameEndpoints(city_id) => {
                write!(f, "Source and destination must differ, both are city {city_id}")
            }
            Self::CityNotFound(city_id) => write!(f, "City {city_id} not found"),
            Self::ParcelNotFound(tracking_id) => write!(f, "Parcel {tracking_id} not found"),
            Self::RiderNotFound(rider_id) => write!(f, "Rider {rider_id} not found"),
            Self::RouteNotFound { a, b } => {
                write!(f, "No route between city {a} and city {b}")
            }
            Self::NoPath { source, dest } => {
                write!(f, "No unblocked path from city {source} to city {dest}")
            }
            Self::InvalidTransition {
                tracking_id,
                from,
                to,
            } => {
                write!(
                    f,
                    "Parcel {tracking_id} cannot move from {from} to {to}"
                )
            }
            Self::ParcelClosed {
                tracking_id,
                status,
            } => {
                write!(f, "Parcel {tracking_id} is already {status}")
            }
            Self::CapacityExceeded {
                rider_id,
                capacity,
                current_load,
                weight,
            } => {
                write!(
                    f,
                    "Rider {rider_id} capacity exceeded: load {current_load} + parcel {weight} > capacity {capacity}"
                )
            }
            Self::AlreadyAssigned {
                tracking_id,
                rider_id,
            } => {
                write!(
                    f,
                    "Parcel {tracking_id} is already assigned to rider {rider_id}"
                )
            }
            Self::NoRiderAvailable(tracking_id) => {
                write!(f, "No rider can carry parcel {tracking_id}")
            }
            Self::RiderHasAssignments { rider_id, count } => {
                write!(
                    f,
                    "Rider {rider_id} still carries {count} assigned parcel(s)"
                )
            }
            Self::DuplicateId { record, id } => write!(f, "Duplicate {record} id {id}"),
            Self::IdsExhausted(record) => write!(f, "No {record} ids left to issue"),
            Self::LoadMismatch {
                rider_id,
                current_load,
                assigned_weight,
            } => {
                write!(
                    f,
                    "Rider {rider_id} load {current_load} does not match assigned weight {assigned_weight}"
                )
            }
            Self::CapacityBelowLoad {
                rider_id,
                capacity,
                current_load,
            } => {
                write!(
                    f,
                    "Rider {rider_id} capacity {capacity} would be below current load {current_load}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
