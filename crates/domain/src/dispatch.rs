// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rider assignment: capacity feasibility, load bookkeeping, and rider
//! recommendation.
//!
//! Assignment is a single-pair check. The caller proposes one parcel and one
//! rider; nothing here searches for a packing.

use crate::error::DomainError;
use crate::lifecycle::ensure_open;
use crate::route_graph::RouteGraph;
use crate::types::{City, CityId, Parcel, Rider};
use crate::validation::{validate_capacity, validate_city_exists, validate_name};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::OffsetDateTime;

/// Checks that `rider` can take `weight` more kilograms.
///
/// # Errors
///
/// Returns `DomainError::CapacityExceeded` when `current_load + weight`
/// would exceed the rider's capacity.
pub fn check_capacity(rider: &Rider, weight: f64) -> Result<(), DomainError> {
    if !rider.can_carry(weight) {
        return Err(DomainError::CapacityExceeded {
            rider_id: rider.rider_id,
            capacity: rider.capacity(),
            current_load: rider.current_load(),
            weight,
        });
    }
    Ok(())
}

/// Assigns `parcel` to `rider`.
///
/// On success the rider's load grows by the parcel weight, the parcel is
/// added to the rider's assigned parcels, the parcel records the rider, and
/// one history entry is appended.
///
/// # Errors
///
/// Returns an error if:
/// - The parcel is in a terminal status
/// - The parcel is already assigned to a rider
/// - The rider cannot carry the parcel
///
/// Neither record is changed on error.
pub fn assign(
    parcel: &mut Parcel,
    rider: &mut Rider,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    ensure_open(parcel)?;
    if let Some(rider_id) = parcel.assigned_rider_id() {
        return Err(DomainError::AlreadyAssigned {
            tracking_id: parcel.tracking_id,
            rider_id,
        });
    }
    check_capacity(rider, parcel.weight)?;

    rider.load_parcel(parcel.tracking_id, parcel.weight);
    parcel.set_assigned_rider_id(Some(rider.rider_id));
    parcel.record_event(now, format!("Assigned to Rider {}", rider.name));
    Ok(())
}

/// Takes `parcel` off `rider`'s load.
///
/// Returns `false` if the rider was not carrying the parcel.
pub fn release(parcel: &Parcel, rider: &mut Rider) -> bool {
    rider.unload_parcel(parcel.tracking_id, parcel.weight)
}

/// A partial update of a rider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiderPatch {
    /// New name.
    pub name: Option<String>,
    /// New capacity. Cannot drop below the current load.
    pub capacity: Option<f64>,
    /// New location.
    pub current_city_id: Option<CityId>,
}

/// Applies a partial update to a rider.
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The capacity is not positive or is below the current load
/// - The city does not exist
///
/// The rider is unchanged on error.
pub fn apply_rider_patch(
    rider: &mut Rider,
    patch: RiderPatch,
    cities: &[City],
) -> Result<(), DomainError> {
    if let Some(name) = &patch.name {
        validate_name("Rider name", name)?;
    }
    if let Some(capacity) = patch.capacity {
        validate_capacity(capacity)?;
        if capacity < rider.current_load() {
            return Err(DomainError::CapacityBelowLoad {
                rider_id: rider.rider_id,
                capacity,
                current_load: rider.current_load(),
            });
        }
    }
    if let Some(city_id) = patch.current_city_id {
        validate_city_exists(cities, city_id)?;
    }

    if let Some(name) = patch.name {
        rider.name = name;
    }
    if let Some(capacity) = patch.capacity {
        rider.set_capacity(capacity);
    }
    if let Some(city_id) = patch.current_city_id {
        rider.current_city_id = city_id;
    }
    Ok(())
}

/// More spare capacity first, then lower rider id.
fn roomier(a: &Rider, b: &Rider) -> Ordering {
    b.available_capacity()
        .total_cmp(&a.available_capacity())
        .then_with(|| a.rider_id.cmp(&b.rider_id))
}

/// Suggests a rider for `parcel` without changing anything.
///
/// Only riders that can carry the parcel are considered, in three tiers:
/// 1. Riders in the parcel's current city, most spare capacity first
/// 2. Riders one unblocked direct route away, nearest first, then most
///    spare capacity
/// 3. Any rider, most spare capacity first
///
/// Remaining ties go to the lowest rider id.
#[must_use]
pub fn recommend_rider<'a>(
    parcel: &Parcel,
    riders: &'a [Rider],
    graph: &RouteGraph,
) -> Option<&'a Rider> {
    let origin: CityId = parcel.current_city_id;
    let eligible = || riders.iter().filter(|rider| rider.can_carry(parcel.weight));

    let local: Option<&Rider> = eligible()
        .filter(|rider| rider.current_city_id == origin)
        .min_by(|a, b| roomier(a, b));
    if local.is_some() {
        return local;
    }

    let nearby: Option<&Rider> = eligible()
        .filter_map(|rider| {
            graph
                .direct_distance(origin, rider.current_city_id)
                .map(|distance| (distance, rider))
        })
        .min_by(|(da, a), (db, b)| da.cmp(db).then_with(|| roomier(a, b)))
        .map(|(_, rider)| rider);
    if nearby.is_some() {
        return nearby;
    }

    eligible().min_by(|a, b| roomier(a, b))
}
