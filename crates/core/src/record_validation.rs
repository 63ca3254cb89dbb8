// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of records handed over by a collaborator.
//!
//! Records created through `apply` are valid by construction. Records loaded
//! from outside (a scenario file, for example) are checked here against the
//! same rules before a state is built from them.

use std::collections::BTreeSet;

use courier_domain::{
    City, DomainError, Parcel, Rider, Route, validate_capacity, validate_city_exists,
    validate_name, validate_route, validate_weight,
};

/// Largest difference between a rider's load and its assigned weight that
/// still counts as equal.
const LOAD_TOLERANCE: f64 = 1e-9;

/// Checks loaded records for duplicate ids, dangling city references and
/// broken record invariants.
///
/// # Errors
///
/// Returns an error if:
/// - Two cities, parcels or riders share an id
/// - A route, parcel or rider refers to a city that does not exist
/// - A route or parcel has the same city at both ends, or a route has zero distance
/// - A parcel weight or rider capacity is not positive
/// - A rider lists a parcel that does not exist
/// - A rider's load exceeds its capacity or differs from its assigned weight
pub fn validate_records(
    cities: &[City],
    routes: &[Route],
    parcels: &[Parcel],
    riders: &[Rider],
) -> Result<(), DomainError> {
    ensure_unique("city", cities.iter().map(|city| city.id.value()))?;
    ensure_unique("parcel", parcels.iter().map(|parcel| parcel.tracking_id.value()))?;
    ensure_unique("rider", riders.iter().map(|rider| rider.rider_id.value()))?;

    for route in routes {
        validate_route(cities, route.source_id, route.dest_id, route.distance)?;
    }
    for parcel in parcels {
        validate_parcel(cities, parcel)?;
    }
    for rider in riders {
        validate_rider(cities, parcels, rider)?;
    }
    Ok(())
}

fn ensure_unique(
    record: &'static str,
    ids: impl Iterator<Item = u32>,
) -> Result<(), DomainError> {
    let mut seen: BTreeSet<u32> = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DomainError::DuplicateId { record, id });
        }
    }
    Ok(())
}

fn validate_parcel(cities: &[City], parcel: &Parcel) -> Result<(), DomainError> {
    validate_name("Sender", &parcel.sender)?;
    validate_name("Receiver", &parcel.receiver)?;
    validate_weight(parcel.weight)?;
    if parcel.source_city_id == parcel.dest_city_id {
        return Err(DomainError::SameEndpoints(parcel.source_city_id));
    }
    validate_city_exists(cities, parcel.source_city_id)?;
    validate_city_exists(cities, parcel.dest_city_id)?;
    validate_city_exists(cities, parcel.current_city_id)
}

fn validate_rider(cities: &[City], parcels: &[Parcel], rider: &Rider) -> Result<(), DomainError> {
    validate_name("Rider name", &rider.name)?;
    validate_capacity(rider.capacity())?;
    validate_city_exists(cities, rider.current_city_id)?;

    let mut assigned_weight: f64 = 0.0;
    for tracking_id in rider.assigned_parcels() {
        let parcel: &Parcel = parcels
            .iter()
            .find(|parcel| parcel.tracking_id == *tracking_id)
            .ok_or(DomainError::ParcelNotFound(*tracking_id))?;
        assigned_weight += parcel.weight;
    }
    if (rider.current_load() - assigned_weight).abs() > LOAD_TOLERANCE {
        return Err(DomainError::LoadMismatch {
            rider_id: rider.rider_id,
            current_load: rider.current_load(),
            assigned_weight,
        });
    }
    if rider.current_load() > rider.capacity() + LOAD_TOLERANCE {
        return Err(DomainError::CapacityBelowLoad {
            rider_id: rider.rider_id,
            capacity: rider.capacity(),
            current_load: rider.current_load(),
        });
    }
    Ok(())
}
