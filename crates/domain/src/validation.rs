// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{City, CityId, NewParcel, NewRider};

/// Validates that a name field is not blank.
///
/// # Arguments
///
/// * `field` - Which field is being checked, used in the error message
/// * `value` - The value to check
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the value is empty or whitespace only.
pub fn validate_name(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidName(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Validates that a city exists.
///
/// # Errors
///
/// Returns `DomainError::CityNotFound` if no city has the given id.
pub fn validate_city_exists(cities: &[City], city_id: CityId) -> Result<(), DomainError> {
    if !cities.iter().any(|city| city.id == city_id) {
        return Err(DomainError::CityNotFound(city_id));
    }
    Ok(())
}

/// Validates a route before it is added to the network.
///
/// # Arguments
///
/// * `cities` - The existing cities
/// * `source_id` - One end of the route
/// * `dest_id` - The other end of the route
/// * `distance` - The route length
///
/// # Errors
///
/// Returns an error if:
/// - Both ends are the same city
/// - The distance is zero
/// - Either city does not exist
pub fn validate_route(
    cities: &[City],
    source_id: CityId,
    dest_id: CityId,
    distance: u32,
) -> Result<(), DomainError> {
    if source_id == dest_id {
        return Err(DomainError::SameEndpoints(source_id));
    }
    if distance == 0 {
        return Err(DomainError::InvalidDistance(distance));
    }
    validate_city_exists(cities, source_id)?;
    validate_city_exists(cities, dest_id)?;
    Ok(())
}

/// Validates that a weight is a finite, positive number.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeight` otherwise.
pub fn validate_weight(weight: f64) -> Result<(), DomainError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(DomainError::InvalidWeight(weight));
    }
    Ok(())
}

/// Validates that a capacity is a finite, positive number.
///
/// # Errors
///
/// Returns `DomainError::InvalidCapacity` otherwise.
pub fn validate_capacity(capacity: f64) -> Result<(), DomainError> {
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(DomainError::InvalidCapacity(capacity));
    }
    Ok(())
}

/// Validates the fields of a new parcel.
///
/// # Errors
///
/// Returns an error if:
/// - Sender or receiver is blank
/// - The weight is not positive
/// - Source and destination are the same city
/// - Either city does not exist
pub fn validate_new_parcel(cities: &[City], fields: &NewParcel) -> Result<(), DomainError> {
    validate_name("Sender", &fields.sender)?;
    validate_name("Receiver", &fields.receiver)?;
    validate_weight(fields.weight)?;
    if fields.source_city_id == fields.dest_city_id {
        return Err(DomainError::SameEndpoints(fields.source_city_id));
    }
    validate_city_exists(cities, fields.source_city_id)?;
    validate_city_exists(cities, fields.dest_city_id)?;
    Ok(())
}

/// Validates the fields of a new rider.
///
/// # Errors
///
/// Returns an error if the name is blank, the capacity is not positive, or
/// the starting city does not exist.
pub fn validate_new_rider(cities: &[City], fields: &NewRider) -> Result<(), DomainError> {
    validate_name("Rider name", &fields.name)?;
    validate_capacity(fields.capacity)?;
    validate_city_exists(cities, fields.current_city_id)?;
    Ok(())
}
