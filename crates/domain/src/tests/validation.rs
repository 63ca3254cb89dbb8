// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_new_parcel, create_test_cities};
use crate::{
    CityId, DomainError, NewParcel, NewRider, Priority, validate_capacity, validate_name,
    validate_new_parcel, validate_new_rider, validate_route, validate_weight,
};

#[test]
fn test_validate_name_rejects_blank() {
    assert!(validate_name("Sender", "Ada").is_ok());
    assert!(matches!(
        validate_name("Sender", "   "),
        Err(DomainError::InvalidName(msg)) if msg == "Sender cannot be empty"
    ));
}

#[test]
fn test_validate_weight_requires_positive() {
    assert!(validate_weight(0.1).is_ok());
    assert!(matches!(
        validate_weight(0.0),
        Err(DomainError::InvalidWeight(_))
    ));
    assert!(matches!(
        validate_weight(-2.0),
        Err(DomainError::InvalidWeight(_))
    ));
    assert!(validate_weight(f64::NAN).is_err());
}

#[test]
fn test_validate_capacity_requires_positive_finite() {
    assert!(validate_capacity(25.0).is_ok());
    assert!(validate_capacity(0.0).is_err());
    assert!(validate_capacity(f64::INFINITY).is_err());
}

#[test]
fn test_validate_route_rules() {
    let cities = create_test_cities();

    assert!(validate_route(&cities, CityId::new(1), CityId::new(2), 4).is_ok());
    assert!(matches!(
        validate_route(&cities, CityId::new(1), CityId::new(1), 4),
        Err(DomainError::SameEndpoints(_))
    ));
    assert!(matches!(
        validate_route(&cities, CityId::new(1), CityId::new(2), 0),
        Err(DomainError::InvalidDistance(0))
    ));
    assert!(matches!(
        validate_route(&cities, CityId::new(1), CityId::new(99), 4),
        Err(DomainError::CityNotFound(id)) if id == CityId::new(99)
    ));
}

#[test]
fn test_validate_new_parcel_rules() {
    let cities = create_test_cities();
    let valid: NewParcel = create_new_parcel(Priority::Normal, 2.0);
    assert!(validate_new_parcel(&cities, &valid).is_ok());

    let mut blank_receiver: NewParcel = valid.clone();
    blank_receiver.receiver = String::new();
    assert!(matches!(
        validate_new_parcel(&cities, &blank_receiver),
        Err(DomainError::InvalidName(_))
    ));

    let mut same_city: NewParcel = valid.clone();
    same_city.dest_city_id = same_city.source_city_id;
    assert!(matches!(
        validate_new_parcel(&cities, &same_city),
        Err(DomainError::SameEndpoints(_))
    ));

    let mut unknown_city: NewParcel = valid;
    unknown_city.dest_city_id = CityId::new(42);
    assert!(matches!(
        validate_new_parcel(&cities, &unknown_city),
        Err(DomainError::CityNotFound(_))
    ));
}

#[test]
fn test_validate_new_rider_rules() {
    let cities = create_test_cities();
    let rider: NewRider = NewRider {
        name: String::from("Sam"),
        capacity: 10.0,
        current_city_id: CityId::new(2),
    };
    assert!(validate_new_rider(&cities, &rider).is_ok());

    let zero_capacity: NewRider = NewRider {
        capacity: 0.0,
        ..rider.clone()
    };
    assert!(matches!(
        validate_new_rider(&cities, &zero_capacity),
        Err(DomainError::InvalidCapacity(_))
    ));

    let nowhere: NewRider = NewRider {
        current_city_id: CityId::new(77),
        ..rider
    };
    assert!(matches!(
        validate_new_rider(&cities, &nowhere),
        Err(DomainError::CityNotFound(_))
    ));
}
