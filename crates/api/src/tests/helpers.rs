// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CreateCityRequest, CreateParcelRequest, CreateRiderRequest, CreateRouteRequest, ParcelRequest,
    create_city, create_parcel, create_rider, create_route, pickup_parcel,
};
use courier_audit::{Actor, Cause};
use courier_dispatch::DispatchState;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("dispatcher-1"), String::from("dispatcher"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-789"), String::from("Scenario step"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

/// Cities 1 Alpha, 2 Bravo, 3 Charlie with routes 1-2 (5), 2-3 (3), 1-3 (10).
pub fn create_test_network() -> DispatchState {
    let mut state: DispatchState = DispatchState::new();
    for name in ["Alpha", "Bravo", "Charlie"] {
        let request: CreateCityRequest = CreateCityRequest {
            name: String::from(name),
        };
        state = create_city(
            &state,
            &request,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap()
        .new_state;
    }
    for (source_id, dest_id, distance) in [(1, 2, 5), (2, 3, 3), (1, 3, 10)] {
        let request: CreateRouteRequest = CreateRouteRequest {
            source_id,
            dest_id,
            distance,
        };
        state = create_route(
            &state,
            &request,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        )
        .unwrap()
        .new_state;
    }
    state
}

/// A parcel from city 1 to city 3.
pub fn parcel_request(priority: u8, weight: f64) -> CreateParcelRequest {
    CreateParcelRequest {
        sender: String::from("Ada"),
        receiver: String::from("Grace"),
        priority,
        weight,
        source_city_id: 1,
        dest_city_id: 3,
        is_fragile: false,
    }
}

pub fn add_parcel(state: &DispatchState, request: &CreateParcelRequest) -> DispatchState {
    create_parcel(
        state,
        request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
    .new_state
}

pub fn add_rider(state: &DispatchState, capacity: f64, city_id: u32) -> DispatchState {
    let request: CreateRiderRequest = CreateRiderRequest {
        name: String::from("Sam"),
        capacity,
        current_city_id: city_id,
    };
    create_rider(
        state,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
    .new_state
}

pub fn pick_up(state: &DispatchState, tracking_id: u32) -> DispatchState {
    pickup_parcel(
        state,
        &ParcelRequest { tracking_id },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
    .new_state
}

/// The network plus parcel 1000 (Normal, 4 kg) in the warehouse and rider 1
/// (capacity 10) in city 1.
pub fn create_warehoused_state() -> DispatchState {
    let mut state: DispatchState = add_parcel(&create_test_network(), &parcel_request(3, 4.0));
    state = add_rider(&state, 10.0, 1);
    pick_up(&state, 1000)
}
