// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, DispatchState, TransitionResult, apply};
use courier_audit::{Actor, Cause};
use courier_domain::{CityId, NewParcel, NewRider, Priority, RiderId, TrackingId};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("dispatcher-1"), String::from("dispatcher"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Dispatcher request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

/// Applies a command that is expected to succeed and returns the new state.
pub fn run(state: &DispatchState, command: Command) -> DispatchState {
    let result: TransitionResult =
        apply(state, command, create_test_actor(), create_test_cause(), test_now()).unwrap();
    result.new_state
}

/// Cities 1..=3 with routes 1-2 (5), 2-3 (3), 1-3 (10).
pub fn create_test_network() -> DispatchState {
    let mut state: DispatchState = DispatchState::new();
    for name in ["Alpha", "Bravo", "Charlie"] {
        state = run(
            &state,
            Command::CreateCity {
                name: String::from(name),
            },
        );
    }
    for (source, dest, distance) in [(1, 2, 5), (2, 3, 3), (1, 3, 10)] {
        state = run(
            &state,
            Command::CreateRoute {
                source_id: CityId::new(source),
                dest_id: CityId::new(dest),
                distance,
            },
        );
    }
    state
}

pub fn new_parcel(priority: Priority, weight: f64) -> NewParcel {
    NewParcel {
        sender: String::from("Ada"),
        receiver: String::from("Grace"),
        priority,
        weight,
        source_city_id: CityId::new(1),
        dest_city_id: CityId::new(3),
        is_fragile: false,
    }
}

pub fn new_rider(capacity: f64) -> NewRider {
    NewRider {
        name: String::from("Sam"),
        capacity,
        current_city_id: CityId::new(1),
    }
}

/// The network plus parcel 1000 (weight 4) in the warehouse and rider 1
/// (capacity 10).
pub fn create_warehoused_state() -> DispatchState {
    let mut state: DispatchState = create_test_network();
    state = run(
        &state,
        Command::CreateParcel {
            fields: new_parcel(Priority::Normal, 4.0),
        },
    );
    state = run(
        &state,
        Command::CreateRider {
            fields: new_rider(10.0),
        },
    );
    run(
        &state,
        Command::Pickup {
            tracking_id: TrackingId::new(1000),
        },
    )
}

/// [`create_warehoused_state`] with parcel 1000 dispatched on rider 1.
pub fn create_in_transit_state() -> DispatchState {
    run(
        &create_warehoused_state(),
        Command::Dispatch {
            tracking_id: TrackingId::new(1000),
            rider_id: RiderId::new(1),
        },
    )
}
