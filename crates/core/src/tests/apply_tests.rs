// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_in_transit_state, create_test_actor, create_test_cause, create_test_network,
    new_parcel, new_rider, run, test_now,
};
use crate::{Command, CoreError, DispatchState, Outcome, TransitionResult, apply};
use courier_audit::EntityRef;
use courier_domain::{
    CityId, DomainError, Parcel, ParcelStatus, Priority, ROUTE_RECALCULATED_EVENT, RiderId,
    Route, TrackingId,
};

fn try_apply(state: &DispatchState, command: Command) -> Result<TransitionResult, CoreError> {
    apply(state, command, create_test_actor(), create_test_cause(), test_now())
}

#[test]
fn test_create_city_assigns_next_id() {
    let state: DispatchState = create_test_network();

    let transition: TransitionResult = try_apply(
        &state,
        Command::CreateCity {
            name: String::from("Delta"),
        },
    )
    .unwrap();

    assert_eq!(transition.new_state.cities().len(), 4);
    assert!(matches!(
        transition.outcome,
        Outcome::City(ref city) if city.id == CityId::new(4) && city.name == "Delta"
    ));
}

#[test]
fn test_create_city_rejects_blank_name() {
    let state: DispatchState = DispatchState::new();

    let result: Result<TransitionResult, CoreError> = try_apply(
        &state,
        Command::CreateCity {
            name: String::from("  "),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidName(_)))
    ));
}

#[test]
fn test_create_route_validates_endpoints() {
    let state: DispatchState = create_test_network();

    let result: Result<TransitionResult, CoreError> = try_apply(
        &state,
        Command::CreateRoute {
            source_id: CityId::new(1),
            dest_id: CityId::new(9),
            distance: 4,
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::CityNotFound(_)))
    ));
}

#[test]
fn test_set_route_blocked_matches_either_orientation() {
    let state: DispatchState = create_test_network();

    let transition: TransitionResult = try_apply(
        &state,
        Command::SetRouteBlocked {
            a: CityId::new(3),
            b: CityId::new(2),
            blocked: true,
        },
    )
    .unwrap();

    let blocked: Vec<&Route> = transition
        .new_state
        .routes()
        .iter()
        .filter(|route| route.blocked)
        .collect();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].source_id, CityId::new(2));
    assert_eq!(transition.audit_event.operation.name, "SetRouteBlocked");
    assert!(transition.audit_event.after.data.contains("blocked=true"));
}

#[test]
fn test_blocking_route_replans_parcels_in_transit() {
    let state: DispatchState = create_in_transit_state();
    let planned: &Parcel = state.parcel(TrackingId::new(1000)).unwrap();
    assert_eq!(
        planned.current_route,
        vec![CityId::new(1), CityId::new(2), CityId::new(3)]
    );
    let history_len: usize = planned.history().len();

    let transition: TransitionResult = try_apply(
        &state,
        Command::SetRouteBlocked {
            a: CityId::new(2),
            b: CityId::new(3),
            blocked: true,
        },
    )
    .unwrap();

    let parcel: &Parcel = transition
        .new_state
        .parcel(TrackingId::new(1000))
        .unwrap();
    assert_eq!(parcel.current_route, vec![CityId::new(1), CityId::new(3)]);
    assert_eq!(parcel.history().len(), history_len + 1);
    assert_eq!(
        parcel.history()[history_len].event,
        ROUTE_RECALCULATED_EVENT
    );
    assert!(transition.audit_event.involves(EntityRef::Parcel {
        id: TrackingId::new(1000)
    }));
}

#[test]
fn test_blocking_route_keeps_route_when_no_path_remains() {
    let state: DispatchState = run(
        &create_in_transit_state(),
        Command::SetRouteBlocked {
            a: CityId::new(1),
            b: CityId::new(3),
            blocked: true,
        },
    );
    let history_len: usize = state.parcel(TrackingId::new(1000)).unwrap().history().len();

    let transition: TransitionResult = try_apply(
        &state,
        Command::SetRouteBlocked {
            a: CityId::new(2),
            b: CityId::new(3),
            blocked: true,
        },
    )
    .unwrap();

    let parcel: &Parcel = transition
        .new_state
        .parcel(TrackingId::new(1000))
        .unwrap();
    assert_eq!(
        parcel.current_route,
        vec![CityId::new(1), CityId::new(2), CityId::new(3)]
    );
    assert_eq!(parcel.history().len(), history_len);
    assert_eq!(transition.audit_event.subjects.len(), 1);
}

#[test]
fn test_set_route_blocked_unknown_route() {
    let state: DispatchState = create_test_network();
    let before: DispatchState = state.clone();

    let result: Result<TransitionResult, CoreError> = try_apply(
        &state,
        Command::SetRouteBlocked {
            a: CityId::new(1),
            b: CityId::new(1),
            blocked: true,
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::RouteNotFound { .. }))
    ));
    assert_eq!(state, before);
}

#[test]
fn test_create_parcel_emits_audit_event() {
    let state: DispatchState = create_test_network();

    let transition: TransitionResult = try_apply(
        &state,
        Command::CreateParcel {
            fields: new_parcel(Priority::TwoDay, 3.0),
        },
    )
    .unwrap();

    let event = &transition.audit_event;
    assert_eq!(event.operation.name, "CreateParcel");
    assert_eq!(event.actor.id, "dispatcher-1");
    assert_eq!(event.cause.id, "req-456");
    assert_eq!(event.recorded_at, test_now());
    assert_eq!(
        event.subjects,
        vec![EntityRef::Parcel {
            id: TrackingId::new(1000)
        }]
    );
    assert!(event.before.data.contains("parcels_count=0"));
    assert!(event.after.data.contains("parcels_count=1"));
    assert!(event.operation.details.as_ref().unwrap().contains("1000"));
}

#[test]
fn test_create_parcel_starts_pending() {
    let state: DispatchState = run(
        &create_test_network(),
        Command::CreateParcel {
            fields: new_parcel(Priority::Normal, 3.0),
        },
    );

    let parcel = state.parcel(TrackingId::new(1000)).unwrap();
    assert_eq!(parcel.status(), ParcelStatus::Pending);
    assert_eq!(parcel.history().len(), 1);
    assert_eq!(parcel.history()[0].timestamp, test_now());
    assert_eq!(state.counters().next_tracking_id, 1001);
}

#[test]
fn test_failed_create_does_not_advance_counter() {
    let state: DispatchState = create_test_network();
    let mut invalid = new_parcel(Priority::Normal, 3.0);
    invalid.weight = 0.0;

    let result: Result<TransitionResult, CoreError> =
        try_apply(&state, Command::CreateParcel { fields: invalid });
    assert!(result.is_err());

    let state: DispatchState = run(
        &state,
        Command::CreateParcel {
            fields: new_parcel(Priority::Normal, 3.0),
        },
    );
    assert!(state.parcel(TrackingId::new(1000)).is_ok());
}

#[test]
fn test_create_rider_assigns_ids_from_one() {
    let mut state: DispatchState = create_test_network();
    state = run(
        &state,
        Command::CreateRider {
            fields: new_rider(10.0),
        },
    );
    state = run(
        &state,
        Command::CreateRider {
            fields: new_rider(12.0),
        },
    );

    assert!(state.rider(RiderId::new(1)).is_ok());
    assert_eq!(state.rider(RiderId::new(2)).unwrap().capacity(), 12.0);
    assert_eq!(state.counters().next_rider_id, 3);
}

#[test]
fn test_unknown_parcel_is_not_found() {
    let state: DispatchState = create_test_network();

    let result: Result<TransitionResult, CoreError> = try_apply(
        &state,
        Command::Pickup {
            tracking_id: TrackingId::new(4242),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ParcelNotFound(_)))
    ));
}

#[test]
fn test_capacity_exceeded_leaves_state_unchanged() {
    let mut state: DispatchState = create_test_network();
    state = run(
        &state,
        Command::CreateRider {
            fields: new_rider(10.0),
        },
    );
    for weight in [6.0, 5.0] {
        state = run(
            &state,
            Command::CreateParcel {
                fields: new_parcel(Priority::Normal, weight),
            },
        );
    }
    state = run(
        &state,
        Command::Assign {
            tracking_id: TrackingId::new(1000),
            rider_id: RiderId::new(1),
        },
    );
    let before: DispatchState = state.clone();

    let result: Result<TransitionResult, CoreError> = try_apply(
        &state,
        Command::Assign {
            tracking_id: TrackingId::new(1001),
            rider_id: RiderId::new(1),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::CapacityExceeded { .. }
        ))
    ));
    assert_eq!(state, before);
    assert_eq!(state.rider(RiderId::new(1)).unwrap().current_load(), 6.0);
}

#[test]
fn test_assign_records_both_subjects() {
    let mut state: DispatchState = create_test_network();
    state = run(
        &state,
        Command::CreateRider {
            fields: new_rider(10.0),
        },
    );
    state = run(
        &state,
        Command::CreateParcel {
            fields: new_parcel(Priority::Normal, 6.0),
        },
    );

    let transition: TransitionResult = try_apply(
        &state,
        Command::Assign {
            tracking_id: TrackingId::new(1000),
            rider_id: RiderId::new(1),
        },
    )
    .unwrap();

    assert_eq!(transition.audit_event.subjects.len(), 2);
    assert!(transition.audit_event.before.data.contains("load=0"));
    assert!(transition.audit_event.after.data.contains("load=6"));
    assert!(matches!(
        transition.outcome,
        Outcome::Assignment { ref rider, .. } if rider.current_load() == 6.0
    ));
}
