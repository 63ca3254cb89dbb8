// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    add_parcel, add_rider, create_test_actor, create_test_cause, create_test_network,
    create_warehoused_state, parcel_request, pick_up, test_now,
};
use crate::{
    ApiError, ApiResult, AssignResponse, DeliveryAttemptRequest, ParcelRequest, ParcelResponse,
    QueueResult, RecordLocationRequest, advance_next, deliver, dispatch_next, mark_missing,
    pickup_next, record_delivery_attempt, record_location, return_to_sender,
};
use courier_dispatch::DispatchState;
use courier_domain::{CityId, Parcel, ParcelStatus, Rider, RiderId, TrackingId};

fn dispatched_state() -> DispatchState {
    match dispatch_next(
        &create_warehoused_state(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
    {
        QueueResult::Processed(result) => result.new_state,
        QueueResult::EmptyQueue => panic!("warehouse queue should not be empty"),
    }
}

fn attempt(state: &DispatchState, success: bool) -> ApiResult<ParcelResponse> {
    let request: DeliveryAttemptRequest = DeliveryAttemptRequest {
        tracking_id: 1000,
        success,
    };
    record_delivery_attempt(
        state,
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

#[test]
fn test_pickup_next_on_empty_queue() {
    let result: QueueResult<ParcelResponse> = pickup_next(
        &create_test_network(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result, QueueResult::EmptyQueue);
}

#[test]
fn test_pickup_next_takes_oldest_pending_parcel() {
    let mut state: DispatchState = add_parcel(&create_test_network(), &parcel_request(3, 2.0));
    state = add_parcel(&state, &parcel_request(1, 2.0));

    let result: QueueResult<ParcelResponse> =
        pickup_next(&state, create_test_actor(), create_test_cause(), test_now()).unwrap();

    let QueueResult::Processed(processed) = result else {
        panic!("expected a processed parcel");
    };
    let parcel: &Parcel = &processed.response.parcel;
    assert_eq!(parcel.tracking_id, TrackingId::new(1000));
    assert_eq!(parcel.status(), ParcelStatus::InWarehouse);
    assert_eq!(parcel.history().len(), 3);
    assert_eq!(processed.audit_event.operation.name, "Pickup");
}

#[test]
fn test_advance_next_prefers_most_urgent_parcel() {
    let mut state: DispatchState = add_parcel(&create_test_network(), &parcel_request(3, 2.0));
    state = add_parcel(&state, &parcel_request(1, 2.0));
    state = pick_up(&state, 1000);
    state = pick_up(&state, 1001);

    let result: QueueResult<ParcelResponse> =
        advance_next(&state, create_test_actor(), create_test_cause(), test_now()).unwrap();

    let QueueResult::Processed(processed) = result else {
        panic!("expected a processed parcel");
    };
    let parcel: &Parcel = &processed.response.parcel;
    assert_eq!(parcel.tracking_id, TrackingId::new(1001));
    assert_eq!(parcel.status(), ParcelStatus::InTransit);
    assert_eq!(
        parcel.current_route,
        vec![CityId::new(1), CityId::new(2), CityId::new(3)]
    );
    assert_eq!(parcel.assigned_rider_id(), None);
}

#[test]
fn test_advance_next_on_empty_warehouse() {
    let state: DispatchState = add_parcel(&create_test_network(), &parcel_request(3, 2.0));

    let result: QueueResult<ParcelResponse> =
        advance_next(&state, create_test_actor(), create_test_cause(), test_now()).unwrap();

    assert_eq!(result, QueueResult::EmptyQueue);
}

#[test]
fn test_dispatch_next_assigns_recommended_rider() {
    let state: DispatchState = add_rider(&create_warehoused_state(), 20.0, 2);

    let result: QueueResult<AssignResponse> =
        dispatch_next(&state, create_test_actor(), create_test_cause(), test_now()).unwrap();

    let QueueResult::Processed(processed) = result else {
        panic!("expected a dispatched parcel");
    };
    assert_eq!(processed.response.rider.rider_id, RiderId::new(1));
    assert_eq!(processed.response.rider.current_load(), 4.0);
    assert_eq!(
        processed.response.parcel.status(),
        ParcelStatus::InTransit
    );
    assert_eq!(
        processed.response.parcel.assigned_rider_id(),
        Some(RiderId::new(1))
    );
    assert_eq!(processed.audit_event.operation.name, "Dispatch");
    assert_eq!(
        processed.response.message,
        "Parcel 1000 dispatched to rider 1"
    );
}

#[test]
fn test_dispatch_next_without_capable_rider() {
    let mut state: DispatchState = add_parcel(&create_test_network(), &parcel_request(2, 15.0));
    state = add_rider(&state, 10.0, 1);
    state = pick_up(&state, 1000);

    let err: ApiError =
        dispatch_next(&state, create_test_actor(), create_test_cause(), test_now()).unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "rider_available"
    ));
}

#[test]
fn test_dispatch_next_on_empty_warehouse() {
    let state: DispatchState = add_rider(&create_test_network(), 10.0, 1);

    let result: QueueResult<AssignResponse> =
        dispatch_next(&state, create_test_actor(), create_test_cause(), test_now()).unwrap();

    assert_eq!(result, QueueResult::EmptyQueue);
}

#[test]
fn test_deliver_releases_rider_at_destination() {
    let result: ApiResult<ParcelResponse> = deliver(
        &dispatched_state(),
        &ParcelRequest { tracking_id: 1000 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.response.parcel.status(), ParcelStatus::Delivered);
    assert_eq!(result.response.parcel.current_city_id, CityId::new(3));
    assert_eq!(result.response.parcel.delivery_attempts, 0);
    let rider: &Rider = result.new_state.rider(RiderId::new(1)).unwrap();
    assert_eq!(rider.current_load(), 0.0);
    assert_eq!(rider.current_city_id, CityId::new(3));
}

#[test]
fn test_deliver_from_warehouse_is_invalid_transition() {
    let err: ApiError = deliver(
        &create_warehoused_state(),
        &ParcelRequest { tracking_id: 1000 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "valid_transition"
    ));
}

#[test]
fn test_third_failed_attempt_returns_parcel() {
    let first: ApiResult<ParcelResponse> = attempt(&dispatched_state(), false);
    assert_eq!(first.response.parcel.status(), ParcelStatus::InTransit);
    let second: ApiResult<ParcelResponse> = attempt(&first.new_state, false);
    assert_eq!(second.response.parcel.status(), ParcelStatus::InTransit);

    let third: ApiResult<ParcelResponse> = attempt(&second.new_state, false);

    assert_eq!(third.response.parcel.status(), ParcelStatus::Returned);
    assert_eq!(third.response.parcel.delivery_attempts, 3);
    let rider: &Rider = third.new_state.rider(RiderId::new(1)).unwrap();
    assert!(rider.assigned_parcels().is_empty());
    assert_eq!(rider.current_city_id, CityId::new(1));
}

#[test]
fn test_successful_attempt_delivers() {
    let result: ApiResult<ParcelResponse> = attempt(&dispatched_state(), true);

    assert_eq!(result.response.parcel.status(), ParcelStatus::Delivered);
    assert_eq!(result.response.parcel.delivery_attempts, 1);
    assert_eq!(result.audit_event.operation.name, "DeliveryAttempt");
}

#[test]
fn test_return_to_sender_requires_transit() {
    let err: ApiError = return_to_sender(
        &create_warehoused_state(),
        &ParcelRequest { tracking_id: 1000 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), "domain_rule_violation");
}

#[test]
fn test_mark_missing_releases_rider() {
    let result: ApiResult<ParcelResponse> = mark_missing(
        &dispatched_state(),
        &ParcelRequest { tracking_id: 1000 },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.response.parcel.status(), ParcelStatus::Missing);
    let rider: &Rider = result.new_state.rider(RiderId::new(1)).unwrap();
    assert_eq!(rider.current_load(), 0.0);
}

#[test]
fn test_record_location_moves_parcel() {
    let request: RecordLocationRequest = RecordLocationRequest {
        tracking_id: 1000,
        city_id: 2,
        event: String::from("Unloaded"),
    };
    let result: ApiResult<ParcelResponse> = record_location(
        &dispatched_state(),
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.response.parcel.current_city_id, CityId::new(2));
    assert_eq!(
        result.response.parcel.history().last().unwrap().event,
        "Unloaded at Bravo"
    );
    assert_eq!(result.response.message, "Parcel 1000 unloaded at city 2");
}

#[test]
fn test_record_location_rejects_unknown_event() {
    let request: RecordLocationRequest = RecordLocationRequest {
        tracking_id: 1000,
        city_id: 2,
        event: String::from("Scanned"),
    };
    let err: ApiError = record_location(
        &dispatched_state(),
        &request,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "event"
    ));
}
