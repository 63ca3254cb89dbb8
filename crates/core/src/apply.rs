// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{DispatchState, Outcome, TransitionResult};
use courier_audit::{Actor, AuditEvent, Cause, EntityRef, Operation, StateSnapshot};
use courier_domain::{
    City, CityId, DomainError, LocationEvent, NewParcel, NewRider, Parcel, ParcelPatch,
    ParcelStatus, PathResult, Rider, RiderId, RiderPatch, Route, RouteGraph, TrackingId,
    apply_patch, apply_rider_patch, apply_transition, assign, deliver, find_edge, pick_up,
    record_delivery_attempt, record_location, release, replan_route, send_to_transit, set_blocked,
    validate_name, validate_new_parcel, validate_new_rider, validate_route,
};
use time::OffsetDateTime;

/// What a single command did, before it is wrapped into an audit event.
struct Applied {
    outcome: Outcome,
    subjects: Vec<EntityRef>,
    before: StateSnapshot,
    after: StateSnapshot,
    details: String,
}

/// Applies a command to the current state, producing a new state and audit event.
///
/// The input state is never modified. The command runs against a copy, and
/// the copy is only handed back when every step of the command succeeded.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The time recorded in parcel history and the audit event
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, audit event and outcome
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A referenced city, route, parcel or rider does not exist
/// - The command violates a domain rule
pub fn apply(
    state: &DispatchState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let operation_name: &'static str = command.name();
    let mut new_state: DispatchState = state.clone();

    let applied: Applied = match command {
        Command::CreateCity { name } => create_city(&mut new_state, name)?,
        Command::CreateRoute {
            source_id,
            dest_id,
            distance,
        } => create_route(&mut new_state, source_id, dest_id, distance)?,
        Command::SetRouteBlocked { a, b, blocked } => {
            set_route_blocked(&mut new_state, a, b, blocked, now)?
        }
        Command::CreateParcel { fields } => create_parcel(&mut new_state, fields, now)?,
        Command::UpdateParcel { tracking_id, patch } => {
            update_parcel(&mut new_state, tracking_id, patch, now)?
        }
        Command::DeleteParcel { tracking_id } => delete_parcel(&mut new_state, tracking_id)?,
        Command::CreateRider { fields } => create_rider(&mut new_state, fields)?,
        Command::UpdateRider { rider_id, patch } => {
            update_rider(&mut new_state, rider_id, patch)?
        }
        Command::DeleteRider { rider_id } => delete_rider(&mut new_state, rider_id)?,
        Command::Pickup { tracking_id } => pickup(&mut new_state, tracking_id, now)?,
        Command::AdvanceToTransit { tracking_id } => {
            change_status(&mut new_state, tracking_id, ParcelStatus::InTransit, now)?
        }
        Command::Assign {
            tracking_id,
            rider_id,
        } => assign_rider(&mut new_state, tracking_id, rider_id, now)?,
        Command::Dispatch {
            tracking_id,
            rider_id,
        } => dispatch(&mut new_state, tracking_id, rider_id, now)?,
        Command::Deliver { tracking_id } => {
            change_status(&mut new_state, tracking_id, ParcelStatus::Delivered, now)?
        }
        Command::DeliveryAttempt {
            tracking_id,
            success,
        } => delivery_attempt(&mut new_state, tracking_id, success, now)?,
        Command::ReturnToSender { tracking_id } => {
            change_status(&mut new_state, tracking_id, ParcelStatus::Returned, now)?
        }
        Command::MarkMissing { tracking_id } => {
            change_status(&mut new_state, tracking_id, ParcelStatus::Missing, now)?
        }
        Command::RecordLocation {
            tracking_id,
            city_id,
            event,
        } => location_scan(&mut new_state, tracking_id, city_id, event, now)?,
    };

    let operation: Operation =
        Operation::new(String::from(operation_name), Some(applied.details));
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        operation,
        applied.subjects,
        applied.before,
        applied.after,
        now,
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
        outcome: applied.outcome,
    })
}

fn rider_label(rider_id: Option<RiderId>) -> String {
    rider_id.map_or_else(|| String::from("none"), |id| id.to_string())
}

fn parcel_snapshot(parcel: &Parcel) -> StateSnapshot {
    StateSnapshot::new(format!(
        "parcel={},status={},city={},rider={},attempts={}",
        parcel.tracking_id,
        parcel.status(),
        parcel.current_city_id,
        rider_label(parcel.assigned_rider_id()),
        parcel.delivery_attempts
    ))
}

fn rider_snapshot(rider: &Rider) -> StateSnapshot {
    StateSnapshot::new(format!(
        "rider={},load={},capacity={},city={},parcels={}",
        rider.rider_id,
        rider.current_load(),
        rider.capacity(),
        rider.current_city_id,
        rider.assigned_parcels().len()
    ))
}

fn route_snapshot(route: &Route) -> StateSnapshot {
    StateSnapshot::new(format!(
        "route={}-{},distance={},blocked={}",
        route.source_id, route.dest_id, route.distance, route.blocked
    ))
}

fn joined(first: &StateSnapshot, second: &StateSnapshot) -> StateSnapshot {
    StateSnapshot::new(format!("{};{}", first.data, second.data))
}

fn create_city(state: &mut DispatchState, name: String) -> Result<Applied, CoreError> {
    validate_name("City name", &name)?;

    let before: StateSnapshot = state.to_snapshot();
    let city: City = City::new(state.next_city_id()?, name);
    state.cities.push(city.clone());

    Ok(Applied {
        subjects: vec![EntityRef::City { id: city.id }],
        before,
        after: state.to_snapshot(),
        details: format!("Created city {} '{}'", city.id, city.name),
        outcome: Outcome::City(city),
    })
}

fn create_route(
    state: &mut DispatchState,
    source_id: CityId,
    dest_id: CityId,
    distance: u32,
) -> Result<Applied, CoreError> {
    validate_route(&state.cities, source_id, dest_id, distance)?;

    let before: StateSnapshot = state.to_snapshot();
    let route: Route = Route::new(source_id, dest_id, distance);
    state.routes.push(route.clone());

    Ok(Applied {
        subjects: vec![EntityRef::Route {
            a: source_id,
            b: dest_id,
        }],
        before,
        after: state.to_snapshot(),
        details: format!("Created route {source_id}-{dest_id} with distance {distance}"),
        outcome: Outcome::Route(route),
    })
}

fn set_route_blocked(
    state: &mut DispatchState,
    a: CityId,
    b: CityId,
    blocked: bool,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let before: StateSnapshot = find_edge(&state.routes, a, b)
        .map(route_snapshot)
        .ok_or(DomainError::RouteNotFound { a, b })?;
    let route: Route = set_blocked(&mut state.routes, a, b, blocked)?;
    let replanned: Vec<TrackingId> = replan_in_transit(state, now);

    let mut subjects: Vec<EntityRef> = vec![EntityRef::Route { a, b }];
    subjects.extend(replanned.iter().map(|id| EntityRef::Parcel { id: *id }));
    Ok(Applied {
        subjects,
        before,
        after: route_snapshot(&route),
        details: format!(
            "Route {a}-{b} {}, {} parcels re-planned",
            if blocked { "blocked" } else { "unblocked" },
            replanned.len()
        ),
        outcome: Outcome::Route(route),
    })
}

/// Plans a fresh route from the current city for every parcel in transit.
///
/// Parcels with no path left keep their old route. Returns the parcels that
/// got a new one.
fn replan_in_transit(state: &mut DispatchState, now: OffsetDateTime) -> Vec<TrackingId> {
    let graph: RouteGraph = state.route_graph();
    let mut replanned: Vec<TrackingId> = Vec::new();
    for parcel in &mut state.parcels {
        if parcel.status() != ParcelStatus::InTransit {
            continue;
        }
        let Ok(route) = graph.shortest_path(parcel.current_city_id, parcel.dest_city_id) else {
            continue;
        };
        if replan_route(parcel, route, now) {
            replanned.push(parcel.tracking_id);
        }
    }
    replanned
}

fn create_parcel(
    state: &mut DispatchState,
    fields: NewParcel,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    validate_new_parcel(&state.cities, &fields)?;

    let before: StateSnapshot = state.to_snapshot();
    let tracking_id: TrackingId = state.counters.issue_tracking_id()?;
    let parcel: Parcel = Parcel::new(tracking_id, fields, now);
    state.parcels.push(parcel.clone());

    Ok(Applied {
        subjects: vec![EntityRef::Parcel { id: tracking_id }],
        before,
        after: state.to_snapshot(),
        details: format!(
            "Created parcel {tracking_id} from city {} to city {}",
            parcel.source_city_id, parcel.dest_city_id
        ),
        outcome: Outcome::Parcel(parcel),
    })
}

/// Takes a parcel off its rider's load.
///
/// A delivered parcel also brings the rider to the destination city. Returns
/// the rider whose load changed, if any.
fn release_rider(state: &mut DispatchState, parcel_index: usize) -> Option<RiderId> {
    let parcel: &Parcel = &state.parcels[parcel_index];
    let rider_id: RiderId = parcel.assigned_rider_id()?;
    let rider_index: usize = state.rider_index(rider_id).ok()?;
    let rider: &mut Rider = &mut state.riders[rider_index];
    if !release(parcel, rider) {
        return None;
    }
    if parcel.status() == ParcelStatus::Delivered {
        rider.current_city_id = parcel.dest_city_id;
    }
    Some(rider_id)
}

/// Moves a parcel to `target` along with the side effects that status
/// carries: a planned route for transit, the destination city on delivery,
/// and releasing the rider's load on every terminal status.
fn transition_parcel(
    state: &mut DispatchState,
    parcel_index: usize,
    target: ParcelStatus,
    now: OffsetDateTime,
) -> Result<Option<RiderId>, CoreError> {
    match target {
        ParcelStatus::InTransit => {
            let parcel: &Parcel = &state.parcels[parcel_index];
            let route: Option<PathResult> = state
                .route_graph()
                .shortest_path(parcel.source_city_id, parcel.dest_city_id)
                .ok();
            send_to_transit(&mut state.parcels[parcel_index], route, now)?;
        }
        ParcelStatus::Delivered => deliver(&mut state.parcels[parcel_index], now)?,
        _ => apply_transition(&mut state.parcels[parcel_index], target, now)?,
    }
    if target.is_terminal() {
        return Ok(release_rider(state, parcel_index));
    }
    Ok(None)
}

fn parcel_subjects(tracking_id: TrackingId, rider_id: Option<RiderId>) -> Vec<EntityRef> {
    let mut subjects: Vec<EntityRef> = vec![EntityRef::Parcel { id: tracking_id }];
    if let Some(id) = rider_id {
        subjects.push(EntityRef::Rider { id });
    }
    subjects
}

fn update_parcel(
    state: &mut DispatchState,
    tracking_id: TrackingId,
    patch: ParcelPatch,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let index: usize = state.parcel_index(tracking_id)?;
    let before: StateSnapshot = parcel_snapshot(&state.parcels[index]);
    let current: ParcelStatus = state.parcels[index].status();

    let target: Option<ParcelStatus> = patch.status.filter(|status| *status != current);
    if let Some(status) = target {
        if !current.can_transition_to(status) {
            return Err(DomainError::InvalidTransition {
                tracking_id,
                from: current,
                to: status,
            }
            .into());
        }
    }

    let field_patch: ParcelPatch = ParcelPatch {
        status: None,
        ..patch
    };
    apply_patch(&mut state.parcels[index], field_patch, now)?;
    let released: Option<RiderId> = match target {
        Some(status) => transition_parcel(state, index, status, now)?,
        None => None,
    };

    let parcel: Parcel = state.parcels[index].clone();
    Ok(Applied {
        subjects: parcel_subjects(tracking_id, released),
        before,
        after: parcel_snapshot(&parcel),
        details: format!("Updated parcel {tracking_id}"),
        outcome: Outcome::Parcel(parcel),
    })
}

fn delete_parcel(state: &mut DispatchState, tracking_id: TrackingId) -> Result<Applied, CoreError> {
    let index: usize = state.parcel_index(tracking_id)?;
    let before: StateSnapshot = parcel_snapshot(&state.parcels[index]);
    let released: Option<RiderId> = release_rider(state, index);
    state.parcels.remove(index);

    Ok(Applied {
        subjects: parcel_subjects(tracking_id, released),
        before,
        after: StateSnapshot::new(format!("parcel={tracking_id},status=deleted")),
        details: format!("Deleted parcel {tracking_id}"),
        outcome: Outcome::ParcelDeleted(tracking_id),
    })
}

fn create_rider(state: &mut DispatchState, fields: NewRider) -> Result<Applied, CoreError> {
    validate_new_rider(&state.cities, &fields)?;

    let before: StateSnapshot = state.to_snapshot();
    let rider_id: RiderId = state.counters.issue_rider_id()?;
    let rider: Rider = Rider::new(rider_id, fields);
    state.riders.push(rider.clone());

    Ok(Applied {
        subjects: vec![EntityRef::Rider { id: rider_id }],
        before,
        after: state.to_snapshot(),
        details: format!("Created rider {rider_id} '{}'", rider.name),
        outcome: Outcome::Rider(rider),
    })
}

fn update_rider(
    state: &mut DispatchState,
    rider_id: RiderId,
    patch: RiderPatch,
) -> Result<Applied, CoreError> {
    let index: usize = state.rider_index(rider_id)?;
    let before: StateSnapshot = rider_snapshot(&state.riders[index]);
    apply_rider_patch(&mut state.riders[index], patch, &state.cities)?;

    let rider: Rider = state.riders[index].clone();
    Ok(Applied {
        subjects: vec![EntityRef::Rider { id: rider_id }],
        before,
        after: rider_snapshot(&rider),
        details: format!("Updated rider {rider_id}"),
        outcome: Outcome::Rider(rider),
    })
}

fn delete_rider(state: &mut DispatchState, rider_id: RiderId) -> Result<Applied, CoreError> {
    let index: usize = state.rider_index(rider_id)?;
    let count: usize = state.riders[index].assigned_parcels().len();
    if count > 0 {
        return Err(DomainError::RiderHasAssignments { rider_id, count }.into());
    }

    let before: StateSnapshot = rider_snapshot(&state.riders[index]);
    state.riders.remove(index);

    Ok(Applied {
        subjects: vec![EntityRef::Rider { id: rider_id }],
        before,
        after: StateSnapshot::new(format!("rider={rider_id},status=deleted")),
        details: format!("Deleted rider {rider_id}"),
        outcome: Outcome::RiderDeleted(rider_id),
    })
}

fn pickup(
    state: &mut DispatchState,
    tracking_id: TrackingId,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let index: usize = state.parcel_index(tracking_id)?;
    let before: StateSnapshot = parcel_snapshot(&state.parcels[index]);
    pick_up(&mut state.parcels[index], now)?;

    let parcel: Parcel = state.parcels[index].clone();
    Ok(Applied {
        subjects: parcel_subjects(tracking_id, None),
        before,
        after: parcel_snapshot(&parcel),
        details: format!("Picked up parcel {tracking_id} and checked it into the warehouse"),
        outcome: Outcome::Parcel(parcel),
    })
}

fn change_status(
    state: &mut DispatchState,
    tracking_id: TrackingId,
    target: ParcelStatus,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let index: usize = state.parcel_index(tracking_id)?;
    let before: StateSnapshot = parcel_snapshot(&state.parcels[index]);
    let released: Option<RiderId> = transition_parcel(state, index, target, now)?;

    let parcel: Parcel = state.parcels[index].clone();
    Ok(Applied {
        subjects: parcel_subjects(tracking_id, released),
        before,
        after: parcel_snapshot(&parcel),
        details: format!("Parcel {tracking_id} is now {}", target.label()),
        outcome: Outcome::Parcel(parcel),
    })
}

fn assign_rider(
    state: &mut DispatchState,
    tracking_id: TrackingId,
    rider_id: RiderId,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let parcel_index: usize = state.parcel_index(tracking_id)?;
    let rider_index: usize = state.rider_index(rider_id)?;
    let before: StateSnapshot = joined(
        &parcel_snapshot(&state.parcels[parcel_index]),
        &rider_snapshot(&state.riders[rider_index]),
    );

    assign(
        &mut state.parcels[parcel_index],
        &mut state.riders[rider_index],
        now,
    )?;

    let parcel: Parcel = state.parcels[parcel_index].clone();
    let rider: Rider = state.riders[rider_index].clone();
    Ok(Applied {
        subjects: parcel_subjects(tracking_id, Some(rider_id)),
        before,
        after: joined(&parcel_snapshot(&parcel), &rider_snapshot(&rider)),
        details: format!("Assigned parcel {tracking_id} to rider {rider_id}"),
        outcome: Outcome::Assignment { parcel, rider },
    })
}

fn dispatch(
    state: &mut DispatchState,
    tracking_id: TrackingId,
    rider_id: RiderId,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let parcel_index: usize = state.parcel_index(tracking_id)?;
    let current: ParcelStatus = state.parcels[parcel_index].status();
    if !current.can_transition_to(ParcelStatus::InTransit) {
        return Err(DomainError::InvalidTransition {
            tracking_id,
            from: current,
            to: ParcelStatus::InTransit,
        }
        .into());
    }

    let assigned: Applied = assign_rider(state, tracking_id, rider_id, now)?;
    transition_parcel(state, parcel_index, ParcelStatus::InTransit, now)?;

    let parcel: Parcel = state.parcels[parcel_index].clone();
    let rider: Rider = state.rider(rider_id)?.clone();
    Ok(Applied {
        subjects: assigned.subjects,
        before: assigned.before,
        after: joined(&parcel_snapshot(&parcel), &rider_snapshot(&rider)),
        details: format!("Dispatched parcel {tracking_id} with rider {rider_id}"),
        outcome: Outcome::Assignment { parcel, rider },
    })
}

fn delivery_attempt(
    state: &mut DispatchState,
    tracking_id: TrackingId,
    success: bool,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let index: usize = state.parcel_index(tracking_id)?;
    let before: StateSnapshot = parcel_snapshot(&state.parcels[index]);
    let status: ParcelStatus = record_delivery_attempt(&mut state.parcels[index], success, now)?;
    let released: Option<RiderId> = if status.is_terminal() {
        release_rider(state, index)
    } else {
        None
    };

    let parcel: Parcel = state.parcels[index].clone();
    Ok(Applied {
        subjects: parcel_subjects(tracking_id, released),
        before,
        after: parcel_snapshot(&parcel),
        details: format!(
            "Delivery attempt {} for parcel {tracking_id} {}",
            parcel.delivery_attempts,
            if success { "succeeded" } else { "failed" }
        ),
        outcome: Outcome::Parcel(parcel),
    })
}

fn location_scan(
    state: &mut DispatchState,
    tracking_id: TrackingId,
    city_id: CityId,
    event: LocationEvent,
    now: OffsetDateTime,
) -> Result<Applied, CoreError> {
    let index: usize = state.parcel_index(tracking_id)?;
    let city: City = state.city(city_id)?.clone();
    let before: StateSnapshot = parcel_snapshot(&state.parcels[index]);
    record_location(&mut state.parcels[index], &city, event, now)?;

    let parcel: Parcel = state.parcels[index].clone();
    Ok(Applied {
        subjects: vec![
            EntityRef::Parcel { id: tracking_id },
            EntityRef::City { id: city_id },
        ],
        before,
        after: parcel_snapshot(&parcel),
        details: format!("{} parcel {tracking_id} at {}", event.as_str(), city.name),
        outcome: Outcome::Parcel(parcel),
    })
}
