// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use courier_audit::{Actor, AuditEvent, Cause};
use courier_dispatch::{Command, DispatchState, Outcome, TransitionResult, apply};
use courier_domain::{
    City, CityId, DomainError, LocationEvent, NewParcel, NewRider, Parcel, ParcelPatch,
    ParcelStatus, PathResult, Priority, Rider, RiderId, RiderPatch, RiderStats, Route, TrackingId,
    WeightCategory, blocked_routes, compute_rider_stats, compute_stats, dispatch_order,
    pickup_queue, recommend_rider as recommend, select_for_pickup, select_for_transit,
    transit_queue, warehouse_queue,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AlternativeRoutesResponse, AssignRequest, AssignResponse, CreateCityRequest,
    CreateCityResponse, CreateParcelRequest, CreateRiderRequest, CreateRouteRequest,
    DeleteResponse, DeliveryAttemptRequest, ListCitiesResponse, ListParcelsRequest,
    ListParcelsResponse, ListRidersResponse, ListRoutesResponse, ParcelRequest, ParcelResponse,
    PathInfo, QueuesResponse, RecommendRiderResponse, RecordLocationRequest, RiderRequest,
    RiderResponse, RouteQueryRequest, RouteResponse, SetRouteBlockedRequest, StatsResponse,
    UpdateParcelRequest, UpdateRiderRequest,
};

/// The result of an API operation that includes both the response and the audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
    /// The new state after the operation.
    pub new_state: DispatchState,
}

/// The result of a queue-draining operation.
///
/// An empty queue is a valid outcome, not an error. Nothing changes and no
/// audit event is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueResult<T> {
    /// A parcel was selected and processed.
    Processed(ApiResult<T>),
    /// The queue had nothing eligible.
    EmptyQueue,
}

/// Applies a command, logging and translating any rejection.
fn execute(
    state: &DispatchState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, ApiError> {
    let operation: &'static str = command.name();
    apply(state, command, actor, cause, now).map_err(|err| {
        warn!(operation, error = %err, "Command rejected");
        translate_core_error(err)
    })
}

fn unexpected(outcome: &Outcome) -> ApiError {
    ApiError::Internal {
        message: format!("Unexpected command outcome: {outcome:?}"),
    }
}

fn into_parcel(outcome: Outcome) -> Result<Parcel, ApiError> {
    match outcome {
        Outcome::Parcel(parcel) => Ok(parcel),
        other => Err(unexpected(&other)),
    }
}

fn into_rider(outcome: Outcome) -> Result<Rider, ApiError> {
    match outcome {
        Outcome::Rider(rider) => Ok(rider),
        other => Err(unexpected(&other)),
    }
}

fn into_route(outcome: Outcome) -> Result<Route, ApiError> {
    match outcome {
        Outcome::Route(route) => Ok(route),
        other => Err(unexpected(&other)),
    }
}

fn into_assignment(outcome: Outcome) -> Result<(Parcel, Rider), ApiError> {
    match outcome {
        Outcome::Assignment { parcel, rider } => Ok((parcel, rider)),
        other => Err(unexpected(&other)),
    }
}

fn parcel_result(
    result: TransitionResult,
    message: impl FnOnce(&Parcel) -> String,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let parcel: Parcel = into_parcel(result.outcome)?;
    info!(
        tracking_id = parcel.tracking_id.value(),
        status = %parcel.status(),
        operation = %result.audit_event.operation.name,
        "Parcel updated"
    );
    Ok(ApiResult {
        response: ParcelResponse {
            message: message(&parcel),
            parcel,
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

fn parse_priority(value: u8) -> Result<Priority, ApiError> {
    Priority::try_from(value).map_err(translate_domain_error)
}

fn parse_status(value: &str) -> Result<ParcelStatus, ApiError> {
    value.parse().map_err(translate_domain_error)
}

/// Adds a city to the network.
///
/// # Errors
///
/// Returns an error if the name is empty.
pub fn create_city(
    state: &DispatchState,
    request: &CreateCityRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<CreateCityResponse>, ApiError> {
    let command: Command = Command::CreateCity {
        name: request.name.clone(),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    let city: City = match result.outcome {
        Outcome::City(city) => city,
        other => return Err(unexpected(&other)),
    };
    info!(city_id = city.id.value(), name = %city.name, "City created");

    Ok(ApiResult {
        response: CreateCityResponse {
            message: format!("City '{}' created with id {}", city.name, city.id),
            city,
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Adds an undirected route between two cities.
///
/// # Errors
///
/// Returns an error if:
/// - Either city does not exist
/// - Both ends are the same city
/// - The distance is zero
pub fn create_route(
    state: &DispatchState,
    request: &CreateRouteRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<RouteResponse>, ApiError> {
    let command: Command = Command::CreateRoute {
        source_id: CityId::new(request.source_id),
        dest_id: CityId::new(request.dest_id),
        distance: request.distance,
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    let route: Route = into_route(result.outcome)?;
    info!(
        source_id = request.source_id,
        dest_id = request.dest_id,
        distance = route.distance,
        "Route created"
    );

    Ok(ApiResult {
        response: RouteResponse {
            message: format!(
                "Route {}-{} created ({})",
                route.source_id, route.dest_id, route.distance
            ),
            route,
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Blocks or unblocks the route between two cities.
///
/// # Errors
///
/// Returns an error if no route joins the two cities.
pub fn set_route_blocked(
    state: &DispatchState,
    request: &SetRouteBlockedRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<RouteResponse>, ApiError> {
    let command: Command = Command::SetRouteBlocked {
        a: CityId::new(request.source_id),
        b: CityId::new(request.dest_id),
        blocked: request.blocked,
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    let route: Route = into_route(result.outcome)?;
    info!(
        source_id = request.source_id,
        dest_id = request.dest_id,
        blocked = route.blocked,
        "Route blocking changed"
    );

    let verb: &str = if route.blocked { "blocked" } else { "unblocked" };
    Ok(ApiResult {
        response: RouteResponse {
            message: format!("Route {}-{} {verb}", route.source_id, route.dest_id),
            route,
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Registers a new parcel in the `Pending` state.
///
/// # Errors
///
/// Returns an error if:
/// - The priority number is not 1, 2 or 3
/// - A name is empty or the weight is not positive
/// - Either city does not exist
pub fn create_parcel(
    state: &DispatchState,
    request: &CreateParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let fields: NewParcel = NewParcel {
        sender: request.sender.clone(),
        receiver: request.receiver.clone(),
        priority: parse_priority(request.priority)?,
        weight: request.weight,
        source_city_id: CityId::new(request.source_city_id),
        dest_city_id: CityId::new(request.dest_city_id),
        is_fragile: request.is_fragile,
    };
    let command: Command = Command::CreateParcel { fields };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| format!("Parcel {} created", parcel.tracking_id))
}

/// Looks up a parcel.
///
/// # Errors
///
/// Returns an error if the parcel does not exist.
pub fn get_parcel(state: &DispatchState, request: &ParcelRequest) -> Result<Parcel, ApiError> {
    state
        .parcel(TrackingId::new(request.tracking_id))
        .cloned()
        .map_err(translate_domain_error)
}

/// Changes parcel fields.
///
/// A status change goes through the lifecycle rules and has the same side
/// effects as the dedicated operation for that status.
///
/// # Errors
///
/// Returns an error if:
/// - The parcel does not exist
/// - A field value is invalid
/// - The status change is not permitted
pub fn update_parcel(
    state: &DispatchState,
    request: &UpdateParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let patch: ParcelPatch = ParcelPatch {
        sender: request.sender.clone(),
        receiver: request.receiver.clone(),
        priority: request.priority.map(parse_priority).transpose()?,
        weight: request.weight,
        is_fragile: request.is_fragile,
        status: request.status.as_deref().map(parse_status).transpose()?,
    };
    let command: Command = Command::UpdateParcel {
        tracking_id: TrackingId::new(request.tracking_id),
        patch,
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| format!("Parcel {} updated", parcel.tracking_id))
}

/// Deletes a parcel, releasing any rider load it held.
///
/// # Errors
///
/// Returns an error if the parcel does not exist.
pub fn delete_parcel(
    state: &DispatchState,
    request: &ParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<DeleteResponse>, ApiError> {
    let command: Command = Command::DeleteParcel {
        tracking_id: TrackingId::new(request.tracking_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    let tracking_id: TrackingId = match result.outcome {
        Outcome::ParcelDeleted(tracking_id) => tracking_id,
        other => return Err(unexpected(&other)),
    };
    info!(tracking_id = tracking_id.value(), "Parcel deleted");

    Ok(ApiResult {
        response: DeleteResponse {
            id: tracking_id.value(),
            message: format!("Parcel {tracking_id} deleted"),
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Registers a new rider.
///
/// # Errors
///
/// Returns an error if the name is empty, the capacity is not positive, or
/// the city does not exist.
pub fn create_rider(
    state: &DispatchState,
    request: &CreateRiderRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<RiderResponse>, ApiError> {
    let fields: NewRider = NewRider {
        name: request.name.clone(),
        capacity: request.capacity,
        current_city_id: CityId::new(request.current_city_id),
    };
    let command: Command = Command::CreateRider { fields };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    let rider: Rider = into_rider(result.outcome)?;
    info!(
        rider_id = rider.rider_id.value(),
        capacity = rider.capacity(),
        "Rider created"
    );

    Ok(ApiResult {
        response: RiderResponse {
            message: format!("Rider {} created with id {}", rider.name, rider.rider_id),
            rider,
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Changes rider fields.
///
/// # Errors
///
/// Returns an error if:
/// - The rider or the new city does not exist
/// - A field value is invalid
/// - The new capacity is below the load already carried
pub fn update_rider(
    state: &DispatchState,
    request: &UpdateRiderRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<RiderResponse>, ApiError> {
    let command: Command = Command::UpdateRider {
        rider_id: RiderId::new(request.rider_id),
        patch: RiderPatch {
            name: request.name.clone(),
            capacity: request.capacity,
            current_city_id: request.current_city_id.map(CityId::new),
        },
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    let rider: Rider = into_rider(result.outcome)?;
    info!(rider_id = rider.rider_id.value(), "Rider updated");

    Ok(ApiResult {
        response: RiderResponse {
            message: format!("Rider {} updated", rider.rider_id),
            rider,
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Deletes a rider with no parcels assigned.
///
/// # Errors
///
/// Returns an error if the rider does not exist or still carries parcels.
pub fn delete_rider(
    state: &DispatchState,
    request: &RiderRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<DeleteResponse>, ApiError> {
    let command: Command = Command::DeleteRider {
        rider_id: RiderId::new(request.rider_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    let rider_id: RiderId = match result.outcome {
        Outcome::RiderDeleted(rider_id) => rider_id,
        other => return Err(unexpected(&other)),
    };
    info!(rider_id = rider_id.value(), "Rider deleted");

    Ok(ApiResult {
        response: DeleteResponse {
            id: rider_id.value(),
            message: format!("Rider {rider_id} deleted"),
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Picks up a specific pending parcel and checks it into the warehouse.
///
/// # Errors
///
/// Returns an error if the parcel does not exist or is not `Pending`.
pub fn pickup_parcel(
    state: &DispatchState,
    request: &ParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let command: Command = Command::Pickup {
        tracking_id: TrackingId::new(request.tracking_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| {
        format!("Parcel {} picked up and checked into the warehouse", parcel.tracking_id)
    })
}

/// Picks up the first pending parcel in creation order.
///
/// # Errors
///
/// Returns an error only if the selected parcel cannot be picked up.
pub fn pickup_next(
    state: &DispatchState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<QueueResult<ParcelResponse>, ApiError> {
    let Some(next) = select_for_pickup(state.parcels()) else {
        debug!("Pickup queue is empty");
        return Ok(QueueResult::EmptyQueue);
    };
    debug!(tracking_id = next.tracking_id.value(), "Selected parcel for pickup");

    let request: ParcelRequest = ParcelRequest {
        tracking_id: next.tracking_id.value(),
    };
    pickup_parcel(state, &request, actor, cause, now).map(QueueResult::Processed)
}

/// Moves a specific warehoused parcel into transit without assigning a rider.
///
/// # Errors
///
/// Returns an error if the parcel does not exist or is not `InWarehouse`.
pub fn advance_to_transit(
    state: &DispatchState,
    request: &ParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let command: Command = Command::AdvanceToTransit {
        tracking_id: TrackingId::new(request.tracking_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| format!("Parcel {} is in transit", parcel.tracking_id))
}

/// Moves the most urgent warehoused parcel into transit.
///
/// # Errors
///
/// Returns an error only if the selected parcel cannot be moved.
pub fn advance_next(
    state: &DispatchState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<QueueResult<ParcelResponse>, ApiError> {
    let Some(next) = select_for_transit(state.parcels()) else {
        debug!("Warehouse queue is empty");
        return Ok(QueueResult::EmptyQueue);
    };
    debug!(
        tracking_id = next.tracking_id.value(),
        priority = %next.priority,
        "Selected parcel for transit"
    );

    let request: ParcelRequest = ParcelRequest {
        tracking_id: next.tracking_id.value(),
    };
    advance_to_transit(state, &request, actor, cause, now).map(QueueResult::Processed)
}

fn assignment_result(
    result: TransitionResult,
    verb: &str,
) -> Result<ApiResult<AssignResponse>, ApiError> {
    let (parcel, rider): (Parcel, Rider) = into_assignment(result.outcome)?;
    info!(
        tracking_id = parcel.tracking_id.value(),
        rider_id = rider.rider_id.value(),
        load = rider.current_load(),
        capacity = rider.capacity(),
        "Parcel {verb}"
    );

    Ok(ApiResult {
        response: AssignResponse {
            message: format!(
                "Parcel {} {verb} to rider {}",
                parcel.tracking_id, rider.rider_id
            ),
            parcel,
            rider,
        },
        audit_event: result.audit_event,
        new_state: result.new_state,
    })
}

/// Assigns a parcel to a rider.
///
/// # Errors
///
/// Returns an error if:
/// - The parcel or rider does not exist
/// - The parcel is closed or already assigned
/// - The rider cannot carry the parcel
pub fn assign(
    state: &DispatchState,
    request: &AssignRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<AssignResponse>, ApiError> {
    let command: Command = Command::Assign {
        tracking_id: TrackingId::new(request.tracking_id),
        rider_id: RiderId::new(request.rider_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    assignment_result(result, "assigned")
}

/// Dispatches the most urgent warehoused parcel with the recommended rider.
///
/// The parcel is assigned and moved into transit as one operation.
///
/// # Errors
///
/// Returns an error if no rider can carry the selected parcel. The parcel
/// then stays in the warehouse.
pub fn dispatch_next(
    state: &DispatchState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<QueueResult<AssignResponse>, ApiError> {
    let Some(next) = select_for_transit(state.parcels()) else {
        debug!("Warehouse queue is empty");
        return Ok(QueueResult::EmptyQueue);
    };

    let Some(rider) = recommend(next, state.riders(), &state.route_graph()) else {
        warn!(
            tracking_id = next.tracking_id.value(),
            weight = next.weight,
            "No rider can carry the next warehouse parcel"
        );
        return Err(translate_domain_error(DomainError::NoRiderAvailable(
            next.tracking_id,
        )));
    };
    debug!(
        tracking_id = next.tracking_id.value(),
        rider_id = rider.rider_id.value(),
        "Selected parcel and rider for dispatch"
    );

    let command: Command = Command::Dispatch {
        tracking_id: next.tracking_id,
        rider_id: rider.rider_id,
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    assignment_result(result, "dispatched").map(QueueResult::Processed)
}

/// Hands a parcel in transit to its receiver.
///
/// # Errors
///
/// Returns an error if the parcel does not exist or is not `InTransit`.
pub fn deliver(
    state: &DispatchState,
    request: &ParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let command: Command = Command::Deliver {
        tracking_id: TrackingId::new(request.tracking_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| format!("Parcel {} delivered", parcel.tracking_id))
}

/// Records one delivery attempt.
///
/// # Errors
///
/// Returns an error if the parcel does not exist or is not `InTransit`.
pub fn record_delivery_attempt(
    state: &DispatchState,
    request: &DeliveryAttemptRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let command: Command = Command::DeliveryAttempt {
        tracking_id: TrackingId::new(request.tracking_id),
        success: request.success,
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| {
        format!(
            "Delivery attempt {} recorded for parcel {} ({})",
            parcel.delivery_attempts,
            parcel.tracking_id,
            parcel.status()
        )
    })
}

/// Sends a parcel in transit back to its sender.
///
/// # Errors
///
/// Returns an error if the parcel does not exist or is not `InTransit`.
pub fn return_to_sender(
    state: &DispatchState,
    request: &ParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let command: Command = Command::ReturnToSender {
        tracking_id: TrackingId::new(request.tracking_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| format!("Parcel {} returned to sender", parcel.tracking_id))
}

/// Declares a parcel in transit lost.
///
/// # Errors
///
/// Returns an error if the parcel does not exist or is not `InTransit`.
pub fn mark_missing(
    state: &DispatchState,
    request: &ParcelRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let command: Command = Command::MarkMissing {
        tracking_id: TrackingId::new(request.tracking_id),
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| format!("Parcel {} marked missing", parcel.tracking_id))
}

/// Records a loading or unloading scan.
///
/// # Errors
///
/// Returns an error if:
/// - The event name is not `Loaded` or `Unloaded`
/// - The parcel or city does not exist
/// - The parcel is closed
pub fn record_location(
    state: &DispatchState,
    request: &RecordLocationRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ParcelResponse>, ApiError> {
    let event: LocationEvent = request.event.parse().map_err(translate_domain_error)?;
    let command: Command = Command::RecordLocation {
        tracking_id: TrackingId::new(request.tracking_id),
        city_id: CityId::new(request.city_id),
        event,
    };
    let result: TransitionResult = execute(state, command, actor, cause, now)?;
    parcel_result(result, |parcel| {
        format!(
            "Parcel {} {} at city {}",
            parcel.tracking_id,
            event.as_str().to_lowercase(),
            parcel.current_city_id
        )
    })
}

/// Lists all cities in creation order.
#[must_use]
pub fn list_cities(state: &DispatchState) -> ListCitiesResponse {
    ListCitiesResponse {
        cities: state.cities().to_vec(),
    }
}

/// Lists all routes in creation order.
#[must_use]
pub fn list_routes(state: &DispatchState) -> ListRoutesResponse {
    ListRoutesResponse {
        routes: state.routes().to_vec(),
    }
}

/// Lists the routes that are currently blocked.
#[must_use]
pub fn list_blocked_routes(state: &DispatchState) -> ListRoutesResponse {
    ListRoutesResponse {
        routes: blocked_routes(state.routes()).into_iter().cloned().collect(),
    }
}

/// Finds the shortest unblocked path between two cities.
///
/// # Errors
///
/// Returns an error if either city does not exist or no unblocked path joins
/// them.
pub fn shortest_route(
    state: &DispatchState,
    request: &RouteQueryRequest,
) -> Result<PathInfo, ApiError> {
    state
        .route_graph()
        .shortest_path(
            CityId::new(request.source_city_id),
            CityId::new(request.dest_city_id),
        )
        .map(PathInfo::from)
        .map_err(translate_domain_error)
}

/// Finds up to `count` distinct unblocked paths, shortest first.
///
/// # Errors
///
/// Returns an error if either city does not exist. An unreachable destination
/// yields an empty list.
pub fn alternative_routes(
    state: &DispatchState,
    request: &RouteQueryRequest,
    count: usize,
) -> Result<AlternativeRoutesResponse, ApiError> {
    let paths: Vec<PathResult> = state
        .route_graph()
        .alternative_routes(
            CityId::new(request.source_city_id),
            CityId::new(request.dest_city_id),
            count,
        )
        .map_err(translate_domain_error)?;
    debug!(
        source_city_id = request.source_city_id,
        dest_city_id = request.dest_city_id,
        requested = count,
        found = paths.len(),
        "Computed alternative routes"
    );

    Ok(AlternativeRoutesResponse {
        routes: paths.into_iter().map(PathInfo::from).collect(),
    })
}

/// Lists parcels matching every filter in `request`.
///
/// # Errors
///
/// Returns an error if the status or weight category name is unknown.
pub fn list_parcels(
    state: &DispatchState,
    request: &ListParcelsRequest,
) -> Result<ListParcelsResponse, ApiError> {
    let status: Option<ParcelStatus> = request.status.as_deref().map(parse_status).transpose()?;
    let category: Option<WeightCategory> = request
        .weight_category
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let dest_city_id: Option<CityId> = request.dest_city_id.map(CityId::new);

    let mut parcels: Vec<&Parcel> = state
        .parcels()
        .iter()
        .filter(|parcel| status.is_none_or(|wanted| parcel.status() == wanted))
        .filter(|parcel| category.is_none_or(|wanted| parcel.weight_category() == wanted))
        .filter(|parcel| dest_city_id.is_none_or(|wanted| parcel.dest_city_id == wanted))
        .filter(|parcel| !request.fragile_only || parcel.is_fragile)
        .collect();
    if request.dispatch_order {
        parcels.sort_by(|a, b| dispatch_order(a, b));
    }

    Ok(ListParcelsResponse {
        parcels: parcels.into_iter().cloned().collect(),
    })
}

/// Lists all riders with their load figures.
#[must_use]
pub fn list_riders(state: &DispatchState) -> ListRidersResponse {
    ListRidersResponse {
        riders: state
            .riders()
            .iter()
            .map(|rider| compute_rider_stats(rider, state.parcels()))
            .collect(),
    }
}

/// Returns load figures for one rider.
///
/// # Errors
///
/// Returns an error if the rider does not exist.
pub fn rider_stats(state: &DispatchState, request: &RiderRequest) -> Result<RiderStats, ApiError> {
    let rider: &Rider = state
        .rider(RiderId::new(request.rider_id))
        .map_err(translate_domain_error)?;
    Ok(compute_rider_stats(rider, state.parcels()))
}

/// Suggests a rider for a parcel without changing anything.
///
/// # Errors
///
/// Returns an error if the parcel does not exist.
pub fn recommend_rider(
    state: &DispatchState,
    request: &ParcelRequest,
) -> Result<RecommendRiderResponse, ApiError> {
    let parcel: &Parcel = state
        .parcel(TrackingId::new(request.tracking_id))
        .map_err(translate_domain_error)?;
    let rider: Option<Rider> = recommend(parcel, state.riders(), &state.route_graph()).cloned();
    debug!(
        tracking_id = request.tracking_id,
        rider_id = rider.as_ref().map(|rider| rider.rider_id.value()),
        "Recommended rider"
    );

    Ok(RecommendRiderResponse {
        tracking_id: request.tracking_id,
        rider,
    })
}

/// Returns the three work queues in selection order.
#[must_use]
pub fn queues(state: &DispatchState) -> QueuesResponse {
    let ids = |queue: Vec<&Parcel>| -> Vec<u32> {
        queue
            .into_iter()
            .map(|parcel| parcel.tracking_id.value())
            .collect()
    };
    QueuesResponse {
        pickup: ids(pickup_queue(state.parcels())),
        warehouse: ids(warehouse_queue(state.parcels())),
        transit: ids(transit_queue(state.parcels())),
    }
}

/// Aggregate figures over the current parcels and riders.
#[must_use]
pub fn stats(state: &DispatchState) -> StatsResponse {
    StatsResponse {
        stats: compute_stats(state.parcels(), state.riders()),
    }
}
