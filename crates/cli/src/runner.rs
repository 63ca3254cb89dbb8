// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courier_api::{
    ApiError, ApiResult, QueueResult, RouteQueryRequest, advance_next, advance_to_transit,
    alternative_routes, assign, create_city, create_parcel, create_rider, create_route,
    delete_parcel, delete_rider, deliver, dispatch_next, get_parcel, list_blocked_routes,
    list_cities, list_parcels, list_riders, list_routes, mark_missing, pickup_next,
    pickup_parcel, queues, recommend_rider, record_delivery_attempt, record_location,
    return_to_sender, rider_stats, set_route_blocked, shortest_route, stats, update_parcel,
    update_rider,
};
use courier_audit::{Actor, Cause, OperationLog};
use courier_dispatch::DispatchState;
use courier_domain::{DispatchStats, compute_stats};
use serde::Serialize;
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::ScenarioError;
use crate::scenario::Step;

/// Actor type recorded for scenario operators.
const OPERATOR_ACTOR_TYPE: &str = "operator";

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// A command changed the state and was logged.
    Applied {
        /// The operation's response.
        response: Value,
    },
    /// A read-only query answered.
    Answered {
        /// The query's response.
        response: Value,
    },
    /// A queue-draining step found nothing to do.
    EmptyQueue,
    /// The operation was refused. The state is unchanged.
    Rejected {
        /// Why.
        error: ApiError,
    },
}

impl StepOutcome {
    const fn label(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::Answered { .. } => "answered",
            Self::EmptyQueue => "empty_queue",
            Self::Rejected { .. } => "rejected",
        }
    }
}

/// The report line for one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Step number, starting at 1.
    pub step: usize,
    /// The step's `op` tag.
    pub op: &'static str,
    /// What happened.
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// The result of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// One entry per step, in order.
    pub steps: Vec<StepReport>,
    /// Figures over the final state.
    pub final_stats: DispatchStats,
    /// The final state.
    pub final_state: DispatchState,
    /// Every successful command, in order.
    pub operation_log: OperationLog,
}

impl RunReport {
    /// Number of steps that were refused.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|report| matches!(report.outcome, StepOutcome::Rejected { .. }))
            .count()
    }
}

/// Drives the API through scenario steps, keeping the state and the
/// operation log between steps.
#[derive(Debug)]
pub struct Simulator {
    state: DispatchState,
    log: OperationLog,
    operator: String,
    clock: OffsetDateTime,
    max_alternatives: usize,
}

impl Simulator {
    /// Creates a simulator over `state`.
    #[must_use]
    pub const fn new(
        state: DispatchState,
        operator: String,
        start_at: OffsetDateTime,
        max_alternatives: usize,
    ) -> Self {
        Self {
            state,
            log: OperationLog::new(),
            operator,
            clock: start_at,
            max_alternatives,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &DispatchState {
        &self.state
    }

    /// Runs every step in order and reports on each.
    ///
    /// Rejected steps are reported and do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Json` if a response cannot be encoded.
    pub fn run(mut self, steps: &[Step]) -> Result<RunReport, ScenarioError> {
        let mut reports: Vec<StepReport> = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            reports.push(self.run_step(index + 1, step)?);
        }

        Ok(RunReport {
            steps: reports,
            final_stats: compute_stats(self.state.parcels(), self.state.riders()),
            final_state: self.state,
            operation_log: self.log,
        })
    }

    /// Runs one step at the current clock, then moves the clock on a minute.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Json` if the response cannot be encoded.
    pub fn run_step(&mut self, number: usize, step: &Step) -> Result<StepReport, ScenarioError> {
        let now: OffsetDateTime = self.clock;
        self.clock += Duration::minutes(1);
        let actor: Actor = Actor::new(self.operator.clone(), String::from(OPERATOR_ACTOR_TYPE));
        let cause: Cause = Cause::new(
            format!("step-{number}"),
            format!("Scenario step {number}: {}", step.name()),
        );
        debug!(step = number, op = step.name(), "Running step");

        let state: &DispatchState = &self.state;
        let outcome: StepOutcome = match step {
            Step::CreateCity(request) => {
                self.applied(create_city(state, request, actor, cause, now))?
            }
            Step::CreateRoute(request) => {
                self.applied(create_route(state, request, actor, cause, now))?
            }
            Step::SetRouteBlocked(request) => {
                self.applied(set_route_blocked(state, request, actor, cause, now))?
            }
            Step::CreateParcel(request) => {
                self.applied(create_parcel(state, request, actor, cause, now))?
            }
            Step::GetParcel(request) => answered(get_parcel(state, request))?,
            Step::UpdateParcel(request) => {
                self.applied(update_parcel(state, request, actor, cause, now))?
            }
            Step::DeleteParcel(request) => {
                self.applied(delete_parcel(state, request, actor, cause, now))?
            }
            Step::CreateRider(request) => {
                self.applied(create_rider(state, request, actor, cause, now))?
            }
            Step::UpdateRider(request) => {
                self.applied(update_rider(state, request, actor, cause, now))?
            }
            Step::DeleteRider(request) => {
                self.applied(delete_rider(state, request, actor, cause, now))?
            }
            Step::PickupNext => self.drained(pickup_next(state, actor, cause, now))?,
            Step::PickupParcel(request) => {
                self.applied(pickup_parcel(state, request, actor, cause, now))?
            }
            Step::AdvanceNext => self.drained(advance_next(state, actor, cause, now))?,
            Step::AdvanceToTransit(request) => {
                self.applied(advance_to_transit(state, request, actor, cause, now))?
            }
            Step::Assign(request) => self.applied(assign(state, request, actor, cause, now))?,
            Step::DispatchNext => self.drained(dispatch_next(state, actor, cause, now))?,
            Step::Deliver(request) => self.applied(deliver(state, request, actor, cause, now))?,
            Step::DeliveryAttempt(request) => {
                self.applied(record_delivery_attempt(state, request, actor, cause, now))?
            }
            Step::ReturnToSender(request) => {
                self.applied(return_to_sender(state, request, actor, cause, now))?
            }
            Step::MarkMissing(request) => {
                self.applied(mark_missing(state, request, actor, cause, now))?
            }
            Step::RecordLocation(request) => {
                self.applied(record_location(state, request, actor, cause, now))?
            }
            Step::ListCities => answered(Ok(list_cities(state)))?,
            Step::ListRoutes => answered(Ok(list_routes(state)))?,
            Step::ListBlockedRoutes => answered(Ok(list_blocked_routes(state)))?,
            Step::ShortestRoute(request) => answered(shortest_route(state, request))?,
            Step::AlternativeRoutes {
                source_city_id,
                dest_city_id,
                count,
            } => {
                let request: RouteQueryRequest = RouteQueryRequest {
                    source_city_id: *source_city_id,
                    dest_city_id: *dest_city_id,
                };
                let count: usize = count.unwrap_or(self.max_alternatives);
                answered(alternative_routes(state, &request, count))?
            }
            Step::ListParcels(request) => answered(list_parcels(state, request))?,
            Step::ListRiders => answered(Ok(list_riders(state)))?,
            Step::RiderStats(request) => answered(rider_stats(state, request))?,
            Step::RecommendRider(request) => answered(recommend_rider(state, request))?,
            Step::Queues => answered(Ok(queues(state)))?,
            Step::Stats => answered(Ok(stats(state)))?,
        };
        info!(
            step = number,
            op = step.name(),
            status = outcome.label(),
            "Step finished"
        );

        Ok(StepReport {
            step: number,
            op: step.name(),
            outcome,
        })
    }

    /// Adopts the new state and logs the event of a successful command.
    fn applied<T: Serialize>(
        &mut self,
        result: Result<ApiResult<T>, ApiError>,
    ) -> Result<StepOutcome, ScenarioError> {
        match result {
            Ok(applied) => {
                let response: Value = serde_json::to_value(&applied.response)?;
                self.state = applied.new_state;
                self.log.record(applied.audit_event);
                Ok(StepOutcome::Applied { response })
            }
            Err(error) => Ok(StepOutcome::Rejected { error }),
        }
    }

    fn drained<T: Serialize>(
        &mut self,
        result: Result<QueueResult<T>, ApiError>,
    ) -> Result<StepOutcome, ScenarioError> {
        match result {
            Ok(QueueResult::Processed(applied)) => self.applied(Ok(applied)),
            Ok(QueueResult::EmptyQueue) => Ok(StepOutcome::EmptyQueue),
            Err(error) => Ok(StepOutcome::Rejected { error }),
        }
    }
}

fn answered<T: Serialize>(result: Result<T, ApiError>) -> Result<StepOutcome, ScenarioError> {
    match result {
        Ok(response) => Ok(StepOutcome::Answered {
            response: serde_json::to_value(&response)?,
        }),
        Err(error) => Ok(StepOutcome::Rejected { error }),
    }
}
