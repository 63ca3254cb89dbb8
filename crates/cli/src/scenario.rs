// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scenario files: the initial records and the ordered steps to run.

use std::path::Path;

use courier_api::{
    AssignRequest, CreateCityRequest, CreateParcelRequest, CreateRiderRequest,
    CreateRouteRequest, DeliveryAttemptRequest, ListParcelsRequest, ParcelRequest,
    RecordLocationRequest, RiderRequest, RouteQueryRequest, SetRouteBlockedRequest,
    UpdateParcelRequest, UpdateRiderRequest, translate_domain_error,
};
use courier_dispatch::{DispatchState, IdCounters};
use courier_domain::{City, Parcel, Rider, Route};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ScenarioError;

/// Operator id recorded in the audit log when the scenario does not name one.
pub const DEFAULT_OPERATOR: &str = "simulator";

fn default_operator() -> String {
    String::from(DEFAULT_OPERATOR)
}

/// A simulation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Who the audit log attributes the steps to.
    #[serde(default = "default_operator")]
    pub operator: String,
    /// Clock value for the first step. Each later step is one minute on.
    /// Defaults to the wall clock at start-up.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_at: Option<OffsetDateTime>,
    /// Cities present before the first step.
    #[serde(default)]
    pub cities: Vec<City>,
    /// Routes present before the first step.
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Parcels present before the first step.
    #[serde(default)]
    pub parcels: Vec<Parcel>,
    /// Riders present before the first step.
    #[serde(default)]
    pub riders: Vec<Rider>,
    /// Starting id counters. Raised past any loaded parcel or rider id.
    #[serde(default)]
    pub counters: IdCounters,
    /// The steps, run in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Json` if the text is not a valid scenario.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text: String = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Builds the starting state from the initial records.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Records` if the records repeat an id, refer to an
    /// unknown city, or break a record invariant.
    pub fn initial_state(&self) -> Result<DispatchState, ScenarioError> {
        DispatchState::from_records(
            self.cities.clone(),
            self.routes.clone(),
            self.parcels.clone(),
            self.riders.clone(),
            self.counters,
        )
        .map_err(|err| ScenarioError::Records(translate_domain_error(err)))
    }
}

/// One scenario step: an API operation and its request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateCity(CreateCityRequest),
    CreateRoute(CreateRouteRequest),
    SetRouteBlocked(SetRouteBlockedRequest),
    CreateParcel(CreateParcelRequest),
    GetParcel(ParcelRequest),
    UpdateParcel(UpdateParcelRequest),
    DeleteParcel(ParcelRequest),
    CreateRider(CreateRiderRequest),
    UpdateRider(UpdateRiderRequest),
    DeleteRider(RiderRequest),
    PickupNext,
    PickupParcel(ParcelRequest),
    AdvanceNext,
    AdvanceToTransit(ParcelRequest),
    Assign(AssignRequest),
    DispatchNext,
    Deliver(ParcelRequest),
    DeliveryAttempt(DeliveryAttemptRequest),
    ReturnToSender(ParcelRequest),
    MarkMissing(ParcelRequest),
    RecordLocation(RecordLocationRequest),
    ListCities,
    ListRoutes,
    ListBlockedRoutes,
    ShortestRoute(RouteQueryRequest),
    /// Up to `count` paths; the `--max-alternatives` value when absent.
    AlternativeRoutes {
        source_city_id: u32,
        dest_city_id: u32,
        #[serde(default)]
        count: Option<usize>,
    },
    ListParcels(ListParcelsRequest),
    ListRiders,
    RiderStats(RiderRequest),
    RecommendRider(ParcelRequest),
    Queues,
    Stats,
}

impl Step {
    /// The `op` tag of this step.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateCity(_) => "create_city",
            Self::CreateRoute(_) => "create_route",
            Self::SetRouteBlocked(_) => "set_route_blocked",
            Self::CreateParcel(_) => "create_parcel",
            Self::GetParcel(_) => "get_parcel",
            Self::UpdateParcel(_) => "update_parcel",
            Self::DeleteParcel(_) => "delete_parcel",
            Self::CreateRider(_) => "create_rider",
            Self::UpdateRider(_) => "update_rider",
            Self::DeleteRider(_) => "delete_rider",
            Self::PickupNext => "pickup_next",
            Self::PickupParcel(_) => "pickup_parcel",
            Self::AdvanceNext => "advance_next",
            Self::AdvanceToTransit(_) => "advance_to_transit",
            Self::Assign(_) => "assign",
            Self::DispatchNext => "dispatch_next",
            Self::Deliver(_) => "deliver",
            Self::DeliveryAttempt(_) => "delivery_attempt",
            Self::ReturnToSender(_) => "return_to_sender",
            Self::MarkMissing(_) => "mark_missing",
            Self::RecordLocation(_) => "record_location",
            Self::ListCities => "list_cities",
            Self::ListRoutes => "list_routes",
            Self::ListBlockedRoutes => "list_blocked_routes",
            Self::ShortestRoute(_) => "shortest_route",
            Self::AlternativeRoutes { .. } => "alternative_routes",
            Self::ListParcels(_) => "list_parcels",
            Self::ListRiders => "list_riders",
            Self::RiderStats(_) => "rider_stats",
            Self::RecommendRider(_) => "recommend_rider",
            Self::Queues => "queues",
            Self::Stats => "stats",
        }
    }
}
