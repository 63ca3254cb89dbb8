// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw values (numeric ids, priority numbers, status and event
//! names) and are checked when translated into commands. Responses carry the
//! domain records as they are after the operation.

use courier_domain::{City, DispatchStats, Parcel, PathResult, Rider, RiderStats, Route};
use serde::{Deserialize, Serialize};

/// API request to add a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCityRequest {
    /// The display name.
    pub name: String,
}

/// API response for a created city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCityResponse {
    /// The new city.
    pub city: City,
    /// A success message.
    pub message: String,
}

/// API request to add a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRouteRequest {
    /// One end.
    pub source_id: u32,
    /// The other end.
    pub dest_id: u32,
    /// Route length.
    pub distance: u32,
}

/// API request to block or unblock a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRouteBlockedRequest {
    /// One end.
    pub source_id: u32,
    /// The other end.
    pub dest_id: u32,
    /// The new flag.
    pub blocked: bool,
}

/// API response carrying a route after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// The route.
    pub route: Route,
    /// A success message.
    pub message: String,
}

/// API request to register a parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateParcelRequest {
    /// Name of the sender.
    pub sender: String,
    /// Name of the receiver.
    pub receiver: String,
    /// Priority number: 1 Overnight, 2 Two-Day, 3 Normal.
    pub priority: u8,
    /// Weight in kilograms.
    pub weight: f64,
    /// City the parcel starts from.
    pub source_city_id: u32,
    /// City the parcel is headed to.
    pub dest_city_id: u32,
    /// Whether the parcel needs careful handling.
    #[serde(default)]
    pub is_fragile: bool,
}

/// API request to change parcel fields.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateParcelRequest {
    /// The parcel.
    pub tracking_id: u32,
    /// New sender name.
    #[serde(default)]
    pub sender: Option<String>,
    /// New receiver name.
    #[serde(default)]
    pub receiver: Option<String>,
    /// New priority number.
    #[serde(default)]
    pub priority: Option<u8>,
    /// New weight.
    #[serde(default)]
    pub weight: Option<f64>,
    /// New fragile flag.
    #[serde(default)]
    pub is_fragile: Option<bool>,
    /// New status name, such as `InWarehouse`.
    #[serde(default)]
    pub status: Option<String>,
}

/// API request naming one parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelRequest {
    /// The parcel.
    pub tracking_id: u32,
}

/// API response carrying a parcel after an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelResponse {
    /// The parcel.
    pub parcel: Parcel,
    /// A success message.
    pub message: String,
}

/// API response for a deleted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// The id of the deleted record.
    pub id: u32,
    /// A success message.
    pub message: String,
}

/// API request to register a rider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRiderRequest {
    /// Rider name.
    pub name: String,
    /// Maximum load in kilograms.
    pub capacity: f64,
    /// Starting city.
    pub current_city_id: u32,
}

/// API request to change rider fields.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateRiderRequest {
    /// The rider.
    pub rider_id: u32,
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New capacity.
    #[serde(default)]
    pub capacity: Option<f64>,
    /// New location.
    #[serde(default)]
    pub current_city_id: Option<u32>,
}

/// API request naming one rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiderRequest {
    /// The rider.
    pub rider_id: u32,
}

/// API response carrying a rider after an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderResponse {
    /// The rider.
    pub rider: Rider,
    /// A success message.
    pub message: String,
}

/// API request to assign a parcel to a rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRequest {
    /// The parcel.
    pub tracking_id: u32,
    /// The rider.
    pub rider_id: u32,
}

/// API response for an assignment or dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignResponse {
    /// The parcel after the operation.
    pub parcel: Parcel,
    /// The rider after the operation.
    pub rider: Rider,
    /// A success message.
    pub message: String,
}

/// API request to record a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttemptRequest {
    /// The parcel.
    pub tracking_id: u32,
    /// Whether the receiver took the parcel.
    pub success: bool,
}

/// API request to record a location scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLocationRequest {
    /// The parcel.
    pub tracking_id: u32,
    /// Where the scan happened.
    pub city_id: u32,
    /// `Loaded` or `Unloaded`.
    pub event: String,
}

/// API request for a path query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQueryRequest {
    /// Start city.
    pub source_city_id: u32,
    /// Target city.
    pub dest_city_id: u32,
}

/// A path and its total distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
    /// Sum of the route distances along the path.
    pub distance: u64,
    /// City ids, start first.
    pub path: Vec<u32>,
}

impl From<PathResult> for PathInfo {
    fn from(result: PathResult) -> Self {
        Self {
            distance: result.total_distance,
            path: result.path.iter().map(courier_domain::CityId::value).collect(),
        }
    }
}

/// API response for an alternative routes query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeRoutesResponse {
    /// Paths found, shortest first.
    pub routes: Vec<PathInfo>,
}

/// Filters for listing parcels. All set filters must match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListParcelsRequest {
    /// Only parcels with this status name.
    #[serde(default)]
    pub status: Option<String>,
    /// Only parcels of this weight category (`Light`, `Medium`, `Heavy`).
    #[serde(default)]
    pub weight_category: Option<String>,
    /// Only parcels headed to this city.
    #[serde(default)]
    pub dest_city_id: Option<u32>,
    /// Only fragile parcels.
    #[serde(default)]
    pub fragile_only: bool,
    /// Sort by dispatch order instead of creation order.
    #[serde(default)]
    pub dispatch_order: bool,
}

/// API response for a parcel listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListParcelsResponse {
    /// Matching parcels.
    pub parcels: Vec<Parcel>,
}

/// API response for the city listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCitiesResponse {
    /// All cities.
    pub cities: Vec<City>,
}

/// API response for a route listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRoutesResponse {
    /// Matching routes.
    pub routes: Vec<Route>,
}

/// API response for the rider listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRidersResponse {
    /// Per-rider figures.
    pub riders: Vec<RiderStats>,
}

/// API response for the work queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuesResponse {
    /// Pending parcels, next pickup first.
    pub pickup: Vec<u32>,
    /// Warehoused parcels, next dispatch first.
    pub warehouse: Vec<u32>,
    /// Parcels in transit.
    pub transit: Vec<u32>,
}

/// API response for a rider recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRiderResponse {
    /// The parcel the recommendation is for.
    pub tracking_id: u32,
    /// The suggested rider, if anyone can carry the parcel.
    pub rider: Option<Rider>,
}

/// API response for the statistics query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// The figures.
    #[serde(flatten)]
    pub stats: DispatchStats,
}
