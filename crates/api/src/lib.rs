// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, QueueResult, advance_next, advance_to_transit, alternative_routes, assign,
    create_city, create_parcel, create_rider, create_route, delete_parcel, delete_rider, deliver,
    dispatch_next, get_parcel, list_blocked_routes, list_cities, list_parcels, list_riders,
    list_routes, mark_missing, pickup_next, pickup_parcel, queues, recommend_rider,
    record_delivery_attempt, record_location, return_to_sender, rider_stats, set_route_blocked,
    shortest_route, stats, update_parcel, update_rider,
};
pub use request_response::{
    AlternativeRoutesResponse, AssignRequest, AssignResponse, CreateCityRequest,
    CreateCityResponse, CreateParcelRequest, CreateRiderRequest, CreateRouteRequest,
    DeleteResponse, DeliveryAttemptRequest, ListCitiesResponse, ListParcelsRequest,
    ListParcelsResponse, ListRidersResponse, ListRoutesResponse, ParcelRequest, ParcelResponse,
    PathInfo, QueuesResponse, RecommendRiderResponse, RecordLocationRequest, RiderRequest,
    RiderResponse, RouteQueryRequest, RouteResponse, SetRouteBlockedRequest, StatsResponse,
    UpdateParcelRequest, UpdateRiderRequest,
};
