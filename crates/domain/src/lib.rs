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

mod dispatch;
mod error;
mod lifecycle;
mod queue;
mod route_graph;
mod stats;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use dispatch::{RiderPatch, apply_rider_patch, assign, check_capacity, recommend_rider, release};
pub use error::DomainError;
pub use lifecycle::{
    MAX_DELIVERY_ATTEMPTS, PARCEL_CREATED_EVENT, ParcelPatch, ROUTE_RECALCULATED_EVENT,
    apply_patch, apply_transition, deliver, ensure_open, pick_up, record_delivery_attempt,
    record_location, replan_route, send_to_transit,
};
pub use queue::{
    dispatch_order, pickup_queue, select_for_pickup, select_for_transit, transit_queue,
    warehouse_queue,
};
pub use route_graph::{PathResult, RouteGraph, blocked_routes, find_edge, set_blocked};
pub use stats::{DispatchStats, QueueCounts, RiderStats, compute_rider_stats, compute_stats};
pub use types::{
    City, CityId, FIRST_RIDER_ID, FIRST_TRACKING_ID, HistoryEntry, LocationEvent, NewParcel,
    NewRider, Parcel, ParcelStatus, Priority, Rider, RiderId, Route, TrackingId, WeightCategory,
};
pub use validation::{
    validate_capacity, validate_city_exists, validate_name, validate_new_parcel,
    validate_new_rider, validate_route, validate_weight,
};
