// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queue selection and the dispatch ordering used for listings.
//!
//! Queues are views over the parcel collection, derived from parcel status on
//! every call. Collection order is creation order.

use crate::types::{Parcel, ParcelStatus};
use std::cmp::Ordering;

/// Parcels waiting for pickup, in collection order.
#[must_use]
pub fn pickup_queue(parcels: &[Parcel]) -> Vec<&Parcel> {
    parcels
        .iter()
        .filter(|parcel| parcel.status() == ParcelStatus::Pending)
        .collect()
}

/// Parcels waiting in the warehouse, most urgent priority first.
///
/// The sort is stable, so parcels of equal priority keep collection order.
#[must_use]
pub fn warehouse_queue(parcels: &[Parcel]) -> Vec<&Parcel> {
    let mut queue: Vec<&Parcel> = parcels
        .iter()
        .filter(|parcel| parcel.status() == ParcelStatus::InWarehouse)
        .collect();
    queue.sort_by_key(|parcel| parcel.priority);
    queue
}

/// Parcels currently in transit, in collection order.
#[must_use]
pub fn transit_queue(parcels: &[Parcel]) -> Vec<&Parcel> {
    parcels
        .iter()
        .filter(|parcel| parcel.status() == ParcelStatus::InTransit)
        .collect()
}

/// Selects the next parcel to pick up: the first pending parcel.
///
/// `None` means the queue is empty, which is not an error.
#[must_use]
pub fn select_for_pickup(parcels: &[Parcel]) -> Option<&Parcel> {
    pickup_queue(parcels).into_iter().next()
}

/// Selects the next warehoused parcel to move into transit.
///
/// `None` means the queue is empty, which is not an error.
#[must_use]
pub fn select_for_transit(parcels: &[Parcel]) -> Option<&Parcel> {
    warehouse_queue(parcels).into_iter().next()
}

/// Full dispatch ordering used for listings.
///
/// Priority first, then non-fragile before fragile, then lighter weight
/// category, then destination city, then tracking id.
#[must_use]
pub fn dispatch_order(a: &Parcel, b: &Parcel) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.is_fragile.cmp(&b.is_fragile))
        .then_with(|| a.weight_category().cmp(&b.weight_category()))
        .then_with(|| a.dest_city_id.cmp(&b.dest_city_id))
        .then_with(|| a.tracking_id.cmp(&b.tracking_id))
}
