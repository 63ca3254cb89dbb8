// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::queue::{pickup_queue, transit_queue, warehouse_queue};
use crate::types::{CityId, Parcel, ParcelStatus, Priority, Rider, RiderId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of parcels in each work queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    /// Parcels waiting for pickup.
    pub pickup: usize,
    /// Parcels in the warehouse.
    pub warehouse: usize,
    /// Parcels in transit.
    pub transit: usize,
}

/// Aggregate figures over the current parcel and rider collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    /// Number of parcels.
    pub total_parcels: usize,
    /// Parcel count per status. Statuses with no parcels are omitted.
    pub by_status: BTreeMap<ParcelStatus, usize>,
    /// Parcel count per priority. Priorities with no parcels are omitted.
    pub by_priority: BTreeMap<Priority, usize>,
    /// Number of riders.
    pub total_riders: usize,
    /// Work queue sizes.
    pub queue_counts: QueueCounts,
    /// Delivered parcels as a whole percentage of all parcels.
    pub delivery_success_rate: u32,
}

/// Computes [`DispatchStats`].
#[must_use]
pub fn compute_stats(parcels: &[Parcel], riders: &[Rider]) -> DispatchStats {
    let mut by_status: BTreeMap<ParcelStatus, usize> = BTreeMap::new();
    let mut by_priority: BTreeMap<Priority, usize> = BTreeMap::new();
    for parcel in parcels {
        *by_status.entry(parcel.status()).or_insert(0) += 1;
        *by_priority.entry(parcel.priority).or_insert(0) += 1;
    }

    let delivered: usize = by_status
        .get(&ParcelStatus::Delivered)
        .copied()
        .unwrap_or(0);

    DispatchStats {
        total_parcels: parcels.len(),
        by_status,
        by_priority,
        total_riders: riders.len(),
        queue_counts: QueueCounts {
            pickup: pickup_queue(parcels).len(),
            warehouse: warehouse_queue(parcels).len(),
            transit: transit_queue(parcels).len(),
        },
        delivery_success_rate: percentage(delivered, parcels.len()),
    }
}

/// Whole-number percentage, 0 when `total` is 0.
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    u32::try_from(part.saturating_mul(100) / total).unwrap_or(100)
}

/// Per-rider figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderStats {
    /// The rider.
    pub rider_id: RiderId,
    /// Rider name.
    pub name: String,
    /// Maximum load.
    pub capacity: f64,
    /// Load currently carried.
    pub current_load: f64,
    /// Capacity left.
    pub available_capacity: f64,
    /// Number of parcels currently assigned.
    pub assigned_count: usize,
    /// Summed weight of the assigned parcels still present in the collection.
    pub assigned_weight: f64,
    /// Where the rider is.
    pub current_city_id: CityId,
}

/// Computes [`RiderStats`] for one rider.
#[must_use]
pub fn compute_rider_stats(rider: &Rider, parcels: &[Parcel]) -> RiderStats {
    let assigned_weight: f64 = parcels
        .iter()
        .filter(|parcel| rider.assigned_parcels().contains(&parcel.tracking_id))
        .map(|parcel| parcel.weight)
        .sum();

    RiderStats {
        rider_id: rider.rider_id,
        name: rider.name.clone(),
        capacity: rider.capacity(),
        current_load: rider.current_load(),
        available_capacity: rider.available_capacity(),
        assigned_count: rider.assigned_parcels().len(),
        assigned_weight,
        current_city_id: rider.current_city_id,
    }
}
