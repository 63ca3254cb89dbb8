// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parcel lifecycle rules.
//!
//! ```text
//! Pending ──▶ PickedUp ──▶ InWarehouse ──▶ InTransit ──▶ Delivered
//!                                              │
//!                                              ├──▶ Returned
//!                                              └──▶ Missing
//! ```
//!
//! Every status change goes through [`apply_transition`], which appends one
//! history entry. History entries are never removed or reordered.

use crate::error::DomainError;
use crate::route_graph::PathResult;
use crate::types::{City, LocationEvent, Parcel, ParcelStatus, Priority};
use crate::validation::{validate_name, validate_weight};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// History entry written when a parcel is created.
pub const PARCEL_CREATED_EVENT: &str = "Parcel Created";

/// History entry written when a parcel in transit gets a new planned route.
pub const ROUTE_RECALCULATED_EVENT: &str = "Route recalculated due to network change";

/// Failed delivery attempts after which a parcel goes back to the sender.
pub const MAX_DELIVERY_ATTEMPTS: u32 = 3;

impl ParcelStatus {
    /// Returns whether no further transition is defined from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Returned | Self::Missing)
    }

    /// Checks if a transition from this status to `target` is permitted.
    ///
    /// Valid transitions are:
    /// - `Pending` → `PickedUp`
    /// - `PickedUp` → `InWarehouse`
    /// - `InWarehouse` → `InTransit`
    /// - `InTransit` → `Delivered`, `Returned` or `Missing`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::PickedUp)
                | (Self::PickedUp, Self::InWarehouse)
                | (Self::InWarehouse, Self::InTransit)
                | (Self::InTransit, Self::Delivered | Self::Returned | Self::Missing)
        )
    }
}

/// Moves a parcel to `target` and records the change in its history.
///
/// All other fields are left untouched.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` if `target` is not reachable
/// from the current status.
pub fn apply_transition(
    parcel: &mut Parcel,
    target: ParcelStatus,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    check_transition(parcel, target)?;
    parcel.set_status(target);
    parcel.record_event(now, format!("Status changed to {target}"));
    Ok(())
}

fn check_transition(parcel: &Parcel, target: ParcelStatus) -> Result<(), DomainError> {
    if !parcel.status().can_transition_to(target) {
        return Err(DomainError::InvalidTransition {
            tracking_id: parcel.tracking_id,
            from: parcel.status(),
            to: target,
        });
    }
    Ok(())
}

/// Rejects parcels that already reached a terminal status.
///
/// # Errors
///
/// Returns `DomainError::ParcelClosed` for `Delivered`, `Returned` and
/// `Missing` parcels.
pub fn ensure_open(parcel: &Parcel) -> Result<(), DomainError> {
    if parcel.status().is_terminal() {
        return Err(DomainError::ParcelClosed {
            tracking_id: parcel.tracking_id,
            status: parcel.status(),
        });
    }
    Ok(())
}

/// Picks up a pending parcel and checks it into the warehouse.
///
/// Two transitions are applied back to back: `Pending` → `PickedUp` →
/// `InWarehouse`, producing two history entries.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` unless the parcel is `Pending`.
/// The parcel is unchanged on error.
pub fn pick_up(parcel: &mut Parcel, now: OffsetDateTime) -> Result<(), DomainError> {
    check_transition(parcel, ParcelStatus::PickedUp)?;
    apply_transition(parcel, ParcelStatus::PickedUp, now)?;
    apply_transition(parcel, ParcelStatus::InWarehouse, now)
}

/// Sends a warehoused parcel on its way.
///
/// The parcel is reset to its source city and its planned route is set to
/// `route` (or cleared when no path is known).
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` unless the parcel is `InWarehouse`.
pub fn send_to_transit(
    parcel: &mut Parcel,
    route: Option<PathResult>,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    apply_transition(parcel, ParcelStatus::InTransit, now)?;
    parcel.current_city_id = parcel.source_city_id;
    parcel.current_route = route.map(|found| found.path).unwrap_or_default();
    Ok(())
}

/// Replaces the planned route of a parcel in transit after the network changed.
///
/// Parcels in any other status keep their route and `false` is returned.
pub fn replan_route(parcel: &mut Parcel, route: PathResult, now: OffsetDateTime) -> bool {
    if parcel.status() != ParcelStatus::InTransit {
        return false;
    }
    parcel.current_route = route.path;
    parcel.record_event(now, String::from(ROUTE_RECALCULATED_EVENT));
    true
}

/// Marks a parcel in transit as delivered at its destination city.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` unless the parcel is `InTransit`.
pub fn deliver(parcel: &mut Parcel, now: OffsetDateTime) -> Result<(), DomainError> {
    apply_transition(parcel, ParcelStatus::Delivered, now)?;
    parcel.current_city_id = parcel.dest_city_id;
    Ok(())
}

/// Records one delivery attempt for a parcel in transit.
///
/// A successful attempt delivers the parcel. A failed attempt is noted in the
/// history, and once [`MAX_DELIVERY_ATTEMPTS`] attempts have failed the parcel
/// is returned to the sender.
///
/// # Returns
///
/// The parcel status after the attempt.
///
/// # Errors
///
/// Returns an error if the parcel is closed or not in transit.
pub fn record_delivery_attempt(
    parcel: &mut Parcel,
    success: bool,
    now: OffsetDateTime,
) -> Result<ParcelStatus, DomainError> {
    ensure_open(parcel)?;
    check_transition(parcel, ParcelStatus::Delivered)?;

    parcel.delivery_attempts += 1;
    if success {
        deliver(parcel, now)?;
        return Ok(parcel.status());
    }

    parcel.record_event(
        now,
        format!(
            "Delivery attempt failed (Attempt {})",
            parcel.delivery_attempts
        ),
    );
    if parcel.delivery_attempts >= MAX_DELIVERY_ATTEMPTS {
        apply_transition(parcel, ParcelStatus::Returned, now)?;
    }
    Ok(parcel.status())
}

/// Records a loading or unloading scan at `city`.
///
/// # Errors
///
/// Returns `DomainError::ParcelClosed` for terminal parcels.
pub fn record_location(
    parcel: &mut Parcel,
    city: &City,
    event: LocationEvent,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    ensure_open(parcel)?;
    parcel.current_city_id = city.id;
    parcel.record_event(now, format!("{} at {}", event.as_str(), city.name));
    Ok(())
}

/// A partial update of a parcel.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParcelPatch {
    /// New sender name.
    pub sender: Option<String>,
    /// New receiver name.
    pub receiver: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New weight. Rejected while a rider carries the parcel.
    pub weight: Option<f64>,
    /// New fragile flag.
    pub is_fragile: Option<bool>,
    /// New status. Subject to the same rules as [`apply_transition`].
    pub status: Option<ParcelStatus>,
}

/// Applies a partial update.
///
/// Everything is validated before anything is written, so the parcel is
/// unchanged on error. A status change is applied last and goes through
/// [`apply_transition`]; setting the current status again is a no-op.
///
/// # Errors
///
/// Returns an error if:
/// - A name is blank or the weight is not positive
/// - The weight changes while a rider carries the parcel
/// - The status change is not a permitted transition
pub fn apply_patch(
    parcel: &mut Parcel,
    patch: ParcelPatch,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if let Some(sender) = &patch.sender {
        validate_name("Sender", sender)?;
    }
    if let Some(receiver) = &patch.receiver {
        validate_name("Receiver", receiver)?;
    }
    if let Some(weight) = patch.weight {
        validate_weight(weight)?;
        if let Some(rider_id) = parcel.assigned_rider_id() {
            if !parcel.status().is_terminal() {
                return Err(DomainError::AlreadyAssigned {
                    tracking_id: parcel.tracking_id,
                    rider_id,
                });
            }
        }
    }
    let status_change: Option<ParcelStatus> =
        patch.status.filter(|status| *status != parcel.status());
    if let Some(target) = status_change {
        check_transition(parcel, target)?;
    }

    if let Some(sender) = patch.sender {
        parcel.sender = sender;
    }
    if let Some(receiver) = patch.receiver {
        parcel.receiver = receiver;
    }
    if let Some(priority) = patch.priority {
        parcel.priority = priority;
    }
    if let Some(weight) = patch.weight {
        parcel.weight = weight;
    }
    if let Some(is_fragile) = patch.is_fragile {
        parcel.is_fragile = is_fragile;
    }
    if let Some(target) = status_change {
        apply_transition(parcel, target, now)?;
    }
    Ok(())
}
