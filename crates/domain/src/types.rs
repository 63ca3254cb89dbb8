// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The first tracking identifier handed out in a fresh process.
pub const FIRST_TRACKING_ID: u32 = 1000;

/// The first rider identifier handed out in a fresh process.
pub const FIRST_RIDER_ID: u32 = 1;

/// Identifier of a city in the route network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(u32);

impl CityId {
    /// Creates a new `CityId`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracking identifier of a parcel.
///
/// Tracking ids are issued monotonically starting at [`FIRST_TRACKING_ID`]
/// and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(u32);

impl TrackingId {
    /// Creates a new `TrackingId`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiderId(u32);

impl RiderId {
    /// Creates a new `RiderId`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RiderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A city in the route network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// The city identifier.
    pub id: CityId,
    /// The display name of the city.
    pub name: String,
}

impl City {
    /// Creates a new `City`.
    #[must_use]
    pub const fn new(id: CityId, name: String) -> Self {
        Self { id, name }
    }
}

/// An undirected, weighted road between two cities.
///
/// The `source_id`/`dest_id` naming only records how the route was entered;
/// lookups match either orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// One end of the route.
    pub source_id: CityId,
    /// The other end of the route.
    pub dest_id: CityId,
    /// Length of the route. Always positive.
    pub distance: u32,
    /// Whether the route is temporarily unusable.
    pub blocked: bool,
}

impl Route {
    /// Creates a new unblocked route.
    #[must_use]
    pub const fn new(source_id: CityId, dest_id: CityId, distance: u32) -> Self {
        Self {
            source_id,
            dest_id,
            distance,
            blocked: false,
        }
    }

    /// Checks whether this route joins `a` and `b`, in either orientation.
    #[must_use]
    pub fn connects(&self, a: CityId, b: CityId) -> bool {
        (self.source_id == a && self.dest_id == b) || (self.source_id == b && self.dest_id == a)
    }

    /// Returns the opposite end of the route when `city` is one of its ends.
    #[must_use]
    pub fn other_end(&self, city: CityId) -> Option<CityId> {
        if self.source_id == city {
            Some(self.dest_id)
        } else if self.dest_id == city {
            Some(self.source_id)
        } else {
            None
        }
    }
}

/// Delivery priority of a parcel.
///
/// Lower numeric values are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    /// Next-day delivery.
    Overnight = 1,
    /// Delivery within two days.
    TwoDay = 2,
    /// Standard delivery.
    Normal = 3,
}

impl Priority {
    /// Returns the numeric priority value (1 = most urgent).
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self {
            Self::Overnight => 1,
            Self::TwoDay => 2,
            Self::Normal => 3,
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Overnight => "Overnight",
            Self::TwoDay => "Two-Day",
            Self::Normal => "Normal",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Overnight),
            2 => Ok(Self::TwoDay),
            3 => Ok(Self::Normal),
            _ => Err(DomainError::InvalidPriority(value)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle status of a parcel.
///
/// See [`ParcelStatus::can_transition_to`] for the permitted transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParcelStatus {
    /// Registered, waiting for pickup. The only initial state.
    Pending,
    /// Collected from the sender.
    PickedUp,
    /// Sitting in the warehouse, waiting for dispatch.
    InWarehouse,
    /// On the road to the destination.
    InTransit,
    /// Handed to the receiver (terminal).
    Delivered,
    /// Sent back to the sender (terminal).
    Returned,
    /// Lost in transit (terminal).
    Missing,
}

impl ParcelStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::PickedUp,
        Self::InWarehouse,
        Self::InTransit,
        Self::Delivered,
        Self::Returned,
        Self::Missing,
    ];

    /// Converts this status to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PickedUp => "PickedUp",
            Self::InWarehouse => "InWarehouse",
            Self::InTransit => "InTransit",
            Self::Delivered => "Delivered",
            Self::Returned => "Returned",
            Self::Missing => "Missing",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PickedUp => "Picked Up",
            Self::InWarehouse => "In Warehouse",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Returned => "Returned",
            Self::Missing => "Missing",
        }
    }
}

impl FromStr for ParcelStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weight class of a parcel, used for listings and dispatch ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeightCategory {
    /// Under 5 kg.
    Light,
    /// 5 kg up to, but not including, 20 kg.
    Medium,
    /// 20 kg and above.
    Heavy,
}

impl WeightCategory {
    /// Classifies a weight.
    #[must_use]
    pub fn from_weight(weight: f64) -> Self {
        if weight < 5.0 {
            Self::Light
        } else if weight < 20.0 {
            Self::Medium
        } else {
            Self::Heavy
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light (0-5kg)",
            Self::Medium => "Medium (5-20kg)",
            Self::Heavy => "Heavy (20+kg)",
        }
    }
}

impl FromStr for WeightCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Light" => Ok(Self::Light),
            "Medium" => Ok(Self::Medium),
            "Heavy" => Ok(Self::Heavy),
            _ => Err(DomainError::InvalidWeightCategory(s.to_string())),
        }
    }
}

/// Kind of location scan recorded against a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationEvent {
    /// Parcel was loaded onto a vehicle at a city.
    Loaded,
    /// Parcel was unloaded at a city.
    Unloaded,
}

impl LocationEvent {
    /// Returns the history verb for this scan.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "Loaded",
            Self::Unloaded => "Unloaded",
        }
    }
}

impl FromStr for LocationEvent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Loaded" => Ok(Self::Loaded),
            "Unloaded" => Ok(Self::Unloaded),
            _ => Err(DomainError::InvalidLocationEvent(s.to_string())),
        }
    }
}

/// A single entry in a parcel's history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the event happened.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// What happened.
    pub event: String,
}

impl HistoryEntry {
    /// Creates a new `HistoryEntry`.
    #[must_use]
    pub const fn new(timestamp: OffsetDateTime, event: String) -> Self {
        Self { timestamp, event }
    }
}

/// Caller-supplied fields for a new parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParcel {
    /// Name of the sender.
    pub sender: String,
    /// Name of the receiver.
    pub receiver: String,
    /// Delivery priority.
    pub priority: Priority,
    /// Weight in kilograms.
    pub weight: f64,
    /// City the parcel starts from.
    pub source_city_id: CityId,
    /// City the parcel is headed to.
    pub dest_city_id: CityId,
    /// Whether the parcel needs careful handling.
    pub is_fragile: bool,
}

/// A parcel and its lifecycle record.
///
/// `status`, `history` and the rider assignment are only changed through the
/// lifecycle and dispatch rules so that the history stays append-only and in
/// step with the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    /// The tracking identifier.
    pub tracking_id: TrackingId,
    /// Name of the sender.
    pub sender: String,
    /// Name of the receiver.
    pub receiver: String,
    /// Delivery priority.
    pub priority: Priority,
    /// Weight in kilograms.
    pub weight: f64,
    status: ParcelStatus,
    /// City the parcel starts from.
    pub source_city_id: CityId,
    /// City the parcel is headed to.
    pub dest_city_id: CityId,
    /// Last known location.
    pub current_city_id: CityId,
    /// Number of delivery attempts made so far.
    pub delivery_attempts: u32,
    /// Whether the parcel needs careful handling.
    pub is_fragile: bool,
    assigned_rider_id: Option<RiderId>,
    history: Vec<HistoryEntry>,
    /// Planned path from source to destination, filled when the parcel
    /// goes into transit.
    pub current_route: Vec<CityId>,
}

impl Parcel {
    /// Creates a new parcel in the `Pending` state.
    ///
    /// The history starts with the [`crate::PARCEL_CREATED_EVENT`] entry.
    /// Field validation is the caller's job (see
    /// [`crate::validate_new_parcel`]).
    #[must_use]
    pub fn new(tracking_id: TrackingId, fields: NewParcel, now: OffsetDateTime) -> Self {
        Self {
            tracking_id,
            sender: fields.sender,
            receiver: fields.receiver,
            priority: fields.priority,
            weight: fields.weight,
            status: ParcelStatus::Pending,
            source_city_id: fields.source_city_id,
            dest_city_id: fields.dest_city_id,
            current_city_id: fields.source_city_id,
            delivery_attempts: 0,
            is_fragile: fields.is_fragile,
            assigned_rider_id: None,
            history: vec![HistoryEntry::new(
                now,
                String::from(crate::lifecycle::PARCEL_CREATED_EVENT),
            )],
            current_route: Vec::new(),
        }
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ParcelStatus {
        self.status
    }

    /// Returns the rider currently or last assigned to this parcel.
    #[must_use]
    pub const fn assigned_rider_id(&self) -> Option<RiderId> {
        self.assigned_rider_id
    }

    /// Returns the history log, oldest entry first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the weight category of this parcel.
    #[must_use]
    pub fn weight_category(&self) -> WeightCategory {
        WeightCategory::from_weight(self.weight)
    }

    /// Appends an entry to the history log.
    pub(crate) fn record_event(&mut self, now: OffsetDateTime, event: String) {
        self.history.push(HistoryEntry::new(now, event));
    }

    pub(crate) const fn set_status(&mut self, status: ParcelStatus) {
        self.status = status;
    }

    pub(crate) const fn set_assigned_rider_id(&mut self, rider_id: Option<RiderId>) {
        self.assigned_rider_id = rider_id;
    }
}

/// Caller-supplied fields for a new rider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRider {
    /// Rider name.
    pub name: String,
    /// Maximum load in kilograms.
    pub capacity: f64,
    /// City where the rider currently is.
    pub current_city_id: CityId,
}

/// A rider and the parcels they are carrying.
///
/// `current_load` always equals the summed weight of `assigned_parcels`; both
/// are maintained by the dispatch rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    /// The rider identifier.
    pub rider_id: RiderId,
    /// Rider name.
    pub name: String,
    capacity: f64,
    /// City where the rider currently is.
    pub current_city_id: CityId,
    current_load: f64,
    assigned_parcels: Vec<TrackingId>,
}

impl Rider {
    /// Creates a new, empty-handed rider.
    #[must_use]
    pub fn new(rider_id: RiderId, fields: NewRider) -> Self {
        Self {
            rider_id,
            name: fields.name,
            capacity: fields.capacity,
            current_city_id: fields.current_city_id,
            current_load: 0.0,
            assigned_parcels: Vec::new(),
        }
    }

    /// Returns the maximum load in kilograms.
    #[must_use]
    pub const fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Returns the summed weight of the parcels currently assigned.
    #[must_use]
    pub const fn current_load(&self) -> f64 {
        self.current_load
    }

    /// Returns the capacity left for further assignments.
    #[must_use]
    pub fn available_capacity(&self) -> f64 {
        self.capacity - self.current_load
    }

    /// Returns the parcels currently assigned to this rider.
    #[must_use]
    pub fn assigned_parcels(&self) -> &[TrackingId] {
        &self.assigned_parcels
    }

    /// Checks whether the rider can take `weight` more kilograms.
    #[must_use]
    pub fn can_carry(&self, weight: f64) -> bool {
        self.current_load + weight <= self.capacity
    }

    pub(crate) const fn set_capacity(&mut self, capacity: f64) {
        self.capacity = capacity;
    }

    pub(crate) fn load_parcel(&mut self, tracking_id: TrackingId, weight: f64) {
        self.current_load += weight;
        self.assigned_parcels.push(tracking_id);
    }

    /// Removes a parcel from the load. Returns `false` when it was not assigned here.
    pub(crate) fn unload_parcel(&mut self, tracking_id: TrackingId, weight: f64) -> bool {
        let Some(position) = self.assigned_parcels.iter().position(|id| *id == tracking_id)
        else {
            return false;
        };
        self.assigned_parcels.remove(position);
        self.current_load = if self.assigned_parcels.is_empty() {
            0.0
        } else {
            (self.current_load - weight).max(0.0)
        };
        true
    }
}
