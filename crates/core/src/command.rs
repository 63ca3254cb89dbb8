// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courier_domain::{
    CityId, LocationEvent, NewParcel, NewRider, ParcelPatch, RiderId, RiderPatch, TrackingId,
};

/// A command represents caller intent as data only.
///
/// Commands are the only way to request state changes. Every command names
/// the records it acts on explicitly; choosing a parcel from a queue happens
/// before a command is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a city to the network.
    CreateCity {
        /// The display name.
        name: String,
    },
    /// Add an undirected route between two cities.
    CreateRoute {
        /// One end.
        source_id: CityId,
        /// The other end.
        dest_id: CityId,
        /// Route length.
        distance: u32,
    },
    /// Block or unblock the route(s) between two cities.
    SetRouteBlocked {
        /// One end.
        a: CityId,
        /// The other end.
        b: CityId,
        /// The new flag.
        blocked: bool,
    },
    /// Register a new parcel.
    CreateParcel {
        /// The parcel fields.
        fields: NewParcel,
    },
    /// Change parcel fields, possibly including its status.
    UpdateParcel {
        /// The parcel.
        tracking_id: TrackingId,
        /// The fields to change.
        patch: ParcelPatch,
    },
    /// Remove a parcel record.
    DeleteParcel {
        /// The parcel.
        tracking_id: TrackingId,
    },
    /// Register a new rider.
    CreateRider {
        /// The rider fields.
        fields: NewRider,
    },
    /// Change rider fields.
    UpdateRider {
        /// The rider.
        rider_id: RiderId,
        /// The fields to change.
        patch: RiderPatch,
    },
    /// Remove a rider record.
    DeleteRider {
        /// The rider.
        rider_id: RiderId,
    },
    /// Pick up a pending parcel and check it into the warehouse.
    Pickup {
        /// The parcel.
        tracking_id: TrackingId,
    },
    /// Move a warehoused parcel into transit.
    AdvanceToTransit {
        /// The parcel.
        tracking_id: TrackingId,
    },
    /// Assign a parcel to a rider.
    Assign {
        /// The parcel.
        tracking_id: TrackingId,
        /// The rider.
        rider_id: RiderId,
    },
    /// Assign a warehoused parcel to a rider and move it into transit.
    Dispatch {
        /// The parcel.
        tracking_id: TrackingId,
        /// The rider.
        rider_id: RiderId,
    },
    /// Hand a parcel in transit to its receiver.
    Deliver {
        /// The parcel.
        tracking_id: TrackingId,
    },
    /// Record one delivery attempt.
    DeliveryAttempt {
        /// The parcel.
        tracking_id: TrackingId,
        /// Whether the receiver took the parcel.
        success: bool,
    },
    /// Send a parcel in transit back to the sender.
    ReturnToSender {
        /// The parcel.
        tracking_id: TrackingId,
    },
    /// Declare a parcel in transit lost.
    MarkMissing {
        /// The parcel.
        tracking_id: TrackingId,
    },
    /// Record a loading or unloading scan.
    RecordLocation {
        /// The parcel.
        tracking_id: TrackingId,
        /// Where the scan happened.
        city_id: CityId,
        /// What kind of scan.
        event: LocationEvent,
    },
}

impl Command {
    /// The operation name recorded in the audit log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateCity { .. } => "CreateCity",
            Self::CreateRoute { .. } => "CreateRoute",
            Self::SetRouteBlocked { .. } => "SetRouteBlocked",
            Self::CreateParcel { .. } => "CreateParcel",
            Self::UpdateParcel { .. } => "UpdateParcel",
            Self::DeleteParcel { .. } => "DeleteParcel",
            Self::CreateRider { .. } => "CreateRider",
            Self::UpdateRider { .. } => "UpdateRider",
            Self::DeleteRider { .. } => "DeleteRider",
            Self::Pickup { .. } => "Pickup",
            Self::AdvanceToTransit { .. } => "AdvanceToTransit",
            Self::Assign { .. } => "Assign",
            Self::Dispatch { .. } => "Dispatch",
            Self::Deliver { .. } => "Deliver",
            Self::DeliveryAttempt { .. } => "DeliveryAttempt",
            Self::ReturnToSender { .. } => "ReturnToSender",
            Self::MarkMissing { .. } => "MarkMissing",
            Self::RecordLocation { .. } => "RecordLocation",
        }
    }
}
