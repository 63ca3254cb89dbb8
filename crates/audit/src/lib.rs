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
    clippy::unwrap_used,
    clippy::expect_used
)]

use courier_domain::{CityId, RiderId, TrackingId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// An actor is whoever issued a command: a dispatcher, a scenario file, or an
/// automated process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "dispatcher", "scenario", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., scenario step, request id).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The operation a command performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The name of the operation (e.g., "`CreateParcel`", "`Assign`").
    pub name: String,
    /// Optional additional details about the operation.
    pub details: Option<String>,
}

impl Operation {
    /// Creates a new Operation.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the operation
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact description of the records an operation touched.
///
/// The text is a comma separated `key=value` list, for example
/// `parcel=1000,status=Pending,rider=none`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// A record touched by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef {
    /// A city.
    City {
        /// The city.
        id: CityId,
    },
    /// The route(s) joining two cities.
    Route {
        /// One end.
        a: CityId,
        /// The other end.
        b: CityId,
    },
    /// A parcel.
    Parcel {
        /// The parcel.
        id: TrackingId,
    },
    /// A rider.
    Rider {
        /// The rider.
        id: RiderId,
    },
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City { id } => write!(f, "city {id}"),
            Self::Route { a, b } => write!(f, "route {a}-{b}"),
            Self::Parcel { id } => write!(f, "parcel {id}"),
            Self::Rider { id } => write!(f, "rider {id}"),
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful command produces exactly one audit event capturing:
/// - Who issued it (actor)
/// - Why it was issued (cause)
/// - What was done (operation)
/// - Which records were involved (subjects)
/// - The touched records before and after (before, after)
/// - When it happened (`recorded_at`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The operation that was performed.
    pub operation: Operation,
    /// The records involved, primary record first.
    pub subjects: Vec<EntityRef>,
    /// The touched records before the transition.
    pub before: StateSnapshot,
    /// The touched records after the transition.
    pub after: StateSnapshot,
    /// When the transition was applied.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `operation` - The operation that was performed
    /// * `subjects` - The records involved
    /// * `before` - The touched records before the transition
    /// * `after` - The touched records after the transition
    /// * `recorded_at` - When the transition was applied
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        operation: Operation,
        subjects: Vec<EntityRef>,
        before: StateSnapshot,
        after: StateSnapshot,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            actor,
            cause,
            operation,
            subjects,
            before,
            after,
            recorded_at,
        }
    }

    /// Checks whether `entity` is one of this event's subjects.
    #[must_use]
    pub fn involves(&self, entity: EntityRef) -> bool {
        self.subjects.contains(&entity)
    }
}

/// Append-only, in-memory log of audit events.
///
/// Events are kept in the order they were recorded. There is no way to remove
/// or rewrite an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationLog {
    events: Vec<AuditEvent>,
}

impl OperationLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn record(&mut self, event: AuditEvent) {
        self.events.push(event);
    }

    /// Returns every event, oldest first.
    #[must_use]
    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the events that involve one parcel, oldest first.
    #[must_use]
    pub fn for_parcel(&self, tracking_id: TrackingId) -> Vec<&AuditEvent> {
        self.events
            .iter()
            .filter(|event| event.involves(EntityRef::Parcel { id: tracking_id }))
            .collect()
    }

    /// Returns the events that involve one rider, oldest first.
    #[must_use]
    pub fn for_rider(&self, rider_id: RiderId) -> Vec<&AuditEvent> {
        self.events
            .iter()
            .filter(|event| event.involves(EntityRef::Rider { id: rider_id }))
            .collect()
    }
}
