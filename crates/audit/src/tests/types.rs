// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, AuditEvent, Cause, EntityRef, Operation, StateSnapshot};
use courier_domain::{CityId, RiderId, TrackingId};
use time::macros::datetime;

pub fn create_test_event(subjects: Vec<EntityRef>) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("dispatcher-1"), String::from("dispatcher")),
        Cause::new(String::from("step-1"), String::from("Scenario step")),
        Operation::new(String::from("Assign"), None),
        subjects,
        StateSnapshot::new(String::from("parcel=1000,rider=none")),
        StateSnapshot::new(String::from("parcel=1000,rider=1")),
        datetime!(2026-03-01 09:00 UTC),
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("dispatcher-1"), String::from("dispatcher"));

    assert_eq!(actor.id, "dispatcher-1");
    assert_eq!(actor.actor_type, "dispatcher");
}

#[test]
fn test_operation_creation_with_details() {
    let operation: Operation = Operation::new(
        String::from("SetRouteBlocked"),
        Some(String::from("Route 2-3 blocked")),
    );

    assert_eq!(operation.name, "SetRouteBlocked");
    assert_eq!(operation.details.as_deref(), Some("Route 2-3 blocked"));
}

#[test]
fn test_audit_event_keeps_all_fields() {
    let subjects: Vec<EntityRef> = vec![
        EntityRef::Parcel {
            id: TrackingId::new(1000),
        },
        EntityRef::Rider { id: RiderId::new(1) },
    ];
    let event: AuditEvent = create_test_event(subjects.clone());

    assert_eq!(event.operation.name, "Assign");
    assert_eq!(event.subjects, subjects);
    assert_eq!(event.before.data, "parcel=1000,rider=none");
    assert_eq!(event.after.data, "parcel=1000,rider=1");
    assert!(event.involves(EntityRef::Rider { id: RiderId::new(1) }));
    assert!(!event.involves(EntityRef::Rider { id: RiderId::new(2) }));
}

#[test]
fn test_entity_ref_display() {
    let route: EntityRef = EntityRef::Route {
        a: CityId::new(2),
        b: CityId::new(3),
    };
    assert_eq!(route.to_string(), "route 2-3");
    assert_eq!(
        EntityRef::Parcel {
            id: TrackingId::new(1004)
        }
        .to_string(),
        "parcel 1004"
    );
}

#[test]
fn test_audit_event_serializes_timestamp_as_rfc3339() {
    let event: AuditEvent = create_test_event(vec![EntityRef::City { id: CityId::new(1) }]);

    let json: serde_json::Value = serde_json::to_value(&event).unwrap();

    assert_eq!(json["recorded_at"], "2026-03-01T09:00:00Z");
    assert_eq!(json["subjects"][0]["kind"], "city");
    assert_eq!(json["subjects"][0]["id"], 1);
}
