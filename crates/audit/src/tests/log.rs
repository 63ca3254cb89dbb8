// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::types::create_test_event;
use crate::{EntityRef, OperationLog};
use courier_domain::{RiderId, TrackingId};

#[test]
fn test_new_log_is_empty() {
    let log: OperationLog = OperationLog::new();

    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
}

#[test]
fn test_log_keeps_recording_order() {
    let mut log: OperationLog = OperationLog::new();
    let parcel: EntityRef = EntityRef::Parcel {
        id: TrackingId::new(1000),
    };
    let rider: EntityRef = EntityRef::Rider { id: RiderId::new(1) };

    log.record(create_test_event(vec![parcel]));
    log.record(create_test_event(vec![rider]));
    log.record(create_test_event(vec![parcel, rider]));

    assert_eq!(log.len(), 3);
    assert_eq!(log.events()[1].subjects, vec![rider]);
    assert_eq!(log.for_parcel(TrackingId::new(1000)).len(), 2);
    assert_eq!(log.for_rider(RiderId::new(1)).len(), 2);
    assert!(log.for_parcel(TrackingId::new(1001)).is_empty());
}
