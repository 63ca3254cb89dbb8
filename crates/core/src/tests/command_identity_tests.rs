// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Command;
use courier_domain::{CityId, ParcelPatch, RiderId, TrackingId};

#[test]
fn test_command_names_match_operations() {
    let tracking_id: TrackingId = TrackingId::new(1000);
    let cases: Vec<(Command, &str)> = vec![
        (
            Command::CreateCity {
                name: String::from("Alpha"),
            },
            "CreateCity",
        ),
        (
            Command::SetRouteBlocked {
                a: CityId::new(1),
                b: CityId::new(2),
                blocked: false,
            },
            "SetRouteBlocked",
        ),
        (
            Command::UpdateParcel {
                tracking_id,
                patch: ParcelPatch::default(),
            },
            "UpdateParcel",
        ),
        (Command::Pickup { tracking_id }, "Pickup"),
        (Command::AdvanceToTransit { tracking_id }, "AdvanceToTransit"),
        (
            Command::Dispatch {
                tracking_id,
                rider_id: RiderId::new(1),
            },
            "Dispatch",
        ),
        (
            Command::DeliveryAttempt {
                tracking_id,
                success: true,
            },
            "DeliveryAttempt",
        ),
        (Command::MarkMissing { tracking_id }, "MarkMissing"),
    ];

    for (command, expected) in cases {
        assert_eq!(command.name(), expected);
    }
}

#[test]
fn test_commands_compare_by_value() {
    let first: Command = Command::Deliver {
        tracking_id: TrackingId::new(1000),
    };
    let second: Command = Command::Deliver {
        tracking_id: TrackingId::new(1000),
    };
    let other: Command = Command::Deliver {
        tracking_id: TrackingId::new(1001),
    };

    assert_eq!(first, second);
    assert_ne!(first, other);
}
