// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the simulator.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]


use time::OffsetDateTime;
use time::macros::datetime;

fn test_start() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

/// Three cities joined 1-2 (5), 2-3 (3), 1-3 (10), one rider in city 1 and
/// no parcels.
const NETWORK_SCENARIO: &str = r#"{
    "start_at": "2026-03-01T09:00:00Z",
    "cities": [
        { "id": 1, "name": "Alpha" },
        { "id": 2, "name": "Bravo" },
        { "id": 3, "name": "Charlie" }
    ],
    "routes": [
        { "source_id": 1, "dest_id": 2, "distance": 5, "blocked": false },
        { "source_id": 2, "dest_id": 3, "distance": 3, "blocked": false },
        { "source_id": 1, "dest_id": 3, "distance": 10, "blocked": false }
    ],
    "riders": [
        {
            "rider_id": 1,
            "name": "Sam",
            "capacity": 10.0,
            "current_city_id": 1,
            "current_load": 0.0,
            "assigned_parcels": []
        }
    ]
}"#;
