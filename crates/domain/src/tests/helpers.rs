// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    City, CityId, NewParcel, NewRider, Parcel, Priority, Rider, RiderId, Route, TrackingId,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

/// Cities 1 (Alpha), 2 (Bravo), 3 (Charlie), 4 (Delta).
pub fn create_test_cities() -> Vec<City> {
    vec![
        City::new(CityId::new(1), String::from("Alpha")),
        City::new(CityId::new(2), String::from("Bravo")),
        City::new(CityId::new(3), String::from("Charlie")),
        City::new(CityId::new(4), String::from("Delta")),
    ]
}

/// 1-2 (5), 2-3 (3), 1-3 (10). City 4 is isolated.
pub fn create_test_routes() -> Vec<Route> {
    vec![
        Route::new(CityId::new(1), CityId::new(2), 5),
        Route::new(CityId::new(2), CityId::new(3), 3),
        Route::new(CityId::new(1), CityId::new(3), 10),
    ]
}

pub fn create_new_parcel(priority: Priority, weight: f64) -> NewParcel {
    NewParcel {
        sender: String::from("Ada"),
        receiver: String::from("Grace"),
        priority,
        weight,
        source_city_id: CityId::new(1),
        dest_city_id: CityId::new(3),
        is_fragile: false,
    }
}

pub fn create_test_parcel(id: u32, priority: Priority, weight: f64) -> Parcel {
    Parcel::new(
        TrackingId::new(id),
        create_new_parcel(priority, weight),
        test_now(),
    )
}

pub fn create_test_rider(id: u32, capacity: f64, city: u32) -> Rider {
    Rider::new(
        RiderId::new(id),
        NewRider {
            name: format!("Rider {id}"),
            capacity,
            current_city_id: CityId::new(city),
        },
    )
}
