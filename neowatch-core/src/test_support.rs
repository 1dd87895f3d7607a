//! Sample entities shared by unit and behaviour tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{CloseApproach, NearEarthObject, NeoDatabase};

/// The given date and time of day, to the minute.
///
/// # Panics
/// Panics when the date or time does not exist.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "sample data is hard-coded and always valid"
)]
pub fn moment(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("sample moment must exist")
}

/// 433 Eros: named, 16.84 km across and flagged hazardous.
#[must_use]
pub fn eros() -> NearEarthObject {
    NearEarthObject::new("433")
        .with_name("Eros")
        .with_diameter(16.84)
        .with_hazardous(true)
}

/// The first recorded close approach of 433 Eros, on 1900-01-01 00:11.
#[must_use]
pub fn eros_approach() -> CloseApproach {
    CloseApproach::new("433", moment(1900, 1, 1, 0, 11))
        .with_distance(0.092_179_512_376_954_7)
        .with_velocity(16.752_304_036_257_4)
}

/// An approach at midnight with unknown distance and velocity.
#[must_use]
pub fn approach_at(designation: &str, year: i32, month: u32, day: u32) -> CloseApproach {
    CloseApproach::new(designation, moment(year, month, day, 0, 0))
}

/// A small linked database: Eros, 1036 Ganymed, an unmatched object and an
/// orphan approach.
#[must_use]
pub fn sample_database() -> NeoDatabase {
    NeoDatabase::new(
        vec![
            eros(),
            NearEarthObject::new("1036")
                .with_name("Ganymed")
                .with_diameter(37.675),
            NearEarthObject::new("2020 AB"),
        ],
        vec![
            eros_approach(),
            approach_at("1036", 1910, 2, 3)
                .with_distance(0.3)
                .with_velocity(12.0),
            approach_at("433", 1910, 5, 6)
                .with_distance(0.2)
                .with_velocity(8.0),
            approach_at("999999", 1920, 1, 1)
                .with_distance(0.02)
                .with_velocity(21.0),
        ],
    )
}
