//! Near-Earth objects and their close approaches.
//!
//! Both entities are created unlinked: a [`NearEarthObject`] starts with an
//! empty approach collection and a [`CloseApproach`] carries only the
//! designation of the object it belongs to. [`NeoDatabase::new`] establishes
//! the links exactly once.
//!
//! [`NeoDatabase::new`]: crate::NeoDatabase::new

use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Format of approach times in the close-approach source data.
pub const SOURCE_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Format used when rendering approach times for people and output files.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The only source flag value that marks an object as hazardous.
const HAZARDOUS_MARKER: &str = "Y";

/// Handle to a [`NearEarthObject`] stored in a [`NeoDatabase`](crate::NeoDatabase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(pub(crate) usize);

impl NeoId {
    /// Position of the object in the database's storage order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle to a [`CloseApproach`] stored in a [`NeoDatabase`](crate::NeoDatabase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(pub(crate) usize);

impl ApproachId {
    /// Position of the approach in the database's storage order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Raw NEO attributes as handed over by a record loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeoFields {
    /// Primary designation.
    pub designation: String,
    /// IAU name, possibly empty.
    pub name: String,
    /// Diameter in kilometres as text, possibly empty.
    pub diameter: String,
    /// Potentially-hazardous flag (`"Y"` or anything else).
    pub hazardous: String,
}

/// Raw close-approach attributes as handed over by a record loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproachFields {
    /// Designation of the approaching object.
    pub designation: String,
    /// Approach time in `YYYY-Mon-DD HH:MM` form.
    pub time: String,
    /// Nominal distance in astronomical units as text, possibly empty.
    pub distance: String,
    /// Relative velocity in km/s as text, possibly empty.
    pub velocity: String,
}

/// Errors returned when raw fields cannot be turned into entities.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A non-empty numeric field did not parse as a number.
    #[error("{field} value {raw:?} is not a number")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// Text found in the source record.
        raw: String,
    },
    /// The approach time did not match [`SOURCE_TIME_FORMAT`].
    #[error("approach time {raw:?} does not match the `YYYY-Mon-DD HH:MM` format")]
    InvalidTime {
        /// Text found in the source record.
        raw: String,
    },
}

/// Parse an optional floating-point field; blank text yields `NaN`.
fn parse_measurement(field: &'static str, raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| FieldError::InvalidNumber {
            field,
            raw: raw.to_owned(),
        })
}

fn non_empty(name: String) -> Option<String> {
    (!name.is_empty()).then_some(name)
}

/// A near-Earth object (NEO).
///
/// Unknown diameters are stored as `NaN` and missing names as `None`.
///
/// # Examples
/// ```
/// use neowatch_core::NearEarthObject;
///
/// let eros = NearEarthObject::new("433")
///     .with_name("Eros")
///     .with_diameter(16.84)
///     .with_hazardous(false);
/// assert_eq!(eros.full_name(), "433 (Eros)");
/// assert!(eros.approach_ids().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    /// Unique primary designation.
    pub designation: String,
    /// IAU name, if the object has one.
    pub name: Option<String>,
    /// Diameter in kilometres, `NaN` when unknown.
    pub diameter: f64,
    /// Whether the object is flagged as potentially hazardous.
    pub hazardous: bool,
    pub(crate) approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Create an unnamed, non-hazardous object of unknown diameter.
    #[must_use]
    pub fn new(designation: impl Into<String>) -> Self {
        Self {
            designation: designation.into(),
            name: None,
            diameter: f64::NAN,
            hazardous: false,
            approaches: Vec::new(),
        }
    }

    /// Build an object from loader fields, normalising blanks and flags.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidNumber`] when a non-empty diameter is not
    /// numeric.
    pub fn from_fields(fields: NeoFields) -> Result<Self, FieldError> {
        let NeoFields {
            designation,
            name,
            diameter,
            hazardous,
        } = fields;
        Ok(Self {
            designation,
            name: non_empty(name),
            diameter: parse_measurement("diameter", &diameter)?,
            hazardous: hazardous == HAZARDOUS_MARKER,
            approaches: Vec::new(),
        })
    }

    /// Set the IAU name; an empty string clears it.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(name.into());
        self
    }

    /// Set the diameter in kilometres.
    #[must_use]
    pub const fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    /// Set the potentially-hazardous flag.
    #[must_use]
    pub const fn with_hazardous(mut self, hazardous: bool) -> Self {
        self.hazardous = hazardous;
        self
    }

    /// Handles of the linked close approaches.
    ///
    /// Empty until the object has been placed in a database.
    #[must_use]
    pub fn approach_ids(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// Designation followed by the parenthesised name, when there is one.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.name.as_ref().map_or_else(
            || self.designation.clone(),
            |name| format!("{} ({name})", self.designation),
        )
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.hazardous { "is" } else { "is not" };
        if self.diameter.is_nan() {
            write!(
                f,
                "NEO {} has an unknown diameter and {verb} potentially hazardous.",
                self.full_name()
            )
        } else {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {verb} potentially hazardous.",
                self.full_name(),
                self.diameter
            )
        }
    }
}

/// A single close approach to Earth.
///
/// # Examples
/// ```
/// use neowatch_core::{ApproachFields, CloseApproach};
///
/// # fn main() -> Result<(), neowatch_core::FieldError> {
/// let approach = CloseApproach::from_fields(ApproachFields {
///     designation: "433".into(),
///     time: "1900-Jan-01 00:11".into(),
///     distance: "0.0921795123769547".into(),
///     velocity: String::new(),
/// })?;
/// assert_eq!(approach.time_str(), "1900-01-01 00:11");
/// assert!(approach.velocity.is_nan());
/// assert!(approach.neo_id().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    /// Designation of the approaching object.
    pub designation: String,
    /// Time of closest approach (UTC).
    pub time: NaiveDateTime,
    /// Nominal approach distance in astronomical units, `NaN` when unknown.
    pub distance: f64,
    /// Relative approach velocity in km/s, `NaN` when unknown.
    pub velocity: f64,
    pub(crate) neo: Option<NeoId>,
}

impl CloseApproach {
    /// Create an approach with unknown distance and velocity.
    #[must_use]
    pub fn new(designation: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance: f64::NAN,
            velocity: f64::NAN,
            neo: None,
        }
    }

    /// Build an approach from loader fields.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidTime`] when the time does not match
    /// [`SOURCE_TIME_FORMAT`], or [`FieldError::InvalidNumber`] when a
    /// non-empty distance or velocity is not numeric.
    pub fn from_fields(fields: ApproachFields) -> Result<Self, FieldError> {
        let ApproachFields {
            designation,
            time,
            distance,
            velocity,
        } = fields;
        let parsed = NaiveDateTime::parse_from_str(time.trim(), SOURCE_TIME_FORMAT)
            .map_err(|_| FieldError::InvalidTime { raw: time.clone() })?;
        Ok(Self {
            designation,
            time: parsed,
            distance: parse_measurement("distance", &distance)?,
            velocity: parse_measurement("velocity", &velocity)?,
            neo: None,
        })
    }

    /// Set the nominal distance in astronomical units.
    #[must_use]
    pub const fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Set the relative velocity in km/s.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Handle of the linked object, if one matched during linking.
    #[must_use]
    pub const fn neo_id(&self) -> Option<NeoId> {
        self.neo
    }

    /// Approach time rendered with [`DISPLAY_TIME_FORMAT`].
    #[must_use]
    pub fn time_str(&self) -> String {
        self.time.format(DISPLAY_TIME_FORMAT).to_string()
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, {} approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.designation,
            self.distance,
            self.velocity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn eros_fields() -> NeoFields {
        NeoFields {
            designation: "433".into(),
            name: "Eros".into(),
            diameter: "16.84".into(),
            hazardous: "N".into(),
        }
    }

    #[fixture]
    fn approach_fields() -> ApproachFields {
        ApproachFields {
            designation: "433".into(),
            time: "1900-Jan-01 00:11".into(),
            distance: "0.0921795123769547".into(),
            velocity: "16.7523040362574".into(),
        }
    }

    #[rstest]
    fn neo_from_fields_keeps_values(eros_fields: NeoFields) {
        let neo = NearEarthObject::from_fields(eros_fields).expect("valid fields");
        assert_eq!(neo.designation, "433");
        assert_eq!(neo.name.as_deref(), Some("Eros"));
        assert!((neo.diameter - 16.84).abs() < 1e-12);
        assert!(!neo.hazardous);
        assert!(neo.approach_ids().is_empty());
    }

    #[rstest]
    fn blank_name_and_diameter_become_sentinels(eros_fields: NeoFields) {
        let fields = NeoFields {
            name: String::new(),
            diameter: String::new(),
            ..eros_fields
        };
        let neo = NearEarthObject::from_fields(fields).expect("valid fields");
        assert_eq!(neo.name, None);
        assert!(neo.diameter.is_nan());
    }

    #[rstest]
    #[case("Y", true)]
    #[case("N", false)]
    #[case("", false)]
    #[case("y", false)]
    #[case("Yes", false)]
    fn only_literal_marker_is_hazardous(
        eros_fields: NeoFields,
        #[case] flag: &str,
        #[case] expected: bool,
    ) {
        let fields = NeoFields {
            hazardous: flag.into(),
            ..eros_fields
        };
        let neo = NearEarthObject::from_fields(fields).expect("valid fields");
        assert_eq!(neo.hazardous, expected);
    }

    #[rstest]
    fn non_numeric_diameter_is_rejected(eros_fields: NeoFields) {
        let fields = NeoFields {
            diameter: "wide".into(),
            ..eros_fields
        };
        let err = NearEarthObject::from_fields(fields).expect_err("diameter must be numeric");
        assert_eq!(
            err,
            FieldError::InvalidNumber {
                field: "diameter",
                raw: "wide".into()
            }
        );
    }

    #[rstest]
    fn every_object_gets_its_own_approach_collection() {
        let mut first = NearEarthObject::new("1");
        let second = NearEarthObject::new("2");
        first.approaches.push(ApproachId(0));
        assert_eq!(first.approach_ids().len(), 1);
        assert!(second.approach_ids().is_empty());
    }

    #[rstest]
    fn with_name_treats_empty_as_absent() {
        let neo = NearEarthObject::new("2020 AB").with_name("");
        assert_eq!(neo.name, None);
        assert_eq!(neo.full_name(), "2020 AB");
    }

    #[rstest]
    fn display_mentions_hazard_and_diameter() {
        let neo = NearEarthObject::new("433")
            .with_name("Eros")
            .with_diameter(16.84)
            .with_hazardous(true);
        assert_eq!(
            neo.to_string(),
            "NEO 433 (Eros) has a diameter of 16.840 km and is potentially hazardous."
        );
        let unknown = NearEarthObject::new("2020 AB");
        assert_eq!(
            unknown.to_string(),
            "NEO 2020 AB has an unknown diameter and is not potentially hazardous."
        );
    }

    #[rstest]
    fn approach_from_fields_parses_time_and_measurements(approach_fields: ApproachFields) {
        let approach = CloseApproach::from_fields(approach_fields).expect("valid fields");
        assert_eq!(approach.time_str(), "1900-01-01 00:11");
        assert!((approach.distance - 0.092_179_512_376_954_7).abs() < 1e-15);
        assert!((approach.velocity - 16.752_304_036_257_4).abs() < 1e-12);
        assert_eq!(approach.neo_id(), None);
    }

    #[rstest]
    fn blank_measurements_become_nan(approach_fields: ApproachFields) {
        let fields = ApproachFields {
            distance: String::new(),
            velocity: "  ".into(),
            ..approach_fields
        };
        let approach = CloseApproach::from_fields(fields).expect("valid fields");
        assert!(approach.distance.is_nan());
        assert!(approach.velocity.is_nan());
    }

    #[rstest]
    #[case("1900-01-01 00:11")]
    #[case("1900-Jan-01")]
    #[case("")]
    fn malformed_time_is_rejected(approach_fields: ApproachFields, #[case] time: &str) {
        let fields = ApproachFields {
            time: time.into(),
            ..approach_fields
        };
        let err = CloseApproach::from_fields(fields).expect_err("time must match format");
        assert_eq!(err, FieldError::InvalidTime { raw: time.into() });
    }

    #[rstest]
    fn non_numeric_velocity_names_the_field(approach_fields: ApproachFields) {
        let fields = ApproachFields {
            velocity: "fast".into(),
            ..approach_fields
        };
        let err = CloseApproach::from_fields(fields).expect_err("velocity must be numeric");
        assert!(matches!(
            err,
            FieldError::InvalidNumber { field: "velocity", .. }
        ));
    }

    #[rstest]
    fn approach_display_uses_designation(approach_fields: ApproachFields) {
        let approach = CloseApproach::from_fields(approach_fields).expect("valid fields");
        assert_eq!(
            approach.to_string(),
            "On 1900-01-01 00:11, 433 approaches Earth at a distance of 0.09 au and a velocity of 16.75 km/s."
        );
    }
}
