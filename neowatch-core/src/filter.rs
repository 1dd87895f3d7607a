//! Predicates over close approaches.
//!
//! [`NeoDatabase::query`](crate::NeoDatabase::query) accepts any
//! [`ApproachPredicate`]. Plain closures qualify, and [`ApproachFilter`]
//! covers the criteria exposed by the command-line tool. Bounds are
//! inclusive and `NaN` never satisfies one, so unknown measurements drop out
//! of bounded queries.

use chrono::NaiveDate;

use crate::database::ApproachRef;

/// A boolean test over a close approach and its linked object.
///
/// Implementations must not have side effects: the query engine stops
/// evaluating at the first predicate that returns `false`.
pub trait ApproachPredicate {
    /// Return `true` when the approach should be kept.
    fn matches(&self, approach: &ApproachRef<'_>) -> bool;
}

impl<F> ApproachPredicate for F
where
    F: Fn(&ApproachRef<'_>) -> bool,
{
    fn matches(&self, approach: &ApproachRef<'_>) -> bool {
        self(approach)
    }
}

/// The built-in filter kinds.
///
/// Date filters compare the calendar date of the approach. Diameter and
/// hazard filters inspect the linked object; an approach without one never
/// matches them.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use neowatch_core::{ApproachFilter, CloseApproach, NeoDatabase};
///
/// let time = NaiveDate::from_ymd_opt(2020, 1, 1)
///     .and_then(|date| date.and_hms_opt(12, 0, 0))
///     .expect("valid time");
/// let db = NeoDatabase::new(
///     Vec::new(),
///     vec![CloseApproach::new("2020 AB", time).with_distance(0.01)],
/// );
/// let filters = [ApproachFilter::MaxDistance(0.05)];
/// assert_eq!(db.query(&filters).count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApproachFilter {
    /// Approach happens on the given date.
    OnDate(NaiveDate),
    /// Approach happens on or after the given date.
    StartDate(NaiveDate),
    /// Approach happens on or before the given date.
    EndDate(NaiveDate),
    /// Distance in astronomical units is at least the bound.
    MinDistance(f64),
    /// Distance in astronomical units is at most the bound.
    MaxDistance(f64),
    /// Relative velocity in km/s is at least the bound.
    MinVelocity(f64),
    /// Relative velocity in km/s is at most the bound.
    MaxVelocity(f64),
    /// Diameter of the linked object in kilometres is at least the bound.
    MinDiameter(f64),
    /// Diameter of the linked object in kilometres is at most the bound.
    MaxDiameter(f64),
    /// Hazard flag of the linked object equals the value.
    Hazardous(bool),
}

impl ApproachPredicate for ApproachFilter {
    fn matches(&self, approach: &ApproachRef<'_>) -> bool {
        let date = approach.time.date();
        match *self {
            Self::OnDate(wanted) => date == wanted,
            Self::StartDate(start) => date >= start,
            Self::EndDate(end) => date <= end,
            Self::MinDistance(bound) => approach.distance >= bound,
            Self::MaxDistance(bound) => approach.distance <= bound,
            Self::MinVelocity(bound) => approach.velocity >= bound,
            Self::MaxVelocity(bound) => approach.velocity <= bound,
            Self::MinDiameter(bound) => approach.neo().is_some_and(|neo| neo.diameter >= bound),
            Self::MaxDiameter(bound) => approach.neo().is_some_and(|neo| neo.diameter <= bound),
            Self::Hazardous(wanted) => approach.neo().is_some_and(|neo| neo.hazardous == wanted),
        }
    }
}

/// Optional query criteria, one field per [`ApproachFilter`] kind.
///
/// # Examples
/// ```
/// use neowatch_core::{ApproachFilter, FilterCriteria};
///
/// let criteria = FilterCriteria {
///     max_distance: Some(0.1),
///     hazardous: Some(true),
///     ..FilterCriteria::default()
/// };
/// assert_eq!(
///     criteria.into_filters(),
///     vec![ApproachFilter::MaxDistance(0.1), ApproachFilter::Hazardous(true)],
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact approach date.
    pub date: Option<NaiveDate>,
    /// Earliest approach date.
    pub start_date: Option<NaiveDate>,
    /// Latest approach date.
    pub end_date: Option<NaiveDate>,
    /// Minimum distance in astronomical units.
    pub min_distance: Option<f64>,
    /// Maximum distance in astronomical units.
    pub max_distance: Option<f64>,
    /// Minimum velocity in km/s.
    pub min_velocity: Option<f64>,
    /// Maximum velocity in km/s.
    pub max_velocity: Option<f64>,
    /// Minimum diameter in kilometres.
    pub min_diameter: Option<f64>,
    /// Maximum diameter in kilometres.
    pub max_diameter: Option<f64>,
    /// Required hazard flag.
    pub hazardous: Option<bool>,
}

impl FilterCriteria {
    /// Convert the populated fields into filters.
    ///
    /// Date filters come first, followed by the approach measurements and
    /// finally the attributes of the linked object.
    #[must_use]
    pub fn into_filters(self) -> Vec<ApproachFilter> {
        [
            self.date.map(ApproachFilter::OnDate),
            self.start_date.map(ApproachFilter::StartDate),
            self.end_date.map(ApproachFilter::EndDate),
            self.min_distance.map(ApproachFilter::MinDistance),
            self.max_distance.map(ApproachFilter::MaxDistance),
            self.min_velocity.map(ApproachFilter::MinVelocity),
            self.max_velocity.map(ApproachFilter::MaxVelocity),
            self.min_diameter.map(ApproachFilter::MinDiameter),
            self.max_diameter.map(ApproachFilter::MaxDiameter),
            self.hazardous.map(ApproachFilter::Hazardous),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Cap a result stream at `cap` items; `None` and `Some(0)` leave it unbounded.
///
/// # Examples
/// ```
/// use neowatch_core::limit;
///
/// assert_eq!(limit(1..=10, Some(3)).count(), 3);
/// assert_eq!(limit(1..=10, Some(0)).count(), 10);
/// assert_eq!(limit(1..=10, None).count(), 10);
/// ```
pub fn limit<I>(results: I, cap: Option<usize>) -> std::iter::Take<I::IntoIter>
where
    I: IntoIterator,
{
    let bound = cap.filter(|&n| n > 0).unwrap_or(usize::MAX);
    results.into_iter().take(bound)
}
