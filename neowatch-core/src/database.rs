//! The linked, read-only NEO database.
//!
//! [`NeoDatabase`] owns every entity in two arenas. Objects refer to their
//! approaches through [`ApproachId`] handles and approaches refer back through
//! a [`NeoId`], so the bidirectional links never form reference cycles.
//! [`NeoRef`] and [`ApproachRef`] borrow the database to navigate those links.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::Deref;

use log::debug;

use crate::filter::ApproachPredicate;
use crate::model::{ApproachId, CloseApproach, NearEarthObject, NeoId};
use crate::query::Query;

/// Linked collection of near-Earth objects and close approaches.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use neowatch_core::{CloseApproach, NearEarthObject, NeoDatabase};
///
/// let time = NaiveDate::from_ymd_opt(1900, 1, 1)
///     .and_then(|date| date.and_hms_opt(0, 11, 0))
///     .expect("valid time");
/// let db = NeoDatabase::new(
///     vec![NearEarthObject::new("433").with_name("Eros")],
///     vec![CloseApproach::new("433", time).with_distance(0.092)],
/// );
///
/// let eros = db.neo_by_name("Eros").expect("Eros is indexed");
/// assert_eq!(eros.approaches().count(), 1);
/// let approach = db.approaches().next().expect("one approach");
/// assert_eq!(approach.neo(), Some(eros));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
}

impl NeoDatabase {
    /// Link the supplied objects and approaches and build the lookup indices.
    ///
    /// The inputs are expected to be unlinked, as produced by the entity
    /// constructors. Approaches whose designation matches no object are kept
    /// without a linked object. Duplicate designations resolve to the last
    /// object supplied.
    #[must_use]
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let (by_designation, by_name) = index_neos(&neos);

        for approach in &mut approaches {
            approach.neo = by_designation.get(&approach.designation).copied();
        }

        {
            let grouped = group_by_designation(&approaches);
            for neo in &mut neos {
                if let Some(ids) = grouped.get(neo.designation.as_str()) {
                    neo.approaches = ids.iter().copied().collect();
                }
            }
        }

        let orphans = approaches
            .iter()
            .filter(|approach| approach.neo.is_none())
            .count();
        debug!(
            "Linked {} close approaches to {} NEOs ({orphans} without a matching NEO)",
            approaches.len(),
            neos.len()
        );

        Self {
            neos,
            approaches,
            by_designation,
            by_name,
        }
    }

    /// Number of objects held.
    #[must_use]
    pub const fn neo_count(&self) -> usize {
        self.neos.len()
    }

    /// Number of close approaches held.
    #[must_use]
    pub const fn approach_count(&self) -> usize {
        self.approaches.len()
    }

    /// Resolve an object handle.
    #[must_use]
    pub fn neo(&self, id: NeoId) -> Option<NeoRef<'_>> {
        self.neos
            .get(id.0)
            .map(|neo| NeoRef { db: self, id, neo })
    }

    /// Resolve an approach handle.
    #[must_use]
    pub fn approach(&self, id: ApproachId) -> Option<ApproachRef<'_>> {
        self.approaches
            .get(id.0)
            .map(|approach| ApproachRef::new(self, id, approach))
    }

    /// All objects in storage order.
    pub fn neos(&self) -> impl ExactSizeIterator<Item = NeoRef<'_>> {
        self.neos
            .iter()
            .enumerate()
            .map(move |(index, neo)| NeoRef {
                db: self,
                id: NeoId(index),
                neo,
            })
    }

    /// All close approaches in storage order.
    pub fn approaches(&self) -> impl ExactSizeIterator<Item = ApproachRef<'_>> {
        self.approaches
            .iter()
            .enumerate()
            .map(move |(index, approach)| ApproachRef::new(self, ApproachId(index), approach))
    }

    /// Find an object by its exact, case-sensitive primary designation.
    #[must_use]
    pub fn neo_by_designation(&self, designation: &str) -> Option<NeoRef<'_>> {
        self.by_designation
            .get(designation)
            .and_then(|&id| self.neo(id))
    }

    /// Find an object by its exact, case-sensitive IAU name.
    ///
    /// Unnamed objects are never indexed, so neither `""` nor `None` matches.
    ///
    /// # Examples
    /// ```
    /// use neowatch_core::{NearEarthObject, NeoDatabase};
    ///
    /// let db = NeoDatabase::new(vec![NearEarthObject::new("2020 AB")], Vec::new());
    /// assert!(db.neo_by_name("").is_none());
    /// assert!(db.neo_by_name(None::<&str>).is_none());
    /// ```
    #[must_use]
    pub fn neo_by_name<'n>(&self, name: impl Into<Option<&'n str>>) -> Option<NeoRef<'_>> {
        let wanted = name.into().filter(|candidate| !candidate.is_empty())?;
        self.by_name.get(wanted).and_then(|&id| self.neo(id))
    }

    /// Stream the close approaches that satisfy every filter.
    ///
    /// Results follow storage order. Each call starts a fresh traversal and
    /// an empty filter slice yields every approach.
    pub fn query<'db, 'f, P>(&'db self, filters: &'f [P]) -> Query<'db, 'f, P>
    where
        P: ApproachPredicate,
    {
        Query::new(self, &self.approaches, filters)
    }
}

type NeoIndices = (HashMap<String, NeoId>, HashMap<String, NeoId>);

fn index_neos(neos: &[NearEarthObject]) -> NeoIndices {
    let mut by_designation = HashMap::with_capacity(neos.len());
    let mut by_name = HashMap::new();
    for (index, neo) in neos.iter().enumerate() {
        let id = NeoId(index);
        by_designation.insert(neo.designation.clone(), id);
        if let Some(name) = neo.name.as_ref().filter(|name| !name.is_empty()) {
            by_name.insert(name.clone(), id);
        }
    }
    (by_designation, by_name)
}

fn group_by_designation(approaches: &[CloseApproach]) -> HashMap<&str, BTreeSet<ApproachId>> {
    let mut grouped: HashMap<&str, BTreeSet<ApproachId>> = HashMap::new();
    for (index, approach) in approaches.iter().enumerate() {
        grouped
            .entry(approach.designation.as_str())
            .or_default()
            .insert(ApproachId(index));
    }
    grouped
}

/// Borrowed view of a [`NearEarthObject`] inside a [`NeoDatabase`].
///
/// Equality is identity: two views are equal when they refer to the same
/// stored object of the same database.
#[derive(Clone, Copy)]
pub struct NeoRef<'db> {
    db: &'db NeoDatabase,
    id: NeoId,
    neo: &'db NearEarthObject,
}

impl<'db> NeoRef<'db> {
    /// Handle of the viewed object.
    #[must_use]
    pub const fn id(self) -> NeoId {
        self.id
    }

    /// The viewed object, borrowed for the lifetime of the database.
    #[must_use]
    pub const fn get(self) -> &'db NearEarthObject {
        self.neo
    }

    /// The object's linked close approaches.
    pub fn approaches(self) -> impl Iterator<Item = ApproachRef<'db>> {
        let db = self.db;
        self.neo
            .approaches
            .iter()
            .filter_map(move |&id| db.approach(id))
    }
}

impl Deref for NeoRef<'_> {
    type Target = NearEarthObject;

    fn deref(&self) -> &Self::Target {
        self.neo
    }
}

impl PartialEq for NeoRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.db, other.db) && self.id == other.id
    }
}

impl Eq for NeoRef<'_> {}

impl fmt::Debug for NeoRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeoRef")
            .field("id", &self.id)
            .field("neo", self.neo)
            .finish()
    }
}

/// Borrowed view of a [`CloseApproach`] inside a [`NeoDatabase`].
///
/// Equality is identity, as for [`NeoRef`].
#[derive(Clone, Copy)]
pub struct ApproachRef<'db> {
    db: &'db NeoDatabase,
    id: ApproachId,
    approach: &'db CloseApproach,
}

impl<'db> ApproachRef<'db> {
    pub(crate) const fn new(
        db: &'db NeoDatabase,
        id: ApproachId,
        approach: &'db CloseApproach,
    ) -> Self {
        Self { db, id, approach }
    }

    /// Handle of the viewed approach.
    #[must_use]
    pub const fn id(self) -> ApproachId {
        self.id
    }

    /// The viewed approach, borrowed for the lifetime of the database.
    #[must_use]
    pub const fn get(self) -> &'db CloseApproach {
        self.approach
    }

    /// The linked object, or `None` for an approach with no matching NEO.
    #[must_use]
    pub fn neo(self) -> Option<NeoRef<'db>> {
        self.approach.neo.and_then(|id| self.db.neo(id))
    }
}

impl Deref for ApproachRef<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &Self::Target {
        self.approach
    }
}

impl PartialEq for ApproachRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.db, other.db) && self.id == other.id
    }
}

impl Eq for ApproachRef<'_> {}

impl fmt::Debug for ApproachRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApproachRef")
            .field("id", &self.id)
            .field("approach", self.approach)
            .finish()
    }
}

impl fmt::Display for ApproachRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = self
            .neo()
            .map_or_else(|| self.designation.clone(), |neo| neo.full_name());
        write!(
            f,
            "On {}, {who} approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.distance,
            self.velocity
        )
    }
}
