//! Lazy traversal of close approaches through a conjunction of filters.

use std::fmt;
use std::iter::{Enumerate, FusedIterator};
use std::slice::Iter;

use crate::database::{ApproachRef, NeoDatabase};
use crate::filter::ApproachPredicate;
use crate::model::{ApproachId, CloseApproach};

/// Iterator returned by [`NeoDatabase::query`].
///
/// Each approach is tested against the filters in slice order and rejected at
/// the first filter that fails. Nothing is buffered; dropping the iterator
/// ends the query.
pub struct Query<'db, 'f, P> {
    db: &'db NeoDatabase,
    candidates: Enumerate<Iter<'db, CloseApproach>>,
    filters: &'f [P],
}

impl<'db, 'f, P> Query<'db, 'f, P>
where
    P: ApproachPredicate,
{
    pub(crate) fn new(
        db: &'db NeoDatabase,
        approaches: &'db [CloseApproach],
        filters: &'f [P],
    ) -> Self {
        Self {
            db,
            candidates: approaches.iter().enumerate(),
            filters,
        }
    }
}

impl<'db, P> Iterator for Query<'db, '_, P>
where
    P: ApproachPredicate,
{
    type Item = ApproachRef<'db>;

    fn next(&mut self) -> Option<Self::Item> {
        let db = self.db;
        let filters = self.filters;
        self.candidates
            .by_ref()
            .map(|(index, approach)| ApproachRef::new(db, ApproachId(index), approach))
            .find(|candidate| filters.iter().all(|filter| filter.matches(candidate)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}

impl<P> FusedIterator for Query<'_, '_, P> where P: ApproachPredicate {}

impl<P> fmt::Debug for Query<'_, '_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("remaining", &self.candidates.len())
            .field("filters", &self.filters.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::filter::ApproachFilter;
    use crate::test_support::{approach_at, sample_database};
    use crate::NearEarthObject;
    use rstest::{fixture, rstest};

    #[fixture]
    fn db() -> NeoDatabase {
        sample_database()
    }

    #[rstest]
    fn no_filters_yield_everything_in_order(db: NeoDatabase) {
        let ids: Vec<_> = db.query::<ApproachFilter>(&[]).map(ApproachRef::id).collect();
        let all: Vec<_> = db.approaches().map(ApproachRef::id).collect();
        assert_eq!(ids, all);
        assert_eq!(ids.len(), db.approach_count());
    }

    #[rstest]
    fn conjunction_is_the_intersection(db: NeoDatabase) {
        let near = ApproachFilter::MaxDistance(0.25);
        let fast = ApproachFilter::MinVelocity(10.0);
        let both: Vec<_> = db.query(&[near, fast]).map(ApproachRef::id).collect();
        let near_only: Vec<_> = db.query(&[near]).map(ApproachRef::id).collect();
        let fast_only: Vec<_> = db.query(&[fast]).map(ApproachRef::id).collect();
        let intersection: Vec<_> = near_only
            .iter()
            .copied()
            .filter(|id| fast_only.contains(id))
            .collect();
        assert_eq!(both, intersection);
        assert!(!both.is_empty());
    }

    #[rstest]
    fn repeated_queries_yield_the_same_entities(db: NeoDatabase) {
        let filters = [ApproachFilter::MaxDistance(0.25)];
        let first: Vec<_> = db.query(&filters).collect();
        let second: Vec<_> = db.query(&filters).collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn evaluation_stops_at_first_failing_filter(db: NeoDatabase) {
        let calls = Cell::new(0_usize);
        let counting = |_: &ApproachRef<'_>| {
            calls.set(calls.get() + 1);
            true
        };
        let reject = |_: &ApproachRef<'_>| false;
        let filters: [Box<dyn Fn(&ApproachRef<'_>) -> bool + '_>; 2] =
            [Box::new(reject), Box::new(counting)];
        assert_eq!(db.query(&filters).count(), 0);
        assert_eq!(calls.get(), 0);
    }

    #[rstest]
    fn closures_act_as_filters(db: NeoDatabase) {
        let close = |approach: &ApproachRef<'_>| approach.distance < 0.05;
        let found: Vec<_> = db.query(&[close]).collect();
        assert!(found.iter().all(|approach| approach.distance < 0.05));
    }

    fn nearer_than(db: &NeoDatabase, bound: f64) -> Vec<ApproachRef<'_>> {
        let filters = vec![ApproachFilter::MaxDistance(bound)];
        db.query(&filters).collect()
    }

    #[rstest]
    fn results_outlive_the_filter_list(db: NeoDatabase) {
        let found = nearer_than(&db, 0.25);
        assert!(!found.is_empty());
        assert!(found.iter().all(|approach| approach.distance <= 0.25));
        let expected: Vec<_> = db
            .approaches()
            .filter(|approach| approach.distance <= 0.25)
            .collect();
        assert_eq!(found, expected);
    }

    #[rstest]
    fn query_is_lazy_and_fused() {
        let db = NeoDatabase::new(
            vec![NearEarthObject::new("433")],
            vec![approach_at("433", 2000, 1, 1), approach_at("433", 2001, 1, 1)],
        );
        let mut results = db.query::<ApproachFilter>(&[]);
        assert!(results.next().is_some());
        assert!(results.next().is_some());
        assert!(results.next().is_none());
        assert!(results.next().is_none());
    }
}
