//! Cross-frame corner accumulation with a hard capacity.
//!
//! The second pipeline variant collects the corner points of classified
//! polygons across frames. The set is bounded: once an insertion is refused
//! for capacity, the accumulator latches a saturated flag that callers use
//! as the "enough corners seen" signal until they reset it.

use std::collections::HashSet;

use blobshape_core::Point;

/// Default capacity, matching the observed configuration.
pub const DEFAULT_CAPACITY: usize = 500;

/// Outcome of one [`CornerAccumulator::offer`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfferOutcome {
    /// Point was new and stored.
    Accepted,
    /// Point was already present; the set is unchanged.
    Duplicate,
    /// Refused: the accumulator is at capacity.
    Saturated,
}

/// Bounded set of unique corner points.
#[derive(Clone, Debug)]
pub struct CornerAccumulator {
    points: HashSet<Point>,
    capacity: usize,
    saturated: bool,
}

impl Default for CornerAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl CornerAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: HashSet::with_capacity(capacity.min(1024)),
            capacity,
            saturated: false,
        }
    }

    /// Offer one point. Membership is exact coordinate equality.
    ///
    /// Duplicates are no-ops; a distinct point that does not fit latches
    /// the saturated flag, and every offer after that is refused until
    /// [`reset`](Self::reset).
    pub fn offer(&mut self, point: Point) -> OfferOutcome {
        if self.saturated {
            return OfferOutcome::Saturated;
        }
        if self.points.contains(&point) {
            return OfferOutcome::Duplicate;
        }
        if self.points.len() >= self.capacity {
            self.saturated = true;
            return OfferOutcome::Saturated;
        }
        self.points.insert(point);
        OfferOutcome::Accepted
    }

    /// True once an offer has been refused for capacity; stays set until
    /// [`reset`](Self::reset).
    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// True when the set holds `capacity` points.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored points, in no particular order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Clear the set and the saturated flag.
    pub fn reset(&mut self) {
        self.points.clear();
        self.saturated = false;
    }
}
