// SPDX-License-Identifier: MIT
//
// Measurement — the (minimum, maximum) width range a renderable asks for.
//
// Widths are unsigned, so the "never negative" half of normalisation is
// carried by the type. `Measurement::new` enforces the other half: the
// maximum is raised to the minimum if a caller passes them inverted.
// Signed inputs (e.g. computed differences that may underflow) go through
// `from_signed`, which clamps negatives to zero first.

use std::ops::Add;

/// A `(minimum, maximum)` display-width range. Always `minimum <= maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Measurement {
    minimum: usize,
    maximum: usize,
}

impl Measurement {
    /// A zero-width measurement.
    pub const ZERO: Self = Self {
        minimum: 0,
        maximum: 0,
    };

    /// Create a normalised measurement; `maximum` is raised to `minimum`
    /// if smaller.
    ///
    /// ```
    /// use n_layout::Measurement;
    ///
    /// let m = Measurement::new(5, 3);
    /// assert_eq!((m.minimum(), m.maximum()), (5, 5));
    /// ```
    #[must_use]
    pub const fn new(minimum: usize, maximum: usize) -> Self {
        let maximum = if maximum < minimum { minimum } else { maximum };
        Self { minimum, maximum }
    }

    /// A measurement whose minimum and maximum are both `width`.
    #[must_use]
    pub const fn exact(width: usize) -> Self {
        Self::new(width, width)
    }

    /// Create a measurement from signed values, clamping negatives to 0.
    #[must_use]
    pub fn from_signed(minimum: i64, maximum: i64) -> Self {
        let clamp = |v: i64| usize::try_from(v).unwrap_or(0);
        Self::new(clamp(minimum), clamp(maximum))
    }

    /// The smallest acceptable width.
    #[must_use]
    pub const fn minimum(&self) -> usize {
        self.minimum
    }

    /// The width at which nothing needs to be cut or wrapped.
    #[must_use]
    pub const fn maximum(&self) -> usize {
        self.maximum
    }

    /// Component-wise maximum: the range that satisfies both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.minimum.max(other.minimum),
            self.maximum.max(other.maximum),
        )
    }
}

impl Add for Measurement {
    type Output = Self;

    /// Component-wise sum, used to total the demand of several columns.
    fn add(self, rhs: Self) -> Self {
        Self::new(self.minimum + rhs.minimum, self.maximum + rhs.maximum)
    }
}

impl std::iter::Sum for Measurement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
