/// A closed interval `[start, end]` on a named chromosome.
///
/// Constructors normalize the endpoints, so `start <= end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicInterval {
    pub chr: String,
    pub start: i64,
    pub end: i64,
}

impl GenomicInterval {
    /// Inverted endpoints are swapped, equal endpoints give a single base.
    ///
    /// ```
    /// use circkit::libs::interval::GenomicInterval;
    /// let iv = GenomicInterval::new("chr1", 200, 100);
    /// assert_eq!((iv.start, iv.end), (100, 200));
    /// assert_eq!(iv.cardinality(), 101);
    /// assert_eq!(iv, GenomicInterval::new("chr1", 100, 200));
    /// ```
    pub fn new(chr: &str, x: i64, y: i64) -> Self {
        let (start, end) = if x <= y { (x, y) } else { (y, x) };
        Self {
            chr: chr.to_string(),
            start,
            end,
        }
    }

    /// Number of bases covered.
    pub fn cardinality(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Bases shared with the closed range `[lower, upper]`.
    pub fn overlap(&self, lower: i64, upper: i64) -> i64 {
        (self.end.min(upper) - self.start.max(lower) + 1).max(0)
    }
}

/// Fixed-width bins anchored at position 0.
///
/// Position `p` belongs to bin `floor(p / size)`. Bin `b` covers the integer
/// positions from `ceil(b * size)` to `ceil((b + 1) * size) - 1`, so bins tile
/// the axis without gaps even when `size` is fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGrid {
    size: f64,
}

impl BinGrid {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// The bin whose bounds contain `pos`.
    pub fn index_of(&self, pos: i64) -> i64 {
        let mut bin = (pos as f64 / self.size).floor() as i64;
        // float rounding may put `pos` one bin off
        while self.bounds(bin).0 > pos {
            bin -= 1;
        }
        while self.bounds(bin).1 < pos {
            bin += 1;
        }
        bin
    }

    /// ```
    /// use circkit::libs::interval::BinGrid;
    /// let grid = BinGrid::new(100.0);
    /// assert_eq!(grid.bounds(0), (0, 99));
    /// assert_eq!(grid.bounds(2), (200, 299));
    /// ```
    pub fn bounds(&self, bin: i64) -> (i64, i64) {
        let lower = (bin as f64 * self.size).ceil() as i64;
        let upper = ((bin + 1) as f64 * self.size).ceil() as i64 - 1;
        (lower, upper)
    }

    /// Bins touched by `iv`, in ascending order, with the number of bases of
    /// `iv` falling into each one. Bins holding no integer position, which
    /// exist when `size < 1`, are left out.
    pub fn overlaps(&self, iv: &GenomicInterval) -> Vec<(i64, i64)> {
        (self.index_of(iv.start)..=self.index_of(iv.end))
            .filter_map(|bin| {
                let (lower, upper) = self.bounds(bin);
                let overlap = iv.overlap(lower, upper);
                (overlap > 0).then_some((bin, overlap))
            })
            .collect()
    }
}
