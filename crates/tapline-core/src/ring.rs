//! Circular-buffer index arithmetic.
//!
//! A logical transfer of `span` consecutive samples through a fixed-length
//! ring lands in one physical run, or two when it crosses the ring's end.
//! [`RingCursor`] owns that arithmetic so the wraparound and the
//! behind-the-cursor read offset can be tested in isolation, away from any
//! sample copying.

/// A logical span decomposed into at most two contiguous physical runs.
///
/// The first run is `first_len` samples starting at `start`; the second, when
/// `second_len > 0`, is `second_len` samples starting at physical index 0.
/// `first_len + second_len` always equals the requested span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSplit {
    /// Physical index of the first run.
    pub start: usize,
    /// Length of the run from `start` up to (at most) the ring's end.
    pub first_len: usize,
    /// Length of the wrapped remainder at physical index 0, or 0.
    pub second_len: usize,
}

impl RegionSplit {
    /// The empty split: a zero-length transfer.
    pub const EMPTY: Self = Self {
        start: 0,
        first_len: 0,
        second_len: 0,
    };
}

/// Write cursor over a fixed-length ring.
///
/// Tracks where the next sample lands and maps logical spans — at the cursor
/// for writes, `delay` samples behind it for reads — to physical runs.
/// Holds no samples itself; the owner pairs it with per-channel storage of
/// the same length.
///
/// # Example
///
/// ```rust
/// use tapline_core::RingCursor;
///
/// let mut cursor = RingCursor::new(10);
/// cursor.advance(8);
/// // 4 samples from position 8 wrap: 2 at the end, 2 at the front.
/// let split = cursor.write_regions(4);
/// assert_eq!((split.start, split.first_len, split.second_len), (8, 2, 2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RingCursor {
    len: usize,
    write_pos: usize,
}

impl RingCursor {
    /// Create a cursor over a ring of `len` samples, starting at index 0.
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "ring length must be > 0");
        Self { len, write_pos: 0 }
    }

    /// Ring length in samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the ring has zero capacity. Always false: the constructor
    /// rejects zero-length rings.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Current write position, always in `[0, len)`.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Map a `span`-sample write starting at the cursor.
    #[inline]
    pub fn write_regions(&self, span: usize) -> RegionSplit {
        self.regions_at(self.write_pos, span)
    }

    /// Map a `span`-sample read starting `delay` samples behind the cursor.
    ///
    /// The start offset is wrap-corrected without any signed intermediate:
    /// `delay` is reduced mod `len`, then `len` is added before subtracting.
    #[inline]
    pub fn read_regions(&self, delay: usize, span: usize) -> RegionSplit {
        let start = (self.write_pos + self.len - delay % self.len) % self.len;
        self.regions_at(start, span)
    }

    /// Advance the cursor by `n` samples, wrapping.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.write_pos = (self.write_pos + n) % self.len;
    }

    /// Rewind the cursor to index 0.
    pub fn rewind(&mut self) {
        self.write_pos = 0;
    }

    fn regions_at(&self, start: usize, span: usize) -> RegionSplit {
        debug_assert!(start < self.len);
        if span == 0 {
            return RegionSplit::EMPTY;
        }
        let first_len = (self.len - start).min(span);
        RegionSplit {
            start,
            first_len,
            second_len: span - first_len,
        }
    }
}
