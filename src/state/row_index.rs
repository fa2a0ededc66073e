//! RowIndex - cumulative row geometry over a Fenwick tree.
//!
//! Maps between row indices and vertical line offsets: each row occupies
//! `[top_of(i), top_of(i) + height_of(i))`. Used both to position the pinned
//! row for the sticky engine and to find the first visible row when
//! rendering.
//!
//! # Complexity
//!
//! - `push` / `top_of` / `total`: O(log n)
//! - `row_at`: O(log² n)
//! - `height_of` / `len`: O(1)

/// Cumulative height index over the transcript's rows.
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    /// Fenwick tree backing storage (grown on demand).
    tree: Vec<isize>,
    /// Per-row heights, the source of truth for `height_of`.
    heights: Vec<usize>,
}

impl RowIndex {
    /// Create an index with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Append a row with the given height in lines.
    pub fn push(&mut self, height: usize) {
        let index = self.heights.len();
        self.heights.push(height);
        if index >= self.tree.len() {
            // Fenwick nodes cover index ranges, so appended capacity cannot
            // start at zero: rebuild the whole tree at the new size.
            self.rebuild();
        } else {
            fenwick::array::update(&mut self.tree, index, height as isize);
        }
    }

    fn rebuild(&mut self) {
        let capacity = (self.tree.len().max(1) * 2).max(self.heights.len());
        self.tree = vec![0; capacity];
        for (index, &height) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, index, height as isize);
        }
    }

    /// Height of row `index` in lines.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height_of(&self, index: usize) -> usize {
        self.heights[index]
    }

    /// Line offset of the top edge of row `index`: the summed heights of all
    /// rows before it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn top_of(&self, index: usize) -> usize {
        assert!(
            index < self.heights.len(),
            "index {} out of bounds (len: {})",
            index,
            self.heights.len()
        );
        if index == 0 {
            0
        } else {
            fenwick::array::prefix_sum(&self.tree, index - 1).max(0) as usize
        }
    }

    /// Total height of all rows in lines.
    pub fn total(&self) -> usize {
        if self.heights.is_empty() {
            0
        } else {
            fenwick::array::prefix_sum(&self.tree, self.heights.len() - 1).max(0) as usize
        }
    }

    /// The row containing vertical offset `offset`, i.e. the first row whose
    /// bottom edge lies strictly past it. `None` when `offset >= total()`.
    pub fn row_at(&self, offset: usize) -> Option<usize> {
        if self.heights.is_empty() {
            return None;
        }

        let mut left = 0;
        let mut right = self.heights.len();
        while left < right {
            let mid = left + (right - left) / 2;
            let bottom = fenwick::array::prefix_sum(&self.tree, mid).max(0) as usize;
            if bottom > offset {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.heights.len()).then_some(left)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True when the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}
