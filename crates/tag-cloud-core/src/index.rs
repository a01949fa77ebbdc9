use crate::model::Rectangle;

// Rectangles spanning more cells than this are kept in a side list instead.
const MAX_CELLS_PER_RECT: i64 = 256;

/// Uniform grid over placed rectangles.
///
/// Each rectangle is registered in every cell it covers, so an overlap query only
/// compares against rectangles sharing a cell with the query. Cells are stored
/// densely and the covered region grows on demand, which suits a cloud that
/// expands outwards from a fixed center.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell: i64,
    // cell coordinates reachable from the i32 plane; growth never goes past them
    lo: i64,
    hi: i64,
    min_cx: i64,
    min_cy: i64,
    cols: i64,
    rows: i64,
    cells: Vec<Vec<usize>>,
    oversized: Vec<usize>,
}

impl SpatialGrid {
    /// `cell_size` must be positive; `CloudConfig::validate` enforces this.
    pub fn new(cell_size: u32) -> Self {
        let cell = (cell_size as i64).max(1);
        Self {
            cell,
            lo: (i32::MIN as i64).div_euclid(cell),
            hi: (i32::MAX as i64).div_euclid(cell),
            min_cx: 0,
            min_cy: 0,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
            oversized: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell as u32
    }

    /// Registers `rect` under `id`. Rectangles must have positive width and height.
    pub fn insert(&mut self, id: usize, rect: &Rectangle) {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        let span = (x1 - x0 + 1) * (y1 - y0 + 1);
        if span > MAX_CELLS_PER_RECT {
            self.oversized.push(id);
            return;
        }
        self.cover(x0, y0, x1, y1);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                let slot = self.slot(cx, cy);
                self.cells[slot].push(id);
            }
        }
    }

    /// True if `rect` intersects any rectangle registered in the grid. `placed`
    /// resolves ids back to rectangles.
    pub fn any_overlap(&self, rect: &Rectangle, placed: &[Rectangle]) -> bool {
        self.first_overlap(rect, placed).is_some()
    }

    /// Id of some registered rectangle intersecting `rect`.
    pub fn first_overlap(&self, rect: &Rectangle, placed: &[Rectangle]) -> Option<usize> {
        if let Some(&id) = self
            .oversized
            .iter()
            .find(|&&id| placed[id].intersects_with(rect))
        {
            return Some(id);
        }
        if self.cells.is_empty() {
            return None;
        }
        let (x0, y0, x1, y1) = self.cell_range(rect);
        let x0 = x0.max(self.min_cx);
        let y0 = y0.max(self.min_cy);
        let x1 = x1.min(self.max_cx());
        let y1 = y1.min(self.max_cy());
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                let slot = self.slot(cx, cy);
                if let Some(&id) = self.cells[slot]
                    .iter()
                    .find(|&&id| placed[id].intersects_with(rect))
                {
                    return Some(id);
                }
            }
        }
        None
    }

    fn max_cx(&self) -> i64 {
        self.min_cx + self.cols - 1
    }

    fn max_cy(&self) -> i64 {
        self.min_cy + self.rows - 1
    }

    #[inline]
    fn slot(&self, cx: i64, cy: i64) -> usize {
        ((cy - self.min_cy) * self.cols + (cx - self.min_cx)) as usize
    }

    /// Inclusive cell range covered by the interior of `rect`.
    fn cell_range(&self, rect: &Rectangle) -> (i64, i64, i64, i64) {
        (
            rect.left().div_euclid(self.cell),
            rect.top().div_euclid(self.cell),
            (rect.right() - 1).div_euclid(self.cell),
            (rect.bottom() - 1).div_euclid(self.cell),
        )
    }

    /// Grows the grid so that cells `x0..=x1` by `y0..=y1` exist. Each growth at
    /// least doubles the extent on the side that ran out, up to the edge of the plane.
    fn cover(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let (lo, hi) = (self.lo, self.hi);
        if self.cells.is_empty() {
            self.min_cx = (x0 - 2).max(lo).min(x0);
            self.min_cy = (y0 - 2).max(lo).min(y0);
            let max_cx = (x1 + 2).min(hi).max(x1);
            let max_cy = (y1 + 2).min(hi).max(y1);
            self.cols = max_cx - self.min_cx + 1;
            self.rows = max_cy - self.min_cy + 1;
            self.cells = vec![Vec::new(); (self.cols * self.rows) as usize];
            return;
        }
        let (old_max_cx, old_max_cy) = (self.max_cx(), self.max_cy());
        if x0 >= self.min_cx && y0 >= self.min_cy && x1 <= old_max_cx && y1 <= old_max_cy {
            return;
        }

        let min_cx = if x0 < self.min_cx {
            x0.min((self.min_cx - self.cols).max(lo))
        } else {
            self.min_cx
        };
        let min_cy = if y0 < self.min_cy {
            y0.min((self.min_cy - self.rows).max(lo))
        } else {
            self.min_cy
        };
        let max_cx = if x1 > old_max_cx {
            x1.max((old_max_cx + self.cols).min(hi))
        } else {
            old_max_cx
        };
        let max_cy = if y1 > old_max_cy {
            y1.max((old_max_cy + self.rows).min(hi))
        } else {
            old_max_cy
        };

        let cols = max_cx - min_cx + 1;
        let rows = max_cy - min_cy + 1;
        let mut cells = vec![Vec::new(); (cols * rows) as usize];
        for (i, ids) in self.cells.iter_mut().enumerate() {
            if ids.is_empty() {
                continue;
            }
            let cx = self.min_cx + (i as i64) % self.cols;
            let cy = self.min_cy + (i as i64) / self.cols;
            cells[((cy - min_cy) * cols + (cx - min_cx)) as usize] = std::mem::take(ids);
        }
        self.min_cx = min_cx;
        self.min_cy = min_cy;
        self.cols = cols;
        self.rows = rows;
        self.cells = cells;
    }
}
