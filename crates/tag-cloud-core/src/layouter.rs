use crate::config::CloudConfig;
use crate::error::{CloudError, Result};
use crate::index::SpatialGrid;
use crate::model::{CloudLayout, CloudStats, Point, Rectangle, Size};
use crate::spiral::Spiral;
use std::collections::HashMap;
use tracing::{debug, trace};

// Upper bound on remembered resume points; the oldest is dropped past it.
const MAX_RESUME_POINTS: usize = 1024;

/// Places rectangles one after another around a fixed center.
///
/// Every rectangle is searched for along a fresh spiral walk from the center, then
/// pulled back toward the center while it stays clear of earlier rectangles. Placed
/// rectangles never move afterwards.
#[derive(Debug, Clone)]
pub struct CircularCloudLayouter {
    center: Point,
    cfg: CloudConfig,
    rectangles: Vec<Rectangle>,
    grid: SpatialGrid,
    resume: HashMap<Size, Resume>,
}

/// Where the last search for a size succeeded. Every spiral point before it is
/// blocked for that size and for any size at least as wide and as tall, and stays
/// blocked because placed rectangles never move.
#[derive(Debug, Clone)]
struct Resume {
    index: u64,
    spiral: Spiral,
}

impl CircularCloudLayouter {
    /// Empty cloud around `center` with the default configuration.
    pub fn new(center: Point) -> Self {
        let cfg = CloudConfig::default();
        let grid = SpatialGrid::new(cfg.cell_size);
        Self {
            center,
            cfg,
            rectangles: Vec::new(),
            grid,
            resume: HashMap::new(),
        }
    }

    /// Empty cloud around `center`; fails if `cfg` does not validate.
    pub fn with_config(center: Point, cfg: CloudConfig) -> Result<Self> {
        cfg.validate()?;
        let grid = SpatialGrid::new(cfg.cell_size);
        Ok(Self {
            center,
            cfg,
            rectangles: Vec::new(),
            grid,
            resume: HashMap::new(),
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn config(&self) -> &CloudConfig {
        &self.cfg
    }

    /// Rectangles placed so far, in placement order.
    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    /// Owned copy of the current cloud.
    pub fn layout(&self) -> CloudLayout {
        CloudLayout {
            center: self.center,
            rectangles: self.rectangles.clone(),
        }
    }

    pub fn stats(&self) -> CloudStats {
        CloudStats::compute(self.center, &self.rectangles)
    }

    /// Places a rectangle of `size` and returns where it went.
    ///
    /// Fails with [`CloudError::InvalidSize`] when either side is not positive; the
    /// cloud is left untouched in that case.
    pub fn put_next_rectangle(&mut self, size: Size) -> Result<Rectangle> {
        if !size.is_positive() {
            debug!(
                width = size.width,
                height = size.height,
                "rejected rectangle size"
            );
            return Err(CloudError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        let (found, candidates) = self.search(size);
        let (rect, steps) = if self.cfg.compaction {
            self.compact(found)
        } else {
            (found, 0)
        };

        let id = self.rectangles.len();
        self.grid.insert(id, &rect);
        self.rectangles.push(rect);
        trace!(
            id,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            candidates,
            compaction_steps = steps,
            "placed rectangle"
        );
        Ok(rect)
    }

    /// Lazily places every size from `sizes`, in order, one per item pulled.
    ///
    /// An invalid size yields its error without being placed; rectangles placed for
    /// earlier items stay in the cloud. Collecting into `Result<Vec<_>>` stops at the
    /// first error, so nothing after it is placed.
    pub fn put_next_rectangles<I>(&mut self, sizes: I) -> PlaceAll<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Size>,
    {
        PlaceAll {
            layouter: self,
            sizes: sizes.into_iter(),
        }
    }

    fn overlaps_placed(&self, rect: &Rectangle) -> bool {
        self.grid.any_overlap(rect, &self.rectangles)
    }

    /// Furthest known point of the spiral walk that is not yet ruled out for `size`.
    fn resume_point(&self, size: Size) -> (u64, Spiral) {
        self.resume
            .iter()
            .filter(|(s, _)| s.width <= size.width && s.height <= size.height)
            .map(|(_, r)| r)
            .max_by_key(|r| r.index)
            .map(|r| (r.index, r.spiral.clone()))
            .unwrap_or_else(|| {
                let spiral =
                    Spiral::with_params(self.center, self.cfg.angle_step, self.cfg.spiral_spacing);
                (0, spiral)
            })
    }

    /// First spiral candidate that is clear of every placed rectangle, plus the number
    /// of candidates tried.
    ///
    /// Candidates that would leave the `i32` plane are skipped. The walk starts from
    /// the furthest point already ruled out for this size, which gives the same
    /// result as walking from the center.
    fn search(&mut self, size: Size) -> (Rectangle, usize) {
        let (mut index, mut spiral) = self.resume_point(size);
        let mut candidates = 0;
        let mut blocker: Option<usize> = None;
        loop {
            let before = spiral.clone();
            let (x, y) = spiral.next_wide();
            candidates += 1;
            let Some(rect) = Rectangle::try_centered_at(x, y, size) else {
                index += 1;
                continue;
            };
            // neighbouring candidates are usually blocked by the same rectangle
            if blocker.is_some_and(|id| self.rectangles[id].intersects_with(&rect)) {
                index += 1;
                continue;
            }
            match self.grid.first_overlap(&rect, &self.rectangles) {
                Some(id) => {
                    blocker = Some(id);
                    index += 1;
                }
                None => {
                    self.remember(size, index, before);
                    return (rect, candidates);
                }
            }
        }
    }

    /// Records that `size` first fits at spiral point `index`. Entries for sizes at
    /// least as large that resume no further are implied by it and get dropped.
    fn remember(&mut self, size: Size, index: u64, spiral: Spiral) {
        self.resume.retain(|s, r| {
            !(s.width >= size.width && s.height >= size.height && r.index <= index)
        });
        if self.resume.len() >= MAX_RESUME_POINTS {
            let oldest = self
                .resume
                .iter()
                .min_by_key(|(_, r)| r.index)
                .map(|(s, _)| *s);
            if let Some(s) = oldest {
                self.resume.remove(&s);
            }
        }
        self.resume.insert(size, Resume { index, spiral });
    }

    /// Moves `rect` along the straight line from its center to the cloud center in
    /// `compaction_step` increments, stopping before the first position that overlaps
    /// or leaves the `i32` plane.
    fn compact(&self, rect: Rectangle) -> (Rectangle, usize) {
        let start = rect.center();
        let size = rect.size();
        let (sx, sy) = (start.x as i64, start.y as i64);
        let dx = (self.center.x as i64 - sx) as f64;
        let dy = (self.center.y as i64 - sy) as f64;
        let dist = dx.hypot(dy);
        if dist == 0.0 {
            return (rect, 0);
        }

        let step = self.cfg.compaction_step;
        let mut best = rect;
        let mut current = (sx, sy);
        let mut moved = 0;
        let mut t = step;
        loop {
            let f = t.min(dist) / dist;
            let p = (sx + (dx * f).round() as i64, sy + (dy * f).round() as i64);
            if p != current {
                let Some(candidate) = Rectangle::try_centered_at(p.0, p.1, size) else {
                    break;
                };
                if self.overlaps_placed(&candidate) {
                    break;
                }
                best = candidate;
                current = p;
                moved += 1;
            }
            if t >= dist {
                break;
            }
            t += step;
        }
        (best, moved)
    }
}

/// Iterator returned by [`CircularCloudLayouter::put_next_rectangles`].
#[derive(Debug)]
pub struct PlaceAll<'a, I> {
    layouter: &'a mut CircularCloudLayouter,
    sizes: I,
}

impl<I> Iterator for PlaceAll<'_, I>
where
    I: Iterator<Item = Size>,
{
    type Item = Result<Rectangle>;

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.sizes.next()?;
        Some(self.layouter.put_next_rectangle(size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sizes.size_hint()
    }
}

impl<I> ExactSizeIterator for PlaceAll<'_, I> where I: ExactSizeIterator<Item = Size> {}
