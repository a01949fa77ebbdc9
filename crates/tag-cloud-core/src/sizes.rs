//! Size sequences for demos, tests and benchmarks.

use crate::model::Size;

/// Iterator returned by [`decreasing`].
#[derive(Debug, Clone)]
pub struct Decreasing {
    current: Size,
    min: Size,
    repeat: usize,
    emitted: usize,
    done: bool,
}

/// Yields `start` `repeat` times, then shrinks both sides by one pixel (never below
/// `min`) and repeats. Ends once the size reached `min` and was yielded `repeat`
/// times.
pub fn decreasing(start: Size, min: Size, repeat: usize) -> Decreasing {
    Decreasing {
        current: start,
        min,
        repeat,
        emitted: 0,
        done: repeat == 0,
    }
}

/// Tag-like sequence of slowly shrinking sizes, from 60x30 down to 10x5.
pub fn slow_decreasing() -> Decreasing {
    decreasing(Size::new(60, 30), Size::new(10, 5), 3)
}

impl Iterator for Decreasing {
    type Item = Size;

    fn next(&mut self) -> Option<Size> {
        if self.done {
            return None;
        }
        let size = self.current;
        self.emitted += 1;
        if self.emitted == self.repeat {
            self.emitted = 0;
            if size.width <= self.min.width && size.height <= self.min.height {
                self.done = true;
            } else {
                self.current = Size::new(
                    (size.width - 1).max(self.min.width),
                    (size.height - 1).max(self.min.height),
                );
            }
        }
        Some(size)
    }
}

impl std::iter::FusedIterator for Decreasing {}
