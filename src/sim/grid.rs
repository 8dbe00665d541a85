//! Coarse cell grid laid over the arena
//!
//! Used for look-ahead by the autopilot: walls are rasterized into cells and
//! probed one heading step at a time.

use glam::{IVec2, Vec2};

use super::heading::Heading;
use super::rect::Rect;

/// Cells along the longer side are capped at this count
pub const MAX_GRID_SIDE: f32 = 1024.0;

/// A uniform grid covering a rectangle of the arena
#[derive(Debug, Clone)]
pub struct Grid {
    /// World position of the min corner of cell (0, 0)
    pub origin: Vec2,
    pub cell_size: f32,
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Grid covering `bounds` with square cells.
    ///
    /// Cells grow past `cell_size` when needed to keep each side within
    /// [`MAX_GRID_SIDE`].
    pub fn covering(bounds: &Rect, cell_size: f32) -> Self {
        let size = bounds.size();
        let cell_size = cell_size.max(size.max_element() / MAX_GRID_SIDE);
        let width = (size.x / cell_size).ceil().clamp(1.0, MAX_GRID_SIDE) as i32;
        let height = (size.y / cell_size).ceil().clamp(1.0, MAX_GRID_SIDE) as i32;
        Self {
            origin: bounds.min(),
            cell_size,
            width,
            height,
            blocked: vec![false; width as usize * height as usize],
        }
    }

    /// Cell containing a world position (may be outside the grid)
    pub fn cell_of(&self, pos: Vec2) -> IVec2 {
        ((pos - self.origin) / self.cell_size).floor().as_ivec2()
    }

    /// World position of a cell's center
    pub fn center_of(&self, cell: IVec2) -> Vec2 {
        self.origin + (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size
    }

    /// The neighbouring cell one step in `heading`
    #[inline]
    pub fn next(&self, cell: IVec2, heading: Heading) -> IVec2 {
        cell + heading.step()
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    /// Out-of-grid cells count as blocked
    pub fn is_blocked(&self, cell: IVec2) -> bool {
        self.index(cell).is_none_or(|i| self.blocked[i])
    }

    /// Mark every cell the rectangle overlaps
    pub fn block_rect(&mut self, rect: &Rect) {
        let lo = self.cell_of(rect.min()).max(IVec2::ZERO);
        let hi = self
            .cell_of(rect.max())
            .min(IVec2::new(self.width - 1, self.height - 1));
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                if let Some(i) = self.index(IVec2::new(x, y)) {
                    self.blocked[i] = true;
                }
            }
        }
    }

    /// Free cells in a straight line from `cell`, up to `limit`
    pub fn free_run(&self, cell: IVec2, heading: Heading, limit: u32) -> u32 {
        let mut run = 0;
        let mut probe = cell;
        while run < limit {
            probe = self.next(probe, heading);
            if self.is_blocked(probe) {
                break;
            }
            run += 1;
        }
        run
    }
}
