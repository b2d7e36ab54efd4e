/// Shelf (row) packer for a square glyph atlas.
///
/// Rectangles are placed left to right on the current shelf; a new shelf
/// starts below the tallest entry when the row is full. Every placement keeps
/// `padding` pixels of gap on all sides.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    size: u32,
    padding: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl ShelfPacker {
    pub fn new(size: u32, padding: u32) -> Self {
        Self { size, padding, cursor_x: padding, cursor_y: padding, row_height: 0 }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Forgets every placement.
    pub fn reset(&mut self) {
        self.cursor_x = self.padding;
        self.cursor_y = self.padding;
        self.row_height = 0;
    }

    /// Reserves a `w` × `h` region and returns its top-left corner, or `None`
    /// when the atlas has no room left.
    pub fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w + 2 * self.padding > self.size {
            return None;
        }

        if self.cursor_x + w + self.padding > self.size {
            self.cursor_y += self.row_height + self.padding;
            self.cursor_x = self.padding;
            self.row_height = 0;
        }

        if self.cursor_y + h + self.padding > self.size {
            return None;
        }

        let pos = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + self.padding;
        self.row_height = self.row_height.max(h);
        Some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_row_then_wraps() {
        let mut p = ShelfPacker::new(32, 1);
        assert_eq!(p.allocate(10, 4), Some((1, 1)));
        assert_eq!(p.allocate(10, 6), Some((12, 1)));
        // 23 + 10 + 1 > 32, so the next glyph starts a new shelf below the tallest.
        assert_eq!(p.allocate(10, 2), Some((1, 8)));
    }

    #[test]
    fn reports_full_and_recovers_after_reset() {
        let mut p = ShelfPacker::new(16, 1);
        assert_eq!(p.allocate(14, 14), Some((1, 1)));
        assert_eq!(p.allocate(1, 1), None);

        p.reset();
        assert_eq!(p.allocate(4, 4), Some((1, 1)));
    }

    #[test]
    fn oversized_glyph_is_rejected() {
        let mut p = ShelfPacker::new(16, 1);
        assert_eq!(p.allocate(15, 1), None);
        assert_eq!(p.allocate(14, 1), Some((1, 1)));
    }
}
