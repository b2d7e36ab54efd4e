/// Paint layer for draw items. Higher values appear on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const BACKGROUND: ZIndex = ZIndex(-100);
    pub const WORLD: ZIndex = ZIndex(0);
    pub const DEBUG: ZIndex = ZIndex(50);
    pub const OVERLAY: ZIndex = ZIndex(100);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

/// Stable sort key: `z` ascending, then insertion `order` ascending.
///
/// The derived ordering compares fields top to bottom, so field order matters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_insertion_order() {
        let back = SortKey::new(ZIndex::BACKGROUND, 9);
        let front = SortKey::new(ZIndex::OVERLAY, 0);
        assert!(back < front);
    }

    #[test]
    fn equal_z_falls_back_to_order() {
        let a = SortKey::new(ZIndex::WORLD, 1);
        let b = SortKey::new(ZIndex::WORLD, 2);
        assert!(a < b);
    }
}
