/// The four cardinal directions, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Scan order used everywhere a cell's neighbors are examined. Traversal
    /// policy lives in this constant, not in call order.
    pub const CARDINALS: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Unit offset (dx, dy) for one step in this direction. Y grows downward.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Turn 90 degrees clockwise.
    pub fn turn_right(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Up => 0x01,
            Self::Right => 0x02,
            Self::Down => 0x04,
            Self::Left => 0x08,
        }
    }
}

/// Set of boundary edges for one cell, one bit per cardinal direction.
/// Written once when the cell is visited, never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideSet(u8);

impl SideSet {
    pub const EMPTY: SideSet = SideSet(0);

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Number of boundary edges in the set. Summed over a region's cells this
    /// is the region's perimeter.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::CARDINALS
            .into_iter()
            .filter(move |dir| self.contains(*dir))
    }
}
