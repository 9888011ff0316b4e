//! Pieces module - block shapes, the difficulty-tiered catalog, and dealt pieces
//!
//! Shapes are small occupancy matrices stored as one bitmask per row, so a
//! shape is `Copy` and checking an offset never touches the heap.
//! The catalog is static data: three tiers of shape definitions, each with a
//! declared color key.

use arrayvec::ArrayVec;

use crate::types::{ColorKey, ColorToken, Difficulty, TRIO_SIZE};

/// Largest width/height of any catalog shape
pub const MAX_SHAPE_SIDE: usize = 5;

/// Occupancy matrix of a piece (`height x width`, row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// Bit `c` of `rows[r]` is set when `(r, c)` is occupied
    rows: [u8; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from a `0/1` matrix
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_core::Shape;
    ///
    /// let corner = Shape::from_matrix([[1, 0], [1, 1]]);
    /// assert_eq!((corner.height(), corner.width()), (2, 2));
    /// assert!(corner.is_occupied(1, 1));
    /// assert!(!corner.is_occupied(0, 1));
    /// assert_eq!(corner.cell_count(), 3);
    /// ```
    pub const fn from_matrix<const W: usize, const H: usize>(matrix: [[u8; W]; H]) -> Self {
        assert!(W > 0 && H > 0);
        assert!(W <= MAX_SHAPE_SIDE && H <= MAX_SHAPE_SIDE);

        let mut rows = [0u8; MAX_SHAPE_SIDE];
        let mut r = 0;
        while r < H {
            let mut c = 0;
            while c < W {
                if matrix[r][c] != 0 {
                    rows[r] |= 1 << c;
                }
                c += 1;
            }
            r += 1;
        }

        Self {
            width: W as u8,
            height: H as u8,
            rows,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if offset `(r, c)` is occupied (false outside the matrix)
    #[inline(always)]
    pub fn is_occupied(&self, r: u8, c: u8) -> bool {
        r < self.height && c < self.width && (self.rows[r as usize] >> c) & 1 == 1
    }

    /// Iterate occupied offsets in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width).filter_map(move |c| self.is_occupied(r, c).then_some((r, c)))
        })
    }

    /// Number of occupied offsets
    pub fn cell_count(&self) -> u8 {
        self.rows.iter().map(|row| row.count_ones() as u8).sum()
    }
}

/// Catalog difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Simple,
    Medium,
    Complex,
}

impl Tier {
    /// Whether shapes of this tier may be dealt at `difficulty`
    pub fn is_eligible(&self, difficulty: Difficulty) -> bool {
        match (self, difficulty) {
            (Tier::Simple, _) => true,
            (Tier::Medium, Difficulty::Medium | Difficulty::Hard) => true,
            (Tier::Complex, Difficulty::Hard) => true,
            _ => false,
        }
    }
}

/// A catalog entry: a shape and its declared color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDef {
    pub shape: Shape,
    pub color: ColorKey,
    pub tier: Tier,
}

const fn def<const W: usize, const H: usize>(
    tier: Tier,
    color: ColorKey,
    matrix: [[u8; W]; H],
) -> BlockDef {
    BlockDef {
        shape: Shape::from_matrix(matrix),
        color,
        tier,
    }
}

/// Entry-level shapes, dealt at every difficulty
pub const SIMPLE_BLOCKS: [BlockDef; 4] = [
    def(Tier::Simple, ColorKey::Cyan, [[1]]),
    def(Tier::Simple, ColorKey::Blue, [[1, 1]]),
    def(Tier::Simple, ColorKey::Blue, [[1], [1]]),
    def(Tier::Simple, ColorKey::Red, [[1, 1], [1, 1]]),
];

/// Added from medium difficulty upwards
pub const MEDIUM_BLOCKS: [BlockDef; 6] = [
    def(Tier::Medium, ColorKey::Orange, [[1, 1, 1]]),
    def(Tier::Medium, ColorKey::Orange, [[1], [1], [1]]),
    def(Tier::Medium, ColorKey::Cyan, [[1, 0], [1, 1]]),
    def(Tier::Medium, ColorKey::Cyan, [[1, 1], [0, 1]]),
    def(Tier::Medium, ColorKey::Blue, [[0, 1, 0], [1, 1, 1]]),
    def(Tier::Medium, ColorKey::Blue, [[1, 0], [1, 1], [1, 0]]),
];

/// Only dealt on hard
pub const COMPLEX_BLOCKS: [BlockDef; 7] = [
    def(Tier::Complex, ColorKey::Yellow, [[1, 1, 1, 1]]),
    def(Tier::Complex, ColorKey::Green, [[1, 1, 1, 1, 1]]),
    def(Tier::Complex, ColorKey::Yellow, [[1], [1], [1], [1]]),
    def(Tier::Complex, ColorKey::Green, [[1], [1], [1], [1], [1]]),
    def(Tier::Complex, ColorKey::Purple, [[1, 1, 1], [1, 1, 1], [1, 1, 1]]),
    def(Tier::Complex, ColorKey::Cyan, [[1, 0], [1, 0], [1, 1]]),
    def(Tier::Complex, ColorKey::Cyan, [[1, 1, 1], [1, 0, 0]]),
];

static TIERS: [&[BlockDef]; 3] = [&SIMPLE_BLOCKS, &MEDIUM_BLOCKS, &COMPLEX_BLOCKS];

/// Total number of catalog entries across all tiers
pub const CATALOG_SIZE: usize = SIMPLE_BLOCKS.len() + MEDIUM_BLOCKS.len() + COMPLEX_BLOCKS.len();

/// Eligible shape pool for a difficulty
///
/// easy = simple, medium = simple + medium, hard = simple + medium + complex.
pub fn block_pool(difficulty: Difficulty) -> ArrayVec<&'static BlockDef, CATALOG_SIZE> {
    TIERS
        .iter()
        .flat_map(|tier| tier.iter())
        .filter(|def| def.tier.is_eligible(difficulty))
        .collect()
}

/// A dealt piece: unique identity plus an immutable shape and color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: u32,
    shape: Shape,
    color: ColorToken,
}

impl Piece {
    pub fn new(id: u32, def: &BlockDef) -> Self {
        Self {
            id,
            shape: def.shape,
            color: def.color,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> ColorToken {
        self.color
    }

    pub fn width(&self) -> u8 {
        self.shape.width
    }

    pub fn height(&self) -> u8 {
        self.shape.height
    }

    pub fn cell_count(&self) -> u8 {
        self.shape.cell_count()
    }
}

/// The pieces currently offered to the player (never more than three)
pub type Trio = ArrayVec<Piece, TRIO_SIZE>;
