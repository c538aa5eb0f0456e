//! Core type definitions for island generation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the island grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Position one step away in the given direction
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }

    /// The four orthogonal neighbors, in north, south, east, west order.
    /// Neighbors are not bounds-checked.
    pub fn neighbors(&self) -> [Position; 4] {
        Direction::all().map(|direction| self.step(direction))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction. North is towards y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Axis-aligned rectangle of tiles. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square covering `[0, size)` on both axes
    pub fn square(size: i32) -> Self {
        Self::new(0, 0, size, size)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    /// Last column inside the rectangle (inclusive)
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Last row inside the rectangle (inclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left() && pos.x <= self.right() && pos.y >= self.top() && pos.y <= self.bottom()
    }

    /// Shrink by `amount` on every side. Collapses to an empty rectangle
    /// rather than producing negative extents.
    pub fn inset(&self, amount: i32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2 * amount).max(0),
            height: (self.height - 2 * amount).max(0),
        }
    }

    /// Overlap of two rectangles, empty when they do not intersect
    pub fn intersect(&self, other: &Rect) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self {
            x: left,
            y: top,
            width: (right - left + 1).max(0),
            height: (bottom - top + 1).max(0),
        }
    }

    /// Square box of half-size `half` centred on `center`
    pub fn around(center: Position, half: i32) -> Self {
        let half = half.max(0);
        Self::new(center.x - half, center.y - half, 2 * half + 1, 2 * half + 1)
    }

    /// Row-major iterator over every position in the rectangle
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let rect = *self;
        let width = rect.width.max(0);
        (rect.top()..rect.top() + rect.height.max(0))
            .flat_map(move |y| (rect.left()..rect.left() + width).map(move |x| Position::new(x, y)))
    }
}

/// Tile type on the island grid.
///
/// The declaration order is stable; renderers and persistence key off the
/// discriminant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Debug,
    Ocean,
    Dirt,
    Sand,
    Rock,
    Lake,
    River,
    VegetationSparse,
    VegetationModerate,
    VegetationDense,
}

#[derive(Debug, Clone, Copy)]
struct TileTraits {
    water: bool,
    growable: bool,
    animated: bool,
}

impl TileTraits {
    const fn new(water: bool, growable: bool, animated: bool) -> Self {
        Self {
            water,
            growable,
            animated,
        }
    }
}

// Indexed by discriminant, must follow the declaration order of `TileType`.
const TILE_TRAITS: [TileTraits; TileType::COUNT] = [
    TileTraits::new(false, false, false), // Debug
    TileTraits::new(true, false, true),   // Ocean
    TileTraits::new(false, true, false),  // Dirt
    TileTraits::new(false, false, false), // Sand
    TileTraits::new(false, false, false), // Rock
    TileTraits::new(true, false, true),   // Lake
    TileTraits::new(true, false, true),   // River
    TileTraits::new(false, false, false), // VegetationSparse
    TileTraits::new(false, false, false), // VegetationModerate
    TileTraits::new(false, false, false), // VegetationDense
];

impl TileType {
    pub const COUNT: usize = 10;

    pub fn all() -> [TileType; TileType::COUNT] {
        [
            TileType::Debug,
            TileType::Ocean,
            TileType::Dirt,
            TileType::Sand,
            TileType::Rock,
            TileType::Lake,
            TileType::River,
            TileType::VegetationSparse,
            TileType::VegetationModerate,
            TileType::VegetationDense,
        ]
    }

    fn traits(self) -> TileTraits {
        TILE_TRAITS[self as usize]
    }

    pub fn is_water(self) -> bool {
        self.traits().water
    }

    /// Bare ground that vegetation can spread onto
    pub fn is_growable(self) -> bool {
        self.traits().growable
    }

    /// Rendering hint only
    pub fn is_animated(self) -> bool {
        self.traits().animated
    }

    /// Vegetation density tier, 1 (sparse) to 3 (dense)
    pub fn vegetation_tier(self) -> Option<u8> {
        match self {
            TileType::VegetationSparse => Some(1),
            TileType::VegetationModerate => Some(2),
            TileType::VegetationDense => Some(3),
            _ => None,
        }
    }

    pub fn is_vegetation(self) -> bool {
        self.vegetation_tier().is_some()
    }

    /// Next vegetation tier. `None` for dense and non-vegetation tiles.
    pub fn densified(self) -> Option<TileType> {
        match self {
            TileType::VegetationSparse => Some(TileType::VegetationModerate),
            TileType::VegetationModerate => Some(TileType::VegetationDense),
            _ => None,
        }
    }

    /// Freshwater and sparse vegetation seed neighbouring bare ground
    pub fn spreads_vegetation(self) -> bool {
        matches!(
            self,
            TileType::VegetationSparse | TileType::Lake | TileType::River
        )
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which existing tiles a stamping pass may overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFilter {
    Any,
    Only(TileType),
    OneOf(&'static [TileType]),
}

impl TileFilter {
    pub fn matches(&self, tile: TileType) -> bool {
        match self {
            TileFilter::Any => true,
            TileFilter::Only(expected) => *expected == tile,
            TileFilter::OneOf(expected) => expected.contains(&tile),
        }
    }
}

impl From<TileType> for TileFilter {
    fn from(tile: TileType) -> Self {
        TileFilter::Only(tile)
    }
}

impl From<Option<TileType>> for TileFilter {
    fn from(tile: Option<TileType>) -> Self {
        tile.map_or(TileFilter::Any, TileFilter::Only)
    }
}
