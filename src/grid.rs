//! Grid model - sparse tile storage over integer coordinates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tile position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step `distance` tiles in a cardinal direction. Non-cardinal
    /// directions leave the coordinate where it is.
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        match direction.delta() {
            Some((dx, dy)) => Self::new(self.x + dx * distance, self.y + dy * distance),
            None => self,
        }
    }

    /// True when `other` is one of the four cardinal neighbours.
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// The four cardinal neighbours, clockwise from up
    pub fn neighbors(self) -> [Coordinate; 4] {
        Direction::CARDINAL.map(|direction| self.offset(direction, 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    Omni,
    Random,
    None,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit delta for the cardinal directions
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Direction::Up => Some((0, -1)),
            Direction::Right => Some((1, 0)),
            Direction::Down => Some((0, 1)),
            Direction::Left => Some((-1, 0)),
            Direction::Omni | Direction::Random | Direction::None => None,
        }
    }

    pub fn is_cardinal(self) -> bool {
        self.delta().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TreeState {
    Seed,
    Sapling,
    Adult,
    Trunk,
    Stump,
    Stumpling,
    Removed,
}

impl TreeState {
    /// Next state along the growth path. `Adult` is terminal for growth.
    pub fn grown(self) -> Option<TreeState> {
        match self {
            TreeState::Seed => Some(TreeState::Sapling),
            TreeState::Sapling => Some(TreeState::Adult),
            _ => None,
        }
    }

    /// Next state along the harvest path, entered only from `Adult`.
    pub fn chopped(self) -> Option<TreeState> {
        match self {
            TreeState::Adult => Some(TreeState::Trunk),
            TreeState::Trunk => Some(TreeState::Stump),
            TreeState::Stump => Some(TreeState::Stumpling),
            TreeState::Stumpling => Some(TreeState::Removed),
            _ => None,
        }
    }
}

/// Occupant of a single tile. Tiles missing from the grid are `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileContent {
    #[default]
    Empty,
    Wall,
    WaterLight,
    WaterHeavy,
    Tree(TreeState),
}

impl TileContent {
    /// Blocks actor movement
    pub fn is_collidable(self) -> bool {
        matches!(
            self,
            TileContent::Wall | TileContent::WaterLight | TileContent::WaterHeavy
        )
    }

    /// Can receive a new seed
    pub fn is_plantable(self) -> bool {
        matches!(self, TileContent::Empty)
    }

    pub fn tree_state(self) -> Option<TreeState> {
        match self {
            TileContent::Tree(state) => Some(state),
            _ => None,
        }
    }
}

/// Edge classification for coordinates on the rim of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Border {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Border {
    /// Classify `coord` against a `width` x `height` grid, `None` for interior tiles.
    pub fn classify(width: i32, height: i32, coord: Coordinate) -> Option<Border> {
        let top = coord.y == 0;
        let bottom = coord.y == height - 1;
        let left = coord.x == 0;
        let right = coord.x == width - 1;
        match (top, right, bottom, left) {
            (true, _, _, true) => Some(Border::TopLeft),
            (true, true, _, _) => Some(Border::TopRight),
            (_, true, true, _) => Some(Border::BottomRight),
            (_, _, true, true) => Some(Border::BottomLeft),
            (true, _, _, _) => Some(Border::Top),
            (_, true, _, _) => Some(Border::Right),
            (_, _, true, _) => Some(Border::Bottom),
            (_, _, _, true) => Some(Border::Left),
            _ => None,
        }
    }

    /// Borders are only recorded for occupied rim tiles, none of which can be crossed.
    pub fn forbids_crossing(self) -> bool {
        true
    }
}

/// Decorative ground cover drawn under empty tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundCover {
    GrassLight,
    GrassHeavy,
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    borders: HashMap<Coordinate, Border>,
    content: HashMap<Coordinate, TileContent>,
    ground: HashMap<Coordinate, GroundCover>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_content(width, height, HashMap::new())
    }

    /// Build a grid from its initial occupants. Border classification is
    /// computed here once and never refreshed.
    pub fn with_content(width: i32, height: i32, initial: HashMap<Coordinate, TileContent>) -> Self {
        let content: HashMap<_, _> = initial
            .into_iter()
            .filter(|(_, tile)| *tile != TileContent::Empty)
            .collect();
        let borders = content
            .keys()
            .filter_map(|&coord| Border::classify(width, height, coord).map(|b| (coord, b)))
            .collect();
        Self {
            width,
            height,
            borders,
            content,
            ground: HashMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    pub fn border(&self, coord: Coordinate) -> Option<Border> {
        self.borders.get(&coord).copied()
    }

    pub fn occupant(&self, coord: Coordinate) -> TileContent {
        self.content.get(&coord).copied().unwrap_or_default()
    }

    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        self.content.contains_key(&coord)
    }

    pub fn is_blocked(&self, coord: Coordinate) -> bool {
        if !self.in_bounds(coord) {
            return true;
        }
        if self.border(coord).is_some_and(Border::forbids_crossing) {
            return true;
        }
        self.occupant(coord).is_collidable()
    }

    pub fn is_plantable(&self, coord: Coordinate) -> bool {
        self.in_bounds(coord) && self.occupant(coord).is_plantable()
    }

    /// Setting `Empty` removes the entry so the map only ever holds real occupants.
    pub fn set_occupant(&mut self, coord: Coordinate, content: TileContent) {
        if content == TileContent::Empty {
            self.clear_occupant(coord);
        } else {
            self.content.insert(coord, content);
        }
    }

    pub fn clear_occupant(&mut self, coord: Coordinate) {
        self.content.remove(&coord);
    }

    /// Coordinates currently holding a tree, in row-major order
    pub fn tree_coordinates(&self) -> Vec<Coordinate> {
        let mut coords: Vec<_> = self
            .content
            .iter()
            .filter(|(_, tile)| matches!(tile, TileContent::Tree(_)))
            .map(|(coord, _)| *coord)
            .collect();
        coords.sort_by_key(|c| (c.y, c.x));
        coords
    }

    /// All plantable coordinates in row-major order
    pub fn plantable_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates()
            .filter(|coord| self.occupant(*coord).is_plantable())
            .collect()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coordinate::new(x, y)))
    }

    pub fn count_trees(&self, state: TreeState) -> usize {
        self.content
            .values()
            .filter(|tile| **tile == TileContent::Tree(state))
            .count()
    }

    pub fn ground(&self, coord: Coordinate) -> Option<GroundCover> {
        self.ground.get(&coord).copied()
    }

    pub fn set_ground(&mut self, coord: Coordinate, cover: GroundCover) {
        if self.in_bounds(coord) {
            self.ground.insert(coord, cover);
        }
    }
}
