//! Map files: one text row per grid row, scanned row-major.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::grid::{Coordinate, Grid, TileContent};

pub const MARKER_PLAYER: char = 'p';
pub const MARKER_ROAMER: char = 's';
pub const MARKER_WALL: char = '#';
pub const MARKER_WATER_LIGHT: char = 'w';
pub const MARKER_WATER_HEAVY: char = 'W';

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map file {} contains no rows", .path.display())]
    Empty { path: PathBuf },
}

/// Initial world layout handed to the simulation at startup
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub grid: Grid,
    pub player_start: Coordinate,
    pub roamer_start: Coordinate,
}

/// Parse map text. Width is the longest row; shorter rows are padded with
/// empty ground. Missing actor markers default to the origin.
pub fn parse_map(text: &str) -> LoadedMap {
    let mut content = HashMap::new();
    let mut player_start = Coordinate::default();
    let mut roamer_start = Coordinate::default();
    let mut width = 0;
    let mut height = 0;

    for (y, line) in text.lines().enumerate() {
        let y = y as i32;
        let mut row_width = 0;
        for (x, ch) in line.chars().enumerate() {
            let coord = Coordinate::new(x as i32, y);
            row_width = x as i32 + 1;
            match ch {
                MARKER_PLAYER => player_start = coord,
                MARKER_ROAMER => roamer_start = coord,
                MARKER_WALL => {
                    content.insert(coord, TileContent::Wall);
                }
                MARKER_WATER_LIGHT => {
                    content.insert(coord, TileContent::WaterLight);
                }
                MARKER_WATER_HEAVY => {
                    content.insert(coord, TileContent::WaterHeavy);
                }
                _ => {}
            }
        }
        width = width.max(row_width);
        height = y + 1;
    }

    LoadedMap {
        grid: Grid::with_content(width, height, content),
        player_start,
        roamer_start,
    }
}

pub fn load_map(path: impl AsRef<Path>) -> Result<LoadedMap, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.lines().next().is_none() {
        return Err(MapError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(parse_map(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_longest_row() {
        let map = parse_map("#\n###\n##\n");
        assert_eq!(map.grid.width(), 3);
        assert_eq!(map.grid.height(), 3);
        assert_eq!(map.grid.occupant(Coordinate::new(2, 0)), TileContent::Empty);
        assert!(map.grid.is_plantable(Coordinate::new(2, 0)));
        assert_eq!(map.grid.occupant(Coordinate::new(2, 1)), TileContent::Wall);
    }

    #[test]
    fn markers_record_actor_starts() {
        let map = parse_map("..#\nwWs\n.p.");
        assert_eq!(map.player_start, Coordinate::new(1, 2));
        assert_eq!(map.roamer_start, Coordinate::new(2, 1));
        assert_eq!(map.grid.occupant(Coordinate::new(0, 1)), TileContent::WaterLight);
        assert_eq!(map.grid.occupant(Coordinate::new(1, 1)), TileContent::WaterHeavy);
        // actor markers do not occupy their tile
        assert_eq!(map.grid.occupant(Coordinate::new(1, 2)), TileContent::Empty);
        assert_eq!(map.grid.occupant(Coordinate::new(2, 1)), TileContent::Empty);
    }

    #[test]
    fn missing_markers_default_to_origin() {
        let map = parse_map("...\n...");
        assert_eq!(map.player_start, Coordinate::new(0, 0));
        assert_eq!(map.roamer_start, Coordinate::new(0, 0));
    }

    #[test]
    fn unknown_characters_are_ground() {
        let map = parse_map("x?~ ");
        assert_eq!(map.grid.width(), 4);
        for x in 0..4 {
            assert!(map.grid.is_plantable(Coordinate::new(x, 0)));
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_map("/definitely/not/here.map").unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }
}
