use crate::grid::{GroundCover, TileContent, TreeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

const INDIAN_RED: Rgb = Rgb(205, 92, 92);
const ROSY_BROWN: Rgb = Rgb(188, 143, 143);
const WHITE: Rgb = Rgb(255, 255, 255);
const KHAKI: Rgb = Rgb(240, 230, 140);
const DARK_KHAKI: Rgb = Rgb(189, 183, 107);
const SADDLE_BROWN: Rgb = Rgb(139, 69, 19);
const FOREST_GREEN: Rgb = Rgb(34, 139, 34);
const GREEN_YELLOW: Rgb = Rgb(173, 255, 47);
const CORNFLOWER_BLUE: Rgb = Rgb(100, 149, 237);
const MEDIUM_BLUE: Rgb = Rgb(0, 0, 205);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl Style {
    pub const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            bg: None,
        }
    }

    pub const fn bg(color: Rgb) -> Self {
        Self {
            fg: None,
            bg: Some(color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph::plain(' ');

    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    pub const fn plain(ch: char) -> Self {
        Self {
            ch,
            style: Style { fg: None, bg: None },
        }
    }
}

pub const PLAYER: Glyph = Glyph::new('@', Style::fg(INDIAN_RED));
pub const ROAMER: Glyph = Glyph::new('s', Style::fg(ROSY_BROWN));

pub fn glyph_for_tile(tile: TileContent) -> Option<Glyph> {
    let glyph = match tile {
        TileContent::Empty => return None,
        TileContent::Wall => Glyph::new('#', Style::fg(WHITE)),
        TileContent::WaterLight => Glyph::new(' ', Style::bg(CORNFLOWER_BLUE)),
        TileContent::WaterHeavy => Glyph::new(
            '~',
            Style {
                fg: Some(MEDIUM_BLUE),
                bg: Some(CORNFLOWER_BLUE),
            },
        ),
        TileContent::Tree(state) => match state {
            TreeState::Seed => Glyph::new('.', Style::fg(KHAKI)),
            TreeState::Sapling => Glyph::new('┃', Style::fg(DARK_KHAKI)),
            TreeState::Adult => Glyph::new('▓', Style::fg(FOREST_GREEN)),
            TreeState::Trunk => Glyph::new('█', Style::fg(SADDLE_BROWN)),
            TreeState::Stump => Glyph::new('▄', Style::fg(SADDLE_BROWN)),
            TreeState::Stumpling => Glyph::new('╻', Style::fg(DARK_KHAKI)),
            TreeState::Removed => return None,
        },
    };
    Some(glyph)
}

pub fn glyph_for_ground(cover: GroundCover) -> Glyph {
    match cover {
        GroundCover::GrassLight => Glyph::new('\'', Style::fg(GREEN_YELLOW)),
        GroundCover::GrassHeavy => Glyph::new('"', Style::fg(GREEN_YELLOW)),
    }
}
