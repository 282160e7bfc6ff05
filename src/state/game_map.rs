use super::common::{TileBounds, Vec2};
use crate::error::{LevelError, LoadError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

pub const GRID_UNIT_SIZE: u32 = 60;
pub const GRID_UNITS_TALL: usize = 8;

const DEFAULT_LEVEL: [&str; GRID_UNITS_TALL] = [
    "############################",
    "#..........o.........o.....#",
    "#.....o...###....o...##....#",
    "#....###.........###.....o.#",
    "#P.........o..............##",
    "#.....##..###....x....o....#",
    "#..o.####.....o..#...###...#",
    "############xx##############",
];

const START_CODE: char = 'P';

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum TileKind {
    Empty,
    Solid,
    Coin,
    KillBlock,
}

impl TileKind {
    pub fn from_code(code: char) -> Option<TileKind> {
        match code {
            '.' | ' ' => Some(TileKind::Empty),
            '#' => Some(TileKind::Solid),
            'o' => Some(TileKind::Coin),
            'x' => Some(TileKind::KillBlock),
            _ => None,
        }
    }
}

/// Read-write access to a tile grid addressed by pixel coordinates.
pub trait MapLike {
    fn tile_at(&self, point: Vec2) -> TileKind;
    fn set_tile(&mut self, point: Vec2, kind: TileKind);
    fn bounds(&self, point: Vec2) -> TileBounds;

    fn is_solid_at(&self, point: Vec2) -> bool {
        self.tile_at(point) == TileKind::Solid
    }

    fn top_of_square(&self, point: Vec2) -> f32 {
        self.bounds(point).top
    }

    fn bottom_of_square(&self, point: Vec2) -> f32 {
        self.bounds(point).bottom
    }

    fn left_of_square(&self, point: Vec2) -> f32 {
        self.bounds(point).left
    }

    fn right_of_square(&self, point: Vec2) -> f32 {
        self.bounds(point).right
    }
}

/// On-disk form of a level, one string per row.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct LevelFile {
    #[serde(default = "default_unit_size")]
    unit_size: u32,
    rows: Vec<String>,
}

fn default_unit_size() -> u32 {
    GRID_UNIT_SIZE
}

#[derive(Clone, Debug)]
pub struct LevelTemplate {
    unit_size: u32,
    w: usize,
    h: usize,
    tiles: Vec<TileKind>,
    start: (usize, usize),
}

impl LevelTemplate {
    pub fn parse<S: AsRef<str>>(unit_size: u32, rows: &[S]) -> Result<Self, LevelError> {
        if unit_size == 0 {
            return Err(LevelError::ZeroUnitSize);
        }
        let w = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if w == 0 {
            return Err(LevelError::Empty);
        }

        let mut tiles = Vec::with_capacity(w * rows.len());
        let mut start = None;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != w {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: w,
                    found,
                });
            }

            for (col, code) in line.chars().enumerate() {
                if code == START_CODE {
                    if start.is_some() {
                        return Err(LevelError::MultipleStarts);
                    }
                    start = Some((col, row));
                    tiles.push(TileKind::Empty);
                    continue;
                }
                let kind = TileKind::from_code(code)
                    .ok_or(LevelError::UnknownCode { code, row, col })?;
                tiles.push(kind);
            }
        }

        let start = start.ok_or(LevelError::MissingStart)?;

        Ok(LevelTemplate {
            unit_size,
            w,
            h: rows.len(),
            tiles,
            start,
        })
    }

    pub fn default_level() -> Result<Self, LevelError> {
        LevelTemplate::parse(GRID_UNIT_SIZE, &DEFAULT_LEVEL)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: LevelFile = serde_json::from_str(&s).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        LevelTemplate::parse(file.unit_size, &file.rows).map_err(|source| LoadError::Level {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn coin_count(&self) -> u32 {
        self.tiles.iter().filter(|t| **t == TileKind::Coin).count() as u32
    }
}

pub struct TileWorld {
    template: LevelTemplate,
    tiles: Vec<TileKind>,
    total_coins: u32,
}

impl TileWorld {
    pub fn new(template: LevelTemplate) -> TileWorld {
        let total_coins = template.coin_count();
        let tiles = template.tiles.clone();
        TileWorld {
            template,
            tiles,
            total_coins,
        }
    }

    /// Restores the template (coins included) and returns the player start.
    pub fn reload(&mut self) -> Vec2 {
        self.tiles.clone_from(&self.template.tiles);
        self.player_start()
    }

    pub fn total_coins(&self) -> u32 {
        self.total_coins
    }

    pub fn coins_remaining(&self) -> u32 {
        self.tiles.iter().filter(|t| **t == TileKind::Coin).count() as u32
    }

    /// Center of the start cell.
    pub fn player_start(&self) -> Vec2 {
        let unit = self.unit_size();
        let (col, row) = self.template.start;
        Vec2::new(
            col as f32 * unit + unit * 0.5,
            row as f32 * unit + unit * 0.5,
        )
    }

    pub fn unit_size(&self) -> f32 {
        self.template.unit_size as f32
    }

    pub fn width_tiles(&self) -> usize {
        self.template.w
    }

    pub fn height_tiles(&self) -> usize {
        self.template.h
    }

    pub fn pixel_width(&self) -> f32 {
        self.template.w as f32 * self.unit_size()
    }

    pub fn pixel_height(&self) -> f32 {
        self.template.h as f32 * self.unit_size()
    }

    fn cell_of(&self, point: Vec2) -> (i32, i32) {
        let unit = self.unit_size();
        (
            (point.x / unit).floor() as i32,
            (point.y / unit).floor() as i32,
        )
    }

    fn index_of(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 {
            return None;
        }
        let (x, y) = (tx as usize, ty as usize);
        if x >= self.template.w || y >= self.template.h {
            return None;
        }
        Some(x + self.template.w * y)
    }

    /// Tile by grid index. Outside the grid is solid so the player cannot leave the level.
    pub fn get_at(&self, tx: i32, ty: i32) -> TileKind {
        self.index_of(tx, ty)
            .map(|i| self.tiles[i])
            .unwrap_or(TileKind::Solid)
    }

    /// Every cell in row-major order as `(col, row, kind)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, TileKind)> + '_ {
        let w = self.template.w;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, kind)| (i % w, i / w, *kind))
    }
}

impl MapLike for TileWorld {
    fn tile_at(&self, point: Vec2) -> TileKind {
        let (tx, ty) = self.cell_of(point);
        self.get_at(tx, ty)
    }

    fn set_tile(&mut self, point: Vec2, kind: TileKind) {
        let (tx, ty) = self.cell_of(point);
        if let Some(i) = self.index_of(tx, ty) {
            self.tiles[i] = kind;
        }
    }

    fn bounds(&self, point: Vec2) -> TileBounds {
        let unit = self.unit_size();
        let (tx, ty) = self.cell_of(point);
        TileBounds {
            top: ty as f32 * unit,
            bottom: (ty + 1) as f32 * unit,
            left: tx as f32 * unit,
            right: (tx + 1) as f32 * unit,
        }
    }
}
