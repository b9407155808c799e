use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const TILE_EMPTY: char = '.';
const TILE_WALL: char = '#';

/// Binary classification of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    /// Open floor.
    #[default]
    Empty,
    /// Solid rock.
    Wall,
}

impl Tile {
    /// The other tile type.
    pub fn opposite(self) -> Self {
        match self {
            Tile::Empty => Tile::Wall,
            Tile::Wall => Tile::Empty,
        }
    }

    /// Whether this tile is a wall.
    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Tile::Empty => write!(f, "{TILE_EMPTY}"),
            Tile::Wall => write!(f, "{TILE_WALL}"),
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = anyhow::Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            TILE_EMPTY | '0' | ' ' => Ok(Tile::Empty),
            TILE_WALL | '1' | 'X' => Ok(Tile::Wall),
            _ => bail!("Invalid tile character: {c:?}"),
        }
    }
}
