use serde::{Deserialize, Serialize};

use crate::game::grid_math::{wrap_position, PLUS_X, PLUS_Y, Q0, Q1, Q2, Q3};
use crate::game::{Sector, World};

/// One of the six neighbour offsets scanned around the head
///
/// Only `+X` and `+Y` of the axis neighbours are scanned; `-X` and `-Y` never
/// appear in the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleOffset {
    PlusX,
    PlusY,
    Q0,
    Q1,
    Q2,
    Q3,
}

impl ObstacleOffset {
    pub const SCANNED: [ObstacleOffset; 6] = [
        ObstacleOffset::PlusX,
        ObstacleOffset::PlusY,
        ObstacleOffset::Q0,
        ObstacleOffset::Q1,
        ObstacleOffset::Q2,
        ObstacleOffset::Q3,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            ObstacleOffset::PlusX => PLUS_X,
            ObstacleOffset::PlusY => PLUS_Y,
            ObstacleOffset::Q0 => Q0,
            ObstacleOffset::Q1 => Q1,
            ObstacleOffset::Q2 => Q2,
            ObstacleOffset::Q3 => Q3,
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// Unordered set of occupied offsets, stored as a bit-set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObstacleSet(u8);

impl ObstacleSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, offset: ObstacleOffset) {
        self.0 |= offset.bit();
    }

    pub fn contains(&self, offset: ObstacleOffset) -> bool {
        self.0 & offset.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ObstacleOffset> + '_ {
        ObstacleOffset::SCANNED
            .into_iter()
            .filter(move |offset| self.contains(*offset))
    }
}

impl FromIterator<ObstacleOffset> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = ObstacleOffset>>(iter: I) -> Self {
        let mut set = ObstacleSet::empty();
        for offset in iter {
            set.insert(offset);
        }
        set
    }
}

/// Compact observation of a world: where the edible is and what is next to the head
///
/// Two ticks with the same tactical situation compare and hash equal, so this
/// works directly as a key into a value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedState {
    pub edible_sector: Sector,
    pub obstacles: ObstacleSet,
}

/// Encode a world snapshot
///
/// Neighbours holding anything but the edible count as obstacles. With
/// wraparound the neighbour is looked up across the edge; without it an
/// off-grid neighbour counts as an obstacle.
pub fn encode_state(world: &World) -> EncodedState {
    let head = world.snake_head_position();
    let edible_sector = Sector::between(head, world.edible_position());

    let size = world.grid_size();
    let wrap_around = world.config().wrap_around;

    let obstacles = ObstacleOffset::SCANNED
        .into_iter()
        .filter(|offset| {
            let (dx, dy) = offset.delta();
            let mut neighbour = head.moved_by(dx, dy);
            if wrap_around {
                neighbour = wrap_position(neighbour, size);
            }
            world
                .occupant_at(neighbour)
                .map_or(true, |occupant| occupant.is_lethal())
        })
        .collect();

    EncodedState {
        edible_sector,
        obstacles,
    }
}
