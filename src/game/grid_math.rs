//! Coordinate and vector helpers shared by the simulation and the encoder.
//!
//! Everything here is pure integer arithmetic on grid offsets. Angles are
//! classified by sign rather than through floating point, so the exact axis
//! boundaries (0°, 90°, 180°, -90°) are hit exactly.

use serde::{Deserialize, Serialize};

use super::state::Position;

/// Unit offset along +X
pub const PLUS_X: (i32, i32) = (1, 0);
/// Unit offset along +Y
pub const PLUS_Y: (i32, i32) = (0, 1);
/// Unit offset along -X
pub const MINUS_X: (i32, i32) = (-1, 0);
/// Unit offset along -Y
pub const MINUS_Y: (i32, i32) = (0, -1);

/// Diagonal offset in quadrant 0: (+1, +1)
pub const Q0: (i32, i32) = (1, 1);
/// Diagonal offset in quadrant 1: (-1, +1)
pub const Q1: (i32, i32) = (-1, 1);
/// Diagonal offset in quadrant 2: (+1, -1)
pub const Q2: (i32, i32) = (1, -1);
/// Diagonal offset in quadrant 3: (-1, -1)
pub const Q3: (i32, i32) = (-1, -1);

/// One of eight coarse compass octants a vector can point into
///
/// Axis-aligned vectors get the axis label, everything strictly between two
/// axes gets the diagonal ("quadrant") label of that quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    PlusX,
    PlusY,
    MinusX,
    MinusY,
    Q0,
    Q1,
    Q2,
    Q3,
}

impl Sector {
    pub const ALL: [Sector; 8] = [
        Sector::PlusX,
        Sector::PlusY,
        Sector::MinusX,
        Sector::MinusY,
        Sector::Q0,
        Sector::Q1,
        Sector::Q2,
        Sector::Q3,
    ];

    /// Classify the angle of `(dx, dy)` against the +X basis vector.
    ///
    /// The zero vector has no angle; it resolves to `PlusX`.
    pub fn classify(dx: i32, dy: i32) -> Sector {
        match (dx.signum(), dy.signum()) {
            (0, 0) => Sector::PlusX,
            (1, 0) => Sector::PlusX,
            (0, 1) => Sector::PlusY,
            (-1, 0) => Sector::MinusX,
            (0, -1) => Sector::MinusY,
            (1, 1) => Sector::Q0,
            (-1, 1) => Sector::Q1,
            (1, -1) => Sector::Q2,
            _ => Sector::Q3,
        }
    }

    /// Classify the vector pointing from `from` to `to`
    pub fn between(from: Position, to: Position) -> Sector {
        let (dx, dy) = offset_between(from, to);
        Sector::classify(dx, dy)
    }

    /// The representative unit vector of this sector
    pub fn unit_vector(&self) -> (i32, i32) {
        match self {
            Sector::PlusX => PLUS_X,
            Sector::PlusY => PLUS_Y,
            Sector::MinusX => MINUS_X,
            Sector::MinusY => MINUS_Y,
            Sector::Q0 => Q0,
            Sector::Q1 => Q1,
            Sector::Q2 => Q2,
            Sector::Q3 => Q3,
        }
    }
}

/// Raw (unwrapped) offset from `from` to `to`
pub fn offset_between(from: Position, to: Position) -> (i32, i32) {
    (to.x - from.x, to.y - from.y)
}

/// Squared euclidean distance between two cells
pub fn squared_distance(a: Position, b: Position) -> i64 {
    let (dx, dy) = offset_between(a, b);
    let (dx, dy) = (dx as i64, dy as i64);
    dx * dx + dy * dy
}

/// Wrap a single coordinate into `[0, size)`
pub fn wrap(value: i32, size: usize) -> i32 {
    value.rem_euclid(size as i32)
}

/// Wrap both coordinates of a position into the `size × size` grid
pub fn wrap_position(pos: Position, size: usize) -> Position {
    Position::new(wrap(pos.x, size), wrap(pos.y, size))
}

/// True if `a` and `b` are orthogonal neighbours, optionally across a wrapped edge
pub fn is_adjacent(a: Position, b: Position, size: usize, wrap_around: bool) -> bool {
    let (dx, dy) = offset_between(a, b);
    if wrap_around {
        let (dx, dy) = (wrap(dx, size), wrap(dy, size));
        let last = size as i32 - 1;
        (dy == 0 && (dx == 1 || dx == last)) || (dx == 0 && (dy == 1 || dy == last))
    } else {
        dx.abs() + dy.abs() == 1
    }
}

pub fn in_bounds(pos: Position, size: usize) -> bool {
    let size = size as i32;
    (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
}
