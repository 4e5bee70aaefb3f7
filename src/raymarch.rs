//! Grid-line ray marching.
//!
//! A ray is given by two points: the origin `p1` and a point `p2` further
//! along it. Each step jumps exactly to the next vertical or horizontal grid
//! line the ray crosses, so no cell is skipped regardless of slope.
//!
//! The one exception is a crossing within `EPS` of a grid corner: both axes
//! snap at once and the march enters the diagonal neighbour directly. The
//! two cells that only touch the corner are not visited.

use crate::config::FAR_CLIPPING_PLANE;
use crate::scene::{Scene, Tile};
use crate::vector::Vector2;

/// Nudge that keeps a point off the exact grid boundary it was snapped to.
pub const EPS: f64 = 1e-6;

/// Next grid boundary strictly ahead of `x` in the direction of `dx`.
pub fn snap(x: f64, dx: f64) -> f64 {
    if dx > 0.0 {
        return (x + EPS).ceil();
    }
    if dx < 0.0 {
        return (x - EPS).floor();
    }
    x
}

// f64::signum maps +0.0 to 1.0, a zero delta must not nudge
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Cell the ray `p1 -> p2` has just entered at `p2`.
pub fn hitting_cell(p1: Vector2, p2: Vector2) -> Vector2 {
    let d = p2 - p1;
    Vector2::new(
        (p2.x + sign(d.x) * EPS).floor(),
        (p2.y + sign(d.y) * EPS).floor(),
    )
}

/// Advances `p2` along the line `p1 -> p2` to the first grid line crossed.
pub fn ray_step(p1: Vector2, p2: Vector2) -> Vector2 {
    // y1 = k * x1 + c
    // y2 = k * x2 + c
    //
    // k = (y2 - y1) / (x2 - x1)
    // c = y1 - k * x1
    let d = p2 - p1;
    if d.x == 0.0 {
        return Vector2::new(p2.x, snap(p2.y, d.y));
    }

    let k = d.y / d.x;
    let c = p1.y - k * p1.x;

    let x3 = snap(p2.x, d.x);
    let mut p3 = Vector2::new(x3, x3 * k + c);

    if k != 0.0 {
        let y3 = snap(p2.y, d.y);
        let candidate = Vector2::new((y3 - c) / k, y3);
        if p2.sqr_distance_to(candidate) < p2.sqr_distance_to(p3) {
            p3 = candidate;
        }
    }
    p3
}

/// One grid crossing of a ray: where it is and which cell it entered.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Step {
    pub point: Vector2,
    pub cell: Vector2,
}

/// Unbounded sequence of grid crossings along a ray, starting at `p2`.
///
/// Ends only when a step makes no progress, i.e. for a degenerate ray
/// with `p1 == p2`.
pub struct RayMarch {
    p1: Vector2,
    p2: Vector2,
    done: bool,
}

impl RayMarch {
    pub fn new(p1: Vector2, p2: Vector2) -> Self {
        Self {
            p1,
            p2,
            done: false,
        }
    }
}

impl Iterator for RayMarch {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = Step {
            point: self.p2,
            cell: hitting_cell(self.p1, self.p2),
        };
        let p3 = ray_step(self.p1, self.p2);
        if p3 == self.p2 || !p3.x.is_finite() || !p3.y.is_finite() {
            self.done = true;
        } else {
            self.p1 = self.p2;
            self.p2 = p3;
        }
        Some(step)
    }
}

/// Where a cast ended. `tile` is set only when a solid tile stopped the ray;
/// leaving the grid or passing the far plane ends the march without one.
#[derive(Debug, Clone, Copy)]
pub struct RayHit<'a> {
    pub point: Vector2,
    pub cell: Vector2,
    pub tile: Option<&'a Tile>,
}

/// Marches from `p1` through `p2` until a solid tile, the grid edge or the
/// far clipping plane.
pub fn cast_ray(scene: &Scene, p1: Vector2, p2: Vector2) -> RayHit<'_> {
    let origin = p1;
    let far = FAR_CLIPPING_PLANE * FAR_CLIPPING_PLANE;
    let mut last = RayHit {
        point: p2,
        cell: hitting_cell(p1, p2),
        tile: None,
    };

    for Step { point, cell } in RayMarch::new(p1, p2) {
        match scene.get_tile(cell) {
            None => {
                return RayHit {
                    point,
                    cell,
                    tile: None,
                };
            }
            Some(tile) if tile.is_solid() => {
                return RayHit {
                    point,
                    cell,
                    tile: Some(tile),
                };
            }
            Some(_) => {}
        }
        last = RayHit {
            point,
            cell,
            tile: None,
        };
        if origin.sqr_distance_to(point) >= far {
            break;
        }
    }
    last
}
