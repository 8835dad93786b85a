//! Collision detection and response
//!
//! The ball is a circle, everything else is an axis-aligned rectangle.
//! Overlap uses the closest point on the rectangle; response is a position
//! snap plus a velocity component flip.

use super::geometry::circle_intersects_rect;
use super::state::{Ball, Brick, Paddle};

/// Arena walls touched during boundary resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Outcome of one brick pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrickContact {
    /// Indices (into the scanned slice) of bricks destroyed this pass
    pub destroyed: Vec<usize>,
    pub x_reversed: bool,
    pub y_reversed: bool,
}

impl Ball {
    /// Reflect off the left, right and top walls
    ///
    /// The bottom edge is open; falling through it is the loss condition and
    /// is checked separately with [`Ball::is_lost`].
    pub fn resolve_arena_boundaries(&mut self, arena_width: f32) -> WallContact {
        let mut contact = WallContact::default();

        if self.pos.x - self.radius < 0.0 {
            self.vel.x = -self.vel.x;
            self.pos.x = self.radius;
            contact.left = true;
        }
        if self.pos.x > arena_width - self.radius {
            self.vel.x = -self.vel.x;
            self.pos.x = arena_width - self.radius;
            contact.right = true;
        }
        if self.pos.y - self.radius < 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = self.radius;
            contact.top = true;
        }

        contact
    }

    /// Bounce off the paddle with "english"
    ///
    /// Only a descending ball whose pre-step center was above the paddle's top
    /// edge can be caught, so a ball that slipped past the paddle's side keeps
    /// falling. Horizontal velocity becomes proportional to the impact offset
    /// from paddle center. Returns true on a hit.
    pub fn resolve_paddle_collision(&mut self, paddle: &Paddle, dt: f32) -> bool {
        if self.vel.y <= 0.0 {
            return false;
        }
        let prior_y = self.pos.y - self.vel.y * dt;
        if prior_y >= paddle.rect.y {
            return false;
        }
        if !circle_intersects_rect(self.pos, self.radius, &paddle.rect) {
            return false;
        }

        self.pos.y = paddle.rect.y - self.radius;
        self.vel.x = self.rebound_modifier * ((self.pos.x - paddle.origin().x) / paddle.rect.width);
        self.vel.y = -self.vel.y;
        true
    }

    /// Break every standing brick the ball overlaps
    ///
    /// Each overlapping brick pushes the ball out along one axis, chosen from
    /// the direction of travel and which side of the brick the center is on.
    /// Velocity flips are collected and applied once after the pass, so two
    /// bricks hit on the same axis in one frame flip that component once.
    pub fn resolve_brick_collisions(&mut self, bricks: &mut [Brick]) -> BrickContact {
        let mut contact = BrickContact::default();
        let descending = self.vel.y > 0.0;

        for (index, brick) in bricks.iter_mut().enumerate() {
            if brick.is_hit() || !circle_intersects_rect(self.pos, self.radius, &brick.rect) {
                continue;
            }

            let rect = brick.rect;
            let outside_span = !rect.spans_x(self.pos.x);
            let past_entry_face = if descending {
                self.pos.y > rect.y
            } else {
                self.pos.y < rect.bottom()
            };

            if past_entry_face && outside_span {
                self.pos.x = if self.pos.x < rect.x {
                    rect.x - self.radius
                } else {
                    rect.right() + self.radius
                };
                contact.x_reversed = true;
            } else {
                self.pos.y = if descending {
                    rect.y - self.radius
                } else {
                    rect.bottom() + self.radius
                };
                contact.y_reversed = true;
            }

            brick.hit();
            contact.destroyed.push(index);
        }

        if contact.x_reversed {
            self.vel.x = -self.vel.x;
        }
        if contact.y_reversed {
            self.vel.y = -self.vel.y;
        }

        contact
    }
}
