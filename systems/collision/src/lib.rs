#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that reports overlapping bodies without computing any response.

use glam::Vec2;
use nova_strike_core::{Body, CollisionGroup, Contact, Hitbox, CONTACT_PAIRS};

/// Source of overlapping pairs for a body snapshot.
pub trait CollisionDetector {
    /// Clears `out` and fills it with every overlapping pair of bodies whose
    /// groups appear in [`CONTACT_PAIRS`], in table order.
    fn detect(&mut self, bodies: &[Body], out: &mut Vec<Contact>);
}

/// Brute-force detector that tests every body of one group against every
/// body of its partner group.
#[derive(Debug, Default)]
pub struct OverlapDetector {
    left: Vec<Body>,
    right: Vec<Body>,
}

impl OverlapDetector {
    /// Creates a detector with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect(bodies: &[Body], group: CollisionGroup, out: &mut Vec<Body>) {
        out.clear();
        out.extend(bodies.iter().filter(|body| body.group == group).copied());
    }
}

impl CollisionDetector for OverlapDetector {
    fn detect(&mut self, bodies: &[Body], out: &mut Vec<Contact>) {
        out.clear();
        for (left_group, right_group) in CONTACT_PAIRS {
            Self::collect(bodies, left_group, &mut self.left);
            if self.left.is_empty() {
                continue;
            }
            Self::collect(bodies, right_group, &mut self.right);

            for first in &self.left {
                for second in &self.right {
                    if overlaps(first, second) {
                        out.push(Contact {
                            first: first.entity,
                            second: second.entity,
                        });
                    }
                }
            }
        }
    }
}

/// Reports whether two footprints overlap. Touching edges count as overlap.
#[must_use]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    match (a.hitbox, b.hitbox) {
        (Hitbox::Circle { radius: ra }, Hitbox::Circle { radius: rb }) => {
            let reach = ra + rb;
            a.position.distance_squared(b.position) <= reach * reach
        }
        (Hitbox::Rect { half_extents: ha }, Hitbox::Rect { half_extents: hb }) => {
            let delta = (a.position - b.position).abs();
            delta.x <= ha.x + hb.x && delta.y <= ha.y + hb.y
        }
        (Hitbox::Circle { radius }, Hitbox::Rect { half_extents }) => {
            circle_meets_rect(a.position, radius, b.position, half_extents)
        }
        (Hitbox::Rect { half_extents }, Hitbox::Circle { radius }) => {
            circle_meets_rect(b.position, radius, a.position, half_extents)
        }
    }
}

fn circle_meets_rect(center: Vec2, radius: f32, rect_center: Vec2, half_extents: Vec2) -> bool {
    let nearest = center.clamp(rect_center - half_extents, rect_center + half_extents);
    center.distance_squared(nearest) <= radius * radius
}
