//! Axis-aligned collision detection
//!
//! Everything in the game is a box: the player and each obstacle are
//! described by a center and a size. Overlap uses half-open intervals, so
//! boxes that only share an edge do not collide.

use glam::Vec2;

use super::obstacle::Obstacle;
use super::player::PlayerBody;
use crate::settings::Band;

/// Axis-aligned bounding box (min corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.min.x + other.size.x
            && self.min.x + self.size.x > other.min.x
            && self.min.y < other.min.y + other.size.y
            && self.min.y + self.size.y > other.min.y
    }
}

/// Outcome of a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player box overlaps the obstacle at this index
    Obstacle(usize),
    /// Player left the safe vertical band
    OutOfBounds,
}

/// True if the player's y lies outside `band` (edges count as outside)
pub fn out_of_band(player: &PlayerBody, band: &Band) -> bool {
    player.y <= band.min || player.y >= band.max
}

/// Find the first contact between the player and the world, if any.
///
/// The band check runs first; obstacles are tested in slot order.
pub fn first_contact(
    player: &PlayerBody,
    obstacles: &[Obstacle],
    safe_band: Option<&Band>,
) -> Option<Contact> {
    if safe_band.is_some_and(|band| out_of_band(player, band)) {
        return Some(Contact::OutOfBounds);
    }

    let player_box = player.bounds();
    obstacles
        .iter()
        .position(|o| player_box.overlaps(&o.bounds()))
        .map(Contact::Obstacle)
}

/// Does the player touch anything?
pub fn check_all(player: &PlayerBody, obstacles: &[Obstacle], safe_band: Option<&Band>) -> bool {
    first_contact(player, obstacles, safe_band).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::obstacle::ObstacleKind;
    use proptest::prelude::*;

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle {
            x,
            y,
            width: 0.06,
            height: 0.25,
            kind: ObstacleKind::Vertical,
        }
    }

    fn player_at(y: f32) -> PlayerBody {
        let mut p = PlayerBody::new(&GameConfig::default());
        p.y = y;
        p
    }

    #[test]
    fn test_overlap_hit_and_miss() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(1.0));
        assert!(a.overlaps(&Aabb::new(Vec2::splat(0.5), Vec2::splat(1.0))));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(2.0, 0.0), Vec2::splat(1.0))));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(1.0));
        let right = Aabb::new(Vec2::new(1.0, 0.0), Vec2::splat(1.0));
        let above = Aabb::new(Vec2::new(0.0, 1.0), Vec2::splat(1.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
    }

    #[test]
    fn test_player_hits_obstacle_in_path() {
        let p = player_at(0.0);
        let obstacles = [obstacle_at(2.0, 0.0), obstacle_at(p.x, 0.05)];
        assert_eq!(
            first_contact(&p, &obstacles, None),
            Some(Contact::Obstacle(1))
        );
        assert!(check_all(&p, &obstacles, None));
    }

    #[test]
    fn test_clear_path() {
        let p = player_at(-0.8);
        let obstacles = [obstacle_at(p.x, 0.5), obstacle_at(1.0, -0.8)];
        assert!(!check_all(&p, &obstacles, None));
    }

    #[test]
    fn test_leaving_safe_band_is_contact() {
        let band = Band::new(-0.85, 1.0);
        assert_eq!(
            first_contact(&player_at(-0.85), &[], Some(&band)),
            Some(Contact::OutOfBounds)
        );
        assert_eq!(
            first_contact(&player_at(1.0), &[], Some(&band)),
            Some(Contact::OutOfBounds)
        );
        assert_eq!(first_contact(&player_at(-0.8), &[], Some(&band)), None);
        // Disabled band never triggers
        assert_eq!(first_contact(&player_at(-5.0), &[], None), None);
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-2.0f32..2.0, -2.0f32..2.0, 0.01f32..1.0, 0.01f32..1.0)
            .prop_map(|(x, y, w, h)| Aabb::new(Vec2::new(x, y), Vec2::new(w, h)))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_box_overlaps_itself(a in arb_box()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
