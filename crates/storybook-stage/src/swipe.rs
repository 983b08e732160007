//! Swipe-to-replay detection.
//!
//! A stanza replays its narration when the reader drags rightward across it:
//! both pointer transitions inside the stanza's vertical band, a horizontal
//! displacement within fixed bounds, and a release at or beyond the stanza's
//! left edge.

use storybook_core::geometry::Point;
use storybook_core::timecode::TimeRange;

/// Minimum rightward drag, in panel pixels.
pub const SWIPE_MIN_DISPLACEMENT: f32 = 150.0;

/// Maximum rightward drag, in panel pixels.
pub const SWIPE_MAX_DISPLACEMENT: f32 = 400.0;

/// Screen-space footprint and narration range of one placed stanza.
#[derive(Debug, Clone, PartialEq)]
pub struct StanzaRegion {
    pub band_top: f32,
    pub band_bottom: f32,
    pub left_edge: f32,
    pub time_range: TimeRange,
}

impl StanzaRegion {
    fn contains_y(&self, y: f32) -> bool {
        (self.band_top..=self.band_bottom).contains(&y)
    }
}

/// Matches a pointer-down/pointer-up pair against the page's stanzas.
/// Returns the index of the swiped stanza, if any.
#[must_use]
pub fn detect_swipe(regions: &[StanzaRegion], down: Point, up: Point) -> Option<usize> {
    let displacement = up.x - down.x;
    if !(SWIPE_MIN_DISPLACEMENT..=SWIPE_MAX_DISPLACEMENT).contains(&displacement) {
        return None;
    }
    regions.iter().position(|region| {
        region.contains_y(down.y) && region.contains_y(up.y) && up.x >= region.left_edge
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storybook_core::timecode::Timecode;

    fn region() -> StanzaRegion {
        StanzaRegion {
            band_top: 280.0,
            band_bottom: 320.0,
            left_edge: 80.0,
            time_range: TimeRange::new(Timecode::from_millis(500), Timecode::from_millis(2500)),
        }
    }

    #[test]
    fn test_rightward_swipe_inside_band_is_accepted() {
        let regions = [region()];
        let hit = detect_swipe(
            &regions,
            Point::new(100.0, 300.0),
            Point::new(350.0, 310.0),
        );
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn test_swipe_shorter_than_minimum_is_rejected() {
        let regions = [region()];
        let hit = detect_swipe(
            &regions,
            Point::new(100.0, 300.0),
            Point::new(240.0, 300.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_swipe_longer_than_maximum_is_rejected() {
        let regions = [region()];
        let hit = detect_swipe(
            &regions,
            Point::new(100.0, 300.0),
            Point::new(520.0, 300.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_leftward_swipe_is_rejected() {
        let regions = [region()];
        let hit = detect_swipe(
            &regions,
            Point::new(350.0, 300.0),
            Point::new(100.0, 300.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_swipe_leaving_the_band_is_rejected() {
        let regions = [region()];
        let hit = detect_swipe(
            &regions,
            Point::new(100.0, 300.0),
            Point::new(350.0, 350.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_release_left_of_the_stanza_edge_is_rejected() {
        let mut far_left = region();
        far_left.left_edge = 400.0;
        let hit = detect_swipe(
            &[far_left],
            Point::new(100.0, 300.0),
            Point::new(350.0, 300.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_swipe_matches_the_correct_stanza_of_several() {
        let mut second = region();
        second.band_top = 330.0;
        second.band_bottom = 370.0;
        let regions = [region(), second];
        let hit = detect_swipe(
            &regions,
            Point::new(100.0, 350.0),
            Point::new(350.0, 360.0),
        );
        assert_eq!(hit, Some(1));
    }
}
