//! Pointer-based contour selection.
//!
//! Given a clicked pixel coordinate, find the candidate contour owning
//! the vertex closest to it. This is a plain O(total vertices) scan:
//! squared distances are exact integers, comparison uses strict `<`,
//! and candidates are visited in order — so the first contour reaching
//! the minimum distance wins ties deterministically. A spatial index
//! could replace the scan without changing observable behavior, but at
//! expected input sizes it has not been worth the ordering subtleties.

use crate::types::{Contour, Point};

/// Index of the contour owning the vertex nearest to `point`.
///
/// Returns `None` only when `contours` is empty or every candidate has
/// no vertices. Callers must surface that as "no contour found", never
/// as a zero-area result.
#[must_use]
pub fn nearest_contour(contours: &[Contour], point: Point) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;

    for (index, contour) in contours.iter().enumerate() {
        for &vertex in contour.points() {
            let distance = point.distance_squared(vertex);
            let closer = match best {
                None => true,
                Some((_, best_distance)) => distance < best_distance,
            };
            if closer {
                best = Some((index, distance));
            }
        }
    }

    best.map(|(index, _)| index)
}

/// The contour owning the vertex nearest to `point`.
///
/// See [`nearest_contour`] for the distance and tie-break rules.
#[must_use]
pub fn select_nearest(contours: &[Contour], point: Point) -> Option<&Contour> {
    nearest_contour(contours, point).and_then(|index| contours.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(origin: i32, side: i32) -> Contour {
        Contour::new(vec![
            Point::new(origin, origin),
            Point::new(origin + side, origin),
            Point::new(origin + side, origin + side),
            Point::new(origin, origin + side),
        ])
    }

    #[test]
    fn empty_candidate_set_returns_none() {
        assert_eq!(nearest_contour(&[], Point::new(5, 5)), None);
        assert!(select_nearest(&[], Point::new(5, 5)).is_none());
    }

    #[test]
    fn contours_without_vertices_return_none() {
        let contours = vec![Contour::new(vec![]), Contour::new(vec![])];
        assert_eq!(nearest_contour(&contours, Point::new(0, 0)), None);
    }

    #[test]
    fn strictly_closer_contour_wins() {
        let contours = vec![square(0, 4), square(100, 4)];
        // (90, 100) is far from the first square, near the second.
        assert_eq!(nearest_contour(&contours, Point::new(90, 100)), Some(1));
        assert_eq!(nearest_contour(&contours, Point::new(2, 2)), Some(0));
    }

    #[test]
    fn equidistant_point_resolves_to_first_discovered() {
        // (52, 0) is exactly 48 pixels from vertex (4, 0) of the first
        // square and 48 from vertex (100, 0) of the second.
        let contours = vec![square(0, 4), square(100, 4)];
        assert_eq!(nearest_contour(&contours, Point::new(52, 0)), Some(0));

        // Reversing discovery order flips the winner.
        let reversed = vec![square(100, 4), square(0, 4)];
        assert_eq!(nearest_contour(&reversed, Point::new(52, 0)), Some(0));
    }

    #[test]
    fn point_on_a_vertex_selects_that_contour() {
        let contours = vec![square(0, 4), square(10, 4)];
        assert_eq!(nearest_contour(&contours, Point::new(10, 10)), Some(1));
    }

    #[test]
    fn select_nearest_returns_the_owning_contour() {
        let contours = vec![square(0, 4), square(100, 4)];
        let picked = select_nearest(&contours, Point::new(101, 101));
        assert_eq!(picked, Some(&contours[1]));
    }
}
