//! Nearest-reference search
//!
//! Plain linear scans. Every query is O(n) in the vertex or face count,
//! which is fine for a tool that runs once per invocation; building a
//! spatial index would cost more than it saves here.

use crate::{scene::Face, util};
use nalgebra_glm as glm;

/// Turns the user-facing cutoff into a comparison bound. Zero means the
/// cutoff is disabled.
const fn search_bound(max_distance: f32) -> f32 {
    if max_distance > 0.0f32 {
        max_distance
    } else {
        f32::INFINITY
    }
}

/// Index of the candidate position nearest to `query`, or `None` if no
/// candidate is inside the cutoff
///
/// Comparison is a strict improvement, so of several candidates at the
/// same distance the first in iteration order wins.
#[must_use]
pub fn nearest_vertex(
    query: &glm::Vec3,
    positions: &[glm::Vec3],
    max_distance: f32,
) -> Option<usize> {
    let mut closest_dist = search_bound(max_distance);
    let mut closest = None;
    for (index, position) in positions.iter().enumerate() {
        let dist = glm::distance(query, position);
        if dist < closest_dist {
            closest_dist = dist;
            closest = Some(index);
        }
    }
    closest
}

/// Index of the face whose centroid is nearest to `query`, or `None` if
/// no centroid is inside the cutoff
///
/// The representative point is the unweighted centroid of the face's
/// vertices as given in `positions`; callers choose the space those
/// positions are in. Centroid distance is not closest-point-on-face
/// distance, so a large face can lose to a small one that overlaps the
/// query less.
#[must_use]
pub fn nearest_face(
    query: &glm::Vec3,
    faces: &[Face],
    positions: &[glm::Vec3],
    max_distance: f32,
) -> Option<usize> {
    let mut closest_dist = search_bound(max_distance);
    let mut closest = None;
    for (index, face) in faces.iter().enumerate() {
        let center = util::centroid(face.verts(), positions);
        let dist = glm::distance(query, &center);
        if dist < closest_dist {
            closest_dist = dist;
            closest = Some(index);
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::{nearest_face, nearest_vertex};
    use crate::scene::Face;
    use nalgebra_glm as glm;

    fn line() -> Vec<glm::Vec3> {
        vec![
            glm::vec3(0.0f32, 0.0f32, 0.0f32),
            glm::vec3(1.0f32, 0.0f32, 0.0f32),
            glm::vec3(2.0f32, 0.0f32, 0.0f32),
        ]
    }

    #[test]
    fn vertex_basic() {
        let query = glm::vec3(1.2f32, 0.0f32, 0.0f32);
        assert_eq!(nearest_vertex(&query, &line(), 0.0f32), Some(1));
    }

    #[test]
    fn vertex_cutoff() {
        let query = glm::vec3(1.0f32, 5.0f32, 0.0f32);
        // Nearest is vertex 1 at distance 5; cutoff 1 excludes everything
        assert_eq!(nearest_vertex(&query, &line(), 1.0f32), None);
        // Cutoff 0 disables the check
        assert_eq!(nearest_vertex(&query, &line(), 0.0f32), Some(1));
    }

    #[test]
    fn vertex_tie_takes_first() {
        // Vertices 0 and 2 are both at distance 1 from the query
        let query = glm::vec3(1.0f32, 0.0f32, 0.0f32);
        let positions = vec![
            glm::vec3(0.0f32, 0.0f32, 0.0f32),
            glm::vec3(9.0f32, 0.0f32, 0.0f32),
            glm::vec3(2.0f32, 0.0f32, 0.0f32),
        ];
        assert_eq!(nearest_vertex(&query, &positions, 0.0f32), Some(0));
    }

    #[test]
    fn vertex_empty() {
        let query = glm::vec3(0.0f32, 0.0f32, 0.0f32);
        assert_eq!(nearest_vertex(&query, &[], 0.0f32), None);
    }

    #[test]
    fn face_by_centroid() {
        // Two triangles; centroids at x = 1/3 and x = 8/3
        let positions = vec![
            glm::vec3(0.0f32, 0.0f32, 0.0f32),
            glm::vec3(1.0f32, 0.0f32, 0.0f32),
            glm::vec3(0.0f32, 1.0f32, 0.0f32),
            glm::vec3(3.0f32, 0.0f32, 0.0f32),
            glm::vec3(2.0f32, 0.0f32, 0.0f32),
            glm::vec3(3.0f32, 1.0f32, 0.0f32),
        ];
        let faces =
            vec![Face::new(&[0, 1, 2]), Face::new(&[3, 4, 5])];
        let query = glm::vec3(2.5f32, 0.2f32, 0.0f32);
        assert_eq!(
            nearest_face(&query, &faces, &positions, 0.0f32),
            Some(1)
        );
        let query = glm::vec3(0.0f32, 0.0f32, 0.0f32);
        assert_eq!(
            nearest_face(&query, &faces, &positions, 0.0f32),
            Some(0)
        );
    }

    #[test]
    fn face_cutoff() {
        let positions = vec![
            glm::vec3(0.0f32, 0.0f32, 0.0f32),
            glm::vec3(1.0f32, 0.0f32, 0.0f32),
            glm::vec3(0.0f32, 1.0f32, 0.0f32),
        ];
        let faces = vec![Face::new(&[0, 1, 2])];
        let query = glm::vec3(10.0f32, 0.0f32, 0.0f32);
        assert_eq!(
            nearest_face(&query, &faces, &positions, 1.0f32),
            None
        );
    }
}
