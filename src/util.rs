//! A module of small math helpers shared by the locator and the pose
//! evaluator

use nalgebra_glm as glm;

/// Transforms a 3D position using a 4x4 matrix and return as a `glm::Vec3`
#[must_use]
pub fn transform(position: &glm::Vec3, matrix: &glm::Mat4) -> glm::Vec3 {
    let ws = glm::vec4(position.x, position.y, position.z, 1.0f32);
    let vs = matrix * ws;
    glm::vec3(vs.x, vs.y, vs.z)
}

/// Transforms a slice of 3D positions using a 4x4 matrix
#[must_use]
pub fn transform_all(
    positions: &[glm::Vec3],
    matrix: &glm::Mat4,
) -> Vec<glm::Vec3> {
    positions.iter().map(|p| transform(p, matrix)).collect()
}

/// Unweighted centroid of the positions selected by `indices`. Returns
/// the origin for an empty selection, though faces always have at least
/// three vertices.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(indices: &[usize], positions: &[glm::Vec3]) -> glm::Vec3 {
    if indices.is_empty() {
        return glm::Vec3::zeros();
    }
    let sum = indices
        .iter()
        .fold(glm::Vec3::zeros(), |acc, i| acc + positions[*i]);
    sum / (indices.len() as f32)
}
