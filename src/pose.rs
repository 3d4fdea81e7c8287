use crate::{
    scene::{Face, FrameClock, Surface},
    types::PoseMode,
    util,
};
use nalgebra_glm as glm;

/// Evaluates the source surface's world-space pose per stroke frame
///
/// The evaluator holds the scene clock exclusively while a transfer runs:
/// in `Frames` mode every `advance_to` sets the global animation time as
/// a side effect, so frames must be visited in increasing order and
/// nothing else may touch the clock in between. The clock is left on the
/// last frame advanced to. `Current` mode never touches the clock.
pub struct PoseEvaluator<'a> {
    surface: &'a Surface,
    clock: &'a mut FrameClock,
    mode: PoseMode,
    rest_world: Vec<glm::Vec3>,
    current_world: Vec<glm::Vec3>,
}

impl<'a> PoseEvaluator<'a> {
    #[must_use]
    pub fn new(
        surface: &'a Surface,
        clock: &'a mut FrameClock,
        mode: PoseMode,
    ) -> Self {
        let rest_world =
            util::transform_all(surface.vertices(), &surface.world);
        let current_world = rest_world.clone();
        Self {
            surface,
            clock,
            mode,
            rest_world,
            current_world,
        }
    }

    /// Moves evaluation to a stroke frame. In `Frames` mode this advances
    /// the animation clock and re-evaluates the deformed pose; in
    /// `Current` mode it is a no-op.
    pub fn advance_to(&mut self, frame: i32) {
        if self.mode == PoseMode::Frames {
            self.clock.set(frame);
            self.current_world = util::transform_all(
                self.surface.pose_at(frame),
                &self.surface.world,
            );
        }
    }

    /// World-space positions the vertex search runs against for the
    /// current frame
    #[must_use]
    pub fn positions(&self) -> &[glm::Vec3] {
        &self.current_world
    }

    /// Positions face centroids are computed from. Face lookups always
    /// use the rest pose: in world space when the vertex path also runs
    /// against the rest pose, in object space otherwise.
    #[must_use]
    pub fn face_positions(&self) -> &[glm::Vec3] {
        match self.mode {
            PoseMode::Current => &self.rest_world,
            PoseMode::Frames => self.surface.vertices(),
        }
    }

    /// World-space displacement of a vertex between the rest pose and the
    /// current frame's pose. Zero in `Current` mode.
    #[must_use]
    pub fn delta(&self, vertex: usize) -> glm::Vec3 {
        self.current_world[vertex] - self.rest_world[vertex]
    }

    /// Mean displacement over a face's vertices
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn face_delta(&self, face: &Face) -> glm::Vec3 {
        let verts = face.verts();
        if verts.is_empty() {
            return glm::Vec3::zeros();
        }
        let sum = verts
            .iter()
            .fold(glm::Vec3::zeros(), |acc, v| acc + self.delta(*v));
        sum / (verts.len() as f32)
    }
}
