use crate::{channel::WeightChannel, sk_error::SkError};
use ahash::{HashMap, HashMapExt};
use nalgebra_glm as glm;
use smallvec::SmallVec;

/// A face as an ordered list of vertex indices
///
/// Triangles and quads are the common case so the indices live inline;
/// ngons spill to the heap.
#[derive(Clone, Debug)]
pub struct Face {
    verts: SmallVec<[usize; 4]>,
}

impl Face {
    #[must_use]
    pub fn new(verts: &[usize]) -> Self {
        Self {
            verts: SmallVec::from_slice(verts),
        }
    }

    #[must_use]
    pub fn verts(&self) -> &[usize] {
        &self.verts
    }
}

/// A poly-mesh surface object
///
/// Vertex positions are the rest pose in object space. Animated poses are
/// keyed by frame number and stand in for what the host's dependency
/// graph would produce at that frame; a frame with no stored pose
/// evaluates to the rest pose.
pub struct Surface {
    pub name: String,
    pub world: glm::Mat4,
    vertices: Vec<glm::Vec3>,
    faces: Vec<Face>,
    pub channels: Vec<WeightChannel>,
    poses: HashMap<i32, Vec<glm::Vec3>>,
}

impl Surface {
    #[must_use]
    pub fn new(name: &str, vertices: Vec<glm::Vec3>, faces: Vec<Face>) -> Self {
        Self {
            name: name.to_string(),
            world: glm::Mat4::identity(),
            vertices,
            faces,
            channels: Vec::new(),
            poses: HashMap::new(),
        }
    }

    /// Rest-pose vertex positions in object space
    #[must_use]
    pub fn vertices(&self) -> &[glm::Vec3] {
        &self.vertices
    }

    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[must_use]
    pub fn channel(&self, name: &str) -> Option<&WeightChannel> {
        self.channels.iter().find(|c| c.name() == name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut WeightChannel> {
        self.channels.iter_mut().find(|c| c.name() == name)
    }

    /// Adds an empty channel and returns it for weight assignment. An
    /// existing channel of the same name is returned instead; channel
    /// names are unique per object.
    pub fn add_channel(&mut self, name: &str) -> &mut WeightChannel {
        if let Some(i) =
            self.channels.iter().position(|c| c.name() == name)
        {
            return &mut self.channels[i];
        }
        self.channels.push(WeightChannel::new(name));
        // Just pushed, so last() is the new channel
        let last = self.channels.len() - 1;
        &mut self.channels[last]
    }

    /// Stores the deformed object-space positions for a frame
    ///
    /// # Errors
    /// May return `SkError` if the position count does not match the
    /// vertex count
    pub fn set_pose(
        &mut self,
        frame: i32,
        positions: Vec<glm::Vec3>,
    ) -> Result<(), SkError> {
        if positions.len() != self.vertices.len() {
            return Err(SkError::PoseCountMismatch {
                frame,
                expected: self.vertices.len(),
                actual: positions.len(),
            });
        }
        self.poses.insert(frame, positions);
        Ok(())
    }

    /// Object-space positions at a frame, falling back to the rest pose
    /// for frames with no stored deformation
    #[must_use]
    pub fn pose_at(&self, frame: i32) -> &[glm::Vec3] {
        self.poses.get(&frame).map_or(&self.vertices, Vec::as_slice)
    }
}
