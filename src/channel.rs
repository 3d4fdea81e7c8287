use ahash::{HashMap, HashMapExt};

/// A named per-vertex influence map on a surface object
///
/// Membership is sparse. A vertex with no entry has weight 0, which is
/// the same as "unweighted" for every consumer of this data, so lookups
/// never fail.
#[derive(Clone, Debug)]
pub struct WeightChannel {
    name: String,
    pub locked: bool,
    weights: HashMap<usize, f32>,
}

impl WeightChannel {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            locked: false,
            weights: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigns a weight to a vertex, clamped into [0, 1]
    pub fn assign(&mut self, vertex: usize, weight: f32) {
        self.weights.insert(vertex, weight.clamp(0.0f32, 1.0f32));
    }

    /// Removes a vertex from the channel, making it unweighted
    pub fn remove(&mut self, vertex: usize) {
        self.weights.remove(&vertex);
    }

    /// Weight of a vertex, 0 for non-members
    #[must_use]
    pub fn weight(&self, vertex: usize) -> f32 {
        self.weights.get(&vertex).copied().unwrap_or(0.0f32)
    }

    #[must_use]
    pub fn contains(&self, vertex: usize) -> bool {
        self.weights.contains_key(&vertex)
    }
}

/// Mean of the channel's weight over a face's vertices, with non-members
/// contributing 0
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn face_weight(channel: &WeightChannel, verts: &[usize]) -> f32 {
    if verts.is_empty() {
        return 0.0f32;
    }
    let sum: f32 = verts.iter().map(|v| channel.weight(*v)).sum();
    sum / (verts.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::{face_weight, WeightChannel};

    const EPSILON: f32 = 0.0001f32;

    #[test]
    fn missing_member_is_zero() {
        let mut channel = WeightChannel::new("arm");
        channel.assign(2, 0.8f32);
        assert!((channel.weight(2) - 0.8f32).abs() < EPSILON);
        assert!(channel.weight(7).abs() < EPSILON);
        assert!(!channel.contains(7));
    }

    #[test]
    fn assign_clamps() {
        let mut channel = WeightChannel::new("arm");
        channel.assign(0, 1.5f32);
        channel.assign(1, -0.25f32);
        assert!((channel.weight(0) - 1.0f32).abs() < EPSILON);
        assert!(channel.weight(1).abs() < EPSILON);
        // Clamped to zero but still a member
        assert!(channel.contains(1));
    }

    #[test]
    fn remove_clears_membership() {
        let mut channel = WeightChannel::new("arm");
        channel.assign(3, 0.4f32);
        channel.remove(3);
        assert!(!channel.contains(3));
        assert!(channel.weight(3).abs() < EPSILON);
    }

    #[test]
    fn face_average_counts_non_members() {
        let mut channel = WeightChannel::new("arm");
        channel.assign(0, 0.8f32);
        channel.assign(1, 0.4f32);
        // Vertices 2 and 3 are not members and contribute 0
        let w = face_weight(&channel, &[0, 1, 2, 3]);
        assert!((w - 0.3f32).abs() < EPSILON);
    }
}
