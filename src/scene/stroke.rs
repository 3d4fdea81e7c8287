use crate::sk_error::SkError;
use ahash::{HashMap, HashMapExt};
use nalgebra_glm as glm;

/// What kind of per-point weight writes the host allows on a stroke
/// object. Probed once per operation, not per write.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WeightAccess {
    /// Channel storage can be edited directly
    Direct,
    /// Writes must be staged in named scalar attributes and migrated into
    /// channel storage afterwards
    Staged,
    /// No weight writes at all
    ReadOnly,
}

/// Weight channel descriptor on a stroke object. The per-point data lives
/// in each drawing, keyed by the channel name.
#[derive(Clone, Debug)]
pub struct StrokeChannel {
    pub name: String,
    pub locked: bool,
}

/// One point-sequence within a drawing, positions in object space
#[derive(Clone, Debug, Default)]
pub struct Stroke {
    pub points: Vec<glm::Vec3>,
}

impl Stroke {
    #[must_use]
    pub const fn new(points: Vec<glm::Vec3>) -> Self {
        Self { points }
    }
}

/// The per-frame geometry of a layer
///
/// Weight data and generic scalar attributes are both stored per drawing
/// with flat point indices: point `i` of stroke `s` lives at
/// `stroke_offset(s) + i`. Both stores are sparse; a point with no entry
/// is unweighted, which is not the same thing as weight 0.
#[derive(Clone, Debug, Default)]
pub struct Drawing {
    pub strokes: Vec<Stroke>,
    weights: HashMap<String, HashMap<usize, f32>>,
    attributes: HashMap<String, HashMap<usize, f32>>,
}

impl Drawing {
    #[must_use]
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self {
            strokes,
            weights: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(|s| s.points.len()).sum()
    }

    /// Flat index of the first point of stroke `stroke_idx`. This is the
    /// drawing's curve-offset table.
    #[must_use]
    pub fn stroke_offset(&self, stroke_idx: usize) -> usize {
        self.strokes[..stroke_idx]
            .iter()
            .map(|s| s.points.len())
            .sum()
    }

    pub fn set_weight(&mut self, channel: &str, point: usize, value: f32) {
        self.weights
            .entry(channel.to_string())
            .or_default()
            .insert(point, value.clamp(0.0f32, 1.0f32));
    }

    /// Removes a point from a channel without removing the channel's
    /// per-point store itself
    pub fn remove_weight(&mut self, channel: &str, point: usize) {
        if let Some(data) = self.weights.get_mut(channel) {
            data.remove(&point);
        }
    }

    #[must_use]
    pub fn weight(&self, channel: &str, point: usize) -> Option<f32> {
        self.weights.get(channel)?.get(&point).copied()
    }

    /// True once the channel has a per-point store on this drawing, even
    /// an empty one
    #[must_use]
    pub fn has_channel_data(&self, channel: &str) -> bool {
        self.weights.contains_key(channel)
    }

    pub fn remove_channel_data(&mut self, channel: &str) {
        self.weights.remove(channel);
    }

    pub fn set_attribute(&mut self, name: &str, point: usize, value: f32) {
        self.attributes
            .entry(name.to_string())
            .or_default()
            .insert(point, value);
    }

    #[must_use]
    pub fn attribute(&self, name: &str, point: usize) -> Option<f32> {
        self.attributes.get(name)?.get(&point).copied()
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Bulk-copies a named scalar attribute into a channel's per-point
    /// weight store. Stands in for the host-side copy operation the
    /// staged write path finishes with; the host performs it outside this
    /// crate.
    ///
    /// # Errors
    /// May return `SkError` if the attribute does not exist
    pub fn copy_attribute_into_channel(
        &mut self,
        from: &str,
        channel: &str,
    ) -> Result<(), SkError> {
        let data = self
            .attributes
            .get(from)
            .ok_or_else(|| SkError::AttributeMissing(from.to_string()))?
            .clone();
        self.weights.insert(channel.to_string(), data);
        Ok(())
    }
}

/// Per-layer frame: a frame number and the drawing shown at it
#[derive(Clone, Debug)]
pub struct Frame {
    pub number: i32,
    pub drawing: Drawing,
}

/// An animated stroke layer
#[derive(Clone, Debug, Default)]
pub struct Layer {
    pub name: String,
    pub locked: bool,
    pub frames: Vec<Frame>,
}

impl Layer {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            locked: false,
            frames: Vec::new(),
        }
    }
}

/// A layered, animated stroke object
pub struct StrokeObject {
    pub name: String,
    pub world: glm::Mat4,
    pub layers: Vec<Layer>,
    pub channels: Vec<StrokeChannel>,
    weight_access: WeightAccess,
}

impl StrokeObject {
    #[must_use]
    pub fn new(name: &str, weight_access: WeightAccess) -> Self {
        Self {
            name: name.to_string(),
            world: glm::Mat4::identity(),
            layers: Vec::new(),
            channels: Vec::new(),
            weight_access,
        }
    }

    #[must_use]
    pub const fn weight_access(&self) -> WeightAccess {
        self.weight_access
    }

    #[must_use]
    pub fn channel(&self, name: &str) -> Option<&StrokeChannel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Adds an unlocked channel descriptor if one of that name is not
    /// already present
    pub fn add_channel(&mut self, name: &str) {
        if self.channel(name).is_none() {
            self.channels.push(StrokeChannel {
                name: name.to_string(),
                locked: false,
            });
        }
    }

    /// Iterates every drawing of every layer, locked or not
    pub fn drawings_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Drawing> + '_ {
        self.layers
            .iter_mut()
            .flat_map(|l| l.frames.iter_mut())
            .map(|f| &mut f.drawing)
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawing, Stroke};
    use crate::sk_error::SkError;
    use nalgebra_glm as glm;

    fn two_strokes() -> Drawing {
        let p = glm::vec3(0.0f32, 0.0f32, 0.0f32);
        Drawing::new(vec![
            Stroke::new(vec![p, p, p]),
            Stroke::new(vec![p, p]),
        ])
    }

    #[test]
    fn offsets() {
        let drawing = two_strokes();
        assert_eq!(drawing.point_count(), 5);
        assert_eq!(drawing.stroke_offset(0), 0);
        assert_eq!(drawing.stroke_offset(1), 3);
    }

    #[test]
    fn weight_store_is_sparse() {
        let mut drawing = two_strokes();
        drawing.set_weight("arm", 3, 0.8f32);
        assert_eq!(drawing.weight("arm", 3), Some(0.8f32));
        assert_eq!(drawing.weight("arm", 0), None);
        drawing.remove_weight("arm", 3);
        assert_eq!(drawing.weight("arm", 3), None);
        // The channel store survives even with no members left
        assert!(drawing.has_channel_data("arm"));
    }

    #[test]
    fn copy_attribute_into_channel() {
        let mut drawing = two_strokes();
        drawing.set_attribute("tmp", 0, 0.25f32);
        drawing.set_attribute("tmp", 4, 0.75f32);
        drawing.copy_attribute_into_channel("tmp", "arm").unwrap();
        assert_eq!(drawing.weight("arm", 0), Some(0.25f32));
        assert_eq!(drawing.weight("arm", 4), Some(0.75f32));
        assert_eq!(drawing.weight("arm", 1), None);
        // The attribute itself is untouched; removal is the caller's call
        assert!(drawing.has_attribute("tmp"));
    }

    #[test]
    fn copy_missing_attribute_fails() {
        let mut drawing = two_strokes();
        let result = drawing.copy_attribute_into_channel("nope", "arm");
        assert!(matches!(result, Err(SkError::AttributeMissing(_))));
    }
}
