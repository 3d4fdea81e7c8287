use crate::{
    scene::{Drawing, StrokeObject, WeightAccess},
    sk_error::SkError,
};
use ahash::{HashMap, HashMapExt};
use log::debug;

/// Prefix for staged weight attributes. The staged name must differ from
/// the channel name or the migration copy would read its own output.
pub const STAGED_ATTR_PREFIX: &str = "sk_tmp_";

/// Destination for per-point weight writes
///
/// The strategy is picked once per operation by [`probe`]; the transfer
/// loop never branches on host capability per call.
pub trait WeightSink {
    /// Writes one weight for `channel` at flat point index `point`
    fn write(
        &mut self,
        drawing: &mut Drawing,
        channel: &str,
        point: usize,
        value: f32,
    );

    /// Migrates any staged writes into real channel storage and removes
    /// the staging data
    ///
    /// # Errors
    /// May return `SkError`
    fn finalize(&mut self, target: &mut StrokeObject) -> Result<(), SkError>;
}

/// Chooses the write strategy from the target's capability report
///
/// # Errors
/// May return `SkError` for a target with no writable weight access
pub fn probe(target: &StrokeObject) -> Result<Box<dyn WeightSink>, SkError> {
    match target.weight_access() {
        WeightAccess::Direct => Ok(Box::new(DirectSink)),
        WeightAccess::Staged => Ok(Box::new(AttributeSink::new())),
        WeightAccess::ReadOnly => Err(SkError::WeightEditUnsupported),
    }
}

/// Writes straight into channel storage
pub struct DirectSink;

impl WeightSink for DirectSink {
    fn write(
        &mut self,
        drawing: &mut Drawing,
        channel: &str,
        point: usize,
        value: f32,
    ) {
        drawing.set_weight(channel, point, value);
    }

    fn finalize(&mut self, _target: &mut StrokeObject) -> Result<(), SkError> {
        Ok(())
    }
}

/// Stages writes in prefixed scalar attributes, then bulk-copies each
/// staged attribute into its channel and deletes it
pub struct AttributeSink {
    // channel name -> staged attribute name, filled as channels are
    // first written
    names: HashMap<String, String>,
}

impl Default for AttributeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    fn staged_name(&mut self, channel: &str) -> &str {
        self.names
            .entry(channel.to_string())
            .or_insert_with(|| format!("{STAGED_ATTR_PREFIX}{channel}"))
    }
}

impl WeightSink for AttributeSink {
    fn write(
        &mut self,
        drawing: &mut Drawing,
        channel: &str,
        point: usize,
        value: f32,
    ) {
        let name = self.staged_name(channel);
        drawing.set_attribute(name, point, value);
    }

    fn finalize(&mut self, target: &mut StrokeObject) -> Result<(), SkError> {
        for (channel, staged) in &self.names {
            debug!("migrating staged weights into channel {channel}");
            for drawing in target.drawings_mut() {
                // A drawing whose points all missed the search has no
                // staged attribute for this channel
                if drawing.has_attribute(staged) {
                    drawing.copy_attribute_into_channel(staged, channel)?;
                    drawing.remove_attribute(staged);
                }
            }
        }
        self.names.clear();
        Ok(())
    }
}
