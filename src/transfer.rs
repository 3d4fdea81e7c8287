use crate::{
    channel::{self, WeightChannel},
    nearest,
    pose::PoseEvaluator,
    scene::{Scene, StrokeObject, Surface},
    sink::{self, WeightSink},
    sk_error::SkError,
    types::{PoseMode, SearchMode, TransferSettings},
    util,
};
use itertools::Itertools;
use log::{debug, error, info, trace};
use nalgebra_glm as glm;

/// A resolved nearest reference on the source surface
enum Reference {
    Vertex(usize),
    Face(usize),
}

/// Transfers weights from the configured source surface onto the stroke
/// points of the configured target, across all frames of all unlocked
/// layers
///
/// Logs the failure cause and reports it as a single error; writes made
/// before the failure are left in place.
///
/// # Errors
/// May return `SkError`
pub fn transfer(
    scene: &mut Scene,
    settings: &TransferSettings,
) -> Result<(), SkError> {
    match run(scene, settings) {
        Ok(()) => {
            info!("weight transfer completed");
            Ok(())
        }
        Err(e) => {
            error!("unable to transfer weights: {e}");
            Err(e)
        }
    }
}

#[allow(clippy::too_many_lines)]
fn run(
    scene: &mut Scene,
    settings: &TransferSettings,
) -> Result<(), SkError> {
    let (clock, source, target) = scene.resolve_transfer(
        settings.source.as_deref(),
        settings.target.as_deref(),
    )?;
    info!(
        "transferring weights from {} to {}",
        source.name, target.name
    );

    // One strategy for the whole run
    let mut sink = sink::probe(target)?;

    ensure_channels(source, target);

    // Channels eligible for writing: unlocked on the target, with an
    // unlocked source channel of the same name. Everything else is left
    // alone.
    let channels: Vec<(String, &WeightChannel)> = target
        .channels
        .iter()
        .filter(|c| !c.locked)
        .filter_map(|c| source.channel(&c.name).map(|sc| (c.name.clone(), sc)))
        .filter(|(_, sc)| !sc.locked)
        .collect();

    let mut pose = PoseEvaluator::new(source, clock, settings.mode);
    let target_world = target.world;
    let target_world_inv = glm::inverse(&target.world);

    for layer in &mut target.layers {
        if layer.locked {
            debug!("skipping locked layer {}", layer.name);
            continue;
        }
        // The clock may only move forward, so frames are visited in
        // increasing frame-number order regardless of storage order
        let order: Vec<usize> = layer
            .frames
            .iter()
            .enumerate()
            .sorted_by_key(|(_, frame)| frame.number)
            .map(|(i, _)| i)
            .collect();
        for frame_index in order {
            let frame_number = layer.frames[frame_index].number;
            debug!(
                "processing frame {frame_number} of layer {}",
                layer.name
            );
            pose.advance_to(frame_number);

            let drawing = &mut layer.frames[frame_index].drawing;
            for stroke_index in 0..drawing.strokes.len() {
                trace!(
                    "processing stroke {}/{} in frame {frame_number}",
                    stroke_index + 1,
                    drawing.strokes.len()
                );
                let offset = drawing.stroke_offset(stroke_index);
                // Snapshot of the stroke's world-space points; corrections
                // applied below must not feed back into this frame's
                // queries
                let world_points = util::transform_all(
                    &drawing.strokes[stroke_index].points,
                    &target_world,
                );
                for (point_index, point_world) in
                    world_points.iter().enumerate()
                {
                    let reference = match settings.nearest {
                        SearchMode::Vertex => nearest::nearest_vertex(
                            point_world,
                            pose.positions(),
                            settings.max_distance,
                        )
                        .map(Reference::Vertex),
                        SearchMode::Face => nearest::nearest_face(
                            point_world,
                            source.faces(),
                            pose.face_positions(),
                            settings.max_distance,
                        )
                        .map(Reference::Face),
                    };
                    let Some(reference) = reference else {
                        // Nothing inside the cutoff; the point stays
                        // unweighted
                        continue;
                    };

                    for (name, source_channel) in &channels {
                        let weight = match &reference {
                            Reference::Vertex(v) => source_channel.weight(*v),
                            Reference::Face(f) => channel::face_weight(
                                source_channel,
                                source.faces()[*f].verts(),
                            ),
                        };
                        sink.write(drawing, name, offset + point_index, weight);
                    }

                    if settings.mode == PoseMode::Frames {
                        let delta = match &reference {
                            Reference::Vertex(v) => pose.delta(*v),
                            Reference::Face(f) => {
                                pose.face_delta(&source.faces()[*f])
                            }
                        };
                        drawing.strokes[stroke_index].points[point_index] =
                            util::transform(
                                &(point_world - delta),
                                &target_world_inv,
                            );
                    }
                }
            }
        }
    }

    sink.finalize(target)
}

/// Creates any source channels missing on the target, then touches every
/// drawing with an assign-and-remove of a placeholder weight. The touch
/// makes the channel own genuine per-point storage before the first real
/// write; some host versions otherwise route writes into a fresh
/// auxiliary attribute instead of the channel.
fn ensure_channels(source: &Surface, target: &mut StrokeObject) {
    for source_channel in &source.channels {
        let name = source_channel.name();
        if target.channel(name).is_none() {
            debug!("creating weight channel {name}");
            target.add_channel(name);
        }
        for drawing in target.drawings_mut() {
            // A drawing with no points has nothing to assign to
            if drawing.point_count() == 0 {
                continue;
            }
            drawing.set_weight(name, 0, 0.0f32);
            drawing.remove_weight(name, 0);
        }
    }
}
