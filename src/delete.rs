use crate::{scene::Scene, sk_error::SkError};
use log::{debug, error, info};

/// Deletes every unlocked weight channel on the target stroke object:
/// the per-point data on every drawing of every layer, then the channel
/// itself. Locked channels and their data are untouched. Irreversible
/// here; undo is the host's business.
///
/// # Errors
/// May return `SkError`
pub fn delete_weights(
    scene: &mut Scene,
    target: Option<&str>,
) -> Result<(), SkError> {
    match run(scene, target) {
        Ok(()) => {
            info!("all unlocked weights deleted");
            Ok(())
        }
        Err(e) => {
            error!("unable to delete weights: {e}");
            Err(e)
        }
    }
}

fn run(scene: &mut Scene, target: Option<&str>) -> Result<(), SkError> {
    let target = scene.resolve_target(target)?;
    info!("deleting unlocked weights from {}", target.name);

    let channels = std::mem::take(&mut target.channels);
    let (locked, unlocked): (Vec<_>, Vec<_>) =
        channels.into_iter().partition(|c| c.locked);
    for channel in &unlocked {
        debug!("deleting weight channel {}", channel.name);
        for drawing in target.drawings_mut() {
            drawing.remove_channel_data(&channel.name);
        }
    }
    target.channels = locked;
    Ok(())
}
