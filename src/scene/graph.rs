use super::{clock::FrameClock, stroke::StrokeObject, surface::Surface};
use crate::sk_error::SkError;

/// A scene object of either of the two types the operations care about
pub enum Object {
    Surface(Surface),
    Stroke(StrokeObject),
}

impl Object {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Surface(s) => &s.name,
            Self::Stroke(s) => &s.name,
        }
    }
}

/// The scene: named objects plus the global animation clock
///
/// Object names are unique; adding an object with an existing name
/// replaces the old one, as a host scene would on a name collision.
#[derive(Default)]
pub struct Scene {
    pub clock: FrameClock,
    objects: Vec<Object>,
}

impl Scene {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            objects: Vec::new(),
        }
    }

    pub fn add_surface(&mut self, surface: Surface) {
        self.add(Object::Surface(surface));
    }

    pub fn add_stroke(&mut self, stroke: StrokeObject) {
        self.add(Object::Stroke(stroke));
    }

    pub fn add(&mut self, object: Object) {
        if let Some(i) = self.index_of(object.name()) {
            self.objects[i] = object;
        } else {
            self.objects.push(object);
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name() == name)
    }

    #[must_use]
    pub fn surface(&self, name: &str) -> Option<&Surface> {
        self.objects.iter().find_map(|o| match o {
            Object::Surface(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    #[must_use]
    pub fn stroke(&self, name: &str) -> Option<&StrokeObject> {
        self.objects.iter().find_map(|o| match o {
            Object::Stroke(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    pub fn stroke_mut(&mut self, name: &str) -> Option<&mut StrokeObject> {
        self.objects.iter_mut().find_map(|o| match o {
            Object::Stroke(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    /// Resolves the deletion target: must be selected, present, and a
    /// stroke object
    pub(crate) fn resolve_target(
        &mut self,
        target: Option<&str>,
    ) -> Result<&mut StrokeObject, SkError> {
        let name = target.ok_or(SkError::NoTargetSelected)?;
        let i = self
            .index_of(name)
            .ok_or_else(|| SkError::ObjectNotFound(name.to_string()))?;
        match &mut self.objects[i] {
            Object::Stroke(s) => Ok(s),
            Object::Surface(_) => {
                Err(SkError::TargetNotStroke(name.to_string()))
            }
        }
    }

    /// Resolves the transfer selection and splits the borrows: the source
    /// stays shared while the target and the clock are handed out
    /// exclusively
    pub(crate) fn resolve_transfer(
        &mut self,
        source: Option<&str>,
        target: Option<&str>,
    ) -> Result<(&mut FrameClock, &Surface, &mut StrokeObject), SkError>
    {
        let src_name = source.ok_or(SkError::NoSourceSelected)?;
        let dst_name = target.ok_or(SkError::NoTargetSelected)?;
        let si = self
            .index_of(src_name)
            .ok_or_else(|| SkError::ObjectNotFound(src_name.to_string()))?;
        let ti = self
            .index_of(dst_name)
            .ok_or_else(|| SkError::ObjectNotFound(dst_name.to_string()))?;
        if si == ti {
            // One object cannot be both ends of a transfer
            return Err(match &self.objects[si] {
                Object::Surface(_) => {
                    SkError::TargetNotStroke(dst_name.to_string())
                }
                Object::Stroke(_) => {
                    SkError::SourceNotSurface(src_name.to_string())
                }
            });
        }
        let (src_obj, dst_obj) = if si < ti {
            let (head, tail) = self.objects.split_at_mut(ti);
            (&head[si], &mut tail[0])
        } else {
            let (head, tail) = self.objects.split_at_mut(si);
            (&tail[0], &mut head[ti])
        };
        let Object::Surface(src) = src_obj else {
            return Err(SkError::SourceNotSurface(src_name.to_string()));
        };
        let Object::Stroke(dst) = dst_obj else {
            return Err(SkError::TargetNotStroke(dst_name.to_string()));
        };
        Ok((&mut self.clock, src, dst))
    }
}

#[cfg(test)]
mod tests {
    use super::Scene;
    use crate::{
        scene::{stroke::StrokeObject, stroke::WeightAccess, surface::Surface},
        sk_error::SkError,
    };

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_surface(Surface::new("mesh", Vec::new(), Vec::new()));
        scene.add_stroke(StrokeObject::new("ink", WeightAccess::Direct));
        scene
    }

    #[test]
    fn resolve_transfer_splits_borrows() {
        let mut scene = scene();
        let (clock, src, dst) = scene
            .resolve_transfer(Some("mesh"), Some("ink"))
            .unwrap();
        assert_eq!(clock.current(), 1);
        assert_eq!(src.name, "mesh");
        assert_eq!(dst.name, "ink");
    }

    #[test]
    fn resolve_transfer_selection_errors() {
        let mut scene = scene();
        assert!(matches!(
            scene.resolve_transfer(None, Some("ink")),
            Err(SkError::NoSourceSelected)
        ));
        assert!(matches!(
            scene.resolve_transfer(Some("mesh"), None),
            Err(SkError::NoTargetSelected)
        ));
        assert!(matches!(
            scene.resolve_transfer(Some("gone"), Some("ink")),
            Err(SkError::ObjectNotFound(_))
        ));
        assert!(matches!(
            scene.resolve_transfer(Some("ink"), Some("mesh")),
            Err(SkError::SourceNotSurface(_))
        ));
        assert!(matches!(
            scene.resolve_transfer(Some("mesh"), Some("mesh")),
            Err(SkError::TargetNotStroke(_))
        ));
    }

    #[test]
    fn add_replaces_same_name() {
        let mut scene = scene();
        scene.add_stroke(StrokeObject::new("ink", WeightAccess::Staged));
        assert_eq!(
            scene.stroke("ink").unwrap().weight_access(),
            WeightAccess::Staged
        );
    }
}
