pub mod clock;
pub mod graph;
pub mod stroke;
pub mod surface;

// Re-exports
pub use {
    clock::FrameClock,
    graph::{Object, Scene},
    stroke::{
        Drawing, Frame, Layer, Stroke, StrokeChannel, StrokeObject,
        WeightAccess,
    },
    surface::{Face, Surface},
};
