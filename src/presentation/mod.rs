// Presentation layer - Frames, theme and rendering
pub mod frame;
pub mod renderer;
pub mod theme;
