//! Core types for plotline chart scenes.
//!
//! This crate provides the rendering-surface-independent vocabulary the
//! chart engine speaks:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Insets`]
//! - Color representation: [`Color`] with hex parsing
//! - Draw primitives: [`DrawCommand`] and its styles
//! - The [`Canvas`] painting trait and the recorded [`Scene`]

mod color;
mod draw;
mod geometry;
mod scene;

pub use color::{Color, ColorParseError};
pub use draw::{
    BoxStyle, DrawCommand, LineCap, LineJoin, StrokeStyle, TextAnchor, TextStyle, Transform2D,
};
pub use geometry::{CornerRadius, Insets, Point, Rect, Size};
pub use scene::{Canvas, Scene};
