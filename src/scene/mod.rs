//! Scene composition, hit testing and vector serialization.
//!
//! A [`Scene`] is an immutable tree of styled primitives built fresh from
//! a plan snapshot and a [`ViewState`]. It has a single serialization,
//! [`to_svg`], shared by the interactive view and every export path.

mod compose;
mod node;
mod pick;
mod svg;

pub use compose::{
    compose_scene, palette_for, scene_bounds, ViewState, BACKDROP, GRID_SPACING, PADDING,
    ROOM_FILL_OPACITY, SELECTED_PALETTE,
};
pub use node::{
    Color, Group, Label, Layer, Node, Paint, Primitive, RoomPalette, RoomShape, Scene, Shape,
    Style,
};
pub use pick::pick_room;
pub use svg::{to_svg, FALLBACK_SIZE};
