use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::math::{compute_bounds, Bounds, Point2};

/// Wall thickness assumed when a legacy plan omits it.
pub const DEFAULT_WALL_THICKNESS: f64 = 0.8;

/// A plan-space coordinate as it appears on the wire (`{"x": .., "y": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Point2 {
    fn from(p: Point) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<Point2> for Point {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Declares a string-backed enum with a catch-all `Other` arm, so values the
/// generator invents survive a parse/serialize round trip untouched.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Returns the wire name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(s) => s,
                }
            }

            /// Returns `true` if this is a value outside the known catalogue.
            #[must_use]
            pub fn is_other(&self) -> bool {
                matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(s),
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from(s.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                match v {
                    $name::Other(s) => s,
                    known => known.as_str().to_owned(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum! {
    /// Room classification; drives the palette and stair treads.
    RoomType {
        LivingRoom => "Living Room",
        Kitchen => "Kitchen",
        Bedroom => "Bedroom",
        Bathroom => "Bathroom",
        Hallway => "Hallway",
        Closet => "Closet",
        DiningRoom => "Dining Room",
        Office => "Office",
        Garage => "Garage",
        Balcony => "Balcony",
        Entry => "Entry",
        Stairs => "Stairs",
    }
}

open_enum! {
    /// Fixture catalogue; each kind has a symbol recipe.
    FurnitureKind {
        Sofa => "sofa",
        Armchair => "armchair",
        Bed => "bed",
        DiningTable => "dining_table",
        Chair => "chair",
        KitchenCounter => "kitchen_counter",
        Sink => "sink",
        Stove => "stove",
        Toilet => "toilet",
        Bathtub => "bathtub",
        Shower => "shower",
        Wardrobe => "wardrobe",
        Plant => "plant",
        Desk => "desk",
        TvStand => "tv_stand",
        Fridge => "fridge",
        WashingMachine => "washing_machine",
        Rug => "rug",
    }
}

/// Door or window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    Door,
    Window,
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Door => "door",
            Self::Window => "window",
        })
    }
}

/// A door or window anchored to a wall segment.
///
/// `wall_start`/`wall_end` are expected to equal two consecutive vertices of
/// the owning room's polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub wall_start: Point,
    pub wall_end: Point,
}

impl Opening {
    #[must_use]
    pub const fn new(wall_start: Point, wall_end: Point) -> Self {
        Self {
            wall_start,
            wall_end,
        }
    }

    /// Returns the opening with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.wall_end, self.wall_start)
    }
}

/// A furniture placement.
///
/// `position` is the top-left corner before rotation; `rotation` is in
/// clockwise degrees about the piece's own center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// A room: a closed polygon ring plus its label, openings and furniture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default)]
    pub polygon: Vec<Point>,
    #[serde(default)]
    pub label_position: Point,
    #[serde(default)]
    pub doors: Vec<Opening>,
    #[serde(default)]
    pub windows: Vec<Opening>,
    #[serde(default)]
    pub furniture: Vec<Furniture>,
}

impl Room {
    /// Returns the polygon as nalgebra points.
    #[must_use]
    pub fn ring(&self) -> Vec<Point2> {
        self.polygon.iter().copied().map(Point2::from).collect()
    }

    /// Returns the bounding box of the polygon.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        compute_bounds(&self.ring())
    }

    /// Iterates doors first, then windows.
    pub fn openings(&self) -> impl Iterator<Item = (OpeningKind, &Opening)> {
        self.doors
            .iter()
            .map(|o| (OpeningKind::Door, o))
            .chain(self.windows.iter().map(|o| (OpeningKind::Window, o)))
    }
}

/// The aggregate root: a whole floor-plan snapshot.
///
/// Plans are replaced wholesale on every revision, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub total_width: f64,
    pub total_height: f64,
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f64,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

fn default_wall_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS
}

impl FloorPlan {
    /// Parses a plan from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Json` if the text is not a structurally valid plan.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| InputError::Json(e).into())
    }

    /// Serializes the plan to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| InputError::Json(e).into())
    }

    /// Returns the plan-space canvas `[0, totalWidth] x [0, totalHeight]`.
    #[must_use]
    pub fn canvas(&self) -> Bounds {
        Bounds::from_origin_size(0.0, 0.0, self.total_width, self.total_height)
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.total_width / self.total_height
    }

    /// Landscape when strictly wider than tall.
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.total_width > self.total_height
    }

    /// Wall thickness, falling back to the default when missing or invalid.
    #[must_use]
    pub fn effective_wall_thickness(&self) -> f64 {
        if self.wall_thickness.is_finite() && self.wall_thickness > 0.0 {
            self.wall_thickness
        } else {
            DEFAULT_WALL_THICKNESS
        }
    }

    /// Looks a room up by id.
    #[must_use]
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}
