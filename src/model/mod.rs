mod check;
mod plan;
mod query;
mod sample;

pub use check::{check_plan, report_plan_issues, PlanIssue};
pub use plan::{
    FloorPlan, Furniture, FurnitureKind, Opening, OpeningKind, Point, Room, RoomType,
    DEFAULT_WALL_THICKNESS,
};
pub use query::{
    auto_font_size, transform_for, wall_midpoint_and_angle, WallAnchor, DEFAULT_LABEL_SIZE,
};
