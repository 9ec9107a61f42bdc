use std::fmt;

use tracing::warn;

use crate::math::polygon_2d::{contains_point, find_ring_edge};
use crate::math::Point2;

use super::plan::{FloorPlan, OpeningKind};

/// A contract violation in plan data.
///
/// These are diagnostics, not errors: the renderer always degrades to a
/// best-effort drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanIssue {
    /// Canvas width or height is not a positive finite number.
    DegenerateCanvas { width: f64, height: f64 },
    /// Room polygon has fewer than 3 vertices.
    DegeneratePolygon { room_id: String, vertices: usize },
    /// Opening endpoints are not two consecutive polygon vertices.
    OpeningOffWall {
        room_id: String,
        kind: OpeningKind,
        index: usize,
    },
    /// Furniture kind has no dedicated symbol.
    UnknownFurniture {
        room_id: String,
        furniture_id: String,
        kind: String,
    },
    /// Label anchor lies outside the room polygon.
    LabelOutside { room_id: String },
    /// Part of the room polygon is off the plan canvas.
    OutsideCanvas { room_id: String },
}

impl fmt::Display for PlanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateCanvas { width, height } => {
                write!(f, "canvas {width}x{height} is degenerate")
            }
            Self::DegeneratePolygon { room_id, vertices } => {
                write!(f, "room {room_id}: polygon has {vertices} vertices, need 3")
            }
            Self::OpeningOffWall {
                room_id,
                kind,
                index,
            } => write!(
                f,
                "room {room_id}: {kind} #{index} does not sit on a polygon edge"
            ),
            Self::UnknownFurniture {
                room_id,
                furniture_id,
                kind,
            } => write!(
                f,
                "room {room_id}: furniture {furniture_id} has unknown type {kind:?}"
            ),
            Self::LabelOutside { room_id } => {
                write!(f, "room {room_id}: label lies outside the polygon")
            }
            Self::OutsideCanvas { room_id } => {
                write!(f, "room {room_id}: polygon extends past the canvas")
            }
        }
    }
}

/// Collects every data-contract violation in a plan.
///
/// Checks shape only; whether the plan is physically buildable (overlaps,
/// codes) is out of scope.
#[must_use]
pub fn check_plan(plan: &FloorPlan) -> Vec<PlanIssue> {
    let mut issues = Vec::new();

    let canvas_ok = plan.total_width.is_finite()
        && plan.total_height.is_finite()
        && plan.total_width > 0.0
        && plan.total_height > 0.0;
    if !canvas_ok {
        issues.push(PlanIssue::DegenerateCanvas {
            width: plan.total_width,
            height: plan.total_height,
        });
    }
    let canvas = plan.canvas();

    for room in &plan.rooms {
        let ring = room.ring();

        if ring.len() < 3 {
            issues.push(PlanIssue::DegeneratePolygon {
                room_id: room.id.clone(),
                vertices: ring.len(),
            });
        } else {
            if !contains_point(&ring, &Point2::from(room.label_position)) {
                issues.push(PlanIssue::LabelOutside {
                    room_id: room.id.clone(),
                });
            }
            if canvas_ok && !canvas.encloses(&room.bounds()) {
                issues.push(PlanIssue::OutsideCanvas {
                    room_id: room.id.clone(),
                });
            }
        }

        for kind in [OpeningKind::Door, OpeningKind::Window] {
            let list = match kind {
                OpeningKind::Door => &room.doors,
                OpeningKind::Window => &room.windows,
            };
            for (index, opening) in list.iter().enumerate() {
                let start = Point2::from(opening.wall_start);
                let end = Point2::from(opening.wall_end);
                if find_ring_edge(&ring, &start, &end).is_none() {
                    issues.push(PlanIssue::OpeningOffWall {
                        room_id: room.id.clone(),
                        kind,
                        index,
                    });
                }
            }
        }

        for piece in &room.furniture {
            if piece.kind.is_other() {
                issues.push(PlanIssue::UnknownFurniture {
                    room_id: room.id.clone(),
                    furniture_id: piece.id.clone(),
                    kind: piece.kind.to_string(),
                });
            }
        }
    }

    issues
}

/// Runs [`check_plan`] and logs every issue at `warn!`.
///
/// Call once when a plan enters the system; composing and exporting the
/// same snapshot again does not repeat the report.
#[must_use]
pub fn report_plan_issues(plan: &FloorPlan) -> Vec<PlanIssue> {
    let issues = check_plan(plan);
    for issue in &issues {
        warn!(%issue, "rendering degraded plan input");
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::plan::{FurnitureKind, Opening, Point};

    #[test]
    fn sample_plan_reports_only_its_known_quirks() {
        let issues = check_plan(&FloorPlan::sample());
        // The living-room door spans two rooms' walls and the stairs/entry
        // labels sit just above their polygons.
        assert!(issues.contains(&PlanIssue::OpeningOffWall {
            room_id: "room-1".into(),
            kind: OpeningKind::Door,
            index: 0,
        }));
        assert!(issues.contains(&PlanIssue::LabelOutside {
            room_id: "room-3".into()
        }));
        assert!(!issues
            .iter()
            .any(|i| matches!(i, PlanIssue::DegenerateCanvas { .. })));
        assert!(!issues
            .iter()
            .any(|i| matches!(i, PlanIssue::UnknownFurniture { .. })));
    }

    #[test]
    fn flags_degenerate_polygon_and_unknown_furniture() {
        let mut plan = FloorPlan::sample();
        plan.rooms[0].polygon.truncate(2);
        plan.rooms[1].furniture[0].kind = FurnitureKind::from("hot_tub");
        let issues = check_plan(&plan);
        assert!(issues.contains(&PlanIssue::DegeneratePolygon {
            room_id: "room-1".into(),
            vertices: 2,
        }));
        assert!(issues.iter().any(|i| matches!(
            i,
            PlanIssue::UnknownFurniture { kind, .. } if kind == "hot_tub"
        )));
    }

    #[test]
    fn report_returns_what_check_finds() {
        let mut plan = FloorPlan::sample();
        plan.total_width = f64::NAN;
        let reported = report_plan_issues(&plan);
        assert_eq!(reported, check_plan(&plan));
        assert!(matches!(reported[0], PlanIssue::DegenerateCanvas { .. }));
    }

    #[test]
    fn reversed_opening_still_matches_edge() {
        let mut plan = FloorPlan::sample();
        plan.rooms[0].windows = vec![Opening::new(Point::new(60.0, 42.0), Point::new(60.0, 0.0))];
        let issues = check_plan(&plan);
        assert!(!issues.iter().any(|i| matches!(
            i,
            PlanIssue::OpeningOffWall { room_id, kind: OpeningKind::Window, .. } if room_id == "room-1"
        )));
    }

    #[test]
    fn flags_room_past_canvas_and_bad_canvas() {
        let mut plan = FloorPlan::sample();
        plan.rooms[0].polygon[1].x = 80.0;
        assert!(check_plan(&plan).contains(&PlanIssue::OutsideCanvas {
            room_id: "room-1".into()
        }));

        plan.total_height = 0.0;
        let issues = check_plan(&plan);
        assert!(matches!(issues[0], PlanIssue::DegenerateCanvas { .. }));
    }

    #[test]
    fn issues_render_readably() {
        let issue = PlanIssue::OpeningOffWall {
            room_id: "room-1".into(),
            kind: OpeningKind::Door,
            index: 0,
        };
        assert_eq!(
            issue.to_string(),
            "room room-1: door #0 does not sit on a polygon edge"
        );
    }
}
