use super::plan::{
    FloorPlan, Furniture, FurnitureKind, Opening, Point, Room, RoomType, DEFAULT_WALL_THICKNESS,
};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> Opening {
    Opening::new(Point::new(x0, y0), Point::new(x1, y1))
}

fn piece(id: &str, kind: FurnitureKind, x: f64, y: f64, w: f64, h: f64, rotation: f64) -> Furniture {
    Furniture {
        id: id.to_owned(),
        kind,
        position: Point::new(x, y),
        width: w,
        height: h,
        rotation,
    }
}

fn room(id: &str, name: &str, room_type: RoomType, polygon: Vec<Point>, label: (f64, f64)) -> Room {
    Room {
        id: id.to_owned(),
        name: name.to_owned(),
        room_type,
        polygon,
        label_position: Point::new(label.0, label.1),
        doors: Vec::new(),
        windows: Vec::new(),
        furniture: Vec::new(),
    }
}

impl FloorPlan {
    /// A small two-zone house used for demos and tests.
    ///
    /// It carries a few real-world quirks on purpose: the living-room door
    /// spans a wall that is split between two rooms, and two labels sit
    /// outside their polygons.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn sample() -> Self {
        use FurnitureKind as F;

        let mut living = room("room-1", "Living Room", RoomType::LivingRoom, rect(0.0, 0.0, 60.0, 42.0), (30.0, 21.0));
        living.doors.push(wall(0.0, 42.0, 0.0, 82.0));
        living.windows.push(wall(60.0, 0.0, 60.0, 42.0));
        living.windows.push(wall(0.0, 0.0, 60.0, 0.0));
        living.furniture = vec![
            piece("f-1", F::Sofa, 25.0, 5.0, 20.0, 8.0, 0.0),
            piece("f-2", F::Armchair, 5.0, 15.0, 10.0, 10.0, 0.0),
            piece("f-3", F::Plant, 5.0, 5.0, 5.0, 5.0, 0.0),
            piece("f-4", F::TvStand, 20.0, 35.0, 25.0, 4.0, 0.0),
        ];

        let mut kitchen = room("room-2", "Kitchen", RoomType::Kitchen, rect(0.0, 42.0, 40.0, 82.0), (20.0, 62.0));
        kitchen.furniture = vec![
            piece("f-5", F::KitchenCounter, 1.0, 50.0, 2.0, 20.0, 0.0),
            piece("f-6", F::KitchenCounter, 3.0, 50.0, 20.0, 2.0, 0.0),
            piece("f-7", F::Sink, 15.0, 53.0, 6.0, 4.0, 0.0),
            piece("f-8", F::Stove, 15.0, 58.0, 6.0, 6.0, 0.0),
            piece("f-9", F::Fridge, 15.0, 70.0, 6.0, 6.0, 0.0),
        ];

        let mut stairs = room("room-3", "Stairs", RoomType::Stairs, rect(40.0, 42.0, 60.0, 82.0), (50.0, 38.0));
        stairs.furniture = vec![
            piece("f-10", F::DiningTable, 45.0, 65.0, 10.0, 10.0, 0.0),
            piece("f-11", F::Chair, 42.0, 68.0, 3.0, 4.0, 90.0),
            piece("f-12", F::Chair, 55.0, 68.0, 3.0, 4.0, -90.0),
        ];

        let mut entry = room("room-4", "Entry", RoomType::Entry, rect(0.0, 82.0, 45.0, 86.0), (22.5, 78.0));
        entry.doors.push(wall(0.0, 86.0, 0.0, 122.0));
        entry.furniture = vec![piece("f-13", F::Plant, 5.0, 75.0, 5.0, 5.0, 0.0)];

        let mut bath = room("room-5", "Bathroom", RoomType::Bathroom, rect(0.0, 86.0, 45.0, 104.0), (22.5, 95.0));
        bath.doors.push(wall(25.0, 104.0, 45.0, 104.0));
        bath.furniture = vec![
            piece("f-14", F::Toilet, 35.0, 88.0, 8.0, 6.0, 0.0),
            piece("f-15", F::Bathtub, 2.0, 88.0, 15.0, 7.0, 0.0),
            piece("f-16", F::Sink, 20.0, 88.0, 10.0, 5.0, 0.0),
        ];

        let mut laundry = room("room-6", "Laundry", RoomType::Closet, rect(0.0, 104.0, 25.0, 122.0), (12.5, 113.0));
        laundry.doors.push(wall(0.0, 104.0, 25.0, 104.0));
        laundry.furniture = vec![
            piece("f-17", F::WashingMachine, 15.0, 106.0, 8.0, 8.0, 0.0),
            piece("f-18", F::Shower, 2.0, 106.0, 10.0, 10.0, 0.0),
        ];

        let mut bedroom = room("room-7", "Bedroom", RoomType::Bedroom, rect(25.0, 104.0, 45.0, 122.0), (35.0, 113.0));
        bedroom.windows.push(wall(45.0, 104.0, 45.0, 122.0));
        bedroom.furniture = vec![piece("f-19", F::Bed, 27.0, 106.0, 16.0, 14.0, 0.0)];

        Self {
            total_width: 60.0,
            total_height: 122.0,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            rooms: vec![living, kitchen, stairs, entry, bath, laundry, bedroom],
        }
    }
}
