use crate::model::{Person, Zone};

/// (id, name)
pub const DEFAULT_PEOPLE: &[(&str, &str)] = &[
    ("kdh", "Kim Do-heon"),
    ("rjk", "Ryu Je-kyung"),
    ("byj", "Bang Yo-jeong"),
    ("jih", "Park Ji-hwan"),
    ("pms", "Park Min-seong"),
    ("psm", "Park Sang-min"),
    ("pjy", "Park Jun-young"),
    ("ygw", "Yoon Geon-woo"),
    ("isj", "Lim Seong-jae"),
    ("lss", "Lee Seung-seop"),
    ("lsy", "Lee Seung-yoon"),
    ("chs", "Cho Hyun-seong"),
    ("cse", "Choi Se-in"),
    ("csm", "Choi Seong-min"),
];

/// (id, label, order)
pub const DEFAULT_ZONES: &[(&str, &str, u32)] = &[
    ("zone01", "Gym(1)", 1),
    ("zone02", "Gym(2)", 2),
    ("zone03", "Gym(3)", 3),
    ("zone04", "Gym(4)", 4),
    ("zone05", "Break-room(1)", 5),
    ("zone06", "Break-room(2)", 6),
    ("zone07", "Right-stairs sweep", 7),
    ("zone08", "Right-stairs mop", 8),
    ("zone09", "Left-stairs sweep", 9),
    ("zone10", "Left-stairs mop", 10),
    ("zone11", "Center-stairs sweep", 11),
    ("zone12", "Center-stairs mop", 12),
    ("zone13", "Corridor-2 main-sweep", 13),
    ("zone14", "Corridor-2 right-sweep", 14),
    ("zone15", "Corridor-2 right-mop", 15),
    ("zone16", "Corridor-2 left-sweep", 16),
    ("zone17", "Corridor-2 left-mop", 17),
    ("zone18", "Microwave", 18),
    ("zone19", "Right-dryer", 19),
    ("zone20", "Left-dryer", 20),
    ("zone21", "Shower(1)", 21),
    ("zone22", "Shower(2)", 22),
    ("zone23", "Shower(3)", 23),
    ("zone24", "Restroom-3(1)", 24),
    ("zone25", "Restroom-3(2)", 25),
    ("zone26", "Restroom-3(3)", 26),
];

pub fn default_people() -> Vec<Person> {
    DEFAULT_PEOPLE.iter().map(|(id, name)| Person::new(*id, *name)).collect()
}

pub fn default_zones() -> Vec<Zone> {
    DEFAULT_ZONES
        .iter()
        .map(|(id, label, order)| Zone::new(*id, *label).with_order(*order))
        .collect()
}
