//! Built-in roster used on first run and whenever stored data is unusable

use buspro_types::{Direction, RouteSlot};

use crate::model::{RouteState, Stop};

/// (id, name, address, parent, contact, notes)
const INITIAL_STUDENTS: [(&str, &str, &str, &str, &str, &str); 5] = [
    (
        "1",
        "Alex Johnson",
        "123 Maple Avenue, Springfield",
        "Sarah Johnson",
        "(555) 123-4567",
        "Needs front seat due to motion sickness.",
    ),
    (
        "2",
        "Emma Rodriguez",
        "456 Oak Lane, Springfield",
        "David Rodriguez",
        "(555) 987-6543",
        "Last stop on the route.",
    ),
    (
        "3",
        "Liam Chen",
        "789 Pine Terrace, Springfield",
        "Mei Chen",
        "(555) 456-7890",
        "Sibling of Chloe Chen.",
    ),
    (
        "4",
        "Sophia Smith",
        "101 Cedar Street, Springfield",
        "Michael Smith",
        "(555) 222-3333",
        "Wears bright orange backpack.",
    ),
    (
        "5",
        "Noah Williams",
        "202 Birch Blvd, Springfield",
        "Jessica Williams",
        "(555) 888-9999",
        "Often late to the stop.",
    ),
];

/// Id prefix per cell; each cell gets its own copies so ids never collide
fn id_prefix(route: RouteSlot, direction: Direction) -> &'static str {
    match (route, direction) {
        (RouteSlot::Morning, Direction::ToSchool) => "",
        (RouteSlot::Morning, Direction::FromSchool) => "m-back-",
        (RouteSlot::Afternoon, Direction::ToSchool) => "a-to-",
        (RouteSlot::Afternoon, Direction::FromSchool) => "a-back-",
    }
}

/// The default roster with ids for one cell
pub fn seed_roster(route: RouteSlot, direction: Direction) -> Vec<Stop> {
    let prefix = id_prefix(route, direction);
    INITIAL_STUDENTS
        .iter()
        .map(|(id, name, address, parent, contact, notes)| Stop {
            id: format!("{}{}", prefix, id),
            name: name.to_string(),
            address: address.to_string(),
            parent_name: parent.to_string(),
            parent_contact: contact.to_string(),
            notes: notes.to_string(),
        })
        .collect()
}

/// Four-cell state, each cell seeded with the default roster
pub fn seed_state() -> RouteState {
    let mut state = RouteState::default();
    for route in RouteSlot::ALL {
        for direction in Direction::ALL {
            *state.cell_mut(route, direction) = seed_roster(route, direction);
        }
    }
    state
}
