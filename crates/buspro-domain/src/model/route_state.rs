//! The four ordered stop lists, one per (route, direction) cell

use buspro_types::{Direction, RouteSlot};
use serde::{Deserialize, Serialize};

use super::Stop;

/// Both legs of one route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLegs {
    #[serde(rename = "Go to School")]
    pub to_school: Vec<Stop>,
    #[serde(rename = "Back from School")]
    pub from_school: Vec<Stop>,
}

/// Every cell of the roster; list order is drive order
///
/// All four cells exist by construction, so a stored blob missing one fails
/// to deserialize instead of producing a partial state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    #[serde(rename = "Morning Route")]
    pub morning: RouteLegs,
    #[serde(rename = "Afternoon Route")]
    pub afternoon: RouteLegs,
}

impl RouteLegs {
    fn leg(&self, direction: Direction) -> &Vec<Stop> {
        match direction {
            Direction::ToSchool => &self.to_school,
            Direction::FromSchool => &self.from_school,
        }
    }

    fn leg_mut(&mut self, direction: Direction) -> &mut Vec<Stop> {
        match direction {
            Direction::ToSchool => &mut self.to_school,
            Direction::FromSchool => &mut self.from_school,
        }
    }
}

impl RouteState {
    fn legs(&self, route: RouteSlot) -> &RouteLegs {
        match route {
            RouteSlot::Morning => &self.morning,
            RouteSlot::Afternoon => &self.afternoon,
        }
    }

    fn legs_mut(&mut self, route: RouteSlot) -> &mut RouteLegs {
        match route {
            RouteSlot::Morning => &mut self.morning,
            RouteSlot::Afternoon => &mut self.afternoon,
        }
    }

    /// Ordered stops of one cell
    pub fn cell(&self, route: RouteSlot, direction: Direction) -> &[Stop] {
        self.legs(route).leg(direction)
    }

    pub fn cell_mut(&mut self, route: RouteSlot, direction: Direction) -> &mut Vec<Stop> {
        self.legs_mut(route).leg_mut(direction)
    }

    /// All cells in storage order: Morning before Afternoon, to-school first
    pub fn cells(&self) -> impl Iterator<Item = (RouteSlot, Direction, &[Stop])> + '_ {
        RouteSlot::ALL.into_iter().flat_map(move |route| {
            Direction::ALL
                .into_iter()
                .map(move |direction| (route, direction, self.cell(route, direction)))
        })
    }

    /// Whether any cell holds a stop with this id
    pub fn contains_id(&self, id: &str) -> bool {
        self.cells().any(|(_, _, stops)| stops.iter().any(|s| s.id == id))
    }

    pub fn total_stops(&self) -> usize {
        self.cells().map(|(_, _, stops)| stops.len()).sum()
    }
}
