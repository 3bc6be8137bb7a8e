//! Route axis: which shift and which leg a stop list belongs to

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Morning or afternoon shift
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
pub enum RouteSlot {
    #[default]
    #[serde(rename = "Morning Route")]
    Morning,
    #[serde(rename = "Afternoon Route")]
    Afternoon,
}

impl RouteSlot {
    pub const ALL: [RouteSlot; 2] = [RouteSlot::Morning, RouteSlot::Afternoon];

    /// Label used in storage, exports and the assistant prompt
    pub fn label(&self) -> &'static str {
        match self {
            RouteSlot::Morning => "Morning Route",
            RouteSlot::Afternoon => "Afternoon Route",
        }
    }
}

impl std::fmt::Display for RouteSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RouteSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "morning route" => Ok(RouteSlot::Morning),
            "afternoon" | "afternoon route" => Ok(RouteSlot::Afternoon),
            other => Err(format!("unknown route: {}", other)),
        }
    }
}

/// Outbound leg to school or inbound leg home
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "Go to School")]
    ToSchool,
    #[serde(rename = "Back from School")]
    FromSchool,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::ToSchool, Direction::FromSchool];

    pub fn label(&self) -> &'static str {
        match self {
            Direction::ToSchool => "Go to School",
            Direction::FromSchool => "Back from School",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to-school" | "to_school" | "go to school" => Ok(Direction::ToSchool),
            "from-school" | "from_school" | "back from school" => Ok(Direction::FromSchool),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}
