//! CSV export of the whole roster

use std::io;

use buspro_domain::model::RouteState;
use buspro_types::Result;

pub const CSV_HEADER: [&str; 7] = [
    "Route",
    "Direction",
    "Name",
    "Address",
    "Parent",
    "Contact",
    "Notes",
];

/// Write one row per stop across all four cells, header first
///
/// Fields holding commas, quotes or line breaks are quoted and inner quotes
/// doubled, so free-text notes survive a spreadsheet round trip.
pub fn write_roster_csv<W: io::Write>(state: &RouteState, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for (route, direction, stops) in state.cells() {
        for stop in stops {
            csv.write_record([
                route.label(),
                direction.label(),
                stop.name.as_str(),
                stop.address.as_str(),
                stop.parent_name.as_str(),
                stop.parent_contact.as_str(),
                stop.notes.as_str(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Roster as an in-memory CSV document
pub fn roster_csv_string(state: &RouteState) -> Result<String> {
    let mut buf = Vec::new();
    write_roster_csv(state, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use buspro_domain::model::Stop;
    use buspro_domain::seed::seed_state;
    use buspro_types::{Direction, RouteSlot};

    #[test]
    fn test_header_and_row_count() {
        let csv = roster_csv_string(&seed_state()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Route,Direction,Name,Address,Parent,Contact,Notes");
        assert_eq!(lines.len(), 21);
        assert!(lines[1].starts_with("Morning Route,Go to School,Alex Johnson,"));
        assert!(lines[20].starts_with("Afternoon Route,Back from School,Noah Williams,"));
    }

    #[test]
    fn test_embedded_quotes_and_commas_are_escaped() {
        let mut state = RouteState::default();
        state.cell_mut(RouteSlot::Morning, Direction::ToSchool).push(Stop {
            id: "1".to_string(),
            name: "Ava \"Bug\" Lee".to_string(),
            address: "9 Elm St, Unit 2".to_string(),
            ..Default::default()
        });
        let csv = roster_csv_string(&state).unwrap();
        assert!(csv.contains(r#""Ava ""Bug"" Lee""#));
        assert!(csv.contains(r#""9 Elm St, Unit 2""#));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[2], "Ava \"Bug\" Lee");
        assert_eq!(&row[3], "9 Elm St, Unit 2");
    }

    #[test]
    fn test_empty_state_has_only_header() {
        let csv = roster_csv_string(&RouteState::default()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
