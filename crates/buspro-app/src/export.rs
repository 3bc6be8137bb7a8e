//! Pro-gated CSV export of the roster

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use buspro_domain::model::RouteState;
use buspro_infra::roster_csv::write_roster_csv;
use buspro_types::{Error, Result};
use chrono::NaiveDate;

/// `bus_pro_backup_YYYY-MM-DD.csv`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("bus_pro_backup_{}.csv", date.format("%Y-%m-%d"))
}

/// Default export path in `dir`, named for today's local date
pub fn default_export_path(dir: &Path) -> PathBuf {
    dir.join(backup_file_name(chrono::Local::now().date_naive()))
}

/// Write the roster to `output` if Pro is unlocked
pub fn export_roster(state: &RouteState, is_pro: bool, output: &Path) -> Result<PathBuf> {
    if !is_pro {
        return Err(Error::ProRequired(
            "CSV export is a Pro feature. Unlock it with: buspro upgrade".to_string(),
        ));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output)?;
    write_roster_csv(state, BufWriter::new(file))?;

    tracing::info!(path = %output.display(), stops = state.total_stops(), "roster exported");
    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use buspro_domain::seed::seed_state;
    use tempfile::tempdir;

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(backup_file_name(date), "bus_pro_backup_2024-03-09.csv");
    }

    #[test]
    fn test_export_requires_pro() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let err = export_roster(&seed_state(), false, &path).unwrap_err();
        assert!(matches!(err, Error::ProRequired(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exports").join("out.csv");
        export_roster(&seed_state(), true, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Route,Direction,Name,Address,Parent,Contact,Notes\n"));
        assert_eq!(content.lines().count(), 21);
    }
}
