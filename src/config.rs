use std::path::{Path, PathBuf};

/// Dataset files looked for in the working directory, in order of preference.
pub const DATASET_CANDIDATES: [&str; 3] = [
    "spacex_launch_dash.csv",
    "spacex_launch_dash.parquet",
    "spacex_launch_dash.json",
];

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

/// Startup settings for the dashboard window.
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub dataset_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Height of the pie chart area in the central panel.
    pub pie_height: f32,
    pub side_panel_width: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            dataset_path: resolve_dataset_path(Path::new("")),
            window_title: DASHBOARD_TITLE.to_string(),
            inner_size: [1280.0, 860.0],
            min_inner_size: [720.0, 480.0],
            pie_height: 280.0,
            side_panel_width: 240.0,
        }
    }
}

/// First candidate that exists in `dir`.  Falls back to the CSV name so a
/// missing dataset is reported against it.
pub fn resolve_dataset_path(dir: &Path) -> PathBuf {
    DATASET_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(DATASET_CANDIDATES[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_is_preferred_over_parquet() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("spacex_launch_dash.parquet"), b"").unwrap();
        assert_eq!(
            resolve_dataset_path(dir.path()),
            dir.path().join("spacex_launch_dash.parquet")
        );

        std::fs::write(dir.path().join("spacex_launch_dash.csv"), b"").unwrap();
        assert_eq!(
            resolve_dataset_path(dir.path()),
            dir.path().join("spacex_launch_dash.csv")
        );
    }

    #[test]
    fn missing_dataset_falls_back_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("spacex_launch_dash.json")).unwrap();
        assert_eq!(
            resolve_dataset_path(dir.path()),
            dir.path().join("spacex_launch_dash.csv")
        );
    }
}
