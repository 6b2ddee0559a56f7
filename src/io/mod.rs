pub mod csv_export;
pub mod csv_import;
pub mod file;

use std::path::Path;

use crate::error::LoadError;
use crate::model::TrainingPlan;

pub use file::{load_plan, save_plan};

/// Load a plan from any supported file: CSV by extension, JSON otherwise.
pub fn load_path(path: &Path) -> Result<TrainingPlan, LoadError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "csv" | "txt"))
        .unwrap_or(false);

    if is_csv {
        let (segments, skipped) = csv_import::import_csv(path)?;
        log::info!(
            "Imported {} segment rows from {:?} ({} skipped)",
            segments.len(),
            path,
            skipped
        );
        let mut plan = TrainingPlan::new(file::plan_name_from(path));
        plan.segments = segments;
        Ok(plan)
    } else {
        let plan = load_plan(path)?;
        log::info!("Loaded plan '{}' from {:?}", plan.name, path);
        Ok(plan)
    }
}
