use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::model::{RawSegment, TrainingPlan};

/// Save a plan to a JSON file.
pub fn save_plan(plan: &TrainingPlan, path: &Path) -> Result<(), LoadError> {
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a plan from a JSON file.
///
/// Accepts either a saved [`TrainingPlan`] or a bare array of segment rows as
/// exported by the backend; the latter becomes a plan named after the file.
pub fn load_plan(path: &Path) -> Result<TrainingPlan, LoadError> {
    let json = std::fs::read_to_string(path)?;
    if json.trim().is_empty() {
        return Err(LoadError::EmptyFile);
    }

    match serde_json::from_str::<Value>(&json)? {
        rows @ Value::Array(_) => {
            let segments: Vec<RawSegment> = serde_json::from_value(rows)?;
            let mut plan = TrainingPlan::new(plan_name_from(path));
            plan.segments = segments;
            Ok(plan)
        }
        value => Ok(serde_json::from_value(value)?),
    }
}

/// Derive a plan name from a file name, dropping `.plan.json` style suffixes.
pub fn plan_name_from(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .and_then(|s| s.split('.').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("Imported Plan")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_name_from() {
        assert_eq!(plan_name_from(Path::new("/tmp/acme.plan.json")), "acme");
        assert_eq!(plan_name_from(Path::new("rows.json")), "rows");
        assert_eq!(plan_name_from(Path::new("/")), "Imported Plan");
    }
}
