use crate::model::Project;
use std::path::Path;

const HEADER: [&str; 7] = [
    "Name",
    "Description",
    "Type",
    "Deadline",
    "Status",
    "Progress",
    "Created",
];

/// Export projects to a comma-delimited CSV file.
///
/// Columns: Name, Description, Type, Deadline, Status, Progress, Created.
/// Deadlines are formatted as YYYY-MM-DD, creation times as RFC 3339.
/// Returns the number of projects written.
pub fn export_csv(projects: &[Project], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(HEADER)
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for project in projects {
        let deadline = project.deadline.format("%Y-%m-%d").to_string();
        let progress = project.progress.to_string();
        let created = project.created_at.to_rfc3339();
        wtr.write_record([
            project.name.as_str(),
            project.description.as_str(),
            project.kind.label(),
            deadline.as_str(),
            project.status.label(),
            progress.as_str(),
            created.as_str(),
        ])
        .map_err(|e| format!("Failed to write project '{}': {}", project.name, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    tracing::info!(count = projects.len(), path = %path.display(), "exported projects to CSV");
    Ok(projects.len())
}
