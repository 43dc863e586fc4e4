//! Add-job and update-checklist operations against a session's job table.

use tracing::{info, warn};

use crate::models::job::{ChecklistFlags, JobRecord, NewJob};
use crate::tracker::error::TrackerError;
use crate::tracker::table::TableStore;

impl TableStore {
    /// Appends a new application with every checklist flag unchecked.
    /// Fails without touching the table when the ID is already taken.
    pub fn add_record(&mut self, job: NewJob) -> Result<&JobRecord, TrackerError> {
        if self.contains_id(&job.id) {
            warn!("Rejected add: ID '{}' already exists", job.id);
            return Err(TrackerError::DuplicateId { id: job.id });
        }

        info!("Adding job '{}' ({} at {})", job.id, job.job_title, job.company_name);
        Ok(self.push(JobRecord {
            id: job.id,
            job_title: job.job_title,
            company_name: job.company_name,
            application_status: job.application_status,
            date_of_application: job.date_of_application,
            checklist: ChecklistFlags::default(),
            extra: Vec::new(),
        }))
    }

    /// Overwrites all nine checklist flags of the record with `id`. Descriptive fields are
    /// left as they are.
    pub fn update_checklist(
        &mut self,
        id: &str,
        flags: ChecklistFlags,
    ) -> Result<&JobRecord, TrackerError> {
        let Some(record) = self.find_mut(id) else {
            warn!("Rejected checklist update: ID '{id}' not found");
            return Err(TrackerError::NotFound { id: id.to_string() });
        };

        record.checklist = flags;
        info!(
            "Updated checklist for '{id}': {}/9 complete",
            flags.completed()
        );
        Ok(record)
    }
}
