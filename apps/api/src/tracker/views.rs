//! View-models handed to the page renderer, one per menu mode.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job::{ApplicationStatus, JobRecord};
use crate::tracker::checklist::{Progress, SessionChecklist};
use crate::tracker::error::TrackerError;
use crate::tracker::schema::{CHECKLIST_COLUMNS, CHECKLIST_LABELS, REQUIRED_HEADERS};
use crate::tracker::table::TableStore;

pub const SESSION_NOTICE: &str = "Do not forget to download data at the end of the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    Data,
    AddJob,
    UpdateJob,
    Checklist,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub extra_columns: Vec<String>,
    pub records: Vec<JobRecord>,
}

impl From<&TableStore> for TableView {
    fn from(table: &TableStore) -> Self {
        Self {
            columns: REQUIRED_HEADERS.to_vec(),
            extra_columns: table.extra_columns().to_vec(),
            records: table.records().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddJobForm {
    pub status_options: Vec<&'static str>,
    pub default_status: ApplicationStatus,
    pub default_date: NaiveDate,
}

impl AddJobForm {
    pub fn today() -> Self {
        Self {
            status_options: ApplicationStatus::ALL.iter().map(|s| s.as_str()).collect(),
            default_status: ApplicationStatus::default(),
            default_date: Utc::now().date_naive(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItem {
    pub column: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistForm {
    pub id: String,
    pub heading: String,
    pub items: Vec<ChecklistItem>,
}

impl From<&JobRecord> for ChecklistForm {
    fn from(record: &JobRecord) -> Self {
        let items = CHECKLIST_COLUMNS
            .into_iter()
            .zip(CHECKLIST_LABELS)
            .zip(record.checklist.to_array())
            .map(|((column, label), checked)| ChecklistItem {
                column,
                label,
                checked,
            })
            .collect();
        Self {
            id: record.id.clone(),
            heading: format!(
                "Checklist for {} at {}",
                record.job_title, record.company_name
            ),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateJobView {
    pub job_ids: Vec<String>,
    pub selected: Option<ChecklistForm>,
}

impl UpdateJobView {
    /// Selects `id` when given, otherwise the first row (none when the table is empty).
    pub fn build(table: &TableStore, id: Option<&str>) -> Result<Self, TrackerError> {
        let selected = match id {
            Some(id) => Some(table.find(id).ok_or_else(|| TrackerError::NotFound {
                id: id.to_string(),
            })?),
            None => table.records().first(),
        };
        Ok(Self {
            job_ids: table.records().iter().map(|r| r.id.clone()).collect(),
            selected: selected.map(ChecklistForm::from),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskState {
    pub task: &'static str,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistView {
    pub tasks: Vec<TaskState>,
    pub progress: Progress,
    pub completed: Vec<&'static str>,
    pub pending: Vec<&'static str>,
}

impl From<&SessionChecklist> for ChecklistView {
    fn from(checklist: &SessionChecklist) -> Self {
        let (completed, pending) = checklist.partition();
        Self {
            tasks: checklist
                .tasks()
                .map(|(task, done)| TaskState { task, done })
                .collect(),
            progress: checklist.progress(),
            completed,
            pending,
        }
    }
}

/// Everything the renderer needs for one menu mode.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", content = "view", rename_all = "kebab-case")]
pub enum ViewModel {
    Data(TableView),
    AddJob(AddJobForm),
    UpdateJob(UpdateJobView),
    Checklist(ChecklistView),
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    #[serde(flatten)]
    pub view: ViewModel,
    pub notice: &'static str,
}

impl Page {
    pub fn new(view: ViewModel) -> Self {
        Self {
            view,
            notice: SESSION_NOTICE,
        }
    }
}

/// Response body of every state-changing intent: what happened plus the state to redraw.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    pub message: String,
    pub snapshot: T,
}

impl<T> Outcome<T> {
    pub fn new(message: impl Into<String>, snapshot: T) -> Self {
        Self {
            message: message.into(),
            snapshot,
        }
    }
}
