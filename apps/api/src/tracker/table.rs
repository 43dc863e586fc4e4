use std::collections::HashSet;

use crate::models::job::JobRecord;
use crate::tracker::error::TrackerError;

/// Ordered, in-memory job table for one session. Row order is insertion order and IDs are
/// unique; both hold for every value that can be constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStore {
    records: Vec<JobRecord>,
    /// Non-Schema columns kept from the last import, exported after the Schema columns.
    extra_columns: Vec<String>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from already-typed rows, rejecting the first repeated ID.
    /// Each record's `extra` is padded or truncated to `extra_columns.len()`.
    pub fn from_parts(
        mut records: Vec<JobRecord>,
        extra_columns: Vec<String>,
    ) -> Result<Self, TrackerError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &mut records {
            if !seen.insert(record.id.clone()) {
                return Err(TrackerError::DuplicateId {
                    id: record.id.clone(),
                });
            }
            record.extra.resize(extra_columns.len(), String::new());
        }
        Ok(Self {
            records,
            extra_columns,
        })
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&JobRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut JobRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Appends without checking uniqueness; callers go through `add_record`.
    pub(crate) fn push(&mut self, mut record: JobRecord) -> &JobRecord {
        record.extra.resize(self.extra_columns.len(), String::new());
        let index = self.records.len();
        self.records.push(record);
        &self.records[index]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::job::{ApplicationStatus, ChecklistFlags};

    fn record(id: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            job_title: "Engineer".to_string(),
            company_name: "Acme".to_string(),
            application_status: ApplicationStatus::Applied,
            date_of_application: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            checklist: ChecklistFlags::default(),
            extra: vec![],
        }
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = TableStore::new();
        assert_eq!(table.len(), 0);
        assert!(table.extra_columns().is_empty());
    }

    #[test]
    fn test_from_parts_rejects_duplicate_ids() {
        let err = TableStore::from_parts(vec![record("1"), record("2"), record("1")], vec![])
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateId { id } if id == "1"));
    }

    #[test]
    fn test_from_parts_aligns_extra_cells() {
        let table =
            TableStore::from_parts(vec![record("1")], vec!["Notes".into(), "Link".into()]).unwrap();
        assert_eq!(table.records()[0].extra, vec![String::new(), String::new()]);
    }

    #[test]
    fn test_find_returns_matching_row() {
        let table = TableStore::from_parts(vec![record("a"), record("b")], vec![]).unwrap();
        assert_eq!(table.find("b").map(|r| r.id.as_str()), Some("b"));
        assert!(table.find("c").is_none());
        assert!(table.contains_id("a"));
    }
}
