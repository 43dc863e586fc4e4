use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where an application currently stands. Closed set; the form only offers these four.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewed,
    #[serde(rename = "Offer Received")]
    OfferReceived,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewed,
        ApplicationStatus::OfferReceived,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewed => "Interviewed",
            ApplicationStatus::OfferReceived => "Offer Received",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown application status '{s}'"))
    }
}

/// The nine per-application preparation steps. All start unchecked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistFlags {
    pub job_analysis: bool,
    pub company_research: bool,
    pub resume_update: bool,
    pub cover_letter_update: bool,
    pub update_linkedin: bool,
    pub application_submission: bool,
    pub follow_up: bool,
    pub interview_preparation: bool,
    pub thank_you: bool,
}

impl ChecklistFlags {
    /// Flags in Schema column order.
    pub fn to_array(self) -> [bool; 9] {
        [
            self.job_analysis,
            self.company_research,
            self.resume_update,
            self.cover_letter_update,
            self.update_linkedin,
            self.application_submission,
            self.follow_up,
            self.interview_preparation,
            self.thank_you,
        ]
    }

    pub fn from_array(flags: [bool; 9]) -> Self {
        let [
            job_analysis,
            company_research,
            resume_update,
            cover_letter_update,
            update_linkedin,
            application_submission,
            follow_up,
            interview_preparation,
            thank_you,
        ] = flags;
        Self {
            job_analysis,
            company_research,
            resume_update,
            cover_letter_update,
            update_linkedin,
            application_submission,
            follow_up,
            interview_preparation,
            thank_you,
        }
    }

    pub fn completed(self) -> usize {
        self.to_array().into_iter().filter(|done| *done).count()
    }
}

/// One tracked application: a row of the job table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub job_title: String,
    pub company_name: String,
    pub application_status: ApplicationStatus,
    pub date_of_application: NaiveDate,
    pub checklist: ChecklistFlags,
    /// Cells of non-Schema columns carried over from an imported file, aligned with
    /// `TableStore::extra_columns`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

/// The add-job form. No emptiness checks are applied to any field.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub id: String,
    pub job_title: String,
    pub company_name: String,
    pub application_status: ApplicationStatus,
    pub date_of_application: NaiveDate,
}
