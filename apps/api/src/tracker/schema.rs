//! The fixed column set of the job table.

pub const ID: &str = "ID";
pub const JOB_TITLE: &str = "Job Title";
pub const COMPANY_NAME: &str = "Company Name";
pub const APPLICATION_STATUS: &str = "Application Status";
pub const DATE_OF_APPLICATION: &str = "Date of Application";

/// Every column a job table must carry, in export order.
pub const REQUIRED_HEADERS: [&str; 14] = [
    ID,
    JOB_TITLE,
    COMPANY_NAME,
    APPLICATION_STATUS,
    DATE_OF_APPLICATION,
    "Job Analysis",
    "Company Research",
    "Resume Update",
    "Cover Letter Update",
    "Update LinkedIn",
    "Application Submission",
    "Follow Up",
    "Interview Preparation",
    "Thank You",
];

/// The nine boolean columns, in the same order as `ChecklistFlags::to_array`.
pub const CHECKLIST_COLUMNS: [&str; 9] = [
    "Job Analysis",
    "Company Research",
    "Resume Update",
    "Cover Letter Update",
    "Update LinkedIn",
    "Application Submission",
    "Follow Up",
    "Interview Preparation",
    "Thank You",
];

/// Form label shown next to each checklist column.
pub const CHECKLIST_LABELS: [&str; 9] = [
    "Analyze Job Role / Profile",
    "Research the Company",
    "Customize Your Resume",
    "Customize Cover Letter",
    "Update LinkedIn",
    "Submit the Application",
    "Prepare for Follow-Up",
    "Interview Preparation",
    "Thank You E-mail",
];

/// Required headers absent from `present`, in Schema order. Extra columns are ignored.
pub fn missing_headers<'a, I>(present: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    REQUIRED_HEADERS
        .iter()
        .filter(|required| !present.clone().into_iter().any(|h| h == **required))
        .map(|required| required.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_columns_are_schema_tail() {
        assert_eq!(&REQUIRED_HEADERS[5..], &CHECKLIST_COLUMNS[..]);
    }

    #[test]
    fn test_no_missing_headers_any_order_with_extras() {
        let mut present: Vec<&str> = REQUIRED_HEADERS.iter().rev().copied().collect();
        present.push("Notes");
        assert!(missing_headers(present.iter().copied()).is_empty());
    }

    #[test]
    fn test_missing_headers_reported_in_schema_order() {
        let present: Vec<&str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|h| *h != "Thank You" && *h != ID)
            .collect();
        assert_eq!(
            missing_headers(present.iter().copied()),
            vec!["ID".to_string(), "Thank You".to_string()]
        );
    }

    #[test]
    fn test_header_match_is_exact() {
        let present = ["id", "Job Title "];
        let missing = missing_headers(present.iter().copied());
        assert_eq!(missing.len(), 14);
    }
}
