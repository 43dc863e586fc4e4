// Job application tracker: the session's job table, its CSV import/export, and the generic
// application checklist. Handlers map each page intent onto one operation here.

pub mod checklist;
pub mod csv_io;
pub mod error;
pub mod handlers;
pub mod records;
pub mod schema;
pub mod session;
pub mod table;
pub mod views;
