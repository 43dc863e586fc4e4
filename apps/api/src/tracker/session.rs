//! Explicit per-session state: one job table and one generic checklist per browser session.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::tracker::checklist::SessionChecklist;
use crate::tracker::csv_io::{export_csv, import_csv};
use crate::tracker::error::TrackerError;
use crate::tracker::table::TableStore;

#[derive(Debug, Clone)]
pub struct Session {
    pub table: TableStore,
    pub checklist: SessionChecklist,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            table: TableStore::new(),
            checklist: SessionChecklist::new(),
            created_at: now,
            last_seen: now,
        }
    }

    /// Replaces the whole table with the uploaded file's rows. On any error the current
    /// table is kept as is.
    pub fn import(&mut self, bytes: &[u8]) -> Result<usize, TrackerError> {
        let table = import_csv(bytes)?;
        let rows = table.len();
        self.table = table;
        Ok(rows)
    }

    pub fn export(&self) -> Result<Vec<u8>, TrackerError> {
        export_csv(&self.table)
    }
}

/// All live sessions, keyed by the id handed out at creation. Idle sessions expire after
/// `ttl` and are dropped on the next access to the store.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    pub fn create(&mut self, now: DateTime<Utc>) -> Uuid {
        self.purge_expired(now);
        let id = Uuid::new_v4();
        self.sessions.insert(id, Session::new(now));
        info!("Session {id} started ({} live)", self.sessions.len());
        id
    }

    /// Looks up a live session and marks it as seen at `now`.
    pub fn get_mut(
        &mut self,
        session_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<&mut Session, TrackerError> {
        self.purge_expired(now);
        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or(TrackerError::SessionNotFound { session_id })?;
        session.last_seen = now;
        Ok(session)
    }

    pub fn end(&mut self, session_id: Uuid) -> Result<(), TrackerError> {
        let session = self
            .sessions
            .remove(&session_id)
            .ok_or(TrackerError::SessionNotFound { session_id })?;
        info!(
            "Session {session_id} ended (started {}, {} job(s) held)",
            session.created_at,
            session.table.len()
        );
        Ok(())
    }

    /// Drops every session idle for longer than the TTL; returns how many were dropped.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions.retain(|_, s| now - s.last_seen <= ttl);
        let purged = before - self.sessions.len();
        if purged > 0 {
            debug!("Purged {purged} idle session(s)");
        }
        purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ID,Job Title,Company Name,Application Status,Date of Application,Job Analysis,Company Research,Resume Update,Cover Letter Update,Update LinkedIn,Application Submission,Follow Up,Interview Preparation,Thank You";

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_import_replaces_table_wholesale() {
        let mut session = Session::new(t0());
        let file = format!(
            "{HEADER}\n1,Engineer,Acme,Applied,2024-01-01,False,False,False,False,False,False,False,False,False\n\
             2,Designer,Globex,Rejected,2024-01-02,True,False,False,False,False,False,False,False,False\n"
        );
        assert_eq!(session.import(file.as_bytes()).unwrap(), 2);

        let smaller = format!(
            "{HEADER}\n9,Analyst,Initech,Interviewed,2024-02-01,False,False,False,False,False,False,False,False,False\n"
        );
        session.import(smaller.as_bytes()).unwrap();
        assert_eq!(session.table.len(), 1);
        assert_eq!(session.table.records()[0].id, "9");
    }

    #[test]
    fn test_failed_import_keeps_prior_table() {
        let mut session = Session::new(t0());
        let file = format!(
            "{HEADER}\n1,Engineer,Acme,Applied,2024-01-01,False,False,False,False,False,False,False,False,False\n"
        );
        session.import(file.as_bytes()).unwrap();
        let before = session.table.clone();

        let err = session.import(b"ID,Job Title\n2,Designer\n").unwrap_err();
        assert!(matches!(err, TrackerError::MissingHeaders { ref missing } if missing.len() == 12));
        assert_eq!(session.table, before);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut store = SessionStore::new(Duration::hours(1));
        let a = store.create(t0());
        let b = store.create(t0());
        store
            .get_mut(a, t0())
            .unwrap()
            .checklist
            .toggle("Update LinkedIn", true)
            .unwrap();
        assert_eq!(store.get_mut(b, t0()).unwrap().checklist.progress().completed, 0);
        assert_eq!(store.get_mut(a, t0()).unwrap().checklist.progress().completed, 1);
    }

    #[test]
    fn test_unknown_session_not_found() {
        let mut store = SessionStore::new(Duration::hours(1));
        let err = store.get_mut(Uuid::new_v4(), t0()).unwrap_err();
        assert!(matches!(err, TrackerError::SessionNotFound { .. }));
    }

    #[test]
    fn test_idle_sessions_expire_and_access_refreshes() {
        let mut store = SessionStore::new(Duration::minutes(30));
        let busy = store.create(t0());
        let idle = store.create(t0());

        store.get_mut(busy, t0() + Duration::minutes(20)).unwrap();
        assert_eq!(store.purge_expired(t0() + Duration::minutes(40)), 1);
        assert!(store.get_mut(busy, t0() + Duration::minutes(45)).is_ok());
        assert!(store.get_mut(idle, t0() + Duration::minutes(45)).is_err());
    }

    #[test]
    fn test_end_session() {
        let mut store = SessionStore::new(Duration::hours(1));
        let id = store.create(t0());
        store.end(id).unwrap();
        assert!(store.sessions.is_empty());
        assert!(store.end(id).is_err());
    }
}
