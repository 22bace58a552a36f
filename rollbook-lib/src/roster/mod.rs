//! Talking to the student-records backend.

use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::{Error, Result, config::CoreConfig};

mod form;
mod students;

pub use form::{EditSession, StudentForm};
pub use students::{Student, StudentDraft, StudentFilter};

/// Central access point for the remote student collection.
///
/// Wraps the backend's REST endpoints behind typed operations. Mutations
/// return nothing useful from the backend, so callers re-fetch afterwards;
/// the backend is the single source of truth for roll numbers, averages,
/// and grades.
#[derive(Debug, Clone)]
pub struct Roster {
    http: Client,
    base_url: String,
}

impl Roster {
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_base_url(&cfg.base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the full collection.
    pub fn students(&self) -> Result<Vec<Student>> {
        debug!("fetching all students");
        let resp = self.http.get(self.endpoint("/view/")).send()?;
        Ok(check(resp, "list")?.json()?)
    }

    /// Fetch the collection narrowed by `filter`.
    pub fn filter(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        debug!(?filter, "fetching filtered students");
        let resp = self
            .http
            .get(self.endpoint("/students/filter"))
            .query(&filter.query())
            .send()?;
        Ok(check(resp, "filter")?.json()?)
    }

    /// Create a new record. The backend assigns the id and slots the roll
    /// number into the course's alphabetical order.
    pub fn add(&self, draft: &StudentDraft) -> Result<()> {
        debug!(course = %draft.course, "inserting student");
        let resp = self
            .http
            .post(self.endpoint("/insert/"))
            .json(draft)
            .send()?;
        check(resp, "create")?;
        Ok(())
    }

    /// Overwrite the record captured in `session` with `draft`.
    ///
    /// The update is addressed by the session's id and course, not by the
    /// draft's course field, so moving a student between courses still
    /// reaches the original record. The backend calls the id parameter
    /// `student_id`; it is the record's `id` field.
    pub fn update(&self, session: &EditSession, draft: &StudentDraft) -> Result<()> {
        let EditSession::Editing { id, course } = session else {
            return Err(Error::IdleSession);
        };

        debug!(id = *id, %course, "updating student");
        let resp = self
            .http
            .put(self.endpoint("/update/"))
            .query(&[("course", course.clone()), ("student_id", id.to_string())])
            .json(draft)
            .send()?;
        check(resp, "update")?;
        Ok(())
    }

    /// Dispatch a form submission: an update when an edit session is
    /// active, an insert otherwise.
    pub fn submit(&self, session: &EditSession, draft: &StudentDraft) -> Result<()> {
        if session.is_editing() {
            self.update(session, draft)
        } else {
            self.add(draft)
        }
    }

    /// Delete the record keyed by course and roll number.
    pub fn remove(&self, course: &str, roll_number: i64) -> Result<()> {
        debug!(%course, roll_number, "deleting student");
        let resp = self
            .http
            .delete(self.endpoint("/delete/"))
            .query(&[
                ("course", course.to_string()),
                ("roll_number", roll_number.to_string()),
            ])
            .send()?;
        check(resp, "delete")?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check(resp: Response, operation: &'static str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::Status { operation, status })
    }
}
