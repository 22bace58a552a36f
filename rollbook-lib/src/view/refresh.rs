use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    roster::Student,
    view::{CourseSection, group_by_course},
};

/// Ticket identifying one refresh. Handed out in issuance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Shared view over the grouped table with in-flight refresh sequencing.
///
/// Every refresh takes a ticket before its fetch goes out, and a
/// completion is applied only if nothing newer has landed already.
/// Overlapping refreshes therefore resolve in issuance order, never in
/// completion order, so a slow early response cannot clobber a newer one.
#[derive(Debug, Clone, Default)]
pub struct RosterView {
    inner: Arc<RwLock<ViewState>>,
}

#[derive(Debug, Default)]
struct ViewState {
    sections: Vec<CourseSection>,
    issued: u64,
    applied: u64,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next refresh slot. Call this before issuing the fetch.
    pub fn begin_refresh(&self) -> RefreshTicket {
        let mut state = self.inner.write();
        state.issued += 1;
        RefreshTicket(state.issued)
    }

    /// Apply a completed refresh.
    ///
    /// Returns `false` when a refresh issued later has already been
    /// applied; the result is discarded and the table keeps the newer data.
    pub fn apply(&self, ticket: RefreshTicket, students: Vec<Student>) -> bool {
        let mut state = self.inner.write();
        if ticket.0 <= state.applied {
            debug!(
                ticket = ticket.0,
                applied = state.applied,
                "discarding stale refresh"
            );
            return false;
        }

        state.applied = ticket.0;
        state.sections = group_by_course(students);
        true
    }

    /// Snapshot of the current grouped table.
    pub fn sections(&self) -> Vec<CourseSection> {
        self.inner.read().sections.clone()
    }
}
