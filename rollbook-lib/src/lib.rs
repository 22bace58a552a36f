//! Client-side view layer for a student-records backend.
//!
//! The backend owns the records. This crate fetches them, groups them by
//! course for display, and mediates create/update/delete through a simple
//! form model with an explicit edit session. Averages and grades always
//! come from the backend; this crate only renders them.

use std::path::PathBuf;

use thiserror::Error;

pub mod config;
pub mod roster;
pub mod view;

pub use roster::{EditSession, Roster, Student, StudentDraft, StudentFilter, StudentForm};
pub use view::{CourseSection, RosterView};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to the backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered {operation} with {status}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("no student with roll number {roll_number} in course {course}")]
    NoSuchStudent { course: String, roll_number: i64 },
    #[error("student {roll_number} in {course} has no backend id to address an update")]
    Unaddressable { course: String, roll_number: i64 },
    #[error("cannot submit an update without an active edit session")]
    IdleSession,
    #[error("age {0:?} is not an integer")]
    InvalidAge(String),
    #[error("could not read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
