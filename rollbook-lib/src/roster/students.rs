use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A student record as the backend reports it.
///
/// `avg` and `grade` are computed server-side from the marks; this crate
/// never derives them itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    /// Backend-assigned identifier; absent for records not yet saved.
    pub id: Option<i64>,
    /// Display and lookup key within a course. The backend reassigns these
    /// alphabetically after every mutation, so they are only stable between
    /// fetches.
    pub roll_number: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    /// Grouping key for the rendered table.
    pub course: String,
    /// Subject to score, in the order the backend sent the entries.
    #[serde(default)]
    pub mark: IndexMap<String, i64>,
    pub avg: f64,
    pub grade: String,
}

/// The body of a create or update request.
///
/// Carries no `id`, `roll_number`, `avg`, or `grade`; those are all owned
/// by the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentDraft {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub course: String,
    pub mark: IndexMap<String, i64>,
}

/// Optional course/gender narrowing for the filter endpoint.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    course: Option<String>,
    gender: Option<String>,
}

impl StudentFilter {
    /// Blank or whitespace-only values count as "no filter".
    pub fn new(course: Option<&str>, gender: Option<&str>) -> Self {
        Self {
            course: normalize(course),
            gender: normalize(gender),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.course.is_none() && self.gender.is_none()
    }

    /// Query parameters for the filter endpoint. Empty filters are left out
    /// of the request entirely rather than sent as empty strings.
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(course) = &self.course {
            params.push(("course", course.clone()));
        }
        if let Some(gender) = &self.gender {
            params.push(("gender", gender.clone()));
        }
        params
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filter_fields_are_dropped() {
        let filter = StudentFilter::new(Some("   "), Some(""));
        assert!(filter.is_empty());
        assert!(filter.query().is_empty());
    }

    #[test]
    fn filter_values_are_trimmed() {
        let filter = StudentFilter::new(Some("  CS101 "), None);
        assert_eq!(filter.query(), vec![("course", "CS101".to_string())]);
    }

    #[test]
    fn both_filters_appear_course_first() {
        let filter = StudentFilter::new(Some("CS101"), Some("F"));
        assert_eq!(
            filter.query(),
            vec![
                ("course", "CS101".to_string()),
                ("gender", "F".to_string()),
            ]
        );
    }

    #[test]
    fn student_deserializes_with_missing_marks() {
        let student: Student = serde_json::from_str(
            r#"{"id": 3, "roll_number": 1, "name": "A", "age": 20,
                "gender": "F", "course": "CS101", "avg": 0.0, "grade": "D"}"#,
        )
        .unwrap();

        assert!(student.mark.is_empty());
        assert_eq!(student.id, Some(3));
    }

    #[test]
    fn mark_order_follows_the_backend() {
        let student: Student = serde_json::from_str(
            r#"{"id": 3, "roll_number": 1, "name": "A", "age": 20,
                "gender": "F", "course": "CS101",
                "mark": {"Physics": 70, "Math": 90, "Art": 80},
                "avg": 80.0, "grade": "B"}"#,
        )
        .unwrap();

        let subjects: Vec<&str> = student.mark.keys().map(String::as_str).collect();
        assert_eq!(subjects, vec!["Physics", "Math", "Art"]);
    }
}
