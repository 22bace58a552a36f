use indexmap::IndexMap;

use crate::{Error, Result, roster::students::{Student, StudentDraft}};

/// Which record, if any, a form submission should overwrite.
///
/// The id and course are captured when the record is loaded and keep
/// addressing that record even if the form's course field is changed
/// before the submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { id: i64, course: String },
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

/// Raw form fields as entered, before any parsing.
///
/// Marks are an arbitrary-length list of subject/score pairs; the data
/// model puts no cap on how many a student can carry.
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub course: String,
    pub marks: Vec<(String, String)>,
}

impl StudentForm {
    /// Populate the form from an existing record, one pair per mark entry,
    /// in the order the record holds them.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            age: student.age.to_string(),
            gender: student.gender.clone(),
            course: student.course.clone(),
            marks: student
                .mark
                .iter()
                .map(|(subject, score)| (subject.clone(), score.to_string()))
                .collect(),
        }
    }

    /// Begin an edit session addressed at `student`.
    ///
    /// Fails when the record carries no backend id; such a record cannot be
    /// addressed by an update.
    pub fn edit(student: &Student) -> Result<(Self, EditSession)> {
        let Some(id) = student.id else {
            return Err(Error::Unaddressable {
                course: student.course.clone(),
                roll_number: student.roll_number,
            });
        };

        let session = EditSession::Editing {
            id,
            course: student.course.clone(),
        };

        Ok((Self::from_student(student), session))
    }

    /// Clear every field, leaving the form ready for a fresh record.
    /// Pairs with dropping the edit session back to [`EditSession::Idle`].
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Parse the raw fields into a request body.
    ///
    /// String fields are trimmed. A mark pair is kept only when its subject
    /// is non-empty and its score parses as an integer; anything else is
    /// dropped without complaint. A duplicated subject keeps the last score
    /// entered.
    pub fn draft(&self) -> Result<StudentDraft> {
        let age = self.age.trim();
        let age = age
            .parse()
            .map_err(|_| Error::InvalidAge(age.to_string()))?;

        let mut mark = IndexMap::new();
        for (subject, score) in &self.marks {
            let subject = subject.trim();
            if subject.is_empty() {
                continue;
            }
            let Ok(score) = score.trim().parse::<i64>() else {
                continue;
            };
            mark.insert(subject.to_string(), score);
        }

        Ok(StudentDraft {
            name: self.name.trim().to_string(),
            age,
            gender: self.gender.trim().to_string(),
            course: self.course.trim().to_string(),
            mark,
        })
    }
}
