//! Turning a flat record list into the grouped table the UI shows.

use std::fmt::Write;

use crate::roster::Student;

mod refresh;

pub use refresh::{RefreshTicket, RosterView};

const HEADINGS: [&str; 7] = ["Roll", "Name", "Age", "Gender", "Marks", "Avg", "Grade"];
const COLUMNS: usize = HEADINGS.len();

/// One course's slice of the table: a header followed by its students.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSection {
    pub course: String,
    pub students: Vec<Student>,
}

/// One printable line of the rendered table, tagged so a front end can
/// style course headers differently from data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLine {
    Heading(String),
    Rule(String),
    Course(String),
    Row(String),
}

impl TableLine {
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(s) | Self::Rule(s) | Self::Course(s) | Self::Row(s) => s,
        }
    }
}

/// Group records by course.
///
/// Courses appear in first-occurrence order and students keep the order
/// the backend sent them in; nothing is sorted client-side.
pub fn group_by_course(students: Vec<Student>) -> Vec<CourseSection> {
    let mut sections: Vec<CourseSection> = Vec::new();

    for student in students {
        match sections.iter_mut().find(|s| s.course == student.course) {
            Some(section) => section.students.push(student),
            None => sections.push(CourseSection {
                course: student.course.clone(),
                students: vec![student],
            }),
        }
    }

    sections
}

/// Lay the sections out as table lines: a column heading, then one
/// full-width header per course followed by that course's rows. A student
/// with several marks spans several physical lines, one `subject: score`
/// per line. The table is rebuilt from scratch on every call.
pub fn table_lines(sections: &[CourseSection]) -> Vec<TableLine> {
    let mut widths: [usize; COLUMNS] = HEADINGS.map(str::len);
    for student in sections.iter().flat_map(|s| &s.students) {
        for (width, cell) in widths.iter_mut().zip(cells(student)) {
            for line in &cell {
                *width = (*width).max(line.len());
            }
        }
    }
    let total = widths.iter().sum::<usize>() + (COLUMNS - 1) * 3;

    let mut lines = Vec::new();

    let heading = HEADINGS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    lines.push(TableLine::Heading(heading.trim_end().to_string()));
    lines.push(TableLine::Rule("-".repeat(total)));

    for section in sections {
        let mut header = String::new();
        let _ = write!(header, "{:^total$}", section.course);
        lines.push(TableLine::Course(header.trim_end().to_string()));

        for student in &section.students {
            let cells = cells(student);
            let height = cells.iter().map(Vec::len).max().unwrap_or(1);

            for line_idx in 0..height {
                let row = cells
                    .iter()
                    .zip(widths)
                    .map(|(cell, w)| {
                        let text = cell.get(line_idx).map(String::as_str).unwrap_or("");
                        format!("{text:<w$}")
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");
                lines.push(TableLine::Row(row.trim_end().to_string()));
            }
        }
    }

    lines
}

/// Plain-text rendering of [`table_lines`].
pub fn render_table(sections: &[CourseSection]) -> String {
    let mut out = String::new();
    for line in table_lines(sections) {
        out.push_str(line.text());
        out.push('\n');
    }
    out
}

fn cells(student: &Student) -> [Vec<String>; COLUMNS] {
    let marks: Vec<String> = student
        .mark
        .iter()
        .map(|(subject, score)| format!("{subject}: {score}"))
        .collect();

    [
        vec![student.roll_number.to_string()],
        vec![student.name.clone()],
        vec![student.age.to_string()],
        vec![student.gender.clone()],
        if marks.is_empty() {
            vec![String::new()]
        } else {
            marks
        },
        vec![student.avg.to_string()],
        vec![student.grade.clone()],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(course: &str, roll_number: i64, name: &str, marks: &[(&str, i64)]) -> Student {
        Student {
            id: Some(roll_number),
            roll_number,
            name: name.to_string(),
            age: 20,
            gender: "F".to_string(),
            course: course.to_string(),
            mark: marks
                .iter()
                .map(|(subject, score)| (subject.to_string(), *score))
                .collect(),
            avg: 90.0,
            grade: "A".to_string(),
        }
    }

    #[test]
    fn courses_group_in_first_seen_order() {
        let sections = group_by_course(vec![
            student("EE200", 1, "A", &[]),
            student("CS101", 1, "B", &[]),
            student("EE200", 2, "C", &[]),
            student("CS101", 2, "D", &[]),
        ]);

        let courses: Vec<&str> = sections.iter().map(|s| s.course.as_str()).collect();
        assert_eq!(courses, vec!["EE200", "CS101"]);

        let ee_names: Vec<&str> = sections
            .first()
            .unwrap()
            .students
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(ee_names, vec!["A", "C"]);
    }

    #[test]
    fn one_header_then_rows_in_received_order() {
        let sections = group_by_course(vec![
            student("CS101", 1, "A", &[("Math", 90)]),
            student("CS101", 2, "B", &[]),
        ]);

        let lines = table_lines(&sections);
        let courses: Vec<&TableLine> = lines
            .iter()
            .filter(|l| matches!(l, TableLine::Course(_)))
            .collect();
        assert_eq!(courses.len(), 1);
        assert!(courses.first().unwrap().text().contains("CS101"));

        let rows: Vec<&str> = lines
            .iter()
            .filter(|l| matches!(l, TableLine::Row(_)))
            .map(TableLine::text)
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.first().unwrap().contains("A"));
        assert!(rows.first().unwrap().contains("Math: 90"));
        assert!(rows.last().unwrap().contains("B"));
    }

    #[test]
    fn several_marks_span_several_lines() {
        let sections = group_by_course(vec![student(
            "CS101",
            1,
            "A",
            &[("Math", 90), ("Physics", 70)],
        )]);

        let rendered = render_table(&sections);
        assert!(rendered.contains("Math: 90"));
        assert!(rendered.contains("Physics: 70"));

        // Two physical lines for the one student.
        let rows = table_lines(&sections)
            .iter()
            .filter(|l| matches!(l, TableLine::Row(_)))
            .count();
        assert_eq!(rows, 2);
    }

    #[test]
    fn empty_input_renders_headings_only() {
        let lines = table_lines(&[]);
        assert_eq!(lines.len(), 2);
        assert!(lines.first().unwrap().text().contains("Roll"));
        assert!(lines.first().unwrap().text().contains("Grade"));
    }

    #[test]
    fn avg_and_grade_come_straight_from_the_record() {
        let mut record = student("CS101", 1, "A", &[("Math", 10)]);
        // Deliberately inconsistent with the marks; the client must not
        // recompute.
        record.avg = 99.5;
        record.grade = "Z".to_string();

        let rendered = render_table(&group_by_course(vec![record]));
        assert!(rendered.contains("99.5"));
        assert!(rendered.contains("Z"));
    }
}
