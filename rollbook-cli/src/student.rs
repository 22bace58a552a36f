use std::io::{self, BufRead, Write};

use clap::Subcommand;
use colored::Colorize;
use rollbook_lib::{
    EditSession, Error, Result, Roster, RosterView, Student, StudentFilter, StudentForm,
    view::{self, TableLine},
};
use tracing::warn;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every student, grouped by course
    List,
    /// List students matching the given filters
    Filter {
        /// Only this course
        #[arg(long)]
        course: Option<String>,
        /// Only this gender
        #[arg(long)]
        gender: Option<String>,
    },
    /// Add a new student
    Add {
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        course: String,
        /// Subject/score pair, e.g. --mark Math=90; repeatable
        #[arg(long = "mark", value_name = "SUBJECT=SCORE")]
        marks: Vec<String>,
    },
    /// Edit an existing student
    Edit {
        course: String,
        roll_number: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Move the student to a different course
        #[arg(long)]
        new_course: Option<String>,
        /// Replace all marks with the given pairs; repeatable
        #[arg(long = "mark", value_name = "SUBJECT=SCORE")]
        marks: Vec<String>,
    },
    /// Delete a student
    Delete {
        course: String,
        roll_number: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn handle(roster: &Roster, cmd: &Command) -> Result<()> {
    let table = RosterView::new();

    match cmd {
        Command::List => refresh(roster, &table)?,
        Command::Filter { course, gender } => {
            let filter = StudentFilter::new(course.as_deref(), gender.as_deref());
            let ticket = table.begin_refresh();
            table.apply(ticket, roster.filter(&filter)?);
            print_table(&table);
        }
        Command::Add {
            name,
            age,
            gender,
            course,
            marks,
        } => {
            let form = StudentForm {
                name: name.clone(),
                age: age.clone(),
                gender: gender.clone(),
                course: course.clone(),
                marks: mark_pairs(marks),
            };
            roster.submit(&EditSession::Idle, &form.draft()?)?;
            refresh(roster, &table)?;
        }
        Command::Edit {
            course,
            roll_number,
            name,
            age,
            gender,
            new_course,
            marks,
        } => {
            let students = roster.students()?;
            let student = find(&students, course, *roll_number)?;
            let (mut form, session) = StudentForm::edit(student)?;

            if let Some(v) = name {
                form.name = v.clone();
            }
            if let Some(v) = age {
                form.age = v.clone();
            }
            if let Some(v) = gender {
                form.gender = v.clone();
            }
            if let Some(v) = new_course {
                form.course = v.clone();
            }
            if !marks.is_empty() {
                form.marks = mark_pairs(marks);
            }

            roster.submit(&session, &form.draft()?)?;
            refresh(roster, &table)?;
        }
        Command::Delete {
            course,
            roll_number,
            yes,
        } => {
            let confirmed = *yes || confirm_delete(course, *roll_number);
            delete(roster, &table, course, *roll_number, confirmed)?;
        }
    }

    Ok(())
}

fn delete(
    roster: &Roster,
    table: &RosterView,
    course: &str,
    roll_number: i64,
    confirmed: bool,
) -> Result<()> {
    if !confirmed {
        println!("Kept student {roll_number} in {course}.");
        return Ok(());
    }

    roster.remove(course, roll_number)?;
    refresh(roster, table)
}

fn refresh(roster: &Roster, table: &RosterView) -> Result<()> {
    let ticket = table.begin_refresh();
    table.apply(ticket, roster.students()?);
    print_table(table);
    Ok(())
}

fn print_table(table: &RosterView) {
    for line in view::table_lines(&table.sections()) {
        match line {
            TableLine::Heading(s) => println!("{}", s.bold()),
            TableLine::Course(s) => println!("{}", s.cyan().bold()),
            TableLine::Rule(s) | TableLine::Row(s) => println!("{s}"),
        }
    }
}

fn find<'a>(students: &'a [Student], course: &str, roll_number: i64) -> Result<&'a Student> {
    students
        .iter()
        .find(|s| s.course == course && s.roll_number == roll_number)
        .ok_or_else(|| Error::NoSuchStudent {
            course: course.to_string(),
            roll_number,
        })
}

/// Ask on stdin before a delete goes out. An unreadable answer counts as
/// a no, so a closed stdin never deletes anything.
fn confirm_delete(course: &str, roll_number: i64) -> bool {
    print!("Delete student {roll_number} in {course}? [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => confirmed(&answer),
        Err(err) => {
            warn!(%err, "could not read the confirmation answer");
            false
        }
    }
}

fn confirmed(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

fn mark_pairs(args: &[String]) -> Vec<(String, String)> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((subject, score)) => (subject.to_string(), score.to_string()),
            // No '=' means no score; form parsing drops the pair.
            None => (arg.clone(), String::new()),
        })
        .collect()
}
