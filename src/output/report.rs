// Tue Jan 13 2026 - Alex

use crate::registry::Registry;
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRow {
    pub identifier: String,
    pub score: i64,
    pub submissions: usize,
    pub satisfactory: bool,
    pub extra_credit: bool,
    pub best_submission: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub test_count: usize,
    pub student_count: usize,
    pub total_submissions: usize,
    pub students: Vec<StudentRow>,
}

impl Report {
    /// Builds the report from a single locked view of the registry.
    pub fn from_registry(registry: &Registry) -> Self {
        let state = registry.lock();

        let students = state
            .students()
            .map(|student| {
                let id = student.identifier();
                StudentRow {
                    identifier: id.to_string(),
                    score: state.score(id).unwrap_or(0),
                    submissions: student.submission_count(),
                    satisfactory: state.is_satisfactory(id),
                    extra_credit: state.got_extra_credit(id),
                    best_submission: student.best_submission().map(<[i32]>::to_vec),
                }
            })
            .collect();

        Self {
            test_count: state.test_count(),
            student_count: state.student_count(),
            total_submissions: state.total_submissions(),
            students,
        }
    }

    pub fn satisfactory_count(&self) -> usize {
        self.students.iter().filter(|s| s.satisfactory).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(json.as_bytes())?;
        writer.flush()
    }

    pub fn render_text(&self) -> String {
        let width = self
            .students
            .iter()
            .map(|s| s.identifier.len())
            .max()
            .unwrap_or(0)
            .max("Student".len());

        let mut out = String::new();
        out.push_str(&format!(
            "{:<width$}  {:>6}  {:>5}  {:<4}  {:<3}  {}\n",
            "Student",
            "Score",
            "Subs",
            "Sat",
            "EC",
            "Best",
            width = width
        ));
        out.push_str(&format!("{}\n", "-".repeat(width + 36)));

        for row in &self.students {
            let best = row
                .best_submission
                .as_ref()
                .map(|scores| scores.iter().join(" "))
                .unwrap_or_else(|| "-".to_string());
            let satisfactory = if row.satisfactory {
                "yes".green()
            } else {
                "no".red()
            };
            let extra = if row.extra_credit {
                "yes".green()
            } else {
                "no".normal()
            };

            out.push_str(&format!(
                "{:<width$}  {:>6}  {:>5}  {:<4}  {:<3}  {}\n",
                row.identifier,
                row.score,
                row.submissions,
                satisfactory,
                extra,
                best,
                width = width
            ));
        }

        out.push_str(&format!(
            "\n{} students, {} submissions, {} satisfactory ({} tests)\n",
            self.student_count,
            self.total_submissions,
            self.satisfactory_count(),
            self.test_count
        ));
        out
    }
}
