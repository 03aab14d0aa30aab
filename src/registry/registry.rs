// Tue Jan 13 2026 - Alex

use crate::registry::error::{StudentError, SubmissionError};
use crate::registry::student::Student;
use indexmap::IndexMap;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Value reported by the sentinel accessors for blank or unknown students.
pub const UNKNOWN_STUDENT: i64 = -1;

/// Unsynchronized registry contents. Every access from outside the crate
/// goes through [`Registry`], which holds this behind a single lock.
#[derive(Debug)]
pub struct RegistryState {
    test_count: usize,
    students: IndexMap<String, Student>,
    students_added: usize,
    total_submissions: usize,
}

impl RegistryState {
    pub fn new(test_count: i64) -> Self {
        let test_count = if test_count <= 0 { 1 } else { test_count as usize };
        Self {
            test_count,
            students: IndexMap::new(),
            students_added: 0,
            total_submissions: 0,
        }
    }

    pub fn test_count(&self) -> usize {
        self.test_count
    }

    pub fn try_add_student(&mut self, identifier: &str) -> Result<(), StudentError> {
        if identifier.trim().is_empty() {
            return Err(StudentError::Blank);
        }
        if self.has_student(identifier) {
            return Err(StudentError::Duplicate(identifier.to_string()));
        }

        self.students
            .insert(identifier.to_string(), Student::new(identifier));
        self.students_added += 1;
        Ok(())
    }

    pub fn has_student(&self, identifier: &str) -> bool {
        self.students.contains_key(identifier)
    }

    pub fn find_student(&self, identifier: &str) -> Option<&Student> {
        self.students.get(identifier)
    }

    fn find_student_mut(&mut self, identifier: &str) -> Option<&mut Student> {
        self.students.get_mut(identifier)
    }

    /// Checks a submission without touching any state.
    pub fn validate_submission(
        &self,
        identifier: &str,
        scores: &[i32],
    ) -> Result<(), SubmissionError> {
        if scores.is_empty() {
            return Err(SubmissionError::EmptyScores);
        }
        if identifier.is_empty() {
            return Err(SubmissionError::MissingIdentifier);
        }
        if scores.len() != self.test_count {
            return Err(SubmissionError::WrongLength {
                expected: self.test_count,
                actual: scores.len(),
            });
        }
        if !self.has_student(identifier) {
            return Err(SubmissionError::UnknownStudent(identifier.to_string()));
        }
        if let Some((index, &value)) = scores.iter().enumerate().find(|(_, &s)| s < 0) {
            return Err(SubmissionError::NegativeScore { index, value });
        }
        Ok(())
    }

    pub fn try_add_submission(
        &mut self,
        identifier: &str,
        scores: &[i32],
    ) -> Result<(), SubmissionError> {
        self.validate_submission(identifier, scores)?;

        let student = self
            .find_student_mut(identifier)
            .ok_or_else(|| SubmissionError::UnknownStudent(identifier.to_string()))?;
        student.record_submission(scores);
        self.total_submissions += 1;
        Ok(())
    }

    fn known(&self, identifier: &str) -> Option<&Student> {
        if identifier.is_empty() {
            return None;
        }
        self.find_student(identifier)
    }

    pub fn score(&self, identifier: &str) -> Option<i64> {
        self.known(identifier).map(Student::total_score)
    }

    pub fn submissions_for(&self, identifier: &str) -> Option<usize> {
        self.known(identifier).map(Student::submission_count)
    }

    pub fn total_submissions(&self) -> usize {
        self.total_submissions
    }

    pub fn student_count(&self) -> usize {
        self.students_added
    }

    pub fn is_satisfactory(&self, identifier: &str) -> bool {
        self.known(identifier)
            .map(|s| s.is_passing(self.test_count))
            .unwrap_or(false)
    }

    pub fn got_extra_credit(&self, identifier: &str) -> bool {
        self.known(identifier)
            .map(|s| s.has_submissions() && s.earned_extra_credit(self.test_count))
            .unwrap_or(false)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }
}

/// Thread-safe student registry. Each method acquires the registry lock
/// once, so every call is atomic with respect to other threads.
#[derive(Debug)]
pub struct Registry {
    state: Mutex<RegistryState>,
}

impl Registry {
    pub fn new(test_count: i64) -> Self {
        Self {
            state: Mutex::new(RegistryState::new(test_count)),
        }
    }

    pub fn shared(test_count: i64) -> Arc<Self> {
        Arc::new(Self::new(test_count))
    }

    /// Holds the registry lock for the lifetime of the guard. Callers that
    /// need several reads or writes to appear as one step use this.
    pub fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock()
    }

    pub fn test_count(&self) -> usize {
        self.lock().test_count()
    }

    pub fn try_add_student(&self, identifier: &str) -> Result<(), StudentError> {
        let result = self.lock().try_add_student(identifier);
        match &result {
            Ok(()) => log::debug!("Added student {}", identifier),
            Err(e) => log::debug!("Rejected student {:?}: {}", identifier, e),
        }
        result
    }

    pub fn add_student(&self, identifier: &str) -> bool {
        self.try_add_student(identifier).is_ok()
    }

    pub fn has_student(&self, identifier: &str) -> bool {
        self.lock().has_student(identifier)
    }

    pub fn try_add_submission(
        &self,
        identifier: &str,
        scores: &[i32],
    ) -> Result<(), SubmissionError> {
        let result = self.lock().try_add_submission(identifier, scores);
        match &result {
            Ok(()) => log::debug!("Accepted submission for {}: {:?}", identifier, scores),
            Err(e) => log::debug!("Rejected submission for {:?}: {}", identifier, e),
        }
        result
    }

    pub fn add_submission(&self, identifier: &str, scores: &[i32]) -> bool {
        self.try_add_submission(identifier, scores).is_ok()
    }

    /// Ingestion entry point. The existence check and the submission happen
    /// under one lock acquisition; unknown students and empty score lists
    /// are skipped. Returns whether the submission was accepted.
    pub fn merge(&self, identifier: &str, scores: &[i32]) -> bool {
        let mut state = self.lock();
        if !state.has_student(identifier) || scores.is_empty() {
            return false;
        }

        match state.try_add_submission(identifier, scores) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Merge rejected for {}: {}", identifier, e);
                false
            }
        }
    }

    pub fn score(&self, identifier: &str) -> Option<i64> {
        self.lock().score(identifier)
    }

    pub fn submissions_for(&self, identifier: &str) -> Option<usize> {
        self.lock().submissions_for(identifier)
    }

    pub fn score_or_sentinel(&self, identifier: &str) -> i64 {
        self.score(identifier).unwrap_or(UNKNOWN_STUDENT)
    }

    pub fn submissions_or_sentinel(&self, identifier: &str) -> i64 {
        self.submissions_for(identifier)
            .map(|n| n as i64)
            .unwrap_or(UNKNOWN_STUDENT)
    }

    pub fn total_submissions(&self) -> usize {
        self.lock().total_submissions()
    }

    pub fn student_count(&self) -> usize {
        self.lock().student_count()
    }

    pub fn is_satisfactory(&self, identifier: &str) -> bool {
        self.lock().is_satisfactory(identifier)
    }

    pub fn got_extra_credit(&self, identifier: &str) -> bool {
        self.lock().got_extra_credit(identifier)
    }

    /// Copies every student record in insertion order.
    pub fn snapshot(&self) -> Vec<Student> {
        self.lock().students().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(test_count: i64, students: &[&str]) -> Registry {
        let registry = Registry::new(test_count);
        for s in students {
            assert!(registry.add_student(s));
        }
        registry
    }

    #[test]
    fn test_non_positive_test_count_coerced() {
        assert_eq!(Registry::new(0).test_count(), 1);
        assert_eq!(Registry::new(-4).test_count(), 1);
        assert_eq!(Registry::new(7).test_count(), 7);
    }

    #[test]
    fn test_add_student_rejects_blank_and_duplicates() {
        let registry = Registry::new(3);
        assert!(registry.add_student("amy"));
        assert!(!registry.add_student("amy"));
        assert!(!registry.add_student(""));
        assert!(!registry.add_student("   "));
        assert_eq!(registry.student_count(), 1);

        assert_eq!(
            registry.try_add_student("amy"),
            Err(StudentError::Duplicate("amy".to_string()))
        );
        assert_eq!(registry.try_add_student("\t"), Err(StudentError::Blank));
    }

    #[test]
    fn test_identifiers_are_exact_match() {
        let registry = registry_with(3, &["amy"]);
        assert!(registry.add_student("Amy"));
        assert!(registry.add_student(" amy"));
        assert!(registry.has_student("amy"));
        assert!(!registry.has_student("AMY"));
        assert_eq!(registry.student_count(), 3);
    }

    #[test]
    fn test_scenario_best_of_two() {
        let registry = registry_with(3, &["amy"]);
        assert!(registry.add_submission("amy", &[5, 0, 0]));
        assert!(registry.add_submission("amy", &[0, 6, 0]));

        assert_eq!(registry.score("amy"), Some(6));
        assert_eq!(registry.submissions_for("amy"), Some(2));
        assert!(registry.is_satisfactory("amy"));
        assert_eq!(registry.total_submissions(), 2);
    }

    #[test]
    fn test_unknown_student_submission_rejected() {
        let registry = Registry::new(3);
        assert!(!registry.add_submission("unknown", &[1, 2, 3]));
        assert_eq!(registry.total_submissions(), 0);
        assert_eq!(
            registry.try_add_submission("unknown", &[1, 2, 3]),
            Err(SubmissionError::UnknownStudent("unknown".to_string()))
        );
    }

    #[test]
    fn test_validation_order() {
        let registry = registry_with(3, &["amy"]);

        assert_eq!(
            registry.try_add_submission("", &[]),
            Err(SubmissionError::EmptyScores)
        );
        assert_eq!(
            registry.try_add_submission("", &[1, 2, 3]),
            Err(SubmissionError::MissingIdentifier)
        );
        assert_eq!(
            registry.try_add_submission("ghost", &[-1, 2]),
            Err(SubmissionError::WrongLength { expected: 3, actual: 2 })
        );
        assert_eq!(
            registry.try_add_submission("ghost", &[-1, 2, 3]),
            Err(SubmissionError::UnknownStudent("ghost".to_string()))
        );
        assert_eq!(
            registry.try_add_submission("amy", &[1, -2, -3]),
            Err(SubmissionError::NegativeScore { index: 1, value: -2 })
        );
    }

    #[test]
    fn test_rejected_submission_has_no_side_effects() {
        let registry = registry_with(3, &["amy"]);
        assert!(registry.add_submission("amy", &[1, 1, 1]));

        assert!(!registry.add_submission("amy", &[9, 9]));
        assert!(!registry.add_submission("amy", &[9, 9, -1]));
        assert!(!registry.add_submission("amy", &[]));

        assert_eq!(registry.score("amy"), Some(3));
        assert_eq!(registry.submissions_for("amy"), Some(1));
        assert_eq!(registry.total_submissions(), 1);
        assert!(registry.got_extra_credit("amy"));
    }

    #[test]
    fn test_queries_on_unknown_student() {
        let registry = registry_with(2, &["amy"]);

        assert_eq!(registry.score("bob"), None);
        assert_eq!(registry.score(""), None);
        assert_eq!(registry.submissions_for("bob"), None);
        assert_eq!(registry.score_or_sentinel("bob"), UNKNOWN_STUDENT);
        assert_eq!(registry.submissions_or_sentinel(""), UNKNOWN_STUDENT);
        assert!(!registry.is_satisfactory("bob"));
        assert!(!registry.got_extra_credit("bob"));

        assert_eq!(registry.score_or_sentinel("amy"), 0);
        assert_eq!(registry.submissions_or_sentinel("amy"), 0);
    }

    #[test]
    fn test_no_submissions_is_never_satisfactory() {
        let registry = registry_with(1, &["amy"]);
        assert!(!registry.is_satisfactory("amy"));
        assert!(!registry.got_extra_credit("amy"));
    }

    #[test]
    fn test_satisfactory_uses_floor_half() {
        let registry = registry_with(5, &["amy", "bob"]);
        assert!(registry.add_submission("amy", &[1, 1, 0, 0, 0]));
        assert!(registry.add_submission("bob", &[4, 0, 0, 0, 0]));

        assert!(registry.is_satisfactory("amy"));
        assert!(!registry.is_satisfactory("bob"));
    }

    #[test]
    fn test_all_zero_submission_satisfies_single_test() {
        let registry = registry_with(1, &["amy"]);
        assert!(registry.add_submission("amy", &[0]));
        assert!(registry.is_satisfactory("amy"));
        assert!(!registry.got_extra_credit("amy"));
    }

    #[test]
    fn test_extra_credit_lost_after_second_submission() {
        let registry = registry_with(3, &["amy"]);
        assert!(registry.add_submission("amy", &[1, 1, 1]));
        assert!(registry.got_extra_credit("amy"));

        assert!(registry.add_submission("amy", &[1, 1, 1]));
        assert!(!registry.got_extra_credit("amy"));
    }

    #[test]
    fn test_total_matches_sum_of_student_counts() {
        let registry = registry_with(2, &["amy", "bob", "cat"]);
        registry.add_submission("amy", &[1, 2]);
        registry.add_submission("amy", &[3, 2]);
        registry.add_submission("bob", &[0, 0]);
        registry.add_submission("cat", &[1]);

        let per_student: usize = registry
            .snapshot()
            .iter()
            .map(Student::submission_count)
            .sum();
        assert_eq!(per_student, registry.total_submissions());
        assert_eq!(registry.total_submissions(), 3);
    }

    #[test]
    fn test_merge_skips_unknown_and_empty() {
        let registry = registry_with(2, &["amy"]);
        assert!(!registry.merge("bob", &[1, 2]));
        assert!(!registry.merge("amy", &[]));
        assert!(!registry.merge("amy", &[1]));
        assert!(registry.merge("amy", &[1, 2]));
        assert_eq!(registry.total_submissions(), 1);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let registry = registry_with(1, &["zed", "amy", "mo"]);
        let names: Vec<String> = registry
            .snapshot()
            .iter()
            .map(|s| s.identifier().to_string())
            .collect();
        assert_eq!(names, vec!["zed", "amy", "mo"]);
    }
}
