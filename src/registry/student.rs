// Tue Jan 13 2026 - Alex

use serde::Serialize;

/// One student's standing: the best submission seen so far and how many
/// submissions were accepted for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    identifier: String,
    best: Option<Vec<i32>>,
    submissions: usize,
}

impl Student {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            best: None,
            submissions: 0,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn best_submission(&self) -> Option<&[i32]> {
        self.best.as_deref()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions
    }

    pub fn has_submissions(&self) -> bool {
        self.submissions > 0
    }

    /// Folds a validated submission into this record. The caller guarantees
    /// `scores` has the same length as any stored best. Equal sums keep the
    /// earlier submission. Sums are taken in `i64` so no run of `i32` scores
    /// can overflow them.
    pub fn record_submission(&mut self, scores: &[i32]) {
        match self.best.as_mut() {
            None => self.best = Some(scores.to_vec()),
            Some(best) => {
                let (current, incoming) = best.iter().zip(scores).fold(
                    (0i64, 0i64),
                    |(c, n), (&b, &s)| (c + i64::from(b), n + i64::from(s)),
                );

                if incoming > current {
                    log::trace!(
                        "{}: new best {} replaces {}",
                        self.identifier,
                        incoming,
                        current
                    );
                    best.clear();
                    best.extend_from_slice(scores);
                }
            }
        }

        self.submissions += 1;
    }

    pub fn total_score(&self) -> i64 {
        self.best
            .as_ref()
            .map(|best| best.iter().map(|&s| i64::from(s)).sum())
            .unwrap_or(0)
    }

    pub fn passed_tests(&self) -> usize {
        self.best
            .as_ref()
            .map(|best| best.iter().filter(|&&s| s > 0).count())
            .unwrap_or(0)
    }

    pub fn is_passing(&self, test_count: usize) -> bool {
        self.has_submissions() && self.passed_tests() >= test_count / 2
    }

    pub fn earned_extra_credit(&self, test_count: usize) -> bool {
        self.submissions == 1 && self.passed_tests() == test_count
    }
}
