// Wed Jan 15 2026 - Alex

use spss::ingest::{IngestCoordinator, MemorySource, SourceStatus, SubmissionSource};
use spss::{Registry, Student};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn roster(test_count: i64, students: &[&str]) -> Arc<Registry> {
    let registry = Registry::shared(test_count);
    for s in students {
        assert!(registry.add_student(s));
    }
    registry
}

fn snapshot_summary(registry: &Registry) -> Vec<(String, Option<Vec<i32>>, usize)> {
    registry
        .snapshot()
        .iter()
        .map(|s: &Student| {
            (
                s.identifier().to_string(),
                s.best_submission().map(<[i32]>::to_vec),
                s.submission_count(),
            )
        })
        .collect()
}

/// One source per group; every student appears in exactly one source.
fn generated_sources(groups: usize, per_group: usize) -> (Vec<String>, Vec<String>) {
    let mut students = Vec::new();
    let mut contents = Vec::new();

    for g in 0..groups {
        let mut text = String::new();
        for s in 0..per_group {
            let id = format!("s{}_{}", g, s);
            for attempt in 0..5i64 {
                let base = (attempt * 7 + s as i64 * 3) % 11;
                text.push_str(&format!("{} {} {} {}\n", id, base, attempt, s));
            }
            students.push(id);
        }
        contents.push(text);
    }

    (students, contents)
}

#[test]
fn test_ingest_all_from_files() {
    let dir = TempDir::new().unwrap();
    let a = write_source(&dir, "a.txt", "amy 5 0 0\namy 0 6 0\n\nbob 1 1 1\n");
    let b = write_source(&dir, "b.txt", "cat 2 2\ncat 2 2 2\nghost 9 9 9\n");
    let missing = dir.path().join("missing.txt");

    let registry = roster(3, &["amy", "bob", "cat"]);
    assert!(registry.ingest_all(&[a, b, missing]));

    assert_eq!(registry.score("amy"), Some(6));
    assert_eq!(registry.submissions_for("amy"), Some(2));
    assert!(registry.is_satisfactory("amy"));
    assert!(!registry.got_extra_credit("amy"));

    assert!(registry.got_extra_credit("bob"));
    assert_eq!(registry.score("cat"), Some(6));
    assert_eq!(registry.submissions_for("cat"), Some(1));

    assert_eq!(registry.total_submissions(), 4);
    assert_eq!(registry.score_or_sentinel("ghost"), -1);
}

#[test]
fn test_ingest_all_empty_list_fails() {
    let registry = roster(3, &["amy"]);
    let none: Vec<PathBuf> = Vec::new();
    assert!(!registry.ingest_all(&none));
    assert_eq!(registry.total_submissions(), 0);
}

#[test]
fn test_report_lists_unreadable_source() {
    let dir = TempDir::new().unwrap();
    let good = write_source(&dir, "good.txt", "amy 1 1\n");
    let bad = dir.path().join("nope.txt");

    let registry = roster(2, &["amy"]);
    let report = IngestCoordinator::new(registry.clone())
        .ingest_paths(&[good, bad])
        .unwrap();

    let failed: Vec<_> = report.failed_sources().collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].source.ends_with("nope.txt"));
    assert!(matches!(failed[0].status, SourceStatus::Unreadable(_)));
    assert_eq!(registry.total_submissions(), 1);
}

#[test]
fn test_concurrent_matches_sequential() {
    let (students, contents) = generated_sources(8, 6);
    let ids: Vec<&str> = students.iter().map(String::as_str).collect();

    let concurrent = roster(3, &ids);
    let sources: Vec<Arc<dyn SubmissionSource>> = contents
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Arc::new(MemorySource::new(format!("src{}", i), text.clone()))
                as Arc<dyn SubmissionSource>
        })
        .collect();
    IngestCoordinator::new(concurrent.clone())
        .ingest(sources)
        .unwrap();

    let sequential = roster(3, &ids);
    for (i, text) in contents.iter().enumerate().rev() {
        let source: Arc<dyn SubmissionSource> =
            Arc::new(MemorySource::new(format!("src{}", i), text.clone()));
        IngestCoordinator::new(sequential.clone())
            .ingest(vec![source])
            .unwrap();
    }

    assert_eq!(snapshot_summary(&concurrent), snapshot_summary(&sequential));
    assert_eq!(concurrent.total_submissions(), 8 * 6 * 5);
}

#[test]
fn test_shared_student_across_sources_counts_every_submission() {
    let registry = roster(2, &["amy"]);
    let sources: Vec<Arc<dyn SubmissionSource>> = (0..16)
        .map(|i| {
            let text = format!("amy {} 0\namy 0 {}\n", i, i + 100);
            Arc::new(MemorySource::new(format!("src{}", i), text)) as Arc<dyn SubmissionSource>
        })
        .collect();

    IngestCoordinator::new(registry.clone())
        .ingest(sources)
        .unwrap();

    assert_eq!(registry.submissions_for("amy"), Some(32));
    assert_eq!(registry.total_submissions(), 32);
    assert_eq!(registry.score("amy"), Some(115));
}
