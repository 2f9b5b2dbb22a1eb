//! Aggregate statistics over the student collection.

use crate::core::Student;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CareerStats {
    pub career: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionStats {
    pub total: usize,
    pub average_age: f64,
    pub careers: Vec<CareerStats>,
}

impl CollectionStats {
    /// Callers guarantee a non-empty slice; `StudentStore::stats` reports
    /// the empty case before getting here.
    pub(crate) fn compute(students: &[Student]) -> Self {
        let total = students.len();
        let average_age = students.iter().map(|s| s.age as f64).sum::<f64>() / total as f64;

        // Counts keyed by exact career value, kept in first-encountered
        // order so the stable sort below breaks ties in collection order.
        let mut counts: Vec<(String, usize)> = Vec::new();
        for student in students {
            match counts.iter_mut().find(|(career, _)| *career == student.career) {
                Some((_, n)) => *n += 1,
                None => counts.push((student.career.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let careers = counts
            .into_iter()
            .map(|(career, count)| CareerStats {
                career,
                count,
                percentage: count as f64 * 100.0 / total as f64,
            })
            .collect();

        Self {
            total,
            average_age,
            careers,
        }
    }
}
