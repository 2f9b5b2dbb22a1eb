//! The record store.
//!
//! Every operation follows the same shape: load the collection from the
//! gateway, apply the logic, and for mutating operations write the whole
//! collection back before returning. Nothing is cached between calls; the
//! store file is the source of truth. Serialization of concurrent callers
//! is the owner's job (the tool layer holds the store behind one mutex).

use crate::core::{NewStudent, Result, StoreError, Student, StudentPatch};
use crate::store::gateway::FileGateway;
use crate::store::stats::CollectionStats;
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

pub struct StudentStore {
    gateway: FileGateway,
}

/// Outcome of a partial update: the record as persisted plus the names of
/// the fields the patch overwrote.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    pub student: Student,
    pub changed: Vec<String>,
}

impl StudentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            gateway: FileGateway::new(path),
        }
    }

    /// Appends a new record with a store-assigned id.
    ///
    /// The duplicate-email check is case-sensitive and runs before anything
    /// is written, so a rejected create leaves the store file untouched.
    /// Ids are derived from the current collection size, which means an id
    /// freed by a deletion can be handed out again.
    pub fn create(&self, new: NewStudent) -> Result<Student> {
        let mut students = self.gateway.load();
        if students.iter().any(|s| s.email == new.email) {
            return Err(StoreError::DuplicateEmail(new.email));
        }
        let student = Student {
            id: students.len() as u64 + 1,
            name: new.name,
            email: new.email,
            age: new.age,
            career: new.career,
            semester: new.semester,
            created_at: Utc::now(),
            updated_at: None,
        };
        students.push(student.clone());
        self.gateway.save(&students)?;
        Ok(student)
    }

    /// Returns the first record with the given id. Read-only.
    pub fn get(&self, id: u64) -> Result<Student> {
        self.gateway
            .load()
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Returns records in insertion order, optionally narrowed to one
    /// career. The filter is an exact match compared case-insensitively;
    /// an empty-string filter matches only empty careers and is distinct
    /// from passing no filter at all.
    pub fn list(&self, career: Option<&str>) -> Vec<Student> {
        let students = self.gateway.load();
        match career {
            Some(filter) => {
                let filter = filter.to_lowercase();
                students
                    .into_iter()
                    .filter(|s| s.career.to_lowercase() == filter)
                    .collect()
            }
            None => students,
        }
    }

    /// Overwrites exactly the fields the patch supplies and stamps
    /// `updated_at`, even when the patch is empty. Email uniqueness is not
    /// re-checked here; see the regression test pinning that behavior.
    pub fn update(&self, id: u64, patch: StudentPatch) -> Result<UpdateOutcome> {
        let mut students = self.gateway.load();
        let student = students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut changed = Vec::new();
        if let Some(name) = patch.name {
            student.name = name;
            changed.push("name".to_string());
        }
        if let Some(email) = patch.email {
            student.email = email;
            changed.push("email".to_string());
        }
        if let Some(age) = patch.age {
            student.age = age;
            changed.push("age".to_string());
        }
        if let Some(career) = patch.career {
            student.career = career;
            changed.push("career".to_string());
        }
        if let Some(semester) = patch.semester {
            student.semester = semester;
            changed.push("semester".to_string());
        }
        student.updated_at = Some(Utc::now());

        let updated = student.clone();
        self.gateway.save(&students)?;
        Ok(UpdateOutcome {
            student: updated,
            changed,
        })
    }

    /// Removes the record with the given id and returns it.
    pub fn delete(&self, id: u64) -> Result<Student> {
        let mut students = self.gateway.load();
        let index = students
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = students.remove(index);
        self.gateway.save(&students)?;
        Ok(removed)
    }

    /// Aggregates the collection. An empty collection is reported as
    /// `EmptyCollection`; the tool layer renders that as a benign answer
    /// rather than a failure.
    pub fn stats(&self) -> Result<CollectionStats> {
        let students = self.gateway.load();
        if students.is_empty() {
            return Err(StoreError::EmptyCollection);
        }
        Ok(CollectionStats::compute(&students))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> StudentStore {
        StudentStore::new(dir.path().join("students.json"))
    }

    fn new_student(email: &str, career: &str) -> NewStudent {
        NewStudent {
            name: "Alice".to_string(),
            email: email.to_string(),
            age: 20,
            career: career.to_string(),
            semester: 1,
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let first = store.create(new_student("a@x.com", "CS")).unwrap();
        let second = store.create(new_student("b@x.com", "CS")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.updated_at.is_none());
        assert_eq!(store.list(None).len(), 2);
    }

    #[test]
    fn duplicate_email_rejected_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let first = store.create(new_student("a@x.com", "CS")).unwrap();
        let err = store.create(new_student("a@x.com", "Math")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(ref email) if email == "a@x.com"));
        let remaining = store.list(None);
        assert_eq!(remaining, vec![first]);
    }

    #[test]
    fn duplicate_email_check_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "CS")).unwrap();
        // Differs only in case, so it is a different email as stored.
        store.create(new_student("A@x.com", "CS")).unwrap();
        assert_eq!(store.list(None).len(), 2);
    }

    #[test]
    fn get_finds_by_id() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let created = store.create(new_student("a@x.com", "CS")).unwrap();
        assert_eq!(store.get(created.id).unwrap(), created);
        assert!(matches!(store.get(99), Err(StoreError::NotFound(99))));
    }

    #[test]
    fn list_filters_career_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "Computer Science")).unwrap();
        store.create(new_student("b@x.com", "Law")).unwrap();
        let matched = store.list(Some("computer science"));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].email, "a@x.com");
        // Exact match, not substring.
        assert!(store.list(Some("computer")).is_empty());
    }

    #[test]
    fn empty_filter_is_not_the_same_as_no_filter() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "")).unwrap();
        store.create(new_student("b@x.com", "CS")).unwrap();
        assert_eq!(store.list(None).len(), 2);
        let unset_career = store.list(Some(""));
        assert_eq!(unset_career.len(), 1);
        assert_eq!(unset_career[0].email, "a@x.com");
    }

    #[test]
    fn update_overwrites_only_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let created = store.create(new_student("a@x.com", "CS")).unwrap();
        let outcome = store
            .update(
                created.id,
                StudentPatch {
                    semester: Some(2),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(outcome.changed, vec!["semester".to_string()]);
        assert_eq!(outcome.student.semester, 2);
        assert_eq!(outcome.student.name, created.name);
        assert_eq!(outcome.student.email, created.email);
        assert_eq!(outcome.student.created_at, created.created_at);
        assert!(outcome.student.updated_at.is_some());
    }

    #[test]
    fn empty_patch_still_stamps_updated_at() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let created = store.create(new_student("a@x.com", "CS")).unwrap();
        let outcome = store.update(created.id, StudentPatch::default()).unwrap();
        assert!(outcome.changed.is_empty());
        assert!(outcome.student.updated_at.is_some());
        let reloaded = store.get(created.id).unwrap();
        assert_eq!(reloaded, outcome.student);
    }

    #[test]
    fn update_to_empty_string_is_a_real_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let created = store.create(new_student("a@x.com", "CS")).unwrap();
        let outcome = store
            .update(
                created.id,
                StudentPatch {
                    career: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(outcome.changed, vec!["career".to_string()]);
        assert_eq!(outcome.student.career, "");
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let err = store.update(7, StudentPatch::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(7)));
    }

    // Regression: update does not re-check email uniqueness, so a patch can
    // introduce a duplicate. Pinned rather than silently fixed.
    #[test]
    fn update_allows_duplicate_email() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "CS")).unwrap();
        let second = store.create(new_student("b@x.com", "CS")).unwrap();
        let outcome = store
            .update(
                second.id,
                StudentPatch {
                    email: Some("a@x.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(outcome.student.email, "a@x.com");
        let duplicates = store
            .list(None)
            .into_iter()
            .filter(|s| s.email == "a@x.com")
            .count();
        assert_eq!(duplicates, 2);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "CS")).unwrap();
        let second = store.create(new_student("b@x.com", "CS")).unwrap();
        let removed = store.delete(second.id).unwrap();
        assert_eq!(removed.email, "b@x.com");
        let remaining = store.list(None);
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|s| s.id != second.id));
    }

    #[test]
    fn delete_missing_id_leaves_collection_alone() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "CS")).unwrap();
        let err = store.delete(42).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
        assert_eq!(store.list(None).len(), 1);
    }

    // Regression: ids come from the collection size, so deleting a non-last
    // record lets a later create collide with a surviving id. Asserted here
    // so the behavior cannot change silently.
    #[test]
    fn id_reuse_after_delete_collides() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "CS")).unwrap();
        store.create(new_student("b@x.com", "CS")).unwrap();
        store.create(new_student("c@x.com", "CS")).unwrap();
        store.delete(1).unwrap();
        let fourth = store.create(new_student("d@x.com", "CS")).unwrap();
        assert_eq!(fourth.id, 3);
        let with_id_3 = store.list(None).into_iter().filter(|s| s.id == 3).count();
        assert_eq!(with_id_3, 2);
    }

    #[test]
    fn stats_on_empty_collection_reports_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(store.stats(), Err(StoreError::EmptyCollection)));
    }

    #[test]
    fn stats_counts_whole_collection() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.create(new_student("a@x.com", "CS")).unwrap();
        store.create(new_student("b@x.com", "CS")).unwrap();
        store.create(new_student("c@x.com", "Law")).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.careers[0].career, "CS");
        assert_eq!(stats.careers[0].count, 2);
        let sum: f64 = stats.careers.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }
}
