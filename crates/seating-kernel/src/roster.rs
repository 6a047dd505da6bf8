//! Students and the ordered roster that owns them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable student identifier.
///
/// Fresh ids are random UUIDs; ids read from stored layouts are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Contact details, stored as `email` in layout files.
    #[serde(rename = "email", default)]
    pub contact: String,
}

/// Students in insertion order. Order drives deterministic placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a student. Returns `None` if the name is blank after trimming.
    pub fn add(&mut self, name: &str, contact: &str) -> Option<StudentId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = StudentId::generate();
        self.students.push(Student {
            id: id.clone(),
            name: name.to_string(),
            contact: contact.trim().to_string(),
        });
        Some(id)
    }

    /// Append a fully formed record, ignoring duplicates of an existing id.
    pub fn insert(&mut self, student: Student) -> bool {
        if self.contains(&student.id) {
            return false;
        }
        self.students.push(student);
        true
    }

    /// Rename a student, keeping its id. Blank names are refused.
    pub fn rename(&mut self, id: &StudentId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.students.iter_mut().find(|s| &s.id == id) {
            Some(student) => {
                student.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &StudentId) -> Option<Student> {
        let idx = self.students.iter().position(|s| &s.id == id)?;
        Some(self.students.remove(idx))
    }

    pub fn get(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    /// First student whose name matches exactly, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Student> {
        let name = name.trim();
        self.students
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, id: &StudentId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn as_slice(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn clear(&mut self) {
        self.students.clear();
    }
}

impl FromIterator<Student> for Roster {
    fn from_iter<I: IntoIterator<Item = Student>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for student in iter {
            roster.insert(student);
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut roster = Roster::new();
        let id = roster.add("  Ada  ", " ada@example.org ").unwrap();
        assert!(roster.add("   ", "x").is_none());

        let ada = roster.get(&id).unwrap();
        assert_eq!(ada.name, "Ada");
        assert_eq!(ada.contact, "ada@example.org");
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut roster = Roster::new();
        let a = roster.add("A", "").unwrap();
        let b = roster.add("A", "").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rename_keeps_identity() {
        let mut roster = Roster::new();
        let id = roster.add("Bob", "").unwrap();
        assert!(roster.rename(&id, "Robert"));
        assert!(!roster.rename(&id, "  "));
        assert_eq!(roster.get(&id).unwrap().name, "Robert");
        assert!(!roster.rename(&StudentId::from("missing"), "X"));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut roster = Roster::new();
        let a = roster.add("A", "").unwrap();
        let b = roster.add("B", "").unwrap();
        let c = roster.add("C", "").unwrap();

        assert_eq!(roster.remove(&b).unwrap().name, "B");
        assert!(roster.remove(&b).is_none());
        let ids: Vec<_> = roster.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_from_iter_drops_duplicate_ids() {
        let student = Student {
            id: StudentId::from("x1"),
            name: "X".into(),
            contact: String::new(),
        };
        let roster: Roster = vec![student.clone(), student].into_iter().collect();
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_student_serializes_contact_as_email() {
        let json = r#"{"id":"abc1234","name":"Kim"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.contact, "");

        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["email"], "");
        assert_eq!(value["id"], "abc1234");
    }
}
