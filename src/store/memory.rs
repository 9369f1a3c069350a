use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain;
use crate::error::StoreError;
use crate::models::{Course, CourseUpdate, NewCourse, NewNote, Note};
use crate::store::CourseStore;

/// In-memory implementation of the remote store contract: server-assigned
/// ids, progress clamped on receipt, `completed` recomputed from progress.
/// Backs the view unit tests and the integration test server.
#[derive(Default)]
pub struct MemoryCourseStore {
    courses: Mutex<Vec<Course>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Course>> {
        self.courses.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_course<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Course) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut courses = self.lock();
        let course = courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        f(course)
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.lock().clone())
    }

    async fn get_course(&self, id: &str) -> Result<Course, StoreError> {
        self.lock()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn add_course(&self, new: NewCourse) -> Result<Course, StoreError> {
        domain::validate_new_course(&new)?;
        let course = Course {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            enrolled: false,
            progress: 0,
            completed: false,
            notes: Vec::new(),
        };
        self.lock().push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: &str, update: CourseUpdate) -> Result<Course, StoreError> {
        self.with_course(id, |course| {
            // name/description only, progress/enrollment/notes are untouched
            course.name = update.name;
            course.description = update.description;
            Ok(course.clone())
        })
    }

    async fn delete_course(&self, id: &str) -> Result<(), StoreError> {
        let mut courses = self.lock();
        let before = courses.len();
        courses.retain(|c| c.id != id);
        if courses.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn enroll(&self, id: &str) -> Result<(), StoreError> {
        // idempotent: enrolling twice is a no-op
        self.with_course(id, |course| {
            course.enrolled = true;
            Ok(())
        })
    }

    async fn update_progress(&self, id: &str, progress: u8) -> Result<(), StoreError> {
        self.with_course(id, |course| {
            course.progress = progress.min(100);
            course.completed = course.progress == 100;
            Ok(())
        })
    }

    async fn add_note(&self, id: &str, note: NewNote) -> Result<(), StoreError> {
        let text = domain::validate_note_text(&note.text)?.to_string();
        self.with_course(id, |course| {
            // the note id is the idempotency key: re-sending the same
            // submission must not append a duplicate
            if course.notes.iter().any(|n| n.id == note.id) {
                return Ok(());
            }
            course.notes.push(Note {
                id: note.id,
                text,
                done: note.done,
            });
            Ok(())
        })
    }

    async fn toggle_note(&self, id: &str, note_id: Uuid) -> Result<(), StoreError> {
        self.with_course(id, |course| {
            let note = course
                .notes
                .iter_mut()
                .find(|n| n.id == note_id)
                .ok_or(StoreError::NotFound)?;
            note.done = !note.done;
            Ok(())
        })
    }

    async fn delete_note(&self, id: &str, note_id: Uuid) -> Result<(), StoreError> {
        self.with_course(id, |course| {
            let before = course.notes.len();
            course.notes.retain(|n| n.id != note_id);
            if course.notes.len() == before {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
    }
}
