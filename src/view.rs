//! Course-detail view synchronization.
//!
//! The view never patches its snapshot locally: every successful mutation
//! re-enters `Loading` and re-fetches the whole course, so the store stays
//! the single source of truth. Failed mutations leave the last-known-good
//! snapshot in place and surface a dismissible notice instead.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain;
use crate::error::StoreError;
use crate::models::{Course, NewNote};
use crate::store::CourseStore;

#[derive(Debug, Clone)]
pub enum ViewState {
    Loading,
    Ready {
        course: Course,
        fetched_at: DateTime<Utc>,
    },
    Failed {
        error: StoreError,
    },
}

/// Transient, dismissible error notice shown over a stale snapshot.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The store call succeeded and the view re-fetched.
    Applied,
    /// The store call failed; the stale snapshot stays, a notice was added.
    Failed,
    /// Nothing was sent: invalid input, gating, or a call already in flight.
    Ignored,
}

pub struct CourseView {
    store: Arc<dyn CourseStore>,
    course_id: Mutex<String>,
    state: Mutex<ViewState>,
    notices: Mutex<Vec<Notice>>,
    in_flight: AtomicBool,
    epoch: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CourseView {
    pub fn new(store: Arc<dyn CourseStore>, course_id: impl Into<String>) -> Self {
        Self {
            store,
            course_id: Mutex::new(course_id.into()),
            state: Mutex::new(ViewState::Loading),
            notices: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> ViewState {
        lock(&self.state).clone()
    }

    pub fn course(&self) -> Option<Course> {
        match &*lock(&self.state) {
            ViewState::Ready { course, .. } => Some(course.clone()),
            _ => None,
        }
    }

    pub fn course_id(&self) -> String {
        lock(&self.course_id).clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn dismiss_notices(&self) {
        lock(&self.notices).clear();
    }

    /// Initial load of the course this view was opened on.
    pub async fn load(&self) {
        let id = self.course_id();
        self.navigate(id).await;
    }

    /// Switch the view to another course. Supersedes any response still in
    /// flight for the previous course: late arrivals are discarded.
    pub async fn navigate(&self, course_id: impl Into<String>) {
        let id = course_id.into();
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            *lock(&self.course_id) = id.clone();
            *lock(&self.state) = ViewState::Loading;
        }
        self.fetch(epoch, id).await;
    }

    async fn fetch(&self, epoch: u64, id: String) {
        let result = self.store.get_course(&id).await;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            debug!(course = %id, "discarding response for a superseded view");
            return;
        }
        *lock(&self.state) = match result {
            Ok(course) => ViewState::Ready {
                course,
                fetched_at: Utc::now(),
            },
            Err(error) => {
                warn!(course = %id, %error, "failed to load course");
                ViewState::Failed { error }
            }
        };
    }

    pub async fn enroll(&self) -> MutationOutcome {
        let Some((epoch, id, course)) = self.begin_mutation() else {
            return MutationOutcome::Ignored;
        };
        if !domain::can_enroll(&course) {
            self.in_flight.store(false, Ordering::SeqCst);
            return MutationOutcome::Ignored;
        }
        let result = self.store.enroll(&id).await;
        self.finish_mutation(epoch, id, "enroll", result).await
    }

    /// Direct numeric progress entry. Clamped into [0, 100] before sending.
    pub async fn set_progress(&self, percent: i64) -> MutationOutcome {
        let Some((epoch, id, _)) = self.begin_mutation() else {
            return MutationOutcome::Ignored;
        };
        let percent = domain::clamp_progress(percent);
        let result = self.store.update_progress(&id, percent).await;
        self.finish_mutation(epoch, id, "update progress", result)
            .await
    }

    /// Progress entry from a pointer position on the horizontal track.
    pub async fn set_progress_from_track(
        &self,
        pointer_x: f64,
        track_left: f64,
        track_width: f64,
    ) -> MutationOutcome {
        let percent = domain::percent_from_track(pointer_x, track_left, track_width);
        self.set_progress(percent as i64).await
    }

    /// Blank submissions are rejected before any store call is made.
    pub async fn add_note(&self, text: &str) -> MutationOutcome {
        let Ok(text) = domain::validate_note_text(text) else {
            return MutationOutcome::Ignored;
        };
        let note = NewNote::new(text);
        let Some((epoch, id, _)) = self.begin_mutation() else {
            return MutationOutcome::Ignored;
        };
        let result = self.store.add_note(&id, note).await;
        self.finish_mutation(epoch, id, "add note", result).await
    }

    pub async fn toggle_note(&self, note_id: Uuid) -> MutationOutcome {
        let Some((epoch, id, _)) = self.begin_mutation() else {
            return MutationOutcome::Ignored;
        };
        let result = self.store.toggle_note(&id, note_id).await;
        self.finish_mutation(epoch, id, "update note", result).await
    }

    pub async fn delete_note(&self, note_id: Uuid) -> MutationOutcome {
        let Some((epoch, id, _)) = self.begin_mutation() else {
            return MutationOutcome::Ignored;
        };
        let result = self.store.delete_note(&id, note_id).await;
        self.finish_mutation(epoch, id, "delete note", result).await
    }

    /// A mutation may start only from a Ready snapshot and only while no
    /// other call from this view is in flight.
    fn begin_mutation(&self) -> Option<(u64, String, Course)> {
        let course = match &*lock(&self.state) {
            ViewState::Ready { course, .. } => course.clone(),
            _ => return None,
        };
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("ignoring re-entrant mutation while a call is in flight");
            return None;
        }
        let epoch = self.epoch.load(Ordering::SeqCst);
        Some((epoch, self.course_id(), course))
    }

    async fn finish_mutation(
        &self,
        epoch: u64,
        id: String,
        action: &str,
        result: Result<(), StoreError>,
    ) -> MutationOutcome {
        self.in_flight.store(false, Ordering::SeqCst);
        match result {
            Ok(()) => {
                // full resynchronization, never a local patch
                if self.epoch.load(Ordering::SeqCst) == epoch {
                    *lock(&self.state) = ViewState::Loading;
                    self.fetch(epoch, id).await;
                }
                MutationOutcome::Applied
            }
            Err(error) => {
                warn!(course = %id, action, %error, "mutation failed");
                lock(&self.notices).push(Notice {
                    message: format!("Failed to {action}. Please try again."),
                });
                MutationOutcome::Failed
            }
        }
    }
}
