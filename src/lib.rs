pub mod domain;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
pub mod view;

pub use error::StoreError;
pub use models::{Course, CourseUpdate, NewCourse, NewNote, Note};
pub use session::{Session, SessionContext};
pub use store::{CourseStore, HttpCourseStore, MemoryCourseStore, StoreConfig};
pub use view::{CourseView, MutationOutcome, Notice, ViewState};
