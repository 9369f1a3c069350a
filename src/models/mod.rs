pub mod course;
pub mod note;

pub use course::{Course, CourseUpdate, NewCourse};
pub use note::{NewNote, Note};
