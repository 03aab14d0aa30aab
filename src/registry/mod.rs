// Tue Jan 13 2026 - Alex

pub mod error;
pub mod registry;
pub mod student;

pub use error::{StudentError, SubmissionError};
pub use registry::{Registry, RegistryState, UNKNOWN_STUDENT};
pub use student::Student;
