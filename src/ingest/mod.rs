// Wed Jan 14 2026 - Alex

pub mod cancel;
pub mod coordinator;
pub mod error;
pub mod parser;
pub mod source;
pub mod worker;

pub use cancel::CancelToken;
pub use coordinator::{IngestCoordinator, IngestReport};
pub use error::{IngestError, ParseError};
pub use parser::{parse_line, SubmissionLine};
pub use source::{MemorySource, SubmissionSource};
pub use worker::{IngestWorker, LineStats, SourceOutcome, SourceStatus};
