mod check;
mod source;

pub use check::{CheckOutcome, CheckState, CheckSummary, Extraction};
pub use source::SourceDescriptor;
