// chem-domain library entry point
pub mod bioactivity;
pub mod compound;
pub mod error;
pub mod similarity;
pub use bioactivity::BioactivityRecord;
pub use compound::{compare_identifiers, CompoundRecord, PropertyBag};
pub use error::DomainError;
pub use similarity::{Candidate, CandidateSet, CandidateSource, SimilarityResult, SkipReason, SkippedCandidate};
