pub mod aliases;
pub mod errors;
pub mod mapper;
pub mod model;
pub mod normalize;

pub use errors::SkipReason;
pub use mapper::{map_document, MappedDocument, MapperOptions, RowSkip, RowWarning};
pub use model::{
    Address, CanonicalJobRecord, JobPriority, JobStatus, PassThroughFields, RawRow,
};
pub use normalize::temporal::DatePolicy;

#[cfg(test)]
mod tests;
