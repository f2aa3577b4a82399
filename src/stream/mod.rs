//! Cursor-based data sources
//!
//! Every stage of a pipeline implements [`StreamDataSource`]. Leaf sources
//! wrap in-memory data, intermediate sources wrap a parent and transform
//! what it yields, and the stream types in [`crate::lazy`] and
//! [`crate::eager`] sit on top and drive them.

pub mod status;
pub mod core;
pub mod constructors;
pub mod advanced;
pub mod utility;

// Re-export core types
pub use self::status::Pull;
pub use self::core::{calculate_skips, BoxDataSource, StreamDataSource};

// Re-export constructors
pub use constructors::{ArrayStreamDataSource, EmptyDataSource, SequenceDataSource};

// Re-export intermediate stages
pub use advanced::{
    FilteredStreamDataSource, FlatMapStreamDataSource, FlatMapped, MappedStreamDataSource,
    MultiStreamDataSource,
};

pub use utility::InspectStreamDataSource;
