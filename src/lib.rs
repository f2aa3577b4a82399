//! valve-stream - lazy and eager stream pipelines over cursor data sources
//!
//! A [`LazyStream`] is a chain of [`StreamDataSource`] stages that is only
//! evaluated when a terminal operation pulls from it; a [`Stream`] is its
//! eager counterpart over a materialized buffer. Both share the same
//! operator surface and the same [`Collector`] sinks.

pub mod error;
pub mod stream_configuration;

pub mod stream;
pub mod collectors;
pub mod lazy;
pub mod eager;

pub mod pipe;
pub mod async_bridge;

pub use collectors::{
    ArrayAssocArrayCollector, ArrayCollector, AssocArrayCollector, Collector, CountCollector,
    JoinCollector,
};
pub use eager::Stream;
pub use error::{StreamError, StreamResult};
pub use lazy::LazyStream;
pub use stream::{
    ArrayStreamDataSource, FlatMapped, Pull, SequenceDataSource, StreamDataSource,
};
pub use stream_configuration::BufferConfig;
