//! Interop with asynchronous `futures` streams.
//!
//! The engine itself is synchronous. These adapters let async callers
//! consume a pipeline, and let the engine take over data that arrived
//! through an async stream.

use futures::stream::{self, StreamExt};
use futures_core::Stream as FuturesStream;

use crate::eager::Stream;
use crate::error::{StreamError, StreamResult};
use crate::lazy::LazyStream;
use crate::stream_configuration::BufferConfig;

/// Adapt anything iterable into a `futures` stream.
///
/// Each poll pulls one element synchronously, so the stream is always ready.
pub fn into_async<I>(source: I) -> impl FuturesStream<Item = I::Item>
where
    I: IntoIterator,
{
    stream::iter(source)
}

impl<'a, T> LazyStream<'a, T>
where
    T: Clone + 'a,
{
    pub fn into_async(self) -> impl FuturesStream<Item = T> + 'a {
        into_async(self)
    }
}

impl<T> Stream<T> {
    pub fn into_async(self) -> impl FuturesStream<Item = T> {
        into_async(self)
    }
}

/// Drain a `futures` stream into an eager [`Stream`]
pub async fn collect_async<S>(source: S) -> Stream<S::Item>
where
    S: FuturesStream,
{
    Stream::of(source.collect::<Vec<_>>().await)
}

/// Drain a `futures` stream, failing once it yields more than
/// `config.max_capacity` elements
pub async fn try_collect_async<S>(source: S, config: &BufferConfig) -> StreamResult<Stream<S::Item>>
where
    S: FuturesStream,
{
    config.validate()?;
    let mut source = Box::pin(source);
    let mut values = Vec::with_capacity(config.reserve_hint());
    while let Some(element) = source.next().await {
        if let Some(limit) = config.max_capacity {
            if values.len() >= limit {
                log::debug!("Async materialisation stopped at {} elements", limit);
                return Err(StreamError::CapacityExceeded { limit });
            }
        }
        values.push(element);
    }
    Ok(Stream::of(values))
}
