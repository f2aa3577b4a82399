//! LazyStream - a pull-based pipeline over chained data sources
//!
//! Every transformation wraps the current stream into a new intermediate
//! data source and returns a fresh `LazyStream` over it. Nothing runs until a
//! terminal operation pulls elements through the whole chain, one at a time.

use std::cmp::Ordering;
use std::fmt;

use log::debug;

use crate::collectors::{ArrayCollector, Collector};
use crate::error::{StreamError, StreamResult};
use crate::stream::{
    ArrayStreamDataSource, BoxDataSource, EmptyDataSource, FilteredStreamDataSource,
    FlatMapStreamDataSource, FlatMapped, InspectStreamDataSource, MappedStreamDataSource,
    MultiStreamDataSource, Pull, StreamDataSource,
};
use crate::stream_configuration::BufferConfig;

/// A lazily evaluated stream.
///
/// The stream owns exactly one data source. Terminal operations reset the
/// chain when they finish, so the same stream can be drained again.
pub struct LazyStream<'a, T> {
    source: BoxDataSource<'a, T>,
    limit: Option<usize>,
    // elements pulled through this stream since the last reset
    consumed: usize,
    stopped: bool,
    // `next` returned the end marker since the last reset
    ended: bool,
}

impl<'a, T> fmt::Debug for LazyStream<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyStream")
            .field("limit", &self.limit)
            .field("consumed", &self.consumed)
            .field("stopped", &self.stopped)
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}

// ================================
// Constructors
// ================================

impl<'a, T> LazyStream<'a, T>
where
    T: Clone + 'a,
{
    /// Stream over a fixed sequence of values
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::of_data_source(ArrayStreamDataSource::new(values))
    }

    /// Stream over an arbitrary data source
    pub fn of_data_source<S>(source: S) -> Self
    where
        S: StreamDataSource<Item = T> + 'a,
    {
        Self {
            source: Box::new(source),
            limit: None,
            consumed: 0,
            stopped: false,
            ended: false,
        }
    }

    pub fn empty() -> Self {
        Self::of_data_source(EmptyDataSource::new())
    }

    // ================================
    // Transformations
    // ================================

    /// Cap how many elements terminal operations pull from this stream.
    ///
    /// The cap survives [`reset`](StreamDataSource::reset), so repeated
    /// terminal calls see the same elements.
    pub fn limits(mut self, max: usize) -> Self {
        self.limit = Some(max);
        self
    }

    pub fn filter<P>(self, predicate: P) -> LazyStream<'a, T>
    where
        P: FnMut(&T) -> bool + 'a,
    {
        LazyStream::of_data_source(FilteredStreamDataSource::new(self, predicate))
    }

    pub fn map<R, F>(self, f: F) -> LazyStream<'a, R>
    where
        F: FnMut(T) -> R + 'a,
        R: Clone + 'a,
    {
        LazyStream::of_data_source(MappedStreamDataSource::new(self, f))
    }

    /// Expand every element into a sequence or another data source and
    /// concatenate the results in order
    pub fn flat_map<U, R, F>(self, mut f: F) -> LazyStream<'a, U>
    where
        F: FnMut(T) -> R + 'a,
        R: Into<FlatMapped<'a, U>>,
        U: Clone + 'a,
    {
        LazyStream::of_data_source(FlatMapStreamDataSource::new(self, move |element| {
            f(element).into()
        }))
    }

    /// Observe every element with its index; returning `false` ends the
    /// stream right after that element
    pub fn on_elem<F>(self, f: F) -> LazyStream<'a, T>
    where
        F: FnMut(&T, usize) -> bool + 'a,
    {
        LazyStream::of_data_source(InspectStreamDataSource::new(self, f))
    }

    /// Append other streams, drained one after another after this one
    pub fn concat<I>(self, others: I) -> LazyStream<'a, T>
    where
        I: IntoIterator<Item = LazyStream<'a, T>>,
    {
        let mut sources: Vec<BoxDataSource<'a, T>> = vec![Box::new(self)];
        sources.extend(
            others
                .into_iter()
                .map(|other| Box::new(other) as BoxDataSource<'a, T>),
        );
        LazyStream::of_data_source(MultiStreamDataSource::new(sources))
    }

    /// Drain the remaining elements and restart over them in sorted order
    pub fn sort_by<F>(mut self, compare: F) -> LazyStream<'a, T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut values = self.value();
        values.sort_by(compare);
        LazyStream::of(values)
    }

    pub fn sort(self) -> LazyStream<'a, T>
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp)
    }

    // ================================
    // Terminal operations
    // ================================

    /// Visit every element until the callback returns `false`; the element
    /// that returned `false` is the last one visited
    pub fn each<F>(&mut self, mut f: F)
    where
        F: FnMut(T) -> bool,
    {
        while let Some(element) = self.pull() {
            if !f(element) {
                self.stop();
            }
        }
        self.reset();
    }

    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(T),
    {
        self.each(|element| {
            f(element);
            true
        });
    }

    /// Visit every element until the callback fails; the first error is
    /// returned and nothing after it is pulled
    pub fn try_for_each<E, F>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(T) -> Result<(), E>,
    {
        let mut result = Ok(());
        while let Some(element) = self.pull() {
            if let Err(error) = f(element) {
                result = Err(error);
                break;
            }
        }
        self.reset();
        result
    }

    /// Combine all elements pairwise; `None` for an empty stream
    pub fn reduce<F>(&mut self, mut f: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        let reduced = self.pull().map(|first| {
            let mut acc = first;
            while let Some(element) = self.pull() {
                acc = f(acc, element);
            }
            acc
        });
        self.reset();
        reduced
    }

    pub fn fold<V, F>(&mut self, seed: V, mut f: F) -> V
    where
        F: FnMut(V, T) -> V,
    {
        let mut acc = seed;
        while let Some(element) = self.pull() {
            acc = f(acc, element);
        }
        self.reset();
        acc
    }

    pub fn first(&mut self) -> Option<T> {
        self.reset();
        let first = self.pull();
        self.reset();
        first
    }

    pub fn last(&mut self) -> Option<T> {
        let mut last = None;
        while let Some(element) = self.pull() {
            last = Some(element);
        }
        self.reset();
        last
    }

    pub fn any_match<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        let mut matched = false;
        while let Some(element) = self.pull() {
            if f(element) {
                matched = true;
                break;
            }
        }
        self.reset();
        matched
    }

    pub fn all_match<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        !self.any_match(|element| !f(element))
    }

    pub fn none_match<F>(&mut self, f: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        !self.any_match(f)
    }

    /// Feed every remaining element into `collector` and return its result
    pub fn collect<C>(&mut self, mut collector: C) -> C::Output
    where
        C: Collector<T>,
    {
        while let Some(element) = self.pull() {
            collector.collect(element);
        }
        self.reset();
        collector.final_value()
    }

    /// Materialize the stream into a `Vec`
    pub fn value(&mut self) -> Vec<T> {
        self.collect(ArrayCollector::new())
    }

    /// Materialize the stream, failing once more than
    /// `config.max_capacity` elements would be buffered
    pub fn try_value(&mut self, config: &BufferConfig) -> StreamResult<Vec<T>> {
        let result = drain_bounded(self, config);
        self.reset();
        result
    }

    /// Pull elements until one satisfies `predicate`.
    ///
    /// Unlike the terminal operations this keeps the cursor where it stopped.
    pub fn next_filter<P>(&mut self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        while let Some(element) = self.pull() {
            if predicate(&element) {
                return Some(element);
            }
        }
        None
    }

    /// Borrowing iterator over the remaining elements; the cursor is not
    /// reset afterwards
    pub fn iter(&mut self) -> Iter<'_, 'a, T> {
        Iter { stream: self }
    }

    fn pull(&mut self) -> Option<T> {
        if self.has_next() {
            self.next().value()
        } else {
            None
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

impl<'a, T> LazyStream<'a, T> {
    fn over_limit(&self, ahead: usize) -> bool {
        self.stopped
            || self.limit.map_or(false, |limit| {
                self.consumed.checked_add(ahead).map_or(true, |reach| reach > limit)
            })
    }
}

impl<'a, T> StreamDataSource for LazyStream<'a, T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        !self.over_limit(1) && self.source.has_next()
    }

    fn next(&mut self) -> Pull<T> {
        if self.over_limit(1) {
            self.ended = true;
            return Pull::EndOfStream;
        }
        let next = self.source.next();
        if next.is_value() {
            self.consumed += 1;
        } else {
            self.ended = true;
        }
        next
    }

    fn look_ahead(&mut self, n: usize) -> Pull<T> {
        if n == 0 {
            return self.current();
        }
        if self.over_limit(n) {
            return Pull::EndOfStream;
        }
        self.source.look_ahead(n)
    }

    fn current(&mut self) -> Pull<T> {
        if self.ended {
            return Pull::EndOfStream;
        }
        self.source.current()
    }

    fn reset(&mut self) {
        self.source.reset();
        self.consumed = 0;
        self.stopped = false;
        self.ended = false;
    }
}

/// Drain `source` into a buffer bounded by `config`
pub(crate) fn drain_bounded<S>(source: &mut S, config: &BufferConfig) -> StreamResult<Vec<S::Item>>
where
    S: StreamDataSource + ?Sized,
{
    config.validate()?;
    let mut values = Vec::with_capacity(config.reserve_hint());
    while source.has_next() {
        let element = match source.next() {
            Pull::Value(element) => element,
            Pull::EndOfStream | Pull::BeforeStream => break,
        };
        if let Some(limit) = config.max_capacity {
            if values.len() >= limit {
                debug!("Bounded materialisation stopped at {} elements", limit);
                return Err(StreamError::CapacityExceeded { limit });
            }
        }
        values.push(element);
    }
    Ok(values)
}

// ================================
// Iteration
// ================================

/// Iterator borrowing a [`LazyStream`]
pub struct Iter<'s, 'a, T> {
    stream: &'s mut LazyStream<'a, T>,
}

impl<'s, 'a, T> Iterator for Iter<'s, 'a, T>
where
    T: Clone + 'a,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.stream.pull()
    }
}

/// Owning iterator over a [`LazyStream`]
pub struct IntoIter<'a, T> {
    stream: LazyStream<'a, T>,
}

impl<'a, T> Iterator for IntoIter<'a, T>
where
    T: Clone + 'a,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.stream.pull()
    }
}

impl<'a, T> IntoIterator for LazyStream<'a, T>
where
    T: Clone + 'a,
{
    type Item = T;
    type IntoIter = IntoIter<'a, T>;

    fn into_iter(self) -> IntoIter<'a, T> {
        IntoIter { stream: self }
    }
}

impl<'a, T> FromIterator<T> for LazyStream<'a, T>
where
    T: Clone + 'a,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        LazyStream::of(iter)
    }
}

impl<'a, T> From<LazyStream<'a, T>> for FlatMapped<'a, T>
where
    T: Clone + 'a,
{
    fn from(stream: LazyStream<'a, T>) -> Self {
        FlatMapped::Source(Box::new(stream))
    }
}
