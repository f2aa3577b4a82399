//! Stream - the eager counterpart of [`LazyStream`](crate::LazyStream)
//!
//! The elements are materialized into a buffer at construction. Every
//! transformation walks the buffer within the current cap and returns a new
//! `Stream` over the result; there is no data source chaining.

use std::cmp::Ordering;

use crate::collectors::{ArrayCollector, Collector};
use crate::error::StreamResult;
use crate::lazy::drain_bounded;
use crate::stream::{FlatMapped, Pull, StreamDataSource};
use crate::stream_configuration::BufferConfig;

/// An eagerly materialized stream
#[derive(Debug, Clone)]
pub struct Stream<T> {
    values: Vec<T>,
    limit: Option<usize>,
    // cursor for the data source view, may exceed the visible length by one
    consumed: usize,
}

impl<T> Stream<T> {
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self { values: values.into_iter().collect(), limit: None, consumed: 0 }
    }

    /// Drain a data source into a new stream.
    ///
    /// The source is pulled until it reports no more elements, so an
    /// infinite source must be capped first; see [`Stream::try_of_data_source`].
    pub fn of_data_source<S>(mut source: S) -> Self
    where
        S: StreamDataSource<Item = T>,
    {
        let mut values = Vec::new();
        while source.has_next() {
            match source.next() {
                Pull::Value(element) => values.push(element),
                Pull::EndOfStream | Pull::BeforeStream => break,
            }
        }
        Self::of(values)
    }

    /// Drain a data source, failing once it yields more than
    /// `config.max_capacity` elements
    pub fn try_of_data_source<S>(mut source: S, config: &BufferConfig) -> StreamResult<Self>
    where
        S: StreamDataSource<Item = T>,
    {
        drain_bounded(&mut source, config).map(Self::of)
    }

    pub fn limits(mut self, max: usize) -> Self {
        self.limit = Some(max);
        self
    }

    /// Number of elements inside the cap
    pub fn len(&self) -> usize {
        self.limit.map_or(self.values.len(), |limit| limit.min(self.values.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The elements inside the cap
    pub fn as_slice(&self) -> &[T] {
        &self.values[..self.len()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    fn into_visible(self) -> std::iter::Take<std::vec::IntoIter<T>> {
        let len = self.len();
        self.values.into_iter().take(len)
    }

    // ================================
    // Transformations
    // ================================

    pub fn map<R, F>(self, f: F) -> Stream<R>
    where
        F: FnMut(T) -> R,
    {
        Stream::of(self.into_visible().map(f))
    }

    pub fn filter<P>(self, mut predicate: P) -> Stream<T>
    where
        P: FnMut(&T) -> bool,
    {
        Stream::of(self.into_visible().filter(|element| predicate(element)))
    }

    /// Expand every element into a sequence or a data source and
    /// concatenate the results in order
    pub fn flat_map<'a, U, R, F>(self, mut f: F) -> Stream<U>
    where
        F: FnMut(T) -> R,
        R: Into<FlatMapped<'a, U>>,
        U: Clone + 'a,
    {
        let mut expanded = Vec::new();
        for element in self.into_visible() {
            let expansion: FlatMapped<'a, U> = f(element).into();
            match expansion {
                FlatMapped::Values(values) => expanded.extend(values),
                FlatMapped::Source(source) => {
                    expanded.extend(Stream::of_data_source(source).values)
                }
            }
        }
        Stream::of(expanded)
    }

    /// Show every element inside the cap, with its index, to `f`. Returning
    /// `false` cuts the stream off right after that element.
    pub fn on_elem<F>(self, mut f: F) -> Self
    where
        F: FnMut(&T, usize) -> bool,
    {
        let halted_at = self.iter().enumerate().position(|(index, element)| !f(element, index));
        match halted_at {
            Some(index) => self.limits(index + 1),
            None => self,
        }
    }

    pub fn concat<I>(self, others: I) -> Stream<T>
    where
        I: IntoIterator<Item = Stream<T>>,
    {
        let mut values: Vec<T> = self.into_visible().collect();
        for other in others {
            values.extend(other.into_visible());
        }
        Stream::of(values)
    }

    pub fn sort_by<F>(self, compare: F) -> Stream<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut values: Vec<T> = self.into_visible().collect();
        values.sort_by(compare);
        Stream::of(values)
    }

    pub fn sort(self) -> Stream<T>
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.into_visible().collect()
    }
}

// ================================
// Terminal operations
// ================================

impl<T: Clone> Stream<T> {
    /// Visit every element until the callback returns `false`
    pub fn each<F>(&mut self, mut f: F)
    where
        F: FnMut(T) -> bool,
    {
        for element in self.as_slice() {
            if !f(element.clone()) {
                break;
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

    pub fn try_for_each<E, F>(&mut self, f: F) -> Result<(), E>
    where
        F: FnMut(T) -> Result<(), E>,
    {
        let result = self.as_slice().iter().cloned().try_for_each(f);
        self.reset();
        result
    }

    pub fn reduce<F>(&mut self, f: F) -> Option<T>
    where
        F: FnMut(T, T) -> T,
    {
        let reduced = self.as_slice().iter().cloned().reduce(f);
        self.reset();
        reduced
    }

    pub fn fold<V, F>(&mut self, seed: V, f: F) -> V
    where
        F: FnMut(V, T) -> V,
    {
        let folded = self.as_slice().iter().cloned().fold(seed, f);
        self.reset();
        folded
    }

    pub fn first(&mut self) -> Option<T> {
        self.reset();
        self.as_slice().first().cloned()
    }

    pub fn last(&mut self) -> Option<T> {
        self.reset();
        self.as_slice().last().cloned()
    }

    pub fn any_match<F>(&mut self, f: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        let matched = self.as_slice().iter().cloned().any(f);
        self.reset();
        matched
    }

    /// `true` for an empty stream, matching [`LazyStream::all_match`](crate::LazyStream::all_match)
    pub fn all_match<F>(&mut self, f: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        let matched = self.as_slice().iter().cloned().all(f);
        self.reset();
        matched
    }

    pub fn none_match<F>(&mut self, f: F) -> bool
    where
        F: FnMut(T) -> bool,
    {
        !self.any_match(f)
    }

    pub fn collect<C>(&mut self, mut collector: C) -> C::Output
    where
        C: Collector<T>,
    {
        for element in self.as_slice() {
            collector.collect(element.clone());
        }
        self.reset();
        collector.final_value()
    }

    pub fn value(&mut self) -> Vec<T> {
        self.collect(ArrayCollector::with_capacity(self.len()))
    }
}

impl<T: Clone> StreamDataSource for Stream<T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        self.consumed < self.len()
    }

    fn next(&mut self) -> Pull<T> {
        if self.consumed <= self.len() {
            self.consumed += 1;
        }
        self.current()
    }

    fn look_ahead(&mut self, n: usize) -> Pull<T> {
        if n == 0 {
            return self.current();
        }
        self.consumed
            .checked_add(n - 1)
            .and_then(|position| self.as_slice().get(position))
            .cloned()
            .into()
    }

    fn current(&mut self) -> Pull<T> {
        if self.consumed == 0 {
            return Pull::BeforeStream;
        }
        self.as_slice().get(self.consumed - 1).cloned().into()
    }

    fn reset(&mut self) {
        self.consumed = 0;
    }
}

// Equality covers the visible elements and the cap, never the cursor
impl<T: PartialEq> PartialEq for Stream<T> {
    fn eq(&self, other: &Self) -> bool {
        self.limit == other.limit && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Stream<T> {}

impl<T> IntoIterator for Stream<T> {
    type Item = T;
    type IntoIter = std::iter::Take<std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_visible()
    }
}

impl<'s, T> IntoIterator for &'s Stream<T> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stream::of(iter)
    }
}

impl<T> From<Vec<T>> for Stream<T> {
    fn from(values: Vec<T>) -> Self {
        Stream::of(values)
    }
}

impl<'a, T> From<Stream<T>> for FlatMapped<'a, T> {
    fn from(stream: Stream<T>) -> Self {
        FlatMapped::Values(stream.into_vec())
    }
}
