//! Intermediate stages: filter, map, flat_map and concatenation.
//!
//! Each stage owns its parent exclusively, so a pipeline is a singly linked
//! chain of cursors ending in a leaf source. Nothing is computed until a
//! consumer pulls through the last stage.
use std::collections::HashMap;

use log::trace;

use super::constructors::{ArrayStreamDataSource, EmptyDataSource};
use super::core::{calculate_skips, BoxDataSource, StreamDataSource};
use super::status::Pull;

// ================================
// Filter
// ================================

/// Presents only the parent elements accepted by a predicate.
///
/// Verdicts are memoized by absolute parent position, so an element probed
/// by `has_next` or `look_ahead` is not tested again when `next` consumes it.
/// The predicate must give the same answer for the same element.
pub struct FilteredStreamDataSource<S, P>
where
    S: StreamDataSource,
{
    parent: S,
    predicate: P,
    verdicts: HashMap<usize, bool>,
    // parent elements consumed so far
    consumed: usize,
    current: Pull<S::Item>,
}

impl<S, P> FilteredStreamDataSource<S, P>
where
    S: StreamDataSource,
    P: FnMut(&S::Item) -> bool,
{
    pub fn new(parent: S, predicate: P) -> Self {
        Self {
            parent,
            predicate,
            verdicts: HashMap::new(),
            consumed: 0,
            current: Pull::BeforeStream,
        }
    }

    fn accepts(&mut self, position: usize, value: &S::Item) -> bool {
        if let Some(&verdict) = self.verdicts.get(&position) {
            return verdict;
        }
        let verdict = (self.predicate)(value);
        self.verdicts.insert(position, verdict);
        verdict
    }
}

impl<S, P> StreamDataSource for FilteredStreamDataSource<S, P>
where
    S: StreamDataSource,
    S::Item: Clone,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        let mut steps = 1;
        loop {
            match self.parent.look_ahead(steps) {
                Pull::Value(value) => {
                    if self.accepts(self.consumed + steps, &value) {
                        return true;
                    }
                    steps += 1;
                }
                Pull::EndOfStream | Pull::BeforeStream => return false,
            }
        }
    }

    fn next(&mut self) -> Pull<S::Item> {
        while self.parent.has_next() {
            let value = match self.parent.next() {
                Pull::Value(value) => value,
                Pull::EndOfStream | Pull::BeforeStream => break,
            };
            self.consumed += 1;
            let position = self.consumed;
            let accepted = self.accepts(position, &value);
            // positions behind the cursor are only revisited after a reset
            self.verdicts.remove(&position);
            if accepted {
                self.current = Pull::Value(value.clone());
                return Pull::Value(value);
            }
        }
        self.current = Pull::EndOfStream;
        Pull::EndOfStream
    }

    fn look_ahead(&mut self, n: usize) -> Pull<S::Item> {
        if n == 0 {
            return self.current();
        }
        let mut remaining = n;
        let mut steps = 1;
        loop {
            match self.parent.look_ahead(steps) {
                Pull::Value(value) => {
                    if self.accepts(self.consumed + steps, &value) {
                        remaining -= 1;
                        if remaining == 0 {
                            return Pull::Value(value);
                        }
                    }
                    steps += 1;
                }
                Pull::EndOfStream | Pull::BeforeStream => return Pull::EndOfStream,
            }
        }
    }

    fn current(&mut self) -> Pull<S::Item> {
        self.current.clone()
    }

    fn reset(&mut self) {
        self.current = Pull::BeforeStream;
        self.verdicts.clear();
        self.consumed = 0;
        self.parent.reset();
    }
}

// ================================
// Map
// ================================

/// Applies a function to every parent element, one to one.
///
/// Cursor control is delegated to the parent; markers pass through unmapped.
pub struct MappedStreamDataSource<S, F, R> {
    parent: S,
    f: F,
    current: Pull<R>,
}

impl<S, F, R> MappedStreamDataSource<S, F, R>
where
    S: StreamDataSource,
    F: FnMut(S::Item) -> R,
{
    pub fn new(parent: S, f: F) -> Self {
        Self { parent, f, current: Pull::BeforeStream }
    }
}

impl<S, F, R> StreamDataSource for MappedStreamDataSource<S, F, R>
where
    S: StreamDataSource,
    F: FnMut(S::Item) -> R,
    R: Clone,
{
    type Item = R;

    fn has_next(&mut self) -> bool {
        self.parent.has_next()
    }

    fn next(&mut self) -> Pull<R> {
        let mapped = self.parent.next().map(&mut self.f);
        self.current = mapped.clone();
        mapped
    }

    fn look_ahead(&mut self, n: usize) -> Pull<R> {
        if n == 0 {
            return self.current();
        }
        self.parent.look_ahead(n).map(&mut self.f)
    }

    fn current(&mut self) -> Pull<R> {
        self.current.clone()
    }

    fn reset(&mut self) {
        self.current = Pull::BeforeStream;
        self.parent.reset();
    }
}

// ================================
// FlatMap
// ================================

/// What a flat-map function expands a single element into
pub enum FlatMapped<'a, T> {
    /// A plain sequence, walked through an [`ArrayStreamDataSource`]
    Values(Vec<T>),
    /// Another data source, drained as is
    Source(BoxDataSource<'a, T>),
}

impl<'a, T> FlatMapped<'a, T>
where
    T: Clone + 'a,
{
    pub fn empty() -> Self {
        FlatMapped::Source(Box::new(EmptyDataSource::new()))
    }

    pub fn source<S>(source: S) -> Self
    where
        S: StreamDataSource<Item = T> + 'a,
    {
        FlatMapped::Source(Box::new(source))
    }

    pub fn into_source(self) -> BoxDataSource<'a, T> {
        match self {
            FlatMapped::Values(values) => Box::new(ArrayStreamDataSource::new(values)),
            FlatMapped::Source(source) => source,
        }
    }
}

impl<'a, T> From<Vec<T>> for FlatMapped<'a, T> {
    fn from(values: Vec<T>) -> Self {
        FlatMapped::Values(values)
    }
}

impl<'a, T: Clone, const N: usize> From<[T; N]> for FlatMapped<'a, T> {
    fn from(values: [T; N]) -> Self {
        FlatMapped::Values(values.to_vec())
    }
}

impl<'a, T> From<Option<T>> for FlatMapped<'a, T> {
    fn from(value: Option<T>) -> Self {
        FlatMapped::Values(value.into_iter().collect())
    }
}

impl<'a, T> From<BoxDataSource<'a, T>> for FlatMapped<'a, T> {
    fn from(source: BoxDataSource<'a, T>) -> Self {
        FlatMapped::Source(source)
    }
}

/// Expands every parent element into a child source and linearizes the
/// children, so all outputs of parent element `i` precede those of `i + 1`.
pub struct FlatMapStreamDataSource<'a, S, F, U> {
    parent: S,
    f: F,
    active: Option<BoxDataSource<'a, U>>,
    // children already drained, kept so a reset can cascade into them
    walked: Vec<BoxDataSource<'a, U>>,
    current: Pull<U>,
}

impl<'a, S, F, U> FlatMapStreamDataSource<'a, S, F, U>
where
    S: StreamDataSource,
    F: FnMut(S::Item) -> FlatMapped<'a, U>,
    U: Clone + 'a,
{
    pub fn new(parent: S, f: F) -> Self {
        Self {
            parent,
            f,
            active: None,
            walked: Vec::new(),
            current: Pull::BeforeStream,
        }
    }

    fn active_has_next(&mut self) -> bool {
        self.active.as_mut().map_or(false, |active| active.has_next())
    }

    /// Pull parent elements until one expands into a non-empty child
    fn activate_next_child(&mut self) -> bool {
        while self.parent.has_next() {
            let element = match self.parent.next() {
                Pull::Value(element) => element,
                Pull::EndOfStream | Pull::BeforeStream => break,
            };
            let child = (self.f)(element).into_source();
            if let Some(previous) = self.active.replace(child) {
                self.walked.push(previous);
            }
            trace!("flat_map switched to child source #{}", self.walked.len() + 1);
            if self.active_has_next() {
                return true;
            }
        }
        false
    }
}

impl<'a, S, F, U> StreamDataSource for FlatMapStreamDataSource<'a, S, F, U>
where
    S: StreamDataSource,
    F: FnMut(S::Item) -> FlatMapped<'a, U>,
    U: Clone + 'a,
{
    type Item = U;

    fn has_next(&mut self) -> bool {
        self.active_has_next() || self.activate_next_child()
    }

    fn next(&mut self) -> Pull<U> {
        let next = if self.has_next() {
            self.active.as_mut().map_or(Pull::EndOfStream, |active| active.next())
        } else {
            Pull::EndOfStream
        };
        self.current = next.clone();
        next
    }

    // Tries the active child first. Otherwise walks the not yet activated
    // parent elements, subtracting what each skipped child would yield.
    // Many empty expansions make this quadratic.
    fn look_ahead(&mut self, n: usize) -> Pull<U> {
        if n == 0 {
            return self.current();
        }
        let mut remaining = n;
        if let Some(active) = self.active.as_mut() {
            let ahead = active.look_ahead(remaining);
            if ahead.is_value() {
                return ahead;
            }
            let skips = calculate_skips(active);
            // a child that cannot answer consistently ends the look-ahead
            if skips >= remaining {
                return Pull::EndOfStream;
            }
            remaining -= skips;
        }
        let mut parent_offset = 1;
        loop {
            let element = match self.parent.look_ahead(parent_offset) {
                Pull::Value(element) => element,
                Pull::EndOfStream | Pull::BeforeStream => return Pull::EndOfStream,
            };
            let mut candidate = (self.f)(element).into_source();
            let ahead = candidate.look_ahead(remaining);
            if ahead.is_value() {
                return ahead;
            }
            let skips = calculate_skips(&mut candidate);
            if skips >= remaining {
                return Pull::EndOfStream;
            }
            remaining -= skips;
            parent_offset += 1;
        }
    }

    fn current(&mut self) -> Pull<U> {
        self.current.clone()
    }

    fn reset(&mut self) {
        trace!("flat_map reset, discarding {} walked child sources", self.walked.len());
        self.parent.reset();
        for mut child in self.walked.drain(..).chain(self.active.take()) {
            child.reset();
        }
        self.current = Pull::BeforeStream;
    }
}

// ================================
// Concat
// ================================

/// Drains several sources one after another
pub struct MultiStreamDataSource<'a, T> {
    sources: Vec<BoxDataSource<'a, T>>,
    selected: usize,
    current: Pull<T>,
}

impl<'a, T> MultiStreamDataSource<'a, T> {
    pub fn new(sources: Vec<BoxDataSource<'a, T>>) -> Self {
        Self { sources, selected: 0, current: Pull::BeforeStream }
    }

    /// Move the selection forward until a source with data is found
    fn select_next(&mut self) -> bool {
        while let Some(source) = self.sources.get_mut(self.selected) {
            if source.has_next() {
                return true;
            }
            if self.selected + 1 >= self.sources.len() {
                return false;
            }
            self.selected += 1;
            trace!("concat switched to source #{}", self.selected);
        }
        false
    }
}

impl<'a, T: Clone> StreamDataSource for MultiStreamDataSource<'a, T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        self.select_next()
    }

    fn next(&mut self) -> Pull<T> {
        let next = if self.select_next() {
            self.sources[self.selected].next()
        } else {
            Pull::EndOfStream
        };
        self.current = next.clone();
        next
    }

    fn look_ahead(&mut self, n: usize) -> Pull<T> {
        if n == 0 {
            return self.current();
        }
        let mut remaining = n;
        for source in self.sources.iter_mut().skip(self.selected) {
            let ahead = source.look_ahead(remaining);
            if ahead.is_value() {
                return ahead;
            }
            let skips = calculate_skips(source);
            if skips >= remaining {
                return Pull::EndOfStream;
            }
            remaining -= skips;
        }
        Pull::EndOfStream
    }

    fn current(&mut self) -> Pull<T> {
        self.current.clone()
    }

    fn reset(&mut self) {
        trace!("concat reset over {} sources", self.sources.len());
        for source in self.sources.iter_mut() {
            source.reset();
        }
        self.selected = 0;
        self.current = Pull::BeforeStream;
    }
}
