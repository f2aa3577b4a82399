//! Leaf data sources: fixed arrays, integer sequences and the empty source
use std::marker::PhantomData;
use std::sync::Arc;

use super::core::StreamDataSource;
use super::status::Pull;

// ================================
// ArrayStreamDataSource
// ================================

/// Cursor over a fixed, read-only snapshot of values.
///
/// The backing array is shared, so cloning the source or building several
/// sources over the same `Arc` is cheap; each instance keeps its own cursor.
#[derive(Debug, Clone)]
pub struct ArrayStreamDataSource<T> {
    values: Arc<[T]>,
    // number of elements handed out by `next`, may exceed len by one
    consumed: usize,
}

impl<T> ArrayStreamDataSource<T> {
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_shared(values.into_iter().collect::<Vec<_>>().into())
    }

    /// Build a cursor over an already shared snapshot
    pub fn from_shared(values: Arc<[T]>) -> Self {
        Self { values, consumed: 0 }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Clone> StreamDataSource for ArrayStreamDataSource<T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        self.consumed < self.values.len()
    }

    fn next(&mut self) -> Pull<T> {
        if self.consumed > self.values.len() {
            return Pull::EndOfStream;
        }
        self.consumed += 1;
        self.current()
    }

    fn look_ahead(&mut self, n: usize) -> Pull<T> {
        if n == 0 {
            return self.current();
        }
        let position = match self.consumed.checked_add(n - 1) {
            Some(position) => position,
            None => return Pull::EndOfStream,
        };
        match self.values.get(position) {
            Some(value) => Pull::Value(value.clone()),
            None => Pull::EndOfStream,
        }
    }

    fn current(&mut self) -> Pull<T> {
        if self.consumed == 0 {
            return Pull::BeforeStream;
        }
        match self.values.get(self.consumed - 1) {
            Some(value) => Pull::Value(value.clone()),
            None => Pull::EndOfStream,
        }
    }

    fn reset(&mut self) {
        self.consumed = 0;
    }
}

// ================================
// SequenceDataSource
// ================================

/// Integers from `start` up to, but excluding, `end`.
///
/// Without an end the sequence never runs out; cap it with
/// [`LazyStream::limits`](crate::LazyStream::limits) before draining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDataSource {
    start: i64,
    end: Option<i64>,
    current: Option<i64>,
}

impl SequenceDataSource {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end: Some(end), current: None }
    }

    pub fn unbounded(start: i64) -> Self {
        Self { start, end: None, current: None }
    }

    fn position(&self, n: usize) -> Option<i64> {
        let offset = i64::try_from(n).ok()?;
        let candidate = match self.current {
            Some(current) => current.checked_add(offset)?,
            None => self.start.checked_add(offset - 1)?,
        };
        match self.end {
            Some(end) if candidate >= end => None,
            _ => Some(candidate),
        }
    }
}

impl StreamDataSource for SequenceDataSource {
    type Item = i64;

    fn has_next(&mut self) -> bool {
        self.position(1).is_some()
    }

    fn next(&mut self) -> Pull<i64> {
        match self.position(1) {
            Some(value) => {
                self.current = Some(value);
                Pull::Value(value)
            }
            None => {
                // park the cursor past the end so `current` reports it
                if let Some(end) = self.end {
                    self.current = Some(end.max(self.start));
                }
                Pull::EndOfStream
            }
        }
    }

    fn look_ahead(&mut self, n: usize) -> Pull<i64> {
        if n == 0 {
            return self.current();
        }
        self.position(n).into()
    }

    fn current(&mut self) -> Pull<i64> {
        match (self.current, self.end) {
            (None, _) => Pull::BeforeStream,
            (Some(value), Some(end)) if value >= end => Pull::EndOfStream,
            (Some(value), _) => Pull::Value(value),
        }
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

// ================================
// EmptyDataSource
// ================================

/// A source that never yields an element
#[derive(Debug)]
pub struct EmptyDataSource<T> {
    pulled: bool,
    _phantom: PhantomData<T>,
}

impl<T> EmptyDataSource<T> {
    pub fn new() -> Self {
        Self { pulled: false, _phantom: PhantomData }
    }
}

impl<T> Default for EmptyDataSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StreamDataSource for EmptyDataSource<T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        false
    }

    fn next(&mut self) -> Pull<T> {
        self.pulled = true;
        Pull::EndOfStream
    }

    fn look_ahead(&mut self, n: usize) -> Pull<T> {
        if n == 0 {
            return self.current();
        }
        Pull::EndOfStream
    }

    fn current(&mut self) -> Pull<T> {
        if self.pulled {
            Pull::EndOfStream
        } else {
            Pull::BeforeStream
        }
    }

    fn reset(&mut self) {
        self.pulled = false;
    }
}
