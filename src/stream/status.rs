//! Iteration status markers
//!
//! Boundary conditions of a cursor are returned as values rather than raised:
//! a pull either produces an element, runs past the end of the data, or asks
//! for the current element before the cursor was ever advanced.

/// Result of pulling from a [`StreamDataSource`](super::core::StreamDataSource)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pull<T> {
    /// A logical element of the stream
    Value(T),
    /// No element remains at the requested position
    EndOfStream,
    /// The cursor has not been advanced yet
    BeforeStream,
}

impl<T> Pull<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Pull::Value(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Pull::EndOfStream)
    }

    pub fn is_before(&self) -> bool {
        matches!(self, Pull::BeforeStream)
    }

    /// Discard the marker distinction and keep only the element, if any
    pub fn value(self) -> Option<T> {
        match self {
            Pull::Value(value) => Some(value),
            Pull::EndOfStream | Pull::BeforeStream => None,
        }
    }

    pub fn as_ref(&self) -> Pull<&T> {
        match self {
            Pull::Value(value) => Pull::Value(value),
            Pull::EndOfStream => Pull::EndOfStream,
            Pull::BeforeStream => Pull::BeforeStream,
        }
    }

    /// Transform the element, passing both markers through untouched
    pub fn map<U, F>(self, f: F) -> Pull<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Pull::Value(value) => Pull::Value(f(value)),
            Pull::EndOfStream => Pull::EndOfStream,
            Pull::BeforeStream => Pull::BeforeStream,
        }
    }
}

impl<T> From<Pull<T>> for Option<T> {
    fn from(pull: Pull<T>) -> Self {
        pull.value()
    }
}

impl<T> From<Option<T>> for Pull<T> {
    /// `None` maps to [`Pull::EndOfStream`]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Pull::Value(value),
            None => Pull::EndOfStream,
        }
    }
}
