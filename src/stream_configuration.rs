//! Configuration types for stream materialisation

use serde::{Deserialize, Serialize};

use crate::error::{StreamError, StreamResult};

/// Buffer configuration for turning a data source into an in-memory buffer.
///
/// Passed explicitly to the bounded operations
/// ([`Stream::try_of_data_source`](crate::Stream::try_of_data_source),
/// [`LazyStream::try_value`](crate::LazyStream::try_value)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub initial_capacity: usize,
    pub max_capacity: Option<usize>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            max_capacity: Some(1024 * 1024), // 1M elements
        }
    }
}

impl BufferConfig {
    /// Create a new buffer configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration without an upper bound
    pub fn unbounded() -> Self {
        Self { max_capacity: None, ..Self::default() }
    }

    /// Set the capacity reserved up front
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the maximum number of buffered elements; the initial capacity is
    /// lowered to fit under it
    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = Some(max_capacity);
        self.initial_capacity = self.initial_capacity.min(max_capacity);
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> StreamResult<Self> {
        let config: BufferConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StreamResult<()> {
        match self.max_capacity {
            Some(max) if self.initial_capacity > max => Err(StreamError::InvalidConfig(format!(
                "initial_capacity {} exceeds max_capacity {}",
                self.initial_capacity, max
            ))),
            _ => Ok(()),
        }
    }

    /// Capacity to reserve before draining a source
    pub(crate) fn reserve_hint(&self) -> usize {
        match self.max_capacity {
            Some(max) => self.initial_capacity.min(max),
            None => self.initial_capacity,
        }
    }
}
