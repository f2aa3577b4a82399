//! Terminal sinks for stream elements.
//!
//! A [`Collector`] receives every element a terminal operation pulls and
//! turns them into a final shape. Any type can act as a collector by
//! implementing the trait.

use std::collections::HashMap;
use std::fmt::{Display, Write};
use std::hash::Hash;

/// Accumulates streamed elements into a target shape
pub trait Collector<T> {
    type Output;

    /// Accept the next element
    fn collect(&mut self, element: T);

    /// Consume the collector and hand out what it accumulated
    fn final_value(self) -> Self::Output;
}

/// Collects elements into a `Vec` in arrival order
#[derive(Debug, Clone)]
pub struct ArrayCollector<T> {
    values: Vec<T>,
}

impl<T> ArrayCollector<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { values: Vec::with_capacity(capacity) }
    }
}

impl<T> Default for ArrayCollector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collector<T> for ArrayCollector<T> {
    type Output = Vec<T>;

    fn collect(&mut self, element: T) {
        self.values.push(element);
    }

    fn final_value(self) -> Vec<T> {
        self.values
    }
}

impl<T> Collector<T> for Vec<T> {
    type Output = Vec<T>;

    fn collect(&mut self, element: T) {
        self.push(element);
    }

    fn final_value(self) -> Vec<T> {
        self
    }
}

/// Collects key/value pairs into a map; a repeated key keeps the last value
#[derive(Debug, Clone)]
pub struct AssocArrayCollector<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> AssocArrayCollector<K, V> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<K, V> Default for AssocArrayCollector<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Collector<(K, V)> for AssocArrayCollector<K, V> {
    type Output = HashMap<K, V>;

    fn collect(&mut self, (key, value): (K, V)) {
        self.entries.insert(key, value);
    }

    fn final_value(self) -> HashMap<K, V> {
        self.entries
    }
}

/// Collects key/value pairs into a map of arrays, keeping every value per
/// key in arrival order
#[derive(Debug, Clone)]
pub struct ArrayAssocArrayCollector<K, V> {
    entries: HashMap<K, Vec<V>>,
}

impl<K, V> ArrayAssocArrayCollector<K, V> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<K, V> Default for ArrayAssocArrayCollector<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Collector<(K, V)> for ArrayAssocArrayCollector<K, V> {
    type Output = HashMap<K, Vec<V>>;

    fn collect(&mut self, (key, value): (K, V)) {
        self.entries.entry(key).or_default().push(value);
    }

    fn final_value(self) -> HashMap<K, Vec<V>> {
        self.entries
    }
}

/// Joins displayable elements with a separator
#[derive(Debug, Clone)]
pub struct JoinCollector {
    separator: String,
    joined: String,
    empty: bool,
}

impl JoinCollector {
    pub fn new(separator: impl Into<String>) -> Self {
        Self { separator: separator.into(), joined: String::new(), empty: true }
    }
}

impl<T: Display> Collector<T> for JoinCollector {
    type Output = String;

    fn collect(&mut self, element: T) {
        if !self.empty {
            self.joined.push_str(&self.separator);
        }
        self.empty = false;
        // writing into a String cannot fail
        let _ = write!(self.joined, "{}", element);
    }

    fn final_value(self) -> String {
        self.joined
    }
}

/// Counts elements
#[derive(Debug, Clone, Copy, Default)]
pub struct CountCollector {
    count: usize,
}

impl CountCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Collector<T> for CountCollector {
    type Output = usize;

    fn collect(&mut self, _element: T) {
        self.count += 1;
    }

    fn final_value(self) -> usize {
        self.count
    }
}
