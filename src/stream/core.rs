//! Core cursor contract shared by every stream stage

use super::status::Pull;

/// A cursor over a possibly infinite, possibly nested sequence.
///
/// `next` advances by exactly one logical element. `has_next`, `look_ahead`
/// and `current` never move the observable cursor, although an implementation
/// may update internal memo state while answering them.
pub trait StreamDataSource {
    type Item;

    /// Whether a subsequent `next` would produce an element
    fn has_next(&mut self) -> bool;

    /// Advance by one element, or yield [`Pull::EndOfStream`] when none remain
    fn next(&mut self) -> Pull<Self::Item>;

    /// The element `n` positions ahead of the cursor.
    ///
    /// `look_ahead(1)` is what the next `next` call would return.
    /// `look_ahead(0)` is the same as `current`.
    fn look_ahead(&mut self, n: usize) -> Pull<Self::Item>;

    /// The element last produced by `next`, or [`Pull::BeforeStream`]
    fn current(&mut self) -> Pull<Self::Item>;

    /// Return to the state before the first `next`, cascading to any parent
    fn reset(&mut self);
}

impl<S> StreamDataSource for Box<S>
where
    S: StreamDataSource + ?Sized,
{
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next(&mut self) -> Pull<Self::Item> {
        (**self).next()
    }

    fn look_ahead(&mut self, n: usize) -> Pull<Self::Item> {
        (**self).look_ahead(n)
    }

    fn current(&mut self) -> Pull<Self::Item> {
        (**self).current()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<S> StreamDataSource for &mut S
where
    S: StreamDataSource + ?Sized,
{
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn next(&mut self) -> Pull<Self::Item> {
        (**self).next()
    }

    fn look_ahead(&mut self, n: usize) -> Pull<Self::Item> {
        (**self).look_ahead(n)
    }

    fn current(&mut self) -> Pull<Self::Item> {
        (**self).current()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// A type-erased data source, the unit a [`LazyStream`](crate::LazyStream) chains over
pub type BoxDataSource<'a, T> = Box<dyn StreamDataSource<Item = T> + 'a>;

/// Number of elements `source` still holds ahead of its cursor.
///
/// Counts by probing `look_ahead(1)`, `look_ahead(2)`, ... until the end is
/// reached, so the cost depends on how expensive a single look-ahead is.
pub fn calculate_skips<S>(source: &mut S) -> usize
where
    S: StreamDataSource + ?Sized,
{
    let mut count = 0;
    while source.look_ahead(count + 1).is_value() {
        count += 1;
    }
    count
}
