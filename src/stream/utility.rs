//! Utility stages
use super::core::StreamDataSource;
use super::status::Pull;

// ================================
// Inspect
// ================================

/// Passes elements through unchanged while showing each one, with its
/// index, to a callback.
///
/// When the callback returns `false` the element is still emitted, after
/// which the stage reports no further elements until it is reset.
pub struct InspectStreamDataSource<S, F> {
    parent: S,
    f: F,
    index: usize,
    halted: bool,
    ended: bool,
}

impl<S, F> InspectStreamDataSource<S, F>
where
    S: StreamDataSource,
    F: FnMut(&S::Item, usize) -> bool,
{
    pub fn new(parent: S, f: F) -> Self {
        Self { parent, f, index: 0, halted: false, ended: false }
    }
}

impl<S, F> StreamDataSource for InspectStreamDataSource<S, F>
where
    S: StreamDataSource,
    F: FnMut(&S::Item, usize) -> bool,
{
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        !self.halted && self.parent.has_next()
    }

    fn next(&mut self) -> Pull<S::Item> {
        if self.halted {
            self.ended = true;
            return Pull::EndOfStream;
        }
        let next = self.parent.next();
        match &next {
            Pull::Value(value) => {
                if !(self.f)(value, self.index) {
                    self.halted = true;
                }
                self.index += 1;
            }
            Pull::EndOfStream | Pull::BeforeStream => self.ended = true,
        }
        next
    }

    fn look_ahead(&mut self, n: usize) -> Pull<S::Item> {
        if n == 0 {
            return self.current();
        }
        if self.halted {
            return Pull::EndOfStream;
        }
        self.parent.look_ahead(n)
    }

    fn current(&mut self) -> Pull<S::Item> {
        if self.ended {
            return Pull::EndOfStream;
        }
        self.parent.current()
    }

    fn reset(&mut self) {
        self.index = 0;
        self.halted = false;
        self.ended = false;
        self.parent.reset();
    }
}
