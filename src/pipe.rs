//! Named, reusable stream transformations
//!
//! A [`Pipe`] captures a chain of lazy operators once so it can be applied
//! to any number of input streams, e.g. "keep attribute nodes, map to text".
//! Pipes are cheap to clone and can be shared between threads; the streams
//! they produce are not.

use std::fmt;
use std::sync::Arc;

use crate::lazy::LazyStream;
use crate::stream::FlatMapped;

type Transform<I, O> = dyn Fn(LazyStream<'static, I>) -> LazyStream<'static, O> + Send + Sync;

/// A transformation from `LazyStream<I>` to `LazyStream<O>`
pub struct Pipe<I, O> {
    transform: Arc<Transform<I, O>>,
}

impl<I, O> Clone for Pipe<I, O> {
    fn clone(&self) -> Self {
        Self { transform: Arc::clone(&self.transform) }
    }
}

impl<I, O> fmt::Debug for Pipe<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe").finish_non_exhaustive()
    }
}

impl<I, O> Pipe<I, O> {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(LazyStream<'static, I>) -> LazyStream<'static, O> + Send + Sync + 'static,
    {
        Self { transform: Arc::new(transform) }
    }

    /// Wrap `input` in the operators of this pipe. Nothing is pulled yet.
    pub fn apply(&self, input: LazyStream<'static, I>) -> LazyStream<'static, O> {
        (self.transform)(input)
    }
}

impl<I, O> Pipe<I, O>
where
    I: 'static,
    O: 'static,
{
    /// Feed the output of this pipe into `next`
    pub fn then<P: 'static>(self, next: Pipe<O, P>) -> Pipe<I, P> {
        compose(self, next)
    }
}

pub fn map<I, O, F>(f: F) -> Pipe<I, O>
where
    F: Fn(I) -> O + Send + Sync + Clone + 'static,
    I: Clone + 'static,
    O: Clone + 'static,
{
    Pipe::new(move |input: LazyStream<'static, I>| input.map(f.clone()))
}

pub fn filter<I, P>(predicate: P) -> Pipe<I, I>
where
    P: Fn(&I) -> bool + Send + Sync + Clone + 'static,
    I: Clone + 'static,
{
    Pipe::new(move |input: LazyStream<'static, I>| input.filter(predicate.clone()))
}

/// Expand every element and concatenate the expansions in order
pub fn flat_map<I, O, R, F>(f: F) -> Pipe<I, O>
where
    F: Fn(I) -> R + Send + Sync + Clone + 'static,
    R: Into<FlatMapped<'static, O>>,
    I: Clone + 'static,
    O: Clone + 'static,
{
    Pipe::new(move |input: LazyStream<'static, I>| input.flat_map(f.clone()))
}

/// Cap every stream passed through the pipe at `max` elements
pub fn limits<I>(max: usize) -> Pipe<I, I>
where
    I: Clone + 'static,
{
    Pipe::new(move |input: LazyStream<'static, I>| input.limits(max))
}

/// Run `first`, then `second` on its output
pub fn compose<I, M, O>(first: Pipe<I, M>, second: Pipe<M, O>) -> Pipe<I, O>
where
    I: 'static,
    M: 'static,
    O: 'static,
{
    Pipe::new(move |input| second.apply(first.apply(input)))
}

/// A pipe that hands its input back untouched
pub fn identity<I: 'static>() -> Pipe<I, I> {
    Pipe::new(|input| input)
}

/// Method-style composition, mirroring [`compose`]
pub trait PipeExt<I, O> {
    fn compose<P: 'static>(self, other: Pipe<O, P>) -> Pipe<I, P>;
}

impl<I: 'static, O: 'static> PipeExt<I, O> for Pipe<I, O> {
    fn compose<P: 'static>(self, other: Pipe<O, P>) -> Pipe<I, P> {
        compose(self, other)
    }
}

impl<I> LazyStream<'static, I>
where
    I: Clone + 'static,
{
    /// Pass this stream through `pipe`
    pub fn through<O>(self, pipe: &Pipe<I, O>) -> LazyStream<'static, O> {
        pipe.apply(self)
    }
}
