// Copyright (c) 2026 The Sortition Developers.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Phantom-typed wrappers around `usize` to prevent mixing indices from
//! different domains (e.g., agents vs. outcomes). `TypedIndex<T>` carries a
//! tag type `T: TypedIndexTag` that encodes intent at the type level, while
//! compiling down to a transparent `usize` (no runtime overhead).
//!
//! ## Usage
//!
//! ```rust
//! use sortition_core::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct AgentTag;
//! impl TypedIndexTag for AgentTag { const NAME: &'static str = "AgentId"; }
//!
//! type AgentId = TypedIndex<AgentTag>;
//! let a = AgentId::new(3);
//! assert_eq!(a.get(), 3);
//! assert_eq!(format!("{}", a), "AgentId(3)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index that is associated with a specific tag type `T`.
///
/// This struct wraps a `usize` index and uses a phantom type parameter `T`
/// to provide type safety and prevent mixing indices of different types.
#[repr(transparent)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        TypedIndex {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the wrapped `usize` index.
    #[inline]
    pub const fn get(&self) -> usize {
        self.index
    }
}

// Manual impls so `T` does not need to be `Clone`/`Copy` itself.
impl<T> Clone for TypedIndex<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedIndex<T> {}

impl<T> From<usize> for TypedIndex<T> {
    #[inline]
    fn from(index: usize) -> Self {
        TypedIndex::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline]
    fn from(index: TypedIndex<T>) -> Self {
        index.get()
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIndex";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_and_get() {
        let index = TestIndex::new(7);
        assert_eq!(index.get(), 7);
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        assert!(TestIndex::new(1) < TestIndex::new(2));
        assert_eq!(TestIndex::new(3), TestIndex::new(3));
    }

    #[test]
    fn test_conversions() {
        let index: TestIndex = 5.into();
        let raw: usize = index.into();
        assert_eq!(raw, 5);
    }

    #[test]
    fn test_display_uses_tag_name() {
        assert_eq!(format!("{}", TestIndex::new(2)), "TestIndex(2)");
    }
}
