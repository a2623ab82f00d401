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

//! # Sortition Core
//!
//! Foundational utilities for the sortition social-choice ecosystem.
//! This crate consolidates the small, dependency-light building blocks
//! shared by the model and solver crates.
//!
//! ## Modules
//!
//! - `tolerance`: the relative/absolute floating-point comparison policy
//!   (`Tolerance`) every numeric decision in the solvers goes through.
//!   No raw float equality is used anywhere above this crate.
//! - `index`: phantom-tagged, strongly typed indices (`TypedIndex<T>`)
//!   preventing accidental mixing of index spaces (agents vs. outcomes).
//!
//! Refer to each module for detailed APIs and examples.

pub mod index;
pub mod tolerance;
