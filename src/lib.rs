//! Small HTTP request multiplexing primitives.
//!
//! This crate provides two independent pieces:
//!
//! - [`matches`]: a glob-style pattern matcher for path-like strings, with
//!   `*` and `?` wildcards and `{name}` captures that never cross a `/`
//!   boundary. Captures are collected into a reusable [`Vars`] list.
//! - [`MethodRouter`]: a dispatch table from HTTP method to handler, with
//!   automatic `OPTIONS`/`Allow`/405 replies.
//!
//! Patterns are interpreted on every call, so there is nothing to build or
//! cache up front:
//!
//! ```rust
//! use globmux::{matches, Vars};
//!
//! let mut vars = Vars::new();
//! assert!(matches("/users/{id}/posts/*", "/users/42/posts/7", &mut vars));
//! assert_eq!(vars.get("id"), "42");
//! ```

#![deny(clippy::all)]
#![forbid(unsafe_code)]

pub mod dispatch;
pub mod glob;
pub mod vars;

#[macro_use]
extern crate log;

pub use dispatch::{not_allowed, Handler, MethodRouter, ResponseWriter};
pub use glob::matches;
pub use vars::{Vars, VarsIter};
