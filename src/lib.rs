//! Expression trees for PromQL queries.
//!
//! Build a query as a tree with [`builder`], then render it with
//! [`output::render`] / [`output::render_pretty`], traverse it with
//! [`walk::walk`] / [`walk::inspect`], or copy it with
//! [`deep_copy::deep_copy`].
pub mod ast;
pub mod builder;
pub mod deep_copy;
pub mod duration;
pub mod error;
pub mod output;
pub mod walk;

pub use ast::{AggregateOp, BinOp, Expr, LabelMatcher, MatchOp, ValueType};
pub use deep_copy::{deep_copy, deep_copy_opt};
pub use duration::{Duration, format_duration, parse_duration};
pub use error::{AstError, AstResult};
pub use output::{Printer, render, render_pretty};
pub use walk::{Visitor, Walk, children, inspect, walk};
