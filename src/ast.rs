//! # PromQL Abstract Syntax Tree
//!
//! This module defines the expression tree for PromQL, the query language of
//! Prometheus. Trees are assembled in code (see [`crate::builder`]) rather than
//! parsed, then rendered back to query text, walked, or copied.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[expressions]** - The [`Expr`] node type, calls, literals and wrappers
//! - **[selectors]** - Instant selectors, range selectors and subqueries
//! - **[aggregation]** - Aggregations and their grouping clause
//! - **[binary]** - Binary operations and vector matching
//! - **[matchers]** - Label matchers used inside selector braces
//! - **[operators]** - Binary, aggregation and unary operators
//! - **[position]** - Source positions carried by every node
//!
//! ## Quick Start
//!
//! ```text
//! sum by (namespace) (rate(http_requests_total{code=~"5.."}[5m]))
//! ```
//!
//! is the tree
//!
//! ```text
//! Aggregation(sum, by namespace)
//! └── Call(rate)
//!     └── RangeSelector(5m)
//!         └── InstantSelector(http_requests_total, code=~"5..")
//! ```
//!
//! ## Core Concepts
//!
//! ### Ownership
//!
//! Every node exclusively owns its children through `Box` or `Vec` fields.
//! There are no shared or parent references, so cloning a tree produces a
//! fully independent copy and a tree can be read from many threads at once.
//!
//! ### Optional Clauses
//!
//! Clauses that may be missing from the query text are `Option` fields:
//! an aggregation's parameter and grouping, a binary operation's vector
//! matching, a subquery's step, the `@` modifier. Offsets use a zero
//! [`Duration`](crate::duration::Duration) for "no offset".
//!
//! ### Range Representation
//!
//! A range selector's window is a [`RangeDuration`]: either a resolved
//! duration (`5m`) or a placeholder name (`$__rate_interval`) kept verbatim
//! for dashboard tooling to substitute later.
//!
//! ## Examples
//!
//! ### Selector with Matchers
//!
//! ```text
//! foo{namespace="monitoring",podName=~"prom-.+"}
//! ```
//!
//! ### Vector Matching
//!
//! ```text
//! sum by (namespace) (rate(foo[$__rate_interval])) - ignoring (podName) group_left (namespace) perses_info
//! ```
//!
//! ### Parameterised Aggregation
//!
//! ```text
//! quantile(0.9, http_request_duration_seconds)
//! ```
pub mod aggregation;
pub mod binary;
pub mod expressions;
pub mod matchers;
pub mod operators;
pub mod position;
pub mod selectors;

pub use aggregation::{Aggregation, Grouping, GroupingMode};
pub use binary::{BinaryOp, Cardinality, MatchingMode, VectorMatching};
pub use expressions::{
    Call, Expr, NumberLiteral, Paren, StepInvariant, StringLiteral, Unary, ValueType,
};
pub use matchers::{LabelMatcher, MatchOp};
pub use operators::{AggregateOp, BinOp, UnaryOp};
pub use position::PositionRange;
pub use selectors::{AtModifier, InstantSelector, RangeDuration, RangeSelector, Subquery};
