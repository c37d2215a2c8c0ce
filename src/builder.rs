//! Shorthand constructors for assembling expression trees in code.
//!
//! Each function returns the concrete node type so that its modifiers stay
//! available (`sum(..).by(&["job"])`, `div(..).ignoring(&["code"])`), and
//! accepts anything convertible into an [`Expr`] for its operands.
//!
//! # Examples
//!
//! ```
//! use promql_ast::ast::{Expr, InstantSelector, LabelMatcher};
//! use promql_ast::builder::{div, number, rate, sum};
//! use promql_ast::output::render;
//!
//! let errors = InstantSelector::new("http_requests_total")
//!     .with_matcher(LabelMatcher::regex_match("code", "5.."))
//!     .range_str("5m")
//!     .unwrap();
//! let expr: Expr = div(sum(rate(errors)).by(&["job"]), number(60.0)).into();
//!
//! assert_eq!(
//!     render(&expr).unwrap(),
//!     r#"sum by (job) (rate(http_requests_total{code=~"5.."}[5m])) / 60"#
//! );
//! ```

use crate::ast::{
    AggregateOp, Aggregation, BinOp, BinaryOp, Call, Expr, NumberLiteral, Paren, RangeSelector,
    StepInvariant, StringLiteral, Subquery, Unary, UnaryOp,
};

/// Expressions that evaluate to a range vector: range selectors and
/// subqueries. Functions over time windows only accept these.
pub trait RangeVector: Into<Expr> {}

impl RangeVector for RangeSelector {}
impl RangeVector for Subquery {}

// Literals and wrappers

pub fn number(value: f64) -> NumberLiteral {
    NumberLiteral::new(value)
}

pub fn string(value: impl Into<String>) -> StringLiteral {
    StringLiteral::new(value)
}

pub fn paren(expr: impl Into<Expr>) -> Paren {
    Paren::new(expr)
}

pub fn neg(expr: impl Into<Expr>) -> Unary {
    Unary::new(UnaryOp::Neg, expr)
}

pub fn step_invariant(expr: impl Into<Expr>) -> StepInvariant {
    StepInvariant::new(expr)
}

/// Call of any function by name, including ones unknown to Prometheus.
pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Call {
    Call::new(func, args)
}

// Aggregations

macro_rules! aggregations {
    ($($fn_name:ident => $op:ident),* $(,)?) => {
        $(
            pub fn $fn_name(expr: impl Into<Expr>) -> Aggregation {
                Aggregation::new(AggregateOp::$op, expr)
            }
        )*
    };
}

aggregations!(
    sum => Sum,
    avg => Avg,
    min => Min,
    max => Max,
    count => Count,
    group => Group,
    stddev => Stddev,
    stdvar => Stdvar,
);

macro_rules! parameterised_aggregations {
    ($($(#[$meta:meta])* $fn_name:ident($param:ident) => $op:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $fn_name($param: f64, expr: impl Into<Expr>) -> Aggregation {
                Aggregation::new(AggregateOp::$op, expr).with_param(NumberLiteral::new($param))
            }
        )*
    };
}

parameterised_aggregations!(
    /// `topk(k, expr)`: the `k` largest samples.
    topk(k) => Topk,
    /// `bottomk(k, expr)`: the `k` smallest samples.
    bottomk(k) => Bottomk,
    /// `limitk(k, expr)`: any `k` samples.
    limitk(k) => Limitk,
    /// `limit_ratio(ratio, expr)`: a deterministic sample of the series.
    limit_ratio(ratio) => LimitRatio,
    /// `quantile(q, expr)`: the φ-quantile over the dimensions.
    quantile(q) => Quantile,
);

/// `count_values("label", expr)`: counts samples per value, writing the value
/// into `label`.
pub fn count_values(label: impl Into<String>, expr: impl Into<Expr>) -> Aggregation {
    Aggregation::new(AggregateOp::CountValues, expr).with_param(StringLiteral::new(label))
}

// Binary operations

macro_rules! binary_operations {
    ($($fn_name:ident => $op:ident),* $(,)?) => {
        $(
            pub fn $fn_name(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> BinaryOp {
                BinaryOp::new(BinOp::$op, lhs, rhs)
            }
        )*
    };
}

binary_operations!(
    add => Add,
    sub => Sub,
    mul => Mul,
    div => Div,
    modulo => Mod,
    pow => Pow,
    atan2 => Atan2,
    eql => Eql,
    neq => Neq,
    gtr => Gtr,
    lss => Lss,
    gte => Gte,
    lte => Lte,
    and => And,
    or => Or,
    unless => Unless,
);

// Functions

macro_rules! nullary_functions {
    ($($fn_name:ident => $name:literal),* $(,)?) => {
        $(
            pub fn $fn_name() -> Call {
                Call::new($name, Vec::new())
            }
        )*
    };
}

macro_rules! vector_functions {
    ($($fn_name:ident => $name:literal),* $(,)?) => {
        $(
            pub fn $fn_name(vector: impl Into<Expr>) -> Call {
                Call::new($name, vec![vector.into()])
            }
        )*
    };
}

macro_rules! range_functions {
    ($($fn_name:ident => $name:literal),* $(,)?) => {
        $(
            pub fn $fn_name(input: impl RangeVector) -> Call {
                Call::new($name, vec![input.into()])
            }
        )*
    };
}

nullary_functions!(
    pi => "pi",
    time => "time",
);

vector_functions!(
    abs => "abs",
    absent => "absent",
    acos => "acos",
    acosh => "acosh",
    asin => "asin",
    asinh => "asinh",
    atan => "atan",
    atanh => "atanh",
    ceil => "ceil",
    cos => "cos",
    cosh => "cosh",
    days_in_month => "days_in_month",
    day_of_month => "day_of_month",
    day_of_week => "day_of_week",
    day_of_year => "day_of_year",
    deg => "deg",
    exp => "exp",
    floor => "floor",
    histogram_avg => "histogram_avg",
    histogram_count => "histogram_count",
    histogram_sum => "histogram_sum",
    histogram_stddev => "histogram_stddev",
    histogram_stdvar => "histogram_stdvar",
    hour => "hour",
    ln => "ln",
    log10 => "log10",
    log2 => "log2",
    minute => "minute",
    month => "month",
    rad => "rad",
    scalar => "scalar",
    sgn => "sgn",
    sin => "sin",
    sinh => "sinh",
    sort => "sort",
    sort_desc => "sort_desc",
    sqrt => "sqrt",
    tan => "tan",
    tanh => "tanh",
    timestamp => "timestamp",
    year => "year",
);

range_functions!(
    absent_over_time => "absent_over_time",
    avg_over_time => "avg_over_time",
    changes => "changes",
    count_over_time => "count_over_time",
    delta => "delta",
    deriv => "deriv",
    idelta => "idelta",
    increase => "increase",
    irate => "irate",
    last_over_time => "last_over_time",
    mad_over_time => "mad_over_time",
    max_over_time => "max_over_time",
    min_over_time => "min_over_time",
    present_over_time => "present_over_time",
    rate => "rate",
    resets => "resets",
    stddev_over_time => "stddev_over_time",
    stdvar_over_time => "stdvar_over_time",
    sum_over_time => "sum_over_time",
);

/// `vector(s)`: the scalar `s` as a label-less instant vector.
pub fn vector(scalar: f64) -> Call {
    Call::new("vector", vec![number(scalar).into()])
}

pub fn clamp(vector: impl Into<Expr>, min: f64, max: f64) -> Call {
    Call::new("clamp", vec![vector.into(), number(min).into(), number(max).into()])
}

pub fn clamp_max(vector: impl Into<Expr>, max: f64) -> Call {
    Call::new("clamp_max", vec![vector.into(), number(max).into()])
}

pub fn clamp_min(vector: impl Into<Expr>, min: f64) -> Call {
    Call::new("clamp_min", vec![vector.into(), number(min).into()])
}

pub fn round(vector: impl Into<Expr>, to_nearest: f64) -> Call {
    Call::new("round", vec![vector.into(), number(to_nearest).into()])
}

pub fn histogram_quantile(quantile: f64, vector: impl Into<Expr>) -> Call {
    Call::new(
        "histogram_quantile",
        vec![number(quantile).into(), vector.into()],
    )
}

pub fn histogram_fraction(lower: f64, upper: f64, vector: impl Into<Expr>) -> Call {
    Call::new(
        "histogram_fraction",
        vec![number(lower).into(), number(upper).into(), vector.into()],
    )
}

pub fn quantile_over_time(quantile: f64, input: impl RangeVector) -> Call {
    Call::new(
        "quantile_over_time",
        vec![number(quantile).into(), input.into()],
    )
}

pub fn predict_linear(input: impl RangeVector, seconds: f64) -> Call {
    Call::new("predict_linear", vec![input.into(), number(seconds).into()])
}

pub fn double_exponential_smoothing(
    input: impl RangeVector,
    smoothing_factor: f64,
    trend_factor: f64,
) -> Call {
    Call::new(
        "double_exponential_smoothing",
        vec![
            input.into(),
            number(smoothing_factor).into(),
            number(trend_factor).into(),
        ],
    )
}

/// `info(vector, selector)`: enriches `vector` with labels of info metrics.
pub fn info(vector: impl Into<Expr>, data_label_selector: impl Into<Expr>) -> Call {
    Call::new("info", vec![vector.into(), data_label_selector.into()])
}

pub fn label_replace(
    vector: impl Into<Expr>,
    destination: &str,
    replacement: &str,
    source: &str,
    regex: &str,
) -> Call {
    Call::new(
        "label_replace",
        vec![
            vector.into(),
            string(destination).into(),
            string(replacement).into(),
            string(source).into(),
            string(regex).into(),
        ],
    )
}

pub fn label_join(
    vector: impl Into<Expr>,
    destination: &str,
    separator: &str,
    sources: &[&str],
) -> Call {
    let mut args = vec![
        vector.into(),
        string(destination).into(),
        string(separator).into(),
    ];
    args.extend(sources.iter().map(|label| Expr::from(string(*label))));
    Call::new("label_join", args)
}

pub fn sort_by_label(vector: impl Into<Expr>, labels: &[&str]) -> Call {
    label_sort("sort_by_label", vector, labels)
}

pub fn sort_by_label_desc(vector: impl Into<Expr>, labels: &[&str]) -> Call {
    label_sort("sort_by_label_desc", vector, labels)
}

fn label_sort(func: &str, vector: impl Into<Expr>, labels: &[&str]) -> Call {
    let mut args = vec![vector.into()];
    args.extend(labels.iter().map(|label| Expr::from(string(*label))));
    Call::new(func, args)
}
