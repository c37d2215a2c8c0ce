//! PromQL text rendering for expression trees.
//!
//! This module turns an [`Expr`] back into query text, either on a single
//! line or laid out over several lines the way the Prometheus prettifier
//! does. Both forms parse back to the same tree.
//!
//! # Features
//!
//! - **Single-line output** via [`render()`] - the canonical query text
//! - **Pretty output** via [`render_pretty()`] - nodes longer than the line
//!   width are split with 2-space indentation per level
//! - **Exact clauses** - offsets, `@` modifiers, grouping and vector matching
//!   are written only when present, in a fixed order
//! - **Checked** - a malformed node is reported instead of producing text
//!   that would not parse
//!
//! # Examples
//!
//! ```
//! use promql_ast::ast::{Expr, InstantSelector, LabelMatcher};
//! use promql_ast::output::render;
//!
//! let expr: Expr = InstantSelector::new("foo")
//!     .with_matcher(LabelMatcher::equal("namespace", "monitoring"))
//!     .into();
//!
//! assert_eq!(render(&expr).unwrap(), r#"foo{namespace="monitoring"}"#);
//! ```

use crate::ast::{
    Aggregation, AtModifier, BinaryOp, Cardinality, Expr, GroupingMode, InstantSelector,
    LabelMatcher, MatchOp, MatchingMode, RangeDuration, Subquery,
};
use crate::duration::{Duration, format_duration};
use crate::error::AstResult;

/// Width in bytes above which pretty mode splits a node over several lines.
pub const DEFAULT_MAX_LINE_WIDTH: usize = 100;

const INDENT: &str = "  ";

const METRIC_NAME_LABEL: &str = "__name__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Printer {
    max_line_width: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Printer {
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
        }
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line_width(mut self, width: usize) -> Self {
        self.max_line_width = width;
        self
    }

    pub fn max_line_width(&self) -> usize {
        self.max_line_width
    }

    /// Renders `expr` on a single line.
    pub fn render(&self, expr: &Expr) -> AstResult<String> {
        self.print_expr(expr)
    }

    /// Renders `expr` over multiple lines, indented by `level` steps.
    pub fn render_pretty(&self, expr: &Expr, level: usize) -> AstResult<String> {
        self.print_pretty(expr, level)
    }

    fn print_expr(&self, expr: &Expr) -> AstResult<String> {
        match expr {
            Expr::InstantSelector(s) => {
                s.validate()?;
                Ok(format!(
                    "{}{}",
                    self.selector_body(s),
                    self.modifier_suffix(s.offset, s.at)
                ))
            }
            Expr::RangeSelector(r) => {
                let s = r.instant_selector()?;
                Ok(format!(
                    "{}[{}]{}",
                    self.selector_body(s),
                    self.range_str(&r.range),
                    self.modifier_suffix(s.offset, s.at)
                ))
            }
            Expr::Subquery(s) => Ok(format!(
                "{}{}",
                self.print_expr(&s.expr)?,
                self.subquery_suffix(s)
            )),
            Expr::Aggregation(a) => {
                a.validate()?;
                let mut result = self.aggregation_head(a);
                result.push('(');
                if let Some(param) = &a.param {
                    result.push_str(&self.print_expr(param)?);
                    result.push_str(", ");
                }
                result.push_str(&self.print_expr(&a.expr)?);
                result.push(')');
                Ok(result)
            }
            Expr::BinaryOp(b) => Ok(format!(
                "{} {} {}",
                self.print_expr(&b.lhs)?,
                self.operator_str(b),
                self.print_expr(&b.rhs)?
            )),
            Expr::Call(c) => {
                let args = c
                    .args
                    .iter()
                    .map(|arg| self.print_expr(arg))
                    .collect::<AstResult<Vec<_>>>()?;
                Ok(format!("{}({})", c.func, args.join(", ")))
            }
            Expr::Paren(p) => Ok(format!("({})", self.print_expr(&p.expr)?)),
            Expr::Unary(u) => Ok(format!("{}{}", u.op, self.print_expr(&u.expr)?)),
            Expr::NumberLiteral(n) => Ok(format_number(n.value)),
            Expr::StringLiteral(s) => Ok(quote(&s.value)),
            Expr::StepInvariant(s) => self.print_expr(&s.expr),
        }
    }

    fn print_pretty(&self, expr: &Expr, level: usize) -> AstResult<String> {
        // Wrappers take their layout from the wrapped expression.
        match expr {
            Expr::StepInvariant(s) => return self.print_pretty(&s.expr, level),
            Expr::Unary(u) => {
                let inner = self.print_pretty(&u.expr, level)?;
                return Ok(format!("{}{}{}", self.indent(level), u.op, inner.trim()));
            }
            _ => {}
        }

        let line = self.print_expr(expr)?;
        if line.len() <= self.max_line_width {
            return Ok(format!("{}{}", self.indent(level), line));
        }

        match expr {
            Expr::Aggregation(a) => {
                let mut result = self.indent(level);
                result.push_str(&self.aggregation_head(a));
                result.push_str("(\n");
                if let Some(param) = &a.param {
                    result.push_str(&self.print_pretty(param, level + 1)?);
                    result.push_str(",\n");
                }
                result.push_str(&self.print_pretty(&a.expr, level + 1)?);
                result.push('\n');
                result.push_str(&self.indent(level));
                result.push(')');
                Ok(result)
            }
            Expr::BinaryOp(b) => Ok(format!(
                "{}\n{}{}\n{}",
                self.print_pretty(&b.lhs, level + 1)?,
                self.indent(level),
                self.operator_str(b),
                self.print_pretty(&b.rhs, level + 1)?
            )),
            // Nothing to split without arguments.
            Expr::Call(c) if c.args.is_empty() => Ok(format!("{}{}", self.indent(level), line)),
            Expr::Call(c) => {
                let args = c
                    .args
                    .iter()
                    .map(|arg| self.print_pretty(arg, level + 1))
                    .collect::<AstResult<Vec<_>>>()?;
                Ok(format!(
                    "{}{}(\n{}\n{})",
                    self.indent(level),
                    c.func,
                    args.join(",\n"),
                    self.indent(level)
                ))
            }
            Expr::Paren(p) => Ok(format!(
                "{}(\n{}\n{})",
                self.indent(level),
                self.print_pretty(&p.expr, level + 1)?,
                self.indent(level)
            )),
            Expr::Subquery(s) => Ok(format!(
                "{}{}",
                self.print_pretty(&s.expr, level)?,
                self.subquery_suffix(s)
            )),
            // Selectors and literals are never split.
            _ => Ok(format!("{}{}", self.indent(level), line)),
        }
    }

    /// Metric name and label matchers, without offset or `@` modifier.
    fn selector_body(&self, selector: &InstantSelector) -> String {
        let name = selector.name.as_deref().unwrap_or("");
        let matchers: Vec<String> = selector
            .matchers
            .iter()
            .filter(|m| !is_redundant_name_matcher(m, name))
            .map(format_matcher)
            .collect();

        if matchers.is_empty() {
            name.to_string()
        } else {
            format!("{}{{{}}}", name, matchers.join(","))
        }
    }

    /// Offset clause followed by the `@` clause, each only when set.
    fn modifier_suffix(&self, offset: Duration, at: Option<AtModifier>) -> String {
        let mut result = String::new();
        if offset.is_negative() {
            result.push_str(&format!(" offset -{}", format_duration(offset.abs())));
        } else if !offset.is_zero() {
            result.push_str(&format!(" offset {}", format_duration(offset)));
        }
        match at {
            Some(AtModifier::Timestamp(millis)) => {
                result.push_str(&format!(" @ {:.3}", millis as f64 / 1000.0))
            }
            Some(AtModifier::Start) => result.push_str(" @ start()"),
            Some(AtModifier::End) => result.push_str(" @ end()"),
            None => {}
        }
        result
    }

    fn range_str(&self, range: &RangeDuration) -> String {
        match range {
            RangeDuration::Resolved(duration) => format_duration(*duration),
            RangeDuration::Variable(name) => name.clone(),
        }
    }

    fn subquery_suffix(&self, subquery: &Subquery) -> String {
        let step = subquery
            .step
            .filter(|step| !step.is_zero())
            .map(format_duration)
            .unwrap_or_default();
        format!(
            "[{}:{}]{}",
            format_duration(subquery.range),
            step,
            self.modifier_suffix(subquery.offset, subquery.at)
        )
    }

    /// Operator name and grouping clause, e.g. `sum by (job) `.
    fn aggregation_head(&self, aggregation: &Aggregation) -> String {
        match &aggregation.grouping {
            Some(grouping) => {
                let keyword = match grouping.mode {
                    GroupingMode::By => "by",
                    GroupingMode::Without => "without",
                };
                format!(
                    "{} {} ({}) ",
                    aggregation.op,
                    keyword,
                    join_labels(&grouping.labels)
                )
            }
            None => aggregation.op.to_string(),
        }
    }

    /// Operator token with its `bool` and vector matching modifiers.
    fn operator_str(&self, binary: &BinaryOp) -> String {
        let mut result = binary.op.as_str().to_string();
        if binary.return_bool {
            result.push_str(" bool");
        }
        if let Some(matching) = &binary.matching {
            let keyword = match matching.mode {
                MatchingMode::On => "on",
                MatchingMode::Ignoring => "ignoring",
            };
            result.push_str(&format!(" {} ({})", keyword, join_labels(&matching.labels)));

            let side = match matching.card {
                Cardinality::ManyToOne => Some("left"),
                Cardinality::OneToMany => Some("right"),
                Cardinality::OneToOne | Cardinality::ManyToMany => None,
            };
            if let Some(side) = side {
                result.push_str(&format!(
                    " group_{} ({})",
                    side,
                    join_labels(&matching.include)
                ));
            }
        }
        result
    }

    fn indent(&self, level: usize) -> String {
        INDENT.repeat(level)
    }
}

/// A `__name__="foo"` matcher on selector `foo` repeats the metric name.
fn is_redundant_name_matcher(matcher: &LabelMatcher, name: &str) -> bool {
    matcher.name == METRIC_NAME_LABEL
        && matcher.op == MatchOp::Equal
        && !name.is_empty()
        && matcher.value == name
}

fn format_matcher(matcher: &LabelMatcher) -> String {
    format!(
        "{}{}{}",
        format_label_name(&matcher.name),
        matcher.op,
        quote(&matcher.value)
    )
}

fn join_labels(labels: &[String]) -> String {
    labels
        .iter()
        .map(|label| format_label_name(label))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Label names outside `[a-zA-Z_][a-zA-Z0-9_]*` are written quoted.
fn format_label_name(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .enumerate()
            .all(|(i, c)| c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit()));
    if plain { name.to_string() } else { quote(name) }
}

/// Shortest representation of a number that reads back as the same value.
///
/// Exponents below -4 or from 6 upwards use scientific notation with a signed,
/// two-digit exponent (`1e+06`, `2.5e-07`).
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..6).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Double-quoted string literal with backslash escapes.
fn quote(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\u{07}' => result.push_str("\\a"),
            '\u{08}' => result.push_str("\\b"),
            '\u{0C}' => result.push_str("\\f"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{0B}' => result.push_str("\\v"),
            c if c.is_control() && (c as u32) < 0x80 => {
                result.push_str(&format!("\\x{:02x}", c as u32))
            }
            c if c.is_control() || !is_printable(c) => {
                if (c as u32) > 0xFFFF {
                    result.push_str(&format!("\\U{:08x}", c as u32))
                } else {
                    result.push_str(&format!("\\u{:04x}", c as u32))
                }
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Invisible characters that are escaped rather than written raw: format
/// characters, non-ASCII spaces, line and paragraph separators, private use
/// code points and noncharacters.
const NON_PRINTABLE: &[(u32, u32)] = &[
    (0x00A0, 0x00A0),
    (0x00AD, 0x00AD),
    (0x0600, 0x0605),
    (0x061C, 0x061C),
    (0x06DD, 0x06DD),
    (0x070F, 0x070F),
    (0x08E2, 0x08E2),
    (0x1680, 0x1680),
    (0x180E, 0x180E),
    (0x2000, 0x200F),
    (0x2028, 0x202F),
    (0x205F, 0x2064),
    (0x2066, 0x206F),
    (0x3000, 0x3000),
    (0xE000, 0xF8FF),
    (0xFDD0, 0xFDEF),
    (0xFEFF, 0xFEFF),
    (0xFFF9, 0xFFFB),
    (0x110BD, 0x110BD),
    (0x110CD, 0x110CD),
    (0x13430, 0x1343F),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
    (0xF0000, 0x10FFFF),
];

fn is_printable(c: char) -> bool {
    let code = c as u32;
    // Every plane ends in two noncharacters.
    if code & 0xFFFE == 0xFFFE {
        return false;
    }
    !NON_PRINTABLE
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

// Convenience functions

/// Renders an expression as single-line query text.
///
/// # Examples
///
/// ```
/// use promql_ast::builder::quantile;
/// use promql_ast::ast::{Expr, InstantSelector};
/// use promql_ast::output::render;
///
/// let expr: Expr = quantile(0.9, InstantSelector::new("latency_seconds")).into();
/// assert_eq!(render(&expr).unwrap(), "quantile(0.9, latency_seconds)");
/// ```
///
/// # Errors
///
/// Returns [`AstError::MalformedNode`](crate::error::AstError::MalformedNode)
/// if any node in the tree breaks its variant's invariants.
pub fn render(expr: &Expr) -> AstResult<String> {
    Printer::default().render(expr)
}

/// Renders an expression over multiple lines, starting at indentation `level`.
///
/// Nodes whose single-line form fits in [`DEFAULT_MAX_LINE_WIDTH`] bytes stay
/// on one line. Longer aggregations, calls and parentheses put their operands
/// on their own lines one level deeper, closing on a line of their own.
/// Longer binary operations put the operator on its own line between the two
/// operand blocks.
///
/// # Examples
///
/// ```
/// use promql_ast::ast::{Expr, InstantSelector};
/// use promql_ast::output::render_pretty;
///
/// let expr: Expr = InstantSelector::new("up").into();
/// assert_eq!(render_pretty(&expr, 1).unwrap(), "  up");
/// ```
pub fn render_pretty(expr: &Expr, level: usize) -> AstResult<String> {
    Printer::default().render_pretty(expr, level)
}
