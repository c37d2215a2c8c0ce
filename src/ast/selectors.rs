use crate::ast::{Expr, LabelMatcher, PositionRange};
use crate::duration::{Duration, parse_duration};
use crate::error::{AstError, AstResult};

/// Evaluation-time anchor of a selector or subquery (`@ ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtModifier {
    /// A fixed instant in milliseconds since the Unix epoch (`@ 1609746000.000`)
    Timestamp(i64),
    /// Start of the query range (`@ start()`)
    Start,
    /// End of the query range (`@ end()`)
    End,
}

/// Instant vector selector.
///
/// # Examples
/// ```text
/// http_requests_total
/// http_requests_total{job="api",code=~"5.."}
/// {__name__=~"job:.*"} offset 5m @ end()
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstantSelector {
    /// Metric name, omitted from the braces form when unset
    pub name: Option<String>,

    /// Label filters, rendered in this order
    pub matchers: Vec<LabelMatcher>,

    /// Offset modifier; zero means no offset clause
    pub offset: Duration,

    pub at: Option<AtModifier>,

    pub pos: PositionRange,
}

impl InstantSelector {
    /// Selector for a metric name.
    pub fn new(name: impl Into<String>) -> Self {
        InstantSelector {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_matcher(mut self, matcher: LabelMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn with_matchers(mut self, matchers: impl IntoIterator<Item = LabelMatcher>) -> Self {
        self.matchers.extend(matchers);
        self
    }

    pub fn with_offset(mut self, offset: Duration) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the offset from a duration literal such as `1h`.
    pub fn with_offset_str(self, offset: &str) -> AstResult<Self> {
        Ok(self.with_offset(parse_duration(offset)?))
    }

    pub fn at_start(mut self) -> Self {
        self.at = Some(AtModifier::Start);
        self
    }

    pub fn at_end(mut self) -> Self {
        self.at = Some(AtModifier::End);
        self
    }

    /// Anchors the selector at a fixed instant given in milliseconds.
    pub fn at_timestamp(mut self, millis: i64) -> Self {
        self.at = Some(AtModifier::Timestamp(millis));
        self
    }

    pub fn with_pos(mut self, pos: PositionRange) -> Self {
        self.pos = pos;
        self
    }

    /// Turns the selector into a range selector over `range`.
    pub fn range(self, range: Duration) -> RangeSelector {
        RangeSelector::new(self, range)
    }

    /// Turns the selector into a range selector over a duration literal.
    pub fn range_str(self, range: &str) -> AstResult<RangeSelector> {
        Ok(RangeSelector::new(self, parse_duration(range)?))
    }

    /// Turns the selector into a range selector whose range is a placeholder
    /// such as `$__rate_interval`, written out verbatim.
    pub fn range_variable(self, name: impl Into<String>) -> RangeSelector {
        RangeSelector::new(self, RangeDuration::Variable(name.into()))
    }

    /// Checks that the selector selects something: a metric name or at least
    /// one label matcher.
    pub fn validate(&self) -> AstResult<()> {
        let has_name = self.name.as_deref().is_some_and(|name| !name.is_empty());
        if !has_name && self.matchers.is_empty() {
            return Err(AstError::malformed(
                "instant selector",
                "selector needs a metric name or at least one label matcher",
            ));
        }
        Ok(())
    }
}

/// The window of a range selector.
///
/// A range is either a resolved duration or a symbolic placeholder that is
/// substituted later by dashboard tooling, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeDuration {
    /// A duration, rendered in compact unit notation (`5m`, `1h30m`)
    Resolved(Duration),
    /// A placeholder name rendered verbatim (`$__rate_interval`)
    Variable(String),
}

impl From<Duration> for RangeDuration {
    fn from(value: Duration) -> Self {
        RangeDuration::Resolved(value)
    }
}

/// Range vector selector: an instant selector read over a time window.
///
/// The offset and `@` modifiers are stored on the inner selector but are
/// written after the range, since they apply to the whole range selector.
///
/// # Examples
/// ```text
/// http_requests_total[5m]
/// http_requests_total{job="api"}[$__rate_interval] offset 1h
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSelector {
    /// Always an [`Expr::InstantSelector`] in a well-formed tree
    pub selector: Box<Expr>,

    pub range: RangeDuration,

    pub pos: PositionRange,
}

impl RangeSelector {
    pub fn new(selector: InstantSelector, range: impl Into<RangeDuration>) -> Self {
        RangeSelector {
            selector: Box::new(Expr::InstantSelector(selector)),
            range: range.into(),
            pos: PositionRange::default(),
        }
    }

    /// The wrapped instant selector, checked with [`InstantSelector::validate`].
    pub fn instant_selector(&self) -> AstResult<&InstantSelector> {
        match self.selector.as_ref() {
            Expr::InstantSelector(selector) => {
                selector.validate()?;
                Ok(selector)
            }
            other => Err(AstError::malformed(
                "range selector",
                format!("expected an instant selector, found {}", other.kind()),
            )),
        }
    }
}

/// Subquery: an instant expression evaluated over a range at a fixed step.
///
/// # Examples
/// ```text
/// rate(http_requests_total[5m])[30m:1m]
/// max_over_time(up[10m:]) offset 1d
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub expr: Box<Expr>,

    pub range: Duration,

    /// Resolution step; the default evaluation interval when unset
    pub step: Option<Duration>,

    /// Offset modifier; zero means no offset clause
    pub offset: Duration,

    pub at: Option<AtModifier>,

    pub pos: PositionRange,
}

impl Subquery {
    pub fn new(expr: impl Into<Expr>, range: Duration) -> Self {
        Subquery {
            expr: Box::new(expr.into()),
            range,
            step: None,
            offset: Duration::ZERO,
            at: None,
            pos: PositionRange::default(),
        }
    }

    /// Subquery over a range given as a duration literal.
    pub fn from_range_str(expr: impl Into<Expr>, range: &str) -> AstResult<Self> {
        Ok(Self::new(expr, parse_duration(range)?))
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_offset(mut self, offset: Duration) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_offset_str(self, offset: &str) -> AstResult<Self> {
        Ok(self.with_offset(parse_duration(offset)?))
    }

    pub fn at_start(mut self) -> Self {
        self.at = Some(AtModifier::Start);
        self
    }

    pub fn at_end(mut self) -> Self {
        self.at = Some(AtModifier::End);
        self
    }

    pub fn at_timestamp(mut self, millis: i64) -> Self {
        self.at = Some(AtModifier::Timestamp(millis));
        self
    }
}
