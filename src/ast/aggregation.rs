use crate::ast::{AggregateOp, Expr, PositionRange};
use crate::error::{AstError, AstResult};

/// Whether an aggregation keeps or drops the listed labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupingMode {
    /// `by (...)`: keep only the listed labels
    By,
    /// `without (...)`: drop the listed labels
    Without,
}

/// Grouping clause of an aggregation.
///
/// A present clause is always written out, even with no labels (`by ()`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grouping {
    pub mode: GroupingMode,
    pub labels: Vec<String>,
}

/// Aggregation over the dimensions of an instant vector.
///
/// # Examples
/// ```text
/// sum by (namespace) (rate(http_requests_total[5m]))
/// topk(5, http_requests_total)
/// count_values without (instance) ("version", build_info)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub op: AggregateOp,

    pub expr: Box<Expr>,

    /// Required exactly when [`AggregateOp::takes_param`] holds
    pub param: Option<Box<Expr>>,

    pub grouping: Option<Grouping>,

    pub pos: PositionRange,
}

impl Aggregation {
    pub fn new(op: AggregateOp, expr: impl Into<Expr>) -> Self {
        Aggregation {
            op,
            expr: Box::new(expr.into()),
            param: None,
            grouping: None,
            pos: PositionRange::default(),
        }
    }

    pub fn with_param(mut self, param: impl Into<Expr>) -> Self {
        self.param = Some(Box::new(param.into()));
        self
    }

    pub fn by(mut self, labels: &[&str]) -> Self {
        self.grouping = Some(Grouping {
            mode: GroupingMode::By,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        });
        self
    }

    pub fn without(mut self, labels: &[&str]) -> Self {
        self.grouping = Some(Grouping {
            mode: GroupingMode::Without,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        });
        self
    }

    /// Checks that the parameter is present exactly when the operator needs one.
    pub fn validate(&self) -> AstResult<()> {
        match (self.op.takes_param(), self.param.is_some()) {
            (true, false) => Err(AstError::malformed(
                "aggregation",
                format!("{} requires a parameter", self.op),
            )),
            (false, true) => Err(AstError::malformed(
                "aggregation",
                format!("{} does not take a parameter", self.op),
            )),
            _ => Ok(()),
        }
    }
}
