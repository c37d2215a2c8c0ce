use crate::ast::{BinOp, Expr, PositionRange};

/// Whether vector matching joins on the listed labels or on all others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchingMode {
    /// `on (...)`
    On,
    /// `ignoring (...)`
    #[default]
    Ignoring,
}

/// Cardinality of a vector match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    #[default]
    OneToOne,
    /// `group_left`
    ManyToOne,
    /// `group_right`
    OneToMany,
    /// Implied by the set operators `and`, `or`, `unless`
    ManyToMany,
}

/// Vector matching clause of a binary operation.
///
/// # Example
/// ```text
/// ignoring (pod) group_left (namespace)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VectorMatching {
    pub mode: MatchingMode,
    pub labels: Vec<String>,
    pub card: Cardinality,
    /// Extra labels copied from the "one" side (`group_left (...)`)
    pub include: Vec<String>,
}

impl VectorMatching {
    pub fn on(labels: &[&str]) -> Self {
        VectorMatching {
            mode: MatchingMode::On,
            labels: to_owned(labels),
            ..Default::default()
        }
    }

    pub fn ignoring(labels: &[&str]) -> Self {
        VectorMatching {
            mode: MatchingMode::Ignoring,
            labels: to_owned(labels),
            ..Default::default()
        }
    }

    pub fn group_left(mut self, include: &[&str]) -> Self {
        self.card = Cardinality::ManyToOne;
        self.include = to_owned(include);
        self
    }

    pub fn group_right(mut self, include: &[&str]) -> Self {
        self.card = Cardinality::OneToMany;
        self.include = to_owned(include);
        self
    }
}

/// Binary operation between two expressions.
///
/// # Examples
/// ```text
/// errors / requests
/// up == bool 0
/// a - ignoring (pod) group_left (namespace) b
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: BinOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,

    /// Absent means default one-to-one matching on all labels
    pub matching: Option<VectorMatching>,

    /// `bool` modifier of comparison operators
    pub return_bool: bool,

    pub pos: PositionRange,
}

impl BinaryOp {
    pub fn new(op: BinOp, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        BinaryOp {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
            matching: None,
            return_bool: false,
            pos: PositionRange::default(),
        }
    }

    pub fn with_bool(mut self) -> Self {
        self.return_bool = true;
        self
    }

    pub fn with_matching(mut self, matching: VectorMatching) -> Self {
        self.matching = Some(matching);
        self
    }

    pub fn on(self, labels: &[&str]) -> Self {
        self.with_matching(VectorMatching::on(labels))
    }

    pub fn ignoring(self, labels: &[&str]) -> Self {
        self.with_matching(VectorMatching::ignoring(labels))
    }

    /// Many-to-one matching. Without a prior `on`/`ignoring` this matches
    /// with `ignoring ()`.
    pub fn group_left(mut self, include: &[&str]) -> Self {
        let matching = self.matching.take().unwrap_or_default();
        self.matching = Some(matching.group_left(include));
        self
    }

    /// One-to-many matching. Without a prior `on`/`ignoring` this matches
    /// with `ignoring ()`.
    pub fn group_right(mut self, include: &[&str]) -> Self {
        let matching = self.matching.take().unwrap_or_default();
        self.matching = Some(matching.group_right(include));
        self
    }
}

fn to_owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}
