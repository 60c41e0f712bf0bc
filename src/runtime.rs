//! Runtime values produced by generated builders.
//!
//! Generated filter/update/sort methods accumulate the types below at run
//! time; a persistence adapter turns them into actual query execution. This
//! crate never executes anything itself, it only fixes the contract.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A comparison kind usable in a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
    In,
    NotIn,
}

impl Operator {
    /// Wire symbol understood by the persistence adapter.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT_LIKE",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
        }
    }

    /// Operators whose generated method takes no parameters and compares
    /// against the null sentinel.
    pub const fn is_unary(self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Operators whose generated method accepts zero or more values.
    pub const fn is_variadic(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One filter predicate: column, operator, comparison value.
/// `value` is `None` for the unary operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub operator: Operator,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// `Asc` -> `"Asc"`, used when composing sort method names.
    pub(crate) const fn name_suffix(self) -> &'static str {
        match self {
            SortDirection::Asc => "Asc",
            SortDirection::Desc => "Desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub column: String,
    pub direction: SortDirection,
}

/// Pagination and ordering options accumulated by generated option methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_fields: Vec<SortField>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_fields.push(SortField {
            column: column.into(),
            direction,
        });
        self
    }
}

/// Logical field name to new value, accumulated by generated setters.
pub type ChangeSet = BTreeMap<String, Value>;

/// Contract a generated filter builder exposes to the persistence adapter.
pub trait FilterSource {
    fn filters(&self) -> &[Filter];
}

/// Contract a generated updater exposes to the persistence adapter.
pub trait ChangeSetSource {
    fn change_set(&self) -> &ChangeSet;
}
