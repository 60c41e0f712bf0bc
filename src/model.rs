//! Filterability and operator sets per field category.
//!
//! The mapping is fixed: there is no per-field or runtime configuration.
//! Every filterable category starts with Equal/NotEqual; containers and
//! aggregates are not filterable at all and get an empty set.

use crate::field::{ClassifiedField, FieldCategory};
use crate::runtime::Operator;

const EQUALITY_OPERATORS: &[Operator] = &[Operator::Equal, Operator::NotEqual];

const STRING_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::Like,
    Operator::NotLike,
    Operator::In,
    Operator::NotIn,
    Operator::LessThan,
    Operator::GreaterThan,
    Operator::LessThanOrEqual,
    Operator::GreaterThanOrEqual,
];

const RANGE_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::LessThan,
    Operator::GreaterThan,
    Operator::LessThanOrEqual,
    Operator::GreaterThanOrEqual,
    Operator::In,
    Operator::NotIn,
];

// Nullability is the only semantic pointers add here: a pointer never
// inherits range or pattern operators from its pointee, even a numeric or
// time-valued one. Candidate product decision, preserved as-is.
const POINTER_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::IsNull,
    Operator::IsNotNull,
];

impl FieldCategory {
    /// Containers and aggregates cannot appear in filter predicates;
    /// everything else can, including `Unknown`.
    pub const fn is_filterable(self) -> bool {
        !matches!(
            self,
            FieldCategory::Slice | FieldCategory::Map | FieldCategory::Struct
        )
    }

    /// The ordered operator set for this category. Empty for
    /// non-filterable categories.
    pub const fn supported_operators(self) -> &'static [Operator] {
        match self {
            FieldCategory::String => STRING_OPERATORS,
            FieldCategory::Numeric | FieldCategory::Time => RANGE_OPERATORS,
            FieldCategory::Pointer => POINTER_OPERATORS,
            FieldCategory::Bool | FieldCategory::Unknown => EQUALITY_OPERATORS,
            FieldCategory::Slice | FieldCategory::Map | FieldCategory::Struct => &[],
        }
    }
}

impl ClassifiedField {
    pub fn is_filterable(&self) -> bool {
        self.category.is_filterable()
    }

    pub fn supported_operators(&self) -> &'static [Operator] {
        self.category.supported_operators()
    }
}
