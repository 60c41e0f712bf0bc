//! Query-builder code generation core.
//!
//! Turns a declarative record schema (an ordered field list with raw type
//! shapes and tag metadata) into specifications for a fluent, type-checked
//! query-building API: filter builders, field-update builders, and
//! sort-option builders, plus a logical-name to column-name map.
//!
//! Parsing record declarations and rendering the synthesized
//! [`MethodSpec`] lists into source text are the job of the surrounding
//! toolchain; this crate only classifies field types and synthesizes
//! method specifications. Everything here is pure and stateless over
//! immutable inputs, so independent records can be planned in parallel.

pub mod error;
pub mod field;
pub mod methods;
pub mod model;
pub mod plan;
pub mod runtime;
pub mod schema;

pub use error::{Error, Result};
pub use field::{ClassifiedField, FieldCategory, FieldClassifier, TimePattern, TimePatternTable};
pub use methods::{BodyKind, MethodBody, MethodFactory, MethodSpec, Parameter, Receiver};
pub use plan::{Planner, RecordPlan};
pub use runtime::{
    ChangeSet, ChangeSetSource, Filter, FilterSource, Operator, QueryOptions, SortDirection,
    SortField,
};
pub use schema::{FieldTags, RawField, RecordSchema, TypeShape};
