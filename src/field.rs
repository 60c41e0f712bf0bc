//! Field classification: raw type shapes to bounded semantic categories.
//!
//! Classification is a pure function of the field shape and the time-pattern
//! table. It never fails: shapes that fit no category degrade to
//! [`FieldCategory::Unknown`], which still yields an equality-only filter
//! API rather than aborting generation.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::schema::{qualify_name, RawField, TypeShape};

/// An exact type-name to time-type mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePattern {
    /// Display name to match, e.g. `time.Time`. Exact match only; aliased
    /// or renamed time types need their own entry.
    pub type_name: String,
    /// Whether the type supports range comparison like a numeric value.
    pub is_orderable: bool,
}

/// Ordered, caller-extensible table of time-type patterns. Built once per
/// generation run and treated as read-only while classification runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePatternTable {
    patterns: Vec<TimePattern>,
}

impl Default for TimePatternTable {
    fn default() -> Self {
        let builtin = [
            "time.Time",
            "datatypes.Date",
            "datatypes.Time",
            "datatypes.DateTime",
            "sql.NullTime",
            "pq.NullTime",
        ];
        TimePatternTable {
            patterns: builtin
                .iter()
                .map(|name| TimePattern {
                    type_name: (*name).to_string(),
                    is_orderable: true,
                })
                .collect(),
        }
    }
}

impl TimePatternTable {
    /// The built-in patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with no built-ins.
    pub fn empty() -> Self {
        TimePatternTable {
            patterns: Vec::new(),
        }
    }

    /// Append a pattern. First match wins on lookup, so an entry never
    /// overrides an earlier exact duplicate.
    pub fn add(&mut self, type_name: impl Into<String>, is_orderable: bool) {
        self.patterns.push(TimePattern {
            type_name: type_name.into(),
            is_orderable,
        });
    }

    /// First pattern whose name equals `type_name`, if any.
    pub fn matches(&self, type_name: &str) -> Option<&TimePattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.type_name == type_name)
    }
}

/// Semantic category of a classified field. Exactly one is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    String,
    Numeric,
    Time,
    Bool,
    Pointer,
    Slice,
    Map,
    Struct,
    Unknown,
}

impl FieldCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldCategory::String => "string",
            FieldCategory::Numeric => "numeric",
            FieldCategory::Time => "time",
            FieldCategory::Bool => "bool",
            FieldCategory::Pointer => "pointer",
            FieldCategory::Slice => "slice",
            FieldCategory::Map => "map",
            FieldCategory::Struct => "struct",
            FieldCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedField {
    pub name: String,
    pub column_name: String,
    /// Display type name, e.g. `*time.Time` or `Wrapper<int64>`.
    pub type_name: String,
    pub category: FieldCategory,
    /// Meaningful only when `category` is [`FieldCategory::Time`].
    pub is_orderable_time: bool,
    pub is_pointer: bool,
    /// Category of the dereferenced shape, one level only. Recorded but
    /// never promoted: a pointer's operator set is fixed regardless of what
    /// it points to.
    pub pointed_category: Option<FieldCategory>,
    /// True when the named type carried type arguments. Display-only; the
    /// category stays driven by the base type.
    pub is_generic: bool,
    /// Display names of the type arguments, in declaration order.
    pub type_args: Vec<String>,
}

/// Resolves raw fields against a time-pattern table and a local namespace.
#[derive(Debug, Clone, Copy)]
pub struct FieldClassifier<'a> {
    patterns: &'a TimePatternTable,
    local_namespace: Option<&'a str>,
}

impl<'a> FieldClassifier<'a> {
    pub fn new(patterns: &'a TimePatternTable) -> Self {
        FieldClassifier {
            patterns,
            local_namespace: None,
        }
    }

    /// Named types declared in `namespace` display unqualified.
    pub fn with_namespace(patterns: &'a TimePatternTable, namespace: &'a str) -> Self {
        FieldClassifier {
            patterns,
            local_namespace: Some(namespace),
        }
    }

    /// Classify a field. Returns `None` iff the field carries the exclusion
    /// marker; every other shape gets a best-effort classification.
    pub fn classify(&self, field: &RawField) -> Option<ClassifiedField> {
        if field.tags.skip {
            debug!("skipping field `{}`: exclusion tag", field.name);
            return None;
        }

        let info = self.classify_shape(&field.name, &field.column_name(), &field.shape);
        if info.category == FieldCategory::Unknown {
            debug!(
                "field `{}` has unrecognized type `{}`, classified as unknown",
                info.name, info.type_name
            );
        }
        Some(info)
    }

    fn classify_shape(&self, name: &str, column: &str, shape: &TypeShape) -> ClassifiedField {
        let mut info = ClassifiedField {
            name: name.to_string(),
            column_name: column.to_string(),
            type_name: shape.display_name(self.local_namespace),
            category: FieldCategory::Unknown,
            is_orderable_time: false,
            is_pointer: false,
            pointed_category: None,
            is_generic: false,
            type_args: Vec::new(),
        };

        // Time patterns win over everything else, including aggregates.
        if let Some(pattern) = self.patterns.matches(&info.type_name) {
            info.category = FieldCategory::Time;
            info.is_orderable_time = pattern.is_orderable;
            return info;
        }

        match shape {
            TypeShape::Primitive {
                name: type_name,
                is_string,
                is_numeric,
            } => {
                info.category = if *is_string {
                    FieldCategory::String
                } else if *is_numeric {
                    FieldCategory::Numeric
                } else if type_name.to_lowercase().contains("bool") {
                    // Fallback heuristic: booleans carry no intrinsic flag.
                    FieldCategory::Bool
                } else {
                    FieldCategory::Unknown
                };
            }
            TypeShape::Slice { .. } => info.category = FieldCategory::Slice,
            TypeShape::Map { .. } => info.category = FieldCategory::Map,
            TypeShape::Struct { .. } => info.category = FieldCategory::Struct,
            TypeShape::Pointer { inner } => {
                // Exactly one level of indirection is resolved; a pointer to
                // a pointer records `Pointer` as its pointed category.
                let pointee = self.classify_shape(name, column, inner);
                info.category = FieldCategory::Pointer;
                info.is_pointer = true;
                info.pointed_category = Some(pointee.category);
                info.type_name = format!("*{}", pointee.type_name);
            }
            TypeShape::Named {
                name: base,
                namespace,
                underlying,
                type_args,
            } => {
                let mut named = self.classify_shape(name, column, underlying);
                named.type_name =
                    qualify_name(base, namespace.as_deref(), self.local_namespace);

                // A named record-shaped type matching a time pattern is an
                // opaque time value, not an aggregate.
                if let Some(pattern) = self.patterns.matches(&named.type_name) {
                    named.category = FieldCategory::Time;
                    named.is_orderable_time = pattern.is_orderable;
                } else if named.category == FieldCategory::Unknown
                    && named.type_name.to_lowercase().contains("bool")
                {
                    named.category = FieldCategory::Bool;
                }

                if !type_args.is_empty() {
                    let args: Vec<String> = type_args
                        .iter()
                        .map(|arg| self.classify_shape(name, column, arg).type_name)
                        .collect();
                    named.type_name = format!("{}<{}>", named.type_name, args.join(", "));
                    named.is_generic = true;
                    named.type_args = args;
                }

                return named;
            }
        }

        info
    }
}
