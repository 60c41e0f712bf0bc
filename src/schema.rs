//! Raw record and field shapes supplied by source ingestion.
//!
//! The types here are the input boundary of the crate: an ingestion tool
//! (a declaration parser, a schema file loader, ...) describes each record
//! as an ordered list of [`RawField`] values and hands them to the
//! classifier. Field order is preserved end-to-end and determines the order
//! of the synthesized methods.

use serde::{Deserialize, Serialize};

/// Recursive description of a field's declared type.
///
/// The set of kinds is closed on purpose so classification can match it
/// exhaustively. Placeholder type parameters are not representable: a
/// generic field must be described through the concrete shape of its
/// instantiation (see [`TypeShape::Named`] with `type_args`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// A built-in scalar type with intrinsic string/numeric flags.
    Primitive {
        name: String,
        #[serde(default)]
        is_string: bool,
        #[serde(default)]
        is_numeric: bool,
    },
    /// One level of indirection around another shape.
    Pointer { inner: Box<TypeShape> },
    /// A homogeneous sequence. The element shape is kept for display only.
    Slice { element: Box<TypeShape> },
    /// A key/value container. Shapes are kept for display only.
    Map {
        key: Box<TypeShape>,
        value: Box<TypeShape>,
    },
    /// An aggregate (record-shaped) type.
    Struct { name: String },
    /// A declared type with an underlying shape and, when instantiated
    /// generically, concrete type arguments.
    Named {
        name: String,
        #[serde(default)]
        namespace: Option<String>,
        underlying: Box<TypeShape>,
        #[serde(default)]
        type_args: Vec<TypeShape>,
    },
}

impl TypeShape {
    /// A primitive carrying the string flag.
    pub fn string_primitive(name: impl Into<String>) -> Self {
        TypeShape::Primitive {
            name: name.into(),
            is_string: true,
            is_numeric: false,
        }
    }

    /// A primitive carrying the numeric flag.
    pub fn numeric_primitive(name: impl Into<String>) -> Self {
        TypeShape::Primitive {
            name: name.into(),
            is_string: false,
            is_numeric: true,
        }
    }

    /// A primitive with neither flag (booleans, opaque scalars).
    pub fn plain_primitive(name: impl Into<String>) -> Self {
        TypeShape::Primitive {
            name: name.into(),
            is_string: false,
            is_numeric: false,
        }
    }

    pub fn pointer(inner: TypeShape) -> Self {
        TypeShape::Pointer {
            inner: Box::new(inner),
        }
    }

    pub fn slice(element: TypeShape) -> Self {
        TypeShape::Slice {
            element: Box::new(element),
        }
    }

    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        TypeShape::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// A named type without type arguments.
    pub fn named(
        name: impl Into<String>,
        namespace: Option<&str>,
        underlying: TypeShape,
    ) -> Self {
        TypeShape::Named {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            underlying: Box::new(underlying),
            type_args: Vec::new(),
        }
    }

    /// The display name of this shape, qualified against the consuming
    /// schema's namespace. A named type declared in `local_namespace`
    /// renders unqualified, everything else as `namespace.Name`.
    pub fn display_name(&self, local_namespace: Option<&str>) -> String {
        match self {
            TypeShape::Primitive { name, .. } | TypeShape::Struct { name } => name.clone(),
            TypeShape::Pointer { inner } => format!("*{}", inner.display_name(local_namespace)),
            TypeShape::Slice { element } => format!("[]{}", element.display_name(local_namespace)),
            TypeShape::Map { key, value } => format!(
                "map[{}]{}",
                key.display_name(local_namespace),
                value.display_name(local_namespace)
            ),
            TypeShape::Named {
                name,
                namespace,
                type_args,
                ..
            } => {
                let base = qualify_name(name, namespace.as_deref(), local_namespace);
                if type_args.is_empty() {
                    base
                } else {
                    let args: Vec<String> = type_args
                        .iter()
                        .map(|arg| arg.display_name(local_namespace))
                        .collect();
                    format!("{}<{}>", base, args.join(", "))
                }
            }
        }
    }
}

pub(crate) fn qualify_name(
    name: &str,
    namespace: Option<&str>,
    local_namespace: Option<&str>,
) -> String {
    match namespace {
        Some(ns) if Some(ns) != local_namespace => format!("{ns}.{name}"),
        _ => name.to_string(),
    }
}

/// Tag-derived per-field settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTags {
    /// Explicit column-name override.
    #[serde(default)]
    pub column: Option<String>,
    /// Exclusion marker; the field never reaches classification.
    #[serde(default)]
    pub skip: bool,
}

impl FieldTags {
    /// Parse a raw tag string of `;`-separated, `:`-keyed settings, e.g.
    /// `"column:user_name;index"`. Keys are case-insensitive; the bare key
    /// `-` marks the field as excluded.
    pub fn parse(raw: &str) -> Self {
        let mut tags = FieldTags::default();
        for part in raw.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (key, value) = match part.split_once(':') {
                Some((k, v)) => (k.trim().to_uppercase(), v.trim()),
                None => (part.to_uppercase(), ""),
            };
            match key.as_str() {
                "-" => tags.skip = true,
                "COLUMN" if !value.is_empty() => tags.column = Some(value.to_string()),
                _ => {}
            }
        }
        tags
    }
}

/// One named member of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    pub shape: TypeShape,
    #[serde(default)]
    pub tags: FieldTags,
}

impl RawField {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        RawField {
            name: name.into(),
            shape,
            tags: FieldTags::default(),
        }
    }

    pub fn with_tags(mut self, tags: FieldTags) -> Self {
        self.tags = tags;
        self
    }

    /// The physical column name: the explicit override when present,
    /// otherwise the field name converted to snake_case.
    pub fn column_name(&self) -> String {
        match &self.tags.column {
            Some(column) => column.clone(),
            None => default_column_name(&self.name),
        }
    }
}

/// A record declaration eligible for query-builder generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub name: String,
    /// Logical namespace the record is declared in; named types from the
    /// same namespace display unqualified.
    #[serde(default)]
    pub namespace: Option<String>,
    pub fields: Vec<RawField>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>, fields: Vec<RawField>) -> Self {
        RecordSchema {
            name: name.into(),
            namespace: None,
            fields,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Snake-case conversion that keeps acronym runs intact:
/// `ID` -> `id`, `UserID` -> `user_id`, `HTTPCode` -> `http_code`.
pub(crate) fn default_column_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for i in 0..chars.len() {
        let c = chars[i];
        if c.is_uppercase() {
            let boundary = match i.checked_sub(1).and_then(|j| chars.get(j)) {
                Some(prev) if prev.is_lowercase() || prev.is_ascii_digit() => true,
                Some(prev) if prev.is_uppercase() => {
                    chars.get(i + 1).is_some_and(|next| next.is_lowercase())
                }
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_collapse_acronym_runs() {
        assert_eq!(default_column_name("ID"), "id");
        assert_eq!(default_column_name("UserID"), "user_id");
        assert_eq!(default_column_name("HTTPCode"), "http_code");
        assert_eq!(default_column_name("Name"), "name");
        assert_eq!(default_column_name("UpdatedAt"), "updated_at");
        assert_eq!(default_column_name("already_snake"), "already_snake");
    }

    #[test]
    fn column_override_wins() {
        let field = RawField::new("Name", TypeShape::string_primitive("string"))
            .with_tags(FieldTags::parse("column:display_name"));
        assert_eq!(field.column_name(), "display_name");
    }

    #[test]
    fn tag_parsing_recognizes_skip_and_column() {
        let tags = FieldTags::parse("column:user_name;-");
        assert_eq!(tags.column.as_deref(), Some("user_name"));
        assert!(tags.skip);

        let tags = FieldTags::parse("COLUMN:N;index");
        assert_eq!(tags.column.as_deref(), Some("N"));
        assert!(!tags.skip);

        assert_eq!(FieldTags::parse(""), FieldTags::default());
    }

    #[test]
    fn display_names_compose() {
        let shape = TypeShape::pointer(TypeShape::named(
            "Time",
            Some("time"),
            TypeShape::Struct {
                name: "Time".to_string(),
            },
        ));
        assert_eq!(shape.display_name(None), "*time.Time");

        let slice = TypeShape::slice(TypeShape::string_primitive("string"));
        assert_eq!(slice.display_name(None), "[]string");

        let map = TypeShape::map(
            TypeShape::string_primitive("string"),
            TypeShape::numeric_primitive("int64"),
        );
        assert_eq!(map.display_name(None), "map[string]int64");
    }

    #[test]
    fn same_namespace_types_display_unqualified() {
        let shape = TypeShape::named(
            "Status",
            Some("app"),
            TypeShape::numeric_primitive("int32"),
        );
        assert_eq!(shape.display_name(Some("app")), "Status");
        assert_eq!(shape.display_name(Some("other")), "app.Status");
        assert_eq!(shape.display_name(None), "app.Status");
    }
}
