//! Method synthesis: classified fields to generated-method specifications.
//!
//! The factory is deterministic: identical inputs yield identical
//! [`MethodSpec`] values. Bodies stay structured ([`MethodBody`]) so a code
//! assembler can render them into any concrete syntax and the call-shape
//! invariants remain testable without text matching.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Error;
use crate::field::ClassifiedField;
use crate::runtime::{Operator, SortDirection};

/// Reserved words of the emitted language. A parameter identifier that
/// collides with one gets a `Value` suffix.
static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "break",
        "case",
        "chan",
        "const",
        "continue",
        "default",
        "defer",
        "else",
        "fallthrough",
        "for",
        "func",
        "go",
        "goto",
        "if",
        "import",
        "interface",
        "map",
        "package",
        "range",
        "return",
        "select",
        "struct",
        "switch",
        "type",
        "var",
    ]
    .into_iter()
    .collect()
});

/// Call shape of a generated method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// No parameters; compares against the null sentinel or appends a
    /// fixed sort directive.
    Unary,
    /// Exactly one parameter of the field's declared type.
    Binary,
    /// Zero or more values of the field's declared type.
    Variadic,
}

/// Receiver of a generated method: a short variable over a builder type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub var: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub variadic: bool,
}

/// Structured body template; the assembler renders it into final text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MethodBody {
    /// Append a filter predicate. `argument` names the parameter holding
    /// the comparison value; `None` means the null sentinel.
    PushFilter {
        column: String,
        operator: Operator,
        argument: Option<String>,
    },
    /// Record a field assignment in the change set.
    SetField { column: String, argument: String },
    /// Append a sort directive.
    PushSort {
        column: String,
        direction: SortDirection,
    },
}

/// Specification of one generated API method. Created once per
/// (field, operator) or per field, immutable, consumed by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    pub receiver: Receiver,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub body: MethodBody,
    pub documentation: String,
}

impl MethodSpec {
    /// The call shape, derived from the body. Parameters are empty iff
    /// the kind is [`BodyKind::Unary`].
    pub fn body_kind(&self) -> BodyKind {
        match &self.body {
            MethodBody::PushFilter { operator, .. } => {
                if operator.is_unary() {
                    BodyKind::Unary
                } else if operator.is_variadic() {
                    BodyKind::Variadic
                } else {
                    BodyKind::Binary
                }
            }
            MethodBody::SetField { .. } => BodyKind::Binary,
            MethodBody::PushSort { .. } => BodyKind::Unary,
        }
    }
}

/// Method-name suffix for a filter operator.
pub const fn method_suffix(operator: Operator) -> &'static str {
    match operator {
        Operator::Equal => "Eq",
        Operator::NotEqual => "Ne",
        Operator::LessThan => "Lt",
        Operator::LessThanOrEqual => "Lte",
        Operator::GreaterThan => "Gt",
        Operator::GreaterThanOrEqual => "Gte",
        Operator::Like => "Like",
        Operator::NotLike => "NotLike",
        Operator::IsNull => "IsNull",
        Operator::IsNotNull => "IsNotNull",
        Operator::In => "In",
        Operator::NotIn => "NotIn",
    }
}

/// Lower-camel a field name, keeping acronym runs intact:
/// `ID` -> `id`, `UpdatedAt` -> `updatedAt`, `HTTPCode` -> `httpCode`.
fn lower_camel(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut i = 0;
    while i < chars.len() && chars[i].is_uppercase() {
        // Keep the capital that starts the next word after an acronym run.
        if i > 0 && chars.get(i + 1).is_some_and(|next| next.is_lowercase()) {
            break;
        }
        out.extend(chars[i].to_lowercase());
        i += 1;
    }
    out.extend(&chars[i..]);
    out
}

/// Parameter identifier for a field: lower-camel name, pluralized first
/// for variadic parameters, then suffixed with `Value` on a reserved-word
/// collision.
fn parameter_ident(field_name: &str, variadic: bool) -> String {
    let mut ident = lower_camel(field_name);
    if ident.is_empty() {
        ident.push_str("value");
    }
    if variadic {
        ident.push('s');
    }
    if RESERVED_WORDS.contains(ident.as_str()) {
        ident.push_str("Value");
    }
    ident
}

/// Synthesizes filter, update, and sort method specifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodFactory;

impl MethodFactory {
    pub fn new() -> Self {
        MethodFactory
    }

    fn receiver(record_name: &str, suffix: &str) -> Receiver {
        let type_name = format!("{record_name}{suffix}");
        let var = type_name
            .chars()
            .next()
            .map(|c| c.to_lowercase().to_string())
            .unwrap_or_default();
        Receiver { var, type_name }
    }

    /// One filter method per supported operator, in operator-set order.
    /// Filter synthesis for a non-filterable field is a caller-contract
    /// violation and aborts the record.
    pub fn filter_methods(
        &self,
        record_name: &str,
        field: &ClassifiedField,
    ) -> Result<Vec<MethodSpec>, Error> {
        if !field.is_filterable() {
            return Err(Error::NotFilterable(field.name.clone()));
        }
        Ok(field
            .supported_operators()
            .iter()
            .map(|&operator| self.filter_method(record_name, field, operator))
            .collect())
    }

    /// The filter method for one (field, operator) pair.
    pub fn filter_method(
        &self,
        record_name: &str,
        field: &ClassifiedField,
        operator: Operator,
    ) -> MethodSpec {
        let name = format!("{}{}", field.name, method_suffix(operator));
        let receiver = Self::receiver(record_name, "Filters");
        let return_type = format!("*{}", receiver.type_name);

        if operator.is_unary() {
            return MethodSpec {
                documentation: format!("{name} filters by {} is null check", field.name),
                name,
                receiver,
                parameters: Vec::new(),
                return_type,
                body: MethodBody::PushFilter {
                    column: field.column_name.clone(),
                    operator,
                    argument: None,
                },
            };
        }

        let variadic = operator.is_variadic();
        let param = parameter_ident(&field.name, variadic);
        let documentation = if variadic {
            format!("{name} filters by {} in list", field.name)
        } else {
            format!(
                "{name} filters by {} {}",
                field.name,
                method_suffix(operator).to_lowercase()
            )
        };

        MethodSpec {
            name,
            receiver,
            parameters: vec![Parameter {
                name: param.clone(),
                type_name: field.type_name.clone(),
                variadic,
            }],
            return_type,
            body: MethodBody::PushFilter {
                column: field.column_name.clone(),
                operator,
                argument: Some(param),
            },
            documentation,
        }
    }

    /// The setter produced for every field, filterable or not.
    pub fn update_method(&self, record_name: &str, field: &ClassifiedField) -> MethodSpec {
        let name = format!("Set{}", field.name);
        let receiver = Self::receiver(record_name, "Updater");
        let return_type = format!("*{}", receiver.type_name);
        let param = parameter_ident(&field.name, false);

        MethodSpec {
            documentation: format!("{name} sets the {} field for update", field.name),
            name,
            receiver,
            parameters: vec![Parameter {
                name: param.clone(),
                type_name: field.type_name.clone(),
                variadic: false,
            }],
            return_type,
            body: MethodBody::SetField {
                column: field.column_name.clone(),
                argument: param,
            },
        }
    }

    /// One sort method for the given direction; produced only for
    /// filterable fields (the caller gates).
    pub fn sort_method(
        &self,
        record_name: &str,
        field: &ClassifiedField,
        direction: SortDirection,
    ) -> MethodSpec {
        let name = format!("OrderBy{}{}", field.name, direction.name_suffix());
        let receiver = Self::receiver(record_name, "Options");
        let return_type = format!("*{}", receiver.type_name);

        MethodSpec {
            documentation: format!(
                "{name} orders results by {} {}",
                field.name,
                direction.as_str()
            ),
            name,
            receiver,
            parameters: Vec::new(),
            return_type,
            body: MethodBody::PushSort {
                column: field.column_name.clone(),
                direction,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldCategory;

    fn field(name: &str, category: FieldCategory, type_name: &str) -> ClassifiedField {
        ClassifiedField {
            name: name.to_string(),
            column_name: crate::schema::default_column_name(name),
            type_name: type_name.to_string(),
            category,
            is_orderable_time: false,
            is_pointer: category == FieldCategory::Pointer,
            pointed_category: None,
            is_generic: false,
            type_args: Vec::new(),
        }
    }

    #[test]
    fn binary_filter_method_shape() {
        let factory = MethodFactory::new();
        let spec = factory.filter_method(
            "User",
            &field("Name", FieldCategory::String, "string"),
            Operator::Like,
        );

        assert_eq!(spec.name, "NameLike");
        assert_eq!(spec.receiver.var, "u");
        assert_eq!(spec.receiver.type_name, "UserFilters");
        assert_eq!(spec.return_type, "*UserFilters");
        assert_eq!(spec.body_kind(), BodyKind::Binary);
        assert_eq!(spec.parameters.len(), 1);
        assert_eq!(spec.parameters[0].name, "name");
        assert_eq!(spec.parameters[0].type_name, "string");
        assert!(!spec.parameters[0].variadic);
        assert_eq!(spec.documentation, "NameLike filters by Name like");
        assert_eq!(
            spec.body,
            MethodBody::PushFilter {
                column: "name".to_string(),
                operator: Operator::Like,
                argument: Some("name".to_string()),
            }
        );
    }

    #[test]
    fn unary_filter_method_has_no_parameters() {
        let factory = MethodFactory::new();
        let spec = factory.filter_method(
            "User",
            &field("UpdatedAt", FieldCategory::Pointer, "*time.Time"),
            Operator::IsNull,
        );

        assert_eq!(spec.name, "UpdatedAtIsNull");
        assert_eq!(spec.body_kind(), BodyKind::Unary);
        assert!(spec.parameters.is_empty());
        assert_eq!(
            spec.body,
            MethodBody::PushFilter {
                column: "updated_at".to_string(),
                operator: Operator::IsNull,
                argument: None,
            }
        );
    }

    #[test]
    fn variadic_filter_method_pluralizes_parameter() {
        let factory = MethodFactory::new();
        let spec = factory.filter_method(
            "User",
            &field("ID", FieldCategory::Numeric, "int64"),
            Operator::In,
        );

        assert_eq!(spec.name, "IDIn");
        assert_eq!(spec.body_kind(), BodyKind::Variadic);
        assert_eq!(spec.parameters.len(), 1);
        assert_eq!(spec.parameters[0].name, "ids");
        assert_eq!(spec.parameters[0].type_name, "int64");
        assert!(spec.parameters[0].variadic);
        assert_eq!(spec.documentation, "IDIn filters by ID in list");
    }

    #[test]
    fn reserved_word_parameters_get_value_suffix() {
        assert_eq!(parameter_ident("Type", false), "typeValue");
        assert_eq!(parameter_ident("Map", false), "mapValue");
        // Pluralization happens before the reserved-word check.
        assert_eq!(parameter_ident("Type", true), "types");
        assert_eq!(parameter_ident("", false), "value");
        assert_eq!(parameter_ident("", true), "values");
    }

    #[test]
    fn lower_camel_keeps_acronym_runs() {
        assert_eq!(lower_camel("ID"), "id");
        assert_eq!(lower_camel("Name"), "name");
        assert_eq!(lower_camel("UpdatedAt"), "updatedAt");
        assert_eq!(lower_camel("HTTPCode"), "httpCode");
        assert_eq!(lower_camel("already"), "already");
    }

    #[test]
    fn update_method_shape() {
        let factory = MethodFactory::new();
        let spec = factory.update_method(
            "Product",
            &field("Tags", FieldCategory::Slice, "[]string"),
        );

        assert_eq!(spec.name, "SetTags");
        assert_eq!(spec.receiver.type_name, "ProductUpdater");
        assert_eq!(spec.receiver.var, "p");
        assert_eq!(spec.return_type, "*ProductUpdater");
        assert_eq!(spec.parameters[0].name, "tags");
        assert_eq!(spec.parameters[0].type_name, "[]string");
        assert_eq!(spec.body_kind(), BodyKind::Binary);
        assert_eq!(spec.documentation, "SetTags sets the Tags field for update");
        assert_eq!(
            spec.body,
            MethodBody::SetField {
                column: "tags".to_string(),
                argument: "tags".to_string(),
            }
        );
    }

    #[test]
    fn sort_method_shape() {
        let factory = MethodFactory::new();
        let spec = factory.sort_method(
            "User",
            &field("CreatedAt", FieldCategory::Time, "time.Time"),
            SortDirection::Desc,
        );

        assert_eq!(spec.name, "OrderByCreatedAtDesc");
        assert_eq!(spec.receiver.type_name, "UserOptions");
        assert!(spec.parameters.is_empty());
        assert_eq!(spec.body_kind(), BodyKind::Unary);
        assert_eq!(
            spec.documentation,
            "OrderByCreatedAtDesc orders results by CreatedAt desc"
        );
        assert_eq!(
            spec.body,
            MethodBody::PushSort {
                column: "created_at".to_string(),
                direction: SortDirection::Desc,
            }
        );
    }

    #[test]
    fn filter_synthesis_rejects_non_filterable_fields() {
        let factory = MethodFactory::new();
        let err = factory
            .filter_methods("User", &field("Tags", FieldCategory::Slice, "[]string"))
            .unwrap_err();
        assert_eq!(err, Error::NotFilterable("Tags".to_string()));
    }

    #[test]
    fn synthesis_is_deterministic() {
        let factory = MethodFactory::new();
        let f = field("Name", FieldCategory::String, "string");
        assert_eq!(
            factory.filter_method("User", &f, Operator::Equal),
            factory.filter_method("User", &f, Operator::Equal)
        );
        assert_eq!(
            factory.update_method("User", &f),
            factory.update_method("User", &f)
        );
    }

    #[test]
    fn shape_consistency_across_all_operators() {
        let factory = MethodFactory::new();
        let f = field("Name", FieldCategory::String, "string");
        let operators = [
            Operator::Equal,
            Operator::NotEqual,
            Operator::LessThan,
            Operator::LessThanOrEqual,
            Operator::GreaterThan,
            Operator::GreaterThanOrEqual,
            Operator::Like,
            Operator::NotLike,
            Operator::IsNull,
            Operator::IsNotNull,
            Operator::In,
            Operator::NotIn,
        ];
        for operator in operators {
            let spec = factory.filter_method("User", &f, operator);
            assert_eq!(spec.body_kind() == BodyKind::Unary, operator.is_unary());
            assert_eq!(
                spec.body_kind() == BodyKind::Variadic,
                operator.is_variadic()
            );
            assert_eq!(
                spec.parameters.is_empty(),
                spec.body_kind() == BodyKind::Unary
            );
        }
    }
}
