//! Record-level orchestration: schemas in, method plans out.
//!
//! A [`Planner`] threads one finalized [`TimePatternTable`] through every
//! classification and gates synthesis on filterability. Records and fields
//! are processed in input order, which fixes the emitted method order.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::{ClassifiedField, FieldClassifier, TimePatternTable};
use crate::methods::{MethodFactory, MethodSpec};
use crate::runtime::SortDirection;
use crate::schema::RecordSchema;

/// Everything the code assembler needs for one record: the three ordered
/// method lists plus the logical-name to column-name map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPlan {
    pub record_name: String,
    pub fields: Vec<ClassifiedField>,
    pub filter_methods: Vec<MethodSpec>,
    pub update_methods: Vec<MethodSpec>,
    pub sort_methods: Vec<MethodSpec>,
    /// Ordered `(logical name, column name)` pairs for all non-excluded
    /// fields, filterable or not.
    pub columns: Vec<(String, String)>,
}

/// Plans query-builder generation for a batch of records.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    patterns: TimePatternTable,
    factory: MethodFactory,
}

impl Planner {
    /// A planner over the built-in time patterns.
    pub fn new() -> Self {
        Self::with_patterns(TimePatternTable::default())
    }

    /// A planner over a caller-extended pattern table. The table is
    /// finalized here; there is no mutation once planning starts.
    pub fn with_patterns(patterns: TimePatternTable) -> Self {
        Planner {
            patterns,
            factory: MethodFactory::new(),
        }
    }

    /// Plan one record. Excluded fields are absent from every list; filter
    /// and sort methods are produced only for filterable fields, setters
    /// for all of them.
    pub fn plan_record(&self, record: &RecordSchema) -> Result<RecordPlan> {
        let classifier = match &record.namespace {
            Some(namespace) => FieldClassifier::with_namespace(&self.patterns, namespace),
            None => FieldClassifier::new(&self.patterns),
        };

        let mut plan = RecordPlan {
            record_name: record.name.clone(),
            fields: Vec::new(),
            filter_methods: Vec::new(),
            update_methods: Vec::new(),
            sort_methods: Vec::new(),
            columns: Vec::new(),
        };

        for raw in &record.fields {
            let Some(field) = classifier.classify(raw) else {
                continue;
            };

            if field.is_filterable() {
                plan.filter_methods
                    .extend(self.factory.filter_methods(&record.name, &field)?);
                plan.sort_methods
                    .push(self.factory.sort_method(&record.name, &field, SortDirection::Asc));
                plan.sort_methods
                    .push(self.factory.sort_method(&record.name, &field, SortDirection::Desc));
            }
            plan.update_methods
                .push(self.factory.update_method(&record.name, &field));
            plan.columns.push((field.name.clone(), field.column_name.clone()));
            plan.fields.push(field);
        }

        debug!(
            "planned record `{}`: {} filter, {} update, {} sort methods",
            plan.record_name,
            plan.filter_methods.len(),
            plan.update_methods.len(),
            plan.sort_methods.len()
        );
        Ok(plan)
    }

    /// Plan a whole generation run. Fails with
    /// [`Error::NoEligibleRecords`] instead of emitting empty output when
    /// nothing is eligible.
    pub fn plan_records(&self, records: &[RecordSchema]) -> Result<Vec<RecordPlan>> {
        if records.is_empty() {
            return Err(Error::NoEligibleRecords);
        }
        records.iter().map(|record| self.plan_record(record)).collect()
    }
}
