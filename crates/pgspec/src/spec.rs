//! Specification trees: storage-agnostic filter, ordering, and pagination intent.
//!
//! A [`Spec`] describes *what* to filter by without naming a physical column
//! or a SQL dialect. Trees are built with the factory functions in this
//! module and handed to a visitor for translation:
//!
//! ```
//! use pgspec::spec;
//!
//! let filter = spec::and([
//!     spec::equal("status", "active"),
//!     spec::or([
//!         spec::equal("role", "admin"),
//!         spec::greater_than("reputation", 100i64),
//!     ]),
//!     spec::order_by("created_at", "DESC"),
//!     spec::limit(20),
//! ]);
//! # let _ = filter;
//! ```
//!
//! Nodes are immutable once constructed and carry no behavior beyond
//! [`Spec::accept`], which dispatches to exactly one [`SpecVisitor`] method
//! per node kind with the payload passed through unmodified. A single tree
//! may be traversed any number of times by independent visitors.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A specification node: one filter, composition, ordering, or pagination
/// instruction.
///
/// Field names are caller-chosen logical names with no inherent storage
/// meaning; nothing here validates them, and values are opaque payload
/// passed through to the compiling side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Spec {
    /// `field = value`
    Equal { field: String, value: Value },
    /// `field <> value`
    NotEqual { field: String, value: Value },
    /// `field > value`
    GreaterThan { field: String, value: Value },
    /// `field < value`
    LowerThan { field: String, value: Value },
    /// `field >= value`
    GreaterThanOrEqual { field: String, value: Value },
    /// `field <= value`
    LowerThanOrEqual { field: String, value: Value },
    /// `field LIKE value`; the pattern is used verbatim, wildcards included.
    Like { field: String, value: Value },
    /// `field IN (values...)`; an empty list is well-formed and compiles to
    /// an always-false condition.
    In { field: String, values: Vec<Value> },
    /// All children must hold; children keep their given order.
    And(Vec<Spec>),
    /// At least one child must hold; children keep their given order.
    Or(Vec<Spec>),
    /// Cap on result count.
    Limit(i64),
    /// Result skip count.
    Offset(i64),
    /// Sort instruction; the direction token is passed through verbatim.
    OrderBy { field: String, direction: String },
}

impl Spec {
    /// Dispatch this node to the single visitor method matching its kind.
    pub fn accept<V: SpecVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Spec::Equal { field, value } => visitor.visit_equal(field, value),
            Spec::NotEqual { field, value } => visitor.visit_not_equal(field, value),
            Spec::GreaterThan { field, value } => visitor.visit_greater_than(field, value),
            Spec::LowerThan { field, value } => visitor.visit_lower_than(field, value),
            Spec::GreaterThanOrEqual { field, value } => {
                visitor.visit_greater_than_or_equal(field, value);
            }
            Spec::LowerThanOrEqual { field, value } => {
                visitor.visit_lower_than_or_equal(field, value);
            }
            Spec::Like { field, value } => visitor.visit_like(field, value),
            Spec::In { field, values } => visitor.visit_in(field, values),
            Spec::And(specs) => visitor.visit_and(specs),
            Spec::Or(specs) => visitor.visit_or(specs),
            Spec::Limit(limit) => visitor.visit_limit(*limit),
            Spec::Offset(offset) => visitor.visit_offset(*offset),
            Spec::OrderBy { field, direction } => visitor.visit_order_by(field, direction),
        }
    }
}

/// Translates specification nodes into something storage-specific.
///
/// Each node kind calls its corresponding method with the node's payload;
/// implementors own all interpretation (field mapping, operator choice,
/// placeholder handling).
pub trait SpecVisitor {
    fn visit_equal(&mut self, field: &str, value: &Value);
    fn visit_not_equal(&mut self, field: &str, value: &Value);
    fn visit_greater_than(&mut self, field: &str, value: &Value);
    fn visit_lower_than(&mut self, field: &str, value: &Value);
    fn visit_greater_than_or_equal(&mut self, field: &str, value: &Value);
    fn visit_lower_than_or_equal(&mut self, field: &str, value: &Value);
    fn visit_like(&mut self, field: &str, value: &Value);
    fn visit_in(&mut self, field: &str, values: &[Value]);
    fn visit_and(&mut self, specs: &[Spec]);
    fn visit_or(&mut self, specs: &[Spec]);
    fn visit_limit(&mut self, limit: i64);
    fn visit_offset(&mut self, offset: i64);
    fn visit_order_by(&mut self, field: &str, direction: &str);
}

/// Create an equality specification: field = value
pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Spec {
    Spec::Equal {
        field: field.into(),
        value: value.into(),
    }
}

/// Create an inequality specification: field <> value
pub fn not_equal(field: impl Into<String>, value: impl Into<Value>) -> Spec {
    Spec::NotEqual {
        field: field.into(),
        value: value.into(),
    }
}

/// Create a greater-than specification: field > value
pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Spec {
    Spec::GreaterThan {
        field: field.into(),
        value: value.into(),
    }
}

/// Create a lower-than specification: field < value
pub fn lower_than(field: impl Into<String>, value: impl Into<Value>) -> Spec {
    Spec::LowerThan {
        field: field.into(),
        value: value.into(),
    }
}

/// Create a greater-than-or-equal specification: field >= value
pub fn greater_than_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Spec {
    Spec::GreaterThanOrEqual {
        field: field.into(),
        value: value.into(),
    }
}

/// Create a lower-than-or-equal specification: field <= value
pub fn lower_than_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Spec {
    Spec::LowerThanOrEqual {
        field: field.into(),
        value: value.into(),
    }
}

/// Create a pattern-match specification: field LIKE pattern
///
/// The pattern is taken verbatim; supply `%`/`_` wildcards yourself.
pub fn like(field: impl Into<String>, pattern: impl Into<Value>) -> Spec {
    Spec::Like {
        field: field.into(),
        value: pattern.into(),
    }
}

/// Create a set-membership specification: field IN (values...)
///
/// Zero values is legal; it compiles to an always-false condition rather
/// than malformed SQL.
pub fn in_list<I>(field: impl Into<String>, values: I) -> Spec
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    Spec::In {
        field: field.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// Compose specifications with AND, preserving their order.
pub fn and(specs: impl IntoIterator<Item = Spec>) -> Spec {
    Spec::And(specs.into_iter().collect())
}

/// Compose specifications with OR, preserving their order.
pub fn or(specs: impl IntoIterator<Item = Spec>) -> Spec {
    Spec::Or(specs.into_iter().collect())
}

/// Cap the result count.
pub fn limit(limit: i64) -> Spec {
    Spec::Limit(limit)
}

/// Skip the first `offset` results.
pub fn offset(offset: i64) -> Spec {
    Spec::Offset(offset)
}

/// Sort by a field; the direction token (e.g. `ASC`, `DESC NULLS LAST`)
/// is passed through verbatim.
pub fn order_by(field: impl Into<String>, direction: impl Into<String>) -> Spec {
    Spec::OrderBy {
        field: field.into(),
        direction: direction.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records which visitor method fired, to pin the accept dispatch.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SpecVisitor for Recorder {
        fn visit_equal(&mut self, field: &str, value: &Value) {
            self.calls.push(format!("equal {field} {value:?}"));
        }
        fn visit_not_equal(&mut self, field: &str, _value: &Value) {
            self.calls.push(format!("not_equal {field}"));
        }
        fn visit_greater_than(&mut self, field: &str, _value: &Value) {
            self.calls.push(format!("greater_than {field}"));
        }
        fn visit_lower_than(&mut self, field: &str, _value: &Value) {
            self.calls.push(format!("lower_than {field}"));
        }
        fn visit_greater_than_or_equal(&mut self, field: &str, _value: &Value) {
            self.calls.push(format!("greater_than_or_equal {field}"));
        }
        fn visit_lower_than_or_equal(&mut self, field: &str, _value: &Value) {
            self.calls.push(format!("lower_than_or_equal {field}"));
        }
        fn visit_like(&mut self, field: &str, _value: &Value) {
            self.calls.push(format!("like {field}"));
        }
        fn visit_in(&mut self, field: &str, values: &[Value]) {
            self.calls.push(format!("in {field} x{}", values.len()));
        }
        fn visit_and(&mut self, specs: &[Spec]) {
            self.calls.push(format!("and x{}", specs.len()));
            for spec in specs {
                spec.accept(self);
            }
        }
        fn visit_or(&mut self, specs: &[Spec]) {
            self.calls.push(format!("or x{}", specs.len()));
            for spec in specs {
                spec.accept(self);
            }
        }
        fn visit_limit(&mut self, limit: i64) {
            self.calls.push(format!("limit {limit}"));
        }
        fn visit_offset(&mut self, offset: i64) {
            self.calls.push(format!("offset {offset}"));
        }
        fn visit_order_by(&mut self, field: &str, direction: &str) {
            self.calls.push(format!("order_by {field} {direction}"));
        }
    }

    #[test]
    fn accept_dispatches_one_method_per_kind() {
        let tree = and([
            equal("a", 1i64),
            in_list("b", [2i64, 3]),
            or([like("c", "%x%"), limit(5)]),
            order_by("d", "ASC"),
            offset(10),
        ]);

        let mut rec = Recorder::default();
        tree.accept(&mut rec);

        assert_eq!(
            rec.calls,
            vec![
                "and x5",
                "equal a Int(1)",
                "in b x2",
                "or x2",
                "like c",
                "limit 5",
                "order_by d ASC",
                "offset 10",
            ]
        );
    }

    #[test]
    fn children_keep_their_given_order() {
        let tree = and([equal("x", 1i64), equal("y", 2i64), equal("z", 3i64)]);
        let Spec::And(children) = &tree else {
            panic!("expected And");
        };
        let fields: Vec<_> = children
            .iter()
            .map(|s| match s {
                Spec::Equal { field, .. } => field.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(fields, vec!["x", "y", "z"]);
    }

    #[test]
    fn empty_in_is_representable() {
        let none: Vec<i64> = Vec::new();
        let spec = in_list("id", none);
        assert_eq!(
            spec,
            Spec::In {
                field: "id".to_string(),
                values: vec![],
            }
        );
    }

    #[test]
    fn tree_survives_repeated_traversal() {
        let tree = and([equal("a", 1i64), offset(3)]);
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        tree.accept(&mut first);
        tree.accept(&mut second);
        assert_eq!(first.calls, second.calls);
    }
}
