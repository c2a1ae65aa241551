//! The compiling visitor: walks a specification tree and assembles a
//! parameterized Postgres query.
//!
//! [`SqlVisitor`] is a per-traversal accumulator. Condition fragments are
//! collected with a generic `?` marker standing in for each value. Nested
//! fragments are spliced into their parent untouched; the markers are
//! renumbered into `$1, $2, ...` in a single left-to-right scan when the
//! outermost query is assembled, and never per nested accumulator.

use crate::fields::FieldMap;
use crate::spec::{Spec, SpecVisitor};
use crate::value::Value;

/// Compile a specification tree against a base query.
///
/// Convenience entry point over [`SqlVisitor`]; an absent tree yields the
/// base query unchanged with no arguments.
///
/// # Example
/// ```
/// use pgspec::{FieldMap, Value, compile, spec};
///
/// let fields = FieldMap::new().with("name", "full_name");
/// let filter = spec::equal("name", "alice");
///
/// let (sql, args) = compile("SELECT * FROM users", Some(&filter), &fields);
/// assert_eq!(sql, "SELECT * FROM users WHERE full_name = $1");
/// assert_eq!(args, vec![Value::Text("alice".to_string())]);
/// ```
pub fn compile(base: &str, spec: Option<&Spec>, fields: &FieldMap) -> (String, Vec<Value>) {
    let mut visitor = SqlVisitor::new(fields);
    if let Some(spec) = spec {
        spec.accept(&mut visitor);
    }
    visitor.build_query(base)
}

/// Accumulates WHERE fragments, positional arguments, ORDER BY clauses,
/// and limit/offset over one traversal of a specification tree.
///
/// The visitor's lifetime is one traversal: create it, accept one or more
/// specifications into it, then consume it with
/// [`build_query`](Self::build_query). Boolean composition spawns
/// short-lived nested visitors sharing the same borrowed [`FieldMap`]; they
/// are merged into the parent and dropped before the node handler returns.
///
/// Limit and offset merge by override: whichever strictly positive value is
/// applied last wins, including values surfacing from nested And/Or
/// branches. A nested zero or absent value never clears one already set.
pub struct SqlVisitor<'a> {
    conditions: Vec<String>,
    args: Vec<Value>,
    fields: &'a FieldMap,
    order_clauses: Vec<String>,
    limit: i64,
    offset: i64,
}

impl<'a> SqlVisitor<'a> {
    /// Create a visitor over the given field translation table.
    pub fn new(fields: &'a FieldMap) -> Self {
        Self {
            conditions: Vec::new(),
            args: Vec::new(),
            fields,
            order_clauses: Vec::new(),
            limit: 0,
            offset: 0,
        }
    }

    fn push_comparison(&mut self, field: &str, op: &str, value: &Value) {
        let column = self.fields.resolve(field);
        self.conditions.push(format!("{column} {op} ?"));
        self.args.push(value.clone());
    }

    /// Assemble the final query: base text plus WHERE / ORDER BY / LIMIT /
    /// OFFSET tail, with `?` markers renumbered into `$n`.
    ///
    /// Returns the query text and the argument list; the k-th argument
    /// corresponds to `$k` in the WHERE clause. A visitor that accumulated
    /// nothing returns the base query unchanged.
    pub fn build_query(self, base: &str) -> (String, Vec<Value>) {
        let mut query = String::from(base);

        if !self.conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&number_markers(&self.conditions.join(" AND ")));
        }
        if !self.order_clauses.is_empty() {
            query.push_str(" ORDER BY ");
            query.push_str(&self.order_clauses.join(", "));
        }
        if self.limit > 0 {
            query.push_str(&format!(" LIMIT {}", self.limit));
        }
        if self.offset > 0 {
            query.push_str(&format!(" OFFSET {}", self.offset));
        }

        (query, self.args)
    }
}

impl SpecVisitor for SqlVisitor<'_> {
    fn visit_equal(&mut self, field: &str, value: &Value) {
        self.push_comparison(field, "=", value);
    }

    fn visit_not_equal(&mut self, field: &str, value: &Value) {
        self.push_comparison(field, "<>", value);
    }

    fn visit_greater_than(&mut self, field: &str, value: &Value) {
        self.push_comparison(field, ">", value);
    }

    fn visit_lower_than(&mut self, field: &str, value: &Value) {
        self.push_comparison(field, "<", value);
    }

    fn visit_greater_than_or_equal(&mut self, field: &str, value: &Value) {
        self.push_comparison(field, ">=", value);
    }

    fn visit_lower_than_or_equal(&mut self, field: &str, value: &Value) {
        self.push_comparison(field, "<=", value);
    }

    fn visit_like(&mut self, field: &str, value: &Value) {
        // The pattern is bound verbatim; wildcards are the caller's business.
        self.push_comparison(field, "LIKE", value);
    }

    fn visit_in(&mut self, field: &str, values: &[Value]) {
        let column = self.fields.resolve(field);
        if values.is_empty() {
            // Always false, and no marker slot consumed.
            self.conditions.push("1=0".to_string());
            return;
        }
        let markers = vec!["?"; values.len()].join(", ");
        self.conditions.push(format!("{column} IN ({markers})"));
        self.args.extend(values.iter().cloned());
    }

    fn visit_and(&mut self, specs: &[Spec]) {
        let mut nested = SqlVisitor::new(self.fields);
        for spec in specs {
            spec.accept(&mut nested);
        }

        if !nested.conditions.is_empty() {
            self.conditions
                .push(format!("({})", nested.conditions.join(" AND ")));
            self.args.append(&mut nested.args);
        }

        self.order_clauses.append(&mut nested.order_clauses);

        if nested.limit > 0 {
            self.limit = nested.limit;
        }
        if nested.offset > 0 {
            self.offset = nested.offset;
        }
    }

    fn visit_or(&mut self, specs: &[Spec]) {
        // Each child gets its own accumulator so its conditions are
        // individually parenthesized; a child that produced no conditions
        // contributes no branch and no arguments, but its order clauses and
        // positive limit/offset still surface.
        let mut merged = SqlVisitor::new(self.fields);
        let mut branches: Vec<String> = Vec::new();

        for spec in specs {
            let mut branch = SqlVisitor::new(self.fields);
            spec.accept(&mut branch);

            if !branch.conditions.is_empty() {
                branches.push(format!("({})", branch.conditions.join(" AND ")));
                merged.args.append(&mut branch.args);
            }

            merged.order_clauses.append(&mut branch.order_clauses);

            if branch.limit > 0 {
                merged.limit = branch.limit;
            }
            if branch.offset > 0 {
                merged.offset = branch.offset;
            }
        }

        if !branches.is_empty() {
            self.conditions.push(format!("({})", branches.join(" OR ")));
            self.args.append(&mut merged.args);
        }

        self.order_clauses.append(&mut merged.order_clauses);

        if merged.limit > 0 {
            self.limit = merged.limit;
        }
        if merged.offset > 0 {
            self.offset = merged.offset;
        }
    }

    fn visit_limit(&mut self, limit: i64) {
        self.limit = limit;
    }

    fn visit_offset(&mut self, offset: i64) {
        self.offset = offset;
    }

    fn visit_order_by(&mut self, field: &str, direction: &str) {
        let column = self.fields.resolve(field);
        self.order_clauses.push(format!("{column} {direction}"));
    }
}

/// Replace each `?` marker with `$1, $2, ...` in a single left-to-right scan.
///
/// Runs once, over the fully joined WHERE text; argument positions line up
/// because fragments and arguments were appended in the same order.
fn number_markers(joined: &str) -> String {
    let mut out = String::with_capacity(joined.len());
    let mut next = 1usize;
    for ch in joined.chars() {
        if ch == '?' {
            out.push('$');
            out.push_str(&next.to_string());
            next += 1;
        } else {
            out.push(ch);
        }
    }
    out
}
