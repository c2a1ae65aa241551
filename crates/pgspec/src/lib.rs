//! # pgspec
//!
//! Storage-agnostic specification trees compiled into parameterized
//! PostgreSQL queries.
//!
//! Domain code describes query intent (equality, comparison, set
//! membership, pattern match, boolean composition, ordering, pagination)
//! as an immutable expression tree. An infrastructure-side visitor then
//! translates that tree into SQL text with `$n` positional placeholders
//! plus an ordered argument list, using an injected logical-to-storage
//! field name map. Domain code never names a physical column.
//!
//! ## Features
//!
//! - **Composable trees**: factory functions per node kind, nested AND/OR
//!   without restriction, create-once / traverse-many
//! - **Safe parameters**: values never appear in the SQL text; every value
//!   binds positionally through the driver
//! - **Field mapping**: logical names resolve through a [`FieldMap`] with
//!   identity fallback
//! - **Execution helpers**: run a compiled [`Query`] against a client, a
//!   transaction, or a pooled connection
//!
//! ## Usage
//!
//! ```
//! use pgspec::{FieldMap, compile, spec};
//!
//! let fields = FieldMap::new().with("name", "full_name");
//!
//! let filter = spec::and([
//!     spec::equal("status", "active"),
//!     spec::or([
//!         spec::like("name", "%gopher%"),
//!         spec::in_list("role", ["admin", "owner"]),
//!     ]),
//!     spec::order_by("created_at", "DESC"),
//!     spec::limit(20),
//! ]);
//!
//! let (sql, args) = compile("SELECT * FROM users", Some(&filter), &fields);
//! assert_eq!(
//!     sql,
//!     "SELECT * FROM users WHERE (status = $1 AND ((full_name LIKE $2) OR (role IN ($3, $4)))) \
//!      ORDER BY created_at DESC LIMIT 20"
//! );
//! assert_eq!(args.len(), 4);
//! ```

pub mod client;
pub mod error;
pub mod fields;
pub mod query;
pub mod spec;
pub mod value;
pub mod visitor;

pub use client::GenericClient;
pub use error::{SpecError, SpecResult};
pub use fields::FieldMap;
pub use query::Query;
pub use spec::{Spec, SpecVisitor};
pub use value::Value;
pub use visitor::{SqlVisitor, compile};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
