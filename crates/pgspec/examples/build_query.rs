//! Build specification trees and inspect the compiled SQL, no database
//! needed.
//!
//! Run with: cargo run --example build_query

use pgspec::{FieldMap, compile, spec};

fn main() {
    let fields = FieldMap::new()
        .with("id", "user_id")
        .with("name", "full_name")
        .with("created", "created_at");

    // A flat filter.
    let filter = spec::equal("name", "alice");
    let (sql, args) = compile("SELECT * FROM users", Some(&filter), &fields);
    println!("{sql}");
    println!("  args: {args:?}\n");

    // Boolean composition with ordering and pagination.
    let filter = spec::and([
        spec::equal("status", "active"),
        spec::or([
            spec::like("name", "%smith%"),
            spec::in_list("role", ["admin", "owner"]),
        ]),
        spec::greater_than_or_equal("age", 18i64),
        spec::order_by("created", "DESC"),
        spec::limit(20),
        spec::offset(40),
    ]);
    let (sql, args) = compile("SELECT * FROM users", Some(&filter), &fields);
    println!("{sql}");
    println!("  args: {args:?}\n");

    // Empty IN compiles to an always-false condition, never invalid SQL.
    let none: Vec<i64> = Vec::new();
    let filter = spec::in_list("id", none);
    let (sql, args) = compile("SELECT * FROM users", Some(&filter), &fields);
    println!("{sql}");
    println!("  args: {args:?}");
}
