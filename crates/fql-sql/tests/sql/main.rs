//! End-to-end tests: filter text in, parameterised SQL out.

use fql_compiler::{BackendError, CompileError};
use fql_sql::{MySql, Postgres, SqlQuery, schema::Schema, to_sql};
use fql_syntax::{ast::Literal, compile};
use tracing_test::traced_test;

const SCHEMA: &str = r#"{
    "root": "customers",
    "tables": {
        "customers": {
            "columns": ["id", "name", "region", "tier", "deleted_at"],
            "relations": {
                "orders": { "table": "orders", "local_key": "id", "foreign_key": "customer_id" },
                "address": { "table": "addresses", "local_key": "address_id", "foreign_key": "id" }
            }
        },
        "orders": {
            "columns": ["id", "customer_id", "total", "status"],
            "relations": {
                "items": { "table": "order_items", "local_key": "id", "foreign_key": "order_id" }
            }
        },
        "order_items": { "columns": ["order_id", "sku", "qty"] },
        "addresses": {}
    }
}"#;

fn schema() -> Schema {
    Schema::from_json(SCHEMA).unwrap()
}

fn postgres(input: &str) -> SqlQuery {
    let query = compile(input).unwrap();
    to_sql(&query, &schema(), &Postgres).unwrap()
}

#[test]
fn test_blank_query_selects_everything() {
    let sql = postgres("");

    assert_eq!(sql.sql, r#"SELECT * FROM "customers" AS "t0""#);
    assert!(sql.params.is_empty());
}

#[test]
fn test_simple_filter() {
    let sql = postgres("name = 'Ann' AND tier != 3");

    assert_eq!(
        sql.sql,
        r#"SELECT * FROM "customers" AS "t0" WHERE "t0"."name" = $1 AND "t0"."tier" <> $2"#
    );
    assert_eq!(sql.params, vec![Literal::from("Ann"), Literal::Integer(3)]);
}

#[test]
fn test_precedence_survives_rendering() {
    let sql = postgres("(region = 'EU' OR region = 'US') AND tier > 1");

    assert_eq!(
        sql.sql,
        r#"SELECT * FROM "customers" AS "t0" WHERE ("t0"."region" = $1 OR "t0"."region" = $2) AND "t0"."tier" > $3"#
    );
}

#[test]
#[traced_test]
fn test_shared_relation_is_joined_once() {
    let sql = postgres("orders.items.sku = 'A' AND orders.items.qty = 2");

    assert_eq!(
        sql.sql,
        concat!(
            r#"SELECT * FROM "customers" AS "t0""#,
            r#" INNER JOIN "orders" AS "t1" ON "t0"."id" = "t1"."customer_id""#,
            r#" INNER JOIN "order_items" AS "t2" ON "t1"."id" = "t2"."order_id""#,
            r#" WHERE "t2"."sku" = $1 AND "t2"."qty" = $2"#,
        )
    );
}

#[test]
fn test_left_join() {
    let sql = postgres("LEFT address.city = 'Oslo' OR deleted_at IS NULL");

    assert_eq!(
        sql.sql,
        concat!(
            r#"SELECT * FROM "customers" AS "t0""#,
            r#" LEFT JOIN "addresses" AS "t1" ON "t0"."address_id" = "t1"."id""#,
            r#" WHERE "t1"."city" = $1 OR "t0"."deleted_at" IS NULL"#,
        )
    );
}

#[test]
fn test_group_by_and_having() {
    let sql = postgres("orders.status IN ('paid', 'shipped') GROUP BY region HAVING SUM(orders.total) > 100 AND COUNT(*) >= 2");

    assert_eq!(
        sql.sql,
        concat!(
            r#"SELECT "t0"."region" FROM "customers" AS "t0""#,
            r#" INNER JOIN "orders" AS "t1" ON "t0"."id" = "t1"."customer_id""#,
            r#" WHERE "t1"."status" IN ($1, $2)"#,
            r#" GROUP BY "t0"."region""#,
            r#" HAVING SUM("t1"."total") > $3 AND COUNT(*) >= $4"#,
        )
    );
    assert_eq!(
        sql.params,
        vec![
            Literal::from("paid"),
            Literal::from("shipped"),
            Literal::Integer(100),
            Literal::Integer(2),
        ]
    );
}

#[test]
fn test_between_with_mysql() {
    let query = compile("tier BETWEEN 1 AND 2.5").unwrap();
    let sql = to_sql(&query, &schema(), &MySql).unwrap();

    assert_eq!(
        sql.sql,
        "SELECT * FROM `customers` AS `t0` WHERE `t0`.`tier` BETWEEN ? AND ?"
    );
    assert_eq!(sql.params, vec![Literal::Integer(1), Literal::Float(2.5)]);
}

#[test]
fn test_unknown_relation_is_reported() {
    let query = compile("payments.amount > 1").unwrap();
    let err = to_sql(&query, &schema(), &Postgres).unwrap_err();

    assert_eq!(
        err,
        CompileError::Backend(BackendError::UnknownRelation {
            owner: "customers".to_string(),
            relation: "payments".to_string(),
        })
    );
}

#[test]
fn test_unknown_column_is_reported() {
    let query = compile("orders.discount > 1").unwrap();
    let err = to_sql(&query, &schema(), &Postgres).unwrap_err();

    assert!(matches!(
        err,
        CompileError::Backend(BackendError::UnknownField { path }) if path == "orders.discount"
    ));
}
