//! Pagination against a real SQLite database.
//!
//! A `PageSource` runs the SQL that `SqlQuery` renders on an in-memory
//! rusqlite connection; results are checked against `MemorySource` so the
//! rendered predicates and the in-memory evaluator agree.

use cursor_paginate::prelude::*;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, params_from_iter};
use std::collections::BTreeMap;

type SqlRow = BTreeMap<String, Value>;

struct SqliteSource {
    conn: Connection,
    query: SqlQuery<Sqlite>,
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Int(i) => SqlValue::Integer(*i),
        Value::Float(f) => SqlValue::Real(*f),
        Value::String(s) => SqlValue::Text(s.clone()),
    }
}

fn from_sql(value: SqlValue) -> Value {
    match value {
        SqlValue::Null | SqlValue::Blob(_) => Value::Null,
        SqlValue::Integer(i) => Value::Int(i),
        SqlValue::Real(f) => Value::Float(f),
        SqlValue::Text(s) => Value::String(s),
    }
}

impl PageSource for SqliteSource {
    type Row = SqlRow;
    type Error = rusqlite::Error;

    fn order(&self) -> &[SortField] {
        self.query.order()
    }

    fn primary_key(&self) -> Option<&str> {
        self.query.primary_key_column()
    }

    fn fetch(&self, request: &FetchRequest) -> Result<Vec<SqlRow>, rusqlite::Error> {
        let result = self.query.fetch_sql(request);
        let mut stmt = self.conn.prepare(&result.sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let rows = stmt.query_map(params_from_iter(result.params.iter().map(to_sql)), |row| {
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Ok((name.clone(), from_sql(row.get(i)?))))
                .collect::<rusqlite::Result<SqlRow>>()
        })?;
        rows.collect()
    }

    fn count(&self) -> Result<u64, rusqlite::Error> {
        let result = self.query.count_sql();
        let count: i64 = self.conn.query_row(
            &result.sql,
            params_from_iter(result.params.iter().map(to_sql)),
            |row| row.get(0),
        )?;
        Ok(count.unsigned_abs())
    }
}

const SCHEMA: &str = "
    CREATE TABLE posts (
        id INTEGER PRIMARY KEY,
        display_index INTEGER NOT NULL,
        category TEXT NOT NULL,
        published INTEGER NOT NULL
    );
";

fn seeded(rows: &[(i64, i64, &str, bool)]) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    for (id, display_index, category, published) in rows {
        conn.execute(
            "INSERT INTO posts (id, display_index, category, published) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, display_index, category, published],
        )
        .unwrap();
    }
    conn
}

fn six_posts() -> Connection {
    let rows: Vec<(i64, i64, &str, bool)> = (0..6).map(|i| (i + 1, i, "news", true)).collect();
    seeded(&rows)
}

fn posts_source(conn: Connection) -> SqliteSource {
    SqliteSource {
        conn,
        query: sqlite("posts")
            .fields(&["id", "display_index"])
            .sort("display_index", SortDir::Asc)
            .primary_key("id"),
    }
}

fn pairs(page: &Page<SqlRow>) -> Vec<(i64, i64)> {
    page.items
        .iter()
        .map(|row| match (row.get("display_index"), row.get("id")) {
            (Some(Value::Int(d)), Some(Value::Int(id))) => (*d, *id),
            other => panic!("unexpected row {other:?}"),
        })
        .collect()
}

fn token(display_index: i64, id: i64) -> String {
    Cursor::new()
        .int("display_index", display_index)
        .int("id", id)
        .encode()
}

fn options(per_page: usize, cursor: Option<String>, direction: Direction) -> PaginateOptions {
    let mut builder = PaginateOptions::builder()
        .per_page(per_page)
        .direction(direction);
    if let Some(cursor) = cursor {
        builder = builder.cursor(cursor);
    }
    builder.build().unwrap()
}

// =============================================================================
// Six-row walk on SQLite
// =============================================================================

#[test]
fn sqlite_first_page_and_total() {
    let source = posts_source(six_posts());
    let options = PaginateOptions::builder()
        .per_page(2)
        .with_total(true)
        .build()
        .unwrap();
    let page = paginate(&source, &options).unwrap();

    assert_eq!(pairs(&page), vec![(0, 1), (1, 2)]);
    assert_eq!(page.next_cursor, Some(token(1, 2)));
    assert!(page.prev_cursor.is_none());
    assert_eq!(page.total_count, Some(6));
}

#[test]
fn sqlite_forward_and_backward() {
    let source = posts_source(six_posts());

    let forward = paginate(&source, &options(2, Some(token(1, 2)), Direction::Forward)).unwrap();
    assert_eq!(pairs(&forward), vec![(2, 3), (3, 4)]);
    assert_eq!(forward.next_cursor, Some(token(3, 4)));
    assert_eq!(forward.prev_cursor, Some(token(2, 3)));

    let backward = paginate(&source, &options(2, Some(token(2, 3)), Direction::Backward)).unwrap();
    assert_eq!(pairs(&backward), vec![(0, 1), (1, 2)]);
    assert_eq!(backward.next_cursor, Some(token(1, 2)));
    assert!(backward.prev_cursor.is_none());
}

#[test]
fn sqlite_aliased_select() {
    let source = SqliteSource {
        conn: six_posts(),
        query: sqlite("posts")
            .fields(&["id"])
            .select_as("display_index", "alias")
            .sort("alias", SortDir::Asc)
            .primary_key("id"),
    };
    let options = PaginateOptions::builder()
        .per_page(2)
        .alias("alias", "display_index")
        .build()
        .unwrap();
    let first = paginate(&source, &options).unwrap();
    assert_eq!(
        Cursor::decode(first.next_cursor.as_deref().unwrap()).unwrap(),
        Cursor::new().int("alias", 1).int("id", 2)
    );

    let options = PaginateOptions::builder()
        .per_page(2)
        .alias("alias", "display_index")
        .cursor(first.next_cursor.unwrap())
        .build()
        .unwrap();
    let second = paginate(&source, &options).unwrap();
    let aliases: Vec<Option<&Value>> = second.items.iter().map(|r| r.get("alias")).collect();
    assert_eq!(aliases, vec![Some(&Value::Int(2)), Some(&Value::Int(3))]);
}

#[test]
fn sqlite_base_filter_and_count() {
    let conn = seeded(&[
        (1, 0, "news", true),
        (2, 1, "news", false),
        (3, 2, "blog", true),
        (4, 3, "news", true),
        (5, 4, "news", true),
    ]);
    let source = SqliteSource {
        conn,
        query: sqlite("posts")
            .fields(&["id", "display_index"])
            .filter(and(vec![
                simple("published", Operator::Eq, true),
                simple("category", Operator::Eq, "news"),
            ]))
            .sort("display_index", SortDir::Desc)
            .primary_key("id"),
    };

    let first = paginate(
        &source,
        &PaginateOptions::builder()
            .per_page(2)
            .with_total(true)
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(pairs(&first), vec![(4, 5), (3, 4)]);
    assert_eq!(first.total_count, Some(3));

    let second = paginate(&source, &options(2, first.next_cursor, Direction::Forward)).unwrap();
    assert_eq!(pairs(&second), vec![(0, 1)]);
    assert!(second.next_cursor.is_none());
}

// =============================================================================
// SQLite and MemorySource agree
// =============================================================================

#[test]
fn sqlite_matches_memory_source_with_ties() {
    // Many duplicate display_index values, mixed directions
    let rows: Vec<(i64, i64, &str, bool)> = (1..=23)
        .map(|id| (id, (id * 7) % 4, if id % 3 == 0 { "blog" } else { "news" }, true))
        .collect();
    let memory_rows: Vec<SqlRow> = rows
        .iter()
        .map(|(id, display_index, category, _)| {
            BTreeMap::from([
                ("id".to_string(), Value::Int(*id)),
                ("display_index".to_string(), Value::Int(*display_index)),
                ("category".to_string(), Value::from(*category)),
            ])
        })
        .collect();

    let sql = SqliteSource {
        conn: seeded(&rows),
        query: sqlite("posts")
            .fields(&["id", "display_index", "category"])
            .sort("category", SortDir::Desc)
            .sort("display_index", SortDir::Asc)
            .primary_key("id"),
    };
    let memory = MemorySource::new(memory_rows)
        .sort("category", SortDir::Desc)
        .sort("display_index", SortDir::Asc)
        .primary_key("id");

    // "" sorts after every category under DESC, so this seeks past the last row
    let past_the_end = Cursor::new()
        .string("category", "")
        .int("display_index", 0)
        .int("id", 0)
        .encode();

    for direction in [Direction::Forward, Direction::Backward] {
        let mut cursor = direction.is_backward().then(|| past_the_end.clone());
        let mut seen = 0;
        let mut pages = 0;
        loop {
            let opts = options(4, cursor.clone(), direction);
            let sql_page = paginate(&sql, &opts).unwrap();
            let memory_page = paginate(&memory, &opts).unwrap();
            assert_eq!(sql_page, memory_page, "{direction:?} page {pages}");

            seen += sql_page.len();
            pages += 1;
            cursor = match direction {
                Direction::Forward => sql_page.next_cursor,
                Direction::Backward => sql_page.prev_cursor,
            };
            if cursor.is_none() {
                break;
            }
            assert!(pages < 10, "{direction:?} did not terminate");
        }
        assert_eq!(seen, 23, "{direction:?}");
    }
}

#[test]
fn sqlite_matches_memory_source_with_null_order_values() {
    let scores: Vec<(i64, Option<i64>)> = (1..=9)
        .map(|id| (id, (id % 3 != 0).then_some(id % 4)))
        .collect();

    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE scores (id INTEGER PRIMARY KEY, score INTEGER);")
        .unwrap();
    for (id, score) in &scores {
        conn.execute(
            "INSERT INTO scores (id, score) VALUES (?1, ?2)",
            rusqlite::params![id, score],
        )
        .unwrap();
    }
    let memory_rows: Vec<SqlRow> = scores
        .iter()
        .map(|(id, score)| {
            BTreeMap::from([
                ("id".to_string(), Value::Int(*id)),
                ("score".to_string(), Value::from(*score)),
            ])
        })
        .collect();

    let mut sql = SqliteSource {
        conn,
        query: sqlite("scores").fields(&["id", "score"]),
    };
    for (dir, past_the_end) in [
        (SortDir::Asc, Cursor::new().int("score", 99).int("id", 0)),
        (SortDir::Desc, Cursor::new().field("score", Value::Null).int("id", 99)),
    ] {
        sql.query = sqlite("scores")
            .fields(&["id", "score"])
            .sort("score", dir)
            .primary_key("id");
        let memory = MemorySource::new(memory_rows.clone())
            .sort("score", dir)
            .primary_key("id");

        for direction in [Direction::Forward, Direction::Backward] {
            let mut cursor = direction.is_backward().then(|| past_the_end.encode());
            let mut seen = 0;
            for pages in 0.. {
                assert!(pages < 10, "{dir:?} {direction:?} did not terminate");
                let opts = options(2, cursor.clone(), direction);
                let sql_page = paginate(&sql, &opts).unwrap();
                let memory_page = paginate(&memory, &opts).unwrap();
                assert_eq!(sql_page, memory_page, "{dir:?} {direction:?} page {pages}");

                seen += sql_page.len();
                cursor = match direction {
                    Direction::Forward => sql_page.next_cursor,
                    Direction::Backward => sql_page.prev_cursor,
                };
                if cursor.is_none() {
                    break;
                }
            }
            assert_eq!(seen, 9, "{dir:?} {direction:?}");
        }
    }
}

// =============================================================================
// Rendered SQL snapshots
// =============================================================================

fn rendered(query: &SqlQuery<Sqlite>, cursor: Option<&Cursor>, direction: Direction) -> String {
    let aliases = AliasMap::new();
    let order = OrderSpec::resolve(query.order(), query.primary_key_column(), &aliases).unwrap();
    let condition = cursor.map(|c| {
        let values = order.bind(c, &aliases).unwrap();
        KeysetCondition::new(&order, values, direction)
            .unwrap()
            .to_filter_expr()
    });
    query
        .fetch_sql(&FetchRequest {
            condition,
            order: order.fetch_order(direction),
            limit: 3,
        })
        .sql
}

#[test]
fn snapshot_first_page_sql() {
    let query = sqlite("posts")
        .fields(&["id", "display_index"])
        .sort("display_index", SortDir::Asc)
        .primary_key("id");
    insta::assert_snapshot!(
        rendered(&query, None, Direction::Forward),
        @"SELECT id, display_index FROM posts ORDER BY display_index ASC, id ASC LIMIT 3"
    );
}

#[test]
fn snapshot_forward_keyset_sql() {
    let query = sqlite("posts")
        .fields(&["id", "display_index"])
        .filter(simple("published", Operator::Eq, true))
        .sort("display_index", SortDir::Asc)
        .primary_key("id");
    let cursor = Cursor::new().int("display_index", 1).int("id", 2);
    insta::assert_snapshot!(
        rendered(&query, Some(&cursor), Direction::Forward),
        @"SELECT id, display_index FROM posts WHERE published = ?1 AND (display_index > ?2 OR (display_index = ?3 AND id > ?4)) ORDER BY display_index ASC, id ASC LIMIT 3"
    );
}

#[test]
fn snapshot_backward_mixed_sql() {
    let query = sqlite("posts")
        .fields(&["id"])
        .sort("category", SortDir::Desc)
        .sort("display_index", SortDir::Asc)
        .primary_key("id");
    let cursor = Cursor::new()
        .string("category", "news")
        .int("display_index", 1)
        .int("id", 2);
    insta::assert_snapshot!(
        rendered(&query, Some(&cursor), Direction::Backward),
        @"SELECT id FROM posts WHERE (category > ?1 OR (category = ?2 AND (display_index < ?3 OR display_index IS NULL)) OR (category = ?4 AND display_index = ?5 AND id < ?6)) ORDER BY category ASC, display_index DESC, id DESC LIMIT 3"
    );
}

#[test]
fn snapshot_count_sql() {
    let query = sqlite("posts")
        .filter(simple("published", Operator::Eq, true))
        .sort("display_index", SortDir::Asc);
    insta::assert_snapshot!(
        query.count_sql().sql,
        @"SELECT COUNT(*) AS count FROM posts WHERE published = ?1"
    );
}
