use super::*;
use chrono::DateTime;
use chrono::NaiveTime;
use duckdb::Connection;
use duckdb::types::TimeUnit;
use duckdb::types::Value as DuckValue;
use qd_dto::QueryResponse;
use serde_json::Number;
use serde_json::Value;

/// Runs `sql` and returns every row positionally, in store order.
pub fn execute(conn: &Connection, sql: &str) -> Result<QueryResponse> {
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(Error::validation("sql must not be empty"));
    }
    let mut stmt = conn.prepare(sql)?;
    let mut cursor = stmt.query([])?;
    let columns = cursor
        .as_ref()
        .map(|stmt| stmt.column_names())
        .unwrap_or_default();
    let mut rows = Vec::new();
    while let Some(row) = cursor.next()? {
        rows.push(read_row(row, columns.len())?);
    }
    log::debug!("query returned {} rows x {} columns", rows.len(), columns.len());
    Ok(QueryResponse { columns, rows })
}

fn read_row(row: &duckdb::Row<'_>, width: usize) -> Result<Vec<Value>> {
    (0..width)
        .map(|i| row.get::<_, DuckValue>(i).map(to_json))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn to_json(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(v) => Value::Bool(v),
        DuckValue::TinyInt(v) => Value::from(v),
        DuckValue::SmallInt(v) => Value::from(v),
        DuckValue::Int(v) => Value::from(v),
        DuckValue::BigInt(v) => Value::from(v),
        DuckValue::HugeInt(v) => i64::try_from(v)
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(v.to_string())),
        DuckValue::UTinyInt(v) => Value::from(v),
        DuckValue::USmallInt(v) => Value::from(v),
        DuckValue::UInt(v) => Value::from(v),
        DuckValue::UBigInt(v) => Value::from(v),
        DuckValue::Float(v) => float(v as f64),
        DuckValue::Double(v) => float(v),
        DuckValue::Decimal(v) => Value::String(v.to_string()),
        DuckValue::Text(v) => Value::String(v),
        DuckValue::Enum(v) => Value::String(v),
        DuckValue::Blob(v) => Value::from(v),
        DuckValue::List(items) => Value::Array(items.into_iter().map(to_json).collect()),
        DuckValue::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        DuckValue::Date32(days) => date(days),
        DuckValue::Timestamp(unit, v) => timestamp(micros(unit, v)),
        DuckValue::Time64(unit, v) => time(micros(unit, v)),
        DuckValue::Interval { months, days, nanos } => interval(months, days, nanos),
        DuckValue::Struct(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v.clone())))
                .collect(),
        ),
        DuckValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (key(k.clone()), to_json(v.clone())))
                .collect(),
        ),
        DuckValue::Union(inner) => to_json(*inner),
        #[allow(unreachable_patterns)]
        other => Value::String(format!("{:?}", other)),
    }
}

fn micros(unit: TimeUnit, v: i64) -> i64 {
    match unit {
        TimeUnit::Second => v.saturating_mul(1_000_000),
        TimeUnit::Millisecond => v.saturating_mul(1_000),
        TimeUnit::Microsecond => v,
        TimeUnit::Nanosecond => v / 1_000,
    }
}

/// `YYYY-MM-DD`
fn date(days: i32) -> Value {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0)
        .map(|dt| Value::String(dt.date_naive().to_string()))
        .unwrap_or(Value::Null)
}

/// ISO-8601 without zone; fractional seconds only when present.
fn timestamp(micros: i64) -> Value {
    DateTime::from_timestamp_micros(micros)
        .map(|dt| Value::String(dt.naive_utc().format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
        .unwrap_or(Value::Null)
}

fn time(micros: i64) -> Value {
    let secs = u32::try_from(micros.div_euclid(1_000_000)).ok();
    let nano = u32::try_from(micros.rem_euclid(1_000_000) * 1_000).ok();
    secs.zip(nano)
        .and_then(|(s, n)| NaiveTime::from_num_seconds_from_midnight_opt(s, n))
        .map(|t| Value::String(t.format("%H:%M:%S%.f").to_string()))
        .unwrap_or(Value::Null)
}

/// ISO-8601 duration, zero components omitted.
fn interval(months: i32, days: i32, nanos: i64) -> Value {
    let mut out = String::from("P");
    let (years, months) = (months / 12, months % 12);
    for (n, unit) in [(years, 'Y'), (months, 'M'), (days, 'D')] {
        if n != 0 {
            out.push_str(&format!("{}{}", n, unit));
        }
    }
    let (hours, rest) = (nanos / 3_600_000_000_000, nanos % 3_600_000_000_000);
    let (minutes, rest) = (rest / 60_000_000_000, rest % 60_000_000_000);
    let (seconds, frac) = (rest / 1_000_000_000, rest % 1_000_000_000);
    if nanos != 0 {
        out.push('T');
        for (n, unit) in [(hours, 'H'), (minutes, 'M')] {
            if n != 0 {
                out.push_str(&format!("{}{}", n, unit));
            }
        }
        match (seconds, frac) {
            (0, 0) => {}
            (s, 0) => out.push_str(&format!("{}S", s)),
            (s, f) => {
                let f = format!("{:09}", f.abs());
                out.push_str(&format!("{}.{}S", s, f.trim_end_matches('0')));
            }
        }
    }
    if out == "P" {
        out.push_str("T0S");
    }
    Value::String(out)
}

/// Map keys become JSON object keys; non-text keys use their JSON form.
fn key(k: DuckValue) -> String {
    match to_json(k) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// NaN and infinities have no JSON form.
fn float(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    fn conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }
    #[test]
    fn returns_columns_and_rows() {
        let out = execute(&conn(), "SELECT 42 AS answer").unwrap();
        assert_eq!(out.columns, vec!["answer"]);
        assert_eq!(out.rows, vec![vec![json!(42)]]);
    }
    #[test]
    fn preserves_order_and_types() {
        let out = execute(
            &conn(),
            "SELECT * FROM (VALUES (2, 'b', 1.5::DOUBLE, true), (1, 'a', NULL, false)) t(id, name, score, ok) ORDER BY id",
        )
        .unwrap();
        assert_eq!(out.columns, vec!["id", "name", "score", "ok"]);
        assert_eq!(
            out.rows,
            vec![
                vec![json!(1), json!("a"), Value::Null, json!(false)],
                vec![json!(2), json!("b"), json!(1.5), json!(true)],
            ]
        );
    }
    #[test]
    fn converts_wide_values() {
        let out = execute(
            &conn(),
            "SELECT 9223372036854775807::BIGINT AS big, 2.5::DOUBLE AS dbl, [1, 2] AS xs, 'nan'::DOUBLE AS nan",
        )
        .unwrap();
        assert_eq!(
            out.rows[0],
            vec![json!(i64::MAX), json!(2.5), json!([1, 2]), Value::Null]
        );
    }
    #[test]
    fn renders_exact_numerics_as_text() {
        let out = execute(
            &conn(),
            "SELECT SUM(x) AS total, 1.25::DECIMAL(5,2) AS price \
             FROM (VALUES (9223372036854775807::BIGINT), (9223372036854775807::BIGINT)) t(x)",
        )
        .unwrap();
        assert_eq!(out.rows[0], vec![json!("18446744073709551614"), json!("1.25")]);
    }
    #[test]
    fn small_hugeint_stays_numeric() {
        let out = execute(&conn(), "SELECT 7::HUGEINT AS h").unwrap();
        assert_eq!(out.rows[0], vec![json!(7)]);
    }
    #[test]
    fn blobs_are_byte_arrays() {
        let out = execute(&conn(), "SELECT '\\x01\\x02'::BLOB AS b").unwrap();
        assert_eq!(out.rows[0], vec![json!([1, 2])]);
    }
    #[test]
    fn temporal_values_are_iso_strings() {
        let out = execute(
            &conn(),
            "SELECT DATE '2024-01-02' AS d, \
                    TIMESTAMP '2024-01-02 03:04:05' AS ts, \
                    TIMESTAMP '2024-01-02 03:04:05.25' AS frac, \
                    TIME '03:04:05' AS t, \
                    INTERVAL '1 year 2 months 3 days 04:05:06' AS span, \
                    INTERVAL 1 DAY AS day",
        )
        .unwrap();
        assert_eq!(
            out.rows[0],
            vec![
                json!("2024-01-02"),
                json!("2024-01-02T03:04:05"),
                json!("2024-01-02T03:04:05.250"),
                json!("03:04:05"),
                json!("P1Y2M3DT4H5M6S"),
                json!("P1D"),
            ]
        );
    }
    #[test]
    fn nested_values_are_objects() {
        let out = execute(
            &conn(),
            "SELECT {'a': 1, 'b': 'x'} AS s, MAP {'k': 1, 'j': 2} AS m, \
                    [{'a': DATE '2024-01-02'}] AS xs",
        )
        .unwrap();
        assert_eq!(
            out.rows[0],
            vec![
                json!({ "a": 1, "b": "x" }),
                json!({ "k": 1, "j": 2 }),
                json!([{ "a": "2024-01-02" }]),
            ]
        );
    }
    #[test]
    fn interval_formatting() {
        assert_eq!(interval(0, 0, 0), json!("PT0S"));
        assert_eq!(interval(14, 0, 0), json!("P1Y2M"));
        assert_eq!(interval(0, 0, 1_500_000_000), json!("PT1.5S"));
        assert_eq!(interval(0, 2, 3_600_000_000_000), json!("P2DT1H"));
    }
    #[test]
    fn empty_result_keeps_columns() {
        let out = execute(&conn(), "SELECT 1 AS x WHERE false").unwrap();
        assert_eq!(out.columns, vec!["x"]);
        assert!(out.rows.is_empty());
    }
    #[test]
    fn rejects_blank_sql() {
        assert!(matches!(execute(&conn(), "  "), Err(Error::Validation(_))));
    }
    #[test]
    fn malformed_sql_is_store_error() {
        assert!(matches!(execute(&conn(), "SELEC 1"), Err(Error::Store(_))));
    }
}
