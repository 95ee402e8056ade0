use super::*;
use duckdb::Connection;

/// One column of a relation as DuckDB describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: String,
    pub primary: bool,
}

/// Columns of an existing table with primary-key membership.
///
/// Taken fresh for every request; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(Vec<Field>);

impl Snapshot {
    pub fn fields(&self) -> &[Field] {
        &self.0
    }
    /// Key columns in table order.
    pub fn primary_key(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|f| f.primary)
            .map(|f| f.name.clone())
            .collect()
    }
}

/// Metadata lookups against whatever database a connection points at.
pub trait Catalog {
    fn exists(&self, table: &Table) -> Result<bool>;
    fn snapshot(&self, table: &Table) -> Result<Snapshot>;
    fn count(&self, table: &Table) -> Result<usize>;
    /// Column names and types of an arbitrary relation expression.
    fn describe(&self, relation: &str) -> Result<Vec<Field>>;
}

impl Catalog for Connection {
    fn exists(&self, table: &Table) -> Result<bool> {
        let sql = "SELECT COUNT(*) FROM information_schema.tables \
                   WHERE table_schema = current_schema() AND lower(table_name) = lower(?)";
        let n: i64 = self.query_row(sql, duckdb::params![table.name()], |row| row.get(0))?;
        Ok(n > 0)
    }
    fn snapshot(&self, table: &Table) -> Result<Snapshot> {
        let sql = format!(
            "SELECT name, type, pk FROM pragma_table_info({}) ORDER BY cid",
            quote_literal(table.name())
        );
        let mut stmt = self.prepare(&sql)?;
        let fields = stmt
            .query_map([], |row| {
                Ok(Field {
                    name: row.get(0)?,
                    kind: row.get(1)?,
                    primary: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Snapshot(fields))
    }
    fn count(&self, table: &Table) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.quoted());
        let n: i64 = self.query_row(&sql, [], |row| row.get(0))?;
        Ok(n as usize)
    }
    fn describe(&self, relation: &str) -> Result<Vec<Field>> {
        let sql = format!("DESCRIBE SELECT * FROM {}", relation);
        let mut stmt = self.prepare(&sql)?;
        let fields = stmt
            .query_map([], |row| {
                Ok(Field {
                    name: row.get(0)?,
                    kind: row.get(1)?,
                    primary: false,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn people() -> Table {
        Table::try_from("people").unwrap()
    }
    #[test]
    fn existence_is_case_insensitive() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!conn.exists(&people()).unwrap());
        conn.execute_batch("CREATE TABLE People (id INTEGER)").unwrap();
        assert!(conn.exists(&people()).unwrap());
    }
    #[test]
    fn snapshot_reports_key_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE people (subid INTEGER, name VARCHAR, id INTEGER, PRIMARY KEY (id, subid))",
        )
        .unwrap();
        let snapshot = conn.snapshot(&people()).unwrap();
        assert_eq!(snapshot.fields().len(), 3);
        assert_eq!(snapshot.primary_key(), vec!["subid", "id"]);
    }
    #[test]
    fn snapshot_without_key_is_empty() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE people (id INTEGER)").unwrap();
        assert!(conn.snapshot(&people()).unwrap().primary_key().is_empty());
    }
    #[test]
    fn counts_rows() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE people AS SELECT * FROM range(5)")
            .unwrap();
        assert_eq!(conn.count(&people()).unwrap(), 5);
    }
    #[test]
    fn describes_relations() {
        let conn = Connection::open_in_memory().unwrap();
        let fields = conn
            .describe("(SELECT 1::BIGINT AS id, 'x' AS name)")
            .unwrap();
        let names = fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(fields[0].kind, "BIGINT");
    }
}
