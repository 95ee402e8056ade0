use super::*;
use duckdb::Connection;
use qd_core::Config;

/// Create-or-upsert of a staged relation into a managed table.
///
/// A missing table is created from the staged rows (with its key declared
/// when one is given). An existing table requires the same key, compared
/// as a set, and receives the rows via `INSERT OR REPLACE`. Either way,
/// rows with a null or blank key column never reach the table.
pub trait Merge {
    /// Returns the table's row count after the merge.
    fn merge(&mut self, table: &Table, key: Option<&PrimaryKey>, staged: &Staged)
    -> Result<usize>;
}

impl Merge for Connection {
    fn merge(
        &mut self,
        table: &Table,
        key: Option<&PrimaryKey>,
        staged: &Staged,
    ) -> Result<usize> {
        let relation = staged.relation();
        let fields = self.describe(&relation)?;
        if let Some(key) = key {
            present(key, &fields)?;
            let n = skipped(self, key, &relation)?;
            if n > 0 {
                log::warn!("{}: skipping {} rows with null or blank primary key", table, n);
            }
        }
        match self.exists(table)? {
            false => create(self, table, key, &relation, &fields)?,
            true => upsert(self, table, key, &relation, &fields)?,
        }
        self.count(table)
    }
}

/// Validates, resolves, and merges one upload.
///
/// The table name is checked before any connection is opened. `staged` and
/// the connection are owned here and released when this returns, whether
/// the merge succeeded or not.
pub fn merge_upload<I, S>(
    config: &Config,
    path: Option<&str>,
    table: &str,
    key: I,
    staged: Staged,
) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = Table::try_from(table)?;
    let key = PrimaryKey::parse(key)?;
    let mut conn = resolve(config, Source::Local, path)?;
    let rows = conn.merge(&table, key.as_ref(), &staged)?;
    log::info!("merged {:?} upload into {} ({} rows)", staged.format(), table, rows);
    Ok(rows)
}

fn present(key: &PrimaryKey, fields: &[Field]) -> Result<()> {
    match key
        .columns()
        .iter()
        .find(|c| !fields.iter().any(|f| f.name.eq_ignore_ascii_case(c)))
    {
        Some(missing) => Err(Error::validation(format!(
            "primary_key column {:?} not found in uploaded file",
            missing
        ))),
        None => Ok(()),
    }
}

/// Number of staged rows the blank-key filter will drop.
fn skipped(conn: &Connection, key: &PrimaryKey, relation: &str) -> Result<usize> {
    let sql = format!(
        "SELECT COUNT(*) - COUNT(*) FILTER (WHERE {}) FROM {}",
        key.predicate(),
        relation
    );
    let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(usize::try_from(n).unwrap_or_default())
}

fn create(
    conn: &mut Connection,
    table: &Table,
    key: Option<&PrimaryKey>,
    relation: &str,
    fields: &[Field],
) -> Result<()> {
    match key {
        None => {
            log::info!("creating {} without primary key", table);
            conn.execute_batch(&format!(
                "CREATE TABLE {} AS SELECT * FROM {}",
                table.quoted(),
                relation
            ))?;
        }
        Some(key) => {
            log::info!("creating {} with primary key ({})", table, key.ddl());
            let columns = fields
                .iter()
                .map(|f| format!("{} {}", quote_ident(&f.name), f.kind))
                .collect::<Vec<_>>()
                .join(", ");
            let tx = conn.transaction()?;
            tx.execute_batch(&format!(
                "CREATE TABLE {t} ({columns}, PRIMARY KEY ({k}));
                 INSERT INTO  {t} SELECT * FROM {relation} WHERE {p};",
                t = table.quoted(),
                k = key.ddl(),
                p = key.predicate(),
            ))?;
            tx.commit()?;
        }
    }
    Ok(())
}

fn upsert(
    conn: &mut Connection,
    table: &Table,
    key: Option<&PrimaryKey>,
    relation: &str,
    fields: &[Field],
) -> Result<()> {
    let key = key.ok_or_else(|| Error::validation("primary_key is required for upsert"))?;
    let existing = conn.snapshot(table)?.primary_key();
    if !key.matches(&existing) {
        return Err(Error::validation(format!(
            "primary_key mismatch: table {} has ({}), upload gave ({})",
            table,
            existing.join(", "),
            key.columns().join(", ")
        )));
    }
    log::info!("upserting into {} on ({})", table, key.ddl());
    let columns = fields
        .iter()
        .map(|f| quote_ident(&f.name))
        .collect::<Vec<_>>()
        .join(", ");
    let tx = conn.transaction()?;
    tx.execute_batch(&format!(
        "INSERT OR REPLACE INTO {t} ({c})
         SELECT                     {c} FROM {relation} WHERE {p};",
        t = table.quoted(),
        c = columns,
        p = key.predicate(),
    ))?;
    tx.commit()?;
    Ok(())
}
