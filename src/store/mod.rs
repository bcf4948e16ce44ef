//! The document store collaborator: a key/value-per-collection persistence
//! interface plus its DuckDB-backed implementation.
//!
//! Repositories depend only on the [`DocumentStore`] trait and receive their
//! store by explicit injection; the provided [`DuckStore`] keeps one table of
//! JSON documents per collection and builds every query through the
//! parameterized [`DocQuery`] builder.

pub mod sql;

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

use duckdb::Connection as DuckDbConnection;
use log::{debug, error};
use serde_json::Value;

use crate::error::{CatalogError, Result};
use sql::DocQuery;

/// JSON path of the owner principal inside every owned document.
pub const OWNER_PATH: &str = "$.mtgjsonApiMeta.owner";

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// A conjunction of `(json path == value)` conditions.
///
/// Built from a natural-key condition, optionally narrowed by an owner
/// principal. An empty or absent owner means no ownership filter
/// (administrative/system access).
#[derive(Debug, Clone)]
pub struct Filter {
    clauses: Vec<(String, String)>,
}

impl Filter {
    /// Create a filter matching the given JSON path against a value.
    pub fn key(path: &str, value: &str) -> Self {
        Self {
            clauses: vec![(path.to_string(), value.to_string())],
        }
    }

    /// Narrow the filter to documents owned by `owner`.
    ///
    /// `None` and the empty string both mean "no ownership filter".
    pub fn owner(mut self, owner: Option<&str>) -> Self {
        if let Some(owner) = owner {
            if !owner.is_empty() {
                self.clauses.push((OWNER_PATH.to_string(), owner.to_string()));
            }
        }
        self
    }

    fn apply(&self, query: &mut DocQuery) {
        for (path, value) in &self.clauses {
            query.where_path_eq(path, value);
        }
    }
}

// ---------------------------------------------------------------------------
// DocumentStore
// ---------------------------------------------------------------------------

/// Narrow persistence contract consumed by the repositories.
///
/// Implementations serialize individual document operations but offer no
/// multi-document transaction boundary; callers own any probe-then-insert
/// sequencing and its documented races.
pub trait DocumentStore {
    /// Find a single document matching the filter, or `None`.
    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>>;

    /// Find every document whose `key_path` value is in `values`.
    ///
    /// Result order is unspecified and need not match the input order.
    fn find_many(&self, collection: &str, key_path: &str, values: &[String]) -> Result<Vec<Value>>;

    /// Insert a document into the collection.
    fn insert(&self, collection: &str, doc: &Value) -> Result<()>;

    /// Replace at most one document matching the filter; returns the
    /// replaced count (0 or 1).
    fn replace(&self, collection: &str, filter: &Filter, doc: &Value) -> Result<u64>;

    /// Delete at most one document matching the filter; returns the deleted
    /// count (0 or 1).
    fn delete(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Return up to `limit` documents from the collection, unfiltered.
    fn list_all(&self, collection: &str, limit: i64) -> Result<Vec<Value>>;
}

// ---------------------------------------------------------------------------
// DuckStore
// ---------------------------------------------------------------------------

/// DuckDB-backed [`DocumentStore`].
///
/// Each collection is a single-column table of JSON documents. Collection
/// tables are created lazily on first access.
pub struct DuckStore {
    conn: DuckDbConnection,
    ensured: RefCell<HashSet<String>>,
}

impl DuckStore {
    /// Open an in-memory store. All data is discarded on drop.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: DuckDbConnection::open_in_memory()?,
            ensured: RefCell::new(HashSet::new()),
        })
    }

    /// Open (or create) an on-disk store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: DuckDbConnection::open(path.as_ref())?,
            ensured: RefCell::new(HashSet::new()),
        })
    }

    /// Create the collection table if this store has not touched it yet.
    fn ensure_collection(&self, collection: &str) -> Result<()> {
        if self.ensured.borrow().contains(collection) {
            return Ok(());
        }
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (doc VARCHAR NOT NULL)",
            collection
        ))?;
        self.ensured.borrow_mut().insert(collection.to_string());
        Ok(())
    }

    /// Run a SELECT and parse each returned document as JSON.
    fn select_docs(&self, sql: &str, params: &[String]) -> Result<Vec<Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let raw: String = row.get(0)?;
            out.push(serde_json::from_str(&raw)?);
        }
        Ok(out)
    }

    /// Run an INSERT/UPDATE/DELETE and return the affected row count.
    fn execute(&self, sql: &str, params: &[String]) -> Result<u64> {
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();
        let changed = self.conn.execute(sql, param_values.as_slice())?;
        Ok(changed as u64)
    }
}

impl DocumentStore for DuckStore {
    fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>> {
        self.ensure_collection(collection)?;

        let mut query = DocQuery::new(collection);
        filter.apply(&mut query);
        query.limit(1);
        let (sql, params) = query.build_select();

        debug!("find_one collection={} filter={:?}", collection, filter);
        let docs = self.select_docs(&sql, &params)?;
        Ok(docs.into_iter().next())
    }

    fn find_many(&self, collection: &str, key_path: &str, values: &[String]) -> Result<Vec<Value>> {
        self.ensure_collection(collection)?;
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = DocQuery::new(collection);
        query.where_path_in(key_path, values);
        let (sql, params) = query.build_select();

        debug!(
            "find_many collection={} key={} values={}",
            collection,
            key_path,
            values.len()
        );
        self.select_docs(&sql, &params)
    }

    fn insert(&self, collection: &str, doc: &Value) -> Result<()> {
        self.ensure_collection(collection)?;

        let raw = serde_json::to_string(doc)?;
        debug!("insert collection={}", collection);
        match self.execute(&format!("INSERT INTO {} VALUES (?)", collection), &[raw]) {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("insert failed collection={} err={}", collection, e);
                Err(e)
            }
        }
    }

    fn replace(&self, collection: &str, filter: &Filter, doc: &Value) -> Result<u64> {
        self.ensure_collection(collection)?;

        let mut query = DocQuery::new(collection);
        filter.apply(&mut query);
        let raw = serde_json::to_string(doc)?;
        let (sql, params) = query.build_update(&raw);

        debug!("replace collection={} filter={:?}", collection, filter);
        self.execute(&sql, &params)
    }

    fn delete(&self, collection: &str, filter: &Filter) -> Result<u64> {
        self.ensure_collection(collection)?;

        let mut query = DocQuery::new(collection);
        filter.apply(&mut query);
        let (sql, params) = query.build_delete();

        debug!("delete collection={} filter={:?}", collection, filter);
        self.execute(&sql, &params)
    }

    fn list_all(&self, collection: &str, limit: i64) -> Result<Vec<Value>> {
        self.ensure_collection(collection)?;

        let mut query = DocQuery::new(collection);
        if limit > 0 {
            query.limit(limit);
        }
        let (sql, params) = query.build_select();

        debug!("list_all collection={} limit={}", collection, limit);
        self.select_docs(&sql, &params)
    }
}

/// Deserialize a stored document into a model, wrapping malformed documents
/// in a JSON error rather than panicking.
pub(crate) fn from_doc<T: serde::de::DeserializeOwned>(doc: Value) -> Result<T> {
    serde_json::from_value(doc).map_err(CatalogError::from)
}
