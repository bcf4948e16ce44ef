//! SQL builder for document-table queries.
//!
//! Every collection is a single-column table of JSON documents, so all
//! conditions are expressed against JSON paths via `json_extract_string`.
//! User-supplied values always go through DuckDB's parameter binding (`?`
//! placeholders), never through string interpolation; only crate-internal
//! path and collection constants are interpolated.

/// Builds parameterized queries over a JSON document table.
///
/// Methods return `&mut Self` for chaining.
pub struct DocQuery {
    collection: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
    limit_val: Option<i64>,
}

impl DocQuery {
    /// Create a builder targeting the given collection table.
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            limit_val: None,
        }
    }

    /// Add an equality condition on a JSON path:
    /// `json_extract_string(doc, '{path}') = ?`.
    pub fn where_path_eq(&mut self, path: &str, value: &str) -> &mut Self {
        self.where_clauses
            .push(format!("json_extract_string(doc, '{}') = ?", path));
        self.params.push(value.to_string());
        self
    }

    /// Add an IN condition on a JSON path with parameterized values.
    ///
    /// An empty values list produces `FALSE`.
    pub fn where_path_in(&mut self, path: &str, values: &[String]) -> &mut Self {
        if values.is_empty() {
            self.where_clauses.push("FALSE".to_string());
            return self;
        }
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        self.where_clauses.push(format!(
            "json_extract_string(doc, '{}') IN ({})",
            path,
            placeholders.join(", ")
        ));
        self.params.extend(values.iter().cloned());
        self
    }

    /// Set the maximum number of documents to return.
    pub fn limit(&mut self, n: i64) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Build a `SELECT doc` statement and its parameter list.
    pub fn build_select(&self) -> (String, Vec<String>) {
        let mut parts = vec![format!("SELECT doc FROM {}", self.collection)];
        self.push_where(&mut parts);
        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }
        (parts.join(" "), self.params.clone())
    }

    /// Build a `DELETE` statement and its parameter list.
    ///
    /// The statement removes at most one matching document: several rows can
    /// legitimately share a natural key (one per owner), and a broader filter
    /// must never wipe them all.
    pub fn build_delete(&self) -> (String, Vec<String>) {
        let sql = format!(
            "DELETE FROM {} WHERE rowid IN ({})",
            self.collection,
            self.match_one_subquery()
        );
        (sql, self.params.clone())
    }

    /// Build an `UPDATE ... SET doc = ?` statement touching at most one
    /// matching document.
    ///
    /// The replacement document is the first bound parameter, followed by the
    /// WHERE parameters in the order they were added.
    pub fn build_update(&self, doc: &str) -> (String, Vec<String>) {
        let sql = format!(
            "UPDATE {} SET doc = ? WHERE rowid IN ({})",
            self.collection,
            self.match_one_subquery()
        );

        let mut params = Vec::with_capacity(self.params.len() + 1);
        params.push(doc.to_string());
        params.extend(self.params.iter().cloned());
        (sql, params)
    }

    /// Subquery selecting the rowid of at most one document matching the
    /// WHERE conditions.
    fn match_one_subquery(&self) -> String {
        let mut parts = vec![format!("SELECT rowid FROM {}", self.collection)];
        self.push_where(&mut parts);
        parts.push("LIMIT 1".to_string());
        parts.join(" ")
    }

    fn push_where(&self, parts: &mut Vec<String>) {
        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }
    }
}
