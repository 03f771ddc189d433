//! Assembles filtering output into the COUNT and page SELECT statements.

use sea_orm::{DbBackend, Statement, Value};
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::filtering::{
    EqualityFilter, FilterValue, Pagination, ParsedFilters, SearchClause, SortSpec,
};

/// AND-joined `WHERE` fragments with their bind values in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    clauses: Vec<String>,
    params: Vec<FilterValue>,
}

impl WhereClause {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one fragment and the values for its placeholders. Empty
    /// fragments are skipped along with their values.
    pub fn push<I>(&mut self, clause: impl Into<String>, params: I)
    where
        I: IntoIterator,
        I::Item: Into<FilterValue>,
    {
        let clause = clause.into();
        if clause.is_empty() {
            return;
        }
        self.clauses.push(clause);
        self.params.extend(params.into_iter().map(Into::into));
    }

    /// Equality filters from `extract_filters`, in `equality` order.
    ///
    /// Values that do not parse as the filter's kind are dropped.
    pub fn push_simple_filters(
        &mut self,
        filters: &HashMap<String, String>,
        equality: &[EqualityFilter],
    ) {
        for filter in equality {
            let Some(raw) = filters.get(filter.key) else {
                continue;
            };
            match filter.kind.bind(raw) {
                Some(value) => self.push(format!("{} = ?", filter.column), [value]),
                None => tracing::debug!(
                    key = filter.key,
                    kind = ?filter.kind,
                    "Dropping equality filter with unparsable value"
                ),
            }
        }
    }

    pub fn push_search(&mut self, search: SearchClause) {
        self.push(search.clause, search.params);
    }

    pub fn push_filters(&mut self, parsed: ParsedFilters) {
        for (clause, value) in parsed.clauses.into_iter().zip(parsed.params) {
            self.push(clause, [value]);
        }
    }

    /// `" WHERE a AND b"`, or an empty string when nothing was pushed.
    #[must_use]
    pub fn render(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    #[must_use]
    pub fn params(&self) -> &[FilterValue] {
        &self.params
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Everything a list endpoint resolved from one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPlan {
    pub pagination: Pagination,
    pub sort: SortSpec,
    pub filter: WhereClause,
}

impl ListPlan {
    /// `<select_sql> WHERE .. ORDER BY .. LIMIT ? OFFSET ?`
    ///
    /// `select_sql` is trusted program text and must not contain `?` when the
    /// backend is `PostgreSQL`.
    #[must_use]
    pub fn select_statement(&self, backend: DbBackend, select_sql: &str) -> Statement {
        let sql = format!(
            "{select_sql}{} ORDER BY {} LIMIT ? OFFSET ?",
            self.filter.render(),
            self.sort.order_by
        );
        let values = self
            .bind_values()
            .chain([
                bind_u64(self.pagination.page_size),
                bind_u64(self.pagination.offset),
            ])
            .collect::<Vec<_>>();
        Statement::from_sql_and_values(backend, backend_sql(backend, &sql), values)
    }

    /// `<count_sql> WHERE ..` with the same bind values as the page query.
    #[must_use]
    pub fn count_statement(&self, backend: DbBackend, count_sql: &str) -> Statement {
        let sql = format!("{count_sql}{}", self.filter.render());
        Statement::from_sql_and_values(
            backend,
            backend_sql(backend, &sql),
            self.bind_values().collect::<Vec<_>>(),
        )
    }

    fn bind_values(&self) -> impl Iterator<Item = Value> + '_ {
        self.filter.params().iter().cloned().map(Value::from)
    }
}

/// LIMIT/OFFSET are bound as BIGINT, the widest integer every backend accepts.
fn bind_u64(value: u64) -> Value {
    i64::try_from(value).unwrap_or(i64::MAX).into()
}

/// Adapt `?`-style SQL to `backend`.
///
/// LIKE patterns are escaped with `\`. MySQL and PostgreSQL use that escape
/// character by default, SQLite has none, so it is declared explicitly there.
fn backend_sql(backend: DbBackend, sql: &str) -> String {
    match backend {
        DbBackend::Postgres => number_placeholders(sql),
        DbBackend::Sqlite => sql.replace(LIKE_PLACEHOLDER, SQLITE_LIKE_PLACEHOLDER),
        _ => sql.to_owned(),
    }
}

const LIKE_PLACEHOLDER: &str = "LIKE ?";
const SQLITE_LIKE_PLACEHOLDER: &str = "LIKE ? ESCAPE '\\'";

/// Rewrite `?` placeholders to `$1..$n`, keeping their order.
fn number_placeholders(sql: &str) -> String {
    let mut numbered = String::with_capacity(sql.len() + 8);
    let mut index = 0;
    for ch in sql.chars() {
        if ch == '?' {
            index += 1;
            let _ = write!(numbered, "${index}");
        } else {
            numbered.push(ch);
        }
    }
    numbered
}
