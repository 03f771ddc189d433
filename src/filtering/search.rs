/// Escape LIKE wildcards so user text only ever matches literally.
/// Escapes: `\` (the escape character itself), `%` (match any) and `_` (match single char)
///
/// Escaping `\` as well goes beyond `%`/`_` on purpose: a trailing or stray
/// backslash in user text would otherwise escape the next pattern character.
#[must_use]
pub fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\") // Escape backslash first
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Wrap an escaped term for substring matching.
pub(crate) fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like_wildcards(term))
}

/// Parenthesized OR group produced for a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchClause {
    /// `(a LIKE ? OR b LIKE ?)`, or empty when there is nothing to search.
    pub clause: String,
    /// One pattern per placeholder, in column order.
    pub params: Vec<String>,
}

impl SearchClause {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }
}

/// Build the search clause over `columns` for an optional search term.
///
/// An absent or empty term, or an empty column list, yields an empty clause
/// that callers leave out of the `WHERE`. The term is always bound, never
/// interpolated.
#[must_use]
pub fn build_search_clause(columns: &[&str], search: Option<&str>) -> SearchClause {
    let Some(term) = search.filter(|term| !term.is_empty()) else {
        return SearchClause::default();
    };
    if columns.is_empty() {
        return SearchClause::default();
    }

    let pattern = contains_pattern(term);
    let matches: Vec<String> = columns
        .iter()
        .map(|column| format!("{column} LIKE ?"))
        .collect();

    SearchClause {
        clause: format!("({})", matches.join(" OR ")),
        params: vec![pattern; columns.len()],
    }
}
