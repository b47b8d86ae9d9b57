//! Shared SQL assembly helpers for the repositories.
//!
//! Dynamic SQL built here is safe from injection: column names and
//! operators are hardcoded in each repository, all values are bound via
//! `$n` placeholders, and the only interpolated numbers are the
//! placeholder indices and the integer limit.

/// Render a `WHERE` clause from a condition list; empty list, empty clause.
pub(crate) fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// Render a `LIMIT` clause; `None` (unpaginated request) renders nothing.
pub(crate) fn limit_clause(limit: Option<i64>) -> String {
    match limit {
        Some(n) => format!("LIMIT {}", n),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_conditions_render_no_where() {
        assert_eq!(where_clause(&[]), "");
    }

    #[test]
    fn conditions_are_joined_with_and() {
        let conditions = vec!["office_id = UPPER($1)".to_string(), "name ~* $2".to_string()];
        assert_eq!(
            where_clause(&conditions),
            "WHERE office_id = UPPER($1) AND name ~* $2"
        );
    }

    #[test]
    fn unbounded_request_renders_no_limit() {
        assert_eq!(limit_clause(None), "");
        assert_eq!(limit_clause(Some(21)), "LIMIT 21");
    }
}
