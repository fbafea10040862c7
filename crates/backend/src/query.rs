//! Row query builder rendered to PostgREST-style query parameters.

/// Sort direction for [`RowQuery::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A read against one backend table: equality filters, one sort column and
/// an optional row limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    pub table: &'static str,
    pub filters: Vec<(String, String)>,
    pub order: Option<(String, Direction)>,
    pub limit: Option<u32>,
}

impl RowQuery {
    /// Select all columns from `table`.
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Keep rows whose `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render as query-string pairs, e.g. `client_id=eq.<uuid>` and
    /// `order=created_at.desc`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some((column, direction)) = &self.order {
            params.push(("order".to_string(), format!("{column}.{}", direction.as_str())));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}
