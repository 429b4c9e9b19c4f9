//! List-query shape: page, page size, and the sort allowlist.

/// Columns a caller may sort by. ORDER BY text is derived from these
/// variants only; caller input never reaches the statement directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Model,
    Year,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub descending: bool,
}

impl Sort {
    /// Parse a sort token (`year`, `-year`, ...). Returns None for anything
    /// outside the allowlist; the caller reports that as a validation error.
    pub fn parse(token: &str) -> Option<Sort> {
        let (descending, name) = match token.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let key = match name {
            "id" => SortKey::Id,
            "model" => SortKey::Model,
            "year" => SortKey::Year,
            "runtime" => SortKey::Runtime,
            _ => return None,
        };
        Some(Sort { key, descending })
    }

    pub fn column(&self) -> &'static str {
        match self.key {
            SortKey::Id => "id",
            SortKey::Model => "model",
            SortKey::Year => "year",
            SortKey::Runtime => "runtime",
        }
    }

    pub fn direction(&self) -> &'static str {
        if self.descending {
            "DESC"
        } else {
            "ASC"
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort {
            key: SortKey::Id,
            descending: false,
        }
    }
}

/// Validated pagination and ordering for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: Sort,
}

impl Filters {
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            page: 1,
            page_size: 20,
            sort: Sort::default(),
        }
    }
}
