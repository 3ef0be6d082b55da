//! Person search, filtering and pagination primitives.
//!
//! This module lives in `core` (zero IO) so that both the PostgreSQL
//! repositories and the in-memory store build their queries from the same
//! filter description. A [`PersonFilter`] is an ordered chain of
//! [`Clause`]s; a clause is only added when its criterion is non-blank and
//! all clauses are combined with logical AND.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of persons per page.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Maximum number of persons per page.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Filter clauses
// ---------------------------------------------------------------------------

/// A single predicate over a person's searchable fields.
///
/// All comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `name` contains the term.
    NameContains(String),
    /// `sex` contains the term.
    SexContains(String),
    /// `sex` equals the term.
    SexEquals(String),
}

impl Clause {
    /// The raw user-supplied term of this clause.
    pub fn term(&self) -> &str {
        match self {
            Clause::NameContains(t) | Clause::SexContains(t) | Clause::SexEquals(t) => t,
        }
    }

    /// Evaluate the clause against in-memory field values.
    ///
    /// A person with no `sex` never satisfies a sex clause.
    pub fn matches(&self, name: &str, sex: Option<&str>) -> bool {
        let term = self.term().to_lowercase();
        match self {
            Clause::NameContains(_) => name.to_lowercase().contains(&term),
            Clause::SexContains(_) => sex.is_some_and(|s| s.to_lowercase().contains(&term)),
            Clause::SexEquals(_) => sex.is_some_and(|s| s.to_lowercase() == term),
        }
    }
}

/// Conjunctive filter over persons, built from optional criteria.
///
/// ```
/// use cadastro_core::search::PersonFilter;
///
/// let filter = PersonFilter::new()
///     .name_contains(Some("ana"))
///     .sex_contains(Some("  "));
/// assert_eq!(filter.clauses().len(), 1);
/// assert!(filter.matches("Mariana", Some("F")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
    clauses: Vec<Clause>,
}

impl PersonFilter {
    /// An empty filter that matches every person.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `name` to contain `term`, if `term` is non-blank.
    pub fn name_contains(self, term: Option<&str>) -> Self {
        self.push_if_present(term, Clause::NameContains)
    }

    /// Require `sex` to contain `term`, if `term` is non-blank.
    pub fn sex_contains(self, term: Option<&str>) -> Self {
        self.push_if_present(term, Clause::SexContains)
    }

    /// Require `sex` to equal `term`, if `term` is non-blank.
    pub fn sex_equals(self, term: Option<&str>) -> Self {
        self.push_if_present(term, Clause::SexEquals)
    }

    fn push_if_present(mut self, term: Option<&str>, make: fn(String) -> Clause) -> Self {
        if let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) {
            self.clauses.push(make(term.to_string()));
        }
        self
    }

    /// Clauses in the order they were added.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when every clause holds for the given field values.
    pub fn matches(&self, name: &str, sex: Option<&str>) -> bool {
        self.clauses.iter().all(|c| c.matches(name, sex))
    }
}

/// Escape `LIKE`/`ILIKE` metacharacters so user input matches literally.
///
/// The escape character is a backslash; queries must declare `ESCAPE '\'`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build a `%term%` pattern for a substring `ILIKE` match.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Person fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Sex,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort descriptor in Spring notation: `field[,asc|desc]`.
///
/// Field names are accepted in Portuguese (`nome`, `sexo`) or English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl FromStr for Sort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);

        let field = match parts.next().unwrap_or("").to_lowercase().as_str() {
            "" | "nome" | "name" => SortField::Name,
            "sexo" | "sex" => SortField::Sex,
            "id" => SortField::Id,
            other => {
                return Err(CoreError::Validation(format!(
                    "Unsupported sort field '{other}'. Supported: nome, sexo, id"
                )))
            }
        };

        let direction = match parts.next().map(str::to_lowercase).as_deref() {
            None | Some("") | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "Unsupported sort direction '{other}'. Supported: asc, desc"
                )))
            }
        };

        Ok(Sort { field, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Name => "nome",
            SortField::Sex => "sexo",
            SortField::Id => "id",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{field},{direction}")
    }
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// Pagination descriptor: zero-based page index, page size and sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl PageRequest {
    /// Build a page request from raw query parameters.
    ///
    /// Missing values fall back to the defaults, the size is clamped to
    /// `[1, MAX_PAGE_SIZE]` and negative pages become page 0. An unknown sort
    /// field is a validation error.
    pub fn from_params(
        page: Option<i64>,
        size: Option<i64>,
        sort: Option<&str>,
    ) -> Result<Self, CoreError> {
        let sort = match sort {
            Some(s) => s.parse()?,
            None => Sort::default(),
        };
        Ok(Self {
            page: page.unwrap_or(0).max(0),
            size: clamp_size(size),
            sort,
        })
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// Clamp a user-provided page size to valid bounds.
pub fn clamp_size(size: Option<i64>) -> i64 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// One page of results plus the metadata needed for pagination controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub sort: String,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            sort: request.sort.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- PersonFilter --------------------------------------------------------

    #[test]
    fn blank_criteria_add_no_clauses() {
        let filter = PersonFilter::new()
            .name_contains(None)
            .name_contains(Some(""))
            .sex_contains(Some("   "))
            .sex_equals(None);
        assert!(filter.is_empty());
        assert!(filter.matches("Anyone", None));
    }

    #[test]
    fn criteria_are_trimmed() {
        let filter = PersonFilter::new().name_contains(Some("  ana "));
        assert_eq!(filter.clauses(), &[Clause::NameContains("ana".into())]);
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let filter = PersonFilter::new().name_contains(Some("ANA"));
        assert!(filter.matches("Ana Silva", None));
        assert!(filter.matches("Mariana", None));
        assert!(!filter.matches("Bruno", None));
    }

    #[test]
    fn clauses_combine_with_and() {
        let filter = PersonFilter::new()
            .name_contains(Some("ana"))
            .sex_contains(Some("f"));
        assert!(filter.matches("Ana", Some("F")));
        assert!(!filter.matches("Ana", Some("M")));
        assert!(!filter.matches("Bruno", Some("F")));
    }

    #[test]
    fn sex_equals_requires_whole_value() {
        let filter = PersonFilter::new().sex_equals(Some("f"));
        assert!(filter.matches("x", Some("F")));
        assert!(!filter.matches("x", Some("FM")));
        assert!(!filter.matches("x", None));
    }

    #[test]
    fn sex_contains_accepts_partial_value() {
        let filter = PersonFilter::new().sex_contains(Some("fem"));
        assert!(filter.matches("x", Some("Feminino")));
        assert!(!filter.matches("x", None));
    }

    // -- escape_like ---------------------------------------------------------

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
    }

    #[test]
    fn contains_pattern_wraps_with_wildcards() {
        assert_eq!(contains_pattern("ana"), "%ana%");
        assert_eq!(contains_pattern("a%"), "%a\\%%");
    }

    // -- Sort ----------------------------------------------------------------

    #[test]
    fn sort_defaults_to_name_ascending() {
        let sort: Sort = "".parse().unwrap();
        assert_eq!(sort, Sort::default());
        assert_eq!(sort.field, SortField::Name);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn sort_parses_spring_notation() {
        let sort: Sort = "sexo,desc".parse().unwrap();
        assert_eq!(sort.field, SortField::Sex);
        assert_eq!(sort.direction, SortDirection::Desc);

        let sort: Sort = "ID".parse().unwrap();
        assert_eq!(sort.field, SortField::Id);
    }

    #[test]
    fn sort_rejects_unknown_field() {
        assert_matches!("salary".parse::<Sort>(), Err(CoreError::Validation(_)));
        assert_matches!("nome,up".parse::<Sort>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn sort_display_round_trips() {
        let sort: Sort = "name,desc".parse().unwrap();
        assert_eq!(sort.to_string(), "nome,desc");
    }

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn page_request_defaults() {
        let req = PageRequest::from_params(None, None, None).unwrap();
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_request_clamps_values() {
        let req = PageRequest::from_params(Some(-3), Some(1000), None).unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, MAX_PAGE_SIZE);

        let req = PageRequest::from_params(Some(2), Some(0), None).unwrap();
        assert_eq!(req.size, 1);
        assert_eq!(req.offset(), 2);
    }

    #[test]
    fn page_request_offset() {
        let req = PageRequest::from_params(Some(3), Some(5), Some("nome")).unwrap();
        assert_eq!(req.offset(), 15);
    }

    // -- Page ----------------------------------------------------------------

    #[test]
    fn page_total_pages_rounds_up() {
        let req = PageRequest::default();
        let page = Page::new(vec![1, 2, 3, 4, 5], &req, 11);
        assert_eq!(page.total_elements, 11);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.sort, "nome,asc");
    }

    #[test]
    fn empty_page_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.content.is_empty());
    }
}
