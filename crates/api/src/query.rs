//! Shared query and form parameter types for API handlers.

use cadastro_core::search::PageRequest;
use serde::Deserialize;

use crate::directory::SearchCriteria;
use crate::error::AppResult;

/// Pagination parameters (`?page=&size=&sort=`).
///
/// `page` is zero-based; `sort` uses `field[,asc|desc]` notation.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    /// Resolve defaults and bounds. An unknown sort field is a 400.
    pub fn to_request(&self) -> AppResult<PageRequest> {
        Ok(PageRequest::from_params(
            self.page,
            self.size,
            self.sort.as_deref(),
        )?)
    }
}

/// Search criteria submitted as `nomepesquisa` / `sexopesquisa`, either as a
/// form body or as query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub nomepesquisa: Option<String>,
    #[serde(default)]
    pub sexopesquisa: Option<String>,
}

impl From<SearchParams> for SearchCriteria {
    fn from(params: SearchParams) -> Self {
        SearchCriteria::new(params.nomepesquisa, params.sexopesquisa)
    }
}
