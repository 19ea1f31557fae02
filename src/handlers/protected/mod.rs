pub mod definitions; // /subjects/:subject_id/definitions/
pub mod scores; // /scores/, /subjects/:subject_id/scores/[averages/]
pub mod subjects; // /subjects/
pub mod users; // /users/me

use serde::Deserialize;

use crate::config::ApiConfig;
use crate::database::repository::Page;
use crate::error::ApiError;

/// `?skip=&limit=` on list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Apply defaults and clamp the limit to the configured maximum.
    pub fn resolve(&self, config: &ApiConfig) -> Result<Page, ApiError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(config.default_page_limit);

        if skip < 0 {
            return Err(ApiError::bad_request("skip must not be negative"));
        }
        if limit < 1 {
            return Err(ApiError::bad_request("limit must be at least 1"));
        }
        Ok(Page {
            skip,
            limit: limit.min(config.max_page_limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn api() -> ApiConfig {
        let mut api = AppConfig::for_database("postgres://localhost/x").api;
        api.default_page_limit = 100;
        api.max_page_limit = 500;
        api
    }

    #[test]
    fn defaults_apply() {
        let page = PageQuery::default().resolve(&api()).unwrap();
        assert_eq!(page, Page { skip: 0, limit: 100 });
    }

    #[test]
    fn limit_is_clamped() {
        let page = PageQuery { skip: Some(20), limit: Some(10_000) }.resolve(&api()).unwrap();
        assert_eq!(page, Page { skip: 20, limit: 500 });
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(PageQuery { skip: Some(-1), limit: None }.resolve(&api()).is_err());
        assert!(PageQuery { skip: None, limit: Some(0) }.resolve(&api()).is_err());
    }
}
