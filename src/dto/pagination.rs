use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::repositories::PageRequest;

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
#[serde(default)]
pub struct ListQuery {
    #[validate(range(min = 0))]
    pub skip: Option<i64>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> Result<PageRequest> {
        self.validate()?;
        Ok(PageRequest {
            skip: self.skip.unwrap_or(DEFAULT_SKIP),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_apply_when_absent() {
        let page = ListQuery::default().page().unwrap();
        assert_eq!(page, PageRequest { skip: 0, limit: 5 });
    }

    #[test]
    fn negative_skip_is_rejected() {
        let query = ListQuery { skip: Some(-1), limit: None };
        let err = query.page().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn limit_outside_bounds_is_rejected() {
        for limit in [-3, 0, 51] {
            let query = ListQuery { skip: None, limit: Some(limit) };
            assert!(query.page().is_err(), "limit {} should fail", limit);
        }
    }
}
