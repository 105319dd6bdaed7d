use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// Query-string numbers arrive as strings; empty values mean "not set".
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(20),
            offset: Some(0),
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta {
            total,
            limit: self.limit(),
            offset: self.offset(),
            has_more: self.offset() + self.limit() < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        let params = PaginationParams {
            limit: Some(1000),
            offset: Some(-5),
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn empty_query_strings_mean_unset() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"","offset":""}"#).unwrap();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn meta_reports_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(0),
        };
        assert!(params.meta(11).has_more);
        assert!(!params.meta(10).has_more);
    }
}
