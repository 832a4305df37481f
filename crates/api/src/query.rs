//! Query-string parameter types shared by handlers and actions.

use clientpulse_core::update::normalize_tags;
use serde::Deserialize;

/// Filters and paging for `GET /api/projects/{id}/updates`.
///
/// `tags` is comma-separated (`?tags=a,b`); an update matches only when it
/// carries every listed tag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListParams {
    pub status: Option<String>,
    pub tags: Option<String>,
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl UpdateListParams {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|raw| normalize_tags(&raw.split(',').collect::<Vec<_>>()))
            .unwrap_or_default()
    }
}

/// Paging for `GET /api/share/{slug}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareParams {
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_list_splits_and_normalizes() {
        let params = UpdateListParams {
            tags: Some(" a,b,,a ".into()),
            ..Default::default()
        };
        assert_eq!(params.tag_list(), vec!["a", "b"]);
    }

    #[test]
    fn missing_tags_means_no_filter() {
        assert!(UpdateListParams::default().tag_list().is_empty());
    }
}
