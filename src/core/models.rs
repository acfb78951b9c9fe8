use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Broadcast channel categories selectable in the advanced search panel.
///
/// Each category is matched against the exact on-screen label of its
/// checkbox. If the site relabels the checkboxes, unmatched categories are
/// silently never unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    Terrestrial,
    Bs,
    Cs,
}

impl ChannelType {
    /// On-screen label of the channel-type checkbox.
    pub fn label(self) -> &'static str {
        match self {
            ChannelType::Terrestrial => "地上",
            ChannelType::Bs => "BS",
            ChannelType::Cs => "CS",
        }
    }
}

/// Search filter conditions.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    /// Search keyword. Required, non-empty.
    pub keyword: String,
    /// Channel-type restriction. `None` means "no restriction"; an
    /// explicitly empty set is rejected as a caller error.
    pub channel_types: Option<BTreeSet<ChannelType>>,
}

impl ScheduleFilter {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            channel_types: None,
        }
    }

    pub fn with_channel_types(
        mut self,
        channel_types: impl IntoIterator<Item = ChannelType>,
    ) -> Self {
        self.channel_types = Some(channel_types.into_iter().collect());
        self
    }

    /// Validates the filter before any browser interaction is attempted.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.keyword.trim().is_empty() {
            return Err(Error::InvalidFilter("keyword must not be empty".into()));
        }
        if let Some(types) = &self.channel_types {
            if types.is_empty() {
                return Err(Error::InvalidFilter(
                    "channel_types must not be an empty set; omit it for no restriction".into(),
                ));
            }
        }
        Ok(())
    }

    /// Desired checkbox labels, in stable order, for the reconciliation
    /// script. `None` when no channel restriction was requested.
    pub(crate) fn channel_labels(&self) -> Option<Vec<&'static str>> {
        self.channel_types
            .as_ref()
            .map(|types| types.iter().map(|t| t.label()).collect())
    }
}

/// One result node as read verbatim from the listing page, before any
/// Rust-side filtering or parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleRecord {
    pub title: String,
    pub url: String,
    pub date_text: String,
    pub broadcaster_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keyword_rejected() {
        let filter = ScheduleFilter::new("");
        assert!(matches!(filter.validate(), Err(Error::InvalidFilter(_))));

        let filter = ScheduleFilter::new("   ");
        assert!(matches!(filter.validate(), Err(Error::InvalidFilter(_))));
    }

    #[test]
    fn test_explicit_empty_channel_set_rejected() {
        let filter = ScheduleFilter::new("news").with_channel_types([]);
        assert!(matches!(filter.validate(), Err(Error::InvalidFilter(_))));
    }

    #[test]
    fn test_valid_filter_passes() {
        let filter = ScheduleFilter::new("news");
        assert!(filter.validate().is_ok());

        let filter =
            ScheduleFilter::new("news").with_channel_types([ChannelType::Bs, ChannelType::Cs]);
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_channel_labels_ordered() {
        let filter = ScheduleFilter::new("news")
            .with_channel_types([ChannelType::Cs, ChannelType::Terrestrial]);
        assert_eq!(filter.channel_labels(), Some(vec!["地上", "CS"]));

        let filter = ScheduleFilter::new("news");
        assert_eq!(filter.channel_labels(), None);
    }

    #[test]
    fn test_raw_record_deserializes_from_page_shape() {
        let raw = serde_json::json!({
            "title": "ニュース7",
            "url": "program/12345",
            "dateText": "12/23（土）22:00～22:54",
            "broadcasterName": "NHK総合"
        });
        let record: RawScheduleRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.title, "ニュース7");
        assert_eq!(record.broadcaster_name, "NHK総合");
    }
}
