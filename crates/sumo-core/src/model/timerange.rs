//! Time range definitions shared by dashboards and panels

use crate::merge::{Merge, merge_nested, merge_option, merge_string};
use serde::{Deserialize, Serialize};

/// One end of a time range, e.g. `{type: RelativeTimeRangeBoundary, relativeTime: -15m}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeBoundary {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub relative_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch_millis: Option<i64>,
}

impl TimeBoundary {
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty() && self.relative_time.is_empty() && self.epoch_millis.is_none()
    }
}

impl Merge for TimeBoundary {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.kind, &other.kind);
        merge_string(&mut self.relative_time, &other.relative_time);
        merge_option(&mut self.epoch_millis, &other.epoch_millis);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeRange {
    #[serde(rename = "type")]
    pub kind: String,
    pub from: Option<TimeBoundary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<TimeBoundary>,
}

impl TimeRange {
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
            && self.from.as_ref().is_none_or(TimeBoundary::is_empty)
            && self.to.as_ref().is_none_or(TimeBoundary::is_empty)
    }

    /// Drop boundaries that carry no information.
    pub fn empty_to_none(&mut self) {
        if self.from.as_ref().is_some_and(TimeBoundary::is_empty) {
            self.from = None;
        }
        if self.to.as_ref().is_some_and(TimeBoundary::is_empty) {
            self.to = None;
        }
    }
}

impl Merge for TimeRange {
    fn merge_from(&mut self, other: &Self) {
        merge_string(&mut self.kind, &other.kind);
        merge_nested(&mut self.from, &other.from);
        merge_nested(&mut self.to, &other.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative(value: &str) -> TimeBoundary {
        TimeBoundary {
            kind: "RelativeTimeRangeBoundary".into(),
            relative_time: value.into(),
            epoch_millis: None,
        }
    }

    #[test]
    fn override_replaces_only_the_given_boundary() {
        let mut base = TimeRange {
            kind: "BeginBoundedTimeRange".into(),
            from: Some(relative("-15m")),
            to: Some(relative("-1m")),
        };
        let other = TimeRange {
            from: Some(TimeBoundary {
                relative_time: "-1h".into(),
                ..Default::default()
            }),
            ..Default::default()
        };

        base.merge_from(&other);

        assert_eq!(base.kind, "BeginBoundedTimeRange");
        assert_eq!(base.from, Some(relative("-1h")));
        assert_eq!(base.to, Some(relative("-1m")));
    }

    #[test]
    fn empty_boundaries_are_dropped() {
        let mut range = TimeRange {
            kind: "BeginBoundedTimeRange".into(),
            from: Some(relative("-15m")),
            to: Some(TimeBoundary::default()),
        };
        range.empty_to_none();
        assert!(range.to.is_none());
        assert!(range.from.is_some());
        assert!(!range.is_empty());
        assert!(TimeRange::default().is_empty());
    }
}
