//! Display-ready result groups and their count labels.

use serde::Serialize;

use crate::types::{Category, MatchResult};

/// Maximum number of results shown per category, on every search path.
pub const DISPLAY_LIMIT: usize = 10;

/// How the shown results of a group relate to everything that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TruncationInfo {
	pub shown: usize,
	pub total: usize,
	/// The producer of the results (the remote service) reported that it
	/// stopped before collecting every match.
	pub upstream: bool,
}

impl TruncationInfo {
	#[must_use]
	pub fn new(shown: usize, total: usize, upstream: bool) -> Self {
		Self {
			shown: shown.min(total),
			total,
			upstream,
		}
	}

	/// True when fewer results are displayed than actually matched.
	#[must_use]
	pub fn is_truncated(&self) -> bool {
		self.upstream || self.shown < self.total
	}
}

/// Build the label shown above a group of results.
///
/// A locally capped list reads `"Jobs (showing 10 of 20)"`, an uncapped one
/// `"Jobs (3)"`. `truncated` appends a `+` inside the parentheses, signalling
/// that even the total is a lower bound.
#[must_use]
pub fn group_label(name: &str, shown: usize, total: usize, truncated: bool) -> String {
	let count = if shown < total {
		format!("showing {shown} of {total}")
	} else {
		shown.to_string()
	};
	let indicator = if truncated { "+" } else { "" };
	format!("{name} ({count}{indicator})")
}

/// One labeled category of results, capped at the display limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
	pub category: Category,
	pub label: String,
	pub results: Vec<MatchResult>,
	pub truncation: TruncationInfo,
}

impl ResultGroup {
	/// Build a group from results that were already capped by the caller.
	///
	/// `total` is the number of results available before the cap was applied.
	#[must_use]
	pub fn from_capped(
		category: Category,
		shown: Vec<MatchResult>,
		total: usize,
		upstream_truncated: bool,
	) -> Self {
		let truncation = TruncationInfo::new(shown.len(), total.max(shown.len()), upstream_truncated);
		let label = group_label(
			category.group_name(),
			truncation.shown,
			truncation.total,
			truncation.upstream,
		);
		Self {
			category,
			label,
			results: shown,
			truncation,
		}
	}

	/// Cap `all` to `limit` entries and build the group from the remainder.
	#[must_use]
	pub fn capped(
		category: Category,
		mut all: Vec<MatchResult>,
		limit: usize,
		upstream_truncated: bool,
	) -> Self {
		let total = all.len();
		all.truncate(limit);
		Self::from_capped(category, all, total, upstream_truncated)
	}

	/// An empty group, used for categories that produced nothing.
	#[must_use]
	pub fn empty(category: Category) -> Self {
		Self::from_capped(category, Vec::new(), 0, false)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.results.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn jobs(count: usize) -> Vec<MatchResult> {
		(0..count)
			.map(|index| MatchResult::new(Category::Job, format!("job-{index}"), format!("job-{index}")))
			.collect()
	}

	#[test]
	fn label_reports_local_cap() {
		assert_eq!(group_label("Jobs", 10, 20, false), "Jobs (showing 10 of 20)");
	}

	#[test]
	fn label_reports_plain_count_when_nothing_was_cut() {
		assert_eq!(group_label("Jobs", 3, 3, false), "Jobs (3)");
	}

	#[test]
	fn label_marks_upstream_truncation() {
		assert_eq!(group_label("Jobs", 10, 20, true), "Jobs (showing 10 of 20+)");
		assert_eq!(group_label("CSI Plugins", 2, 2, true), "CSI Plugins (2+)");
	}

	#[test]
	fn capped_group_keeps_order_and_total() {
		let group = ResultGroup::capped(Category::Job, jobs(20), DISPLAY_LIMIT, false);
		assert_eq!(group.label, "Jobs (showing 10 of 20)");
		assert_eq!(group.results.len(), 10);
		assert_eq!(group.results[0].id, "job-0");
		assert_eq!(group.results[9].id, "job-9");
		assert!(group.truncation.is_truncated());
	}

	#[test]
	fn empty_group_is_not_truncated() {
		let group = ResultGroup::empty(Category::Plugin);
		assert_eq!(group.label, "CSI Plugins (0)");
		assert!(group.is_empty());
		assert!(!group.truncation.is_truncated());
	}

	#[test]
	fn shown_never_exceeds_total() {
		let group = ResultGroup::from_capped(Category::Node, jobs(4), 2, false);
		assert_eq!(group.truncation.shown, 4);
		assert_eq!(group.truncation.total, 4);
		assert_eq!(group.label, "Clients (4)");
	}
}
