use serde::{Deserialize, Serialize};

/// Result categories a search can produce.
///
/// Declaration order is display order: sorting categories yields Jobs,
/// Clients, Allocations, Task Groups, CSI Plugins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
	Job,
	Node,
	Allocation,
	TaskGroup,
	Plugin,
}

impl Category {
	/// Every category in display order.
	pub const ALL: [Category; 5] = [
		Category::Job,
		Category::Node,
		Category::Allocation,
		Category::TaskGroup,
		Category::Plugin,
	];

	/// Tag carried by each [`MatchResult`](crate::MatchResult) of this category.
	#[must_use]
	pub const fn tag(self) -> &'static str {
		match self {
			Category::Job => "job",
			Category::Node => "node",
			Category::Allocation => "allocation",
			Category::TaskGroup => "task-group",
			Category::Plugin => "plugin",
		}
	}

	/// Human readable name used as the group label prefix.
	#[must_use]
	pub const fn group_name(self) -> &'static str {
		match self {
			Category::Job => "Jobs",
			Category::Node => "Clients",
			Category::Allocation => "Allocations",
			Category::TaskGroup => "Task Groups",
			Category::Plugin => "CSI Plugins",
		}
	}

	/// Key under which the remote fuzzy endpoint reports this category.
	#[must_use]
	pub const fn response_key(self) -> &'static str {
		match self {
			Category::Job => "jobs",
			Category::Node => "nodes",
			Category::Allocation => "allocs",
			Category::TaskGroup => "groups",
			Category::Plugin => "plugins",
		}
	}
}

impl std::fmt::Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.tag())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordering_matches_display_order() {
		let mut shuffled = vec![
			Category::Plugin,
			Category::Node,
			Category::TaskGroup,
			Category::Job,
			Category::Allocation,
		];
		shuffled.sort();
		assert_eq!(shuffled, Category::ALL.to_vec());
	}

	#[test]
	fn serializes_as_tag() {
		let json = serde_json::to_string(&Category::TaskGroup).unwrap();
		assert_eq!(json, "\"task-group\"");
	}
}
