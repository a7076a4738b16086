use serde::{Deserialize, Serialize};

use super::{Category, SearchableEntity};

/// A single normalized search hit, regardless of which search path produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
	#[serde(rename = "type")]
	pub category: Category,
	pub id: String,
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub namespace: Option<String>,
	#[serde(rename = "jobId", default, skip_serializing_if = "Option::is_none")]
	pub job_id: Option<String>,
}

impl MatchResult {
	#[must_use]
	pub fn new(category: Category, id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			category,
			id: id.into(),
			label: label.into(),
			namespace: None,
			job_id: None,
		}
	}

	#[must_use]
	pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
		self.namespace = namespace;
		self
	}

	#[must_use]
	pub fn with_job_id(mut self, job_id: Option<String>) -> Self {
		self.job_id = job_id;
		self
	}

	/// Normalize a cached entity into a result of `category`, labeled by its
	/// display name.
	#[must_use]
	pub fn from_entity(category: Category, entity: &SearchableEntity) -> Self {
		Self::new(category, entity.id.clone(), entity.name.clone())
			.with_namespace(entity.namespace.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_with_type_tag_and_omits_absent_fields() {
		let result = MatchResult::new(Category::Job, "web", "web")
			.with_namespace(Some("default".into()));
		let value = serde_json::to_value(&result).unwrap();
		assert_eq!(
			value,
			serde_json::json!({
				"type": "job",
				"id": "web",
				"label": "web",
				"namespace": "default",
			})
		);
	}
}
