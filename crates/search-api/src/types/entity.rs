use serde::{Deserialize, Serialize};

/// Entity lists that can be cached and searched locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
	Job,
	Node,
}

impl EntityKind {
	/// Plural name used in snapshot files and list endpoints.
	#[must_use]
	pub const fn plural(self) -> &'static str {
		match self {
			EntityKind::Job => "jobs",
			EntityKind::Node => "nodes",
		}
	}
}

/// A cached record that local matchers compare queries against.
///
/// Field names follow the scheduler's list payloads so an API response can be
/// deserialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableEntity {
	#[serde(rename = "ID")]
	pub id: String,
	#[serde(rename = "Name", default)]
	pub name: String,
	#[serde(rename = "Namespace", default, skip_serializing_if = "Option::is_none")]
	pub namespace: Option<String>,
}

impl SearchableEntity {
	#[must_use]
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			namespace: None,
		}
	}

	#[must_use]
	pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = Some(namespace.into());
		self
	}

	/// Read the value of `field`, if the entity has one.
	#[must_use]
	pub fn field(&self, field: EntityField) -> Option<&str> {
		match field {
			EntityField::Id => Some(self.id.as_str()),
			EntityField::Name => Some(self.name.as_str()),
			EntityField::Namespace => self.namespace.as_deref(),
		}
	}
}

/// Fields a matcher can be configured to inspect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityField {
	Id,
	Name,
	Namespace,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_list_payload_and_ignores_extra_fields() {
		let json = r#"{"ID":"web","Name":"web","Namespace":"default","Status":"running"}"#;
		let entity: SearchableEntity = serde_json::from_str(json).unwrap();
		assert_eq!(entity, SearchableEntity::new("web", "web").with_namespace("default"));
	}

	#[test]
	fn missing_namespace_reads_as_none() {
		let entity = SearchableEntity::new("abc", "client-1");
		assert_eq!(entity.field(EntityField::Namespace), None);
		assert_eq!(entity.field(EntityField::Name), Some("client-1"));
	}
}
