//! Single-strategy matchers over a list of cached entities.
//!
//! A [`Matcher`] is bound to one [`MatcherConfig`] and runs the enabled
//! [`MatchMode`]s in a fixed order. It never fails: a query that cannot form a
//! pattern simply yields no matches for that mode.

mod fuzzy;

use regex::{Regex, RegexBuilder};

use fedsearch_api::{EntityField, SearchableEntity};

use crate::error::SearchError;

/// How a matcher compares the query against an entity's fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
	/// Case-insensitive containment; exact equality ranks first.
	ExactOrSubstring,
	/// Fuzzy scoring, best score first.
	Fuzzy,
	/// The query compiled as a pattern anchored at the start of the field.
	AnchoredRegex,
}

/// Field selection and mode switches for one matcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatcherConfig {
	exact_fields: Vec<EntityField>,
	fuzzy_fields: Vec<EntityField>,
	regex_fields: Vec<EntityField>,
	exact_enabled: bool,
	fuzzy_enabled: bool,
	regex_enabled: bool,
	include_fuzzy_matches: bool,
}

impl Default for MatcherConfig {
	fn default() -> Self {
		Self {
			exact_fields: Vec::new(),
			fuzzy_fields: Vec::new(),
			regex_fields: Vec::new(),
			exact_enabled: true,
			fuzzy_enabled: false,
			regex_enabled: false,
			include_fuzzy_matches: false,
		}
	}
}

impl MatcherConfig {
	/// Exact/substring matching over `fields`.
	#[must_use]
	pub fn exact(fields: impl IntoIterator<Item = EntityField>) -> Self {
		Self {
			exact_fields: fields.into_iter().collect(),
			..Self::default()
		}
	}

	/// Prefix-pattern matching over `fields` with exact matching turned off.
	#[must_use]
	pub fn anchored(fields: impl IntoIterator<Item = EntityField>) -> Self {
		Self {
			regex_fields: fields.into_iter().collect(),
			exact_enabled: false,
			regex_enabled: true,
			..Self::default()
		}
	}

	/// Enable fuzzy matching over `fields`.
	#[must_use]
	pub fn with_fuzzy(mut self, fields: impl IntoIterator<Item = EntityField>) -> Self {
		self.fuzzy_fields = fields.into_iter().collect();
		self.fuzzy_enabled = true;
		self
	}

	/// Append fuzzy matches even when the exact pass already found something.
	#[must_use]
	pub fn include_fuzzy_matches(mut self, include: bool) -> Self {
		self.include_fuzzy_matches = include;
		self
	}

	/// The modes this configuration runs, in priority order.
	#[must_use]
	pub fn modes(&self) -> Vec<MatchMode> {
		let mut modes = Vec::with_capacity(3);
		if self.exact_enabled {
			modes.push(MatchMode::ExactOrSubstring);
		}
		if self.fuzzy_enabled {
			modes.push(MatchMode::Fuzzy);
		}
		if self.regex_enabled {
			modes.push(MatchMode::AnchoredRegex);
		}
		modes
	}

	fn fields_for(&self, mode: MatchMode) -> &[EntityField] {
		match mode {
			MatchMode::ExactOrSubstring => &self.exact_fields,
			MatchMode::Fuzzy => &self.fuzzy_fields,
			MatchMode::AnchoredRegex => &self.regex_fields,
		}
	}
}

/// A single search strategy bound to a fixed configuration.
#[derive(Clone, Debug)]
pub struct Matcher {
	name: &'static str,
	config: MatcherConfig,
}

impl Matcher {
	#[must_use]
	pub fn new(name: &'static str, config: MatcherConfig) -> Self {
		Self { name, config }
	}

	/// Matches jobs by id or name, with fuzzy name matches appended.
	#[must_use]
	pub fn job_name() -> Self {
		Self::new(
			"job-name",
			MatcherConfig::exact([EntityField::Id, EntityField::Name])
				.with_fuzzy([EntityField::Name])
				.include_fuzzy_matches(true),
		)
	}

	/// Matches nodes by name, with fuzzy name matches appended.
	#[must_use]
	pub fn node_name() -> Self {
		Self::new(
			"node-name",
			MatcherConfig::exact([EntityField::Name])
				.with_fuzzy([EntityField::Name])
				.include_fuzzy_matches(true),
		)
	}

	/// Matches nodes whose identifier starts with the query.
	#[must_use]
	pub fn node_id_prefix() -> Self {
		Self::new("node-id-prefix", MatcherConfig::anchored([EntityField::Id]))
	}

	#[must_use]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Run every enabled mode and concatenate their matches in mode order.
	///
	/// An entity matched by several modes appears once per mode; removing
	/// those duplicates is left to the caller.
	pub fn search<'a>(&self, candidates: &'a [SearchableEntity], query: &str) -> Vec<&'a SearchableEntity> {
		if query.is_empty() || candidates.is_empty() {
			return Vec::new();
		}

		let mut matches = Vec::new();
		let mut exact_found = false;
		for mode in self.config.modes() {
			if mode == MatchMode::Fuzzy && exact_found && !self.config.include_fuzzy_matches {
				continue;
			}
			let found = self.match_mode(mode, candidates, query);
			if mode == MatchMode::ExactOrSubstring {
				exact_found = !found.is_empty();
			}
			matches.extend(found);
		}

		tracing::debug!(matcher = self.name, query, matches = matches.len(), "matcher finished");
		matches
	}

	/// Run a single mode against the candidates.
	pub fn match_mode<'a>(
		&self,
		mode: MatchMode,
		candidates: &'a [SearchableEntity],
		query: &str,
	) -> Vec<&'a SearchableEntity> {
		if query.is_empty() {
			return Vec::new();
		}
		let fields = self.config.fields_for(mode);
		if fields.is_empty() {
			return Vec::new();
		}

		match mode {
			MatchMode::ExactOrSubstring => exact_or_substring(candidates, fields, query),
			MatchMode::Fuzzy => fuzzy_matches(candidates, fields, query),
			MatchMode::AnchoredRegex => match anchored_pattern(query) {
				Ok(pattern) => anchored_matches(candidates, fields, &pattern),
				Err(err) => {
					tracing::debug!(matcher = self.name, error = %err, "skipping pattern matches");
					Vec::new()
				}
			},
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Containment {
	Exact,
	Substring,
}

fn containment(value: &str, needle: &str) -> Option<Containment> {
	let value = value.to_lowercase();
	if value == needle {
		Some(Containment::Exact)
	} else if value.contains(needle) {
		Some(Containment::Substring)
	} else {
		None
	}
}

fn exact_or_substring<'a>(
	candidates: &'a [SearchableEntity],
	fields: &[EntityField],
	query: &str,
) -> Vec<&'a SearchableEntity> {
	let needle = query.to_lowercase();
	let mut ranked: Vec<(Containment, &SearchableEntity)> = candidates
		.iter()
		.filter_map(|entity| {
			fields
				.iter()
				.filter_map(|field| entity.field(*field))
				.filter_map(|value| containment(value, &needle))
				.min()
				.map(|rank| (rank, entity))
		})
		.collect();
	// Stable sort keeps candidate order among equal ranks.
	ranked.sort_by(|a, b| a.0.cmp(&b.0));
	ranked.into_iter().map(|(_, entity)| entity).collect()
}

fn fuzzy_matches<'a>(
	candidates: &'a [SearchableEntity],
	fields: &[EntityField],
	query: &str,
) -> Vec<&'a SearchableEntity> {
	let columns: Vec<Vec<Option<&str>>> = fields
		.iter()
		.map(|field| {
			candidates
				.iter()
				.map(|entity| entity.field(*field).filter(|value| !value.is_empty()))
				.collect()
		})
		.collect();
	fuzzy::rank(query, &columns, candidates.len())
		.into_iter()
		.map(|(row, _)| &candidates[row])
		.collect()
}

/// Compile the query as a case-insensitive pattern anchored at the start.
///
/// The query is grouped before anchoring so every alternative it contains
/// is held to the start of the value.
pub(crate) fn anchored_pattern(query: &str) -> Result<Regex, SearchError> {
	let pattern = format!("^(?:{query})");
	RegexBuilder::new(&pattern)
		.case_insensitive(true)
		.build()
		.map_err(|source| SearchError::MalformedPattern { pattern, source })
}

fn anchored_matches<'a>(
	candidates: &'a [SearchableEntity],
	fields: &[EntityField],
	pattern: &Regex,
) -> Vec<&'a SearchableEntity> {
	candidates
		.iter()
		.filter(|entity| {
			fields
				.iter()
				.filter_map(|field| entity.field(*field))
				.any(|value| pattern.is_match(value))
		})
		.collect()
}
