use anyhow::Result;
use fedsearch::{MatchResult, ResultGroup};
use serde_json::json;

use crate::workflow::SearchOutcome;

/// Print each group label followed by its results.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
	print!("{}", format_plain(outcome));
}

pub(crate) fn format_plain(outcome: &SearchOutcome) -> String {
	let Some(query) = &outcome.query else {
		return "No query was long enough to search\n".to_string();
	};
	if !outcome.delivered() {
		return format!("No results delivered (query: '{query}')\n");
	}

	let mut text = String::new();
	for group in &outcome.groups {
		text.push_str(&group.label);
		text.push('\n');
		for result in &group.results {
			text.push_str("  ");
			text.push_str(&format_result(result));
			text.push('\n');
		}
	}
	text
}

fn format_result(result: &MatchResult) -> String {
	let mut line = match &result.job_id {
		Some(job_id) => format!("{job_id}/{}", result.label),
		None => result.label.clone(),
	};
	if result.id != result.label {
		line.push_str(&format!("  [{}]", result.id));
	}
	if let Some(namespace) = &result.namespace {
		line.push_str(&format!("  ({namespace})"));
	}
	line
}

/// Format the search outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
	let groups: &[ResultGroup] = if outcome.delivered() {
		&outcome.groups
	} else {
		&[]
	};

	let payload = json!({
		"query": outcome.query,
		"delivered": outcome.delivered(),
		"groups": groups,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search outcome.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
