use frizbee::{Config, match_list};

/// Builds fuzzy matching options for the provided query.
///
/// Typo tolerance grows with the query length and is always enforced through
/// the prefilter, so a candidate only qualifies when it contains the query's
/// characters with at most that many misses.
pub(crate) fn config_for_query(query: &str) -> Config {
	let mut config = Config {
		prefilter: true,
		..Config::default()
	};

	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 => 0,
		1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	config.max_typos = Some(allowed_typos);
	config.sort = false;

	config
}

/// Score every haystack column against `query` and return `(row, score)`
/// pairs, best first.
///
/// Each column holds one field per row (`None` where a row lacks the field);
/// a row's score is the best score across its columns. Rows with equal scores
/// keep their original order.
pub(crate) fn rank(query: &str, columns: &[Vec<Option<&str>>], rows: usize) -> Vec<(usize, u16)> {
	let config = config_for_query(query);
	let mut best: Vec<Option<u16>> = vec![None; rows];
	let mut haystacks = Vec::with_capacity(rows);
	let mut offsets = Vec::with_capacity(rows);

	for column in columns {
		haystacks.clear();
		offsets.clear();
		for (row, value) in column.iter().enumerate() {
			if let Some(value) = value {
				haystacks.push(*value);
				offsets.push(row);
			}
		}
		if haystacks.is_empty() {
			continue;
		}

		for entry in match_list(query, &haystacks, &config) {
			if entry.score == 0 {
				continue;
			}
			let row = offsets[entry.index as usize];
			let slot = &mut best[row];
			if slot.is_none_or(|current| entry.score > current) {
				*slot = Some(entry.score);
			}
		}
	}

	let mut ranked: Vec<(usize, u16)> = best
		.into_iter()
		.enumerate()
		.filter_map(|(row, score)| score.map(|score| (row, score)))
		.collect();
	ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
	ranked
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn typo_budget_scales_with_query_length() {
		assert_eq!(config_for_query("a").max_typos, Some(0));
		assert_eq!(config_for_query("web").max_typos, Some(1));
		assert_eq!(config_for_query("example").max_typos, Some(2));
		assert_eq!(config_for_query("a-very-long-query").max_typos, Some(4));
		assert!(config_for_query("web").prefilter);
	}

	#[test]
	fn rows_without_any_value_are_skipped() {
		let columns = vec![vec![None, Some("redis-cache")]];
		let ranked = rank("redis", &columns, 2);
		assert_eq!(ranked.iter().map(|(row, _)| *row).collect::<Vec<_>>(), vec![1]);
	}

	#[test]
	fn any_column_can_qualify_a_row() {
		let columns = vec![
			vec![Some("zzzz"), Some("api-gateway")],
			vec![Some("api"), Some("zzzz")],
		];
		let ranked = rank("api", &columns, 2);
		let rows: Vec<usize> = ranked.iter().map(|(row, _)| *row).collect();
		assert_eq!(rows.len(), 2);
		assert!(rows.contains(&0));
		assert!(rows.contains(&1));
	}

	#[test]
	fn higher_scores_rank_first() {
		let columns = vec![vec![Some("w_e_b_service"), Some("web")]];
		let rows: Vec<usize> = rank("web", &columns, 2).iter().map(|(row, _)| *row).collect();
		assert_eq!(rows, vec![1, 0]);
	}

	#[test]
	fn equal_scores_keep_candidate_order() {
		let columns = vec![vec![Some("redis"), Some("zzzz"), Some("redis")]];
		let ranked = rank("redis", &columns, 3);
		assert_eq!(ranked.len(), 2);
		assert_eq!((ranked[0].0, ranked[1].0), (0, 2));
		assert_eq!(ranked[0].1, ranked[1].1);
	}
}
