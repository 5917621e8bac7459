//! Derived per-node attributes computed once after loading.

use std::collections::HashMap;

use super::types::{GraphData, GraphNode};

/// Sets `degree` on every node to the number of links with the node's id at
/// either end. A self-loop counts once; links to unknown ids count nothing.
pub fn enrich_degrees(data: &mut GraphData) {
	let mut counts: HashMap<&str, usize> = HashMap::new();
	for link in &data.links {
		*counts.entry(link.source.as_str()).or_insert(0) += 1;
		if link.target != link.source {
			*counts.entry(link.target.as_str()).or_insert(0) += 1;
		}
	}
	for node in &mut data.nodes {
		node.degree = counts.get(node.id.as_str()).copied().unwrap_or(0);
	}
}

/// The `limit` most frequent countries, most frequent first.
///
/// Countries with equal counts keep the order in which they first appear.
pub fn top_countries(nodes: &[GraphNode], limit: usize) -> Vec<String> {
	let mut order: Vec<(&str, usize)> = Vec::new();
	let mut slot: HashMap<&str, usize> = HashMap::new();
	for node in nodes {
		let i = *slot.entry(node.country.as_str()).or_insert_with(|| {
			order.push((node.country.as_str(), 0));
			order.len() - 1
		});
		order[i].1 += 1;
	}

	// sort_by is stable, so ties stay in first-occurrence order
	order.sort_by(|a, b| b.1.cmp(&a.1));
	order
		.into_iter()
		.take(limit)
		.map(|(country, _)| country.to_string())
		.collect()
}

/// `(min, max)` degree over all nodes, `(0, 0)` for an empty graph.
pub fn degree_extent(nodes: &[GraphNode]) -> (usize, usize) {
	let min = nodes.iter().map(|n| n.degree).min().unwrap_or(0);
	let max = nodes.iter().map(|n| n.degree).max().unwrap_or(0);
	(min, max)
}
