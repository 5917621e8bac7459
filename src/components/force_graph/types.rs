//! Graph data structures for input to the force graph component.

use serde::{Deserialize, Deserializer};

/// An author in the collaboration network.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	#[serde(deserialize_with = "node_id")]
	pub id: String,
	/// Author display name.
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub country: String,
	#[serde(default)]
	pub affiliation: String,
	/// Number of links touching this node. Filled in by
	/// [`enrich_degrees`](super::enrich::enrich_degrees) after loading.
	#[serde(skip)]
	pub degree: usize,
}

/// A collaboration between two authors. Undirected for degree counting.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	#[serde(deserialize_with = "node_id")]
	pub source: String,
	/// Target node ID.
	#[serde(deserialize_with = "node_id")]
	pub target: String,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Accepts ids written either as JSON strings or numbers.
fn node_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawId {
		Text(String),
		Number(serde_json::Number),
	}

	Ok(match RawId::deserialize(deserializer)? {
		RawId::Text(s) => s,
		RawId::Number(n) => n.to_string(),
	})
}

/// Per-node display metadata, fixed once the graph is loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeInfo {
	pub id: String,
	pub name: String,
	pub country: String,
	pub affiliation: String,
	pub degree: usize,
	/// Encoded radius in world units.
	pub radius: f64,
	/// CSS fill color.
	pub color: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_author_document() {
		let json = r#"{
			"nodes": [
				{"id": "a", "name": "Ada", "country": "UK", "affiliation": "Cambridge"},
				{"id": 7, "name": "Grace"}
			],
			"links": [{"source": "a", "target": 7}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].country, "UK");
		assert_eq!(data.nodes[1].id, "7");
		assert_eq!(data.nodes[1].country, "");
		assert_eq!(data.nodes[1].degree, 0);
		assert_eq!(data.links[0].target, "7");
	}

	#[test]
	fn rejects_missing_links() {
		let json = r#"{"nodes": []}"#;
		assert!(serde_json::from_str::<GraphData>(json).is_err());
	}
}
