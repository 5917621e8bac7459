//! Loading the author network document.
//!
//! The document is read from an inline `<script type="application/json">`
//! element when the page embeds one, and fetched over HTTP otherwise.

use log::info;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlScriptElement, Response};

use crate::components::force_graph::GraphData;

/// Where the network document comes from.
#[derive(Clone, Debug)]
pub struct DataSource {
	/// Id of an inline JSON script element, checked first.
	pub inline_element_id: String,
	/// URL fetched when the inline element is missing or empty.
	pub url: String,
}

impl Default for DataSource {
	fn default() -> Self {
		Self {
			inline_element_id: "graph-data".into(),
			url: "data/author_network.json".into(),
		}
	}
}

/// Errors raised while loading the network document.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("no browser window available")]
	NoWindow,
	#[error("fetch failed: {0}")]
	Fetch(String),
	#[error("server responded with HTTP {0}")]
	Status(u16),
	#[error("invalid network document: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Parse a `{ nodes, links }` JSON document.
pub fn parse_network(json: &str) -> Result<GraphData, LoadError> {
	Ok(serde_json::from_str(json)?)
}

/// Load and parse the document from `source`.
pub async fn load_network(source: &DataSource) -> Result<GraphData, LoadError> {
	let text = match inline_document(&source.inline_element_id) {
		Some(text) => text,
		None => fetch_text(&source.url).await?,
	};
	let data = parse_network(&text)?;
	info!(
		"author-network: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

fn inline_document(id: &str) -> Option<String> {
	let document = web_sys::window()?.document()?;
	let script: HtmlScriptElement = document.get_element_by_id(id)?.dyn_into().ok()?;
	script.text().ok().filter(|t| !t.trim().is_empty())
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(js_error)?;
	let response: Response = response.dyn_into().map_err(js_error)?;
	if !response.ok() {
		return Err(LoadError::Status(response.status()));
	}
	let body = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	body.as_string()
		.ok_or_else(|| LoadError::Fetch("response body is not text".into()))
}

fn js_error(err: JsValue) -> LoadError {
	LoadError::Fetch(format!("{err:?}"))
}
