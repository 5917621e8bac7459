//! author-network: Interactive force-directed visualization of author collaborations.
//!
//! This crate provides a WASM-based canvas component that lays out a
//! co-authorship network with a physics simulation, sizes authors by their
//! number of collaborations, colors them by country, and supports pan/zoom,
//! dragging, hover highlighting and click-to-inspect tooltips.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, error, info};

pub mod components;
pub mod loader;

pub use components::force_graph::{
	ChartConfig, ForceControls, ForceGraphCanvas, ForceSettings, GraphData, GraphLink, GraphNode,
	HighlightMode, Theme,
};
pub use loader::{DataSource, LoadError, load_network, parse_network};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("author-network: logging initialized");
}

/// Main application component.
/// Loads the network document, then renders the chart with its controls.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph = RwSignal::new(None::<GraphData>);
	let load_error = RwSignal::new(None::<String>);
	let forces = RwSignal::new(ForceSettings::default());
	let mode = RwSignal::new(HighlightMode::default());

	spawn_local(async move {
		match load_network(&DataSource::default()).await {
			Ok(data) => graph.set(Some(data)),
			Err(e) => {
				error!("author-network: failed to load network: {}", e);
				load_error.set(Some(e.to_string()));
			}
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Author Collaboration Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ForceControls forces=forces mode=mode />
		{move || match (graph.get(), load_error.get()) {
			(Some(data), _) => {
				view! {
					<ForceGraphCanvas
						data=Signal::derive(move || data.clone())
						forces=forces
						highlight=mode
						fullscreen=true
					/>
				}
					.into_any()
			}
			(None, Some(message)) => view! { <p class="load-error">{message}</p> }.into_any(),
			(None, None) => view! { <p class="loading">"Loading network…"</p> }.into_any(),
		}}
	}
}
