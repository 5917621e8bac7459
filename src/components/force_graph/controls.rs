//! Force and highlight controls.
//!
//! Each force is edited through a range slider and a number field sharing one
//! signal, so either input moves the other. Setting `prop:value` does not fire
//! `input`, which keeps the pair from echoing.

use leptos::ev;
use leptos::prelude::*;

use super::interaction::HighlightMode;
use super::simulation::ForceSettings;

/// Parse a control's text value, rejecting anything not a finite number.
pub fn parse_control_value(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The force a slider/number pair edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceField {
	Charge,
	Collision,
	Link,
}

impl ForceField {
	pub fn get(self, settings: &ForceSettings) -> f64 {
		match self {
			ForceField::Charge => settings.charge_strength,
			ForceField::Collision => settings.collision_offset,
			ForceField::Link => settings.link_strength,
		}
	}

	/// Store the parsed `raw` input. Returns whether the settings changed;
	/// unparseable input and the current value leave them untouched.
	pub fn apply_input(self, settings: &mut ForceSettings, raw: &str) -> bool {
		let Some(v) = parse_control_value(raw) else {
			return false;
		};
		let slot = match self {
			ForceField::Charge => &mut settings.charge_strength,
			ForceField::Collision => &mut settings.collision_offset,
			ForceField::Link => &mut settings.link_strength,
		};
		if *slot == v {
			return false;
		}
		*slot = v;
		true
	}
}

/// One slider + number pair bound to one field of `forces`.
#[component]
fn ForceSlider(
	/// Label text.
	label: &'static str,
	/// Slider element id; the number field gets `{id}Value`.
	id: &'static str,
	field: ForceField,
	min: f64,
	max: f64,
	step: f64,
	forces: RwSignal<ForceSettings>,
) -> impl IntoView {
	let value = move || forces.with(|f| field.get(f)).to_string();
	let handle_input = move |evt: ev::Event| {
		let raw = event_target_value(&evt);
		forces.maybe_update(|f| field.apply_input(f, &raw));
	};

	view! {
		<div class="force-control">
			<label for=id>{label}</label>
			<input
				type="range"
				id=id
				min=min.to_string()
				max=max.to_string()
				step=step.to_string()
				prop:value=value
				on:input=handle_input
			/>
			<input
				type="number"
				id=format!("{id}Value")
				min=min.to_string()
				max=max.to_string()
				step=step.to_string()
				prop:value=value
				on:input=handle_input
			/>
		</div>
	}
}

/// Control panel for the three adjustable forces and the hover highlight mode.
#[component]
pub fn ForceControls(forces: RwSignal<ForceSettings>, mode: RwSignal<HighlightMode>) -> impl IntoView {
	let handle_mode = move |evt: ev::Event| match event_target_value(&evt).parse() {
		Ok(m) => mode.set(m),
		Err(e) => log::warn!("author-network: {}", e),
	};

	view! {
		<div class="controls">
			<ForceSlider
				label="Charge strength"
				id="chargeStrength"
				min={-200.0}
				max=50.0
				step=1.0
				field=ForceField::Charge
				forces=forces
			/>
			<ForceSlider
				label="Collision radius"
				id="collisionRadius"
				min=0.0
				max=20.0
				step=0.5
				field=ForceField::Collision
				forces=forces
			/>
			<ForceSlider
				label="Link strength"
				id="linkStrength"
				min=0.0
				max=1.0
				step=0.01
				field=ForceField::Link
				forces=forces
			/>
			<div class="force-control">
				<label for="toggleHighlight">"Highlight by"</label>
				<select
					id="toggleHighlight"
					prop:value=move || mode.get().as_str()
					on:change=handle_mode
				>
					<option value=HighlightMode::Country.as_str()>"Country"</option>
					<option value=HighlightMode::Affiliation.as_str()>"Affiliation"</option>
				</select>
			</div>
		</div>
	}
}
