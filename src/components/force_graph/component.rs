//! Leptos component wrapping the author network canvas.
//!
//! The component creates an HTML canvas element and wires mouse, touch and
//! wheel handlers into [`ForceGraphState`]. An animation loop runs via
//! `requestAnimationFrame`, stepping the simulation and redrawing each frame.
//! A document-level click listener closes the tooltip when the click lands
//! anywhere but a node.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent, Window,
};

use super::config::ChartConfig;
use super::interaction::{HighlightMode, InteractionEvent, PointerId, Tooltip};
use super::render;
use super::simulation::ForceSettings;
use super::state::ForceGraphState;
use super::theme::Theme;
use super::types::GraphData;

/// Step size for the first frame, before a frame time has been measured.
const FRAME_DT: f64 = 0.016;
/// Longest step taken after a stalled frame (e.g. a background tab).
const MAX_DT: f64 = 0.05;

/// Bundles graph state with the theme it is drawn in.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;
type SharedCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

/// Client coordinates to canvas-local screen coordinates.
fn local_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	client_x: f64,
	client_y: f64,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x - rect.left(), client_y - rect.top()))
}

/// Calls `f` for every touch point that changed in `ev`.
fn for_each_touch(ev: &TouchEvent, mut f: impl FnMut(PointerId, f64, f64)) {
	let touches = ev.changed_touches();
	for i in 0..touches.length() {
		if let Some(touch) = touches.get(i) {
			f(
				PointerId::Touch(touch.identifier()),
				touch.client_x() as f64,
				touch.client_y() as f64,
			);
		}
	}
}

fn end_touches(context: &SharedContext, ev: &TouchEvent) {
	if let Some(ref mut c) = *context.borrow_mut() {
		for_each_touch(ev, |pointer, _, _| c.state.pointer_up(pointer));
	}
}

/// Renders the interactive author network on a canvas element.
///
/// Pass graph data via the reactive `data` signal; it is read once, when the
/// canvas mounts, so mount the component after loading completes. The
/// component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
/// Changes to `forces` reheat the layout; changes to `highlight` apply from
/// the next hover.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional, into)] forces: Option<Signal<ForceSettings>>,
	#[prop(optional, into)] highlight: Option<Signal<HighlightMode>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] config: Option<ChartConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip = RwSignal::new(None::<Tooltip>);
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: SharedCallback = Rc::new(RefCell::new(None));
	let resize_cb: SharedCallback = Rc::new(RefCell::new(None));
	let dismiss_cb: SharedCallback = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, dismiss_cb_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		dismiss_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("author-network: no window, chart not started");
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("author-network: canvas has no 2d context");
			return;
		};

		let theme = Theme::default();
		let mut state = ForceGraphState::new(
			&data.get_untracked(),
			w,
			h,
			&theme,
			config.clone().unwrap_or_default(),
			forces.map(|f| f.get_untracked()).unwrap_or_default(),
		);
		if let Some(mode) = highlight {
			state.set_highlight_mode(mode.get_untracked());
		}
		*context_init.borrow_mut() = Some(GraphContext { state, theme });

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// Node clicks stop propagation, so anything reaching the document
		// is a background click.
		let context_dismiss = context_init.clone();
		*dismiss_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_dismiss.borrow_mut() {
				c.state.handle(InteractionEvent::BackgroundClick);
			}
			tooltip.set(None);
		}));
		if let (Some(document), Some(cb)) = (window.document(), dismiss_cb_init.borrow().as_ref()) {
			let _ = document.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let mut last_frame: Option<f64> = None;
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = last_frame.map_or(FRAME_DT, |t| ((now - t) / 1000.0).clamp(0.0, MAX_DT));
			last_frame = Some(now);
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(dt);
				render::render(
					&c.state.scene,
					&c.state.transform,
					c.state.width,
					c.state.height,
					&ctx,
					&c.theme,
				);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	if let Some(forces) = forces {
		let context_forces = context.clone();
		Effect::new(move |_| {
			let wanted = forces.get();
			if let Some(ref mut c) = *context_forces.borrow_mut() {
				c.state.apply_settings(wanted);
			}
		});
	}

	if let Some(highlight) = highlight {
		let context_mode = context.clone();
		Effect::new(move |_| {
			let mode = highlight.get();
			if let Some(ref mut c) = *context_mode.borrow_mut() {
				c.state.set_highlight_mode(mode);
			}
		});
	}

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(PointerId::Mouse, x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(PointerId::Mouse, x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up(PointerId::Mouse);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		let shown = {
			let mut guard = context_click.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let target = c.state.click(x, y, ev.page_x() as f64, ev.page_y() as f64);
			if target.stops_propagation() {
				ev.stop_propagation();
			}
			c.state.tooltip.clone()
		};
		tooltip.set(shown);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.zoom(x, y, ev.delta_y());
		}
	};

	let context_ts = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		if let Some(ref mut c) = *context_ts.borrow_mut() {
			for_each_touch(&ev, |pointer, cx, cy| {
				if let Some((x, y)) = local_point(canvas_ref, cx, cy) {
					c.state.pointer_down(pointer, x, y);
				}
			});
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			for_each_touch(&ev, |pointer, cx, cy| {
				if let Some((x, y)) = local_point(canvas_ref, cx, cy) {
					c.state.pointer_move(pointer, x, y);
				}
			});
		}
	};

	let context_te = context.clone();
	let on_touchend = move |ev: TouchEvent| end_touches(&context_te, &ev);
	let context_tc = context.clone();
	let on_touchcancel = move |ev: TouchEvent| end_touches(&context_tc, &ev);

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:wheel=on_wheel
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			on:touchcancel=on_touchcancel
			style="display: block; cursor: grab; touch-action: none;"
		/>
		{move || {
			tooltip
				.get()
				.map(|t| {
					view! {
						<div
							class="tooltip"
							style:left=format!("{}px", t.left)
							style:top=format!("{}px", t.top)
						>
							<strong>"Author:"</strong>
							" "
							{t.name}
							<br />
							<strong>"Country:"</strong>
							" "
							{t.country}
						</div>
					}
				})
		}}
	}
}
