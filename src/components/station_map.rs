use super::canvas_viewport::{self, PanTracker};
use super::map_canvas::{background_layer, renderer, MapEngine, PendingFetch};
use crate::api::fetch_journey_times;
use crate::geodesy::OsGridConverter;
use crate::models::{MapSettings, PanZoom, SelectionState, Station};
use leptos::{
    component, create_effect, create_node_ref, create_trigger, html, spawn_local, store_value, view, Callable, Callback,
    IntoView, Signal, SignalGet, SignalGetUntracked, StoredValue, Trigger,
};
use leptos_use::{use_element_size, UseElementSizeReturn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, MouseEvent, WheelEvent};

type EngineCell = StoredValue<Option<MapEngine>>;

#[derive(Clone, Copy)]
struct MapHandles {
    engine: EngineCell,
    redraw: Trigger,
    on_selection: Callback<SelectionState>,
}

impl MapHandles {
    /// Repaint, report the selection and start any fetch the transition asked for
    fn publish(self, pending: Option<PendingFetch>) {
        self.redraw.notify();
        if let Some(selection) = self.engine.try_with_value(|e| e.as_ref().map(|e| e.selection().clone())).flatten() {
            self.on_selection.call(selection);
        }
        if let Some(pending) = pending {
            self.spawn_fetch(pending);
        }
    }

    fn spawn_fetch(self, pending: PendingFetch) {
        let Some(settings) = self.engine.try_with_value(|e| e.as_ref().map(|e| e.settings().clone())).flatten() else {
            return;
        };

        spawn_local(async move {
            let outcome = fetch_journey_times(&settings, &pending.request).await;
            let applied = self
                .engine
                .try_update_value(|e| e.as_mut().is_some_and(|e| e.resolve_fetch(&pending.ticket, outcome)))
                .unwrap_or(false);
            if applied {
                self.publish(None);
            }
        });
    }

    fn pan_zoom(self, delta: PanZoom) {
        let changed = self
            .engine
            .try_update_value(|e| e.as_mut().is_some_and(|e| e.on_pan_zoom(delta)))
            .unwrap_or(false);
        if changed {
            self.redraw.notify();
        }
    }
}

fn build_engine(settings: MapSettings, size: (f64, f64)) -> MapEngine {
    let background = background_layer::bundled().unwrap_or_else(|e| {
        leptos::logging::error!("Background unavailable: {e}");
        Vec::new()
    });
    MapEngine::new(settings, Box::new(OsGridConverter), background, size)
}

fn setup_render_effect(
    handles: MapHandles,
    canvas_ref: leptos::NodeRef<html::Canvas>,
    width: Signal<f64>,
    height: Signal<f64>,
) {
    create_effect(move |_| {
        handles.redraw.track();
        let _ = width.get();
        let _ = height.get();

        let Some(canvas) = canvas_ref.get() else { return };

        let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;
        #[allow(clippy::cast_sign_loss)]
        let container_width = canvas_elem.client_width() as u32;
        #[allow(clippy::cast_sign_loss)]
        let container_height = canvas_elem.client_height() as u32;

        if container_width > 0 && container_height > 0 {
            canvas_elem.set_width(container_width);
            canvas_elem.set_height(container_height);
        }

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            return;
        };

        #[cfg(all(target_arch = "wasm32", feature = "perf_timing"))]
        let render_start = web_sys::window().and_then(|w| w.performance()).map(|p| p.now());

        handles.engine.with_value(|engine| {
            if let Some(engine) = engine {
                let size = (f64::from(container_width), f64::from(container_height));
                renderer::draw_map(&ctx, engine.scene(), engine.transform(), size);
            }
        });

        #[cfg(all(target_arch = "wasm32", feature = "perf_timing"))]
        {
            if let (Some(start), Some(performance)) = (render_start, web_sys::window().and_then(|w| w.performance())) {
                crate::log!("Map render took {:.2}ms", performance.now() - start);
            }
        }
    });
}

/// Canvas map of the listed stations with journey-time connectors
/// from the selected one
#[component]
#[must_use]
pub fn StationMap(
    #[prop(into)] stations: Signal<Vec<Station>>,
    settings: MapSettings,
    on_selection: Callback<SelectionState>,
) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();
    let canvas_ref = create_node_ref::<html::Canvas>();
    let pan = store_value(PanTracker::default());
    let settings = store_value(settings);
    let handles = MapHandles {
        engine: store_value(None),
        redraw: create_trigger(),
        on_selection,
    };

    let UseElementSizeReturn { width, height } = use_element_size(container_ref);

    // The engine needs a canvas size to fit its projection, so it is built on
    // the first non-empty measurement; later ones only repaint
    create_effect(move |_| {
        let size = (width.get(), height.get());
        if size.0 <= 0.0 || size.1 <= 0.0 {
            return;
        }

        let pending = handles
            .engine
            .try_update_value(|engine| {
                if engine.is_some() {
                    return None;
                }
                let mut built = build_engine(settings.get_value(), size);
                let pending = built.set_stations(stations.get_untracked());
                *engine = Some(built);
                pending
            })
            .flatten();
        handles.publish(pending);
    });

    create_effect(move |_| {
        let list = stations.get();
        let pending = handles
            .engine
            .try_update_value(|engine| engine.as_mut().and_then(|e| e.set_stations(list)))
            .flatten();
        handles.publish(pending);
    });

    setup_render_effect(handles, canvas_ref, width, height);

    let handle_mouse_down = move |ev: MouseEvent| {
        let Some(canvas_elem) = canvas_ref.get() else { return };
        let canvas: &web_sys::HtmlCanvasElement = &canvas_elem;
        let (x, y) = canvas_viewport::canvas_position(&ev, canvas);
        pan.update_value(|pan| pan.handle_pan_start(x, y));
    };

    let handle_mouse_move = move |ev: MouseEvent| {
        let Some(canvas_elem) = canvas_ref.get() else { return };
        let canvas: &web_sys::HtmlCanvasElement = &canvas_elem;
        let (x, y) = canvas_viewport::canvas_position(&ev, canvas);
        if let Some(delta) = pan.try_update_value(|pan| pan.handle_pan_move(x, y)).flatten() {
            handles.pan_zoom(delta);
        }
    };

    let handle_mouse_up = move |ev: MouseEvent| {
        let Some(canvas_elem) = canvas_ref.get() else { return };
        let canvas: &web_sys::HtmlCanvasElement = &canvas_elem;
        let (x, y) = canvas_viewport::canvas_position(&ev, canvas);
        let Some(click) = pan.try_update_value(|pan| pan.handle_pan_end(x, y)).flatten() else {
            return;
        };

        let pending = handles
            .engine
            .try_update_value(|engine| engine.as_mut().and_then(|e| e.click(click)))
            .flatten();
        handles.publish(pending);
    };

    let handle_wheel = move |ev: WheelEvent| {
        ev.prevent_default();
        let Some(canvas_elem) = canvas_ref.get() else { return };
        let canvas: &web_sys::HtmlCanvasElement = &canvas_elem;
        handles.pan_zoom(canvas_viewport::handle_zoom(&ev, canvas));
    };

    view! {
        <div class="station-map" node_ref=container_ref>
            <canvas
                node_ref=canvas_ref
                class="station-map-canvas"
                on:mousedown=handle_mouse_down
                on:mousemove=handle_mouse_move
                on:mouseup=handle_mouse_up
                on:mouseleave=move |_| pan.update_value(PanTracker::cancel)
                on:wheel=handle_wheel
                on:contextmenu=|ev| ev.prevent_default()
            />
        </div>
    }
}
