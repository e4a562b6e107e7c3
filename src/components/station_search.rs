use crate::api::{fetch_station, lookup_stations};
use crate::models::{MapSettings, Station};
use gloo_timers::future::TimeoutFuture;
use leptos::{
    component, create_signal, event_target_value, spawn_local, store_value, view, For, IntoView, RwSignal, Show,
    SignalGet, SignalGetUntracked, SignalSet, SignalUpdate,
};

const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Append `station` unless a station with the same code is already listed
///
/// Returns whether the list changed.
pub fn append_unique(list: &mut Vec<Station>, station: Station) -> bool {
    if list.iter().any(|s| s.code() == station.code()) {
        return false;
    }
    list.push(station);
    true
}

/// Station code the query could be, if it looks like one
fn code_candidate(query: &str) -> Option<String> {
    let query = query.trim();
    (query.len() == 3 && query.chars().all(|c| c.is_ascii_alphabetic())).then(|| query.to_ascii_uppercase())
}

/// Counter stamped on every lookup; only the latest stamp may touch the results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryGeneration(u64);

impl QueryGeneration {
    /// Supersede every lookup issued so far
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    #[must_use]
    pub fn is_current(self, generation: u64) -> bool {
        self.0 == generation
    }
}

/// Text search over the lookup service; picking a result adds it to `stations`
#[component]
#[must_use]
pub fn StationSearch(settings: MapSettings, stations: RwSignal<Vec<Station>>) -> impl IntoView {
    let (query, set_query) = create_signal(String::new());
    let (results, set_results) = create_signal(Vec::<Station>::new());
    let (error, set_error) = create_signal(None::<String>);
    let settings = store_value(settings);
    let latest_query = store_value(QueryGeneration::default());

    let is_current =
        move |generation: u64| latest_query.try_with_value(|latest| latest.is_current(generation)).unwrap_or(false);

    let pick = move |station: Station| {
        latest_query.try_update_value(QueryGeneration::next);
        stations.update(|list| {
            append_unique(list, station);
        });
        set_results.set(Vec::new());
        set_query.set(String::new());
        set_error.set(None);
    };

    let handle_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        set_query.set(text.clone());
        let Some(generation) = latest_query.try_update_value(QueryGeneration::next) else {
            return;
        };

        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if !is_current(generation) {
                return;
            }
            let Some(settings) = settings.try_get_value() else { return };

            let outcome = lookup_stations(&settings, &text).await;
            if !is_current(generation) {
                return;
            }

            match outcome {
                Ok(found) => {
                    set_results.set(found);
                    set_error.set(None);
                }
                Err(e) => {
                    leptos::logging::warn!("Station lookup failed: {e}");
                    set_results.set(Vec::new());
                    set_error.set(Some(e));
                }
            }
        });
    };

    let handle_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        let Some(code) = code_candidate(&query.get_untracked()) else {
            if let Some(first) = results.get_untracked().into_iter().next() {
                pick(first);
            }
            return;
        };
        let Some(generation) = latest_query.try_update_value(QueryGeneration::next) else {
            return;
        };

        spawn_local(async move {
            let Some(settings) = settings.try_get_value() else { return };
            let outcome = fetch_station(&settings, &code).await;
            if !is_current(generation) {
                return;
            }

            match outcome {
                Ok(Some(station)) => pick(station),
                Ok(None) => set_error.set(Some(format!("No station {code}"))),
                Err(e) => {
                    leptos::logging::warn!("Station {code} lookup failed: {e}");
                    set_error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="station-search">
            <input
                type="search"
                class="station-search-input"
                placeholder="Search stations or enter a code"
                prop:value=move || query.get()
                on:input=handle_input
                on:keydown=handle_keydown
            />
            <Show when=move || error.get().is_some()>
                <div class="station-search-error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <ul class="station-search-results">
                <For
                    each=move || results.get()
                    key=|station| station.code().to_string()
                    children=move |station| {
                        let label = format!("{} ({})", station.name(), station.code());
                        view! {
                            <li on:click=move |_| pick(station.clone())>
                                {label}
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
