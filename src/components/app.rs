use crate::components::station_list::StationList;
use crate::components::station_map::StationMap;
use crate::components::station_search::StationSearch;
use crate::models::{MapSettings, SelectionState, Station};
use leptos::{component, create_rw_signal, create_signal, view, Callback, IntoView, SignalSet};
use leptos_meta::{provide_meta_context, Stylesheet, Title};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let settings = MapSettings::default();
    let stations = create_rw_signal(Vec::<Station>::new());
    let (selection, set_selection) = create_signal(SelectionState::NoSelection);

    view! {
        <Stylesheet id="leptos" href="/pkg/journey_map.css"/>
        <Title text="Journey Time Map"/>

        <div class="app">
            <aside class="sidebar">
                <StationSearch settings=settings.clone() stations=stations/>
                <StationList stations=stations selection=selection/>
            </aside>
            <StationMap
                stations=stations
                settings=settings
                on_selection=Callback::new(move |state| set_selection.set(state))
            />
        </div>
    }
}
