use crate::models::{SelectionState, Station};
use crate::time::{display_hhmm, format_duration};
use leptos::{component, view, For, IntoView, RwSignal, Signal, SignalGet, SignalUpdate};

/// Formatted journey time to `code` from the selected station, if known
#[must_use]
pub fn journey_time(selection: &SelectionState, code: &str) -> Option<String> {
    selection.annotations()?.minutes(code).map(format_duration)
}

/// Tooltip with the first departure and number of legs of the journey to `code`
#[must_use]
pub fn journey_detail(selection: &SelectionState, code: &str) -> Option<String> {
    let annotation = selection.annotations()?.get(code)?;
    let legs = match annotation.legs {
        1 => "1 leg".to_string(),
        n => format!("{n} legs"),
    };
    Some(match annotation.depart.as_deref() {
        Some(depart) => format!("Departs {}, {legs}", display_hhmm(depart)),
        None => legs,
    })
}

#[component]
#[must_use]
pub fn StationList(stations: RwSignal<Vec<Station>>, #[prop(into)] selection: Signal<SelectionState>) -> impl IntoView {
    view! {
        <ul class="station-list">
            <For
                each=move || stations.get()
                key=|station| station.code().to_string()
                children=move |station| {
                    let code = station.code().to_string();
                    let code_for_class = code.clone();
                    let code_for_time = code.clone();
                    let code_for_detail = code.clone();
                    view! {
                        <li class=move || {
                            if selection.get().is_selected(&code_for_class) {
                                "station-list-item selected"
                            } else {
                                "station-list-item"
                            }
                        }>
                            <span class="station-name">{station.name().to_string()}</span>
                            <span class="station-code">{station.code().to_string()}</span>
                            <span
                                class="station-time"
                                title=move || journey_detail(&selection.get(), &code_for_detail).unwrap_or_default()
                            >
                                {move || journey_time(&selection.get(), &code_for_time).unwrap_or_default()}
                            </span>
                            <button
                                class="station-remove"
                                title="Remove station"
                                on:click=move |_| stations.update(|list| list.retain(|s| s.code() != code))
                            >
                                <i class="fa-solid fa-xmark"></i>
                            </button>
                        </li>
                    }
                }
            />
        </ul>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Annotation, GridReference, JourneyResult};

    #[test]
    fn test_journey_time() {
        let station = Station::new("CBG", vec!["Cambridge".to_string()], GridReference::new(5427.0, 2589.0))
            .expect("valid station");
        let mut annotations = JourneyResult::new();
        annotations.insert("KGX", Annotation::minutes(75));
        let selection = SelectionState::Selected { station, annotations };

        assert_eq!(journey_time(&selection, "KGX").as_deref(), Some("1h15"));
        assert_eq!(journey_time(&selection, "ELY"), None);
        assert_eq!(journey_time(&SelectionState::NoSelection, "KGX"), None);
    }

    #[test]
    fn test_journey_detail() {
        let station = Station::new("CBG", vec!["Cambridge".to_string()], GridReference::new(5427.0, 2589.0))
            .expect("valid station");
        let mut annotations = JourneyResult::new();
        annotations.insert(
            "KGX",
            Annotation {
                minutes: 52,
                legs: 1,
                depart: Some("0812".to_string()),
            },
        );
        annotations.insert("ELY", Annotation::minutes(20));
        let selection = SelectionState::Selected { station, annotations };

        assert_eq!(journey_detail(&selection, "KGX").as_deref(), Some("Departs 08:12, 1 leg"));
        assert_eq!(journey_detail(&selection, "ELY").as_deref(), Some("0 legs"));
    }
}
