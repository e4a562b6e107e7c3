use super::{JourneyResult, Station};
use serde::{Deserialize, Serialize};

/// What the map is currently showing journeys for
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected {
        station: Station,
        annotations: JourneyResult,
    },
}

impl SelectionState {
    #[must_use]
    pub fn station(&self) -> Option<&Station> {
        match self {
            Self::NoSelection => None,
            Self::Selected { station, .. } => Some(station),
        }
    }

    #[must_use]
    pub fn annotations(&self) -> Option<&JourneyResult> {
        match self {
            Self::NoSelection => None,
            Self::Selected { annotations, .. } => Some(annotations),
        }
    }

    #[must_use]
    pub fn is_selected(&self, code: &str) -> bool {
        self.station().is_some_and(|s| s.code() == code)
    }
}

/// How a journey result that arrives after the selection moved on is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaleResponsePolicy {
    /// Drop results issued for an earlier selection
    #[default]
    Discard,
    /// Apply any result to whatever station is selected when it arrives
    ApplyToCurrent,
}

/// Identifies the selection a fetch was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub origin: String,
    pub generation: u64,
}

/// Owns the selection state; the only place it is mutated
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: SelectionState,
    generation: u64,
    policy: StaleResponsePolicy,
}

impl SelectionMachine {
    #[must_use]
    pub fn new(policy: StaleResponsePolicy) -> Self {
        Self {
            state: SelectionState::NoSelection,
            generation: 0,
            policy,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Station> {
        self.state.station()
    }

    /// Enter `Selected(station, {})`, even if `station` is already selected
    pub fn select(&mut self, station: Station) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket {
            origin: station.code().to_string(),
            generation: self.generation,
        };
        self.state = SelectionState::Selected {
            station,
            annotations: JourneyResult::new(),
        };
        ticket
    }

    /// Issue a fresh ticket for the current selection without clearing its
    /// annotations, for refetching after the destination set grew
    pub fn reissue(&mut self) -> Option<FetchTicket> {
        let origin = self.selected()?.code().to_string();
        self.generation += 1;
        Some(FetchTicket {
            origin,
            generation: self.generation,
        })
    }

    /// Enter `NoSelection`; any outstanding ticket becomes stale
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = SelectionState::NoSelection;
    }

    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Replace the annotations wholesale with a resolved result
    ///
    /// Returns whether the result was applied.
    pub fn resolve(&mut self, ticket: &FetchTicket, result: JourneyResult) -> bool {
        if self.policy == StaleResponsePolicy::Discard && !self.is_current(ticket) {
            crate::log!("Discarding stale journeys for {} (generation {})", ticket.origin, ticket.generation);
            return false;
        }

        match &mut self.state {
            SelectionState::NoSelection => false,
            SelectionState::Selected { annotations, .. } => {
                *annotations = result;
                true
            }
        }
    }

    /// Drop annotations for destinations that are no longer listed
    pub fn retain_destinations(&mut self, mut keep: impl FnMut(&str) -> bool) {
        if let SelectionState::Selected { annotations, .. } = &mut self.state {
            annotations.retain(|code| keep(code));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Annotation, GridReference};

    fn station(code: &str) -> Station {
        Station::new(code, vec![code.to_string()], GridReference::new(5000.0, 2000.0)).expect("valid station")
    }

    fn result(entries: &[(&str, u32)]) -> JourneyResult {
        let mut result = JourneyResult::new();
        for (code, minutes) in entries {
            result.insert(*code, Annotation::minutes(*minutes));
        }
        result
    }

    #[test]
    fn test_starts_unselected() {
        let machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        assert_eq!(machine.state(), &SelectionState::NoSelection);
        assert!(machine.selected().is_none());
    }

    #[test]
    fn test_select_enters_with_empty_annotations() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        let ticket = machine.select(station("CBG"));
        assert_eq!(ticket.origin, "CBG");
        assert!(machine.state().is_selected("CBG"));
        assert_eq!(machine.state().annotations().map(JourneyResult::len), Some(0));
    }

    #[test]
    fn test_resolve_replaces_annotations() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        let ticket = machine.select(station("CBG"));
        assert!(machine.resolve(&ticket, result(&[("KGX", 60), ("ELY", 20)])));
        assert!(machine.resolve(&ticket, result(&[("KGX", 55)])));
        let annotations = machine.state().annotations().expect("selected");
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations.minutes("KGX"), Some(55));
    }

    #[test]
    fn test_reselecting_same_station_clears_annotations() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        let ticket = machine.select(station("CBG"));
        machine.resolve(&ticket, result(&[("KGX", 60)]));
        let second = machine.select(station("CBG"));
        assert_ne!(ticket, second);
        assert_eq!(machine.state().annotations().map(JourneyResult::len), Some(0));
    }

    #[test]
    fn test_stale_result_discarded() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        let first = machine.select(station("CBG"));
        let second = machine.select(station("KGX"));

        assert!(!machine.resolve(&first, result(&[("KGX", 60)])));
        assert!(machine.state().is_selected("KGX"));
        assert_eq!(machine.state().annotations().map(JourneyResult::len), Some(0));

        assert!(machine.resolve(&second, result(&[("CBG", 60)])));
        assert_eq!(machine.state().annotations().and_then(|a| a.minutes("CBG")), Some(60));
    }

    #[test]
    fn test_stale_result_applied_to_current_under_legacy_policy() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::ApplyToCurrent);
        let first = machine.select(station("CBG"));
        machine.select(station("KGX"));

        // The earlier fetch lands on the newer selection
        assert!(machine.resolve(&first, result(&[("ELY", 20)])));
        assert!(machine.state().is_selected("KGX"));
        assert_eq!(machine.state().annotations().and_then(|a| a.minutes("ELY")), Some(20));
    }

    #[test]
    fn test_resolve_without_selection_is_ignored() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::ApplyToCurrent);
        let ticket = machine.select(station("CBG"));
        machine.clear();
        assert!(!machine.resolve(&ticket, result(&[("KGX", 60)])));
        assert_eq!(machine.state(), &SelectionState::NoSelection);
    }

    #[test]
    fn test_reissue_keeps_annotations() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        let ticket = machine.select(station("CBG"));
        machine.resolve(&ticket, result(&[("KGX", 60)]));

        let refetch = machine.reissue().expect("selected");
        assert!(!machine.is_current(&ticket));
        assert!(machine.is_current(&refetch));
        assert_eq!(machine.state().annotations().and_then(|a| a.minutes("KGX")), Some(60));
    }

    #[test]
    fn test_reissue_without_selection() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        assert!(machine.reissue().is_none());
    }

    #[test]
    fn test_retain_destinations() {
        let mut machine = SelectionMachine::new(StaleResponsePolicy::Discard);
        let ticket = machine.select(station("CBG"));
        machine.resolve(&ticket, result(&[("KGX", 60), ("ELY", 20)]));
        machine.retain_destinations(|code| code == "ELY");
        let annotations = machine.state().annotations().expect("selected");
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations.minutes("ELY"), Some(20));
    }
}
