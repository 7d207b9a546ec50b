use crate::domain::models::State;
use std::collections::HashSet;

/// Returns a new set with the listing's membership flipped. Toggling twice
/// restores the original set.
pub fn toggle(set: HashSet<String>, id: &str) -> HashSet<String> {
    let mut next = set;
    if !next.remove(id) {
        next.insert(id.to_string());
    }
    next
}

pub fn set_from_state(state: &State) -> HashSet<String> {
    state.favorites.iter().cloned().collect()
}

/// Sorted vec for stable state files and output.
pub fn set_into_state(set: HashSet<String>, state: &mut State) {
    let mut ids: Vec<String> = set.into_iter().collect();
    ids.sort();
    state.favorites = ids;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_inserts_then_removes() {
        let set = HashSet::new();
        let set = toggle(set, "42");
        assert!(set.contains("42"));
        let set = toggle(set, "42");
        assert!(!set.contains("42"));
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut original = HashSet::new();
        original.insert("1".to_string());
        original.insert("7".to_string());
        let round_tripped = toggle(toggle(original.clone(), "7"), "7");
        assert_eq!(round_tripped, original);
    }

    #[test]
    fn state_round_trip_is_sorted() {
        let mut state = State::default();
        let mut set = HashSet::new();
        set.insert("9".to_string());
        set.insert("10".to_string());
        set.insert("1".to_string());
        set_into_state(set, &mut state);
        assert_eq!(state.favorites, vec!["1", "10", "9"]);
    }
}
