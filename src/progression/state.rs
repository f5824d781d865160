//! Step-state derivation for a team's curriculum progression.
//!
//! A team with `current = k` completed workshops sees steps `1..=k` as
//! completed, step `k + 1` as the one open for editing, and everything
//! after that as locked. The state is a pure function of the counter and
//! the step position; it is recomputed whenever the counter changes and
//! never stored.

use crate::models::TOTAL_WORKSHOPS;

/// State of one curriculum step for a given team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Not yet reachable; the steps before it are not all completed.
    Locked,
    /// The one step whose attendance may be edited and submitted.
    Current,
    /// Already recorded; read-only historical view.
    Completed,
}

impl StepState {
    /// Whether a step in this state may be opened at all.
    pub fn is_openable(&self) -> bool {
        !matches!(self, StepState::Locked)
    }
}

/// State of the 1-based step `step_number` for a team that has completed
/// `current` workshops.
pub fn step_state(current: u8, step_number: u8) -> StepState {
    if step_number <= current {
        StepState::Completed
    } else if step_number == current + 1 {
        StepState::Current
    } else {
        StepState::Locked
    }
}

/// States for the full curriculum, indexed by step position minus one.
pub fn step_states(current: u8) -> [StepState; TOTAL_WORKSHOPS as usize] {
    std::array::from_fn(|i| step_state(current, i as u8 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_states_for_every_counter_value() {
        for current in 0..=TOTAL_WORKSHOPS {
            let states = step_states(current);
            for (i, state) in states.iter().enumerate() {
                let number = i as u8 + 1;
                let expected = if number <= current {
                    StepState::Completed
                } else if number == current + 1 {
                    StepState::Current
                } else {
                    StepState::Locked
                };
                assert_eq!(*state, expected, "current={} step={}", current, number);
            }
        }
    }

    #[test]
    fn test_fresh_team_has_first_step_current() {
        let states = step_states(0);
        assert_eq!(states[0], StepState::Current);
        assert!(states[1..].iter().all(|s| *s == StepState::Locked));
    }

    #[test]
    fn test_finished_team_has_no_current_step() {
        let states = step_states(TOTAL_WORKSHOPS);
        assert!(states.iter().all(|s| *s == StepState::Completed));
    }

    #[test]
    fn test_locked_steps_are_not_openable() {
        assert!(!step_state(2, 5).is_openable());
        assert!(step_state(2, 2).is_openable());
        assert!(step_state(2, 3).is_openable());
    }
}
