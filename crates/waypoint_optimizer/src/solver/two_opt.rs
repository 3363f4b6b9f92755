use tracing::trace;

use crate::solver::{deadline::Deadline, distances::GroupDistances};

/// Applied moves must shorten the path by more than this, in kilometers, so
/// that rounding noise can never make the path longer.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// How many evaluations happen between two looks at the clock.
const DEADLINE_POLL_INTERVAL: usize = 256;

/// **Open path 2-Opt**
///
/// Reverses the stops between `from` and `to` (inclusive). The first stop of
/// the path never moves and the path does not return to it, so a move that
/// reaches the end of the path only replaces a single edge.
///
/// ```text
/// BEFORE:
///    ... (prev) --x--> [from] -> ... -> [to] --x--> (next) ...
///          ^             ^               ^            ^
///          A             B               C            D
///
/// AFTER (Sequence Reversed):
///    ... (prev) -----> [to] -> ... -> [from] -----> (next) ...
///          ^             ^               ^            ^
///          A             C               B            D
///
/// Edges Removed: (prev->from), (to->next)
/// Edges Added:   (prev->to),   (from->next)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptMove {
    from: usize,
    to: usize,
}

impl TwoOptMove {
    pub fn new(from: usize, to: usize) -> Self {
        if from == 0 {
            panic!("TwoOpt: the first stop of an open path is fixed")
        }

        if from >= to {
            panic!("TwoOpt: cannot have from >= to")
        }

        TwoOptMove { from, to }
    }

    pub fn delta(&self, path: &[usize], distances: &GroupDistances) -> f64 {
        let prev = path[self.from - 1];
        let from = path[self.from];
        let to = path[self.to];

        match path.get(self.to + 1) {
            Some(&next) => {
                let current_cost = distances.get(prev, from) + distances.get(to, next);
                let new_cost = distances.get(prev, to) + distances.get(from, next);
                new_cost - current_cost
            }
            None => distances.get(prev, to) - distances.get(prev, from),
        }
    }

    pub fn apply(&self, path: &mut [usize]) {
        path[self.from..=self.to].reverse();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptOutcome {
    /// A full pass found no improving move.
    pub converged: bool,
    pub evaluations: usize,
    pub improvements: usize,
}

/// First-improvement 2-opt over `path`. Stops at a local optimum, after
/// `max_evaluations` candidate moves or once `deadline` expires. In every case
/// `path` holds the best order found so far.
pub fn two_opt(
    path: &mut [usize],
    distances: &GroupDistances,
    max_evaluations: usize,
    deadline: &Deadline,
) -> TwoOptOutcome {
    let len = path.len();
    let mut outcome = TwoOptOutcome {
        converged: false,
        evaluations: 0,
        improvements: 0,
    };

    if len < 3 {
        outcome.converged = true;
        return outcome;
    }

    loop {
        let mut improved = false;

        for from in 1..len - 1 {
            for to in (from + 1)..len {
                if outcome.evaluations == max_evaluations {
                    trace!(?outcome, "2-opt iteration budget exhausted");
                    return outcome;
                }

                if outcome.evaluations % DEADLINE_POLL_INTERVAL == 0 && deadline.is_expired() {
                    trace!(?outcome, "2-opt deadline expired");
                    return outcome;
                }

                outcome.evaluations += 1;

                let two_opt_move = TwoOptMove::new(from, to);
                if two_opt_move.delta(path, distances) < -IMPROVEMENT_EPSILON {
                    two_opt_move.apply(path);
                    outcome.improvements += 1;
                    improved = true;
                }
            }
        }

        if !improved {
            outcome.converged = true;
            return outcome;
        }
    }
}
