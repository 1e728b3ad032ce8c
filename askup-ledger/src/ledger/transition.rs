use askup_shared::types::{UserId, VoteDirection, VoteEntry, VoteState};

/// What a vote did to the acting user's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// No prior vote: a new entry was appended.
    Cast,
    /// Same direction as the prior vote: the entry was removed.
    Retracted,
    /// Opposite direction: the entry was flipped in place.
    Flipped,
}

/// Applies a vote by `user_id` to `state` in place.
///
/// The tally is adjusted incrementally and assumes at most one entry per
/// user. A retraction removes every entry of the user while the adjustment
/// only undoes one; a flip rewrites only the first entry. Duplicate entries
/// left behind by lost updates are not repaired.
pub fn apply_vote(state: &mut VoteState, user_id: UserId, direction: VoteDirection) -> VoteOutcome {
    let weight = direction.weight();

    match state.voted_by.iter().position(|entry| entry.user_id == user_id) {
        None => {
            state.voted_by.push(VoteEntry::new(user_id, direction));
            state.votes += weight;
            VoteOutcome::Cast
        }
        Some(index) if state.voted_by[index].direction == direction => {
            state.voted_by.retain(|entry| entry.user_id != user_id);
            state.votes -= weight;
            VoteOutcome::Retracted
        }
        Some(index) => {
            state.voted_by[index].direction = direction;
            state.votes += 2 * weight;
            VoteOutcome::Flipped
        }
    }
}
