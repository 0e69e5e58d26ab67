//! Quorum state machine shared by release requests and project approvals.
//!
//! A ballot starts Pending and is finalized exactly once: to Approved when its
//! approvals reach the required vote count, or to Rejected when its
//! rejections do. The required count is recomputed on every vote from the
//! current quorum percentage and validator set.
use soroban_sdk::{log, Address, Env, Vec};

use crate::config::get_config;
use crate::errors::EscrowError;
use crate::events::emit_vote_cast;
use crate::roles::{require_role, role_count};
use crate::types::{BallotKind, Role};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Approved,
    Rejected,
}

pub trait Ballot: Sized {
    const KIND: BallotKind;
    const VOTER_ROLE: Role;

    fn load(env: &Env, id: u64) -> Result<Self, EscrowError>;
    fn save(&self, env: &Env);

    fn id(&self) -> u64;
    fn is_pending(&self) -> bool;
    fn voters(&self) -> &Vec<Address>;
    fn record_vote(&mut self, voter: Address, approve: bool);
    /// `(approvals, rejections)`
    fn tally(&self) -> (u32, u32);
    fn finalize(&mut self, env: &Env, outcome: Outcome);
}

/// `ceil(quorum_percentage * validators / 100)`
pub fn required_votes(env: &Env) -> u32 {
    let pct = get_config(env).quorum_percentage as u64;
    let validators = role_count(env, Role::Validator) as u64;
    ((pct * validators + 99) / 100) as u32
}

pub fn cast_vote<B: Ballot>(
    env: &Env,
    voter: &Address,
    id: u64,
    approve: bool,
) -> Result<B, EscrowError> {
    require_role(env, voter, B::VOTER_ROLE)?;

    let mut ballot = B::load(env, id)?;

    if ballot.voters().contains(voter) {
        return Err(EscrowError::AlreadyVoted);
    }
    if !ballot.is_pending() {
        return Err(EscrowError::AlreadyFinalized);
    }

    ballot.record_vote(voter.clone(), approve);

    let required = required_votes(env);
    let (approvals, rejections) = ballot.tally();
    // Only the side that just received a vote can cross the threshold.
    if approve && approvals >= required {
        ballot.finalize(env, Outcome::Approved);
    } else if !approve && rejections >= required {
        ballot.finalize(env, Outcome::Rejected);
    }

    ballot.save(env);
    emit_vote_cast(env, B::KIND, ballot.id(), voter, approve);
    log!(
        env,
        "vote {} id={} approvals={} rejections={} required={}",
        B::KIND,
        id,
        approvals,
        rejections,
        required
    );
    Ok(ballot)
}
