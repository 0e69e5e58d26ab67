//! Domain events published for off-chain consumers (audit feed, notifications).
//!
//! Every event is a `#[contractevent]` struct with a map payload, so indexers
//! can rebuild balances and request status from the event stream alone.
use soroban_sdk::{contractevent, Address, Env, String};

use crate::types::{BallotKind, ProjectStatus, Role};

/// Tokens pulled from a depositor into a project's escrow balance.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposited {
    pub project_id: u64,
    pub depositor: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseRequested {
    pub request_id: u64,
    pub project_id: u64,
    pub milestone_id: u64,
    pub amount: i128,
    pub recipient: Address,
}

/// One validator vote on either a release request or a project approval.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub ballot: BallotKind,
    pub id: u64,
    pub validator: Address,
    pub approve: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseExecuted {
    pub request_id: u64,
    pub project_id: u64,
    pub milestone_id: u64,
    pub amount: i128,
    pub recipient: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub planner: Address,
    pub metadata_uri: String,
    pub funding_goal: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectStatusUpdated {
    pub project_id: u64,
    pub status: ProjectStatus,
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGranted {
    pub role: Role,
    pub account: Address,
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Address,
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdated {
    pub admin: Address,
    pub quorum_percentage: u32,
    pub timelock_duration: u64,
}

pub fn emit_deposited(env: &Env, project_id: u64, depositor: &Address, amount: i128) {
    Deposited {
        project_id,
        depositor: depositor.clone(),
        amount,
        timestamp: env.ledger().timestamp(),
    }
    .publish(env);
}

pub fn emit_vote_cast(env: &Env, ballot: BallotKind, id: u64, validator: &Address, approve: bool) {
    VoteCast {
        ballot,
        id,
        validator: validator.clone(),
        approve,
    }
    .publish(env);
}
