use soroban_sdk::{log, Address, Env, Vec};

use crate::errors::EscrowError;
use crate::events::{ReleaseExecuted, ReleaseRequested};
use crate::ledger::{balance_of, pay_out};
use crate::projects::require_approved;
use crate::quorum::{Ballot, Outcome};
use crate::reentrancy::ReentrancyGuard;
use crate::roles::require_role;
use crate::storage::{count, next_id, read_record, write_record};
use crate::timelock::ensure_elapsed;
use crate::types::{BallotKind, DataKey, ReleaseRequest, ReleaseStatus, Role};

impl Ballot for ReleaseRequest {
    const KIND: BallotKind = BallotKind::Release;
    const VOTER_ROLE: Role = Role::Validator;

    fn load(env: &Env, id: u64) -> Result<Self, EscrowError> {
        get_release_request(env, id)
    }

    fn save(&self, env: &Env) {
        write_record(env, &DataKey::ReleaseRequest(self.id), self);
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn is_pending(&self) -> bool {
        self.status == ReleaseStatus::Pending
    }

    fn voters(&self) -> &Vec<Address> {
        &self.voted_validators
    }

    fn record_vote(&mut self, voter: Address, approve: bool) {
        self.voted_validators.push_back(voter);
        if approve {
            self.approval_count += 1;
        } else {
            self.rejection_count += 1;
        }
    }

    fn tally(&self) -> (u32, u32) {
        (self.approval_count, self.rejection_count)
    }

    fn finalize(&mut self, env: &Env, outcome: Outcome) {
        match outcome {
            Outcome::Approved => {
                self.status = ReleaseStatus::Approved;
                self.approved_at = Some(env.ledger().timestamp());
            }
            Outcome::Rejected => self.status = ReleaseStatus::Rejected,
        }
    }
}

pub fn request_release(
    env: &Env,
    admin: &Address,
    project_id: u64,
    milestone_id: u64,
    amount: i128,
    recipient: Address,
) -> Result<u64, EscrowError> {
    require_role(env, admin, Role::Admin)?;

    if amount <= 0 {
        return Err(EscrowError::InvalidAmount);
    }
    if recipient == env.current_contract_address() {
        return Err(EscrowError::InvalidRecipient);
    }
    require_approved(env, project_id)?;
    // Funds are not reserved here; execute_release re-checks the balance.
    if amount > balance_of(env, project_id) {
        return Err(EscrowError::InsufficientBalance);
    }

    let request_id = next_id(env, &DataKey::ReleaseCount);
    let request = ReleaseRequest {
        id: request_id,
        project_id,
        milestone_id,
        amount,
        recipient: recipient.clone(),
        status: ReleaseStatus::Pending,
        approval_count: 0,
        rejection_count: 0,
        voted_validators: Vec::new(env),
        created_at: env.ledger().timestamp(),
        approved_at: None,
    };
    request.save(env);

    ReleaseRequested {
        request_id,
        project_id,
        milestone_id,
        amount,
        recipient,
    }
    .publish(env);
    log!(
        env,
        "request_release id={} project={} milestone={} amount={}",
        request_id,
        project_id,
        milestone_id,
        amount
    );

    Ok(request_id)
}

pub fn execute_release(env: &Env, admin: &Address, request_id: u64) -> Result<(), EscrowError> {
    require_role(env, admin, Role::Admin)?;
    let _guard = ReentrancyGuard::new(env)?;

    let mut request = get_release_request(env, request_id)?;
    if request.status != ReleaseStatus::Approved {
        return Err(EscrowError::NotApproved);
    }
    let approved_at = request.approved_at.ok_or(EscrowError::NotApproved)?;
    ensure_elapsed(env, approved_at)?;

    if balance_of(env, request.project_id) < request.amount {
        return Err(EscrowError::InsufficientBalance);
    }

    pay_out(env, request.project_id, &request.recipient, request.amount)?;

    request.status = ReleaseStatus::Executed;
    request.save(env);

    ReleaseExecuted {
        request_id,
        project_id: request.project_id,
        milestone_id: request.milestone_id,
        amount: request.amount,
        recipient: request.recipient.clone(),
    }
    .publish(env);
    log!(env, "execute_release id={} amount={}", request_id, request.amount);

    Ok(())
}

pub fn get_release_request(env: &Env, request_id: u64) -> Result<ReleaseRequest, EscrowError> {
    read_record(env, &DataKey::ReleaseRequest(request_id)).ok_or(EscrowError::NotFound)
}

pub fn release_count(env: &Env) -> u64 {
    count(env, &DataKey::ReleaseCount)
}
