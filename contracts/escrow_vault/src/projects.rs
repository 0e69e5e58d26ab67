use soroban_sdk::{log, Address, Env, String, Vec};

use crate::errors::EscrowError;
use crate::events::{ProjectCreated, ProjectStatusUpdated};
use crate::quorum::{Ballot, Outcome};
use crate::roles::require_role;
use crate::storage::{count, next_id, read_record, write_record};
use crate::types::{
    ApprovalStatus, BallotKind, DataKey, Project, ProjectApproval, ProjectStatus, Role,
};

impl Ballot for ProjectApproval {
    const KIND: BallotKind = BallotKind::Project;
    const VOTER_ROLE: Role = Role::Validator;

    fn load(env: &Env, id: u64) -> Result<Self, EscrowError> {
        get_approval(env, id)
    }

    fn save(&self, env: &Env) {
        write_record(env, &DataKey::ProjectApproval(self.project_id), self);
    }

    fn id(&self) -> u64 {
        self.project_id
    }

    fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }

    fn voters(&self) -> &Vec<Address> {
        &self.voted_validators
    }

    fn record_vote(&mut self, voter: Address, approve: bool) {
        self.voted_validators.push_back(voter);
        if approve {
            self.approval_votes += 1;
        } else {
            self.rejection_votes += 1;
        }
    }

    fn tally(&self) -> (u32, u32) {
        (self.approval_votes, self.rejection_votes)
    }

    fn finalize(&mut self, _env: &Env, outcome: Outcome) {
        self.status = match outcome {
            Outcome::Approved => ApprovalStatus::Approved,
            Outcome::Rejected => ApprovalStatus::Rejected,
        };
    }
}

pub fn create_project_proposal(
    env: &Env,
    planner: &Address,
    metadata_uri: String,
    funding_goal: i128,
) -> Result<u64, EscrowError> {
    require_role(env, planner, Role::Planner)?;

    if metadata_uri.len() == 0 {
        return Err(EscrowError::InvalidMetadata);
    }
    if funding_goal <= 0 {
        return Err(EscrowError::InvalidAmount);
    }

    let project_id = next_id(env, &DataKey::ProjectCount);
    let project = Project {
        id: project_id,
        planner: planner.clone(),
        metadata_uri: metadata_uri.clone(),
        funding_goal,
        status: ProjectStatus::Active,
        created_at: env.ledger().timestamp(),
    };
    write_record(env, &DataKey::Project(project_id), &project);

    let approval = ProjectApproval {
        project_id,
        status: ApprovalStatus::Pending,
        voted_validators: Vec::new(env),
        approval_votes: 0,
        rejection_votes: 0,
    };
    approval.save(env);

    ProjectCreated {
        project_id,
        planner: planner.clone(),
        metadata_uri,
        funding_goal,
    }
    .publish(env);
    log!(env, "create_project_proposal id={} goal={}", project_id, funding_goal);

    Ok(project_id)
}

/// Admin-managed lifecycle transition. Terminal projects cannot be moved again.
pub fn update_project_status(
    env: &Env,
    admin: &Address,
    project_id: u64,
    status: ProjectStatus,
) -> Result<(), EscrowError> {
    require_role(env, admin, Role::Admin)?;

    let mut project = get_project(env, project_id)?;
    if is_closed(project.status) {
        return Err(EscrowError::ProjectClosed);
    }
    project.status = status;
    write_record(env, &DataKey::Project(project_id), &project);

    ProjectStatusUpdated {
        project_id,
        status,
        admin: admin.clone(),
    }
    .publish(env);
    log!(env, "update_project_status id={} status={}", project_id, status);
    Ok(())
}

fn is_closed(status: ProjectStatus) -> bool {
    matches!(status, ProjectStatus::Completed | ProjectStatus::Cancelled)
}

pub fn get_project(env: &Env, project_id: u64) -> Result<Project, EscrowError> {
    read_record(env, &DataKey::Project(project_id)).ok_or(EscrowError::NotFound)
}

pub fn get_approval(env: &Env, project_id: u64) -> Result<ProjectApproval, EscrowError> {
    read_record(env, &DataKey::ProjectApproval(project_id)).ok_or(EscrowError::NotFound)
}

pub fn project_count(env: &Env) -> u64 {
    count(env, &DataKey::ProjectCount)
}

/// Deposits and release requests only reference projects validators have admitted.
pub fn require_approved(env: &Env, project_id: u64) -> Result<(), EscrowError> {
    if get_approval(env, project_id)?.status != ApprovalStatus::Approved {
        return Err(EscrowError::ProjectNotApproved);
    }
    Ok(())
}

/// Deposits are only accepted while the project is neither completed nor cancelled.
pub fn require_open(env: &Env, project_id: u64) -> Result<(), EscrowError> {
    if is_closed(get_project(env, project_id)?.status) {
        return Err(EscrowError::ProjectClosed);
    }
    Ok(())
}
