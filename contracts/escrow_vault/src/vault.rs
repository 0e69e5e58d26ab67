use soroban_sdk::{contract, contractimpl, log, Address, Env, String};

use crate::config::{self, default_config};
use crate::errors::EscrowError;
use crate::ledger;
use crate::projects;
use crate::quorum::{self, cast_vote};
use crate::release;
use crate::roles::{self, insert_member};
use crate::storage::bump_instance;
use crate::timelock::unlocks_at;
use crate::types::{
    Config, DataKey, Project, ProjectApproval, ProjectStatus, ReleaseRequest, ReleaseStatus,
    Role,
};

#[contract]
pub struct EscrowVaultContract;

#[contractimpl]
impl EscrowVaultContract {
    /// One-shot setup: `admin` becomes the first Admin and `token` the custodied asset.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), EscrowError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(EscrowError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::Config, &default_config());
        env.storage().instance().set(&DataKey::ProjectCount, &0u64);
        env.storage().instance().set(&DataKey::ReleaseCount, &0u64);
        insert_member(&env, Role::Admin, &admin);
        bump_instance(&env);

        log!(&env, "initialize admin={} token={}", admin, token);
        Ok(())
    }

    // Ledger account book

    pub fn deposit(
        env: Env,
        depositor: Address,
        project_id: u64,
        amount: i128,
    ) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        ledger::deposit(&env, &depositor, project_id, amount)
    }

    pub fn balance_of(env: Env, project_id: u64) -> i128 {
        ledger::balance_of(&env, project_id)
    }

    pub fn contribution_of(env: Env, project_id: u64, depositor: Address) -> i128 {
        ledger::contribution_of(&env, project_id, &depositor)
    }

    pub fn get_token(env: Env) -> Result<Address, EscrowError> {
        ledger::token_address(&env)
    }

    // Project approval

    pub fn create_project_proposal(
        env: Env,
        planner: Address,
        metadata_uri: String,
        funding_goal: i128,
    ) -> Result<u64, EscrowError> {
        Self::require_initialized(&env)?;
        projects::create_project_proposal(&env, &planner, metadata_uri, funding_goal)
    }

    pub fn vote_on_project(
        env: Env,
        validator: Address,
        project_id: u64,
        approve: bool,
    ) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        cast_vote::<ProjectApproval>(&env, &validator, project_id, approve)?;
        Ok(())
    }

    pub fn update_project_status(
        env: Env,
        admin: Address,
        project_id: u64,
        status: ProjectStatus,
    ) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        projects::update_project_status(&env, &admin, project_id, status)
    }

    pub fn get_project(env: Env, project_id: u64) -> Result<Project, EscrowError> {
        projects::get_project(&env, project_id)
    }

    pub fn get_project_approval(env: Env, project_id: u64) -> Result<ProjectApproval, EscrowError> {
        projects::get_approval(&env, project_id)
    }

    pub fn get_project_count(env: Env) -> u64 {
        projects::project_count(&env)
    }

    pub fn has_voted_project(
        env: Env,
        project_id: u64,
        validator: Address,
    ) -> Result<bool, EscrowError> {
        Ok(projects::get_approval(&env, project_id)?
            .voted_validators
            .contains(&validator))
    }

    // Release requests

    pub fn request_release(
        env: Env,
        admin: Address,
        project_id: u64,
        milestone_id: u64,
        amount: i128,
        recipient: Address,
    ) -> Result<u64, EscrowError> {
        Self::require_initialized(&env)?;
        release::request_release(&env, &admin, project_id, milestone_id, amount, recipient)
    }

    pub fn vote_release(
        env: Env,
        validator: Address,
        request_id: u64,
        approve: bool,
    ) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        cast_vote::<ReleaseRequest>(&env, &validator, request_id, approve)?;
        Ok(())
    }

    /// Pays out an Approved request once its timelock has elapsed. Retry later on `TimelockActive`.
    pub fn execute_release(env: Env, admin: Address, request_id: u64) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        release::execute_release(&env, &admin, request_id)
    }

    pub fn get_release_request(env: Env, request_id: u64) -> Result<ReleaseRequest, EscrowError> {
        release::get_release_request(&env, request_id)
    }

    pub fn get_release_count(env: Env) -> u64 {
        release::release_count(&env)
    }

    pub fn has_voted_release(
        env: Env,
        request_id: u64,
        validator: Address,
    ) -> Result<bool, EscrowError> {
        Ok(release::get_release_request(&env, request_id)?
            .voted_validators
            .contains(&validator))
    }

    /// Earliest ledger timestamp at which an Approved request can be executed.
    pub fn release_unlocks_at(env: Env, request_id: u64) -> Result<u64, EscrowError> {
        let request = release::get_release_request(&env, request_id)?;
        match (request.status, request.approved_at) {
            (ReleaseStatus::Approved, Some(approved_at)) => Ok(unlocks_at(&env, approved_at)),
            _ => Err(EscrowError::NotApproved),
        }
    }

    // Roles and configuration

    pub fn set_quorum_percentage(env: Env, admin: Address, pct: u32) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        config::set_quorum_percentage(&env, &admin, pct)
    }

    pub fn set_timelock_duration(env: Env, admin: Address, seconds: u64) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        config::set_timelock_duration(&env, &admin, seconds)
    }

    pub fn get_config(env: Env) -> Config {
        config::get_config(&env)
    }

    /// Votes needed to finalize a ballot with the current validator set.
    pub fn required_votes(env: Env) -> u32 {
        quorum::required_votes(&env)
    }

    pub fn grant_role(
        env: Env,
        admin: Address,
        role: Role,
        account: Address,
    ) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        roles::grant_role(&env, &admin, role, &account)
    }

    pub fn revoke_role(
        env: Env,
        admin: Address,
        role: Role,
        account: Address,
    ) -> Result<(), EscrowError> {
        Self::require_initialized(&env)?;
        roles::revoke_role(&env, &admin, role, &account)
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        roles::has_role(&env, role, &account)
    }

    pub fn role_count(env: Env, role: Role) -> u32 {
        roles::role_count(&env, role)
    }

    fn require_initialized(env: &Env) -> Result<(), EscrowError> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(EscrowError::NotInitialized);
        }
        bump_instance(env);
        Ok(())
    }
}
