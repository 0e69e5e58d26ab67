//! Per-project escrow balances and per-depositor contribution history.
use soroban_sdk::{log, token, Address, Env};

use crate::errors::EscrowError;
use crate::events::emit_deposited;
use crate::projects::{require_approved, require_open};
use crate::reentrancy::ReentrancyGuard;
use crate::storage::{read_record, write_record};
use crate::types::DataKey;

pub fn token_address(env: &Env) -> Result<Address, EscrowError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(EscrowError::NotInitialized)
}

fn token_client(env: &Env) -> Result<token::Client<'_>, EscrowError> {
    Ok(token::Client::new(env, &token_address(env)?))
}

pub fn balance_of(env: &Env, project_id: u64) -> i128 {
    read_record(env, &DataKey::ProjectBalance(project_id)).unwrap_or(0)
}

pub fn contribution_of(env: &Env, project_id: u64, depositor: &Address) -> i128 {
    read_record(env, &DataKey::Contribution(project_id, depositor.clone())).unwrap_or(0)
}

pub fn deposit(
    env: &Env,
    depositor: &Address,
    project_id: u64,
    amount: i128,
) -> Result<(), EscrowError> {
    depositor.require_auth();
    let _guard = ReentrancyGuard::new(env)?;

    if amount <= 0 {
        return Err(EscrowError::InvalidAmount);
    }
    require_approved(env, project_id)?;
    require_open(env, project_id)?;

    let token = token_client(env)?;
    let vault = env.current_contract_address();
    if token.allowance(depositor, &vault) < amount || token.balance(depositor) < amount {
        return Err(EscrowError::InsufficientAllowance);
    }

    token.transfer_from(&vault, depositor, &vault, &amount);

    write_record(
        env,
        &DataKey::ProjectBalance(project_id),
        &(balance_of(env, project_id) + amount),
    );
    write_record(
        env,
        &DataKey::Contribution(project_id, depositor.clone()),
        &(contribution_of(env, project_id, depositor) + amount),
    );

    emit_deposited(env, project_id, depositor, amount);
    log!(env, "deposit project={} from={} amount={}", project_id, *depositor, amount);
    Ok(())
}

/// Sends `amount` from the vault to `recipient` and debits the project.
///
/// Callers must already hold the reentrancy guard and have checked the balance.
pub(crate) fn pay_out(
    env: &Env,
    project_id: u64,
    recipient: &Address,
    amount: i128,
) -> Result<(), EscrowError> {
    let token = token_client(env)?;
    match token.try_transfer(&env.current_contract_address(), recipient, &amount) {
        Ok(Ok(())) => {}
        _ => return Err(EscrowError::TransferFailed),
    }

    write_record(
        env,
        &DataKey::ProjectBalance(project_id),
        &(balance_of(env, project_id) - amount),
    );
    Ok(())
}
