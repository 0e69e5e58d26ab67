use soroban_sdk::Env;

use crate::config::get_config;
use crate::errors::EscrowError;

/// Fails with `TimelockActive` until `timelock_duration` seconds have passed since `approved_at`.
pub fn ensure_elapsed(env: &Env, approved_at: u64) -> Result<(), EscrowError> {
    let elapsed = env.ledger().timestamp().saturating_sub(approved_at);
    if elapsed < get_config(env).timelock_duration {
        return Err(EscrowError::TimelockActive);
    }
    Ok(())
}

/// Ledger time at which a request approved at `approved_at` becomes executable.
pub fn unlocks_at(env: &Env, approved_at: u64) -> u64 {
    approved_at.saturating_add(get_config(env).timelock_duration)
}
