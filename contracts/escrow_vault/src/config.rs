use soroban_sdk::{log, Address, Env};

use crate::errors::EscrowError;
use crate::events::ConfigUpdated;
use crate::roles::require_role;
use crate::types::{Config, DataKey, Role};

pub const DEFAULT_QUORUM_PERCENTAGE: u32 = 51;
pub const DEFAULT_TIMELOCK_DURATION: u64 = 86_400; // 1 day

pub fn default_config() -> Config {
    Config {
        quorum_percentage: DEFAULT_QUORUM_PERCENTAGE,
        timelock_duration: DEFAULT_TIMELOCK_DURATION,
    }
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(default_config)
}

fn save_config(env: &Env, admin: &Address, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    ConfigUpdated {
        admin: admin.clone(),
        quorum_percentage: config.quorum_percentage,
        timelock_duration: config.timelock_duration,
    }
    .publish(env);
}

pub fn set_quorum_percentage(env: &Env, admin: &Address, pct: u32) -> Result<(), EscrowError> {
    require_role(env, admin, Role::Admin)?;

    if pct == 0 || pct > 100 {
        return Err(EscrowError::InvalidPercentage);
    }

    let mut config = get_config(env);
    config.quorum_percentage = pct;
    save_config(env, admin, &config);
    log!(env, "set_quorum_percentage {}", pct);
    Ok(())
}

pub fn set_timelock_duration(env: &Env, admin: &Address, seconds: u64) -> Result<(), EscrowError> {
    require_role(env, admin, Role::Admin)?;

    let mut config = get_config(env);
    config.timelock_duration = seconds;
    save_config(env, admin, &config);
    log!(env, "set_timelock_duration {}", seconds);
    Ok(())
}
