use soroban_sdk::{log, Address, Env};

use crate::errors::EscrowError;
use crate::events::{RoleGranted, RoleRevoked};
use crate::types::{DataKey, Role};

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::RoleMember(role, account.clone()))
        .unwrap_or(false)
}

pub fn role_count(env: &Env, role: Role) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::RoleCount(role))
        .unwrap_or(0u32)
}

/// Capability check run at the top of every privileged entry point.
pub fn require_role(env: &Env, account: &Address, role: Role) -> Result<(), EscrowError> {
    account.require_auth();
    if !has_role(env, role, account) {
        return Err(EscrowError::Unauthorized);
    }
    Ok(())
}

/// Adds `account` to `role`. Returns `false` when it already held the role.
pub(crate) fn insert_member(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    env.storage()
        .instance()
        .set(&DataKey::RoleMember(role, account.clone()), &true);
    env.storage()
        .instance()
        .set(&DataKey::RoleCount(role), &(role_count(env, role) + 1));
    true
}

pub fn grant_role(
    env: &Env,
    admin: &Address,
    role: Role,
    account: &Address,
) -> Result<(), EscrowError> {
    require_role(env, admin, Role::Admin)?;

    if insert_member(env, role, account) {
        RoleGranted {
            role,
            account: account.clone(),
            admin: admin.clone(),
        }
        .publish(env);
        log!(env, "grant_role {} -> {}", role, *account);
    }
    Ok(())
}

pub fn revoke_role(
    env: &Env,
    admin: &Address,
    role: Role,
    account: &Address,
) -> Result<(), EscrowError> {
    require_role(env, admin, Role::Admin)?;

    if !has_role(env, role, account) {
        return Ok(());
    }
    env.storage()
        .instance()
        .remove(&DataKey::RoleMember(role, account.clone()));
    env.storage()
        .instance()
        .set(&DataKey::RoleCount(role), &(role_count(env, role) - 1));

    RoleRevoked {
        role,
        account: account.clone(),
        admin: admin.clone(),
    }
    .publish(env);
    log!(env, "revoke_role {} -> {}", role, *account);
    Ok(())
}
