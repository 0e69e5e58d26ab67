use soroban_sdk::{Env, IntoVal, TryFromVal, Val};

use crate::types::DataKey;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Release requests and balances are an audit trail, so they live longer than instance data.
pub(crate) const RECORD_BUMP_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const RECORD_LIFETIME_THRESHOLD: u32 = RECORD_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn read_record<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
    V::Error: core::fmt::Debug,
{
    env.storage().persistent().get(key)
}

pub fn write_record<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
}

/// Next 1-based id for the counter stored under `key`.
pub fn next_id(env: &Env, key: &DataKey) -> u64 {
    let current: u64 = env.storage().instance().get(key).unwrap_or(0u64);
    let id = current + 1;
    env.storage().instance().set(key, &id);
    id
}

pub fn count(env: &Env, key: &DataKey) -> u64 {
    env.storage().instance().get(key).unwrap_or(0u64)
}
