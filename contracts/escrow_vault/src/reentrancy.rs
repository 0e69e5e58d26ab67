use soroban_sdk::Env;

use crate::errors::EscrowError;
use crate::types::DataKey;

/// Lock held for the duration of an operation that calls out to the token.
///
/// The flag lives in temporary storage and is cleared on `Drop`, so every
/// exit path (including `?` returns) releases it.
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn new(env: &'a Env) -> Result<Self, EscrowError> {
        if env.storage().temporary().has(&DataKey::Lock) {
            return Err(EscrowError::Reentrancy);
        }
        env.storage().temporary().set(&DataKey::Lock, &true);
        Ok(Self { env })
    }
}

impl<'a> Drop for ReentrancyGuard<'a> {
    fn drop(&mut self) {
        self.env.storage().temporary().remove(&DataKey::Lock);
    }
}
