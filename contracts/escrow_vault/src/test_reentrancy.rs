#![cfg(test)]

use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

use crate::reentrancy::ReentrancyGuard;
use crate::{EscrowError, EscrowVaultContract, EscrowVaultContractClient, ReleaseStatus, Role};

#[contracttype]
#[derive(Clone)]
enum TrapKey {
    Vault,
    Admin,
}

/// Token that calls back into the vault from inside every transfer.
#[contract]
pub struct MaliciousToken;

#[contractimpl]
impl MaliciousToken {
    pub fn arm(env: Env, vault: Address, admin: Address) {
        env.storage().instance().set(&TrapKey::Vault, &vault);
        env.storage().instance().set(&TrapKey::Admin, &admin);
    }

    pub fn balance(_env: Env, _id: Address) -> i128 {
        1_000_000
    }

    pub fn allowance(_env: Env, _from: Address, _spender: Address) -> i128 {
        1_000_000
    }

    pub fn transfer_from(env: Env, _spender: Address, from: Address, _to: Address, amount: i128) {
        Self::reenter(&env, &from, amount);
    }

    pub fn transfer(env: Env, _from: Address, to: Address, amount: i128) {
        Self::reenter(&env, &to, amount);
    }
}

impl MaliciousToken {
    fn reenter(env: &Env, user: &Address, amount: i128) {
        let vault: Option<Address> = env.storage().instance().get(&TrapKey::Vault);
        let admin: Option<Address> = env.storage().instance().get(&TrapKey::Admin);
        if let (Some(vault), Some(admin)) = (vault, admin) {
            let client = EscrowVaultContractClient::new(env, &vault);

            // The host aborts any call back into a contract already on the stack,
            // before the vault's own guard is reached.
            let res = client.try_deposit(user, &1, &amount);
            assert!(matches!(res, Err(Err(_))), "nested deposit not aborted: {:?}", res);

            let res = client.try_execute_release(&admin, &1);
            assert!(matches!(res, Err(Err(_))), "nested execute not aborted: {:?}", res);
        }
    }
}

/// Token whose payouts always fail; pulls succeed without moving anything.
#[contract]
pub struct FailingToken;

#[contractimpl]
impl FailingToken {
    pub fn balance(_env: Env, _id: Address) -> i128 {
        1_000_000
    }

    pub fn allowance(_env: Env, _from: Address, _spender: Address) -> i128 {
        1_000_000
    }

    pub fn transfer_from(_env: Env, _spender: Address, _from: Address, _to: Address, _amount: i128) {}

    pub fn transfer(_env: Env, _from: Address, _to: Address, _amount: i128) {
        panic!("transfer rejected");
    }
}

struct Trap {
    env: Env,
    client: EscrowVaultContractClient<'static>,
    admin: Address,
    validator1: Address,
    validator2: Address,
    investor: Address,
}

fn setup() -> Trap {
    setup_with(|env| env.register(MaliciousToken, ()), true)
}

fn setup_with(register_token: impl FnOnce(&Env) -> Address, arm: bool) -> Trap {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let admin = Address::generate(&env);
    let validator1 = Address::generate(&env);
    let validator2 = Address::generate(&env);
    let planner = Address::generate(&env);
    let investor = Address::generate(&env);

    let vault_id = env.register(EscrowVaultContract, ());
    let token_id = register_token(&env);
    let client = EscrowVaultContractClient::new(&env, &vault_id);
    client.initialize(&admin, &token_id);

    client.grant_role(&admin, &Role::Validator, &validator1);
    client.grant_role(&admin, &Role::Validator, &validator2);
    client.grant_role(&admin, &Role::Planner, &planner);

    let project_id =
        client.create_project_proposal(&planner, &String::from_str(&env, "ipfs://trap"), &1_000);
    client.vote_on_project(&validator1, &project_id, &true);
    client.vote_on_project(&validator2, &project_id, &true);

    if arm {
        MaliciousTokenClient::new(&env, &token_id).arm(&vault_id, &admin);
    }

    Trap {
        env,
        client,
        admin,
        validator1,
        validator2,
        investor,
    }
}

#[test]
fn test_host_aborts_token_reentry_on_deposit() {
    let t = setup();

    t.client.deposit(&t.investor, &1, &500);

    assert_eq!(t.client.balance_of(&1), 500);
    assert_eq!(t.client.contribution_of(&1, &t.investor), 500);
}

#[test]
fn test_host_aborts_token_reentry_on_execute() {
    let t = setup();
    t.client.deposit(&t.investor, &1, &500);

    let recipient = Address::generate(&t.env);
    let request_id = t
        .client
        .request_release(&t.admin, &1, &1, &300, &recipient);
    t.client.vote_release(&t.validator1, &request_id, &true);
    t.client.vote_release(&t.validator2, &request_id, &true);
    t.env.ledger().set_timestamp(1_000 + 86_400);

    t.client.execute_release(&t.admin, &request_id);

    assert_eq!(t.client.balance_of(&1), 200);
    assert_eq!(
        t.client.get_release_request(&request_id).status,
        ReleaseStatus::Executed
    );
    assert_eq!(
        t.client.try_execute_release(&t.admin, &request_id),
        Err(Ok(EscrowError::NotApproved))
    );
}

#[test]
fn test_failed_payout_leaves_request_and_balance_untouched() {
    let t = setup_with(|env| env.register(FailingToken, ()), false);
    t.client.deposit(&t.investor, &1, &500);

    let recipient = Address::generate(&t.env);
    let request_id = t
        .client
        .request_release(&t.admin, &1, &1, &300, &recipient);
    t.client.vote_release(&t.validator1, &request_id, &true);
    t.client.vote_release(&t.validator2, &request_id, &true);
    t.env.ledger().set_timestamp(1_000 + 86_400);

    let result = t.client.try_execute_release(&t.admin, &request_id);
    assert_eq!(result, Err(Ok(EscrowError::TransferFailed)));
    assert_eq!(t.client.balance_of(&1), 500);

    let request = t.client.get_release_request(&request_id);
    assert_eq!(request.status, ReleaseStatus::Approved);
    assert_eq!(request.approved_at, Some(1_000));

    // The guard was released, so a retry reaches the token again.
    let result = t.client.try_execute_release(&t.admin, &request_id);
    assert_eq!(result, Err(Ok(EscrowError::TransferFailed)));
}

#[test]
fn test_guard_blocks_nested_acquire() {
    let env = Env::default();
    let contract_id = env.register(EscrowVaultContract, ());

    env.as_contract(&contract_id, || {
        let guard = ReentrancyGuard::new(&env).unwrap();
        assert_eq!(ReentrancyGuard::new(&env).err(), Some(EscrowError::Reentrancy));

        drop(guard);
        assert!(ReentrancyGuard::new(&env).is_ok());
    });
}

#[test]
fn test_guard_released_on_error_path() {
    let env = Env::default();
    let contract_id = env.register(EscrowVaultContract, ());

    env.as_contract(&contract_id, || {
        let failing = || -> Result<(), EscrowError> {
            let _guard = ReentrancyGuard::new(&env)?;
            Err(EscrowError::TransferFailed)
        };
        assert_eq!(failing(), Err(EscrowError::TransferFailed));
        assert!(ReentrancyGuard::new(&env).is_ok());
    });
}
