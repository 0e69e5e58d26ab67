#![no_std]

mod config;
mod errors;
mod events;
mod ledger;
mod projects;
mod quorum;
mod reentrancy;
mod release;
mod roles;
mod storage;
mod timelock;
mod types;
mod vault;

pub use errors::EscrowError;
pub use events::{
    ConfigUpdated, Deposited, ProjectCreated, ProjectStatusUpdated, ReleaseExecuted,
    ReleaseRequested, RoleGranted, RoleRevoked, VoteCast,
};
pub use types::{
    ApprovalStatus, BallotKind, Config, Project, ProjectApproval, ProjectStatus, ReleaseRequest,
    ReleaseStatus, Role,
};
pub use vault::{EscrowVaultContract, EscrowVaultContractClient};

#[cfg(test)]
mod test_reentrancy;
