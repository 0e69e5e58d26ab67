use soroban_sdk::{contracttype, Address, String, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Token,
    Config,
    RoleMember(Role, Address),
    RoleCount(Role),
    ProjectCount,
    Project(u64),
    ProjectApproval(u64),
    ProjectBalance(u64),
    Contribution(u64, Address),
    ReleaseCount,
    ReleaseRequest(u64),
    Lock,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Admin,
    Validator,
    Planner,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReleaseStatus {
    Pending,
    Approved,
    Rejected,
    Executed,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Lifecycle stage of an admitted project, managed by Admins.
///
/// `Completed` and `Cancelled` are terminal and close the project to deposits.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    Active,
    Funded,
    Completed,
    Cancelled,
}

/// Which quorum record a vote was cast on.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BallotKind {
    Release,
    Project,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Share of registered validators (1..=100) whose votes finalize a ballot.
    pub quorum_percentage: u32,
    /// Seconds that must elapse between approval and execution of a release.
    pub timelock_duration: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseRequest {
    pub id: u64,
    pub project_id: u64,
    pub milestone_id: u64,
    pub amount: i128,
    pub recipient: Address,
    pub status: ReleaseStatus,
    pub approval_count: u32,
    pub rejection_count: u32,
    pub voted_validators: Vec<Address>,
    pub created_at: u64,
    pub approved_at: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: u64,
    pub planner: Address,
    /// Off-chain reference (e.g. an IPFS URI) to the project's descriptive metadata.
    pub metadata_uri: String,
    pub funding_goal: i128,
    pub status: ProjectStatus,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectApproval {
    pub project_id: u64,
    pub status: ApprovalStatus,
    pub voted_validators: Vec<Address>,
    pub approval_votes: u32,
    pub rejection_votes: u32,
}
