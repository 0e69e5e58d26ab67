use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EscrowError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    InsufficientBalance = 4,
    InsufficientAllowance = 5,
    InvalidRecipient = 6,
    Unauthorized = 7,
    AlreadyVoted = 8,
    AlreadyFinalized = 9,
    NotApproved = 10,
    TimelockActive = 11,
    InvalidPercentage = 12,
    NotFound = 13,
    ProjectNotApproved = 14,
    InvalidMetadata = 15,
    Reentrancy = 16,
    TransferFailed = 17,
    ProjectClosed = 18,
}
