pub mod erc20;
pub mod flush;
pub mod multicall;
pub mod prize_distributor;
pub mod prize_pool;
pub mod twab_delegator;

pub use erc20::IERC20;
pub use flush::Flushed;
pub use multicall::{Call3, IMulticall3, McResult};
pub use prize_distributor::ClaimedDraw;
pub use prize_pool::{Deposited, Withdrawal};
pub use twab_delegator::{
    DelegateeUpdated, DelegationCreated, DelegationFunded, TransferredDelegation,
};
