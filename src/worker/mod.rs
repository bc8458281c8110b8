pub mod balances;
pub mod extractors;
pub mod wallets;
pub mod worker;

pub use balances::{snapshot_balances, BALANCE_BATCH_SIZE};
pub use extractors::{effective_end_block, ScanParams};
pub use wallets::build_wallet_graph;
pub use worker::ChainWorker;
