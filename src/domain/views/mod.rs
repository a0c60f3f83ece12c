pub mod export;
pub mod filter;
pub mod stats;
