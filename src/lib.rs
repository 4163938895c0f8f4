pub mod block;
pub mod chain;
pub mod corpus;
pub mod error;
pub mod miner;
pub mod snapshot;
pub mod verse;
