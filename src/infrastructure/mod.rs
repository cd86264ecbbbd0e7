// インフラ層 - 技術的実装

pub mod executor;

pub use executor::{ParallelConfig, WorkerPool};
