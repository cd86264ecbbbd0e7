// 質量分解 - 部分集合和列挙ライブラリ

pub mod constants;
pub mod domain;         // ドメイン層
pub mod search;         // 探索層
pub mod application;    // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};
pub use num_bigint::BigUint;

// 主要な型を再エクスポート
pub use constants::{DEFAULT_MAX_SUBSET_LENGTH, DEFAULT_TOLERANCE};
pub use domain::decompose::{DecompositionSummary, MaxSubsetLength, RealSubset, Subset, TableBudget, Tolerance};
pub use domain::error::DecomposeError;
pub use domain::mass::{MassList, RealMassList};
pub use search::{
    enumerate_dp, enumerate_dp_parallel, enumerate_exact, enumerate_tolerant, BacktrackIter,
    ExactSubsetIter, ReachabilityTable, ToleranceSubsetIter,
};
