// 分解関連のドメインモデル

pub mod config;
pub mod result;

pub use config::{MaxSubsetLength, TableBudget, Tolerance};
pub use result::{DecompositionSummary, RealSubset, Subset};
