// 分解結果の定義

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// 単一の分解結果（昇順に整列済みのスナップショット）
///
/// 列挙器の内部バッファとは独立したコピーを保持する。
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Subset(Vec<u64>);

impl Subset {
    /// 経路バッファのスナップショットから生成する
    pub fn from_path(path: &[u64]) -> Self {
        Self::from_unsorted(path.to_vec())
    }

    pub(crate) fn from_unsorted(mut masses: Vec<u64>) -> Self {
        masses.sort_unstable();
        Self(masses)
    }

    pub fn masses(&self) -> &[u64] {
        &self.0
    }

    pub fn sum(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 実数質量の分解結果（昇順に整列済み）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealSubset(Vec<f64>);

impl RealSubset {
    pub(crate) fn from_unsorted(mut masses: Vec<f64>) -> Self {
        masses.sort_unstable_by(f64::total_cmp);
        Self(masses)
    }

    pub fn masses(&self) -> &[f64] {
        &self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 分解実行のサマリー
#[derive(Clone, Debug)]
pub struct DecompositionSummary {
    pub subsets_found: u64,
    pub frames_expanded: u64,
    pub search_space: BigUint,
    pub elapsed_seconds: f64,
    pub subsets_per_second: f64,
    pub aborted: bool,
}
