// 分解設定のValue Objects

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_SUBSET_LENGTH, DEFAULT_TABLE_CELL_BUDGET, DEFAULT_TOLERANCE};
use crate::domain::error::DecomposeError;

/// 許容誤差を表すValue Object（0以上の有限値）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance(f64);

impl Tolerance {
    pub fn new(value: f64) -> Result<Self, DecomposeError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DecomposeError::invalid_input(format!(
                "許容誤差は0以上の有限値である必要があります: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

/// バックトラック時の部分集合長の上限を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxSubsetLength(usize);

impl MaxSubsetLength {
    pub fn new(length: usize) -> Result<Self, DecomposeError> {
        if length == 0 {
            return Err(DecomposeError::invalid_input(
                "部分集合長の上限は1以上である必要があります",
            ));
        }
        Ok(Self(length))
    }

    /// 長さ n のリスト全体を許容する上限（切り詰めなし）
    pub fn covering(list_len: usize) -> Self {
        Self(list_len.max(1))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for MaxSubsetLength {
    fn default() -> Self {
        Self(DEFAULT_MAX_SUBSET_LENGTH)
    }
}

/// 到達可能性テーブルのセル数予算を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBudget(u64);

impl TableBudget {
    pub fn new(cells: u64) -> Result<Self, DecomposeError> {
        if cells == 0 {
            return Err(DecomposeError::invalid_input(
                "テーブル予算は1セル以上である必要があります",
            ));
        }
        Ok(Self(cells))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Default for TableBudget {
    fn default() -> Self {
        Self(DEFAULT_TABLE_CELL_BUDGET)
    }
}
