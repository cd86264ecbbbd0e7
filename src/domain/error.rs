// 分解エラーの定義

use thiserror::Error;

/// 分解処理のエラー分類
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecomposeError {
    /// 入力が不正（質量 <= 0、目標値 < 0、許容誤差 < 0 など）
    #[error("入力が不正です: {reason}")]
    InvalidInput { reason: String },

    /// 到達可能性テーブルがセル数予算を超過
    #[error("到達可能性テーブルが予算を超過します: {rows} x {cols} セル (予算: {budget})")]
    TableBudgetExceeded { rows: u64, cols: u64, budget: u64 },
}

impl DecomposeError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
