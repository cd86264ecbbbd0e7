// 進捗管理

use num_bigint::BigUint;
use num_traits::One;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// 進捗統計
#[derive(Clone, Debug, Default)]
pub struct ProgressStats {
    pub frames_expanded: u64,
    pub subsets_found: u64,
}

/// 進捗マネージャー
///
/// カウンタと中断フラグのみを持ち、`Arc` 越しに共有しても
/// すべての操作が `&self` で行える。
pub struct ProgressManager {
    abort_flag: AtomicBool,
    frames_expanded: AtomicU64,
    subsets_found: AtomicU64,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            abort_flag: AtomicBool::new(false),
            frames_expanded: AtomicU64::new(0),
            subsets_found: AtomicU64::new(0),
        }
    }

    /// 実行を中断
    pub fn abort(&self) {
        self.abort_flag.store(true, Ordering::Relaxed);
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// 発見済み部分集合数を追加
    pub fn add_subsets(&self, count: u64) {
        self.subsets_found.fetch_add(count, Ordering::Relaxed);
    }

    /// 展開済みフレーム数を記録（絶対値）
    pub fn set_frames(&self, count: u64) {
        self.frames_expanded.store(count, Ordering::Relaxed);
    }

    /// 現在の統計を取得
    pub fn get_stats(&self) -> ProgressStats {
        ProgressStats {
            frames_expanded: self.frames_expanded.load(Ordering::Relaxed),
            subsets_found: self.subsets_found.load(Ordering::Relaxed),
        }
    }

    /// カウンタと中断フラグをリセット
    pub fn reset(&self) {
        self.abort_flag.store(false, Ordering::Relaxed);
        self.frames_expanded.store(0, Ordering::Relaxed);
        self.subsets_found.store(0, Ordering::Relaxed);
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 長さ n のリストの探索空間の大きさ（2^n）
pub fn search_space(list_len: usize) -> BigUint {
    BigUint::one() << list_len
}
