// 質量分解サービス

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

use crate::application::progress::{search_space, ProgressManager, ProgressStats};
use crate::constants::PROGRESS_BATCH;
use crate::domain::decompose::DecompositionSummary;
use crate::search::{
    enumerate_dp, enumerate_dp_parallel, enumerate_exact, enumerate_tolerant, FrameCounter,
};
use crate::vlog;

/// 実行ハンドル（別スレッドからの中断と進捗参照）
pub struct RunHandle {
    progress: Arc<ProgressManager>,
}

impl RunHandle {
    /// 実行を中断
    pub fn abort(&self) {
        self.progress.abort();
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.progress.is_aborted()
    }

    /// 進捗統計を取得
    pub fn get_progress(&self) -> ProgressStats {
        self.progress.get_stats()
    }
}

/// 分解実行を調停するサービス
///
/// 遅延列挙を消費しながら件数を集計する。結果そのものは保持しない。
pub struct DecompositionService {
    progress: Arc<ProgressManager>,
}

impl DecompositionService {
    pub fn new() -> Self {
        Self {
            progress: Arc::new(ProgressManager::new()),
        }
    }

    /// 進捗・中断用ハンドルを取得
    pub fn handle(&self) -> RunHandle {
        RunHandle {
            progress: Arc::clone(&self.progress),
        }
    }

    /// 厳密列挙を実行して集計する
    pub fn run_exact(&self, masses: &[u64], target: u64) -> Result<DecompositionSummary> {
        let iter = enumerate_exact(masses, target).context("厳密列挙の入力検証に失敗しました")?;
        vlog!("厳密列挙を開始: n={}, 目標={}", masses.len(), target);
        self.drain(iter, masses.len())
    }

    /// 許容誤差列挙を実行して集計する
    pub fn run_tolerant(
        &self,
        masses: &[f64],
        target: f64,
        tolerance: f64,
    ) -> Result<DecompositionSummary> {
        let iter = enumerate_tolerant(masses, target, tolerance)
            .context("許容誤差列挙の入力検証に失敗しました")?;
        vlog!(
            "許容誤差列挙を開始: n={}, 目標={}, 許容={}",
            masses.len(),
            target,
            tolerance
        );
        self.drain(iter, masses.len())
    }

    /// DP列挙を実行して集計する
    pub fn run_dp(
        &self,
        masses: &[u64],
        target: u64,
        max_subset_length: usize,
    ) -> Result<DecompositionSummary> {
        let iter = enumerate_dp(masses, target, max_subset_length)
            .context("DP列挙の準備に失敗しました")?;
        vlog!(
            "DP列挙を開始: n={}, 目標={}, 長さ上限={}",
            masses.len(),
            target,
            max_subset_length
        );
        self.drain(iter, masses.len())
    }

    /// テーブルを並列構築した上でDP列挙を実行して集計する
    pub fn run_dp_parallel(
        &self,
        masses: &[u64],
        target: u64,
        max_subset_length: usize,
        workers: Option<usize>,
    ) -> Result<DecompositionSummary> {
        let iter = enumerate_dp_parallel(masses, target, max_subset_length, workers)
            .context("並列DP列挙の準備に失敗しました")?;
        self.drain(iter, masses.len())
    }

    /// 遅延列挙を消費し、中断に応答しながら集計する
    fn drain<I>(&self, mut iter: I, list_len: usize) -> Result<DecompositionSummary>
    where
        I: Iterator + FrameCounter,
    {
        self.progress.reset();
        let start = Instant::now();
        let mut found: u64 = 0;
        let mut aborted = false;

        while let Some(_subset) = iter.next() {
            found += 1;
            if found % PROGRESS_BATCH == 0 {
                self.progress.add_subsets(PROGRESS_BATCH);
                self.progress.set_frames(iter.frames_expanded());
            }
            if self.progress.is_aborted() {
                aborted = true;
                break;
            }
        }

        self.progress.add_subsets(found % PROGRESS_BATCH);
        self.progress.set_frames(iter.frames_expanded());

        let elapsed = start.elapsed().as_secs_f64();
        let summary = DecompositionSummary {
            subsets_found: found,
            frames_expanded: iter.frames_expanded(),
            search_space: search_space(list_len),
            elapsed_seconds: elapsed,
            subsets_per_second: if elapsed > 0.0 {
                found as f64 / elapsed
            } else {
                0.0
            },
            aborted,
        };
        vlog!(
            "列挙終了: {}件 / {}フレーム / {:.3}秒{}",
            summary.subsets_found,
            summary.frames_expanded,
            summary.elapsed_seconds,
            if aborted { " (中断)" } else { "" }
        );
        Ok(summary)
    }
}

impl Default for DecompositionService {
    fn default() -> Self {
        Self::new()
    }
}
