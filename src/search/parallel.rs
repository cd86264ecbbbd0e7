// 到達可能性テーブルの行並列構築

use anyhow::Result;
use std::sync::Arc;

use crate::domain::decompose::{MaxSubsetLength, TableBudget};
use crate::domain::mass::MassList;
use crate::infrastructure::executor::{ParallelConfig, WorkerPool};
use crate::search::backtrack::BacktrackIter;
use crate::search::table::{check_budget, fill_row_range, first_row, ReachabilityTable};
use crate::vlog;

/// 行チャンクの計算タスク
struct RowChunkTask {
    prev: Arc<Vec<bool>>,
    mass: u64,
    start: usize,
    end: usize,
}

/// 計算済みの行チャンク
struct RowChunk {
    start: usize,
    cells: Vec<bool>,
}

/// 行間バリア付きでテーブルを並列構築する
///
/// 行 i+1 の各セルは行 i のみを参照するため、行内はワーカー間で
/// 分担できる。次の行へ進むのは全チャンクが揃ってから。
pub fn build_table_parallel(
    list: &MassList,
    target: u64,
    budget: TableBudget,
    config: &ParallelConfig,
) -> Result<ReachabilityTable> {
    check_budget(list.len(), target, budget)?;
    let cols = target as usize + 1;
    let workers = config.num_workers();

    // 分配コストに見合わない幅は逐次構築で済ませる
    if workers <= 1 || cols < workers * config.min_chunk() {
        return ReachabilityTable::build(list, target, budget);
    }

    vlog!(
        "並列テーブル構築: {}行 x {}列, ワーカー{}",
        list.len() + 1,
        cols,
        workers
    );

    let pool = WorkerPool::new(workers, |task: RowChunkTask| RowChunk {
        start: task.start,
        cells: fill_row_range(&task.prev, task.mass, task.start, task.end),
    });

    let chunk_width = cols.div_ceil(workers);
    let mut rows: Vec<Vec<bool>> = Vec::with_capacity(list.len() + 1);
    rows.push(first_row(cols));

    for &mass in list.as_slice() {
        let prev = Arc::new(rows[rows.len() - 1].clone());
        let mut dispatched = 0usize;
        let mut start = 0usize;
        while start < cols {
            let end = (start + chunk_width).min(cols);
            pool.send_task(RowChunkTask {
                prev: Arc::clone(&prev),
                mass,
                start,
                end,
            })?;
            dispatched += 1;
            start = end;
        }

        // バリア: 全チャンクが揃うまで次の行へ進まない
        let mut next = vec![false; cols];
        for _ in 0..dispatched {
            let chunk = pool.recv_result()?;
            next[chunk.start..chunk.start + chunk.cells.len()].copy_from_slice(&chunk.cells);
        }
        rows.push(next);
    }

    Ok(ReachabilityTable::from_rows(rows, target))
}

/// テーブルを並列構築した上で部分集合を遅延列挙する
///
/// デコード自体は単一の経路バッファを変異させるため常に逐次。
pub fn enumerate_dp_parallel(
    masses: &[u64],
    target: u64,
    max_subset_length: usize,
    workers: Option<usize>,
) -> Result<BacktrackIter> {
    let list = MassList::new(masses.to_vec())?;
    let bound = MaxSubsetLength::new(max_subset_length)?;
    let config = match workers {
        Some(count) => ParallelConfig::new(count)?,
        None => ParallelConfig::default(),
    };
    let table = build_table_parallel(&list, target, TableBudget::default(), &config)?;
    Ok(BacktrackIter::new(&list, table, bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DecomposeError;
    use crate::search::backtrack::enumerate_dp;
    use std::collections::BTreeSet;

    fn parallel_table(masses: &[u64], target: u64, workers: usize) -> ReachabilityTable {
        let list = MassList::new(masses.to_vec()).unwrap();
        let config = ParallelConfig::new(workers).unwrap().with_min_chunk(1);
        build_table_parallel(&list, target, TableBudget::default(), &config).unwrap()
    }

    #[test]
    fn parallel_fill_matches_sequential() {
        let masses = [3, 34, 4, 12, 5, 2];
        let target = 40;
        let list = MassList::new(masses.to_vec()).unwrap();
        let sequential =
            ReachabilityTable::build(&list, target, TableBudget::default()).unwrap();
        let parallel = parallel_table(&masses, target, 4);

        for i in 0..sequential.prefix_rows() {
            for j in 0..=target {
                assert_eq!(
                    sequential.is_reachable(i, j),
                    parallel.is_reachable(i, j),
                    "セル({}, {})が不一致",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn narrow_table_falls_back_to_sequential() {
        // 既定の最小チャンク幅では7列は分配に値しない
        let list = MassList::new(vec![1, 2, 3]).unwrap();
        let config = ParallelConfig::new(2).unwrap();
        let table =
            build_table_parallel(&list, 6, TableBudget::default(), &config).unwrap();
        assert!(table.is_reachable(3, 6));
        assert!(!table.is_reachable(0, 1));
    }

    #[test]
    fn parallel_enumeration_matches_sequential_enumeration() {
        let masses = [5, 3, 8, 1, 2, 7];
        let target = 10;
        let sequential: BTreeSet<Vec<u64>> = enumerate_dp(&masses, target, masses.len())
            .unwrap()
            .map(|s| s.masses().to_vec())
            .collect();
        let parallel: BTreeSet<Vec<u64>> =
            enumerate_dp_parallel(&masses, target, masses.len(), Some(3))
                .unwrap()
                .map(|s| s.masses().to_vec())
                .collect();
        assert_eq!(sequential, parallel);
        assert!(!parallel.is_empty());
    }

    #[test]
    fn rejects_zero_workers() {
        let err = enumerate_dp_parallel(&[1, 2, 3], 4, 3, Some(0)).unwrap_err();
        let typed = err.downcast_ref::<DecomposeError>().unwrap();
        assert!(matches!(typed, DecomposeError::InvalidInput { .. }));
    }

    #[test]
    fn default_worker_count_is_accepted() {
        let found = enumerate_dp_parallel(&[1, 2, 3, 4], 5, 4, None).unwrap().count();
        assert_eq!(found, 2);
    }

    #[test]
    fn budget_is_enforced_before_parallel_fill() {
        let list = MassList::new(vec![1, 2, 3]).unwrap();
        let config = ParallelConfig::new(2).unwrap().with_min_chunk(1);
        let budget = TableBudget::new(10).unwrap();
        assert!(build_table_parallel(&list, 100, budget, &config).is_err());
    }
}
