// 並列実行管理

use anyhow::{anyhow, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread::JoinHandle;

use crate::constants::DEFAULT_MIN_CHUNK_COLS;
use crate::domain::error::DecomposeError;

/// 並列実行設定
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    num_workers: usize,
    min_chunk: usize,
}

impl ParallelConfig {
    pub fn new(num_workers: usize) -> Result<Self, DecomposeError> {
        if num_workers == 0 {
            return Err(DecomposeError::invalid_input(
                "ワーカー数は1以上である必要があります",
            ));
        }
        Ok(Self {
            num_workers,
            min_chunk: DEFAULT_MIN_CHUNK_COLS,
        })
    }

    pub fn with_min_chunk(mut self, min_chunk: usize) -> Self {
        self.min_chunk = min_chunk.max(1);
        self
    }

    /// ワーカースレッド数
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// 並列化に値する1ワーカーあたりの最小チャンク幅
    pub fn min_chunk(&self) -> usize {
        self.min_chunk
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get().max(1),
            min_chunk: DEFAULT_MIN_CHUNK_COLS,
        }
    }
}

/// ワーカープール
///
/// タスク送信チャネルが閉じるとワーカーは停止する。Dropで閉じて合流する。
pub struct WorkerPool<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    task_tx: Option<Sender<T>>,
    result_rx: Receiver<R>,
    handles: Vec<JoinHandle<()>>,
    num_workers: usize,
}

impl<T, R> WorkerPool<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// 新しいワーカープールを作成する
    pub fn new<F>(num_workers: usize, worker_fn: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        let (task_tx, task_rx) = unbounded::<T>();
        let (result_tx, result_rx) = unbounded::<R>();

        let mut handles = Vec::with_capacity(num_workers);
        for _ in 0..num_workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let worker_fn = worker_fn.clone();

            handles.push(std::thread::spawn(move || {
                while let Ok(task) = task_rx.recv() {
                    let result = worker_fn(task);
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            }));
        }

        Self {
            task_tx: Some(task_tx),
            result_rx,
            handles,
            num_workers,
        }
    }

    /// タスクを送信する
    pub fn send_task(&self, task: T) -> Result<()> {
        let tx = self
            .task_tx
            .as_ref()
            .ok_or_else(|| anyhow!("ワーカープールは停止済みです"))?;
        tx.send(task)
            .map_err(|e| anyhow!("タスクの送信に失敗しました: {}", e))
    }

    /// 結果を受信する（ブロッキング）
    pub fn recv_result(&self) -> Result<R> {
        self.result_rx
            .recv()
            .map_err(|e| anyhow!("結果の受信に失敗しました: {}", e))
    }

    /// 結果を受信する（ノンブロッキング）
    pub fn try_recv_result(&self) -> Option<R> {
        self.result_rx.try_recv().ok()
    }

    /// ワーカー数を取得する
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }
}

impl<T, R> Drop for WorkerPool<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    fn drop(&mut self) {
        // チャネルを閉じてワーカーを停止させ、合流する
        self.task_tx.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parallel_config_default_has_workers() {
        let config = ParallelConfig::default();
        assert!(config.num_workers() > 0);
        assert_eq!(config.min_chunk(), DEFAULT_MIN_CHUNK_COLS);
    }

    #[test]
    fn parallel_config_rejects_zero_workers() {
        assert!(ParallelConfig::new(0).is_err());
    }

    #[test]
    fn parallel_config_with_min_chunk() {
        let config = ParallelConfig::new(4).unwrap().with_min_chunk(16);
        assert_eq!(config.num_workers(), 4);
        assert_eq!(config.min_chunk(), 16);
    }

    #[test]
    fn worker_pool_processes_tasks() {
        let pool = WorkerPool::new(2, |x: i32| x * 2);

        pool.send_task(5).unwrap();
        pool.send_task(10).unwrap();

        let mut results = vec![pool.recv_result().unwrap(), pool.recv_result().unwrap()];
        results.sort();
        assert_eq!(results, vec![10, 20]);
    }

    #[test]
    fn worker_pool_multiple_workers() {
        let pool = WorkerPool::new(4, |x: i32| {
            std::thread::sleep(Duration::from_millis(10));
            x + 1
        });

        for i in 0..10 {
            pool.send_task(i).unwrap();
        }

        let mut results = Vec::new();
        for _ in 0..10 {
            results.push(pool.recv_result().unwrap());
        }

        results.sort();
        assert_eq!(results, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn drop_joins_workers() {
        let pool = WorkerPool::new(2, |x: u64| x);
        pool.send_task(1).unwrap();
        let _ = pool.recv_result();
        drop(pool);
    }
}
