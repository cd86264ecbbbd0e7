// 既定値と予算定数

/// 許容誤差列挙の既定値
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// バックトラック時に許す部分集合長の既定上限
pub const DEFAULT_MAX_SUBSET_LENGTH: usize = 3;

/// 到達可能性テーブルのセル数予算の既定値
pub const DEFAULT_TABLE_CELL_BUDGET: u64 = 1 << 28;

/// 進捗カウンタを更新するバッチ幅
pub const PROGRESS_BATCH: u64 = 1024;

/// 並列構築に切り替える1ワーカーあたりの最小列数
pub const DEFAULT_MIN_CHUNK_COLS: usize = 1024;
