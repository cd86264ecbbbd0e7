// アプリケーション層 - 分解ユースケースの調停

pub mod progress;
pub mod service;

pub use progress::{search_space, ProgressManager, ProgressStats};
pub use service::{DecompositionService, RunHandle};
