// 到達可能性テーブルの逆探索デコーダ

use anyhow::Result;

use crate::domain::decompose::{MaxSubsetLength, Subset, TableBudget};
use crate::domain::mass::MassList;
use crate::search::table::ReachabilityTable;
use crate::search::FrameCounter;

/// バックトラックのフレーム
#[derive(Clone, Copy, Debug)]
struct Frame {
    prefix_len: usize,
    remaining: u64,
    path_len: usize,
    pending: Option<u64>,
}

/// DPテーブルから具体的な部分集合を復元する遅延イテレータ
///
/// カーソル (接頭辞長, 残り目標値) を (n, target) から辿る。
/// テーブルは到達可能性しか持たないため、全解の復元自体は指数的で、
/// `max_length` が「含める」遷移を刈り込む唯一の防御となる。
#[derive(Debug)]
pub struct BacktrackIter {
    masses: Vec<u64>,
    table: ReachabilityTable,
    max_length: usize,
    // 経路バッファは呼び出しごとに新規確保する
    path: Vec<u64>,
    stack: Vec<Frame>,
    frames_expanded: u64,
}

/// DPテーブルを構築し、目標値に到達する部分集合を遅延列挙する
pub fn enumerate_dp(masses: &[u64], target: u64, max_subset_length: usize) -> Result<BacktrackIter> {
    let list = MassList::new(masses.to_vec())?;
    let bound = MaxSubsetLength::new(max_subset_length)?;
    let table = ReachabilityTable::build(&list, target, TableBudget::default())?;
    Ok(BacktrackIter::new(&list, table, bound))
}

impl BacktrackIter {
    pub(crate) fn new(list: &MassList, table: ReachabilityTable, bound: MaxSubsetLength) -> Self {
        let target = table.target();
        Self {
            masses: list.as_slice().to_vec(),
            table,
            max_length: bound.get(),
            path: Vec::new(),
            stack: vec![Frame {
                prefix_len: list.len(),
                remaining: target,
                path_len: 0,
                pending: None,
            }],
            frames_expanded: 0,
        }
    }
}

impl FrameCounter for BacktrackIter {
    fn frames_expanded(&self) -> u64 {
        self.frames_expanded
    }
}

impl Iterator for BacktrackIter {
    type Item = Subset;

    fn next(&mut self) -> Option<Subset> {
        while let Some(frame) = self.stack.pop() {
            self.frames_expanded += 1;
            self.path.truncate(frame.path_len);
            if let Some(mass) = frame.pending {
                self.path.push(mass);
            }

            // 残り 0 で解が確定。以降もバッファは変化するため独立した
            // スナップショットを返す
            if frame.remaining == 0 {
                return Some(Subset::from_path(&self.path));
            }

            // 到達不能なセルからは解が出ない（接頭辞長 0 の正の残りを含む）
            if !self.table.is_reachable(frame.prefix_len, frame.remaining) {
                continue;
            }

            let mass = self.masses[frame.prefix_len - 1];
            let path_len = self.path.len();

            // LIFOのため「含める」を先に積み、「飛ばす」から探索される。
            // 「含める」遷移は経路長の上限内に限る
            if path_len < self.max_length && frame.remaining >= mass {
                self.stack.push(Frame {
                    prefix_len: frame.prefix_len - 1,
                    remaining: frame.remaining - mass,
                    path_len,
                    pending: Some(mass),
                });
            }
            self.stack.push(Frame {
                prefix_len: frame.prefix_len - 1,
                remaining: frame.remaining,
                path_len,
                pending: None,
            });
        }
        None
    }
}
