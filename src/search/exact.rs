// 厳密部分集合和の列挙（含める/含めないの分枝探索）

use anyhow::Result;

use crate::domain::decompose::Subset;
use crate::domain::mass::MassList;
use crate::search::FrameCounter;

/// 探索フレーム（明示的スタックで再帰を置き換える）
#[derive(Clone, Copy, Debug)]
struct Frame {
    index: usize,
    remaining: u64,
    path_len: usize,
    pending: Option<u64>,
}

/// 厳密列挙の遅延イテレータ
///
/// 1回の `next()` で高々1件の部分集合を生成する。消費を止めれば
/// 未探索の分枝には一切コストがかからない。
#[derive(Debug)]
pub struct ExactSubsetIter {
    masses: Vec<u64>,
    suffix: Vec<u64>,
    path: Vec<u64>,
    stack: Vec<Frame>,
    frames_expanded: u64,
}

/// 合計が目標値と厳密に一致する部分集合を遅延列挙する
///
/// 質量 0 は同一の部分集合を二重に生成するため入力検証で拒否する。
pub fn enumerate_exact(masses: &[u64], target: u64) -> Result<ExactSubsetIter> {
    let list = MassList::new(masses.to_vec())?;
    Ok(ExactSubsetIter::new(&list, target))
}

impl ExactSubsetIter {
    pub(crate) fn new(list: &MassList, target: u64) -> Self {
        let suffix = list.suffix_sums();
        Self {
            masses: list.as_slice().to_vec(),
            suffix,
            path: Vec::new(),
            stack: vec![Frame {
                index: 0,
                remaining: target,
                path_len: 0,
                pending: None,
            }],
            frames_expanded: 0,
        }
    }
}

impl FrameCounter for ExactSubsetIter {
    fn frames_expanded(&self) -> u64 {
        self.frames_expanded
    }
}

impl Iterator for ExactSubsetIter {
    type Item = Subset;

    fn next(&mut self) -> Option<Subset> {
        while let Some(frame) = self.stack.pop() {
            self.frames_expanded += 1;
            self.path.truncate(frame.path_len);
            if let Some(mass) = frame.pending {
                self.path.push(mass);
            }

            // 残りの質量をすべて使うと目標値に一致する。正の質量のもとでは
            // この分枝の解はそれ以外に存在しないため、ここで打ち切る
            if self.suffix[frame.index] == frame.remaining {
                let mut snapshot = self.path.clone();
                snapshot.extend_from_slice(&self.masses[frame.index..]);
                return Some(Subset::from_unsorted(snapshot));
            }

            // 質量が尽きた
            if frame.index == self.masses.len() {
                continue;
            }

            let mass = self.masses[frame.index];
            let path_len = self.path.len();

            // LIFOのため「含める」を先に積み、「含めない」から探索される。
            // 目標値を超える「含める」遷移は解を持たない
            if frame.remaining >= mass {
                self.stack.push(Frame {
                    index: frame.index + 1,
                    remaining: frame.remaining - mass,
                    path_len,
                    pending: Some(mass),
                });
            }
            self.stack.push(Frame {
                index: frame.index + 1,
                remaining: frame.remaining,
                path_len,
                pending: None,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DecomposeError;
    use std::collections::BTreeSet;

    fn collect_sorted(masses: &[u64], target: u64) -> BTreeSet<Vec<u64>> {
        enumerate_exact(masses, target)
            .unwrap()
            .map(|s| s.masses().to_vec())
            .collect()
    }

    #[test]
    fn finds_all_exact_subsets() {
        let found = collect_sorted(&[1, 2, 3, 4], 5);
        let expected: BTreeSet<Vec<u64>> = [vec![1, 4], vec![2, 3]].into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn every_yield_sums_to_target() {
        for subset in enumerate_exact(&[3, 5, 7, 2, 8, 1], 10).unwrap() {
            assert_eq!(subset.sum(), 10);
        }
    }

    #[test]
    fn rejects_zero_mass_before_search() {
        let err = enumerate_exact(&[1, 0, 3], 4).unwrap_err();
        let typed = err.downcast_ref::<DecomposeError>().unwrap();
        assert!(matches!(typed, DecomposeError::InvalidInput { .. }));
    }

    #[test]
    fn empty_list_zero_target_yields_empty_subset() {
        let found: Vec<_> = enumerate_exact(&[], 0).unwrap().collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_empty());
    }

    #[test]
    fn empty_list_positive_target_yields_nothing() {
        assert_eq!(enumerate_exact(&[], 3).unwrap().count(), 0);
    }

    #[test]
    fn zero_target_yields_only_empty_subset() {
        let found: Vec<_> = enumerate_exact(&[1, 2, 3], 0).unwrap().collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_empty());
    }

    #[test]
    fn duplicate_masses_yield_distinct_uses() {
        // [2, 2] から 2 を作る方法は2通り（どちらの2を使うか）
        let found: Vec<_> = enumerate_exact(&[2, 2], 2).unwrap().collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| s.masses() == [2]));
    }

    #[test]
    fn early_stop_is_cheap() {
        let masses: Vec<u64> = (1..=50).collect();
        let mut iter = enumerate_exact(&masses, 60).unwrap();
        let first = iter.next().unwrap();
        assert_eq!(first.sum(), 60);
        // 取得済みのスナップショットは以降の走査に影響されない
        let before = first.masses().to_vec();
        let _ = iter.next();
        assert_eq!(first.masses(), &before[..]);
    }

    #[test]
    fn rerun_yields_identical_set() {
        let a = collect_sorted(&[5, 3, 8, 1, 2], 9);
        let b = collect_sorted(&[5, 3, 8, 1, 2], 9);
        assert_eq!(a, b);
    }

    #[test]
    fn frames_expanded_counts_work() {
        let mut iter = enumerate_exact(&[1, 2, 3, 4], 5).unwrap();
        assert_eq!(iter.frames_expanded(), 0);
        while iter.next().is_some() {}
        assert!(iter.frames_expanded() > 0);
    }
}
