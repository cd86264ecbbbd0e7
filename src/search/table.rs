// 到達可能性テーブル（動的計画法）

use anyhow::Result;

use crate::domain::decompose::TableBudget;
use crate::domain::error::DecomposeError;
use crate::domain::mass::MassList;

/// (接頭辞長+1) × (目標値+1) のブール行列
///
/// セル (i, j) は「先頭 i 個の質量の部分集合で和 j が作れる」ことを表す。
/// 構築後は不変で、構築時の (質量リスト, 目標値) の組に固有。
#[derive(Clone, Debug)]
pub struct ReachabilityTable {
    rows: Vec<Vec<bool>>,
    target: u64,
}

impl ReachabilityTable {
    /// 予算チェックの上でテーブルを逐次構築する
    pub fn build(list: &MassList, target: u64, budget: TableBudget) -> Result<Self> {
        check_budget(list.len(), target, budget)?;
        let cols = target as usize + 1;

        let mut rows = Vec::with_capacity(list.len() + 1);
        let mut prev = first_row(cols);
        for &mass in list.as_slice() {
            let next = fill_row(&prev, mass);
            rows.push(std::mem::replace(&mut prev, next));
        }
        rows.push(prev);

        Ok(Self { rows, target })
    }

    pub(crate) fn from_rows(rows: Vec<Vec<bool>>, target: u64) -> Self {
        Self { rows, target }
    }

    /// セル (prefix_len, remaining) が到達可能か
    pub fn is_reachable(&self, prefix_len: usize, remaining: u64) -> bool {
        self.rows[prefix_len][remaining as usize]
    }

    /// 行数（接頭辞長 + 1）
    pub fn prefix_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn target(&self) -> u64 {
        self.target
    }
}

/// セル数が予算内に収まるか検証する（確保前に実施）
pub(crate) fn check_budget(
    list_len: usize,
    target: u64,
    budget: TableBudget,
) -> Result<(), DecomposeError> {
    let rows = list_len as u64 + 1;
    let cols = u128::from(target) + 1;
    let cells = u128::from(rows) * cols;
    if cells > u128::from(budget.get()) {
        return Err(DecomposeError::TableBudgetExceeded {
            rows,
            cols: target.saturating_add(1),
            budget: budget.get(),
        });
    }
    Ok(())
}

/// 先頭行: 空の接頭辞で作れる和は 0 のみ
pub(crate) fn first_row(cols: usize) -> Vec<bool> {
    let mut row = vec![false; cols];
    row[0] = true;
    row
}

/// 前の行から次の行全体を導出する
pub(crate) fn fill_row(prev: &[bool], mass: u64) -> Vec<bool> {
    fill_row_range(prev, mass, 0, prev.len())
}

/// 前の行から次の行の列範囲 [start, end) を導出する
///
/// 行内のセルは互いに依存しないため、範囲ごとに独立して計算できる。
pub(crate) fn fill_row_range(prev: &[bool], mass: u64, start: usize, end: usize) -> Vec<bool> {
    let mut cells = vec![false; end - start];
    for (offset, cell) in cells.iter_mut().enumerate() {
        let j = start + offset;
        let with_mass = (j as u64) >= mass && prev[j - mass as usize];
        *cell = prev[j] || with_mass;
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(masses: &[u64], target: u64) -> ReachabilityTable {
        let list = MassList::new(masses.to_vec()).unwrap();
        ReachabilityTable::build(&list, target, TableBudget::default()).unwrap()
    }

    #[test]
    fn column_zero_is_always_reachable() {
        let t = table(&[1, 2, 3], 6);
        for i in 0..t.prefix_rows() {
            assert!(t.is_reachable(i, 0));
        }
    }

    #[test]
    fn empty_prefix_reaches_nothing_positive() {
        let t = table(&[1, 2, 3], 6);
        for j in 1..=6 {
            assert!(!t.is_reachable(0, j));
        }
    }

    #[test]
    fn recurrence_matches_known_sums() {
        let t = table(&[3, 34, 4, 12, 5, 2], 9);
        // 4 + 5 = 9 は先頭5要素で到達可能
        assert!(t.is_reachable(5, 9));
        assert!(t.is_reachable(6, 9));
        // 先頭2要素 {3, 34} では 9 は作れない
        assert!(!t.is_reachable(2, 9));
    }

    #[test]
    fn unreachable_target_stays_false() {
        let t = table(&[2, 4, 6], 5);
        assert!(!t.is_reachable(3, 5));
    }

    #[test]
    fn zero_target_builds_single_column() {
        let t = table(&[1, 2, 3], 0);
        assert_eq!(t.prefix_rows(), 4);
        for i in 0..4 {
            assert!(t.is_reachable(i, 0));
        }
    }

    #[test]
    fn budget_is_checked_before_allocation() {
        let list = MassList::new(vec![1, 2, 3]).unwrap();
        let budget = TableBudget::new(10).unwrap();
        let err = ReachabilityTable::build(&list, 100, budget).unwrap_err();
        let typed = err.downcast_ref::<DecomposeError>().unwrap();
        assert!(matches!(
            typed,
            DecomposeError::TableBudgetExceeded {
                rows: 4,
                cols: 101,
                budget: 10
            }
        ));
    }

    #[test]
    fn huge_target_rejected_without_overflow() {
        let list = MassList::new(vec![1]).unwrap();
        let err = ReachabilityTable::build(&list, u64::MAX, TableBudget::default());
        assert!(err.is_err());
    }

    #[test]
    fn fill_row_range_agrees_with_full_row() {
        let prev = first_row(11);
        let full = fill_row(&prev, 4);
        let left = fill_row_range(&prev, 4, 0, 5);
        let right = fill_row_range(&prev, 4, 5, 11);
        assert_eq!(&full[0..5], &left[..]);
        assert_eq!(&full[5..11], &right[..]);
    }
}
