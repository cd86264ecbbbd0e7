// 許容誤差付き部分集合和の列挙

use anyhow::Result;

use crate::domain::decompose::{RealSubset, Tolerance};
use crate::domain::error::DecomposeError;
use crate::domain::mass::RealMassList;
use crate::search::FrameCounter;

/// 実数探索フレーム
#[derive(Clone, Copy, Debug)]
struct RealFrame {
    index: usize,
    remaining: f64,
    path_len: usize,
    pending: Option<f64>,
}

/// 許容誤差列挙の遅延イテレータ
///
/// 厳密列挙と同じ分枝構造で、一致判定を区間所属判定に緩和する。
#[derive(Debug)]
pub struct ToleranceSubsetIter {
    masses: Vec<f64>,
    suffix: Vec<f64>,
    tolerance: f64,
    path: Vec<f64>,
    stack: Vec<RealFrame>,
    frames_expanded: u64,
}

/// 合計が目標値の ±許容誤差 に収まる部分集合を遅延列挙する
pub fn enumerate_tolerant(
    masses: &[f64],
    target: f64,
    tolerance: f64,
) -> Result<ToleranceSubsetIter> {
    let list = RealMassList::new(masses.to_vec())?;
    if !target.is_finite() || target < 0.0 {
        return Err(DecomposeError::invalid_input(format!(
            "目標質量は0以上の有限値である必要があります: {}",
            target
        ))
        .into());
    }
    let tolerance = Tolerance::new(tolerance)?;
    Ok(ToleranceSubsetIter::new(&list, target, tolerance))
}

impl ToleranceSubsetIter {
    pub(crate) fn new(list: &RealMassList, target: f64, tolerance: Tolerance) -> Self {
        let suffix = list.suffix_sums();
        Self {
            masses: list.as_slice().to_vec(),
            suffix,
            tolerance: tolerance.get(),
            path: Vec::new(),
            stack: vec![RealFrame {
                index: 0,
                remaining: target,
                path_len: 0,
                pending: None,
            }],
            frames_expanded: 0,
        }
    }
}

impl FrameCounter for ToleranceSubsetIter {
    fn frames_expanded(&self) -> u64 {
        self.frames_expanded
    }
}

impl Iterator for ToleranceSubsetIter {
    type Item = RealSubset;

    fn next(&mut self) -> Option<RealSubset> {
        while let Some(frame) = self.stack.pop() {
            self.frames_expanded += 1;
            self.path.truncate(frame.path_len);
            if let Some(mass) = frame.pending {
                self.path.push(mass);
            }

            // 許容誤差を超えて目標値を超過した
            if frame.remaining < -self.tolerance {
                continue;
            }

            // 残りの質量すべての和が許容区間に入る
            if (self.suffix[frame.index] - frame.remaining).abs() <= self.tolerance {
                let mut snapshot = self.path.clone();
                snapshot.extend_from_slice(&self.masses[frame.index..]);
                return Some(RealSubset::from_unsorted(snapshot));
            }

            // 質量が尽きた
            if frame.index == self.masses.len() {
                continue;
            }

            let mass = self.masses[frame.index];
            let path_len = self.path.len();

            // LIFOのため「含める」を先に積み、「含めない」から探索される
            self.stack.push(RealFrame {
                index: frame.index + 1,
                remaining: frame.remaining - mass,
                path_len,
                pending: Some(mass),
            });
            self.stack.push(RealFrame {
                index: frame.index + 1,
                remaining: frame.remaining,
                path_len,
                pending: None,
            });
        }
        None
    }
}
