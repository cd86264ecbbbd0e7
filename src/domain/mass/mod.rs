// 質量リストのValue Objects

use serde::{Deserialize, Serialize};

use crate::domain::error::DecomposeError;

/// 整数質量のリスト（厳密・DP経路用）
///
/// 質量が 0 の要素は同一の部分集合を二重に生成するため、
/// 生成時にすべての要素が正であることを検証する。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassList(Vec<u64>);

impl MassList {
    pub fn new(masses: Vec<u64>) -> Result<Self, DecomposeError> {
        if let Some(pos) = masses.iter().position(|&m| m == 0) {
            return Err(DecomposeError::invalid_input(format!(
                "質量は正の値である必要があります (位置 {} が 0)",
                pos
            )));
        }
        Ok(Self(masses))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 接尾辞和を事前計算する (suffix[i] = masses[i..] の総和)
    pub fn suffix_sums(&self) -> Vec<u64> {
        let mut suffix = vec![0u64; self.0.len() + 1];
        for i in (0..self.0.len()).rev() {
            suffix[i] = suffix[i + 1] + self.0[i];
        }
        suffix
    }
}

/// 実数質量のリスト（許容誤差経路用）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealMassList(Vec<f64>);

impl RealMassList {
    pub fn new(masses: Vec<f64>) -> Result<Self, DecomposeError> {
        for (pos, &m) in masses.iter().enumerate() {
            if !m.is_finite() || m <= 0.0 {
                return Err(DecomposeError::invalid_input(format!(
                    "質量は正の有限値である必要があります (位置 {} が {})",
                    pos, m
                )));
            }
        }
        Ok(Self(masses))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 接尾辞和を事前計算する (suffix[i] = masses[i..] の総和)
    pub fn suffix_sums(&self) -> Vec<f64> {
        let mut suffix = vec![0.0f64; self.0.len() + 1];
        for i in (0..self.0.len()).rev() {
            suffix[i] = suffix[i + 1] + self.0[i];
        }
        suffix
    }
}
