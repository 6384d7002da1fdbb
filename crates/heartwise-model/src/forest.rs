//! Random forest of CART decision trees.
//!
//! Trees use the flat array layout of a fitted scikit-learn tree: node `i`
//! is a leaf when `children_left[i] == -1`, otherwise the sample goes left
//! when `x[feature[i]] <= threshold[i]`. Leaf `value` entries are class
//! weights `[w0, w1]` and are normalised into probabilities.

use crate::error::{ModelError, ModelResult};
use heartwise_kernel::{
    ClassProbabilities, Classifier, ClassifierError, FEATURE_COUNT, FeatureRow, Label,
};
use serde::{Deserialize, Serialize};

const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    /// Check the node arrays once so that traversal can index freely.
    ///
    /// Children must point strictly forward, which rules out cycles and
    /// guarantees every walk from the root ends at a leaf.
    pub fn validate(&self) -> ModelResult<()> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(ModelError::Invalid("tree has no nodes".into()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|len| *len != n)
        {
            return Err(ModelError::Invalid(
                "tree node arrays have different lengths".into(),
            ));
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(ModelError::Invalid(format!(
                        "node {i} has exactly one child"
                    )));
                }
                let [w0, w1] = self.value[i];
                if !(w0.is_finite() && w1.is_finite()) || w0 < 0.0 || w1 < 0.0 || w0 + w1 <= 0.0
                {
                    return Err(ModelError::Invalid(format!(
                        "leaf {i} has invalid class weights [{w0}, {w1}]"
                    )));
                }
                continue;
            }
            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(ModelError::Invalid(format!(
                        "node {i} points to invalid child {child}"
                    )));
                }
            }
            let feature = self.feature[i];
            if !(0..FEATURE_COUNT as i64).contains(&feature) {
                return Err(ModelError::Invalid(format!(
                    "node {i} splits on unknown feature index {feature}"
                )));
            }
            if !self.threshold[i].is_finite() {
                return Err(ModelError::Invalid(format!(
                    "node {i} has a non-finite threshold"
                )));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its class distribution.
    pub fn leaf_probabilities(&self, row: &FeatureRow) -> ClassProbabilities {
        let x = row.as_slice();
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let [w0, w1] = self.value[node];
        let total = w0 + w1;
        ClassProbabilities::new(w0 / total, w1 / total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub const KIND: &'static str = "random_forest";

    pub fn new(trees: Vec<DecisionTree>) -> ModelResult<Self> {
        let forest = Self { trees };
        forest.validate()?;
        Ok(forest)
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("random forest has no trees".into()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| match e {
                ModelError::Invalid(msg) => ModelError::Invalid(format!("tree {i}: {msg}")),
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn predict(&self, row: &FeatureRow) -> Result<Label, ClassifierError> {
        Ok(Label::from_probabilities(&self.predict_proba(row)?))
    }

    /// Mean of the per-tree leaf distributions.
    fn predict_proba(&self, row: &FeatureRow) -> Result<ClassProbabilities, ClassifierError> {
        let n = self.trees.len() as f64;
        let positive = self
            .trees
            .iter()
            .map(|tree| tree.leaf_probabilities(row).positive)
            .sum::<f64>()
            / n;
        if !positive.is_finite() {
            return Err(ClassifierError::NonFinite(format!("p1 = {positive}")));
        }
        Ok(ClassProbabilities::from_positive(positive))
    }
}
