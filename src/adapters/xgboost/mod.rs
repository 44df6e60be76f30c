//! XGBoost adapter: Implementation of Classifier over an XGBoost JSON model.
//!
//! This module loads the JSON artifact written by `Booster.save_model("*.json")`
//! and evaluates the tree ensemble natively.
//!
//! # Model format
//!
//! Only the parts needed for prediction are read:
//! - `learner.learner_model_param`: `base_score`, `num_class`, `num_feature`
//! - `learner.objective.name`
//! - `learner.gradient_booster.model.trees` and `tree_info`
//!
//! Within a tree, node `i` is a leaf when `left_children[i] == -1` and its
//! value is `split_conditions[i]`. Internal nodes send a row left when
//! `x < split_condition`; a missing value (NaN) follows `default_left`.
//! Inputs and thresholds are compared in `f32`, as XGBoost does.
//!
//! # Thread Safety
//!
//! The classifier is immutable after loading and can be shared via `Arc`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha256};

use crate::ports::Classifier;

/// Error type for model loading and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact is not valid XGBoost JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported model: {0}")]
    Unsupported(String),

    #[error("Malformed model: {0}")]
    Malformed(String),

    #[error("Feature count mismatch: model expects {expected}, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),
}

#[derive(Debug, Deserialize)]
struct ModelDocument {
    learner: LearnerDocument,
    #[serde(default)]
    version: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct LearnerDocument {
    gradient_booster: BoosterDocument,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveDocument,
    #[serde(default)]
    feature_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BoosterDocument {
    name: String,
    #[serde(default)]
    model: Option<ForestDocument>,
}

#[derive(Debug, Deserialize)]
struct ForestDocument {
    trees: Vec<TreeDocument>,
    tree_info: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct TreeDocument {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    #[serde(deserialize_with = "flags")]
    default_left: Vec<bool>,
    #[serde(default)]
    split_type: Vec<u8>,
}

// Numeric params are serialized as strings ("5E-1", "15").
#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_class: Option<String>,
    num_feature: String,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDocument {
    name: String,
}

/// `default_left` is `[0, 1, ...]` in older exports and `[false, true, ...]` in newer ones.
fn flags<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    let raw = Vec::<Flag>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|f| match f {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        })
        .collect())
}

/// How per-class margins turn into a class code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// `multi:softprob` / `multi:softmax`: argmax over class margins
    Multiclass,
    /// `binary:logistic`: sigmoid(margin) > 0.5
    BinaryLogistic,
    /// `binary:logitraw`: margin > 0
    BinaryLogitRaw,
}

impl Objective {
    fn parse(name: &str) -> Result<Self, ModelError> {
        match name {
            "multi:softprob" | "multi:softmax" => Ok(Self::Multiclass),
            "binary:logistic" => Ok(Self::BinaryLogistic),
            "binary:logitraw" => Ok(Self::BinaryLogitRaw),
            other => Err(ModelError::Unsupported(format!("objective {other}"))),
        }
    }
}

/// One regression tree in flat array form.
#[derive(Debug, Clone)]
struct RegTree {
    left: Vec<i32>,
    right: Vec<i32>,
    split_index: Vec<u32>,
    split_condition: Vec<f32>,
    default_left: Vec<bool>,
}

impl RegTree {
    fn from_document(doc: TreeDocument, num_feature: usize, id: usize) -> Result<Self, ModelError> {
        let n = doc.left_children.len();
        if n == 0 {
            return Err(ModelError::Malformed(format!("tree {id} has no nodes")));
        }
        if doc.right_children.len() != n
            || doc.split_indices.len() != n
            || doc.split_conditions.len() != n
            || doc.default_left.len() != n
        {
            return Err(ModelError::Malformed(format!(
                "tree {id} node arrays have different lengths"
            )));
        }
        if doc.split_type.iter().any(|&t| t != 0) {
            return Err(ModelError::Unsupported(format!(
                "tree {id} uses categorical splits"
            )));
        }

        for node in 0..n {
            let (l, r) = (doc.left_children[node], doc.right_children[node]);
            if l == -1 {
                continue;
            }
            // Children always follow their parent; this also rules out cycles.
            let valid_child = |c: i32| c > node as i32 && (c as usize) < n;
            if !valid_child(l) || !valid_child(r) {
                return Err(ModelError::Malformed(format!(
                    "tree {id} node {node} has invalid children ({l}, {r})"
                )));
            }
            if doc.split_indices[node] as usize >= num_feature {
                return Err(ModelError::Malformed(format!(
                    "tree {id} node {node} splits on feature {} (model has {num_feature})",
                    doc.split_indices[node]
                )));
            }
        }

        Ok(Self {
            left: doc.left_children,
            right: doc.right_children,
            split_index: doc.split_indices,
            split_condition: doc.split_conditions,
            default_left: doc.default_left,
        })
    }

    fn leaf_value(&self, row: &[f32]) -> f32 {
        let mut node = 0usize;
        loop {
            let left = self.left[node];
            if left == -1 {
                return self.split_condition[node];
            }
            let x = row[self.split_index[node] as usize];
            let go_left = if x.is_nan() {
                self.default_left[node]
            } else {
                x < self.split_condition[node]
            };
            node = if go_left {
                left as usize
            } else {
                self.right[node] as usize
            };
        }
    }
}

/// Gradient-boosted tree classifier loaded from an XGBoost JSON model.
#[derive(Debug, Clone)]
pub struct XgbClassifier {
    trees: Vec<RegTree>,
    tree_group: Vec<usize>,
    base_margin: Vec<f32>,
    objective: Objective,
    num_feature: usize,
    feature_names: Vec<String>,
    fingerprint: String,
}

fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn parse_param<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ModelError> {
    raw.trim()
        .parse()
        .map_err(|_| ModelError::Malformed(format!("{name} is not a number: {raw:?}")))
}

/// `base_score` is a scalar ("5E-1") or, since XGBoost 3, a bracketed vector ("[5E-1,5E-1]").
fn parse_base_score(raw: &str, groups: usize) -> Result<Vec<f32>, ModelError> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let values = inner
        .split(',')
        .map(|v| parse_param::<f32>("base_score", v))
        .collect::<Result<Vec<_>, _>>()?;

    match values.len() {
        1 => Ok(vec![values[0]; groups]),
        n if n == groups => Ok(values),
        n => Err(ModelError::Malformed(format!(
            "base_score has {n} entries for {groups} output groups"
        ))),
    }
}

impl XgbClassifier {
    /// Load a model from an XGBoost JSON file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not an XGBoost JSON
    /// model, or uses features this evaluator does not support.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_slice(&bytes)?;

        tracing::info!(
            "Loaded model from {:?} (trees={}, classes={}, n_features={}, sha256={})",
            path,
            model.trees.len(),
            model.num_classes(),
            model.num_feature,
            &model.fingerprint[..16]
        );

        Ok(model)
    }

    /// Parse a model from JSON bytes.
    ///
    /// # Errors
    /// Returns error if the document is not a supported XGBoost JSON model.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let doc: ModelDocument = serde_json::from_slice(bytes)?;
        let fingerprint = sha256_hex_bytes(bytes);
        let learner = doc.learner;

        if !doc.version.is_empty() {
            tracing::debug!("XGBoost model format version {:?}", doc.version);
        }

        if learner.gradient_booster.name != "gbtree" {
            return Err(ModelError::Unsupported(format!(
                "booster {}",
                learner.gradient_booster.name
            )));
        }
        let forest = learner
            .gradient_booster
            .model
            .ok_or_else(|| ModelError::Malformed("gradient_booster.model is missing".into()))?;

        let objective = Objective::parse(&learner.objective.name)?;
        let param = learner.learner_model_param;
        let num_feature: usize = parse_param("num_feature", &param.num_feature)?;
        let num_class: usize = match param.num_class.as_deref() {
            Some(raw) => parse_param("num_class", raw)?,
            None => 0,
        };
        if num_feature == 0 {
            return Err(ModelError::Malformed("num_feature is 0".into()));
        }

        let groups = match objective {
            Objective::Multiclass if num_class < 2 => {
                return Err(ModelError::Malformed(format!(
                    "multiclass objective with num_class={num_class}"
                )))
            }
            Objective::Multiclass => num_class,
            Objective::BinaryLogistic | Objective::BinaryLogitRaw => 1,
        };

        let mut base_margin = parse_base_score(&param.base_score, groups)?;
        if objective == Objective::BinaryLogistic {
            // base_score is a probability; margins live in logit space.
            for b in base_margin.iter_mut() {
                if !(*b > 0.0 && *b < 1.0) {
                    return Err(ModelError::Malformed(format!(
                        "binary:logistic base_score {b} outside (0, 1)"
                    )));
                }
                *b = (*b / (1.0 - *b)).ln();
            }
        }

        if forest.tree_info.len() != forest.trees.len() {
            return Err(ModelError::Malformed(format!(
                "tree_info has {} entries for {} trees",
                forest.tree_info.len(),
                forest.trees.len()
            )));
        }
        if let Some(bad) = forest.tree_info.iter().find(|&&g| g >= groups) {
            return Err(ModelError::Malformed(format!(
                "tree_info references group {bad} (model has {groups})"
            )));
        }

        let trees = forest
            .trees
            .into_iter()
            .enumerate()
            .map(|(id, tree)| RegTree::from_document(tree, num_feature, id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            tree_group: forest.tree_info,
            base_margin,
            objective,
            num_feature,
            feature_names: learner.feature_names,
            fingerprint,
        })
    }

    /// Number of output classes (2 for binary objectives).
    #[must_use]
    pub fn num_classes(&self) -> usize {
        match self.objective {
            Objective::Multiclass => self.base_margin.len(),
            Objective::BinaryLogistic | Objective::BinaryLogitRaw => 2,
        }
    }

    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Feature names stored in the artifact (empty if it was trained without them).
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// SHA-256 of the artifact bytes, hex encoded.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Raw per-group margins for one row.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureMismatch` if the row has the wrong width.
    pub fn margins(&self, row: &[f64]) -> Result<Vec<f32>, ModelError> {
        if row.len() != self.num_feature {
            return Err(ModelError::FeatureMismatch {
                expected: self.num_feature,
                got: row.len(),
            });
        }

        let row: Vec<f32> = row.iter().map(|&x| x as f32).collect();
        let mut margins = self.base_margin.clone();
        for (tree, &group) in self.trees.iter().zip(self.tree_group.iter()) {
            margins[group] += tree.leaf_value(&row);
        }
        Ok(margins)
    }

    fn classify(&self, margins: &[f32]) -> u32 {
        match self.objective {
            Objective::Multiclass => {
                // First maximum wins, like numpy.argmax.
                let mut best = 0usize;
                for (i, &m) in margins.iter().enumerate().skip(1) {
                    if m > margins[best] {
                        best = i;
                    }
                }
                best as u32
            }
            Objective::BinaryLogistic => {
                let p = 1.0 / (1.0 + (-margins[0]).exp());
                u32::from(p > 0.5)
            }
            Objective::BinaryLogitRaw => u32::from(margins[0] > 0.0),
        }
    }
}

impl Classifier for XgbClassifier {
    fn num_features(&self) -> usize {
        self.num_feature
    }

    fn predict_rows(&self, rows: &[&[f64]]) -> Result<Vec<u32>, ModelError> {
        rows.iter()
            .map(|row| self.margins(row).map(|m| self.classify(&m)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(model: &XgbClassifier, row: &[f64]) -> Result<u32, ModelError> {
        model.predict_rows(&[row]).map(|codes| codes[0])
    }

    /// Two features, binary:logistic, one stump on feature 0 (threshold 0.5,
    /// missing goes right) and one stump on feature 1.
    fn binary_model(default_left: &str) -> String {
        format!(
            r#"{{
            "learner": {{
                "feature_names": ["a", "b"],
                "gradient_booster": {{
                    "name": "gbtree",
                    "model": {{
                        "tree_info": [0, 0],
                        "trees": [
                            {{"left_children": [1, -1, -1], "right_children": [2, -1, -1],
                              "split_indices": [0, 0, 0], "split_conditions": [0.5, -2.0, 2.0],
                              "default_left": {default_left}, "split_type": [0, 0, 0]}},
                            {{"left_children": [1, -1, -1], "right_children": [2, -1, -1],
                              "split_indices": [1, 0, 0], "split_conditions": [10.0, 0.25, -0.25],
                              "default_left": [1, 0, 0]}}
                        ]
                    }}
                }},
                "learner_model_param": {{"base_score": "5E-1", "num_class": "0", "num_feature": "2"}},
                "objective": {{"name": "binary:logistic"}}
            }},
            "version": [1, 7, 6]
        }}"#
        )
    }

    fn multiclass_model(base_score: &str) -> String {
        format!(
            r#"{{
            "learner": {{
                "gradient_booster": {{
                    "name": "gbtree",
                    "model": {{
                        "tree_info": [0, 1, 2],
                        "trees": [
                            {{"left_children": [-1], "right_children": [-1], "split_indices": [0],
                              "split_conditions": [0.1], "default_left": [false]}},
                            {{"left_children": [1, -1, -1], "right_children": [2, -1, -1],
                              "split_indices": [0, 0, 0], "split_conditions": [3.0, -1.0, 1.0],
                              "default_left": [false, false, false]}},
                            {{"left_children": [-1], "right_children": [-1], "split_indices": [0],
                              "split_conditions": [0.1], "default_left": [false]}}
                        ]
                    }}
                }},
                "learner_model_param": {{"base_score": "{base_score}", "num_class": "3", "num_feature": "1"}},
                "objective": {{"name": "multi:softprob"}}
            }}
        }}"#
        )
    }

    #[test]
    fn test_binary_prediction() {
        let model = XgbClassifier::from_slice(binary_model("[0, 0, 0]").as_bytes())
            .expect("Model should load");
        assert_eq!(model.num_features(), 2);
        assert_eq!(model.num_classes(), 2);
        assert_eq!(model.feature_names(), &["a".to_string(), "b".to_string()]);

        // a >= 0.5 -> +2.0, b < 10 -> +0.25
        assert_eq!(predict(&model, &[1.0, 3.0]).expect("predict"), 1);
        // a < 0.5 -> -2.0
        assert_eq!(predict(&model, &[0.0, 3.0]).expect("predict"), 0);
    }

    #[test]
    fn test_missing_value_follows_default_direction() {
        let right = XgbClassifier::from_slice(binary_model("[0, 0, 0]").as_bytes())
            .expect("Model should load");
        let left = XgbClassifier::from_slice(binary_model("[true, false, false]").as_bytes())
            .expect("Model should load");

        let row: &[f64] = &[f64::NAN, 3.0];
        assert_eq!(right.predict_rows(&[row]).expect("predict"), vec![1]);
        assert_eq!(left.predict_rows(&[row]).expect("predict"), vec![0]);
    }

    #[test]
    fn test_multiclass_argmax() {
        let model = XgbClassifier::from_slice(multiclass_model("5E-1").as_bytes())
            .expect("Model should load");
        assert_eq!(model.objective(), Objective::Multiclass);
        assert_eq!(model.num_classes(), 3);

        let rows: [&[f64]; 2] = [&[5.0], &[1.0]];
        // class 1 gets +1.0 above the threshold, -1.0 below (then 0 and 2 tie; first wins)
        assert_eq!(model.predict_rows(&rows).expect("predict"), vec![1, 0]);
    }

    #[test]
    fn test_vector_base_score() {
        let model = XgbClassifier::from_slice(multiclass_model("[0E0,0E0,5E0]").as_bytes())
            .expect("Model should load");
        let margins = model.margins(&[5.0]).expect("margins");
        assert_eq!(margins.len(), 3);
        assert_eq!(predict(&model, &[5.0]).expect("predict"), 2);

        let err = XgbClassifier::from_slice(multiclass_model("[1,2]").as_bytes());
        assert!(matches!(err, Err(ModelError::Malformed(_))));
    }

    #[test]
    fn test_row_width_checked() {
        let model = XgbClassifier::from_slice(binary_model("[0, 0, 0]").as_bytes())
            .expect("Model should load");
        let err = predict(&model, &[1.0]);
        assert!(matches!(
            err,
            Err(ModelError::FeatureMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_rejects_cyclic_tree() {
        let doc = binary_model("[0, 0, 0]").replacen(
            r#""left_children": [1, -1, -1]"#,
            r#""left_children": [0, -1, -1]"#,
            1,
        );
        let err = XgbClassifier::from_slice(doc.as_bytes());
        assert!(matches!(err, Err(ModelError::Malformed(_))));
    }

    #[test]
    fn test_rejects_unsupported_objective() {
        let doc = binary_model("[0, 0, 0]").replace("binary:logistic", "reg:squarederror");
        let err = XgbClassifier::from_slice(doc.as_bytes());
        assert!(matches!(err, Err(ModelError::Unsupported(_))));
    }

    #[test]
    fn test_rejects_categorical_splits() {
        let doc = binary_model("[0, 0, 0]").replace(r#""split_type": [0, 0, 0]"#, r#""split_type": [1, 0, 0]"#);
        let err = XgbClassifier::from_slice(doc.as_bytes());
        assert!(matches!(err, Err(ModelError::Unsupported(_))));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = XgbClassifier::load(&dir.path().join("absent.json"));
        assert!(matches!(err, Err(ModelError::Read { .. })));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, b"{not json").expect("write");
        assert!(matches!(
            XgbClassifier::load(&garbage),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let doc = binary_model("[0, 0, 0]");
        let a = XgbClassifier::from_slice(doc.as_bytes()).expect("load");
        let b = XgbClassifier::from_slice(doc.as_bytes()).expect("load");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
