//! Gradient-boosted tree ensemble read from an XGBoost-style JSON dump

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{DomainError, Regressor};
use crate::domain::pipeline::feature_names;

/// XGBoost's default global bias when the dump does not carry one
const DEFAULT_BASE_SCORE: f64 = 0.5;

fn default_base_score() -> f64 {
    DEFAULT_BASE_SCORE
}

/// On-disk model layout
#[derive(Debug, Deserialize)]
struct ModelDump {
    #[serde(default = "default_base_score")]
    base_score: f64,
    #[serde(default)]
    num_features: Option<usize>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    trees: Vec<DumpNode>,
}

/// One node of `get_dump(dump_format="json")` output
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DumpNode {
    Split {
        nodeid: u32,
        split: String,
        split_condition: f64,
        yes: u32,
        no: u32,
        #[serde(default)]
        missing: Option<u32>,
        children: Vec<DumpNode>,
    },
    Leaf {
        nodeid: u32,
        leaf: f64,
    },
}

impl DumpNode {
    fn id(&self) -> u32 {
        match self {
            Self::Split { nodeid, .. } | Self::Leaf { nodeid, .. } => *nodeid,
        }
    }
}

/// Arena node with child links resolved to indices.
///
/// Thresholds are single precision and compared against the feature cast
/// to `f32`, so a value sitting on a split point branches like XGBoost.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Flatten a nested dump into an arena rooted at index 0
    fn compile(root: &DumpNode, names: &[String]) -> Result<Self, String> {
        let mut flat: Vec<&DumpNode> = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            flat.push(node);

            if let DumpNode::Split { children, .. } = node {
                stack.extend(children.iter().rev());
            }
        }

        let mut index_of: HashMap<u32, usize> = HashMap::with_capacity(flat.len());
        for (idx, node) in flat.iter().enumerate() {
            if index_of.insert(node.id(), idx).is_some() {
                return Err(format!("duplicate node id {}", node.id()));
            }
        }

        let resolve = |id: u32| {
            index_of
                .get(&id)
                .copied()
                .ok_or_else(|| format!("reference to unknown node id {}", id))
        };

        let nodes = flat
            .iter()
            .map(|node| match node {
                DumpNode::Leaf { leaf, .. } => Ok(Node::Leaf(*leaf)),
                DumpNode::Split {
                    split,
                    split_condition,
                    yes,
                    no,
                    missing,
                    children,
                    ..
                } => {
                    if children.len() != 2 {
                        return Err(format!(
                            "split node {} has {} children",
                            node.id(),
                            children.len()
                        ));
                    }

                    Ok(Node::Split {
                        feature: resolve_feature(split, names)?,
                        threshold: *split_condition as f32,
                        yes: resolve(*yes)?,
                        no: resolve(*no)?,
                        missing: resolve(missing.unwrap_or(*yes))?,
                    })
                }
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self { nodes })
    }

    fn evaluate(&self, features: &[f64]) -> Result<f64, DomainError> {
        let mut idx = 0;

        // A well-formed tree reaches a leaf in fewer steps than it has nodes
        for _ in 0..=self.nodes.len() {
            match &self.nodes[idx] {
                Node::Leaf(value) => return Ok(*value),
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        DomainError::prediction(format!(
                            "Feature index {} out of range for {} features",
                            feature,
                            features.len()
                        ))
                    })?;

                    idx = if value.is_nan() {
                        *missing
                    } else if (value as f32) < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
            }
        }

        Err(DomainError::prediction("Tree traversal did not terminate"))
    }
}

/// `f<idx>` or a named feature
fn resolve_feature(split: &str, names: &[String]) -> Result<usize, String> {
    if let Some(pos) = names.iter().position(|n| n == split) {
        return Ok(pos);
    }

    split
        .strip_prefix('f')
        .and_then(|idx| idx.parse::<usize>().ok())
        .ok_or_else(|| format!("unknown split feature '{}'", split))
}

/// Sum-of-trees regressor
#[derive(Debug, Clone)]
pub struct TreeEnsembleRegressor {
    base_score: f64,
    num_features: Option<usize>,
    trees: Vec<Tree>,
}

impl TreeEnsembleRegressor {
    /// Parse and compile a JSON model dump
    pub fn from_json(bytes: &[u8]) -> Result<Self, DomainError> {
        let dump: ModelDump = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::resource_load(format!("Invalid regressor JSON: {}", e)))?;

        if dump.trees.is_empty() {
            return Err(DomainError::resource_load("Regressor has no trees"));
        }

        let names: Vec<String> = dump
            .feature_names
            .clone()
            .unwrap_or_else(|| feature_names().into_iter().map(String::from).collect());

        let trees = dump
            .trees
            .iter()
            .enumerate()
            .map(|(i, root)| {
                Tree::compile(root, &names)
                    .map_err(|e| DomainError::resource_load(format!("Tree {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let num_features = dump
            .num_features
            .or(dump.feature_names.as_ref().map(Vec::len));

        Ok(Self {
            base_score: dump.base_score,
            num_features,
            trees,
        })
    }

    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for TreeEnsembleRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64, DomainError> {
        self.trees.iter().try_fold(self.base_score, |acc, tree| {
            Ok(acc + tree.evaluate(features)?)
        })
    }

    fn num_features(&self) -> Option<usize> {
        self.num_features
    }

    fn describe(&self) -> String {
        format!(
            "gradient-boosted tree ensemble ({} trees, base score {})",
            self.trees.len(),
            self.base_score
        )
    }
}
