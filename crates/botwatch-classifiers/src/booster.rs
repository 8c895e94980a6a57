//! Gradient-boosted tree ensemble (softprob layout)
//!
//! Each boosting round contributes one regression tree per class. A class's
//! margin is the base score plus the leaves its trees land on; margins are
//! turned into a distribution with softmax.

use crate::classifier::ProbabilisticClassifier;
use crate::model_loader::{BoosterArtifact, NodeArtifact};
use botwatch_core::{Error, FeatureVector, ProbabilityVector, Result, NUM_CLASSES};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f32),
}

/// Single regression tree.
///
/// Children always have a larger id than their parent, so traversal from
/// the root terminates in at most `nodes.len()` steps.
#[derive(Debug, Clone)]
struct Tree {
    class: usize,
    nodes: Vec<Node>,
}

impl Tree {
    fn from_artifact(
        tree_index: usize,
        class: usize,
        mut nodes: Vec<NodeArtifact>,
        num_features: usize,
    ) -> Result<Self> {
        if class >= NUM_CLASSES {
            return Err(Error::artifact(format!(
                "tree {tree_index} targets class {class}, model has {NUM_CLASSES}"
            )));
        }
        if nodes.is_empty() {
            return Err(Error::artifact(format!("tree {tree_index} has no nodes")));
        }

        nodes.sort_by_key(NodeArtifact::id);
        let count = nodes.len();

        let mut out = Vec::with_capacity(count);
        for (position, node) in nodes.into_iter().enumerate() {
            if node.id() != position {
                return Err(Error::artifact(format!(
                    "tree {tree_index}: node ids must be 0..{count}, found {}",
                    node.id()
                )));
            }

            let node = match node {
                NodeArtifact::Leaf { leaf, .. } => Node::Leaf(leaf),
                NodeArtifact::Split {
                    id,
                    split,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    if split >= num_features {
                        return Err(Error::artifact(format!(
                            "tree {tree_index} node {id}: split feature {split} out of range ({num_features} features)"
                        )));
                    }
                    let missing = missing.unwrap_or(yes);
                    for child in [yes, no, missing] {
                        if child <= id || child >= count {
                            return Err(Error::artifact(format!(
                                "tree {tree_index} node {id}: invalid child id {child}"
                            )));
                        }
                    }
                    Node::Split {
                        feature: split,
                        threshold,
                        yes,
                        no,
                        missing,
                    }
                }
            };
            out.push(node);
        }

        Ok(Self { class, nodes: out })
    }

    fn leaf_value(&self, features: &FeatureVector, missing_zero: bool) -> f32 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let value = if missing_zero {
                        features.get(feature)
                    } else {
                        Some(features.value(feature))
                    };
                    id = match value {
                        None => missing,
                        Some(v) if v < threshold => yes,
                        Some(_) => no,
                    };
                }
            }
        }
    }
}

/// Fitted multiclass gradient-boosted tree classifier
#[derive(Debug, Clone)]
pub struct GradientBoostedTrees {
    num_features: usize,
    base_score: f32,
    missing_zero: bool,
    trees: Vec<Tree>,
}

impl GradientBoostedTrees {
    /// Build and validate from a deserialized artifact
    pub fn from_artifact(artifact: BoosterArtifact) -> Result<Self> {
        if artifact.num_class != NUM_CLASSES {
            return Err(Error::artifact(format!(
                "model has {} classes, expected {NUM_CLASSES}",
                artifact.num_class
            )));
        }
        if artifact.trees.is_empty() {
            return Err(Error::classifier_unavailable("model contains no trees"));
        }

        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| Tree::from_artifact(i, tree.class, tree.nodes, artifact.num_features))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            num_features: artifact.num_features,
            base_score: artifact.base_score,
            missing_zero: artifact.missing_zero,
            trees,
        })
    }

    /// Total number of trees across all classes
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Raw per-class margins before softmax
    pub fn margins(&self, features: &FeatureVector) -> Result<[f32; NUM_CLASSES]> {
        if self.trees.is_empty() {
            return Err(Error::classifier_unavailable("no trees loaded"));
        }
        if features.dim() != self.num_features {
            return Err(Error::FeatureDimensionMismatch {
                expected: self.num_features,
                actual: features.dim(),
            });
        }

        let mut margins = [self.base_score; NUM_CLASSES];
        for tree in &self.trees {
            margins[tree.class] += tree.leaf_value(features, self.missing_zero);
        }
        Ok(margins)
    }
}

impl ProbabilisticClassifier for GradientBoostedTrees {
    fn predict_probabilities(&self, features: &FeatureVector) -> Result<ProbabilityVector> {
        let margins = self.margins(features)?;
        ProbabilityVector::new(softmax(&margins))
    }

    fn num_features(&self) -> usize {
        self.num_features
    }

    fn name(&self) -> &str {
        "gradient-boosted-trees"
    }
}

/// Numerically stable softmax, accumulated in f64
pub fn softmax(margins: &[f32; NUM_CLASSES]) -> [f32; NUM_CLASSES] {
    let max = margins
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max) as f64;

    let exps = margins.map(|m| (m as f64 - max).exp());
    let total: f64 = exps.iter().sum();
    exps.map(|e| (e / total) as f32)
}
