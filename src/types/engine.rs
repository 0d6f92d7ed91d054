use std::path::Path;

use serde::{Deserialize, Serialize};

use super::catalog::AttributeCatalog;
use super::error::LimitError;
use super::record::Record;
use super::tree::Tree;
use crate::serial::FormatError;
use crate::RuleEngineError;

/// Limits and checks applied by an [`Engine`].
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration:
///
/// ```
/// use ruletree::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{"max_nested_depth": 4}"#).unwrap();
/// assert_eq!(config.max_nested_depth, 4);
/// assert_eq!(config.max_rule_length, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest accepted rule string, in characters.
    pub max_rule_length: usize,
    /// Deepest accepted tree, counting a single comparison as depth 1.
    pub max_nested_depth: usize,
    /// Most trees accepted by one combine call.
    pub max_combined_rules: usize,
    /// Run [`validate_rule_string`](crate::validate::validate_rule_string)
    /// before parsing.
    pub validate_syntax: bool,
    /// When set, record attributes referenced by a rule are type-checked
    /// before evaluation.
    pub attributes: Option<AttributeCatalog>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rule_length: 1000,
            max_nested_depth: 10,
            max_combined_rules: 50,
            validate_syntax: true,
            attributes: None,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON object. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RuleEngineError`] on I/O or decoding failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RuleEngineError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }
}

/// Builder for constructing an [`Engine`].
///
/// # Example
///
/// ```
/// use ruletree::{AttributeCatalog, EngineBuilder, Record};
///
/// let engine = EngineBuilder::new()
///     .max_nested_depth(5)
///     .attributes(AttributeCatalog::default())
///     .build();
///
/// let tree = engine.compile("age > 30 AND department = 'sales'").unwrap();
/// let record = Record::new().set("age", 42).set("department", "sales");
/// assert!(engine.evaluate(&tree, &record).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn max_rule_length(mut self, max: usize) -> Self {
        self.config.max_rule_length = max;
        self
    }

    #[must_use]
    pub fn max_nested_depth(mut self, max: usize) -> Self {
        self.config.max_nested_depth = max;
        self
    }

    #[must_use]
    pub fn max_combined_rules(mut self, max: usize) -> Self {
        self.config.max_combined_rules = max;
        self
    }

    /// Toggle the pre-parse syntax screen.
    #[must_use]
    pub fn validate_syntax(mut self, enabled: bool) -> Self {
        self.config.validate_syntax = enabled;
        self
    }

    /// Type-check record attributes against this catalog before evaluation.
    #[must_use]
    pub fn attributes(mut self, catalog: AttributeCatalog) -> Self {
        self.config.attributes = Some(catalog);
        self
    }

    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            config: self.config,
        }
    }
}

/// The result of [`Engine::combine`]: the merged tree alongside the inputs
/// and the strategy token that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub combined: Tree,
    pub inputs: Vec<Tree>,
    pub strategy: String,
}

/// Parses, evaluates and combines rules under a fixed [`EngineConfig`].
///
/// Immutable and thread-safe; share it behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Turn a rule string into a tree, enforcing the length limit, the optional
    /// syntax screen and the depth limit.
    ///
    /// # Errors
    ///
    /// Returns [`RuleEngineError`] if a limit is exceeded or the text does not
    /// validate or parse.
    pub fn compile(&self, text: &str) -> Result<Tree, RuleEngineError> {
        let length = text.chars().count();
        if length > self.config.max_rule_length {
            tracing::warn!(length, max = self.config.max_rule_length, "rule string too long");
            return Err(LimitError::RuleTooLong {
                length,
                max: self.config.max_rule_length,
            }
            .into());
        }
        if self.config.validate_syntax {
            crate::validate::validate_rule_string(text)?;
        }
        let tree = crate::parse::parse(text)?;
        self.check_depth(&tree)?;
        Ok(tree)
    }

    /// Compile a rule string straight to its nested-map form.
    ///
    /// # Errors
    ///
    /// See [`compile()`](Self::compile).
    pub fn compile_to_value(&self, text: &str) -> Result<serde_json::Value, RuleEngineError> {
        Ok(self.compile(text)?.to_value()?)
    }

    /// Read a rule string from a file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`RuleEngineError`] on I/O failure or any
    /// [`compile()`](Self::compile) failure.
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<Tree, RuleEngineError> {
        let text = std::fs::read_to_string(path)?;
        self.compile(text.trim_end())
    }

    /// Evaluate a tree against a record. With an attribute catalog configured,
    /// every record attribute the tree references is type-checked first.
    ///
    /// # Errors
    ///
    /// Returns [`RuleEngineError`] if an attribute fails the catalog or
    /// evaluation fails.
    pub fn evaluate(&self, tree: &Tree, record: &Record) -> Result<bool, RuleEngineError> {
        if let Some(catalog) = &self.config.attributes {
            for name in tree.fields() {
                if let Some(value) = record.get(name) {
                    catalog.validate(name, value)?;
                }
            }
        }
        Ok(crate::evaluate::evaluate(tree, record)?)
    }

    /// Rehydrate a tree from its nested-map form and evaluate it.
    ///
    /// # Errors
    ///
    /// Returns [`RuleEngineError`] if the value does not describe a tree or
    /// [`evaluate()`](Self::evaluate) fails.
    pub fn evaluate_value(
        &self,
        value: &serde_json::Value,
        record: &Record,
    ) -> Result<bool, RuleEngineError> {
        let tree = Tree::from_value(value.clone())?;
        self.evaluate(&tree, record)
    }

    /// Merge trees under a strategy token, enforcing the combined-rules limit.
    ///
    /// # Errors
    ///
    /// Returns [`RuleEngineError`] if too many trees are given or combination
    /// fails.
    pub fn combine(&self, trees: Vec<Tree>, strategy: &str) -> Result<Combination, RuleEngineError> {
        let count = trees.len();
        if count > self.config.max_combined_rules {
            tracing::warn!(count, max = self.config.max_combined_rules, "too many rules to combine");
            return Err(LimitError::TooManyRules {
                count,
                max: self.config.max_combined_rules,
            }
            .into());
        }
        let combined = crate::combine::combine(trees.clone(), strategy)?;
        Ok(Combination {
            combined,
            inputs: trees,
            strategy: strategy.to_owned(),
        })
    }

    /// Rehydrate each nested-map tree, then [`combine()`](Self::combine) them.
    ///
    /// # Errors
    ///
    /// Returns [`RuleEngineError`] if any value does not describe a tree or
    /// combination fails.
    pub fn combine_values(
        &self,
        values: &[serde_json::Value],
        strategy: &str,
    ) -> Result<Combination, RuleEngineError> {
        let trees = values
            .iter()
            .map(|v| Tree::from_value(v.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        self.combine(trees, strategy)
    }

    /// See [`simplify`](crate::simplify).
    #[must_use]
    pub fn simplify(&self, tree: Tree) -> Tree {
        crate::combine::simplify(tree)
    }

    fn check_depth(&self, tree: &Tree) -> Result<(), LimitError> {
        let depth = tree.depth();
        if depth > self.config.max_nested_depth {
            tracing::warn!(depth, max = self.config.max_nested_depth, "rule nested too deeply");
            return Err(LimitError::TooDeep {
                depth,
                max: self.config.max_nested_depth,
            });
        }
        Ok(())
    }
}
