//! Field catalogs: the declarative contract between the extraction engine
//! and one document template family.
//!
//! A catalog is written as a [`CatalogDef`] (JSON-serializable) and compiled
//! once into a [`FieldCatalog`], which owns the compiled regexes and keeps
//! the declared column order.

mod definition;
mod gem;

pub use definition::{CatalogDef, FieldDef, PartDef, PostProcess, RuleDef};
pub use gem::gem_contract_definition;

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::document::Document;
use crate::error::{CatalogError, GemxError};
use crate::extract::{compile_pattern, find_block, find_field, Extraction};

lazy_static! {
    static ref GEM_CONTRACT: FieldCatalog = FieldCatalog::compile(gem_contract_definition()).unwrap();
}

/// A compiled, ordered set of field rules.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    definition: CatalogDef,
    fields: Vec<CompiledField>,
}

#[derive(Debug, Clone)]
struct CompiledField {
    name: String,
    rule: FieldRule,
}

#[derive(Debug, Clone)]
enum FieldRule {
    Single {
        patterns: Vec<Regex>,
        group: usize,
        default: String,
        post: Vec<PostProcess>,
    },
    Block {
        start: Vec<String>,
        end: Vec<String>,
        post: Vec<PostProcess>,
    },
    Composite {
        parts: Vec<(Option<String>, FieldRule)>,
        separator: String,
    },
    FileName,
}

impl FieldCatalog {
    /// Compile a definition, validating patterns and column names.
    pub fn compile(definition: CatalogDef) -> std::result::Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(definition.fields.len());

        for field in &definition.fields {
            if !seen.insert(field.name.clone()) {
                return Err(CatalogError::DuplicateField(field.name.clone()));
            }
            fields.push(CompiledField {
                name: field.name.clone(),
                rule: FieldRule::compile(&field.name, &field.rule)?,
            });
        }

        Ok(Self { definition, fields })
    }

    /// The built-in GeM contract catalog.
    pub fn gem_contract() -> Self {
        GEM_CONTRACT.clone()
    }

    /// Parse and compile a catalog from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, CatalogError> {
        let definition: CatalogDef = serde_json::from_str(json)?;
        Self::compile(definition)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(GemxError::from)
    }

    /// Serialize the definition back to pretty JSON.
    pub fn to_json(&self) -> std::result::Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.definition)?)
    }

    /// Catalog name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The source definition.
    pub fn definition(&self) -> &CatalogDef {
        &self.definition
    }

    /// Column names in output order.
    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluate every field against `document`, in column order.
    pub(crate) fn evaluate<'a>(
        &'a self,
        document: &'a Document,
    ) -> impl Iterator<Item = (&'a str, Extraction, &'a str)> + 'a {
        let lines = document.lines();
        self.fields.iter().map(move |field| {
            let outcome = field.rule.evaluate(document, &lines);
            (field.name.as_str(), outcome, field.rule.default_value())
        })
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::gem_contract()
    }
}

impl FieldRule {
    fn compile(field: &str, rule: &RuleDef) -> std::result::Result<Self, CatalogError> {
        match rule {
            RuleDef::Single {
                patterns,
                group,
                default,
                multiline,
                post,
            } => {
                if patterns.is_empty() {
                    return Err(CatalogError::NoPatterns(field.to_string()));
                }
                let patterns = patterns
                    .iter()
                    .map(|p| {
                        compile_pattern(p, *multiline).map_err(|source| {
                            CatalogError::InvalidPattern {
                                field: field.to_string(),
                                source,
                            }
                        })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(Self::Single {
                    patterns,
                    group: *group,
                    default: default.clone(),
                    post: post.clone(),
                })
            }
            RuleDef::Block { start, end, post } => {
                if start.iter().all(|label| label.trim().is_empty()) {
                    return Err(CatalogError::EmptyStart(field.to_string()));
                }
                Ok(Self::Block {
                    start: start.clone(),
                    end: end.clone(),
                    post: post.clone(),
                })
            }
            RuleDef::Composite { parts, separator } => {
                let parts = parts
                    .iter()
                    .map(|part| Ok((part.label.clone(), Self::compile(field, &part.rule)?)))
                    .collect::<std::result::Result<Vec<_>, CatalogError>>()?;
                Ok(Self::Composite {
                    parts,
                    separator: separator.clone(),
                })
            }
            RuleDef::FileName => Ok(Self::FileName),
        }
    }

    fn evaluate(&self, document: &Document, lines: &[&str]) -> Extraction {
        match self {
            Self::Single {
                patterns,
                group,
                post,
                ..
            } => {
                let found = patterns
                    .iter()
                    .map(|pattern| find_field(pattern, document.text(), *group))
                    .find(Extraction::is_matched)
                    .unwrap_or(Extraction::NotFound);
                apply_post(found, post)
            }
            Self::Block { start, end, post } => apply_post(find_block(start, end, lines), post),
            Self::Composite { parts, separator } => {
                let mut matched = false;
                let mut values = Vec::new();
                for (label, rule) in parts {
                    match rule.evaluate(document, lines) {
                        Extraction::Found(value) => {
                            matched = true;
                            values.push(match label {
                                Some(label) => format!("{label}\n{value}"),
                                None => value,
                            });
                        }
                        Extraction::Empty => matched = true,
                        Extraction::NotFound => {}
                    }
                }
                if matched {
                    Extraction::from_capture(&values.join(separator))
                } else {
                    Extraction::NotFound
                }
            }
            Self::FileName => Extraction::from_capture(document.file_name()),
        }
    }

    fn default_value(&self) -> &str {
        match self {
            Self::Single { default, .. } => default,
            _ => "",
        }
    }
}

fn apply_post(extraction: Extraction, post: &[PostProcess]) -> Extraction {
    match extraction {
        Extraction::Found(value) if !post.is_empty() => {
            let value = post.iter().fold(value, |value, step| step.apply(&value));
            Extraction::from_capture(&value)
        }
        other => other,
    }
}
