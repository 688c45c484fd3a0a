//! Serializable field catalog definitions.

use serde::{Deserialize, Serialize};

/// A named, ordered list of field definitions.
///
/// Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDef {
    /// Template family this catalog targets.
    pub name: String,

    /// Field definitions in column order.
    pub fields: Vec<FieldDef>,
}

/// One output column and the rule that fills it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Column name.
    pub name: String,

    /// How the value is located.
    pub rule: RuleDef,
}

/// How a field value is located in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDef {
    /// First match of a labeled pattern.
    Single {
        /// Label alternatives, tried in order.
        patterns: Vec<String>,

        /// Capture group holding the value.
        #[serde(default = "default_group")]
        group: usize,

        /// Value used when no pattern matches.
        #[serde(default)]
        default: String,

        /// Let `.` match line breaks for values that wrap.
        #[serde(default)]
        multiline: bool,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        post: Vec<PostProcess>,
    },

    /// Lines between a start label and the first end label.
    Block {
        /// Start label aliases.
        start: Vec<String>,

        /// End labels; the first line containing any of them closes the block.
        #[serde(default)]
        end: Vec<String>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        post: Vec<PostProcess>,
    },

    /// Several rules joined under one column.
    Composite {
        parts: Vec<PartDef>,

        #[serde(default = "default_separator")]
        separator: String,
    },

    /// The source document's file name.
    FileName,
}

/// One part of a composite field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDef {
    /// Heading placed on its own line above a non-empty part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub rule: RuleDef,
}

/// Value cleanup applied after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PostProcess {
    /// Remove `,` digit grouping (`1,23,456` becomes `123456`).
    StripThousands,

    /// Replace line breaks with a delimiter.
    JoinLines { with: String },

    /// Fold internal whitespace runs into a single space.
    CollapseWhitespace,
}

impl PostProcess {
    /// Apply this step to a value.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::StripThousands => value.replace(',', ""),
            Self::JoinLines { with } => value
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(with),
            Self::CollapseWhitespace => value.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

fn default_group() -> usize {
    1
}

fn default_separator() -> String {
    "\n\n".to_string()
}

impl FieldDef {
    pub fn new(name: impl Into<String>, rule: RuleDef) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

impl RuleDef {
    /// Single-value rule with default group, default value and no post steps.
    pub fn single<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Single {
            patterns: patterns.into_iter().map(Into::into).collect(),
            group: default_group(),
            default: String::new(),
            multiline: false,
            post: Vec::new(),
        }
    }

    /// Block rule without post steps.
    pub fn block<I, S, J, T>(start: I, end: J) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Block {
            start: start.into_iter().map(Into::into).collect(),
            end: end.into_iter().map(Into::into).collect(),
            post: Vec::new(),
        }
    }

    /// Append a post-processing step (no-op for composite and file name rules).
    pub fn with_post(mut self, step: PostProcess) -> Self {
        match &mut self {
            Self::Single { post, .. } | Self::Block { post, .. } => post.push(step),
            Self::Composite { .. } | Self::FileName => {}
        }
        self
    }

    /// Enable dot-matches-newline on a single-value rule.
    pub fn multiline(mut self) -> Self {
        if let Self::Single { multiline, .. } = &mut self {
            *multiline = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_post_process() {
        assert_eq!(PostProcess::StripThousands.apply("1,23,456"), "123456");
        assert_eq!(
            PostProcess::JoinLines { with: ", ".into() }.apply("12 MG Road\n  Sector 5\n\nGurgaon"),
            "12 MG Road, Sector 5, Gurgaon"
        );
        assert_eq!(PostProcess::CollapseWhitespace.apply(" LED   Flood\tLight "), "LED Flood Light");
    }

    #[test]
    fn test_rule_json_shape() {
        let field = FieldDef::new(
            "Unit Price",
            RuleDef::single([r"pieces\s+([\d,]+)"]).with_post(PostProcess::StripThousands),
        );
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["rule"]["kind"], "single");
        assert_eq!(json["rule"]["group"], 1);
        assert_eq!(json["rule"]["post"][0]["op"], "strip_thousands");
    }

    #[test]
    fn test_rule_defaults_on_parse() {
        let json = r#"{"name": "Brand", "rule": {"kind": "single", "patterns": ["Brand\\s*:\\s*(.+)"]}}"#;
        let field: FieldDef = serde_json::from_str(json).unwrap();

        assert_eq!(field, FieldDef::new("Brand", RuleDef::single([r"Brand\s*:\s*(.+)"])));
    }

    #[test]
    fn test_file_name_rule_json() {
        let field: FieldDef =
            serde_json::from_str(r#"{"name": "File Name", "rule": {"kind": "file_name"}}"#).unwrap();
        assert_eq!(field.rule, RuleDef::FileName);
    }
}
