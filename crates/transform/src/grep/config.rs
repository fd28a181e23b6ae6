//! Grep filter configuration
//!
//! Options come either as a single-condition shorthand (`field`,
//! `operator`, `value` at the top level) or as a `[[conditions]]` array.
//! Both forms may be combined; the shorthand condition goes first.

use regex::Regex;

use crate::registry::FilterOptions;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

/// Fate of records whose conditions hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrepAction {
    /// Matching records are removed from the stream
    #[default]
    Drop,
    /// Only matching records pass
    Keep,
}

/// How condition results combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Every condition holds
    #[default]
    All,
    /// At least one condition holds
    Any,
}

/// Test applied to one record field
#[derive(Debug, Clone)]
pub enum Operator {
    Eq,
    Ne,
    Contains,
    StartsWith,
    EndsWith,
    Regex(Regex),
    /// Field is present, any value
    Exists,
    /// Numeric comparisons; non-numeric fields never match
    Gt,
    Lt,
    Gte,
    Lte,
}

impl Operator {
    /// Parse an operator name; `regex` compiles `value`
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, String> {
        Ok(match name {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "contains" => Self::Contains,
            "starts_with" => Self::StartsWith,
            "ends_with" => Self::EndsWith,
            "exists" => Self::Exists,
            "gt" => Self::Gt,
            "lt" => Self::Lt,
            "gte" => Self::Gte,
            "lte" => Self::Lte,
            "regex" => Self::Regex(compile(value.ok_or("regex operator needs a value")?)?),
            other => return Err(format!("unknown operator: {other}")),
        })
    }

    /// Whether the operator compares against a value
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::Exists)
    }
}

fn compile(pattern: &str) -> Result<Regex, String> {
    Regex::new(pattern).map_err(|e| format!("invalid regex '{pattern}': {e}"))
}

/// One field test
#[derive(Debug, Clone)]
pub struct Condition {
    /// Dotted path into the record (`user.email`)
    pub field: String,
    pub operator: Operator,
    /// Expected value in text form; `None` only for `Exists`
    pub value: Option<String>,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: Option<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    fn with_value(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::new(field, operator, Some(value.into()))
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(field, Operator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(field, Operator::Ne, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(field, Operator::Contains, value)
    }

    pub fn starts_with(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(field, Operator::StartsWith, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(field, Operator::Gt, value)
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::new(field, Operator::Exists, None)
    }

    /// Regex condition; fails on an invalid pattern
    pub fn regex(field: impl Into<String>, pattern: &str) -> Result<Self, String> {
        Ok(Self::with_value(field, Operator::Regex(compile(pattern)?), pattern))
    }

    fn check(&self, index: usize) -> Result<(), String> {
        if self.field.is_empty() {
            return Err(format!("condition {index} has empty field"));
        }
        if self.operator.takes_value() && self.value.is_none() {
            return Err(format!("condition {index} requires a value for {:?}", self.operator));
        }
        Ok(())
    }

    /// Build from a table holding `operator` (default `eq`) and `value`
    fn from_table(table: &toml::Table, field: &str) -> Result<Self, String> {
        let value = table.get("value").map(scalar_text).transpose()?;
        let name = table.get("operator").and_then(toml::Value::as_str).unwrap_or("eq");
        let operator = Operator::parse(name, value.as_deref())?;
        Ok(Self::new(field, operator, value))
    }
}

/// Scalars compare by their text form
fn scalar_text(value: &toml::Value) -> Result<String, String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        other => Err(format!("condition value must be a scalar, got {}", other.type_str())),
    }
}

/// Grep filter settings
#[derive(Debug, Clone, Default)]
pub struct GrepConfig {
    pub action: GrepAction,
    pub match_mode: MatchMode,
    pub conditions: Vec<Condition>,
}

impl GrepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: GrepAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// At least one condition, each with a field and, unless `exists`, a value
    pub fn validate(&self) -> Result<(), String> {
        if self.conditions.is_empty() {
            return Err("at least one condition is required".to_string());
        }
        self.conditions
            .iter()
            .enumerate()
            .try_for_each(|(index, condition)| condition.check(index))
    }
}

impl TryFrom<&FilterOptions> for GrepConfig {
    type Error = String;

    fn try_from(options: &FilterOptions) -> Result<Self, Self::Error> {
        let text = |key: &str| options.get(key).and_then(toml::Value::as_str);
        let mut config = GrepConfig::default();

        match text("action") {
            None | Some("drop") => {}
            Some("keep") => config.action = GrepAction::Keep,
            Some(other) => return Err(format!("unknown action: {other}")),
        }

        match text("match") {
            None | Some("all") => {}
            Some("any") => config.match_mode = MatchMode::Any,
            Some(other) => return Err(format!("unknown match mode: {other}")),
        }

        if let Some(field) = text("field") {
            config.conditions.push(Condition::from_table(options, field)?);
        }

        if let Some(conditions) = options.get("conditions") {
            let list = conditions.as_array().ok_or("'conditions' must be an array")?;
            for entry in list {
                let table = entry.as_table().ok_or("each condition must be a table")?;
                let field = table
                    .get("field")
                    .and_then(toml::Value::as_str)
                    .ok_or("condition requires 'field'")?;
                config.conditions.push(Condition::from_table(table, field)?);
            }
        }

        config.validate()?;
        Ok(config)
    }
}
