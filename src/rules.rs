//! # Rule Parser
//!
//! Turns a field annotation such as `"paramname=login,required,min=10"` into an
//! ordered [`RuleSet`].
//!
//! ## Grammar
//!
//! ```text
//! annotation := token ("," token)*
//! token      := name | name "=" argument
//! ```
//!
//! Tokens are split on the first `=`, so `default=a=b` has the argument `a=b`.
//! Empty tokens are dropped. Unknown names are kept as [`Rule::Other`] and
//! ignored by the generators, which leaves room for new rules without breaking
//! older annotations.

use std::fmt;

/// Input key placeholder meaning "do not bind this field"
pub const SKIP_BINDING: &str = "-";

/// One recognised (or unknown) rule name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `default=<value>`: assign when the field holds its zero value
    Default,
    /// `required`: fail when the field still holds its zero value
    Required,
    /// `min=<n>`: lower bound on the value (ints) or length (strings)
    Min,
    /// `max=<n>`: upper bound on the value (ints) or length (strings)
    Max,
    /// `enum=a|b|c`: allowed values
    Enum,
    /// `paramname=<key>`: input key used by `bind`
    ParamName,
    /// Anything else, kept verbatim
    Other(String),
}

impl Rule {
    /// Map a token name to a rule
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" => Rule::Default,
            "required" => Rule::Required,
            "min" => Rule::Min,
            "max" => Rule::Max,
            "enum" => Rule::Enum,
            "paramname" => Rule::ParamName,
            other => Rule::Other(other.to_string()),
        }
    }

    /// Name as written in annotations
    pub fn name(&self) -> &str {
        match self {
            Rule::Default => "default",
            Rule::Required => "required",
            Rule::Min => "min",
            Rule::Max => "max",
            Rule::Enum => "enum",
            Rule::ParamName => "paramname",
            Rule::Other(name) => name,
        }
    }

    /// Whether downstream generators understand this rule
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Rule::Other(_))
    }
}

/// Order in which `validate` applies rules to one field.
///
/// `default` comes first so that `required` sees the defaulted value.
pub const VALIDATION_ORDER: [Rule; 5] = [
    Rule::Default,
    Rule::Required,
    Rule::Min,
    Rule::Max,
    Rule::Enum,
];

/// A validation rule present on a field, with its argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationStep<'a> {
    pub rule: Rule,
    pub argument: Option<&'a str>,
}

/// Ordered rule name → optional argument mapping parsed from one annotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<(Rule, Option<String>)>,
}

impl RuleSet {
    /// Parse an annotation string. Never fails.
    pub fn parse(annotation: &str) -> Self {
        let mut rules = RuleSet::default();
        for token in annotation.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (name, argument) = match token.split_once('=') {
                Some((name, argument)) => (name.trim(), Some(argument.trim().to_string())),
                None => (token, None),
            };
            rules.insert(Rule::from_name(name), argument);
        }
        rules
    }

    /// Insert a rule; a repeated rule keeps its position and takes the new argument.
    pub fn insert(&mut self, rule: Rule, argument: Option<String>) {
        match self.entries.iter_mut().find(|(r, _)| *r == rule) {
            Some(entry) => entry.1 = argument,
            None => self.entries.push((rule, argument)),
        }
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.entries.iter().any(|(r, _)| r == rule)
    }

    /// Argument of a rule; `None` when the rule is absent or has no argument
    pub fn argument(&self, rule: &Rule) -> Option<&str> {
        self.entries
            .iter()
            .find(|(r, _)| r == rule)
            .and_then(|(_, arg)| arg.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rule, Option<&str>)> {
        self.entries.iter().map(|(r, a)| (r, a.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Input key for `bind`, or `None` when the field is marked `paramname=-`.
    ///
    /// Without a (non-empty) `paramname` the key is the lower-cased field name.
    pub fn bind_key(&self, field: &str) -> Option<String> {
        match self.argument(&Rule::ParamName) {
            Some(SKIP_BINDING) => None,
            Some(name) if !name.is_empty() => Some(name.to_lowercase()),
            _ => Some(field.to_lowercase()),
        }
    }

    /// Validation rules present in this set, in [`VALIDATION_ORDER`]
    pub fn validation_steps(&self) -> Vec<ValidationStep<'_>> {
        VALIDATION_ORDER
            .iter()
            .filter(|rule| self.contains(rule))
            .map(|rule| ValidationStep {
                rule: rule.clone(),
                argument: self.argument(rule),
            })
            .collect()
    }
}

/// Canonical form: recognised rules only, annotation order, comma-joined
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (rule, argument) in self.entries.iter().filter(|(r, _)| r.is_recognized()) {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            match argument {
                Some(arg) => write!(f, "{}={}", rule.name(), arg)?,
                None => f.write_str(rule.name())?,
            }
        }
        Ok(())
    }
}
