//! Field rule sets.
//!
//! Rules are declared per field (normally through the [`model!`](crate::model)
//! macro) as `name = value` pairs or bare flags, and compiled once per type
//! into a typed [`FieldRules`]. Compilation rejects unknown rule names,
//! malformed numbers and regexes, unknown formats and malformed `when` rules.
//!
//! | Rule | Parameter |
//! |---|---|
//! | `name` | wire name of the field (defaults to the field ident) |
//! | `required`, `ignore` | flags |
//! | `binding` | `required` or `ignore` |
//! | `enum`, `enums` | comma-separated literal set |
//! | `when` | conditional rule, see [`WhenRule`] |
//! | `min`, `max` | length for text and sequences, value for numbers |
//! | `gt`, `ge`, `lt`, `le`, `multiple_of` | number |
//! | `allow_inf_nan`, `pass_empty` | flags |
//! | `max_digits`, `decimal_places` | non-negative integer |
//! | `regex` | pattern matched against the whole value |
//! | `format` | a [`Format`] name |
//! | `validate` | comma-separated custom validator tags |

mod when;

pub use when::{Clause, Op, WhenRule};

use regex::Regex;

use crate::constraint::Format;
use crate::error::AnnotationError;

/// Presence rule of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Optional,
    /// The field must not be zero-valued.
    Required,
    /// The field must stay zero-valued; clients may not set it.
    Ignored,
}

/// A compiled `regex` rule, anchored to the whole value.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` so that it must match the entire value.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Returns the pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// The compiled rules of one declared field.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct FieldRules {
    /// Wire name; the field's path segment.
    pub name: String,
    pub presence: Presence,
    /// Accepted literals (`enum`/`enums`). Fields with a set are discriminators.
    pub membership: Option<Vec<String>>,
    pub when: Option<WhenRule>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub gt: Option<f64>,
    pub ge: Option<f64>,
    pub lt: Option<f64>,
    pub le: Option<f64>,
    pub multiple_of: Option<f64>,
    pub allow_inf_nan: bool,
    pub max_digits: Option<u32>,
    pub decimal_places: Option<u32>,
    pub pattern: Option<Pattern>,
    pub format: Option<Format>,
    /// Custom validator tags, in invocation order.
    pub validate: Vec<String>,
    pub pass_empty: bool,
}

impl FieldRules {
    /// Returns rules with no constraints for the field `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Compiles the raw rules declared on field `ident` of `model`.
    ///
    /// # Errors
    ///
    /// Returns an [`AnnotationError`] describing the first malformed rule.
    pub fn compile(
        model: &'static str,
        ident: &str,
        rules: &[(&str, Option<String>)],
    ) -> Result<Self, AnnotationError> {
        let mut compiled = Self::named(ident);

        for (rule, value) in rules {
            let rule = *rule;
            let value = value.as_deref().map(str::trim);
            let ctx = RuleContext {
                model,
                field: ident,
                rule,
                value,
            };

            match rule {
                "name" => compiled.name = ctx.text()?.to_string(),
                "required" => {
                    if ctx.flag()? {
                        compiled.presence = Presence::Required;
                    }
                }
                "ignore" => {
                    if ctx.flag()? {
                        compiled.presence = Presence::Ignored;
                    }
                }
                "binding" => {
                    compiled.presence = match ctx.text()? {
                        "required" => Presence::Required,
                        "ignore" => Presence::Ignored,
                        _ => return Err(ctx.invalid("must be 'required' or 'ignore'")),
                    }
                }
                "enum" | "enums" => compiled.membership = Some(ctx.list()?),
                "when" => {
                    let raw = ctx.text()?;
                    let when = WhenRule::parse(raw).map_err(|(clause, reason)| {
                        AnnotationError::InvalidCondition {
                            model,
                            field: ident.to_string(),
                            clause,
                            reason,
                        }
                    })?;
                    compiled.when = Some(when);
                }
                "min" => compiled.min = Some(ctx.number()?),
                "max" => compiled.max = Some(ctx.number()?),
                "gt" => compiled.gt = Some(ctx.number()?),
                "ge" => compiled.ge = Some(ctx.number()?),
                "lt" => compiled.lt = Some(ctx.number()?),
                "le" => compiled.le = Some(ctx.number()?),
                "multiple_of" => {
                    let base = ctx.number()?;
                    if base == 0.0 {
                        return Err(ctx.invalid("must not be zero"));
                    }
                    compiled.multiple_of = Some(base);
                }
                "allow_inf_nan" => compiled.allow_inf_nan = ctx.flag()?,
                "pass_empty" | "pass-empty" => compiled.pass_empty = ctx.flag()?,
                "max_digits" => compiled.max_digits = Some(ctx.count()?),
                "decimal_places" => compiled.decimal_places = Some(ctx.count()?),
                "regex" => {
                    let pattern =
                        Pattern::new(ctx.text()?).map_err(|source| AnnotationError::InvalidRegex {
                            model,
                            field: ident.to_string(),
                            source,
                        })?;
                    compiled.pattern = Some(pattern);
                }
                "format" => {
                    let name = ctx.text()?;
                    let format =
                        name.parse::<Format>()
                            .map_err(|_| AnnotationError::UnknownFormat {
                                model,
                                field: ident.to_string(),
                                format: name.to_string(),
                            })?;
                    compiled.format = Some(format);
                }
                "validate" => compiled.validate = ctx.list()?,
                _ => {
                    return Err(AnnotationError::UnknownRule {
                        model,
                        field: ident.to_string(),
                        rule: rule.to_string(),
                    })
                }
            }
        }

        Ok(compiled)
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_ignored(&self) -> bool {
        self.presence == Presence::Ignored
    }

    /// Returns true if the field is a discriminator recorded in the condition map.
    pub fn is_discriminator(&self) -> bool {
        self.membership.is_some()
    }
}

struct RuleContext<'a> {
    model: &'static str,
    field: &'a str,
    rule: &'a str,
    value: Option<&'a str>,
}

impl<'a> RuleContext<'a> {
    fn invalid(&self, reason: &'static str) -> AnnotationError {
        AnnotationError::InvalidValue {
            model: self.model,
            field: self.field.to_string(),
            rule: self.rule.to_string(),
            reason,
        }
    }

    fn text(&self) -> Result<&'a str, AnnotationError> {
        match self.value {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.invalid("requires a value")),
        }
    }

    fn flag(&self) -> Result<bool, AnnotationError> {
        match self.value {
            None | Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(_) => Err(self.invalid("must be a bare flag, 'true' or 'false'")),
        }
    }

    fn list(&self) -> Result<Vec<String>, AnnotationError> {
        let items: Vec<String> = self
            .text()?
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect();
        if items.is_empty() {
            return Err(self.invalid("requires at least one item"));
        }
        Ok(items)
    }

    fn number(&self) -> Result<f64, AnnotationError> {
        let raw = self.text()?;
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| self.not_a_number(raw))
    }

    fn count(&self) -> Result<u32, AnnotationError> {
        let raw = self.text()?;
        raw.parse::<u32>().map_err(|_| self.not_a_number(raw))
    }

    fn not_a_number(&self, raw: &str) -> AnnotationError {
        AnnotationError::InvalidNumber {
            model: self.model,
            field: self.field.to_string(),
            rule: self.rule.to_string(),
            value: raw.to_string(),
        }
    }
}
