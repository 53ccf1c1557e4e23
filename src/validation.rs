//! The value tree walker and field validation pipeline.
//!
//! This module provides the [`ValidationContext`] type that carries the engine
//! configuration, the custom validator registry and the resolved
//! [`ConditionMap`] through one validation call. The walk is depth-first,
//! visits fields in declaration order and stops at the first error.
//!
//! Each declared field runs through the pipeline below; the first failing
//! step ends the call.
//!
//! 1. ignore guard
//! 2. descent into optional, model, sequence, map and timestamp values
//! 3. presence (`required`)
//! 4. conditional presence (`when`)
//! 5. length and range (`min`, `max`)
//! 6. numeric comparisons, `multiple_of`, NaN and infinity rejection
//! 7. decimal precision
//! 8. pattern
//! 9. named format
//! 10. membership
//! 11. custom validators
//! 12. capability hooks
//!
//! Steps 5 to 12 only run when the field holds a value.

use crate::annotation::FieldRules;
use crate::condition::ConditionMap;
use crate::config::ValidatorConfig;
use crate::constraint::{
    check_bounds, check_comparisons, check_format, check_length, check_membership,
    check_number_membership, check_pattern, check_precision,
};
use crate::error::{ErrorKind, ValidationError};
use crate::hooks::run_hooks;
use crate::path::FieldPath;
use crate::registry::CustomRegistry;
use crate::schema::{is_zero, unwrap_present, zero_time, Inspect, Kind, Model};

/// State shared by one validation call.
pub struct ValidationContext<'a> {
    config: &'a ValidatorConfig,
    registry: &'a CustomRegistry,
    conditions: ConditionMap,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context for `root`, resolving its condition map up front.
    pub fn new(config: &'a ValidatorConfig, registry: &'a CustomRegistry, root: &dyn Inspect) -> Self {
        Self {
            config,
            registry,
            conditions: ConditionMap::resolve(root),
        }
    }

    /// Returns the condition map resolved for this call.
    pub fn conditions(&self) -> &ConditionMap {
        &self.conditions
    }

    /// Validates `root` and, when it is a model, runs its capability hooks.
    pub fn validate(&self, root: &dyn Inspect) -> Result<(), ValidationError> {
        let path = FieldPath::root();
        self.walk(root, &path, None)?;
        if let Some(model) = model_of(root) {
            run_hooks(model, &path)?;
        }
        Ok(())
    }

    /// Applies the category checks to a value and descends into it.
    fn walk(
        &self,
        value: &dyn Inspect,
        path: &FieldPath,
        rules: Option<&FieldRules>,
    ) -> Result<(), ValidationError> {
        match value.kind() {
            Kind::Optional(None) => Ok(()),
            Kind::Optional(Some(inner)) => self.walk(inner, path, rules),
            Kind::Model(model) => self.walk_model(model, path),
            Kind::Text(text) => {
                let pass_empty = rules.is_some_and(|r| r.pass_empty);
                if !pass_empty && text.trim().is_empty() {
                    return Err(ValidationError::new(
                        ErrorKind::EmptyString,
                        path.clone(),
                        format!("The field <{}> cannot be an empty string", path),
                    ));
                }
                Ok(())
            }
            Kind::Time(time) => check_time(time, path),
            Kind::List(items) => {
                let floor = self.config.sequence_floor();
                if items.len() < floor {
                    return Err(ValidationError::new(
                        ErrorKind::EmptyList,
                        path.clone(),
                        format!("The field <{}> must contain at least {} value(s)", path, floor),
                    )
                    .with_got(format!("{} items", items.len())));
                }
                self.walk_elements(items, path, rules)
            }
            Kind::Map(entries) => self.walk_entries(entries, path, rules),
            Kind::Number(_) | Kind::Bool(_) | Kind::Open { .. } => Ok(()),
        }
    }

    /// Walks sequence elements at the sequence's own path.
    fn walk_elements(
        &self,
        items: Vec<&dyn Inspect>,
        path: &FieldPath,
        rules: Option<&FieldRules>,
    ) -> Result<(), ValidationError> {
        for item in items {
            self.walk(item, path, rules)?;
            if let Some(model) = model_of(item) {
                run_hooks(model, path)?;
            }
        }
        Ok(())
    }

    fn walk_entries(
        &self,
        entries: Vec<(&str, &dyn Inspect)>,
        path: &FieldPath,
        rules: Option<&FieldRules>,
    ) -> Result<(), ValidationError> {
        for (key, value) in entries {
            let entry_path = path.push_field(key);
            self.walk(value, &entry_path, rules)?;
            if let Some(model) = model_of(value) {
                run_hooks(model, &entry_path)?;
            }
        }
        Ok(())
    }

    fn walk_model(&self, model: &dyn Model, path: &FieldPath) -> Result<(), ValidationError> {
        let schema = model.schema().map_err(|err| {
            ValidationError::new(ErrorKind::InvalidAnnotation, path.clone(), err.to_string())
        })?;
        let values = model.field_values();
        debug_assert_eq!(schema.len(), values.len(), "{}", schema.type_name());

        for (rules, value) in schema.fields().zip(values) {
            self.validate_field(value, &path.push_field(&rules.name), rules)?;
        }
        Ok(())
    }

    /// Runs the field pipeline for one declared field.
    fn validate_field(
        &self,
        value: &dyn Inspect,
        path: &FieldPath,
        rules: &FieldRules,
    ) -> Result<(), ValidationError> {
        if rules.is_ignored() {
            if is_zero(value) {
                return Ok(());
            }
            return Err(ValidationError::new(
                ErrorKind::InvalidField,
                path.clone(),
                format!("The field <{}> cannot be set", path),
            ));
        }

        self.descend(value, path, rules)?;

        if rules.is_required() && !self.config.suppress_required_checks && is_zero(value) {
            return Err(ValidationError::new(
                ErrorKind::RequiredField,
                path.clone(),
                format!("The field <{}> is required", path),
            ));
        }

        if let Some(when) = &rules.when {
            if when.requires_presence() && is_zero(value) && when.holds(&self.conditions) {
                return Err(ValidationError::new(
                    ErrorKind::RequiredField,
                    path.clone(),
                    format!("The field '{}' is required when {}", path, when.describe()),
                ));
            }
        }

        let Some(present) = unwrap_present(value) else {
            return Ok(());
        };

        check_value(present, path, rules)?;

        if !rules.validate.is_empty() {
            self.registry.run(present, &rules.validate, path)?;
        }

        if let Kind::Model(model) = present.kind() {
            run_hooks(model, path)?;
        }

        Ok(())
    }

    /// Descends into a field's value.
    ///
    /// Supplied optional values get the full category checks. Plain text is
    /// left to `required` and range rules, and plain sequences only have their
    /// elements walked.
    fn descend(
        &self,
        value: &dyn Inspect,
        path: &FieldPath,
        rules: &FieldRules,
    ) -> Result<(), ValidationError> {
        match value.kind() {
            Kind::Optional(Some(_)) => self.walk(value, path, Some(rules)),
            Kind::Model(model) => self.walk_model(model, path),
            Kind::List(items) => self.walk_elements(items, path, Some(rules)),
            Kind::Map(entries) => self.walk_entries(entries, path, Some(rules)),
            Kind::Time(time) => check_time(time, path),
            _ => Ok(()),
        }
    }
}

/// Steps 5 to 10 of the pipeline on an unwrapped value.
fn check_value(present: &dyn Inspect, path: &FieldPath, rules: &FieldRules) -> Result<(), ValidationError> {
    match present.kind() {
        Kind::Text(text) => {
            check_length(rules, text.chars().count(), "characters", path)?;
            if rules.pass_empty && text.trim().is_empty() {
                return Ok(());
            }
            check_pattern(rules, text, path)?;
            check_format(rules, text, path)?;
            check_membership(rules, text, path)
        }
        Kind::Number(number) => {
            check_bounds(rules, number, path)?;
            check_comparisons(rules, number, path)?;
            check_precision(rules, number, path)?;
            check_number_membership(rules, number, path)
        }
        Kind::Bool(flag) => check_membership(rules, &flag.to_string(), path),
        Kind::List(items) => check_length(rules, items.len(), "items", path),
        Kind::Map(entries) => check_length(rules, entries.len(), "entries", path),
        _ => Ok(()),
    }
}

fn check_time(time: chrono::DateTime<chrono::Utc>, path: &FieldPath) -> Result<(), ValidationError> {
    if time == zero_time() {
        return Err(ValidationError::new(
            ErrorKind::InvalidTime,
            path.clone(),
            format!("The field <{}> cannot have an invalid time value", path),
        ));
    }
    Ok(())
}

fn model_of(value: &dyn Inspect) -> Option<&dyn Model> {
    match unwrap_present(value)?.kind() {
        Kind::Model(model) => Some(model),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::SelfCheck;
    use crate::model;

    struct Address {
        city: Option<String>,
        street: String,
    }

    model!(Address {
        city: [binding = "ignore"],
        street: [required],
    });

    struct Person {
        name: String,
        nickname: Option<String>,
        tags: Option<Vec<String>>,
        address: Option<Address>,
    }

    model!(Person {
        name: [required, min = 2],
        nickname: [pass_empty],
        tags,
        address,
    });

    fn person() -> Person {
        Person {
            name: "Ana".to_string(),
            nickname: None,
            tags: None,
            address: Some(Address {
                city: None,
                street: "Main St".to_string(),
            }),
        }
    }

    fn validate(root: &dyn Inspect) -> Result<(), ValidationError> {
        validate_with(root, ValidatorConfig::default())
    }

    fn validate_with(root: &dyn Inspect, config: ValidatorConfig) -> Result<(), ValidationError> {
        let registry = CustomRegistry::new();
        ValidationContext::new(&config, &registry, root).validate(root)
    }

    #[test]
    fn test_valid_instance_passes() {
        assert!(validate(&person()).is_ok());
    }

    #[test]
    fn test_required_field() {
        let mut p = person();
        p.name = String::new();

        let err = validate(&p).unwrap_err();
        assert_eq!(err.kind, ErrorKind::RequiredField);
        assert_eq!(err.path.to_string(), "name");
    }

    #[test]
    fn test_suppressed_required_checks() {
        let mut p = person();
        p.name = String::new();
        let config = ValidatorConfig::default().with_suppress_required_checks(true);

        // min still applies to the empty value
        let err = validate_with(&p, config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MinLength);
    }

    #[test]
    fn test_ignored_field_must_stay_unset() {
        let mut p = person();
        p.address.as_mut().unwrap().city = Some("Maputo".to_string());

        let err = validate(&p).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidField);
        assert_eq!(err.path.to_string(), "address.city");
    }

    #[test]
    fn test_nested_required_field() {
        let mut p = person();
        p.address.as_mut().unwrap().street = String::new();

        let err = validate(&p).unwrap_err();
        assert_eq!(err.path.to_string(), "address.street");
    }

    #[test]
    fn test_supplied_blank_text_is_empty_string() {
        let mut p = person();
        p.tags = Some(vec!["ok".to_string(), "  ".to_string()]);

        let err = validate(&p).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyString);
        assert_eq!(err.path.to_string(), "tags");
    }

    #[test]
    fn test_pass_empty() {
        let mut p = person();
        p.nickname = Some(String::new());
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn test_empty_supplied_sequence() {
        let mut p = person();
        p.tags = Some(vec![]);

        let err = validate(&p).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyList);

        let config = ValidatorConfig::default().with_sequence_minimum_zero(true);
        assert!(validate_with(&p, config).is_ok());
    }

    #[test]
    fn test_first_error_in_declaration_order() {
        let mut p = person();
        p.name = String::new();
        p.address.as_mut().unwrap().street = String::new();

        let err = validate(&p).unwrap_err();
        assert_eq!(err.path.to_string(), "name");
    }

    struct Even {
        value: i64,
    }

    model!(Even { value } + SelfCheck);

    impl SelfCheck for Even {
        fn self_check(&self) -> Result<(), ValidationError> {
            if self.value % 2 == 0 {
                Ok(())
            } else {
                Err(ValidationError::custom("ODD_VALUE", "value must be even"))
            }
        }
    }

    struct Batch {
        items: Vec<Even>,
    }

    model!(Batch { items });

    #[test]
    fn test_self_check_runs_on_sequence_elements() {
        let batch = Batch {
            items: vec![Even { value: 2 }, Even { value: 3 }],
        };

        let err = validate(&batch).unwrap_err();
        assert_eq!(err.code(), "ODD_VALUE");
        assert_eq!(err.path.to_string(), "items");
    }

    #[test]
    fn test_self_check_runs_on_root() {
        let err = validate(&Even { value: 1 }).unwrap_err();
        assert_eq!(err.code(), "ODD_VALUE");
        assert!(err.path.is_root());
    }

    struct Broken {
        field: i32,
    }

    model!(Broken {
        field: [minimum = 1],
    });

    #[test]
    fn test_broken_rules_report_invalid_annotation() {
        let err = validate(&Broken { field: 1 }).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidAnnotation);
        assert!(err.message.contains("unknown rule 'minimum'"));
    }
}
