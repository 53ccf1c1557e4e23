//! The `when` rule grammar.
//!
//! A `when` rule is a `;`-separated list of clauses that all must hold:
//!
//! ```text
//! context.type=individual;binding=required
//! age>=18;country!=US;binding=required
//! ```
//!
//! Each clause is either `binding=<rule>` or `<path><op><value>` with `op` one
//! of `=`, `!=`, `>`, `<`, `>=`, `<=`. Paths are dotted wire paths resolved
//! against the [`ConditionMap`].

use std::fmt::{self, Display};

use crate::condition::ConditionMap;

/// Comparison operator of a `when` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Op {
    /// Returns the operator as written in the rule.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Lt => "<",
            Op::Le => "<=",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Op::Eq => "is",
            Op::Ne => "is not",
            Op::Gt => "is greater than",
            Op::Ge => "is at least",
            Op::Lt => "is less than",
            Op::Le => "is at most",
        }
    }
}

/// A single `<path><op><value>` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub path: String,
    pub op: Op,
    pub value: String,
}

impl Clause {
    /// Evaluates the clause against the recorded value at its path.
    ///
    /// An absent value never matches. `=` and `!=` compare text, and treat
    /// two numbers as equal when their values are (`2` and `2.0`). The
    /// relational operators compare numerically and fail when either side is
    /// not a number.
    pub fn holds(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        let numeric = |cmp: fn(f64, f64) -> bool| {
            match (actual.parse::<f64>(), self.value.parse::<f64>()) {
                (Ok(lhs), Ok(rhs)) => cmp(lhs, rhs),
                _ => false,
            }
        };
        let equal = || actual == self.value || numeric(|a, b| a == b);
        match self.op {
            Op::Eq => equal(),
            Op::Ne => !equal(),
            Op::Gt => numeric(|a, b| a > b),
            Op::Ge => numeric(|a, b| a >= b),
            Op::Lt => numeric(|a, b| a < b),
            Op::Le => numeric(|a, b| a <= b),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {} '{}'", self.path, self.op.phrase(), self.value)
    }
}

/// A compiled `when` rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhenRule {
    clauses: Vec<Clause>,
    bindings: Vec<String>,
}

impl WhenRule {
    /// Parses a `when` rule.
    ///
    /// On failure returns the offending clause and a reason.
    pub fn parse(raw: &str) -> Result<Self, (String, &'static str)> {
        let mut rule = WhenRule::default();

        for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let clause = parse_clause(part).map_err(|reason| (part.to_string(), reason))?;
            if clause.path == "binding" {
                if clause.op != Op::Eq {
                    return Err((part.to_string(), "binding only supports '='"));
                }
                rule.bindings.push(clause.value);
            } else {
                rule.clauses.push(clause);
            }
        }

        if rule.clauses.is_empty() && rule.bindings.is_empty() {
            return Err((raw.to_string(), "no clauses"));
        }
        Ok(rule)
    }

    /// Returns the comparison clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if the rule carries `binding=required`.
    ///
    /// Other binding values are accepted and have no effect.
    pub fn requires_presence(&self) -> bool {
        self.bindings.iter().any(|b| b == "required")
    }

    /// Returns true when every clause holds against `conditions`.
    pub fn holds(&self, conditions: &ConditionMap) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.holds(conditions.get(&clause.path)))
    }

    /// Describes the antecedent, e.g. `'context.type' is 'individual'`.
    pub fn describe(&self) -> String {
        self.clauses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

fn parse_clause(raw: &str) -> Result<Clause, &'static str> {
    let start = raw
        .find(['=', '!', '<', '>'])
        .ok_or("missing operator")?;
    let rest = &raw[start..];

    let (op, len) = if rest.starts_with("!=") {
        (Op::Ne, 2)
    } else if rest.starts_with(">=") {
        (Op::Ge, 2)
    } else if rest.starts_with("<=") {
        (Op::Le, 2)
    } else if rest.starts_with('=') {
        (Op::Eq, 1)
    } else if rest.starts_with('>') {
        (Op::Gt, 1)
    } else if rest.starts_with('<') {
        (Op::Lt, 1)
    } else {
        return Err("expected '=' after '!'");
    };

    let path = raw[..start].trim();
    let value = raw[start + len..].trim();
    if path.is_empty() {
        return Err("missing path");
    }
    if value.is_empty() {
        return Err("missing value");
    }

    Ok(Clause {
        path: path.to_string(),
        op,
        value: value.to_string(),
    })
}
