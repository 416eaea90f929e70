//! Expression Parser
//!
//! Turns `F1+F2+F3,F1*F2*F3,F5+F5+F5+F6` into one [`FeatureSpec`] per
//! comma-separated term. Feature tokens (`F<n>`) and operator tokens are
//! scanned independently inside each term, in order of appearance.

use crate::error::ExprError;
use crate::expression::Expression;
use crate::operator::Operator;
use crate::spec::FeatureSpec;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Term separator
pub const TERM_SEPARATOR: char = ',';

fn feature_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"F(\d+)").expect("feature token pattern is valid"))
}

fn operator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[+\-*=]").expect("operator token pattern is valid"))
}

/// Compile an expression against `base_features` original columns.
///
/// # Errors
/// - [`ExprError::MalformedExpression`] if a term has no `F<n>` token, uses
///   `F0`, or has an operator count other than `features - 1`
/// - [`ExprError::OutOfRangeFeatureReference`] if a term reads a column that
///   is not created before it
pub fn compile(expression: &str, base_features: usize) -> Result<Expression, ExprError> {
    let specs = expression
        .split(TERM_SEPARATOR)
        .enumerate()
        .map(|(term, text)| parse_term(term, text))
        .collect::<Result<Vec<_>, _>>()?;

    let compiled = Expression::from_parts(expression.to_string(), base_features, specs)?;
    debug!(
        "Compiled {:?}: {} base + {} derived columns",
        expression,
        base_features,
        compiled.derived_features()
    );
    Ok(compiled)
}

/// Parse a single comma-separated term
fn parse_term(term: usize, text: &str) -> Result<FeatureSpec, ExprError> {
    let mut sources = Vec::new();
    for caps in feature_pattern().captures_iter(text) {
        let digits = &caps[1];
        let number: usize = digits.parse().map_err(|_| {
            ExprError::malformed(term, text, format!("feature number F{digits} is too large"))
        })?;
        if number == 0 {
            return Err(ExprError::malformed(term, text, "feature numbers start at F1"));
        }
        sources.push(number - 1);
    }

    if sources.is_empty() {
        return Err(ExprError::malformed(term, text, "no feature tokens"));
    }

    let operators: Vec<Operator> = operator_pattern()
        .find_iter(text)
        .filter_map(|m| m.as_str().chars().next())
        .map(Operator::from_symbol)
        .collect();

    if operators.len() + 1 != sources.len() {
        return Err(ExprError::malformed(
            term,
            text,
            format!(
                "{} feature tokens need {} operators, found {}",
                sources.len(),
                sources.len() - 1,
                operators.len()
            ),
        ));
    }

    debug!(
        "Extracted term[{}] {:?}: features {:?}, operators {:?}",
        term,
        text,
        sources,
        operators.iter().map(Operator::code).collect::<Vec<_>>()
    );

    FeatureSpec::new(sources, operators)
}
