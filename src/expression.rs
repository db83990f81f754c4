//! Compileren van een formule tot een aanroepbare functie van één variabele.
//!
//! Het parsen zelf gebeurt door `meval`; deze module normaliseert de invoer,
//! levert de extra functies die gebruikers gewend zijn en controleert dat de
//! formule geen andere vrije variabelen gebruikt dan de opgegeven.

use std::fmt;

use meval::{Context, Expr};
use thiserror::Error;

/// Naam van de curveparameter.
pub const PARAMETER: &str = "t";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("expressie is leeg")]
    Empty,
    #[error("expressie `{expression}` kon niet geparst worden: {reason}")]
    Parse { expression: String, reason: String },
    #[error("expressie `{expression}` is niet te binden aan `{variable}`: {reason}")]
    Bind {
        expression: String,
        variable: String,
        reason: String,
    },
}

/// Een gecompileerde formule in één variabele.
pub struct CompiledExpression {
    source: String,
    function: Box<dyn Fn(f64) -> f64>,
}

impl CompiledExpression {
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn eval(&self, value: f64) -> f64 {
        (self.function)(value)
    }
}

impl fmt::Debug for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledExpression")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Compileert `source` als functie van `variable`.
///
/// Faalt voor lege invoer, syntaxfouten en onbekende variabelen of functies.
pub fn compile(source: &str, variable: &str) -> Result<CompiledExpression, ExpressionError> {
    let normalized = strip_source(source);
    if normalized.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let expr: Expr = normalized.parse().map_err(|error: meval::Error| ExpressionError::Parse {
        expression: normalized.clone(),
        reason: error.to_string(),
    })?;

    let function = expr
        .bind_with_context(build_context(), variable)
        .map_err(|error| ExpressionError::Bind {
            expression: normalized.clone(),
            variable: variable.to_owned(),
            reason: error.to_string(),
        })?;

    Ok(CompiledExpression {
        source: normalized,
        function: Box::new(function),
    })
}

/// Zonder omringende witruimte en afsluitende puntkomma's; `**` wordt `^`.
fn strip_source(source: &str) -> String {
    source
        .trim()
        .trim_end_matches(|ch: char| ch == ';' || ch.is_whitespace())
        .replace("**", "^")
}

/// Constanten en functies bovenop wat `meval` zelf kent.
fn build_context() -> Context<'static> {
    let mut context = Context::new();
    for (name, value) in [
        ("PI", std::f64::consts::PI),
        ("E", std::f64::consts::E),
        ("tau", std::f64::consts::TAU),
    ] {
        context.var(name, value);
    }

    let unary: [(&str, fn(f64) -> f64); 10] = [
        ("log", f64::ln),
        ("log10", f64::log10),
        ("log2", f64::log2),
        ("cbrt", f64::cbrt),
        ("trunc", f64::trunc),
        ("sign", f64::signum),
        ("frac", f64::fract),
        ("deg", f64::to_degrees),
        ("rad", f64::to_radians),
        ("sec", |angle: f64| angle.cos().recip()),
    ];
    for (name, function) in unary {
        context.func(name, function);
    }
    context.func("csc", |angle: f64| angle.sin().recip());
    context.func("cot", |angle: f64| angle.tan().recip());

    context.func2("mod", floored_mod);
    context.func2("pow", f64::powf);
    context.func2("hypot", f64::hypot);
    context.func3("clamp", |value: f64, a: f64, b: f64| {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        value.max(lower).min(upper)
    });
    context.func3("lerp", |from: f64, to: f64, amount: f64| {
        (to - from).mul_add(amount, from)
    });
    context.funcn("if", choose, 2..4);
    context
}

/// Rest met het teken van de deler, zoals in de meeste rekenmachines.
fn floored_mod(dividend: f64, divisor: f64) -> f64 {
    let remainder = dividend.rem_euclid(divisor.abs());
    if divisor < 0.0 && remainder > 0.0 {
        remainder + divisor
    } else {
        remainder
    }
}

/// `if(c, a)` of `if(c, a, b)`: `a` als `c` niet nul is, anders `b` (of nul).
fn choose(args: &[f64]) -> f64 {
    match *args {
        [condition, then, otherwise] => {
            if condition == 0.0 { otherwise } else { then }
        }
        [condition, then] => {
            if condition == 0.0 { 0.0 } else { then }
        }
        _ => f64::NAN,
    }
}
