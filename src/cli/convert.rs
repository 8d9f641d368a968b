//! Command-line variable definitions -> [`Variable`] conversion

use serde_json::Value;

use super::CliError;
use crate::{LeafKind, Variable};

/// Parses `NAME:TYPE=VALUE`, e.g. `in_AMT:NUMBER=2` or `$$Region:STRING=EU`.
///
/// The value may be empty and may itself contain `=` or `:`.
pub fn parse_variable_spec(spec: &str) -> Result<Variable, CliError> {
    let (head, value) = spec
        .split_once('=')
        .ok_or_else(|| CliError::Variable(format!("'{}' is not NAME:TYPE=VALUE", spec)))?;
    let (name, kind) = head
        .rsplit_once(':')
        .ok_or_else(|| CliError::Variable(format!("'{}' has no :TYPE", spec)))?;

    if name.is_empty() {
        return Err(CliError::Variable(format!("'{}' has an empty name", spec)));
    }

    let kind: LeafKind = kind.parse().map_err(|e| CliError::Variable(format!("{}", e)))?;
    Ok(Variable::new(name, kind, value))
}

/// Reads a JSON array of `{"name", "type", "value"}` objects.
///
/// `value` may be a string, a number or null; `type` defaults to `NULL` when
/// `value` is null and to `STRING` otherwise.
pub fn variables_from_json(json: &str) -> Result<Vec<Variable>, CliError> {
    let parsed: Value = serde_json::from_str(json)?;
    let Value::Array(items) = parsed else {
        return Err(CliError::Variable("expected a JSON array of variables".to_string()));
    };

    items.into_iter().map(variable_from_json).collect()
}

fn variable_from_json(item: Value) -> Result<Variable, CliError> {
    let Value::Object(mut obj) = item else {
        return Err(CliError::Variable(format!("expected an object, got {}", item)));
    };

    let name = match obj.remove("name") {
        Some(Value::String(name)) if !name.is_empty() => name,
        other => {
            return Err(CliError::Variable(format!(
                "variable name must be a non-empty string, got {}",
                other.unwrap_or(Value::Null)
            )));
        }
    };

    let value = obj.remove("value").unwrap_or(Value::Null);
    let kind = match obj.remove("type") {
        Some(Value::String(t)) => t
            .parse::<LeafKind>()
            .map_err(|e| CliError::Variable(format!("{}: {}", name, e)))?,
        Some(other) => {
            return Err(CliError::Variable(format!(
                "{}: type must be a string, got {}",
                name, other
            )));
        }
        None if value.is_null() => LeafKind::Null,
        None => LeafKind::String,
    };

    let value = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => "NULL".to_string(),
        other => {
            return Err(CliError::Variable(format!(
                "{}: value must be a string, number or null, got {}",
                name, other
            )));
        }
    };

    Ok(Variable::new(name, kind, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_spec() {
        let var = parse_variable_spec("in_AMT:NUMBER=2").unwrap();
        assert_eq!(var, Variable::number("in_AMT", "2"));

        let var = parse_variable_spec("$$Url:string=http://host:80/?a=b").unwrap();
        assert_eq!(var, Variable::string("$$Url", "http://host:80/?a=b"));

        let var = parse_variable_spec("empty:STRING=").unwrap();
        assert_eq!(var.value, "");
    }

    #[test]
    fn test_variable_spec_errors() {
        for spec in ["in_AMT", "in_AMT=2", ":NUMBER=2", "in_AMT:DATE=2"] {
            assert!(
                matches!(parse_variable_spec(spec), Err(CliError::Variable(_))),
                "spec: {}",
                spec
            );
        }
    }

    #[test]
    fn test_variables_from_json() {
        let vars = variables_from_json(
            r#"[
                {"name": "in_AMT", "type": "NUMBER", "value": -250},
                {"name": "in_NAME", "value": "Bender"},
                {"name": "in_MISSING", "value": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            vars,
            vec![
                Variable::number("in_AMT", "-250"),
                Variable::string("in_NAME", "Bender"),
                Variable::null("in_MISSING"),
            ]
        );
    }

    #[test]
    fn test_variables_from_json_errors() {
        assert!(matches!(variables_from_json("[{"), Err(CliError::Json(_))));
        for json in [
            r#"{"name": "x"}"#,
            r#"[{"value": 1}]"#,
            r#"[{"name": "x", "type": 3}]"#,
            r#"[{"name": "x", "value": [1]}]"#,
        ] {
            assert!(
                matches!(variables_from_json(json), Err(CliError::Variable(_))),
                "json: {}",
                json
            );
        }
    }
}
