use regex::Regex;
use serde_json::Value as Json;

use crate::config::ConfigError;
use crate::fetch::{FetcherBundle, canonical_body_string};
use crate::value::{ReturnType, Value};

/// A node of the matcher tree (spec §3). A tagged sum rather than dynamic
/// dispatch over a trait object — the Python source's `Expression` base
/// class with `evaluate`/`return_type` virtual methods becomes one closed
/// enum with one `evaluate` function matching on the tag (spec §9 "Expression
/// polymorphism", REDESIGN FLAGS).
#[derive(Debug, Clone)]
pub enum Expression {
	And(Vec<Expression>),
	Or(Vec<Expression>),
	Not(Box<Expression>),
	Equals(Box<Expression>, Box<Expression>),
	Contains {
		list: Box<Expression>,
		values: Vec<Expression>,
	},
	Regex {
		value: Box<Expression>,
		pattern: Box<Regex>,
	},
	Body(String),
	Query(String),
	QueryArray(String),
	Path(String),
	StringLit(String),
}

impl Expression {
	/// The declared return type, fixed at build time (spec §3).
	pub fn return_type(&self) -> ReturnType {
		match self {
			Expression::And(_)
			| Expression::Or(_)
			| Expression::Not(_)
			| Expression::Equals(_, _)
			| Expression::Contains { .. }
			| Expression::Regex { .. } => ReturnType::Bool,
			Expression::Body(_) | Expression::Query(_) | Expression::Path(_) | Expression::StringLit(_) => {
				ReturnType::Str
			}
			Expression::QueryArray(_) => ReturnType::StrList,
		}
	}

	/// Evaluates the expression against a fetcher bundle (spec §4.2).
	/// `AND`/`OR` short-circuit (spec §8 law 4).
	pub fn evaluate(&self, fetchers: &impl FetcherBundle) -> Value {
		match self {
			Expression::And(children) => {
				for child in children {
					if !child.evaluate(fetchers).is_truthy() {
						return Value::Bool(false);
					}
				}
				Value::Bool(true)
			}
			Expression::Or(children) => {
				for child in children {
					if child.evaluate(fetchers).is_truthy() {
						return Value::Bool(true);
					}
				}
				Value::Bool(false)
			}
			Expression::Not(child) => Value::Bool(!child.evaluate(fetchers).is_truthy()),
			Expression::Equals(left, right) => {
				Value::Bool(left.evaluate(fetchers) == right.evaluate(fetchers))
			}
			Expression::Contains { list, values } => {
				let haystack = list.evaluate(fetchers);
				let haystack = haystack.as_str_list();
				let all_present = values.iter().all(|v| match v.evaluate(fetchers) {
					Value::Str(s) => haystack.contains(&s),
					_ => false,
				});
				Value::Bool(all_present)
			}
			Expression::Regex { value, pattern } => {
				let s = match value.evaluate(fetchers) {
					Value::Str(s) => s,
					_ => String::new(),
				};
				Value::Bool(pattern.is_match(&s))
			}
			Expression::Body(id) => Value::Str(canonical_body_string(fetchers.body(id))),
			Expression::Query(id) => Value::Str(fetchers.query(id).to_string()),
			Expression::QueryArray(id) => {
				let scalar = fetchers.query(id);
				if scalar.contains(',') {
					Value::StrList(scalar.split(',').map(str::to_string).collect())
				} else {
					Value::StrList(fetchers.query_array(id))
				}
			}
			Expression::Path(id) => Value::Str(fetchers.path(id).to_string()),
			Expression::StringLit(s) => Value::Str(s.clone()),
		}
	}
}

/// Parses and type-checks a JSON value into an `Expression` tree (spec
/// §4.1). Children are built — and therefore type-checked — before their
/// parent, so the earliest `ConfigError` always names the innermost
/// offending node. Pure: no I/O, no globals beyond this closed `match`
/// (spec §9 REDESIGN FLAGS: no runtime-registered factory table).
pub fn build_expression(data: &Json) -> Result<Expression, ConfigError> {
	let obj = data
		.as_object()
		.ok_or_else(|| ConfigError::MissingField("type".into()))?;
	let type_name = obj
		.get("type")
		.and_then(Json::as_str)
		.ok_or_else(|| ConfigError::MissingField("type".into()))?;

	match type_name {
		"AND" => {
			let children = build_children(obj, "expressions")?;
			for c in &children {
				if c.return_type() != ReturnType::Bool {
					return Err(ConfigError::TypeMismatch(format!(
						"AND children must be bool, got {}",
						c.return_type()
					)));
				}
			}
			Ok(Expression::And(children))
		}
		"OR" => {
			let children = build_children(obj, "expressions")?;
			for c in &children {
				if c.return_type() != ReturnType::Bool {
					return Err(ConfigError::TypeMismatch(format!(
						"OR children must be bool, got {}",
						c.return_type()
					)));
				}
			}
			Ok(Expression::Or(children))
		}
		"NOT" => {
			let inner = required_field(obj, "expression")?;
			let expr = build_expression(inner)?;
			if expr.return_type() != ReturnType::Bool {
				return Err(ConfigError::TypeMismatch(format!(
					"NOT child must be bool, got {}",
					expr.return_type()
				)));
			}
			Ok(Expression::Not(Box::new(expr)))
		}
		"EQUALS" => {
			let left = build_expression(required_field(obj, "left")?)?;
			let right = build_expression(required_field(obj, "right")?)?;
			if left.return_type() != right.return_type() {
				return Err(ConfigError::TypeMismatch(format!(
					"EQUALS left ({}) and right ({}) must be the same type",
					left.return_type(),
					right.return_type()
				)));
			}
			Ok(Expression::Equals(Box::new(left), Box::new(right)))
		}
		"CONTAINS" => {
			let list_data = required_field(obj, "list")?;
			let values_data = required_field(obj, "values")?;
			let list = build_expression(list_data)?;
			if list.return_type() != ReturnType::StrList {
				return Err(ConfigError::TypeMismatch(format!(
					"CONTAINS list must be list<string>, got {}",
					list.return_type()
				)));
			}
			let values = build_children_from(values_data)?;
			for v in &values {
				if v.return_type() != ReturnType::Str {
					return Err(ConfigError::TypeMismatch(format!(
						"CONTAINS values must be string, got {}",
						v.return_type()
					)));
				}
			}
			Ok(Expression::Contains {
				list: Box::new(list),
				values,
			})
		}
		"REGEX" => {
			let value = build_expression(required_field(obj, "value")?)?;
			if value.return_type() != ReturnType::Str {
				return Err(ConfigError::TypeMismatch(format!(
					"REGEX value must be string, got {}",
					value.return_type()
				)));
			}
			let pattern_str = obj
				.get("pattern")
				.and_then(Json::as_str)
				.ok_or_else(|| ConfigError::MissingField("pattern".into()))?;
			let pattern = Regex::new(pattern_str)
				.map_err(|e| ConfigError::InvalidRegex(pattern_str.to_string(), e.to_string()))?;
			Ok(Expression::Regex {
				value: Box::new(value),
				pattern: Box::new(pattern),
			})
		}
		"BODY" => Ok(Expression::Body(required_id(obj)?)),
		"QUERY" => Ok(Expression::Query(required_id(obj)?)),
		"QUERY_ARRAY" => Ok(Expression::QueryArray(required_id(obj)?)),
		"PATH" => Ok(Expression::Path(required_id(obj)?)),
		"STRING" => {
			let value = obj
				.get("value")
				.and_then(Json::as_str)
				.ok_or_else(|| ConfigError::MissingField("value".into()))?;
			Ok(Expression::StringLit(value.to_string()))
		}
		other => Err(ConfigError::UnknownExpressionType(other.to_string())),
	}
}

fn required_field<'a>(obj: &'a serde_json::Map<String, Json>, field: &str) -> Result<&'a Json, ConfigError> {
	obj
		.get(field)
		.ok_or_else(|| ConfigError::MissingField(field.to_string()))
}

fn required_id(obj: &serde_json::Map<String, Json>) -> Result<String, ConfigError> {
	obj
		.get("id")
		.and_then(Json::as_str)
		.map(str::to_string)
		.ok_or_else(|| ConfigError::MissingField("id".into()))
}

fn build_children(
	obj: &serde_json::Map<String, Json>,
	field: &str,
) -> Result<Vec<Expression>, ConfigError> {
	build_children_from(required_field(obj, field)?)
}

fn build_children_from(data: &Json) -> Result<Vec<Expression>, ConfigError> {
	let arr = data
		.as_array()
		.ok_or_else(|| ConfigError::TypeMismatch("expected an array of expressions".to_string()))?;
	arr.iter().map(build_expression).collect()
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
