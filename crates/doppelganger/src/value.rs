/// The declared return type of an [`crate::expr::Expression`] node, fixed at
/// build time by the type-checking builder (spec §3 static invariants).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
	Bool,
	Str,
	StrList,
}

impl std::fmt::Display for ReturnType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ReturnType::Bool => "bool",
			ReturnType::Str => "string",
			ReturnType::StrList => "list<string>",
		};
		f.write_str(s)
	}
}

/// The result of evaluating an [`crate::expr::Expression`] against a
/// [`crate::fetch::FetcherBundle`]. Tagged the same way `ReturnType` is
/// tagged, so a mismatch between the two would be a bug in the evaluator
/// rather than something a caller needs to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	Bool(bool),
	Str(String),
	StrList(Vec<String>),
}

impl Value {
	pub fn return_type(&self) -> ReturnType {
		match self {
			Value::Bool(_) => ReturnType::Bool,
			Value::Str(_) => ReturnType::Str,
			Value::StrList(_) => ReturnType::StrList,
		}
	}

	/// Truthiness for use as a mapping's implicit AND of `params`. Mapping
	/// `params` are not required to be `bool` — the builder only checks
	/// types where the spec names a constraint (`AND`/`OR`/`NOT` children,
	/// `EQUALS` operands, etc.), so a top-level param can be any return
	/// type. The `Str`/`StrList` arms mirror Python's `not value` semantics
	/// (empty string/list is falsy) and are load-bearing, not dead code.
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Bool(b) => *b,
			Value::Str(s) => !s.is_empty(),
			Value::StrList(l) => !l.is_empty(),
		}
	}

	pub fn as_bool(&self) -> bool {
		matches!(self, Value::Bool(true))
	}

	pub fn as_str_list(&self) -> &[String] {
		match self {
			Value::StrList(l) => l,
			_ => &[],
		}
	}
}
