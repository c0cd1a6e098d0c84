use std::collections::HashSet;

/// Marker values that open a document for the current request.
///
/// Always holds the configured public value. Built once per request and shared by every
/// document in the batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowSet {
	values: HashSet<String>,
}
impl AllowSet {
	/// Combines the configured public value with the comma-separated request parameter.
	///
	/// Entries are kept exactly as written, surrounding whitespace included. Empty entries are
	/// skipped so a stray comma never opens documents whose marker value is blank.
	pub fn resolve(public_value: &str, param: Option<&str>) -> Self {
		let mut values = HashSet::new();

		values.insert(public_value.to_string());

		if let Some(param) = param {
			values.extend(
				param.split(',').filter(|value| !value.is_empty()).map(String::from),
			);
		}

		Self { values }
	}

	pub fn contains(&self, value: &str) -> bool {
		self.values.contains(value)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.values.iter().map(String::as_str)
	}
}
