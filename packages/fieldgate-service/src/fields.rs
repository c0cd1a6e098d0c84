use std::collections::BTreeSet;

use fieldgate_config::Schema;

/// Pseudo-field asking for the relevance score.
pub const SCORE_FIELD: &str = "score";

const WILDCARD: &str = "*";
const ID_ALIAS: &str = "id";

/// Field names the caller asked to see, after wildcard and alias expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestedFields {
	names: BTreeSet<String>,
}
impl RequestedFields {
	/// Resolves a comma-separated field list against the schema.
	///
	/// `*` expands to every stored field except the content field, `id` maps to the unique key,
	/// anything else is kept as written. A missing or blank list requests nothing.
	pub fn resolve(fl: Option<&str>, schema: &Schema) -> Self {
		let mut names = BTreeSet::new();
		let Some(fl) = fl else {
			return Self { names };
		};

		for entry in fl.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
			match entry {
				WILDCARD => names.extend(
					schema
						.stored_fields
						.iter()
						.filter(|field| **field != schema.content_field)
						.cloned(),
				),
				ID_ALIAS => {
					names.insert(schema.unique_key.clone());
				},
				_ => {
					names.insert(entry.to_string());
				},
			}
		}

		Self { names }
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.contains(name)
	}

	pub fn wants_score(&self) -> bool {
		self.contains(SCORE_FIELD)
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(String::as_str)
	}
}

impl<S> FromIterator<S> for RequestedFields
where
	S: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self { names: iter.into_iter().map(Into::into).collect() }
	}
}
