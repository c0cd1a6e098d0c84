use std::collections::BTreeMap;

use serde::Deserialize;

/// Stored fields of one matched document, keyed by field name.
///
/// Owned by the retrieval side; filtering only ever reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Document {
	fields: BTreeMap<String, Vec<String>>,
}
impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_field<I, V>(mut self, name: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<String>,
	{
		self.fields.entry(name.into()).or_default().extend(values.into_iter().map(Into::into));

		self
	}

	/// Values stored under `name`, empty when the field is absent.
	pub fn values(&self, name: &str) -> &[String] {
		self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn contains_field(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.fields.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl<K, V> FromIterator<(K, V)> for Document
where
	K: Into<String>,
	V: IntoIterator,
	V::Item: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		iter.into_iter().fold(Self::new(), |doc, (name, values)| doc.with_field(name, values))
	}
}

/// A document together with the relevance score the retrieval engine gave it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MatchedDocument {
	pub score: f32,
	pub fields: Document,
}

/// One page of retrieval output as handed to the filter.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MatchBatch {
	pub num_found: u64,
	#[serde(default)]
	pub max_score: Option<f32>,
	#[serde(default)]
	pub docs: Vec<MatchedDocument>,
}
