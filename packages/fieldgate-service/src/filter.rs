//! Per-document visibility decision and field projection.
//!
//! Two independent gates guard every value: the field must be printable for the document's
//! visibility, and it must be requested. Restricted documents only print allow-listed fields.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::{
	allow_set::AllowSet,
	document::{Document, MatchedDocument},
	fields::{RequestedFields, SCORE_FIELD},
	policy::VisibilityPolicy,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
	Open,
	Restricted,
}
impl Visibility {
	pub fn is_restricted(self) -> bool {
		matches!(self, Self::Restricted)
	}
}

/// Output projection of one document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FilteredRecord {
	#[serde(flatten)]
	fields: BTreeMap<String, Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	score: Option<f32>,
}
impl FilteredRecord {
	pub fn values(&self, name: &str) -> Option<&[String]> {
		self.fields.get(name).map(Vec::as_slice)
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.fields.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}

	pub fn score(&self) -> Option<f32> {
		self.score
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty() && self.score.is_none()
	}

	fn push_unique(&mut self, name: &str, value: &str) {
		match self.fields.get_mut(name) {
			Some(values) =>
				if !values.iter().any(|existing| existing == value) {
					values.push(value.to_string());
				},
			None => {
				self.fields.insert(name.to_string(), vec![value.to_string()]);
			},
		}
	}
}

/// A document is open only when one of its marker values is in the allow-set.
///
/// No marker values, or no marker field at all, means restricted.
pub fn classify(doc: &Document, marker_field: &str, allow_set: &AllowSet) -> Visibility {
	if doc.values(marker_field).iter().any(|value| allow_set.contains(value)) {
		Visibility::Open
	} else {
		Visibility::Restricted
	}
}

pub fn printable_fields<'a>(
	doc: &'a Document,
	visibility: Visibility,
	allowed_fields: &'a HashSet<String>,
) -> impl Iterator<Item = (&'a str, &'a [String])> + 'a {
	doc.fields().filter(move |(name, _)| match visibility {
		Visibility::Open => true,
		Visibility::Restricted => allowed_fields.contains(*name),
	})
}

pub fn filter_document(
	matched: &MatchedDocument,
	requested: &RequestedFields,
	allow_set: &AllowSet,
	policy: &VisibilityPolicy,
) -> (Visibility, FilteredRecord) {
	let visibility = classify(&matched.fields, policy.marker_field(), allow_set);
	let mut record = FilteredRecord::default();

	for (name, values) in printable_fields(&matched.fields, visibility, policy.allowed_fields()) {
		// `score` is reserved for the relevance score.
		if name == SCORE_FIELD || !requested.contains(name) {
			continue;
		}

		for value in values {
			record.push_unique(name, value);
		}
	}

	if requested.wants_score() {
		record.score = Some(matched.score);
	}

	(visibility, record)
}

#[cfg(test)]
mod tests {
	use crate::{
		allow_set::AllowSet,
		document::{Document, MatchedDocument},
		fields::RequestedFields,
		filter::{Visibility, classify, filter_document, printable_fields},
		policy::VisibilityPolicy,
	};

	fn policy() -> VisibilityPolicy {
		VisibilityPolicy::new("visibility", "internal", ["id", "title"], "musallowedlevel")
			.expect("policy")
	}

	fn matched(doc: Document) -> MatchedDocument {
		MatchedDocument { score: 1.5, fields: doc }
	}

	fn requested(names: &[&str]) -> RequestedFields {
		names.iter().copied().collect()
	}

	fn report(id: &str, level: &str) -> Document {
		Document::new()
			.with_field("id", [id])
			.with_field("visibility", [level])
			.with_field("title", ["Report"])
			.with_field("body", ["secret text"])
	}

	#[test]
	fn missing_marker_field_is_restricted() {
		let doc = Document::new().with_field("title", ["Report"]);
		let allow_set = AllowSet::resolve("internal", Some("external"));

		assert_eq!(classify(&doc, "visibility", &allow_set), Visibility::Restricted);
	}

	#[test]
	fn empty_marker_field_is_restricted() {
		let doc = Document::new().with_field("visibility", Vec::<String>::new());
		let allow_set = AllowSet::resolve("internal", None);

		assert!(doc.contains_field("visibility"));
		assert_eq!(classify(&doc, "visibility", &allow_set), Visibility::Restricted);
	}

	#[test]
	fn any_allowed_marker_value_opens() {
		let doc = Document::new().with_field("visibility", ["external", "internal"]);
		let allow_set = AllowSet::resolve("internal", None);

		assert_eq!(classify(&doc, "visibility", &allow_set), Visibility::Open);
	}

	#[test]
	fn marker_values_match_parameter_entries_as_written() {
		let allow_set = AllowSet::resolve("internal", Some("external, partner"));
		let padded = Document::new().with_field("visibility", [" partner"]);
		let bare = Document::new().with_field("visibility", ["partner"]);

		assert_eq!(classify(&padded, "visibility", &allow_set), Visibility::Open);
		assert_eq!(classify(&bare, "visibility", &allow_set), Visibility::Restricted);
	}

	#[test]
	fn restricted_document_prints_only_allowed_fields() {
		let doc = report("2", "external");
		let policy = policy();
		let names = printable_fields(&doc, Visibility::Restricted, policy.allowed_fields())
			.map(|(name, _)| name)
			.collect::<Vec<_>>();

		assert_eq!(names, vec!["id", "title"]);
	}

	#[test]
	fn open_document_prints_every_field() {
		let doc = report("1", "internal");
		let policy = policy();
		let names = printable_fields(&doc, Visibility::Open, policy.allowed_fields())
			.map(|(name, _)| name)
			.collect::<Vec<_>>();

		assert_eq!(names, vec!["body", "id", "title", "visibility"]);
	}

	#[test]
	fn restricted_document_hides_requested_body() {
		let allow_set = AllowSet::resolve("internal", None);
		let (visibility, record) = filter_document(
			&matched(report("2", "external")),
			&requested(&["title", "body", "id"]),
			&allow_set,
			&policy(),
		);

		assert_eq!(visibility, Visibility::Restricted);
		assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["id", "title"]);
		assert_eq!(record.values("id"), Some(&["2".to_string()][..]));
		assert_eq!(record.values("body"), None);
	}

	#[test]
	fn allow_listed_field_still_needs_request() {
		let allow_set = AllowSet::resolve("internal", None);
		let (_, record) = filter_document(
			&matched(report("2", "external")),
			&requested(&["id"]),
			&allow_set,
			&policy(),
		);

		assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["id"]);
	}

	#[test]
	fn values_are_deduplicated_in_first_occurrence_order() {
		let doc = Document::new()
			.with_field("visibility", ["internal"])
			.with_field("tag", ["a", "b", "a", "c"]);
		let allow_set = AllowSet::resolve("internal", None);
		let (_, record) =
			filter_document(&matched(doc), &requested(&["tag"]), &allow_set, &policy());

		assert_eq!(
			record.values("tag"),
			Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
		);
	}

	#[test]
	fn empty_field_produces_no_entry() {
		let doc = Document::new()
			.with_field("visibility", ["internal"])
			.with_field("tag", Vec::<String>::new());
		let allow_set = AllowSet::resolve("internal", None);
		let (_, record) =
			filter_document(&matched(doc), &requested(&["tag"]), &allow_set, &policy());

		assert!(record.is_empty());
	}

	#[test]
	fn score_follows_request_on_restricted_documents() {
		let allow_set = AllowSet::resolve("internal", None);
		let (_, with_score) = filter_document(
			&matched(report("2", "external")),
			&requested(&["score"]),
			&allow_set,
			&policy(),
		);
		let (_, without_score) = filter_document(
			&matched(report("2", "external")),
			&requested(&["title"]),
			&allow_set,
			&policy(),
		);

		assert_eq!(with_score.score(), Some(1.5));
		assert_eq!(with_score.field_names().count(), 0);
		assert_eq!(without_score.score(), None);
	}

	#[test]
	fn stored_score_field_is_replaced_by_relevance_score() {
		let doc = Document::new().with_field("visibility", ["internal"]).with_field("score", ["9"]);
		let allow_set = AllowSet::resolve("internal", None);
		let (_, record) =
			filter_document(&matched(doc), &requested(&["score"]), &allow_set, &policy());
		let json = serde_json::to_value(&record).expect("serialize");

		assert_eq!(json, serde_json::json!({ "score": 1.5 }));
	}

	#[test]
	fn empty_request_yields_empty_record() {
		let allow_set = AllowSet::resolve("internal", None);
		let (_, record) = filter_document(
			&matched(report("1", "internal")),
			&RequestedFields::default(),
			&allow_set,
			&policy(),
		);

		assert!(record.is_empty());
	}
}
