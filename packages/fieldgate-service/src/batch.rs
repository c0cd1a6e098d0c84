use serde::Serialize;

use crate::{
	allow_set::AllowSet,
	document::MatchBatch,
	fields::RequestedFields,
	filter::{self, FilteredRecord},
	policy::VisibilityPolicy,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OutputBatch {
	pub num_found: u64,
	pub max_score: Option<f32>,
	pub docs: Vec<FilteredRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
	pub docs: usize,
	pub restricted: usize,
}

/// Wraps filtered records; totals pass through untouched.
pub fn assemble(docs: Vec<FilteredRecord>, num_found: u64, max_score: Option<f32>) -> OutputBatch {
	OutputBatch { num_found, max_score, docs }
}

/// Filters every document of `batch` in match order against one allow-set.
pub fn filter_batch(
	batch: &MatchBatch,
	requested: &RequestedFields,
	allow_set: &AllowSet,
	policy: &VisibilityPolicy,
) -> (OutputBatch, BatchStats) {
	let mut stats = BatchStats { docs: batch.docs.len(), restricted: 0 };
	let mut records = Vec::with_capacity(batch.docs.len());

	for matched in &batch.docs {
		let (visibility, record) = filter::filter_document(matched, requested, allow_set, policy);

		if visibility.is_restricted() {
			stats.restricted += 1;
		}

		records.push(record);
	}

	(assemble(records, batch.num_found, batch.max_score), stats)
}
