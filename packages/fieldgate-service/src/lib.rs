pub mod allow_set;
pub mod batch;
pub mod document;
pub mod fields;
pub mod filter;
pub mod policy;

mod error;

pub use allow_set::AllowSet;
pub use batch::{BatchStats, OutputBatch, assemble, filter_batch};
pub use document::{Document, MatchBatch, MatchedDocument};
pub use error::{Error, Result};
pub use fields::{RequestedFields, SCORE_FIELD};
pub use filter::{FilteredRecord, Visibility, classify, filter_document, printable_fields};
pub use policy::VisibilityPolicy;

use std::{
	collections::BTreeMap,
	sync::{Arc, PoisonError, RwLock},
};

use serde::Deserialize;

use fieldgate_config::{Config, Schema};

/// Request parameter holding the caller's field list.
pub const FIELD_LIST_PARAM: &str = "fl";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilterRequest {
	/// Raw request parameters, e.g. `fl` and the allow-set parameter.
	#[serde(default)]
	pub params: BTreeMap<String, String>,
	pub response: MatchBatch,
}

/// Policy and schema that one request sees from start to finish.
#[derive(Debug)]
pub struct Snapshot {
	pub policy: VisibilityPolicy,
	pub schema: Schema,
}
impl Snapshot {
	pub fn from_config(cfg: &Config) -> Result<Self> {
		fieldgate_config::validate(cfg)?;

		Ok(Self { policy: VisibilityPolicy::from_config(&cfg.privacy)?, schema: cfg.schema.clone() })
	}
}

pub struct FieldGateService {
	snapshot: RwLock<Arc<Snapshot>>,
}
impl FieldGateService {
	pub fn new(cfg: &Config) -> Result<Self> {
		Ok(Self { snapshot: RwLock::new(Arc::new(Snapshot::from_config(cfg)?)) })
	}

	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.snapshot.read().unwrap_or_else(PoisonError::into_inner).clone()
	}

	/// Swaps in a new policy. In-flight requests finish on the snapshot they started with.
	pub fn reload(&self, cfg: &Config) -> Result<()> {
		let next = Arc::new(Snapshot::from_config(cfg)?);

		tracing::info!(
			marker_field = next.policy.marker_field(),
			allowed_fields = next.policy.allowed_fields().len(),
			"Visibility policy reloaded."
		);

		*self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next;

		Ok(())
	}

	pub fn filter(&self, req: &FilterRequest) -> OutputBatch {
		let snapshot = self.snapshot();
		let policy = &snapshot.policy;
		let requested = RequestedFields::resolve(
			req.params.get(FIELD_LIST_PARAM).map(String::as_str),
			&snapshot.schema,
		);
		let allow_set = policy.allow_set(req.params.get(policy.allowed_param()).map(String::as_str));
		let (out, stats) = filter_batch(&req.response, &requested, &allow_set, policy);

		tracing::debug!(
			docs = stats.docs,
			restricted = stats.restricted,
			requested_fields = requested.len(),
			allow_values = allow_set.len(),
			"Filtered result batch."
		);

		out
	}
}
