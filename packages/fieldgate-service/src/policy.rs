use std::collections::HashSet;

use fieldgate_config::Privacy;

use crate::{Error, Result, allow_set::AllowSet};

/// Process-wide visibility settings, validated once and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityPolicy {
	marker_field: String,
	public_value: String,
	allowed_fields: HashSet<String>,
	allowed_param: String,
}
impl VisibilityPolicy {
	pub fn new<I, S>(
		marker_field: impl Into<String>,
		public_value: impl Into<String>,
		allowed_fields: I,
		allowed_param: impl Into<String>,
	) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let marker_field = marker_field.into();
		let public_value = public_value.into();
		let allowed_param = allowed_param.into();
		let allowed_fields = allowed_fields
			.into_iter()
			.map(Into::into)
			.filter(|name: &String| !name.trim().is_empty())
			.collect::<HashSet<_>>();

		if marker_field.trim().is_empty() {
			return Err(Error::InvalidPolicy {
				message: "marker field name must be non-empty.".to_string(),
			});
		}
		if public_value.trim().is_empty() {
			return Err(Error::InvalidPolicy {
				message: "public value must be non-empty.".to_string(),
			});
		}
		if allowed_fields.is_empty() {
			return Err(Error::InvalidPolicy {
				message: "at least one allowed field is required.".to_string(),
			});
		}
		if allowed_param.trim().is_empty() {
			return Err(Error::InvalidPolicy {
				message: "allowed parameter name must be non-empty.".to_string(),
			});
		}

		Ok(Self { marker_field, public_value, allowed_fields, allowed_param })
	}

	pub fn from_config(privacy: &Privacy) -> Result<Self> {
		Self::new(
			privacy.private_field.as_str(),
			privacy.public_value.as_str(),
			privacy.allowed_field_names(),
			privacy.allowed_param.as_str(),
		)
	}

	pub fn marker_field(&self) -> &str {
		&self.marker_field
	}

	pub fn public_value(&self) -> &str {
		&self.public_value
	}

	pub fn allowed_fields(&self) -> &HashSet<String> {
		&self.allowed_fields
	}

	/// Name of the request parameter that extends the allow-set.
	pub fn allowed_param(&self) -> &str {
		&self.allowed_param
	}

	pub fn allow_set(&self, param: Option<&str>) -> AllowSet {
		AllowSet::resolve(&self.public_value, param)
	}
}

#[cfg(test)]
mod tests {
	use fieldgate_config::Privacy;

	use crate::{Error, policy::VisibilityPolicy};

	fn privacy(allowed_fields: &str) -> Privacy {
		Privacy {
			allowed_fields: allowed_fields.to_string(),
			private_field: "visibility".to_string(),
			public_value: "internal".to_string(),
			allowed_param: "musallowedlevel".to_string(),
		}
	}

	#[test]
	fn builds_from_config() {
		let policy = VisibilityPolicy::from_config(&privacy("id, title,")).expect("policy");

		assert_eq!(policy.marker_field(), "visibility");
		assert_eq!(policy.public_value(), "internal");
		assert_eq!(policy.allowed_fields().len(), 2);
		assert!(policy.allowed_fields().contains("title"));
	}

	#[test]
	fn rejects_missing_allowed_fields() {
		let err = VisibilityPolicy::from_config(&privacy(",")).expect_err("expected error");

		assert!(matches!(err, Error::InvalidPolicy { .. }));
	}

	#[test]
	fn rejects_blank_marker_field() {
		let err = VisibilityPolicy::new(" ", "internal", ["id"], "musallowedlevel")
			.expect_err("expected error");

		assert!(err.to_string().contains("marker field"));
	}

	#[test]
	fn allow_set_always_holds_public_value() {
		let policy =
			VisibilityPolicy::new("visibility", "internal", ["id"], "musallowedlevel").expect("policy");

		assert!(policy.allow_set(None).contains("internal"));
		assert!(policy.allow_set(Some("external")).contains("internal"));
	}
}
