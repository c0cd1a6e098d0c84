use serde::Deserialize;

pub const DEFAULT_ALLOWED_PARAM: &str = "musallowedlevel";
pub const DEFAULT_CONTENT_FIELD: &str = "content";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub privacy: Privacy,
	pub schema: Schema,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
	#[serde(default = "default_true")]
	pub bind_localhost_only: bool,
}

/// Visibility settings. Keys keep the camelCase names used by existing search deployments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privacy {
	/// Comma-separated field names that stay visible on restricted documents.
	pub allowed_fields: String,
	/// Marker field whose values decide whether a document is open.
	pub private_field: String,
	/// Marker value that always opens a document.
	pub public_value: String,
	/// Request parameter carrying extra comma-separated marker values.
	#[serde(default = "default_allowed_param")]
	pub allowed_param: String,
}
impl Privacy {
	pub fn allowed_field_names(&self) -> impl Iterator<Item = &str> {
		self.allowed_fields.split(',').map(str::trim).filter(|name| !name.is_empty())
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
	pub unique_key: String,
	pub stored_fields: Vec<String>,
	#[serde(default = "default_content_field")]
	pub content_field: String,
}

fn default_true() -> bool {
	true
}

fn default_allowed_param() -> String {
	DEFAULT_ALLOWED_PARAM.to_string()
}

fn default_content_field() -> String {
	DEFAULT_CONTENT_FIELD.to_string()
}
