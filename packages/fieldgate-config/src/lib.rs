mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_ALLOWED_PARAM, DEFAULT_CONTENT_FIELD, Privacy, Schema, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("privacy.allowedFields", &cfg.privacy.allowed_fields),
		("privacy.privateField", &cfg.privacy.private_field),
		("privacy.publicValue", &cfg.privacy.public_value),
		("privacy.allowedParam", &cfg.privacy.allowed_param),
		("schema.unique_key", &cfg.schema.unique_key),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.privacy.allowed_field_names().next().is_none() {
		return Err(Error::Validation {
			message: "privacy.allowedFields must name at least one field.".to_string(),
		});
	}
	if cfg.privacy.public_value.trim() != cfg.privacy.public_value {
		return Err(Error::Validation {
			message: "privacy.publicValue must not have surrounding whitespace.".to_string(),
		});
	}
	if cfg.schema.stored_fields.iter().any(|field| field.trim().is_empty()) {
		return Err(Error::Validation {
			message: "schema.stored_fields must not contain empty names.".to_string(),
		});
	}
	if !cfg.schema.stored_fields.iter().any(|field| field == &cfg.schema.unique_key) {
		return Err(Error::Validation {
			message: "schema.unique_key must be listed in schema.stored_fields.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.privacy.private_field = cfg.privacy.private_field.trim().to_string();
	cfg.privacy.allowed_param = cfg.privacy.allowed_param.trim().to_string();
	cfg.schema.unique_key = cfg.schema.unique_key.trim().to_string();

	if cfg.schema.content_field.trim().is_empty() {
		cfg.schema.content_field = types::DEFAULT_CONTENT_FIELD.to_string();
	}
}
