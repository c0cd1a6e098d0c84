use std::{path::PathBuf, sync::Arc};

use fieldgate_service::FieldGateService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<FieldGateService>,
	/// Source of the running config; reloads re-read it.
	pub config_path: PathBuf,
}
impl AppState {
	pub fn new(config: &fieldgate_config::Config, config_path: PathBuf) -> color_eyre::Result<Self> {
		let service = FieldGateService::new(config)?;

		Ok(Self { service: Arc::new(service), config_path })
	}
}
