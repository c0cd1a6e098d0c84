pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid policy: {message}")]
	InvalidPolicy { message: String },
	#[error("Config error: {message}")]
	Config { message: String },
}
impl From<fieldgate_config::Error> for Error {
	fn from(err: fieldgate_config::Error) -> Self {
		Self::Config { message: err.to_string() }
	}
}
