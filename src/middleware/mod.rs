pub mod capture;
pub mod format;
pub mod params;
pub mod web_log;

pub use capture::CapturedBody;
pub use format::RequestRecord;
pub use params::RequestParams;
pub use web_log::web_log;
