// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `config`: Reads the API key and optional overrides from the environment.
// - `api`: Blocking HTTP access to the news API's top-headlines endpoint and
//   the `NewsSource` trait the rest of the crate talks to.
// - `session`: Holds the last loaded headlines (Idle/Loaded) and renders
//   lists and article details.
// - `ui`: The numbered menu loop and terminal prompts.
pub mod api;
pub mod config;
pub mod session;
pub mod ui;

pub use api::{ApiError, Headline, NewsClient, NewsSource};
pub use config::{Config, ConfigError};
pub use session::{Session, SessionState};
