//! The expression/matcher engine and request-to-mapping dispatcher for the
//! doppelganger mock server. No networking, no process-level concerns —
//! those live in `doppelganger-app`.

pub mod config;
pub mod dispatch;
pub mod expr;
pub mod fetch;
pub mod migrate;
pub mod value;

pub use config::{Configuration, ConfigError, Content, Endpoint, Mapping, Servers};
pub use dispatch::dispatch;
pub use expr::{Expression, build_expression};
pub use fetch::FetcherBundle;
pub use value::{ReturnType, Value};
