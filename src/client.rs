//! Client core: URL construction, authentication, request assembly and sending.
//!
//! Endpoint wrappers (`batch`, `engines`, `files`, ...) are `impl Client` blocks in
//! their own modules and only go through the pieces exported here.

pub mod auth;
pub mod builder;
pub mod core;
pub mod request;
pub mod url;

pub use self::auth::{apply_auth, AZURE_API_KEY_HEADER, ORGANIZATION_HEADER};
pub use self::builder::ClientBuilder;
pub use self::core::Client;
pub use self::request::{Request, RequestBody, RequestBuilder};
pub use self::url::{full_url, UrlOptions};
