//! mist-client: REST transport and authenticated session for the Mist API.
//!
//! # Example
//! ```ignore
//! use mist_client::{Session, SessionConfig};
//!
//! let session = Session::connect(SessionConfig::new(token, org_id)).await?;
//! let sites = session.get(&format!("orgs/{}/sites", session.org_id())).await?;
//! ```

mod error;
mod session;
mod transport;

pub use error::{ClientError, Result};
pub use session::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, Session, SessionConfig};
pub use transport::{ApiResponse, HttpTransport, Method, Transport, normalize_path};
