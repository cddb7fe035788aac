//! LeakCheck Lookup - session lifecycle and lookup backends.
//!
//! This crate owns the asynchronous lookup lifecycle
//! (`Idle -> Pending -> Resolved | Failed`) and the [`LookupBackend`]
//! contract every backend satisfies.
//!
//! # Backends
//!
//! - [`StandInBackend`] - random demonstration generator with simulated latency
//! - [`HttpBackend`] - remote lookup service over HTTP
//!
//! The breach store in `leakcheck-db` provides a third, local backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use leakcheck_lookup::{SessionController, StandInBackend, TracingNotifier};
//!
//! let backend = Arc::new(StandInBackend::new(Arc::new(TokioDelay), Duration::from_millis(1500)));
//! let session = SessionController::new(backend, Arc::new(TracingNotifier));
//!
//! let result = session.submit_raw("a@b.com", QueryKind::Email).await?;
//! println!("{}", result.severity());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod delay;
pub mod error;
pub mod http;
pub mod normalizer;
pub mod notify;
pub mod session;
pub mod standin;

// Re-export commonly used types
pub use backend::LookupBackend;
pub use delay::{Delay, NoDelay, TokioDelay};
pub use error::{LookupError, Result, SubmitError};
pub use http::HttpBackend;
pub use normalizer::Normalizer;
pub use notify::{NoticeLevel, Notifier, TracingNotifier};
pub use session::{PendingLookup, SessionController, SessionState};
pub use standin::{classify_roll, StandInBackend};
