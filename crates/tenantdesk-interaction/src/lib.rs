pub mod api;
pub mod dispatcher;
pub mod request;
#[cfg(any(test, feature = "test-util"))]
pub mod stub;
pub mod transport;

pub use api::ConsoleApi;
pub use dispatcher::{Dispatcher, LoginGrant, LoginOutcome};
pub use request::{ApiRequest, Method, RequestContext, ResponseShape};
#[cfg(any(test, feature = "test-util"))]
pub use stub::StubTransport;
pub use transport::{RawResponse, ReqwestTransport, Transport};
