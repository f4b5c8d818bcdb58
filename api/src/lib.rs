// the outbound side of the contact form
//
// the page only ever talks to a single third-party form relay, so there is no
// request/response schema here beyond a flat list of form fields and the
// http status the relay answers with
pub mod form;
pub mod relay;

pub use form::FormPayload;
pub use relay::{FormRelay, HttpRelay, SubmitError};
