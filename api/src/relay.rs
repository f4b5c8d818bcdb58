use async_trait::async_trait;
use gloo_net::http::Request;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::form::FormPayload;

// anything other than a 2xx from the relay, or a failure to reach it at all
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("form relay rejected the submission with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("failed to build form body: {0}")]
    Body(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

// a destination for contact form submissions
//
// the browser is single threaded and gloo futures are !Send, hence ?Send
#[async_trait(?Send)]
pub trait FormRelay {
    async fn submit(&self, payload: &FormPayload) -> Result<(), SubmitError>;
}

// posts the form as multipart/form-data to a fixed url, asking for json back
//
// the response body is never interpreted; the status code alone decides the outcome
#[derive(Clone, Debug)]
pub struct HttpRelay {
    endpoint: String,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpRelay {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl FormRelay for HttpRelay {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, fields = payload.len()))]
    async fn submit(&self, payload: &FormPayload) -> Result<(), SubmitError> {
        let body = payload
            .to_form_data()
            .map_err(|err| SubmitError::Body(format!("{err:?}")))?;

        // no content-type header here: fetch() fills in the multipart boundary
        let resp = Request::post(&self.endpoint)
            .header("Accept", "application/json")
            .body(body)
            .map_err(|err| SubmitError::Body(err.to_string()))?
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        debug!(status = resp.status(), "form relay responded");

        if resp.ok() {
            Ok(())
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();

            Err(SubmitError::Rejected { status, body })
        }
    }
}
