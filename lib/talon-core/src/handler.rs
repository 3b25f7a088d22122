//! Pre-send and post-receive handler contracts.
//!
//! Handlers form ordered chains the dispatcher walks strictly
//! sequentially, awaiting each invocation before the next. A failing
//! handler aborts the dispatch and its error propagates unmodified.

use crate::{BoxFuture, Response, Result, TransportRequest};

/// Inspects or mutates the outgoing message before it is sent.
///
/// Request handlers run after authentication and translation, in
/// registration order, never concurrently. A handler may suspend (for
/// example to fetch a credential); cancellation during handler execution
/// is cooperative.
pub trait RequestHandler: Send + Sync {
    /// Handle the outgoing message.
    fn handle<'a>(&'a self, message: &'a mut TransportRequest) -> BoxFuture<'a, Result<()>>;
}

/// Inspects the response after it is received.
///
/// Response handlers run in registration order and may not replace the
/// response; they observe it.
pub trait ResponseHandler: Send + Sync {
    /// Handle the received response.
    fn handle<'a>(&'a self, response: &'a Response) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::{Error, Method};

    use super::*;

    struct TagHeader(&'static str);

    impl RequestHandler for TagHeader {
        fn handle<'a>(&'a self, message: &'a mut TransportRequest) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                message.set_header("X-Tag", self.0);
                Ok(())
            })
        }
    }

    struct AlwaysFails;

    impl RequestHandler for AlwaysFails {
        fn handle<'a>(&'a self, _message: &'a mut TransportRequest) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move { Err(Error::validation("rejected by handler")) })
        }
    }

    fn message() -> TransportRequest {
        TransportRequest {
            method: Method::Get,
            url: Url::parse("http://example.com/").expect("url"),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn handler_mutates_message() {
        let mut message = message();
        let handler = TagHeader("one");
        futures_executor_block_on(handler.handle(&mut message)).expect("handled");
        assert_eq!(message.header("X-Tag"), Some("one"));
    }

    #[test]
    fn handler_failure_surfaces() {
        let mut message = message();
        let err = futures_executor_block_on(AlwaysFails.handle(&mut message)).expect_err("fails");
        assert!(err.is_validation());
    }

    /// Minimal block-on for futures that never actually suspend.
    fn futures_executor_block_on<F: std::future::Future>(future: F) -> F::Output {
        use std::pin::pin;
        use std::task::{Context, Poll, Waker};

        let mut future = pin!(future);
        let mut context = Context::from_waker(Waker::noop());
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => output,
            Poll::Pending => unreachable!("test futures complete immediately"),
        }
    }
}
