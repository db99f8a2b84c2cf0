// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Call dispatcher.
//!
//! The server decodes each request into a call object, routes it by identity
//! to the handler registered for that call type and encodes whatever comes
//! back: the result message on success, the handler's error payload on
//! failure, or an [`RpcException`] when the request never reached a handler
//! or the handler panicked.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{CodecConfig, ObjectRef, Registry, TypeId};
use crate::encoding::{Encoder, ObjectCodec};
use crate::rpc::transport::{Request, Response};
use crate::service::{Call, CallResult, RpcException};

/// Outcome of a handler: the return value, or an error payload object.
pub type HandlerResult<T> = Result<T, ObjectRef>;

type Handler = Box<dyn Fn(ObjectRef) -> HandlerResult<ObjectRef> + Send + Sync>;

struct Route {
    method: &'static str,
    handler: Handler,
}

/// Routes decoded calls to typed handlers.
pub struct Server {
    codec: ObjectCodec,
    auth_token: String,
    routes: HashMap<TypeId, Route>,
}

impl Server {
    /// Create a server with default codec limits.
    pub fn new(registry: Arc<Registry>, auth_token: impl Into<String>) -> Self {
        Self::with_config(registry, auth_token, CodecConfig::default())
    }

    /// Create a server with explicit codec limits.
    pub fn with_config(
        registry: Arc<Registry>,
        auth_token: impl Into<String>,
        config: CodecConfig,
    ) -> Self {
        Self {
            codec: ObjectCodec::with_config(registry, config),
            auth_token: auth_token.into(),
            routes: HashMap::new(),
        }
    }

    /// Install the handler for call type `C`, replacing any previous one.
    pub fn route<C, F>(&mut self, handler: F) -> &mut Self
    where
        C: Call,
        F: Fn(C) -> HandlerResult<<C::Result as CallResult>::Value> + Send + Sync + 'static,
    {
        let handler: Handler = Box::new(move |call: ObjectRef| {
            let actual = call.type_name();
            let call = call.downcast::<C>().ok_or_else(|| {
                Box::new(RpcException::new(format!(
                    "handler for {} received {actual}",
                    C::NAME
                ))) as ObjectRef
            })?;
            let value = handler(*call)?;
            Ok(Box::new(<C::Result as CallResult>::from_value(value)) as ObjectRef)
        });
        self.routes.insert(
            C::type_identity(),
            Route {
                method: C::METHOD,
                handler,
            },
        );
        self
    }

    /// Number of routed call types.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Handle one request envelope. Never fails: every problem is reported
    /// to the caller as an encoded error object.
    pub fn handle(&self, method: &str, request: Request) -> Response {
        let payload = self.dispatch(method, &request);
        match self.codec.encode(payload.as_ref()) {
            Ok(response) => Response { response },
            Err(err) => {
                warn!(method, error = %err, "failed to encode response");
                Response {
                    response: encode_exception(&format!("failed to encode response: {err}")),
                }
            }
        }
    }

    fn dispatch(&self, method: &str, request: &Request) -> ObjectRef {
        if request.token != self.auth_token {
            warn!(method, "rejected request with invalid auth token");
            return exception("invalid auth token");
        }

        let call = match self.codec.decode(&request.request) {
            Ok(Some(call)) => call,
            Ok(None) => return exception("null request"),
            Err(err) => {
                warn!(method, error = %err, "failed to decode request");
                return exception(format!("failed to decode request: {err}"));
            }
        };

        let Some(route) = self.routes.get(&call.identity()) else {
            warn!(method, call = %call.type_name(), "no handler for call");
            return exception(format!("no handler for {}", call.type_name()));
        };
        if route.method != method {
            warn!(method, expected = route.method, "call sent to wrong method");
            return exception(format!(
                "method {method} does not accept {}",
                call.type_name()
            ));
        }

        debug!(method, call = %call.type_name(), "dispatching call");
        match panic::catch_unwind(AssertUnwindSafe(|| (route.handler)(call))) {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => {
                debug!(method, error = %error.type_name(), "handler returned error");
                error
            }
            Err(payload) => {
                let reason = panic_message(&*payload);
                warn!(method, reason, "handler panicked");
                exception(format!("handler for {method} panicked: {reason}"))
            }
        }
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("routes", &self.routes.len())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

fn exception(message: impl Into<String>) -> ObjectRef {
    Box::new(RpcException::new(message))
}

// Bypasses strict encoding so the fallback always produces a payload.
fn encode_exception(message: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    let exception = RpcException::new(message);
    if Encoder::new(&mut buf).object(Some(&exception)).is_err() {
        buf.clear();
    }
    buf
}
