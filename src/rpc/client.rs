// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed RPC client.
//!
//! [`RpcClient::invoke`] is the whole adapter: encode the call, ship it over
//! the transport, decode the response and either unwrap the result's value or
//! surface an error payload as [`RpcError::RemoteApplicationError`].
//! [`ServiceClient`] layers one named method per operation on top.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::core::{Message, ObjectRef, Registry, Value};
use crate::encoding::ObjectCodec;
use crate::rpc::config::ClientConfig;
use crate::rpc::error::{RpcError, RpcResult};
use crate::rpc::transport::{Request, Transport};
use crate::schema::SchemaMessage;
use crate::service::{
    AtomPath, Call, CallFollow, CallGet, CallGetAvailableStringTables, CallGetCaptures,
    CallGetDevices, CallGetFeatures, CallGetFramebufferColor, CallGetFramebufferDepth,
    CallGetSchema, CallGetStringTable, CallGetTimingInfo, CallImportCapture, CallLoadCapture,
    CallRegisterAndroidDevice, CallResult, CallSet, CapturePath, DevicePath, ImageInfoPath, Info,
    RenderSettings, StringTable, TimingFlags, TimingInfoPath,
};

/// The trace service operations.
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Resolve a path to the path it links to.
    async fn follow(&self, path: ObjectRef) -> RpcResult<Option<ObjectRef>>;

    /// Fetch the value a path points at.
    async fn get(&self, path: ObjectRef) -> RpcResult<Value>;

    /// Store a value at a path, returning the path to the modified data.
    async fn set(&self, path: ObjectRef, value: Value) -> RpcResult<Option<ObjectRef>>;

    async fn get_available_string_tables(&self) -> RpcResult<Vec<Info>>;

    async fn get_captures(&self) -> RpcResult<Vec<CapturePath>>;

    async fn get_devices(&self) -> RpcResult<Vec<DevicePath>>;

    async fn get_features(&self) -> RpcResult<Vec<String>>;

    async fn get_framebuffer_color(
        &self,
        device: DevicePath,
        after: AtomPath,
        settings: RenderSettings,
    ) -> RpcResult<Option<ImageInfoPath>>;

    async fn get_framebuffer_depth(
        &self,
        device: DevicePath,
        after: AtomPath,
    ) -> RpcResult<Option<ImageInfoPath>>;

    async fn get_schema(&self) -> RpcResult<SchemaMessage>;

    async fn get_string_table(&self, info: Info) -> RpcResult<StringTable>;

    async fn get_timing_info(
        &self,
        device: DevicePath,
        capture: CapturePath,
        flags: TimingFlags,
    ) -> RpcResult<Option<TimingInfoPath>>;

    async fn import_capture(&self, name: &str, data: Vec<u8>) -> RpcResult<Option<CapturePath>>;

    async fn load_capture(&self, path: &str) -> RpcResult<Option<CapturePath>>;

    async fn register_android_device(&self, serial: &str) -> RpcResult<Option<DevicePath>>;
}

/// Client adapter over any [`Transport`].
pub struct RpcClient<T: Transport> {
    transport: T,
    codec: ObjectCodec,
    auth_token: String,
}

impl<T: Transport> RpcClient<T> {
    pub fn new(transport: T, registry: Arc<Registry>, auth_token: impl Into<String>) -> Self {
        Self::with_config(transport, registry, &ClientConfig::new(auth_token))
    }

    pub fn with_config(transport: T, registry: Arc<Registry>, config: &ClientConfig) -> Self {
        Self {
            transport,
            codec: ObjectCodec::with_config(registry, config.codec),
            auth_token: config.auth_token.clone(),
        }
    }

    pub fn codec(&self) -> &ObjectCodec {
        &self.codec
    }

    /// Issue one call and return the result's value.
    pub async fn invoke<C: Call>(&self, call: C) -> RpcResult<<C::Result as CallResult>::Value> {
        let request = Request {
            request: self.codec.encode(&call)?,
            token: self.auth_token.clone(),
        };
        debug!(method = C::METHOD, bytes = request.request.len(), "sending call");
        let response = self.transport.call(C::METHOD, request).await?;

        let expected = <C::Result as Message>::NAME;
        let payload = self.codec.decode(&response.response)?.ok_or_else(|| {
            RpcError::UnexpectedResponse {
                expected: expected.to_string(),
                actual: "null".to_string(),
            }
        })?;
        let payload = match RpcError::from_payload(payload) {
            Ok(err) => {
                debug!(method = C::METHOD, error = %err, "remote error");
                return Err(err);
            }
            Err(payload) => payload,
        };

        let actual = payload.type_name();
        let result = payload
            .downcast::<C::Result>()
            .ok_or(RpcError::UnexpectedResponse {
                expected: expected.to_string(),
                actual,
            })?;
        Ok((*result).into_value())
    }
}

#[async_trait]
impl<T: Transport> ServiceClient for RpcClient<T> {
    async fn follow(&self, path: ObjectRef) -> RpcResult<Option<ObjectRef>> {
        self.invoke(CallFollow { p: Some(path) }).await
    }

    async fn get(&self, path: ObjectRef) -> RpcResult<Value> {
        self.invoke(CallGet { p: Some(path) }).await
    }

    async fn set(&self, path: ObjectRef, value: Value) -> RpcResult<Option<ObjectRef>> {
        self.invoke(CallSet {
            p: Some(path),
            v: value,
        })
        .await
    }

    async fn get_available_string_tables(&self) -> RpcResult<Vec<Info>> {
        self.invoke(CallGetAvailableStringTables {}).await
    }

    async fn get_captures(&self) -> RpcResult<Vec<CapturePath>> {
        self.invoke(CallGetCaptures {}).await
    }

    async fn get_devices(&self) -> RpcResult<Vec<DevicePath>> {
        self.invoke(CallGetDevices {}).await
    }

    async fn get_features(&self) -> RpcResult<Vec<String>> {
        self.invoke(CallGetFeatures {}).await
    }

    async fn get_framebuffer_color(
        &self,
        device: DevicePath,
        after: AtomPath,
        settings: RenderSettings,
    ) -> RpcResult<Option<ImageInfoPath>> {
        self.invoke(CallGetFramebufferColor {
            device: Some(device),
            after: Some(after),
            settings,
        })
        .await
    }

    async fn get_framebuffer_depth(
        &self,
        device: DevicePath,
        after: AtomPath,
    ) -> RpcResult<Option<ImageInfoPath>> {
        self.invoke(CallGetFramebufferDepth {
            device: Some(device),
            after: Some(after),
        })
        .await
    }

    async fn get_schema(&self) -> RpcResult<SchemaMessage> {
        self.invoke(CallGetSchema {}).await
    }

    async fn get_string_table(&self, info: Info) -> RpcResult<StringTable> {
        self.invoke(CallGetStringTable { info }).await
    }

    async fn get_timing_info(
        &self,
        device: DevicePath,
        capture: CapturePath,
        flags: TimingFlags,
    ) -> RpcResult<Option<TimingInfoPath>> {
        self.invoke(CallGetTimingInfo {
            device: Some(device),
            capture: Some(capture),
            flags,
        })
        .await
    }

    async fn import_capture(&self, name: &str, data: Vec<u8>) -> RpcResult<Option<CapturePath>> {
        self.invoke(CallImportCapture {
            name: name.to_string(),
            data,
        })
        .await
    }

    async fn load_capture(&self, path: &str) -> RpcResult<Option<CapturePath>> {
        self.invoke(CallLoadCapture {
            path: path.to_string(),
        })
        .await
    }

    async fn register_android_device(&self, serial: &str) -> RpcResult<Option<DevicePath>> {
        self.invoke(CallRegisterAndroidDevice {
            serial: serial.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::transport::Response;
    use crate::service::{self, ErrInvalidArgument};

    /// Answers every call with a fixed object.
    struct Canned(Vec<u8>);

    #[async_trait]
    impl Transport for Canned {
        async fn call(&self, _method: &str, _request: Request) -> RpcResult<Response> {
            Ok(Response {
                response: self.0.clone(),
            })
        }
    }

    fn client_answering(obj: &dyn crate::core::BinaryObject) -> RpcClient<Canned> {
        let registry = Arc::new(service::registry().unwrap());
        let bytes = ObjectCodec::new(Arc::clone(&registry)).encode(obj).unwrap();
        RpcClient::new(Canned(bytes), registry, "token")
    }

    #[tokio::test]
    async fn test_unwraps_result_value() {
        let client = client_answering(&service::ResultGetFeatures {
            value: vec!["replay".into()],
        });
        assert_eq!(client.get_features().await.unwrap(), vec!["replay"]);
    }

    #[tokio::test]
    async fn test_error_payload_is_raised() {
        let client = client_answering(&ErrInvalidArgument::new("bad serial"));
        let err = client.register_android_device("x").await.unwrap_err();
        assert!(err.is_remote());
        assert_eq!(
            err.payload_as::<ErrInvalidArgument>().unwrap().reason,
            "bad serial"
        );
    }

    #[tokio::test]
    async fn test_wrong_result_type() {
        let client = client_answering(&service::ResultGetFeatures::default());
        let err = client.get_devices().await.unwrap_err();
        match err {
            RpcError::UnexpectedResponse { expected, actual } => {
                assert_eq!(expected, "service.resultGetDevices");
                assert_eq!(actual, "service.resultGetFeatures");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_response() {
        let registry = Arc::new(service::registry().unwrap());
        let client = RpcClient::new(Canned(vec![0xff; 3]), registry, "token");
        assert!(matches!(
            client.get_captures().await,
            Err(RpcError::Codec(_))
        ));
    }
}
