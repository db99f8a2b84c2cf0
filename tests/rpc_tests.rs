// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! End-to-end RPC tests: typed client, transports and server dispatch.

mod common;

use std::sync::{Arc, Mutex};

use rpclib::rpc::{
    ChannelTransport, LocalTransport, RpcClient, RpcError, Server, ServiceClient,
    Transport,
};
use rpclib::service::{
    self, AtomPath, CallFollow, CallGet, CallGetAvailableStringTables, CallGetCaptures,
    CallGetDevices, CallGetFeatures, CallGetFramebufferColor, CallGetSchema, CallGetStringTable,
    CallGetTimingInfo, CallImportCapture, CallRegisterAndroidDevice, CallSet, CapturePath, Device,
    DevicePath, ErrDataUnavailable, ErrInvalidArgument, ErrInvalidPath, ErrPathNotFollowable,
    ImageInfoPath, Info, RenderSettings, RpcException, StringTable, TimingFlags, TimingInfoPath,
};
use rpclib::{BinaryObject, ObjectRef, Registry, TypeId, Value};

use common::{atom, capture, catalog, pixel};

const TOKEN: &str = "s3cret";

fn invalid_path(reason: &str, path: Option<ObjectRef>) -> ObjectRef {
    Box::new(ErrInvalidPath::new(reason, path))
}

/// A small in-memory trace service.
fn service_server(registry: Arc<Registry>) -> Server {
    let captures: Arc<Mutex<Vec<CapturePath>>> = Arc::new(Mutex::new(Vec::new()));
    let devices = vec![DevicePath::new(TypeId::from_name("pixel"))];
    let schema = service::schema(&registry);

    let mut server = Server::new(registry, TOKEN);

    server.route::<CallGet, _>(|call| {
        let Some(path) = call.p else {
            return Err(invalid_path("null path", None));
        };
        if path.is::<DevicePath>() {
            return Ok(Value::object(pixel()));
        }
        if let Some(atom) = path.downcast_ref::<AtomPath>() {
            return Ok(Value::Uint64(atom.index));
        }
        Err(invalid_path("unsupported path", Some(path)))
    });

    server.route::<CallSet, _>(|call| match call.v {
        Value::Null => Err(Box::new(ErrInvalidArgument::new("null value")) as ObjectRef),
        _ => Ok(call.p),
    });

    server.route::<CallFollow, _>(|call| {
        let path = call.p;
        match path.as_deref().and_then(|p| p.downcast_ref::<AtomPath>()) {
            Some(atom) => Ok(atom
                .atoms
                .as_ref()
                .and_then(|atoms| atoms.capture.clone())
                .and_then(service::path::boxed)),
            None => Err(Box::new(ErrPathNotFollowable { path }) as ObjectRef),
        }
    });

    let store = Arc::clone(&captures);
    server.route::<CallImportCapture, _>(move |call| {
        if call.data.is_empty() {
            return Err(Box::new(ErrInvalidArgument::new("empty capture")) as ObjectRef);
        }
        let path = CapturePath::new(TypeId::from_name(&call.name));
        store.lock().unwrap().push(path.clone());
        Ok(Some(path))
    });

    let store = Arc::clone(&captures);
    server.route::<CallGetCaptures, _>(move |_| Ok(store.lock().unwrap().clone()));

    server.route::<CallGetDevices, _>(move |_| Ok(devices.clone()));

    server.route::<CallGetFeatures, _>(|_| Ok(vec!["timing".into(), "framebuffer".into()]));

    server.route::<CallGetSchema, _>(move |_| Ok(schema.clone()));

    server.route::<CallGetAvailableStringTables, _>(|_| {
        Ok(vec![Info {
            culture_code: "en-us".into(),
            entry_count: 1,
        }])
    });

    server.route::<CallGetStringTable, _>(|call| {
        if call.info.culture_code != "en-us" {
            return Err(Box::new(ErrDataUnavailable::new("no such table")) as ObjectRef);
        }
        Ok(StringTable {
            info: call.info,
            entries: [("OK".to_string(), "ok".to_string())].into(),
        })
    });

    server.route::<CallGetFramebufferColor, _>(|call| {
        let after = call.after.ok_or_else(|| invalid_path("missing atom", None))?;
        Ok(Some(ImageInfoPath {
            id: TypeId::from_name(&format!(
                "fb-{}-{}x{}",
                after.index, call.settings.max_width, call.settings.max_height
            )),
        }))
    });

    server.route::<CallGetTimingInfo, _>(|call| {
        if call.flags.contains(TimingFlags::PER_FRAME) {
            let mut err = ErrDataUnavailable::new("per-frame timing not captured");
            err.transient = true;
            return Err(Box::new(err) as ObjectRef);
        }
        Ok(call.capture.map(|c| TimingInfoPath { id: c.id }))
    });

    server.route::<CallRegisterAndroidDevice, _>(|call| {
        Ok(Some(DevicePath::new(TypeId::from_name(&call.serial))))
    });

    server
}

fn local_client(registry: Arc<Registry>) -> RpcClient<LocalTransport> {
    let server = Arc::new(service_server(Arc::clone(&registry)));
    RpcClient::new(LocalTransport::new(server), registry, TOKEN)
}

#[tokio::test]
async fn test_get_returns_boxed_runtime_type() {
    let client = local_client(catalog());

    let device_path = service::path::boxed(DevicePath::new(TypeId::from_name("pixel"))).unwrap();
    let value = client.get(device_path).await.unwrap();
    let device = value.downcast_ref::<Device>().expect("a Device");
    assert_eq!(device, &pixel());
    assert_eq!(device.max_memory_size, 4_294_967_296);

    let atom_path = service::path::boxed(atom("capture-1", 12)).unwrap();
    let value = client.get(atom_path).await.unwrap();
    assert_eq!(value, Value::Uint64(12));
}

#[tokio::test]
async fn test_remote_error_is_typed() {
    let client = local_client(catalog());
    let path = service::path::boxed(capture("c")).unwrap();
    let err = client.get(path).await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(err.to_string(), "ErrInvalidPath: invalid path: unsupported path");
    let payload = err.payload_as::<ErrInvalidPath>().unwrap();
    let echoed = payload.path.as_deref().unwrap();
    assert_eq!(echoed.downcast_ref::<CapturePath>(), Some(&capture("c")));
}

#[tokio::test]
async fn test_follow() {
    let client = local_client(catalog());
    let followed = client
        .follow(service::path::boxed(atom("capture-1", 3)).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        followed.downcast_ref::<CapturePath>(),
        Some(&capture("capture-1"))
    );

    let err = client
        .follow(service::path::boxed(capture("capture-1")).unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "ErrPathNotFollowable: path path.Capture is not followable"
    );
}

#[tokio::test]
async fn test_set() {
    let client = local_client(catalog());
    let path = service::path::boxed(atom("c", 1)).unwrap();
    let updated = client
        .set(path.clone(), Value::from("new"))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.eq_object(path.as_ref()));

    let err = client.set(path, Value::Null).await.unwrap_err();
    assert!(err.payload_as::<ErrInvalidArgument>().is_some());
}

#[tokio::test]
async fn test_capture_lifecycle() {
    let client = local_client(catalog());
    assert!(client.get_captures().await.unwrap().is_empty());

    let first = client
        .import_capture("first.gfxtrace", vec![1, 2, 3])
        .await
        .unwrap()
        .unwrap();
    client
        .import_capture("second.gfxtrace", vec![4])
        .await
        .unwrap();
    assert_eq!(first, CapturePath::new(TypeId::from_name("first.gfxtrace")));

    let captures = client.get_captures().await.unwrap();
    assert_eq!(captures.len(), 2);
    assert_eq!(captures[0], first);

    let err = client.import_capture("empty", Vec::new()).await.unwrap_err();
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_catalog_queries() {
    let client = local_client(catalog());
    assert_eq!(
        client.get_features().await.unwrap(),
        vec!["timing", "framebuffer"]
    );
    assert_eq!(client.get_devices().await.unwrap().len(), 1);

    let schema = client.get_schema().await.unwrap();
    assert!(schema.find("service", "callGetSchema").is_some());

    let tables = client.get_available_string_tables().await.unwrap();
    let table = client.get_string_table(tables[0].clone()).await.unwrap();
    assert_eq!(table.get("OK"), Some("ok"));

    let err = client
        .get_string_table(Info {
            culture_code: "xx".into(),
            entry_count: 0,
        })
        .await
        .unwrap_err();
    let payload = err.payload_as::<ErrDataUnavailable>().unwrap();
    assert!(!payload.transient);
}

#[tokio::test]
async fn test_framebuffer_and_timing() {
    let client = local_client(catalog());
    let device = client.register_android_device("emulator-5554").await.unwrap().unwrap();

    let image = client
        .get_framebuffer_color(
            device.clone(),
            atom("c", 10),
            RenderSettings {
                max_width: 64,
                max_height: 32,
                wireframe: false,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(image.id, TypeId::from_name("fb-10-64x32"));

    let timing = client
        .get_timing_info(device.clone(), capture("c"), TimingFlags::GPU)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(timing.id, TypeId::from_name("c"));

    let err = client
        .get_timing_info(device, capture("c"), TimingFlags::PER_FRAME)
        .await
        .unwrap_err();
    assert!(err.payload_as::<ErrDataUnavailable>().unwrap().transient);
}

#[tokio::test]
async fn test_bad_token() {
    let registry = catalog();
    let server = Arc::new(service_server(Arc::clone(&registry)));
    let client = RpcClient::new(LocalTransport::new(server), registry, "wrong");
    let err = client.get_features().await.unwrap_err();
    assert_eq!(
        err.payload_as::<RpcException>().unwrap().message,
        "invalid auth token"
    );
}

#[tokio::test]
async fn test_unrouted_call() {
    let client = local_client(catalog());
    let err = client.load_capture("missing.gfxtrace").await.unwrap_err();
    match err {
        RpcError::RemoteApplicationError { kind, message, .. } => {
            assert_eq!(kind, "RpcException");
            assert!(message.contains("service.callLoadCapture"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_channel_transport() {
    let registry = catalog();
    let server = Arc::new(service_server(Arc::clone(&registry)));
    let transport = ChannelTransport::spawn(server, 4);
    let client = RpcClient::new(transport, registry, TOKEN);

    assert_eq!(client.get_features().await.unwrap().len(), 2);
    let value = client
        .get(service::path::boxed(atom("c", 99)).unwrap())
        .await
        .unwrap();
    assert_eq!(value, Value::Uint64(99));
}

#[tokio::test]
async fn test_channel_server_survives_handler_panic() {
    let registry = catalog();
    let mut server = Server::new(Arc::clone(&registry), TOKEN);
    server.route::<CallGetFeatures, _>(|_| panic!("feature table corrupt"));
    server.route::<CallGetDevices, _>(|_| Ok(Vec::new()));
    let client = RpcClient::new(ChannelTransport::spawn(Arc::new(server), 4), registry, TOKEN);

    for _ in 0..2 {
        match client.get_features().await.unwrap_err() {
            RpcError::RemoteApplicationError { kind, message, .. } => {
                assert_eq!(kind, "RpcException");
                assert!(message.contains("feature table corrupt"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(client.get_devices().await.unwrap().is_empty());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_calls() {
    let registry = catalog();
    let server = Arc::new(service_server(Arc::clone(&registry)));
    let client = Arc::new(RpcClient::new(
        ChannelTransport::spawn(server, 8),
        registry,
        TOKEN,
    ));

    let handles: Vec<_> = (0..16u64)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                let value = client
                    .get(service::path::boxed(atom("c", i)).unwrap())
                    .await
                    .unwrap();
                assert_eq!(value, Value::Uint64(i));
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }
}

/// Transport that fails every call.
struct Offline;

#[async_trait::async_trait]
impl Transport for Offline {
    async fn call(
        &self,
        _method: &str,
        _request: rpclib::rpc::Request,
    ) -> rpclib::rpc::RpcResult<rpclib::rpc::Response> {
        Err(RpcError::Transport("connection refused".into()))
    }
}

#[tokio::test]
async fn test_transport_failure_shares_error_channel() {
    let client = RpcClient::new(Offline, catalog(), TOKEN);
    let err = client.get_devices().await.unwrap_err();
    assert!(matches!(err, RpcError::Transport(_)));
    assert!(!err.is_remote());
}
