// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The service message catalog.
//!
//! Every type the trace service exchanges: devices, paths, settings, string
//! tables, vertex formats, error payloads and one call/result pair per RPC.
//! [`register_all`] adds the whole catalog to a registry.

#[macro_use]
mod macros;

pub mod calls;
pub mod device;
pub mod errors;
pub mod path;
pub mod settings;
pub mod stringtable;
pub mod vertex;

pub use calls::*;
pub use device::{Device, DEVICE_ID};
pub use errors::{
    ErrDataUnavailable, ErrInvalidArgument, ErrInvalidPath, ErrPathNotFollowable, RpcException,
};
pub use path::{AtomPath, AtomsPath, CapturePath, DevicePath, ImageInfoPath, TimingInfoPath};
pub use settings::{RenderSettings, TimingFlags};
pub use stringtable::{Info, StringTable};
pub use vertex::{FmtPackedUint32, VectorElement};

use tracing::debug;

use crate::core::{Registry, Result};
use crate::schema::SchemaMessage;

/// Register every catalog type.
pub fn register_all(registry: &mut Registry) -> Result<()> {
    registry.register::<Device>()?;
    registry.register::<SchemaMessage>()?;

    registry.register::<CapturePath>()?;
    registry.register::<DevicePath>()?;
    registry.register::<AtomsPath>()?;
    registry.register::<AtomPath>()?;
    registry.register::<ImageInfoPath>()?;
    registry.register::<TimingInfoPath>()?;

    registry.register::<RenderSettings>()?;
    registry.register::<Info>()?;
    registry.register::<StringTable>()?;
    registry.register::<FmtPackedUint32>()?;

    registry.register::<ErrDataUnavailable>()?;
    registry.register::<ErrInvalidPath>()?;
    registry.register::<ErrInvalidArgument>()?;
    registry.register::<ErrPathNotFollowable>()?;
    registry.register::<RpcException>()?;

    register_call::<CallFollow>(registry)?;
    register_call::<CallGet>(registry)?;
    register_call::<CallSet>(registry)?;
    register_call::<CallGetAvailableStringTables>(registry)?;
    register_call::<CallGetCaptures>(registry)?;
    register_call::<CallGetDevices>(registry)?;
    register_call::<CallGetFeatures>(registry)?;
    register_call::<CallGetFramebufferColor>(registry)?;
    register_call::<CallGetFramebufferDepth>(registry)?;
    register_call::<CallGetSchema>(registry)?;
    register_call::<CallGetStringTable>(registry)?;
    register_call::<CallGetTimingInfo>(registry)?;
    register_call::<CallImportCapture>(registry)?;
    register_call::<CallLoadCapture>(registry)?;
    register_call::<CallRegisterAndroidDevice>(registry)?;

    debug!(classes = registry.len(), "registered service catalog");
    Ok(())
}

fn register_call<C: Call>(registry: &mut Registry) -> Result<()> {
    registry.register::<C>()?;
    registry.register::<C::Result>()
}

/// A fresh registry holding the whole catalog.
pub fn registry() -> Result<Registry> {
    Registry::with_builtin_types()
}

impl Registry {
    /// Create a registry with every service catalog type registered.
    pub fn with_builtin_types() -> Result<Registry> {
        let mut registry = Registry::new();
        register_all(&mut registry)?;
        Ok(registry)
    }
}

/// Schema of every entity-keyed catalog type, as served by `getSchema`.
pub fn schema(registry: &Registry) -> SchemaMessage {
    SchemaMessage::new(registry.entities().into_iter().cloned().collect())
}
