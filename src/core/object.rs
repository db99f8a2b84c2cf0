// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Object traits.
//!
//! [`BinaryObject`] is the object-safe face of anything the codec can carry
//! behind an identity tag. Compiled message types implement the static
//! [`Message`] trait instead and get `BinaryObject` through a blanket impl;
//! schema-driven objects implement `BinaryObject` directly.

use std::any::Any;
use std::fmt;

use crate::core::error::Result;
use crate::core::id::TypeId;
use crate::encoding::{Decoder, Encoder};
use crate::schema::Entity;

/// A value the codec can encode behind its [`TypeId`].
pub trait BinaryObject: fmt::Debug + Send + Sync + 'static {
    /// Wire identity of this object's type.
    fn identity(&self) -> TypeId;

    /// Human readable type name, used in errors and logs.
    fn type_name(&self) -> String;

    /// Write this object's fields in declared order.
    fn encode(&self, e: &mut Encoder<'_>) -> Result<()>;

    /// Read fields in declared order into this (freshly created) object.
    fn decode(&mut self, d: &mut Decoder<'_>) -> Result<()>;

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Owned upcast for downcasting to the concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clone behind a box.
    fn clone_object(&self) -> Box<dyn BinaryObject>;

    /// Field-by-field equality against another object of any type.
    fn eq_object(&self, other: &dyn BinaryObject) -> bool;

    /// Returns the error view if this object is an application error payload.
    fn as_remote_error(&self) -> Option<&dyn RemoteError> {
        None
    }
}

/// A compiled message type with a fixed identity and field order.
pub trait Message: fmt::Debug + Default + Clone + PartialEq + Send + Sync + 'static {
    /// Fully qualified name, e.g. `service.Device`.
    const NAME: &'static str;

    /// Wire identity of the type.
    fn type_identity() -> TypeId;

    /// Schema descriptor for entity-keyed types.
    fn entity() -> Option<&'static Entity> {
        None
    }

    /// Write fields in declared order.
    fn encode_fields(&self, e: &mut Encoder<'_>) -> Result<()>;

    /// Read fields in declared order.
    fn decode_fields(&mut self, d: &mut Decoder<'_>) -> Result<()>;

    /// Returns the error view if this message is an application error payload.
    fn remote_error(&self) -> Option<&dyn RemoteError> {
        None
    }
}

impl<T: Message> BinaryObject for T {
    fn identity(&self) -> TypeId {
        T::type_identity()
    }

    fn type_name(&self) -> String {
        T::NAME.to_string()
    }

    fn encode(&self, e: &mut Encoder<'_>) -> Result<()> {
        self.encode_fields(e)
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> Result<()> {
        self.decode_fields(d)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_object(&self) -> Box<dyn BinaryObject> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn BinaryObject) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_remote_error(&self) -> Option<&dyn RemoteError> {
        self.remote_error()
    }
}

/// An application-level error carried as a response payload.
pub trait RemoteError: fmt::Debug + Send + Sync {
    /// Short kind name, e.g. `ErrDataUnavailable`.
    fn kind(&self) -> &'static str;

    /// Human readable error message.
    fn message(&self) -> String;
}

impl dyn BinaryObject {
    /// True if the concrete type is `T`.
    pub fn is<T: BinaryObject>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow as the concrete type `T`.
    pub fn downcast_ref<T: BinaryObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Convert into the concrete type `T`.
    pub fn downcast<T: BinaryObject>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

impl PartialEq for dyn BinaryObject {
    fn eq(&self, other: &Self) -> bool {
        self.eq_object(other)
    }
}

impl Clone for Box<dyn BinaryObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

/// An owned, type-erased object.
pub type ObjectRef = Box<dyn BinaryObject>;
