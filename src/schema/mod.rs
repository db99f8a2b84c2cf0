// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema reflection.
//!
//! This module provides:
//! - [`Entity`] - Reflective description of one message type
//! - [`Type`] / [`Method`] - Field wire types
//! - [`StaticEntity`] - Lazily built entity for compiled messages
//! - [`DynamicObject`] - Objects laid out by a runtime entity
//! - [`SchemaMessage`] - Entity list exchanged between peers

pub mod dynamic;
pub mod entity;
pub mod message;

pub use dynamic::DynamicObject;
pub use entity::{Entity, Field, Method, StaticEntity, Type};
pub use message::SchemaMessage;
