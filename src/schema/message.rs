// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema payload exchanged between peers.

use std::sync::OnceLock;

use serde::Serialize;

use crate::core::{Message, Result, TypeId};
use crate::encoding::{Decoder, Encoder};
use crate::schema::entity::Entity;

/// A set of entity descriptions, as returned by the `getSchema` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaMessage {
    /// Entities in the order the server listed them
    pub entities: Vec<Entity>,
}

impl SchemaMessage {
    /// Build from a list of entities.
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Find an entity by package and type name.
    pub fn find(&self, package: &str, identity: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.package == package && e.identity == identity)
    }
}

impl Message for SchemaMessage {
    const NAME: &'static str = "schema.Message";

    fn type_identity() -> TypeId {
        static ID: OnceLock<TypeId> = OnceLock::new();
        *ID.get_or_init(|| TypeId::from_name(Self::NAME))
    }

    fn encode_fields(&self, e: &mut Encoder<'_>) -> Result<()> {
        e.slice(&self.entities, |e, entity| entity.encode(e))
    }

    fn decode_fields(&mut self, d: &mut Decoder<'_>) -> Result<()> {
        self.entities = d.slice(|d| d.nested(Entity::decode))?;
        Ok(())
    }
}
