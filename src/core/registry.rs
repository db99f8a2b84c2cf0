// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Identity registry.
//!
//! Maps a [`TypeId`] to a [`Class`]: the factory that builds a default
//! instance for the decoder to populate, plus the optional schema entity.
//! Registration takes `&mut self`; a finished registry is shared read-only
//! (typically behind an `Arc`) by any number of concurrent decoders.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::CodecConfig;
use super::error::{CodecError, Result};
use super::id::TypeId;
use super::object::{Message, ObjectRef};
use crate::schema::{DynamicObject, Entity, SchemaMessage};

/// Builds a default-initialized object for the decoder to populate.
pub type Factory = Arc<dyn Fn() -> ObjectRef + Send + Sync>;

/// A registry entry: one concrete wire type.
#[derive(Clone)]
pub struct Class {
    id: TypeId,
    name: String,
    entity: Option<Arc<Entity>>,
    object_type: std::any::TypeId,
    factory: Factory,
}

impl Class {
    /// Build the entry for a compiled message type.
    pub fn of<T: Message>() -> Self {
        Self {
            id: T::type_identity(),
            name: T::NAME.to_string(),
            entity: T::entity().map(|e| Arc::new(e.clone())),
            object_type: std::any::TypeId::of::<T>(),
            factory: Arc::new(|| Box::new(T::default())),
        }
    }

    /// Build a schema-driven entry that decodes into [`DynamicObject`]s.
    pub fn dynamic(entity: Entity) -> Self {
        let entity = Arc::new(entity);
        let for_factory = Arc::clone(&entity);
        Self {
            id: entity.id(),
            name: entity.full_name(),
            entity: Some(entity),
            object_type: std::any::TypeId::of::<DynamicObject>(),
            factory: Arc::new(move || Box::new(DynamicObject::empty(Arc::clone(&for_factory)))),
        }
    }

    /// Wire identity.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema entity, for entity-keyed classes.
    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_deref()
    }

    /// True if instances are schema-driven [`DynamicObject`]s.
    pub fn is_dynamic(&self) -> bool {
        self.object_type == std::any::TypeId::of::<DynamicObject>()
    }

    /// Create a default-initialized instance.
    pub fn create(&self) -> ObjectRef {
        (self.factory)()
    }

    fn same_as(&self, other: &Class) -> bool {
        self.object_type == other.object_type && self.entity == other.entity
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("dynamic", &self.is_dynamic())
            .finish()
    }
}

/// Identity → class lookup used by every decoder.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classes: HashMap<TypeId, Class>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled message type.
    pub fn register<T: Message>(&mut self) -> Result<()> {
        self.register_class(Class::of::<T>())
    }

    /// Register a class entry.
    ///
    /// Registering an identical entry twice is a no-op.
    ///
    /// # Errors
    ///
    /// - `ReservedIdentity` if the identity is null or a built-in tag
    /// - `InvalidSchema` if the entity hashes to a different identity
    /// - `DuplicateRegistration` if a different class owns the identity
    pub fn register_class(&mut self, class: Class) -> Result<()> {
        if class.id.is_reserved() {
            return Err(CodecError::ReservedIdentity { id: class.id });
        }
        if let Some(entity) = class.entity() {
            if entity.id() != class.id {
                return Err(CodecError::invalid_schema(
                    class.name.clone(),
                    format!(
                        "entity signature hashes to {}, class declares {}",
                        entity.id(),
                        class.id
                    ),
                ));
            }
        }
        if let Some(existing) = self.classes.get(&class.id) {
            if existing.same_as(&class) {
                trace!(id = %class.id, name = %class.name, "class already registered");
                return Ok(());
            }
            return Err(CodecError::duplicate_registration(
                class.id,
                existing.name.clone(),
                class.name,
            ));
        }
        debug!(id = %class.id, name = %class.name, "registered class");
        self.classes.insert(class.id, class);
        Ok(())
    }

    /// Register dynamic classes for every entity in a schema whose identity
    /// is not known yet. Returns the number of classes added.
    ///
    /// Entities are checked against the default [`CodecConfig`] limits.
    pub fn import_schema(&mut self, schema: &SchemaMessage) -> Result<usize> {
        self.import_schema_with(schema, &CodecConfig::default())
    }

    /// [`import_schema`](Self::import_schema) with explicit limits. Nothing
    /// is registered if any new entity exceeds them.
    pub fn import_schema_with(
        &mut self,
        schema: &SchemaMessage,
        config: &CodecConfig,
    ) -> Result<usize> {
        let fresh: Vec<&Entity> = schema
            .entities
            .iter()
            .filter(|entity| !self.classes.contains_key(&entity.id()))
            .collect();
        for entity in &fresh {
            entity.check_limits(config.max_collection_len)?;
        }

        let mut imported = 0;
        for entity in fresh {
            if self.classes.contains_key(&entity.id()) {
                continue;
            }
            self.register_class(Class::dynamic(entity.clone()))?;
            imported += 1;
        }
        debug!(imported, total = schema.entities.len(), "imported schema");
        Ok(imported)
    }

    /// Look up a class by identity.
    pub fn get(&self, id: &TypeId) -> Option<&Class> {
        self.classes.get(id)
    }

    /// Look up a class by identity, failing with `UnknownType`.
    pub fn resolve(&self, id: &TypeId) -> Result<&Class> {
        self.get(id)
            .ok_or_else(|| CodecError::unknown_type(*id, 0))
    }

    /// Check if an identity is registered.
    pub fn contains(&self, id: &TypeId) -> bool {
        self.classes.contains_key(id)
    }

    /// Create a default instance of the type registered under `id`.
    pub fn create(&self, id: &TypeId) -> Result<ObjectRef> {
        Ok(self.resolve(id)?.create())
    }

    /// Schema entity registered under `id`.
    pub fn entity(&self, id: &TypeId) -> Option<&Entity> {
        self.get(id).and_then(Class::entity)
    }

    /// Schema entity of a compiled message type, if it is registered.
    pub fn entity_for<T: Message>(&self) -> Option<&Entity> {
        self.entity(&T::type_identity())
    }

    /// Find an entity by package and type name.
    pub fn find_entity(&self, package: &str, identity: &str) -> Option<&Entity> {
        self.classes
            .values()
            .filter_map(Class::entity)
            .find(|e| e.package == package && e.identity == identity)
    }

    /// All registered entities, ordered by package then name.
    pub fn entities(&self) -> Vec<&Entity> {
        let mut entities: Vec<&Entity> = self.classes.values().filter_map(Class::entity).collect();
        entities.sort_by(|a, b| (&a.package, &a.identity).cmp(&(&b.package, &b.identity)));
        entities
    }

    /// All registered classes, ordered by name.
    pub fn classes(&self) -> Vec<&Class> {
        let mut classes: Vec<&Class> = self.classes.values().collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        classes
    }

    /// All registered identities, sorted.
    pub fn ids(&self) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.classes.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Get the number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
