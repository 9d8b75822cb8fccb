use crate::{EntityDescriptor, EntityType, SchemaError, SchemaResult};
use std::collections::BTreeMap;

mod catalogue;

/// The process-wide entity schema registry.
///
/// Built once at startup via [`Registry::bootstrap`]; lookups are pure and
/// side-effect free. No type is added after startup.
#[derive(Debug)]
pub struct Registry {
    descriptors: BTreeMap<EntityType, EntityDescriptor>,
}

impl Registry {
    /// Builds every descriptor and validates the catalogue's structural
    /// rules. Panics on programmer error (a malformed catalogue), which can
    /// only happen at startup.
    #[must_use]
    pub fn bootstrap() -> Self {
        let mut descriptors = BTreeMap::new();
        for ty in EntityType::ALL {
            descriptors.insert(*ty, catalogue::describe(*ty));
        }
        let registry = Self { descriptors };
        registry.validate();
        registry
    }

    /// Looks up the descriptor for an entity type. Total: the enum is
    /// closed and bootstrap covers every variant.
    #[must_use]
    pub fn describe(&self, entity_type: EntityType) -> &EntityDescriptor {
        self.descriptors
            .get(&entity_type)
            .expect("bootstrap registers every EntityType variant")
    }

    /// Looks up a descriptor by wire name, for the string-facing API path.
    pub fn describe_name(&self, name: &str) -> SchemaResult<&EntityDescriptor> {
        let ty = EntityType::parse(name)
            .ok_or_else(|| SchemaError::UnknownEntityType(name.to_string()))?;
        Ok(self.describe(ty))
    }

    /// Iterates all descriptors in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.descriptors.values()
    }

    /// Structural catalogue rules, checked once at bootstrap:
    /// - every `parent_back_reference` must name a relation on the target;
    /// - a delegating type must not delegate to another delegating type
    ///   whose chain never reaches an owning type;
    /// - versioned types must carry the weight scalars.
    fn validate(&self) {
        for desc in self.descriptors.values() {
            for rel in &desc.relations {
                if let Some(back) = rel.parent_back_reference {
                    let target = self.describe(rel.target);
                    assert!(
                        target.relation(back).is_some(),
                        "catalogue error: {}.{} names back-reference {:?} absent on {}",
                        desc.entity_type,
                        rel.name,
                        back,
                        rel.target,
                    );
                }
            }
            if let Some(delegation) = desc.delegates_to {
                let mut seen = vec![desc.entity_type];
                let mut cursor = delegation;
                loop {
                    assert!(
                        !seen.contains(&cursor.parent),
                        "catalogue error: delegation cycle through {}",
                        desc.entity_type,
                    );
                    seen.push(cursor.parent);
                    match self.describe(cursor.parent).delegates_to {
                        Some(next) => cursor = next,
                        None => break,
                    }
                }
            }
            if desc.is_versioned {
                assert!(
                    desc.scalar("simplicity").is_some() && desc.scalar("complexity").is_some(),
                    "catalogue error: versioned type {} lacks weight scalars",
                    desc.entity_type,
                );
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::bootstrap()
    }
}
