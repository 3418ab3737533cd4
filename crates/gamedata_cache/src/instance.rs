// crates/gamedata_cache/src/instance.rs
use thiserror::Error;

use gamedata_core::{Index, Indexed};

use crate::context::CacheContext;
use crate::definition::{SharedDefinition, TemplateDefinition};

/// Construction failures for template-carrying instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError<I> {
    /// The shard holds no template for this index. With sharing enabled and
    /// no template supplied, one must have been pre-registered.
    #[error("no template registered for index `{0:?}`")]
    TemplateNotFound(I),

    /// Sharing is disabled, so every instance must bring its own template.
    /// Distinct from not-found: the caller likely forgot the policy is off.
    #[error("template sharing is disabled; a template is required for index `{0:?}`")]
    MissingTemplate(I),
}

/// How an instance holds its template payload. Fixed at construction time by
/// the context's sharing policy.
#[derive(Debug)]
pub enum TemplateBinding<I, V> {
    /// A handle into the cache shard. The payload outlives the instance and
    /// is shared with every other instance bound to the same index.
    Shared(SharedDefinition<I, V>),
    /// A payload owned by this instance alone.
    Private(TemplateDefinition<I, V>),
}

/// An entity instance carrying an index and a template payload.
#[derive(Debug)]
pub struct Instance<I, V> {
    index: I,
    binding: TemplateBinding<I, V>,
}

impl<I, V> Instance<I, V>
where
    I: Index + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Builds an instance, deciding the ownership mode from the context's
    /// sharing policy at this moment.
    ///
    /// Sharing on: a supplied template is registered into the shard first,
    /// then the instance binds the shard's definition for this index.
    /// Sharing off: the template is mandatory and the instance owns a
    /// private copy of it.
    pub fn new(
        context: &mut CacheContext,
        index: I,
        template: Option<&V>,
    ) -> Result<Self, InstanceError<I>> {
        if context.sharing_enabled() {
            let shard = context.shard::<I, V>();

            if let Some(template) = template {
                shard.register_template(index.clone(), template);
            }

            let definition = shard
                .try_get_definition(&index)
                .cloned()
                .ok_or_else(|| InstanceError::TemplateNotFound(index.clone()))?;

            Ok(Self {
                index,
                binding: TemplateBinding::Shared(definition),
            })
        } else {
            let template = template.ok_or_else(|| InstanceError::MissingTemplate(index.clone()))?;

            Ok(Self {
                index: index.clone(),
                binding: TemplateBinding::Private(TemplateDefinition::new(index, template)),
            })
        }
    }

    /// A copy of the bound template payload.
    pub fn template(&self) -> V {
        match &self.binding {
            TemplateBinding::Shared(definition) => definition.template(),
            TemplateBinding::Private(definition) => definition.template().clone(),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self.binding, TemplateBinding::Shared(_))
    }

    pub fn binding(&self) -> &TemplateBinding<I, V> {
        &self.binding
    }
}

impl<I: Index, V> Indexed for Instance<I, V> {
    type Index = I;

    fn index(&self) -> I {
        self.index.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Stats {
        health: u32,
        speed: f32,
    }

    const BASE: Stats = Stats {
        health: 100,
        speed: 1.5,
    };

    #[test]
    fn shared_instances_see_one_payload() {
        let mut context = CacheContext::new();

        let first = Instance::new(&mut context, 7u32, Some(&BASE)).unwrap();
        // No template supplied: binds whatever the shard already holds.
        let second = Instance::<u32, Stats>::new(&mut context, 7, None).unwrap();

        assert!(first.is_shared());
        assert_eq!(first.template(), BASE);
        assert_eq!(second.template(), BASE);

        // A fresh registration is visible through both instances.
        let updated = Stats {
            health: 250,
            speed: 0.5,
        };
        context.shard::<u32, Stats>().register_template(7, &updated);
        assert_eq!(first.template(), updated);
        assert_eq!(second.template(), updated);
    }

    #[test]
    fn unregistered_index_fails_not_found() {
        let mut context = CacheContext::new();
        let result = Instance::<u32, Stats>::new(&mut context, 42, None);
        assert_eq!(result.unwrap_err(), InstanceError::TemplateNotFound(42));
    }

    #[test]
    fn disabled_sharing_requires_a_template() {
        let mut context = CacheContext::new();
        context.set_sharing_enabled(false);

        let result = Instance::<u32, Stats>::new(&mut context, 7, None);
        assert_eq!(result.unwrap_err(), InstanceError::MissingTemplate(7));
    }

    #[test]
    fn disabled_sharing_keeps_payloads_independent() {
        let mut context = CacheContext::new();
        context.set_sharing_enabled(false);

        let slow = Stats {
            health: 100,
            speed: 1.0,
        };
        let fast = Stats {
            health: 100,
            speed: 9.0,
        };
        let first = Instance::new(&mut context, 7u32, Some(&slow)).unwrap();
        let second = Instance::new(&mut context, 7u32, Some(&fast)).unwrap();

        assert!(!first.is_shared());
        assert_eq!(first.template(), slow);
        assert_eq!(second.template(), fast);

        // Registering into the shard reaches neither private payload.
        context.shard::<u32, Stats>().register_template(7, &BASE);
        assert_eq!(first.template(), slow);
        assert_eq!(second.template(), fast);
    }

    #[test]
    fn policy_toggle_never_rebinds() {
        let mut context = CacheContext::new();

        let shared = Instance::new(&mut context, 7u32, Some(&BASE)).unwrap();
        context.set_sharing_enabled(false);
        assert!(shared.is_shared());

        // Still wired to the shard even though the policy flipped.
        let updated = Stats {
            health: 1,
            speed: 1.0,
        };
        context.shard::<u32, Stats>().register_template(7, &updated);
        assert_eq!(shared.template(), updated);

        let private = Instance::new(&mut context, 7u32, Some(&BASE)).unwrap();
        context.set_sharing_enabled(true);
        assert!(!private.is_shared());
        assert_eq!(private.template(), BASE);
    }

    #[test]
    fn instances_are_indexed_entities() {
        let mut context = CacheContext::new();
        let mut registry = gamedata_core::Registry::new();

        registry
            .add(Instance::new(&mut context, 7u32, Some(&BASE)).unwrap())
            .unwrap();
        registry
            .add(Instance::new(&mut context, 8u32, Some(&BASE)).unwrap())
            .unwrap();

        assert!(registry.contains_index(&7));
        assert_eq!(registry.get(&8).unwrap().template(), BASE);
    }
}
