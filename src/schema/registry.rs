//! Process-wide cache of resolved schema descriptors, one per record type.

use crate::schema::{Entity, SchemaDescriptor};
use dashmap::DashMap;
use log::debug;
use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

type AnyDescriptor = Arc<dyn Any + Send + Sync>;

static DESCRIPTORS: OnceLock<DashMap<TypeId, AnyDescriptor>> = OnceLock::new();

/// Resolve the descriptor for `T`, building it on first use
///
/// `T::describe()` runs with no map guard held, so a descriptor may resolve
/// other record types while it is being built. Racing builders for the same
/// type both run `describe`; the first one stored wins.
pub fn resolve<T: Entity>() -> Arc<SchemaDescriptor<T>> {
    let descriptors = DESCRIPTORS.get_or_init(DashMap::new);
    let key = TypeId::of::<T>();

    if let Some(found) = descriptors.get(&key) {
        let descriptor = found.value().clone();
        drop(found);
        return downcast::<T>(descriptor);
    }

    let built = T::describe();
    debug!(
        "Resolved schema for {}: {:?}",
        std::any::type_name::<T>(),
        built.column_names()
    );
    let built: AnyDescriptor = Arc::new(built);

    let descriptor = descriptors.entry(key).or_insert(built).value().clone();
    downcast::<T>(descriptor)
}

fn downcast<T: Entity>(descriptor: AnyDescriptor) -> Arc<SchemaDescriptor<T>> {
    match descriptor.downcast::<SchemaDescriptor<T>>() {
        Ok(descriptor) => descriptor,
        Err(_) => unreachable!("Schema registry is keyed by TypeId"),
    }
}
