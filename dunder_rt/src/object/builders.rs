use std::sync::Arc;

use dunder_core::{MapT, CLASS, OBJECT};

use crate::{
    exception::{PyResult, PyResultExt},
    rt::Runtime,
    storage::ObjectSpace,
    ObjectId,
};

use super::{ClassObject, DescrSlots, IntoPyValue, PyValue, RawObject};

#[derive(Debug)]
enum Member {
    Value(PyValue),
    Object(ObjectId),
}

impl Member {
    fn into_object<S: ObjectSpace>(self, objects: &S) -> ObjectId {
        match self {
            Member::Value(value) => objects.insert(value),
            Member::Object(object) => object,
        }
    }
}

/// Incrementally describe a class (`CLASS`) or an instance (`OBJECT`) and then
/// synthesise it inside an object space.
#[derive(Debug, Default)]
pub struct ObjectBuilder<const OB_TYPE: usize> {
    name: Box<str>,
    module: Option<Box<str>>,
    ancestors: Vec<Arc<ClassObject>>,
    class: Option<Arc<ClassObject>>,
    instance_dict: bool,
    builtin: bool,
    properties: MapT<Box<str>, Member>,
}

impl<const OB_TYPE: usize> ObjectBuilder<{ OB_TYPE }> {
    pub fn hasattr<S>(&self, name: S) -> bool
    where
        S: AsRef<str>,
    {
        self.properties.contains_key(name.as_ref())
    }

    pub fn setattr<O, S>(mut self, name: S, object: O) -> Self
    where
        O: IntoPyValue,
        S: ToString,
    {
        let name = name.to_string().into_boxed_str();

        self.properties
            .insert(name, Member::Value(object.into_py_val()));

        self
    }

    /// Like `setattr` but binds an object that already lives in the object space.
    pub fn setattr_object<S>(mut self, name: S, object: ObjectId) -> Self
    where
        S: ToString,
    {
        let name = name.to_string().into_boxed_str();

        self.properties.insert(name, Member::Object(object));

        self
    }
}

impl ObjectBuilder<{ CLASS }> {
    /// A user-level class whose instances carry a `__dict__`.
    pub fn class<S>(name: S) -> Self
    where
        S: Into<Box<str>>,
    {
        Self {
            name: name.into(),
            instance_dict: true,
            ..Default::default()
        }
    }

    /// A native class: fixed-layout instances, no `__class__` assignment.
    pub fn builtin<S>(name: S) -> Self
    where
        S: Into<Box<str>>,
    {
        Self {
            name: name.into(),
            module: Some("builtins".into()),
            builtin: true,
            ..Default::default()
        }
    }

    pub fn module<S>(mut self, module: S) -> Self
    where
        S: Into<Box<str>>,
    {
        self.module = Some(module.into());
        self
    }

    /// Single inheritance: the ancestor sequence becomes `parent` followed by its own.
    pub fn inherit(mut self, parent: &Arc<ClassObject>) -> Self {
        self.ancestors = std::iter::once(Arc::clone(parent))
            .chain(parent.ancestors.iter().cloned())
            .collect();

        self
    }

    /// Use an already linearized ancestor sequence verbatim.
    pub fn with_mro<I>(mut self, ancestors: I) -> Self
    where
        I: IntoIterator<Item = Arc<ClassObject>>,
    {
        self.ancestors = ancestors.into_iter().collect();
        self
    }

    pub fn instance_dict(mut self, enabled: bool) -> Self {
        self.instance_dict = enabled;
        self
    }

    pub(crate) fn ends_with(&self, class: &ClassObject) -> bool {
        self.ancestors
            .last()
            .map_or(false, |last| last.alloc_id == class.alloc_id)
    }

    pub(crate) fn push_ancestor(mut self, class: &Arc<ClassObject>) -> Self {
        self.ancestors.push(Arc::clone(class));
        self
    }

    pub fn synthesise_within<S: ObjectSpace>(self, objects: &S) -> Arc<ClassObject> {
        let Self {
            name,
            module,
            ancestors,
            instance_dict,
            builtin,
            properties,
            ..
        } = self;

        let members = properties
            .into_iter()
            .map(|(key, member)| (key, member.into_object(objects)))
            .collect::<MapT<_, _>>();

        let slot = |dunder: &str| {
            members
                .get(dunder)
                .copied()
                .or_else(|| ancestors.iter().find_map(|class| class.own_member(dunder)))
        };

        let slots = DescrSlots {
            get: slot("__get__"),
            set: slot("__set__"),
            delete: slot("__delete__"),
        };

        let alloc_id = objects.new_object_id();

        tracing::trace!(
            "[ObjectBuilder::synthesise_within] class {:?} ({:?}) with {} member(s), slots={:?}",
            name,
            alloc_id,
            members.len(),
            slots
        );

        let class = Arc::new(ClassObject {
            alloc_id,
            name,
            module,
            ancestors: ancestors.into_boxed_slice(),
            members,
            instance_dict,
            builtin,
            slots,
        });

        objects.insert_at(alloc_id, PyValue::Class(Arc::clone(&class)));

        class
    }
}

impl ObjectBuilder<{ OBJECT }> {
    pub fn object(class: &Arc<ClassObject>) -> Self {
        Self {
            class: Some(Arc::clone(class)),
            ..Default::default()
        }
    }

    /// Allocate the instance and route every property through `setattr`,
    /// so class-level data descriptors see the writes.
    pub fn synthesise_within(self, rt: &Runtime) -> PyResult<ObjectId> {
        let Self {
            class, properties, ..
        } = self;

        let class = class.unwrap_or_else(|| Arc::clone(&rt.singletons.object_class));

        tracing::trace!(
            "[ObjectBuilder::synthesise_within] instance of {:?}",
            class.name
        );

        let object = rt
            .objects
            .insert_with(|alloc_id| PyValue::Any(RawObject::new(alloc_id, class)));

        for (key, member) in properties {
            let value = member.into_object(&rt.objects);

            rt.setattr(object, &key, value).trace()?;
        }

        Ok(object)
    }
}
