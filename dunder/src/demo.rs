//! A small class hierarchy exercising every branch of attribute resolution.
//!
//! ```text
//! class Base:                      # module "demo"
//!     kind = 'base'                # plain class attribute
//!     def greet(self): ...         # non-data descriptor
//!
//! class Demo(Base):
//!     size = property(...)         # data descriptor
//!     def label(self): ...         # non-data descriptor, shadowed below
//!
//! obj = Demo()
//! obj.__dict__ = {'size': -1, 'label': 'instance label', 'note': 'stored'}
//! ```

use std::sync::Arc;

use dunder_core::CLASS;
use dunder_rt::{
    object::{ClassObject, ObjectBuilder},
    ObjectId, ObjectSpace, PyResult, Runtime,
};

pub struct Demo {
    pub class: Arc<ClassObject>,
    pub instance: ObjectId,
}

fn greeting(rt: &Runtime, text: &str) -> ObjectId {
    rt.new_string(text)
}

fn class(name: &str) -> ObjectBuilder<{ CLASS }> {
    ObjectBuilder::class(name).module("demo")
}

impl Demo {
    pub fn build(rt: &Runtime) -> PyResult<Self> {
        let greet = rt.new_function("greet", |cx| {
            cx.parse_args::<1, 0>("greet")?;
            Ok(greeting(cx.rt, "hello from Base"))
        });

        let base = rt.new_class(
            class("Base")
                .setattr("kind", "base")
                .setattr_object("greet", greet),
        );

        let size_get = rt.new_function("size", |cx| {
            cx.parse_args::<1, 0>("size")?;
            Ok(cx.rt.new_int(42))
        });

        let label = rt.new_function("label", |cx| {
            cx.parse_args::<1, 0>("label")?;
            Ok(greeting(cx.rt, "class label"))
        });

        let demo = rt.new_class(
            class("Demo")
                .inherit(&base)
                .setattr_object("size", rt.new_property(Some(size_get), None, None))
                .setattr_object("label", label),
        );

        let instance = rt.new_instance(&demo)?;

        // `setattr` would reject `size` (the property has no setter), so the
        // entries are written into the instance dict directly.
        let dict = rt.getattr(instance, "__dict__")?;
        let stored = [
            ("size", rt.new_int(-1)),
            ("label", rt.new_string("instance label")),
            ("note", rt.new_string("stored")),
        ];

        rt.objects.with_object_mut(dict, |this| {
            if let Some(dict) = this.as_dict_mut() {
                for (key, value) in stored {
                    dict.insert(key, value);
                }
            }
        })?;

        Ok(Self {
            class: demo,
            instance,
        })
    }

    /// Which rule answers `instance.<name>`.
    pub fn explain(&self, rt: &Runtime, name: &str) -> PyResult<String> {
        let stored = rt.instance_keys(self.instance)?.iter().any(|key| key == name);

        let rule = match self.class.lookup(name) {
            Some((member, owner)) => {
                let kind = rt.class_of(member)?.descriptor();

                if kind.is_data() {
                    format!("data descriptor on {}", owner.qualified_name())
                } else if stored {
                    "instance storage".to_owned()
                } else if kind.getter().is_some() {
                    format!("non-data descriptor on {}", owner.qualified_name())
                } else {
                    format!("class attribute on {}", owner.qualified_name())
                }
            }

            None if stored => "instance storage".to_owned(),
            None => "no binding".to_owned(),
        };

        Ok(rule)
    }

    /// `repr(instance.<name>)` along with the rule that produced it.
    pub fn lookup(&self, rt: &Runtime, name: &str) -> PyResult<(String, String)> {
        let value = rt.getattr(self.instance, name)?;

        Ok((rt.repr(value)?, self.explain(rt, name)?))
    }
}
