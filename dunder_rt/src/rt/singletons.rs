use core::fmt;
use std::sync::Arc;

use crate::builtins;
use crate::object::{ClassObject, ObjectBuilder, PyValue};
use crate::storage::{DefaultObjectSpace, ObjectSpace};
use crate::ObjectId;

pub struct Singletons {
    // Classes
    pub object_class: Arc<ClassObject>,
    pub type_class: Arc<ClassObject>,
    pub none_class: Arc<ClassObject>,
    pub not_implemented_class: Arc<ClassObject>,
    pub bool_class: Arc<ClassObject>,
    pub int_class: Arc<ClassObject>,
    pub float_class: Arc<ClassObject>,
    pub str_class: Arc<ClassObject>,
    pub bytes_class: Arc<ClassObject>,
    pub dict_class: Arc<ClassObject>,
    pub list_class: Arc<ClassObject>,
    pub function_class: Arc<ClassObject>,
    pub method_class: Arc<ClassObject>,
    pub property_class: Arc<ClassObject>,
    pub getset_class: Arc<ClassObject>,

    // Constants
    pub none_v: ObjectId,
    pub not_implemented_v: ObjectId,
    pub false_v: ObjectId,
    pub true_v: ObjectId,
}

impl Singletons {
    pub(crate) fn bootstrap(objects: &DefaultObjectSpace) -> Self {
        let none_v = objects.insert(PyValue::None);
        let not_implemented_v = objects.insert(PyValue::NotImplemented);
        let false_v = objects.insert(PyValue::Bool(false));
        let true_v = objects.insert(PyValue::Bool(true));

        let object_class = builtins::object::class().synthesise_within(objects);

        let derive = |class: ObjectBuilder<{ dunder_core::CLASS }>| {
            class.inherit(&object_class).synthesise_within(objects)
        };

        let int_class = derive(builtins::scalars::int_class());
        let bool_class = builtins::scalars::bool_class()
            .inherit(&int_class)
            .synthesise_within(objects);

        Self {
            type_class: derive(builtins::object::type_class()),
            none_class: derive(builtins::scalars::none_class()),
            not_implemented_class: derive(builtins::scalars::not_implemented_class()),
            float_class: derive(builtins::scalars::float_class()),
            str_class: derive(builtins::scalars::str_class()),
            dict_class: derive(builtins::scalars::dict_class()),
            list_class: derive(builtins::scalars::list_class()),
            bytes_class: derive(builtins::bytes::class()),
            function_class: derive(builtins::descriptors::function_class()),
            method_class: derive(builtins::descriptors::method_class()),
            property_class: derive(builtins::descriptors::property_class()),
            getset_class: derive(builtins::descriptors::getset_class()),
            bool_class,
            int_class,
            object_class,
            none_v,
            not_implemented_v,
            false_v,
            true_v,
        }
    }
}

impl fmt::Debug for Singletons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Singletons")
            .field("object_class", &self.object_class.alloc_id)
            .field("type_class", &self.type_class.alloc_id)
            .field("none_class", &self.none_class.alloc_id)
            .field("not_implemented_class", &self.not_implemented_class.alloc_id)
            .field("bool_class", &self.bool_class.alloc_id)
            .field("int_class", &self.int_class.alloc_id)
            .field("float_class", &self.float_class.alloc_id)
            .field("str_class", &self.str_class.alloc_id)
            .field("bytes_class", &self.bytes_class.alloc_id)
            .field("dict_class", &self.dict_class.alloc_id)
            .field("list_class", &self.list_class.alloc_id)
            .field("function_class", &self.function_class.alloc_id)
            .field("method_class", &self.method_class.alloc_id)
            .field("property_class", &self.property_class.alloc_id)
            .field("getset_class", &self.getset_class.alloc_id)
            .field("none_v", &self.none_v)
            .field("not_implemented_v", &self.not_implemented_v)
            .field("false_v", &self.false_v)
            .field("true_v", &self.true_v)
            .finish()
    }
}
