use std::fmt;
use std::sync::Arc;

use dunder_core::MapT;

use crate::attr::Descriptor;

use super::ObjectId;

/// Which descriptor protocol methods instances of a class respond to.
///
/// Computed once when the class is built by walking its ancestor sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescrSlots {
    pub get: Option<ObjectId>,
    pub set: Option<ObjectId>,
    pub delete: Option<ObjectId>,
}

/// An immutable class: name, own members and the linearized ancestor sequence.
pub struct ClassObject {
    pub alloc_id: ObjectId,
    pub name: Box<str>,
    pub module: Option<Box<str>>,

    /// Ancestors in lookup order, not including the class itself.
    pub(crate) ancestors: Box<[Arc<ClassObject>]>,

    /// Members defined directly on this class.
    pub(crate) members: MapT<Box<str>, ObjectId>,

    /// Instances get a lazily created `__dict__`.
    pub instance_dict: bool,

    /// Builtin (native) classes reject `__class__` assignment.
    pub builtin: bool,

    pub(crate) slots: DescrSlots,
}

impl fmt::Debug for ClassObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassObject")
            .field("alloc_id", &self.alloc_id)
            .field("name", &self.name)
            .field("module", &self.module)
            .field(
                "ancestors",
                &self.ancestors.iter().map(|c| &*c.name).collect::<Vec<_>>(),
            )
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .field("instance_dict", &self.instance_dict)
            .field("builtin", &self.builtin)
            .field("slots", &self.slots)
            .finish()
    }
}

impl ClassObject {
    /// The full lookup order: the class itself followed by its ancestors.
    pub fn mro(&self) -> impl Iterator<Item = &ClassObject> + '_ {
        std::iter::once(self).chain(self.ancestors.iter().map(|c| c.as_ref()))
    }

    #[inline]
    pub fn own_member(&self, name: &str) -> Option<ObjectId> {
        self.members.get(name).copied()
    }

    /// Find `name` in the first class along the lookup order that defines it.
    ///
    /// Only each class's own member table is consulted.
    pub fn lookup(&self, name: &str) -> Option<(ObjectId, &ClassObject)> {
        self.mro()
            .find_map(|class| class.own_member(name).map(|member| (member, class)))
    }

    /// `true` if `other` appears anywhere in this class's lookup order.
    pub fn is_subclass(&self, other: &ClassObject) -> bool {
        self.mro().any(|class| class.alloc_id == other.alloc_id)
    }

    /// How members whose class is `self` take part in attribute access.
    #[inline]
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::from(self.slots)
    }

    /// `module.Name`, with the module omitted for builtins.
    pub fn qualified_name(&self) -> String {
        match self.module.as_deref() {
            Some(module) if module != "builtins" => format!("{}.{}", module, self.name),
            _ => self.name.to_string(),
        }
    }
}
