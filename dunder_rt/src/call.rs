use crate::exception::{PyException, PyResult, PyResultExt};
use crate::object::PyValue;
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

#[non_exhaustive]
pub struct CallCx<'a> {
    pub rt: &'a Runtime,
    pub args: &'a [ObjectId],
}

impl<'a> CallCx<'a> {
    pub fn new(rt: &'a Runtime, args: &'a [ObjectId]) -> Self {
        Self { rt, args }
    }

    /// Split the arguments into `N` required and up to `M` optional positionals.
    pub fn parse_args<const N: usize, const M: usize>(
        &self,
        name: &str,
    ) -> PyResult<([ObjectId; N], [Option<ObjectId>; M])> {
        let given = self.args.len();

        if given < N || given > N + M {
            let expected = if M == 0 {
                format!("exactly {}", N)
            } else {
                format!("from {} to {}", N, N + M)
            };

            let err = format!(
                "{}() takes {} positional arguments but {} were given",
                name, expected, given
            );

            return PyException::type_error().set_message(err).into();
        }

        let required = std::array::from_fn(|n| self.args[n]);
        let optional = std::array::from_fn(|n| self.args.get(N + n).copied());

        Ok((required, optional))
    }
}

impl Runtime {
    pub fn call_object(&self, callable: ObjectId, args: &[ObjectId]) -> PyResult<ObjectId> {
        enum Target {
            Func(crate::object::AnyFunc),
            Bound(ObjectId, ObjectId),
            Other,
        }

        let target = self.objects.with_object(callable, |this| match this {
            PyValue::Function { body, .. } => Target::Func(body.clone()),
            PyValue::BoundMethod { receiver, func } => Target::Bound(*receiver, *func),
            _ => Target::Other,
        })?;

        match target {
            Target::Func(body) => body.call(CallCx::new(self, args)).trace(),

            Target::Bound(receiver, func) => {
                let mut bound_args = Vec::with_capacity(args.len() + 1);
                bound_args.push(receiver);
                bound_args.extend_from_slice(args);

                self.call_object(func, &bound_args).trace()
            }

            Target::Other => match self.call_special(callable, "__call__", args)? {
                Some(result) => Ok(result),
                None => {
                    let err = format!("'{}' object is not callable", self.type_name(callable)?);

                    PyException::type_error().set_message(err).into()
                }
            },
        }
    }

    /// `object.name(*args)`, with `name` resolved through `getattr`.
    pub fn call_method(
        &self,
        object: ObjectId,
        name: &str,
        args: &[ObjectId],
    ) -> PyResult<ObjectId> {
        let method = self.getattr(object, name).trace()?;

        self.call_object(method, args).trace()
    }

    /// Look up a special method on the type of `object`, never on the instance.
    pub fn lookup_special(&self, object: ObjectId, name: &str) -> PyResult<Option<ObjectId>> {
        let class = self.class_of(object)?;

        Ok(class.lookup(name).map(|(member, _)| member))
    }

    /// Call a special method found on the type of `object` with `object` as the first argument.
    ///
    /// Plain functions are called unbound, anything else is bound through its
    /// descriptor `__get__` first. `Ok(None)` means the type does not define `name`.
    pub fn call_special(
        &self,
        object: ObjectId,
        name: &str,
        args: &[ObjectId],
    ) -> PyResult<Option<ObjectId>> {
        let member = match self.lookup_special(object, name)? {
            Some(member) => member,
            None => return Ok(None),
        };

        let is_function = self.objects.with_object(member, PyValue::is_function)?;

        if is_function {
            let mut full_args = Vec::with_capacity(args.len() + 1);
            full_args.push(object);
            full_args.extend_from_slice(args);

            return self.call_object(member, &full_args).trace().map(Some);
        }

        let bound = match self.class_of(member)?.descriptor().getter() {
            Some(get) => {
                let owner = self.class_of(object)?.alloc_id;

                self.call_object(get, &[member, object, owner]).trace()?
            }
            None => member,
        };

        self.call_object(bound, args).trace().map(Some)
    }
}
