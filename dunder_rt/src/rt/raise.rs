use crate::exception::{PyException, PyResult};
use crate::rt::Runtime;
use crate::ObjectId;

impl Runtime {
    /// `'T' object has no attribute 'name'`
    #[track_caller]
    pub(crate) fn no_such_attribute(&self, object: ObjectId, name: &str) -> PyException {
        match self.type_name(object) {
            Ok(ty) => PyException::attribute_error(name)
                .set_message(format!("'{}' object has no attribute '{}'", ty, name)),
            Err(exc) => exc,
        }
    }

    /// `'T' object attribute 'name' is read-only`
    #[track_caller]
    pub(crate) fn read_only_attribute(&self, object: ObjectId, name: &str) -> PyException {
        match self.type_name(object) {
            Ok(ty) => PyException::attribute_error(name)
                .set_message(format!("'{}' object attribute '{}' is read-only", ty, name)),
            Err(exc) => exc,
        }
    }

    /// A `TypeError` whose message names the type of `object`.
    #[track_caller]
    pub(crate) fn type_error_with<T, F>(&self, object: ObjectId, message: F) -> PyResult<T>
    where
        F: FnOnce(&str) -> String,
    {
        let ty = self.type_name(object)?;

        PyException::type_error().set_message(message(&ty)).into()
    }
}
