use crate::exception::{PyException, PyResult, PyResultExt};
use crate::object::PyValue;
use crate::rt::Runtime;
use crate::storage::ObjectSpace;
use crate::ObjectId;

impl Runtime {
    /// Truth-test `object`.
    ///
    /// Heap instances consult `__bool__`, then `__len__`, and are true otherwise.
    pub fn is_true(&self, object: ObjectId) -> PyResult<bool> {
        let known = self.objects.with_object(object, |this| match this {
            PyValue::Bool(b) => Some(*b),
            PyValue::None => Some(false),
            PyValue::Int(n) => Some(*n != 0),
            PyValue::Float(f) => Some(*f != 0.0),
            PyValue::Str(st) => Some(!st.is_empty()),
            PyValue::Bytes(bytes) => Some(!bytes.is_empty()),
            PyValue::Dict(dict) => Some(!dict.is_empty()),
            PyValue::List(list) => Some(!list.is_empty()),
            PyValue::Any(_) => None,
            _ => Some(true),
        })?;

        if let Some(known) = known {
            return Ok(known);
        }

        if let Some(result) = self.call_special(object, "__bool__", &[]).trace()? {
            return match self.as_bool(result)? {
                Some(b) => Ok(b),
                None => self.type_error_with(result, |ty| {
                    format!("__bool__ should return bool, returned {}", ty)
                }),
            };
        }

        if let Some(result) = self.call_special(object, "__len__", &[]).trace()? {
            return match self.as_int(result)? {
                Some(n) if n >= 0 => Ok(n != 0),
                Some(_) => PyException::type_error()
                    .set_message("__len__() should return >= 0")
                    .into(),
                None => self.type_error_with(result, |ty| {
                    format!("'{}' object cannot be interpreted as an integer", ty)
                }),
            };
        }

        Ok(true)
    }
}
