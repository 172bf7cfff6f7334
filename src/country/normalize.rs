use std::marker::PhantomData;

use tracing::debug;

use crate::core::{Hook, Record, RecordError};

/// Value sets that may carry a `code` field.
pub trait CodeField {
    fn code_mut(&mut self) -> Option<&mut String>;
}

/// Upper-cases `code` on create and write whenever the payload carries it.
pub struct UppercaseCode<R>(PhantomData<R>);

impl<R> UppercaseCode<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R> Default for UppercaseCode<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> UppercaseCode<R>
where
    R: Record,
    R::Values: CodeField,
{
    fn normalize(values: &mut R::Values) {
        if let Some(code) = values.code_mut() {
            let upper = code.to_uppercase();
            if *code != upper {
                debug!(model = R::MODEL, from = %code, to = %upper, "code upper-cased");
                *code = upper;
            }
        }
    }
}

impl<R> Hook<R> for UppercaseCode<R>
where
    R: Record,
    R::Values: CodeField,
{
    fn before_create(&mut self, values: &mut R::Values) -> Result<(), RecordError> {
        Self::normalize(values);
        Ok(())
    }

    fn before_write(&mut self, values: &mut R::Values) -> Result<(), RecordError> {
        Self::normalize(values);
        Ok(())
    }
}
