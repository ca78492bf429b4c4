use validator::{Validate, ValidationErrors};

use crate::api::errors::ApiError;
use crate::schemas::FieldOrder;

/// Runs the derive validators and reports the first failing field, in the
/// order the request type declares them.
pub(crate) fn validate<T: Validate + FieldOrder>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| ApiError::BadRequest(first_message(T::FIELDS, &errors)))
}

fn first_message(fields: &[&str], errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    let ordered = fields.iter().filter_map(|field| field_errors.get(*field));
    let remaining = field_errors.values();

    ordered
        .chain(remaining)
        .flat_map(|entries| entries.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
