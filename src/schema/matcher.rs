//! Inclusion/exclusion matching of composite members.
//!
//! A member passes when it validates against none of the excluded schemas
//! and, if any are included, against at least one included schema. Each
//! candidate runs its full pipeline, so nested objects are re-validated in
//! full for every member. Exclusion is checked first and wins ties.

use serde_json::Value;
use stillwater::Validation;
use tracing::trace;

use crate::error::{display_value, SchemaError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::flags::Composition;

/// Matches one member against the composition.
///
/// `owner` is the path of the composite node and names the field in
/// messages; `member_path` locates the member itself. On success returns the
/// member as normalized by the first included schema that accepted it, or
/// the member unchanged when nothing is included.
pub(crate) fn match_member(
    composition: &Composition,
    member: &Value,
    owner: &JsonPath,
    member_path: &JsonPath,
    context: &ValidationContext,
) -> Validation<Value, SchemaError> {
    for schema in composition.excludes() {
        if schema
            .validate_with_context(Some(member), member_path, context)
            .is_success()
        {
            trace!(path = %member_path, kind = %schema.kind(), "member matched an excluded schema");
            return Validation::Failure(
                SchemaError::new(
                    member_path.clone(),
                    format!(
                        "the value {} in {} matches a forbidden type",
                        display_value(member),
                        owner.describe()
                    ),
                )
                .with_code("excluded")
                .with_value(member.clone()),
            );
        }
    }

    if composition.includes().is_empty() {
        return Validation::Success(member.clone());
    }

    for schema in composition.includes() {
        if let Validation::Success(normalized) =
            schema.validate_with_context(Some(member), member_path, context)
        {
            return Validation::Success(normalized.unwrap_or_else(|| member.clone()));
        }
    }

    trace!(path = %member_path, "member matched no included schema");
    Validation::Failure(
        SchemaError::new(
            member_path.clone(),
            format!(
                "the value {} in {} does not match any of the allowed types",
                display_value(member),
                owner.describe()
            ),
        )
        .with_code("not_included")
        .with_expected(composition.describe_includes())
        .with_value(member.clone()),
    )
}

/// Matches every element of an array in order, stopping at the first
/// element that fails.
pub(crate) fn match_elements(
    composition: &Composition,
    elements: Vec<Value>,
    owner: &JsonPath,
    context: &ValidationContext,
) -> Validation<Vec<Value>, SchemaError> {
    if composition.is_unrestricted() {
        return Validation::Success(elements);
    }

    let mut matched = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match match_member(composition, element, owner, &owner.push_index(index), context) {
            Validation::Success(normalized) => matched.push(normalized),
            Validation::Failure(error) => return Validation::Failure(error),
        }
    }
    Validation::Success(matched)
}
