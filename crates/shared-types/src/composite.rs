//! # Composite Keys
//!
//! Composite keys namespace an object type and a list of attributes into one
//! flat state key, so partial-key queries can select by prefix.
//!
//! Layout: `\0` + object type + `\0` + (attribute + `\0`)*

use crate::errors::LedgerError;

/// Separator between composite key components.
pub const COMPOSITE_KEY_SEPARATOR: char = '\u{0}';

/// Leading marker distinguishing composite keys from simple keys.
pub const COMPOSITE_KEY_NAMESPACE: char = '\u{0}';

fn validate_component(component: &str) -> Result<(), LedgerError> {
    if component.contains(COMPOSITE_KEY_SEPARATOR) {
        return Err(LedgerError::InvalidArgument(format!(
            "composite key component {:?} contains the separator",
            component
        )));
    }
    Ok(())
}

/// Build a composite key from an object type and attributes.
pub fn create_composite_key<S: AsRef<str>>(
    object_type: &str,
    attributes: &[S],
) -> Result<String, LedgerError> {
    validate_component(object_type)?;

    let mut key = String::with_capacity(
        2 + object_type.len()
            + attributes
                .iter()
                .map(|a| a.as_ref().len() + 1)
                .sum::<usize>(),
    );
    key.push(COMPOSITE_KEY_NAMESPACE);
    key.push_str(object_type);
    key.push(COMPOSITE_KEY_SEPARATOR);

    for attribute in attributes {
        let attribute = attribute.as_ref();
        validate_component(attribute)?;
        key.push_str(attribute);
        key.push(COMPOSITE_KEY_SEPARATOR);
    }

    Ok(key)
}

/// Split a composite key back into its object type and attributes.
pub fn split_composite_key(key: &str) -> Result<(String, Vec<String>), LedgerError> {
    let body = key
        .strip_prefix(COMPOSITE_KEY_NAMESPACE)
        .ok_or_else(|| LedgerError::InvalidArgument(format!("{:?} is not a composite key", key)))?;

    let mut components: Vec<String> = body
        .split(COMPOSITE_KEY_SEPARATOR)
        .map(str::to_owned)
        .collect();

    // Trailing separator leaves one empty component behind.
    if components.last().map(String::is_empty) == Some(true) {
        components.pop();
    }

    if components.is_empty() {
        return Err(LedgerError::InvalidArgument(format!(
            "{:?} has no object type",
            key
        )));
    }

    let object_type = components.remove(0);
    Ok((object_type, components))
}

/// Whether `key` uses the composite key namespace.
pub fn is_composite_key(key: &str) -> bool {
    key.starts_with(COMPOSITE_KEY_NAMESPACE)
}
