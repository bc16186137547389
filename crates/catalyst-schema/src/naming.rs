//! Field name and key formatting

/// Formats a declared attribute name into a field name or key
pub type NameFormatter = fn(&str) -> String;

/// Leaves the attribute name unchanged
pub fn identity(name: &str) -> String {
	name.to_string()
}

/// Converts `snake_case` to `camelCase`.
///
/// Every alphabetic run is title-cased before the underscores are removed, so
/// a letter following a digit is upper-cased as well.
///
/// # Examples
///
/// ```
/// use catalyst_schema::naming::snake_to_camel;
///
/// assert_eq!(snake_to_camel("user_name"), "userName");
/// assert_eq!(snake_to_camel("HTTP_status"), "httpStatus");
/// assert_eq!(snake_to_camel("_private"), "private");
/// ```
pub fn snake_to_camel(snake: &str) -> String {
	let mut titled = String::with_capacity(snake.len());
	let mut in_word = false;
	for c in snake.chars() {
		if c.is_alphabetic() {
			if in_word {
				titled.extend(c.to_lowercase());
			} else {
				titled.extend(c.to_uppercase());
			}
			in_word = true;
		} else {
			in_word = false;
			if c != '_' {
				titled.push(c);
			}
		}
	}

	let mut chars = titled.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => titled,
	}
}
