pub const OPEN_MARKER: &str = "<em>";
pub const CLOSE_MARKER: &str = "</em>";

/// Wraps the leading `prefix`-sized part of a completion option in highlight markers.
///
/// The split point is the prefix length in characters, clamped to the option length. The
/// option is assumed to start with the prefix as typed; case or whitespace normalization by
/// the index shifts what ends up inside the markers but never panics.
pub fn mark_prefix(option: &str, prefix: &str) -> String {
	let split = option
		.char_indices()
		.nth(prefix.chars().count())
		.map(|(idx, _)| idx)
		.unwrap_or(option.len());
	let (head, tail) = option.split_at(split);
	let mut out = String::with_capacity(option.len() + OPEN_MARKER.len() + CLOSE_MARKER.len());

	out.push_str(OPEN_MARKER);
	out.push_str(head);
	out.push_str(CLOSE_MARKER);
	out.push_str(tail);

	out
}
