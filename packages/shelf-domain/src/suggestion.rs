//! Completion vocabulary derived from an item's text fields.

const MIN_TOKEN_CHARS: usize = 2;

/// Builds the ordered, de-duplicated suggestion terms for one item.
///
/// Name tokens are whitespace-separated runs of at least two characters, kept in first-seen
/// order. A non-blank brand and category are appended trimmed, after the name tokens, unless the
/// same term is already present. Terms are taken verbatim: there is no case folding or stemming.
pub fn extract(name: &str, brand: Option<&str>, category: Option<&str>) -> Vec<String> {
	let mut terms: Vec<String> = Vec::new();

	for token in name.split_whitespace() {
		if token.chars().count() < MIN_TOKEN_CHARS {
			continue;
		}
		if terms.iter().any(|term| term == token) {
			continue;
		}

		terms.push(token.to_string());
	}

	for extra in [brand, category] {
		let Some(extra) = crate::non_blank(extra) else {
			continue;
		};
		let extra = extra.trim();

		if !terms.iter().any(|term| term == extra) {
			terms.push(extra.to_string());
		}
	}

	terms
}
