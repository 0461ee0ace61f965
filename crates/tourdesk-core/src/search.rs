//! Free-text filtering of client histories.

use crate::history::ClientHistory;

/// Histories whose full name, phone or tax-ID contains `query`,
/// case-insensitively. A blank query keeps everything; any other query is
/// matched as typed, surrounding spaces included.
///
/// Runs over the full list on every call; results keep the input order.
pub fn filter<'a>(histories: &'a [ClientHistory], query: &str) -> Vec<&'a ClientHistory> {
  if query.trim().is_empty() {
    return histories.iter().collect();
  }
  let needle = query.to_lowercase();
  histories.iter().filter(|h| matches(h, &needle)).collect()
}

/// `needle` must already be lower-cased.
fn matches(history: &ClientHistory, needle: &str) -> bool {
  let client = &history.client;
  [client.full_name(), client.phone.clone(), client.cpf.clone()]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
