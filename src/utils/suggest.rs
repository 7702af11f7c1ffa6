/// Closest candidates to a misspelt name, best first.
///
/// Names are compared case-insensitively with separators ignored, so
/// `getAdsByAdAccount` and `get_ads_by_adaccount` are the same name.
pub fn suggest<S: AsRef<str>>(input: &str, candidates: &[S], limit: usize) -> Vec<String> {
    let needle = squash(input);
    if needle.is_empty() {
        return Vec::new();
    }
    let budget = match needle.len() {
        0..=4 => 1,
        5..=8 => 2,
        n => (n / 3).max(3),
    };

    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|candidate| {
            let hay = squash(candidate);
            let score = if hay == needle {
                0
            } else if hay.contains(&needle) || needle.contains(&hay) {
                1
            } else {
                edit_distance(&needle, &hay)
            };
            (score <= budget).then_some((score, candidate))
        })
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(limit.max(1))
        .map(|(_, name)| name.to_string())
        .collect()
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut curr = Vec::with_capacity(b.len() + 1);
        curr.push(i + 1);
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr.push((prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost));
        }
        prev = curr;
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_miss_tool_names_are_suggested() {
        let tools = ["get_ads_by_adaccount", "get_adsets_by_adaccount", "get_ad_by_id"];
        assert_eq!(
            suggest("get_ads_by_account", &tools, 3).first().map(String::as_str),
            Some("get_ads_by_adaccount")
        );
        assert_eq!(suggest("getAdById", &tools, 1), vec!["get_ad_by_id".to_string()]);
    }

    #[test]
    fn unrelated_input_yields_nothing() {
        assert!(suggest("delete_everything", &["get_ad_by_id"], 3).is_empty());
        assert!(suggest("", &["get_ad_by_id"], 3).is_empty());
    }
}
