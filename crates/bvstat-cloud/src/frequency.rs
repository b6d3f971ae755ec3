//! Frequency weighting.

use std::collections::{BTreeMap, HashMap};

/// A word with its occurrence count and weight relative to the most frequent
/// word (which has weight 1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub count: u32,
    pub weight: f32,
}

/// Count words and keep the `max_words` most frequent.
///
/// Case variants are merged and shown in their most common form. A plural
/// ending in a single `s` is folded into its singular when the singular also
/// occurs. Ties are broken alphabetically so the order is stable.
pub fn weigh_words<'a>(words: impl IntoIterator<Item = &'a str>, max_words: usize) -> Vec<WordFrequency> {
    // lowercase key -> surface form -> count
    let mut groups: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    for word in words {
        *groups
            .entry(word.to_lowercase())
            .or_default()
            .entry(word.to_string())
            .or_default() += 1;
    }

    fold_plurals(&mut groups);

    let mut counted: Vec<(String, u32)> = groups
        .into_values()
        .map(|forms| {
            let total = forms.values().sum();
            // BTreeMap order makes the first maximum the alphabetically smallest
            let display = forms
                .iter()
                .fold(None::<(&String, u32)>, |best, (form, &count)| match best {
                    Some((_, best_count)) if best_count >= count => best,
                    _ => Some((form, count)),
                })
                .map(|(form, _)| form.clone())
                .unwrap_or_default();
            (display, total)
        })
        .collect();

    counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counted.truncate(max_words);

    let max_count = counted.first().map(|(_, c)| *c).unwrap_or(1) as f32;
    counted
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word,
            count,
            weight: count as f32 / max_count,
        })
        .collect()
}

fn fold_plurals(groups: &mut BTreeMap<String, BTreeMap<String, u32>>) {
    let plurals: Vec<String> = groups
        .keys()
        .filter(|key| key.ends_with('s') && !key.ends_with("ss"))
        .filter(|key| groups.contains_key(&key[..key.len() - 1]))
        .cloned()
        .collect();

    for plural in plurals {
        let Some(forms) = groups.remove(&plural) else {
            continue;
        };
        let mut singular_forms: HashMap<String, u32> = HashMap::new();
        for (form, count) in forms {
            // the form ends in 's' or 'S'; both are one byte
            let singular = form[..form.len() - 1].to_string();
            *singular_forms.entry(singular).or_default() += count;
        }
        if let Some(target) = groups.get_mut(&plural[..plural.len() - 1]) {
            for (form, count) in singular_forms {
                *target.entry(form).or_default() += count;
            }
        }
    }
}
