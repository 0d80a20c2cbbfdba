use std::collections::HashMap;
use std::hash::Hash;

/// Group `items` by `key_fn`.
///
/// Groups appear in the order their key was first seen; items keep their
/// input order within a group.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_fn(&item);
        match positions.get(&key) {
            Some(&pos) => groups[pos].1.push(item),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_group_order() {
        let words = ["apple", "bean", "avocado", "corn", "beet"];
        let grouped = group_by(words, |w| w.chars().next());

        let keys: Vec<_> = grouped.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![Some('a'), Some('b'), Some('c')]);
        assert_eq!(grouped[0].1, vec!["apple", "avocado"]);
        assert_eq!(grouped[1].1, vec!["bean", "beet"]);
        assert_eq!(grouped[2].1, vec!["corn"]);
    }

    #[test]
    fn test_empty_input() {
        let grouped = group_by(Vec::<u32>::new(), |n| n % 2);
        assert!(grouped.is_empty());
    }
}
