//! # Key-Path Assembler
//!
//! Inserts resolved values into the nested tree by key path.
//!
//! ## List growth
//!
//! | Index vs. length | Effect |
//! |------------------|--------|
//! | `i == len` | push |
//! | `i < len` | reuse (merge into) element `i` |
//! | `i > len` | pad with `Null` up to `i`, then push |
//!
//! A gap wider than [`MAX_INDEX_GAP`] is rejected.
//!
//! ## Collisions
//!
//! Descending through a string, or through a list where a map is needed (and
//! vice versa), is a collision. At the leaf, scalars overwrite scalars and a
//! list replaces a list; replacing a map, or a list with a non-list, is a
//! collision.

use crate::model::{KeyPath, Map, Value};

/// Most `Null` holes one insertion may add to a list.
pub const MAX_INDEX_GAP: usize = 1024;

/// Insertion failed at the returned path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The path needs a different shape than the one already there.
    Collision { at: String },
    /// The index lies more than [`MAX_INDEX_GAP`] past the end of the list.
    IndexGap { at: String, index: usize },
}

enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

impl Step<'_> {
    /// Empty container able to hold this step.
    fn container(&self) -> Value {
        match self {
            Step::Key(_) => Value::Map(Map::new()),
            Step::Index(_) => Value::List(Vec::new()),
        }
    }
}

/// Insert `value` at `path` under `root`.
pub fn insert(root: &mut Map, path: &KeyPath, value: Value) -> Result<(), InsertError> {
    let steps: Vec<Step<'_>> = path
        .segments
        .iter()
        .flat_map(|segment| {
            std::iter::once(Step::Key(segment.name.as_str()))
                .chain(segment.indices.iter().map(|i| Step::Index(*i)))
        })
        .collect();
    if steps.is_empty() {
        return Ok(());
    }

    let mut node = Value::Map(std::mem::take(root));
    let result = descend(&mut node, &steps, value, &mut String::new());
    if let Value::Map(map) = node {
        *root = map;
    }
    result
}

fn descend(
    node: &mut Value,
    steps: &[Step<'_>],
    value: Value,
    trail: &mut String,
) -> Result<(), InsertError> {
    let Some((step, rest)) = steps.split_first() else {
        return replace(node, value, trail);
    };
    let at = trail.clone();

    match step {
        Step::Key(name) => {
            if !trail.is_empty() {
                trail.push('.');
            }
            trail.push_str(name);
            let Value::Map(map) = node else {
                return Err(InsertError::Collision { at });
            };
            match rest.first() {
                None => match map.get_mut(*name) {
                    Some(existing) => replace(existing, value, trail),
                    None => {
                        map.insert(name.to_string(), value);
                        Ok(())
                    }
                },
                Some(next) => {
                    let child = map
                        .entry(name.to_string())
                        .or_insert_with(|| next.container());
                    descend(child, rest, value, trail)
                }
            }
        }
        Step::Index(index) => {
            let index = *index;
            trail.push_str(&format!("[{}]", index));
            let Value::List(items) = node else {
                return Err(InsertError::Collision { at });
            };
            if index.saturating_sub(items.len()) > MAX_INDEX_GAP {
                return Err(InsertError::IndexGap {
                    at: trail.clone(),
                    index,
                });
            }
            items.resize(items.len().max(index), Value::Null);
            match rest.first() {
                None if index == items.len() => {
                    items.push(value);
                    Ok(())
                }
                None => replace(&mut items[index], value, trail),
                Some(next) => {
                    if index == items.len() {
                        items.push(next.container());
                    }
                    let child = &mut items[index];
                    if child.is_null() {
                        *child = next.container();
                    }
                    descend(child, rest, value, trail)
                }
            }
        }
    }
}

/// Leaf replacement: maps are never replaced, lists only by lists.
fn replace(existing: &mut Value, value: Value, trail: &str) -> Result<(), InsertError> {
    let allowed = match (&*existing, &value) {
        (Value::Map(_), _) => false,
        (Value::List(_), Value::List(_)) => true,
        (Value::List(_), _) => false,
        _ => true,
    };
    if !allowed {
        return Err(InsertError::Collision {
            at: trail.to_string(),
        });
    }
    *existing = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(root: &mut Map, key: &str, value: &str) -> Result<(), InsertError> {
        insert(root, &KeyPath::parse(key), Value::from(value))
    }

    fn get<'a>(root: &'a Map, key: &str) -> Option<&'a Value> {
        crate::model::lookup_in_map(root, &KeyPath::parse(key))
    }

    #[test]
    fn test_simple_and_nested() {
        let mut root = Map::new();
        put(&mut root, "name", "inhere").unwrap();
        put(&mut root, "top.sub.key0", "a string value").unwrap();
        put(&mut root, "top.sub.key1", "other").unwrap();

        assert_eq!(get(&root, "name"), Some(&Value::from("inhere")));
        let sub = get(&root, "top.sub").and_then(Value::as_map).unwrap();
        assert_eq!(sub.len(), 2);
    }

    #[test]
    fn test_scalar_overwrite() {
        let mut root = Map::new();
        put(&mut root, "a.b", "1").unwrap();
        put(&mut root, "a.b", "2").unwrap();
        assert_eq!(get(&root, "a.b"), Some(&Value::from("2")));
    }

    #[test]
    fn test_list_append_and_reuse() {
        let mut root = Map::new();
        put(&mut root, "top.list[0].f1", "a").unwrap();
        put(&mut root, "top.list[0].f2", "b").unwrap();
        put(&mut root, "top.list[1].f1", "c").unwrap();

        let list = get(&root, "top.list").and_then(Value::as_list).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(get(&root, "top.list[0].f2"), Some(&Value::from("b")));
        assert_eq!(get(&root, "top.list[1].f1"), Some(&Value::from("c")));
    }

    #[test]
    fn test_list_gap_filled_with_null() {
        let mut root = Map::new();
        put(&mut root, "arr[0]", "x").unwrap();
        put(&mut root, "arr[2]", "z").unwrap();

        let list = get(&root, "arr").and_then(Value::as_list).unwrap();
        assert_eq!(
            list,
            &[Value::from("x"), Value::Null, Value::from("z")][..]
        );
    }

    #[test]
    fn test_index_gap_limit() {
        let mut root = Map::new();
        put(&mut root, "arr[1024]", "edge").unwrap();
        assert_eq!(get(&root, "arr").and_then(Value::as_list).map(|l| l.len()), Some(1025));

        assert_eq!(
            put(&mut root, "big[100000000000]", "x"),
            Err(InsertError::IndexGap {
                at: "big[100000000000]".to_string(),
                index: 100_000_000_000,
            })
        );
    }

    #[test]
    fn test_nested_indices() {
        let mut root = Map::new();
        put(&mut root, "grid[0][1]", "b").unwrap();
        put(&mut root, "grid[0][0]", "a").unwrap();
        assert_eq!(get(&root, "grid[0][0]"), Some(&Value::from("a")));
        assert_eq!(get(&root, "grid[0][1]"), Some(&Value::from("b")));
    }

    #[test]
    fn test_descend_through_scalar_collides() {
        let mut root = Map::new();
        put(&mut root, "a", "scalar").unwrap();
        assert_eq!(
            put(&mut root, "a.b", "x"),
            Err(InsertError::Collision { at: "a".to_string() })
        );
    }

    #[test]
    fn test_replace_map_collides() {
        let mut root = Map::new();
        put(&mut root, "a.b", "x").unwrap();
        assert_eq!(
            put(&mut root, "a", "scalar"),
            Err(InsertError::Collision { at: "a".to_string() })
        );
    }

    #[test]
    fn test_list_vs_map_collides() {
        let mut root = Map::new();
        put(&mut root, "a[0]", "x").unwrap();
        assert_eq!(
            put(&mut root, "a.b", "y"),
            Err(InsertError::Collision { at: "a".to_string() })
        );

        let mut root = Map::new();
        put(&mut root, "m.k", "x").unwrap();
        assert_eq!(
            put(&mut root, "m[0]", "y"),
            Err(InsertError::Collision { at: "m".to_string() })
        );
    }

    #[test]
    fn test_list_value_replaces_list() {
        let mut root = Map::new();
        insert(&mut root, &KeyPath::parse("l"), Value::from(vec!["a".to_string()])).unwrap();
        insert(
            &mut root,
            &KeyPath::parse("l"),
            Value::from(vec!["b".to_string(), "c".to_string()]),
        )
        .unwrap();
        assert_eq!(get(&root, "l").and_then(Value::as_list).map(|l| l.len()), Some(2));

        assert!(put(&mut root, "l", "scalar").is_err());
    }

    #[test]
    fn test_scalar_at_index_then_descend_collides() {
        let mut root = Map::new();
        put(&mut root, "a[0]", "x").unwrap();
        assert_eq!(
            put(&mut root, "a[0].f", "y"),
            Err(InsertError::Collision { at: "a[0]".to_string() })
        );
    }
}
