use super::{BoardLayout, CornerRef, KeyDef};
use crate::errors::LayoutError;
use crate::key::Key;
use crate::transform::TransformList;
use std::collections::HashMap;

/// Keys of a layout, placed.
#[derive(Debug, Clone, Default)]
pub struct Board {
    keys: Vec<Key>,
    index: HashMap<String, usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnChain,
    Placed,
}

impl Board {
    /// Places every key of `layout`. Parents are resolved before their
    /// children regardless of the order keys are written in.
    pub fn resolve(layout: &BoardLayout) -> Result<Self, LayoutError> {
        let index = index_keys(&layout.keys)?;
        let parents = parent_indices(&layout.keys, &index)?;
        let order = resolution_order(&layout.keys, &parents)?;

        let mut placed: Vec<Option<Key>> = vec![None; layout.keys.len()];
        for i in order {
            let parent = parents[i].and_then(|p| placed[p].as_ref());
            let key = build_key(layout, &layout.keys[i], parent)?;
            placed[i] = Some(key);
        }

        let keys: Vec<Key> = placed.into_iter().flatten().collect();
        log::debug!("resolved {} keys", keys.len());
        Ok(Self { keys, index })
    }

    /// Keys in the order the layout lists them.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Key> {
        self.index.get(name).map(|&i| &self.keys[i])
    }

    /// Like [`get`](Self::get), with `context` naming the referrer in the
    /// error.
    pub fn lookup(&self, context: &str, name: &str) -> Result<&Key, LayoutError> {
        self.get(name).ok_or_else(|| LayoutError::UnknownKey {
            context: context.to_string(),
            key: name.to_string(),
        })
    }

    pub fn corner(&self, context: &str, r: &CornerRef) -> Result<TransformList, LayoutError> {
        Ok(self.lookup(context, &r.key)?.corner(r.corner))
    }
}

fn index_keys(keys: &[KeyDef]) -> Result<HashMap<String, usize>, LayoutError> {
    let mut index = HashMap::with_capacity(keys.len());
    for (i, def) in keys.iter().enumerate() {
        if index.insert(def.name.clone(), i).is_some() {
            return Err(LayoutError::Duplicate { kind: "key", name: def.name.clone() });
        }
    }
    Ok(index)
}

fn parent_indices(
    keys: &[KeyDef],
    index: &HashMap<String, usize>,
) -> Result<Vec<Option<usize>>, LayoutError> {
    keys.iter()
        .map(|def| match &def.parent {
            None => Ok(None),
            Some(parent) => index.get(parent).copied().map(Some).ok_or_else(|| {
                LayoutError::UnknownParent { key: def.name.clone(), parent: parent.clone() }
            }),
        })
        .collect()
}

/// Orders keys so each parent comes before its children. Each key has at
/// most one parent, so walking up from every unplaced key either reaches a
/// placed key, a root, or a key already on the walk (a cycle).
fn resolution_order(keys: &[KeyDef], parents: &[Option<usize>]) -> Result<Vec<usize>, LayoutError> {
    let mut marks = vec![Mark::Unvisited; keys.len()];
    let mut order = Vec::with_capacity(keys.len());

    for start in 0..keys.len() {
        let mut chain: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match marks[i] {
                Mark::Placed => break,
                Mark::OnChain => {
                    let from = chain.iter().position(|&j| j == i).unwrap_or(0);
                    let mut names: Vec<String> =
                        chain[from..].iter().map(|&j| keys[j].name.clone()).collect();
                    names.push(keys[i].name.clone());
                    return Err(LayoutError::ParentCycle(names));
                },
                Mark::Unvisited => {
                    marks[i] = Mark::OnChain;
                    chain.push(i);
                    current = parents[i];
                },
            }
        }
        for &i in chain.iter().rev() {
            marks[i] = Mark::Placed;
            order.push(i);
        }
    }
    Ok(order)
}

fn build_key(layout: &BoardLayout, def: &KeyDef, parent: Option<&Key>) -> Result<Key, LayoutError> {
    let mut key = match &def.template {
        None => Key::new(),
        Some(name) => layout
            .templates
            .get(name)
            .ok_or_else(|| LayoutError::UnknownTemplate {
                key: def.name.clone(),
                template: name.clone(),
            })?
            .instantiate(name)?,
    };
    key = key.named(def.name.clone());

    if let Some([x, y, z]) = def.position {
        key = key.set_position(x, y, z);
    }
    if let Some([rx, ry, rz]) = def.rotation {
        key = key.adjust(|t| t.with_rotation(rx, ry, rz));
    }
    if let Some(parent) = parent {
        key = key.set_parent(parent);
    }
    for frame in &def.frames {
        key = key.add_transform().adjust(|_| *frame);
    }

    layout.defaults.apply_to(&mut key);
    def.geometry.apply_to(&mut key);

    log::debug!(
        "key `{}` at {:?} ({} local, {} parent steps)",
        def.name,
        key.transforms().origin(),
        key.local_transforms.len(),
        key.parent_transforms.len()
    );
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(text: &str) -> BoardLayout {
        BoardLayout::from_toml_str(text).unwrap()
    }

    #[test]
    fn children_may_come_first() {
        let board = Board::resolve(&layout(
            r#"
            [[keys]]
            name = "child"
            parent = "root"
            position = [19.0, 0.0, 0.0]

            [[keys]]
            name = "root"
            position = [0.0, 0.0, 10.0]
            "#,
        ))
        .unwrap();
        assert_eq!(board.keys()[0].label(), "child");
        let origin = board.get("child").unwrap().transforms().origin();
        approx::assert_relative_eq!(origin, nalgebra::Point3::new(19.0, 0.0, 10.0));
    }

    #[test]
    fn cycles_are_reported_in_order() {
        let err = Board::resolve(&layout(
            r#"
            [[keys]]
            name = "a"
            parent = "b"
            [[keys]]
            name = "b"
            parent = "c"
            [[keys]]
            name = "c"
            parent = "a"
            "#,
        ))
        .unwrap_err();
        match err {
            LayoutError::ParentCycle(names) => assert_eq!(names, ["a", "b", "c", "a"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let err = Board::resolve(&layout("[[keys]]\nname = \"a\"\nparent = \"a\"")).unwrap_err();
        assert_eq!(err.to_string(), "parent cycle: a -> a");
    }

    #[test]
    fn duplicates_and_unknowns() {
        let dup = Board::resolve(&layout("[[keys]]\nname = \"a\"\n[[keys]]\nname = \"a\""));
        assert!(matches!(dup, Err(LayoutError::Duplicate { kind: "key", .. })));

        let parent = Board::resolve(&layout("[[keys]]\nname = \"a\"\nparent = \"zz\""));
        assert!(matches!(parent, Err(LayoutError::UnknownParent { .. })));

        let template = Board::resolve(&layout("[[keys]]\nname = \"a\"\ntemplate = \"zz\""));
        assert!(matches!(template, Err(LayoutError::UnknownTemplate { .. })));
    }
}
