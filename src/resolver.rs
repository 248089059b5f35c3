use std::collections::HashSet;

use crate::extractor::leaf_name;

/// Drops bare names that also appear schema-qualified.
///
/// A script that runs under `use schema` often refers to the same table as both `orders` and
/// `sales.orders`; only the qualified form is kept. Bare names without a qualified
/// counterpart are kept as they are.
pub fn resolve_redundancy(objects: HashSet<String>) -> HashSet<String> {
    let (qualified, bare): (HashSet<String>, HashSet<String>) =
        objects.into_iter().partition(|obj| obj.contains('.'));

    let qualified_leaves = qualified
        .iter()
        .map(|obj| leaf_name(obj))
        .collect::<HashSet<_>>();

    let mut resolved = bare
        .into_iter()
        .filter(|obj| {
            let redundant = qualified_leaves.contains(obj.as_str());
            if redundant {
                log::debug!("Dropping {} in favour of its schema-qualified name", obj);
            }
            !redundant
        })
        .collect::<HashSet<_>>();
    resolved.extend(qualified);
    resolved
}
