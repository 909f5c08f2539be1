use toml::{Table, Value};

/// Entries of `current` that differ from `defaults`.
///
/// Tables are compared key by key; a nested table is kept only if something
/// inside it changed.
pub(super) fn changed_values(defaults: &Table, current: &Table) -> Table {
    let mut changed = Table::new();

    for (key, value) in current {
        match (defaults.get(key), value) {
            (Some(Value::Table(old)), Value::Table(new)) => {
                let sub = changed_values(old, new);
                if !sub.is_empty() {
                    changed.insert(key.clone(), Value::Table(sub));
                }
            }
            (Some(old), new) if old == new => {}
            (_, new) => {
                changed.insert(key.clone(), new.clone());
            }
        }
    }

    changed
}
