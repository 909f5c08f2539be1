use toml::{Table, Value};

/// Merges configuration layers in order, later layers taking precedence.
pub fn merge_layers(layers: impl IntoIterator<Item = Table>) -> Table {
    layers
        .into_iter()
        .fold(Table::new(), |accumulated, layer| merge_tables(accumulated, layer))
}

/// Deep merges two tables.
///
/// Starts from `overlay` and adds what it lacks from `base`. Tables present in
/// both are merged recursively; any other overlay value replaces the base value
/// outright, arrays included.
pub fn merge_tables(base: Table, overlay: Table) -> Table {
    let mut merged = overlay;

    for (key, base_value) in base {
        let value = match merged.remove(&key) {
            None => base_value,
            Some(Value::Table(overlay_table)) => match base_value {
                Value::Table(base_table) => Value::Table(merge_tables(base_table, overlay_table)),
                _ => Value::Table(overlay_table),
            },
            Some(overlay_value) => overlay_value,
        };
        merged.insert(key, value);
    }

    merged
}
