#![allow(clippy::panic, clippy::unwrap_used)]

use toml::Value;

use super::*;

#[test]
fn boolean_words_are_case_insensitive() {
    for word in ["1", "on", "ON", "true", "True"] {
        assert_eq!(boolean::parse(word), Some(true), "{word}");
    }
    for word in ["0", "off", "Off", "false", "FALSE"] {
        assert_eq!(boolean::parse(word), Some(false), "{word}");
    }
    for word in ["", "yes", "no", "2", "onn"] {
        assert_eq!(boolean::parse(word), None, "{word}");
    }
}

#[test]
fn byte_size_parses_si_and_iec_units() {
    assert_eq!("0".parse::<ByteSize>().unwrap(), ByteSize(0));
    assert_eq!("42".parse::<ByteSize>().unwrap(), ByteSize(42));
    assert_eq!("10K".parse::<ByteSize>().unwrap(), ByteSize(10_000));
    assert_eq!("10k".parse::<ByteSize>().unwrap(), ByteSize(10_000));
    assert_eq!("1Ki".parse::<ByteSize>().unwrap(), ByteSize(1024));
    assert_eq!("3 Mi".parse::<ByteSize>().unwrap(), ByteSize(3 * 1024 * 1024));
    assert_eq!("2GB".parse::<ByteSize>().unwrap(), ByteSize(2_000_000_000));
    assert_eq!("1EiB".parse::<ByteSize>().unwrap(), ByteSize(1 << 60));
}

#[test]
fn byte_size_rejects_garbage() {
    assert!(matches!(
        "".parse::<ByteSize>(),
        Err(ByteSizeError::MissingNumber(_))
    ));
    assert!(matches!(
        "K".parse::<ByteSize>(),
        Err(ByteSizeError::MissingNumber(_))
    ));
    assert!(matches!(
        "-5".parse::<ByteSize>(),
        Err(ByteSizeError::MissingNumber(_))
    ));
    assert!(matches!(
        "5X".parse::<ByteSize>(),
        Err(ByteSizeError::UnknownUnit(_))
    ));
    assert!(matches!(
        "5Kix".parse::<ByteSize>(),
        Err(ByteSizeError::UnknownUnit(_))
    ));
}

#[test]
fn byte_size_overflow_is_detected() {
    assert!(matches!(
        "19E".parse::<ByteSize>(),
        Err(ByteSizeError::Overflow(_))
    ));
    assert!(matches!(
        "99999999999999999999".parse::<ByteSize>(),
        Err(ByteSizeError::Overflow(_))
    ));
}

#[test]
fn byte_size_display_is_shortest_exact_form() {
    assert_eq!(ByteSize(0).to_string(), "0");
    assert_eq!(ByteSize(999).to_string(), "999");
    assert_eq!(ByteSize(1024).to_string(), "1Ki");
    assert_eq!(ByteSize(2000).to_string(), "2K");
    assert_eq!(ByteSize(3_000_000).to_string(), "3M");
    assert_eq!(ByteSize(1536).to_string(), "1536");
    assert_eq!(ByteSize(5 << 30).to_string(), "5Gi");

    for size in [1u64, 1024, 2000, 1 << 40, 7_000_000_000] {
        let shown = ByteSize(size).to_string();
        assert_eq!(shown.parse::<ByteSize>().unwrap(), ByteSize(size));
    }
}

#[test]
fn value_param_reports_only_changed_values() {
    let mut verbose = false;
    let mut adapter = ValueParam::new(&mut verbose);

    assert_eq!(adapter.kind(), ValueKind::Flag);
    assert_eq!(adapter.current(), None);

    assert!(adapter.accept(&BoundValue::Bool(true)));
    assert_eq!(adapter.current(), Some(Value::Boolean(true)));

    assert!(adapter.accept(&BoundValue::Str("off".to_string())));
    assert_eq!(adapter.current(), None);
}

#[test]
fn rejected_value_leaves_target_untouched() {
    let mut count: u32 = 7;
    {
        let mut adapter = ValueParam::new(&mut count);
        assert!(!adapter.accept(&BoundValue::Str("-1".to_string())));
        assert!(!adapter.accept(&BoundValue::Str("many".to_string())));
        assert!(!adapter.accept(&BoundValue::Bool(true)));
        assert_eq!(adapter.default_display(), "7");
    }
    assert_eq!(count, 7);
}

#[test]
fn flag_rejects_words_outside_the_boolean_lists() {
    let mut on = false;
    let mut adapter = ValueParam::new(&mut on);
    assert!(!adapter.accept(&BoundValue::Str("maybe".to_string())));
    assert!(adapter.accept(&BoundValue::Str("ON".to_string())));
    drop(adapter);
    assert!(on);
}

#[test]
fn list_accepts_a_single_value() {
    let mut names: Vec<String> = Vec::new();
    let mut adapter = ValueParam::new(&mut names);
    assert_eq!(adapter.default_display(), "none");
    assert!(adapter.accept(&BoundValue::Str("a".to_string())));
    drop(adapter);
    assert_eq!(names, vec!["a".to_string()]);
}

#[test]
fn list_replaces_previous_contents() {
    let mut names = vec!["old".to_string()];
    let mut adapter = ValueParam::new(&mut names);
    assert_eq!(adapter.default_display(), "[1]");
    assert!(adapter.accept(&BoundValue::List(vec![
        "a".to_string(),
        "b".to_string()
    ])));
    assert_eq!(
        adapter.current(),
        Some(Value::Array(vec![
            Value::String("a".to_string()),
            Value::String("b".to_string())
        ]))
    );
}

#[test]
fn numbers_convert_to_toml() {
    let mut big = u64::MAX;
    let mut adapter = ValueParam::new(&mut big);
    assert!(adapter.accept(&BoundValue::Str("12".to_string())));
    assert_eq!(adapter.current(), Some(Value::Integer(12)));
    assert!(adapter.accept(&BoundValue::Str(" 18446744073709551614 ".to_string())));
    assert_eq!(
        adapter.current(),
        Some(Value::String("18446744073709551614".to_string()))
    );

    let mut ratio = 0.5f64;
    let mut adapter = ValueParam::new(&mut ratio);
    assert_eq!(adapter.default_display(), "0.50");
    assert!(adapter.accept(&BoundValue::Str("2.25".to_string())));
    assert_eq!(adapter.current(), Some(Value::Float(2.25)));
}

#[test]
fn byte_size_param_reads_back_as_unit_string() {
    let mut limit = ByteSize(1000);
    let mut adapter = ValueParam::new(&mut limit);
    assert_eq!(adapter.default_display(), "1K");
    assert!(adapter.accept(&BoundValue::Str("4Ki".to_string())));
    assert_eq!(adapter.current(), Some(Value::String("4Ki".to_string())));
}
