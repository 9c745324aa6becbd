use fastab::{ColumnData, FillValue, ReadOptions};

#[test]
fn global_rule_masks_every_eligible_column() {
    let options = ReadOptions {
        fill_values: vec![FillValue::new("N/A", "0")],
        ..ReadOptions::default()
    };
    let table = fastab::read_str("a,b\nN/A,1\n2,N/A\n", &options).unwrap();
    let a = table.get("a").unwrap();
    let b = table.get("b").unwrap();
    assert_eq!(a.data, ColumnData::Int(vec![0, 2]));
    assert_eq!(a.mask, Some(vec![true, false]));
    assert_eq!(b.data, ColumnData::Int(vec![1, 0]));
    assert_eq!(b.mask, Some(vec![false, true]));
}

#[test]
fn fill_include_names_limits_masking() {
    let options = ReadOptions {
        fill_values: vec![FillValue::new("N/A", "7")],
        fill_include_names: Some(vec!["a".into()]),
        ..ReadOptions::default()
    };
    let table = fastab::read_str("a,b\nN/A,N/A\n", &options).unwrap();
    // Substitution applies everywhere; only the eligible column is masked.
    assert_eq!(table.get("a").unwrap().mask, Some(vec![true]));
    assert_eq!(table.get("b").unwrap().data, ColumnData::Int(vec![7]));
    assert_eq!(table.get("b").unwrap().mask, None);
}

#[test]
fn fill_exclude_names_limits_masking() {
    let options = ReadOptions {
        fill_values: vec![FillValue::new("-", "0")],
        fill_exclude_names: Some(vec!["b".into()]),
        ..ReadOptions::default()
    };
    let table = fastab::read_str("a,b\n-,-\n", &options).unwrap();
    assert_eq!(table.get("a").unwrap().mask, Some(vec![true]));
    assert_eq!(table.get("b").unwrap().mask, None);
}

#[test]
fn column_scoped_rule_substitutes_globally_but_masks_locally() {
    let options = ReadOptions {
        fill_values: vec![FillValue::for_columns("", "9", ["b"])],
        ..ReadOptions::default()
    };
    let table = fastab::read_str("a,b\n,\n", &options).unwrap();
    assert_eq!(table.get("a").unwrap().data, ColumnData::Int(vec![9]));
    assert_eq!(table.get("a").unwrap().mask, None);
    assert_eq!(table.get("b").unwrap().data, ColumnData::Int(vec![9]));
    assert_eq!(table.get("b").unwrap().mask, Some(vec![true]));
}

#[test]
fn masked_value_is_the_replacement_under_the_final_dtype() {
    let options = ReadOptions {
        fill_values: vec![FillValue::new("", "1.5")],
        ..ReadOptions::default()
    };
    let table = fastab::read_str("x,y\n,1\n2,3\n", &options).unwrap();
    let x = table.get("x").unwrap();
    assert_eq!(x.data, ColumnData::Float(vec![1.5, 2.0]));
    assert_eq!(x.mask, Some(vec![true, false]));
}

#[test]
fn rule_keys_match_byte_exact() {
    let options = ReadOptions {
        fill_values: vec![FillValue::new("NaN", "0")],
        ..ReadOptions::default()
    };
    let table = fastab::read_str("x\nnan\nNaN\n", &options).unwrap();
    let x = table.get("x").unwrap();
    // Only the exact "NaN" is replaced; "nan" stays and forces strings.
    assert_eq!(
        x.data,
        ColumnData::Str(vec!["nan".into(), "0".into()])
    );
    assert_eq!(x.mask, Some(vec![false, true]));
}

#[test]
fn replacement_that_does_not_convert_forces_fallback() {
    let options = ReadOptions {
        fill_values: vec![FillValue::new("", "missing")],
        ..ReadOptions::default()
    };
    let table = fastab::read_str("x,y\n1,2\n,3\n", &options).unwrap();
    let x = table.get("x").unwrap();
    assert_eq!(
        x.data,
        ColumnData::Str(vec!["1".into(), "missing".into()])
    );
    assert_eq!(x.mask, Some(vec![false, true]));
}

#[test]
fn first_matching_rule_wins() {
    let options = ReadOptions {
        fill_values: vec![FillValue::new("", "1"), FillValue::new("", "2")],
        ..ReadOptions::default()
    };
    let table = fastab::read_str("x,y\n,1\n", &options).unwrap();
    assert_eq!(table.get("x").unwrap().data, ColumnData::Int(vec![1]));
}
