use fastab::{ColumnData, Error, ReadOptions};

#[test]
fn empty_input_with_header_expected_is_invalid_line() {
    let err = fastab::read_str("", &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidLine { line: 1, .. }));
}

#[test]
fn empty_input_with_explicit_names_is_zero_rows() {
    let options = ReadOptions {
        names: Some(vec!["a".into(), "b".into()]),
        ..ReadOptions::no_header()
    };
    let table = fastab::read_str("", &options).unwrap();
    assert_eq!(table.num_cols(), 2);
    assert_eq!(table.num_rows(), 0);
}

#[test]
fn empty_input_without_names_is_an_empty_table() {
    let table = fastab::read_str("", &ReadOptions::no_header()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn trailing_delimiter_makes_an_empty_final_field() {
    let table = fastab::read_str("a,b,c\n1,2,\n", &ReadOptions::default()).unwrap();
    assert_eq!(
        table.get("c").unwrap().data,
        ColumnData::Str(vec![String::new()])
    );
}

#[test]
fn missing_trailing_newline_is_tolerated() {
    let table = fastab::read_str("a,b\n1,2", &ReadOptions::default()).unwrap();
    assert_eq!(table.get("b").unwrap().data, ColumnData::Int(vec![2]));
}

#[test]
fn crlf_input_is_normalized() {
    let table = fastab::read_str("a,b\r\n1,2\r\n", &ReadOptions::default()).unwrap();
    assert_eq!(table.get("a").unwrap().data, ColumnData::Int(vec![1]));
    assert_eq!(table.get("b").unwrap().data, ColumnData::Int(vec![2]));
}

#[test]
fn bare_carriage_return_is_content() {
    let table = fastab::read_str("a,b\n1,x\ry\n", &ReadOptions::default()).unwrap();
    assert_eq!(
        table.get("b").unwrap().data,
        ColumnData::Str(vec!["x\ry".into()])
    );
}

#[test]
fn space_delimited_basic_preset() {
    let table = fastab::read_str("a b\n1 2\n3 4\n", &ReadOptions::basic()).unwrap();
    assert_eq!(table.get("a").unwrap().data, ColumnData::Int(vec![1, 3]));
    assert_eq!(table.get("b").unwrap().data, ColumnData::Int(vec![2, 4]));
}

#[test]
fn tab_delimited_preset() {
    let table = fastab::read_str("a\tb\n1\t2\n", &ReadOptions::tab()).unwrap();
    assert_eq!(table.get("b").unwrap().data, ColumnData::Int(vec![2]));
}

#[test]
fn reader_from_io_source() {
    let data = b"a,b\n1,2\n".to_vec();
    let table = fastab::read_from_reader(&data[..], &ReadOptions::default()).unwrap();
    assert_eq!(table.get("a").unwrap().data, ColumnData::Int(vec![1]));
}

#[test]
fn delimiter_equal_to_quote_is_rejected() {
    let options = ReadOptions {
        delimiter: b'"',
        ..ReadOptions::default()
    };
    let err = fastab::read_str("a\n", &options).unwrap_err();
    assert!(matches!(err, Error::Parameter(_)));
}

#[test]
fn newline_delimiter_is_rejected() {
    let options = ReadOptions {
        delimiter: b'\n',
        ..ReadOptions::default()
    };
    let err = fastab::read_str("a\n", &options).unwrap_err();
    assert!(matches!(err, Error::Parameter(_)));
}
