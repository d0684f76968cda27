use chrono::NaiveDate;
use libris_catalog::record::{RecordError, parse_record, tokenize_line, validate_fields};

#[test]
fn tokenize_plain_fields() {
    let fields = tokenize_line("1111111111111,Livro 1,Editora 1,15/08/2009,Autor 1");
    assert_eq!(
        fields,
        vec!["1111111111111", "Livro 1", "Editora 1", "15/08/2009", "Autor 1"]
    );
}

#[test]
fn tokenize_quoted_field_with_commas() {
    let fields = tokenize_line(r#"1,"Book: A, Part 1",Pub,01/01/2000,Someone"#);
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[1], "Book: A, Part 1");
}

#[test]
fn tokenize_doubled_quote_is_literal() {
    let fields = tokenize_line(r#"1,"The ""Best"" Book",Pub"#);
    assert_eq!(fields, vec!["1", r#"The "Best" Book"#, "Pub"]);
}

#[test]
fn tokenize_emits_trailing_empty_field() {
    let fields = tokenize_line("a,b,");
    assert_eq!(fields, vec!["a", "b", ""]);
}

#[test]
fn tokenize_unterminated_quote_swallows_rest() {
    // No error; the open quote keeps the remaining commas inside one field.
    let fields = tokenize_line(r#"1,"open,quote,never,closed"#);
    assert_eq!(fields, vec!["1", "open,quote,never,closed"]);
}

#[test]
fn tokenize_empty_line_is_one_empty_field() {
    assert_eq!(tokenize_line(""), vec![""]);
}

#[test]
fn valid_record_is_normalized() {
    let draft = parse_record("1111111111111,Livro 1,Editora 1,15/08/2009,Autor 1").unwrap();
    assert_eq!(draft.isbn, Some(1111111111111));
    assert_eq!(draft.title, "LIVRO 1");
    assert_eq!(draft.publisher.as_deref(), Some("EDITORA 1"));
    assert_eq!(draft.published_on, NaiveDate::from_ymd_opt(2009, 8, 15));
    assert_eq!(draft.authors, vec!["AUTOR 1"]);
    assert!(draft.id.is_none());
}

#[test]
fn multiple_authors_keep_order() {
    let draft = parse_record("2222222222222,Livro 2,Editora 2,10/01/2017,Autor 2;Autor 1").unwrap();
    assert_eq!(draft.authors, vec!["AUTOR 2", "AUTOR 1"]);
}

#[test]
fn fields_are_trimmed_before_normalizing() {
    let draft = parse_record(" 42 ,  dom casmurro , garnier , 01/01/1899 , machado de assis ").unwrap();
    assert_eq!(draft.isbn, Some(42));
    assert_eq!(draft.title, "DOM CASMURRO");
    assert_eq!(draft.publisher.as_deref(), Some("GARNIER"));
    assert_eq!(draft.authors, vec!["MACHADO DE ASSIS"]);
}

#[test]
fn missing_field_is_reported() {
    let err = parse_record("2222222222222,Editora 3,10/01/2017,autor 3;autor 4").unwrap_err();
    assert_eq!(err, RecordError::MissingFields { found: 4 });
    assert!(err.to_string().contains("field(s) not found"));
}

#[test]
fn extra_field_is_reported() {
    let err =
        parse_record("3333333333333,livro 3,editora 1,10/01/2017,autor 2;autor1,campo extra")
            .unwrap_err();
    assert_eq!(err, RecordError::TooManyFields { found: 6 });
    assert!(err.to_string().contains("fields"));
}

#[test]
fn invalid_isbn() {
    let err = parse_record("invalido,livro 2,editora 2,10/01/2017,autor").unwrap_err();
    assert_eq!(err.to_string(), "ISBN 'invalido' is not a valid number");
}

#[test]
fn empty_isbn() {
    let err = parse_record(" ,livro 2,editora 2,10/01/2017,autor").unwrap_err();
    assert_eq!(err, RecordError::EmptyIsbn);
}

#[test]
fn blank_title_and_publisher() {
    assert_eq!(
        parse_record("4444444444444,  ,editora 2,10/01/2017,autor").unwrap_err(),
        RecordError::MissingTitle
    );
    assert_eq!(
        parse_record("5555555555555,livro 1,,10/01/2017,autor").unwrap_err(),
        RecordError::MissingPublisher
    );
}

#[test]
fn date_errors() {
    assert_eq!(
        parse_record("6666666666666,livro 1,editora 2,,autor").unwrap_err(),
        RecordError::MissingDate
    );

    let err = parse_record("8888888888888,livro 1,editora 2,2025-10-01,autor").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid date format: '2025-10-01'. Use dd/MM/yyyy"
    );

    let err = parse_record("7777777777777,livro 1,editora 2,31/02/2020,autor").unwrap_err();
    assert!(matches!(err, RecordError::InvalidDate(_)));
}

#[test]
fn padded_date_parses_trimmed_but_reports_raw() {
    let draft = parse_record("1111111111111,livro 1,editora 1, 15/08/2009 ,autor").unwrap();
    assert_eq!(draft.published_on, NaiveDate::from_ymd_opt(2009, 8, 15));

    let err = parse_record("8888888888888,livro 1,editora 2, 2025-10-01 ,autor").unwrap_err();
    assert_eq!(err, RecordError::InvalidDate(" 2025-10-01 ".to_string()));
    assert_eq!(
        err.to_string(),
        "Invalid date format: ' 2025-10-01 '. Use dd/MM/yyyy"
    );
}

#[test]
fn no_authors() {
    assert_eq!(
        parse_record("9999999999999,livro 1,editora 2,10/01/2017,").unwrap_err(),
        RecordError::NoAuthors
    );
    assert_eq!(
        parse_record("9999999999999,livro 1,editora 2,10/01/2017, ; ;").unwrap_err(),
        RecordError::NoAuthors
    );
}

#[test]
fn first_failing_rule_wins() {
    // Both the ISBN and the title are bad; only the ISBN error is reported.
    let err = parse_record("abc,,editora,10/01/2017,autor").unwrap_err();
    assert!(matches!(err, RecordError::InvalidIsbn(_)));
}

#[test]
fn validate_accepts_borrowed_fields() {
    let fields = ["1", "t", "p", "02/03/2004", "a"];
    let draft = validate_fields(&fields).unwrap();
    assert_eq!(draft.published_on, NaiveDate::from_ymd_opt(2004, 3, 2));
}
