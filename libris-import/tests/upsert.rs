use chrono::NaiveDate;
use libris_catalog::types::*;
use libris_db::Gateway;
use libris_import::*;

fn draft(isbn: Option<i64>, title: &str, publisher: &str, authors: &[&str]) -> BookDraft {
    BookDraft {
        id: None,
        isbn,
        title: title.to_string(),
        publisher: Some(publisher.to_string()),
        published_on: NaiveDate::from_ymd_opt(2009, 8, 15),
        authors: authors.iter().map(|a| a.to_string()).collect(),
    }
}

#[test]
fn new_draft_is_inserted() {
    let gateway = Gateway::open_memory().unwrap();
    let (book, kind) = save_draft(
        &gateway,
        &draft(Some(1111111111111), "LIVRO 1", "EDITORA 1", &["AUTOR 1"]),
    )
    .unwrap();

    assert_eq!(kind, SaveKind::Inserted);
    let loaded: Book = gateway.find_by_id(book.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.title, "LIVRO 1");
    assert_eq!(loaded.publisher.unwrap().name, "EDITORA 1");
    assert_eq!(loaded.authors.len(), 1);
    assert_eq!(loaded.authors[0].name, "AUTOR 1");
}

#[test]
fn existing_isbn_overwrites_row() {
    let gateway = Gateway::open_memory().unwrap();
    let (first, _) = save_draft(
        &gateway,
        &draft(Some(1111111111111), "LIVRO 1", "EDITORA 1", &["AUTOR 1"]),
    )
    .unwrap();
    let (second, kind) = save_draft(
        &gateway,
        &draft(Some(1111111111111), "LIVRO 1 REVISTO", "EDITORA 2", &["AUTOR 2"]),
    )
    .unwrap();

    assert_eq!(kind, SaveKind::Updated);
    assert_eq!(first.id, second.id);

    let books: Vec<Book> = gateway.find_all().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "LIVRO 1 REVISTO");
    assert_eq!(books[0].authors[0].name, "AUTOR 2");
}

#[test]
fn shared_names_resolve_to_one_row() {
    let gateway = Gateway::open_memory().unwrap();
    let drafts = vec![
        draft(Some(1), "LIVRO 1", "EDITORA 1", &["AUTOR 1"]),
        draft(Some(2), "LIVRO 2", "EDITORA 1", &["AUTOR 2", "AUTOR 1"]),
    ];
    let report = save_all(&gateway, &drafts, &CancelToken::new(), &SilentProgress);

    assert_eq!(report.saved(), 2);
    assert!(report.failures.is_empty());
    assert_eq!(gateway.find_all::<Publisher>().unwrap().len(), 1);
    assert_eq!(gateway.find_all::<Author>().unwrap().len(), 2);

    let second = gateway.find_book_by_isbn(2).unwrap().unwrap();
    let names: Vec<_> = second.authors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["AUTOR 2", "AUTOR 1"]);
}

#[test]
fn draft_without_publisher_leaves_it_unset() {
    let gateway = Gateway::open_memory().unwrap();
    let mut no_publisher = draft(None, "SEM EDITORA", "unused", &["AUTOR"]);
    no_publisher.publisher = None;

    let (book, _) = save_draft(&gateway, &no_publisher).unwrap();
    assert!(book.publisher.is_none());
    assert!(gateway.find_all::<Publisher>().unwrap().is_empty());
}

#[test]
fn duplicate_author_names_in_one_draft_are_tolerated() {
    let gateway = Gateway::open_memory().unwrap();
    let (book, _) = save_draft(&gateway, &draft(None, "ECO", "P", &["A", "A"])).unwrap();

    let loaded: Book = gateway.find_by_id(book.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.authors.len(), 1);
}

#[test]
fn blank_title_is_rejected_before_touching_storage() {
    let gateway = Gateway::open_memory().unwrap();
    let err = save_draft(&gateway, &draft(None, "  ", "P", &["A"])).unwrap_err();

    assert!(matches!(err, SaveError::EmptyTitle));
    assert!(gateway.find_all::<Publisher>().unwrap().is_empty());
}

#[test]
fn overwrite_keeps_similar_links() {
    let gateway = Gateway::open_memory().unwrap();
    let (other, _) = save_draft(&gateway, &draft(Some(1), "OUTRO", "P", &["A"])).unwrap();
    let (book, _) = save_draft(&gateway, &draft(Some(2), "LIVRO", "P", &["A"])).unwrap();

    let mut linked = book.clone();
    linked.similar_ids = vec![other.id.unwrap()];
    gateway.save(&linked).unwrap();

    save_draft(&gateway, &draft(Some(2), "LIVRO NOVO", "P", &["A"])).unwrap();
    let loaded = gateway.find_book_by_isbn(2).unwrap().unwrap();
    assert_eq!(loaded.title, "LIVRO NOVO");
    assert_eq!(loaded.similar_ids, vec![other.id.unwrap()]);
}

#[test]
fn save_all_reports_failures_and_continues() {
    let gateway = Gateway::open_memory().unwrap();
    let drafts = vec![
        draft(Some(1), "LIVRO 1", "P", &["A"]),
        draft(Some(2), "", "P", &["A"]),
        draft(Some(3), "LIVRO 3", "P", &["A"]),
    ];
    let report = save_all(&gateway, &drafts, &CancelToken::new(), &SilentProgress);

    assert_eq!(report.inserted, 2);
    assert_eq!(report.failures, vec!["ISBN 2: Book title cannot be empty"]);
    assert_eq!(gateway.find_all::<Book>().unwrap().len(), 2);
}

#[test]
fn save_all_stops_when_cancelled() {
    let gateway = Gateway::open_memory().unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();

    let report = save_all(
        &gateway,
        &[draft(Some(1), "LIVRO", "P", &["A"])],
        &cancel,
        &SilentProgress,
    );
    assert!(report.cancelled);
    assert_eq!(report.saved(), 0);
    assert!(gateway.find_all::<Book>().unwrap().is_empty());
}

#[test]
fn end_to_end_csv_to_catalog() {
    let gateway = Gateway::open_memory().unwrap();
    let outcome = import_reader(
        "ISBN,Titulo,Editora,Data_Publicacao,Autor\n\
         1111111111111,Livro 1,Editora 1,15/08/2009,Autor 1\n\
         2222222222222,Livro 2,Editora 1,10/01/2017,Autor 2;Autor 1\n\
         3333333333333,Livro 3,Editora 2\n"
            .as_bytes(),
        &CancelToken::new(),
        &SilentProgress,
    );
    assert_eq!(outcome.failure_count(), 1);

    let report = save_all(&gateway, &outcome.drafts, &CancelToken::new(), &SilentProgress);
    assert_eq!(report.inserted, 2);

    let stats = gateway.catalog_stats().unwrap();
    assert_eq!(stats.books, 2);
    assert_eq!(stats.authors, 2);
    assert_eq!(stats.publishers, 1);

    // Re-importing the same file overwrites instead of duplicating
    let report = save_all(&gateway, &outcome.drafts, &CancelToken::new(), &SilentProgress);
    assert_eq!(report.updated, 2);
    assert_eq!(gateway.catalog_stats().unwrap().books, 2);
}
