mod common;

use common::{contact_in, create_user, date};
use contacts_core::db::open_db_in_memory;
use contacts_core::{ContactRepository, SqliteContactRepository};

#[test]
fn search_finds_created_contact_and_misses_unrelated_text() {
    let conn = open_db_in_memory().unwrap();
    let user = create_user(&conn, "owner");
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let created = repo
        .create_contact(&contact_in("Ann", "Lee", "ann@x.com", date(1990, 3, 10)), &user)
        .unwrap();

    assert_eq!(repo.search_contacts("ann", 0, 10, &user).unwrap(), vec![created]);
    assert!(repo.search_contacts("zzz", 0, 10, &user).unwrap().is_empty());
}

#[test]
fn empty_query_returns_nothing_even_with_data() {
    let conn = open_db_in_memory().unwrap();
    let user = create_user(&conn, "owner");
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    repo.create_contact(&contact_in("Ann", "Lee", "ann@x.com", date(1990, 3, 10)), &user)
        .unwrap();

    assert!(repo.search_contacts("", 0, 10, &user).unwrap().is_empty());
}

#[test]
fn search_is_case_insensitive_across_name_and_email_fields() {
    let conn = open_db_in_memory().unwrap();
    let user = create_user(&conn, "owner");
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let ann = repo
        .create_contact(&contact_in("Ann", "Lee", "ann@x.com", date(1990, 3, 10)), &user)
        .unwrap();
    let bob = repo
        .create_contact(&contact_in("Bob", "Stone", "bob@Work.io", date(1980, 6, 1)), &user)
        .unwrap();

    assert_eq!(repo.search_contacts("LEE", 0, 10, &user).unwrap(), vec![ann.clone()]);
    assert_eq!(repo.search_contacts("bO", 0, 10, &user).unwrap(), vec![bob.clone()]);
    assert_eq!(repo.search_contacts("work.IO", 0, 10, &user).unwrap(), vec![bob]);
    assert_eq!(repo.search_contacts("x.c", 0, 10, &user).unwrap(), vec![ann]);
}

#[test]
fn search_is_scoped_to_owner() {
    let conn = open_db_in_memory().unwrap();
    let owner = create_user(&conn, "owner");
    let other = create_user(&conn, "other");
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    repo.create_contact(&contact_in("Ann", "Lee", "ann@x.com", date(1990, 3, 10)), &owner)
        .unwrap();

    assert!(repo.search_contacts("ann", 0, 10, &other).unwrap().is_empty());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let user = create_user(&conn, "owner");
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    repo.create_contact(&contact_in("Ann", "Lee", "ann@x.com", date(1990, 3, 10)), &user)
        .unwrap();
    let underscored = repo
        .create_contact(
            &contact_in("Mary_Jane", "Watson", "mj@x.com", date(1992, 8, 1)),
            &user,
        )
        .unwrap();

    assert!(repo.search_contacts("%", 0, 10, &user).unwrap().is_empty());
    assert_eq!(repo.search_contacts("_", 0, 10, &user).unwrap(), vec![underscored]);
}

#[test]
fn search_results_are_paginated_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let user = create_user(&conn, "owner");
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let mut created = Vec::new();
    for index in 0..3 {
        let email = format!("smith{index}@example.org");
        created.push(
            repo.create_contact(&contact_in("Sam", "Smith", &email, date(1990, 1, 1)), &user)
                .unwrap(),
        );
    }
    repo.create_contact(&contact_in("Ann", "Lee", "ann@x.com", date(1990, 3, 10)), &user)
        .unwrap();

    let page = repo.search_contacts("smith", 1, 1, &user).unwrap();
    assert_eq!(page, vec![created[1].clone()]);
    assert!(repo.search_contacts("smith", 3, 10, &user).unwrap().is_empty());
}

#[test]
fn search_folds_case_of_non_ascii_letters() {
    let conn = open_db_in_memory().unwrap();
    let user = create_user(&conn, "owner");
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let emile = repo
        .create_contact(
            &contact_in("Émile", "Öztürk", "emile@x.com", date(1988, 5, 2)),
            &user,
        )
        .unwrap();
    repo.create_contact(&contact_in("Emile", "Ozturk", "e.o@x.com", date(1988, 5, 2)), &user)
        .unwrap();

    for query in ["Émile", "émile", "ÉMILE", "ÖZTÜRK", "türk"] {
        assert_eq!(
            repo.search_contacts(query, 0, 10, &user).unwrap(),
            vec![emile.clone()],
            "query `{query}`"
        );
    }
}
