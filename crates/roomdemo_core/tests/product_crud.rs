use roomdemo_core::db::open_db_in_memory;
use roomdemo_core::{
    NewProduct, ProductRepository, ProductValidationError, RepoError, SqliteProductRepository,
};

#[test]
fn insert_then_list_returns_assigned_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let id = repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();

    let products = repo.list_products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, id);
    assert_eq!(products[0].name, "Widget");
    assert_eq!(products[0].quantity, 5);
}

#[test]
fn insert_rejects_invalid_product_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let err = repo.insert_product(&NewProduct::new(" ", 5)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ProductValidationError::BlankName)
    ));
    let err = repo.insert_product(&NewProduct::new("Widget", 0)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ProductValidationError::NonPositiveQuantity)
    ));

    assert!(repo.list_products().unwrap().is_empty());
}

#[test]
fn list_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let first = repo.insert_product(&NewProduct::new("Zeta", 1)).unwrap();
    let second = repo.insert_product(&NewProduct::new("Alpha", 2)).unwrap();

    let ids: Vec<_> = repo
        .list_products()
        .unwrap()
        .into_iter()
        .map(|product| product.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
    assert!(first < second);
}

#[test]
fn find_matches_name_prefix_case_sensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);
    repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();
    repo.insert_product(&NewProduct::new("Widget Pro", 2)).unwrap();
    repo.insert_product(&NewProduct::new("Gadget", 9)).unwrap();
    repo.insert_product(&NewProduct::new("widget", 1)).unwrap();

    let names: Vec<String> = repo
        .find_products("Widget")
        .unwrap()
        .into_iter()
        .map(|product| product.name)
        .collect();
    assert_eq!(names, vec!["Widget".to_string(), "Widget Pro".to_string()]);

    assert!(repo.find_products("Sprocket").unwrap().is_empty());
}

#[test]
fn find_treats_like_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);
    repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();
    repo.insert_product(&NewProduct::new("50% off", 1)).unwrap();

    assert!(repo.find_products("%").unwrap().is_empty());
    assert!(repo.find_products("W_dget").unwrap().is_empty());
    assert_eq!(repo.find_products("50%").unwrap().len(), 1);
}

#[test]
fn find_with_empty_name_returns_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);
    repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();

    assert!(repo.find_products("").unwrap().is_empty());
}

#[test]
fn delete_removes_every_exact_name_match_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);
    repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();
    repo.insert_product(&NewProduct::new("Widget", 3)).unwrap();
    repo.insert_product(&NewProduct::new("Widget Pro", 2)).unwrap();

    let removed = repo.delete_products("Widget").unwrap();
    assert_eq!(removed, 2);

    let remaining = repo.list_products().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "Widget Pro");
    assert_eq!(repo.find_products("Widget").unwrap().len(), 1);
}

#[test]
fn delete_of_missing_name_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);
    repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();

    assert_eq!(repo.delete_products("Sprocket").unwrap(), 0);
    assert_eq!(repo.delete_products("").unwrap(), 0);
    assert_eq!(repo.list_products().unwrap().len(), 1);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let first = repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();
    repo.delete_products("Widget").unwrap();
    let second = repo.insert_product(&NewProduct::new("Widget", 5)).unwrap();

    assert!(second > first);
}

#[test]
fn list_rejects_corrupted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO products (name, quantity) VALUES ('   ', 4);",
        [],
    )
    .unwrap();
    let repo = SqliteProductRepository::new(&conn);

    let err = repo.list_products().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
