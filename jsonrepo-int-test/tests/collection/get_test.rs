use jsonrepo::doc;
use jsonrepo::errors::ErrorKind;
use jsonrepo::filter::{all, field, Filter};
use jsonrepo_int_test::test_util::{
    cleanup, create_strict_test_context, create_test_context, create_test_docs, ids, run_test,
};

#[test]
fn test_get_all_returns_collection_unmodified() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            let result = repository.get("people", &all())?;
            assert_eq!(result.count(), 3);
            assert_eq!(result.message(), "Retrieved 3 item(s)");
            assert_eq!(result.documents(), create_test_docs().as_slice());

            let empty_filter = Filter::from_document(&doc! {})?;
            let result = repository.get("people", &empty_filter)?;
            assert_eq!(result.message(), "Retrieved 3 item(s)");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_with_gte() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            let result = repository.get("people", &Filter::from_document(&doc! { age: { "$gte": 25 } })?)?;
            assert_eq!(ids(result.documents()), vec!["p1", "p3"]);
            assert_eq!(result.message(), "Retrieved 2 item(s) matching filters");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_missing_field() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            let result = repository.get("people", &field("email").exists(false))?;
            assert_eq!(ids(result.documents()), vec!["p2"]);

            // a null value is still present
            let result = repository.get("people", &field("email").exists(true))?;
            assert_eq!(ids(result.documents()), vec!["p1", "p3"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_creates_absent_entity() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            let result = repository.get("fresh", &all())?;
            assert_eq!(result.count(), 0);
            assert_eq!(result.message(), "Retrieved 0 item(s)");
            assert!(ctx.entity_file("fresh").is_file());
            assert!(ctx.read_entity_file("fresh")?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_absent_entity_without_auto_create() {
    run_test(
        create_strict_test_context,
        |ctx| {
            let repository = ctx.repository();
            let err = repository.get("fresh", &all()).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotFound);
            assert!(!ctx.entity_file("fresh").exists());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_nested_entity() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("shop/orders", vec![doc! { "_id": "o1", total: 12.5 }])?;
            assert!(ctx.path().join("shop").join("orders.json").is_file());

            let result = repository.get("shop/orders", &field("total").gt(10))?;
            assert_eq!(ids(result.documents()), vec!["o1"]);
            Ok(())
        },
        cleanup,
    )
}
