use jsonrepo::common::Value;
use jsonrepo::doc;
use jsonrepo::errors::ErrorKind;
use jsonrepo::filter::all;
use jsonrepo_int_test::test_util::{
    cleanup, create_fake_docs, create_memory_test_context, create_test_context, create_test_docs,
    ids, run_test,
};
use std::collections::HashSet;

#[test]
fn test_add_single() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            let result = repository.add(
                "users",
                vec![doc! {
                    "first_name": "John",
                    "last_name": "Doe",
                    "birth_year": 1990,
                    "data": [1, 2, 3],
                    "address": { "city": "Rome" }
                }],
            )?;

            assert_eq!(result.count(), 1);
            assert_eq!(result.message(), "Successfully added 1 item(s)");

            let stored = repository.get("users", &all())?;
            assert_eq!(stored.count(), 1);
            let document = &stored.documents()[0];
            assert_eq!(document.get("first_name"), Some(&Value::from("John")));
            assert_eq!(document.get("address.city"), Some(&Value::from("Rome")));
            assert!(document.id().is_some_and(|id| !id.is_empty()));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_add_batch_appends_in_order() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;
            repository.add("people", vec![doc! { "_id": "p4", name: "Dario" }])?;

            let stored = repository.get("people", &all())?;
            assert_eq!(ids(stored.documents()), vec!["p1", "p2", "p3", "p4"]);
            assert_eq!(ctx.read_entity_file("people")?, stored.into_documents());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_generated_ids_are_unique() {
    run_test(
        create_memory_test_context,
        |ctx| {
            let repository = ctx.repository();
            let mut seen = HashSet::new();
            for _ in 0..10 {
                let result = repository.add("people", create_fake_docs(20))?;
                for id in ids(result.documents()) {
                    assert!(!id.is_empty());
                    assert!(seen.insert(id));
                }
            }
            assert_eq!(repository.get("people", &all())?.count(), 200);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_add_existing_id_leaves_collection_unchanged() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;
            let before = std::fs::read_to_string(ctx.entity_file("people"))?;

            let err = repository
                .add("people", vec![doc! { name: "New" }, doc! { "_id": "p2", name: "Clone" }])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
            assert_eq!(err.message(), "Duplicate _id: p2");

            let after = std::fs::read_to_string(ctx.entity_file("people"))?;
            assert_eq!(before, after);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_add_duplicate_within_batch() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            let err = repository
                .add("people", vec![doc! { "_id": "x" }, doc! { "_id": "x" }])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateKey);
            assert_eq!(repository.get("people", &all())?.count(), 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_add_non_string_id() {
    run_test(
        create_memory_test_context,
        |ctx| {
            let repository = ctx.repository();
            for id in [Value::from(7), Value::from(true), Value::from(vec!["a"])] {
                let err = repository.add("people", vec![doc! { "_id": (id.clone()) }]).unwrap_err();
                assert_eq!(err.kind(), &ErrorKind::ValidationError);
            }
            Ok(())
        },
        cleanup,
    )
}
