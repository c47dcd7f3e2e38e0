use jsonrepo::common::Value;
use jsonrepo::doc;
use jsonrepo::errors::ErrorKind;
use jsonrepo::filter::{all, and, field};
use jsonrepo_int_test::test_util::{
    cleanup, create_fake_docs, create_test_context, create_test_docs, ids, run_test,
};

#[test]
fn test_update_merges_matching() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            let result = repository.update(
                "people",
                &doc! { city: "Milan", active: true },
                &field("city").eq("Rome"),
            )?;
            assert_eq!(result.count(), 2);
            assert_eq!(result.message(), "Successfully updated 2 item(s)");
            assert_eq!(ids(result.documents()), vec!["p1", "p3"]);

            let stored = repository.get("people", &all())?.into_documents();
            assert_eq!(ids(&stored), vec!["p1", "p2", "p3"]);
            assert_eq!(stored[0].get("city"), Some(&Value::from("Milan")));
            assert_eq!(stored[0].get("active"), Some(&Value::from(true)));
            // untouched fields survive the shallow merge
            assert_eq!(stored[0].get("address.zip"), Some(&Value::from("00100")));
            assert_eq!(stored[1], create_test_docs()[1]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_is_shallow() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            repository.update("people", &doc! { address: { zip: "20100" } }, &field("_id").eq("p1"))?;
            let stored = repository.get("people", &field("_id").eq("p1"))?.into_documents();
            assert_eq!(stored[0].get("address.zip"), Some(&Value::from("20100")));
            assert_eq!(stored[0].get("address.street"), None);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_preserves_id() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            let added = repository.add("people", create_fake_docs(5))?;
            let before = ids(added.documents());

            let result = repository.update(
                "people",
                &doc! { "_id": "stolen", checked: true },
                &field("age").gte(0),
            )?;
            assert_eq!(result.count(), 5);

            let stored = repository.get("people", &all())?;
            assert_eq!(ids(stored.documents()), before);
            assert!(stored
                .documents()
                .iter()
                .all(|d| d.get("checked") == Some(&Value::from(true))));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_without_filter_is_rejected() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;
            let modified = std::fs::metadata(ctx.entity_file("people"))?.modified()?;
            let before = std::fs::read_to_string(ctx.entity_file("people"))?;

            let err = repository.update("people", &doc! { age: 0 }, &all()).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ValidationError);
            assert_eq!(
                err.message(),
                "Filters are required for UPDATE operation (safety measure)"
            );

            assert_eq!(std::fs::read_to_string(ctx.entity_file("people"))?, before);
            assert_eq!(std::fs::metadata(ctx.entity_file("people"))?.modified()?, modified);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_with_empty_conjunction_updates_everything() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;
            let result = repository.update("people", &doc! { seen: true }, &and(vec![]))?;
            assert_eq!(result.count(), 3);
            Ok(())
        },
        cleanup,
    )
}
