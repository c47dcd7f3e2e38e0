use jsonrepo::doc;
use jsonrepo::errors::ErrorKind;
use jsonrepo::filter::{all, field, Filter};
use jsonrepo_int_test::test_util::{
    cleanup, create_backup_test_context, create_test_context, create_test_docs, ids, run_test,
};

#[test]
fn test_delete_by_city() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            let filter = Filter::from_document(&doc! { city: "Rome" })?;
            let result = repository.delete("people", &filter)?;
            assert_eq!(result.count(), 2);
            assert_eq!(result.message(), "Successfully deleted 2 item(s)");
            assert_eq!(ids(result.documents()), vec!["p1", "p3"]);

            assert_eq!(ids(&ctx.read_entity_file("people")?), vec!["p2"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_nothing() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;
            let result = repository.delete("people", &field("city").eq("Naples"))?;
            assert_eq!(result.count(), 0);
            assert_eq!(result.message(), "Successfully deleted 0 item(s)");
            assert_eq!(repository.get("people", &all())?.count(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_without_filter_is_rejected() {
    run_test(
        create_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            for filter in [all(), Filter::from_document(&doc! {})?] {
                let err = repository.delete("people", &filter).unwrap_err();
                assert_eq!(err.kind(), &ErrorKind::ValidationError);
                assert_eq!(
                    err.message(),
                    "Filters are required for DELETE operation (safety measure)"
                );
            }
            assert_eq!(ctx.read_entity_file("people")?.len(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_keeps_backup() {
    run_test(
        create_backup_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;
            repository.delete("people", &field("_id").eq("p1"))?;

            let backup = std::fs::read_to_string(ctx.path().join("people.json.backup"))?;
            let backup: Vec<jsonrepo::collection::Document> = serde_json::from_str(&backup)?;
            assert_eq!(ids(&backup), vec!["p1", "p2", "p3"]);
            assert_eq!(ids(&ctx.read_entity_file("people")?), vec!["p2", "p3"]);
            Ok(())
        },
        cleanup,
    )
}
