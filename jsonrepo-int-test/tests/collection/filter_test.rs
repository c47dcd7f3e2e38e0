use jsonrepo::collection::Document;
use jsonrepo::doc;
use jsonrepo::errors::ErrorKind;
use jsonrepo::filter::{matches, Filter};
use jsonrepo_int_test::test_util::{
    cleanup, create_fake_docs, create_memory_test_context, create_test_docs, ids, run_test,
};

fn sample_filters() -> Vec<Document> {
    vec![
        doc! { age: { "$gte": 25 } },
        doc! { age: { "$lt": 40, "$gt": 18 } },
        doc! { city: "Rome" },
        doc! { city: { "$in": ["Rome", "Milan"] } },
        doc! { city: { "$nin": ["Rome"] } },
        doc! { name: { "$startsWith": "C" } },
        doc! { name: { "$endsWith": "a" } },
        doc! { email: { "$contains": "@" } },
        doc! { email: { "$exists": false } },
        doc! { "address.zip": { "$exists": true } },
        doc! { "address.city": { "$ne": "Rome" } },
        doc! { tags: ["user"] },
        doc! { "$or": [{ city: "Turin" }, { age: { "$gt": 40 } }] },
        doc! { "$and": [{ city: "Rome" }, { age: { "$lte": 30 } }] },
        doc! { "$not": { city: "Rome" } },
        doc! {},
    ]
}

fn all_docs() -> Vec<Document> {
    let mut documents = create_test_docs();
    documents.extend(create_fake_docs(20));
    documents
}

#[test]
fn test_not_negates() {
    for filter in sample_filters() {
        let negated = doc! { "$not": (filter.clone()) };
        for document in all_docs() {
            assert_eq!(
                matches(&document, &negated).unwrap(),
                !matches(&document, &filter).unwrap(),
                "filter {} on {}",
                filter,
                document
            );
        }
    }
}

#[test]
fn test_and_is_all_or_is_any() {
    let filters = sample_filters();
    for document in all_docs() {
        for window in filters.windows(3) {
            let sub_filters: Vec<Document> = window.to_vec();
            let each: Vec<bool> = sub_filters
                .iter()
                .map(|f| matches(&document, f).unwrap())
                .collect();

            let and_filter = doc! { "$and": (sub_filters.clone()) };
            let or_filter = doc! { "$or": (sub_filters.clone()) };
            assert_eq!(matches(&document, &and_filter).unwrap(), each.iter().all(|b| *b));
            assert_eq!(matches(&document, &or_filter).unwrap(), each.iter().any(|b| *b));
        }
    }
}

#[test]
fn test_sibling_keys_are_conjunction() {
    for document in all_docs() {
        let combined = doc! {
            "$or": [{ city: "Rome" }, { city: "Turin" }],
            age: { "$gte": 25 }
        };
        let expected = matches(&document, &doc! { "$or": [{ city: "Rome" }, { city: "Turin" }] })
            .unwrap()
            && matches(&document, &doc! { age: { "$gte": 25 } }).unwrap();
        assert_eq!(matches(&document, &combined).unwrap(), expected);
    }
}

#[test]
fn test_unknown_operator_fails_operation() {
    run_test(
        create_memory_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            let err = Filter::from_document(&doc! { age: { "$regex": "^3" } }).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnknownOperator);
            assert_eq!(err.message(), "Unknown operator: $regex");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_filters_against_repository() {
    run_test(
        create_memory_test_context,
        |ctx| {
            let repository = ctx.repository();
            repository.add("people", create_test_docs())?;

            let cases = vec![
                (doc! { "address.zip": { "$startsWith": "001" } }, vec!["p1", "p3"]),
                (doc! { tags: { "$exists": true }, age: { "$lt": 25 } }, vec!["p2"]),
                (doc! { "tags.0": "admin" }, vec!["p1"]),
                (doc! { "$not": { "$or": [{ age: 20 }, { age: 45 }] } }, vec!["p1"]),
                (doc! { age: { "$gt": "20" } }, vec![]),
            ];
            for (filter, expected) in cases {
                let result = repository.get("people", &Filter::from_document(&filter)?)?;
                assert_eq!(ids(result.documents()), expected, "filter {}", filter);
            }
            Ok(())
        },
        cleanup,
    )
}
