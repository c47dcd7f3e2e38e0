use jsonrepo::doc;
use jsonrepo::errors::RepoResult;
use jsonrepo::filter::{all, field};
use jsonrepo_int_test::test_util::{cleanup, create_fake_docs, create_test_context};

fn main() -> RepoResult<()> {
    println!("Starting stress test...");
    let ctx = create_test_context()?;
    let repository = ctx.repository();

    let batches = 200;
    let batch_size = 50;

    let start = std::time::Instant::now();
    for _ in 0..batches {
        repository.add("stress", create_fake_docs(batch_size))?;
    }
    println!(
        "Inserted {} records in {} batches in {:?}",
        batches * batch_size,
        batches,
        start.elapsed()
    );

    let start = std::time::Instant::now();
    let adults = repository.get("stress", &field("age").gte(40))?;
    println!("Found {} records aged 40+ in {:?}", adults.count(), start.elapsed());

    let start = std::time::Instant::now();
    let updated = repository.update(
        "stress",
        &doc! { processed: true },
        &field("age").lt(40),
    )?;
    println!("Updated {} records in {:?}", updated.count(), start.elapsed());

    let start = std::time::Instant::now();
    let processed = repository.get("stress", &field("processed").eq(true))?;
    println!("Counted {} processed records in {:?}", processed.count(), start.elapsed());

    let start = std::time::Instant::now();
    let deleted = repository.delete("stress", &field("processed").exists(true))?;
    println!("Deleted {} records in {:?}", deleted.count(), start.elapsed());

    let remaining = repository.get("stress", &all())?;
    println!("{} records remain", remaining.count());

    cleanup(ctx)
}
