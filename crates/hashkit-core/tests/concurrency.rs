//! Los hashers no tienen estado: hashear en paralelo debe dar lo mismo que en serie.

use hashkit_core::{DType, NumericArray, Record, RecordHasher, Value};
use rayon::prelude::*;

fn record(i: usize) -> Record {
    Record::new().with("id", i)
                 .with("name", format!("item-{i}"))
                 .with("weights", NumericArray::zeros(vec![i % 7 + 1], DType::Float32).unwrap())
                 .with("tags", Value::seq([i as f64 * 0.5, 1.0 / (i as f64 + 1.0)]))
}

#[test]
fn parallel_matches_sequential() {
    let hasher = RecordHasher::default();
    let records: Vec<Record> = (0..256).map(record).collect();
    let sequential: Vec<_> = records.iter().map(|r| hasher.hash_record(r, &["name"]).unwrap()).collect();
    let parallel: Vec<_> = records.par_iter().map(|r| hasher.hash_record(r, &["name"]).unwrap()).collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn same_input_from_many_threads() {
    let hasher = RecordHasher::default();
    let r = record(3);
    let expected = hasher.hash_record(&r, &[]).unwrap();
    let all: Vec<_> = (0..64).into_par_iter().map(|_| hasher.hash_record(&r, &[]).unwrap()).collect();
    assert!(all.iter().all(|d| *d == expected));
}
