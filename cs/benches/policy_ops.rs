use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cs_policy::{ContentStore, Data, FrequencyStructure};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

// --- Structure-level operations ---

fn bench_frequency_structure(c: &mut Criterion) {
  let mut group = c.benchmark_group("frequency_structure");

  for size in [64u64, 1_024, 16_384] {
    let mut keys: Vec<u64> = (0..size).collect();
    keys.shuffle(&mut Pcg64::seed_from_u64(42));

    group.throughput(Throughput::Elements(size));

    group.bench_with_input(BenchmarkId::new("add", size), &keys, |b, keys| {
      b.iter(|| {
        let mut fs = FrequencyStructure::new();
        for &key in keys {
          fs.add(key);
        }
        black_box(fs.len())
      })
    });

    // Touching a skewed subset builds up several frequency buckets.
    group.bench_with_input(BenchmarkId::new("touch", size), &keys, |b, keys| {
      let mut fs = FrequencyStructure::new();
      for &key in keys {
        fs.add(key);
      }
      b.iter(|| {
        for (i, key) in keys.iter().enumerate() {
          if i % 4 == 0 {
            fs.touch(key);
          }
        }
        black_box(fs.len())
      })
    });

    group.bench_with_input(BenchmarkId::new("evict_half", size), &keys, |b, keys| {
      b.iter_batched(
        || {
          let mut fs = FrequencyStructure::new();
          for &key in keys {
            fs.add(key);
          }
          fs
        },
        |mut fs| black_box(fs.evict_lowest(keys.len() / 2)),
        criterion::BatchSize::LargeInput,
      )
    });
  }

  group.finish();
}

// --- Store-level workload ---

fn bench_store_churn(c: &mut Criterion) {
  let mut group = c.benchmark_group("store_churn");
  let names: Vec<String> = (0..4_096).map(|i| format!("/bench/{i}")).collect();

  for policy in ["lfu", "lru", "fifo"] {
    group.throughput(Throughput::Elements(names.len() as u64));
    group.bench_function(policy, |b| {
      b.iter_batched(
        || ContentStore::builder().policy(policy).limit(512).build().unwrap(),
        |mut store| {
          for (i, name) in names.iter().enumerate() {
            if store.find(name).is_none() {
              store.insert(Data::new(name.as_str(), Vec::<u8>::new()), false);
            }
            if i % 3 == 0 {
              store.find(&names[i / 3]);
            }
          }
          black_box(store.len())
        },
        criterion::BatchSize::SmallInput,
      )
    });
  }

  group.finish();
}

criterion_group!(benches, bench_frequency_structure, bench_store_churn);
criterion_main!(benches);
