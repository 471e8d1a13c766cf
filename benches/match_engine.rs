use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use media_reconciler::{LocalMediaDescriptor, RemoteAlbumIndex, RemoteMediaDescriptor, decide, reconcile};
use std::hint::black_box;
use std::path::PathBuf;

fn remote_index(size: usize) -> RemoteAlbumIndex {
    let items = (0..size)
        .map(|i| RemoteMediaDescriptor {
            filename: format!("IMG_{i:05}.jpg"),
            mime_type: "image/jpeg".to_string(),
            creation_time_raw: "2021-06-01T10:00:00Z".to_string(),
        })
        .collect();
    RemoteAlbumIndex::from_items(items)
}

fn local_file(i: usize, with_capture: bool) -> LocalMediaDescriptor {
    let taken = Utc.with_ymd_and_hms(2021, 6, 1, 10, 0, 0).unwrap();
    LocalMediaDescriptor {
        path: PathBuf::from(format!("/photos/IMG_{i:05}.jpg")),
        filename: format!("IMG_{i:05}.jpg"),
        mime_type: "image/jpeg".to_string(),
        capture_time: with_capture.then_some(taken),
        fs_access_time: taken + TimeDelta::minutes(3),
        fs_change_time: taken,
        fs_modify_time: taken,
    }
}

fn bench(c: &mut Criterion) {
    let index = remote_index(10_000);
    let last = local_file(9_999, true);
    let missing = local_file(20_000, false);

    c.bench_function("decide.last_item", |b| {
        b.iter(|| decide(black_box(&last), index.items(), 0));
    });

    c.bench_function("decide.not_in_album", |b| {
        b.iter(|| decide(black_box(&missing), index.items(), 10));
    });

    let batch: Vec<LocalMediaDescriptor> = (0..1_000).map(|i| local_file(i * 7, i % 2 == 0)).collect();
    c.bench_function("reconcile.batch_1000", |b| {
        b.iter(|| reconcile(black_box(&batch), &index, 10));
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
