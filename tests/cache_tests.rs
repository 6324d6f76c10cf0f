use presence_analyzer::{DatasetCache, TtlCache};
use std::convert::Infallible;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

const VALIDITY: Duration = Duration::from_secs(600);

fn counting_producer(calls: &AtomicUsize) -> impl FnOnce() -> Result<usize, Infallible> + '_ {
    move || Ok(calls.fetch_add(1, Ordering::SeqCst) + 1)
}

#[test]
fn fresh_entry_is_returned_by_identity() {
    let cache: TtlCache<&str, usize> = TtlCache::new(VALIDITY);
    let calls = AtomicUsize::new(0);
    let start = Instant::now();

    let first = cache.get_or_compute("data", start, counting_producer(&calls)).unwrap();
    let second = cache
        .get_or_compute("data", start + Duration::from_secs(599), counting_producer(&calls))
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn stale_entry_is_recomputed_exactly_once() {
    let cache: TtlCache<&str, usize> = TtlCache::new(VALIDITY);
    let calls = AtomicUsize::new(0);
    let start = Instant::now();

    let first = cache.get_or_compute("data", start, counting_producer(&calls)).unwrap();
    // Age equal to the validity period is already stale.
    let expired = start + VALIDITY;
    let second = cache.get_or_compute("data", expired, counting_producer(&calls)).unwrap();
    let third = cache
        .get_or_compute("data", expired + Duration::from_secs(1), counting_producer(&calls))
        .unwrap();

    assert_eq!((*first, *second), (1, 2));
    assert!(Arc::ptr_eq(&second, &third));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.computed_at(&"data"), Some(expired));
}

#[test]
fn concurrent_callers_share_one_computation() {
    let cache: Arc<TtlCache<&str, usize>> = Arc::new(TtlCache::new(VALIDITY));
    let calls = Arc::new(AtomicUsize::new(0));
    let now = Instant::now();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                cache
                    .get_or_compute("data", now, || {
                        thread::sleep(Duration::from_millis(20));
                        Ok::<_, Infallible>(calls.fetch_add(1, Ordering::SeqCst))
                    })
                    .unwrap()
            })
        })
        .collect();

    let values: Vec<Arc<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
}

#[test]
fn dataset_cache_serves_stale_file_until_period_elapses() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), "10,2013-09-10,09:00:00,17:00:00\n").unwrap();

    let cache = DatasetCache::new(file.path(), VALIDITY);
    let start = Instant::now();
    let first = cache.dataset_at(start).unwrap();
    assert_eq!(first.person_ids().collect::<Vec<_>>(), vec![10]);

    fs::write(file.path(), "11,2013-09-10,09:00:00,17:00:00\n").unwrap();
    let cached = cache.dataset_at(start + Duration::from_secs(60)).unwrap();
    assert!(Arc::ptr_eq(&first, &cached));
    assert!(cache.is_fresh(start + Duration::from_secs(60)));

    let reloaded = cache.dataset_at(start + VALIDITY).unwrap();
    assert_eq!(reloaded.person_ids().collect::<Vec<_>>(), vec![11]);
    assert!(!Arc::ptr_eq(&first, &reloaded));
}

#[test]
fn dataset_cache_propagates_unavailable_source() {
    let dir = tempfile::tempdir().unwrap();
    let cache = DatasetCache::new(dir.path().join("missing.csv"), VALIDITY);
    let err = cache.dataset().unwrap_err();
    assert!(err.is_source_unavailable());
    assert!(!cache.is_fresh(Instant::now()));
}
