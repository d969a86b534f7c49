use edunova_core::{NodeId, NotFound, QuizError};
use edunova_quiz::{PrefetchCoordinator, QuizAttempt, QuizCache, QuizViewController};
use edunova_test_utils::{sample_payload, sample_roadmap, FakeQuizFetcher, StaticSessionReader};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn setup(
    fetcher: FakeQuizFetcher,
    session: StaticSessionReader,
) -> (QuizCache, Arc<FakeQuizFetcher>, QuizViewController) {
    let cache = QuizCache::new();
    let fetcher = Arc::new(fetcher);
    let controller = QuizViewController::new(cache.clone(), fetcher.clone(), Arc::new(session));
    (cache, fetcher, controller)
}

#[tokio::test]
async fn test_cache_hit_skips_fetch() {
    let (cache, fetcher, controller) = setup(FakeQuizFetcher::new(), StaticSessionReader::empty());
    cache.set(NodeId(4), sample_payload(NodeId(4))).await;

    let payload = controller.load_quiz(NodeId(4)).await.unwrap();

    assert_eq!(*payload, sample_payload(NodeId(4)));
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_miss_without_roadmap_is_not_found() {
    let (_, fetcher, controller) = setup(FakeQuizFetcher::new(), StaticSessionReader::empty());

    let err = controller.load_quiz(NodeId(1)).await.unwrap_err();

    assert_eq!(err, QuizError::NotFound(NotFound::Roadmap));
    assert_eq!(err.to_string(), "roadmap data not found");
    assert!(!err.is_retryable());
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_miss_for_unknown_node_is_not_found() {
    let (cache, fetcher, controller) = setup(
        FakeQuizFetcher::new(),
        StaticSessionReader::new(sample_roadmap(3)),
    );

    let err = controller.load_quiz(NodeId(99)).await.unwrap_err();

    assert_eq!(err, QuizError::NotFound(NotFound::Node(NodeId(99))));
    assert!(err.is_not_found());
    assert!(!cache.has(NodeId(99)));
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_miss_fetches_once_then_serves_from_cache() {
    let (cache, fetcher, controller) = setup(
        FakeQuizFetcher::new(),
        StaticSessionReader::new(sample_roadmap(3)),
    );

    let first = controller.load_quiz(NodeId(2)).await.unwrap();
    assert!(cache.has(NodeId(2)));

    let second = controller.load_quiz(NodeId(2)).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fetcher.calls_for(NodeId(2)), 1);
}

#[tokio::test]
async fn test_failed_fetch_is_retryable_and_not_cached() {
    let (cache, fetcher, controller) = setup(
        FakeQuizFetcher::new().failing_on([NodeId(1)]),
        StaticSessionReader::new(sample_roadmap(1)),
    );

    let err = controller.load_quiz(NodeId(1)).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(!cache.has(NodeId(1)));

    fetcher.recover(NodeId(1));
    controller.load_quiz(NodeId(1)).await.unwrap();
    assert_eq!(fetcher.calls_for(NodeId(1)), 2);
}

#[tokio::test]
async fn test_prefetch_isolates_failures() {
    let (cache, fetcher, controller) = setup(
        FakeQuizFetcher::new().failing_on([NodeId(2)]),
        StaticSessionReader::new(sample_roadmap(3)),
    );
    let coordinator = PrefetchCoordinator::new(cache.clone(), fetcher.clone());

    let mut report = coordinator.prefetch_all(&sample_roadmap(3)).await;
    report.cached.sort();

    assert_eq!(report.cached, vec![NodeId(1), NodeId(3)]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, NodeId(2));
    assert!(!cache.has(NodeId(2)));

    // The view controller recovers the missed node on demand
    fetcher.recover(NodeId(2));
    controller.load_quiz(NodeId(2)).await.unwrap();
    assert_eq!(fetcher.calls_for(NodeId(2)), 2);
}

#[tokio::test]
async fn test_prefetch_then_open_never_refetches() {
    let (cache, fetcher, controller) = setup(
        FakeQuizFetcher::new(),
        StaticSessionReader::new(sample_roadmap(5)),
    );
    let coordinator = PrefetchCoordinator::new(cache, fetcher.clone()).with_concurrency(Some(2));

    let report = coordinator.prefetch_all(&sample_roadmap(5)).await;
    assert!(report.is_complete());
    assert_eq!(fetcher.call_count(), 5);

    for id in 1..=5 {
        controller.load_quiz(NodeId(id)).await.unwrap();
    }
    assert_eq!(fetcher.call_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_open_during_prefetch_shares_in_flight_fetch() {
    let (cache, fetcher, controller) = setup(
        FakeQuizFetcher::new().with_delay(Duration::from_millis(200)),
        StaticSessionReader::new(sample_roadmap(3)),
    );
    let coordinator = PrefetchCoordinator::new(cache, fetcher.clone());

    let handle = coordinator.spawn_prefetch(sample_roadmap(3));
    tokio::time::sleep(Duration::from_millis(10)).await;

    let payload = controller.load_quiz(NodeId(3)).await.unwrap();
    assert_eq!(*payload, sample_payload(NodeId(3)));

    let report = handle.await.unwrap();
    assert_eq!(report.total(), 3);
    assert_eq!(fetcher.calls_for(NodeId(3)), 1);
}

#[tokio::test]
async fn test_load_and_score_attempt() {
    let (_, _, controller) = setup(
        FakeQuizFetcher::new(),
        StaticSessionReader::new(sample_roadmap(1)),
    );
    let payload = controller.load_quiz(NodeId(1)).await.unwrap();

    let mut attempt = QuizAttempt::new(payload);
    // Sample quizzes put the right answer first, then second
    assert!(attempt.select(0, 0));
    assert!(attempt.select(1, 0));

    let score = attempt.submit().unwrap();
    assert_eq!((score.correct, score.total), (1, 2));
}
