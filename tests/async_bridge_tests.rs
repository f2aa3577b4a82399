use futures::stream::{self, StreamExt};
use valve_stream::async_bridge::{collect_async, into_async, try_collect_async};
use valve_stream::{BufferConfig, LazyStream, Stream, StreamError};

#[tokio::test]
async fn test_lazy_stream_into_async() {
    let items: Vec<i32> = LazyStream::of(vec![1, 2, 3])
        .map(|x| x * 2)
        .into_async()
        .collect()
        .await;
    assert_eq!(items, vec![2, 4, 6]);
}

#[tokio::test]
async fn test_eager_stream_into_async_respects_limits() {
    let items: Vec<i32> = Stream::of(1..=10).limits(3).into_async().collect().await;
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_into_async_with_async_combinators() {
    let items: Vec<i32> = into_async(LazyStream::of(1..=4).filter(|x| x % 2 == 0))
        .then(|x| async move { x + 100 })
        .collect()
        .await;
    assert_eq!(items, vec![102, 104]);
}

#[tokio::test]
async fn test_collect_async() {
    let collected = collect_async(stream::iter(vec![3, 1, 2])).await;
    assert_eq!(collected.sort().into_vec(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_try_collect_async_enforces_capacity() {
    let config = BufferConfig::new().max_capacity(2);
    let result = try_collect_async(stream::iter(1..=5), &config).await;
    assert!(matches!(result, Err(StreamError::CapacityExceeded { limit: 2 })));

    let result = try_collect_async(stream::iter(1..=2), &config).await.unwrap();
    assert_eq!(result.into_vec(), vec![1, 2]);
}
