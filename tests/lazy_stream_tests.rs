use std::cell::Cell;
use std::rc::Rc;

use valve_stream::{
    ArrayCollector, BufferConfig, LazyStream, Pull, SequenceDataSource, Stream, StreamDataSource,
    StreamError,
};

#[test]
fn test_map_preserves_order() {
    let result: Vec<i32> = LazyStream::of(vec![3, 1, 2]).map(|x| x * 2).value();
    assert_eq!(result, vec![6, 2, 4]);
}

#[test]
fn test_filter_keeps_matching_subsequence() {
    let result = LazyStream::of(1..=10).filter(|x| x % 3 == 0).value();
    assert_eq!(result, vec![3, 6, 9]);
}

#[test]
fn test_flat_map_grouping() {
    let result: Vec<i32> = LazyStream::of(vec![1, 2, 3]).flat_map(|x| vec![x, x * 10]).value();
    assert_eq!(result, vec![1, 10, 2, 20, 3, 30]);
}

#[test]
fn test_flat_map_into_lazy_streams() {
    let result: Vec<i32> = LazyStream::of(vec![1, 2, 3])
        .flat_map(|x| LazyStream::of(0..x).map(move |y| x * 10 + y))
        .value();
    assert_eq!(result, vec![10, 20, 21, 30, 31, 32]);
}

#[test]
fn test_flat_map_into_eager_streams_and_options() {
    let doubled: Vec<i32> = LazyStream::of(vec![1, 2]).flat_map(|x| Stream::of(vec![x; 2])).value();
    assert_eq!(doubled, vec![1, 1, 2, 2]);

    let parsed: Vec<i32> = LazyStream::of(vec!["1", "x", "3"])
        .flat_map(|s| s.parse::<i32>().ok())
        .value();
    assert_eq!(parsed, vec![1, 3]);
}

#[test]
fn test_flat_map_over_words() {
    let lines = vec!["a b", "", "c"];
    let words: Vec<String> = LazyStream::of(lines)
        .flat_map(|line| {
            line.split_whitespace()
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .value();
    assert_eq!(words, vec!["a", "b", "c"]);
}

#[test]
fn test_combined_pipeline_borrows_environment() {
    let threshold = 2;
    let offsets = vec![100, 200];
    let result: Vec<i32> = LazyStream::of(1..=4)
        .filter(|x| *x > threshold)
        .flat_map(|x| offsets.iter().map(|o| o + x).collect::<Vec<_>>())
        .map(|x| x - 100)
        .value();
    assert_eq!(result, vec![3, 103, 4, 104]);
}

#[test]
fn test_transformations_are_lazy() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut stream = LazyStream::of(1..=5).map(move |x| {
        counter.set(counter.get() + 1);
        x
    });
    assert_eq!(calls.get(), 0);

    assert_eq!(stream.first(), Some(1));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_look_ahead_does_not_mutate() {
    let mut stream = LazyStream::of(1..=8).filter(|x| x % 2 == 0).map(|x| x + 1);

    for _ in 0..3 {
        assert_eq!(stream.look_ahead(2), Pull::Value(5));
        assert!(stream.has_next());
    }
    assert_eq!(stream.next(), Pull::Value(3));
    assert_eq!(stream.look_ahead(2), Pull::Value(7));
    assert_eq!(stream.next(), Pull::Value(5));
}

#[test]
fn test_limits() {
    let mut stream = LazyStream::of(vec![1, 2, 3, 4, 5]).limits(2);
    assert_eq!(stream.value(), vec![1, 2]);
    stream.reset();
    assert_eq!(stream.value(), vec![1, 2]);
}

#[test]
fn test_limits_respected_by_look_ahead() {
    let mut stream = LazyStream::of(1..=5).limits(2);
    assert_eq!(stream.look_ahead(2), Pull::Value(2));
    assert_eq!(stream.look_ahead(3), Pull::EndOfStream);
    stream.next();
    stream.next();
    assert!(!stream.has_next());
    assert_eq!(stream.next(), Pull::EndOfStream);
}

#[test]
fn test_limits_before_filter() {
    let result = LazyStream::of(1..=10).limits(4).filter(|x| x % 2 == 0).value();
    assert_eq!(result, vec![2, 4]);
}

#[test]
fn test_limits_after_filter() {
    let result = LazyStream::of(1..=10).filter(|x| x % 2 == 0).limits(3).value();
    assert_eq!(result, vec![2, 4, 6]);
}

#[test]
fn test_limits_on_infinite_source() {
    let result = LazyStream::of_data_source(SequenceDataSource::unbounded(1))
        .map(|x| x * x)
        .limits(4)
        .value();
    assert_eq!(result, vec![1, 4, 9, 16]);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut stream = LazyStream::of(vec![1, 2, 3]).map(|x| x * 2);
    stream.next();
    stream.next();
    stream.has_next();

    stream.reset();
    assert_eq!(stream.current(), Pull::BeforeStream);
    assert_eq!(stream.next(), Pull::Value(2));
}

#[test]
fn test_each_stops_early() {
    let mut visited = Vec::new();
    LazyStream::of(vec![1, 2, 3, 4]).each(|x| {
        visited.push(x);
        x < 3
    });
    assert_eq!(visited, vec![1, 2, 3]);
}

#[test]
fn test_each_resets_after_stop() {
    let mut stream = LazyStream::of(vec![1, 2, 3, 4]);
    stream.each(|x| x < 2);
    assert_eq!(stream.value(), vec![1, 2, 3, 4]);
}

#[test]
fn test_for_each_visits_everything() {
    let mut sum = 0;
    LazyStream::of(1..=4).for_each(|x| sum += x);
    assert_eq!(sum, 10);
}

#[test]
fn test_on_elem_ends_stream() {
    let mut indices = Vec::new();
    let result = LazyStream::of(vec![5, 6, 7, 8])
        .on_elem(|x, index| {
            indices.push(index);
            *x < 6
        })
        .value();
    assert_eq!(result, vec![5, 6]);
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_try_for_each_fails_fast() {
    let mut visited = Vec::new();
    let mut stream = LazyStream::of(1..=5);
    let result = stream.try_for_each(|x| {
        visited.push(x);
        if x == 3 {
            Err(format!("rejected {}", x))
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err("rejected 3".to_string()));
    assert_eq!(visited, vec![1, 2, 3]);
    assert_eq!(stream.first(), Some(1));
}

#[test]
fn test_reduce_and_fold() {
    assert_eq!(LazyStream::of(1..=4).reduce(|a, b| a + b), Some(10));
    assert_eq!(LazyStream::of(vec![7]).reduce(|a, b| a + b), Some(7));
    assert_eq!(LazyStream::<i32>::empty().reduce(|a, b| a + b), None);

    let joined = LazyStream::of(vec!["a", "b", "c"]).fold(String::new(), |mut acc, s| {
        acc.push_str(s);
        acc
    });
    assert_eq!(joined, "abc");
}

#[test]
fn test_reduce_is_repeatable() {
    let mut stream = LazyStream::of(1..=3).map(|x| x * 2);
    assert_eq!(stream.reduce(|a, b| a + b), Some(12));
    assert_eq!(stream.reduce(|a, b| a + b), Some(12));
}

#[test]
fn test_first_and_last() {
    let mut stream = LazyStream::of(vec![3, 1, 2]);
    assert_eq!(stream.first(), Some(3));
    assert_eq!(stream.last(), Some(2));

    stream.next();
    stream.next();
    assert_eq!(stream.first(), Some(3));

    assert_eq!(LazyStream::<i32>::empty().first(), None);
    assert_eq!(LazyStream::<i32>::empty().last(), None);
    assert_eq!(LazyStream::of(1..=9).filter(|x| x % 4 == 0).last(), Some(8));
}

#[test]
fn test_match_operations() {
    assert!(LazyStream::of(1..=5).any_match(|x| x == 3));
    assert!(!LazyStream::of(1..=5).any_match(|x| x > 5));
    assert!(LazyStream::of(1..=5).all_match(|x| x > 0));
    assert!(!LazyStream::of(1..=5).all_match(|x| x > 1));
    assert!(LazyStream::of(1..=5).none_match(|x| x > 5));
    assert!(!LazyStream::of(1..=5).none_match(|x| x == 1));
    assert!(LazyStream::<i32>::empty().all_match(|_| false));
}

#[test]
fn test_any_match_short_circuits() {
    let pulled = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulled);
    let found = LazyStream::of(1..=100)
        .on_elem(move |_, _| {
            counter.set(counter.get() + 1);
            true
        })
        .any_match(|x| x == 3);
    assert!(found);
    assert_eq!(pulled.get(), 3);
}

#[test]
fn test_collect_identity() {
    let values = vec![4, 8, 15, 16, 23, 42];
    let collected = LazyStream::of(values.clone()).collect(ArrayCollector::new());
    assert_eq!(collected, values);
}

#[test]
fn test_next_filter_keeps_cursor() {
    let mut stream = LazyStream::of(1..=6);
    assert_eq!(stream.next_filter(|x| *x > 2), Some(3));
    assert_eq!(stream.next_filter(|x| x % 2 == 0), Some(4));
    assert_eq!(stream.next_filter(|x| *x > 10), None);
}

#[test]
fn test_concat() {
    let result = LazyStream::of(vec![1, 2])
        .concat(vec![LazyStream::empty(), LazyStream::of(vec![3]), LazyStream::of(vec![4, 5])])
        .value();
    assert_eq!(result, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_concat_look_ahead() {
    let mut stream = LazyStream::of(vec![1]).concat(vec![LazyStream::of(vec![2, 3])]);
    assert_eq!(stream.look_ahead(3), Pull::Value(3));
    assert_eq!(stream.next(), Pull::Value(1));
    assert_eq!(stream.look_ahead(1), Pull::Value(2));
}

#[test]
fn test_sort() {
    assert_eq!(LazyStream::of(vec![3, 1, 2]).sort().value(), vec![1, 2, 3]);
    assert_eq!(
        LazyStream::of(vec![3, 1, 2]).sort_by(|a, b| b.cmp(a)).value(),
        vec![3, 2, 1]
    );
}

#[test]
fn test_iteration_protocol() {
    let mut stream = LazyStream::of(vec![1, 2, 3]);
    let doubled: Vec<i32> = stream.iter().map(|x| x * 2).collect();
    assert_eq!(doubled, vec![2, 4, 6]);
    assert!(!stream.has_next());

    let mut total = 0;
    for x in LazyStream::of(1..=4).limits(3) {
        total += x;
    }
    assert_eq!(total, 6);

    let from_iter: LazyStream<i32> = (1..4).collect();
    assert_eq!(from_iter.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_lazy_over_eager_source() {
    let result = LazyStream::of_data_source(Stream::of(vec![1, 2, 3]).limits(2))
        .map(|x| x + 1)
        .value();
    assert_eq!(result, vec![2, 3]);
}

#[test]
fn test_try_value() {
    let config = BufferConfig::new().initial_capacity(2).max_capacity(5);
    let mut stream = LazyStream::of(1..=10);
    assert!(matches!(
        stream.try_value(&config),
        Err(StreamError::CapacityExceeded { limit: 5 })
    ));

    let config = BufferConfig::new().max_capacity(10);
    assert_eq!(stream.try_value(&config).unwrap(), (1..=10).collect::<Vec<_>>());
}

#[test]
#[should_panic(expected = "boom")]
fn test_mapper_panic_propagates() {
    LazyStream::of(vec![1, 2])
        .map(|x| if x == 2 { panic!("boom") } else { x })
        .value();
}

#[test]
fn test_look_ahead_far_past_limit() {
    let mut stream = LazyStream::of(vec![1, 2, 3]).limits(2);
    stream.next();
    assert_eq!(stream.look_ahead(usize::MAX), Pull::EndOfStream);

    let mut unlimited = LazyStream::of(vec![1, 2, 3]);
    assert_eq!(unlimited.look_ahead(usize::MAX), Pull::EndOfStream);
}

#[test]
fn test_current_after_limit_reached() {
    let mut stream = LazyStream::of(vec![1, 2, 3]).limits(1);
    assert_eq!(stream.next(), Pull::Value(1));
    assert_eq!(stream.current(), Pull::Value(1));
    assert_eq!(stream.next(), Pull::EndOfStream);
    assert_eq!(stream.current(), Pull::EndOfStream);
    assert_eq!(stream.look_ahead(0), Pull::EndOfStream);

    stream.reset();
    assert_eq!(stream.current(), Pull::BeforeStream);
    assert_eq!(stream.next(), Pull::Value(1));
}
