use super::*;

#[test]
fn test_memory_logger_records_levels_in_order() {
    let logger = MemoryLogger::new();
    logger.info("evaluating team/app");
    logger.warn("skipping team/app:broken");
    logger.error("delete failed");

    let lines = logger.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], (Level::Info, "evaluating team/app".to_string()));
    assert_eq!(lines[1].0, Level::Warn);
    assert_eq!(lines[2].0, Level::Error);
}

#[test]
fn test_memory_logger_filters_by_level() {
    let logger = MemoryLogger::new();
    logger.warn("one");
    logger.info("two");
    logger.warn("three");

    assert_eq!(logger.messages(Level::Warn), vec!["one", "three"]);
    assert!(logger.messages(Level::Error).is_empty());
}

#[test]
fn test_null_logger_is_usable_as_trait_object() {
    let logger: Arc<dyn Logger> = Arc::new(NullLogger);
    logger.info("ignored");
    logger.error("ignored");
}

#[test]
fn test_tracing_logger_without_subscriber_does_not_panic() {
    let logger = default_logger();
    logger.info("no subscriber installed");
    logger.warn("still fine");
}
