//! Integration tests for events

#[cfg(test)]
mod tests {
    use haul_events::*;

    #[tokio::test]
    async fn test_event_emitter() {
        let (tx, mut rx) = channel();

        tx.emit_warning_with_context("status 404 accepted", "http://host/asset");
        tx.emit_debug("test debug");

        let event1 = rx.recv().await.unwrap();
        match event1 {
            AppEvent::General(GeneralEvent::Warning { message, context }) => {
                assert_eq!(message, "status 404 accepted");
                assert_eq!(context.as_deref(), Some("http://host/asset"));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_debug("ignored");
    }

    #[test]
    fn test_optional_sender() {
        let none: Option<EventSender> = None;
        // No receiver at all: only traced
        none.emit_warning_with_context("nobody listening", "test");
    }

    #[test]
    fn test_log_levels() {
        let failed = AppEvent::Transfer(TransferLifecycle::Failed {
            url: "http://host/asset".into(),
            file: "/tmp/out".into(),
            error: "boom".into(),
            code: None,
        });
        assert_eq!(failed.log_level(), tracing::Level::ERROR);

        let cleanup = AppEvent::Transfer(TransferLifecycle::CleanupFailed {
            file: "/tmp/out".into(),
            error: "busy".into(),
        });
        assert_eq!(cleanup.log_level(), tracing::Level::WARN);
        assert_eq!(cleanup.domain(), "transfer");
    }

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::Queue(QueueLifecycle::Started { jobs: 3 });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"domain":"queue","event":{"type":"Started","jobs":3}}"#
        );
    }
}
