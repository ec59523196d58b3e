//! Integration tests for error types

#[cfg(test)]
mod tests {
    use haul_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::ConnectionFailed("refused".into());
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_integrity_display() {
        let err = IntegrityError::SizeMismatch {
            expected: 6144,
            actual: 2048,
        };
        assert_eq!(err.to_string(), "incorrect file size (2048, expected: 6144)");

        let err = IntegrityError::HashMismatch {
            algorithm: "sha1".into(),
            expected: "abc".into(),
            actual: None,
        };
        assert_eq!(
            err.to_string(),
            "incorrect sha1 hash (unreadable, expected: abc)"
        );
    }

    #[test]
    fn test_kind_mapping() {
        let size: Error = IntegrityError::SizeMismatch {
            expected: 1,
            actual: 2,
        }
        .into();
        assert_eq!(size.kind(), ErrorKind::IntegritySizeMismatch);

        let hash: Error = IntegrityError::HashMismatch {
            algorithm: "sha1".into(),
            expected: "a".into(),
            actual: Some("b".into()),
        }
        .into();
        assert_eq!(hash.kind(), ErrorKind::IntegrityHashMismatch);

        let write: Error = StorageError::WriteFailed {
            path: "/tmp/out".into(),
            message: "boom".into(),
        }
        .into();
        assert_eq!(write.kind(), ErrorKind::Write);

        assert_eq!(Error::Aborted.kind(), ErrorKind::Aborted);
        assert!(Error::Aborted.is_aborted());
        assert_eq!(Error::from(QueueError::AlreadyStarted).kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_error_clone() {
        let err = Error::from(NetworkError::HttpError {
            status: 404,
            message: "Not Found".into(),
        });
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_storage_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err = StorageError::create(&io_err, std::path::Path::new("/root/out"));
        assert!(matches!(err, StorageError::PermissionDenied { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        let err = StorageError::create(&io_err, std::path::Path::new("/nope/out"));
        assert!(matches!(err, StorageError::CreateFailed { .. }));
    }

    #[test]
    fn test_write_failures_classify_as_write() {
        let dest = std::path::Path::new("/data/out.bin");
        let full = std::io::Error::new(std::io::ErrorKind::StorageFull, "no space");
        let err: Error = StorageError::write(&full, dest).into();

        assert!(matches!(err, Error::Storage(StorageError::DiskFull { .. })));
        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(err.user_code(), Some("storage.disk_full"));
        assert!(!err.is_retryable());

        let interrupted = std::io::Error::new(std::io::ErrorKind::Interrupted, "eintr");
        let err: Error = StorageError::flush(&interrupted, dest).into();
        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_user_codes() {
        assert_eq!(Error::Aborted.user_code(), Some("error.aborted"));
        let err: Error = NetworkError::HttpError {
            status: 503,
            message: "Service Unavailable".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("network.http_error"));
        assert!(err.is_retryable());
    }
}
