//! Error types for peridot-events
//!
//! 등록 단계에서는 에러가 발생하지 않으며, 모든 실패는 emit 시점에 드러납니다.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// peridot-events 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Dispatch 관련
    // ========================================================================
    /// 호출 불가능한 값이 리스너로 등록된 상태에서 emit 됨
    #[error("Listener for '{event}' is not invocable: {callback}")]
    NotInvocable { event: String, callback: String },

    /// 리스너 실행 중 실패 (남은 리스너는 호출되지 않음)
    #[error("Listener {listener} failed while handling '{event}'")]
    Listener {
        event: String,
        listener: String,
        #[source]
        source: anyhow::Error,
    },

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 리스너 자체의 실패인지 확인 (설정/IO 에러와 구분)
    pub fn is_listener_failure(&self) -> bool {
        matches!(self, Error::NotInvocable { .. } | Error::Listener { .. })
    }

    /// 이벤트 이름 (dispatch 에러인 경우)
    pub fn event(&self) -> Option<&str> {
        match self {
            Error::NotInvocable { event, .. } | Error::Listener { event, .. } => Some(event),
            _ => None,
        }
    }

    /// NotInvocable 에러 생성 헬퍼
    pub fn not_invocable(event: impl Into<String>, callback: impl Into<String>) -> Self {
        Error::NotInvocable {
            event: event.into(),
            callback: callback.into(),
        }
    }

    /// Listener 에러 생성 헬퍼
    pub fn listener(
        event: impl Into<String>,
        listener: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Error::Listener {
            event: event.into(),
            listener: listener.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_failure_classification() {
        let err = Error::not_invocable("foo", "\"not a callable\"");
        assert!(err.is_listener_failure());
        assert_eq!(err.event(), Some("foo"));

        let err = Error::listener("bar", "listener-3", anyhow::anyhow!("boom"));
        assert!(err.is_listener_failure());
        assert_eq!(err.event(), Some("bar"));
        assert!(!err.to_string().contains("boom"));
        let source = std::error::Error::source(&err).expect("listener error has a source");
        assert_eq!(source.to_string(), "boom");

        // 에러 체인 출력 시 원인 메시지는 한 번만 나타남
        let chained = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chained.matches("boom").count(), 1);

        let err = Error::Config("bad".to_string());
        assert!(!err.is_listener_failure());
        assert_eq!(err.event(), None);
    }
}
