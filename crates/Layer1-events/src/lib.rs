//! # peridot-events
//!
//! 동기 이벤트 이미터:
//! - Event: 이벤트 이름별 리스너 등록 (`on`, `once`), 발행 (`emit`), 제거
//! - Config: 리스너 한도 경고, 디버그 로깅 설정 (JSON/TOML)
//! - Error: 리스너 실패 및 호출 불가능한 콜백
//!
//! 모든 리스너는 emit을 호출한 스레드에서 등록 순서대로 즉시 실행됩니다.

pub mod config;
pub mod error;
pub mod event;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{EmitterConfig, DEFAULT_MAX_LISTENERS, EMITTER_CONFIG_FILE};

// ============================================================================
// Event (이벤트 시스템)
// ============================================================================
pub use event::{
    // Callback
    Callback,
    // Emitter
    EventEmitter,
    Listener,
    // Types
    ListenerEntry,
    ListenerId,
    ListenerResult,
    MethodDispatch,
    StaticFn,
};
