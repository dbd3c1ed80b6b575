//! Config - 이미터 설정 관리
//!
//! - `emitter.rs` - EventEmitter 동작 설정 (리스너 한도, 디버그 로깅)

mod emitter;

pub use emitter::{EmitterConfig, DEFAULT_MAX_LISTENERS, EMITTER_CONFIG_FILE};
