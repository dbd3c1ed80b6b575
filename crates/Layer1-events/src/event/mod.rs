//! Event System - 이벤트 발행/구독 시스템
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      EventEmitter                            │
//! │  "foo" ─▶ [ entry 1 ][ entry 2 (once) ][ entry 3 ]           │
//! │  "bar" ─▶ [ entry 4 ]                                        │
//! │                                                              │
//! │  emit("foo", args)                                           │
//! │    1. snapshot = listeners["foo"].clone()   (lock held)      │
//! │    2. for entry in snapshot                 (lock released)  │
//! │         once? → 저장소에서 먼저 제거                          │
//! │         callback.invoke(args)?                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```ignore
//! use peridot_events::{Callback, EventEmitter};
//! use serde_json::json;
//!
//! let emitter = EventEmitter::new();
//!
//! // 1. 리스너 등록
//! let listener = Callback::new(|args| {
//!     println!("foo: {:?}", args);
//!     Ok(())
//! });
//! emitter.on("foo", listener.clone());
//!
//! // 2. 한 번만 실행되는 리스너
//! emitter.once("foo", Callback::new(|_| Ok(())));
//!
//! // 3. 이벤트 발행
//! emitter.emit("foo", &[json!("bar"), json!("baz")])?;
//!
//! // 4. 제거
//! emitter.remove_listener("foo", &listener);
//! emitter.remove_all_listeners(None);
//! ```

pub mod callback;
pub mod emitter;
pub mod types;

// Re-exports
pub use callback::{Callback, Listener, ListenerResult, MethodDispatch, StaticFn};
pub use emitter::EventEmitter;
pub use types::{ListenerEntry, ListenerId};
