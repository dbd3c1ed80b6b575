//! Event Emitter - 동기 이벤트 발행/구독
//!
//! 이벤트 이름별로 리스너를 등록 순서대로 보관하고, emit 시 호출 스레드에서
//! 즉시 실행합니다.
//!
//! 잠금은 리스너 실행 중에 절대 유지되지 않습니다. emit은 시작 시점의
//! 리스너 목록 스냅샷을 순회하므로, 리스너 안에서 `on`/`once`/`remove_*`/`emit`을
//! 호출해도 현재 emit에는 영향이 없고 다음 emit부터 반영됩니다.

use super::callback::Callback;
use super::types::{ListenerEntry, ListenerId};
use crate::config::EmitterConfig;
use crate::Result;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

/// 잠금으로 보호되는 내부 상태
#[derive(Debug, Default)]
struct Registry {
    /// 이벤트 이름 → 등록 순서대로 정렬된 리스너
    ///
    /// 빈 목록은 저장하지 않습니다.
    listeners: HashMap<String, Vec<ListenerEntry>>,

    /// 리스너 한도 경고를 이미 출력한 이벤트
    warned: HashSet<String>,
}

impl Registry {
    /// 조건에 맞는 항목 제거 후 빈 목록 정리
    fn remove_where<F>(&mut self, event: &str, mut predicate: F) -> usize
    where
        F: FnMut(&ListenerEntry) -> bool,
    {
        let Some(entries) = self.listeners.get_mut(event) else {
            return 0;
        };

        let before = entries.len();
        entries.retain(|entry| !predicate(entry));
        let removed = before - entries.len();

        if entries.is_empty() {
            self.listeners.remove(event);
            self.warned.remove(event);
        }

        removed
    }
}

/// 이벤트 이미터
///
/// ## 사용법
///
/// ```
/// use peridot_events::{Callback, EventEmitter};
/// use serde_json::json;
///
/// let emitter = EventEmitter::new();
///
/// let greet = Callback::new(|args| {
///     println!("hello {}", args[0]);
///     Ok(())
/// });
///
/// emitter.on("greet", greet.clone());
/// emitter.emit("greet", &[json!("world")]).unwrap();
///
/// emitter.remove_listener("greet", &greet);
/// assert!(!emitter.has_listeners("greet"));
/// ```
#[derive(Debug)]
pub struct EventEmitter {
    /// 설정
    config: EmitterConfig,

    /// 등록된 리스너
    registry: Mutex<Registry>,

    /// 리스너 ID 카운터
    listener_counter: AtomicU64,

    /// emit 호출 수
    emit_count: AtomicU64,
}

impl EventEmitter {
    /// 기본 설정으로 생성
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// 커스텀 설정으로 생성
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            config,
            registry: Mutex::new(Registry::default()),
            listener_counter: AtomicU64::new(1),
            emit_count: AtomicU64::new(0),
        }
    }

    /// 현재 설정
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// 리스너 등록 (목록 끝에 추가)
    ///
    /// 같은 콜백을 여러 번 등록하면 등록한 횟수만큼 호출됩니다.
    /// 호출 가능 여부는 검사하지 않습니다.
    pub fn on(&self, event: impl Into<String>, callback: Callback) -> ListenerId {
        self.add_listener(event.into(), callback, false)
    }

    /// 한 번만 실행되는 리스너 등록
    ///
    /// 등록 이후 첫 emit에서 호출 직전에 제거됩니다.
    pub fn once(&self, event: impl Into<String>, callback: Callback) -> ListenerId {
        self.add_listener(event.into(), callback, true)
    }

    fn add_listener(&self, event: String, callback: Callback, once: bool) -> ListenerId {
        let id = ListenerId::new(self.listener_counter.fetch_add(1, Ordering::SeqCst));

        debug!(
            event = %event,
            listener_id = %id,
            callback = %callback.describe(),
            once,
            "Registering event listener"
        );

        let mut registry = self.registry.lock();
        let entries = registry.listeners.entry(event.clone()).or_default();
        entries.push(ListenerEntry::new(id, callback, once));
        let count = entries.len();

        if self.config.exceeds_max_listeners(count) && registry.warned.insert(event.clone()) {
            warn!(
                event = %event,
                count,
                max_listeners = self.config.max_listeners,
                "Possible listener leak: too many listeners for event"
            );
        }

        id
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// 이벤트 발행
    ///
    /// 시작 시점의 스냅샷을 등록 순서대로 호출합니다. 등록되지 않은 이벤트는
    /// 아무 일도 하지 않습니다. 리스너가 실패하면 남은 리스너는 호출되지 않고
    /// 에러가 그대로 반환됩니다.
    pub fn emit(&self, event: &str, args: &[Value]) -> Result<()> {
        let emit_no = self.emit_count.fetch_add(1, Ordering::SeqCst) + 1;

        let snapshot: Vec<ListenerEntry> = self
            .registry
            .lock()
            .listeners
            .get(event)
            .cloned()
            .unwrap_or_default();

        if self.config.debug_mode {
            trace!(
                event,
                listeners = snapshot.len(),
                args = args.len(),
                "Emitting event #{}",
                emit_no
            );
        }

        for entry in &snapshot {
            // once 리스너: 소비 플래그로 한 번만 실행, 호출 전에 저장소에서 제거
            if entry.is_once() {
                if !entry.try_consume() {
                    continue;
                }
                self.detach(event, entry.id());
            }

            if self.config.debug_mode {
                trace!(
                    event,
                    listener_id = %entry.id(),
                    once = entry.is_once(),
                    "Delivering event to listener"
                );
            }

            if let Err(e) = entry.callback().invoke(event, args) {
                debug!(event, listener_id = %entry.id(), error = ?e, "Listener failed, aborting emit");
                return Err(e);
            }
        }

        Ok(())
    }

    /// 저장소에서 항목 제거 (이미 제거된 경우 무시)
    fn detach(&self, event: &str, id: ListenerId) {
        self.registry
            .lock()
            .remove_where(event, |entry| entry.id() == id);
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// 콜백이 일치하는 리스너를 모두 제거
    ///
    /// 다른 이벤트의 리스너에는 영향이 없습니다. 제거된 개수를 반환합니다.
    pub fn remove_listener(&self, event: &str, callback: &Callback) -> usize {
        let removed = self
            .registry
            .lock()
            .remove_where(event, |entry| entry.callback() == callback);

        if removed > 0 {
            debug!(event, removed, callback = %callback.describe(), "Removed event listener");
        }

        removed
    }

    /// ID로 리스너 하나를 제거
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.lock();

        let event = registry
            .listeners
            .iter()
            .find(|(_, entries)| entries.iter().any(|entry| entry.id() == id))
            .map(|(event, _)| event.clone());

        let removed = match event {
            Some(event) => registry.remove_where(&event, |entry| entry.id() == id) > 0,
            None => false,
        };

        if removed {
            debug!(listener_id = %id, "Unregistered event listener");
        }

        removed
    }

    /// 리스너 일괄 제거
    ///
    /// `Some(event)`이면 해당 이벤트만, `None`이면 모든 이벤트를 비웁니다.
    pub fn remove_all_listeners(&self, event: Option<&str>) {
        let mut registry = self.registry.lock();

        match event {
            Some(event) => {
                let removed = registry.remove_where(event, |_| true);
                if removed > 0 {
                    debug!(event, removed, "Removed all listeners for event");
                }
            }
            None => {
                let removed: usize = registry.listeners.values().map(Vec::len).sum();
                registry.listeners.clear();
                registry.warned.clear();
                if removed > 0 {
                    debug!(removed, "Removed all listeners");
                }
            }
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// 이벤트의 현재 리스너 목록 (복사본)
    pub fn listeners(&self, event: &str) -> Vec<ListenerEntry> {
        self.registry
            .lock()
            .listeners
            .get(event)
            .cloned()
            .unwrap_or_default()
    }

    /// 이벤트의 리스너 수
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.lock().listeners.get(event).map_or(0, Vec::len)
    }

    /// 전체 리스너 수
    pub fn total_listener_count(&self) -> usize {
        self.registry.lock().listeners.values().map(Vec::len).sum()
    }

    /// 이벤트에 리스너가 하나라도 있는지 확인
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// 리스너가 있는 이벤트 이름 (정렬됨)
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.lock().listeners.keys().cloned().collect();
        names.sort();
        names
    }

    /// 총 emit 호출 수
    pub fn emit_count(&self) -> u64 {
        self.emit_count.load(Ordering::SeqCst)
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 테스트
// ============================================================================
