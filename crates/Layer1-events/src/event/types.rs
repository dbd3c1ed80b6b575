//! Event Types - 리스너 ID와 저장 항목 정의

use super::callback::Callback;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ============================================================================
// ListenerId
// ============================================================================

/// 리스너 고유 ID (이미터 인스턴스 내에서 단조 증가)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

// ============================================================================
// ListenerEntry
// ============================================================================

/// 등록된 리스너 항목
///
/// 저장된 후에는 수정되지 않으며, 항목 전체가 제거되는 경우만 있습니다.
/// 복사본(스냅샷)은 once 소비 플래그를 원본과 공유합니다.
#[derive(Debug, Clone)]
pub struct ListenerEntry {
    id: ListenerId,
    callback: Callback,
    once: bool,
    consumed: Arc<AtomicBool>,
}

impl ListenerEntry {
    pub(crate) fn new(id: ListenerId, callback: Callback, once: bool) -> Self {
        Self {
            id,
            callback,
            once,
            consumed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// once 리스너 여부 (첫 호출 직전에 제거됨)
    pub fn is_once(&self) -> bool {
        self.once
    }

    /// once 항목 소비 (처음 호출한 쪽만 true)
    pub(crate) fn try_consume(&self) -> bool {
        !self.consumed.swap(true, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_id_display() {
        assert_eq!(ListenerId::new(7).to_string(), "listener-7");
        assert!(ListenerId::new(1) < ListenerId::new(2));
    }

    #[test]
    fn test_consume_flag_is_shared_with_clones() {
        let entry = ListenerEntry::new(ListenerId::new(1), Callback::invalid("x"), true);
        let snapshot = entry.clone();

        assert!(snapshot.try_consume());
        assert!(!entry.try_consume());
        assert!(!snapshot.try_consume());
    }
}
